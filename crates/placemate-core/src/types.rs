//! Core data types for the placements pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of an answer returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerSource {
    /// Canned greeting / irrelevant / fallback responses
    RuleBased,
    /// Served from the shared answer cache
    Cache,
    /// Freshly generated by the language model
    Llm,
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleBased => write!(f, "rule-based"),
            Self::Cache => write!(f, "cache"),
            Self::Llm => write!(f, "llm"),
        }
    }
}

/// Response returned for a single query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub source: AnswerSource,
}

impl AnswerResponse {
    pub fn rule_based(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            source: AnswerSource::RuleBased,
        }
    }

    pub fn cached(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            source: AnswerSource::Cache,
        }
    }

    pub fn llm(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            source: AnswerSource::Llm,
        }
    }
}

/// Named-entity label produced by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Org,
    Date,
}

/// A (text, label) pair extracted from a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// One company's recruitment numbers for one drive year.
///
/// Every numeric field is optional; rendering defaults counts to 0 and a
/// missing salary to "N/A".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyStatRecord {
    pub company_name: String,
    pub year: i64,
    pub salary: Option<f64>,
    pub internship_ppo: Option<i64>,
    pub total_offers: Option<i64>,
    #[serde(rename = "CSE")]
    pub cse: Option<i64>,
    #[serde(rename = "CSBS")]
    pub csbs: Option<i64>,
    #[serde(rename = "CYS")]
    pub cys: Option<i64>,
    #[serde(rename = "AIML")]
    pub aiml: Option<i64>,
    #[serde(rename = "DS")]
    pub ds: Option<i64>,
    #[serde(rename = "IOT")]
    pub iot: Option<i64>,
    #[serde(rename = "IT")]
    pub it: Option<i64>,
    #[serde(rename = "ECE")]
    pub ece: Option<i64>,
    #[serde(rename = "EEE")]
    pub eee: Option<i64>,
    #[serde(rename = "EIE")]
    pub eie: Option<i64>,
    #[serde(rename = "MECH")]
    pub mech: Option<i64>,
    #[serde(rename = "CIVIL")]
    pub civil: Option<i64>,
    #[serde(rename = "AUTO")]
    pub auto: Option<i64>,
}

/// Free-text company insight document used for semantic search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightDocument {
    /// SHA-256 of the document text
    pub hash: String,
    pub company_name: Option<String>,
    pub doc: String,
}

/// Equality filter over the structured stats store.
///
/// Company names are stored uppercased; the constructor normalizes the
/// extracted entity text so lookups match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsFilter {
    pub company: Option<String>,
    pub year: Option<i64>,
}

impl StatsFilter {
    pub fn new(company: Option<&str>, year: Option<i64>) -> Self {
        Self {
            company: company.map(|c| c.trim().to_uppercase()),
            year,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.company.is_none() && self.year.is_none()
    }
}

impl fmt::Display for StatsFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.company, self.year) {
            (Some(c), Some(y)) => write!(f, "company_name = \"{}\" AND year = {}", c, y),
            (Some(c), None) => write!(f, "company_name = \"{}\"", c),
            (None, Some(y)) => write!(f, "year = {}", y),
            (None, None) => write!(f, "unfiltered"),
        }
    }
}
