//! Query intent classification
//!
//! Decides whether a query is small talk, outside the placement domain, or
//! a candidate for retrieval. Classification is deterministic given the
//! lexicon tables.

use crate::chat::{EntityExtractor, Lexicon};
use crate::types::EntityLabel;

/// Classification outcome, terminal on first match
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Small-talk match with the canned response to return
    Greeting(String),
    /// No placement keyword and no ORG / numeric-DATE entity
    Irrelevant,
    /// Worth running the retrieval pipeline
    Candidate,
}

/// Classifies queries against the lexicon tables
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    lexicon: Lexicon,
    extractor: EntityExtractor,
}

impl IntentClassifier {
    pub fn new(lexicon: Lexicon) -> Self {
        let extractor = EntityExtractor::new(&lexicon);
        Self { lexicon, extractor }
    }

    /// Classify a raw query.
    ///
    /// Greeting check first (ordered substring containment), then the
    /// irrelevance check: a placement keyword keeps the query, otherwise an
    /// ORG entity or a purely numeric DATE entity keeps it.
    pub fn classify(&self, query: &str) -> Intent {
        if let Some(response) = self.lexicon.find_greeting(query) {
            return Intent::Greeting(response.to_string());
        }

        let lower = query.to_lowercase();
        if self.lexicon.has_placement_keyword(&lower) {
            return Intent::Candidate;
        }

        let entities = self.extractor.extract(query);
        let relevant = entities.iter().any(|entity| match entity.label {
            EntityLabel::Org => true,
            EntityLabel::Date => entity.text.chars().all(|c| c.is_ascii_digit()),
        });

        if relevant {
            Intent::Candidate
        } else {
            Intent::Irrelevant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(Lexicon::default())
    }

    #[test]
    fn test_greeting_wins_over_keywords() {
        // Contains the "package" keyword but the greeting check runs first
        match classifier().classify("good morning, what is the package") {
            Intent::Greeting(response) => assert!(response.contains("Good morning")),
            other => panic!("expected greeting, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_query_is_candidate() {
        assert_eq!(
            classifier().classify("average package for freshers"),
            Intent::Candidate
        );
    }

    #[test]
    fn test_org_entity_rescues_keywordless_query() {
        // No placement keyword, but a known organization
        assert_eq!(classifier().classify("tell me about INFOSYS"), Intent::Candidate);
    }

    #[test]
    fn test_numeric_year_rescues_keywordless_query() {
        assert_eq!(classifier().classify("stats for 2023"), Intent::Candidate);
    }

    #[test]
    fn test_off_topic_is_irrelevant() {
        assert_eq!(
            classifier().classify("what should I cook for dinner"),
            Intent::Irrelevant
        );
    }
}
