//! Rule-based entity extraction
//!
//! Produces (text, label) pairs for recruiting organizations and date-like
//! tokens. Organizations come from the lexicon's company table; years from
//! a compiled pattern.

use crate::chat::Lexicon;
use crate::types::{Entity, EntityLabel};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref YEAR_RE: Regex = Regex::new(r"\b(19|20)\d{2}\b").unwrap();
}

/// Extracts ORG and DATE entities from free text
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    organizations: Vec<String>,
}

impl EntityExtractor {
    /// Build an extractor over the lexicon's organization table
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            organizations: lexicon
                .organizations
                .iter()
                .map(|o| o.to_uppercase())
                .collect(),
        }
    }

    /// Extract entities in query order: organizations first, then years.
    ///
    /// Organization matches are whole-word and case-insensitive; the entity
    /// text is the slice as it appears in the query, so downstream callers
    /// decide on normalization.
    pub fn extract(&self, query: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let upper = query.to_uppercase();

        for org in &self.organizations {
            if let Some(pos) = find_word(&upper, org) {
                // Byte offsets can drift between the query and its
                // uppercased form for non-ASCII text; fall back to the
                // table spelling when the slice doesn't line up.
                let text = query
                    .get(pos..pos + org.len())
                    .filter(|s| s.eq_ignore_ascii_case(org))
                    .unwrap_or(org.as_str());
                entities.push(Entity::new(text, EntityLabel::Org));
            }
        }

        for m in YEAR_RE.find_iter(query) {
            entities.push(Entity::new(m.as_str(), EntityLabel::Date));
        }

        entities
    }
}

/// Find `needle` in `haystack` at word boundaries. Both inputs are expected
/// uppercased; returns the byte offset of the first whole-word occurrence.
fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(rel) = haystack[search_from..].find(needle) {
        let pos = search_from + rel;
        let before_ok = pos == 0
            || !haystack[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let after = pos + needle.len();
        let after_ok = after == haystack.len()
            || !haystack[after..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric());

        if before_ok && after_ok {
            return Some(pos);
        }
        search_from = pos + needle.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(&Lexicon::default())
    }

    #[test]
    fn test_extract_org_and_year() {
        let entities = extractor().extract("What was TCS package in 2022?");
        assert!(entities.contains(&Entity::new("TCS", EntityLabel::Org)));
        assert!(entities.contains(&Entity::new("2022", EntityLabel::Date)));
    }

    #[test]
    fn test_extract_preserves_query_casing() {
        let entities = extractor().extract("tell me about infosys offers");
        let org = entities
            .iter()
            .find(|e| e.label == EntityLabel::Org)
            .unwrap();
        assert_eq!(org.text, "infosys");
    }

    #[test]
    fn test_org_requires_word_boundary() {
        // "it" is a department code, not in the org table, but "IBM" inside
        // another word must not match
        let entities = extractor().extract("the ibmers were here");
        assert!(entities.iter().all(|e| e.label != EntityLabel::Org));
    }

    #[test]
    fn test_year_requires_four_digits() {
        let entities = extractor().extract("room 202 on floor 3");
        assert!(entities.is_empty());

        let entities = extractor().extract("drives in 2019 and 2023");
        let years: Vec<_> = entities
            .iter()
            .filter(|e| e.label == EntityLabel::Date)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(years, vec!["2019", "2023"]);
    }

    #[test]
    fn test_no_entities() {
        assert!(extractor().extract("what should I cook tonight").is_empty());
    }
}
