//! Versioned phrase/keyword tables driving intent classification
//!
//! The tables ship with compiled-in defaults and can be overridden from the
//! config file, so small-talk phrases, placement keywords, and the company
//! list are extendable without code changes.

use serde::{Deserialize, Serialize};

/// One greeting phrase and its canned response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingEntry {
    pub phrase: String,
    pub response: String,
}

impl GreetingEntry {
    fn new(phrase: &str, response: &str) -> Self {
        Self {
            phrase: phrase.to_string(),
            response: response.to_string(),
        }
    }
}

/// Phrase and keyword tables for the classifier and entity extractor.
///
/// Greeting matching walks `greetings` in declaration order and the first
/// phrase contained in the query wins. Order is part of the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    /// Bumped whenever the shipped tables change
    #[serde(default = "default_version")]
    pub version: u32,

    /// Ordered small-talk table, first containing phrase wins
    #[serde(default = "default_greetings")]
    pub greetings: Vec<GreetingEntry>,

    /// Substrings that mark a query as placement-related
    #[serde(default = "default_placement_keywords")]
    pub placement_keywords: Vec<String>,

    /// Known recruiting organizations for ORG entity extraction
    #[serde(default = "default_organizations")]
    pub organizations: Vec<String>,

    /// Canned response for queries outside the placement domain
    #[serde(default = "default_irrelevant_response")]
    pub irrelevant_response: String,

    /// Canned response when the language model cannot be reached
    #[serde(default = "default_unavailable_response")]
    pub unavailable_response: String,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            version: default_version(),
            greetings: default_greetings(),
            placement_keywords: default_placement_keywords(),
            organizations: default_organizations(),
            irrelevant_response: default_irrelevant_response(),
            unavailable_response: default_unavailable_response(),
        }
    }
}

impl Lexicon {
    /// Find the greeting response for a query, if any phrase is contained
    /// in it (case-insensitive). First table entry wins.
    pub fn find_greeting(&self, query: &str) -> Option<&str> {
        let lower = query.trim().to_lowercase();
        self.greetings
            .iter()
            .find(|entry| lower.contains(&entry.phrase))
            .map(|entry| entry.response.as_str())
    }

    /// Whether the lowercased query contains any placement keyword
    pub fn has_placement_keyword(&self, lower_query: &str) -> bool {
        self.placement_keywords
            .iter()
            .any(|keyword| lower_query.contains(keyword.as_str()))
    }
}

fn default_version() -> u32 {
    1
}

fn default_greetings() -> Vec<GreetingEntry> {
    vec![
        GreetingEntry::new(
            "hello",
            "Hello! 👋 How can I help you with placement-related queries today?",
        ),
        GreetingEntry::new(
            "hi",
            "Hi there! 😊 I'm here to assist with any recruitment or company-related info.",
        ),
        GreetingEntry::new(
            "hey",
            "Hey! 👋 Ask me about company stats, offers, or placement trends.",
        ),
        GreetingEntry::new(
            "good morning",
            "Good morning! 🌞 What placement info can I help you with today?",
        ),
        GreetingEntry::new(
            "good afternoon",
            "Good afternoon! 🌤️ Let me know your placement or company-related query.",
        ),
        GreetingEntry::new(
            "good evening",
            "Good evening! 🌙 Feel free to ask about placement records or hiring stats.",
        ),
        GreetingEntry::new(
            "how are you",
            "I'm great, thanks for asking! 😊 What placement info can I fetch for you?",
        ),
        GreetingEntry::new(
            "how's it going",
            "All good here! 🚀 Let me know how I can help with placement insights.",
        ),
        GreetingEntry::new(
            "who are you",
            "I'm your Placements Assistant 🤖 here to help you understand company recruitment trends.",
        ),
        GreetingEntry::new(
            "what's up",
            "Not much! Just helping students with placement queries. What can I do for you?",
        ),
        GreetingEntry::new(
            "greetings",
            "Greetings! ✨ I'm here to support you with your placement-related questions.",
        ),
    ]
}

fn default_placement_keywords() -> Vec<String> {
    [
        "placement",
        "recruitment",
        "company",
        "drive",
        "job",
        "offer",
        "internship",
        "ppo",
        "package",
        "ctc",
        "stipend",
        "hiring",
        "selection",
        "shortlist",
        "round",
        "interview",
        "aptitude",
        "coding",
        "technical",
        "hr",
        "profile",
        "domain",
        "location",
        "role",
        "experience",
        "vacancy",
        "opportunity",
        "campus",
        "off-campus",
        "on-campus",
        "hike",
        "promotion",
        "designation",
        "panel",
        "resume",
        "cv",
        "test",
        "assessment",
        "criteria",
        "eligibility",
        "batch",
        "freshers",
        "referred",
        "walk-in",
        "openings",
        "interviews",
        "interviewed",
        "recruited",
        "exam",
        "interview process",
        "interview pattern",
        "interview experience",
        "joining",
        "bond",
        "agreement",
        "notice period",
        "conversion",
        "full-time",
        "intern to full-time",
        "offer letter",
        "joining date",
        "company insights",
        "placement stats",
        "placement statistics",
        "students placed",
        "placement record",
        "average package",
        "highest package",
        "placement report",
        "selection process",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_organizations() -> Vec<String> {
    [
        "TCS",
        "INFOSYS",
        "WIPRO",
        "ACCENTURE",
        "COGNIZANT",
        "CAPGEMINI",
        "HCL",
        "TECH MAHINDRA",
        "IBM",
        "DELOITTE",
        "AMAZON",
        "MICROSOFT",
        "GOOGLE",
        "ORACLE",
        "SAP",
        "ZOHO",
        "MINDTREE",
        "LTIMINDTREE",
        "MPHASIS",
        "HEXAWARE",
        "VIRTUSA",
        "EPAM",
        "PAYPAL",
        "JPMORGAN",
        "GOLDMAN SACHS",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_irrelevant_response() -> String {
    "I'm here to assist with placement and company-related queries only. 😊 \
     Feel free to ask me about companies, roles, offers, internships, or hiring stats!"
        .to_string()
}

fn default_unavailable_response() -> String {
    "I'm having trouble reaching our records right now. Please try again in a moment!".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_first_match_wins() {
        let lexicon = Lexicon::default();
        // "hello" precedes "hi" in the table, and "hello" contains "hi"
        // nowhere, but "hello, how are you" contains both "hello" and
        // "how are you" - the earlier entry must win.
        let response = lexicon.find_greeting("Hello, how are you?").unwrap();
        assert!(response.starts_with("Hello!"));
    }

    #[test]
    fn test_greeting_case_insensitive_substring() {
        let lexicon = Lexicon::default();
        assert!(lexicon.find_greeting("GOOD MORNING everyone").is_some());
        assert!(lexicon.find_greeting("  hey there  ").is_some());
        assert!(lexicon.find_greeting("average package of TCS").is_none());
    }

    #[test]
    fn test_placement_keyword_detection() {
        let lexicon = Lexicon::default();
        assert!(lexicon.has_placement_keyword("what is the average package"));
        assert!(lexicon.has_placement_keyword("ppo conversion rate"));
        assert!(!lexicon.has_placement_keyword("what is the weather today"));
    }

    #[test]
    fn test_lexicon_yaml_override() {
        let yaml = r#"
version: 2
greetings:
  - phrase: "namaste"
    response: "Namaste!"
"#;
        let lexicon: Lexicon = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(lexicon.version, 2);
        assert_eq!(lexicon.find_greeting("namaste"), Some("Namaste!"));
        assert!(lexicon.find_greeting("hello").is_none());
        // Unspecified tables fall back to the shipped defaults
        assert!(lexicon.has_placement_keyword("placement"));
    }
}
