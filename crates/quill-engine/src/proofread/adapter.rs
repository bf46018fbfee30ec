use std::fmt;

use crate::proofread::wire::{CheckResponse, RemoteMatch};

/// Closed set of categories the proofreading panel styles findings by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Spelling,
    Grammar,
    Style,
}

/// Service category ids with a dedicated category; anything else is style
const CATEGORY_TABLE: &[(&str, ErrorCategory)] = &[
    ("TYPOS", ErrorCategory::Spelling),
    ("MISSPELLING", ErrorCategory::Spelling),
    ("GRAMMAR", ErrorCategory::Grammar),
];

impl ErrorCategory {
    pub fn from_category_id(id: &str) -> Self {
        CATEGORY_TABLE
            .iter()
            .find(|(key, _)| *key == id)
            .map_or(ErrorCategory::Style, |(_, category)| *category)
    }

    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Spelling => "Spelling",
            ErrorCategory::Grammar => "Grammar",
            ErrorCategory::Style => "Style",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A service finding normalized onto flat-text char offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalFinding {
    pub flat_offset: usize,
    pub flat_length: usize,
    pub message: String,
    pub short_message: String,
    pub category: ErrorCategory,
    pub rule_id: String,
    pub rule_description: String,
    /// Suggested fixes, best first
    pub replacements: Vec<String>,
    pub sentence: String,
}

impl ExternalFinding {
    pub fn flat_end(&self) -> usize {
        self.flat_offset + self.flat_length
    }
}

/// Converts UTF-16 offsets reported by the service to char offsets of the submitted text
#[derive(Debug, Clone)]
pub struct Utf16Offsets {
    /// UTF-16 offset at which each char starts, plus the total length
    starts: Vec<usize>,
}

impl Utf16Offsets {
    pub fn new(text: &str) -> Self {
        let mut starts = Vec::with_capacity(text.len() + 1);
        let mut offset = 0;
        for ch in text.chars() {
            starts.push(offset);
            offset += ch.len_utf16();
        }
        starts.push(offset);
        Self { starts }
    }

    /// Char offset for a UTF-16 offset.
    ///
    /// Offsets inside a surrogate pair round down to the char start; offsets
    /// past the end stay past the end so they fail to resolve later.
    pub fn to_char_offset(&self, utf16: usize) -> usize {
        let chars = self.starts.len() - 1;
        let total = self.starts[chars];
        if utf16 > total {
            return chars + (utf16 - total);
        }
        match self.starts.binary_search(&utf16) {
            Ok(index) => index,
            Err(index) => index - 1,
        }
    }
}

/// Normalize a service response against the exact text that was submitted
pub fn adapt(response: CheckResponse, submitted: &str) -> Vec<ExternalFinding> {
    let offsets = Utf16Offsets::new(submitted);
    response
        .matches
        .into_iter()
        .map(|remote| adapt_match(remote, &offsets))
        .collect()
}

fn adapt_match(remote: RemoteMatch, offsets: &Utf16Offsets) -> ExternalFinding {
    let start = offsets.to_char_offset(remote.offset);
    let end = offsets.to_char_offset(remote.offset.saturating_add(remote.length));
    ExternalFinding {
        flat_offset: start,
        flat_length: end.saturating_sub(start),
        category: ErrorCategory::from_category_id(&remote.rule.category.id),
        message: remote.message,
        short_message: remote.short_message,
        rule_id: remote.rule.id,
        rule_description: remote.rule.description,
        replacements: remote.replacements.into_iter().map(|r| r.value).collect(),
        sentence: remote.sentence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("TYPOS", ErrorCategory::Spelling)]
    #[case("MISSPELLING", ErrorCategory::Spelling)]
    #[case("GRAMMAR", ErrorCategory::Grammar)]
    #[case("STYLE", ErrorCategory::Style)]
    #[case("PUNCTUATION", ErrorCategory::Style)]
    #[case("", ErrorCategory::Style)]
    fn categories_fall_back_to_style(#[case] id: &str, #[case] expected: ErrorCategory) {
        assert_eq!(ErrorCategory::from_category_id(id), expected);
    }

    #[test]
    fn utf16_offsets_for_ascii_are_identity() {
        let offsets = Utf16Offsets::new("Teh cat");
        assert_eq!(offsets.to_char_offset(0), 0);
        assert_eq!(offsets.to_char_offset(4), 4);
        assert_eq!(offsets.to_char_offset(7), 7);
    }

    #[test]
    fn utf16_offsets_collapse_surrogate_pairs() {
        // '💫' is two UTF-16 units but one char
        let offsets = Utf16Offsets::new("a💫b");
        assert_eq!(offsets.to_char_offset(1), 1);
        assert_eq!(offsets.to_char_offset(2), 1);
        assert_eq!(offsets.to_char_offset(3), 2);
        assert_eq!(offsets.to_char_offset(4), 3);
    }

    #[test]
    fn utf16_offsets_past_the_end_stay_past_the_end() {
        let offsets = Utf16Offsets::new("ab");
        assert_eq!(offsets.to_char_offset(5), 5);
        assert_eq!(Utf16Offsets::new("").to_char_offset(3), 3);
    }

    #[test]
    fn adapt_converts_a_service_response() {
        let json = r#"{
            "software": {"name": "LanguageTool"},
            "matches": [{
                "message": "Possible spelling mistake found.",
                "shortMessage": "Spelling mistake",
                "offset": 3,
                "length": 3,
                "replacements": [{"value": "The"}, {"value": "Ten"}],
                "rule": {
                    "id": "MORFOLOGIK_RULE_EN_US",
                    "description": "Possible spelling mistake",
                    "category": {"id": "TYPOS", "name": "Possible Typo"}
                },
                "context": {"text": "💫 Teh cat", "offset": 3, "length": 3},
                "sentence": "💫 Teh cat"
            }]
        }"#;
        let response: CheckResponse = serde_json::from_str(json).unwrap();

        let findings = adapt(response, "💫 Teh cat");

        assert_eq!(
            findings,
            vec![ExternalFinding {
                flat_offset: 2,
                flat_length: 3,
                message: "Possible spelling mistake found.".to_string(),
                short_message: "Spelling mistake".to_string(),
                category: ErrorCategory::Spelling,
                rule_id: "MORFOLOGIK_RULE_EN_US".to_string(),
                rule_description: "Possible spelling mistake".to_string(),
                replacements: vec!["The".to_string(), "Ten".to_string()],
                sentence: "💫 Teh cat".to_string(),
            }]
        );
    }

    #[test]
    fn adapt_keeps_service_order_and_tolerates_missing_fields() {
        let json = r#"{"matches": [
            {"message": "b", "offset": 9, "length": 1, "rule": {"id": "R2", "category": {"id": "GRAMMAR"}}},
            {"message": "a", "offset": 0, "length": 2, "rule": {"id": "R1", "category": {"id": "CASING"}}}
        ]}"#;
        let response: CheckResponse = serde_json::from_str(json).unwrap();

        let findings = adapt(response, "ab cd efg h");
        let summary: Vec<_> = findings
            .iter()
            .map(|f| (f.message.as_str(), f.flat_offset, f.category))
            .collect();

        assert_eq!(
            summary,
            vec![("b", 9, ErrorCategory::Grammar), ("a", 0, ErrorCategory::Style)]
        );
        assert!(findings[0].replacements.is_empty());
    }
}
