//! Answer matching for graded slots.

use crate::types::MatchingMode;
use serde::{Deserialize, Serialize};

/// Result of comparing a user answer to the reference answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
    /// Normalized user answer (for display).
    pub given_normalized: String,
    /// Normalized reference answer (for display).
    pub expected_normalized: String,
}

/// Compare a user answer to the reference answer.
pub fn compare_answers(given: &str, expected: &str, mode: MatchingMode) -> MatchResult {
    match mode {
        MatchingMode::Exact => MatchResult {
            is_correct: given == expected,
            matching_mode: mode,
            given_normalized: given.to_string(),
            expected_normalized: expected.to_string(),
        },
        MatchingMode::CaseInsensitive => {
            let given_normalized = normalize_whitespace(given);
            let expected_normalized = normalize_whitespace(expected);
            let is_correct = given_normalized.to_lowercase() == expected_normalized.to_lowercase();
            MatchResult {
                is_correct,
                matching_mode: mode,
                given_normalized,
                expected_normalized,
            }
        }
    }
}

/// Whether a recorded answer counts as left blank.
pub fn is_blank(given: Option<&str>) -> bool {
    given.map_or(true, |s| s.trim().is_empty())
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_exact() {
        let result = compare_answers("B", "B", MatchingMode::Exact);
        assert!(result.is_correct);

        let result = compare_answers("b", "B", MatchingMode::Exact);
        assert!(!result.is_correct);

        let result = compare_answers(" B", "B", MatchingMode::Exact);
        assert!(!result.is_correct);
    }

    #[test]
    fn test_compare_case_insensitive() {
        let result = compare_answers("london", "London", MatchingMode::CaseInsensitive);
        assert!(result.is_correct);

        let result = compare_answers("SET FIRE", "set fire", MatchingMode::CaseInsensitive);
        assert!(result.is_correct);

        let result = compare_answers("paris", "London", MatchingMode::CaseInsensitive);
        assert!(!result.is_correct);
    }

    #[test]
    fn test_whitespace_normalization() {
        let result = compare_answers("  set   fire  ", "set fire", MatchingMode::CaseInsensitive);
        assert!(result.is_correct);
        assert_eq!(result.given_normalized, "set fire");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("a")));
    }
}
