//! Text normalization into a comparable token set.

use std::collections::HashSet;

/// Normalize text into a set of lowercase alphanumeric terms.
///
/// Lowercases the input, removes every character that is not an ASCII letter,
/// digit, or whitespace (removed outright, not replaced by a separator, so
/// `"don't"` becomes `"dont"`), then splits on whitespace. Duplicates
/// collapse; order is discarded.
pub fn tokenize(text: &str) -> HashSet<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> HashSet<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(tokenize("Sharma's News!"), set(&["sharmas", "news"]));
    }

    #[test]
    fn test_punctuation_removed_not_split() {
        // Apostrophe joins, it does not separate
        assert_eq!(tokenize("don't"), set(&["dont"]));
    }

    #[test]
    fn test_empty_string() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("  \t\n  ").is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(tokenize("the the THE the"), set(&["the"]));
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(tokenize("covid-19 in 2026"), set(&["covid19", "in", "2026"]));
    }

    #[test]
    fn test_non_ascii_letters_dropped() {
        // Only ASCII alphanumerics survive
        assert_eq!(tokenize("café"), set(&["caf"]));
    }

    #[test]
    fn test_only_lowercase_alnum_terms() {
        let tokens = tokenize("Mixed CASE, with; punct!uation?");
        for t in &tokens {
            assert!(
                t.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "unexpected character in token {:?}",
                t
            );
        }
    }
}
