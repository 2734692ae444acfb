use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-z0-9]+").expect("valid token pattern"))
}

/// Splits text into index tokens.
///
/// The text is lowercased and maximal runs of ASCII letters and digits are
/// emitted in order. Tokens never cross a non-alphanumeric boundary;
/// single-character and numeric-only tokens are valid.
///
/// # Examples
///
/// ```
/// use seine::text::tokenize;
///
/// assert_eq!(tokenize("Hello, World! 2024"), vec!["hello", "world", "2024"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokenization() {
        assert_eq!(tokenize("Hello, World! 2024"), vec!["hello", "world", "2024"]);
    }

    #[test]
    fn test_lowercasing() {
        assert_eq!(tokenize("CalTech ROBOTICS"), vec!["caltech", "robotics"]);
    }

    #[test]
    fn test_punctuation_splits_tokens() {
        assert_eq!(tokenize("state-of-the-art"), vec!["state", "of", "the", "art"]);
        assert_eq!(tokenize("a.b.c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_char_and_numeric_tokens() {
        assert_eq!(tokenize("x = 4"), vec!["x", "4"]);
    }

    #[test]
    fn test_mixed_alphanumeric_run_is_one_token() {
        assert_eq!(tokenize("cs101"), vec!["cs101"]);
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("!@#$%^").is_empty());
    }

    #[test]
    fn test_non_ascii_is_a_boundary() {
        assert_eq!(tokenize("café"), vec!["caf"]);
    }
}
