/// Word-character test equivalent to the `\w` class: letters, digits, `_`.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Basic normalization: lowercase + trim, punctuation retained.
/// Used by the coarse word-overlap scorer, where "dog!" and "dog" stay
/// distinct tokens.
pub fn basic_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Strict normalization: lowercase, drop every non-word/non-space character,
/// then split on whitespace runs. Punctuation is removed in place, so
/// "don't" becomes "dont" rather than two tokens.
pub fn strict_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| is_word_char(c) || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Words from `words` containing the target sound anywhere as a substring.
/// Tokens are already word-boundary delimited, so substring containment is
/// the word-boundary pattern `\b\w*<sound>\w*\b` over the token list.
pub fn words_containing<'a>(words: &'a [String], sound: &str) -> Vec<String> {
    words
        .iter()
        .filter(|word| word.contains(sound))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_words_lowercases_and_keeps_punctuation() {
        assert_eq!(basic_words("The Dog!"), ["the", "dog!"]);
    }

    #[test]
    fn basic_words_splits_on_whitespace_runs() {
        assert_eq!(basic_words("  a \t b\n c  "), ["a", "b", "c"]);
    }

    #[test]
    fn basic_words_empty_input() {
        assert!(basic_words("").is_empty());
        assert!(basic_words("   ").is_empty());
    }

    #[test]
    fn strict_words_strips_punctuation_in_place() {
        assert_eq!(strict_words("The Dog!"), ["the", "dog"]);
        assert_eq!(strict_words("don't stop"), ["dont", "stop"]);
    }

    #[test]
    fn strict_words_keeps_digits_and_underscore() {
        assert_eq!(strict_words("say_it 3 times"), ["say_it", "3", "times"]);
    }

    #[test]
    fn strict_words_all_punctuation_yields_empty() {
        assert!(strict_words("?!... ---").is_empty());
    }

    #[test]
    fn words_containing_matches_substring_anywhere() {
        let words = strict_words("think about the weather");
        assert_eq!(words_containing(&words, "th"), ["think", "the", "weather"]);
    }

    #[test]
    fn words_containing_no_matches() {
        let words = strict_words("big sun");
        assert!(words_containing(&words, "l").is_empty());
    }
}
