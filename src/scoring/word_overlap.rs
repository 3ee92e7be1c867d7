use crate::scoring::normalize::basic_words;
use crate::types::WordMatch;

/// Classify each word of `actual` by whether it appears anywhere in the
/// target word list. Membership is set-style: repeating a correct word keeps
/// counting, and word order is ignored.
pub fn classify_words(target: &str, actual: &str) -> Vec<WordMatch> {
    let target_words = basic_words(target);
    basic_words(actual)
        .into_iter()
        .map(|word| {
            let in_reference = target_words.contains(&word);
            WordMatch { word, in_reference }
        })
        .collect()
}

/// Coarse word-overlap accuracy in [0, 100]. The fallback score used when no
/// richer pronunciation assessment is available for the user's accent or
/// language. Punctuation is not stripped, so "dog!" does not match "dog".
pub fn score_basic_accuracy(target: &str, actual: &str) -> u32 {
    if actual.trim().is_empty() {
        return 0;
    }

    let target_words = basic_words(target);
    let matches = classify_words(target, actual);
    let denominator = target_words.len().max(matches.len());
    if denominator == 0 {
        return 0;
    }

    let matched = matches.iter().filter(|m| m.in_reference).count();
    let accuracy = (matched as f64 / denominator as f64 * 100.0).round() as u32;
    accuracy.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_actual_scores_zero() {
        assert_eq!(score_basic_accuracy("hello world", ""), 0);
        assert_eq!(score_basic_accuracy("hello world", "   "), 0);
    }

    #[test]
    fn exact_match_scores_hundred() {
        assert_eq!(score_basic_accuracy("the quick fox", "the quick fox"), 100);
    }

    #[test]
    fn case_is_ignored_but_punctuation_is_not() {
        assert_eq!(score_basic_accuracy("the dog", "The Dog"), 100);
        // "dog!" is a distinct token from "dog" in this variant.
        assert_eq!(score_basic_accuracy("the dog", "The Dog!"), 50);
    }

    #[test]
    fn seashells_tokenization_scenario() {
        // "seashells" vs "sea shells": only 5 of the 7 spoken tokens appear
        // in the 6-token target, so 5/7 rounds to 71.
        let accuracy = score_basic_accuracy(
            "Sally sells seashells by the seashore",
            "sally sells sea shells by the seashore",
        );
        assert_eq!(accuracy, 71);
    }

    #[test]
    fn repeated_correct_word_inflates_up_to_the_cap() {
        // Set membership, not multiset: each repetition of "dog" matches, so
        // 2/3 rounds to 67 and four repetitions saturate the denominator.
        assert_eq!(score_basic_accuracy("the dog runs", "dog dog"), 67);
        assert_eq!(score_basic_accuracy("the dog runs", "dog dog dog dog"), 100);
    }

    #[test]
    fn order_is_ignored() {
        assert_eq!(score_basic_accuracy("the dog runs", "runs dog the"), 100);
    }

    #[test]
    fn classify_words_flags_out_of_reference_tokens() {
        let matches = classify_words("the dog", "the cat");
        assert_eq!(
            matches,
            vec![
                WordMatch {
                    word: "the".to_string(),
                    in_reference: true
                },
                WordMatch {
                    word: "cat".to_string(),
                    in_reference: false
                },
            ]
        );
    }
}
