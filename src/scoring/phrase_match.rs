use std::collections::HashMap;

use crate::scoring::normalize::strict_words;

const WORD_PRESENCE_WEIGHT: f64 = 0.7;
const ORDER_WEIGHT: f64 = 0.3;
const LENGTH_PENALTY_SCALE: f64 = 25.0;
const ORDER_PENALTY_SCALE: f64 = 15.0;
/// Order cannot be assessed with fewer than 2 matched words.
const MIN_MATCHES_FOR_ORDER: usize = 2;

/// Strict transcript-vs-target similarity in [0, 100], combining word
/// presence, a length-difference penalty, and a word-order penalty. Low
/// values mean the user said something unrelated to the target phrase.
///
/// This is a weighted heuristic, not a metric: the penalty can push the raw
/// value below zero before clamping, and word presence is a set-membership
/// test rather than a multiset match.
pub fn score_phrase_match(transcribed: &str, target: &str) -> u32 {
    let transcribed_words = strict_words(transcribed);
    let target_words = strict_words(target);

    let matched = target_words
        .iter()
        .filter(|word| transcribed_words.contains(word))
        .count();
    let percentage_present = matched as f64 / target_words.len().max(1) as f64 * 100.0;

    let length_diff = transcribed_words.len().abs_diff(target_words.len());
    let length_penalty =
        length_diff as f64 / target_words.len().max(1) as f64 * LENGTH_PENALTY_SCALE;

    let order = if matched >= MIN_MATCHES_FOR_ORDER {
        order_score(&transcribed_words, &target_words)
    } else {
        100.0
    };

    let final_score =
        percentage_present * WORD_PRESENCE_WEIGHT - length_penalty + order * ORDER_WEIGHT;
    final_score.clamp(0.0, 100.0).round() as u32
}

/// 100 minus the inversion penalty over matched word positions. Each
/// transcribed word found in the target contributes that target word's
/// first index, in transcription order; an inversion is a later match
/// mapping to an earlier target position.
fn order_score(transcribed_words: &[String], target_words: &[String]) -> f64 {
    let mut first_index: HashMap<&str, usize> = HashMap::new();
    for (index, word) in target_words.iter().enumerate() {
        first_index.entry(word.as_str()).or_insert(index);
    }

    let matched_positions: Vec<usize> = transcribed_words
        .iter()
        .filter_map(|word| first_index.get(word.as_str()).copied())
        .collect();

    let max_possible = matched_positions.len() * matched_positions.len().saturating_sub(1) / 2;
    if max_possible == 0 {
        return 100.0;
    }
    let inversions = count_inversions(&matched_positions);
    100.0 - inversions as f64 / max_possible as f64 * ORDER_PENALTY_SCALE
}

fn count_inversions(positions: &[usize]) -> usize {
    let mut inversions = 0;
    for i in 0..positions.len() {
        for j in i + 1..positions.len() {
            if positions[i] > positions[j] {
                inversions += 1;
            }
        }
    }
    inversions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_scores_hundred() {
        assert_eq!(score_phrase_match("the dog", "the dog"), 100);
        assert_eq!(
            score_phrase_match("the quick brown fox", "the quick brown fox"),
            100
        );
    }

    #[test]
    fn case_and_punctuation_are_normalized_away() {
        assert_eq!(
            score_phrase_match("The Dog!", "the dog"),
            score_phrase_match("the dog", "the dog")
        );
    }

    #[test]
    fn reversed_words_pay_the_order_penalty() {
        // Full presence and equal length, but the single matched pair is
        // inverted: 70 - 0 + (100 - 15) * 0.3 = 95.5, rounded to 96.
        let reversed = score_phrase_match("dog the", "the dog");
        assert_eq!(reversed, 96);
        assert!(reversed < score_phrase_match("the dog", "the dog"));
    }

    #[test]
    fn unrelated_phrase_scores_low() {
        // No shared words, one-word length difference over a 4-word target:
        // 0 - 6.25 + 30 = 23.75, rounded to 24.
        assert_eq!(
            score_phrase_match("I like pizza", "The little lion laughed"),
            24
        );
    }

    #[test]
    fn single_matched_word_skips_the_order_penalty() {
        // Only "dog" matches, so order is not assessable: 100/3 * 0.7 - 0 + 30.
        assert_eq!(score_phrase_match("dog cat bird", "dog bee wasp"), 53);
    }

    #[test]
    fn rambling_transcript_clamps_at_zero() {
        let transcribed = "one two three four five six seven eight nine ten \
                           eleven twelve thirteen fourteen fifteen sixteen";
        assert_eq!(score_phrase_match(transcribed, "hello there"), 0);
    }

    #[test]
    fn missing_word_and_shorter_transcript() {
        // target: the little lion laughed; transcribed drops one word.
        // presence 75 * 0.7 - 25/4 + 30 = 76.25, rounded to 76.
        assert_eq!(
            score_phrase_match("the lion laughed", "the little lion laughed"),
            76
        );
    }

    #[test]
    fn empty_inputs_are_guarded() {
        // Zero-length word lists never divide by zero; the order term alone
        // survives: 0 - 0 + 30.
        assert_eq!(score_phrase_match("", ""), 30);
        assert_eq!(score_phrase_match("", "hello world"), 5);
    }

    #[test]
    fn count_inversions_counts_out_of_order_pairs() {
        assert_eq!(count_inversions(&[0, 1, 2, 3]), 0);
        assert_eq!(count_inversions(&[3, 2, 1, 0]), 6);
        assert_eq!(count_inversions(&[1, 0]), 1);
        assert_eq!(count_inversions(&[0]), 0);
        assert_eq!(count_inversions(&[]), 0);
    }
}
