use std::collections::HashMap;

use crate::scoring::normalize::{strict_words, words_containing};
use crate::scoring::phrase_match::score_phrase_match;
use crate::scoring::suggestions::{
    build_suggestions, missing_sound_words_suggestion, untracked_sound_suggestion,
    wrong_utterance_suggestion, SoundInventory, SuggestionLimits,
};
use crate::types::{ScoreResult, SoundAnalysis};

/// Phrase-match scores below this mean the user said something unrelated.
const WRONG_UTTERANCE_CUTOFF: u32 = 50;
/// Accuracy cap when every expected sound word is missing from the transcript.
const MISSING_SOUND_WORDS_CAP: u32 = 40;
/// Accuracy cap when the analyzer has no data for the requested sound.
const UNTRACKED_SOUND_CAP: u32 = 80;
/// A perfect ratio over fewer than this many sample words is weak evidence.
const SMALL_SAMPLE_MIN_WORDS: usize = 3;
const SMALL_SAMPLE_CAP: u32 = 90;
const ANALYZER_WEIGHT: f64 = 0.6;
const PHRASE_MATCH_WEIGHT: f64 = 0.4;

/// Sound-focused pronunciation feedback with the built-in articulation
/// inventory and default suggestion limits.
pub fn analyze_target_sound(
    analysis: &HashMap<String, SoundAnalysis>,
    transcript: &str,
    target_sound: &str,
    reference_phrase: Option<&str>,
) -> ScoreResult {
    analyze_target_sound_with(
        analysis,
        transcript,
        target_sound,
        reference_phrase,
        &SoundInventory::default(),
        &SuggestionLimits::default(),
    )
}

/// The full decision ladder. Each early branch is terminal: a transcript
/// that does not resemble the reference phrase, an untracked sound, or a
/// transcript missing every expected sound word short-circuits before the
/// per-word classification runs.
pub(crate) fn analyze_target_sound_with(
    analysis: &HashMap<String, SoundAnalysis>,
    transcript: &str,
    target_sound: &str,
    reference_phrase: Option<&str>,
    inventory: &SoundInventory,
    limits: &SuggestionLimits,
) -> ScoreResult {
    let phrase_match = reference_phrase.map(|reference| score_phrase_match(transcript, reference));

    if let (Some(reference), Some(pm)) = (reference_phrase, phrase_match) {
        if pm < WRONG_UTTERANCE_CUTOFF {
            tracing::debug!(
                phrase_match = pm,
                "transcript does not resemble the reference phrase"
            );
            return ScoreResult {
                accuracy: pm.min(WRONG_UTTERANCE_CUTOFF),
                correct_words: Vec::new(),
                incorrect_words: Vec::new(),
                suggestions: vec![wrong_utterance_suggestion(reference)],
                phrase_match,
            };
        }
    }

    let Some(target_analysis) = analysis.get(target_sound) else {
        return ScoreResult {
            accuracy: phrase_match.unwrap_or(100).min(UNTRACKED_SOUND_CAP),
            correct_words: Vec::new(),
            incorrect_words: Vec::new(),
            suggestions: vec![untracked_sound_suggestion(target_sound)],
            phrase_match,
        };
    };

    let transcript_words = strict_words(transcript);
    let words_with_sound = words_containing(&transcript_words, target_sound);

    if let (Some(reference), Some(pm)) = (reference_phrase, phrase_match) {
        let expected_words = words_containing(&strict_words(reference), target_sound);
        if !expected_words.is_empty()
            && !expected_words
                .iter()
                .any(|word| transcript_words.contains(word))
        {
            let suggestions = vec![missing_sound_words_suggestion(target_sound, &expected_words)];
            return ScoreResult {
                accuracy: pm.min(MISSING_SOUND_WORDS_CAP),
                correct_words: Vec::new(),
                incorrect_words: expected_words,
                suggestions,
                phrase_match,
            };
        }
    }

    let (correct_words, incorrect_words) = if target_sound == "l" {
        classify_l_words(&words_with_sound, &transcript_words, reference_phrase)
    } else {
        let incorrect_words = target_analysis.problematic.clone();
        let correct_words = words_with_sound
            .iter()
            .filter(|word| !incorrect_words.contains(word))
            .cloned()
            .collect();
        (correct_words, incorrect_words)
    };

    let mut accuracy = target_analysis.percentage;
    if accuracy > 100 {
        tracing::warn!(
            sound = target_sound,
            percentage = accuracy,
            "analyzer percentage above 100; clamping"
        );
        accuracy = 100;
    }
    if target_sound == "l" && !words_with_sound.is_empty() {
        accuracy =
            (correct_words.len() as f64 / words_with_sound.len() as f64 * 100.0).round() as u32;
        if accuracy == 100 && words_with_sound.len() < SMALL_SAMPLE_MIN_WORDS {
            accuracy = SMALL_SAMPLE_CAP;
        }
    }
    if let Some(pm) = phrase_match {
        accuracy =
            (accuracy as f64 * ANALYZER_WEIGHT + pm as f64 * PHRASE_MATCH_WEIGHT).round() as u32;
    }
    let accuracy = accuracy.min(100);

    let suggestions = build_suggestions(
        accuracy,
        target_sound,
        &correct_words,
        &incorrect_words,
        phrase_match,
        inventory,
        limits,
    );

    ScoreResult {
        accuracy,
        correct_words,
        incorrect_words,
        suggestions,
        phrase_match,
    }
}

/// Substitution-aware classification for the "l" sound. Reference words
/// containing "l" are probed with the common l→w and l→y substitutions
/// against the transcript; independently, any transcript sound word
/// containing both 'l' and 'w' is flagged by the co-occurrence check.
/// The co-occurrence check is deliberately crude and flags words like
/// "yellow" or "glows"; that behavior is part of the contract.
fn classify_l_words(
    words_with_sound: &[String],
    transcript_words: &[String],
    reference_phrase: Option<&str>,
) -> (Vec<String>, Vec<String>) {
    let mut incorrect_words: Vec<String> = Vec::new();

    if let Some(reference) = reference_phrase {
        for expected in words_containing(&strict_words(reference), "l") {
            let w_form = expected.replace('l', "w");
            let y_form = expected.replace('l', "y");
            if (transcript_words.contains(&w_form) || transcript_words.contains(&y_form))
                && !incorrect_words.contains(&expected)
            {
                incorrect_words.push(expected);
            }
        }
    }

    for word in words_with_sound {
        if word.contains('l') && word.contains('w') && !incorrect_words.contains(word) {
            incorrect_words.push(word.clone());
        }
    }

    let correct_words = words_with_sound
        .iter()
        .filter(|word| !incorrect_words.contains(word))
        .cloned()
        .collect();
    (correct_words, incorrect_words)
}
