use crate::pipeline::traits::PhoneticAnalyzer;
use crate::scoring::phrase_match::score_phrase_match;
use crate::scoring::suggestions::{SoundInventory, SuggestionLimits};
use crate::scoring::target_sound::analyze_target_sound_with;
use crate::scoring::word_overlap::{classify_words, score_basic_accuracy};
use crate::types::{ScoreInput, ScoreResult};

pub struct PronunciationScorer {
    analyzer: Box<dyn PhoneticAnalyzer>,
    inventory: SoundInventory,
    limits: SuggestionLimits,
}

pub(crate) struct PronunciationScorerParts {
    pub analyzer: Box<dyn PhoneticAnalyzer>,
    pub inventory: SoundInventory,
    pub limits: SuggestionLimits,
}

impl PronunciationScorer {
    pub(crate) fn from_parts(parts: PronunciationScorerParts) -> Self {
        Self {
            analyzer: parts.analyzer,
            inventory: parts.inventory,
            limits: parts.limits,
        }
    }

    pub fn analyzer_label(&self) -> String {
        self.analyzer.label()
    }

    /// Coarse word-overlap fallback score. See
    /// [`crate::scoring::word_overlap::score_basic_accuracy`].
    pub fn score_basic_accuracy(&self, target: &str, actual: &str) -> u32 {
        score_basic_accuracy(target, actual)
    }

    /// Strict transcript-vs-target similarity. See
    /// [`crate::scoring::phrase_match::score_phrase_match`].
    pub fn score_phrase_match(&self, transcribed: &str, target: &str) -> u32 {
        score_phrase_match(transcribed, target)
    }

    /// Sound-focused feedback for one completed utterance.
    pub fn analyze_target_sound(
        &self,
        transcript: &str,
        target_sound: &str,
        reference_phrase: Option<&str>,
    ) -> ScoreResult {
        if transcript.trim().is_empty() {
            tracing::debug!(target_sound, "empty transcript; scoring as no speech");
        }
        let analysis = self.analyzer.analyze(transcript);
        analyze_target_sound_with(
            &analysis,
            transcript,
            target_sound,
            reference_phrase,
            &self.inventory,
            &self.limits,
        )
    }

    /// Dispatch for batch tooling: target-sound analysis when a sound is
    /// under practice, otherwise the coarse word-overlap fallback with the
    /// phrase-match score alongside.
    pub fn score(&self, input: &ScoreInput) -> ScoreResult {
        let reference = non_empty(&input.reference_phrase);
        match input.target_sound.as_deref() {
            Some(sound) => self.analyze_target_sound(&input.transcript, sound, reference),
            None => {
                let reference_phrase = reference.unwrap_or("");
                let mut correct_words = Vec::new();
                let mut incorrect_words = Vec::new();
                for word_match in classify_words(reference_phrase, &input.transcript) {
                    if word_match.in_reference {
                        correct_words.push(word_match.word);
                    } else {
                        incorrect_words.push(word_match.word);
                    }
                }
                ScoreResult {
                    accuracy: score_basic_accuracy(reference_phrase, &input.transcript),
                    correct_words,
                    incorrect_words,
                    suggestions: Vec::new(),
                    phrase_match: reference
                        .map(|reference| score_phrase_match(&input.transcript, reference)),
                }
            }
        }
    }
}

fn non_empty(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
