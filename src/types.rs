#[derive(Debug, Clone)]
pub struct ScoreInput {
    /// Text returned by the speech-to-text service. Empty means "no speech detected".
    pub transcript: String,
    /// The phrase the user was prompted to say. Whitespace-only is treated as absent.
    pub reference_phrase: String,
    pub target_sound: Option<String>,
}

/// Per-sound correctness data supplied by a [`crate::pipeline::traits::PhoneticAnalyzer`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SoundAnalysis {
    /// Correctness ratio in [0, 100]. Values above 100 are clamped at scoring time.
    pub percentage: u32,
    /// Words the analyzer judged mispronounced.
    pub problematic: Vec<String>,
}

/// Classification of a single transcript word against the reference word list.
/// Derived per scoring call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    pub word: String,
    pub in_reference: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    /// Final blended score in [0, 100], rounded to the nearest integer.
    pub accuracy: u32,
    pub correct_words: Vec<String>,
    pub incorrect_words: Vec<String>,
    pub suggestions: Vec<String>,
    /// Holistic transcript-vs-reference similarity in [0, 100], when a
    /// reference phrase was available.
    pub phrase_match: Option<u32>,
}
