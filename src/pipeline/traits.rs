use std::collections::HashMap;

use crate::types::SoundAnalysis;

/// The richer per-sound pronunciation assessment the scorer consumes but
/// does not own. Implementations may return an empty map when no assessment
/// is available (unsupported accent or language); the scorer degrades
/// gracefully in that case.
pub trait PhoneticAnalyzer: Send + Sync {
    fn analyze(&self, transcript: &str) -> HashMap<String, SoundAnalysis>;

    /// Short label recorded in report metadata.
    fn label(&self) -> String;
}
