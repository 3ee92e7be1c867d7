use std::collections::HashMap;

use crate::pipeline::traits::PhoneticAnalyzer;
use crate::types::SoundAnalysis;

/// Null-object analyzer: reports no sound data, which routes every analysis
/// through the untracked-sound fallback. The default when no richer
/// assessment backend is wired in.
pub struct NullPhoneticAnalyzer;

impl PhoneticAnalyzer for NullPhoneticAnalyzer {
    fn analyze(&self, _transcript: &str) -> HashMap<String, SoundAnalysis> {
        HashMap::new()
    }

    fn label(&self) -> String {
        "null".to_string()
    }
}

/// Replays a fixed per-sound analysis regardless of transcript. Used to
/// score recorded cases offline from analyzer output captured earlier.
pub struct StaticPhoneticAnalyzer {
    sounds: HashMap<String, SoundAnalysis>,
}

impl StaticPhoneticAnalyzer {
    pub fn new(sounds: HashMap<String, SoundAnalysis>) -> Self {
        Self { sounds }
    }
}

impl PhoneticAnalyzer for StaticPhoneticAnalyzer {
    fn analyze(&self, _transcript: &str) -> HashMap<String, SoundAnalysis> {
        self.sounds.clone()
    }

    fn label(&self) -> String {
        "static".to_string()
    }
}
