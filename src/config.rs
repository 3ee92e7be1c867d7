use std::path::Path;

use crate::error::ScoreError;

#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Optional path to a sound-inventory JSON file overriding the built-in
    /// articulation tips. Empty means the built-in inventory.
    pub inventory_path: String,
    /// How many problem words a single suggestion may name.
    pub max_practice_words: usize,
    /// How many well-pronounced words positive feedback may echo back.
    pub max_example_words: usize,
}

impl ScorerConfig {
    pub const DEFAULT_MAX_PRACTICE_WORDS: usize = 3;
    pub const DEFAULT_MAX_EXAMPLE_WORDS: usize = 2;
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            inventory_path: String::new(),
            max_practice_words: Self::DEFAULT_MAX_PRACTICE_WORDS,
            max_example_words: Self::DEFAULT_MAX_EXAMPLE_WORDS,
        }
    }
}

/// On-disk override for the articulation-tip inventory. Deployments manage
/// this file the same way the source system's admin panel managed settings.
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct SoundInventoryConfig {
    #[serde(default)]
    pub sounds: Vec<SoundTipEntry>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct SoundTipEntry {
    pub sound: String,
    pub tip: String,
}

impl SoundInventoryConfig {
    pub(crate) fn load(path: &Path) -> Result<Self, ScoreError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoreError::io("read sound inventory", e))?;
        serde_json::from_str(&data).map_err(|e| ScoreError::json("parse sound inventory", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scorer_config_default() {
        let config = ScorerConfig::default();
        assert!(config.inventory_path.is_empty());
        assert_eq!(
            config.max_practice_words,
            ScorerConfig::DEFAULT_MAX_PRACTICE_WORDS
        );
        assert_eq!(
            config.max_example_words,
            ScorerConfig::DEFAULT_MAX_EXAMPLE_WORDS
        );
        assert_eq!(config.max_practice_words, 3);
        assert_eq!(config.max_example_words, 2);
    }

    #[test]
    fn sound_inventory_parses_entries() {
        let json = r#"{
            "sounds": [
                { "sound": "r", "tip": "Growl like a friendly lion." },
                { "sound": "ch", "tip": "Start with your tongue where 't' lives." }
            ]
        }"#;
        let inventory: SoundInventoryConfig =
            serde_json::from_str(json).expect("valid inventory json");
        assert_eq!(inventory.sounds.len(), 2);
        assert_eq!(inventory.sounds[0].sound, "r");
        assert_eq!(inventory.sounds[1].sound, "ch");
    }

    #[test]
    fn sound_inventory_sounds_default_to_empty() {
        let inventory: SoundInventoryConfig =
            serde_json::from_str("{}").expect("empty inventory json");
        assert!(inventory.sounds.is_empty());
    }
}
