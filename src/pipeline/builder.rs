use std::path::Path;

use crate::config::{ScorerConfig, SoundInventoryConfig};
use crate::error::ScoreError;
use crate::pipeline::defaults::NullPhoneticAnalyzer;
use crate::pipeline::runtime::{PronunciationScorer, PronunciationScorerParts};
use crate::pipeline::traits::PhoneticAnalyzer;
use crate::scoring::suggestions::{SoundInventory, SuggestionLimits};

pub struct PronunciationScorerBuilder {
    config: ScorerConfig,
    analyzer: Option<Box<dyn PhoneticAnalyzer>>,
}

impl PronunciationScorerBuilder {
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            config,
            analyzer: None,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Box<dyn PhoneticAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn build(self) -> Result<PronunciationScorer, ScoreError> {
        let inventory = if self.config.inventory_path.is_empty() {
            SoundInventory::default()
        } else {
            load_inventory(Path::new(&self.config.inventory_path))?
        };

        let max_practice_words = if self.config.max_practice_words == 0 {
            ScorerConfig::DEFAULT_MAX_PRACTICE_WORDS
        } else {
            self.config.max_practice_words
        };
        let max_example_words = if self.config.max_example_words == 0 {
            ScorerConfig::DEFAULT_MAX_EXAMPLE_WORDS
        } else {
            self.config.max_example_words
        };

        Ok(PronunciationScorer::from_parts(PronunciationScorerParts {
            analyzer: self
                .analyzer
                .unwrap_or_else(|| Box::new(NullPhoneticAnalyzer)),
            inventory,
            limits: SuggestionLimits {
                max_practice_words,
                max_example_words,
            },
        }))
    }
}

fn load_inventory(path: &Path) -> Result<SoundInventory, ScoreError> {
    let file = SoundInventoryConfig::load(path)?;
    let mut entries = Vec::with_capacity(file.sounds.len());
    for entry in file.sounds {
        let sound = entry.sound.trim().to_lowercase();
        if sound.is_empty() {
            return Err(ScoreError::invalid_input(
                "sound inventory entry with empty sound",
            ));
        }
        if entry.tip.trim().is_empty() {
            return Err(ScoreError::invalid_input(format!(
                "sound inventory entry '{sound}' has an empty tip"
            )));
        }
        entries.push((sound, entry.tip));
    }
    Ok(SoundInventory::with_overrides(entries))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::pipeline::defaults::StaticPhoneticAnalyzer;
    use crate::types::SoundAnalysis;

    use super::*;

    #[test]
    fn builder_defaults_to_the_null_analyzer() {
        let scorer = PronunciationScorerBuilder::new(ScorerConfig::default())
            .build()
            .expect("build should succeed");
        assert_eq!(scorer.analyzer_label(), "null");
    }

    #[test]
    fn builder_analyzer_can_be_overridden() {
        let scorer = PronunciationScorerBuilder::new(ScorerConfig::default())
            .with_analyzer(Box::new(StaticPhoneticAnalyzer::new(HashMap::new())))
            .build()
            .expect("build should succeed");
        assert_eq!(scorer.analyzer_label(), "static");
    }

    #[test]
    fn zero_limits_fall_back_to_defaults() {
        let mut sounds = HashMap::new();
        sounds.insert(
            "r".to_string(),
            SoundAnalysis {
                percentage: 40,
                problematic: vec![
                    "rabbit".to_string(),
                    "river".to_string(),
                    "round".to_string(),
                ],
            },
        );
        let scorer = PronunciationScorerBuilder::new(ScorerConfig {
            max_practice_words: 0,
            max_example_words: 0,
            ..ScorerConfig::default()
        })
        .with_analyzer(Box::new(StaticPhoneticAnalyzer::new(sounds)))
        .build()
        .expect("build should succeed");
        // The default limit of three practice words applies despite the zeros.
        let result = scorer.analyze_target_sound("rabbit river round", "r", None);
        assert!(result.suggestions[1].contains("rabbit, river, round"));
    }

    #[test]
    fn inventory_file_overrides_builtin_tips() {
        let temp_dir = std::env::temp_dir();
        let inventory_path = temp_dir.join("speech_score_rs_builder_inventory.json");
        let inventory_json = r#"{
            "sounds": [
                { "sound": "R", "tip": "Rev your engine: rrr, rrr." }
            ]
        }"#;
        std::fs::write(&inventory_path, inventory_json).expect("write inventory");

        let config = ScorerConfig {
            inventory_path: inventory_path.to_string_lossy().to_string(),
            ..ScorerConfig::default()
        };
        let mut sounds = HashMap::new();
        sounds.insert(
            "r".to_string(),
            SoundAnalysis {
                percentage: 40,
                problematic: vec!["rabbit".to_string()],
            },
        );
        let scorer = PronunciationScorerBuilder::new(config)
            .with_analyzer(Box::new(StaticPhoneticAnalyzer::new(sounds)))
            .build()
            .expect("build should succeed");
        let result = scorer.analyze_target_sound("rabbit runs", "r", None);
        assert_eq!(result.suggestions[0], "Rev your engine: rrr, rrr.");

        let _ = std::fs::remove_file(&inventory_path);
    }

    #[test]
    fn build_fails_on_missing_inventory_path() {
        let config = ScorerConfig {
            inventory_path: "/nonexistent/inventory.json".to_string(),
            ..ScorerConfig::default()
        };
        let result = PronunciationScorerBuilder::new(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn build_fails_on_empty_sound_key() {
        let temp_dir = std::env::temp_dir();
        let inventory_path = temp_dir.join("speech_score_rs_builder_inventory_bad.json");
        let inventory_json = r#"{ "sounds": [ { "sound": "  ", "tip": "nope" } ] }"#;
        std::fs::write(&inventory_path, inventory_json).expect("write inventory");

        let config = ScorerConfig {
            inventory_path: inventory_path.to_string_lossy().to_string(),
            ..ScorerConfig::default()
        };
        let result = PronunciationScorerBuilder::new(config).build();
        assert!(matches!(result, Err(ScoreError::InvalidInput { .. })));

        let _ = std::fs::remove_file(&inventory_path);
    }
}
