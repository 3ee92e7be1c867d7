use std::collections::HashMap;

/// Accuracy below this gets corrective articulation feedback.
const NEEDS_WORK_CUTOFF: u32 = 70;
/// Accuracy at or above this gets a congratulation.
const MASTERED_CUTOFF: u32 = 90;
/// Phrase-match scores below this add a say-the-whole-phrase reminder.
const WEAK_PHRASE_CUTOFF: u32 = 80;

const R_TIP: &str =
    "Curl your tongue up toward the roof of your mouth and growl a little, like a friendly tiger.";
const S_TIP: &str =
    "Keep the tip of your tongue just behind your top teeth and let the air slip out gently.";
const TH_TIP: &str =
    "Let the tip of your tongue peek out between your teeth and blow softly.";
const L_TIP: &str =
    "Touch the tip of your tongue to the bumpy ridge right behind your top teeth.";

/// Articulation tips per target sound. The built-in set covers the sounds
/// the practice exercises track; deployments may override or extend it from
/// a JSON inventory file.
#[derive(Debug, Clone)]
pub struct SoundInventory {
    tips: HashMap<String, String>,
}

impl Default for SoundInventory {
    fn default() -> Self {
        let mut tips = HashMap::new();
        tips.insert("r".to_string(), R_TIP.to_string());
        tips.insert("s".to_string(), S_TIP.to_string());
        tips.insert("th".to_string(), TH_TIP.to_string());
        tips.insert("l".to_string(), L_TIP.to_string());
        Self { tips }
    }
}

impl SoundInventory {
    /// Built-in inventory with per-sound tip overrides applied on top.
    pub fn with_overrides(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut inventory = Self::default();
        for (sound, tip) in entries {
            inventory.tips.insert(sound, tip);
        }
        inventory
    }

    /// The articulation tip for a sound, or the generic practice template
    /// for sounds the inventory does not know.
    pub fn articulation_tip(&self, sound: &str) -> String {
        self.tips.get(sound).cloned().unwrap_or_else(|| {
            format!("Practice words with the '{sound}' sound more carefully.")
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SuggestionLimits {
    pub max_practice_words: usize,
    pub max_example_words: usize,
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self {
            max_practice_words: 3,
            max_example_words: 2,
        }
    }
}

pub(crate) fn wrong_utterance_suggestion(reference_phrase: &str) -> String {
    format!("Try saying the exact phrase: \"{reference_phrase}\"")
}

pub(crate) fn untracked_sound_suggestion(sound: &str) -> String {
    format!("Focus more on the '{sound}' sound as you practice.")
}

pub(crate) fn missing_sound_words_suggestion(sound: &str, expected_words: &[String]) -> String {
    format!(
        "Listen closely and try these '{sound}' words: {}",
        expected_words.join(", ")
    )
}

/// Assemble feedback for a completed target-sound analysis. The three
/// accuracy bands are exclusive; within the corrective band the pieces
/// stack in a fixed order.
pub(crate) fn build_suggestions(
    accuracy: u32,
    target_sound: &str,
    correct_words: &[String],
    incorrect_words: &[String],
    phrase_match: Option<u32>,
    inventory: &SoundInventory,
    limits: &SuggestionLimits,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if accuracy < NEEDS_WORK_CUTOFF {
        suggestions.push(inventory.articulation_tip(target_sound));
        if !incorrect_words.is_empty() {
            let sample: Vec<&str> = incorrect_words
                .iter()
                .take(limits.max_practice_words)
                .map(String::as_str)
                .collect();
            suggestions.push(format!("Practice these words: {}", sample.join(", ")));
        }
        if phrase_match.is_some_and(|pm| pm < WEAK_PHRASE_CUTOFF) {
            suggestions
                .push("Remember to say the whole phrase from start to finish.".to_string());
        }
    } else if accuracy < MASTERED_CUTOFF {
        if correct_words.is_empty() {
            suggestions.push(format!(
                "Good progress! Try to include more words with the '{target_sound}' sound."
            ));
        } else {
            let sample: Vec<&str> = correct_words
                .iter()
                .take(limits.max_example_words)
                .map(String::as_str)
                .collect();
            suggestions.push(format!(
                "Nice work! Words like {} sounded great. Keep practicing!",
                sample.join(", ")
            ));
        }
    } else {
        suggestions.push(format!(
            "Excellent! Your '{target_sound}' sound is really strong. Keep it up!"
        ));
    }

    suggestions
}
