//! Engine configuration: dynamic-variable table, digit table, phrase
//! library, vowel-sound exceptions.
//!
//! All tables carry built-in defaults and can be overridden per field from a
//! TOML file, so a partial file works. Configuration is always passed into
//! constructors explicitly; there is no global state, and two engines with
//! different configurations can coexist in one process.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Tables consumed by the tokenizer and the resolution engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Dynamic variable name → playable path template
    /// (e.g. `callout_type` → `type:{{callout_type}}`)
    #[serde(default = "default_variable_paths")]
    pub variables: HashMap<String, String>,

    /// Digit surface form → playable path. Covers the numerals 0-9 and their
    /// spelled-out forms.
    #[serde(default = "default_digit_paths")]
    pub digits: HashMap<String, String>,

    /// Multi-word phrases kept whole during segmentation
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,

    /// Words spoken with an initial vowel sound despite their spelling, or
    /// domain terms recorded that way. Drives "a" vs "an" selection.
    #[serde(default = "default_vowel_exceptions")]
    pub vowel_exceptions: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variables: default_variable_paths(),
            digits: default_digit_paths(),
            phrases: default_phrases(),
            vowel_exceptions: default_vowel_exceptions(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file. Missing fields fall back to the
    /// built-in defaults; an unreadable or invalid file is a hard error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid config {}: {}", path.display(), e)))
    }
}

fn default_variable_paths() -> HashMap<String, String> {
    [
        ("callout_type", "type:{{callout_type}}"),
        ("callout_reason", "reason:{{callout_reason}}"),
        ("callout_location", "location:{{callout_location}}"),
        ("level1_location", "location:{{level1_location}}"),
        ("level2_location", "location:{{level2_location}}"),
        ("level3_location", "location:{{level3_location}}"),
        ("level4_location", "location:{{level4_location}}"),
        ("contact_id", "names:{{contact_id}}"),
        // aliases for the same recording slot
        ("employee", "names:{{contact_id}}"),
        ("employee_name", "names:{{contact_id}}"),
        ("custom_message", "custom:{{custom_message}}"),
        ("env", "callflow:{{env}}"),
        ("pin", "pin:{{pin}}"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect()
}

fn default_digit_paths() -> HashMap<String, String> {
    let words = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];
    let mut table = HashMap::new();
    for (value, word) in words.iter().enumerate() {
        table.insert(value.to_string(), format!("digits:{}", value));
        table.insert(word.to_string(), format!("digits:{}", value));
    }
    table
}

fn default_phrases() -> Vec<String> {
    [
        "this is an",
        "this is a",
        "press any key",
        "to repeat",
        "if this is",
        "if you need",
        "to get",
        "to the phone",
        "is not home",
        "not home",
        "need more time",
        "more time",
        "callout from",
        "are you available",
        "enter your pin",
        "enter pin",
        "invalid entry",
        "please try again",
        "goodbye",
        "thank you",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_vowel_exceptions() -> Vec<String> {
    // silent-h words plus callout types recorded with a vowel onset
    ["hour", "honest", "honor", "electric", "emergency", "urgent"]
        .into_iter()
        .map(str::to_string)
        .collect()
}
