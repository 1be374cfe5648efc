//! Typed shape of a current-format project document.
//!
//! These types are the serde target for a document that has passed
//! migration and structural validation. Optional fields are skipped on
//! output so that a saved file always satisfies the project schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// TOP-LEVEL PROJECT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub app_version: String,
    /// Registration order of `audio_items`.
    pub audio_keys: Vec<String>,
    pub audio_items: BTreeMap<String, AudioItem>,
}

impl ProjectDocument {
    /// Items in `audio_keys` order, skipping keys with no item.
    pub fn ordered_items(&self) -> impl Iterator<Item = (&str, &AudioItem)> {
        self.audio_keys
            .iter()
            .filter_map(|key| self.audio_items.get(key).map(|item| (key.as_str(), item)))
    }
}

// =============================================================================
// AUDIO ITEM
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<AudioQuery>,
    /// Item-level properties outside the schema (e.g. `characterIndex`).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AudioItem {
    pub fn new(text: impl Into<String>, speaker: Option<i32>) -> Self {
        AudioItem {
            text: text.into(),
            speaker,
            query: None,
            extra: BTreeMap::new(),
        }
    }
}

// =============================================================================
// SYNTHESIS PARAMETERS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioQuery {
    pub accent_phrases: Vec<AccentPhrase>,
    pub speed_scale: f32,
    pub pitch_scale: f32,
    pub intonation_scale: f32,
    pub volume_scale: f32,
    pub pre_phoneme_length: f32,
    pub post_phoneme_length: f32,
    pub output_sampling_rate: i32,
    pub output_stereo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kana: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccentPhrase {
    pub moras: Vec<Mora>,
    pub accent: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_mora: Option<Mora>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mora {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consonant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consonant_length: Option<f32>,
    pub vowel: String,
    pub vowel_length: f32,
    pub pitch: f32,
}

impl Mora {
    /// A consonant that is present and non-empty.
    pub fn has_consonant(&self) -> bool {
        self.consonant.as_deref().is_some_and(|c| !c.is_empty())
    }
}
