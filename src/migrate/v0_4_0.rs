//! Documents from before 0.4.0: `charactorIndex` typo and missing query fields.

use serde_json::Value;

use super::TimingSynthesizer;
use crate::error::Result;
use crate::parse::RawDocument;

pub const DEFAULT_SAMPLING_RATE: i32 = 24000;
pub const DEFAULT_VOLUME_SCALE: i32 = 1;
pub const DEFAULT_PHONEME_LENGTH: f64 = 0.1;

pub(super) fn apply(
    mut doc: RawDocument,
    _synthesizer: &mut dyn TimingSynthesizer,
) -> Result<RawDocument> {
    let Some(items) = doc.audio_items_mut() else {
        return Ok(doc);
    };

    for item in items.values_mut().filter_map(Value::as_object_mut) {
        if let Some(index) = item.remove("charactorIndex") {
            item.insert("characterIndex".into(), index);
        }
    }

    let mut defaulted = 0usize;
    for item in items.values_mut().filter_map(Value::as_object_mut) {
        let Some(query) = item.get_mut("query").and_then(Value::as_object_mut) else {
            continue;
        };
        query.insert("volumeScale".into(), DEFAULT_VOLUME_SCALE.into());
        query.insert("prePhonemeLength".into(), DEFAULT_PHONEME_LENGTH.into());
        query.insert("postPhonemeLength".into(), DEFAULT_PHONEME_LENGTH.into());
        query.insert("outputSamplingRate".into(), DEFAULT_SAMPLING_RATE.into());
        defaulted += 1;
    }

    tracing::debug!(queries = defaulted, "Filled pre-0.4.0 query defaults");
    Ok(doc)
}
