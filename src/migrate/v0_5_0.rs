//! Documents from before 0.5.0: no stereo flag and no per-mora phoneme lengths.
//!
//! Timing fields are first zeroed so every mora has them, then the
//! synthesizer is asked for authoritative values one item at a time and the
//! results are copied back by position.

use serde_json::{Map, Value};

use super::{SynthesisError, TimingSynthesizer};
use crate::error::{Diagnostic, ProjectError, Result};
use crate::parse::{RawDocument, escape_pointer};
use crate::parse::types::AccentPhrase;

pub(super) fn apply(
    mut doc: RawDocument,
    synthesizer: &mut dyn TimingSynthesizer,
) -> Result<RawDocument> {
    let Some(items) = doc.audio_items_mut() else {
        return Ok(doc);
    };

    for (key, item) in items.iter_mut() {
        let Some(item) = item.as_object_mut() else {
            continue;
        };
        let speaker = item
            .get("speaker")
            .and_then(Value::as_i64)
            .and_then(|s| i32::try_from(s).ok());
        let Some(query) = item.get_mut("query").and_then(Value::as_object_mut) else {
            continue;
        };

        query.insert("outputStereo".into(), Value::Bool(false));

        let Some(phrases) = query.get_mut("accentPhrases").and_then(Value::as_array_mut) else {
            continue;
        };
        zero_timings(phrases);

        let Some(speaker) = speaker else {
            tracing::warn!(key = %key, "Audio item has a query but no speaker; phoneme timings left at zero");
            continue;
        };

        let typed: Vec<AccentPhrase> = serde_json::from_value(Value::Array(phrases.clone()))
            .map_err(|e| {
                ProjectError::Structural(vec![Diagnostic::migrate(
                    "M001",
                    format!("Accent phrases cannot be read for timing synthesis: {e}"),
                    Some(format!("/audioItems/{}/query/accentPhrases", escape_pointer(key))),
                )])
            })?;

        tracing::debug!(key = %key, speaker, phrases = typed.len(), "Recomputing phoneme timings");
        synthesizer
            .synthesize_timings(&typed, speaker)
            .and_then(|timed| copy_timings(phrases, &timed))
            .map_err(|source| ProjectError::Synthesis {
                key: key.clone(),
                source,
            })?;
    }

    Ok(doc)
}

fn zero_timings(phrases: &mut [Value]) {
    for phrase in phrases.iter_mut().filter_map(Value::as_object_mut) {
        if let Some(pause) = phrase.get_mut("pauseMora").and_then(Value::as_object_mut) {
            pause.insert("vowelLength".into(), 0.into());
        }
        let Some(moras) = phrase.get_mut("moras").and_then(Value::as_array_mut) else {
            continue;
        };
        for mora in moras.iter_mut().filter_map(Value::as_object_mut) {
            if has_consonant(mora) {
                mora.insert("consonantLength".into(), 0.into());
            }
            mora.insert("vowelLength".into(), 0.into());
        }
    }
}

/// Copy synthesized lengths into the document by phrase, then mora, index.
fn copy_timings(phrases: &mut [Value], timed: &[AccentPhrase]) -> std::result::Result<(), SynthesisError> {
    if timed.len() != phrases.len() {
        return Err(SynthesisError::ShapeMismatch {
            location: "accentPhrases".into(),
            expected: phrases.len(),
            found: timed.len(),
        });
    }

    for (i, (new, old)) in timed.iter().zip(phrases.iter_mut()).enumerate() {
        let Some(old) = old.as_object_mut() else {
            continue;
        };

        if let Some(pause) = &new.pause_mora {
            if let Some(old_pause) = old.get_mut("pauseMora").and_then(Value::as_object_mut) {
                old_pause.insert("vowelLength".into(), pause.vowel_length.into());
            }
        }

        let Some(old_moras) = old.get_mut("moras").and_then(Value::as_array_mut) else {
            continue;
        };
        if new.moras.len() != old_moras.len() {
            return Err(SynthesisError::ShapeMismatch {
                location: format!("accentPhrases[{i}].moras"),
                expected: old_moras.len(),
                found: new.moras.len(),
            });
        }

        for (mora, old_mora) in new.moras.iter().zip(old_moras.iter_mut()) {
            let Some(old_mora) = old_mora.as_object_mut() else {
                continue;
            };
            if mora.has_consonant() {
                if let Some(length) = mora.consonant_length {
                    old_mora.insert("consonantLength".into(), length.into());
                }
            }
            old_mora.insert("vowelLength".into(), mora.vowel_length.into());
        }
    }

    Ok(())
}

fn has_consonant(mora: &Map<String, Value>) -> bool {
    match mora.get("consonant") {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Null | Value::Bool(false)) | None => false,
        Some(_) => true,
    }
}
