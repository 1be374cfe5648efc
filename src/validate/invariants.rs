//! Cross-reference rules over a structurally valid project (R001–R002).

use std::collections::HashSet;

use crate::error::Diagnostic;
use crate::parse::escape_pointer;
use crate::parse::types::ProjectDocument;

/// A named check appended to the invariant list.
pub type Invariant = fn(&ProjectDocument, &mut Vec<Diagnostic>);

pub const INVARIANTS: &[(&str, Invariant)] = &[
    ("audio-keys-resolve", r001_audio_keys_resolve),
    ("reachable-items-have-speaker", r002_reachable_items_have_speaker),
];

/// Run all invariant rules. Returns all errors found.
pub fn validate_invariants(project: &ProjectDocument) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    for (name, rule) in INVARIANTS {
        let before = errors.len();
        rule(project, &mut errors);
        if errors.len() > before {
            tracing::debug!(rule = name, violations = errors.len() - before, "Invariant failed");
        }
    }
    errors
}

fn r001_audio_keys_resolve(project: &ProjectDocument, errors: &mut Vec<Diagnostic>) {
    for (i, key) in project.audio_keys.iter().enumerate() {
        if !project.audio_items.contains_key(key) {
            errors.push(Diagnostic::invariant(
                "R001",
                format!("audioKeys entry '{key}' is not a key of audioItems"),
                Some(format!("/audioKeys/{i}")),
            ));
        }
    }
}

fn r002_reachable_items_have_speaker(project: &ProjectDocument, errors: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    for (key, item) in project.ordered_items() {
        if item.speaker.is_none() && seen.insert(key) {
            errors.push(Diagnostic::invariant(
                "R002",
                format!("Audio item '{key}' has no speaker"),
                Some(format!("/audioItems/{}", escape_pointer(key))),
            ));
        }
    }
}
