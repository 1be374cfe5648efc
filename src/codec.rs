//! Project codec: bytes ⇄ [`ProjectDocument`], plus the registry commit.
//!
//! Public API: `decode_project`, `restore_project`, `snapshot_project`,
//! `encode_project`.

use std::collections::BTreeMap;

use crate::error::{Diagnostic, ProjectError, Result};
use crate::migrate::{self, TimingSynthesizer};
use crate::parse::RawDocument;
use crate::parse::types::{AudioItem, ProjectDocument};
use crate::validate;
use crate::version::VersionTriple;

/// The live, ordered collection of audio items a project is loaded into.
pub trait AudioRegistry {
    /// Keys in playback order.
    fn audio_keys(&self) -> Vec<String>;
    fn audio_items(&self) -> BTreeMap<String, AudioItem>;
    fn clear_all_items(&mut self);
    /// Insert `item` after `after` (or at the start when `None`) and return
    /// its new key.
    fn register_item(&mut self, item: AudioItem, after: Option<&str>) -> String;
}

/// Load path: decode, check versions, migrate, validate.
///
/// Nothing outside the returned value is touched, so a failure leaves the
/// caller's state intact.
pub fn decode_project(
    bytes: &[u8],
    running_version: &str,
    synthesizer: &mut dyn TimingSynthesizer,
) -> Result<ProjectDocument> {
    // 1. Decode
    let doc = RawDocument::from_bytes(bytes)?;

    // 2. Versions
    let declared = doc.app_version()?;
    let document_version: VersionTriple = declared.parse().map_err(|_| {
        ProjectError::MalformedVersion(Diagnostic::version(
            "V003",
            format!(
                "An invalid appVersion format '{declared}'. The appVersion should be in the format \"%d.%d.%d\""
            ),
        ))
    })?;
    let app_version: VersionTriple = running_version.parse().map_err(|_| {
        ProjectError::MalformedVersion(Diagnostic {
            path: None,
            ..Diagnostic::version(
                "V004",
                format!("The running application version '{running_version}' is not \"%d.%d.%d\""),
            )
        })
    })?;
    if document_version > app_version {
        tracing::warn!(
            %document_version,
            %app_version,
            "Project file was written by a newer application version"
        );
    }

    // 3. Migrate
    let doc = migrate::migrate(doc, document_version, synthesizer)?;

    // 4. Validate
    let project = validate::validate_document(doc)?;

    tracing::info!(
        %document_version,
        items = project.audio_items.len(),
        keys = project.audio_keys.len(),
        "Decoded project"
    );
    Ok(project)
}

/// Replace the registry contents with `project`, in `audio_keys` order.
pub fn restore_project<R: AudioRegistry + ?Sized>(registry: &mut R, project: ProjectDocument) {
    registry.clear_all_items();

    // Each new key anchors the next insertion, preserving file order.
    let mut previous: Option<String> = None;
    let mut registered = 0usize;
    for (_, item) in project.ordered_items() {
        previous = Some(registry.register_item(item.clone(), previous.as_deref()));
        registered += 1;
    }

    tracing::debug!(registered, "Rebuilt audio registry");
}

/// Save path: capture the registry as a current-format document.
pub fn snapshot_project<R: AudioRegistry + ?Sized>(registry: &R, running_version: &str) -> ProjectDocument {
    ProjectDocument {
        app_version: running_version.to_string(),
        audio_keys: registry.audio_keys(),
        audio_items: registry.audio_items(),
    }
}

pub fn encode_project(project: &ProjectDocument) -> Result<Vec<u8>> {
    serde_json::to_vec(project).map_err(ProjectError::Serialize)
}
