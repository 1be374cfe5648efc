//! Migration phase: bring an old raw document up to the current schema.
//!
//! Each entry of [`MIGRATIONS`] rewrites the documents written before its
//! threshold version. Entries are applied in ascending threshold order, so
//! a step may rely on the shape produced by every earlier step. New schema
//! changes are appended at the end of the table.

pub mod synthesis;
mod v0_4_0;
mod v0_5_0;

pub use synthesis::{SynthesisError, TimingSynthesizer};
pub use v0_4_0::{DEFAULT_PHONEME_LENGTH, DEFAULT_SAMPLING_RATE, DEFAULT_VOLUME_SCALE};

use crate::error::Result;
use crate::parse::RawDocument;
use crate::version::VersionTriple;

/// A version-gated transformation of the raw document.
pub struct Migration {
    /// Stable identifier, used in logs.
    pub id: &'static str,
    /// Documents with a version strictly below this are migrated.
    pub threshold: VersionTriple,
    pub description: &'static str,
    pub apply: fn(RawDocument, &mut dyn TimingSynthesizer) -> Result<RawDocument>,
}

impl std::fmt::Debug for Migration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migration")
            .field("id", &self.id)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

/// All migrations in ascending threshold order.
pub static MIGRATIONS: &[Migration] = &[
    Migration {
        id: "audio-items.character-index.query-defaults",
        threshold: VersionTriple::new(0, 4, 0),
        description: "Rename charactorIndex and add volume, phoneme padding and sampling rate defaults",
        apply: v0_4_0::apply,
    },
    Migration {
        id: "audio-items.stereo.phoneme-timings",
        threshold: VersionTriple::new(0, 5, 0),
        description: "Add outputStereo and recompute per-mora phoneme lengths",
        apply: v0_5_0::apply,
    },
];

/// Migrations a document at `version` still needs, in application order.
pub fn pending(version: VersionTriple) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS.iter().filter(move |m| version < m.threshold)
}

/// Run every pending migration over `doc`. The first failure aborts the
/// whole run and the partially migrated document is dropped.
pub fn migrate(
    doc: RawDocument,
    version: VersionTriple,
    synthesizer: &mut dyn TimingSynthesizer,
) -> Result<RawDocument> {
    pending(version).try_fold(doc, |doc, migration| {
        tracing::info!(
            id = migration.id,
            threshold = %migration.threshold,
            document_version = %version,
            "Applying project migration"
        );
        (migration.apply)(doc, &mut *synthesizer)
    })
}
