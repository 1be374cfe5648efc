pub mod codec;
pub mod error;
pub mod migrate;
pub mod parse;
pub mod session;
pub mod validate;
pub mod version;
pub mod wasm;

pub use codec::{AudioRegistry, decode_project, encode_project, restore_project, snapshot_project};
pub use error::{Diagnostic, Phase, ProjectError, Result};
pub use migrate::{SynthesisError, TimingSynthesizer};
pub use parse::types::{AccentPhrase, AudioItem, AudioQuery, Mora, ProjectDocument};
pub use session::{LoadOptions, LoadOutcome, NewProjectOptions, ProjectHost, ProjectSession, SaveOptions, SaveOutcome};
pub use version::VersionTriple;
