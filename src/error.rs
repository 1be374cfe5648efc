//! Unified error types used across all load/save phases.

use std::path::PathBuf;

use thiserror::Error;

use crate::migrate::SynthesisError;

/// Message shown to the user for any malformed-version, structural or
/// referential failure.
pub const INVALID_FORMAT_MESSAGE: &str = "The project file format is invalid.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Decode,
    Version,
    Migrate,
    Structure,
    Invariant,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Decode => write!(f, "Decode"),
            Phase::Version => write!(f, "Version"),
            Phase::Migrate => write!(f, "Migrate"),
            Phase::Structure => write!(f, "Structure"),
            Phase::Invariant => write!(f, "Invariant"),
        }
    }
}

/// A single coded finding. `path` is a JSON pointer into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub path: Option<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(
                f,
                "[{}:{}] {} (at '{}')",
                self.phase, self.code, self.message, path
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl Diagnostic {
    pub fn decode(code: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            code: code.into(),
            phase: Phase::Decode,
            message: message.into(),
            path: None,
        }
    }

    pub fn version(code: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            code: code.into(),
            phase: Phase::Version,
            message: message.into(),
            path: Some("/appVersion".into()),
        }
    }

    pub fn migrate(code: &str, message: impl Into<String>, path: Option<String>) -> Self {
        Diagnostic {
            code: code.into(),
            phase: Phase::Migrate,
            message: message.into(),
            path,
        }
    }

    pub fn structure(code: &str, message: impl Into<String>, path: impl Into<String>) -> Self {
        Diagnostic {
            code: code.into(),
            phase: Phase::Structure,
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn invariant(code: &str, message: impl Into<String>, path: Option<String>) -> Self {
        Diagnostic {
            code: code.into(),
            phase: Phase::Invariant,
            message: message.into(),
            path,
        }
    }
}

/// Fatal error of a load or save attempt.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The bytes are not a JSON document.
    #[error("Failed to parse project file: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// `appVersion` missing, not a string, or not `%d.%d.%d`.
    #[error("{0}")]
    MalformedVersion(Diagnostic),

    /// The document does not match the current schema.
    #[error("Project file does not match the project schema: {}", join(.0))]
    Structural(Vec<Diagnostic>),

    /// `audioKeys` and `audioItems` disagree.
    #[error("Project file failed integrity checks: {}", join(.0))]
    Referential(Vec<Diagnostic>),

    /// The timing collaborator failed while migrating an audio item.
    #[error("Failed to recompute phoneme timings for audio item '{key}'")]
    Synthesis {
        key: String,
        #[source]
        source: SynthesisError,
    },

    #[error("Failed to {operation} project file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize project data")]
    Serialize(#[source] serde_json::Error),
}

impl ProjectError {
    /// Whether the failure traces back to the file's format rather than to
    /// I/O or a collaborator.
    pub fn is_invalid_format(&self) -> bool {
        matches!(
            self,
            Self::MalformedVersion(_) | Self::Structural(_) | Self::Referential(_)
        )
    }

    /// Get a user-facing message for this error.
    pub fn user_message(&self) -> String {
        if self.is_invalid_format() {
            INVALID_FORMAT_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Coded diagnostics carried by validation-family errors.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::MalformedVersion(d) => std::slice::from_ref(d),
            Self::Structural(ds) | Self::Referential(ds) => ds,
            _ => &[],
        }
    }
}

fn join(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for project operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
