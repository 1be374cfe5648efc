//! User-facing project flows: new, load and save.
//!
//! A [`ProjectSession`] remembers which file the current project came from
//! and drives the host (dialogs and file access) around the codec.

use std::path::{Path, PathBuf};

use crate::codec::{self, AudioRegistry};
use crate::error::{ProjectError, Result};
use crate::migrate::TimingSynthesizer;
use crate::parse::types::{AudioItem, ProjectDocument};

pub const WARNING_TITLE: &str = "Warning";
pub const ERROR_TITLE: &str = "Error";
pub const DISCARD_UNSAVED_MESSAGE: &str =
    "Unsaved changes to the project will be discarded.\nDo you want to continue?";
pub const DISCARD_CURRENT_MESSAGE: &str =
    "Loading a project discards the current project.\nDo you want to continue?";

/// Dialogs, file access and application info supplied by the embedding app.
pub trait ProjectHost {
    /// `None` when the user cancels.
    fn select_load_path(&mut self) -> Option<PathBuf>;
    /// `None` when the user cancels.
    fn select_save_path(&mut self) -> Option<PathBuf>;
    fn confirm(&mut self, title: &str, message: &str) -> bool;
    fn read_bytes(&mut self, path: &Path) -> std::io::Result<Vec<u8>>;
    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
    fn report_error(&mut self, title: &str, message: &str);
    fn app_version(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Load this file instead of asking the host for one.
    pub file_path: Option<PathBuf>,
    /// Ask before replacing the current project.
    pub confirm: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            file_path: None,
            confirm: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Write back to the current file without asking for a path.
    pub overwrite: bool,
}

#[derive(Debug, Clone)]
pub struct NewProjectOptions {
    pub confirm: bool,
}

impl Default for NewProjectOptions {
    fn default() -> Self {
        NewProjectOptions { confirm: true }
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { path: PathBuf, items: usize },
    Cancelled,
    /// The error has already been logged and reported to the host.
    Failed(ProjectError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectSession {
    file_path: Option<PathBuf>,
}

impl ProjectSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Start over with a single empty item. Returns `false` if the user
    /// declined to discard the current project.
    pub fn create_new_project<H, R>(
        &mut self,
        host: &mut H,
        registry: &mut R,
        options: NewProjectOptions,
    ) -> bool
    where
        H: ProjectHost + ?Sized,
        R: AudioRegistry + ?Sized,
    {
        if options.confirm && !host.confirm(WARNING_TITLE, DISCARD_UNSAVED_MESSAGE) {
            return false;
        }

        registry.clear_all_items();
        registry.register_item(AudioItem::new("", Some(0)), None);
        self.file_path = None;

        tracing::info!("Created new project");
        true
    }

    /// Load a project file into `registry`.
    ///
    /// Errors are logged and reported through the host; the registry is only
    /// touched once the whole file has been migrated and validated.
    pub fn load_project_file<H, R>(
        &mut self,
        host: &mut H,
        registry: &mut R,
        synthesizer: &mut dyn TimingSynthesizer,
        options: LoadOptions,
    ) -> LoadOutcome
    where
        H: ProjectHost + ?Sized,
        R: AudioRegistry + ?Sized,
    {
        let path = match options.file_path {
            Some(path) => path,
            None => match host.select_load_path() {
                Some(path) => path,
                None => return LoadOutcome::Cancelled,
            },
        };

        let project = match read_and_decode(host, &path, synthesizer) {
            Ok(project) => project,
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "Failed to load project");
                host.report_error(ERROR_TITLE, &err.user_message());
                return LoadOutcome::Failed(err);
            }
        };

        if options.confirm && !host.confirm(WARNING_TITLE, DISCARD_CURRENT_MESSAGE) {
            return LoadOutcome::Cancelled;
        }

        let items = project.audio_keys.len();
        codec::restore_project(registry, project);
        self.file_path = Some(path.clone());

        tracing::info!(path = %path.display(), items, "Loaded project");
        LoadOutcome::Loaded { path, items }
    }

    /// Write the registry to a project file. Errors propagate unchanged.
    pub fn save_project_file<H, R>(
        &mut self,
        host: &mut H,
        registry: &R,
        options: SaveOptions,
    ) -> Result<SaveOutcome>
    where
        H: ProjectHost + ?Sized,
        R: AudioRegistry + ?Sized,
    {
        let path = match (&self.file_path, options.overwrite) {
            (Some(path), true) => path.clone(),
            _ => match host.select_save_path() {
                Some(path) => path,
                None => return Ok(SaveOutcome::Cancelled),
            },
        };

        let project = codec::snapshot_project(registry, &host.app_version());
        let bytes = codec::encode_project(&project)?;
        host.write_bytes(&path, &bytes)
            .map_err(|source| ProjectError::Io {
                operation: "write",
                path: path.clone(),
                source,
            })?;

        if self.file_path.is_none() {
            self.file_path = Some(path.clone());
        }

        tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved project");
        Ok(SaveOutcome::Saved(path))
    }
}

fn read_and_decode<H: ProjectHost + ?Sized>(
    host: &mut H,
    path: &Path,
    synthesizer: &mut dyn TimingSynthesizer,
) -> Result<ProjectDocument> {
    let bytes = host.read_bytes(path).map_err(|source| ProjectError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    codec::decode_project(&bytes, &host.app_version(), synthesizer)
}
