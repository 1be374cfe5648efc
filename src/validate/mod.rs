//! Validation phase: structural schema, then cross-reference invariants.
//!
//! The document is materialized into [`ProjectDocument`] between the two
//! layers, so invariants work on typed data.

pub mod invariants;
pub mod schema;
pub mod structural;

use serde_json::Value;

use crate::error::{Diagnostic, ProjectError, Result};
use crate::parse::RawDocument;
use crate::parse::types::ProjectDocument;

/// Validate a migrated document and produce the typed project.
pub fn validate_document(doc: RawDocument) -> Result<ProjectDocument> {
    let value = doc.into_value();

    let errors = structural::validate_structural(&value, &schema::PROJECT_SCHEMA);
    if !errors.is_empty() {
        return Err(ProjectError::Structural(errors));
    }

    let project = materialize(value)?;

    let errors = invariants::validate_invariants(&project);
    if !errors.is_empty() {
        return Err(ProjectError::Referential(errors));
    }

    Ok(project)
}

/// Diagnostics for a current-format document, as a flat list.
pub fn validate_value(value: &Value) -> Vec<Diagnostic> {
    let errors = structural::validate_structural(value, &schema::PROJECT_SCHEMA);
    if !errors.is_empty() {
        return errors;
    }
    match materialize(value.clone()) {
        Ok(project) => invariants::validate_invariants(&project),
        Err(e) => e.diagnostics().to_vec(),
    }
}

fn materialize(value: Value) -> Result<ProjectDocument> {
    serde_json::from_value(value).map_err(|e| {
        ProjectError::Structural(vec![Diagnostic::structure(
            "S004",
            format!("Document cannot be read as a project: {e}"),
            "",
        )])
    })
}
