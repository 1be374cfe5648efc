//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::error::{Diagnostic, ProjectError};
use crate::migrate;
use crate::parse::RawDocument;
use crate::version::VersionTriple;

/// Validate a current-format project JSON: schema + invariants.
/// Returns a JSON array of diagnostic objects (empty when valid).
#[wasm_bindgen]
pub fn validate_project(json: &str) -> JsValue {
    let result = validate_project_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_project_inner(json: &str) -> Vec<DiagnosticDto> {
    let doc = match RawDocument::from_text(json) {
        Ok(doc) => doc,
        Err(err) => return error_dtos(err),
    };
    crate::validate::validate_value(&doc.into_value())
        .into_iter()
        .map(DiagnosticDto::from)
        .collect()
}

/// Report a project's declared version and the migrations loading it would
/// run under `app_version`.
#[wasm_bindgen]
pub fn inspect_project_version(json: &str, app_version: &str) -> JsValue {
    let result = inspect_project_version_inner(json, app_version);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn inspect_project_version_inner(json: &str, app_version: &str) -> InspectResult {
    let doc = match RawDocument::from_text(json) {
        Ok(doc) => doc,
        Err(err) => return InspectResult::Errors { errors: error_dtos(err) },
    };

    let declared = match doc.app_version() {
        Ok(v) => v,
        Err(err) => return InspectResult::Errors { errors: error_dtos(err) },
    };
    let Ok(document_version) = declared.parse::<VersionTriple>() else {
        return InspectResult::Errors {
            errors: vec![DiagnosticDto::from(Diagnostic::version(
                "V003",
                format!("An invalid appVersion format '{declared}'"),
            ))],
        };
    };
    if app_version.parse::<VersionTriple>().is_err() {
        return InspectResult::Errors {
            errors: vec![DiagnosticDto::from(Diagnostic::version(
                "V004",
                format!("The running application version '{app_version}' is not \"%d.%d.%d\""),
            ))],
        };
    }

    InspectResult::Ok {
        document_version: document_version.to_string(),
        pending_migrations: migrate::pending(document_version)
            .map(|m| m.id.to_string())
            .collect(),
    }
}

fn error_dtos(err: ProjectError) -> Vec<DiagnosticDto> {
    match err.diagnostics() {
        [] => vec![DiagnosticDto::from(Diagnostic::decode("D001", err.to_string()))],
        diagnostics => diagnostics.iter().cloned().map(DiagnosticDto::from).collect(),
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct DiagnosticDto {
    code: String,
    phase: String,
    message: String,
    path: Option<String>,
}

impl From<Diagnostic> for DiagnosticDto {
    fn from(d: Diagnostic) -> Self {
        DiagnosticDto {
            code: d.code,
            phase: d.phase.to_string(),
            message: d.message,
            path: d.path,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum InspectResult {
    #[serde(rename = "ok", rename_all = "camelCase")]
    Ok {
        document_version: String,
        pending_migrations: Vec<String>,
    },
    #[serde(rename = "errors")]
    Errors { errors: Vec<DiagnosticDto> },
}
