use std::fs;
use std::path::Path;

use hom_core::{ErrorInfo, EvaluationRecord, GroundTruthRecord, HomError};
use serde::{de::DeserializeOwned, Serialize};

use crate::serde::{from_json_slice, to_pretty_json_bytes};

fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), HomError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            HomError::Io(
                ErrorInfo::new("document-dir", err.to_string())
                    .with_context("path", parent.display().to_string()),
            )
        })?;
    }
    fs::write(path, to_pretty_json_bytes(value)?).map_err(|err| {
        HomError::Io(
            ErrorInfo::new("document-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, HomError> {
    let bytes = fs::read(path).map_err(|err| {
        HomError::Io(
            ErrorInfo::new("document-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_json_slice(&bytes).map_err(|err| match err {
        HomError::Serde(info) => {
            HomError::Serde(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}

/// Writes a ground-truth document.
pub fn write_ground_truth(path: &Path, record: &GroundTruthRecord) -> Result<(), HomError> {
    write_document(path, record)
}

/// Reads a ground-truth document.
pub fn read_ground_truth(path: &Path) -> Result<GroundTruthRecord, HomError> {
    read_document(path)
}

/// Writes an evaluation document.
pub fn write_evaluation(path: &Path, record: &EvaluationRecord) -> Result<(), HomError> {
    write_document(path, record)
}

/// Reads an evaluation document.
pub fn read_evaluation(path: &Path) -> Result<EvaluationRecord, HomError> {
    read_document(path)
}
