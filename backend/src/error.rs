use std::path::PathBuf;

use thiserror::Error;

/// Markup that could not be turned into an element tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at byte {position})")]
pub struct ParseError {
    pub position: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Failure of a whole import call. Nothing below the document level ends up here.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error processing XML: {0}")]
    Parse(#[from] ParseError),

    #[error("Error processing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error processing JSON: expected an array of employee records")]
    NotAnArray,

    #[error("Database error: {0:#}")]
    Database(#[from] anyhow::Error),
}

/// Reason a single source record was skipped. Logged, never escalated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Missing facility_id (registryId) in XML record.")]
    MissingRegistryId,

    #[error("Invalid {field} '{value}' for registryId={registry_id}")]
    InvalidCoordinate {
        registry_id: String,
        field: &'static str,
        value: String,
    },

    #[error("Missing program_identifier for registryId={registry_id}")]
    MissingProgramIdentifier { registry_id: String },

    #[error("Missing id in JSON record.")]
    MissingEmployeeId,

    #[error("Invalid {field} for employee id={id}")]
    InvalidField { id: String, field: &'static str },

    #[error("Missing key '{key}' in JSON employee record with id={id}")]
    MissingKey { id: String, key: &'static str },
}
