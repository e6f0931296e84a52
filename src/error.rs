//! Defines the error types shared by every entity.
use std::path::PathBuf;
use thiserror::Error;

/// A cardinality mismatch found by the checker.
///
/// The owner/field pair names the offending array, e.g. `DiscRates.rates` or
/// `Hazard.intensity row`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {owner}.{field} size: {expected} != {actual}")]
pub struct ValidationError {
    pub owner: String,
    pub field: String,
    pub expected: usize,
    pub actual: usize,
}

#[derive(Error, Debug)]
pub enum EntityError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Field '{field}' not found in table '{table}'")]
    MissingField { field: String, table: String },
    #[error("Table '{table}' not found in file '{}'", .file.display())]
    MissingTable { table: String, file: PathBuf },
    #[error("Invalid value in '{field}' at row {row}: {reason}")]
    InvalidValue { field: String, row: usize, reason: String },
    #[error("{entity}.{operation} is not implemented, use a format specific reader")]
    NotImplemented { entity: &'static str, operation: &'static str },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EntityError {
    pub fn not_implemented(entity: &'static str, operation: &'static str) -> Self {
        Self::NotImplemented { entity, operation }
    }

    /// Returns the wrapped checker failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T, E = EntityError> = std::result::Result<T, E>;
