use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MbgError {
    /// The recipient profile maps to no standard group.
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Reference tables are inconsistent (e.g. standard not found).
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, MbgError>;

/// Non-fatal problems collected alongside a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A selected food has no nutrient row; its line was left out of the totals.
    Lookup { food: String },

    /// A reference cell could not be parsed and was read as zero (or false).
    Parse {
        table: String,
        row: usize,
        column: String,
        raw: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Lookup { food } => {
                write!(f, "'{}' has no nutrition data and was excluded from totals", food)
            }
            Warning::Parse {
                table,
                row,
                column,
                raw,
            } => write!(
                f,
                "{} row {}: '{}' in column {} could not be parsed, treated as 0",
                table, row, raw, column
            ),
        }
    }
}
