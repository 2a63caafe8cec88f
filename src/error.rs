//! Error types for the partner network dashboard

use crate::hierarchy::HierarchyError;
use crate::model::PartnerId;
use thiserror::Error;

/// Errors that can occur while loading, aggregating or rendering a dataset
///
/// Empty filter results are not errors: every aggregate returns an empty
/// table instead.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Uploaded partner file rejected; `row` is the 1-based data row
    #[error("Upload rejected at row {row}: {message}")]
    Upload { row: usize, message: String },

    /// Partner table is not a single-rooted tree
    #[error("Invalid hierarchy: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Partner {0} not found")]
    UnknownPartner(PartnerId),

    #[error("At most {max} partners can be compared, got {got}")]
    TooManySelections { max: usize, got: usize },

    #[error("Unknown KPI metric '{0}'")]
    UnknownMetric(String),

    /// HTML template failed to compile or render
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Render error: {0}")]
    Render(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
