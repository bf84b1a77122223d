use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// DataLoadError – anything that makes an input file unusable
// ---------------------------------------------------------------------------

/// A malformed input file. Fatal to the whole load: no partial tables are
/// ever returned, and there is no local recovery or retry.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: CSV error")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: JSON error")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    /// An unparseable numeric cell is an error, never silently zero.
    #[error("{path}: row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        path: PathBuf,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("{path}: row {row}: {message}")]
    MalformedRow {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// DuplicateKeyError – pivot onto a non-unique key
// ---------------------------------------------------------------------------

/// Two rows mapped onto the same heatmap cell. A pivot onto a non-unique
/// (service area, band_year label) key is ill-defined, so the reshape fails
/// instead of silently overwriting the earlier value. Fatal to the reshape
/// call only; selection and projection over the same table are unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate heatmap key: service area '{service_area}', label '{label}'")]
pub struct DuplicateKeyError {
    pub service_area: String,
    pub label: String,
}
