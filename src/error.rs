use std::path::PathBuf;
use thiserror::Error;

use crate::deck::AssemblyReport;

/// The main error type for pitchdeck operations.
#[derive(Debug, Error)]
pub enum PitchdeckError {
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Unsupported manifest format for {path} (expected .yaml, .yml or .json)")]
    UnsupportedManifestFormat { path: PathBuf },

    #[error("Manifest {path} defines no slides")]
    EmptyDeck { path: PathBuf },

    #[error("Failed to write presentation {path}: {message}")]
    PptxWrite { path: PathBuf, message: String },

    #[error("Failed to read presentation {path}: {message}")]
    PptxRead { path: PathBuf, message: String },

    #[error("Image check failed with {warning_count} warning(s)")]
    CheckFailed {
        warning_count: usize,
        report: AssemblyReport,
    },

    #[error("Failed to serialize report: {0}")]
    ReportJson(#[source] serde_json::Error),

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}
