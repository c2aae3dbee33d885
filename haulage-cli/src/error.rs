//! Error types emitted by the haulage CLI.
//!
//! Keep this error type reasonably small, as every command returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use haulage_core::{RegistryError, SnapshotError, ValidationError};
use thiserror::Error;

/// Errors emitted by the haulage CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// `init` refused to overwrite an existing snapshot.
    #[error("snapshot {path:?} already exists (pass --force to overwrite)")]
    SnapshotExists { path: Utf8PathBuf },
    /// Opening the snapshot file failed.
    #[error("failed to open snapshot at {path:?}: {source}")]
    OpenSnapshot {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Snapshot JSON could not be decoded.
    #[error("failed to parse snapshot JSON at {path:?}: {source}")]
    ParseSnapshot {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Snapshot records contradict each other.
    #[error("snapshot {path:?} is inconsistent: {source}")]
    InvalidSnapshot {
        path: Utf8PathBuf,
        #[source]
        source: SnapshotError,
    },
    /// Serialising the snapshot failed.
    #[error("failed to serialise snapshot: {0}")]
    SerialiseSnapshot(#[source] serde_json::Error),
    /// Writing the snapshot file failed.
    #[error("failed to write snapshot to {path:?}: {source}")]
    WriteSnapshot {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Command arguments describe an invalid client or vehicle.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The registry rejected the change.
    #[error(transparent)]
    Fleet(#[from] RegistryError),
    /// Serialising a report failed.
    #[error("failed to serialise report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing CSV output failed.
    #[error("failed to write CSV report: {0}")]
    WriteCsv(#[source] csv::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
