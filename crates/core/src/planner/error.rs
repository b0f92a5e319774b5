//! Error types for the planner module.

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::converter::ToolError;
use crate::scan::ScanError;

/// Fatal errors of a planning run. Any of them ends the run.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Listing the input directory failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Building the catalog of converted titles failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Reading a candidate's title failed.
    #[error("Failed to probe {path}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: ToolError,
    },

    /// The transcoder (or the optional output check) failed.
    #[error("Failed to convert {path}: {source}")]
    Transcode {
        path: PathBuf,
        #[source]
        source: ToolError,
    },

    /// A filesystem check on the output path failed.
    #[error("Failed to inspect {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deleting an input file failed.
    #[error("Failed to clean up {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
