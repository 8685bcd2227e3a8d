//! Error types for resolving paths and emitting patches.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while making a patch.
#[derive(Debug, Error)]
pub enum MkpatchError {
    /// The input path could not be stat'ed.
    #[error("{source}: '{}'", .path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input path exists but is neither a regular file nor a directory.
    #[error("Not file nor directory: '{}'", .0.display())]
    NotFileNorDirectory(PathBuf),

    /// The patch file given to `--read-file` could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Command line arguments parsed from an explicit slice were rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other filesystem or process failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl MkpatchError {
    /// Whether the error only concerns one input path, so the run reports it and moves on.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            MkpatchError::PathNotFound { .. } | MkpatchError::NotFileNorDirectory(_)
        )
    }
}

/// Result type for mkpatch operations.
pub type MkpatchResult<T> = Result<T, MkpatchError>;
