//! The platform's empty device and the stand-in used for files that were deleted.

use std::{
    io,
    path::{Path, PathBuf},
};

use scopeguard::ScopeGuard;

/// A path that always reads as zero-length content.
#[cfg(unix)]
pub const NULL_DEVICE: &str = "/dev/null";
#[cfg(not(unix))]
pub const NULL_DEVICE: &str = "NUL";

pub fn null_device() -> PathBuf {
    PathBuf::from(NULL_DEVICE)
}

/// Stands in for a modified file that no longer exists, so the diff reports
/// every original line as removed.
///
/// On Unix the missing path becomes a symlink to [`NULL_DEVICE`] which is
/// unlinked again when the stand-in is dropped, on every exit path. Elsewhere
/// the empty device itself is handed to the diff program.
pub struct NullStandIn {
    path: PathBuf,
    _link: Option<ScopeGuard<PathBuf, fn(PathBuf)>>,
}

impl NullStandIn {
    #[cfg(unix)]
    pub fn create(path: &Path) -> io::Result<Self> {
        std::os::unix::fs::symlink(NULL_DEVICE, path)?;
        tracing::debug!("linked {} -> {}", path.display(), NULL_DEVICE);
        let link = scopeguard::guard(path.to_path_buf(), remove_link as fn(PathBuf));
        Ok(Self {
            path: path.to_path_buf(),
            _link: Some(link),
        })
    }

    #[cfg(not(unix))]
    pub fn create(path: &Path) -> io::Result<Self> {
        tracing::debug!("{} is missing, diffing against {}", path.display(), NULL_DEVICE);
        Ok(Self {
            path: null_device(),
            _link: None,
        })
    }

    /// The path to pass to the diff program as the modified side.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn remove_link(path: PathBuf) {
    match std::fs::remove_file(&path) {
        Ok(()) => tracing::debug!("unlinked {}", path.display()),
        Err(e) => eprintln!("warning: failed to remove '{}': {e}", path.display()),
    }
}
