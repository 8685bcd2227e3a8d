//! Resolves input paths into (original, modified) file pairs by the original-file suffix.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use walkdir::WalkDir;

use crate::errors::{MkpatchError, MkpatchResult};

/// An original file and the modified file it is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub original: PathBuf,
    /// May be absent on disk, meaning the file was deleted.
    pub modified: PathBuf,
}

impl Pair {
    /// Builds the pair for an original path, or `None` when the path does not
    /// carry `suffix` after at least one other character.
    pub fn from_original(original: &Path, suffix: &str) -> Option<Self> {
        let Some(text) = original.to_str() else {
            tracing::warn!("skipping non UTF-8 path {}", original.display());
            return None;
        };
        let modified = text.strip_suffix(suffix).filter(|stem| !stem.is_empty())?;
        Some(Pair {
            original: original.to_path_buf(),
            modified: PathBuf::from(modified),
        })
    }
}

/// Resolves `path` to the ordered pairs it covers.
///
/// A regular file yields one pair, with `suffix` appended when `path` names the
/// modified file. A directory is walked recursively and every file ending with
/// `suffix` yields a pair, in lexicographic order of the full paths.
pub fn resolve(path: &str, suffix: &str) -> MkpatchResult<Vec<Pair>> {
    let trimmed = path.trim_end_matches('/');
    // "/" trims down to nothing but still names the root
    let path = if trimmed.is_empty() && !path.is_empty() {
        "/"
    } else {
        trimmed
    };

    let metadata = fs::metadata(path).map_err(|source| MkpatchError::PathNotFound {
        path: PathBuf::from(path),
        source,
    })?;

    let mut originals: Vec<PathBuf> = if metadata.is_file() {
        let original = if path.ends_with(suffix) {
            path.to_string()
        } else {
            format!("{path}{suffix}")
        };
        vec![PathBuf::from(original)]
    } else if metadata.is_dir() {
        walk_files(Path::new(path))?
    } else {
        return Err(MkpatchError::NotFileNorDirectory(PathBuf::from(path)));
    };
    originals.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    let pairs: Vec<Pair> = originals
        .iter()
        .map(|original| strip_current_dir(original))
        .filter_map(|original| Pair::from_original(&original, suffix))
        .collect();
    tracing::debug!("resolved {} pair(s) under '{}'", pairs.len(), path);
    Ok(pairs)
}

/// Lists every non-directory entry beneath `dir`. Symlinks are not followed,
/// and a symlink to a directory is neither descended into nor listed.
fn walk_files(dir: &Path) -> MkpatchResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_dir() || entry.path().is_dir() {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Drops a single leading `./`.
fn strip_current_dir(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::CurDir) => components.as_path().to_path_buf(),
        _ => path.to_path_buf(),
    }
}
