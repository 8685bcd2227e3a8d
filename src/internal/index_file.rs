//! Reads the file list back out of a patch made without `--ports-format`.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{MkpatchError, MkpatchResult};

lazy_static! {
    static ref INDEX_RE: Regex = Regex::new(r"^Index:\s(.+)$").expect("Invalid Regex");
}

/// Collects the paths named by `Index: <path>` lines of `patch`, in file order.
pub fn read_index_paths(patch: &Path) -> MkpatchResult<Vec<String>> {
    let read_error = |source| MkpatchError::ReadFile {
        path: patch.to_path_buf(),
        source,
    };
    let file = File::open(patch).map_err(read_error)?;

    let mut paths = Vec::new();
    for line in BufReader::new(file).split(b'\n') {
        let line = line.map_err(read_error)?;
        let line = String::from_utf8_lossy(&line);
        if let Some(caps) = INDEX_RE.captures(line.trim_end()) {
            paths.push(caps[1].to_string());
        }
    }
    tracing::debug!("read {} path(s) from {}", paths.len(), patch.display());
    Ok(paths)
}
