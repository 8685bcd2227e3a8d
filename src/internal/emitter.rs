//! Runs the external line-diff program for one pair and streams its normalized output.

use std::{
    ffi::OsString,
    fs,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::MkpatchResult,
    internal::{header, pair::Pair},
    utils::null_device::{NullStandIn, null_device},
};

lazy_static! {
    static ref FUNCTION_CONTEXT_RE: Regex = Regex::new(r".+\.(c|cpp|py)$").expect("Invalid Regex");
}

pub const DEFAULT_DIFF_PROGRAM: &str = "diff";
pub const DEFAULT_SUFFIX: &str = ".orig";

/// Settings shared by every pair of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Pass `-b` to diff.
    pub ignore_space_change: bool,
    /// Raw flags appended after the automatic ones.
    pub extra_diff_flags: Vec<String>,
    /// FreeBSD ports style: `-p -d`, UTC timestamps, no `Index:` preamble.
    pub ports_format: bool,
    pub suffix: String,
    pub diff_program: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ignore_space_change: false,
            extra_diff_flags: Vec::new(),
            ports_format: false,
            suffix: DEFAULT_SUFFIX.to_string(),
            diff_program: DEFAULT_DIFF_PROGRAM.to_string(),
        }
    }
}

impl Options {
    /// The flags passed to diff for a pair whose modified side is `modified`.
    pub fn diff_flags(&self, modified: &Path) -> Vec<String> {
        let mut flags = vec!["-u".to_string()];
        if self.ignore_space_change {
            flags.push("-b".to_string());
        }
        if self.ports_format || FUNCTION_CONTEXT_RE.is_match(&modified.to_string_lossy()) {
            flags.push("-p".to_string());
        }
        if self.ports_format {
            flags.push("-d".to_string());
        }
        flags.extend(self.extra_diff_flags.iter().cloned());
        flags
    }
}

/// A fully decided diff invocation.
#[derive(Debug)]
struct DiffCommand {
    program: String,
    flags: Vec<String>,
    original: PathBuf,
    modified: PathBuf,
    ports_format: bool,
}

impl DiffCommand {
    fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.flags.iter().map(OsString::from).collect();
        args.push(self.original.clone().into_os_string());
        args.push(self.modified.clone().into_os_string());
        args
    }

    /// The command line as shown in the `Index:` preamble.
    fn display_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.flags.iter().cloned());
        parts.push(self.original.display().to_string());
        parts.push(self.modified.display().to_string());
        parts.join(" ")
    }

    /// Runs diff with stdout and stderr merged into one pipe, writing every
    /// line to `w`. The exit status of diff is not inspected.
    ///
    /// With `index` set, the `Index:` line and the command line are written
    /// once diff has started, so a failed spawn leaves `w` untouched.
    fn run(&self, index: Option<&Path>, w: &mut dyn Write) -> io::Result<()> {
        let (reader, writer) = io::pipe()?;
        let mut command = Command::new(&self.program);
        command
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        if self.ports_format {
            command.env("TZ", "UTC");
        }
        let mut child = command.spawn()?;
        // the command holds write ends of the pipe; drop them so reads see EOF
        drop(command);

        if let Some(index) = index {
            writeln!(w, "Index: {}", index.display())?;
            writeln!(w, "{}", self.display_line())?;
        }

        let mut reader = BufReader::new(reader);
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            w.write_all(&header::normalize_line(&line, self.ports_format))?;
        }
        let status = child.wait()?;
        tracing::trace!("{} exited with {}", self.program, status);
        Ok(())
    }
}

/// Writes the patch for `pair` to `w`.
///
/// A missing modified file is diffed as a deletion and an empty original as
/// a creation, both against the empty device.
pub fn emit(pair: &Pair, options: &Options, w: &mut dyn Write) -> MkpatchResult<()> {
    let original = if fs::metadata(&pair.original)?.len() == 0 {
        tracing::debug!("{} is empty, diffing from the null device", pair.original.display());
        null_device()
    } else {
        pair.original.clone()
    };

    let stand_in = if pair.modified.exists() {
        None
    } else {
        tracing::debug!("{} was removed", pair.modified.display());
        Some(NullStandIn::create(&pair.modified)?)
    };
    let modified = match &stand_in {
        Some(stand_in) => stand_in.path().to_path_buf(),
        None => pair.modified.clone(),
    };

    let command = DiffCommand {
        program: options.diff_program.clone(),
        flags: options.diff_flags(&pair.modified),
        original,
        modified,
        ports_format: options.ports_format,
    };
    tracing::debug!("running {}", command.display_line());

    let index = (!options.ports_format).then_some(pair.modified.as_path());
    command.run(index, w)?;
    w.flush()?;
    Ok(())
}
