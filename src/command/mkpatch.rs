//! Implements `mkpatch`: resolve each input path to pairs and write one combined patch.

use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;

use crate::{
    errors::MkpatchResult,
    internal::{
        emitter::{self, DEFAULT_DIFF_PROGRAM, DEFAULT_SUFFIX, Options},
        index_file, pair,
    },
};

#[derive(Parser, Debug, Clone)]
pub struct MkpatchArgs {
    /// Ignore changes in the amount of white space
    #[clap(short = 'b', long)]
    pub ignore_space_change: bool,

    /// Additional diff option, may be repeated
    #[clap(short = 'o', long, value_name = "OPTION", allow_hyphen_values = true)]
    pub diff_options: Vec<String>,

    /// Produce diff for FreeBSD ports
    #[clap(short = 'P', long)]
    pub ports_format: bool,

    /// Read paths from the `Index:` lines of an existing patch
    #[clap(short = 'r', long, value_name = "FILE")]
    pub read_file: Option<PathBuf>,

    /// Suffix of original file
    #[clap(short, long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Line-diff program to run
    #[clap(long, value_name = "PROGRAM", env = "MKPATCH_DIFF", default_value = DEFAULT_DIFF_PROGRAM)]
    pub diff_program: String,

    #[clap(help = "Paths to compare, default is the current directory")]
    pub paths: Vec<String>,
}

impl MkpatchArgs {
    pub fn options(&self) -> Options {
        Options {
            ignore_space_change: self.ignore_space_change,
            extra_diff_flags: self.diff_options.clone(),
            ports_format: self.ports_format,
            suffix: self.suffix.clone(),
            diff_program: self.diff_program.clone(),
        }
    }
}

/// Writes the patch to stdout and returns the exit status.
pub fn execute(args: MkpatchArgs) -> MkpatchResult<u8> {
    let stdout = io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    let status = execute_to(args, &mut w)?;
    w.flush()?;
    Ok(status)
}

/// Writes the patch for every input path to `w`.
///
/// The returned status is the bitwise OR of the per-path results: a path that
/// does not exist is reported and sets bit 0, any other failure aborts the run.
pub fn execute_to(args: MkpatchArgs, w: &mut dyn Write) -> MkpatchResult<u8> {
    tracing::debug!("mkpatch args: {:?}", args);
    let mut paths = args.paths.clone();
    if let Some(ref patch) = args.read_file {
        paths.extend(index_file::read_index_paths(patch)?);
    }
    if paths.is_empty() {
        paths.push(".".to_string());
    }

    let options = args.options();
    let mut status = 0;
    for path in &paths {
        status |= make_patch(path, &options, w)?;
    }
    Ok(status)
}

fn make_patch(path: &str, options: &Options, w: &mut dyn Write) -> MkpatchResult<u8> {
    let pairs = match pair::resolve(path, &options.suffix) {
        Ok(pairs) => pairs,
        Err(e) if e.is_reportable() => {
            eprintln!("warning: {e}");
            return Ok(1);
        }
        Err(e) => return Err(e),
    };
    for pair in &pairs {
        tracing::trace!("emitting {:?}", pair);
        emitter::emit(pair, options, w)?;
    }
    Ok(0)
}
