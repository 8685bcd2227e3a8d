//! CLI entry for mkpatch, parsing the command line and dispatching to the command handler.

use clap::Parser;

use crate::{
    command,
    errors::{MkpatchError, MkpatchResult},
};

#[derive(Parser, Debug)]
#[command(
    name = "mkpatch",
    about = "Make a patch from the .orig copies of edited files",
    version
)]
struct Cli {
    #[command(flatten)]
    args: command::mkpatch::MkpatchArgs,
}

/// Parses the arguments and runs mkpatch, returning the exit status.
/// - `args`: parse from command line if it's `None`, otherwise parse from the given args
pub fn parse(args: Option<&[&str]>) -> MkpatchResult<u8> {
    let cli = match args {
        Some(args) => {
            Cli::try_parse_from(args).map_err(|e| MkpatchError::InvalidArgument(e.to_string()))?
        }
        None => Cli::parse(),
    };
    command::mkpatch::execute(cli.args)
}
