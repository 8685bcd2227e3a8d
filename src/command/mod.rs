//! Command handlers; each module defines its clap arguments and an `execute` entry.

pub mod mkpatch;
