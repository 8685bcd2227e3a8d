//! mkpatch makes unified-diff patches from `.orig` copies of edited files,
//! optionally in the format used by FreeBSD ports.

pub mod cli;
pub mod command;
pub mod errors;
pub mod internal;
pub mod utils;
