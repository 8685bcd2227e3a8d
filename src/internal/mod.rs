//! Internal layer exports for pair resolution, patch emission, header normalization, and Index-line reading.

pub mod emitter;
pub mod header;
pub mod index_file;
pub mod pair;
