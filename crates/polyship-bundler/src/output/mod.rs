//! Artifact output: atomic writes and size measurement.

pub mod size;
pub mod writer;

pub use size::gzip_size;
pub use writer::write_atomic;
