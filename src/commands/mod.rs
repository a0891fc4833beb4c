//! CLI command implementations.

pub mod make;

pub use make::{FileType, MakeOptions, make_files};
