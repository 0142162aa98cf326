//! Filesystem and metadata helpers for a manuscript-to-PDF build: output
//! directories, locating `01_MAIN.md`, writing the generated `.tex`, naming
//! and copying the finished PDF.

pub mod cli;
pub mod config;
pub mod envfile;
pub mod error;
pub mod logging;
pub mod manuscript;
pub mod metadata;
pub mod pdf;
pub mod runner;
pub mod util;

pub use config::Settings;
pub use error::ManuscriptError;
pub use metadata::Metadata;
pub use util::fs::DirStatus;
