//! Packaging of generated solutions.

mod zip_archiver;

pub use zip_archiver::{SKIPPED_DIRS, ZipArchiver};
