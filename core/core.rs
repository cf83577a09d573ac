pub mod dispatcher;
pub mod file_finder;
pub mod processor;
pub mod stripper;

pub use dispatcher::{Format, FormatOptions, FormatTable, SourceDocument};
pub use file_finder::{CliArgs, FoundFiles, find_files};
pub use processor::{FileOutcome, ProcessedFileResult, RunSummary, process_files, process_paths};
pub use stripper::StripError;

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("Error reading file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error processing file {}: {source}", .path.display())]
    Strip {
        path: PathBuf,
        #[source]
        source: StripError,
    },

    #[error("Error walking path {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl CoreError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            CoreError::Read { path, .. }
            | CoreError::Write { path, .. }
            | CoreError::Strip { path, .. }
            | CoreError::Walk { path, .. } => path,
        }
    }
}
