use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NhdError>;

#[derive(Debug, Error)]
pub enum NhdError {
    #[error(
        "Truncated record while reading {what} at offset 0x{offset:02x}: need {need} bytes, have {have}"
    )]
    TruncatedRecord {
        what: &'static str,
        offset: u64,
        need: usize,
        have: usize,
    },

    #[error("Failed to read file {}: {source}", path.display())]
    FailedToReadFile { path: PathBuf, source: io::Error },

    #[error("Failed to rename {} to {}: {source}", from.display(), to.display())]
    FailedToRename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("Invalid path or not an NHD file: {}", path.display())]
    InvalidPath { path: PathBuf },

    #[error("Failed to write report: {source}")]
    FailedToWriteReport {
        #[from]
        source: io::Error,
    },
}

impl NhdError {
    /// Unreadable sources and failed renames.
    pub fn is_filesystem_error(&self) -> bool {
        matches!(
            self,
            NhdError::FailedToReadFile { .. } | NhdError::FailedToRename { .. }
        )
    }
}
