//! Error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by generation and export.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no text to encode")]
    EmptyInput,

    #[error("invalid encoding policy: {0}")]
    InvalidPolicy(String),

    #[error("segment {} of {total} is {bytes} bytes, a symbol holds at most {capacity}", .index + 1)]
    PayloadTooLarge {
        index: usize,
        total: usize,
        bytes: usize,
        capacity: usize,
    },

    #[error("no generated codes to export")]
    NothingToExport,

    #[error("index {index} is out of range for {len} codes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to write {}: {source}", .path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("exported {written} of {total} codes, failed at {}: {source}", .path.display())]
    PartialExport {
        written: usize,
        total: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for generation and export.
pub type Result<T> = std::result::Result<T, Error>;
