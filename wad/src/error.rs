use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while reading an archive or one of its lumps.
///
/// None of these are recoverable for the map being loaded; the caller gets
/// the error instead of a partially decoded map.
#[derive(Debug, Error)]
pub enum WadError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("not a WAD, header magic was {magic:?}")]
    BadHeader { magic: [u8; 4] },
    #[error("{what} at offset {offset} needs {needed} bytes, only {available} available")]
    Decode {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("{lump} lump size {size} is not a multiple of its {record_size} byte record")]
    BadRecordCount {
        lump: String,
        size: usize,
        record_size: usize,
    },
    #[error("name at offset {offset} is not valid ASCII")]
    InvalidName { offset: usize },
    #[error("lump {0} not found")]
    LumpNotFound(String),
    #[error("lump at index {index} should be {expected}, found {found}")]
    LumpMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },
}
