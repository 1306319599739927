//! Error and result types for WAD decoding and extraction.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout unwad.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while decoding or extracting a WAD archive.
#[derive(Error, Debug)]
pub enum Error {
    /// The archive ended before an expected field or payload.
    #[error("File truncated, unable to read {needed} bytes")]
    Truncated { needed: u64 },

    /// A length-prefixed name declared a length at or above the name limit.
    #[error("Filename length {length} exceeds the {limit} byte limit", limit = crate::wad::MAX_NAME_LEN)]
    MalformedFilename { length: u32 },

    /// A magic, sentinel or count check in the header failed.
    #[error("Wrong WAD file header: {0}")]
    InvalidHeader(&'static str),

    /// A structural cross-check after the entry table failed.
    #[error("Header mismatch on {what}: expected {expected}, found {actual}")]
    HeaderMismatch {
        what: &'static str,
        expected: u64,
        actual: u64,
    },

    /// Creating a directory or writing an output file failed.
    #[error("Unable to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or seeking the archive failed for a reason other than truncation.
    #[error("Unable to read archive: {0}")]
    Read(#[source] io::Error),
}

impl Error {
    /// Whether a table or index loop may drop the offending item and continue.
    ///
    /// Only a rejected name length qualifies. Anything that leaves the stream
    /// cursor in an unknown place has to abort the whole run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MalformedFilename { .. })
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn from_read(err: io::Error, needed: u64) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated { needed }
        } else {
            Error::Read(err)
        }
    }
}
