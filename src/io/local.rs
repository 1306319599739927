use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::BinaryReader;
use crate::error::{Error, Result};

/// Buffered reader over a WAD archive on the local filesystem.
pub type LocalFileReader = BinaryReader<BufReader<File>>;

impl LocalFileReader {
    /// Open an archive for sequential decoding.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(Error::Read)?;
        Ok(BinaryReader::new(BufReader::new(file)))
    }
}
