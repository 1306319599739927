//! Bounds-checked sequential reads over an archive stream.
//!
//! Every read either fills exactly what it promises or fails. A stream that
//! ends early surfaces as [`Error::Truncated`], never as a short read.

mod local;

pub use local::LocalFileReader;

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, Result};

/// An unsigned little-endian field whose on-disk width depends on the format
/// version.
///
/// The V1 and V2 entry tables share one decoder; only the width of the
/// `size`/`offset` fields differs between them.
pub trait WidthField: Copy + Into<u64> {
    /// Number of bytes the field occupies on disk.
    const WIDTH: u64;

    fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self>;
}

impl WidthField for u8 {
    const WIDTH: u64 = 1;

    fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        reader.read_u8()
    }
}

impl WidthField for u32 {
    const WIDTH: u64 = 4;

    fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        reader.read_u32::<LittleEndian>()
    }
}

impl WidthField for u64 {
    const WIDTH: u64 = 8;

    fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        reader.read_u64::<LittleEndian>()
    }
}

/// Sequential reader over an archive stream.
pub struct BinaryReader<R> {
    inner: R,
}

impl<R: Read + Seek> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read one fixed-size little-endian integer.
    pub fn read_fixed<T: WidthField>(&mut self) -> Result<T> {
        T::read_from(&mut self.inner).map_err(|e| Error::from_read(e, T::WIDTH))
    }

    /// Fill `buf` completely from the stream.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner
            .read_exact(buf)
            .map_err(|e| Error::from_read(e, buf.len() as u64))
    }

    /// Read exactly `len` bytes into a freshly allocated buffer.
    ///
    /// The allocation grows with the data actually read, so a corrupt length
    /// field cannot make us reserve more memory than the stream holds.
    pub fn read_vec(&mut self, len: u64) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = (&mut self.inner)
            .take(len)
            .read_to_end(&mut buf)
            .map_err(|e| Error::from_read(e, len))?;
        if (read as u64) < len {
            return Err(Error::Truncated { needed: len });
        }
        Ok(buf)
    }

    /// Current cursor position from the start of the stream.
    pub fn position(&mut self) -> Result<u64> {
        self.inner.stream_position().map_err(Error::Read)
    }

    /// Move the cursor to an absolute offset.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(offset))
            .map(|_| ())
            .map_err(Error::Read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_fixed_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04, 0xff, 0, 0, 0, 0, 0, 0, 0x80, 0x07];
        let mut reader = BinaryReader::new(Cursor::new(&data[..]));

        assert_eq!(reader.read_fixed::<u32>().unwrap(), 0x0403_0201);
        assert_eq!(reader.read_fixed::<u64>().unwrap(), 0x8000_0000_0000_00ff);
        assert_eq!(reader.read_fixed::<u8>().unwrap(), 7);
        assert_eq!(reader.position().unwrap(), 13);
    }

    #[test]
    fn test_short_fixed_read_is_truncated() {
        let mut reader = BinaryReader::new(Cursor::new(vec![1u8, 2, 3]));
        let err = reader.read_fixed::<u32>().unwrap_err();
        assert!(matches!(err, Error::Truncated { needed: 4 }));
    }

    #[test]
    fn test_read_bytes_exact() {
        let mut reader = BinaryReader::new(Cursor::new(b"abcdef".to_vec()));
        let mut buf = [0u8; 4];
        reader.read_bytes(&mut buf).unwrap();
        assert_eq!(&buf, b"abcd");

        let mut rest = [0u8; 3];
        let err = reader.read_bytes(&mut rest).unwrap_err();
        assert!(matches!(err, Error::Truncated { needed: 3 }));
    }

    #[test]
    fn test_read_vec_does_not_trust_length() {
        let mut reader = BinaryReader::new(Cursor::new(vec![9u8; 16]));
        assert_eq!(reader.read_vec(0).unwrap(), Vec::<u8>::new());
        assert_eq!(reader.read_vec(4).unwrap(), vec![9u8; 4]);

        let err = reader.read_vec(u64::MAX).unwrap_err();
        assert!(matches!(err, Error::Truncated { needed: u64::MAX }));
    }

    #[test]
    fn test_seek_then_read() {
        let mut reader = BinaryReader::new(Cursor::new((0u8..32).collect::<Vec<_>>()));
        reader.seek_to(10).unwrap();
        assert_eq!(reader.read_vec(3).unwrap(), vec![10, 11, 12]);
        assert_eq!(reader.position().unwrap(), 13);
    }
}
