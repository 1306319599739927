//! WAD metadata decoder.
//!
//! This module turns the front of an archive into a [`WadArchive`]: the
//! header, the entry table and (for V2) the directory index. It reads the
//! stream strictly front to back and never touches the content region.
//!
//! ## Parsing Strategy
//!
//! 1. Read 4 bytes. `AGAR` selects V2; anything else rewinds to 0 for V1.
//! 2. Validate the version's header fields.
//! 3. Decode the entry table. V1 and V2 share one routine, parameterized
//!    over the width of the `size`/`offset` fields.
//! 4. V1: the cursor must now sit exactly on the declared content offset.
//!    V2: decode the directory index; wherever the cursor ends up is the
//!    content base.
//!
//! Per-item failures that leave the cursor where it should be (an oversized
//! name) drop that item and continue. Anything else aborts.

use log::{debug, info, warn};
use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::io::{BinaryReader, WidthField};

use super::structures::*;

/// Upper bound on up-front reservations driven by header counts.
///
/// Counts come straight from the file; a corrupt one must not turn into a
/// multi-gigabyte allocation before the first entry is even read.
const MAX_RESERVE: usize = 4096;

/// Sequential decoder for WAD archive metadata.
///
/// ## Example
///
/// ```no_run
/// use std::path::Path;
/// use unwad::{LocalFileReader, WadParser};
///
/// let reader = LocalFileReader::open(Path::new("hlm2_data_desktop.wad"))?;
/// let mut parser = WadParser::new(reader);
/// let archive = parser.parse()?;
/// for entry in &archive.entries {
///     println!("{entry}");
/// }
/// # Ok::<(), unwad::Error>(())
/// ```
pub struct WadParser<R> {
    reader: BinaryReader<R>,
}

impl<R: Read + Seek> WadParser<R> {
    pub fn new(reader: BinaryReader<R>) -> Self {
        Self { reader }
    }

    /// Detect the version and decode the whole metadata section.
    pub fn parse(&mut self) -> Result<WadArchive> {
        match self.detect_version()? {
            WadVersion::V1 => self.decode_v1(),
            WadVersion::V2 => self.decode_v2(),
        }
    }

    /// Sniff the leading marker.
    ///
    /// Leaves the cursor just past the marker for V2, and at offset 0 for V1
    /// since the V1 header starts at the very first byte.
    pub fn detect_version(&mut self) -> Result<WadVersion> {
        self.reader.seek_to(0)?;
        let mut magic = [0u8; 4];
        self.reader.read_bytes(&mut magic)?;

        if &magic == V2_MAGIC {
            Ok(WadVersion::V2)
        } else {
            self.reader.seek_to(0)?;
            Ok(WadVersion::V1)
        }
    }

    /// Decode a V1 archive, starting at the current cursor (normally 0).
    pub fn decode_v1(&mut self) -> Result<WadArchive> {
        let header = HeaderV1 {
            content_offset: self.reader.read_fixed()?,
            entry_count: self.reader.read_fixed()?,
        };

        if header.content_offset < HeaderV1::SIZE {
            return Err(Error::InvalidHeader("content offset"));
        }
        if header.entry_count < 1 {
            return Err(Error::InvalidHeader("entry count"));
        }

        info!(
            "V1 archive with {} files and content at offset {}",
            header.entry_count, header.content_offset
        );

        let entries = self.read_entry_table::<u32>(header.entry_count)?;

        // A table decoded with the wrong field widths lands somewhere else.
        let pos = self.reader.position()?;
        if pos != header.content_offset as u64 {
            return Err(Error::HeaderMismatch {
                what: "content offset",
                expected: header.content_offset as u64,
                actual: pos,
            });
        }
        check_entry_count(header.entry_count, &entries)?;

        Ok(WadArchive {
            version: WadVersion::V1,
            content_base: header.content_offset as u64,
            declared_entries: header.entry_count,
            entries,
            indices: Vec::new(),
        })
    }

    /// Decode a V2 archive, starting right after the `AGAR` marker.
    pub fn decode_v2(&mut self) -> Result<WadArchive> {
        let header = HeaderV2 {
            unknown1: self.reader.read_fixed()?,
            unknown2: self.reader.read_fixed()?,
            entry_count: self.reader.read_fixed()?,
        };

        if header.unknown1 != HeaderV2::UNKNOWN1 {
            return Err(Error::InvalidHeader("first sentinel"));
        }
        if header.unknown2 != HeaderV2::UNKNOWN2 {
            return Err(Error::InvalidHeader("second sentinel"));
        }
        if header.entry_count < 1 {
            return Err(Error::InvalidHeader("entry count"));
        }

        info!("V2 archive with {} files", header.entry_count);

        let entries = self.read_entry_table::<u64>(header.entry_count)?;
        check_entry_count(header.entry_count, &entries)?;

        let indices = self.read_index_table()?;

        // No explicit field: content starts wherever the index ends.
        let content_base = self.reader.position()?;
        debug!("content base at {content_base}");

        Ok(WadArchive {
            version: WadVersion::V2,
            content_base,
            declared_entries: header.entry_count,
            entries,
            indices,
        })
    }

    /// Decode `count` entries whose size/offset fields are `W` wide.
    fn read_entry_table<W: WidthField>(&mut self, count: u32) -> Result<Vec<Entry>> {
        let mut entries = Vec::with_capacity((count as usize).min(MAX_RESERVE));

        for i in 0..count {
            match self.read_entry::<W>() {
                Ok(entry) => {
                    debug!("entry {i}: {entry}");
                    entries.push(entry);
                }
                Err(e) if e.is_recoverable() => warn!("skipping entry {i}: {e}"),
                Err(e) => return Err(e),
            }
        }

        Ok(entries)
    }

    fn read_entry<W: WidthField>(&mut self) -> Result<Entry> {
        let name = self.read_name()?;
        let size: W = self.reader.read_fixed()?;
        let offset: W = self.reader.read_fixed()?;

        Ok(Entry {
            name,
            size: size.into(),
            offset: offset.into(),
        })
    }

    /// Read a `u32` length followed by that many name bytes.
    ///
    /// An oversized length is rejected before any of the name is consumed.
    fn read_name(&mut self) -> Result<Vec<u8>> {
        let length: u32 = self.reader.read_fixed()?;
        if length >= MAX_NAME_LEN {
            return Err(Error::MalformedFilename { length });
        }
        self.reader.read_vec(length as u64)
    }

    fn read_index_table(&mut self) -> Result<Vec<IndexNode>> {
        let count: u32 = self.reader.read_fixed()?;
        let mut indices = Vec::with_capacity((count as usize).min(MAX_RESERVE));

        for i in 0..count {
            match self.read_root_index() {
                Ok(node) => {
                    debug!(
                        "directory {:?} with {} entries",
                        node.name,
                        node.children.len()
                    );
                    indices.push(node);
                }
                Err(e) if e.is_recoverable() => warn!("skipping directory index {i}: {e}"),
                Err(e) => return Err(e),
            }
        }

        Ok(indices)
    }

    fn read_root_index(&mut self) -> Result<IndexNode> {
        let name = self.read_name()?;
        let child_count: u32 = self.reader.read_fixed()?;
        let mut children = Vec::with_capacity((child_count as usize).min(MAX_RESERVE));

        for j in 0..child_count {
            match self.read_child_index() {
                Ok(child) => children.push(child),
                Err(e) if e.is_recoverable() => warn!("skipping index child {j}: {e}"),
                Err(e) => return Err(e),
            }
        }

        Ok(IndexNode {
            name: String::from_utf8_lossy(&name).into_owned(),
            directory: true,
            root: true,
            children,
        })
    }

    /// Children are leaves: a name (possibly empty) and a directory flag.
    fn read_child_index(&mut self) -> Result<IndexNode> {
        let name = self.read_name()?;
        let flag: u8 = self.reader.read_fixed()?;

        Ok(IndexNode {
            name: String::from_utf8_lossy(&name).into_owned(),
            directory: flag == 1,
            root: false,
            children: Vec::new(),
        })
    }

    /// Get the underlying reader, e.g. to seek into the content region.
    pub fn reader(&mut self) -> &mut BinaryReader<R> {
        &mut self.reader
    }

    pub fn into_reader(self) -> BinaryReader<R> {
        self.reader
    }
}

fn check_entry_count(declared: u32, entries: &[Entry]) -> Result<()> {
    if entries.len() as u64 != declared as u64 {
        return Err(Error::HeaderMismatch {
            what: "entry count",
            expected: declared as u64,
            actual: entries.len() as u64,
        });
    }
    Ok(())
}
