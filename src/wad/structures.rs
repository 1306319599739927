use std::fmt;

/// Names (file names and index node names) must be strictly shorter than this.
pub const MAX_NAME_LEN: u32 = 1024;

/// Marker at byte 0 of a version 2 archive.
pub const V2_MAGIC: &[u8; 4] = b"AGAR";

/// On-disk layout of an archive, chosen by the leading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WadVersion {
    /// Hotline Miami 1: explicit content offset, 32-bit size/offset fields.
    V1,
    /// Hotline Miami 2: `AGAR` marker, 64-bit size/offset fields and a
    /// directory index between the entry table and the content.
    V2,
}

impl fmt::Display for WadVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WadVersion::V1 => write!(f, "Hotline Miami 1"),
            WadVersion::V2 => write!(f, "Hotline Miami 2"),
        }
    }
}

/// V1 header - 8 bytes at offset 0
#[derive(Debug, Clone, Copy)]
pub struct HeaderV1 {
    pub content_offset: u32,
    pub entry_count: u32,
}

impl HeaderV1 {
    pub const SIZE: u32 = 8;
}

/// V2 header - 16 bytes following the marker
#[derive(Debug, Clone, Copy)]
pub struct HeaderV2 {
    /// Undocumented, always 1.
    pub unknown1: u32,
    /// Undocumented, always 1.
    pub unknown2: u64,
    pub entry_count: u32,
}

impl HeaderV2 {
    pub const UNKNOWN1: u32 = 1;
    pub const UNKNOWN2: u64 = 1;
}

/// One embedded file, as listed in the entry table.
///
/// `offset` is relative to the archive's content base; it does not locate
/// anything on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Raw name bytes, `/`-separated.
    pub name: Vec<u8>,
    pub size: u64,
    pub offset: u64,
}

impl Entry {
    /// The name as text, replacing invalid UTF-8.
    pub fn file_name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} ({} bytes)", self.file_name(), self.size)
    }
}

/// A node of the V2 directory index.
///
/// Roots are always directories and own their children. Children never nest
/// further. Index nodes carry no size or offset and play no part in locating
/// content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexNode {
    /// Empty for anonymous children.
    pub name: String,
    pub directory: bool,
    pub root: bool,
    pub children: Vec<IndexNode>,
}

impl fmt::Display for IndexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root {
            write!(
                f,
                "- Directory {} with {} entries:",
                self.name,
                self.children.len()
            )?;
            for child in &self.children {
                write!(f, "\n{child}")?;
            }
            Ok(())
        } else {
            let kind = if self.directory { "directory" } else { "file" };
            write!(f, "  - {} ({})", self.name, kind)
        }
    }
}

/// A fully decoded archive: every entry and index node, plus where content
/// starts. Nothing here is mutated once decoding finishes.
#[derive(Debug, Clone)]
pub struct WadArchive {
    pub version: WadVersion,
    /// Absolute stream offset of the content region.
    pub content_base: u64,
    /// Entry count declared by the header.
    pub declared_entries: u32,
    pub entries: Vec<Entry>,
    /// Directory index; always empty for V1.
    pub indices: Vec<IndexNode>,
}

impl WadArchive {
    /// Absolute offset of an entry's first byte, or `None` on overflow.
    pub fn resolve(&self, entry: &Entry) -> Option<u64> {
        self.content_base.checked_add(entry.offset)
    }

    /// Sum of all entry sizes.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// One-line summary, matching what the legacy extractor printed.
    pub fn banner(&self) -> String {
        match self.version {
            WadVersion::V1 => format!(
                "{} WAD with {} files and content at offset {}",
                self.version, self.declared_entries, self.content_base
            ),
            WadVersion::V2 => format!(
                "{} WAD with {} files",
                self.version, self.declared_entries
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size: u64, offset: u64) -> Entry {
        Entry {
            name: name.as_bytes().to_vec(),
            size,
            offset,
        }
    }

    #[test]
    fn test_entry_display() {
        assert_eq!(entry("Atlases/Hud.meta", 42, 0).to_string(), "- Atlases/Hud.meta (42 bytes)");
    }

    #[test]
    fn test_entry_lossy_name() {
        let e = Entry {
            name: vec![b'a', 0xff, b'b'],
            size: 0,
            offset: 0,
        };
        assert_eq!(e.file_name(), "a\u{fffd}b");
    }

    #[test]
    fn test_index_display() {
        let root = IndexNode {
            name: "Atlases".into(),
            directory: true,
            root: true,
            children: vec![
                IndexNode {
                    name: "Hud.meta".into(),
                    ..Default::default()
                },
                IndexNode {
                    name: "Fonts".into(),
                    directory: true,
                    ..Default::default()
                },
            ],
        };
        assert_eq!(
            root.to_string(),
            "- Directory Atlases with 2 entries:\n  - Hud.meta (file)\n  - Fonts (directory)"
        );
    }

    #[test]
    fn test_resolve_is_relative_to_content_base() {
        let archive = WadArchive {
            version: WadVersion::V1,
            content_base: 100,
            declared_entries: 1,
            entries: vec![entry("a", 5, 20)],
            indices: Vec::new(),
        };
        assert_eq!(archive.resolve(&archive.entries[0]), Some(120));
        assert_eq!(archive.resolve(&entry("b", 1, u64::MAX)), None);
        assert_eq!(archive.total_size(), 5);
        assert_eq!(
            archive.banner(),
            "Hotline Miami 1 WAD with 1 files and content at offset 100"
        );
    }
}
