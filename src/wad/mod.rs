//! WAD archive parsing and extraction.
//!
//! This module provides functionality for reading the WAD containers shipped
//! with Hotline Miami 1 and 2 and extracting the files they hold.
//!
//! ## Architecture
//!
//! The module is organized into three main components:
//!
//! - [`structures`]: Data structures for the format (headers, entries, index nodes)
//! - [`parser`]: Sequential decoding of the metadata section
//! - [`extractor`]: Materializing decoded entries on disk
//!
//! ## WAD Format Overview
//!
//! All integers are little-endian with no padding. Names are a `u32` length
//! followed by that many bytes, and are always shorter than 1024 bytes.
//!
//! Version 1 (no marker):
//!
//! ```text
//! u32 content_offset | u32 entry_count | entry[entry_count] | content
//! entry = name | u32 size | u32 offset
//! ```
//!
//! Version 2 (starts with `AGAR`):
//!
//! ```text
//! "AGAR" | u32 1 | u64 1 | u32 entry_count | entry[entry_count]
//!        | u32 index_count | root[index_count] | content
//! entry = name | u64 size | u64 offset
//! root  = name | u32 child_count | child[child_count]
//! child = name | u8 is_directory
//! ```
//!
//! Entry offsets are relative to the start of the content region. V1 states
//! that position in its header; in V2 it is simply where the index ends.
//!
//! ## Limitations
//!
//! - Read only: no repacking or in-place editing
//! - Entries are extracted in table order; there is no single-file lookup

mod extractor;
mod parser;
mod structures;

#[cfg(test)]
pub(crate) mod fixtures;

pub use extractor::{
    ExtractOptions, ExtractProgress, ExtractStatus, ExtractSummary, OverwriteMode, SkipReason,
    WadExtractor,
};
pub use parser::WadParser;
pub use structures::*;
