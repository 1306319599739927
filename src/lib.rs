//! # unwad
//!
//! Extract every file from the WAD archives used by Hotline Miami 1 & 2.
//!
//! Two incompatible layouts exist and are told apart by a leading marker:
//! version 2 archives start with `AGAR`, version 1 archives start directly
//! with their header. All metadata is decoded before any content is read;
//! files are then written out in table order, recreating their relative
//! paths.
//!
//! ## Features
//!
//! - Version 1 and version 2 archives, auto-detected
//! - Decoding of the version 2 directory index
//! - Strict header and table cross-checks; truncation is always reported
//! - Entry names that would escape the output directory are refused
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use unwad::{ExtractOptions, LocalFileReader, WadExtractor};
//!
//! fn main() -> unwad::Result<()> {
//!     let reader = LocalFileReader::open(Path::new("hlm2_data_desktop.wad"))?;
//!     let mut extractor = WadExtractor::open(reader)?;
//!
//!     println!("{}", extractor.archive().banner());
//!     extractor.extract_all(Path::new("out"), &ExtractOptions::default(), |p| {
//!         println!("  extracting: {}", p.entry.file_name());
//!     })?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod wad;

pub use cli::Cli;
pub use error::{Error, Result};
pub use io::{BinaryReader, LocalFileReader, WidthField};
pub use wad::{
    Entry, ExtractOptions, ExtractProgress, ExtractStatus, ExtractSummary, IndexNode,
    OverwriteMode, SkipReason, WadArchive, WadExtractor, WadParser, WadVersion,
};
