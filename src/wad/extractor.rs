use log::{debug, info};
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Read, Seek, Write};
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::io::BinaryReader;

use super::parser::WadParser;
use super::structures::{Entry, WadArchive};

/// What to do when an output file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwriteMode {
    /// Truncate and rewrite it.
    #[default]
    Always,
    /// Leave it alone and report the entry as skipped.
    Never,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub overwrite: OverwriteMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry has no usable name, so there is nothing to create.
    EmptyName,
    /// The destination exists and overwriting is disabled.
    Exists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStatus {
    Extracted { bytes: u64 },
    Skipped(SkipReason),
}

/// Per-entry report handed to the progress callback.
#[derive(Debug)]
pub struct ExtractProgress<'a> {
    /// Zero-based position in the entry table.
    pub index: usize,
    pub total: usize,
    pub entry: &'a Entry,
    pub path: Option<&'a Path>,
    pub status: ExtractStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub extracted: usize,
    pub skipped: usize,
    pub bytes: u64,
}

/// WAD file extractor
///
/// Owns the archive stream and the decoded metadata for one extraction pass.
pub struct WadExtractor<R> {
    reader: BinaryReader<R>,
    archive: WadArchive,
}

impl<R: Read + Seek> WadExtractor<R> {
    /// Detect the version and decode all metadata up front.
    pub fn open(reader: BinaryReader<R>) -> Result<Self> {
        let mut parser = WadParser::new(reader);
        let archive = parser.parse()?;
        Ok(Self::from_parts(parser.into_reader(), archive))
    }

    /// Pair an already decoded archive with the stream it came from.
    pub fn from_parts(reader: BinaryReader<R>, archive: WadArchive) -> Self {
        Self { reader, archive }
    }

    pub fn archive(&self) -> &WadArchive {
        &self.archive
    }

    /// List all files in the archive
    pub fn entries(&self) -> &[Entry] {
        &self.archive.entries
    }

    /// Extract file data to memory
    pub fn extract_to_memory(&mut self, entry: &Entry) -> Result<Vec<u8>> {
        read_content(&mut self.reader, &self.archive, entry)
    }

    /// Extract every entry under `out_dir`, in table order.
    ///
    /// Stops at the first failure; files already written stay on disk.
    pub fn extract_all<F>(
        &mut self,
        out_dir: &Path,
        options: &ExtractOptions,
        mut progress: F,
    ) -> Result<ExtractSummary>
    where
        F: FnMut(&ExtractProgress<'_>),
    {
        let total = self.archive.entries.len();
        let mut summary = ExtractSummary::default();

        for (index, entry) in self.archive.entries.iter().enumerate() {
            let path = output_path(out_dir, entry)?;
            let status = match &path {
                Some(path) => extract_entry(&mut self.reader, &self.archive, entry, path, options)?,
                None => ExtractStatus::Skipped(SkipReason::EmptyName),
            };

            match status {
                ExtractStatus::Extracted { bytes } => {
                    summary.extracted += 1;
                    summary.bytes += bytes;
                }
                ExtractStatus::Skipped(reason) => {
                    debug!("skipped {:?}: {reason:?}", entry.file_name());
                    summary.skipped += 1;
                }
            }

            progress(&ExtractProgress {
                index,
                total,
                entry,
                path: path.as_deref(),
                status,
            });
        }

        info!(
            "extracted {} files ({} bytes), skipped {}",
            summary.extracted, summary.bytes, summary.skipped
        );
        Ok(summary)
    }
}

fn extract_entry<R: Read + Seek>(
    reader: &mut BinaryReader<R>,
    archive: &WadArchive,
    entry: &Entry,
    path: &Path,
    options: &ExtractOptions,
) -> Result<ExtractStatus> {
    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::output(parent, e))?;
        }
    }

    if options.overwrite == OverwriteMode::Never && path.exists() {
        return Ok(ExtractStatus::Skipped(SkipReason::Exists));
    }

    // Zero-size entries still produce an (empty) file.
    let data = if entry.size == 0 {
        Vec::new()
    } else {
        read_content(reader, archive, entry)?
    };

    let mut file = fs::File::create(path).map_err(|e| Error::output(path, e))?;
    file.write_all(&data).map_err(|e| Error::output(path, e))?;

    debug!("wrote {} ({} bytes)", path.display(), data.len());
    Ok(ExtractStatus::Extracted {
        bytes: data.len() as u64,
    })
}

/// Seek to `content_base + offset` and read exactly `size` bytes.
fn read_content<R: Read + Seek>(
    reader: &mut BinaryReader<R>,
    archive: &WadArchive,
    entry: &Entry,
) -> Result<Vec<u8>> {
    let offset = archive
        .resolve(entry)
        .ok_or(Error::Truncated { needed: entry.size })?;
    reader.seek_to(offset)?;
    reader.read_vec(entry.size)
}

/// Map an entry name onto a path under `out_dir`.
///
/// The name is split on `/` and `\` as raw bytes, so distinct names always
/// map to distinct paths. Returns `None` when the name holds no path
/// component at all. Names that are rooted or climb out of `out_dir` are
/// rejected.
fn output_path(out_dir: &Path, entry: &Entry) -> Result<Option<PathBuf>> {
    let reject = |why: &str| {
        Error::output(
            out_dir.join(entry.file_name()),
            io::Error::new(io::ErrorKind::InvalidInput, format!("unsafe entry name: {why}")),
        )
    };

    if matches!(entry.name.first(), Some(b'/' | b'\\')) {
        return Err(reject("absolute path"));
    }

    let mut path = out_dir.to_path_buf();
    let mut pushed = false;
    for part in entry.name.split(|&b| b == b'/' || b == b'\\') {
        let part = name_component(part).ok_or_else(|| reject("not valid UTF-8"))?;
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (None, _) | (Some(Component::CurDir), None) => continue,
            (Some(Component::Normal(c)), None) => {
                path.push(c);
                pushed = true;
            }
            (Some(Component::ParentDir), None) => return Err(reject("parent directory")),
            _ => return Err(reject("invalid component")),
        }
    }

    Ok(pushed.then_some(path))
}

#[cfg(unix)]
fn name_component(part: &[u8]) -> Option<&OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Some(OsStr::from_bytes(part))
}

/// Without byte-level paths, anything but UTF-8 is refused.
#[cfg(not(unix))]
fn name_component(part: &[u8]) -> Option<&OsStr> {
    std::str::from_utf8(part).ok().map(OsStr::new)
}
