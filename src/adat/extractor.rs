use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::{AdatError, Result};
use crate::io::{ReadAt, read_exact_at};

use super::parser::AdatParser;
use super::sink::EntrySink;
use super::structures::{ArchiveIndex, Entry};

/// Directory extracted entries are rooted under unless overridden
pub const DEFAULT_OUTPUT_ROOT: &str = "data";

/// ADAT entry extractor
///
/// Holds the source and its parsed index for one archive session. Each
/// extraction reads the entry's span directly, so entries can be pulled
/// in any order.
pub struct AdatExtractor<R: ReadAt> {
    parser: AdatParser<R>,
    index: ArchiveIndex,
    output_root: PathBuf,
}

impl<R: ReadAt> AdatExtractor<R> {
    /// Parse the archive behind `reader`.
    pub fn new(reader: Arc<R>) -> Result<Self> {
        let parser = AdatParser::new(reader);
        let index = parser.read_index()?;
        Ok(Self {
            parser,
            index,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        })
    }

    /// Root extracted paths under `root` instead of `data`.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn index(&self) -> &ArchiveIndex {
        &self.index
    }

    /// Entry names in TOC order
    pub fn list(&self) -> Vec<&str> {
        self.index.names()
    }

    pub fn entry(&self, name: &str) -> Result<&Entry> {
        self.index
            .get(name)
            .ok_or_else(|| AdatError::NotFound(name.to_string()))
    }

    /// Where `name` lands under the configured output root
    pub fn output_path(&self, name: &str) -> Result<PathBuf> {
        output_path(&self.output_root, name)
    }

    /// Decompress the named entry into memory.
    pub fn extract_to_memory(&self, name: &str) -> Result<Vec<u8>> {
        let entry = self.entry(name)?;
        self.read_entry(entry)
    }

    /// Read and inflate `entry`, checking the result against its declared size.
    pub fn read_entry(&self, entry: &Entry) -> Result<Vec<u8>> {
        let reader = &**self.parser.reader();
        let offset = entry.offset as u64;
        let available = reader.size().saturating_sub(offset);
        if entry.compressed_length as u64 > available {
            return Err(AdatError::Truncated {
                offset,
                expected: entry.compressed_length as usize,
                actual: available as usize,
            });
        }

        let mut compressed = vec![0u8; entry.compressed_length as usize];
        read_exact_at(reader, offset, &mut compressed)?;

        debug!(
            name = %entry.name,
            offset = entry.offset,
            compressed_length = entry.compressed_length,
            length = entry.length,
            "inflating entry"
        );
        inflate(&entry.name, &compressed, entry.length)
    }

    /// Extract the named entry and hand it to `sink`.
    ///
    /// Returns the path the entry was delivered under. Nothing reaches the
    /// sink unless decompression succeeded.
    /// Hand the named entry to `sink` under its stored name, unrooted and
    /// unchecked. Only for sinks that ignore paths, such as [`PipeSink`].
    ///
    /// [`PipeSink`]: super::PipeSink
    pub fn pipe(&self, name: &str, sink: &mut dyn EntrySink) -> Result<()> {
        let data = self.extract_to_memory(name)?;
        sink.write_entry(Path::new(name), &data)
    }

    pub fn extract(&self, name: &str, sink: &mut dyn EntrySink) -> Result<PathBuf> {
        let entry = self.entry(name)?;
        let path = self.output_path(&entry.name)?;
        let data = self.read_entry(entry)?;
        sink.write_entry(&path, &data)?;
        Ok(path)
    }

    /// Extract every entry in TOC order, stopping at the first failure.
    ///
    /// Shadowed duplicates are skipped; their name resolves to the first
    /// record, which is extracted once.
    pub fn extract_all(&self, sink: &mut dyn EntrySink) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::with_capacity(self.index.len());
        let mut written = Vec::with_capacity(self.index.len());
        for entry in self.index.entries() {
            if !seen.insert(entry.name.as_str()) {
                continue;
            }
            let path = self.output_path(&entry.name)?;
            let data = self.read_entry(entry)?;
            sink.write_entry(&path, &data)?;
            written.push(path);
        }
        Ok(written)
    }

    pub fn reader(&self) -> &Arc<R> {
        self.parser.reader()
    }
}

/// Map an entry name to a path under `root`.
///
/// Backslashes become separators. Empty and `.` components are dropped;
/// `..`, drive prefixes and names with nothing left are refused.
pub fn output_path(root: &Path, name: &str) -> Result<PathBuf> {
    let normalized = name.replace('\\', "/");
    let mut path = root.to_path_buf();
    let mut pushed = false;

    for part in normalized.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(c)), None) => {
                path.push(c);
                pushed = true;
            }
            _ => return Err(AdatError::UnsafePath(name.to_string())),
        }
    }

    if !pushed {
        return Err(AdatError::UnsafePath(name.to_string()));
    }
    Ok(path)
}

/// True when `data` opens with a zlib header: deflate method and a valid
/// header checksum.
fn has_zlib_header(data: &[u8]) -> bool {
    match data {
        [cmf, flg, ..] => {
            cmf & 0x0F == 8 && cmf >> 4 <= 7 && ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0
        }
        _ => false,
    }
}

/// Inflate a zlib or raw deflate payload that must produce exactly
/// `expected` bytes.
pub fn inflate(name: &str, compressed: &[u8], expected: u32) -> Result<Vec<u8>> {
    // The declared size is untrusted; grow past this only as output arrives
    let capacity = (expected as usize).min(compressed.len().saturating_mul(8));
    let mut out = Vec::with_capacity(capacity);
    // One byte of headroom is enough to notice an oversized stream
    let limit = expected as u64 + 1;

    let result = if has_zlib_header(compressed) {
        ZlibDecoder::new(compressed)
            .take(limit)
            .read_to_end(&mut out)
    } else {
        DeflateDecoder::new(compressed)
            .take(limit)
            .read_to_end(&mut out)
    };

    result.map_err(|source| AdatError::Decompression {
        name: name.to_string(),
        source,
    })?;

    if out.len() as u64 != expected as u64 {
        return Err(AdatError::SizeMismatch {
            name: name.to_string(),
            expected,
            actual: out.len() as u64,
        });
    }

    Ok(out)
}
