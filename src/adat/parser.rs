//! Low-level ADAT archive parser.
//!
//! Reads the fixed 16-byte header at the start of the source, then the
//! table of contents it points at, from any source implementing
//! [`ReadAt`]. The whole TOC is fetched with a single read, which keeps
//! listing a remote archive down to two range requests.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{AdatError, Result};
use crate::io::{ReadAt, read_exact_at};

use super::structures::*;

/// Low-level ADAT parser.
///
/// Typically used through [`AdatExtractor`](super::AdatExtractor)
/// rather than directly.
///
/// ## Example
///
/// ```ignore
/// let parser = AdatParser::new(reader);
/// let index = parser.read_index()?;
/// for name in index.names() {
///     println!("{name}");
/// }
/// ```
pub struct AdatParser<R: ReadAt> {
    reader: Arc<R>,
}

impl<R: ReadAt> AdatParser<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    /// Read and validate the archive header.
    pub fn read_header(&self) -> Result<ArchiveHeader> {
        let mut buf = [0u8; ArchiveHeader::SIZE];
        read_exact_at(&*self.reader, 0, &mut buf)?;
        let header = ArchiveHeader::from_bytes(&buf)?;

        debug!(
            toc_offset = header.toc_offset,
            toc_length = header.toc_length,
            version = header.version,
            "read archive header"
        );
        Ok(header)
    }

    /// Parse the header and every TOC record.
    ///
    /// # Errors
    ///
    /// Any malformed header or record fails the whole parse; no partial
    /// index is returned.
    pub fn read_index(&self) -> Result<ArchiveIndex> {
        let header = self.read_header()?;
        let count = header.entry_count()?;

        let toc_offset = header.toc_offset as u64;
        let toc_len = count * TOC_ENTRY_LEN;
        let available = self.reader.size().saturating_sub(toc_offset);
        if toc_len as u64 > available {
            return Err(AdatError::Truncated {
                offset: toc_offset,
                expected: toc_len,
                actual: available as usize,
            });
        }

        let mut toc = vec![0u8; toc_len];
        read_exact_at(&*self.reader, toc_offset, &mut toc)?;

        let entries = toc
            .chunks_exact(TOC_ENTRY_LEN)
            .enumerate()
            .map(|(i, record)| Entry::from_bytes(i, record))
            .collect::<Result<Vec<_>>>()?;

        let index = ArchiveIndex::new(entries);
        for dup in index.duplicates() {
            warn!(name = %dup.name, offset = dup.offset, "duplicate entry name, first occurrence wins");
        }

        debug!(entries = index.len(), "read table of contents");
        Ok(index)
    }

    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }
}

/// Parse an archive index from `reader`.
pub fn parse<R: ReadAt>(reader: Arc<R>) -> Result<ArchiveIndex> {
    AdatParser::new(reader).read_index()
}
