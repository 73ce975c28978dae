//! ADAT archive parsing and extraction.
//!
//! ## Format Overview
//!
//! An ADAT file consists of:
//! 1. A 16-byte header: `ADAT` magic, TOC offset, TOC length, version (9)
//! 2. Individually compressed entry payloads
//! 3. The table of contents (TOC): 144-byte records holding a NUL padded
//!    128-byte name, payload offset, decompressed length, compressed
//!    length and a reserved field
//!
//! All integers are little-endian `u32`. The TOC may sit anywhere; the
//! header says where.
//!
//! ## Components
//!
//! - [`structures`]: header, TOC record and index types
//! - [`parser`]: reads the header and TOC into an [`ArchiveIndex`]
//! - [`extractor`]: locates, inflates and size-checks entries
//! - [`sink`]: where extracted bytes go
//!
//! ## Limitations
//!
//! - Read only; archives cannot be created or modified
//! - Only format version 9

mod extractor;
mod parser;
mod sink;
mod structures;

pub use extractor::{AdatExtractor, DEFAULT_OUTPUT_ROOT, inflate, output_path};
pub use parser::{AdatParser, parse};
pub use sink::{EntrySink, FsSink, MemorySink, PipeSink};
pub use structures::*;
