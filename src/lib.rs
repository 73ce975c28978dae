//! # unadat
//!
//! Lister and extractor for ADAT archives.
//!
//! An ADAT archive bundles many named, individually deflated files behind a
//! single table of contents. This library parses that table into an
//! [`ArchiveIndex`] and inflates single entries on demand, checking each
//! against its declared size. Archives can be read from the local
//! filesystem or, using HTTP Range requests, from a remote server without
//! downloading the whole file.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use unadat::{AdatExtractor, FsSink, LocalFileReader};
//!
//! fn main() -> unadat::Result<()> {
//!     let reader = Arc::new(LocalFileReader::new(Path::new("game.adat"))?);
//!     let extractor = AdatExtractor::new(reader)?;
//!
//!     for name in extractor.list() {
//!         println!("{name}");
//!     }
//!
//!     // Writes data/maps/level1.bin
//!     extractor.extract("maps\\level1.bin", &mut FsSink)?;
//!     Ok(())
//! }
//! ```

pub mod adat;
pub mod cli;
pub mod error;
pub mod io;

#[cfg(test)]
mod test_utils;

pub use adat::{AdatExtractor, ArchiveHeader, ArchiveIndex, Entry, EntrySink, FsSink, PipeSink};
pub use cli::Cli;
pub use error::{AdatError, Result};
pub use io::{HttpRangeReader, LocalFileReader, MemoryReader, ReadAt, SeekReader};
