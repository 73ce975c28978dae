//! Destinations for extracted entries.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;

/// Receives the decompressed bytes of one entry and where they belong.
pub trait EntrySink {
    fn write_entry(&mut self, path: &Path, data: &[u8]) -> Result<()>;
}

/// Writes entries to disk, creating parent directories as needed.
#[derive(Debug, Default)]
pub struct FsSink;

impl EntrySink for FsSink {
    fn write_entry(&mut self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, data)?;
        debug!(path = %path.display(), bytes = data.len(), "wrote entry");
        Ok(())
    }
}

/// Streams entry contents to a writer, ignoring paths (pipe mode).
pub struct PipeSink<W: Write> {
    writer: W,
}

impl<W: Write> PipeSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl PipeSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> EntrySink for PipeSink<W> {
    fn write_entry(&mut self, _path: &Path, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(PathBuf, Vec<u8>)>,
}

impl EntrySink for MemorySink {
    fn write_entry(&mut self, path: &Path, data: &[u8]) -> Result<()> {
        self.files.push((path.to_path_buf(), data.to_vec()));
        Ok(())
    }
}
