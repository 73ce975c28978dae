use std::io::{Read, Seek, SeekFrom};
use std::sync::Mutex;

use super::ReadAt;
use crate::error::{AdatError, Result};

/// Archive held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryReader {
    data: Vec<u8>,
}

impl MemoryReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl ReadAt for MemoryReader {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= self.data.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Adapter for any `Read + Seek` handle.
///
/// Every read seeks to its absolute offset first, so the handle's cursor
/// position is not meaningful between calls.
pub struct SeekReader<R> {
    inner: Mutex<R>,
    size: u64,
}

impl<R: Read + Seek> SeekReader<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let size = inner.seek(SeekFrom::End(0))?;
        Ok(Self {
            inner: Mutex::new(inner),
            size,
        })
    }
}

impl<R: Read + Seek + Send> ReadAt for SeekReader<R> {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AdatError::Io(std::io::Error::other("source lock poisoned")))?;
        inner.seek(SeekFrom::Start(offset))?;
        Ok(inner.read(buf)?)
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn memory_reader_clamps_to_end() {
        let reader = MemoryReader::new(b"hello".to_vec());
        let mut buf = [0u8; 8];
        assert_eq!(reader.read_at(2, &mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"llo");
        assert_eq!(reader.read_at(5, &mut buf).unwrap(), 0);
        assert_eq!(reader.read_at(u64::MAX, &mut buf).unwrap(), 0);
    }

    #[test]
    fn seek_reader_uses_absolute_offsets() {
        let reader = SeekReader::new(Cursor::new(b"abcdef".to_vec())).unwrap();
        assert_eq!(reader.size(), 6);

        let mut buf = [0u8; 2];
        reader.read_at(4, &mut buf).unwrap();
        assert_eq!(&buf, b"ef");
        reader.read_at(0, &mut buf).unwrap();
        assert_eq!(&buf, b"ab");
    }
}
