//! Random access byte sources for archives.

mod http;
mod local;
mod memory;

pub use http::HttpRangeReader;
pub use local::LocalFileReader;
pub use memory::{MemoryReader, SeekReader};

use crate::error::{AdatError, Result};

/// Trait for random access reading from a data source
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    ///
    /// Returns the number of bytes read, which is only short of
    /// `buf.len()` when the end of the source is reached.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// Fill `buf` from `offset`, failing with [`AdatError::Truncated`] when the
/// source ends early.
pub fn read_exact_at<R: ReadAt + ?Sized>(reader: &R, offset: u64, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read_at(offset + filled as u64, &mut buf[filled..])?;
        if n == 0 {
            return Err(AdatError::Truncated {
                offset,
                expected: buf.len(),
                actual: filled,
            });
        }
        filled += n;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_exact_reports_shortfall() {
        let reader = MemoryReader::new(b"0123456789".to_vec());

        let mut buf = [0u8; 4];
        read_exact_at(&reader, 6, &mut buf).unwrap();
        assert_eq!(&buf, b"6789");

        let mut buf = [0u8; 4];
        match read_exact_at(&reader, 8, &mut buf) {
            Err(AdatError::Truncated {
                offset,
                expected,
                actual,
            }) => {
                assert_eq!(offset, 8);
                assert_eq!(expected, 4);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
