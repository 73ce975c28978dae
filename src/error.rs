//! Error types for ADAT archive reading and extraction.

use std::str::Utf8Error;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, AdatError>;

/// Errors that can occur while parsing an archive or extracting an entry.
#[derive(Debug, Error)]
pub enum AdatError {
    /// The first four bytes are not `ADAT`
    #[error("Bad magic: expected \"ADAT\", found {0:?}")]
    BadMagic([u8; 4]),

    /// Header declares a format version other than the supported one
    #[error("Unsupported version: {found}, expected {expected}")]
    UnsupportedVersion {
        /// Version stored in the header
        found: u32,
        /// The only version this reader understands
        expected: u32,
    },

    /// The table of contents holds no records
    #[error("Empty index: TOC length {toc_length} holds no entries")]
    EmptyIndex { toc_length: u32 },

    /// TOC length is not a whole number of records
    #[error("Misaligned TOC: length {toc_length} is not a multiple of {record_size}")]
    MisalignedToc { toc_length: u32, record_size: usize },

    /// A record name is not valid UTF-8
    #[error("Entry {index} has a name that is not valid UTF-8: {source}")]
    Encoding {
        /// Position of the record in the TOC
        index: usize,
        #[source]
        source: Utf8Error,
    },

    /// No entry with the requested name
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Fewer bytes available than a structure or payload declares
    #[error("Truncated archive: expected {expected} bytes at offset {offset}, got {actual}")]
    Truncated {
        offset: u64,
        expected: usize,
        actual: usize,
    },

    /// The payload is not a valid deflate/zlib stream
    #[error("Decompression of {name} failed: {source}")]
    Decompression {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The payload inflated to a different size than the TOC declares
    #[error("Decompressed size mismatch for {name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        name: String,
        expected: u32,
        actual: u64,
    },

    /// Entry name would resolve outside the output directory
    #[error("Refusing to extract {0}: path escapes the output directory")]
    UnsafePath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote server cannot serve random access reads
    #[error("Remote source error: {0}")]
    Remote(String),
}

impl AdatError {
    /// Whether this error belongs to the header/TOC format family.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            AdatError::BadMagic(_)
                | AdatError::UnsupportedVersion { .. }
                | AdatError::EmptyIndex { .. }
                | AdatError::MisalignedToc { .. }
        )
    }

    /// Whether the payload failed to inflate or inflated to the wrong size.
    pub fn is_decompression_error(&self) -> bool {
        matches!(
            self,
            AdatError::Decompression { .. } | AdatError::SizeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_family() {
        assert!(AdatError::BadMagic(*b"PK\x03\x04").is_format_error());
        assert!(
            AdatError::UnsupportedVersion {
                found: 8,
                expected: 9
            }
            .is_format_error()
        );
        assert!(AdatError::EmptyIndex { toc_length: 0 }.is_format_error());
        assert!(!AdatError::NotFound("a".into()).is_format_error());
    }

    #[test]
    fn messages_carry_offending_values() {
        let err = AdatError::UnsupportedVersion {
            found: 7,
            expected: 9,
        };
        assert_eq!(err.to_string(), "Unsupported version: 7, expected 9");

        let err = AdatError::NotFound("missing.txt".into());
        assert_eq!(err.to_string(), "Entry not found: missing.txt");
    }
}
