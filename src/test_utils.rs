//! Helpers for building ADAT archives in tests.

use flate2::Compression;
use flate2::write::{DeflateEncoder, ZlibEncoder};
use std::io::Write;

use crate::adat::{ArchiveHeader, MAGIC, NAME_FIELD_LEN, SUPPORTED_VERSION, TOC_ENTRY_LEN};

/// Raw deflate stream of `hello`, as produced by zlib and miniz
pub const HELLO_DEFLATE: [u8; 7] = [0xCB, 0x48, 0xCD, 0xC9, 0xC9, 0x07, 0x00];

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

struct Record {
    name: Vec<u8>,
    payload: Vec<u8>,
    length: u32,
    compressed_length: Option<u32>,
    offset: Option<u32>,
}

/// Assembles an archive: header, payloads and TOC.
pub struct ArchiveBuilder {
    version: u32,
    toc_first: bool,
    records: Vec<Record>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            toc_first: false,
            records: Vec::new(),
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Place the TOC right after the header instead of after the payloads
    pub fn toc_first(mut self) -> Self {
        self.toc_first = true;
        self
    }

    /// zlib compressed entry
    pub fn file(self, name: &str, data: &[u8]) -> Self {
        self.raw(name, zlib(data), data.len() as u32)
    }

    /// Raw deflate compressed entry
    pub fn deflate_file(self, name: &str, data: &[u8]) -> Self {
        self.raw(name, deflate(data), data.len() as u32)
    }

    /// Entry with an arbitrary payload and declared length
    pub fn raw(self, name: &str, payload: Vec<u8>, length: u32) -> Self {
        self.raw_name(name.as_bytes().to_vec(), payload, length)
    }

    /// Entry whose TOC record declares `compressed_length` regardless of
    /// the payload actually stored
    pub fn raw_entry(self, name: &str, payload: Vec<u8>, length: u32, compressed_length: u32) -> Self {
        let mut builder = self.raw(name, payload, length);
        if let Some(record) = builder.records.last_mut() {
            record.compressed_length = Some(compressed_length);
        }
        builder
    }

    /// Point the last entry's record at `offset`
    pub fn offset_override(mut self, offset: u32) -> Self {
        if let Some(record) = self.records.last_mut() {
            record.offset = Some(offset);
        }
        self
    }

    pub fn raw_name(mut self, name: Vec<u8>, payload: Vec<u8>, length: u32) -> Self {
        assert!(name.len() <= NAME_FIELD_LEN);
        self.records.push(Record {
            name,
            payload,
            length,
            compressed_length: None,
            offset: None,
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let toc_length = self.records.len() * TOC_ENTRY_LEN;
        let payload_start = if self.toc_first {
            ArchiveHeader::SIZE + toc_length
        } else {
            ArchiveHeader::SIZE
        };

        let mut payloads = Vec::new();
        let mut toc = Vec::with_capacity(toc_length);
        for record in &self.records {
            let offset = payload_start + payloads.len();
            payloads.extend_from_slice(&record.payload);

            let mut name = [0u8; NAME_FIELD_LEN];
            name[..record.name.len()].copy_from_slice(&record.name);
            toc.extend_from_slice(&name);
            let fields = [
                record.offset.unwrap_or(offset as u32),
                record.length,
                record
                    .compressed_length
                    .unwrap_or(record.payload.len() as u32),
                0,
            ];
            for field in fields {
                toc.extend_from_slice(&field.to_le_bytes());
            }
        }

        let toc_offset = if self.toc_first {
            ArchiveHeader::SIZE
        } else {
            ArchiveHeader::SIZE + payloads.len()
        };

        let mut out = MAGIC.to_vec();
        out.extend_from_slice(&(toc_offset as u32).to_le_bytes());
        out.extend_from_slice(&(toc_length as u32).to_le_bytes());
        out.extend_from_slice(&self.version.to_le_bytes());
        if self.toc_first {
            out.extend_from_slice(&toc);
            out.extend_from_slice(&payloads);
        } else {
            out.extend_from_slice(&payloads);
            out.extend_from_slice(&toc);
        }
        out
    }
}
