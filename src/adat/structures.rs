use byteorder::{LittleEndian, ReadBytesExt};
use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::io::Cursor;

use crate::error::{AdatError, Result};

/// Magic tag at the start of every archive
pub const MAGIC: &[u8; 4] = b"ADAT";

/// The only format version this reader supports
pub const SUPPORTED_VERSION: u32 = 9;

/// Size of the NUL padded name field in a TOC record
pub const NAME_FIELD_LEN: usize = 128;

/// Size of one TOC record: name plus four u32 fields
pub const TOC_ENTRY_LEN: usize = NAME_FIELD_LEN + 4 * 4;

/// Archive header - 16 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub magic: [u8; 4],
    pub toc_offset: u32,
    pub toc_length: u32,
    pub version: u32,
}

impl ArchiveHeader {
    pub const SIZE: usize = 16;

    /// Decode and validate the header.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(AdatError::Truncated {
                offset: 0,
                expected: Self::SIZE,
                actual: data.len(),
            });
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&data[0..4]);
        if &magic != MAGIC {
            return Err(AdatError::BadMagic(magic));
        }

        let mut cursor = Cursor::new(&data[4..Self::SIZE]);
        let header = Self {
            magic,
            toc_offset: cursor.read_u32::<LittleEndian>()?,
            toc_length: cursor.read_u32::<LittleEndian>()?,
            version: cursor.read_u32::<LittleEndian>()?,
        };

        if header.version != SUPPORTED_VERSION {
            return Err(AdatError::UnsupportedVersion {
                found: header.version,
                expected: SUPPORTED_VERSION,
            });
        }

        header.entry_count()?;
        Ok(header)
    }

    /// Number of TOC records, rejecting empty or partial tables.
    pub fn entry_count(&self) -> Result<usize> {
        let toc_length = self.toc_length as usize;
        let count = toc_length / TOC_ENTRY_LEN;
        if count == 0 {
            return Err(AdatError::EmptyIndex {
                toc_length: self.toc_length,
            });
        }
        if toc_length % TOC_ENTRY_LEN != 0 {
            return Err(AdatError::MisalignedToc {
                toc_length: self.toc_length,
                record_size: TOC_ENTRY_LEN,
            });
        }
        Ok(count)
    }
}

/// One archived file as described by its TOC record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// Absolute offset of the compressed payload
    pub offset: u32,
    /// Decompressed size in bytes
    pub length: u32,
    pub compressed_length: u32,
    /// Reserved, carried through untouched
    pub u0: u32,
}

impl Entry {
    /// Decode one TOC record. `index` is only used for error reporting.
    pub fn from_bytes(index: usize, data: &[u8]) -> Result<Self> {
        if data.len() < TOC_ENTRY_LEN {
            return Err(AdatError::Truncated {
                offset: (index * TOC_ENTRY_LEN) as u64,
                expected: TOC_ENTRY_LEN,
                actual: data.len(),
            });
        }

        let name = std::str::from_utf8(&data[..NAME_FIELD_LEN])
            .map_err(|source| AdatError::Encoding { index, source })?
            .trim_end_matches('\0')
            .to_string();

        let mut cursor = Cursor::new(&data[NAME_FIELD_LEN..TOC_ENTRY_LEN]);

        Ok(Self {
            name,
            offset: cursor.read_u32::<LittleEndian>()?,
            length: cursor.read_u32::<LittleEndian>()?,
            compressed_length: cursor.read_u32::<LittleEndian>()?,
            u0: cursor.read_u32::<LittleEndian>()?,
        })
    }

    /// Percentage of space saved by compression
    pub fn compression_ratio(&self) -> u64 {
        if self.length == 0 || self.compressed_length >= self.length {
            return 0;
        }
        100 - (self.compressed_length as u64 * 100 / self.length as u64)
    }
}

/// Entries of one archive in TOC order, with name lookup.
#[derive(Debug, Clone)]
pub struct ArchiveIndex {
    entries: Vec<Entry>,
    by_name: HashMap<String, usize>,
    duplicates: Vec<usize>,
}

impl ArchiveIndex {
    /// Build the index. When names repeat, the first record wins lookups
    /// and later ones are remembered in [`duplicates`](Self::duplicates).
    pub fn new(entries: Vec<Entry>) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut duplicates = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            match by_name.entry(entry.name.clone()) {
                MapEntry::Vacant(slot) => {
                    slot.insert(i);
                }
                MapEntry::Occupied(_) => duplicates.push(i),
            }
        }

        Self {
            entries,
            by_name,
            duplicates,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in TOC order, duplicates included
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// Records shadowed by an earlier record with the same name
    pub fn duplicates(&self) -> impl Iterator<Item = &Entry> {
        self.duplicates.iter().map(|&i| &self.entries[i])
    }
}
