#![allow(dead_code)]

use flate2::Compression;
use flate2::write::{DeflateEncoder, ZlibEncoder};
use std::io::Write;

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

/// Lay out header, payloads, then TOC. Each file is `(name, payload, length)`.
pub fn archive(files: &[(&str, Vec<u8>, u32)]) -> Vec<u8> {
    let mut payloads = Vec::new();
    let mut toc = Vec::new();
    for (name, payload, length) in files {
        let offset = 16 + payloads.len();
        payloads.extend_from_slice(payload);

        let mut field = [0u8; 128];
        field[..name.len()].copy_from_slice(name.as_bytes());
        toc.extend_from_slice(&field);
        for value in [offset as u32, *length, payload.len() as u32, 0] {
            toc.extend_from_slice(&value.to_le_bytes());
        }
    }

    let mut out = b"ADAT".to_vec();
    out.extend_from_slice(&((16 + payloads.len()) as u32).to_le_bytes());
    out.extend_from_slice(&(toc.len() as u32).to_le_bytes());
    out.extend_from_slice(&9u32.to_le_bytes());
    out.extend_from_slice(&payloads);
    out.extend_from_slice(&toc);
    out
}

/// Raw deflate stream of `hello`
pub const HELLO_DEFLATE: [u8; 7] = [0xCB, 0x48, 0xCD, 0xC9, 0xC9, 0x07, 0x00];

/// The single-entry archive with the TOC before the `hello` payload.
pub fn hello_archive() -> Vec<u8> {
    let payload = HELLO_DEFLATE;
    assert_eq!(payload.len(), 7);
    let mut out = b"ADAT".to_vec();
    for value in [16u32, 144, 9] {
        out.extend_from_slice(&value.to_le_bytes());
    }
    let mut name = [0u8; 128];
    name[..9].copy_from_slice(b"hello.txt");
    out.extend_from_slice(&name);
    for value in [160u32, 5, payload.len() as u32, 0] {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&payload);
    out
}
