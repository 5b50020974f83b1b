//! CRC32 checksums of whole files, rendered the way `.sfv` manifests store them.
//!
//! Uses the standard IEEE polynomial (the one zlib uses). Files are read in
//! chunks so memory stays bounded for large media files.

use crc32fast::Hasher;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default read buffer for hashing.
pub const DEFAULT_BUF_SIZE: usize = 64 * 1024;

/// Compute the CRC32 of a file's complete content.
pub fn crc32_path(path: &Path, buf_size: usize) -> io::Result<u32> {
    let mut f = File::open(path)?;
    let mut hasher = Hasher::new();
    let mut buf = vec![0u8; buf_size.max(1)];
    loop {
        let n = match f.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}

/// CRC32 of an in-memory buffer.
pub fn crc32_bytes(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// 8 uppercase hex digits, zero-padded.
pub fn format_crc32(value: u32) -> String {
    format!("{:08X}", value)
}

/// True if `s` is exactly 8 ASCII hex digits (either case).
pub fn is_crc32_hex(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Case-insensitive checksum comparison.
pub fn checksums_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
