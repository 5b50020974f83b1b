//! Checksum command: compute CRC32 of a file.

use anyhow::{Context, Result};
use sfv_core::checksum;
use sfv_core::config::SfvConfig;
use std::path::Path;

/// Compute and print the CRC32 of the given file.
pub fn run_checksum(cfg: &SfvConfig, path: &Path) -> Result<bool> {
    let crc = checksum::crc32_path(path, cfg.read_buffer_bytes.max(1))
        .with_context(|| format!("read {}", path.display()))?;
    println!("{}  {}", checksum::format_crc32(crc), path.display());
    Ok(true)
}
