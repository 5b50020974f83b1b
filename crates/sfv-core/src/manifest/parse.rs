//! `.sfv` text parsing.
//!
//! Each non-blank line is `<filename><separator><8 hex digits>`: the checksum
//! is the last 8 characters, the separator the one before, the filename
//! everything else. The separator itself is not checked, so names may contain
//! spaces.

use std::path::Path;

use super::error::ManifestError;
use super::record::FileRecord;
use super::{Manifest, CHECKSUM_LEN, SUFFIX_LEN};
use crate::checksum::is_crc32_hex;

/// Prefix of comment lines written by most SFV tools.
pub const COMMENT_PREFIX: char = ';';

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Skip lines starting with `;`.
    pub skip_comments: bool,
}

/// Parse manifest text; record paths are `base_dir` joined with each filename.
pub fn parse_manifest(text: &str, base_dir: &Path) -> Result<Manifest, ManifestError> {
    parse_manifest_with(text, base_dir, &ParseOptions::default())
}

pub fn parse_manifest_with(
    text: &str,
    base_dir: &Path,
    opts: &ParseOptions,
) -> Result<Manifest, ManifestError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut manifest = Manifest::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if opts.skip_comments && line.starts_with(COMMENT_PREFIX) {
            continue;
        }
        let (name, checksum) = split_line(line).map_err(|reason| ManifestError::format(i + 1, reason))?;
        let record = FileRecord::declared(base_dir.join(name), name, checksum)
            .map_err(|e| ManifestError::format(i + 1, e.to_string()))?;
        manifest.push(record);
    }
    tracing::debug!(records = manifest.len(), "parsed manifest");
    Ok(manifest)
}

/// Split a trimmed line into (filename, checksum).
fn split_line(line: &str) -> Result<(&str, &str), String> {
    let chars = line.chars().count();
    if chars < SUFFIX_LEN {
        return Err(format!(
            "too short for a checksum ({} characters, need at least {})",
            chars, SUFFIX_LEN
        ));
    }
    let split = line.len() - CHECKSUM_LEN;
    if !line.is_char_boundary(split) {
        return Err("checksum is not 8 hex digits".to_string());
    }
    let (head, checksum) = line.split_at(split);
    if !is_crc32_hex(checksum) {
        return Err(format!("checksum {:?} is not 8 hex digits", checksum));
    }
    // Drop the separator.
    let mut name = head.chars();
    name.next_back();
    let name = name.as_str();
    if name.is_empty() {
        return Err("missing filename".to_string());
    }
    Ok((name, checksum))
}
