//! `.sfv` text output.

use super::error::ManifestError;
use super::Manifest;

pub const DEFAULT_SEPARATOR: char = ' ';

/// Render one `<display_name><separator><CHECKSUM>` line per record.
///
/// Uses the computed checksum when present, else the declared one. Fails on
/// the first record that has neither; nothing is rendered in that case.
pub fn serialize_manifest(manifest: &Manifest, separator: char) -> Result<String, ManifestError> {
    let mut out = String::new();
    for (index, record) in manifest.records().iter().enumerate() {
        let checksum = record
            .output_checksum()
            .ok_or_else(|| ManifestError::Serialization {
                index,
                name: record.display_name().to_string(),
            })?;
        out.push_str(record.display_name());
        out.push(separator);
        out.push_str(&checksum.to_ascii_uppercase());
        out.push('\n');
    }
    Ok(out)
}
