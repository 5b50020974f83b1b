//! Reading and writing manifest files on disk.

use std::fs;
use std::io::Write;
use std::path::Path;

use super::error::ManifestError;
use super::parse::{parse_manifest_with, ParseOptions};
use super::write::serialize_manifest;
use super::Manifest;

/// Extension accepted when loading is restricted.
pub const MANIFEST_EXTENSION: &str = "sfv";

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Reject files whose extension is not `.sfv` (case-insensitive).
    pub require_sfv_extension: bool,
    pub parse: ParseOptions,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            require_sfv_extension: true,
            parse: ParseOptions::default(),
        }
    }
}

/// Load a manifest file. Record paths resolve against the file's directory.
pub fn load_manifest(path: &Path, opts: &LoadOptions) -> Result<Manifest, ManifestError> {
    if opts.require_sfv_extension {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if extension != MANIFEST_EXTENSION {
            return Err(ManifestError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension,
            });
        }
    }
    let bytes = fs::read(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let manifest = parse_manifest_with(&text, base_dir, &opts.parse)?;
    tracing::info!(path = %path.display(), records = manifest.len(), "loaded manifest");
    Ok(manifest)
}

/// Write `manifest` to `path`. Serialization happens first, so a manifest
/// with unusable records never produces a partial file. Without `overwrite`
/// an existing file is left untouched.
pub fn save_manifest(
    manifest: &Manifest,
    path: &Path,
    separator: char,
    overwrite: bool,
) -> Result<(), ManifestError> {
    let text = serialize_manifest(manifest, separator)?;
    let io_err = |source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut open = fs::OpenOptions::new();
    open.write(true);
    if overwrite {
        open.create(true).truncate(true);
    } else {
        open.create_new(true);
    }
    let mut f = open.open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            ManifestError::AlreadyExists(path.to_path_buf())
        } else {
            io_err(e)
        }
    })?;
    f.write_all(text.as_bytes()).map_err(io_err)?;
    f.flush().map_err(io_err)?;
    tracing::info!(path = %path.display(), records = manifest.len(), "saved manifest");
    Ok(())
}
