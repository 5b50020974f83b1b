//! One tracked file and its verification state.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::error::ManifestError;
use crate::checksum::is_crc32_hex;

/// Verification state of a record. Serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not checked yet.
    #[default]
    Unknown,
    /// Picked up by the running verification pass.
    Pending,
    Match,
    Mismatch,
    /// File could not be read.
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unknown => "unknown",
            Status::Pending => "pending",
            Status::Match => "match",
            Status::Mismatch => "mismatch",
            Status::Error => "error",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a manifest.
///
/// `path`, `display_name` and `extension` are fixed at creation. Checksums and
/// status are only changed by the verification engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    path: PathBuf,
    display_name: String,
    extension: String,
    /// Known-good value from the manifest; `None` for raw file additions.
    pub(crate) declared_checksum: Option<String>,
    /// Set by verification, uppercase.
    pub(crate) computed_checksum: Option<String>,
    pub(crate) status: Status,
    /// Why the file could not be read, when `status == Error`.
    pub(crate) read_error: Option<String>,
}

impl FileRecord {
    /// Record for a manifest line. Needs a non-empty path and name and an
    /// 8-hex-digit checksum (case is kept).
    pub fn declared(
        path: PathBuf,
        display_name: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Result<Self, ManifestError> {
        let display_name = display_name.into();
        let checksum = checksum.into();
        let invalid = |reason| ManifestError::InvalidRecord {
            name: display_name.clone(),
            reason,
        };
        if path.as_os_str().is_empty() {
            return Err(invalid("empty path"));
        }
        if display_name.is_empty() {
            return Err(invalid("empty filename"));
        }
        if !is_crc32_hex(&checksum) {
            return Err(invalid("checksum is not 8 hex digits"));
        }
        let extension = extension_of(Path::new(&display_name));
        Ok(Self {
            path,
            display_name,
            extension,
            declared_checksum: Some(checksum),
            computed_checksum: None,
            status: Status::Unknown,
            read_error: None,
        })
    }

    /// Record for a file added without a known checksum; shown by its basename.
    pub fn raw(path: PathBuf) -> Result<Self, ManifestError> {
        if path.as_os_str().is_empty() {
            return Err(ManifestError::InvalidRecord {
                name: String::new(),
                reason: "empty path",
            });
        }
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let extension = extension_of(&path);
        Ok(Self {
            path,
            display_name,
            extension,
            declared_checksum: None,
            computed_checksum: None,
            status: Status::Unknown,
            read_error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Lower-cased extension without the dot; empty if none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn declared_checksum(&self) -> Option<&str> {
        self.declared_checksum.as_deref()
    }

    pub fn computed_checksum(&self) -> Option<&str> {
        self.computed_checksum.as_deref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn read_error(&self) -> Option<&str> {
        self.read_error.as_deref()
    }

    /// Checksum to write when saving: computed if present, else declared.
    pub fn output_checksum(&self) -> Option<&str> {
        self.computed_checksum().or(self.declared_checksum())
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
