//! Errors raised by manifest parsing, loading and saving.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    /// A line cannot hold `<name><sep><8 hex digits>`. The whole load is aborted.
    #[error("manifest line {line}: {reason}")]
    Format { line: usize, reason: String },

    /// A record would break the record invariants (empty path or name,
    /// malformed checksum).
    #[error("invalid record {name:?}: {reason}")]
    InvalidRecord { name: String, reason: &'static str },

    /// A record has neither a declared nor a computed checksum, so there is
    /// nothing to write for it.
    #[error("record {index} ({name}) has no checksum to save; verify it first")]
    Serialization { index: usize, name: String },

    /// The caller restricts manifests to `.sfv` files.
    #[error("unsupported manifest extension {extension:?}: {}", .path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("refusing to overwrite existing file {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        ManifestError::Format {
            line,
            reason: reason.into(),
        }
    }
}

/// A referenced file could not be read during verification. Captured into the
/// record (`Status::Error`) instead of aborting the pass.
#[derive(Debug, Error)]
#[error("cannot read {}: {source}", .path.display())]
pub struct FileReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
