//! Manifest model: an ordered list of file records plus the `.sfv` text format.
//!
//! Records keep insertion order, which is both display order and
//! verification order. Duplicate paths are allowed.

mod error;
mod file;
mod parse;
mod record;
mod write;

pub use error::{FileReadError, ManifestError};
pub use file::{load_manifest, save_manifest, LoadOptions, MANIFEST_EXTENSION};
pub use parse::{parse_manifest, parse_manifest_with, ParseOptions};
pub use record::{FileRecord, Status};
pub use write::{serialize_manifest, DEFAULT_SEPARATOR};

use std::path::PathBuf;

/// Characters taken from the end of a line: separator plus 8 hex digits.
pub const SUFFIX_LEN: usize = 9;
/// Length of a rendered CRC32.
pub const CHECKSUM_LEN: usize = 8;

/// Ordered record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    records: Vec<FileRecord>,
}

/// Per-status counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub unknown: usize,
    pub pending: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub errors: usize,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [FileRecord] {
        &mut self.records
    }

    pub fn push(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    /// Append one raw record per path, in the given order. No de-duplication.
    ///
    /// All paths are checked first; on an empty path nothing is appended.
    /// Returns the number of records added.
    pub fn add_files<I, P>(&mut self, paths: I) -> Result<usize, ManifestError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let added = paths
            .into_iter()
            .map(|p| FileRecord::raw(p.into()))
            .collect::<Result<Vec<_>, _>>()?;
        let n = added.len();
        self.records.extend(added);
        Ok(n)
    }

    /// Drop every record ("new file").
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Remove one record by position; `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<FileRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for r in &self.records {
            match r.status() {
                Status::Unknown => counts.unknown += 1,
                Status::Pending => counts.pending += 1,
                Status::Match => counts.matched += 1,
                Status::Mismatch => counts.mismatched += 1,
                Status::Error => counts.errors += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests;
