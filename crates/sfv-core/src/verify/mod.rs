//! Verification engine: compute and classify a CRC32 for every record.
//!
//! Records are processed sequentially in manifest order. An unreadable file
//! turns into `Status::Error` on its record and the pass moves on; only a
//! closed progress sink aborts the pass. Cancellation is checked before each
//! record.

mod progress;

pub use progress::{fraction, ProgressEvent, ProgressSink, SinkClosed};

use thiserror::Error;

use crate::checksum::{self, checksums_equal, format_crc32};
use crate::control::CancelToken;
use crate::manifest::{FileReadError, FileRecord, Manifest, Status};

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("progress consumer closed; verification aborted")]
    SinkClosed,
}

impl From<SinkClosed> for VerifyError {
    fn from(_: SinkClosed) -> Self {
        VerifyError::SinkClosed
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VerifyOptions {
    /// Read buffer used for hashing.
    pub buf_size: usize,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            buf_size: checksum::DEFAULT_BUF_SIZE,
        }
    }
}

/// Outcome of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifySummary {
    pub total: usize,
    /// Records processed before the pass ended.
    pub verified: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub errors: usize,
    pub cancelled: bool,
}

impl VerifySummary {
    /// Every record verified and matched.
    pub fn all_ok(&self) -> bool {
        !self.cancelled && self.verified == self.total && self.matched == self.total
    }
}

/// Verify every record of `manifest`, sending one event per record to `sink`.
///
/// An empty manifest yields a single event with fraction 1.0.
pub fn verify_manifest(
    manifest: &mut Manifest,
    sink: &mut dyn ProgressSink,
    control: &CancelToken,
    opts: &VerifyOptions,
) -> Result<VerifySummary, VerifyError> {
    let total = manifest.len();
    let mut summary = VerifySummary {
        total,
        ..VerifySummary::default()
    };
    if total == 0 {
        sink.send(ProgressEvent::empty())?;
        tracing::info!("verification finished: empty manifest");
        return Ok(summary);
    }

    for (index, record) in manifest.records_mut().iter_mut().enumerate() {
        if control.is_cancelled() {
            summary.cancelled = true;
            tracing::info!(done = index, total, "verification cancelled");
            break;
        }
        verify_record(record, opts);
        summary.verified += 1;
        match record.status() {
            Status::Match => summary.matched += 1,
            Status::Mismatch => summary.mismatched += 1,
            Status::Error => summary.errors += 1,
            Status::Unknown | Status::Pending => {}
        }
        sink.send(ProgressEvent::step(index, total, record.clone()))?;
    }

    tracing::info!(
        total,
        matched = summary.matched,
        mismatched = summary.mismatched,
        errors = summary.errors,
        cancelled = summary.cancelled,
        "verification finished"
    );
    Ok(summary)
}

/// Hash one record's file and classify it.
pub fn verify_record(record: &mut FileRecord, opts: &VerifyOptions) {
    record.status = Status::Pending;
    record.read_error = None;
    match checksum::crc32_path(record.path(), opts.buf_size) {
        Err(source) => {
            let err = FileReadError {
                path: record.path().to_path_buf(),
                source,
            };
            tracing::warn!("{}", err);
            record.computed_checksum = None;
            record.read_error = Some(err.to_string());
            record.status = Status::Error;
        }
        Ok(crc) => {
            let computed = format_crc32(crc);
            let status = match record.declared_checksum() {
                Some(declared) if checksums_equal(declared, &computed) => Status::Match,
                Some(_) => Status::Mismatch,
                None => {
                    record.declared_checksum = Some(computed.clone());
                    Status::Match
                }
            };
            record.status = status;
            tracing::debug!(
                name = record.display_name(),
                checksum = %computed,
                status = %record.status,
                "verified"
            );
            record.computed_checksum = Some(computed);
        }
    }
}
