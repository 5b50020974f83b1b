//! Text rendering of verification progress and results.

use sfv_core::verify::{ProgressEvent, VerifySummary};
use sfv_core::{FileRecord, Status};

/// Fixed-width label for a record's status.
pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Unknown => "UNKNOWN",
        Status::Pending => "PENDING",
        Status::Match => "OK",
        Status::Mismatch => "FAILED",
        Status::Error => "ERROR",
    }
}

/// One result line for a verified record.
pub fn record_line(record: &FileRecord) -> String {
    let label = status_label(record.status());
    match record.status() {
        Status::Mismatch => format!(
            "{:<7} {} (expected {}, got {})",
            label,
            record.display_name(),
            record.declared_checksum().unwrap_or("-").to_ascii_uppercase(),
            record.computed_checksum().unwrap_or("-"),
        ),
        Status::Error => format!(
            "{:<7} {} ({})",
            label,
            record.display_name(),
            record.read_error().unwrap_or("unreadable"),
        ),
        _ => format!(
            "{:<7} {}  {}",
            label,
            record.display_name(),
            record.computed_checksum().unwrap_or("-"),
        ),
    }
}

/// `[completed/total  pct%]` prefix plus the record line, or `None` for the
/// record-less event of an empty manifest.
pub fn progress_line(event: &ProgressEvent) -> Option<String> {
    let record = event.record.as_ref()?;
    Some(format!(
        "[{}/{} {:>5.1}%] {}",
        event.completed,
        event.total,
        event.fraction * 100.0,
        record_line(record)
    ))
}

pub fn summary_line(summary: &VerifySummary) -> String {
    let mut line = format!(
        "{} file(s): {} OK, {} failed, {} unreadable",
        summary.total, summary.matched, summary.mismatched, summary.errors
    );
    if summary.cancelled {
        line.push_str(&format!(
            " (cancelled after {} of {})",
            summary.verified, summary.total
        ));
    }
    line
}
