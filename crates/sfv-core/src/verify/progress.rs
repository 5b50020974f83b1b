//! Progress events emitted by the verification engine, and the sinks that
//! receive them.

use crate::manifest::FileRecord;

/// One step of a verification pass.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Position of the record just verified; `None` for the single event of
    /// an empty manifest.
    pub index: Option<usize>,
    /// Records finished so far.
    pub completed: usize,
    pub total: usize,
    /// Cumulative fraction in [0.0, 1.0]; exactly 1.0 on the last event.
    pub fraction: f64,
    /// Snapshot of the record after verification.
    pub record: Option<FileRecord>,
}

impl ProgressEvent {
    pub(crate) fn step(index: usize, total: usize, record: FileRecord) -> Self {
        let completed = index + 1;
        Self {
            index: Some(index),
            completed,
            total,
            fraction: fraction(completed, total),
            record: Some(record),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            index: None,
            completed: 0,
            total: 0,
            fraction: 1.0,
            record: None,
        }
    }

    pub fn is_final(&self) -> bool {
        self.completed == self.total
    }
}

/// `completed / total`, recomputed per step so no drift accumulates; 1.0 for
/// the last step and for an empty pass.
pub fn fraction(completed: usize, total: usize) -> f64 {
    if total == 0 || completed >= total {
        return 1.0;
    }
    completed as f64 / total as f64
}

/// The consumer went away; the pass is aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

/// Receives progress events, in manifest order, from the verification thread.
pub trait ProgressSink {
    fn send(&mut self, event: ProgressEvent) -> Result<(), SinkClosed>;
}

impl ProgressSink for Vec<ProgressEvent> {
    fn send(&mut self, event: ProgressEvent) -> Result<(), SinkClosed> {
        self.push(event);
        Ok(())
    }
}

impl ProgressSink for std::sync::mpsc::Sender<ProgressEvent> {
    fn send(&mut self, event: ProgressEvent) -> Result<(), SinkClosed> {
        std::sync::mpsc::Sender::send(self, event).map_err(|_| SinkClosed)
    }
}

/// Blocking send; only call from a blocking thread (e.g. `spawn_blocking`).
impl ProgressSink for tokio::sync::mpsc::Sender<ProgressEvent> {
    fn send(&mut self, event: ProgressEvent) -> Result<(), SinkClosed> {
        self.blocking_send(event).map_err(|_| SinkClosed)
    }
}
