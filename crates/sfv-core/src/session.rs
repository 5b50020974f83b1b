//! Application state: the manifest being worked on plus the background
//! verification pass, if any.
//!
//! Structural operations (load, add, clear, save) run on the caller's task.
//! `start_verification` hands the manifest to a blocking task for the whole
//! pass and gives it back in `finish_verification`; while a pass runs the
//! session refuses structural operations and snapshots with `Busy`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use crate::config::SfvConfig;
use crate::control::CancelToken;
use crate::manifest::{self, FileRecord, Manifest, ManifestError};
use crate::verify::{self, ProgressEvent, VerifyError, VerifySummary};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a verification pass is running")]
    Busy,
    #[error("no verification pass is running")]
    NotRunning,
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Verify(#[from] VerifyError),
    /// The verification task panicked; its manifest is lost.
    #[error("verification task failed: {0}")]
    Join(#[from] JoinError),
}

type PassResult = (Manifest, Result<VerifySummary, VerifyError>);

struct RunningPass {
    control: CancelToken,
    handle: JoinHandle<PassResult>,
}

pub struct Session {
    cfg: SfvConfig,
    manifest: Manifest,
    running: Option<RunningPass>,
}

impl Session {
    pub fn new(cfg: SfvConfig) -> Self {
        Self {
            cfg,
            manifest: Manifest::new(),
            running: None,
        }
    }

    pub fn is_verifying(&self) -> bool {
        self.running.is_some()
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.running.is_some() {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }

    /// Current manifest. Unavailable while a pass owns it.
    pub fn manifest(&self) -> Result<&Manifest, SessionError> {
        self.ensure_idle()?;
        Ok(&self.manifest)
    }

    /// Snapshot of the record list.
    pub fn records(&self) -> Result<&[FileRecord], SessionError> {
        Ok(self.manifest()?.records())
    }

    /// Replace the manifest with the one in `path`. On error the current
    /// manifest is kept as is.
    pub fn load_manifest(&mut self, path: &Path) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        let loaded = manifest::load_manifest(path, &self.cfg.load_options())?;
        self.manifest = loaded;
        Ok(self.manifest.len())
    }

    /// Append raw files (no known checksum). Returns the new record count.
    /// An empty path rejects the whole batch.
    pub fn add_raw_files<I, P>(&mut self, paths: I) -> Result<usize, SessionError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.ensure_idle()?;
        let added = self.manifest.add_files(paths)?;
        tracing::debug!(added, "added raw files");
        Ok(self.manifest.len())
    }

    /// Discard all records ("new file").
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.manifest.clear();
        Ok(())
    }

    pub fn save_manifest(&self, path: &Path, overwrite: bool) -> Result<(), SessionError> {
        self.ensure_idle()?;
        manifest::save_manifest(&self.manifest, path, self.cfg.separator, overwrite)?;
        Ok(())
    }

    /// Start a pass on a blocking task and return its progress stream.
    ///
    /// Events arrive in manifest order. The stream is bounded: keep draining
    /// it until it closes, or the pass stalls. Dropping the receiver aborts
    /// the pass with `VerifyError::SinkClosed`. Must be called inside a
    /// tokio runtime.
    pub fn start_verification(&mut self) -> Result<mpsc::Receiver<ProgressEvent>, SessionError> {
        self.ensure_idle()?;
        let (mut tx, rx) = mpsc::channel::<ProgressEvent>(self.cfg.progress_channel_capacity.max(1));
        let control = CancelToken::new();
        let opts = self.cfg.verify_options();
        let mut manifest = std::mem::take(&mut self.manifest);
        tracing::info!(records = manifest.len(), "starting verification");
        let handle = tokio::task::spawn_blocking({
            let control = control.clone();
            move || {
                let result = verify::verify_manifest(&mut manifest, &mut tx, &control, &opts);
                (manifest, result)
            }
        });
        self.running = Some(RunningPass { control, handle });
        Ok(rx)
    }

    /// Ask the running pass to stop before its next record. Returns false if
    /// nothing is running.
    pub fn cancel_verification(&self) -> bool {
        match &self.running {
            Some(pass) => {
                pass.control.cancel();
                true
            }
            None => false,
        }
    }

    /// Wait for the running pass and take the manifest back.
    pub async fn finish_verification(&mut self) -> Result<VerifySummary, SessionError> {
        let pass = self.running.take().ok_or(SessionError::NotRunning)?;
        let (manifest, result) = pass.handle.await?;
        self.manifest = manifest;
        Ok(result?)
    }

    /// Run a full pass, handing each event to `on_event` as it arrives.
    pub async fn run_verification<F>(&mut self, mut on_event: F) -> Result<VerifySummary, SessionError>
    where
        F: FnMut(&ProgressEvent),
    {
        let mut rx = self.start_verification()?;
        while let Some(event) = rx.recv().await {
            on_event(&event);
        }
        self.finish_verification().await
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_verification();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Status;

    fn session() -> Session {
        Session::new(SfvConfig {
            progress_channel_capacity: 2,
            ..SfvConfig::default()
        })
    }

    #[tokio::test]
    async fn create_verify_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, b"hello\n").unwrap();
        std::fs::write(&b, b"123456789").unwrap();

        let mut s = session();
        assert_eq!(s.add_raw_files([&a, &b]).unwrap(), 2);
        let mut fractions = Vec::new();
        let summary = s
            .run_verification(|e| fractions.push(e.fraction))
            .await
            .unwrap();
        assert!(summary.all_ok());
        assert_eq!(fractions, [0.5, 1.0]);

        let out = dir.path().join("set.sfv");
        s.save_manifest(&out, false).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "a.txt 363A3020\nb.txt CBF43926\n"
        );

        s.clear().unwrap();
        assert!(s.records().unwrap().is_empty());
        assert_eq!(s.load_manifest(&out).unwrap(), 2);
        let summary = s.run_verification(|_| {}).await.unwrap();
        assert_eq!(summary.matched, 2);
    }

    #[tokio::test]
    async fn busy_while_verifying() {
        let mut s = session();
        s.add_raw_files(["/nonexistent/x.bin"]).unwrap();
        let mut rx = s.start_verification().unwrap();
        assert!(s.is_verifying());
        assert!(matches!(s.records(), Err(SessionError::Busy)));
        assert!(matches!(s.clear(), Err(SessionError::Busy)));
        assert!(matches!(s.start_verification(), Err(SessionError::Busy)));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.record.unwrap().status(), Status::Error);
        assert!(rx.recv().await.is_none());
        let summary = s.finish_verification().await.unwrap();
        assert_eq!(summary.errors, 1);
        assert_eq!(s.records().unwrap()[0].status(), Status::Error);
    }

    #[tokio::test]
    async fn cancel_stops_before_remaining_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        for i in 0..20 {
            let p = dir.path().join(format!("{i}.bin"));
            std::fs::write(&p, [i as u8]).unwrap();
            s.add_raw_files([p]).unwrap();
        }
        let mut rx = s.start_verification().unwrap();
        let first = rx.recv().await.unwrap();
        assert_eq!(first.index, Some(0));
        assert!(s.cancel_verification());
        let mut last_completed = first.completed;
        while let Some(e) = rx.recv().await {
            last_completed = e.completed;
        }
        let summary = s.finish_verification().await.unwrap();
        assert!(summary.cancelled);
        assert!(summary.verified < 20);
        assert_eq!(summary.verified, last_completed);
        let records = s.records().unwrap();
        assert_eq!(records.len(), 20);
        assert_eq!(records[19].status(), Status::Unknown);
    }

    #[tokio::test]
    async fn failed_load_keeps_current_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.sfv");
        std::fs::write(&bad, "ok.bin 00000001\nshort\n").unwrap();
        let mut s = session();
        s.add_raw_files(["/x/keep.bin"]).unwrap();
        assert!(matches!(
            s.load_manifest(&bad),
            Err(SessionError::Manifest(ManifestError::Format { line: 2, .. }))
        ));
        assert_eq!(s.records().unwrap()[0].display_name(), "keep.bin");
    }

    #[tokio::test]
    async fn empty_raw_path_is_rejected() {
        let mut s = session();
        s.add_raw_files(["/x/keep.bin"]).unwrap();
        assert!(matches!(
            s.add_raw_files(["/x/a.bin", ""]),
            Err(SessionError::Manifest(ManifestError::InvalidRecord { .. }))
        ));
        let summary = s.run_verification(|_| {}).await.unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(s.records().unwrap()[0].display_name(), "keep.bin");
    }

    #[tokio::test]
    async fn finish_without_start_is_error() {
        let mut s = session();
        assert!(matches!(
            s.finish_verification().await,
            Err(SessionError::NotRunning)
        ));
        assert!(!s.cancel_verification());
    }

    #[tokio::test]
    async fn save_before_verify_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        s.add_raw_files([dir.path().join("a.bin")]).unwrap();
        let out = dir.path().join("out.sfv");
        assert!(matches!(
            s.save_manifest(&out, false),
            Err(SessionError::Manifest(ManifestError::Serialization { .. }))
        ));
        assert!(!out.exists());
    }
}
