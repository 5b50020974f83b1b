//! Core of `sfv`: `.sfv` manifest model, CRC32 checksums and the
//! verification engine, plus the session state a front end drives.

pub mod checksum;
pub mod config;
pub mod control;
pub mod logging;
pub mod manifest;
pub mod session;
pub mod verify;

pub use control::CancelToken;
pub use manifest::{FileRecord, Manifest, ManifestError, Status};
pub use session::{Session, SessionError};
pub use verify::{verify_manifest, ProgressEvent, ProgressSink, VerifyError, VerifySummary};
