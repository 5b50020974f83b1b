//! `sfv verify <manifest>` – check every file listed in a manifest.

use anyhow::{Context, Result};
use sfv_core::config::SfvConfig;
use sfv_core::verify::{ProgressEvent, VerifySummary};
use sfv_core::{Session, Status};
use std::path::Path;

use crate::cli::render;

#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyArgs {
    pub json: bool,
    pub quiet: bool,
}

/// Run one pass on `session`, feeding events to `on_event`. Ctrl-C cancels
/// the pass before its next record.
pub async fn drive_pass<F>(session: &mut Session, mut on_event: F) -> Result<VerifySummary>
where
    F: FnMut(&ProgressEvent),
{
    let mut rx = session.start_verification()?;
    let mut cancel_requested = false;
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => on_event(&event),
                None => break,
            },
            _ = tokio::signal::ctrl_c(), if !cancel_requested => {
                eprintln!("cancelling after the current file...");
                session.cancel_verification();
                cancel_requested = true;
            }
        }
    }
    Ok(session.finish_verification().await?)
}

pub async fn run_verify(cfg: SfvConfig, manifest: &Path, args: VerifyArgs) -> Result<bool> {
    let mut session = Session::new(cfg);
    let count = session
        .load_manifest(manifest)
        .with_context(|| format!("load {}", manifest.display()))?;
    tracing::info!(path = %manifest.display(), count, "verifying manifest");

    let summary = drive_pass(&mut session, |event| {
        if args.json {
            return;
        }
        let Some(record) = event.record.as_ref() else {
            return;
        };
        if args.quiet && record.status() == Status::Match {
            return;
        }
        if let Some(line) = render::progress_line(event) {
            println!("{line}");
        }
    })
    .await?;

    if args.json {
        let records = session.records()?;
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        println!("{}", render::summary_line(&summary));
    }
    Ok(summary.all_ok())
}
