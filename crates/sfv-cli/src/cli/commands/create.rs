//! `sfv create <output> <files...>` – checksum files and write a new manifest.

use anyhow::{bail, Context, Result};
use sfv_core::config::SfvConfig;
use sfv_core::Session;
use std::path::{Path, PathBuf};

use super::drive_pass;
use crate::cli::render;

/// Directory a path lives in, resolved so `a.bin`, `./a.bin` and
/// `/abs/a.bin` compare equal when they name the same place.
fn resolved_dir(path: &Path) -> PathBuf {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    dir.canonicalize()
        .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(dir)))
        .unwrap_or_else(|_| dir.to_path_buf())
}

/// Files that are not in the manifest's directory. Manifests record names
/// only, so such files could never be found again on reload.
fn files_outside<'a>(output: &Path, files: &'a [PathBuf]) -> Vec<&'a PathBuf> {
    let out_dir = resolved_dir(output);
    files
        .iter()
        .filter(|f| resolved_dir(f) != out_dir)
        .collect()
}

pub async fn run_create(
    cfg: SfvConfig,
    output: &Path,
    files: Vec<PathBuf>,
    overwrite: bool,
) -> Result<bool> {
    let outside = files_outside(output, &files);
    if !outside.is_empty() {
        for file in &outside {
            eprintln!("not next to the manifest: {}", file.display());
        }
        bail!(
            "{} file(s) are outside {}'s directory; {} not written",
            outside.len(),
            output.display(),
            output.display()
        );
    }

    let mut session = Session::new(cfg);
    session.add_raw_files(files)?;
    let summary = drive_pass(&mut session, |event| {
        if let Some(line) = render::progress_line(event) {
            println!("{line}");
        }
    })
    .await?;

    if summary.cancelled {
        bail!("cancelled; {} not written", output.display());
    }
    if summary.errors > 0 {
        bail!(
            "{} file(s) could not be read; {} not written",
            summary.errors,
            output.display()
        );
    }
    session
        .save_manifest(output, overwrite)
        .with_context(|| format!("save {}", output.display()))?;
    println!("Wrote {} record(s) to {}", summary.total, output.display());
    Ok(true)
}
