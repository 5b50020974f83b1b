//! `sfv list <manifest>` – show manifest records without verifying.

use anyhow::{Context, Result};
use sfv_core::config::SfvConfig;
use sfv_core::manifest;
use std::path::Path;

pub fn run_list(cfg: &SfvConfig, path: &Path) -> Result<bool> {
    let m = manifest::load_manifest(path, &cfg.load_options())
        .with_context(|| format!("load {}", path.display()))?;
    if m.is_empty() {
        println!("No records in manifest.");
    } else {
        println!("{:<10} {:<6} {}", "CHECKSUM", "EXT", "NAME");
        for r in m.records() {
            println!(
                "{:<10} {:<6} {}",
                r.declared_checksum().unwrap_or("-").to_ascii_uppercase(),
                r.extension(),
                r.display_name()
            );
        }
    }
    Ok(true)
}
