use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::checksum::DEFAULT_BUF_SIZE;
use crate::manifest::{LoadOptions, ParseOptions, DEFAULT_SEPARATOR};
use crate::verify::VerifyOptions;

/// Global configuration loaded from `~/.config/sfv/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SfvConfig {
    /// Read buffer size in bytes used while hashing files.
    pub read_buffer_bytes: usize,
    /// Only load manifests with a `.sfv` extension.
    pub require_sfv_extension: bool,
    /// Character written between filename and checksum when saving.
    pub separator: char,
    /// Skip `;` comment lines when parsing (off by default for compatibility).
    pub skip_comments: bool,
    /// Capacity of the progress channel between the verification task and its observer.
    pub progress_channel_capacity: usize,
}

impl Default for SfvConfig {
    fn default() -> Self {
        Self {
            read_buffer_bytes: DEFAULT_BUF_SIZE,
            require_sfv_extension: true,
            separator: DEFAULT_SEPARATOR,
            skip_comments: false,
            progress_channel_capacity: 64,
        }
    }
}

impl SfvConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            require_sfv_extension: self.require_sfv_extension,
            parse: ParseOptions {
                skip_comments: self.skip_comments,
            },
        }
    }

    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            buf_size: self.read_buffer_bytes.max(1),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sfv")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SfvConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SfvConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SfvConfig = toml::from_str(&data)?;
    Ok(cfg)
}
