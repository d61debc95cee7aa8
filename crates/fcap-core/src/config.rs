use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::capture::OutputDirs;
use crate::extract::{ExtractStrategy, DEFAULT_HEADER_LOOKAHEAD};

/// Where captured artifacts go (optional `[output]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Base directory for relative output dirs. None = current directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(flatten)]
    pub dirs: OutputDirs,
}

impl OutputConfig {
    /// Output dirs resolved against `root`, or against `cwd` when unset.
    pub fn resolve(&self, cwd: &Path) -> OutputDirs {
        match &self.root {
            Some(root) => self.dirs.under(&cwd.join(root)),
            None => self.dirs.under(cwd),
        }
    }
}

/// Global configuration loaded from `~/.config/fcap/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Substring a request host must contain for PNG/JSON capture.
    pub domain: String,
    /// Responses with a body strictly larger than this get a header dump.
    pub large_response_threshold: u64,
    /// Characters after the first `:` scanned by the header heuristic.
    #[serde(default = "default_header_lookahead")]
    pub header_lookahead: usize,
    /// JSON extraction strategy: "heuristic" (default) or "strict".
    #[serde(default)]
    pub strategy: ExtractStrategy,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_header_lookahead() -> usize {
    DEFAULT_HEADER_LOOKAHEAD
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            domain: "adobe.io".to_string(),
            large_response_threshold: 1_800_000,
            header_lookahead: DEFAULT_HEADER_LOOKAHEAD,
            strategy: ExtractStrategy::default(),
            output: OutputConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fcap")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CaptureConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CaptureConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<CaptureConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: CaptureConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
