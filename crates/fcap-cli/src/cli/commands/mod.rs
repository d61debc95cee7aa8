//! CLI command handlers. Each command is in its own file.

mod extract;
mod init;
mod replay;

pub use extract::run_extract;
pub use init::run_init;
pub use replay::run_replay;

use anyhow::Result;
use fcap_core::capture::OutputDirs;
use fcap_core::config::CaptureConfig;
use std::path::Path;

/// Output dirs from config, with `--output-dir` replacing the configured root.
fn output_dirs(cfg: &CaptureConfig, output_dir: Option<&Path>) -> Result<OutputDirs> {
    let cwd = std::env::current_dir()?;
    Ok(match output_dir {
        Some(dir) => cfg.output.dirs.under(&cwd.join(dir)),
        None => cfg.output.resolve(&cwd),
    })
}
