//! `fcap init` – create output directories.

use anyhow::Result;
use fcap_core::capture::CaptureSink;
use fcap_core::config::CaptureConfig;
use std::path::Path;

pub fn run_init(cfg: &CaptureConfig, output_dir: Option<&Path>) -> Result<()> {
    let sink = CaptureSink::init(super::output_dirs(cfg, output_dir)?)?;
    let dirs = sink.dirs();
    println!("JSON:    {}", dirs.json.display());
    println!("PNG:     {}", dirs.png.display());
    println!("Headers: {}", dirs.headers.display());
    Ok(())
}
