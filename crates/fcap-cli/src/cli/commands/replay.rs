//! `fcap replay <har>` – run every HAR entry through the capture hook.

use anyhow::Result;
use fcap_core::capture::{CaptureHook, CaptureSink, ReplaySummary};
use fcap_core::config::CaptureConfig;
use fcap_core::extract::ExtractStrategy;
use fcap_core::har;
use std::path::Path;

pub fn run_replay(
    mut cfg: CaptureConfig,
    path: &Path,
    output_dir: Option<&Path>,
    domain: Option<String>,
    strict: bool,
) -> Result<()> {
    if let Some(domain) = domain {
        cfg.domain = domain;
    }
    if strict {
        cfg.strategy = ExtractStrategy::Strict;
    }

    let sink = CaptureSink::init(super::output_dirs(&cfg, output_dir)?)?;
    let hook = CaptureHook::new(&cfg, sink);

    let events = har::load_events(path)?;
    tracing::info!("replaying {} events from {}", events.len(), path.display());

    let mut summary = ReplaySummary::default();
    for event in &events {
        let report = hook.on_response(event);
        for (kind, saved) in report.saved() {
            println!("saved {:<8} {}", kind, saved.display());
        }
        for (kind, error) in report.failures() {
            println!("failed {:<7} {}: {:#}", kind, event.url, error);
        }
        summary.record(&report);
    }

    println!(
        "{} events: {} json, {} png, {} headers, {} ignored, {} failed",
        summary.events, summary.json, summary.png, summary.headers, summary.ignored, summary.failed
    );
    Ok(())
}
