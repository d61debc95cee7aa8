//! File-system sink: one directory per artifact kind.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::event::CaptureEvent;

const RULE_WIDTH: usize = 50;

/// Output directories for the three artifact kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDirs {
    pub json: PathBuf,
    pub png: PathBuf,
    pub headers: PathBuf,
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self {
            json: PathBuf::from("firefly_json"),
            png: PathBuf::from("firefly_png"),
            headers: PathBuf::from("firefly_headers"),
        }
    }
}

impl OutputDirs {
    /// Resolves relative directories against `root`; absolute ones are kept.
    pub fn under(&self, root: &Path) -> Self {
        Self {
            json: root.join(&self.json),
            png: root.join(&self.png),
            headers: root.join(&self.headers),
        }
    }
}

/// Writes captured artifacts. Construct with [`CaptureSink::init`] before any
/// event is processed.
#[derive(Debug, Clone)]
pub struct CaptureSink {
    dirs: OutputDirs,
}

impl CaptureSink {
    /// Creates every output directory that does not exist yet. Safe to call
    /// repeatedly.
    pub fn init(dirs: OutputDirs) -> Result<Self> {
        for dir in [&dirs.json, &dirs.png, &dirs.headers] {
            fs::create_dir_all(dir)
                .with_context(|| format!("create output dir: {}", dir.display()))?;
        }
        tracing::debug!(
            "output dirs ready: json={} png={} headers={}",
            dirs.json.display(),
            dirs.png.display(),
            dirs.headers.display()
        );
        Ok(Self { dirs })
    }

    pub fn dirs(&self) -> &OutputDirs {
        &self.dirs
    }

    /// Writes PNG bytes unchanged.
    pub fn write_png(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dirs.png.join(filename);
        fs::write(&path, bytes).with_context(|| format!("write png: {}", path.display()))?;
        Ok(path)
    }

    /// Re-serializes `json_text` with two-space indentation. Key order and
    /// number literals are kept as they appear in the input.
    pub fn write_json(&self, filename: &str, json_text: &str) -> Result<PathBuf> {
        let path = self.dirs.json.join(filename);
        let value: serde_json::Value = serde_json::from_str(json_text)
            .with_context(|| format!("parse extracted JSON for {}", path.display()))?;
        let pretty = serde_json::to_string_pretty(&value).context("serialize JSON")?;
        fs::write(&path, pretty).with_context(|| format!("write json: {}", path.display()))?;
        Ok(path)
    }

    /// Dumps URL, method, body length and both header lists as text.
    pub fn write_headers(&self, filename: &str, event: &CaptureEvent) -> Result<PathBuf> {
        let path = self.dirs.headers.join(filename);
        fs::write(&path, render_header_dump(event))
            .with_context(|| format!("write headers: {}", path.display()))?;
        Ok(path)
    }
}

fn render_header_dump(event: &CaptureEvent) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "URL: {}", event.url);
    let _ = writeln!(out, "Method: {}", event.method);
    let _ = writeln!(out, "Response Body Length: {}", event.body.len());
    let _ = writeln!(out, "\nRequest Headers:\n{rule}");
    for (name, value) in event.request_headers.iter() {
        let _ = writeln!(out, "{name}: {value}");
    }
    let _ = writeln!(out, "\nResponse Headers:\n{rule}");
    for (name, value) in event.response_headers.iter() {
        let _ = writeln!(out, "{name}: {value}");
    }
    out
}
