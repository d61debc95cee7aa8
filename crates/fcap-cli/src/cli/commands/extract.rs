//! `fcap extract <file>` – print the JSON payload of a raw response body.

use anyhow::{Context, Result};
use fcap_core::config::CaptureConfig;
use fcap_core::extract::ExtractStrategy;
use std::io::Read;

pub fn run_extract(cfg: &CaptureConfig, path: &str, strict: bool, pretty: bool) -> Result<()> {
    let body = read_body(path)?;
    let strategy = if strict {
        ExtractStrategy::Strict
    } else {
        cfg.strategy
    };
    let extractor = strategy.extractor(cfg.header_lookahead);
    let json = extractor.extract(&body)?;

    if pretty {
        let value: serde_json::Value =
            serde_json::from_str(json).context("extracted payload is not valid JSON")?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{json}");
    }
    Ok(())
}

fn read_body(path: &str) -> Result<String> {
    if path == "-" {
        return decode_body(std::io::stdin().lock()).context("read body from stdin");
    }
    let file = std::fs::File::open(path).with_context(|| format!("open body: {path}"))?;
    decode_body(file).with_context(|| format!("read body: {path}"))
}

/// Reads everything from `reader`, replacing invalid UTF-8 like the capture hook does.
fn decode_body(mut reader: impl Read) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
