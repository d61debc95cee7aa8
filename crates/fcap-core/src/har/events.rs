//! Turn HAR entries into capture events.

use anyhow::{Context, Result};
use base64::Engine as _;
use std::path::Path;

use crate::capture::{CaptureEvent, Headers};

use super::parse::{HarContent, HarEntry, HarHeader, HarLog};

/// Reads a HAR file and converts every entry into a [`CaptureEvent`], in
/// archive order.
///
/// Entries that cannot be converted (wrong shape, bad URL, bad timestamp,
/// undecodable content) are skipped with a warning. An archive without
/// entries is an error.
pub fn load_events(path: &Path) -> Result<Vec<CaptureEvent>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read HAR file: {}", path.display()))?;
    let har: HarLog = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse HAR JSON: {}", path.display()))?;

    let entries = har.log.entries;
    if entries.is_empty() {
        anyhow::bail!("HAR file has no entries");
    }

    let total = entries.len();
    let mut events = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        let converted = serde_json::from_str::<HarEntry>(entry.get())
            .context("parse HAR entry")
            .and_then(entry_to_event);
        match converted {
            Ok(event) => events.push(event),
            Err(err) => tracing::warn!("skipping HAR entry {}: {:#}", index, err),
        }
    }
    tracing::debug!("loaded {} of {} HAR entries from {}", events.len(), total, path.display());
    Ok(events)
}

pub(super) fn entry_to_event(entry: HarEntry) -> Result<CaptureEvent> {
    let parsed = url::Url::parse(&entry.request.url)
        .with_context(|| format!("parse URL: {}", entry.request.url))?;
    let host = parsed.host_str().unwrap_or_default().to_string();
    let path = match parsed.query() {
        Some(query) => format!("{}?{}", parsed.path(), query),
        None => parsed.path().to_string(),
    };

    let timestamp_start = epoch_seconds(&entry.started_date_time)?;
    let body = decode_content(&entry.response.content)?;

    let mut response_headers = to_headers(entry.response.headers);
    if response_headers.get("content-type").is_none() {
        if let Some(mime) = entry.response.content.mime_type.filter(|m| !m.is_empty()) {
            response_headers.push("content-type", mime);
        }
    }

    Ok(CaptureEvent {
        url: entry.request.url,
        host,
        path,
        method: entry.request.method,
        timestamp_start,
        status: entry.response.status,
        request_headers: to_headers(entry.request.headers),
        response_headers,
        body,
    })
}

/// RFC 3339 timestamp to fractional seconds since the Unix epoch.
fn epoch_seconds(started: &str) -> Result<f64> {
    let ts = chrono::DateTime::parse_from_rfc3339(started)
        .with_context(|| format!("parse startedDateTime: {started}"))?;
    Ok(ts.timestamp() as f64 + f64::from(ts.timestamp_subsec_micros()) / 1_000_000.0)
}

fn decode_content(content: &HarContent) -> Result<Vec<u8>> {
    let Some(text) = content.text.as_deref() else {
        return Ok(Vec::new());
    };
    match content.encoding.as_deref() {
        Some(enc) if enc.eq_ignore_ascii_case("base64") => base64::engine::general_purpose::STANDARD
            .decode(text.trim())
            .context("decode base64 response content"),
        _ => Ok(text.as_bytes().to_vec()),
    }
}

fn to_headers(headers: Vec<HarHeader>) -> Headers {
    headers.into_iter().map(|h| (h.name, h.value)).collect()
}
