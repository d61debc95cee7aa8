//! Response hook: applies the selection rules to each event and writes the
//! matching artifacts. Failures are logged and recorded, never propagated.

use std::path::PathBuf;

use crate::config::CaptureConfig;
use crate::extract::JsonExtractor;

use super::event::CaptureEvent;
use super::filename::{capture_filename, HEADERS_SUFFIX, JSON_SUFFIX, PNG_SUFFIX};
use super::rules::{classify, host_matches, is_oversized, CaptureKind};
use super::sink::CaptureSink;

/// Why an event produced no body artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    HostNotMatched,
    UnhandledContentType,
}

/// What happened to one artifact of one event.
#[derive(Debug)]
pub enum CaptureOutcome {
    Saved { kind: CaptureKind, path: PathBuf },
    Ignored(IgnoreReason),
    Failed { kind: CaptureKind, error: anyhow::Error },
}

/// Outcomes for a single event, in processing order.
#[derive(Debug, Default)]
pub struct CaptureReport {
    pub outcomes: Vec<CaptureOutcome>,
}

impl CaptureReport {
    pub fn saved(&self) -> impl Iterator<Item = (CaptureKind, &PathBuf)> {
        self.outcomes.iter().filter_map(|o| match o {
            CaptureOutcome::Saved { kind, path } => Some((*kind, path)),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (CaptureKind, &anyhow::Error)> {
        self.outcomes.iter().filter_map(|o| match o {
            CaptureOutcome::Failed { kind, error } => Some((*kind, error)),
            _ => None,
        })
    }

    pub fn ignored(&self) -> Option<&IgnoreReason> {
        self.outcomes.iter().find_map(|o| match o {
            CaptureOutcome::Ignored(reason) => Some(reason),
            _ => None,
        })
    }
}

/// Running totals over many events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub png: usize,
    pub json: usize,
    pub headers: usize,
    pub ignored: usize,
    pub failed: usize,
}

impl ReplaySummary {
    pub fn record(&mut self, report: &CaptureReport) {
        self.events += 1;
        for outcome in &report.outcomes {
            match outcome {
                CaptureOutcome::Saved { kind, .. } => match kind {
                    CaptureKind::Png => self.png += 1,
                    CaptureKind::GraphqlJson => self.json += 1,
                    CaptureKind::Headers => self.headers += 1,
                },
                CaptureOutcome::Ignored(_) => self.ignored += 1,
                CaptureOutcome::Failed { .. } => self.failed += 1,
            }
        }
    }
}

/// The capture hook. Holds only immutable state; share it freely.
pub struct CaptureHook {
    domain: String,
    large_response_threshold: u64,
    extractor: Box<dyn JsonExtractor>,
    sink: CaptureSink,
}

impl CaptureHook {
    pub fn new(config: &CaptureConfig, sink: CaptureSink) -> Self {
        Self {
            domain: config.domain.clone(),
            large_response_threshold: config.large_response_threshold,
            extractor: config.strategy.extractor(config.header_lookahead),
            sink,
        }
    }

    pub fn sink(&self) -> &CaptureSink {
        &self.sink
    }

    /// Handles one completed exchange.
    ///
    /// The oversized-response header dump runs before the host filter, so it
    /// applies to every host.
    pub fn on_response(&self, event: &CaptureEvent) -> CaptureReport {
        let mut report = CaptureReport::default();
        let content_type = event.content_type();
        tracing::debug!(
            "response url={} content-type={} body_len={}",
            event.url,
            content_type,
            event.body.len()
        );

        if is_oversized(event.body.len(), self.large_response_threshold) {
            tracing::info!("large response ({} bytes): {}", event.body.len(), event.url);
            let name = capture_filename(event.timestamp_start, &event.path, HEADERS_SUFFIX);
            report.outcomes.push(self.finish(
                CaptureKind::Headers,
                self.sink.write_headers(&name, event),
            ));
        }

        if !host_matches(&event.host, &self.domain) {
            tracing::debug!("ignoring host {}", event.host);
            report
                .outcomes
                .push(CaptureOutcome::Ignored(IgnoreReason::HostNotMatched));
            return report;
        }

        let outcome = match classify(content_type) {
            Some(CaptureKind::Png) => {
                let name = capture_filename(event.timestamp_start, &event.path, PNG_SUFFIX);
                self.finish(CaptureKind::Png, self.sink.write_png(&name, &event.body))
            }
            Some(CaptureKind::GraphqlJson) => {
                let name = capture_filename(event.timestamp_start, &event.path, JSON_SUFFIX);
                self.finish(CaptureKind::GraphqlJson, self.save_graphql(&name, event))
            }
            Some(CaptureKind::Headers) | None => {
                CaptureOutcome::Ignored(IgnoreReason::UnhandledContentType)
            }
        };
        report.outcomes.push(outcome);
        report
    }

    fn save_graphql(&self, filename: &str, event: &CaptureEvent) -> anyhow::Result<PathBuf> {
        let text = event.body_text();
        let json = self.extractor.extract(&text)?;
        self.sink.write_json(filename, json)
    }

    fn finish(&self, kind: CaptureKind, result: anyhow::Result<PathBuf>) -> CaptureOutcome {
        match result {
            Ok(path) => {
                tracing::info!("saved {} to {}", kind, path.display());
                CaptureOutcome::Saved { kind, path }
            }
            Err(error) => {
                tracing::warn!("failed to save {}: {:#}", kind, error);
                CaptureOutcome::Failed { kind, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::event::Headers;
    use crate::capture::sink::OutputDirs;
    use crate::extract::ExtractError;
    use std::fs;

    fn hook_in(dir: &std::path::Path, config: &CaptureConfig) -> CaptureHook {
        let sink = CaptureSink::init(OutputDirs::default().under(dir)).unwrap();
        CaptureHook::new(config, sink)
    }

    fn event(host: &str, path: &str, content_type: &str, body: &[u8]) -> CaptureEvent {
        let mut response_headers = Headers::new();
        response_headers.push("Content-Type", content_type);
        CaptureEvent {
            url: format!("https://{host}{path}"),
            host: host.to_string(),
            path: path.to_string(),
            method: "POST".to_string(),
            timestamp_start: 1736700000.5,
            status: 200,
            response_headers,
            body: body.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn graphql_body_is_extracted_and_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let hook = hook_in(dir.path(), &CaptureConfig::default());
        let body = b"--graphql\r\ncontent-type: application/json\r\n\r\n{\"data\":{\"id\":1}}\r\n--graphql--";
        let report = hook.on_response(&event(
            "firefly.adobe.io",
            "/graphql?op=x",
            "multipart/mixed; boundary=\"graphql\"",
            body,
        ));

        let saved: Vec<_> = report.saved().collect();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, CaptureKind::GraphqlJson);
        assert!(saved[0].1.ends_with("firefly_json/1736700000.5__graphql_op=x.json"));
        assert_eq!(
            fs::read_to_string(saved[0].1).unwrap(),
            "{\n  \"data\": {\n    \"id\": 1\n  }\n}"
        );
    }

    #[test]
    fn png_is_saved_raw() {
        let dir = tempfile::tempdir().unwrap();
        let hook = hook_in(dir.path(), &CaptureConfig::default());
        let report = hook.on_response(&event("cdn.adobe.io", "/i/1", "image/png", b"\x89PNG"));
        let (kind, path) = report.saved().next().unwrap();
        assert_eq!(kind, CaptureKind::Png);
        assert_eq!(fs::read(path).unwrap(), b"\x89PNG");
    }

    #[test]
    fn other_hosts_and_content_types_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let hook = hook_in(dir.path(), &CaptureConfig::default());

        let report = hook.on_response(&event("example.com", "/a", "image/png", b"x"));
        assert_eq!(report.ignored(), Some(&IgnoreReason::HostNotMatched));

        let report = hook.on_response(&event("api.adobe.io", "/a", "text/html", b"x"));
        assert_eq!(report.ignored(), Some(&IgnoreReason::UnhandledContentType));
        assert_eq!(report.saved().count(), 0);
    }

    #[test]
    fn extraction_failure_is_recorded_and_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let hook = hook_in(dir.path(), &CaptureConfig::default());
        let bad = event(
            "api.adobe.io",
            "/graphql",
            "multipart/mixed; boundary=\"graphql\"",
            b"--graphql\r\ncontent-type: application/json\r\n--graphql--",
        );
        let report = hook.on_response(&bad);
        let (kind, error) = report.failures().next().unwrap();
        assert_eq!(kind, CaptureKind::GraphqlJson);
        assert_eq!(
            error.downcast_ref::<ExtractError>(),
            Some(&ExtractError::NotFound)
        );

        let good = event("api.adobe.io", "/i", "image/png", b"png");
        assert_eq!(hook.on_response(&good).saved().count(), 1);
    }

    #[test]
    fn oversized_response_dumps_headers_for_any_host() {
        let dir = tempfile::tempdir().unwrap();
        let config = CaptureConfig {
            large_response_threshold: 4,
            ..Default::default()
        };
        let hook = hook_in(dir.path(), &config);

        let report = hook.on_response(&event("example.com", "/big", "video/mp4", b"12345"));
        let saved: Vec<_> = report.saved().collect();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, CaptureKind::Headers);
        assert!(saved[0].1.ends_with("firefly_headers/1736700000.5__big_headers.txt"));
        let dump = fs::read_to_string(saved[0].1).unwrap();
        assert!(dump.starts_with("URL: https://example.com/big\nMethod: POST\nResponse Body Length: 5\n"));
        assert_eq!(report.ignored(), Some(&IgnoreReason::HostNotMatched));

        let report = hook.on_response(&event("example.com", "/small", "video/mp4", b"1234"));
        assert_eq!(report.saved().count(), 0);
    }

    #[test]
    fn summary_counts_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let hook = hook_in(dir.path(), &CaptureConfig::default());
        let mut summary = ReplaySummary::default();
        summary.record(&hook.on_response(&event("a.adobe.io", "/p", "image/png", b"x")));
        summary.record(&hook.on_response(&event("example.com", "/p", "image/png", b"x")));
        summary.record(&hook.on_response(&event(
            "a.adobe.io",
            "/g",
            "application/graphql-response+json",
            b"not json",
        )));
        assert_eq!(
            summary,
            ReplaySummary {
                events: 3,
                png: 1,
                json: 0,
                headers: 0,
                ignored: 1,
                failed: 1,
            }
        );
    }
}
