//! Selection rules: which events are captured and how.

/// Kind of artifact written for a captured event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    /// Raw PNG bytes.
    Png,
    /// JSON extracted from a GraphQL response, pretty-printed.
    GraphqlJson,
    /// Text dump of request/response headers for an oversized response.
    Headers,
}

impl CaptureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CaptureKind::Png => "png",
            CaptureKind::GraphqlJson => "json",
            CaptureKind::Headers => "headers",
        }
    }
}

impl std::fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Only hosts containing `domain` are considered for body capture.
pub fn host_matches(host: &str, domain: &str) -> bool {
    host.contains(domain)
}

/// Maps a response content type to the body artifact to write, if any.
/// PNG takes precedence over GraphQL.
pub fn classify(content_type: &str) -> Option<CaptureKind> {
    if content_type.contains("image/png") {
        Some(CaptureKind::Png)
    } else if content_type.contains("graphql") {
        Some(CaptureKind::GraphqlJson)
    } else {
        None
    }
}

/// Responses strictly larger than `threshold` bytes get a header dump.
pub fn is_oversized(body_len: usize, threshold: u64) -> bool {
    body_len as u64 > threshold
}
