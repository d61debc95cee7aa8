//! Capture event delivered by the host proxy (or replayed from a HAR file).

/// Ordered header list with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Value of the first header whose name matches `name` ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

/// One completed request/response exchange.
#[derive(Debug, Clone, Default)]
pub struct CaptureEvent {
    pub url: String,
    /// Host as shown to users (no port), used by the domain filter.
    pub host: String,
    /// Request path including the query string.
    pub path: String,
    pub method: String,
    /// Request start time in seconds since the Unix epoch.
    pub timestamp_start: f64,
    pub status: u16,
    pub request_headers: Headers,
    pub response_headers: Headers,
    pub body: Vec<u8>,
}

impl CaptureEvent {
    /// Response `Content-Type`, or an empty string when absent.
    pub fn content_type(&self) -> &str {
        self.response_headers.get("content-type").unwrap_or("")
    }

    /// Response body decoded as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
