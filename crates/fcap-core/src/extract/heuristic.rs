//! Best-effort segment scanner for `--graphql` multipart bodies.

use super::{ExtractError, JsonExtractor, BOUNDARY, DEFAULT_HEADER_LOOKAHEAD};

/// Splits on the boundary token and returns the first segment that looks
/// like a JSON object.
///
/// Known limitation: a segment is treated as a bare `key: value` header when
/// no newline follows its first `:` within `header_lookahead` characters. A
/// single-line JSON object without a header block therefore gets skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicExtractor {
    pub header_lookahead: usize,
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self {
            header_lookahead: DEFAULT_HEADER_LOOKAHEAD,
        }
    }
}

impl JsonExtractor for HeuristicExtractor {
    fn extract<'a>(&self, body: &'a str) -> Result<&'a str, ExtractError> {
        if !body.contains(BOUNDARY) {
            return Ok(body.trim());
        }

        for segment in body.split(BOUNDARY) {
            let segment = segment.trim().trim_matches('-');
            if segment.is_empty() {
                continue;
            }
            if looks_like_header(segment, self.header_lookahead) {
                continue;
            }
            match payload_after_headers(segment) {
                Some(payload) => {
                    if payload.starts_with('{') {
                        return Ok(payload);
                    }
                }
                None => {
                    if segment.starts_with('{') {
                        return Ok(segment);
                    }
                }
            }
        }

        Err(ExtractError::NotFound)
    }
}

/// True if no newline follows the first `:` within `lookahead` characters.
fn looks_like_header(segment: &str, lookahead: usize) -> bool {
    match segment.split_once(':') {
        Some((_, rest)) => !rest.chars().take(lookahead).any(|c| c == '\n'),
        None => false,
    }
}

/// Text after the first blank line, trimmed. CRLF separators take
/// precedence over bare LF when both are present.
fn payload_after_headers(segment: &str) -> Option<&str> {
    segment
        .split_once("\r\n\r\n")
        .or_else(|| segment.split_once("\n\n"))
        .map(|(_, payload)| payload.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(body: &str) -> Result<&str, ExtractError> {
        HeuristicExtractor::default().extract(body)
    }

    #[test]
    fn no_boundary_returns_trimmed_body() {
        assert_eq!(extract("  {\"a\":1}\n").unwrap(), "{\"a\":1}");
        assert_eq!(extract("not json at all").unwrap(), "not json at all");
        assert_eq!(extract("").unwrap(), "");
    }

    #[test]
    fn headers_then_json_crlf() {
        let body = "--graphql\r\ncontent-type: application/json\r\n\r\n{\"a\":1}\r\n--graphql--";
        assert_eq!(extract(body).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn lf_and_crlf_separators_match() {
        let crlf = "--graphql\r\ncontent-type: application/json\r\n\r\n{\"data\":{\"id\":7}}\r\n--graphql--\r\n";
        let lf = "--graphql\ncontent-type: application/json\n\n{\"data\":{\"id\":7}}\n--graphql--\n";
        assert_eq!(extract(crlf).unwrap(), extract(lf).unwrap());
        assert_eq!(extract(lf).unwrap(), "{\"data\":{\"id\":7}}");
    }

    #[test]
    fn json_followed_by_close_marker() {
        let body = "{\n  \"data\": {\"ok\": true}\n}\n--graphql--\n";
        assert_eq!(extract(body).unwrap(), "{\n  \"data\": {\"ok\": true}\n}");
    }

    #[test]
    fn header_only_body_is_not_found() {
        let body = "--graphql\r\ncontent-type: application/json\r\n--graphql--";
        assert_eq!(extract(body), Err(ExtractError::NotFound));
    }

    #[test]
    fn only_markers_is_not_found() {
        assert_eq!(extract("--graphql\n--graphql--\n"), Err(ExtractError::NotFound));
    }

    #[test]
    fn first_candidate_wins() {
        let body = "--graphql\n{\n  \"first\": 1\n}\n--graphql\n{\n  \"second\": 2\n}\n--graphql--";
        assert_eq!(extract(body).unwrap(), "{\n  \"first\": 1\n}");
    }

    #[test]
    fn single_line_object_mistaken_for_header() {
        // The object fits inside the lookahead window with no newline after
        // its first colon, so the segment is skipped.
        let body = "--graphql\n{\"a\":1}\n--graphql--";
        assert_eq!(extract(body), Err(ExtractError::NotFound));
    }

    #[test]
    fn lookahead_window_is_tunable() {
        let body = "--graphql\n{\"key\": \"0123456789\",\n\"b\": 2}\n--graphql--";
        let narrow = HeuristicExtractor { header_lookahead: 8 };
        assert_eq!(narrow.extract(body), Err(ExtractError::NotFound));
        assert_eq!(extract(body).unwrap(), "{\"key\": \"0123456789\",\n\"b\": 2}");
    }

    #[test]
    fn non_json_payload_after_headers_is_rejected() {
        let body = "--graphql\ncontent-type: text/plain\n\nhello\n--graphql\ncontent-type: application/json\n\n{\"a\":1}\n--graphql--";
        assert_eq!(extract(body).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn blank_line_segment_never_falls_back_to_whole_segment() {
        // The segment itself starts with `{`, but once it holds a blank line
        // only the text after that line is a candidate.
        let body = "--graphql\n{\"a\":\n\n1}\n--graphql--";
        assert_eq!(extract(body), Err(ExtractError::NotFound));

        let crlf = "--graphql\r\n{\"a\":\r\n\r\n1}\r\n--graphql--";
        assert_eq!(extract(crlf), Err(ExtractError::NotFound));
    }

    #[test]
    fn extraction_is_repeatable() {
        let body = "--graphql\r\ncontent-type: application/json\r\n\r\n{\"a\":1}\r\n--graphql--";
        assert_eq!(extract(body), extract(body));
    }
}
