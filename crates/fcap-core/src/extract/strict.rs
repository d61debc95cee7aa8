//! Line-oriented multipart reader for `--graphql` bodies.

use serde_json::Value;

use super::{ExtractError, JsonExtractor, BOUNDARY};

const CLOSE_DELIMITER: &str = "--graphql--";

/// Multipart reader that only honours delimiters on their own line.
///
/// Each part must carry a header block terminated by a blank line; the first
/// part whose body parses as a JSON object is returned. Text before the first
/// delimiter line (the preamble) is only considered when the body has no
/// parts at all, which covers plain JSON and JSON followed by a bare close
/// delimiter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictMultipartExtractor;

impl JsonExtractor for StrictMultipartExtractor {
    fn extract<'a>(&self, body: &'a str) -> Result<&'a str, ExtractError> {
        let (preamble, parts) = split_parts(body);

        if parts.is_empty() {
            let candidate = preamble.trim();
            return if is_json_object(candidate) {
                Ok(candidate)
            } else {
                Err(ExtractError::NotFound)
            };
        }

        parts
            .into_iter()
            .filter_map(split_header_block)
            .map(str::trim)
            .find(|content| is_json_object(content))
            .ok_or(ExtractError::NotFound)
    }
}

/// Returns the preamble and the parts between delimiter lines. Scanning stops
/// at the close delimiter; an unterminated last part runs to the end of input.
fn split_parts(body: &str) -> (&str, Vec<&str>) {
    let mut preamble = body;
    let mut parts = Vec::new();
    let mut open: Option<usize> = None;
    let mut seen_delimiter = false;
    let mut offset = 0;

    for line in body.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let marker = line.trim_end();
        let is_close = marker == CLOSE_DELIMITER;
        if marker != BOUNDARY && !is_close {
            continue;
        }

        if !seen_delimiter {
            preamble = &body[..start];
            seen_delimiter = true;
        }
        if let Some(from) = open.take() {
            parts.push(&body[from..start]);
        }
        if is_close {
            return (preamble, parts);
        }
        open = Some(offset);
    }

    if let Some(from) = open {
        parts.push(&body[from..]);
    }
    (preamble, parts)
}

/// Content after the header block, i.e. after the first empty line.
fn split_header_block(part: &str) -> Option<&str> {
    let mut offset = 0;
    for line in part.split_inclusive('\n') {
        offset += line.len();
        if line.trim_end_matches(|c: char| c == '\r' || c == '\n').is_empty() {
            return Some(&part[offset..]);
        }
    }
    None
}

fn is_json_object(candidate: &str) -> bool {
    matches!(serde_json::from_str::<Value>(candidate), Ok(Value::Object(_)))
}
