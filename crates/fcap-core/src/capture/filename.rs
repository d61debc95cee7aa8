//! Deterministic output filenames from request start time and path.

use sha2::{Digest, Sha256};

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Hex chars of the path digest appended to truncated names.
const DIGEST_LEN: usize = 12;

pub const PNG_SUFFIX: &str = ".png";
pub const JSON_SUFFIX: &str = ".json";
pub const HEADERS_SUFFIX: &str = "_headers.txt";

/// Replaces path separators and the query-string marker with `_`.
pub fn sanitize_request_path(path: &str) -> String {
    path.replace(['/', '?'], "_")
}

/// Renders a timestamp like `str(float)` does for epoch values: whole
/// seconds keep a trailing `.0`.
pub fn format_timestamp(timestamp_start: f64) -> String {
    let rendered = timestamp_start.to_string();
    if timestamp_start.is_finite() && !rendered.contains('.') {
        format!("{rendered}.0")
    } else {
        rendered
    }
}

/// Builds `{timestamp}_{sanitized_path}{suffix}`.
///
/// Names longer than NAME_MAX bytes are cut on a char boundary and get `~`
/// plus a digest of the full stem, so distinct long paths stay distinct. The
/// suffix is always kept.
pub fn capture_filename(timestamp_start: f64, path: &str, suffix: &str) -> String {
    let stem = format!(
        "{}_{}",
        format_timestamp(timestamp_start),
        sanitize_request_path(path)
    );
    if stem.len() + suffix.len() <= NAME_MAX {
        return format!("{stem}{suffix}");
    }

    let digest = hex::encode(Sha256::digest(stem.as_bytes()));
    let tag = &digest[..DIGEST_LEN];
    let budget = NAME_MAX.saturating_sub(suffix.len() + 1 + DIGEST_LEN);

    let mut take = budget.min(stem.len());
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    format!("{}~{}{}", &stem[..take], tag, suffix)
}
