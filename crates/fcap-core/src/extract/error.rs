//! Extraction error type.

/// The single failure kind of a [`super::JsonExtractor`]: every segment was
/// skipped or rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("no JSON content found in GraphQL response")]
    NotFound,
}
