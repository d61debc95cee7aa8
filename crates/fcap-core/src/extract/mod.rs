//! JSON payload extraction from GraphQL multipart response bodies.
//!
//! The default strategy is a best-effort text heuristic matching the response
//! shapes seen in real traffic:
//! 1. plain JSON with no boundary at all,
//! 2. JSON followed by a `--graphql--` close marker,
//! 3. `--graphql` parts carrying headers, a blank line, then JSON.
//!
//! A stricter multipart reader is available behind the same [`JsonExtractor`]
//! trait; it is opt-in and never used implicitly.

mod error;
mod heuristic;
mod strict;

use serde::{Deserialize, Serialize};

pub use error::ExtractError;
pub use heuristic::HeuristicExtractor;
pub use strict::StrictMultipartExtractor;

/// Boundary token that introduces each multipart segment.
pub const BOUNDARY: &str = "--graphql";

/// Number of characters after the first `:` that the header heuristic scans
/// for a newline. Tunable; see [`HeuristicExtractor::header_lookahead`].
pub const DEFAULT_HEADER_LOOKAHEAD: usize = 50;

/// Locates the JSON document inside a response body.
///
/// Implementations are pure: the returned slice borrows from `body` and the
/// same input always yields the same output.
pub trait JsonExtractor: Send + Sync {
    fn extract<'a>(&self, body: &'a str) -> Result<&'a str, ExtractError>;
}

/// Extracts the JSON payload using the default heuristic.
pub fn extract_json(body: &str) -> Result<&str, ExtractError> {
    HeuristicExtractor::default().extract(body)
}

/// Selectable extraction strategy (config key `strategy`, CLI `--strict`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractStrategy {
    #[default]
    Heuristic,
    Strict,
}

impl ExtractStrategy {
    /// Builds the extractor for this strategy. `header_lookahead` only
    /// affects the heuristic.
    pub fn extractor(self, header_lookahead: usize) -> Box<dyn JsonExtractor> {
        match self {
            ExtractStrategy::Heuristic => Box::new(HeuristicExtractor { header_lookahead }),
            ExtractStrategy::Strict => Box::new(StrictMultipartExtractor),
        }
    }
}
