//! Capture glue around the extractor: events, selection rules, filenames,
//! the file-system sink and the response hook.

mod event;
mod filename;
mod hook;
mod rules;
mod sink;

pub use event::{CaptureEvent, Headers};
pub use filename::{capture_filename, format_timestamp, sanitize_request_path};
pub use hook::{CaptureHook, CaptureOutcome, CaptureReport, IgnoreReason, ReplaySummary};
pub use rules::{classify, host_matches, is_oversized, CaptureKind};
pub use sink::{CaptureSink, OutputDirs};
