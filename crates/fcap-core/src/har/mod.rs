//! HAR (HTTP Archive) event source: replay a browser or proxy capture
//! through the capture hook offline.

mod events;
mod parse;

pub use events::load_events;
