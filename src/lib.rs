pub mod config;
pub mod core;
pub mod session;
pub mod stats;
pub mod terms;

pub use crate::core::display::{full_romaji, project, Projection};
pub use crate::core::matcher::{process_key, resolve_pending, KeyResult, TypingState};
pub use crate::core::segmenter::{segment, Segment};
