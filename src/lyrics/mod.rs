//! Lyric processing.
//!
//! Turns raw lyric input into structured lines and lays lines back out with
//! chords aligned above their anchor characters.

/// Alignment of chords over lyric characters
pub mod render;
/// Punctuation-based line splitting
pub mod segment;
/// Inline `[Chord]X` marker extraction
pub mod markers;

pub use markers::{parse_markers, ParsedLine};
pub use render::{align_rows, render_line, AlignedRows, RenderCell};
pub use segment::segment;
