//! `chordsbox` - chord sheet compiler and viewer.
//!
//! Compiles punctuation-delimited lyric text with inline `[Chord]` markers
//! into position-indexed lines, renders chords aligned over their anchor
//! characters, and keeps songs as JSON documents in a GitHub repository.

pub mod app;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod lyrics;
pub mod settings;
pub mod sheet;
pub mod song;
pub mod store;
pub mod types;
pub mod ui;
