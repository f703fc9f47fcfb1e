//! Chord sheet model and editor workflow.
//!
//! Raw editor text is compiled into [`Line`]s by segmenting it on
//! punctuation and extracting chord markers from each segment. Further
//! changes go through [`edit::apply`], which returns a new [`Song`].

use std::sync::LazyLock;

use regex::Regex;

use crate::lyrics::{parse_markers, segment};
use crate::types::SongId;

/// Editing commands applied to song snapshots
pub mod edit;
/// Song, section, line and chord types
pub mod model;

pub use edit::{apply, EditCommand};
pub use model::{Chord, Line, Section, Song, SongMetadata, SongsList};

#[allow(clippy::expect_used)]
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("valid regex: RE_WHITESPACE")
});

#[allow(clippy::expect_used)]
static RE_NON_SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_-]").expect("valid regex: RE_NON_SLUG")
});

/// Compile raw editor input into lines.
///
/// Each punctuation-delimited segment becomes one line; its chords are
/// sorted and a second chord on the same character replaces the first.
pub fn compile_lyrics(text: &str) -> Vec<Line> {
    segment(text)
        .iter()
        .map(|seg| {
            let parsed = parse_markers(seg);
            Line::new(parsed.lyrics, parsed.chords)
        })
        .collect()
}

/// Derive a document id from a song title.
///
/// Lowercases, turns whitespace runs into `-` and drops anything outside
/// `[A-Za-z0-9_-]`. Titles with nothing left (all CJK, say) get a random id.
pub fn slugify(title: &str) -> SongId {
    let lower = title.trim().to_lowercase();
    let dashed = RE_WHITESPACE.replace_all(&lower, "-");
    let slug = RE_NON_SLUG.replace_all(&dashed, "");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        SongId::new(uuid::Uuid::new_v4().to_string())
    } else {
        SongId::new(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_segments_into_lines() {
        let lines = compile_lyrics("[C]春眠不觉晓，处处闻[G]啼鸟。");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].lyrics, "春眠不觉晓");
        assert_eq!(lines[0].chords, vec![Chord::new(0, "C")]);
        assert_eq!(lines[1].lyrics, "处处闻啼鸟");
        assert_eq!(lines[1].chords, vec![Chord::new(3, "G")]);
    }

    #[test]
    fn whitespace_inside_markers_is_removed_first() {
        let lines = compile_lyrics("[G sus4]la");
        assert_eq!(lines[0].chords, vec![Chord::new(0, "Gsus4")]);
    }

    #[test]
    fn empty_input_compiles_to_nothing() {
        assert!(compile_lyrics("  \n ").is_empty());
    }

    #[test]
    fn slug_from_latin_title() {
        assert_eq!(slugify("Amazing  Grace!").as_str(), "amazing-grace");
        assert_eq!(slugify(" It's Well_2 ").as_str(), "its-well_2");
    }

    #[test]
    fn slug_falls_back_to_uuid() {
        let id = slugify("晴天");
        assert_eq!(id.as_str().len(), 36);
        assert_ne!(slugify("晴天"), id);
    }

    #[test]
    fn slug_keeps_ascii_part_of_mixed_title() {
        assert_eq!(slugify("晴天 Sunny").as_str(), "sunny");
    }
}
