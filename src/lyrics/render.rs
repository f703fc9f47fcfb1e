//! Chord-over-lyric alignment.
//!
//! [`render_line`] produces one cell per lyric char, which a front end draws
//! as fixed-width units so labels stay over their anchors at any font size.
//! [`align_rows`] lays the same cells out as two text rows for terminals.

use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::song::Line;

/// One lyric character and the chord drawn above it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderCell<'a> {
    /// The lyric character.
    #[serde(rename = "char")]
    pub ch: char,
    /// Chord anchored to this character.
    pub chord_above: Option<&'a str>,
}

/// Render plan for a line: one cell per char of `line.lyrics`.
///
/// Chords positioned at or past the end of the lyrics are ignored. If two
/// chords share a position the later one wins.
pub fn render_line(line: &Line) -> Vec<RenderCell<'_>> {
    let mut above: Vec<Option<&str>> = vec![None; line.lyrics.chars().count()];
    for chord in &line.chords {
        if let Some(slot) = above.get_mut(chord.position) {
            *slot = Some(chord.chord.as_str());
        }
    }

    line.lyrics
        .chars()
        .zip(above)
        .map(|(ch, chord_above)| RenderCell { ch, chord_above })
        .collect()
}

/// A line laid out as a chord row above a lyric row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignedRows {
    /// Chord labels padded with spaces to their anchor columns.
    pub chords: String,
    /// The lyric text.
    pub lyrics: String,
}

impl AlignedRows {
    /// Whether the line carries any chords.
    pub fn has_chords(&self) -> bool {
        !self.chords.is_empty()
    }
}

/// Lay out a line for a monospace terminal.
///
/// Columns follow display width, so wide (CJK) characters take two cells.
/// A label that would touch the previous one is shifted right to keep a
/// one-column gap.
pub fn align_rows(line: &Line) -> AlignedRows {
    let mut rows = AlignedRows::default();
    let mut lyric_col = 0;
    let mut chord_col = 0;

    for cell in render_line(line) {
        if let Some(name) = cell.chord_above {
            let start = if rows.chords.is_empty() {
                lyric_col
            } else {
                lyric_col.max(chord_col + 1)
            };
            rows.chords.extend(std::iter::repeat(' ').take(start - chord_col));
            rows.chords.push_str(name);
            chord_col = start + name.width();
        }

        rows.lyrics.push(cell.ch);
        lyric_col += cell.ch.width().unwrap_or(0);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::Chord;

    fn line(lyrics: &str, chords: &[(usize, &str)]) -> Line {
        Line {
            lyrics: lyrics.to_string(),
            chords: chords.iter().map(|&(p, c)| Chord::new(p, c)).collect(),
        }
    }

    #[test]
    fn one_cell_per_char() {
        let l = line("你好", &[(0, "Am"), (1, "G")]);
        let cells = render_line(&l);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], RenderCell { ch: '你', chord_above: Some("Am") });
        assert_eq!(cells[1], RenderCell { ch: '好', chord_above: Some("G") });
    }

    #[test]
    fn chords_past_the_end_are_ignored() {
        let l = line("ab", &[(1, "C"), (2, "D"), (99, "E")]);
        let cells = render_line(&l);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].chord_above, None);
        assert_eq!(cells[1].chord_above, Some("C"));
    }

    #[test]
    fn blank_line_renders_nothing() {
        assert!(render_line(&Line::blank()).is_empty());
        assert_eq!(align_rows(&Line::blank()), AlignedRows::default());
    }

    #[test]
    fn cells_match_parsed_chords() {
        let parsed = crate::lyrics::parse_markers("[C]春眠[F]不觉[G]晓");
        let l = Line::new(parsed.lyrics, parsed.chords);
        let cells = render_line(&l);
        assert_eq!(cells.len(), l.lyrics.chars().count());
        for (i, cell) in cells.iter().enumerate() {
            let expected = l.chords.iter().find(|c| c.position == i).map(|c| c.chord.as_str());
            assert_eq!(cell.chord_above, expected);
        }
    }

    #[test]
    fn serializes_as_char_and_chord_above() {
        let l = line("a", &[(0, "C")]);
        let json = serde_json::to_string(&render_line(&l)).unwrap_or_default();
        assert_eq!(json, r#"[{"char":"a","chordAbove":"C"}]"#);
    }

    #[test]
    fn ascii_labels_sit_over_their_anchor() {
        let rows = align_rows(&line("hello world", &[(0, "C"), (6, "G")]));
        assert_eq!(rows.lyrics, "hello world");
        assert_eq!(rows.chords, "C     G");
    }

    #[test]
    fn wide_chars_take_two_columns() {
        let rows = align_rows(&line("春眠不觉晓", &[(0, "C"), (2, "F")]));
        assert_eq!(rows.chords, "C   F");
    }

    #[test]
    fn colliding_labels_keep_a_gap() {
        let rows = align_rows(&line("你好", &[(0, "Am"), (1, "G")]));
        assert_eq!(rows.chords, "Am G");
        assert_eq!(rows.lyrics, "你好");
    }

    #[test]
    fn line_without_chords_has_empty_chord_row() {
        let rows = align_rows(&line("plain", &[]));
        assert!(!rows.has_chords());
        assert_eq!(rows.lyrics, "plain");
    }
}
