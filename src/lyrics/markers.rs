//! Extraction of inline `[Chord]X` markers.
//!
//! A marker is a bracketed chord name immediately followed by the single
//! character it is anchored to. Parsing is purely syntactic: whatever sits
//! between the brackets becomes the chord name, and anything that does not
//! form a complete marker is kept as literal text.

use std::sync::LazyLock;

use regex::Regex;

use crate::song::Chord;

/// Regex matching `[name]X`; the anchor is any single char except newline.
#[allow(clippy::expect_used)]
static RE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\](.)").expect("valid regex: RE_MARKER")
});

/// Clean lyric text plus the chords pulled out of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    /// Text with every marker removed.
    pub lyrics: String,
    /// Chords in scan order, positioned in chars of `lyrics`.
    pub chords: Vec<Chord>,
}

/// Strip chord markers from `text`, recording where each chord belongs.
///
/// The clean text is assembled from match spans rather than by replacing
/// matched substrings, so repeated text elsewhere in the line is never
/// touched. Positions count chars of the clean text. Chords come back in
/// scan order and are not deduplicated.
///
/// ```
/// use chordsbox::lyrics::parse_markers;
///
/// let parsed = parse_markers("[Am]你[G]好");
/// assert_eq!(parsed.lyrics, "你好");
/// assert_eq!(parsed.chords[1].position, 1);
/// ```
pub fn parse_markers(text: &str) -> ParsedLine {
    let mut lyrics = String::with_capacity(text.len());
    let mut chords = Vec::new();
    // Byte offset into `text` copied so far, and chars emitted so far.
    let mut copied = 0;
    let mut clean_len = 0;

    for caps in RE_MARKER.captures_iter(text) {
        let (Some(whole), Some(name), Some(anchor)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        let between = &text[copied..whole.start()];
        lyrics.push_str(between);
        clean_len += between.chars().count();

        chords.push(Chord::new(clean_len, name.as_str()));
        lyrics.push_str(anchor.as_str());
        clean_len += 1;

        copied = whole.end();
    }

    lyrics.push_str(&text[copied..]);

    ParsedLine { lyrics, chords }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(position: usize, name: &str) -> Chord {
        Chord::new(position, name)
    }

    #[test]
    fn extracts_adjacent_markers() {
        let parsed = parse_markers("[Am]你[G]好");
        assert_eq!(parsed.lyrics, "你好");
        assert_eq!(parsed.chords, vec![chord(0, "Am"), chord(1, "G")]);
    }

    #[test]
    fn text_without_markers_is_unchanged() {
        let parsed = parse_markers("no markers here");
        assert_eq!(parsed.lyrics, "no markers here");
        assert!(parsed.chords.is_empty());
    }

    #[test]
    fn positions_skip_removed_marker_text() {
        let parsed = parse_markers("春[C]眠不[Fmaj7]觉晓[G7]处");
        assert_eq!(parsed.lyrics, "春眠不觉晓处");
        assert_eq!(
            parsed.chords,
            vec![chord(1, "C"), chord(3, "Fmaj7"), chord(5, "G7")]
        );
    }

    #[test]
    fn chord_names_are_taken_verbatim() {
        let parsed = parse_markers("[C/E sus?]la");
        assert_eq!(parsed.lyrics, "la");
        assert_eq!(parsed.chords, vec![chord(0, "C/E sus?")]);
    }

    #[test]
    fn malformed_markers_pass_through() {
        assert_eq!(parse_markers("[]x").lyrics, "[]x");
        assert_eq!(parse_markers("open [Am bracket").lyrics, "open [Am bracket");
        assert_eq!(parse_markers("tail[Am]").lyrics, "tail[Am]");
        assert!(parse_markers("tail[Am]").chords.is_empty());
    }

    #[test]
    fn newline_is_not_an_anchor() {
        let parsed = parse_markers("[C]\nla");
        assert_eq!(parsed.lyrics, "[C]\nla");
        assert!(parsed.chords.is_empty());
    }

    #[test]
    fn bracket_can_be_an_anchor() {
        // `[A]` anchors the following `[`, leaving `B]c` unmatched.
        let parsed = parse_markers("[A][B]c");
        assert_eq!(parsed.lyrics, "[B]c");
        assert_eq!(parsed.chords, vec![chord(0, "A")]);
    }

    #[test]
    fn repeated_text_is_not_corrupted() {
        let parsed = parse_markers("你[C]你你[C]你");
        assert_eq!(parsed.lyrics, "你你你你");
        assert_eq!(parsed.chords, vec![chord(1, "C"), chord(3, "C")]);
    }

    #[test]
    fn positions_count_chars_not_bytes() {
        let parsed = parse_markers("😀[D]é[E]x");
        assert_eq!(parsed.lyrics, "😀éx");
        assert_eq!(parsed.chords, vec![chord(1, "D"), chord(2, "E")]);
    }

    #[test]
    fn every_chord_points_inside_the_clean_text() {
        for input in ["[Am]你[G]好", "a[B]c[D]e", "x[Y]", "[Q]😀[R]😀"] {
            let parsed = parse_markers(input);
            let len = parsed.lyrics.chars().count();
            assert!(parsed.chords.iter().all(|c| c.position < len), "{input}");
        }
    }
}
