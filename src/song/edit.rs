//! Editing commands for a working copy of a song.
//!
//! Every command is applied to a snapshot and yields a new snapshot, leaving
//! the input untouched. There is no history; callers keep whatever snapshot
//! they want to return to.

use crate::error::Result;
use crate::song::Song;

/// A single edit to a song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Put a chord above a character, replacing any chord already there.
    SetChord {
        /// Section index.
        section: usize,
        /// Line index within the section.
        line: usize,
        /// Char position within the line.
        position: usize,
        /// Chord name.
        chord: String,
    },
    /// Remove a chord by its index in the line's chord list.
    RemoveChord {
        /// Section index.
        section: usize,
        /// Line index within the section.
        line: usize,
        /// Index into the line's chords.
        index: usize,
    },
    /// Insert a blank line before `index`.
    InsertBlankLine {
        /// Section index.
        section: usize,
        /// Line index; equal to the line count to append.
        index: usize,
    },
    /// Delete a line.
    DeleteLine {
        /// Section index.
        section: usize,
        /// Line index.
        index: usize,
    },
    /// Recompile the first section from editor text.
    ReplaceLyrics {
        /// Raw lyric input with optional chord markers.
        text: String,
    },
}

/// Apply `command` to `song`, returning the edited copy.
pub fn apply(song: &Song, command: &EditCommand) -> Result<Song> {
    let mut next = song.clone();

    match command {
        EditCommand::SetChord { section, line, position, chord } => {
            next.section_mut(*section)?
                .line_mut(*line)?
                .set_chord_at(*position, chord.as_str())?;
        }
        EditCommand::RemoveChord { section, line, index } => {
            next.section_mut(*section)?.line_mut(*line)?.remove_chord_at(*index)?;
        }
        EditCommand::InsertBlankLine { section, index } => {
            next.section_mut(*section)?.insert_blank_line(*index)?;
        }
        EditCommand::DeleteLine { section, index } => {
            next.section_mut(*section)?.delete_line(*index)?;
        }
        EditCommand::ReplaceLyrics { text } => next.set_lyrics(text),
    }

    tracing::debug!("Applied {command:?} to song {:?}", song.id.as_str());
    Ok(next)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::error::Error;
    use crate::song::Chord;

    fn song() -> Song {
        let mut song = Song::new("test");
        song.set_lyrics("[Am]你好，世界");
        song
    }

    #[test]
    fn set_chord_returns_new_snapshot() {
        let before = song();
        let after = apply(
            &before,
            &EditCommand::SetChord { section: 0, line: 1, position: 1, chord: "G".into() },
        )
        .unwrap();

        assert!(before.sections[0].lines[1].chords.is_empty());
        assert_eq!(after.sections[0].lines[1].chords, vec![Chord::new(1, "G")]);
    }

    #[test]
    fn set_then_remove_restores() {
        let before = song();
        let with = apply(
            &before,
            &EditCommand::SetChord { section: 0, line: 0, position: 1, chord: "C".into() },
        )
        .unwrap();
        let index = with.sections[0].lines[0]
            .chords
            .iter()
            .position(|c| c.position == 1)
            .unwrap();
        let without = apply(&with, &EditCommand::RemoveChord { section: 0, line: 0, index }).unwrap();
        assert_eq!(without, before);
    }

    #[test]
    fn blank_line_insert_and_delete() {
        let before = song();
        let with = apply(&before, &EditCommand::InsertBlankLine { section: 0, index: 1 }).unwrap();
        assert_eq!(with.sections[0].lines.len(), 3);
        assert!(with.sections[0].lines[1].is_blank());

        let without = apply(&with, &EditCommand::DeleteLine { section: 0, index: 1 }).unwrap();
        assert_eq!(without, before);
    }

    #[test]
    fn bad_indices_are_reported() {
        let s = song();
        let err = apply(&s, &EditCommand::DeleteLine { section: 3, index: 0 }).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { what: "section", .. }));

        let err = apply(&s, &EditCommand::RemoveChord { section: 0, line: 1, index: 0 }).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { what: "chord", .. }));

        let err = apply(
            &s,
            &EditCommand::SetChord { section: 0, line: 0, position: 9, chord: "C".into() },
        )
        .unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { what: "position", .. }));
    }

    #[test]
    fn replace_lyrics_recompiles_first_section() {
        let after = apply(&song(), &EditCommand::ReplaceLyrics { text: "一[D]二".into() }).unwrap();
        assert_eq!(after.sections[0].lines.len(), 1);
        assert_eq!(after.sections[0].lines[0].chords, vec![Chord::new(1, "D")]);
    }
}
