//! Song, section, line and chord types.
//!
//! These are the documents stored under `data/songs/`, so field names follow
//! the stored JSON (camelCase).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{lyrics::LINE_JOINER, song as defaults};
use crate::error::{Error, Result};
use crate::lyrics::segment::{is_ignored_space, is_segment_break};
use crate::types::SongId;

/// A chord anchored above one character of a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    /// Char index into the owning line's lyrics.
    pub position: usize,
    /// Chord name as typed, e.g. `Am` or `Gsus4`.
    pub chord: String,
}

impl Chord {
    /// Create a chord at `position`.
    pub fn new(position: usize, chord: impl Into<String>) -> Self {
        Self { position, chord: chord.into() }
    }
}

/// One lyric line with its chords.
///
/// Chords are kept sorted by position with at most one chord per position,
/// including lines read from stored JSON.
/// A line with no lyrics and no chords is a blank (instrumental) line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StoredLine")]
pub struct Line {
    /// Clean lyric text.
    pub lyrics: String,
    /// Chords sorted ascending by position.
    #[serde(default)]
    pub chords: Vec<Chord>,
}

/// Line as written in a document, before chords are normalized.
#[derive(Deserialize)]
struct StoredLine {
    lyrics: String,
    #[serde(default)]
    chords: Vec<Chord>,
}

impl From<StoredLine> for Line {
    fn from(stored: StoredLine) -> Self {
        Self::new(stored.lyrics, stored.chords)
    }
}

/// Check that `name` survives a trip through marker text.
///
/// Names must be non-empty and must not contain `]`, whitespace or line
/// breaking punctuation.
pub fn check_chord_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidChord("chord name is empty".into()));
    }
    if let Some(bad) = name
        .chars()
        .find(|&c| c == ']' || is_ignored_space(c) || is_segment_break(c))
    {
        return Err(Error::InvalidChord(format!("{name:?} contains {bad:?}")));
    }
    Ok(())
}

impl Line {
    /// Build a line, sorting chords and resolving shared positions
    /// last-write-wins.
    pub fn new(lyrics: impl Into<String>, chords: impl IntoIterator<Item = Chord>) -> Self {
        let mut line = Self { lyrics: lyrics.into(), chords: Vec::new() };
        for chord in chords {
            line.place(chord);
        }
        line
    }

    /// An empty line, used for instrumental breaks.
    pub const fn blank() -> Self {
        Self { lyrics: String::new(), chords: Vec::new() }
    }

    /// Whether the line has no lyrics to show.
    pub fn is_blank(&self) -> bool {
        self.lyrics.is_empty()
    }

    /// Length of the lyrics in chars.
    pub fn char_len(&self) -> usize {
        self.lyrics.chars().count()
    }

    /// The chord anchored at `position`, if any.
    pub fn chord_at(&self, position: usize) -> Option<&Chord> {
        self.chords
            .binary_search_by_key(&position, |c| c.position)
            .ok()
            .and_then(|i| self.chords.get(i))
    }

    /// Put `chord` above the char at `position`, replacing any chord there.
    ///
    /// Returns the chord's index in [`Line::chords`].
    pub fn set_chord_at(&mut self, position: usize, chord: impl Into<String>) -> Result<usize> {
        let chord = chord.into();
        check_chord_name(&chord)?;
        let len = self.char_len();
        if position >= len {
            return Err(Error::out_of_range("position", position, len));
        }
        Ok(self.place(Chord { position, chord }))
    }

    /// Remove the chord at `index` in [`Line::chords`].
    pub fn remove_chord_at(&mut self, index: usize) -> Result<Chord> {
        if index >= self.chords.len() {
            return Err(Error::out_of_range("chord", index, self.chords.len()));
        }
        Ok(self.chords.remove(index))
    }

    /// Re-emit the line in `[Chord]X` marker form.
    ///
    /// Parsing the result gives back this line. Chords past the end of the
    /// lyrics have no anchor and are dropped.
    pub fn to_marked_text(&self) -> String {
        let mut out = String::with_capacity(self.lyrics.len() + self.chords.len() * 4);
        for (i, ch) in self.lyrics.chars().enumerate() {
            if let Some(chord) = self.chord_at(i) {
                out.push('[');
                out.push_str(&chord.chord);
                out.push(']');
            }
            out.push(ch);
        }
        out
    }

    fn place(&mut self, chord: Chord) -> usize {
        match self.chords.binary_search_by_key(&chord.position, |c| c.position) {
            Ok(i) => {
                self.chords[i] = chord;
                i
            }
            Err(i) => {
                self.chords.insert(i, chord);
                i
            }
        }
    }
}

/// A labelled group of lines (verse, chorus, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section kind, stored as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Lines in display order.
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Section {
    /// Create an empty section.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self { kind: kind.into(), name: name.into(), lines: Vec::new() }
    }

    /// Insert a blank line before `index`; `index == lines.len()` appends.
    pub fn insert_blank_line(&mut self, index: usize) -> Result<()> {
        if index > self.lines.len() {
            return Err(Error::out_of_range("line", index, self.lines.len()));
        }
        self.lines.insert(index, Line::blank());
        Ok(())
    }

    /// Remove and return the line at `index`.
    pub fn delete_line(&mut self, index: usize) -> Result<Line> {
        if index >= self.lines.len() {
            return Err(Error::out_of_range("line", index, self.lines.len()));
        }
        Ok(self.lines.remove(index))
    }

    /// Mutable access to the line at `index`.
    pub fn line_mut(&mut self, index: usize) -> Result<&mut Line> {
        let len = self.lines.len();
        self.lines.get_mut(index).ok_or_else(|| Error::out_of_range("line", index, len))
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new(defaults::DEFAULT_SECTION_TYPE, defaults::DEFAULT_SECTION_NAME)
    }
}

/// A complete chord sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Document id.
    #[serde(default)]
    pub id: SongId,
    /// Song title.
    pub title: String,
    /// Musical key, free text.
    #[serde(default)]
    pub key: String,
    /// Capo fret, 0 for none.
    #[serde(default)]
    pub capo: u8,
    /// Time signature such as `4/4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_signature: Option<String>,
    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the song was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When the song was last saved.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Song {
    /// A new, unsaved song with one empty verse section.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SongId::default(),
            title: title.into(),
            key: defaults::DEFAULT_KEY.to_string(),
            capo: 0,
            time_signature: None,
            sections: vec![Section::default()],
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Lightweight entry for the song list index.
    pub fn metadata(&self) -> SongMetadata {
        SongMetadata {
            id: self.id.clone(),
            title: self.title.clone(),
            key: self.key.clone(),
            capo: self.capo,
            tags: self.tags.clone(),
            updated_at: self.updated_at,
        }
    }

    /// Check the song can be saved.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidSong("title is empty".into()));
        }
        if self.capo > defaults::MAX_CAPO {
            return Err(Error::InvalidSong(format!(
                "capo {} is above {}",
                self.capo,
                defaults::MAX_CAPO
            )));
        }
        Ok(())
    }

    /// Editor input text for the first section.
    ///
    /// Non-blank lines in marker form, joined with a full-width comma, so
    /// compiling the result reproduces the section minus its blank lines.
    pub fn lyrics_input(&self) -> String {
        self.sections
            .first()
            .map(|section| {
                section
                    .lines
                    .iter()
                    .filter(|l| !l.is_blank())
                    .map(Line::to_marked_text)
                    .collect::<Vec<_>>()
                    .join(LINE_JOINER)
            })
            .unwrap_or_default()
    }

    /// Replace the first section's lines with compiled `text`.
    pub fn set_lyrics(&mut self, text: &str) {
        let lines = super::compile_lyrics(text);
        if let Some(section) = self.sections.first_mut() {
            section.lines = lines;
        } else {
            self.sections.push(Section { lines, ..Section::default() });
        }
    }

    /// Mutable access to the section at `index`.
    pub fn section_mut(&mut self, index: usize) -> Result<&mut Section> {
        let len = self.sections.len();
        self.sections.get_mut(index).ok_or_else(|| Error::out_of_range("section", index, len))
    }
}

/// Song list index entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMetadata {
    /// Song id.
    pub id: SongId,
    /// Song title.
    pub title: String,
    /// Musical key.
    #[serde(default)]
    pub key: String,
    /// Capo fret.
    #[serde(default)]
    pub capo: u8,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the song was last saved.
    pub updated_at: DateTime<Utc>,
}

/// The `data/songs.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongsList {
    /// All listed songs.
    #[serde(default)]
    pub songs: Vec<SongMetadata>,
}
