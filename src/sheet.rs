//! Whole-song layouts for the viewer surfaces.
//!
//! [`plan_sheet`] is the structured plan a graphical front end draws from;
//! [`sheet_rows`] is the row-by-row text layout used by the terminal views.

use serde::Serialize;

use crate::display::{DeviceType, FontScale};
use crate::lyrics::{align_rows, render_line, RenderCell};
use crate::settings::ColorScheme;
use crate::song::Song;

/// Render plan for a whole song.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPlan<'a> {
    /// Song title.
    pub title: &'a str,
    /// Musical key.
    pub key: &'a str,
    /// Capo fret.
    pub capo: u8,
    /// Time signature, if set.
    pub time_signature: Option<&'a str>,
    /// Viewport class the size was chosen for.
    pub device: DeviceType,
    /// Effective font size in pixels.
    pub font_size: u8,
    /// User offset included in `font_size`.
    pub font_offset: i8,
    /// Colors to draw with.
    pub scheme: Option<&'a ColorScheme>,
    /// Sections in order.
    pub sections: Vec<SectionPlan<'a>>,
}

/// Render plan for one section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionPlan<'a> {
    /// Section display name.
    pub name: &'a str,
    /// Section kind.
    #[serde(rename = "type")]
    pub kind: &'a str,
    /// Lines in order.
    pub lines: Vec<LinePlan<'a>>,
}

/// Render plan for one line. Blank lines have no cells.
#[derive(Debug, Clone, Serialize)]
pub struct LinePlan<'a> {
    /// Instrumental break drawn as vertical space.
    pub blank: bool,
    /// One cell per lyric character.
    pub cells: Vec<RenderCell<'a>>,
}

/// Build the render plan for `song`.
pub fn plan_sheet<'a>(song: &'a Song, scheme: Option<&'a ColorScheme>, scale: FontScale) -> SheetPlan<'a> {
    SheetPlan {
        title: &song.title,
        key: &song.key,
        capo: song.capo,
        time_signature: song.time_signature.as_deref(),
        device: scale.device(),
        font_size: scale.size(),
        font_offset: scale.offset(),
        scheme,
        sections: song
            .sections
            .iter()
            .map(|section| SectionPlan {
                name: &section.name,
                kind: &section.kind,
                lines: section
                    .lines
                    .iter()
                    .map(|line| LinePlan { blank: line.is_blank(), cells: render_line(line) })
                    .collect(),
            })
            .collect(),
    }
}

/// One row of the text layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRow {
    /// Section name.
    Heading(String),
    /// Chord labels aligned over the following lyric row.
    Chords(String),
    /// Lyric text.
    Lyrics(String),
    /// Empty row: instrumental lines and section spacing.
    Blank,
}

impl SheetRow {
    /// Row text without styling.
    pub fn text(&self) -> &str {
        match self {
            Self::Heading(s) | Self::Chords(s) | Self::Lyrics(s) => s,
            Self::Blank => "",
        }
    }
}

/// Lay out the song body as text rows.
pub fn sheet_rows(song: &Song) -> Vec<SheetRow> {
    let mut rows = Vec::new();

    for (i, section) in song.sections.iter().enumerate() {
        if i > 0 {
            rows.push(SheetRow::Blank);
        }
        if !section.name.is_empty() {
            rows.push(SheetRow::Heading(section.name.clone()));
        }
        for line in &section.lines {
            if line.is_blank() {
                rows.push(SheetRow::Blank);
                continue;
            }
            let aligned = align_rows(line);
            if aligned.has_chords() {
                rows.push(SheetRow::Chords(aligned.chords));
            }
            rows.push(SheetRow::Lyrics(aligned.lyrics));
        }
    }

    rows
}

/// Header line: key, capo and time signature.
pub fn meta_line(song: &Song) -> String {
    let mut parts = vec![format!("Key: {}", song.key)];
    if song.capo > 0 {
        parts.push(format!("Capo: {}", song.capo));
    }
    if let Some(ts) = &song.time_signature {
        parts.push(format!("Time: {ts}"));
    }
    parts.join("  ")
}

/// The whole song as plain text.
pub fn text_sheet(song: &Song) -> String {
    let mut out = format!("{}\n{}\n\n", song.title, meta_line(song));
    for row in sheet_rows(song) {
        out.push_str(row.text());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::settings::UserSettings;
    use crate::song::Section;

    fn song() -> Song {
        let mut song = Song::new("静夜思");
        song.capo = 2;
        song.set_lyrics("[C]床前明月光，疑是地上霜");
        song.sections[0].insert_blank_line(1).unwrap();
        let mut chorus = Section::new("chorus", "副歌");
        chorus.lines = crate::song::compile_lyrics("举头望[G]明月");
        song.sections.push(chorus);
        song
    }

    #[test]
    fn rows_follow_sections_and_lines() {
        let rows = sheet_rows(&song());
        assert_eq!(
            rows,
            vec![
                SheetRow::Heading("主歌".into()),
                SheetRow::Chords("C".into()),
                SheetRow::Lyrics("床前明月光".into()),
                SheetRow::Blank,
                SheetRow::Lyrics("疑是地上霜".into()),
                SheetRow::Blank,
                SheetRow::Heading("副歌".into()),
                SheetRow::Chords("      G".into()),
                SheetRow::Lyrics("举头望明月".into()),
            ]
        );
    }

    #[test]
    fn text_sheet_has_header() {
        let text = text_sheet(&song());
        assert!(text.starts_with("静夜思\nKey: C  Capo: 2\n\n主歌\n"));
    }

    #[test]
    fn plan_carries_size_scheme_and_cells() {
        let settings = UserSettings::default();
        let song = song();
        let plan = plan_sheet(&song, settings.current_scheme(), FontScale::for_viewport(800, 1));
        assert_eq!(plan.font_size, 17);
        assert_eq!(plan.device, DeviceType::Tablet);
        assert_eq!(plan.sections.len(), 2);
        assert!(plan.sections[0].lines[1].blank);
        assert_eq!(plan.sections[0].lines[0].cells[0].chord_above, Some("C"));

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["fontSize"], 17);
        assert_eq!(json["sections"][1]["type"], "chorus");
        assert_eq!(json["scheme"]["id"], "eye-care");
    }
}
