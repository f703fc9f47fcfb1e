//! User interface components.
//!
//! Draws the chord sheet viewer with ratatui: a header with the song's
//! details, the scrolling sheet, and a status bar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::display::FontScale;
use crate::settings::SchemeColors;
use crate::sheet::{meta_line, SheetRow};

/// Resolved terminal styles for a color scheme.
struct Palette {
    base: Style,
    chord: Style,
    heading: Style,
}

impl Palette {
    fn from_colors(colors: Option<&SchemeColors>) -> Self {
        let Some(colors) = colors else {
            return Self {
                base: Style::default(),
                chord: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                heading: Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
            };
        };

        let mut base = Style::default();
        if let Some(bg) = parse_hex(&colors.background) {
            base = base.bg(bg);
        }
        if let Some(fg) = parse_hex(&colors.lyrics) {
            base = base.fg(fg);
        }
        let chord = parse_hex(&colors.chord).map_or(base, |c| base.fg(c)).add_modifier(Modifier::BOLD);

        Self { base, chord, heading: base.add_modifier(Modifier::BOLD | Modifier::DIM) }
    }
}

/// Parse `#rrggbb` into a terminal color.
fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Render the full viewer to the terminal frame.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(1), // Status bar at bottom
        ])
        .split(f.size());

    let palette = Palette::from_colors(app.settings.current_scheme().map(|s| &s.colors));

    draw_header(f, app, &palette, chunks[0]);
    draw_sheet(f, app, &palette, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            app.song.title.clone(),
            palette.base.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(meta_line(&app.song), palette.base.add_modifier(Modifier::DIM))),
    ];

    let block = Block::default().borders(Borders::BOTTOM).style(palette.base);
    f.render_widget(Paragraph::new(lines).block(block).style(palette.base), area);
}

fn draw_sheet(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    // Rows are pre-aligned by display width; wrapping would break alignment.
    let lines: Vec<Line> = app
        .rows
        .iter()
        .map(|row| match row {
            SheetRow::Heading(text) => Line::from(Span::styled(text.as_str(), palette.heading)),
            SheetRow::Chords(text) => Line::from(Span::styled(text.as_str(), palette.chord)),
            SheetRow::Lyrics(text) => Line::from(Span::styled(text.as_str(), palette.base)),
            SheetRow::Blank => Line::from(""),
        })
        .collect();

    let sheet = Paragraph::new(lines).style(palette.base).scroll((app.scroll, 0));
    f.render_widget(sheet, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let scheme = app.settings.current_scheme().map_or("-", |s| s.name.as_str());
    let text = app.status_message.clone().unwrap_or_else(|| {
        format!(
            " {}px ({:+}) | scheme: {scheme} | j/k scroll  c scheme  {}  q quit",
            app.scale.size(),
            app.scale.offset(),
            size_keys(app.scale),
        )
    });

    let bar = Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Gray));
    f.render_widget(bar, area);
}

/// Font size keys that still have an effect at `scale`.
const fn size_keys(scale: FontScale) -> &'static str {
    match (scale.can_shrink(), scale.can_grow()) {
        (true, true) => "+/-/0 size",
        (false, true) => "+/0 size",
        (true, false) => "-/0 size",
        (false, false) => "0 size",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DeviceType;

    #[test]
    fn size_keys_hide_exhausted_directions() {
        let mut scale = FontScale::new(DeviceType::Desktop);
        assert_eq!(size_keys(scale), "+/-/0 size");
        scale.adjust(4);
        assert_eq!(size_keys(scale), "-/0 size");
        scale.adjust(-8);
        assert_eq!(size_keys(scale), "+/0 size");
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex("#f5f5dc"), Some(Color::Rgb(0xf5, 0xf5, 0xdc)));
        assert_eq!(parse_hex("#FFD700"), Some(Color::Rgb(0xff, 0xd7, 0x00)));
        assert_eq!(parse_hex("f5f5dc"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gggggg"), None);
    }
}
