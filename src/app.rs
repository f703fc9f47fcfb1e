//! Terminal viewer state.
//!
//! Holds a read-only song plus the viewer's own preferences. Key handling
//! only changes view state; the one side effect is saving settings when the
//! color scheme changes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::constants::viewer::PAGE_SCROLL;
use crate::display::FontScale;
use crate::settings::{SettingsFile, UserSettings};
use crate::sheet::{sheet_rows, SheetRow};
use crate::song::Song;

/// Viewer application state.
pub struct App {
    /// Song being viewed.
    pub song: Song,
    /// Pre-computed text layout of the song body.
    pub rows: Vec<SheetRow>,
    /// Current preferences.
    pub settings: UserSettings,
    /// Where preferences are saved, if anywhere.
    settings_file: Option<SettingsFile>,
    /// Font size preference shown in the status bar.
    pub scale: FontScale,
    /// First visible row.
    pub scroll: u16,
    /// Transient message for the status bar.
    pub status_message: Option<String>,
    should_quit: bool,
}

impl App {
    /// Viewer for `song`, sized for a viewport `viewport_width` pixels wide.
    pub fn new(
        song: Song,
        settings: UserSettings,
        settings_file: Option<SettingsFile>,
        viewport_width: u32,
    ) -> Self {
        let rows = sheet_rows(&song);
        Self {
            song,
            rows,
            settings,
            settings_file,
            scale: FontScale::for_viewport(viewport_width, 0),
            scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Whether the viewer should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// React to a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        self.status_message = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(i32::from(PAGE_SCROLL)),
            KeyCode::PageUp => self.scroll_by(-i32::from(PAGE_SCROLL)),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = self.max_scroll(),
            KeyCode::Char('c') => self.cycle_scheme(),
            KeyCode::Char('+' | '=') => self.scale.adjust(1),
            KeyCode::Char('-') => self.scale.adjust(-1),
            KeyCode::Char('0') => self.scale.reset(),
            _ => {}
        }
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.rows.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = u16::try_from(next).unwrap_or(0);
    }

    /// Switch to the next color scheme and persist the choice.
    fn cycle_scheme(&mut self) {
        let Some(next_id) = self.settings.next_scheme_id().map(String::from) else {
            return;
        };
        let Ok(next) = self.settings.with_current_scheme(&next_id) else {
            return;
        };
        self.settings = next;

        let name = self.settings.current_scheme().map(|s| s.name.clone()).unwrap_or_default();
        self.status_message = Some(match &self.settings_file {
            Some(file) => match file.save(&self.settings) {
                Ok(()) => format!("Color scheme: {name}"),
                Err(e) => format!("Color scheme: {name} (not saved: {e})"),
            },
            None => format!("Color scheme: {name}"),
        });
    }
}
