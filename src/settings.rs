//! Local display preferences.
//!
//! [`UserSettings`] changes through plain functions that return a new value;
//! nothing is written until the caller asks [`SettingsFile::save`] to.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Colors used to draw a chord sheet, as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeColors {
    /// Page background.
    pub background: String,
    /// Lyric text.
    pub lyrics: String,
    /// Chord labels.
    pub chord: String,
}

/// A named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The scheme's colors.
    pub colors: SchemeColors,
}

impl ColorScheme {
    /// A scheme from hex colors.
    pub fn new(id: &str, name: &str, background: &str, lyrics: &str, chord: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            colors: SchemeColors {
                background: background.to_string(),
                lyrics: lyrics.to_string(),
                chord: chord.to_string(),
            },
        }
    }
}

/// Partial update for a color scheme. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorSchemePatch {
    /// New display name.
    pub name: Option<String>,
    /// New page background.
    pub background: Option<String>,
    /// New lyric color.
    pub lyrics: Option<String>,
    /// New chord color.
    pub chord: Option<String>,
}

/// Everything the viewer and editor remember between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Available color schemes.
    #[serde(default = "default_color_schemes")]
    pub color_schemes: Vec<ColorScheme>,
    /// Scheme in use.
    #[serde(default = "default_scheme_id")]
    pub current_scheme_id: String,
    /// Chords offered as one-click buttons in the editor.
    #[serde(default = "default_common_chords")]
    pub common_chords: Vec<String>,
}

fn default_color_schemes() -> Vec<ColorScheme> {
    vec![
        ColorScheme::new("eye-care", "护眼", "#f5f5dc", "#333333", "#d62828"),
        ColorScheme::new("dark", "深色", "#1a1a1a", "#ffffff", "#ffd700"),
        ColorScheme::new("light", "亮色", "#ffffff", "#000000", "#0066cc"),
    ]
}

fn default_scheme_id() -> String {
    "eye-care".to_string()
}

fn default_common_chords() -> Vec<String> {
    [
        "Am", "G", "Dm", "C", "F", "E", "A", "D", "Bm", "Em", "Fmaj7", "Cmaj7", "Gsus4", "E7",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            color_schemes: default_color_schemes(),
            current_scheme_id: default_scheme_id(),
            common_chords: default_common_chords(),
        }
    }
}

impl UserSettings {
    /// The scheme in use, falling back to the first one.
    pub fn current_scheme(&self) -> Option<&ColorScheme> {
        self.color_schemes
            .iter()
            .find(|s| s.id == self.current_scheme_id)
            .or_else(|| self.color_schemes.first())
    }

    /// The scheme with `id`.
    pub fn scheme(&self, id: &str) -> Option<&ColorScheme> {
        self.color_schemes.iter().find(|s| s.id == id)
    }

    /// Switch to the scheme with `id`.
    pub fn with_current_scheme(&self, id: &str) -> Result<Self> {
        if self.scheme(id).is_none() {
            return Err(Error::Msg(format!("Unknown color scheme: {id}")));
        }
        Ok(Self { current_scheme_id: id.to_string(), ..self.clone() })
    }

    /// Id of the scheme after the current one, wrapping around.
    pub fn next_scheme_id(&self) -> Option<&str> {
        let current = self
            .color_schemes
            .iter()
            .position(|s| s.id == self.current_scheme_id)
            .unwrap_or(0);
        let len = self.color_schemes.len();
        (len > 0).then(|| self.color_schemes[(current + 1) % len].id.as_str())
    }

    /// Add `scheme`, replacing any scheme with the same id.
    #[must_use]
    pub fn with_scheme_added(&self, scheme: ColorScheme) -> Self {
        let mut next = self.clone();
        match next.color_schemes.iter_mut().find(|s| s.id == scheme.id) {
            Some(existing) => *existing = scheme,
            None => next.color_schemes.push(scheme),
        }
        next
    }

    /// Apply `patch` to the scheme with `id`. Unknown ids change nothing.
    #[must_use]
    pub fn with_scheme_updated(&self, id: &str, patch: ColorSchemePatch) -> Self {
        let mut next = self.clone();
        if let Some(scheme) = next.color_schemes.iter_mut().find(|s| s.id == id) {
            if let Some(name) = patch.name {
                scheme.name = name;
            }
            if let Some(background) = patch.background {
                scheme.colors.background = background;
            }
            if let Some(lyrics) = patch.lyrics {
                scheme.colors.lyrics = lyrics;
            }
            if let Some(chord) = patch.chord {
                scheme.colors.chord = chord;
            }
        }
        next
    }

    /// Remove the scheme with `id`.
    ///
    /// Removing the current scheme switches to the first remaining one, or
    /// to `light` when none are left.
    #[must_use]
    pub fn without_scheme(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.color_schemes.retain(|s| s.id != id);
        if next.current_scheme_id == id {
            next.current_scheme_id = next
                .color_schemes
                .first()
                .map_or_else(|| "light".to_string(), |s| s.id.clone());
        }
        next
    }
}

/// JSON settings file on local disk.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// Settings stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings, filling missing fields with defaults.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load(&self) -> UserSettings {
        if !self.path.exists() {
            return UserSettings::default();
        }

        let parsed = fs_err::read_to_string(&self.path)
            .map_err(Error::from)
            .and_then(|raw| serde_json::from_str::<UserSettings>(&raw).map_err(Error::from));

        parsed.unwrap_or_else(|e| {
            tracing::warn!("Failed to load settings from {}: {e}", self.path.display());
            UserSettings::default()
        })
    }

    /// Write `settings` to disk now.
    pub fn save(&self, settings: &UserSettings) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs_err::create_dir_all(dir).map_err(|e| Error::io(e, dir.to_path_buf()))?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs_err::write(&self.path, json).map_err(|e| Error::io(e, self.path.clone()))?;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
