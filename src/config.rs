//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.
//! The loaded [`Config`] is passed explicitly to whatever needs it.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use crate::constants::{display, store};
use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    pub(crate) app_name: String,
    /// The application version
    pub(crate) app_version: String,
    /// GitHub API token
    pub github_token: String,
    /// Owner of the repository holding the song data
    pub github_owner: String,
    /// Repository holding the song data
    pub github_repo: String,
    /// Base URL of the GitHub API
    pub api_base: String,
    /// Local settings file
    pub settings_path: Option<PathBuf>,
    /// Viewport width (px) used when producing render plans
    pub viewport_width: u32,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// User agent sent with every store request.
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.app_name, self.app_version)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            github_token: String::new(),
            github_owner: String::new(),
            github_repo: String::new(),
            api_base: store::GITHUB_API_BASE.to_string(),
            settings_path: default_settings_path(),
            viewport_width: display::DEFAULT_VIEWPORT_WIDTH,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(token) = env::var("GITHUB_TOKEN") {
            config.github_token = token;
        }

        if let Ok(owner) = env::var("GITHUB_OWNER") {
            config.github_owner = owner;
        }

        if let Ok(repo) = env::var("GITHUB_REPO") {
            config.github_repo = repo;
        }

        if let Ok(base) = env::var("GITHUB_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        if let Ok(path) = env::var("CHORDSBOX_SETTINGS") {
            config.settings_path = Some(PathBuf::from(shellexpand::tilde(&path).to_string()));
        }

        if let Ok(width) = env::var("CHORDSBOX_VIEWPORT") {
            match width.parse::<u32>() {
                Ok(width) => config.viewport_width = width,
                Err(_) => tracing::warn!("Ignoring invalid CHORDSBOX_VIEWPORT value {width:?}"),
            }
        }

        Ok(config)
    }

    /// Check if the GitHub document store is configured
    pub fn has_store_credentials(&self) -> bool {
        !self.github_token.is_empty() && !self.github_owner.is_empty() && !self.github_repo.is_empty()
    }
}

/// `<config dir>/chordsbox/settings.json`, if the platform has a config dir.
fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(env!("CARGO_PKG_NAME")).join("settings.json"))
}
