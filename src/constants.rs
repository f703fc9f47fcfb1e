//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Lyric compilation constants.
pub mod lyrics {
    /// Full-width marks that end a lyric segment.
    pub const SEGMENT_BREAKS: [char; 7] = ['，', '。', '、', '；', '：', '！', '？'];

    /// Separator used when joining lines back into editor input.
    pub const LINE_JOINER: &str = "，";
}

/// Device classification and font sizing constants.
pub mod display {
    /// Viewports narrower than this are phones.
    pub const TABLET_MIN_WIDTH: u32 = 640;

    /// Viewports at least this wide are desktops.
    pub const DESKTOP_MIN_WIDTH: u32 = 1024;

    /// Base font size on phones (px).
    pub const MOBILE_FONT_SIZE: u8 = 14;

    /// Base font size on tablets (px).
    pub const TABLET_FONT_SIZE: u8 = 16;

    /// Base font size on desktops (px).
    pub const DESKTOP_FONT_SIZE: u8 = 18;

    /// Largest user font offset in either direction.
    pub const MAX_FONT_OFFSET: i8 = 4;

    /// Viewport assumed when none is configured.
    pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
}

/// Remote document store constants.
pub mod store {
    /// Default GitHub API endpoint.
    pub const GITHUB_API_BASE: &str = "https://api.github.com";

    /// Media type requested from the contents API.
    pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

    /// Request timeout in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Path of the song list index document.
    pub const SONGS_INDEX_PATH: &str = "data/songs.json";

    /// Directory holding one document per song.
    pub const SONGS_DIR: &str = "data/songs";
}

/// Song defaults and limits.
pub mod song {
    /// Key of a newly created song.
    pub const DEFAULT_KEY: &str = "C";

    /// Highest capo fret accepted.
    pub const MAX_CAPO: u8 = 12;

    /// Kind of the section every new song starts with.
    pub const DEFAULT_SECTION_TYPE: &str = "verse";

    /// Display name of the section every new song starts with.
    pub const DEFAULT_SECTION_NAME: &str = "主歌";
}

/// Viewer constants.
pub mod viewer {
    /// Lines scrolled by PageUp/PageDown.
    pub const PAGE_SCROLL: u16 = 10;

    /// Event poll interval in milliseconds.
    pub const POLL_INTERVAL_MS: u64 = 50;
}

/// Search constants.
pub mod search {
    /// Minimum fuzzy score for a title match.
    pub const MIN_FUZZY_SCORE: i64 = 40;

    /// Default number of search results.
    pub const DEFAULT_LIMIT: usize = 10;
}
