//! Device classification and font sizing for chord sheets.
//!
//! The base size depends only on the viewport class; the user's offset is
//! layered on top and never affects chord alignment.

use serde::{Deserialize, Serialize};

use crate::constants::display::{
    DESKTOP_FONT_SIZE, DESKTOP_MIN_WIDTH, MAX_FONT_OFFSET, MOBILE_FONT_SIZE, TABLET_FONT_SIZE,
    TABLET_MIN_WIDTH,
};

/// Viewport class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Narrower than 640px.
    Mobile,
    /// 640px up to 1024px.
    Tablet,
    /// 1024px and wider.
    #[default]
    Desktop,
}

impl DeviceType {
    /// Classify a viewport by its width in CSS pixels.
    #[must_use]
    pub const fn from_viewport_width(width: u32) -> Self {
        if width < TABLET_MIN_WIDTH {
            Self::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// Default font size in pixels.
    #[must_use]
    pub const fn default_font_size(self) -> u8 {
        match self {
            Self::Mobile => MOBILE_FONT_SIZE,
            Self::Tablet => TABLET_FONT_SIZE,
            Self::Desktop => DESKTOP_FONT_SIZE,
        }
    }
}

/// Device base size plus a bounded user offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FontScale {
    device: DeviceType,
    offset: i8,
}

impl FontScale {
    /// Scale with no offset for `device`.
    #[must_use]
    pub const fn new(device: DeviceType) -> Self {
        Self { device, offset: 0 }
    }

    /// Scale for a viewport width, with `offset` clamped into range.
    #[must_use]
    pub fn for_viewport(width: u32, offset: i8) -> Self {
        let mut scale = Self::new(DeviceType::from_viewport_width(width));
        scale.adjust(offset);
        scale
    }

    /// Change the offset by `delta`, clamping to ±4.
    pub fn adjust(&mut self, delta: i8) {
        self.offset = self
            .offset
            .saturating_add(delta)
            .clamp(-MAX_FONT_OFFSET, MAX_FONT_OFFSET);
    }

    /// Back to the device default.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Whether the offset can grow further.
    #[must_use]
    pub const fn can_grow(&self) -> bool {
        self.offset < MAX_FONT_OFFSET
    }

    /// Whether the offset can shrink further.
    #[must_use]
    pub const fn can_shrink(&self) -> bool {
        self.offset > -MAX_FONT_OFFSET
    }

    /// Current offset.
    #[must_use]
    pub const fn offset(&self) -> i8 {
        self.offset
    }

    /// Device this scale was built for.
    #[must_use]
    pub const fn device(&self) -> DeviceType {
        self.device
    }

    /// Effective font size in pixels.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.device.default_font_size().saturating_add_signed(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_width_thresholds() {
        assert_eq!(DeviceType::from_viewport_width(500), DeviceType::Mobile);
        assert_eq!(DeviceType::from_viewport_width(639), DeviceType::Mobile);
        assert_eq!(DeviceType::from_viewport_width(640), DeviceType::Tablet);
        assert_eq!(DeviceType::from_viewport_width(800), DeviceType::Tablet);
        assert_eq!(DeviceType::from_viewport_width(1023), DeviceType::Tablet);
        assert_eq!(DeviceType::from_viewport_width(1024), DeviceType::Desktop);
        assert_eq!(DeviceType::from_viewport_width(1200), DeviceType::Desktop);
    }

    #[test]
    fn base_sizes() {
        assert_eq!(FontScale::for_viewport(500, 0).size(), 14);
        assert_eq!(FontScale::for_viewport(800, 0).size(), 16);
        assert_eq!(FontScale::for_viewport(1200, 0).size(), 18);
    }

    #[test]
    fn offset_clamps_at_four() {
        let mut scale = FontScale::new(DeviceType::Tablet);
        for _ in 0..10 {
            scale.adjust(1);
        }
        assert_eq!(scale.offset(), 4);
        assert_eq!(scale.size(), 20);
        assert!(!scale.can_grow());

        scale.adjust(-100);
        assert_eq!(scale.offset(), -4);
        assert_eq!(scale.size(), 12);
        assert!(!scale.can_shrink());

        scale.reset();
        assert_eq!(scale.size(), 16);
    }

    #[test]
    fn for_viewport_clamps_initial_offset() {
        assert_eq!(FontScale::for_viewport(500, 9).offset(), 4);
        assert_eq!(FontScale::for_viewport(500, i8::MIN).offset(), -4);
    }

    #[test]
    fn device_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DeviceType::Tablet).unwrap_or_default(), r#""tablet""#);
    }
}
