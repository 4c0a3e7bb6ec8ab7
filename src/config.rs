//! Application settings.
//!
//! Every tunable of the timeline lives in [`TimelineSettings`]. Settings are
//! stored as JSON with `#RRGGBB` colour strings; all fields carry
//! `#[serde(default)]` so a partial file falls back to the built-in values.

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Top-level persisted settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub timeline: TimelineSettings,
}

/// Geometry and interaction constants of the timeline viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Width of one 5-minute segment at zoom 1.0, in pixels.
    pub segment_width: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Multiplier applied when scrolling up.
    pub zoom_in_factor: f32,
    /// Multiplier applied when scrolling down.
    pub zoom_out_factor: f32,
    /// Labels further than this outside the viewport are not emitted at all.
    pub label_cull_margin: f32,
    /// Labels further than this outside the viewport are emitted fully transparent.
    pub label_fade_margin: f32,
    pub track_height: f32,
    #[serde(with = "hex_color")]
    pub segment_color: Color32,
    /// Fixed seed for segment intensities; fresh randomness when unset.
    pub intensity_seed: Option<u64>,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            segment_width: 4.0,
            min_zoom: 0.5,
            max_zoom: 10.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            label_cull_margin: 200.0,
            label_fade_margin: 100.0,
            track_height: 60.0,
            segment_color: Color32::from_rgb(0x22, 0xc5, 0x5e),
            intensity_seed: None,
        }
    }
}

impl TimelineSettings {
    /// Repair values a hand-edited file may have broken.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        if !(self.segment_width.is_finite() && self.segment_width > 0.0) {
            self.segment_width = defaults.segment_width;
        }
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            self.min_zoom = defaults.min_zoom;
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            self.max_zoom = defaults.max_zoom.max(self.min_zoom);
        }
        if !(self.track_height.is_finite() && self.track_height > 0.0) {
            self.track_height = defaults.track_height;
        }
    }
}

pub mod hex_color {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let [r, g, b, _] = color.to_array();
        serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}", r, g, b))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse_hex_color(s: &str) -> Result<Color32, String> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid hex color '{}': expected 6 hex digits", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
        };
        Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}
