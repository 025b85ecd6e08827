//! Tile colors, fonts and labels resolved from configuration.

use crate::config::{parse_hex_color, TileConfig};
use crate::event::EventKind;
use crate::render::{Color, Font};

/// Fallback when a palette is empty.
const NEUTRAL_GRAY: Color = (0.5, 0.5, 0.5, 1.0);

/// Resource colors, indexed by resource id.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Parses hex colors, dropping entries that do not parse.
    pub fn from_hex<I, S>(hex: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            hex.into_iter()
                .filter_map(|value| parse_hex_color(value.as_ref()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a resource: `colors[id % len]`, so a resource keeps its
    /// color across tiles.
    pub fn color_for(&self, resource_id: u64) -> Color {
        if self.colors.is_empty() {
            return NEUTRAL_GRAY;
        }
        let index = (resource_id % self.colors.len() as u64) as usize;
        self.colors[index]
    }
}

/// Resolved theme for tile rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TileTheme {
    /// Body font; components derive heavier weights from it.
    pub font: Font,
    /// Primary text color
    pub text: Color,
    /// Muted color (overflow labels, allocation badges)
    pub muted: Color,
    /// Accent color (event badges)
    pub accent: Color,
    /// Success color (booking badges)
    pub success: Color,
    /// Text drawn on badge backgrounds
    pub badge_foreground: Color,
    pub palette: Palette,
    /// Word after the count in "+N more".
    pub more_label: String,
    /// Shown when an event has no title.
    pub untitled_label: String,
}

impl TileTheme {
    /// Creates a theme from config values, falling back per color.
    pub fn from_config(tile: &TileConfig) -> Self {
        let palette = Palette::from_hex(&tile.palette);
        let palette = if palette.is_empty() {
            Palette::from_hex(crate::config::default_palette())
        } else {
            palette
        };

        Self {
            font: Font::new(tile.font_family.clone(), tile.font_size),
            text: parse_hex_color(&tile.text_color).unwrap_or((0.0, 0.0, 0.0, 1.0)),
            muted: parse_hex_color(&tile.muted_color).unwrap_or((0.33, 0.33, 0.33, 1.0)),
            accent: parse_hex_color(&tile.accent_color).unwrap_or((0.16, 0.38, 0.68, 1.0)),
            success: parse_hex_color(&tile.success_color).unwrap_or((0.18, 0.55, 0.34, 1.0)),
            badge_foreground: (1.0, 1.0, 1.0, 1.0),
            palette,
            more_label: tile.more_label.clone(),
            untitled_label: tile.untitled_label.clone(),
        }
    }

    pub fn resource_color(&self, resource_id: u64) -> Color {
        self.palette.color_for(resource_id)
    }

    /// Returns the (background, foreground) colors of a kind badge.
    pub fn badge_colors(&self, kind: EventKind) -> (Color, Color) {
        match kind {
            EventKind::Event => (self.accent, self.badge_foreground),
            EventKind::Booking => (self.success, self.badge_foreground),
            EventKind::Allocation => (self.muted, self.badge_foreground),
        }
    }
}

impl Default for TileTheme {
    fn default() -> Self {
        Self::from_config(&TileConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_indexes_by_id_modulo_length() {
        let palette = Palette::from_hex(["#ff0000", "#00ff00", "#0000ff"]);
        assert_eq!(palette.color_for(0), (1.0, 0.0, 0.0, 1.0));
        assert_eq!(palette.color_for(4), (0.0, 1.0, 0.0, 1.0));
        assert_eq!(palette.color_for(5), palette.color_for(2));
    }

    #[test]
    fn empty_palette_falls_back_to_gray() {
        let palette = Palette::new(Vec::new());
        assert_eq!(palette.color_for(9), NEUTRAL_GRAY);
    }

    #[test]
    fn invalid_palette_entries_are_dropped() {
        let palette = Palette::from_hex(["#ff0000", "nope"]);
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn theme_uses_default_palette_when_config_palette_is_unusable() {
        let tile = TileConfig {
            palette: vec!["bogus".to_string()],
            ..TileConfig::default()
        };
        let theme = TileTheme::from_config(&tile);
        assert!(!theme.palette.is_empty());
    }

    #[test]
    fn badge_colors_follow_kind() {
        let theme = TileTheme::default();
        assert_eq!(theme.badge_colors(EventKind::Booking).0, theme.success);
        assert_eq!(theme.badge_colors(EventKind::Allocation).0, theme.muted);
    }
}
