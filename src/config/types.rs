use std::fmt::{Display, Formatter};

use serde::Deserialize;

use crate::layout::{
    LayoutConfig, LayoutProfiles, LayoutType, SideBySide, RESOURCE_CIRCLES, RESOURCE_LIST, TIME,
    TITLE,
};

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tile: TileConfig,
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub layouts: LayoutsConfig,
}

/// Fonts, colors and labels used inside tiles.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TileConfig {
    /// Font family
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Base font size in pixels
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Body text color in hex format (#RRGGBB or #RRGGBBAA)
    #[serde(default = "default_text_color")]
    pub text_color: String,
    /// Secondary text color
    #[serde(default = "default_muted_color")]
    pub muted_color: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    #[serde(default = "default_success_color")]
    pub success_color: String,
    /// Resource colors; a resource uses `palette[id % len]`
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Word after the count in the resource list overflow label ("+3 more")
    #[serde(default = "default_more_label")]
    pub more_label: String,
    /// Title shown for events without one
    #[serde(default = "default_untitled_label")]
    pub untitled_label: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            text_color: default_text_color(),
            muted_color: default_muted_color(),
            accent_color: default_accent_color(),
            success_color: default_success_color(),
            palette: default_palette(),
            more_label: default_more_label(),
            untitled_label: default_untitled_label(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DebugConfig {
    /// Stroke each component's bounding box
    #[serde(default)]
    pub outlines: bool,
    /// Log per-component layout decisions
    #[serde(default)]
    pub trace: bool,
}

/// Per-layout overrides; missing layouts keep the built-in profile.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LayoutsConfig {
    pub minimal: Option<LayoutEntry>,
    pub short: Option<LayoutEntry>,
    pub medium: Option<LayoutEntry>,
    pub standard: Option<LayoutEntry>,
    pub large: Option<LayoutEntry>,
}

impl LayoutsConfig {
    pub fn get(&self, layout: LayoutType) -> Option<&LayoutEntry> {
        match layout {
            LayoutType::Minimal => self.minimal.as_ref(),
            LayoutType::Short => self.short.as_ref(),
            LayoutType::Medium => self.medium.as_ref(),
            LayoutType::Standard => self.standard.as_ref(),
            LayoutType::Large => self.large.as_ref(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    /// Component names in paint order
    pub components: Vec<String>,
    /// Draw time and resource circles in one band
    #[serde(default)]
    pub time_with_resource_circles: bool,
}

impl From<&LayoutEntry> for LayoutConfig {
    fn from(entry: &LayoutEntry) -> Self {
        Self {
            components: entry.components.clone(),
            side_by_side: SideBySide {
                time_resource_circles: entry.time_with_resource_circles,
            },
        }
    }
}

/// A problem found while validating a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub is_error: bool,
    pub message: String,
}

impl ValidationIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            is_error: false,
            message: message.into(),
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{}: {}", level, self.message)
    }
}

impl Config {
    /// Built-in layout profiles with this config's overrides applied.
    pub fn layout_profiles(&self) -> LayoutProfiles {
        let mut profiles = LayoutProfiles::default();
        for layout in LayoutType::ALL {
            if let Some(entry) = self.layouts.get(layout) {
                *profiles.get_mut(layout) = LayoutConfig::from(entry);
            }
        }
        profiles
    }

    /// Checks the config against the registered component names.
    pub fn validate(&self, known_components: &[String]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !self.tile.font_size.is_finite() || self.tile.font_size <= 0.0 {
            issues.push(ValidationIssue::error(format!(
                "tile.font_size must be positive, got {}",
                self.tile.font_size
            )));
        }

        if self.tile.palette.is_empty() {
            issues.push(ValidationIssue::error("tile.palette must not be empty"));
        }
        for color in &self.tile.palette {
            if parse_hex_color(color).is_none() {
                issues.push(ValidationIssue::error(format!(
                    "tile.palette contains invalid color '{}'",
                    color
                )));
            }
        }

        for (field, value) in [
            ("text_color", &self.tile.text_color),
            ("muted_color", &self.tile.muted_color),
            ("accent_color", &self.tile.accent_color),
            ("success_color", &self.tile.success_color),
        ] {
            if parse_hex_color(value).is_none() {
                issues.push(ValidationIssue::warning(format!(
                    "tile.{} '{}' is not a hex color; using default",
                    field, value
                )));
            }
        }

        let profiles = self.layout_profiles();
        for layout in LayoutType::ALL {
            let config = profiles.get(layout);

            if config.components.is_empty() {
                issues.push(ValidationIssue::warning(format!(
                    "layouts.{} enables no components",
                    layout
                )));
            }
            if config.has(RESOURCE_CIRCLES) && config.has(RESOURCE_LIST) {
                issues.push(ValidationIssue::error(format!(
                    "layouts.{} enables both {} and {}",
                    layout, RESOURCE_CIRCLES, RESOURCE_LIST
                )));
            }
            if config.has(TITLE) && layout < LayoutType::Medium {
                issues.push(ValidationIssue::warning(format!(
                    "layouts.{} enables {}, which only renders from medium up",
                    layout, TITLE
                )));
            }
            if config.side_by_side.time_resource_circles
                && !(config.has(TIME) && config.has(RESOURCE_CIRCLES))
            {
                issues.push(ValidationIssue::warning(format!(
                    "layouts.{} pairs {} with {} but does not enable both",
                    layout, TIME, RESOURCE_CIRCLES
                )));
            }
            for name in &config.components {
                if !known_components.iter().any(|known| known == name) {
                    issues.push(ValidationIssue::warning(format!(
                        "layouts.{} references unknown component '{}'",
                        layout, name
                    )));
                }
            }
        }

        issues
    }
}

fn default_font_family() -> String {
    "Roboto".to_string()
}

fn default_font_size() -> f64 {
    12.0
}

fn default_text_color() -> String {
    "#000000".to_string()
}

fn default_muted_color() -> String {
    "#555555".to_string()
}

fn default_accent_color() -> String {
    "#2961ad".to_string()
}

fn default_success_color() -> String {
    "#2e8c57".to_string()
}

/// Resource palette used when none is configured.
pub fn default_palette() -> Vec<String> {
    [
        "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6", "#bfef45",
        "#469990", "#9a6324",
    ]
    .iter()
    .map(|color| color.to_string())
    .collect()
}

fn default_more_label() -> String {
    "more".to_string()
}

fn default_untitled_label() -> String {
    "(untitled)".to_string()
}

/// Parse a hex color string into RGBA components (0.0-1.0)
pub fn parse_hex_color(hex: &str) -> Option<(f64, f64, f64, f64)> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| -> Option<f64> {
        Some(u8::from_str_radix(&hex[range], 16).ok()? as f64 / 255.0)
    };

    match hex.len() {
        6 => Some((channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0)),
        8 => Some((
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BUILTIN_COMPONENTS;

    fn known() -> Vec<String> {
        BUILTIN_COMPONENTS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff"), Some((1.0, 1.0, 1.0, 1.0)));
        assert_eq!(parse_hex_color("#000000"), Some((0.0, 0.0, 0.0, 1.0)));
        assert_eq!(parse_hex_color("#ff0000"), Some((1.0, 0.0, 0.0, 1.0)));
        assert_eq!(
            parse_hex_color("#00ff0080"),
            Some((0.0, 1.0, 0.0, 0.5019607843137255))
        );
        assert_eq!(parse_hex_color("invalid"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn default_config_is_valid() {
        let issues = Config::default().validate(&known());
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r##"
            [tile]
            font_size = 13
            palette = ["#112233", "#445566"]
            more_label = "flere"

            [debug]
            outlines = true

            [layouts.short]
            components = ["time", "title", "resourceCircles"]
            time_with_resource_circles = true
            "##,
        )
        .unwrap();

        assert_eq!(config.tile.font_size, 13.0);
        assert_eq!(config.tile.font_family, "Roboto");
        assert_eq!(config.tile.more_label, "flere");
        assert!(config.debug.outlines);

        let profiles = config.layout_profiles();
        assert!(profiles.short.has("title"));
        assert!(profiles.short.side_by_side.time_resource_circles);
        assert_eq!(profiles.large, LayoutProfiles::default().large);
    }

    #[test]
    fn validation_reports_errors_and_warnings() {
        let config: Config = toml::from_str(
            r##"
            [tile]
            palette = ["#zzzzzz"]

            [layouts.minimal]
            components = ["time", "title", "sparkle"]

            [layouts.large]
            components = ["time", "resourceCircles", "resourceList"]
            "##,
        )
        .unwrap();

        let issues = config.validate(&known());
        let errors: Vec<_> = issues.iter().filter(|i| i.is_error).collect();
        let warnings: Vec<_> = issues.iter().filter(|i| !i.is_error).collect();

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|i| i.message.contains("#zzzzzz")));
        assert!(errors.iter().any(|i| i.message.contains("both")));
        assert!(warnings.iter().any(|i| i.message.contains("sparkle")));
        assert!(warnings.iter().any(|i| i.message.contains("medium up")));
    }

    #[test]
    fn issue_display_includes_level() {
        let issue = ValidationIssue::warning("careful");
        assert_eq!(issue.to_string(), "warning: careful");
    }
}
