//! Layout modes and the per-mode component configuration.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const TIME: &str = "time";
pub const TITLE: &str = "title";
pub const ORGANIZER: &str = "organizer";
pub const RESOURCE_CIRCLES: &str = "resourceCircles";
pub const RESOURCE_LIST: &str = "resourceList";

/// Names of the components shipped with the crate.
pub const BUILTIN_COMPONENTS: &[&str] = &[
    TIME,
    TITLE,
    ORGANIZER,
    RESOURCE_CIRCLES,
    RESOURCE_LIST,
];

/// Tile size class, ordered from smallest to largest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    Minimal,
    Short,
    Medium,
    Standard,
    Large,
}

impl LayoutType {
    pub const ALL: [LayoutType; 5] = [
        Self::Minimal,
        Self::Short,
        Self::Medium,
        Self::Standard,
        Self::Large,
    ];

    /// Picks a layout from the tile height in pixels.
    pub fn from_height(height: f64) -> Self {
        if height <= 30.0 {
            Self::Minimal
        } else if height <= 50.0 {
            Self::Short
        } else if height <= 75.0 {
            Self::Medium
        } else if height <= 100.0 {
            Self::Standard
        } else {
            Self::Large
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Standard => "standard",
            Self::Large => "large",
        }
    }
}

impl Display for LayoutType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "standard" => Ok(Self::Standard),
            "large" => Ok(Self::Large),
            other => Err(format!(
                "invalid layout `{other}`; expected minimal, short, medium, standard or large"
            )),
        }
    }
}

/// Component pairs that share one horizontal band instead of stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideBySide {
    pub time_resource_circles: bool,
}

/// Components enabled for one layout type, in paint order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub components: Vec<String>,
    pub side_by_side: SideBySide,
}

impl LayoutConfig {
    pub fn new(components: &[&str], time_resource_circles: bool) -> Self {
        Self {
            components: components.iter().map(|name| name.to_string()).collect(),
            side_by_side: SideBySide {
                time_resource_circles,
            },
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.components.iter().any(|component| component == name)
    }

    /// Whether Time and Resource-Circles are painted in one band.
    ///
    /// Only meaningful when both are enabled.
    pub fn pairs_time_with_circles(&self) -> bool {
        self.side_by_side.time_resource_circles && self.has(TIME) && self.has(RESOURCE_CIRCLES)
    }
}

/// One [`LayoutConfig`] per [`LayoutType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutProfiles {
    pub minimal: LayoutConfig,
    pub short: LayoutConfig,
    pub medium: LayoutConfig,
    pub standard: LayoutConfig,
    pub large: LayoutConfig,
}

impl LayoutProfiles {
    pub fn get(&self, layout: LayoutType) -> &LayoutConfig {
        match layout {
            LayoutType::Minimal => &self.minimal,
            LayoutType::Short => &self.short,
            LayoutType::Medium => &self.medium,
            LayoutType::Standard => &self.standard,
            LayoutType::Large => &self.large,
        }
    }

    pub fn get_mut(&mut self, layout: LayoutType) -> &mut LayoutConfig {
        match layout {
            LayoutType::Minimal => &mut self.minimal,
            LayoutType::Short => &mut self.short,
            LayoutType::Medium => &mut self.medium,
            LayoutType::Standard => &mut self.standard,
            LayoutType::Large => &mut self.large,
        }
    }
}

impl Default for LayoutProfiles {
    fn default() -> Self {
        Self {
            minimal: LayoutConfig::new(&[TIME, RESOURCE_CIRCLES], true),
            short: LayoutConfig::new(&[TIME, RESOURCE_CIRCLES], false),
            medium: LayoutConfig::new(&[TIME, TITLE, RESOURCE_CIRCLES], true),
            standard: LayoutConfig::new(&[TIME, TITLE, ORGANIZER, RESOURCE_CIRCLES], false),
            large: LayoutConfig::new(&[TIME, TITLE, ORGANIZER, RESOURCE_LIST], false),
        }
    }
}
