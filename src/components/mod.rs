//! Tile components and the contract they share.
//!
//! Each component paints one element of an event tile (time, title, organizer,
//! resources, badge) into a region starting at the composer's cursor, and
//! reports how much space it used and how far the cursor should move.
//! Components are looked up by name in a [`ComponentRegistry`], so new kinds
//! can be added by implementing [`ComponentRenderer`] and registering them.

mod badge;
mod organizer;
mod registry;
mod resource_circles;
mod resource_list;
mod theme;
mod time;
mod title;

pub use badge::{BadgeRenderer, BADGE};
pub use organizer::OrganizerRenderer;
pub use registry::{global_registry, register_component, ComponentRegistry};
pub use resource_circles::{plan_circles, CirclePlan, ResourceCirclesRenderer};
pub use resource_list::{plan_list, ListPlan, ResourceListRenderer};
pub use theme::{Palette, TileTheme};
pub use time::{display_time, time_label, TimeRenderer};
pub use title::TitleRenderer;

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticKind, RenderObserver};
use crate::error::RenderError;
use crate::event::EventRecord;
use crate::layout::{LayoutConfig, LayoutType};
use crate::render::primitives::draw_debug_outline;
use crate::render::{Rect, Surface};

/// Default height of a single-line component, padding included.
pub const DEFAULT_COMPONENT_HEIGHT: f64 = 24.0;

/// Height of one line of 12px text.
pub const LINE_HEIGHT: f64 = 16.0;

/// Pixel size of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    /// Rounds to whole pixels to keep layout off sub-pixel positions.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.round(),
            height: height.round(),
        }
    }
}

/// Space a component used and how far the cursor moves after it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RenderResult {
    pub used_width: f64,
    pub used_height: f64,
    pub x_advance: f64,
    pub y_advance: f64,
}

impl RenderResult {
    /// Nothing painted, cursor stays put.
    pub const EMPTY: RenderResult = RenderResult {
        used_width: 0.0,
        used_height: 0.0,
        x_advance: 0.0,
        y_advance: 0.0,
    };

    /// A component stacked below the previous one.
    pub fn stacked(used_width: f64, used_height: f64) -> Self {
        Self {
            used_width,
            used_height,
            x_advance: 0.0,
            y_advance: used_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.used_width == 0.0 && self.used_height == 0.0
    }
}

/// Per-tile state shared by every component during one composition pass.
pub struct TileContext<'a> {
    /// Shared drawing surface; font and fill are shared mutable state.
    pub surface: &'a mut dyn Surface,
    pub dimensions: Dimensions,
    pub layout_type: LayoutType,
    /// Enabled components and side-by-side flags for `layout_type`.
    pub layout: &'a LayoutConfig,
    pub theme: &'a TileTheme,
    pub observer: &'a dyn RenderObserver,
    pub debug_outlines: bool,
}

impl TileContext<'_> {
    /// Strokes a labelled outline when debug outlines are on.
    pub fn outline(&mut self, label: &str, rect: Rect) {
        if self.debug_outlines {
            draw_debug_outline(&mut *self.surface, label, rect);
        }
    }

    pub fn trace(
        &self,
        component: &str,
        kind: DiagnosticKind,
        bounds: Rect,
        note: impl Into<String>,
    ) {
        self.observer
            .record(Diagnostic::new(component, kind, bounds, note));
    }
}

/// Per-component inputs derived from the event.
#[derive(Debug, Clone, Copy)]
pub struct ComponentProps<'a> {
    pub event: &'a EventRecord,
    /// Full "HH:MM - HH:MM" label.
    pub time_text: &'a str,
    /// Set when Time and Resource-Circles share a band.
    pub side_by_side: bool,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl<'a> ComponentProps<'a> {
    pub fn new(event: &'a EventRecord, time_text: &'a str) -> Self {
        Self {
            event,
            time_text,
            side_by_side: false,
            max_width: None,
            max_height: None,
        }
    }
}

/// A named tile component.
///
/// Implementations must paint only inside `region`, return
/// [`RenderResult::EMPTY`] when their data is missing, and produce identical
/// output for identical inputs.
pub trait ComponentRenderer: Send + Sync {
    fn name(&self) -> &str;

    fn render(
        &self,
        ctx: &mut TileContext<'_>,
        props: &ComponentProps<'_>,
        region: Rect,
    ) -> Result<RenderResult, RenderError>;
}

/// Vertical padding of a single-line text component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBand {
    pub padding_top: f64,
    pub padding_bottom: f64,
}

impl TextBand {
    pub const fn new(padding_top: f64, padding_bottom: f64) -> Self {
        Self {
            padding_top,
            padding_bottom,
        }
    }

    pub fn natural_height(&self) -> f64 {
        self.padding_top + LINE_HEIGHT + self.padding_bottom
    }

    /// Band height clamped to the available height and an optional cap.
    pub fn height(&self, available: f64, max_height: Option<f64>) -> f64 {
        let limit = max_height.map_or(available, |max| max.min(available));
        self.natural_height().min(limit).max(0.0)
    }

    /// Y of the text's vertical centre inside a band of `height` at `y`.
    pub fn text_center(&self, y: f64, height: f64) -> f64 {
        if height >= self.natural_height() {
            (y + self.padding_top + LINE_HEIGHT / 2.0).round()
        } else {
            (y + (height / 2.0).floor()).round()
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::diagnostics::NoopObserver;
    use crate::render::RecordingSurface;

    pub static NOOP: NoopObserver = NoopObserver;

    pub fn context<'a>(
        surface: &'a mut RecordingSurface,
        layout_type: LayoutType,
        layout: &'a LayoutConfig,
        theme: &'a TileTheme,
        width: f64,
        height: f64,
    ) -> TileContext<'a> {
        TileContext {
            surface,
            dimensions: Dimensions::new(width, height),
            layout_type,
            layout,
            theme,
            observer: &NOOP,
            debug_outlines: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_height_is_clamped() {
        let band = TextBand::new(4.0, 4.0);
        assert_eq!(band.natural_height(), 24.0);
        assert_eq!(band.height(100.0, None), 24.0);
        assert_eq!(band.height(18.0, None), 18.0);
        assert_eq!(band.height(100.0, Some(20.0)), 20.0);
        assert_eq!(band.height(-3.0, None), 0.0);
    }

    #[test]
    fn text_center_uses_padding_when_band_is_full() {
        let band = TextBand::new(5.0, 3.0);
        assert_eq!(band.text_center(10.0, 24.0), 23.0);
        assert_eq!(band.text_center(10.0, 15.0), 17.0);
    }

    #[test]
    fn dimensions_round_to_whole_pixels() {
        let dims = Dimensions::new(120.4, 59.6);
        assert_eq!(dims.width, 120.0);
        assert_eq!(dims.height, 60.0);
    }
}
