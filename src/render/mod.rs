//! Drawing surface abstraction used by every tile component.
//!
//! A [`Surface`] carries mutable font and fill state shared by all components
//! painted during one tile pass. Components that change that state go through
//! [`StyleScope`], which puts the previous font and fill back when it drops.

mod buffered;
pub mod primitives;
mod recording;

pub use buffered::BufferedSurface;
pub use recording::{DrawOp, RecordingSurface};

use std::ops::{Deref, DerefMut};

use serde::Serialize;

/// RGBA color tuple, components in 0.0-1.0.
pub type Color = (f64, f64, f64, f64);

/// Body text color used when nothing else is configured.
pub const DEFAULT_TEXT_COLOR: Color = (0.0, 0.0, 0.0, 1.0);

/// Font weight variants used by tile components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Semibold,
    Bold,
}

impl FontWeight {
    /// CSS-style numeric weight.
    pub fn css_weight(self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::Semibold => 600,
            Self::Bold => 700,
        }
    }
}

/// Font selection held by a surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub weight: FontWeight,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::Normal,
        }
    }

    /// Returns a copy of this font with a different weight.
    pub fn with_weight(&self, weight: FontWeight) -> Self {
        Self {
            family: self.family.clone(),
            size: self.size,
            weight,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Roboto", 12.0)
    }
}

/// Axis-aligned rectangle in tile pixels, origin at the tile's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The drawing context a tile is painted into.
///
/// Text is drawn with a vertically centred baseline: `y` passed to
/// [`Surface::fill_text`] is the middle of the text line.
pub trait Surface {
    /// Current font.
    fn font(&self) -> Font;

    fn set_font(&mut self, font: Font);

    /// Current fill color, used by text and shape fills.
    fn fill(&self) -> Color;

    fn set_fill(&mut self, color: Color);

    /// Width in pixels of `text` in the current font.
    fn measure_text(&self, text: &str) -> f64;

    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64);

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64);

    /// Strokes the outline of `rect` with `color` without touching the fill state.
    fn stroke_rect(&mut self, rect: Rect, color: Color);
}

/// Scoped font/fill override on a [`Surface`].
///
/// Captures the surface's font and fill on creation and restores both when
/// dropped, including during unwinding.
pub struct StyleScope<'s> {
    surface: &'s mut dyn Surface,
    saved_font: Font,
    saved_fill: Color,
}

impl<'s> StyleScope<'s> {
    pub fn new(surface: &'s mut dyn Surface) -> Self {
        let saved_font = surface.font();
        let saved_fill = surface.fill();
        Self {
            surface,
            saved_font,
            saved_fill,
        }
    }

    /// Switches to the saved font with a different weight.
    pub fn weight(&mut self, weight: FontWeight) -> &mut Self {
        let font = self.saved_font.with_weight(weight);
        self.surface.set_font(font);
        self
    }

    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.surface.set_fill(color);
        self
    }
}

impl<'s> Deref for StyleScope<'s> {
    type Target = dyn Surface + 's;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'s> DerefMut for StyleScope<'s> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for StyleScope<'_> {
    fn drop(&mut self) {
        self.surface.set_font(self.saved_font.clone());
        self.surface.set_fill(self.saved_fill);
    }
}
