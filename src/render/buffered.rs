//! Surface proxy that holds back paint until a component has finished.

use super::{Color, DrawOp, Font, Rect, Surface};

/// Wraps a surface so that paint operations are queued instead of drawn.
///
/// Font, fill and text measurement go straight to the inner surface, so a
/// component sees the same state it would without the proxy. Queued
/// operations reach the inner surface only through [`BufferedSurface::commit`];
/// dropping the buffer discards them.
pub struct BufferedSurface<'s> {
    inner: &'s mut dyn Surface,
    pending: Vec<DrawOp>,
}

impl<'s> BufferedSurface<'s> {
    pub fn new(inner: &'s mut dyn Surface) -> Self {
        Self {
            inner,
            pending: Vec::new(),
        }
    }

    pub fn pending(&self) -> &[DrawOp] {
        &self.pending
    }

    /// Paints every queued operation onto the inner surface, then puts the
    /// inner font and fill back as they were before the replay.
    pub fn commit(self) {
        let font = self.inner.font();
        let fill = self.inner.fill();
        for op in &self.pending {
            op.replay(&mut *self.inner);
        }
        self.inner.set_font(font);
        self.inner.set_fill(fill);
    }
}

impl Surface for BufferedSurface<'_> {
    fn font(&self) -> Font {
        self.inner.font()
    }

    fn set_font(&mut self, font: Font) {
        self.inner.set_font(font);
    }

    fn fill(&self) -> Color {
        self.inner.fill()
    }

    fn set_fill(&mut self, color: Color) {
        self.inner.set_fill(color);
    }

    fn measure_text(&self, text: &str) -> f64 {
        self.inner.measure_text(text)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.pending.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font: self.inner.font(),
            fill: self.inner.fill(),
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        self.pending.push(DrawOp::Circle {
            cx,
            cy,
            radius,
            fill: self.inner.fill(),
        });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64) {
        self.pending.push(DrawOp::RoundedRect {
            rect,
            radius,
            fill: self.inner.fill(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.pending.push(DrawOp::StrokeRect { rect, color });
    }
}
