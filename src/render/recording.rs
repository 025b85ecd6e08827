//! In-memory surface that records paint operations.
//!
//! Text is measured from a fixed advance table instead of a font rasterizer so
//! that tile layout comes out identical on every machine.

use std::fmt::Write as _;

use serde::Serialize;

use super::{Color, Font, FontWeight, Rect, Surface, DEFAULT_TEXT_COLOR};

/// A single recorded paint operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        text: String,
        x: f64,
        y: f64,
        font: Font,
        fill: Color,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Color,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        fill: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
    },
}

impl DrawOp {
    /// Paints this operation onto `surface` with the font and fill it was
    /// recorded with. Leaves the surface's font and fill changed.
    pub fn replay(&self, surface: &mut dyn Surface) {
        match self {
            DrawOp::Text {
                text,
                x,
                y,
                font,
                fill,
            } => {
                surface.set_font(font.clone());
                surface.set_fill(*fill);
                surface.fill_text(text, *x, *y);
            }
            DrawOp::Circle {
                cx,
                cy,
                radius,
                fill,
            } => {
                surface.set_fill(*fill);
                surface.fill_circle(*cx, *cy, *radius);
            }
            DrawOp::RoundedRect { rect, radius, fill } => {
                surface.set_fill(*fill);
                surface.fill_rounded_rect(*rect, *radius);
            }
            DrawOp::StrokeRect { rect, color } => surface.stroke_rect(*rect, *color),
        }
    }
}

/// Surface that keeps every paint operation in order.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    font: Font,
    fill: Color,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(font: Font) -> Self {
        Self {
            font,
            fill: DEFAULT_TEXT_COLOR,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Texts drawn so far, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of filled circles drawn so far.
    pub fn circle_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Renders the recorded operations as a standalone SVG document.
    pub fn to_svg(&self, width: f64, height: f64) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        for op in &self.ops {
            let _ = match op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    font,
                    fill,
                } => writeln!(
                    svg,
                    r#"  <text x="{x}" y="{y}" dominant-baseline="middle" font-family="{}" font-size="{}" font-weight="{}" fill="{}">{}</text>"#,
                    escape_xml(&font.family),
                    font.size,
                    font.weight.css_weight(),
                    css_color(*fill),
                    escape_xml(text)
                ),
                DrawOp::Circle {
                    cx,
                    cy,
                    radius,
                    fill,
                } => writeln!(
                    svg,
                    r#"  <circle cx="{cx}" cy="{cy}" r="{radius}" fill="{}"/>"#,
                    css_color(*fill)
                ),
                DrawOp::RoundedRect { rect, radius, fill } => writeln!(
                    svg,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{radius}" fill="{}"/>"#,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    css_color(*fill)
                ),
                DrawOp::StrokeRect { rect, color } => writeln!(
                    svg,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    css_color(*color)
                ),
            };
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(Font::default())
    }
}

impl Surface for RecordingSurface {
    fn font(&self) -> Font {
        self.font.clone()
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn fill(&self) -> Color {
        self.fill
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn measure_text(&self, text: &str) -> f64 {
        let ems: f64 = text.chars().map(glyph_advance).sum();
        ems * self.font.size * weight_factor(self.font.weight)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font: self.font.clone(),
            fill: self.fill,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        self.ops.push(DrawOp::Circle {
            cx,
            cy,
            radius,
            fill: self.fill,
        });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64) {
        self.ops.push(DrawOp::RoundedRect {
            rect,
            radius,
            fill: self.fill,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::StrokeRect { rect, color });
    }
}

/// Horizontal advance of a glyph in ems, approximating a humanist sans.
fn glyph_advance(c: char) -> f64 {
    match c {
        '0'..='9' => 0.56,
        ' ' | '.' | ',' => 0.25,
        ':' | ';' => 0.26,
        '-' => 0.33,
        '–' => 0.5,
        '+' => 0.57,
        '…' => 0.8,
        'i' | 'l' | 'j' | 'I' | '!' | '\'' | '|' => 0.24,
        'f' | 't' | 'r' => 0.34,
        'm' | 'w' | 'M' | 'W' => 0.85,
        c if c.is_uppercase() => 0.65,
        _ => 0.52,
    }
}

fn weight_factor(weight: FontWeight) -> f64 {
    match weight {
        FontWeight::Normal => 1.0,
        FontWeight::Semibold => 1.04,
        FontWeight::Bold => 1.07,
    }
}

fn css_color(color: Color) -> String {
    format!(
        "rgba({},{},{},{})",
        (color.0 * 255.0).round() as u8,
        (color.1 * 255.0).round() as u8,
        (color.2 * 255.0).round() as u8,
        color.3
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_digits_with_fixed_advance() {
        let surface = RecordingSurface::default();
        assert!((surface.measure_text("09:00") - 30.0).abs() < 1e-9);
    }

    #[test]
    fn heavier_weights_measure_wider() {
        let mut surface = RecordingSurface::default();
        let normal = surface.measure_text("Badminton");
        surface.set_font(Font::default().with_weight(FontWeight::Semibold));
        assert!(surface.measure_text("Badminton") > normal);
    }

    #[test]
    fn records_ops_with_current_fill() {
        let mut surface = RecordingSurface::default();
        surface.set_fill((1.0, 0.0, 0.0, 1.0));
        surface.fill_circle(7.0, 12.0, 7.0);
        surface.fill_text("Hall A", 0.0, 12.0);
        assert_eq!(surface.circle_count(), 1);
        assert_eq!(surface.texts(), vec!["Hall A"]);
        match &surface.ops()[0] {
            DrawOp::Circle { fill, .. } => assert_eq!(*fill, (1.0, 0.0, 0.0, 1.0)),
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn svg_escapes_text() {
        let mut surface = RecordingSurface::default();
        surface.fill_text("A & B <C>", 1.0, 2.0);
        let svg = surface.to_svg(100.0, 30.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("A &amp; B &lt;C&gt;"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
