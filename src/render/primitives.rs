//! Small paint helpers shared by the tile components.

use super::{Color, Font, FontWeight, Rect, StyleScope, Surface};
use crate::error::RenderError;

const ELLIPSIS: &str = "…";

/// Outline color for debug overlays.
pub const DEBUG_OUTLINE_COLOR: Color = (1.0, 0.0, 0.4, 0.6);

const DEBUG_LABEL_SIZE: f64 = 8.0;

/// Fill color of the "+N" overflow counter.
pub const COUNTER_COLOR: Color = (0.2, 0.2, 0.2, 1.0);

/// Horizontal offset from the slot origin to the counter's centre.
pub const COUNTER_CENTER_OFFSET: f64 = 8.0;

/// Result of drawing a possibly truncated string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Width of what was actually drawn.
    pub width: f64,
    pub truncated: bool,
    /// False when nothing fit, not even the ellipsis.
    pub drawn: bool,
}

/// Measures `text`, rejecting non-finite widths.
pub(crate) fn measure(surface: &dyn Surface, text: &str) -> Result<f64, RenderError> {
    let width = surface.measure_text(text);
    if width.is_finite() {
        Ok(width)
    } else {
        Err(RenderError::Measure {
            text: text.to_string(),
            width,
        })
    }
}

/// Draws `text` at (`x`, `y`), cutting it with an ellipsis so it fits `max_width`.
///
/// Uses the surface's current font and fill.
pub fn draw_truncated_text(
    surface: &mut dyn Surface,
    text: &str,
    x: f64,
    y: f64,
    max_width: f64,
) -> Result<TextMetrics, RenderError> {
    if text.is_empty() {
        return Ok(TextMetrics::default());
    }

    let full_width = measure(surface, text)?;
    if full_width <= max_width {
        surface.fill_text(text, x, y);
        return Ok(TextMetrics {
            width: full_width,
            truncated: false,
            drawn: true,
        });
    }

    let ellipsis_width = measure(surface, ELLIPSIS)?;
    if max_width < ellipsis_width {
        return Ok(TextMetrics {
            width: 0.0,
            truncated: true,
            drawn: false,
        });
    }
    let available = max_width - ellipsis_width;

    // Byte offsets of every char boundary, so prefixes never split a char.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    let mut low = 0usize;
    let mut high = boundaries.len() - 1;
    let mut best = 0usize;
    while low <= high {
        let mid = (low + high) / 2;
        if measure(surface, &text[..boundaries[mid]])? <= available {
            best = mid;
            low = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            high = mid - 1;
        }
    }

    let shown = format!("{}{}", &text[..boundaries[best]], ELLIPSIS);
    let width = measure(surface, &shown)?;
    surface.fill_text(&shown, x, y);
    Ok(TextMetrics {
        width,
        truncated: true,
        drawn: true,
    })
}

/// Draws a "+N" counter whose plus sign is centred on the slot at `x`.
///
/// Returns the width of the drawn label.
pub fn draw_remaining_count(
    surface: &mut dyn Surface,
    count: usize,
    x: f64,
    y: f64,
) -> Result<f64, RenderError> {
    let center_x = (x + COUNTER_CENTER_OFFSET).round();
    let center_y = y.round();

    let mut scope = StyleScope::new(surface);
    scope.weight(FontWeight::Bold).fill_color(COUNTER_COLOR);

    let count_text = count.to_string();
    let plus_width = measure(&*scope, "+")?;
    let count_width = measure(&*scope, &count_text)?;

    let plus_x = center_x - plus_width / 2.0;
    scope.fill_text("+", plus_x, center_y);
    scope.fill_text(&count_text, plus_x + plus_width, center_y + 1.0);

    Ok(plus_width + count_width)
}

/// Strokes a labelled bounding box for debug overlays.
pub fn draw_debug_outline(surface: &mut dyn Surface, label: &str, rect: Rect) {
    surface.stroke_rect(rect, DEBUG_OUTLINE_COLOR);

    let mut scope = StyleScope::new(surface);
    let font = scope.font();
    scope.set_font(Font {
        size: DEBUG_LABEL_SIZE,
        ..font
    });
    scope.fill_color(DEBUG_OUTLINE_COLOR);
    scope.fill_text(label, rect.x + 1.0, rect.y + DEBUG_LABEL_SIZE / 2.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, RecordingSurface};

    #[test]
    fn short_text_is_drawn_untouched() {
        let mut surface = RecordingSurface::default();
        let metrics = draw_truncated_text(&mut surface, "09:00", 0.0, 12.0, 100.0).unwrap();
        assert!(!metrics.truncated);
        assert!(metrics.drawn);
        assert_eq!(surface.texts(), vec!["09:00"]);
    }

    #[test]
    fn long_text_gets_ellipsis_within_width() {
        let mut surface = RecordingSurface::default();
        let text = "Indoor football training for the youth team";
        let metrics = draw_truncated_text(&mut surface, text, 0.0, 12.0, 80.0).unwrap();
        assert!(metrics.truncated);
        assert!(metrics.width <= 80.0);
        let drawn = surface.texts()[0];
        assert!(drawn.ends_with('…'));
        assert!(text.starts_with(drawn.trim_end_matches('…')));
    }

    #[test]
    fn nothing_drawn_when_ellipsis_does_not_fit() {
        let mut surface = RecordingSurface::default();
        let metrics = draw_truncated_text(&mut surface, "Gym", 0.0, 12.0, 3.0).unwrap();
        assert!(!metrics.drawn);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let mut surface = RecordingSurface::default();
        let metrics =
            draw_truncated_text(&mut surface, "Ærøskøbing idrætshal", 0.0, 12.0, 50.0).unwrap();
        assert!(metrics.truncated);
        assert!(surface.texts()[0].ends_with('…'));
    }

    #[test]
    fn empty_text_is_a_no_op() {
        let mut surface = RecordingSurface::default();
        let metrics = draw_truncated_text(&mut surface, "", 0.0, 12.0, 50.0).unwrap();
        assert_eq!(metrics, TextMetrics::default());
        assert!(surface.ops().is_empty());
    }

    struct BrokenMetrics(RecordingSurface);

    impl Surface for BrokenMetrics {
        fn font(&self) -> Font {
            self.0.font()
        }
        fn set_font(&mut self, font: Font) {
            self.0.set_font(font)
        }
        fn fill(&self) -> Color {
            self.0.fill()
        }
        fn set_fill(&mut self, color: Color) {
            self.0.set_fill(color)
        }
        fn measure_text(&self, _text: &str) -> f64 {
            f64::NAN
        }
        fn fill_text(&mut self, text: &str, x: f64, y: f64) {
            self.0.fill_text(text, x, y)
        }
        fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
            self.0.fill_circle(cx, cy, radius)
        }
        fn fill_rounded_rect(&mut self, rect: Rect, radius: f64) {
            self.0.fill_rounded_rect(rect, radius)
        }
        fn stroke_rect(&mut self, rect: Rect, color: Color) {
            self.0.stroke_rect(rect, color)
        }
    }

    #[test]
    fn non_finite_measurement_is_an_error() {
        let mut surface = BrokenMetrics(RecordingSurface::default());
        let err = draw_truncated_text(&mut surface, "Hall", 0.0, 0.0, 40.0).unwrap_err();
        assert!(matches!(err, RenderError::Measure { .. }));
    }

    #[test]
    fn remaining_count_restores_font() {
        let mut surface = RecordingSurface::default();
        let width = draw_remaining_count(&mut surface, 4, 40.0, 12.0).unwrap();
        assert!(width > 0.0);
        assert_eq!(surface.font().weight, FontWeight::Normal);
        assert_eq!(surface.texts(), vec!["+", "4"]);
        match &surface.ops()[1] {
            DrawOp::Text { y, font, .. } => {
                assert_eq!(*y, 13.0);
                assert_eq!(font.weight, FontWeight::Bold);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn debug_outline_strokes_rect_and_labels_it() {
        let mut surface = RecordingSurface::default();
        draw_debug_outline(&mut surface, "Title", Rect::new(0.0, 0.0, 100.0, 24.0));
        assert!(matches!(surface.ops()[0], DrawOp::StrokeRect { .. }));
        assert_eq!(surface.texts(), vec!["Title"]);
        assert_eq!(surface.font().size, 12.0);
    }
}
