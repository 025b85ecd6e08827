//! Time range component.

use super::{ComponentProps, ComponentRenderer, RenderResult, TextBand, TileContext};
use crate::diagnostics::DiagnosticKind;
use crate::error::RenderError;
use crate::event::start_of_range;
use crate::layout::TIME;
use crate::render::primitives::draw_truncated_text;
use crate::render::{Rect, StyleScope, Surface};

/// Width cap when time shares a band with the resource circles.
pub const SIDE_BY_SIDE_MAX_WIDTH: f64 = 35.0;

/// Below this width only the start time is shown.
const NARROW_WIDTH: f64 = 100.0;
const NARROW_WIDTH_SIDE_BY_SIDE: f64 = 120.0;

/// Gap kept after the label inside the used width.
const TRAILING_MARGIN: f64 = 5.0;

const BAND: TextBand = TextBand::new(5.0, 3.0);

/// Label shown for a tile of `width`: the full range, or only its start on
/// narrow tiles.
pub fn display_time(range: &str, width: f64, side_by_side: bool) -> &str {
    if width < NARROW_WIDTH || (side_by_side && width < NARROW_WIDTH_SIDE_BY_SIDE) {
        start_of_range(range)
    } else {
        range
    }
}

/// Width the label may take: the explicit cap, or the side-by-side cap.
fn label_width(width: f64, side_by_side: bool, max_width: Option<f64>) -> f64 {
    match max_width {
        Some(cap) => width.min(cap),
        None if side_by_side => width.min(SIDE_BY_SIDE_MAX_WIDTH),
        None => width,
    }
}

/// Label the time component draws: [`display_time`], dropping to the start
/// time when the range would be cut by the width cap but the start fits.
pub fn time_label<'r>(
    surface: &dyn Surface,
    range: &'r str,
    width: f64,
    side_by_side: bool,
    max_width: Option<f64>,
) -> &'r str {
    let text = display_time(range, width, side_by_side);
    let start = start_of_range(text);
    let limit = label_width(width, side_by_side, max_width);
    if text != start
        && surface.measure_text(text) > limit
        && surface.measure_text(start) <= limit
    {
        start
    } else {
        text
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TimeRenderer;

impl ComponentRenderer for TimeRenderer {
    fn name(&self) -> &str {
        TIME
    }

    fn render(
        &self,
        ctx: &mut TileContext<'_>,
        props: &ComponentProps<'_>,
        region: Rect,
    ) -> Result<RenderResult, RenderError> {
        let height = BAND.height(region.height, props.max_height);
        if height <= 0.0 || region.width <= 0.0 {
            ctx.trace(TIME, DiagnosticKind::Skipped, region, "no space");
            return Ok(RenderResult::EMPTY);
        }

        let max_width = label_width(region.width, props.side_by_side, props.max_width);
        let text = time_label(
            &*ctx.surface,
            props.time_text,
            region.width,
            props.side_by_side,
            props.max_width,
        );

        let text_y = BAND.text_center(region.y, height);
        let metrics = {
            let mut scope = StyleScope::new(&mut *ctx.surface);
            scope.fill_color(ctx.theme.text);
            draw_truncated_text(&mut *scope, text, region.x, text_y, max_width)?
        };

        let used_width = max_width.min(metrics.width + TRAILING_MARGIN);
        let bounds = Rect::new(region.x, region.y, used_width, height);
        ctx.outline("Time", bounds);
        ctx.trace(
            TIME,
            DiagnosticKind::Rendered,
            bounds,
            if text == props.time_text {
                "full range"
            } else {
                "start time only"
            },
        );

        if props.side_by_side {
            Ok(RenderResult {
                used_width,
                used_height: height,
                x_advance: used_width,
                y_advance: 0.0,
            })
        } else {
            Ok(RenderResult::stacked(used_width, height))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::context;
    use crate::components::TileTheme;
    use crate::event::fixtures::event;
    use crate::layout::{LayoutConfig, LayoutType, RESOURCE_CIRCLES};
    use crate::render::RecordingSurface;

    #[test]
    fn narrow_tiles_show_start_only() {
        assert_eq!(display_time("09:00 - 10:00", 80.0, false), "09:00");
        assert_eq!(display_time("09:00 - 10:00", 100.0, false), "09:00 - 10:00");
        assert_eq!(display_time("09:00 - 10:00", 110.0, true), "09:00");
        assert_eq!(display_time("09:00 - 10:00", 120.0, true), "09:00 - 10:00");
    }

    #[test]
    fn stacked_time_draws_full_range() {
        let event = event(0);
        let range = event.time_range_text();
        let layout = LayoutConfig::new(&[TIME], false);
        let theme = TileTheme::default();
        let mut surface = RecordingSurface::default();
        let result = {
            let mut ctx = context(
                &mut surface,
                LayoutType::Standard,
                &layout,
                &theme,
                200.0,
                90.0,
            );
            let props = ComponentProps::new(&event, &range);
            TimeRenderer
                .render(&mut ctx, &props, Rect::new(0.0, 0.0, 200.0, 90.0))
                .unwrap()
        };

        assert_eq!(surface.texts(), vec!["09:00 - 10:00"]);
        assert_eq!(result.used_height, 24.0);
        assert_eq!(result.y_advance, 24.0);
        assert_eq!(result.x_advance, 0.0);
        assert!(result.used_width <= 200.0);
    }

    #[test]
    fn width_80_renders_start_time() {
        let event = event(0);
        let range = event.time_range_text();
        let layout = LayoutConfig::new(&[TIME], false);
        let theme = TileTheme::default();
        let mut surface = RecordingSurface::default();
        {
            let mut ctx = context(&mut surface, LayoutType::Medium, &layout, &theme, 80.0, 60.0);
            let props = ComponentProps::new(&event, &range);
            TimeRenderer
                .render(&mut ctx, &props, Rect::new(0.0, 0.0, 80.0, 60.0))
                .unwrap();
        }
        assert_eq!(surface.texts(), vec!["09:00"]);
    }

    #[test]
    fn side_by_side_caps_width_and_keeps_cursor_row() {
        let event = event(2);
        let range = event.time_range_text();
        let layout = LayoutConfig::new(&[TIME, RESOURCE_CIRCLES], true);
        let theme = TileTheme::default();
        let mut surface = RecordingSurface::default();
        let result = {
            let mut ctx = context(&mut surface, LayoutType::Medium, &layout, &theme, 160.0, 60.0);
            let mut props = ComponentProps::new(&event, &range);
            props.side_by_side = true;
            TimeRenderer
                .render(&mut ctx, &props, Rect::new(0.0, 0.0, 160.0, 60.0))
                .unwrap()
        };

        assert_eq!(surface.texts(), vec!["09:00"]);
        assert!(result.used_width <= SIDE_BY_SIDE_MAX_WIDTH);
        assert_eq!(result.x_advance, result.used_width);
        assert_eq!(result.y_advance, 0.0);
    }

    #[test]
    fn no_height_means_nothing_drawn() {
        let event = event(0);
        let range = event.time_range_text();
        let layout = LayoutConfig::new(&[TIME], false);
        let theme = TileTheme::default();
        let mut surface = RecordingSurface::default();
        let result = {
            let mut ctx = context(&mut surface, LayoutType::Minimal, &layout, &theme, 120.0, 20.0);
            let props = ComponentProps::new(&event, &range);
            TimeRenderer
                .render(&mut ctx, &props, Rect::new(0.0, 20.0, 120.0, 0.0))
                .unwrap()
        };
        assert!(result.is_empty());
        assert!(surface.ops().is_empty());
    }
}
