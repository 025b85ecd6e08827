//! Event kind badge.
//!
//! Not a built-in: register it with [`register_component`](super::register_component)
//! at startup, then add `badge` to a layout's component list.

use super::{ComponentProps, ComponentRenderer, RenderResult, TileContext};
use crate::diagnostics::DiagnosticKind;
use crate::error::RenderError;
use crate::render::primitives::{draw_truncated_text, measure};
use crate::render::{Font, Rect, StyleScope};

pub const BADGE: &str = "badge";

const PILL_HEIGHT: f64 = 16.0;
const MARGIN_Y: f64 = 2.0;
const PADDING_X: f64 = 6.0;
/// Badge text size relative to the body font.
const FONT_SCALE: f64 = 0.85;

/// Rounded pill showing the event kind ("Booking", "Allocation", ...).
#[derive(Debug, Default, Clone, Copy)]
pub struct BadgeRenderer;

impl ComponentRenderer for BadgeRenderer {
    fn name(&self) -> &str {
        BADGE
    }

    fn render(
        &self,
        ctx: &mut TileContext<'_>,
        props: &ComponentProps<'_>,
        region: Rect,
    ) -> Result<RenderResult, RenderError> {
        let limit = props
            .max_height
            .map_or(region.height, |max| max.min(region.height));
        let height = (PILL_HEIGHT + MARGIN_Y * 2.0).min(limit);
        if height < PILL_HEIGHT || region.width <= PADDING_X * 2.0 {
            ctx.trace(BADGE, DiagnosticKind::Skipped, region, "no space");
            return Ok(RenderResult::EMPTY);
        }

        let theme = ctx.theme;
        let (background, foreground) = theme.badge_colors(props.event.kind);
        let label = props.event.kind.label();
        let pill_top = region.y + ((height - PILL_HEIGHT) / 2.0).floor();

        let pill = {
            let mut scope = StyleScope::new(&mut *ctx.surface);
            let font = scope.font();
            scope.set_font(Font {
                size: font.size * FONT_SCALE,
                ..font
            });

            let text_width = measure(&*scope, label)?;
            let pill = Rect::new(
                region.x,
                pill_top,
                (text_width + PADDING_X * 2.0).min(region.width),
                PILL_HEIGHT,
            );

            scope.fill_color(background);
            scope.fill_rounded_rect(pill, PILL_HEIGHT / 2.0);
            scope.fill_color(foreground);
            draw_truncated_text(
                &mut *scope,
                label,
                pill.x + PADDING_X,
                (pill.y + PILL_HEIGHT / 2.0).round(),
                pill.width - PADDING_X * 2.0,
            )?;
            pill
        };

        let bounds = Rect::new(region.x, region.y, pill.width, height);
        ctx.outline("Badge", bounds);
        ctx.trace(BADGE, DiagnosticKind::Rendered, bounds, label);
        Ok(RenderResult::stacked(pill.width, height))
    }
}
