//! Event title component.

use super::{ComponentProps, ComponentRenderer, RenderResult, TextBand, TileContext};
use crate::diagnostics::DiagnosticKind;
use crate::error::RenderError;
use crate::layout::{LayoutType, TITLE};
use crate::render::primitives::draw_truncated_text;
use crate::render::{FontWeight, Rect, StyleScope};

const BAND: TextBand = TextBand::new(4.0, 4.0);

/// Smallest layout the title is drawn in.
pub const MIN_TITLE_LAYOUT: LayoutType = LayoutType::Medium;

/// Semibold single-line title, truncated to the region width.
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleRenderer;

impl ComponentRenderer for TitleRenderer {
    fn name(&self) -> &str {
        TITLE
    }

    fn render(
        &self,
        ctx: &mut TileContext<'_>,
        props: &ComponentProps<'_>,
        region: Rect,
    ) -> Result<RenderResult, RenderError> {
        if ctx.layout_type < MIN_TITLE_LAYOUT {
            ctx.trace(
                TITLE,
                DiagnosticKind::Skipped,
                region,
                format!("layout {} is below {}", ctx.layout_type, MIN_TITLE_LAYOUT),
            );
            return Ok(RenderResult::EMPTY);
        }

        let height = BAND.height(region.height, props.max_height);
        if height <= 0.0 || region.width <= 0.0 {
            ctx.trace(TITLE, DiagnosticKind::Skipped, region, "no space");
            return Ok(RenderResult::EMPTY);
        }

        let theme = ctx.theme;
        let title = props.event.title_or(&theme.untitled_label);
        let text_y = BAND.text_center(region.y, height);
        let metrics = {
            let mut scope = StyleScope::new(&mut *ctx.surface);
            scope.weight(FontWeight::Semibold).fill_color(theme.text);
            draw_truncated_text(&mut *scope, title, region.x.round(), text_y, region.width)?
        };

        let bounds = Rect::new(region.x, region.y, region.width, height);
        ctx.outline("Title", bounds);
        if metrics.truncated {
            ctx.trace(TITLE, DiagnosticKind::Decision, bounds, "truncated");
        }
        ctx.trace(TITLE, DiagnosticKind::Rendered, bounds, "");

        Ok(RenderResult::stacked(region.width, height))
    }
}
