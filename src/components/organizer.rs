//! Organizer name component.

use super::{ComponentProps, ComponentRenderer, RenderResult, TextBand, TileContext};
use crate::diagnostics::DiagnosticKind;
use crate::error::RenderError;
use crate::layout::ORGANIZER;
use crate::render::primitives::draw_truncated_text;
use crate::render::{Rect, StyleScope};

const BAND: TextBand = TextBand::new(3.0, 5.0);

#[derive(Debug, Default, Clone, Copy)]
pub struct OrganizerRenderer;

impl ComponentRenderer for OrganizerRenderer {
    fn name(&self) -> &str {
        ORGANIZER
    }

    fn render(
        &self,
        ctx: &mut TileContext<'_>,
        props: &ComponentProps<'_>,
        region: Rect,
    ) -> Result<RenderResult, RenderError> {
        let Some(organizer) = props.event.organizer() else {
            ctx.trace(ORGANIZER, DiagnosticKind::Skipped, region, "no organizer");
            return Ok(RenderResult::EMPTY);
        };

        let height = BAND.height(region.height, props.max_height);
        if height <= 0.0 || region.width <= 0.0 {
            ctx.trace(ORGANIZER, DiagnosticKind::Skipped, region, "no space");
            return Ok(RenderResult::EMPTY);
        }

        let text_y = BAND.text_center(region.y, height);
        {
            let mut scope = StyleScope::new(&mut *ctx.surface);
            scope.fill_color(ctx.theme.text);
            draw_truncated_text(&mut *scope, organizer, region.x, text_y, region.width)?;
        }

        let bounds = Rect::new(region.x, region.y, region.width, height);
        ctx.outline("Organizer", bounds);
        ctx.trace(ORGANIZER, DiagnosticKind::Rendered, bounds, "");
        Ok(RenderResult::stacked(region.width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::context;
    use crate::components::TileTheme;
    use crate::event::fixtures::event;
    use crate::event::EventRecord;
    use crate::layout::{LayoutConfig, LayoutType};
    use crate::render::RecordingSurface;

    fn render_organizer(surface: &mut RecordingSurface, event: &EventRecord) -> RenderResult {
        let range = event.time_range_text();
        let layout = LayoutConfig::new(&[ORGANIZER], false);
        let theme = TileTheme::default();
        let mut ctx = context(surface, LayoutType::Standard, &layout, &theme, 160.0, 90.0);
        let props = ComponentProps::new(event, &range);
        OrganizerRenderer
            .render(&mut ctx, &props, Rect::new(0.0, 48.0, 160.0, 42.0))
            .unwrap()
    }

    #[test]
    fn renders_organizer_below_cursor() {
        let mut surface = RecordingSurface::default();
        let result = render_organizer(&mut surface, &event(0));
        assert_eq!(result, RenderResult::stacked(160.0, 24.0));
        assert_eq!(surface.texts(), vec!["Nordre IL"]);
    }

    #[test]
    fn missing_organizer_has_zero_advance() {
        let mut surface = RecordingSurface::default();
        let mut event = event(0);
        event.organizer = None;
        let result = render_organizer(&mut surface, &event);
        assert_eq!(result, RenderResult::EMPTY);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn height_is_clamped_to_remaining_space() {
        let event = event(0);
        let range = event.time_range_text();
        let layout = LayoutConfig::new(&[ORGANIZER], false);
        let theme = TileTheme::default();
        let mut surface = RecordingSurface::default();
        let mut ctx = context(&mut surface, LayoutType::Medium, &layout, &theme, 160.0, 60.0);
        let props = ComponentProps::new(&event, &range);
        let result = OrganizerRenderer
            .render(&mut ctx, &props, Rect::new(0.0, 48.0, 160.0, 12.0))
            .unwrap();
        assert_eq!(result.used_height, 12.0);
        assert_eq!(result.y_advance, 12.0);
    }
}
