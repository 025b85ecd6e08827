//! Resources as a vertical list of dot + name rows.

use super::{ComponentProps, ComponentRenderer, RenderResult, TileContext};
use crate::diagnostics::DiagnosticKind;
use crate::error::RenderError;
use crate::layout::RESOURCE_LIST;
use crate::render::primitives::draw_truncated_text;
use crate::render::{Rect, StyleScope};

pub const ROW_HEIGHT: f64 = 24.0;
const DOT_RADIUS: f64 = 5.0;
const DOT_OFFSET: f64 = 5.0;
const NAME_OFFSET: f64 = 15.0;

/// The list is only drawn when more than this much height remains.
pub const MIN_LIST_HEIGHT: f64 = 20.0;

/// The "+N more" label sits this much closer to the last row.
const LABEL_LIFT: f64 = 4.0;
const LABEL_ROW_HEIGHT: f64 = ROW_HEIGHT - LABEL_LIFT;

/// Row decision for one resource list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPlan {
    pub max_rows: usize,
    /// Resource rows drawn.
    pub rows: usize,
    /// Resources without a row.
    pub remaining: usize,
    /// Whether the "+N more" label fits below the rows.
    pub show_label: bool,
}

/// Decides how many of `count` resources get a row in `available_height`.
///
/// When everything fits every resource gets a row. Otherwise the last row is
/// given to the "+N more" label, unless there is only a single row.
pub fn plan_list(count: usize, available_height: f64) -> ListPlan {
    let max_rows = if available_height.is_finite() && available_height > 0.0 {
        (available_height / ROW_HEIGHT).floor() as usize
    } else {
        0
    };

    let rows = if count <= max_rows {
        count
    } else if max_rows >= 2 {
        max_rows - 1
    } else {
        max_rows
    };
    let remaining = count - rows;
    let show_label = remaining > 0
        && rows > 0
        && rows as f64 * ROW_HEIGHT + LABEL_ROW_HEIGHT <= available_height;

    ListPlan {
        max_rows,
        rows,
        remaining,
        show_label,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceListRenderer;

impl ComponentRenderer for ResourceListRenderer {
    fn name(&self) -> &str {
        RESOURCE_LIST
    }

    fn render(
        &self,
        ctx: &mut TileContext<'_>,
        props: &ComponentProps<'_>,
        region: Rect,
    ) -> Result<RenderResult, RenderError> {
        let resources = &props.event.resources;
        if resources.is_empty() {
            ctx.trace(RESOURCE_LIST, DiagnosticKind::Skipped, region, "no resources");
            return Ok(RenderResult::EMPTY);
        }

        let available = props
            .max_height
            .map_or(region.height, |max| max.min(region.height));
        if available <= MIN_LIST_HEIGHT {
            ctx.trace(
                RESOURCE_LIST,
                DiagnosticKind::Skipped,
                region,
                format!("{}px left, need more than {}", available, MIN_LIST_HEIGHT),
            );
            return Ok(RenderResult::EMPTY);
        }

        let plan = plan_list(resources.len(), available);
        let theme = ctx.theme;
        let name_width = region.width - NAME_OFFSET;
        {
            let mut scope = StyleScope::new(&mut *ctx.surface);
            for (i, resource) in resources.iter().take(plan.rows).enumerate() {
                let row_y = region.y + i as f64 * ROW_HEIGHT;
                let center_y = (row_y + ROW_HEIGHT / 2.0).round();

                scope.fill_color(theme.resource_color(resource.id));
                scope.fill_circle(region.x + DOT_OFFSET, center_y, DOT_RADIUS);

                scope.fill_color(theme.text);
                draw_truncated_text(
                    &mut *scope,
                    &resource.name,
                    region.x + NAME_OFFSET,
                    center_y,
                    name_width,
                )?;
            }

            if plan.show_label {
                let label_row_y = region.y + plan.rows as f64 * ROW_HEIGHT;
                let label_y = (label_row_y + ROW_HEIGHT / 2.0 - LABEL_LIFT).round();
                let label = format!("+{} {}", plan.remaining, theme.more_label);
                scope.fill_color(theme.muted);
                draw_truncated_text(
                    &mut *scope,
                    &label,
                    region.x + NAME_OFFSET,
                    label_y,
                    name_width,
                )?;
            }
        }

        let drawn = plan.rows as f64 * ROW_HEIGHT
            + if plan.show_label {
                LABEL_ROW_HEIGHT
            } else {
                0.0
            };
        let height = drawn.min(available);
        let bounds = Rect::new(region.x, region.y, region.width, height);
        ctx.outline("ResourceList", bounds);
        ctx.trace(
            RESOURCE_LIST,
            DiagnosticKind::Decision,
            bounds,
            format!(
                "max_rows={} rows={} remaining={} label={}",
                plan.max_rows, plan.rows, plan.remaining, plan.show_label
            ),
        );

        Ok(RenderResult::stacked(region.width, height))
    }
}
