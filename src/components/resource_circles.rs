//! Resources as a row of colored circles with a "+N" overflow counter.

use super::{
    ComponentProps, ComponentRenderer, RenderResult, TileContext, DEFAULT_COMPONENT_HEIGHT,
};
use crate::diagnostics::DiagnosticKind;
use crate::error::RenderError;
use crate::layout::RESOURCE_CIRCLES;
use crate::render::primitives::{draw_remaining_count, measure};
use crate::render::{FontWeight, Rect, StyleScope};

pub const CIRCLE_RADIUS: f64 = 7.0;
const CIRCLE_DIAMETER: f64 = CIRCLE_RADIUS * 2.0;
const RIGHT_MARGIN: f64 = 5.0;

/// Widest counter label the reservation is measured for.
const COUNTER_SAMPLE: &str = "+99";
const COUNTER_BUFFER: f64 = 8.0;

/// Gap between circles, tightened as the row narrows.
pub fn circle_spacing(usable_width: f64) -> f64 {
    if usable_width < 100.0 {
        2.0
    } else if usable_width < 150.0 {
        3.0
    } else {
        4.0
    }
}

/// How many circles fit in `width` at `spacing`.
fn circles_in(width: f64, spacing: f64) -> usize {
    let fit = ((width + spacing) / (CIRCLE_DIAMETER + spacing)).floor();
    if fit.is_finite() && fit > 0.0 {
        fit as usize
    } else {
        0
    }
}

/// Packing decision for one circle row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePlan {
    pub spacing: f64,
    /// Circles that fit with no counter.
    pub max_full: usize,
    /// Circles that fit next to a counter, at least 1.
    pub max_with_counter: usize,
    pub circles: usize,
    /// Count shown in the "+N" counter.
    pub overflow: Option<usize>,
    pub note: &'static str,
}

impl CirclePlan {
    /// Resources represented by a circle or the counter.
    pub fn accounted(&self) -> usize {
        self.circles + self.overflow.unwrap_or(0)
    }
}

/// Decides how many of `count` resources get a circle in `usable_width`,
/// with `counter_space` reserved for the counter when not all fit.
pub fn plan_circles(count: usize, usable_width: f64, counter_space: f64) -> CirclePlan {
    let spacing = circle_spacing(usable_width);
    let max_full = circles_in(usable_width, spacing);
    let max_with_counter = circles_in((usable_width - counter_space).max(0.0), spacing).max(1);

    let mut plan = CirclePlan {
        spacing,
        max_full,
        max_with_counter,
        circles: count,
        overflow: None,
        note: "all fit",
    };
    if count <= max_full {
        return plan;
    }

    plan.circles = max_with_counter.min(count);
    match count - plan.circles {
        0 => {}
        1 => {
            // A "+1" counter takes more room than the circle it replaces.
            plan.circles = count;
            plan.note = "counter suppressed: remainder=1";
        }
        remaining => {
            plan.overflow = Some(remaining);
            plan.note = "counter shown";
        }
    }
    plan
}

/// Row of resource circles with an optional "+N" counter.
///
/// At least one circle is always drawn next to a counter, and a lone
/// remainder is drawn as a circle rather than "+1". In rows narrower than
/// that minimum, the last circle or the counter extends past
/// `region.right()`; every resource stays represented at the cost of the
/// region bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceCirclesRenderer;

impl ComponentRenderer for ResourceCirclesRenderer {
    fn name(&self) -> &str {
        RESOURCE_CIRCLES
    }

    fn render(
        &self,
        ctx: &mut TileContext<'_>,
        props: &ComponentProps<'_>,
        region: Rect,
    ) -> Result<RenderResult, RenderError> {
        let resources = &props.event.resources;
        if resources.is_empty() {
            ctx.trace(RESOURCE_CIRCLES, DiagnosticKind::Skipped, region, "no resources");
            return Ok(RenderResult::EMPTY);
        }

        let limit = props
            .max_height
            .map_or(region.height, |max| max.min(region.height));
        let height = DEFAULT_COMPONENT_HEIGHT.min(limit);
        let usable_width = region.width - RIGHT_MARGIN;
        if height <= 0.0 || usable_width <= CIRCLE_DIAMETER {
            ctx.trace(RESOURCE_CIRCLES, DiagnosticKind::Skipped, region, "no space");
            return Ok(RenderResult::EMPTY);
        }

        let counter_space = {
            let mut scope = StyleScope::new(&mut *ctx.surface);
            scope.weight(FontWeight::Semibold);
            measure(&*scope, COUNTER_SAMPLE)? + COUNTER_BUFFER + COUNTER_BUFFER
        };
        let plan = plan_circles(resources.len(), usable_width, counter_space);

        let center_y = if props.side_by_side {
            // Centre on the tile, kept inside the band.
            let top = region.y + CIRCLE_RADIUS;
            let bottom = (region.y + height - CIRCLE_RADIUS).max(top);
            (ctx.dimensions.height / 2.0).round().clamp(top, bottom)
        } else {
            (region.y + height / 2.0).round()
        };

        let theme = ctx.theme;
        let step = CIRCLE_DIAMETER + plan.spacing;
        {
            let mut scope = StyleScope::new(&mut *ctx.surface);
            for (i, resource) in resources.iter().take(plan.circles).enumerate() {
                let x = (region.x + i as f64 * step).round();
                scope.fill_color(theme.resource_color(resource.id));
                scope.fill_circle(x + CIRCLE_RADIUS, center_y, CIRCLE_RADIUS);
            }
            if let Some(remaining) = plan.overflow {
                let x = (region.x + plan.circles as f64 * step).round();
                draw_remaining_count(&mut *scope, remaining, x, center_y)?;
            }
        }

        let bounds = Rect::new(region.x, region.y, region.width, height);
        ctx.outline("ResourceCircles", bounds);
        ctx.trace(RESOURCE_CIRCLES, DiagnosticKind::Decision, bounds, plan.note);
        ctx.trace(
            RESOURCE_CIRCLES,
            DiagnosticKind::Rendered,
            bounds,
            format!(
                "circles={} overflow={} spacing={}",
                plan.circles,
                plan.overflow.unwrap_or(0),
                plan.spacing
            ),
        );

        Ok(RenderResult::stacked(region.width, height))
    }
}
