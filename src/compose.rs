//! Tile composition.
//!
//! [`TileComposer`] paints one event tile in a single top-to-bottom pass: it
//! resolves the layout type, runs Time first, optionally pairs it with the
//! resource circles in one band, then runs the remaining enabled components in
//! configured order, moving a vertical cursor by each component's `y_advance`.
//!
//! A component that is not registered, returns an error or panics is recorded
//! as skipped; the rest of the tile still renders.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;

use crate::components::{
    time_label, ComponentProps, ComponentRegistry, Dimensions, RenderResult, TileContext,
    TileTheme,
};
use crate::config::Config;
use crate::diagnostics::{DiagnosticKind, LogObserver, NoopObserver, RenderObserver};
use crate::error::RenderError;
use crate::event::EventRecord;
use crate::layout::{
    LayoutConfig, LayoutProfiles, LayoutType, RESOURCE_CIRCLES, RESOURCE_LIST, TIME,
};
use crate::render::{BufferedSurface, Rect, StyleScope, Surface};

/// A component that ran, with the region it was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentEntry {
    pub name: String,
    pub region: Rect,
    pub result: RenderResult,
}

/// A component that did not run or failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedComponent {
    pub name: String,
    pub reason: String,
}

/// What one composition pass did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileOutcome {
    pub layout_type: LayoutType,
    /// Time label chosen for the tile; reusable for tooltips.
    pub display_time: String,
    pub entries: Vec<ComponentEntry>,
    pub skipped: Vec<SkippedComponent>,
    pub final_cursor_y: f64,
}

impl TileOutcome {
    pub fn entry(&self, name: &str) -> Option<&ComponentEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Render results in execution order.
    pub fn results(&self) -> Vec<RenderResult> {
        self.entries.iter().map(|entry| entry.result).collect()
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.skipped.iter().any(|skipped| skipped.name == name)
    }
}

fn is_resource_renderer(name: &str) -> bool {
    name == RESOURCE_CIRCLES || name == RESOURCE_LIST
}

/// Time first, then the other components in configured order.
fn stage_order(layout: &LayoutConfig) -> Vec<&str> {
    let mut order = Vec::with_capacity(layout.components.len());
    if layout.has(TIME) {
        order.push(TIME);
    }
    order.extend(
        layout
            .components
            .iter()
            .map(String::as_str)
            .filter(|name| *name != TIME),
    );
    order
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub struct TileComposer {
    registry: ComponentRegistry,
    profiles: LayoutProfiles,
    theme: TileTheme,
    observer: Arc<dyn RenderObserver>,
    debug_outlines: bool,
}

impl TileComposer {
    pub fn new(registry: ComponentRegistry, profiles: LayoutProfiles, theme: TileTheme) -> Self {
        Self {
            registry,
            profiles,
            theme,
            observer: Arc::new(NoopObserver),
            debug_outlines: false,
        }
    }

    /// Composer with the config's layouts, theme and debug settings.
    pub fn from_config(config: &Config, registry: ComponentRegistry) -> Self {
        let composer = Self::new(
            registry,
            config.layout_profiles(),
            TileTheme::from_config(&config.tile),
        )
        .with_debug_outlines(config.debug.outlines);

        if config.debug.trace {
            composer.with_observer(Arc::new(LogObserver))
        } else {
            composer
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RenderObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Strokes each component's bounds. Layout is unaffected.
    pub fn with_debug_outlines(mut self, enabled: bool) -> Self {
        self.debug_outlines = enabled;
        self
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn profiles(&self) -> &LayoutProfiles {
        &self.profiles
    }

    pub fn theme(&self) -> &TileTheme {
        &self.theme
    }

    /// Paints `event` into a tile of `dimensions`, picking the layout from the
    /// event's override or the tile height.
    pub fn compose(
        &self,
        surface: &mut dyn Surface,
        event: &EventRecord,
        dimensions: Dimensions,
    ) -> TileOutcome {
        let layout_type = event
            .layout_type
            .unwrap_or_else(|| LayoutType::from_height(dimensions.height));
        self.compose_with_layout(surface, event, dimensions, layout_type)
    }

    pub fn compose_with_layout(
        &self,
        surface: &mut dyn Surface,
        event: &EventRecord,
        dimensions: Dimensions,
        layout_type: LayoutType,
    ) -> TileOutcome {
        let layout = self.profiles.get(layout_type);
        let range = event.time_range_text();

        // Every pass starts from the theme's font and text color; the
        // caller's style is put back when the pass ends.
        let mut base = StyleScope::new(surface);
        base.set_font(self.theme.font.clone());
        base.set_fill(self.theme.text);
        let surface: &mut dyn Surface = &mut *base;

        let resource_renderer = layout
            .components
            .iter()
            .map(String::as_str)
            .find(|name| is_resource_renderer(name));
        let paired = layout.pairs_time_with_circles()
            && resource_renderer == Some(RESOURCE_CIRCLES)
            && !event.resources.is_empty();

        let display = if layout.has(TIME) {
            time_label(&*surface, &range, dimensions.width, paired, None).to_string()
        } else {
            event.start_time_text()
        };

        log::debug!(
            "Composing event {} as {} ({}x{}), components {:?}",
            event.id,
            layout_type,
            dimensions.width,
            dimensions.height,
            layout.components
        );

        let mut outcome = TileOutcome {
            layout_type,
            display_time: display,
            entries: Vec::new(),
            skipped: Vec::new(),
            final_cursor_y: 0.0,
        };
        let mut ctx = TileContext {
            surface,
            dimensions,
            layout_type,
            layout,
            theme: &self.theme,
            observer: &*self.observer,
            debug_outlines: self.debug_outlines,
        };

        let width = dimensions.width;
        let remaining = |cursor_y: f64| (dimensions.height - cursor_y).max(0.0);
        let base_props = ComponentProps::new(event, &range);
        let mut cursor_y = 0.0;
        let mut circles_painted = false;

        for name in stage_order(layout) {
            if is_resource_renderer(name) && resource_renderer != Some(name) {
                let reason = format!(
                    "{} already handles resources in the {} layout",
                    resource_renderer.unwrap_or_default(),
                    layout_type
                );
                log::warn!("Skipping component '{}': {}", name, reason);
                self.skip(&ctx, &mut outcome, name, Rect::default(), reason);
                continue;
            }
            if name == RESOURCE_CIRCLES && circles_painted {
                continue;
            }

            if name == TIME && paired {
                let band_y = cursor_y;
                let band_height = remaining(band_y);
                let mut props = base_props;
                props.side_by_side = true;

                let time = self
                    .run_stage(
                        &mut ctx,
                        &mut outcome,
                        TIME,
                        &props,
                        Rect::new(0.0, band_y, width, band_height),
                    )
                    .unwrap_or(RenderResult::EMPTY);
                let offset = time.x_advance;
                let circles = self
                    .run_stage(
                        &mut ctx,
                        &mut outcome,
                        RESOURCE_CIRCLES,
                        &props,
                        Rect::new(offset, band_y, (width - offset).max(0.0), band_height),
                    )
                    .unwrap_or(RenderResult::EMPTY);
                circles_painted = true;

                cursor_y = band_y + time.used_height.max(circles.y_advance);
                continue;
            }

            let region = Rect::new(0.0, cursor_y, width, remaining(cursor_y));
            let result = self.run_stage(&mut ctx, &mut outcome, name, &base_props, region);
            cursor_y += result.map_or(0.0, |result| result.y_advance);
        }

        outcome.final_cursor_y = cursor_y;
        outcome
    }

    /// Runs one component, turning a missing renderer, an error or a panic
    /// into a skipped entry. Paint is buffered and reaches the surface only
    /// when the component succeeds.
    fn run_stage(
        &self,
        ctx: &mut TileContext<'_>,
        outcome: &mut TileOutcome,
        name: &str,
        props: &ComponentProps<'_>,
        region: Rect,
    ) -> Option<RenderResult> {
        let Some(renderer) = self.registry.get(name) else {
            log::warn!("Component '{}' is not registered; skipping", name);
            self.skip(ctx, outcome, name, region, "not registered".to_string());
            return None;
        };

        let mut buffer = BufferedSurface::new(&mut *ctx.surface);
        let mut stage = TileContext {
            surface: &mut buffer,
            dimensions: ctx.dimensions,
            layout_type: ctx.layout_type,
            layout: ctx.layout,
            theme: ctx.theme,
            observer: ctx.observer,
            debug_outlines: ctx.debug_outlines,
        };

        let attempt =
            catch_unwind(AssertUnwindSafe(|| renderer.render(&mut stage, props, region)));
        let error = match attempt {
            Ok(Ok(result)) => {
                buffer.commit();
                outcome.entries.push(ComponentEntry {
                    name: name.to_string(),
                    region,
                    result,
                });
                return Some(result);
            }
            Ok(Err(err)) => err,
            Err(payload) => RenderError::Panicked(panic_message(payload.as_ref())),
        };

        log::debug!(
            "Discarding {} paint op(s) from '{}'",
            buffer.pending().len(),
            name
        );
        drop(buffer);
        log::warn!("Component '{}' failed: {}", name, error);
        self.skip(ctx, outcome, name, region, error.to_string());
        None
    }

    fn skip(
        &self,
        ctx: &TileContext<'_>,
        outcome: &mut TileOutcome,
        name: &str,
        region: Rect,
        reason: String,
    ) {
        ctx.trace(name, DiagnosticKind::Skipped, region, reason.clone());
        outcome.skipped.push(SkippedComponent {
            name: name.to_string(),
            reason,
        });
    }
}

impl Default for TileComposer {
    fn default() -> Self {
        Self::new(
            ComponentRegistry::with_builtins(),
            LayoutProfiles::default(),
            TileTheme::default(),
        )
    }
}
