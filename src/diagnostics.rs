//! Render diagnostics.
//!
//! The composer and components report what they painted, skipped or decided to
//! an injected [`RenderObserver`]. The default observer discards everything.

use std::sync::Mutex;

use crate::render::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A component painted into `bounds`.
    Rendered,
    /// A component was skipped; `note` says why.
    Skipped,
    /// A layout decision inside a component.
    Decision,
}

/// One structured diagnostic record.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub component: String,
    pub kind: DiagnosticKind,
    pub bounds: Rect,
    pub note: String,
}

impl Diagnostic {
    pub fn new(
        component: impl Into<String>,
        kind: DiagnosticKind,
        bounds: Rect,
        note: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            kind,
            bounds,
            note: note.into(),
        }
    }
}

pub trait RenderObserver: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RenderObserver for NoopObserver {
    fn record(&self, _diagnostic: Diagnostic) {}
}

/// Forwards diagnostics to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl RenderObserver for LogObserver {
    fn record(&self, d: Diagnostic) {
        log::debug!(
            target: "tessel::trace",
            "{:?} component={} x={} y={} w={} h={} {}",
            d.kind,
            d.component,
            d.bounds.x,
            d.bounds.y,
            d.bounds.width,
            d.bounds.height,
            d.note
        );
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    records: Mutex<Vec<Diagnostic>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Notes recorded for `component`, in order.
    pub fn notes_for(&self, component: &str) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|d| d.component == component)
            .map(|d| d.note)
            .collect()
    }
}

impl RenderObserver for CollectingObserver {
    fn record(&self, diagnostic: Diagnostic) {
        if let Ok(mut guard) = self.records.lock() {
            guard.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_observer_keeps_order() {
        let observer = CollectingObserver::new();
        observer.record(Diagnostic::new(
            "time",
            DiagnosticKind::Rendered,
            Rect::default(),
            "full range",
        ));
        observer.record(Diagnostic::new(
            "resourceCircles",
            DiagnosticKind::Decision,
            Rect::default(),
            "counter suppressed: remainder=1",
        ));
        let records = observer.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind, DiagnosticKind::Decision);
        assert_eq!(
            observer.notes_for("resourceCircles"),
            vec!["counter suppressed: remainder=1"]
        );
    }
}
