//! Calendar event records consumed by the tile renderer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::layout::LayoutType;

/// Format used for tile time labels.
pub const TIME_FORMAT: &str = "%H:%M";

/// Separator between start and end in a time range label.
pub const TIME_RANGE_SEPARATOR: &str = " - ";

/// A bookable resource (hall, court, room) attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub name: String,
}

/// What kind of calendar entry an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Event,
    Booking,
    Allocation,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Event => "Event",
            Self::Booking => "Booking",
            Self::Allocation => "Allocation",
        }
    }
}

/// One calendar entry as delivered by the calendar data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: u64,
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    /// Real start when the calendar clips the tile to the visible range.
    #[serde(default)]
    pub actual_from: Option<NaiveDateTime>,
    /// Real end when the calendar clips the tile to the visible range.
    #[serde(default)]
    pub actual_to: Option<NaiveDateTime>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub kind: EventKind,
    /// Forces a layout instead of deriving it from the tile height.
    #[serde(default)]
    pub layout_type: Option<LayoutType>,
}

impl EventRecord {
    pub fn new(id: u64, from: NaiveDateTime, to: NaiveDateTime, title: impl Into<String>) -> Self {
        Self {
            id,
            from,
            to,
            actual_from: None,
            actual_to: None,
            title: title.into(),
            organizer: None,
            resources: Vec::new(),
            kind: EventKind::default(),
            layout_type: None,
        }
    }

    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }

    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    fn display_start(&self) -> NaiveDateTime {
        self.actual_from.unwrap_or(self.from)
    }

    fn display_end(&self) -> NaiveDateTime {
        self.actual_to.unwrap_or(self.to)
    }

    /// Full range label, e.g. "13:00 - 14:30".
    pub fn time_range_text(&self) -> String {
        format!(
            "{}{}{}",
            self.display_start().format(TIME_FORMAT),
            TIME_RANGE_SEPARATOR,
            self.display_end().format(TIME_FORMAT)
        )
    }

    /// Start-only label, e.g. "13:00".
    pub fn start_time_text(&self) -> String {
        self.display_start().format(TIME_FORMAT).to_string()
    }

    /// Organizer name if present and not blank.
    pub fn organizer(&self) -> Option<&str> {
        self.organizer
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Title, or `placeholder` when the title is blank.
    pub fn title_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        let title = self.title.trim();
        if title.is_empty() {
            placeholder
        } else {
            title
        }
    }
}

/// Returns the part of a range label before the separator.
pub fn start_of_range(range: &str) -> &str {
    range
        .split(TIME_RANGE_SEPARATOR)
        .next()
        .unwrap_or(range)
}
