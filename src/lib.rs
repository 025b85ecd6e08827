//! Adaptive event tile rendering for booking calendars.
//!
//! A tile is composed from small named components (time, title, organizer,
//! resource circles or list, plus anything registered at startup) that are
//! painted top to bottom onto a [`render::Surface`]. Which components appear
//! depends on the tile's [`layout::LayoutType`], derived from its height.

pub mod components;
pub mod compose;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod layout;
pub mod render;

pub use components::{ComponentRenderer, Dimensions, RenderResult};
pub use compose::{TileComposer, TileOutcome};
pub use event::EventRecord;
