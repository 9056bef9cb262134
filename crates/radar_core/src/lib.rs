//! Tech Radar layout and rendering.
//!
//! [`render`] turns a [`RadarConfig`] into a [`Scene`]: ring circles, axes,
//! quadrant labels and one positioned marker per resolvable entry.
//! [`Legend::from_scene`] groups the same markers for the textual index.
//! Drawing is left to a [`RenderBackend`]; this crate ships SVG and HTML
//! backends, the terminal and browser backends live in their own crates.

pub mod color;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod layout;
pub mod legend;
pub mod overlay;
pub mod scene;

pub use color::{ColorValue, StaticTheme, ThemeResolver};
pub use config::{EntryDef, Palette, QuadrantDef, RadarConfig, RingDef};
pub use domain::QuadrantSlot;
pub use error::{RadarError, Result};
pub use export::RenderBackend;
#[cfg(feature = "rand")]
pub use layout::RandomJitter;
pub use layout::{FixedJitter, Geometry, Jitter, PlacedEntry, Point};
pub use legend::{Legend, LegendView};
pub use overlay::{DetailOverlay, DismissTrigger, ListenerGuard, ListenerRegistry, OverlayController};
pub use scene::{render, Marker, Scene, SkippedEntry};
