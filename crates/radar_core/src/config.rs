//! Declarative radar configuration.
//!
//! The JSON shape mirrors what the page hands to the browser renderer, so a
//! single `radar.json` can feed the CLI, the terminal viewer and the web
//! backend.

use serde::{Deserialize, Serialize};

use crate::color::StaticTheme;
use crate::error::{RadarError, Result};
use crate::layout::LABEL_MARGIN;

pub const DEFAULT_CONTAINER_ID: &str = "radar";
pub const DEFAULT_WIDTH: f64 = 1200.0;
pub const DEFAULT_HEIGHT: f64 = 800.0;
pub const DEFAULT_TITLE: &str = "Tech Radar";
/// Quadrants beyond this count have no fixed angle to sit on.
pub const MAX_QUADRANTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarConfig {
    #[serde(default = "default_container_id", alias = "svg_id")]
    pub container_id: String,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub colors: Palette,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub quadrants: Vec<QuadrantDef>,
    #[serde(default)]
    pub rings: Vec<RingDef>,
    #[serde(default)]
    pub entries: Vec<EntryDef>,
    /// Offline values for `var(--name)` colours.
    #[serde(default, skip_serializing)]
    pub theme: StaticTheme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub grid: String,
    pub inactive: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#fff".to_string(),
            grid: "#bbb".to_string(),
            inactive: "#ddd".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantDef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingDef {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDef {
    pub label: String,
    pub quadrant: String,
    pub ring: String,
    #[serde(default)]
    pub moved: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntryDef {
    pub const fn is_new(&self) -> bool {
        self.moved > 0
    }
}

fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

const fn default_width() -> f64 {
    DEFAULT_WIDTH
}

const fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            colors: Palette::default(),
            title: default_title(),
            quadrants: Vec::new(),
            rings: Vec::new(),
            entries: Vec::new(),
            theme: StaticTheme::default(),
        }
    }
}

impl RadarConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the preconditions a render call cannot recover from.
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(RadarError::InvalidConfig(format!(
                "width and height must be positive (got {}x{})",
                self.width, self.height
            )));
        }
        if self.rings.is_empty() {
            return Err(RadarError::InvalidConfig(
                "at least one ring is required".to_string(),
            ));
        }
        if self.quadrants.len() > MAX_QUADRANTS {
            return Err(RadarError::InvalidConfig(format!(
                "at most {MAX_QUADRANTS} quadrants are supported (got {})",
                self.quadrants.len()
            )));
        }
        if self.width.min(self.height) / 2.0 <= LABEL_MARGIN {
            return Err(RadarError::InvalidConfig(format!(
                "{}x{} leaves no room to plot inside the {LABEL_MARGIN}px label margin",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
