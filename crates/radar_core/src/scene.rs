//! Backend-independent description of a rendered radar.

use log::{info, warn};
use serde::Serialize;

use crate::color::{ColorValue, ThemeResolver};
use crate::config::RadarConfig;
use crate::domain::{quadrant_heading, ring_heading, QuadrantSlot};
use crate::error::Result;
use crate::layout::{place_entries, Geometry, Jitter, PlacedEntry, Point};

pub use crate::layout::{SkipReason, SkippedEntry};

pub const DESCRIPTION: &str =
    "Interactive technology radar showing adoption levels across different categories";
pub const MARKER_RADIUS: f64 = 6.0;
pub const NEW_MARKER_RADIUS: f64 = 8.0;
pub const MARKER_OPACITY: f64 = 0.8;
/// White disc behind the marker number.
pub const NUMBER_BACKING_RADIUS: f64 = 7.0;
/// Upward triangle drawn above markers for new entries.
pub const NEW_GLYPH_PATH: &str = "M -4,-6 L 0,-10 L 4,-6 Z";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingCircle {
    pub name: String,
    pub label: String,
    pub radius: f64,
    pub label_y: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisLine {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadrantLabel {
    pub name: String,
    pub text: String,
    pub slot: QuadrantSlot,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub entry: PlacedEntry,
    pub radius: f64,
    pub fill: String,
    pub opacity: f64,
    pub accessible_name: String,
}

impl Marker {
    fn new(entry: PlacedEntry, fill: String) -> Self {
        let radius = if entry.is_new() {
            NEW_MARKER_RADIUS
        } else {
            MARKER_RADIUS
        };
        let accessible_name = format!(
            "{} - {} - {}",
            entry.label, entry.ring_reference, entry.quadrant
        );

        Self {
            entry,
            radius,
            fill,
            opacity: MARKER_OPACITY,
            accessible_name,
        }
    }

    pub const fn number(&self) -> usize {
        self.entry.number
    }

    pub fn number_label(&self) -> String {
        self.entry.number.to_string()
    }

    pub const fn position(&self) -> Point {
        self.entry.position
    }

    pub const fn is_new(&self) -> bool {
        self.entry.is_new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub title: String,
    pub description: String,
    pub background: String,
    pub grid: String,
    pub geometry: Geometry,
    pub rings: Vec<RingCircle>,
    pub axes: [AxisLine; 2],
    pub quadrant_labels: Vec<QuadrantLabel>,
    pub markers: Vec<Marker>,
    pub skipped: Vec<SkippedEntry>,
}

impl Scene {
    pub fn marker(&self, number: usize) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.number() == number)
    }
}

/// Lays out `config` and returns the scene to hand to a backend.
///
/// Themed ring colours are resolved here; a variable the theme does not
/// define falls back to the palette's `inactive` colour.
pub fn render(
    config: &RadarConfig,
    theme: &dyn ThemeResolver,
    jitter: &mut dyn Jitter,
) -> Result<Scene> {
    config.validate()?;

    let geometry = Geometry::for_config(config);
    let ring_colors: Vec<String> = config
        .rings
        .iter()
        .map(|ring| {
            ColorValue::parse(&ring.color)
                .resolve(theme)
                .unwrap_or_else(|| {
                    warn!(
                        "Ring {} colour {} is not defined by the theme, using {}",
                        ring.name, ring.color, config.colors.inactive
                    );
                    config.colors.inactive.clone()
                })
        })
        .collect();

    let rings = config
        .rings
        .iter()
        .zip(&ring_colors)
        .enumerate()
        .map(|(index, (ring, color))| RingCircle {
            name: ring.name.clone(),
            label: ring_heading(&ring.name),
            radius: geometry.ring_radius(index),
            label_y: geometry.ring_label_y(index),
            color: color.clone(),
        })
        .collect();

    let radius = geometry.radius;
    let axes = [
        AxisLine {
            from: Point::new(0.0, -radius),
            to: Point::new(0.0, radius),
        },
        AxisLine {
            from: Point::new(-radius, 0.0),
            to: Point::new(radius, 0.0),
        },
    ];

    let quadrant_labels = config
        .quadrants
        .iter()
        .zip(QuadrantSlot::ALL)
        .map(|(quadrant, slot)| QuadrantLabel {
            name: quadrant.name.clone(),
            text: quadrant_heading(&quadrant.name),
            slot,
            position: geometry.quadrant_label_position(slot),
        })
        .collect();

    let placement = place_entries(config, &geometry, jitter);
    let markers: Vec<Marker> = placement
        .placed
        .into_iter()
        .map(|entry| {
            let fill = ring_colors[entry.ring_index].clone();
            Marker::new(entry, fill)
        })
        .collect();

    info!(
        "Rendered {} with {} markers ({} skipped)",
        config.title,
        markers.len(),
        placement.skipped.len()
    );

    Ok(Scene {
        title: config.title.clone(),
        description: DESCRIPTION.to_string(),
        background: config.colors.background.clone(),
        grid: config.colors.grid.clone(),
        geometry,
        rings,
        axes,
        quadrant_labels,
        markers,
        skipped: placement.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::StaticTheme;
    use crate::config::{EntryDef, QuadrantDef, RingDef};
    use crate::layout::FixedJitter;
    use float_cmp::approx_eq;

    fn sample_config() -> RadarConfig {
        RadarConfig {
            quadrants: ["platform", "languages-frameworks", "tools", "techniques"]
                .iter()
                .map(|name| QuadrantDef { name: (*name).to_string() })
                .collect(),
            rings: vec![
                RingDef { name: "adopt".to_string(), color: "var(--radar-adopt)".to_string() },
                RingDef { name: "trial".to_string(), color: "#2c7fb8".to_string() },
                RingDef { name: "assess".to_string(), color: "#fbdb84".to_string() },
                RingDef { name: "hold".to_string(), color: "var(--radar-hold)".to_string() },
            ],
            entries: vec![
                EntryDef {
                    label: "Kubernetes".to_string(),
                    quadrant: "platform".to_string(),
                    ring: "adopt".to_string(),
                    moved: 0,
                    description: Some("Container orchestration".to_string()),
                },
                EntryDef {
                    label: "Rust".to_string(),
                    quadrant: "languages-frameworks".to_string(),
                    ring: "Trial".to_string(),
                    moved: 1,
                    description: None,
                },
                EntryDef {
                    label: "Ghost".to_string(),
                    quadrant: "databases".to_string(),
                    ring: "hold".to_string(),
                    moved: 0,
                    description: None,
                },
            ],
            ..RadarConfig::default()
        }
    }

    fn theme() -> StaticTheme {
        StaticTheme::new().with("--radar-adopt", "#5ba300")
    }

    #[test]
    fn markers_match_valid_entries_and_skips_are_reported() -> Result<()> {
        let scene = render(&sample_config(), &theme(), &mut FixedJitter::centered())?;

        assert_eq!(scene.markers.len(), 2);
        assert_eq!(scene.skipped.len(), 1);
        assert_eq!(scene.skipped[0].label, "Ghost");

        Ok(())
    }

    #[test]
    fn markers_carry_styling_and_accessible_names() -> Result<()> {
        let scene = render(&sample_config(), &theme(), &mut FixedJitter::centered())?;

        let kubernetes = scene.marker(1).ok_or_else(|| crate::RadarError::Export("missing".into()))?;
        assert!(approx_eq!(f64, kubernetes.radius, MARKER_RADIUS));
        assert!(approx_eq!(f64, kubernetes.opacity, 0.8));
        assert_eq!(kubernetes.fill, "#5ba300");
        assert_eq!(kubernetes.accessible_name, "Kubernetes - adopt - platform");
        assert!(!kubernetes.is_new());

        let rust = scene.marker(2).ok_or_else(|| crate::RadarError::Export("missing".into()))?;
        assert!(approx_eq!(f64, rust.radius, NEW_MARKER_RADIUS));
        assert_eq!(rust.accessible_name, "Rust - Trial - languages-frameworks");
        assert_eq!(rust.number_label(), "2");
        assert!(rust.is_new());

        Ok(())
    }

    #[test]
    fn ring_circles_and_labels_follow_geometry() -> Result<()> {
        let scene = render(&sample_config(), &theme(), &mut FixedJitter::centered())?;

        let radius = scene.geometry.radius;
        let band = scene.geometry.band_width;
        for (index, ring) in scene.rings.iter().enumerate() {
            assert!(approx_eq!(f64, ring.radius, radius - index as f64 * band, epsilon = 1e-9));
        }
        assert_eq!(scene.rings[0].label, "ADOPT");
        assert_eq!(scene.quadrant_labels[1].text, "LANGUAGES & FRAMEWORKS");
        assert_eq!(scene.quadrant_labels.len(), 4);

        Ok(())
    }

    #[test]
    fn unresolved_theme_colour_falls_back_to_inactive() -> Result<()> {
        let scene = render(&sample_config(), &theme(), &mut FixedJitter::centered())?;

        assert_eq!(scene.rings[3].color, "#ddd");
        assert_eq!(scene.rings[1].color, "#2c7fb8");

        Ok(())
    }

    #[test]
    fn numbering_is_stable_across_renders() -> Result<()> {
        let config = sample_config();
        let first = render(&config, &theme(), &mut FixedJitter::new(vec![0.9, -0.4]))?;
        let second = render(&config, &theme(), &mut FixedJitter::new(vec![-0.7, 0.2]))?;

        let numbers = |scene: &Scene| -> Vec<(usize, String)> {
            scene
                .markers
                .iter()
                .map(|marker| (marker.number(), marker.entry.label.clone()))
                .collect()
        };
        assert_eq!(numbers(&first), numbers(&second));
        assert_ne!(first.markers[0].position(), second.markers[0].position());

        Ok(())
    }

    #[test]
    fn invalid_config_is_fatal() {
        let config = RadarConfig::default();
        assert!(render(&config, &theme(), &mut FixedJitter::centered()).is_err());
    }
}
