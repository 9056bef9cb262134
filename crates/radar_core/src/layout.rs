//! Ring/quadrant geometry and per-entry placement.
//!
//! Coordinates are relative to the radar centre with y growing downwards,
//! the way they end up inside the translated SVG group.

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::config::RadarConfig;
use crate::domain::QuadrantSlot;

/// Space kept free around the outer ring for quadrant labels.
pub const LABEL_MARGIN: f64 = 80.0;
/// Distance beyond the outer ring at which quadrant labels sit.
pub const QUADRANT_LABEL_OFFSET: f64 = 30.0;
pub const ANGLE_JITTER_DEGREES: f64 = 40.0;
/// Radial jitter as a fraction of the band width.
pub const RADIAL_JITTER_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_from_origin(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Converts a distance and an angle measured clockwise from twelve o'clock
/// into centre-relative screen coordinates.
pub fn polar(distance: f64, degrees: f64) -> Point {
    let radians = (degrees - 90.0).to_radians();
    Point::new(distance * radians.cos(), distance * radians.sin())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    pub band_width: f64,
    pub ring_count: usize,
}

impl Geometry {
    pub fn new(width: f64, height: f64, ring_count: usize) -> Self {
        let radius = width.min(height) / 2.0 - LABEL_MARGIN;
        let band_width = if ring_count == 0 {
            radius
        } else {
            radius / ring_count as f64
        };

        Self {
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
            radius,
            band_width,
            ring_count,
        }
    }

    pub fn for_config(config: &RadarConfig) -> Self {
        Self::new(config.width, config.height, config.rings.len())
    }

    /// Outer edge of ring `index`; ring 0 is the outermost.
    pub fn ring_radius(&self, index: usize) -> f64 {
        (index as f64).mul_add(-self.band_width, self.radius)
    }

    /// `(inner, outer)` edges of the band belonging to ring `index`.
    pub fn band(&self, index: usize) -> (f64, f64) {
        let outer = self.ring_radius(index);
        ((outer - self.band_width).max(0.0), outer)
    }

    pub fn band_center(&self, index: usize) -> f64 {
        self.ring_radius(index) - self.band_width / 2.0
    }

    /// Vertical offset of a ring's label, which sits in the middle of its
    /// band straight above the centre.
    pub fn ring_label_y(&self, index: usize) -> f64 {
        -self.band_center(index)
    }

    pub fn quadrant_label_position(&self, slot: QuadrantSlot) -> Point {
        polar(self.radius + QUADRANT_LABEL_OFFSET, slot.angle_degrees())
    }
}

/// Source of placement noise. Every sample must lie in `[-1.0, 1.0)`.
pub trait Jitter {
    fn sample(&mut self) -> f64;
}

impl<J: Jitter + ?Sized> Jitter for &mut J {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

/// Uniform jitter backed by a `rand` generator. Defaults to the thread RNG;
/// pass a seeded `StdRng` for reproducible output.
#[cfg(feature = "rand")]
#[derive(Debug)]
pub struct RandomJitter<R = rand::rngs::ThreadRng> {
    rng: R,
}

#[cfg(feature = "rand")]
impl RandomJitter {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

#[cfg(feature = "rand")]
impl Default for RandomJitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "rand")]
impl<R: rand::Rng> RandomJitter<R> {
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

#[cfg(feature = "rand")]
impl<R: rand::Rng> Jitter for RandomJitter<R> {
    fn sample(&mut self) -> f64 {
        self.rng.random_range(-1.0..1.0)
    }
}

/// Replays a fixed sequence of samples, wrapping around at the end.
#[derive(Debug, Clone, Default)]
pub struct FixedJitter {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedJitter {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Every entry lands exactly on its quadrant diagonal and band centre.
    pub fn centered() -> Self {
        Self::new(vec![0.0])
    }
}

impl Jitter for FixedJitter {
    fn sample(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(-1.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEntry {
    /// 1-based position in the configured entry list.
    pub number: usize,
    pub label: String,
    /// Quadrant name as configured.
    pub quadrant: String,
    pub slot: QuadrantSlot,
    /// Ring name as configured.
    pub ring: String,
    /// Ring name as the entry spelled it.
    pub ring_reference: String,
    pub ring_index: usize,
    pub moved: i32,
    pub description: Option<String>,
    pub position: Point,
}

impl PlacedEntry {
    pub const fn is_new(&self) -> bool {
        self.moved > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum SkipReason {
    UnknownQuadrant(String),
    UnknownRing(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownQuadrant(name) => write!(f, "unknown quadrant '{name}'"),
            Self::UnknownRing(name) => write!(f, "unknown ring '{name}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub number: usize,
    pub label: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Placement {
    pub placed: Vec<PlacedEntry>,
    pub skipped: Vec<SkippedEntry>,
}

/// Places every resolvable entry inside its quadrant/ring sector.
///
/// Quadrants match by exact name, rings ignore case. Entries that do not
/// resolve are logged and reported in [`Placement::skipped`]. Jitter is
/// drawn twice per placed entry, angle first.
pub fn place_entries(
    config: &RadarConfig,
    geometry: &Geometry,
    jitter: &mut dyn Jitter,
) -> Placement {
    let quadrant_index: HashMap<&str, usize> = config
        .quadrants
        .iter()
        .enumerate()
        .map(|(index, quadrant)| (quadrant.name.as_str(), index))
        .collect();
    let ring_index: HashMap<String, usize> = config
        .rings
        .iter()
        .enumerate()
        .map(|(index, ring)| (ring.name.to_lowercase(), index))
        .collect();

    let mut placement = Placement::default();

    for (index, entry) in config.entries.iter().enumerate() {
        let number = index + 1;
        let slot = quadrant_index
            .get(entry.quadrant.as_str())
            .and_then(|index| QuadrantSlot::from_index(*index));
        let ring = ring_index.get(&entry.ring.to_lowercase()).copied();

        let (slot, ring) = match (slot, ring) {
            (Some(slot), Some(ring)) => (slot, ring),
            (None, _) => {
                warn!("Skipping entry: {} (unknown quadrant '{}')", entry.label, entry.quadrant);
                placement.skipped.push(SkippedEntry {
                    number,
                    label: entry.label.clone(),
                    reason: SkipReason::UnknownQuadrant(entry.quadrant.clone()),
                });
                continue;
            }
            (Some(_), None) => {
                warn!("Skipping entry: {} (unknown ring '{}')", entry.label, entry.ring);
                placement.skipped.push(SkippedEntry {
                    number,
                    label: entry.label.clone(),
                    reason: SkipReason::UnknownRing(entry.ring.clone()),
                });
                continue;
            }
        };

        let angle = jitter
            .sample()
            .mul_add(ANGLE_JITTER_DEGREES, slot.angle_degrees());
        let (inner, outer) = geometry.band(ring);
        let distance = (jitter.sample() * RADIAL_JITTER_FRACTION)
            .mul_add(geometry.band_width, geometry.band_center(ring))
            .clamp(inner, outer);
        let position = polar(distance, angle);

        debug!(
            "Placed #{number} {} at ({:.1}, {:.1}), angle {angle:.1}, distance {distance:.1}",
            entry.label, position.x, position.y
        );

        placement.placed.push(PlacedEntry {
            number,
            label: entry.label.clone(),
            quadrant: config.quadrants[slot.index()].name.clone(),
            slot,
            ring: config.rings[ring].name.clone(),
            ring_reference: entry.ring.clone(),
            ring_index: ring,
            moved: entry.moved,
            description: entry.description.clone(),
            position,
        });
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EntryDef, QuadrantDef, RingDef};
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn config(entries: Vec<EntryDef>) -> RadarConfig {
        RadarConfig {
            quadrants: ["platform", "languages", "tools", "techniques"]
                .iter()
                .map(|name| QuadrantDef { name: (*name).to_string() })
                .collect(),
            rings: ["adopt", "trial", "assess", "hold"]
                .iter()
                .map(|name| RingDef {
                    name: (*name).to_string(),
                    color: "#000".to_string(),
                })
                .collect(),
            entries,
            ..RadarConfig::default()
        }
    }

    fn entry(label: &str, quadrant: &str, ring: &str) -> EntryDef {
        EntryDef {
            label: label.to_string(),
            quadrant: quadrant.to_string(),
            ring: ring.to_string(),
            moved: 0,
            description: None,
        }
    }

    #[test]
    fn radius_reserves_label_margin() {
        let geometry = Geometry::new(1200.0, 800.0, 4);
        assert!(approx_eq!(f64, geometry.radius, 320.0));
        assert!(approx_eq!(f64, geometry.band_width, 80.0));
        assert_eq!(geometry.center, Point::new(600.0, 400.0));
    }

    #[test]
    fn ring_radii_step_inwards_by_band_width() {
        let geometry = Geometry::new(1200.0, 800.0, 4);
        let radii: Vec<f64> = (0..4).map(|index| geometry.ring_radius(index)).collect();
        for (actual, expected) in radii.iter().zip([320.0, 240.0, 160.0, 80.0]) {
            assert!(approx_eq!(f64, *actual, expected));
        }
    }

    #[test]
    fn ring_labels_sit_mid_band_above_centre() {
        let geometry = Geometry::new(1200.0, 800.0, 4);
        assert!(approx_eq!(f64, geometry.ring_label_y(0), -280.0));
        assert!(approx_eq!(f64, geometry.ring_label_y(3), -40.0));
    }

    #[test]
    fn quadrant_labels_sit_beyond_outer_ring_on_diagonals() {
        let geometry = Geometry::new(1200.0, 800.0, 4);
        let label = geometry.quadrant_label_position(QuadrantSlot::NorthEast);
        assert!(approx_eq!(f64, label.distance_from_origin(), 350.0, epsilon = 1e-9));
        assert!(label.x > 0.0 && label.y < 0.0);

        let label = geometry.quadrant_label_position(QuadrantSlot::SouthWest);
        assert!(label.x < 0.0 && label.y > 0.0);
    }

    #[test]
    fn centred_jitter_places_entry_on_diagonal_at_band_centre() {
        let config = config(vec![entry("X", "platform", "adopt")]);
        let geometry = Geometry::for_config(&config);
        let placement = place_entries(&config, &geometry, &mut FixedJitter::centered());

        let placed = &placement.placed[0];
        let expected = polar(280.0, 45.0);
        assert!(approx_eq!(f64, placed.position.x, expected.x, epsilon = 1e-9));
        assert!(approx_eq!(f64, placed.position.y, expected.y, epsilon = 1e-9));
        assert_eq!(placed.slot, QuadrantSlot::NorthEast);
    }

    #[test]
    fn extreme_jitter_stays_inside_the_sector() {
        let config = config(vec![entry("X", "tools", "trial")]);
        let geometry = Geometry::for_config(&config);
        let placement = place_entries(&config, &geometry, &mut FixedJitter::new(vec![1.0, -1.0]));

        let placed = &placement.placed[0];
        let (inner, outer) = geometry.band(1);
        let distance = placed.position.distance_from_origin();
        assert!(distance > inner && distance < outer);
        assert!(approx_eq!(f64, distance, 240.0 - 40.0 - 24.0, epsilon = 1e-9));
    }

    struct Wild(f64);

    impl Jitter for Wild {
        fn sample(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn out_of_range_jitter_is_clamped_to_the_band() {
        let config = config(vec![entry("X", "tools", "trial")]);
        let geometry = Geometry::for_config(&config);

        for sample in [-10.0, 10.0] {
            let placement = place_entries(&config, &geometry, &mut Wild(sample));
            let (inner, outer) = geometry.band(1);
            let distance = placement.placed[0].position.distance_from_origin();
            assert!(distance >= inner - 1e-9 && distance <= outer + 1e-9);
        }
    }

    #[test]
    fn ring_match_ignores_case_but_quadrant_match_does_not() {
        let config = config(vec![
            entry("Upper ring", "platform", "ADOPT"),
            entry("Upper quadrant", "Platform", "adopt"),
        ]);
        let geometry = Geometry::for_config(&config);
        let placement = place_entries(&config, &geometry, &mut FixedJitter::centered());

        assert_eq!(placement.placed.len(), 1);
        assert_eq!(placement.placed[0].label, "Upper ring");
        assert_eq!(placement.placed[0].ring, "adopt");
        assert_eq!(placement.placed[0].ring_reference, "ADOPT");

        assert_eq!(placement.skipped.len(), 1);
        assert_eq!(placement.skipped[0].number, 2);
        assert_eq!(
            placement.skipped[0].reason,
            SkipReason::UnknownQuadrant("Platform".to_string())
        );
    }

    #[test]
    fn unknown_ring_is_reported() {
        let config = config(vec![entry("Lost", "tools", "sunset")]);
        let geometry = Geometry::for_config(&config);
        let placement = place_entries(&config, &geometry, &mut FixedJitter::centered());

        assert!(placement.placed.is_empty());
        assert_eq!(
            placement.skipped[0].reason.to_string(),
            "unknown ring 'sunset'"
        );
    }

    #[test]
    fn numbering_counts_skipped_entries() {
        let config = config(vec![
            entry("A", "tools", "adopt"),
            entry("B", "nowhere", "adopt"),
            entry("C", "tools", "hold"),
        ]);
        let geometry = Geometry::for_config(&config);
        let placement = place_entries(&config, &geometry, &mut FixedJitter::centered());

        let numbers: Vec<usize> = placement.placed.iter().map(|placed| placed.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn fixed_jitter_wraps_and_clamps() {
        let mut jitter = FixedJitter::new(vec![0.5, 3.0]);
        assert!(approx_eq!(f64, jitter.sample(), 0.5));
        assert!(approx_eq!(f64, jitter.sample(), 1.0));
        assert!(approx_eq!(f64, jitter.sample(), 0.5));
        assert!(approx_eq!(f64, FixedJitter::default().sample(), 0.0));
    }

    proptest! {
        #[test]
        fn bands_are_contiguous_and_cover_the_radius(
            width in 200.0_f64..4000.0,
            height in 200.0_f64..4000.0,
            rings in 1_usize..12,
        ) {
            let geometry = Geometry::new(width, height, rings);
            prop_assert!(approx_eq!(f64, geometry.band(0).1, geometry.radius, epsilon = 1e-9));
            prop_assert!(approx_eq!(f64, geometry.band(rings - 1).0, 0.0, epsilon = 1e-6));
            for index in 1..rings {
                let (outer_inner, _) = geometry.band(index - 1);
                let (_, inner_outer) = geometry.band(index);
                prop_assert!(approx_eq!(f64, outer_inner, inner_outer, epsilon = 1e-9));
            }
        }

        #[test]
        fn random_placements_stay_in_their_band(seed in any::<u64>()) {
            use rand::SeedableRng;

            let config = config(vec![
                entry("A", "platform", "adopt"),
                entry("B", "languages", "trial"),
                entry("C", "tools", "assess"),
                entry("D", "techniques", "hold"),
            ]);
            let geometry = Geometry::for_config(&config);
            let mut jitter = RandomJitter::with_rng(rand::rngs::StdRng::seed_from_u64(seed));
            let placement = place_entries(&config, &geometry, &mut jitter);

            prop_assert_eq!(placement.placed.len(), 4);
            for placed in &placement.placed {
                let (inner, outer) = geometry.band(placed.ring_index);
                let distance = placed.position.distance_from_origin();
                prop_assert!(distance >= inner && distance <= outer);
            }
        }
    }
}
