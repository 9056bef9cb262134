//! Grouped index of plotted entries and its collapse toggle.

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::{quadrant_heading, ring_heading};
use crate::scene::Scene;

pub const LEGEND_CONTAINER_ID: &str = "radar-legend";
pub const LEGEND_CONTENT_ID: &str = "radar-legend-content";
pub const LEGEND_TITLE: &str = "Technology Index";
pub const NEW_FLAG: &str = "▲ NEW";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendItem {
    pub number: usize,
    pub label: String,
    pub moved: i32,
}

impl LegendItem {
    pub const fn is_new(&self) -> bool {
        self.moved > 0
    }

    /// `"{number}. {label}"`, without the new flag.
    pub fn text(&self) -> String {
        format!("{}. {}", self.number, self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RingGroup {
    pub ring: String,
    pub heading: String,
    pub items: Vec<LegendItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuadrantSection {
    pub quadrant: String,
    pub heading: String,
    pub rings: Vec<RingGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub sections: Vec<QuadrantSection>,
}

impl Legend {
    /// Groups the scene's markers by quadrant, then ring, both in order of
    /// first appearance. Only buckets holding at least one marker exist.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut grouped: IndexMap<&str, IndexMap<&str, Vec<LegendItem>>> = IndexMap::new();

        for marker in &scene.markers {
            let entry = &marker.entry;
            grouped
                .entry(entry.quadrant.as_str())
                .or_default()
                .entry(entry.ring.as_str())
                .or_default()
                .push(LegendItem {
                    number: entry.number,
                    label: entry.label.clone(),
                    moved: entry.moved,
                });
        }

        let sections = grouped
            .into_iter()
            .map(|(quadrant, rings)| QuadrantSection {
                quadrant: quadrant.to_string(),
                heading: quadrant_heading(quadrant),
                rings: rings
                    .into_iter()
                    .map(|(ring, items)| RingGroup {
                        ring: ring.to_string(),
                        heading: ring_heading(ring),
                        items,
                    })
                    .collect(),
            })
            .collect();

        Self { sections }
    }

    pub fn items(&self) -> impl Iterator<Item = &LegendItem> {
        self.sections
            .iter()
            .flat_map(|section| section.rings.iter())
            .flat_map(|group| group.items.iter())
    }

    pub fn len(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Collapsed/expanded state of the legend.
///
/// The button text, `aria-expanded` and the content's `aria-hidden` are all
/// derived from the one flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LegendView {
    expanded: bool,
}

impl LegendView {
    pub const fn collapsed() -> Self {
        Self { expanded: false }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub const fn is_expanded(self) -> bool {
        self.expanded
    }

    pub const fn button_label(self) -> &'static str {
        if self.expanded {
            "Hide All"
        } else {
            "Show All"
        }
    }

    pub const fn aria_expanded(self) -> &'static str {
        if self.expanded {
            "true"
        } else {
            "false"
        }
    }

    pub const fn content_hidden(self) -> &'static str {
        if self.expanded {
            "false"
        } else {
            "true"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::StaticTheme;
    use crate::config::{EntryDef, QuadrantDef, RadarConfig, RingDef};
    use crate::layout::FixedJitter;
    use crate::scene::render;
    use crate::Result;
    use std::collections::HashSet;

    fn entry(label: &str, quadrant: &str, ring: &str, moved: i32) -> EntryDef {
        EntryDef {
            label: label.to_string(),
            quadrant: quadrant.to_string(),
            ring: ring.to_string(),
            moved,
            description: None,
        }
    }

    fn config(entries: Vec<EntryDef>) -> RadarConfig {
        RadarConfig {
            quadrants: ["platform", "languages-frameworks", "tools", "techniques"]
                .iter()
                .map(|name| QuadrantDef { name: (*name).to_string() })
                .collect(),
            rings: ["adopt", "trial", "assess", "hold"]
                .iter()
                .map(|name| RingDef {
                    name: (*name).to_string(),
                    color: "#888".to_string(),
                })
                .collect(),
            entries,
            ..RadarConfig::default()
        }
    }

    fn legend_for(config: &RadarConfig) -> Result<Legend> {
        let scene = render(config, &StaticTheme::new(), &mut FixedJitter::centered())?;
        Ok(Legend::from_scene(&scene))
    }

    #[test]
    fn single_entry_lands_under_its_quadrant_and_ring() -> Result<()> {
        let legend = legend_for(&config(vec![entry("X", "platform", "adopt", 0)]))?;

        assert_eq!(legend.sections.len(), 1);
        let section = &legend.sections[0];
        assert_eq!(section.heading, "PLATFORM");
        assert_eq!(section.rings.len(), 1);
        assert_eq!(section.rings[0].heading, "ADOPT");

        let item = &section.rings[0].items[0];
        assert_eq!(item.text(), "1. X");
        assert!(!item.is_new());

        Ok(())
    }

    #[test]
    fn groups_in_first_appearance_order_and_omits_empty_buckets() -> Result<()> {
        let legend = legend_for(&config(vec![
            entry("Terraform", "tools", "trial", 0),
            entry("Go", "languages-frameworks", "adopt", 2),
            entry("Make", "tools", "adopt", 0),
            entry("Helm", "tools", "trial", 0),
        ]))?;

        let quadrants: Vec<&str> = legend.sections.iter().map(|s| s.quadrant.as_str()).collect();
        assert_eq!(quadrants, vec!["tools", "languages-frameworks"]);
        assert_eq!(legend.sections[1].heading, "LANGUAGES & FRAMEWORKS");

        let tools_rings: Vec<&str> = legend.sections[0].rings.iter().map(|g| g.ring.as_str()).collect();
        assert_eq!(tools_rings, vec!["trial", "adopt"]);
        let trial: Vec<String> = legend.sections[0].rings[0].items.iter().map(LegendItem::text).collect();
        assert_eq!(trial, vec!["1. Terraform", "4. Helm"]);

        assert!(legend
            .sections
            .iter()
            .flat_map(|section| &section.rings)
            .all(|group| !group.items.is_empty()));
        assert!(legend.sections[1].rings[0].items[0].is_new());

        Ok(())
    }

    #[test]
    fn every_valid_entry_appears_exactly_once() -> Result<()> {
        let legend = legend_for(&config(vec![
            entry("A", "platform", "adopt", 0),
            entry("B", "platform", "ADOPT", 0),
            entry("C", "nowhere", "adopt", 0),
            entry("D", "techniques", "hold", 0),
        ]))?;

        let numbers: Vec<usize> = legend.items().map(|item| item.number).collect();
        let unique: HashSet<usize> = numbers.iter().copied().collect();
        assert_eq!(numbers.len(), 3);
        assert_eq!(unique.len(), 3);
        assert!(!unique.contains(&3));
        assert_eq!(legend.len(), 3);

        Ok(())
    }

    #[test]
    fn mixed_case_ring_groups_under_configured_name() -> Result<()> {
        let legend = legend_for(&config(vec![entry("B", "platform", "ADOPT", 0)]))?;
        assert_eq!(legend.sections[0].rings[0].ring, "adopt");
        Ok(())
    }

    #[test]
    fn legend_starts_collapsed() {
        let view = LegendView::default();
        assert!(!view.is_expanded());
        assert_eq!(view.button_label(), "Show All");
        assert_eq!(view.aria_expanded(), "false");
        assert_eq!(view.content_hidden(), "true");
    }

    #[test]
    fn toggling_twice_restores_label_and_expanded_flag() {
        let mut view = LegendView::collapsed();
        let original = (view.button_label(), view.aria_expanded());

        view.toggle();
        assert_eq!(view.button_label(), "Hide All");
        assert_eq!(view.aria_expanded(), "true");
        assert_eq!(view.content_hidden(), "false");

        view.toggle();
        assert_eq!((view.button_label(), view.aria_expanded()), original);
    }
}
