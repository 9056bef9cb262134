use std::io::Write;

use log::info;
use svg::node::element::{Circle, Element, Group, Line, Path, Text};
use svg::{Document, Node};

use super::RenderBackend;
use crate::error::{RadarError, Result};
use crate::legend::Legend;
use crate::scene::{Marker, Scene, NEW_GLYPH_PATH, NUMBER_BACKING_RADIUS};

const RING_LABEL_FONT_SIZE: &str = "12px";
const QUADRANT_LABEL_FONT_SIZE: &str = "14px";
const NUMBER_FONT_SIZE: &str = "10px";

/// Produces an SVG document for the diagram. The legend is not part of the
/// SVG; see [`super::html`].
#[derive(Debug, Default)]
pub struct SvgBackend;

impl SvgBackend {
    pub const fn new() -> Self {
        Self
    }
}

impl RenderBackend for SvgBackend {
    type Output = Document;

    fn draw(&mut self, scene: &Scene, _legend: &Legend) -> Result<Document> {
        Ok(document(scene))
    }
}

fn text_node(tag: &str, content: &str) -> Element {
    let mut element = Element::new(tag);
    element.append(svg::node::Text::new(content));
    element
}

pub fn document(scene: &Scene) -> Document {
    let geometry = &scene.geometry;

    let mut radar = Group::new().set(
        "transform",
        format!("translate({},{})", geometry.center.x, geometry.center.y),
    );

    for ring in &scene.rings {
        radar = radar
            .add(
                Circle::new()
                    .set("cx", 0)
                    .set("cy", 0)
                    .set("r", ring.radius)
                    .set("fill", "none")
                    .set("stroke", scene.grid.as_str())
                    .set("stroke-width", 1),
            )
            .add(
                Text::new(ring.label.as_str())
                    .set("y", ring.label_y)
                    .set("text-anchor", "middle")
                    .set("fill", ring.color.as_str())
                    .set("font-weight", "bold")
                    .set("font-size", RING_LABEL_FONT_SIZE),
            );
    }

    for axis in &scene.axes {
        radar = radar.add(
            Line::new()
                .set("x1", axis.from.x)
                .set("y1", axis.from.y)
                .set("x2", axis.to.x)
                .set("y2", axis.to.y)
                .set("stroke", scene.grid.as_str())
                .set("stroke-width", 1),
        );
    }

    for label in &scene.quadrant_labels {
        radar = radar.add(
            Text::new(label.text.as_str())
                .set("x", label.position.x)
                .set("y", label.position.y)
                .set("text-anchor", "middle")
                .set("font-weight", "bold")
                .set("font-size", QUADRANT_LABEL_FONT_SIZE)
                .set("fill", "#000"),
        );
    }

    for marker in &scene.markers {
        radar = radar.add(marker_group(marker));
    }

    Document::new()
        .set("width", geometry.width)
        .set("height", geometry.height)
        .set(
            "viewBox",
            format!("0 0 {} {}", geometry.width, geometry.height),
        )
        .set("preserveAspectRatio", "xMidYMid meet")
        .set("style", format!("background: {}", scene.background))
        .add(text_node("title", &scene.title))
        .add(text_node("desc", &scene.description))
        .add(radar)
}

fn marker_group(marker: &Marker) -> Group {
    let position = marker.position();
    let mut group = Group::new()
        .set("transform", format!("translate({},{})", position.x, position.y))
        .set("class", "blip")
        .set("tabindex", "0")
        .set("role", "group")
        .set("data-number", marker.number_label())
        .set("aria-label", marker.accessible_name.as_str())
        .add(
            Circle::new()
                .set("r", marker.radius)
                .set("fill", marker.fill.as_str())
                .set("opacity", marker.opacity)
                .set("style", "cursor: pointer"),
        );

    if marker.is_new() {
        group = group.add(
            Path::new()
                .set("d", NEW_GLYPH_PATH)
                .set("fill", marker.fill.as_str()),
        );
    }

    group
        .add(
            Circle::new()
                .set("r", NUMBER_BACKING_RADIUS)
                .set("fill", "#fff")
                .set("pointer-events", "none"),
        )
        .add(
            Text::new(marker.number_label())
                .set("y", 3)
                .set("text-anchor", "middle")
                .set("font-size", NUMBER_FONT_SIZE)
                .set("font-weight", "bold")
                .set("fill", "#000")
                .set("pointer-events", "none"),
        )
        .add(text_node("title", &marker.entry.label))
}

pub fn to_string(scene: &Scene) -> String {
    document(scene).to_string()
}

pub fn write_svg(scene: &Scene, mut sink: impl Write) -> Result<()> {
    write!(sink, "{}", document(scene)).map_err(RadarError::Io)?;
    info!("Wrote SVG with {} markers", scene.markers.len());
    Ok(())
}
