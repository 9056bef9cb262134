//! HTML fragments for the legend panel and detail overlay, plus a
//! self-contained page combining them with the SVG diagram.

use std::fmt::Write;

use super::RenderBackend;
use crate::config::DEFAULT_CONTAINER_ID;
use crate::error::Result;
use crate::legend::{
    Legend, LegendView, LEGEND_CONTAINER_ID, LEGEND_CONTENT_ID, LEGEND_TITLE, NEW_FLAG,
};
use crate::overlay::DetailOverlay;
use crate::scene::Scene;

const PAGE_STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem; }
.radar-legend__header { display: flex; align-items: center; gap: 1rem; }
.radar-legend__content[aria-hidden=\"true\"] { display: none; }
.legend-quadrant { margin-bottom: 2rem; }
.legend-ring { margin-bottom: 1rem; }
.legend-ring ul { list-style: none; padding: 0; margin: 0; }
.legend-ring li { margin-bottom: 0.25rem; font-size: 0.9rem; }
.legend-number { display: inline-block; width: 30px; font-weight: bold; }
";

/// Inline style of the `▲ NEW` flag, so pages without the stylesheet
/// still colour it with the theme's `--radar-new`.
pub const NEW_FLAG_STYLE: &str = "margin-left: 0.5rem; color: var(--radar-new, #d62728); font-weight: bold";

/// Style properties of the `#radar-tooltip` container.
pub const OVERLAY_STYLE: [(&str, &str); 8] = [
    ("position", "absolute"),
    ("background", "#fff"),
    ("border", "2px solid #0066cc"),
    ("border-radius", "8px"),
    ("padding", "1rem"),
    ("max-width", "300px"),
    ("box-shadow", "0 4px 12px rgba(0,0,0,0.15)"),
    ("z-index", "1000"),
];

/// Whether the legend markup carries its Show All / Hide All button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendControls {
    #[default]
    Toggle,
    Static,
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Inner markup of the `#radar-legend` container.
pub fn legend_markup(legend: &Legend, view: LegendView, controls: LegendControls) -> String {
    let mut html = String::new();

    html.push_str("<div class=\"radar-legend__header\">");
    let _ = write!(html, "<h3 class=\"radar-legend__title\">{}</h3>", escape(LEGEND_TITLE));
    if controls == LegendControls::Toggle {
        let _ = write!(
            html,
            "<button type=\"button\" class=\"radar-legend__toggle\" aria-expanded=\"{}\" aria-controls=\"{LEGEND_CONTENT_ID}\">{}</button>",
            view.aria_expanded(),
            view.button_label()
        );
    }
    html.push_str("</div>");

    let _ = write!(
        html,
        "<div id=\"{LEGEND_CONTENT_ID}\" class=\"radar-legend__content\" aria-hidden=\"{}\">",
        view.content_hidden()
    );
    for section in &legend.sections {
        let _ = write!(
            html,
            "<div class=\"legend-quadrant\"><h3>{}</h3>",
            escape(&section.heading)
        );
        for group in &section.rings {
            let _ = write!(
                html,
                "<div class=\"legend-ring\"><h4>{}</h4><ul>",
                escape(&group.heading)
            );
            for item in &group.items {
                let _ = write!(
                    html,
                    "<li><span class=\"legend-number\">{}.</span><span>{}</span>",
                    item.number,
                    escape(&item.label)
                );
                if item.is_new() {
                    let _ = write!(
                        html,
                        "<span class=\"legend-new\" style=\"{NEW_FLAG_STYLE}\">{NEW_FLAG}</span>"
                    );
                }
                html.push_str("</li>");
            }
            html.push_str("</ul></div>");
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");

    html
}

/// Inner markup of the `#radar-tooltip` overlay.
pub fn overlay_markup(overlay: &DetailOverlay) -> String {
    format!(
        concat!(
            "<h4 style=\"margin: 0 0 0.5rem 0; color: #0066cc\">{}</h4>",
            "<p style=\"margin: 0 0 0.5rem 0\"><strong>Level:</strong> {}</p>",
            "<p class=\"radar-tooltip__description\" style=\"margin: 0; font-size: 0.9rem; color: #666\">{}</p>",
        ),
        escape(&overlay.title),
        escape(&overlay.level),
        escape(&overlay.description)
    )
}

/// Writes a complete HTML document holding the diagram and the legend.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPageBackend {
    pub view: LegendView,
    pub controls: LegendControls,
}

impl HtmlPageBackend {
    /// Static pages have no script to drive the toggle, so the legend is
    /// shown expanded and without its button.
    pub fn expanded() -> Self {
        let mut view = LegendView::collapsed();
        view.toggle();
        Self {
            view,
            controls: LegendControls::Static,
        }
    }
}

impl RenderBackend for HtmlPageBackend {
    type Output = String;

    fn draw(&mut self, scene: &Scene, legend: &Legend) -> Result<String> {
        let mut page = String::new();
        let _ = write!(
            page,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{PAGE_STYLE}</style>\n</head>\n<body>\n",
            escape(&scene.title)
        );
        let _ = write!(
            page,
            "<div id=\"{DEFAULT_CONTAINER_ID}\">\n{}\n</div>\n",
            super::svg::to_string(scene)
        );
        let _ = write!(
            page,
            "<div id=\"{LEGEND_CONTAINER_ID}\" class=\"radar-legend\">{}</div>\n</body>\n</html>\n",
            legend_markup(legend, self.view, self.controls)
        );
        Ok(page)
    }
}
