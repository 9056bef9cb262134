use std::str::FromStr;

use radar_core::layout::QUADRANT_LABEL_OFFSET;
use radar_core::{Point, Scene};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Extra room around the quadrant labels so they are not clipped.
const CANVAS_PADDING: f64 = 20.0;

/// Maps a CSS colour (`#rgb`, `#rrggbb` or a named colour) to a terminal
/// colour, falling back to gray.
pub fn terminal_color(css: &str) -> Color {
    let css = css.trim();
    let expanded = match css.strip_prefix('#') {
        Some(hex) if hex.len() == 3 => {
            let doubled: String = hex.chars().flat_map(|ch| [ch, ch]).collect();
            format!("#{doubled}")
        }
        _ => css.to_string(),
    };
    Color::from_str(&expanded).unwrap_or(Color::Gray)
}

/// Largest cell rectangle inside `area` that displays roughly round, given
/// cells about twice as tall as they are wide.
fn round_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height.saturating_mul(2);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn extent(scene: &Scene) -> f64 {
    scene.geometry.radius + QUADRANT_LABEL_OFFSET + CANVAS_PADDING
}

fn radar_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Terminal cell holding a scene point when the radar is drawn in `area`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cell_for(scene: &Scene, area: Rect, point: Point) -> (u16, u16) {
    let square = round_area(radar_block(&scene.title).inner(area));
    let extent = extent(scene);
    let fraction = |value: f64| ((value + extent) / (2.0 * extent)).clamp(0.0, 1.0);
    let column = f64::from(square.x) + fraction(point.x) * f64::from(square.width);
    let row = f64::from(square.y) + fraction(point.y) * f64::from(square.height);
    (column as u16, row as u16)
}

pub fn render_radar(
    scene: &Scene,
    focus: Option<usize>,
    sweep_angle: f64,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let block = radar_block(&scene.title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 8 || inner.height < 4 {
        return;
    }

    if scene.markers.is_empty() && scene.skipped.is_empty() {
        let paragraph = Paragraph::new("No entries configured")
            .alignment(ratatui::layout::Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
    }

    let geometry = scene.geometry;
    let extent = extent(scene);
    let grid = terminal_color(&scene.grid);
    let square = round_area(inner);

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                // Scene coordinates grow downwards, the canvas grows upwards.
                for ring in &scene.rings {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 0.0,
                        radius: ring.radius,
                        color: grid,
                    });
                }

                for axis in &scene.axes {
                    ctx.draw(&CanvasLine {
                        x1: axis.from.x,
                        y1: -axis.from.y,
                        x2: axis.to.x,
                        y2: -axis.to.y,
                        color: grid,
                    });
                }

                let sweep_x = sweep_angle.cos() * geometry.radius;
                let sweep_y = sweep_angle.sin() * geometry.radius;
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: sweep_x,
                    y2: sweep_y,
                    color: Color::DarkGray,
                });

                ctx.layer();

                for ring in &scene.rings {
                    ctx.print(
                        -(ring.label.chars().count() as f64) * 2.0,
                        -ring.label_y,
                        Span::styled(
                            ring.label.clone(),
                            Style::default()
                                .fg(terminal_color(&ring.color))
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                }

                for label in &scene.quadrant_labels {
                    let half_width = label.text.chars().count() as f64 * 2.0;
                    ctx.print(
                        label.position.x - half_width,
                        -label.position.y,
                        Span::styled(
                            label.text.clone(),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                    );
                }

                for (index, marker) in scene.markers.iter().enumerate() {
                    let position = marker.position();
                    let color = terminal_color(&marker.fill);
                    ctx.draw(&Points {
                        coords: &[(position.x, -position.y)],
                        color,
                    });

                    let text = if marker.is_new() {
                        format!("▲{}", marker.number())
                    } else {
                        marker.number_label()
                    };
                    let mut style = Style::default().fg(Color::Black).bg(color);
                    if focus == Some(index) {
                        style = style
                            .fg(Color::White)
                            .bg(Color::Black)
                            .add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    ctx.print(position.x, -position.y, Span::styled(text, style));
                }
            })
            .x_bounds([-extent, extent])
            .y_bounds([-extent, extent]),
        square,
    );
}
