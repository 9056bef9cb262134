// Terminal rendering for the radar viewer

pub mod help;
pub mod widgets;

use radar_core::{Legend, LegendView, RenderBackend, Scene};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use widgets::legend::render_legend;
use widgets::popup::render_overlay;
use widgets::radar::{cell_for, render_radar};

/// Draws a scene and its legend into one frame area.
pub struct FrameBackend<'a, 'f> {
    frame: &'a mut Frame<'f>,
    area: Rect,
    view: LegendView,
    focus: Option<usize>,
    sweep_angle: f64,
}

impl<'a, 'f> FrameBackend<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>, area: Rect, app: &App) -> Self {
        Self {
            frame,
            area,
            view: app.legend_view,
            focus: app.focus,
            sweep_angle: app.animation_counter,
        }
    }
}

impl RenderBackend for FrameBackend<'_, '_> {
    type Output = Rect;

    /// Returns the area the radar itself occupies.
    fn draw(&mut self, scene: &Scene, legend: &Legend) -> radar_core::Result<Rect> {
        let legend_width = if self.view.is_expanded() { 40 } else { 28 };
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(legend_width)])
            .split(self.area);

        render_radar(scene, self.focus, self.sweep_angle, self.frame, chunks[0]);
        let focused = self.focus.and_then(|index| scene.markers.get(index));
        render_legend(legend, self.view, focused, self.frame, chunks[1]);
        Ok(chunks[0])
    }
}

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Radar and legend
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area());

    let radar_area = match FrameBackend::new(f, chunks[0], app).draw(&app.scene, &app.legend) {
        Ok(area) => area,
        Err(e) => {
            log::error!("Failed to draw radar: {e}");
            chunks[0]
        }
    };

    render_status(app, f, chunks[1]);
    render_shortcuts(f, chunks[2]);

    if let Some(overlay) = app.overlay.current() {
        let anchor = cell_for(&app.scene, radar_area, overlay.anchor);
        render_overlay(overlay, anchor, f, chunks[0]);
    }

    if app.show_help {
        let area = f.area();
        help::render_help_popup(f, area);
    }
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let message = if app.animation_paused {
        format!("{} (animation paused)", app.status_message)
    } else {
        app.status_message.clone()
    };
    let style = if app.scene.skipped.is_empty() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    f.render_widget(
        Paragraph::new(Span::styled(message, style))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let shortcuts = Paragraph::new(Span::styled(
        "Tab: next  Shift-Tab: previous  Enter/Space: details  Esc: close  l: legend  r: re-render  ?: help  q: quit",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);
    f.render_widget(shortcuts, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::test_app;
    use color_eyre::Result;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(app: &App) -> Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40))?;
        terminal.draw(|f| ui(app, f))?;
        let buffer = terminal.backend().buffer();
        Ok(buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    #[test]
    fn draws_legend_and_status() -> Result<()> {
        let app = test_app()?;
        let text = screen(&app)?;
        assert!(text.contains("Technology Index"));
        assert!(text.contains("2 entries plotted, 1 skipped"));
        Ok(())
    }

    #[test]
    fn open_overlay_shows_level_and_description() -> Result<()> {
        let mut app = test_app()?;
        app.focus_prev();
        app.activate_focused();
        let text = screen(&app)?;
        assert!(text.contains("Level: HOLD"));
        assert!(text.contains("Sunsetting"));
        Ok(())
    }
}
