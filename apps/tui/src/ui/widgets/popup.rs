use radar_core::DetailOverlay;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Buffer;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);

    horizontal_layout[1]
}

/// A `width` x `height` box placed just below and right of `anchor`,
/// shifted back inside `area` when it would overflow.
pub fn anchored_rect(anchor: (u16, u16), width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let max_x = area.x + area.width - width;
    let max_y = area.y + area.height - height;
    Rect {
        x: anchor.0.saturating_add(1).clamp(area.x, max_x),
        y: anchor.1.saturating_add(1).clamp(area.y, max_y),
        width,
        height,
    }
}

pub struct ClearWidget;

impl Widget for ClearWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        ratatui::widgets::Clear.render(area, buf);
    }
}

pub fn overlay_text(overlay: &DetailOverlay) -> Text<'static> {
    Text::from(vec![
        TextLine::from(Span::styled(
            overlay.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            overlay.level_line(),
            Style::default().fg(Color::Yellow),
        )),
        TextLine::from(""),
        TextLine::from(overlay.description.clone()),
    ])
}

/// Draws the entry details next to the marker cell they belong to.
pub fn render_overlay(overlay: &DetailOverlay, anchor: (u16, u16), f: &mut Frame<'_>, area: Rect) {
    let width = area.width.clamp(20, 44);
    let body_width = usize::from(width.saturating_sub(2)).max(1);
    let wrapped_rows = overlay.description.chars().count().div_ceil(body_width);
    let height = u16::try_from(wrapped_rows).unwrap_or(u16::MAX).saturating_add(5);

    let popup_area = anchored_rect(anchor, width, height, area);
    f.render_widget(ClearWidget, popup_area);

    let block = Block::default()
        .title(format!(" #{} ", overlay.number))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    f.render_widget(
        Paragraph::new(overlay_text(overlay))
            .block(block)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}
