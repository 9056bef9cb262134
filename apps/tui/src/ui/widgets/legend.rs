use radar_core::legend::{LEGEND_TITLE, NEW_FLAG};
use radar_core::{Legend, LegendView, Marker};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Builds the legend text. Collapsed, each quadrant shows only its heading
/// and entry count; expanded, every ring group and entry is listed.
pub fn legend_lines(
    legend: &Legend,
    view: LegendView,
    focused: Option<&Marker>,
) -> Vec<TextLine<'static>> {
    let mut lines = Vec::new();
    let focused_number = focused.map(Marker::number);

    for section in &legend.sections {
        let count: usize = section.rings.iter().map(|group| group.items.len()).sum();
        lines.push(TextLine::from(vec![
            Span::styled(
                section.heading.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({count})"), Style::default().fg(Color::Gray)),
        ]));

        if !view.is_expanded() {
            continue;
        }

        for group in &section.rings {
            lines.push(TextLine::from(Span::styled(
                format!("  {}", group.heading),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for item in &group.items {
                let mut style = Style::default();
                if focused_number == Some(item.number) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                let mut spans = vec![Span::styled(format!("    {}", item.text()), style)];
                if item.is_new() {
                    spans.push(Span::styled(
                        format!(" {NEW_FLAG}"),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                lines.push(TextLine::from(spans));
            }
        }
        lines.push(TextLine::from(""));
    }

    lines
}

pub fn render_legend(
    legend: &Legend,
    view: LegendView,
    focused: Option<&Marker>,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {LEGEND_TITLE} "))
        .title_bottom(format!(" l: {} ", view.button_label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = if legend.is_empty() {
        Text::from(Span::styled("No entries", Style::default().fg(Color::Gray)))
    } else {
        Text::from(legend_lines(legend, view, focused))
    };

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::test_app;
    use color_eyre::Result;

    fn plain(lines: &[TextLine<'_>]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn collapsed_legend_lists_only_quadrant_headings() -> Result<()> {
        let app = test_app()?;
        let lines = plain(&legend_lines(&app.legend, LegendView::collapsed(), None));
        assert_eq!(lines, vec!["PLATFORM (1)".to_string(), "TOOLS (1)".to_string()]);
        Ok(())
    }

    #[test]
    fn expanded_legend_flags_new_entries() -> Result<()> {
        let app = test_app()?;
        let mut view = LegendView::collapsed();
        view.toggle();
        let lines = plain(&legend_lines(&app.legend, view, None));

        assert!(lines.contains(&"    1. X".to_string()));
        assert!(lines.contains(&format!("    3. Y {NEW_FLAG}")));
        Ok(())
    }
}
