use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::widgets::popup::{centered_rect, ClearWidget};

const SHORTCUTS: [(&str, &str); 10] = [
    ("Tab / Right / Down", "Focus the next entry"),
    ("Shift-Tab / Left / Up", "Focus the previous entry"),
    ("Enter / Space", "Show details for the focused entry"),
    ("Esc", "Close the details"),
    ("Click", "Close the details"),
    ("l", "Show or hide the full legend"),
    ("r", "Lay the entries out again"),
    ("p", "Pause the sweep"),
    ("?", "Toggle this help popup"),
    ("q", "Quit"),
];

pub fn help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Tech Radar",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Entries are numbered in the order they appear in the configuration."),
        TextLine::from("A triangle marks entries that are new or moved in."),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    lines.extend(SHORTCUTS.iter().map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(
                format!("  {key}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" - {action}")),
        ])
    }));

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "Command Line:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.extend(
        crate::cli::CliArgs::help_text()
            .lines()
            .map(|line| TextLine::from(line.to_string())),
    );

    lines
}

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    f.render_widget(
        Paragraph::new(Text::from(help_lines()))
            .block(help_block)
            .wrap(Wrap { trim: true }),
        popup_area,
    );

    let hint = Paragraph::new(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_shortcut_and_the_cli_usage() {
        let text: Vec<String> = help_lines().iter().map(ToString::to_string).collect();
        for (key, _) in SHORTCUTS {
            assert!(text.iter().any(|line| line.contains(key)), "missing {key}");
        }
        assert!(text.iter().any(|line| line.contains("--seed")));
    }
}
