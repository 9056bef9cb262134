pub mod helpers;
mod help;

use color_eyre::Result;
use radar_core::DismissTrigger;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::state::App;

pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return Ok(());
    }

    // An open overlay gets Escape before anything else.
    if key.code == KeyCode::Esc && app.dispatch(DismissTrigger::Escape) {
        return Ok(());
    }

    if help::handle_help_toggle(app, key.code) {
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Tab | KeyCode::Right | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Up => app.focus_prev(),
        KeyCode::Enter => {
            app.handle_marker_key("Enter");
        }
        KeyCode::Char(' ') => {
            app.handle_marker_key(" ");
        }
        KeyCode::Char('l') => app.toggle_legend(),
        KeyCode::Char('r') => app.rerender()?,
        KeyCode::Char('p') => app.toggle_animation_pause(),
        _ => {}
    }

    Ok(())
}

/// Any click closes the overlay, like a click anywhere in a page.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left | MouseButton::Right) = mouse.kind {
        app.dispatch(DismissTrigger::DocumentClick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::test_app;
    use radar_core::Marker;

    fn press(app: &mut App, code: KeyCode) -> Result<()> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click() -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn tab_then_enter_opens_overlay_and_escape_closes_it() -> Result<()> {
        let mut app = test_app()?;
        press(&mut app, KeyCode::Tab)?;
        press(&mut app, KeyCode::Enter)?;
        assert_eq!(app.overlay.current().map(|overlay| overlay.title.as_str()), Some("X"));

        press(&mut app, KeyCode::Esc)?;
        assert!(!app.overlay.is_open());
        assert!(app.running);

        press(&mut app, KeyCode::Char(' '))?;
        assert!(app.overlay.is_open());
        Ok(())
    }

    #[test]
    fn click_anywhere_dismisses() -> Result<()> {
        let mut app = test_app()?;
        press(&mut app, KeyCode::BackTab)?;
        assert_eq!(app.focused_marker().map(Marker::number), Some(3));
        press(&mut app, KeyCode::Enter)?;
        assert_eq!(
            app.overlay.current().map(|overlay| overlay.level_line()),
            Some("Level: HOLD".to_string())
        );

        handle_mouse(&mut app, click());
        assert!(!app.overlay.is_open());
        assert!(app.listeners.is_empty());
        Ok(())
    }

    #[test]
    fn legend_key_toggles_and_quit_stops() -> Result<()> {
        let mut app = test_app()?;
        press(&mut app, KeyCode::Char('l'))?;
        assert!(app.legend_view.is_expanded());
        press(&mut app, KeyCode::Char('l'))?;
        assert!(!app.legend_view.is_expanded());

        press(&mut app, KeyCode::Char('q'))?;
        assert!(!app.running);
        Ok(())
    }

    #[test]
    fn help_swallows_keys_until_closed() -> Result<()> {
        let mut app = test_app()?;
        press(&mut app, KeyCode::Char('?'))?;
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('l'))?;
        assert!(!app.legend_view.is_expanded());

        press(&mut app, KeyCode::Esc)?;
        assert!(!app.show_help);
        Ok(())
    }
}
