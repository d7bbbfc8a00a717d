//! Mapping from terminal events to stack actions.

use crate::types::StackAction;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// Map a key press to an action.
pub fn handle_key_event(key: KeyEvent) -> Option<StackAction> {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(StackAction::Activate),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(StackAction::Restart),
        _ => None,
    }
}

/// Map any terminal event. Only key presses and left-button presses count;
/// repeats and releases are dropped.
pub fn handle_event(event: &Event) -> Option<StackAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(*key),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(StackAction::Activate)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_activate_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(StackAction::Activate)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(StackAction::Activate)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Left)), None);
    }

    #[test]
    fn test_restart_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(StackAction::Restart)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(StackAction::Restart)
        );
    }

    #[test]
    fn test_left_click_activates() {
        assert_eq!(
            handle_event(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(StackAction::Activate)
        );
        assert_eq!(handle_event(&mouse(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(handle_event(&mouse(MouseEventKind::Up(MouseButton::Left))), None);
        assert_eq!(handle_event(&mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_repeat_and_release_are_ignored() {
        let repeat = KeyEvent::new_with_kind_and_state(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
            KeyEventState::NONE,
        );
        let release = KeyEvent::new_with_kind(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(handle_event(&Event::Key(repeat)), None);
        assert_eq!(handle_event(&Event::Key(release)), None);
        assert_eq!(
            handle_event(&Event::Key(KeyEvent::from(KeyCode::Char(' ')))),
            Some(StackAction::Activate)
        );
        assert_eq!(handle_event(&Event::Resize(80, 24)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char(' '))));
    }
}
