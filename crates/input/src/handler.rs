//! Activation debounce for terminal input.
//!
//! Terminals without key-release events report a held key as a stream of
//! presses; a short minimum gap keeps one tap from placing several layers.

use crossterm::event::Event;

use crate::map::handle_event;
use crate::types::{StackAction, ACTIVATE_DEBOUNCE_MS};

#[derive(Debug, Clone)]
pub struct InputHandler {
    since_activate_ms: u32,
    debounce_ms: u32,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_debounce_ms(ACTIVATE_DEBOUNCE_MS)
    }

    pub fn with_debounce_ms(debounce_ms: u32) -> Self {
        Self {
            // The first activation is always accepted.
            since_activate_ms: debounce_ms,
            debounce_ms,
        }
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Map an event, dropping activations that arrive inside the window.
    /// Restart is never debounced.
    pub fn handle_event(&mut self, event: &Event) -> Option<StackAction> {
        match handle_event(event)? {
            StackAction::Activate => {
                if self.since_activate_ms < self.debounce_ms {
                    return None;
                }
                self.since_activate_ms = 0;
                Some(StackAction::Activate)
            }
            StackAction::Restart => {
                self.since_activate_ms = self.debounce_ms;
                Some(StackAction::Restart)
            }
        }
    }

    /// Advance the debounce clock.
    pub fn update(&mut self, elapsed_ms: u32) {
        self.since_activate_ms = self.since_activate_ms.saturating_add(elapsed_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent};

    fn space() -> Event {
        Event::Key(KeyEvent::from(KeyCode::Char(' ')))
    }

    #[test]
    fn first_activation_is_accepted() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_event(&space()), Some(StackAction::Activate));
    }

    #[test]
    fn activations_inside_window_are_dropped() {
        let mut input = InputHandler::with_debounce_ms(100);
        assert_eq!(input.handle_event(&space()), Some(StackAction::Activate));
        input.update(50);
        assert_eq!(input.handle_event(&space()), None);
        input.update(49);
        assert_eq!(input.handle_event(&space()), None);
        input.update(1);
        assert_eq!(input.handle_event(&space()), Some(StackAction::Activate));
    }

    #[test]
    fn restart_passes_and_resets_window() {
        let mut input = InputHandler::with_debounce_ms(100);
        input.handle_event(&space());
        let r = Event::Key(KeyEvent::from(KeyCode::Char('r')));
        assert_eq!(input.handle_event(&r), Some(StackAction::Restart));
        assert_eq!(input.handle_event(&space()), Some(StackAction::Activate));
    }

    #[test]
    fn zero_debounce_accepts_everything() {
        let mut input = InputHandler::with_debounce_ms(0);
        for _ in 0..3 {
            assert_eq!(input.handle_event(&space()), Some(StackAction::Activate));
        }
    }

    #[test]
    fn update_saturates() {
        let mut input = InputHandler::with_debounce_ms(10);
        input.update(u32::MAX);
        input.update(u32::MAX);
        assert_eq!(input.handle_event(&space()), Some(StackAction::Activate));
    }
}
