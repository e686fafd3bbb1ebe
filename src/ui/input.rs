/// Input state tracker.
///
/// Every action in the game is edge-triggered (move the cursor one
/// cell, drop a mirror, confirm a menu entry), so this only records
/// fresh presses per frame. Repeat events from a held arrow key still
/// arrive as presses, which gives free key-repeat cursor movement.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind};

pub struct InputState {
    /// Key codes pressed (or repeated) during the most recent
    /// drain_events() call.
    presses: Vec<KeyCode>,

    /// Raw key events collected during drain, for modifier checks.
    pub raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            presses: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events. Call once per frame.
    pub fn drain_events(&mut self) {
        self.presses.clear();
        self.raw_events.clear();

        // Read all available events without blocking
        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                self.raw_events.push(key);
                self.presses.push(key.code);
            }
        }
    }

    /// Was this key pressed this frame?
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.presses.contains(&code)
    }

    /// Convenience: was any of these keys pressed?
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    /// Check if any raw event this frame has Ctrl+C.
    pub fn ctrl_c_pressed(&self) -> bool {
        use crossterm::event::KeyModifiers;
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}
