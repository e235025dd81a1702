// File: ./src/tui/handlers.rs
// Maps key presses onto state changes.
use crate::tui::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE: u16 = 10;

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => state.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true
        }
        KeyCode::Enter => state.submit(),
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Char(c) => state.input.push(c),
        KeyCode::PageUp => state.scroll_up(PAGE),
        KeyCode::PageDown => state.scroll_down(PAGE),
        KeyCode::Up => state.scroll_up(1),
        KeyCode::Down => state.scroll_down(1),
        _ => {}
    }
}
