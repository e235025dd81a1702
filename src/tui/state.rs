// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::controller::Lict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Lict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogEntry {
    pub speaker: Speaker,
    pub text: String,
}

pub struct AppState {
    pub lict: Lict,
    pub dialog: Vec<DialogEntry>,
    pub input: String,
    /// Lines scrolled up from the bottom of the dialog. 0 follows new replies.
    pub scroll_back: u16,
    pub should_quit: bool,
    /// Set when `bye` ended the session, so the farewell stays visible briefly.
    pub said_bye: bool,
}

impl AppState {
    pub fn new(lict: Lict) -> Self {
        let mut dialog = vec![DialogEntry {
            speaker: Speaker::Lict,
            text: lict.greeting(),
        }];
        if let Some(warning) = lict.load_warning() {
            dialog.push(DialogEntry {
                speaker: Speaker::Lict,
                text: warning.to_string(),
            });
        }
        Self {
            lict,
            dialog,
            input: String::new(),
            scroll_back: 0,
            should_quit: false,
            said_bye: false,
        }
    }

    /// Sends the input box to the controller and appends both sides of the exchange.
    pub fn submit(&mut self) {
        let input = std::mem::take(&mut self.input);
        if input.trim().is_empty() {
            return;
        }
        let response = self.lict.get_response(&input);
        self.dialog.push(DialogEntry {
            speaker: Speaker::User,
            text: input,
        });
        self.dialog.push(DialogEntry {
            speaker: Speaker::Lict,
            text: response.text,
        });
        self.scroll_back = 0;
        if response.is_exit {
            self.said_bye = true;
            self.should_quit = true;
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }
}
