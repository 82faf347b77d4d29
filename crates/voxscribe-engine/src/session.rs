/// Returned when a session completes without any recognized speech.
pub const NO_SPEECH: &str = "(No speech detected)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    None,
    Completed,
    Canceled,
    TimedOut,
}

/// Accumulated state of one recognition session.
///
/// Text grows append-only while the session runs; the first terminal
/// transition wins and freezes the state against any later event.
#[derive(Debug)]
pub struct SessionState {
    accumulated: String,
    terminal: Terminal,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            accumulated: String::new(),
            terminal: Terminal::None,
        }
    }

    pub fn append(&mut self, text: &str) {
        if self.terminal != Terminal::None {
            return;
        }
        self.accumulated.push_str(text);
        self.accumulated.push(' ');
    }

    pub fn has_speech(&self) -> bool {
        !self.accumulated.trim().is_empty()
    }

    /// First terminal transition wins; later calls are ignored.
    pub fn settle(&mut self, terminal: Terminal) {
        if self.terminal == Terminal::None && terminal != Terminal::None {
            self.terminal = terminal;
        }
    }

    pub fn terminal(&self) -> Terminal {
        self.terminal
    }

    pub fn final_text(&self) -> String {
        let text = self.accumulated.trim();
        if text.is_empty() {
            NO_SPEECH.to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
