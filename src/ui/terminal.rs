//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, PassengerTheme, UserInterface};

/// Terminal UI implementation.
///
/// Report lines go to stdout and are flushed one at a time, so they stay
/// ordered relative to output of child processes sharing the terminal.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: PassengerTheme,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new() -> Self {
        let theme = if should_use_colors() {
            PassengerTheme::new()
        } else {
            PassengerTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
        self.out.flush().ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }
}
