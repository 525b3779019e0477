//! Visual theme and styling.

use console::Style;

/// Styles for notices written to stderr.
#[derive(Debug, Clone)]
pub struct PassengerTheme {
    /// Style for warning notices (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
}

impl Default for PassengerTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PassengerTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            warning: Style::new(),
            error: Style::new(),
        }
    }

    /// Format a warning notice.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(msg))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(msg))
    }
}

/// Check if colors should be enabled for notices.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Notices go to stderr
    console::Term::stderr().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_leaves_text_untouched() {
        let theme = PassengerTheme::plain();
        assert_eq!(theme.format_warning("careful"), "careful");
        assert_eq!(theme.format_error("broken"), "broken");
    }

    #[test]
    fn default_theme_keeps_message_text() {
        let theme = PassengerTheme::default();
        assert!(theme.format_warning("careful").contains("careful"));
        assert!(theme.format_error("broken").contains("broken"));
    }
}
