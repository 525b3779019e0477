//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] writing report lines to stdout and notices to stderr
//! - [`MockUI`] capturing output for tests
//!
//! Report output goes through [`UserInterface::message`] only, so stdout
//! stays machine-readable; warnings and errors never end up in it.
//!
//! # Example
//!
//! ```
//! use passenger_config::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("[locations]");
//! ui.warning("No Ruby interpreter found");
//! assert_eq!(ui.messages(), ["[locations]".to_string()]);
//! assert!(ui.has_warning("Ruby"));
//! ```

pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, PassengerTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Write a report line to standard output.
    fn message(&mut self, msg: &str);

    /// Display a warning notice.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}
