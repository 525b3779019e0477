//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which resolves the
//! installation layout once and hands it to the command.

pub mod about;
pub mod dispatcher;

pub use about::AboutCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
