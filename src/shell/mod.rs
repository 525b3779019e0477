//! External command execution and search-path lookup.

pub mod command;
pub mod path;

pub use command::{capture, CapturedOutput};
pub use path::{find_all_commands, find_command, is_executable, parse_system_path};
