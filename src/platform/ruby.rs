//! Ruby interpreter queries.

use std::path::Path;

use crate::constants::RVM_RUBIES_MARKER;
use crate::error::{PassengerError, Result};
use crate::shell::capture;

/// Ruby snippet printing `<engine>-<version>`.
const ENGINE_AND_VERSION_SCRIPT: &str =
    r#"print((defined?(RUBY_ENGINE) ? RUBY_ENGINE : "ruby") + "-" + RUBY_VERSION)"#;

/// Whether `path` is an interpreter installed by RVM.
///
/// RVM rubies need RVM's environment; the wrapper scripts set it up, the
/// raw binaries under `rvm/rubies/` do not.
pub fn is_rvm_ruby(path: &Path) -> bool {
    path.to_string_lossy().contains(RVM_RUBIES_MARKER)
}

/// Run `<ruby> -v` and return its raw output without the trailing newline.
pub fn version_banner(ruby: &str) -> Result<String> {
    let output = run_through_shell(ruby, "-v")?;
    if !output.success {
        return Err(PassengerError::CommandFailed {
            command: format!("{} -v", ruby),
            code: output.exit_code,
        });
    }
    Ok(output.combined().trim_end().to_string())
}

/// Ask `ruby` for its `<engine>-<version>`, e.g. `ruby-3.2.2`.
pub fn engine_and_version(ruby: &str) -> Result<String> {
    let args = format!("-e '{}'", ENGINE_AND_VERSION_SCRIPT);
    let output = run_through_shell(ruby, &args)?;
    let text = output.stdout.trim();
    if !output.success || text.is_empty() {
        return Err(PassengerError::CommandFailed {
            command: format!("{} {}", ruby, args),
            code: output.exit_code,
        });
    }
    Ok(text.to_string())
}

/// The interpreter command may carry arguments (`/usr/bin/env ruby`), so it
/// goes through the shell.
#[cfg(unix)]
fn run_through_shell(ruby: &str, args: &str) -> Result<crate::shell::CapturedOutput> {
    capture("/bin/sh", ["-c", &format!("{} {}", ruby, args)])
}

#[cfg(not(unix))]
fn run_through_shell(ruby: &str, args: &str) -> Result<crate::shell::CapturedOutput> {
    capture("cmd", ["/C", &format!("{} {}", ruby, args)])
}
