//! Capturing external command output.

use std::ffi::OsStr;
use std::process::{Command, Stdio};

use crate::error::{PassengerError, Result};

/// Output of a finished command.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CapturedOutput {
    /// Stdout followed by stderr, for tools that print banners on either.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}

/// Run `program` with `args` and capture its output.
///
/// Stdin is closed. Fails only when the program cannot be started; a
/// non-zero exit is reported through [`CapturedOutput::success`].
pub fn capture<P, I, S>(program: P, args: I) -> Result<CapturedOutput>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let args: Vec<_> = args
        .into_iter()
        .map(|a| a.as_ref().to_os_string())
        .collect();
    let command_line = describe(program, &args);

    tracing::debug!("Running {}", command_line);

    let output = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            tracing::debug!("Failed to start {}: {}", command_line, e);
            PassengerError::CommandFailed {
                command: command_line.clone(),
                code: None,
            }
        })?;

    Ok(CapturedOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    })
}

fn describe(program: &OsStr, args: &[std::ffi::OsString]) -> String {
    let mut parts = vec![program.to_string_lossy().to_string()];
    parts.extend(args.iter().map(|a| a.to_string_lossy().to_string()));
    parts.join(" ")
}
