//! Search-path lookup.
//!
//! Commands are resolved by walking the PATH entries ourselves rather than
//! shelling out to `which`, whose behavior varies across systems.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve the first executable named `name` in `path_entries`.
pub fn find_command(name: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    find_all_commands(name, path_entries).into_iter().next()
}

/// Resolve every executable named `name` in `path_entries`, in PATH order.
///
/// Directories listed more than once yield a single match.
pub fn find_all_commands(name: &str, path_entries: &[PathBuf]) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = Vec::new();
    for dir in path_entries {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(name);
        if candidate.is_file() && is_executable(&candidate) && !found.contains(&candidate) {
            found.push(candidate);
        }
    }
    found
}
