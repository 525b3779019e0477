//! Binary compatibility identifiers.
//!
//! Prebuilt native binaries are only usable on a matching platform. These
//! identifiers name that platform, e.g. `x86_64-linux` for C++ binaries and
//! `ruby-3.2.2-x86_64-linux` for Ruby extensions.

/// Operating system name as used in compatibility identifiers.
pub fn os_name() -> String {
    os_name_for(std::env::consts::OS)
}

/// CPU architecture as used in compatibility identifiers.
pub fn cpu_architecture() -> String {
    cpu_architecture_for(std::env::consts::ARCH, std::env::consts::OS)
}

/// Identifier for C++ binaries built on this platform.
pub fn cxx_binary_compatibility_id() -> String {
    format!("{}-{}", cpu_architecture(), os_name())
}

/// Identifier for Ruby native extensions, given the `<engine>-<version>`
/// reported by the interpreter.
pub fn ruby_extension_binary_compatibility_id(engine_and_version: &str) -> String {
    format!("{}-{}", engine_and_version, cxx_binary_compatibility_id())
}

fn os_name_for(os: &str) -> String {
    match os {
        "macos" => "macosx".to_string(),
        other => other.to_string(),
    }
}

fn cpu_architecture_for(arch: &str, os: &str) -> String {
    match (arch, os) {
        ("aarch64", "macos") => "arm64".to_string(),
        (arch, _) => arch.to_string(),
    }
}
