//! `about` subcommand resolution.
//!
//! The subcommand is a single token. Versions up to 4.0.29 took bare words
//! (`about root`), later ones take flags (`about --root`); both are accepted
//! by prefixing bare words with `--` before matching.

use crate::constants::PROGRAM_NAME;

/// Prefix of the canonical subcommand form.
pub const FLAG_MARKER: &str = "--";

/// A resolved `about` subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AboutSubcommand {
    Root,
    RubyLibdir,
    IncludeDir,
    NginxAddonDir,
    NginxLibs,
    Compiled,
    NativelyPackaged,
    InstalledFromReleasePackage,
    MakeLocationsIni,
    DetectApache2,
    RubyCommand,
    RubyextCompatId,
    CxxCompatId,
    Version,
    Help,
    /// Anything else, in normalized form.
    Unknown(String),
}

impl AboutSubcommand {
    /// Every recognized subcommand.
    pub const KNOWN: [AboutSubcommand; 15] = [
        AboutSubcommand::Root,
        AboutSubcommand::RubyLibdir,
        AboutSubcommand::IncludeDir,
        AboutSubcommand::NginxAddonDir,
        AboutSubcommand::NginxLibs,
        AboutSubcommand::Compiled,
        AboutSubcommand::NativelyPackaged,
        AboutSubcommand::InstalledFromReleasePackage,
        AboutSubcommand::MakeLocationsIni,
        AboutSubcommand::DetectApache2,
        AboutSubcommand::RubyCommand,
        AboutSubcommand::RubyextCompatId,
        AboutSubcommand::CxxCompatId,
        AboutSubcommand::Version,
        AboutSubcommand::Help,
    ];

    /// Resolve a raw token (bare word or flag form). Matching is exact.
    pub fn parse(token: &str) -> Self {
        match normalize(token).as_str() {
            "--root" => AboutSubcommand::Root,
            "--ruby-libdir" => AboutSubcommand::RubyLibdir,
            "--includedir" => AboutSubcommand::IncludeDir,
            "--nginx-addon-dir" => AboutSubcommand::NginxAddonDir,
            "--nginx-libs" => AboutSubcommand::NginxLibs,
            "--compiled" => AboutSubcommand::Compiled,
            "--natively-packaged" => AboutSubcommand::NativelyPackaged,
            "--installed-from-release-package" => AboutSubcommand::InstalledFromReleasePackage,
            "--make-locations-ini" => AboutSubcommand::MakeLocationsIni,
            "--detect-apache2" => AboutSubcommand::DetectApache2,
            "--ruby-command" => AboutSubcommand::RubyCommand,
            "--rubyext-compat-id" => AboutSubcommand::RubyextCompatId,
            "--cxx-compat-id" => AboutSubcommand::CxxCompatId,
            "--version" => AboutSubcommand::Version,
            "--help" => AboutSubcommand::Help,
            other => AboutSubcommand::Unknown(other.to_string()),
        }
    }

    /// The bare-word name of a recognized subcommand.
    pub fn name(&self) -> Option<&'static str> {
        let name = match self {
            AboutSubcommand::Root => "root",
            AboutSubcommand::RubyLibdir => "ruby-libdir",
            AboutSubcommand::IncludeDir => "includedir",
            AboutSubcommand::NginxAddonDir => "nginx-addon-dir",
            AboutSubcommand::NginxLibs => "nginx-libs",
            AboutSubcommand::Compiled => "compiled",
            AboutSubcommand::NativelyPackaged => "natively-packaged",
            AboutSubcommand::InstalledFromReleasePackage => "installed-from-release-package",
            AboutSubcommand::MakeLocationsIni => "make-locations-ini",
            AboutSubcommand::DetectApache2 => "detect-apache2",
            AboutSubcommand::RubyCommand => "ruby-command",
            AboutSubcommand::RubyextCompatId => "rubyext-compat-id",
            AboutSubcommand::CxxCompatId => "cxx-compat-id",
            AboutSubcommand::Version => "version",
            AboutSubcommand::Help => "help",
            AboutSubcommand::Unknown(_) => return None,
        };
        Some(name)
    }

    /// Whether running this subcommand requires the installation layout.
    pub fn needs_layout(&self) -> bool {
        !matches!(
            self,
            AboutSubcommand::Version | AboutSubcommand::Help | AboutSubcommand::Unknown(_)
        )
    }
}

/// Prefix `token` with `--` unless it already starts with it.
pub fn normalize(token: &str) -> String {
    if token.starts_with(FLAG_MARKER) {
        token.to_string()
    } else {
        format!("{}{}", FLAG_MARKER, token)
    }
}

/// Usage text of the `about` command.
pub fn help_lines() -> Vec<String> {
    let p = PROGRAM_NAME;
    vec![
        "Usage: passenger-config about <SUBCOMMAND>".to_string(),
        format!("Show information about {}.", p),
        String::new(),
        "Available subcommands:".to_string(),
        format!("  root                     Show {}'s root directory.", p),
        format!(
            "  ruby-libdir              Show {}'s Ruby library directory.",
            p
        ),
        "  includedir               Show the Nginx runtime library headers directory.".to_string(),
        format!(
            "  nginx-addon-dir          Show {}'s Nginx addon directory.",
            p
        ),
        "  nginx-libs               Show Nginx runtime library flags.".to_string(),
        "  compiled                 Check whether runtime libraries are compiled.".to_string(),
        format!("  natively-packaged        Check whether {} is natively", p),
        "                           packaged.".to_string(),
        "  installed-from-release-package  Check whether this installation came from".to_string(),
        "                                  an official release package.".to_string(),
        "  make-locations-ini       Generate a locations.ini based on the current".to_string(),
        "                           install paths.".to_string(),
        "  detect-apache2           Autodetect Apache installations.".to_string(),
        "  ruby-command             Show the correct command for invoking the Ruby".to_string(),
        "                           interpreter.".to_string(),
        "  rubyext-compat-id        Show the Ruby extension binary compatibility ID.".to_string(),
        "  cxx-compat-id            Show the C++ binary compatibility ID.".to_string(),
        "  version                  Show the version number.".to_string(),
    ]
}
