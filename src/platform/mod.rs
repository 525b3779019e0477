//! Platform information about the running installation.
//!
//! Report operations never inspect the system directly; they go through the
//! [`PlatformInfo`] trait so they can be tested against fixed answers.
//! [`SystemPlatform`] is the real implementation.

pub mod binary_compat;
pub mod ruby;

use std::path::{Path, PathBuf};

use crate::error::{PassengerError, Result};
use crate::locations::Locations;
use crate::shell::{find_command, parse_system_path};

/// Facts about the installation and the host platform.
pub trait PlatformInfo {
    /// The resolved installation layout.
    fn locations(&self) -> &Locations;

    /// Directories searched for commands, in order.
    fn search_path(&self) -> &[PathBuf];

    /// The interpreter passenger-config is configured to use, if any.
    fn ruby_command(&self) -> Option<String>;

    /// Raw output of `<ruby> -v`.
    fn ruby_version_banner(&self, ruby: &str) -> Result<String>;

    /// Binary compatibility identifier for Ruby native extensions.
    fn ruby_extension_binary_compatibility_id(&self) -> Result<String>;

    /// Binary compatibility identifier for C++ binaries.
    fn cxx_binary_compatibility_id(&self) -> String;

    /// Resolve the first executable named `name` on the search path.
    fn find_command(&self, name: &str) -> Option<PathBuf> {
        find_command(name, self.search_path())
    }

    fn source_root(&self) -> &Path {
        self.locations().source_root()
    }

    fn natively_packaged(&self) -> bool {
        self.locations().natively_packaged()
    }

    fn native_packaging_method(&self) -> Option<&str> {
        self.locations().native_packaging_method()
    }

    fn installed_from_release_package(&self) -> bool {
        self.locations().installed_from_release_package()
    }
}

/// Where to find the installation and which interpreter to use.
#[derive(Debug, Clone, Default)]
pub struct PlatformConfig {
    /// Root of an originally packaged install.
    pub passenger_root: Option<PathBuf>,

    /// locations.ini of a natively packaged install. Takes precedence over
    /// `passenger_root`.
    pub locations_ini: Option<PathBuf>,

    /// Override for the buildout directory of an originally packaged install.
    pub buildout_dir: Option<PathBuf>,

    /// Interpreter command to report and query.
    pub ruby: Option<String>,
}

/// [`PlatformInfo`] backed by the real system.
#[derive(Debug, Clone)]
pub struct SystemPlatform {
    locations: Locations,
    ruby: Option<String>,
    search_path: Vec<PathBuf>,
}

impl SystemPlatform {
    /// Create a platform with an explicit layout and search path.
    pub fn new(locations: Locations, ruby: Option<String>, search_path: Vec<PathBuf>) -> Self {
        Self {
            locations,
            ruby,
            search_path,
        }
    }

    /// Resolve the installation described by `config`, using the process
    /// PATH as search path.
    pub fn discover(config: &PlatformConfig) -> Result<Self> {
        let locations = match &config.locations_ini {
            Some(ini) => Locations::from_ini_file(ini)?,
            None => {
                let root = match &config.passenger_root {
                    Some(root) => root.clone(),
                    None => source_root_from_executable()?,
                };
                tracing::debug!("Using originally packaged layout at {}", root.display());
                Locations::from_source_root(&root, config.buildout_dir.clone())
            }
        };

        Ok(Self::new(locations, config.ruby.clone(), parse_system_path()))
    }
}

impl PlatformInfo for SystemPlatform {
    fn locations(&self) -> &Locations {
        &self.locations
    }

    fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    fn ruby_command(&self) -> Option<String> {
        self.ruby.clone().or_else(|| {
            self.find_command("ruby")
                .map(|path| path.display().to_string())
        })
    }

    fn ruby_version_banner(&self, ruby: &str) -> Result<String> {
        ruby::version_banner(ruby)
    }

    fn ruby_extension_binary_compatibility_id(&self) -> Result<String> {
        let ruby = self.ruby_command().ok_or(PassengerError::RubyNotFound)?;
        let engine_and_version = ruby::engine_and_version(&ruby)?;
        Ok(binary_compat::ruby_extension_binary_compatibility_id(
            &engine_and_version,
        ))
    }

    fn cxx_binary_compatibility_id(&self) -> String {
        binary_compat::cxx_binary_compatibility_id()
    }
}

/// The executable lives in `<root>/bin`, so the root is two levels up.
fn source_root_from_executable() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| PassengerError::SourceRootUnknown {
        message: e.to_string(),
    })?;
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| PassengerError::SourceRootUnknown {
            message: format!("{} has no parent directory", exe.display()),
        })
}
