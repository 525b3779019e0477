//! Installation layout of a Passenger install.
//!
//! A [`Locations`] value answers "where is component X installed". It is
//! resolved once at startup, either from a `locations.ini` file (natively
//! packaged installs, see [`ini`]) or derived from a source tree root
//! (originally packaged installs, see [`Locations::from_source_root`]).
//!
//! The fields written by `about make-locations-ini` are fixed, ordered
//! lists: [`REQUIRED_LOCATIONS_INI_FIELDS`] and
//! [`OPTIONAL_LOCATIONS_INI_FIELDS`]. Required fields always have a value;
//! optional fields may be absent.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use passenger_config::locations::{Locations, RequiredField};
//!
//! let locations = Locations::from_source_root(Path::new("/opt/passenger"), None);
//! assert!(!locations.natively_packaged());
//! assert_eq!(
//!     locations.get(RequiredField::NginxModuleSourceDir),
//!     Path::new("/opt/passenger/src/nginx_module")
//! );
//! ```

pub mod ini;

use std::path::{Path, PathBuf};

pub use ini::{parse_locations_ini, IniDocument};

/// A locations.ini field that must always have a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    BinDir,
    SupportBinariesDir,
    LibDir,
    HelperScriptsDir,
    ResourcesDir,
    IncludeDir,
    DocDir,
    RubyLibdir,
    NodeLibdir,
    Apache2ModulePath,
    RubyExtensionSourceDir,
    NginxModuleSourceDir,
}

impl RequiredField {
    /// Every required field, in locations.ini order.
    pub const ALL: [RequiredField; 12] = [
        RequiredField::BinDir,
        RequiredField::SupportBinariesDir,
        RequiredField::LibDir,
        RequiredField::HelperScriptsDir,
        RequiredField::ResourcesDir,
        RequiredField::IncludeDir,
        RequiredField::DocDir,
        RequiredField::RubyLibdir,
        RequiredField::NodeLibdir,
        RequiredField::Apache2ModulePath,
        RequiredField::RubyExtensionSourceDir,
        RequiredField::NginxModuleSourceDir,
    ];

    /// The key used in locations.ini.
    pub fn name(self) -> &'static str {
        match self {
            RequiredField::BinDir => "bin_dir",
            RequiredField::SupportBinariesDir => "support_binaries_dir",
            RequiredField::LibDir => "lib_dir",
            RequiredField::HelperScriptsDir => "helper_scripts_dir",
            RequiredField::ResourcesDir => "resources_dir",
            RequiredField::IncludeDir => "include_dir",
            RequiredField::DocDir => "doc_dir",
            RequiredField::RubyLibdir => "ruby_libdir",
            RequiredField::NodeLibdir => "node_libdir",
            RequiredField::Apache2ModulePath => "apache2_module_path",
            RequiredField::RubyExtensionSourceDir => "ruby_extension_source_dir",
            RequiredField::NginxModuleSourceDir => "nginx_module_source_dir",
        }
    }
}

/// A locations.ini field that may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalField {
    DownloadCacheDir,
    BuildSystemDir,
    BuildoutDir,
}

impl OptionalField {
    /// Every optional field, in locations.ini order.
    pub const ALL: [OptionalField; 3] = [
        OptionalField::DownloadCacheDir,
        OptionalField::BuildSystemDir,
        OptionalField::BuildoutDir,
    ];

    /// The key used in locations.ini.
    pub fn name(self) -> &'static str {
        match self {
            OptionalField::DownloadCacheDir => "download_cache_dir",
            OptionalField::BuildSystemDir => "build_system_dir",
            OptionalField::BuildoutDir => "buildout_dir",
        }
    }
}

/// Required fields in the order they are written to locations.ini.
pub const REQUIRED_LOCATIONS_INI_FIELDS: &[RequiredField] = &RequiredField::ALL;

/// Optional fields in the order they are written to locations.ini.
pub const OPTIONAL_LOCATIONS_INI_FIELDS: &[OptionalField] = &OptionalField::ALL;

/// Resolved installation layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    source_root: PathBuf,
    natively_packaged: bool,
    native_packaging_method: Option<String>,
    required: [PathBuf; 12],
    optional: [Option<PathBuf>; 3],
}

impl Locations {
    /// Derive the layout of an originally packaged install (a source tree
    /// or tarball) rooted at `root`.
    ///
    /// `buildout_dir` overrides `<root>/buildout` when given.
    pub fn from_source_root(root: &Path, buildout_dir: Option<PathBuf>) -> Self {
        let buildout = buildout_dir.unwrap_or_else(|| root.join("buildout"));
        let src = root.join("src");

        let required = RequiredField::ALL.map(|field| match field {
            RequiredField::BinDir => root.join("bin"),
            RequiredField::SupportBinariesDir => buildout.join("support-binaries"),
            RequiredField::LibDir => buildout.clone(),
            RequiredField::HelperScriptsDir => src.join("helper-scripts"),
            RequiredField::ResourcesDir => root.join("resources"),
            RequiredField::IncludeDir => src.clone(),
            RequiredField::DocDir => root.join("doc"),
            RequiredField::RubyLibdir => src.join("ruby_supportlib"),
            RequiredField::NodeLibdir => src.join("nodejs_supportlib"),
            RequiredField::Apache2ModulePath => buildout.join("apache2").join("mod_passenger.so"),
            RequiredField::RubyExtensionSourceDir => src.join("ruby_native_extension"),
            RequiredField::NginxModuleSourceDir => src.join("nginx_module"),
        });

        let optional = OptionalField::ALL.map(|field| match field {
            OptionalField::DownloadCacheDir => Some(root.join("download_cache")),
            OptionalField::BuildSystemDir => Some(root.to_path_buf()),
            OptionalField::BuildoutDir => Some(buildout.clone()),
        });

        Self {
            source_root: root.to_path_buf(),
            natively_packaged: false,
            native_packaging_method: None,
            required,
            optional,
        }
    }

    /// The Passenger root directory.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Whether this install came from an OS package (deb, rpm, ...).
    pub fn natively_packaged(&self) -> bool {
        self.natively_packaged
    }

    /// The packaging method of a natively packaged install.
    pub fn native_packaging_method(&self) -> Option<&str> {
        self.native_packaging_method.as_deref()
    }

    /// Whether this install was made from an official release package.
    pub fn installed_from_release_package(&self) -> bool {
        self.resources_dir().join("release.txt").exists()
    }

    /// Look up a required field.
    pub fn get(&self, field: RequiredField) -> &Path {
        &self.required[field as usize]
    }

    /// Look up an optional field.
    pub fn get_optional(&self, field: OptionalField) -> Option<&Path> {
        self.optional[field as usize].as_deref()
    }

    pub fn bin_dir(&self) -> &Path {
        self.get(RequiredField::BinDir)
    }

    pub fn lib_dir(&self) -> &Path {
        self.get(RequiredField::LibDir)
    }

    pub fn include_dir(&self) -> &Path {
        self.get(RequiredField::IncludeDir)
    }

    pub fn ruby_libdir(&self) -> &Path {
        self.get(RequiredField::RubyLibdir)
    }

    pub fn resources_dir(&self) -> &Path {
        self.get(RequiredField::ResourcesDir)
    }

    pub fn nginx_module_source_dir(&self) -> &Path {
        self.get(RequiredField::NginxModuleSourceDir)
    }
}
