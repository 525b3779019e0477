//! The runtime's common C++ library and its link objects.
//!
//! The common library is compiled into a set of object files. Consumers
//! such as the Nginx module link against a subset of them, picked with a
//! selector list. A selector is either a component group (every component
//! tagged with that group) or a single object name.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use passenger_config::common_library::{CommonLibrary, Selector};
//!
//! let objects = CommonLibrary::new()
//!     .only(&[Selector::Object("Utils/MD5.o")])
//!     .set_output_dir(Path::new("/build/common"))
//!     .link_objects();
//! assert_eq!(objects, vec![Path::new("/build/common/Utils/MD5.o").to_path_buf()]);
//! ```

use std::path::{Path, PathBuf};

/// A compiled component of the common library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    /// Object file name, relative to the output directory.
    pub object: &'static str,
    /// Groups this component belongs to.
    pub groups: &'static [&'static str],
}

/// Picks components out of the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Every component tagged with this group.
    Group(&'static str),
    /// The component with this object name.
    Object(&'static str),
}

impl Component {
    /// A component of the `base` group.
    pub const fn base(object: &'static str) -> Self {
        Self {
            object,
            groups: &["base"],
        }
    }

    /// A component outside every group.
    pub const fn ungrouped(object: &'static str) -> Self {
        Self {
            object,
            groups: &[],
        }
    }
}

impl Selector {
    fn matches(&self, component: &Component) -> bool {
        match self {
            Selector::Group(group) => component.groups.contains(group),
            Selector::Object(object) => component.object == *object,
        }
    }
}

/// Every component of the common library, in link order.
pub const COMMON_LIBRARY_COMPONENTS: &[Component] = &[
    Component::base("Logging.o"),
    Component::base("Exceptions.o"),
    Component::base("Utils/SystemTime.o"),
    Component::base("Utils/CachedFileStat.o"),
    Component::base("Utils/StrIntUtils.o"),
    Component::base("Utils/IOUtils.o"),
    Component::base("Utils.o"),
    Component::ungrouped("AgentsStarter.o"),
    Component::ungrouped("AgentsBase.o"),
    Component::ungrouped("ApplicationPool2/AppTypes.o"),
    Component::ungrouped("Utils/Base64.o"),
    Component::ungrouped("Utils/MD5.o"),
    Component::ungrouped("Utils/LargeFiles.o"),
    Component::ungrouped("Utils/Blowfish.o"),
    Component::ungrouped("Utils/Hashes.o"),
    Component::ungrouped("AccountsDatabase.o"),
    Component::ungrouped("BackgroundEventLoop.o"),
];

/// The components the Nginx module links against.
pub const NGINX_LIBS_SELECTOR: &[Selector] = &[
    Selector::Group("base"),
    Selector::Object("AgentsStarter.o"),
    Selector::Object("ApplicationPool2/AppTypes.o"),
    Selector::Object("Utils/Base64.o"),
    Selector::Object("Utils/MD5.o"),
    Selector::Object("Utils/LargeFiles.o"),
];

/// A view of the common library: a component subset scoped to an output
/// directory.
#[derive(Debug, Clone)]
pub struct CommonLibrary {
    components: Vec<Component>,
    output_dir: PathBuf,
}

impl Default for CommonLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl CommonLibrary {
    /// The full library, with objects relative to the current directory.
    pub fn new() -> Self {
        Self::with_components(COMMON_LIBRARY_COMPONENTS)
    }

    /// A library made of the given components.
    pub fn with_components(components: &[Component]) -> Self {
        Self {
            components: components.to_vec(),
            output_dir: PathBuf::new(),
        }
    }

    /// Keep only the components matched by any of `selectors`.
    ///
    /// Library order is preserved regardless of selector order.
    pub fn only(mut self, selectors: &[Selector]) -> Self {
        self.components
            .retain(|c| selectors.iter().any(|s| s.matches(c)));
        self
    }

    /// Set the directory the object files are built in.
    pub fn set_output_dir(mut self, dir: &Path) -> Self {
        self.output_dir = dir.to_path_buf();
        self
    }

    /// Paths of the selected object files.
    pub fn link_objects(&self) -> Vec<PathBuf> {
        self.components
            .iter()
            .map(|c| self.output_dir.join(c.object))
            .collect()
    }

    /// Link objects joined by single spaces.
    pub fn link_objects_as_string(&self) -> String {
        self.link_objects()
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Directory the Nginx flavour of the common library is built in.
pub fn nginx_output_dir(lib_dir: &Path) -> PathBuf {
    lib_dir.join("common").join("libpassenger_common")
}

/// The static support library linked alongside the common library.
pub fn boost_oxt_library(lib_dir: &Path) -> PathBuf {
    lib_dir.join("common").join("libboost_oxt.a")
}

/// The common library as the Nginx module links it.
pub fn nginx_common_library(lib_dir: &Path) -> CommonLibrary {
    CommonLibrary::new()
        .only(NGINX_LIBS_SELECTOR)
        .set_output_dir(&nginx_output_dir(lib_dir))
}
