//! Process-wide constants.

/// Human-readable product name used in help texts.
pub const PROGRAM_NAME: &str = "Phusion Passenger";

/// The version reported by `about version`.
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the root of an originally packaged install.
pub const PASSENGER_ROOT_ENV: &str = "PASSENGER_ROOT";

/// Environment variable naming an explicit locations.ini file.
pub const LOCATIONS_INI_ENV: &str = "PASSENGER_LOCATION_CONFIGURATION_FILE";

/// Environment variable overriding the buildout directory of a source tree.
pub const BUILDOUT_DIR_ENV: &str = "PASSENGER_BUILDOUT_DIR";

/// Environment variable naming the Ruby interpreter to report.
pub const RUBY_ENV: &str = "PASSENGER_RUBY";

/// Path fragment identifying interpreters installed by RVM.
///
/// Such interpreters should be invoked through RVM's wrapper scripts, so
/// `about ruby-command` never recommends them directly.
pub const RVM_RUBIES_MARKER: &str = "rvm/rubies/";
