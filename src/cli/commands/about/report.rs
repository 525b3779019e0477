//! Report operations of the `about` command.
//!
//! Each operation is stateless: it queries the platform, prints through the
//! UI and says which exit code the process should end with. Only
//! filesystem-presence checks and boolean predicates produce a failure
//! code; facts that cannot be determined are reported as notices.

use std::path::Path;

use crate::apache::{detect_and_report, InstallationDetector};
use crate::common_library::{boost_oxt_library, nginx_common_library};
use crate::constants::VERSION_STRING;
use crate::error::Result;
use crate::locations::{OPTIONAL_LOCATIONS_INI_FIELDS, REQUIRED_LOCATIONS_INI_FIELDS};
use crate::platform::ruby::is_rvm_ruby;
use crate::platform::PlatformInfo;
use crate::ui::UserInterface;

use super::super::dispatcher::CommandResult;

/// Print a single path.
pub fn show_path(ui: &mut dyn UserInterface, path: &Path) -> CommandResult {
    ui.message(&path.display().to_string());
    CommandResult::success()
}

/// The linker arguments the Nginx module needs: the common library's link
/// objects followed by the boost/oxt static library.
pub fn nginx_libs_line(platform: &dyn PlatformInfo) -> String {
    let lib_dir = platform.locations().lib_dir();
    format!(
        "{} {}",
        nginx_common_library(lib_dir).link_objects_as_string(),
        boost_oxt_library(lib_dir).display()
    )
}

pub fn nginx_libs(platform: &dyn PlatformInfo, ui: &mut dyn UserInterface) -> CommandResult {
    ui.message(&nginx_libs_line(platform));
    CommandResult::success()
}

/// Succeeds when every runtime library artifact exists.
pub fn compiled(platform: &dyn PlatformInfo) -> CommandResult {
    let lib_dir = platform.locations().lib_dir();

    for object in nginx_common_library(lib_dir).link_objects() {
        if !object.exists() {
            tracing::debug!("Link object {} is missing", object.display());
            return CommandResult::failure(1);
        }
    }

    let oxt = boost_oxt_library(lib_dir);
    if oxt.exists() {
        CommandResult::success()
    } else {
        tracing::debug!("{} is missing", oxt.display());
        CommandResult::failure(1)
    }
}

/// Map a boolean answer to an exit code.
pub fn predicate(value: bool) -> CommandResult {
    if value {
        CommandResult::success()
    } else {
        CommandResult::failure(1)
    }
}

/// Lines of a locations.ini describing the current installation.
pub fn locations_ini_lines(platform: &dyn PlatformInfo) -> Vec<String> {
    let locations = platform.locations();
    let mut lines = vec![
        "[locations]".to_string(),
        format!("natively_packaged={}", platform.natively_packaged()),
    ];

    if platform.natively_packaged() {
        lines.push(format!(
            "native_packaging_method={}",
            platform.native_packaging_method().unwrap_or_default()
        ));
    }

    for field in REQUIRED_LOCATIONS_INI_FIELDS {
        lines.push(format!(
            "{}={}",
            field.name(),
            locations.get(*field).display()
        ));
    }

    for field in OPTIONAL_LOCATIONS_INI_FIELDS {
        if let Some(value) = locations.get_optional(*field) {
            lines.push(format!("{}={}", field.name(), value.display()));
        }
    }

    lines
}

pub fn make_locations_ini(
    platform: &dyn PlatformInfo,
    ui: &mut dyn UserInterface,
) -> CommandResult {
    for line in locations_ini_lines(platform) {
        ui.message(&line);
    }
    CommandResult::success()
}

/// Run the detector and report what it found.
pub fn detect_apache2(detector: &mut dyn InstallationDetector) -> Result<CommandResult> {
    detect_and_report(detector)?;
    Ok(CommandResult::success())
}

fn show_interpreter(platform: &dyn PlatformInfo, ui: &mut dyn UserInterface, ruby: &str) {
    ui.message(&format!("  Command: {}", ruby));
    let version = match platform.ruby_version_banner(ruby) {
        Ok(banner) => banner,
        Err(e) => format!("(unable to query the version: {})", e),
    };
    ui.message(&format!("  Version: {}", version));
    ui.message(&format!("  To use in Apache: PassengerRuby {}", ruby));
    ui.message(&format!("  To use in Nginx : passenger_ruby {}", ruby));
    ui.message(&format!(
        "  To use with Standalone: {} {} start",
        ruby,
        platform.locations().bin_dir().join("passenger").display()
    ));
}

/// Show how to point each integration mode at a Ruby interpreter.
pub fn ruby_command(platform: &dyn PlatformInfo, ui: &mut dyn UserInterface) -> CommandResult {
    match platform.ruby_command() {
        Some(ruby) => {
            ui.message(
                "passenger-config was invoked through the following Ruby interpreter:",
            );
            show_interpreter(platform, ui, &ruby);
        }
        None => ui.message(
            "Unable to determine the Ruby interpreter passenger-config was invoked through.",
        ),
    }
    ui.message("");

    match platform.find_command("ruby") {
        Some(path) if !is_rvm_ruby(&path) => {
            ui.message("The following Ruby interpreter was found first in $PATH:");
            show_interpreter(platform, ui, &path.display().to_string());
        }
        // RVM rubies are meant to be used through RVM's wrapper scripts.
        Some(_) => {}
        None => ui.message("No Ruby interpreter found in $PATH."),
    }

    ui.message("");
    ui.message("## Notes for RVM users");
    ui.message(
        "Do you want to know which command to use for a different Ruby interpreter? \
         'rvm use' that Ruby interpreter, then re-run 'passenger-config about ruby-command'.",
    );
    CommandResult::success()
}

pub fn rubyext_compat_id(platform: &dyn PlatformInfo, ui: &mut dyn UserInterface) -> CommandResult {
    match platform.ruby_extension_binary_compatibility_id() {
        Ok(id) => ui.message(&id),
        Err(e) => ui.warning(&format!(
            "Unable to determine the Ruby extension binary compatibility ID: {}",
            e
        )),
    }
    CommandResult::success()
}

pub fn cxx_compat_id(platform: &dyn PlatformInfo, ui: &mut dyn UserInterface) -> CommandResult {
    ui.message(&platform.cxx_binary_compatibility_id());
    CommandResult::success()
}

pub fn version(ui: &mut dyn UserInterface) -> CommandResult {
    ui.message(VERSION_STRING);
    CommandResult::success()
}
