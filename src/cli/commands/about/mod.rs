//! The `about` command.
//!
//! Resolves a single subcommand token and runs the matching report.

pub mod report;
pub mod subcommand;

pub use subcommand::{help_lines, normalize, AboutSubcommand};

use std::io;

use crate::apache::{ApacheDetector, InstallationDetector};
use crate::cli::args::AboutArgs;
use crate::error::Result;
use crate::platform::{PlatformConfig, PlatformInfo, SystemPlatform};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Builds the Apache detector for `detect-apache2`.
pub type DetectorFactory = Box<dyn Fn(&dyn PlatformInfo) -> Box<dyn InstallationDetector>>;

/// Detector writing to stdout, searching the platform's search path.
fn stdout_detector(platform: &dyn PlatformInfo) -> Box<dyn InstallationDetector> {
    Box::new(ApacheDetector::new(
        Box::new(io::stdout()),
        platform.search_path().to_vec(),
    ))
}

/// Where the command gets its platform from.
enum PlatformSource {
    Ready(Box<dyn PlatformInfo>),
    /// Resolved on first use, so reports that need no layout never fail on
    /// a broken one.
    Discover(PlatformConfig),
}

/// The `about` command implementation.
pub struct AboutCommand {
    args: AboutArgs,
    platform: PlatformSource,
    detector_factory: DetectorFactory,
}

impl AboutCommand {
    /// Create a new about command reporting on `platform`.
    pub fn new(args: AboutArgs, platform: Box<dyn PlatformInfo>) -> Self {
        Self::with_source(args, PlatformSource::Ready(platform))
    }

    /// Create a new about command reporting on the installation described
    /// by `config`.
    pub fn discover(args: AboutArgs, config: PlatformConfig) -> Self {
        Self::with_source(args, PlatformSource::Discover(config))
    }

    fn with_source(args: AboutArgs, platform: PlatformSource) -> Self {
        Self {
            args,
            platform,
            detector_factory: Box::new(stdout_detector),
        }
    }

    /// Replace how the Apache detector is built.
    pub fn with_detector_factory(mut self, factory: DetectorFactory) -> Self {
        self.detector_factory = factory;
        self
    }

    /// The subcommand this invocation resolves to.
    pub fn subcommand(&self) -> AboutSubcommand {
        AboutSubcommand::parse(self.args.argv.first().map(String::as_str).unwrap_or(""))
    }

    fn platform<'a>(
        &'a self,
        discovered: &'a mut Option<SystemPlatform>,
    ) -> Result<&'a dyn PlatformInfo> {
        match &self.platform {
            PlatformSource::Ready(platform) => Ok(platform.as_ref()),
            PlatformSource::Discover(config) => {
                Ok(discovered.insert(SystemPlatform::discover(config)?))
            }
        }
    }

    fn show_help(ui: &mut dyn UserInterface) {
        for line in help_lines() {
            ui.message(&line);
        }
    }
}

impl Command for AboutCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let subcommand = self.subcommand();
        tracing::debug!("Resolved about subcommand: {:?}", subcommand);

        if !subcommand.needs_layout() {
            return Ok(Self::report_without_layout(subcommand, ui));
        }

        let mut discovered = None;
        let platform = self.platform(&mut discovered)?;
        self.report(subcommand, platform, ui)
    }
}

impl AboutCommand {
    fn report_without_layout(
        subcommand: AboutSubcommand,
        ui: &mut dyn UserInterface,
    ) -> CommandResult {
        match subcommand {
            AboutSubcommand::Version => report::version(ui),
            AboutSubcommand::Help => {
                Self::show_help(ui);
                CommandResult::success()
            }
            other => {
                tracing::debug!("Unknown about subcommand {:?}", other);
                Self::show_help(ui);
                CommandResult::failure(1)
            }
        }
    }

    fn report(
        &self,
        subcommand: AboutSubcommand,
        platform: &dyn PlatformInfo,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let locations = platform.locations();

        let result = match subcommand {
            AboutSubcommand::Root => report::show_path(ui, platform.source_root()),
            AboutSubcommand::RubyLibdir => report::show_path(ui, locations.ruby_libdir()),
            AboutSubcommand::IncludeDir => report::show_path(ui, locations.include_dir()),
            AboutSubcommand::NginxAddonDir => {
                report::show_path(ui, locations.nginx_module_source_dir())
            }
            AboutSubcommand::NginxLibs => report::nginx_libs(platform, ui),
            AboutSubcommand::Compiled => report::compiled(platform),
            AboutSubcommand::NativelyPackaged => report::predicate(platform.natively_packaged()),
            AboutSubcommand::InstalledFromReleasePackage => {
                report::predicate(platform.installed_from_release_package())
            }
            AboutSubcommand::MakeLocationsIni => report::make_locations_ini(platform, ui),
            AboutSubcommand::DetectApache2 => {
                let mut detector = (self.detector_factory)(platform);
                report::detect_apache2(detector.as_mut())?
            }
            AboutSubcommand::RubyCommand => report::ruby_command(platform, ui),
            AboutSubcommand::RubyextCompatId => report::rubyext_compat_id(platform, ui),
            AboutSubcommand::CxxCompatId => report::cxx_compat_id(platform, ui),
            other => Self::report_without_layout(other, ui),
        };

        Ok(result)
    }
}
