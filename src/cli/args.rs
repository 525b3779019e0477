//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{BUILDOUT_DIR_ENV, LOCATIONS_INI_ENV, PASSENGER_ROOT_ENV, RUBY_ENV};
use crate::platform::PlatformConfig;

/// passenger-config - Show information about a Phusion Passenger installation.
#[derive(Debug, Parser)]
#[command(name = "passenger-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root of an originally packaged Passenger install (defaults to the
    /// directory above the one containing this executable)
    #[arg(long, env = PASSENGER_ROOT_ENV)]
    pub passenger_root: Option<PathBuf>,

    /// locations.ini of a natively packaged install (overrides --passenger-root)
    #[arg(long, env = LOCATIONS_INI_ENV)]
    pub locations_ini: Option<PathBuf>,

    /// Buildout directory of an originally packaged install
    #[arg(long, env = BUILDOUT_DIR_ENV)]
    pub buildout_dir: Option<PathBuf>,

    /// Ruby interpreter to report (defaults to the first `ruby` in PATH)
    #[arg(long, env = RUBY_ENV)]
    pub ruby: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Installation lookup settings taken from the command line.
    pub fn platform_config(&self) -> PlatformConfig {
        PlatformConfig {
            passenger_root: self.passenger_root.clone(),
            locations_ini: self.locations_ini.clone(),
            buildout_dir: self.buildout_dir.clone(),
            ruby: self.ruby.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show information about Phusion Passenger
    #[command(disable_help_flag = true, disable_version_flag = true)]
    About(AboutArgs),
}

/// Arguments for the `about` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AboutArgs {
    /// Subcommand, as a bare word (`root`) or a flag (`--root`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub argv: Vec<String>,
}
