//! passenger-config - Information about a Phusion Passenger installation.
//!
//! Answers questions that build scripts and administrators ask about an
//! installation: where its directories are, whether its runtime libraries
//! are compiled, which Apache installations and Ruby interpreters exist on
//! the host, and which binary compatibility identifiers apply.
//!
//! # Modules
//!
//! - [`apache`] - Apache installation discovery
//! - [`cli`] - Command-line interface and argument parsing
//! - [`common_library`] - Link objects of the shared runtime library
//! - [`constants`] - Product name, version and environment variable names
//! - [`error`] - Error types and result aliases
//! - [`locations`] - Installation layout and locations.ini parsing
//! - [`platform`] - Host platform and Ruby interpreter facts
//! - [`shell`] - External command execution and PATH lookup
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use passenger_config::locations::Locations;
//!
//! let locations = Locations::from_source_root(Path::new("/opt/passenger"), None);
//! assert_eq!(locations.bin_dir(), Path::new("/opt/passenger/bin"));
//! assert!(!locations.natively_packaged());
//! ```

pub mod apache;
pub mod cli;
pub mod common_library;
pub mod constants;
pub mod error;
pub mod locations;
pub mod platform;
pub mod shell;
pub mod ui;

pub use error::{PassengerError, Result};
