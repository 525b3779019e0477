//! Apache installation discovery.
//!
//! An [`InstallationDetector`] holds resources for as long as it is
//! detecting (see [`ApacheDetector`]). [`detect_and_report`] is the only
//! supported way to drive one: it guarantees `finish` runs exactly once,
//! whether detection and reporting succeed, fail, or panic.

pub mod detector;

pub use detector::{ApacheDetector, ApacheInstallation, HttpdInfo};

use crate::error::Result;

/// A detector that discovers installations and reports on them.
pub trait InstallationDetector {
    /// Discover every installation.
    fn detect_all(&mut self) -> Result<()>;

    /// Write the findings to the detector's output sink.
    fn report(&mut self) -> Result<()>;

    /// Release the detector's resources.
    fn finish(&mut self);
}

/// Calls `finish` when dropped.
struct FinishGuard<'a> {
    detector: &'a mut dyn InstallationDetector,
}

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        self.detector.finish();
    }
}

/// Run a full detection pass and report the results.
///
/// The detector is finished before this returns, on every path.
pub fn detect_and_report(detector: &mut dyn InstallationDetector) -> Result<()> {
    let guard = FinishGuard { detector };
    guard.detector.detect_all()?;
    guard.detector.report()
}
