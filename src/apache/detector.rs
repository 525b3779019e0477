//! Apache autodetection.
//!
//! Finds every `apxs`/`httpd` on the search path, asks each httpd for its
//! compile-time settings (`httpd -V`) and reports what it found. While the
//! detector is alive, its progress log is routed to the same output sink as
//! the report.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

use regex::Regex;
use tracing::info;

use crate::error::{PassengerError, Result};
use crate::shell::{capture, find_all_commands, find_command};

use super::InstallationDetector;

type SharedSink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes into the detector's shared output sink.
struct SinkWriter(SharedSink);

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut sink) => sink.write(buf),
            Err(poisoned) => poisoned.into_inner().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.lock() {
            Ok(mut sink) => sink.flush(),
            Err(poisoned) => poisoned.into_inner().flush(),
        }
    }
}

/// Compile-time settings reported by `httpd -V`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpdInfo {
    pub version: Option<String>,
    pub root: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub error_log: Option<PathBuf>,
}

impl HttpdInfo {
    /// Parse the output of `httpd -V`.
    ///
    /// Relative config and log paths are resolved against `HTTPD_ROOT`.
    pub fn parse(output: &str) -> Self {
        let version = capture_first(&RE_SERVER_VERSION, output);
        let root = capture_first(&RE_HTTPD_ROOT, output).map(PathBuf::from);

        let resolve = |value: Option<String>| {
            value.map(|v| {
                let path = PathBuf::from(v);
                match &root {
                    Some(root) if path.is_relative() => root.join(path),
                    _ => path,
                }
            })
        };

        let config_file = resolve(capture_first(&RE_SERVER_CONFIG_FILE, output));
        let error_log = resolve(capture_first(&RE_DEFAULT_ERRORLOG, output));

        Self {
            version,
            root,
            config_file,
            error_log,
        }
    }
}

// `httpd -V` patterns, compiled once.

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

lazy_regex!(RE_SERVER_VERSION, r"Server version:\s*Apache/(\S+)");
lazy_regex!(RE_HTTPD_ROOT, r#"-D\s+HTTPD_ROOT="([^"]*)""#);
lazy_regex!(RE_SERVER_CONFIG_FILE, r#"-D\s+SERVER_CONFIG_FILE="([^"]*)""#);
lazy_regex!(RE_DEFAULT_ERRORLOG, r#"-D\s+DEFAULT_ERRORLOG="([^"]*)""#);

fn capture_first(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// A discovered Apache installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApacheInstallation {
    /// The main executable.
    pub httpd: PathBuf,
    /// Apache version, e.g. `2.4.57`.
    pub version: String,
    /// The apxs that pointed at this httpd, if any.
    pub apxs: Option<PathBuf>,
    /// apachectl / apache2ctl.
    pub ctl: Option<PathBuf>,
    /// Main configuration file.
    pub config_file: Option<PathBuf>,
    /// Default error log.
    pub error_log: Option<PathBuf>,
    /// Debian-style module enabler.
    pub a2enmod: Option<PathBuf>,
}

/// Detects Apache installations and reports them to an output sink.
pub struct ApacheDetector {
    sink: SharedSink,
    search_path: Vec<PathBuf>,
    installations: Vec<ApacheInstallation>,
    log_guard: Option<tracing::subscriber::DefaultGuard>,
}

impl ApacheDetector {
    /// Create a detector writing to `sink`, searching `search_path`.
    ///
    /// Until [`InstallationDetector::finish`] is called, `info` level events
    /// on this thread are written to `sink` as plain lines.
    pub fn new(sink: Box<dyn Write + Send>, search_path: Vec<PathBuf>) -> Self {
        let sink: SharedSink = Arc::new(Mutex::new(sink));
        let log_sink = Arc::clone(&sink);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || SinkWriter(Arc::clone(&log_sink)))
            .with_max_level(tracing::Level::INFO)
            .without_time()
            .with_level(false)
            .with_target(false)
            .with_ansi(false)
            .finish();
        let log_guard = tracing::subscriber::set_default(subscriber);

        Self {
            sink,
            search_path,
            installations: Vec::new(),
            log_guard: Some(log_guard),
        }
    }

    /// Installations found by the last detection pass.
    pub fn installations(&self) -> &[ApacheInstallation] {
        &self.installations
    }

    fn find_near(&self, httpd: &Path, names: &[&str]) -> Option<PathBuf> {
        let mut dirs: Vec<PathBuf> = httpd.parent().map(Path::to_path_buf).into_iter().collect();
        dirs.extend(self.search_path.iter().cloned());
        names.iter().find_map(|name| find_command(name, &dirs))
    }

    fn httpd_from_apxs(apxs: &Path) -> Option<PathBuf> {
        let query = |var: &str| {
            capture(apxs, ["-q", var])
                .ok()
                .filter(|o| o.success)
                .map(|o| o.stdout.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let sbindir = query("SBINDIR")?;
        let target = query("TARGET")?;
        let httpd = Path::new(&sbindir).join(target);
        httpd.is_file().then_some(httpd)
    }

    fn analyze(&self, httpd: &Path, apxs: Option<PathBuf>) -> Result<ApacheInstallation> {
        let output = capture(httpd, ["-V"])?;
        if !output.success {
            return Err(PassengerError::CommandFailed {
                command: format!("{} -V", httpd.display()),
                code: output.exit_code,
            });
        }

        let settings = HttpdInfo::parse(&output.combined());
        let version = settings.version.ok_or_else(|| PassengerError::CommandFailed {
            command: format!("{} -V (no version in output)", httpd.display()),
            code: output.exit_code,
        })?;

        Ok(ApacheInstallation {
            httpd: httpd.to_path_buf(),
            version,
            apxs,
            ctl: self.find_near(httpd, &["apache2ctl", "apachectl"]),
            config_file: settings.config_file,
            error_log: settings.error_log,
            a2enmod: self.find_near(httpd, &["a2enmod"]),
        })
    }

    fn write_installation(out: &mut impl Write, install: &ApacheInstallation) -> io::Result<()> {
        writeln!(out, "* Found Apache {}!", install.version)?;
        writeln!(out, "  Information:")?;
        if let Some(apxs) = &install.apxs {
            writeln!(out, "     apxs           : {}", apxs.display())?;
        }
        writeln!(out, "     Main executable: {}", install.httpd.display())?;
        if let Some(ctl) = &install.ctl {
            writeln!(out, "     Control command: {}", ctl.display())?;
        }
        if let Some(config) = &install.config_file {
            writeln!(out, "     Config file    : {}", config.display())?;
        }
        if let Some(log) = &install.error_log {
            writeln!(out, "     Error log file : {}", log.display())?;
        }
        writeln!(out)?;

        if let Some(ctl) = &install.ctl {
            writeln!(
                out,
                "  To start, stop or restart this specific Apache version:"
            )?;
            writeln!(out, "     {} start", ctl.display())?;
            writeln!(out, "     {} stop", ctl.display())?;
            writeln!(out, "     {} restart", ctl.display())?;
            writeln!(out)?;
        }
        if let Some(a2enmod) = &install.a2enmod {
            writeln!(
                out,
                "  To enable a module for this specific Apache version:"
            )?;
            writeln!(out, "     {} <module name>", a2enmod.display())?;
            writeln!(out)?;
        }
        if let Some(log) = &install.error_log {
            writeln!(out, "  To troubleshoot, please read the logs in this file:")?;
            writeln!(out, "     {}", log.display())?;
            writeln!(out)?;
        }
        Ok(())
    }
}

impl InstallationDetector for ApacheDetector {
    fn detect_all(&mut self) -> Result<()> {
        info!("Looking for possible Apache installations...");
        self.installations.clear();

        let mut candidates: Vec<(PathBuf, Option<PathBuf>)> = Vec::new();

        for name in ["apxs2", "apxs"] {
            for apxs in find_all_commands(name, &self.search_path) {
                info!("Checking {}...", apxs.display());
                match Self::httpd_from_apxs(&apxs) {
                    Some(httpd) => {
                        info!("  --> httpd is {}", httpd.display());
                        if !candidates.iter().any(|(h, _)| *h == httpd) {
                            candidates.push((httpd, Some(apxs)));
                        }
                    }
                    None => info!("  --> cannot determine the httpd belonging to this apxs"),
                }
            }
        }

        for name in ["httpd", "apache2"] {
            for httpd in find_all_commands(name, &self.search_path) {
                if !candidates.iter().any(|(h, _)| *h == httpd) {
                    candidates.push((httpd, None));
                }
            }
        }

        for (httpd, apxs) in candidates {
            info!("Analyzing {}...", httpd.display());
            match self.analyze(&httpd, apxs) {
                Ok(install) => {
                    info!("  --> found Apache {}", install.version);
                    self.installations.push(install);
                }
                Err(e) => info!("  --> not a usable Apache installation: {}", e),
            }
        }

        Ok(())
    }

    fn report(&mut self) -> Result<()> {
        let mut out = SinkWriter(Arc::clone(&self.sink));

        writeln!(out)?;
        writeln!(out, "Final autodetection results")?;
        writeln!(out, "{}", "-".repeat(80))?;

        if self.installations.is_empty() {
            writeln!(
                out,
                "Sorry, this program cannot find an Apache installation."
            )?;
        } else {
            for install in &self.installations {
                Self::write_installation(&mut out, install)?;
            }
        }

        out.flush()?;
        Ok(())
    }

    fn finish(&mut self) {
        // Restores the previous subscriber.
        self.log_guard.take();
        if let Err(e) = SinkWriter(Arc::clone(&self.sink)).flush() {
            tracing::warn!("Failed to flush detector output: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apache::detect_and_report;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    const HTTPD_V: &str = r#"Server version: Apache/2.4.57 (Unix)
Server built:   Apr  5 2023 00:00:00
Server compiled with....
 -D APR_HAS_SENDFILE
 -D HTTPD_ROOT="/etc/httpd"
 -D SUEXEC_BIN="/usr/sbin/suexec"
 -D DEFAULT_ERRORLOG="logs/error_log"
 -D SERVER_CONFIG_FILE="conf/httpd.conf"
"#;

    #[test]
    fn parse_httpd_v_output() {
        let info = HttpdInfo::parse(HTTPD_V);
        assert_eq!(info.version.as_deref(), Some("2.4.57"));
        assert_eq!(info.root, Some(PathBuf::from("/etc/httpd")));
        assert_eq!(
            info.config_file,
            Some(PathBuf::from("/etc/httpd/conf/httpd.conf"))
        );
        assert_eq!(
            info.error_log,
            Some(PathBuf::from("/etc/httpd/logs/error_log"))
        );
    }

    #[test]
    fn parse_keeps_absolute_paths() {
        let output = "Server version: Apache/2.2.22 (Debian)
 -D HTTPD_ROOT=\"/etc/apache2\"
 -D SERVER_CONFIG_FILE=\"/etc/apache2/apache2.conf\"
";
        let info = HttpdInfo::parse(output);
        assert_eq!(
            info.config_file,
            Some(PathBuf::from("/etc/apache2/apache2.conf"))
        );
        assert_eq!(info.error_log, None);
    }

    #[test]
    fn parse_garbage_yields_nothing() {
        assert_eq!(HttpdInfo::parse("command not found"), HttpdInfo::default());
    }

    #[test]
    fn empty_search_path_reports_nothing_found() {
        let buffer = SharedBuffer::default();
        let mut detector = ApacheDetector::new(Box::new(buffer.clone()), Vec::new());

        detect_and_report(&mut detector).unwrap();

        let output = buffer.contents();
        assert!(output.contains("Final autodetection results"));
        assert!(output.contains("cannot find an Apache installation"));
        assert!(detector.installations().is_empty());
    }

    #[test]
    fn finish_is_idempotent() {
        let buffer = SharedBuffer::default();
        let mut detector = ApacheDetector::new(Box::new(buffer), Vec::new());
        detector.finish();
        detector.finish();
        assert!(detector.log_guard.is_none());
    }

    #[cfg(unix)]
    fn write_script(path: &Path, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn detects_httpd_through_apxs() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        let sbin = temp.path().join("sbin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::create_dir_all(&sbin).unwrap();

        write_script(
            &bin.join("apxs"),
            &format!(
                "case \"$2\" in\n  SBINDIR) echo '{}' ;;\n  TARGET) echo httpd ;;\nesac\n",
                sbin.display()
            ),
        );
        write_script(
            &sbin.join("httpd"),
            &format!("cat <<'EOF'\n{}EOF\n", HTTPD_V),
        );
        write_script(&sbin.join("apachectl"), "exit 0\n");

        let buffer = SharedBuffer::default();
        let mut detector = ApacheDetector::new(Box::new(buffer.clone()), vec![bin.clone()]);
        detect_and_report(&mut detector).unwrap();

        let installs = detector.installations();
        assert_eq!(installs.len(), 1);
        assert_eq!(installs[0].httpd, sbin.join("httpd"));
        assert_eq!(installs[0].version, "2.4.57");
        assert_eq!(installs[0].apxs, Some(bin.join("apxs")));
        assert_eq!(installs[0].ctl, Some(sbin.join("apachectl")));
        assert_eq!(installs[0].a2enmod, None);

        let output = buffer.contents();
        assert!(output.contains("* Found Apache 2.4.57!"));
        assert!(output.contains("Config file    : /etc/httpd/conf/httpd.conf"));
        assert!(output.contains(&format!("{} restart", sbin.join("apachectl").display())));
    }

    #[cfg(unix)]
    #[test]
    fn broken_httpd_is_skipped() {
        let temp = TempDir::new().unwrap();
        write_script(
            &temp.path().join("httpd"),
            "echo 'segfault' >&2\nexit 139\n",
        );

        let buffer = SharedBuffer::default();
        let mut detector =
            ApacheDetector::new(Box::new(buffer.clone()), vec![temp.path().to_path_buf()]);
        detect_and_report(&mut detector).unwrap();

        let output = buffer.contents();
        assert!(detector.installations().is_empty());
        assert!(output.contains("cannot find an Apache installation"));
    }
}
