//! Integration tests for the passenger-config binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use passenger_config::common_library::{boost_oxt_library, nginx_common_library};
use passenger_config::locations::RequiredField;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A passenger-config invocation isolated from the caller's environment.
fn passenger_config(root: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("passenger-config"));
    cmd.env_remove("PASSENGER_LOCATION_CONFIGURATION_FILE")
        .env_remove("PASSENGER_BUILDOUT_DIR")
        .env_remove("PASSENGER_RUBY")
        .env_remove("RUST_LOG")
        .env("PASSENGER_ROOT", root);
    cmd
}

/// Like [`passenger_config`], with an empty PATH directory.
fn isolated(root: &Path, path_dir: &Path) -> Command {
    let mut cmd = passenger_config(root);
    cmd.env("PATH", path_dir);
    cmd
}

fn native_ini(dir: &Path, method: &str) -> std::path::PathBuf {
    let mut text = format!(
        "[locations]\nnatively_packaged=true\nnative_packaging_method={}\n",
        method
    );
    for field in RequiredField::ALL {
        text.push_str(&format!("{}=/usr/share/passenger/{}\n", field.name(), field.name()));
    }
    let path = dir.join("locations.ini");
    fs::write(&path, text).unwrap();
    path
}

#[cfg(unix)]
fn fake_ruby(dir: &Path, output: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("fake-ruby");
    fs::write(&path, format!("#!/bin/sh\necho '{}'\n", output)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn about_version_prints_version_only() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .args(["about", "version"])
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn about_root_accepts_bare_word_and_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let expected = format!("{}\n", temp.path().display());

    for token in ["root", "--root"] {
        passenger_config(temp.path())
            .args(["about", token])
            .assert()
            .success()
            .stdout(expected.clone());
    }
    Ok(())
}

#[test]
fn about_unknown_subcommand_shows_help_and_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .args(["about", "bogus"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: passenger-config about <SUBCOMMAND>"));
    Ok(())
}

#[test]
fn about_without_subcommand_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .arg("about")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Available subcommands:"));
    Ok(())
}

#[test]
fn about_help_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    for token in ["help", "--help"] {
        passenger_config(temp.path())
            .args(["about", token])
            .assert()
            .success()
            .stdout(predicate::str::contains("make-locations-ini"));
    }
    Ok(())
}

#[test]
fn make_locations_ini_for_source_tree() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .args(["about", "make-locations-ini"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[locations]\nnatively_packaged=false\n"))
        .stdout(predicate::str::contains(format!(
            "bin_dir={}\n",
            temp.path().join("bin").display()
        )))
        .stdout(predicate::str::contains("native_packaging_method").not());
    Ok(())
}

#[test]
fn natively_packaged_install_from_locations_ini() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let ini = native_ini(temp.path(), "deb");

    passenger_config(temp.path())
        .arg("--locations-ini")
        .arg(&ini)
        .args(["about", "natively-packaged"])
        .assert()
        .success()
        .stdout("");

    passenger_config(temp.path())
        .arg("--locations-ini")
        .arg(&ini)
        .args(["about", "make-locations-ini"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "[locations]\nnatively_packaged=true\nnative_packaging_method=deb\n",
        ));

    passenger_config(temp.path())
        .arg("--locations-ini")
        .arg(&ini)
        .args(["about", "ruby-libdir"])
        .assert()
        .success()
        .stdout("/usr/share/passenger/ruby_libdir\n");
    Ok(())
}

#[test]
fn source_tree_is_not_natively_packaged() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .args(["about", "--natively-packaged"])
        .assert()
        .code(1)
        .stdout("");
    Ok(())
}

#[test]
fn broken_locations_ini_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let ini = temp.path().join("locations.ini");
    let text = "[locations]\nnatively_packaged=true\nbin_dir=/usr/bin\n";
    fs::write(&ini, text)?;

    passenger_config(temp.path())
        .arg("--locations-ini")
        .arg(&ini)
        .args(["about", "root"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("missing"));
    Ok(())
}

#[test]
fn usage_and_version_ignore_broken_locations_ini() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let ini = temp.path().join("missing.ini");

    for token in ["version", "help"] {
        passenger_config(temp.path())
            .arg("--locations-ini")
            .arg(&ini)
            .args(["about", token])
            .assert()
            .success();
    }

    passenger_config(temp.path())
        .arg("--locations-ini")
        .arg(&ini)
        .args(["about", "root"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn compiled_checks_runtime_libraries() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .args(["about", "compiled"])
        .assert()
        .code(1);

    let lib_dir = temp.path().join("buildout");
    let mut artifacts = nginx_common_library(&lib_dir).link_objects();
    artifacts.push(boost_oxt_library(&lib_dir));
    for artifact in artifacts {
        fs::create_dir_all(artifact.parent().unwrap())?;
        fs::write(&artifact, "")?;
    }

    passenger_config(temp.path())
        .args(["about", "compiled"])
        .assert()
        .success()
        .stdout("");
    Ok(())
}

#[test]
fn buildout_dir_relocates_runtime_libraries() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let buildout = temp.path().join("elsewhere");

    passenger_config(temp.path())
        .arg("--buildout-dir")
        .arg(&buildout)
        .args(["about", "nginx-libs"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(format!(
            " {}\n",
            buildout.join("common").join("libboost_oxt.a").display()
        )));
    Ok(())
}

#[test]
fn nginx_libs_prints_single_line() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let lib_dir = temp.path().join("buildout");
    let expected = format!(
        "{} {}\n",
        nginx_common_library(&lib_dir).link_objects_as_string(),
        boost_oxt_library(&lib_dir).display()
    );

    passenger_config(temp.path())
        .args(["about", "nginx-libs"])
        .assert()
        .success()
        .stdout(expected);
    Ok(())
}

#[test]
fn installed_from_release_package_checks_marker() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .args(["about", "installed-from-release-package"])
        .assert()
        .code(1);

    fs::create_dir_all(temp.path().join("resources"))?;
    fs::write(temp.path().join("resources").join("release.txt"), "")?;

    passenger_config(temp.path())
        .args(["about", "installed-from-release-package"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn cxx_compat_id_is_printed() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .args(["about", "cxx-compat-id"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\S+-\S+\n$")?);
    Ok(())
}

#[test]
fn rubyext_compat_id_without_ruby_is_a_notice() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty = TempDir::new()?;
    isolated(temp.path(), empty.path())
        .args(["--no-color", "about", "rubyext-compat-id"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains(
            "Unable to determine the Ruby extension binary compatibility ID",
        ));
    Ok(())
}

#[cfg(unix)]
#[test]
fn rubyext_compat_id_uses_configured_ruby() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let ruby = fake_ruby(temp.path(), "ruby-3.2.2");

    passenger_config(temp.path())
        .arg("--ruby")
        .arg(&ruby)
        .args(["about", "rubyext-compat-id"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ruby-3.2.2-"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn ruby_command_reports_configured_ruby() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty = TempDir::new()?;
    let banner = "ruby 3.2.2p53 (2023-03-30 revision e51014f9c0)";
    let ruby = fake_ruby(temp.path(), banner);

    isolated(temp.path(), empty.path())
        .arg("--ruby")
        .arg(&ruby)
        .args(["about", "ruby-command"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("  Command: {}\n", ruby.display())))
        .stdout(predicate::str::contains(
            "  Version: ruby 3.2.2p53 (2023-03-30 revision e51014f9c0)\n",
        ))
        .stdout(predicate::str::contains(format!(
            "  To use in Apache: PassengerRuby {}\n",
            ruby.display()
        )))
        .stdout(predicate::str::contains("No Ruby interpreter found in $PATH."))
        .stdout(predicate::str::contains("## Notes for RVM users"));
    Ok(())
}

#[test]
fn detect_apache2_without_apache() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty = TempDir::new()?;
    isolated(temp.path(), empty.path())
        .args(["about", "detect-apache2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Looking for possible Apache installations..."))
        .stdout(predicate::str::contains("Final autodetection results"))
        .stdout(predicate::str::contains(
            "Sorry, this program cannot find an Apache installation.",
        ));
    Ok(())
}

#[test]
fn debug_logging_stays_off_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    passenger_config(temp.path())
        .args(["--debug", "about", "root"])
        .assert()
        .success()
        .stdout(format!("{}\n", temp.path().display()))
        .stderr(predicate::str::contains("Resolved about subcommand"));
    Ok(())
}
