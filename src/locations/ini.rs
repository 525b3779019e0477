//! locations.ini loading.
//!
//! Natively packaged installs ship a `locations.ini` describing where each
//! component lives:
//!
//! ```text
//! [locations]
//! natively_packaged=true
//! native_packaging_method=deb
//! bin_dir=/usr/bin
//! ...
//! ```
//!
//! Blank lines and lines starting with `;` or `#` are ignored. Keys outside
//! the `[locations]` section and unknown keys are accepted and ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{PassengerError, Result};

use super::{Locations, OptionalField, RequiredField};

/// Name of the section holding the layout.
const LOCATIONS_SECTION: &str = "locations";

/// A value read from an ini file, with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniValue {
    pub value: String,
    pub line: usize,
}

/// A parsed ini document: sections of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: BTreeMap<String, BTreeMap<String, IniValue>>,
}

impl IniDocument {
    /// Parse ini text. `path` is only used for error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut doc = IniDocument::default();
        let mut current: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.strip_suffix(']').ok_or_else(|| PassengerError::LocationsParse {
                    path: path.to_path_buf(),
                    line: line_no,
                    message: format!("unterminated section header '{}'", line),
                })?;
                let name = name.trim().to_string();
                doc.sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| PassengerError::LocationsParse {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("expected key=value, got '{}'", line),
            })?;

            let section = current.as_ref().ok_or_else(|| PassengerError::LocationsParse {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("key '{}' appears before any section", key.trim()),
            })?;

            doc.sections.entry(section.clone()).or_default().insert(
                key.trim().to_string(),
                IniValue {
                    value: value.trim().to_string(),
                    line: line_no,
                },
            );
        }

        Ok(doc)
    }

    /// Look up a value in a section.
    pub fn get(&self, section: &str, key: &str) -> Option<&IniValue> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    /// Whether the document contains a section.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }
}

/// Parse the contents of a locations.ini file located at `path`.
///
/// The source root of the resulting layout is the directory containing
/// `path`.
pub fn parse_locations_ini(text: &str, path: &Path) -> Result<Locations> {
    let doc = IniDocument::parse(text, path)?;
    let lookup = |key: &str| {
        doc.get(LOCATIONS_SECTION, key)
            .filter(|v| !v.value.is_empty())
    };

    let natively_packaged = match lookup("natively_packaged") {
        None => false,
        Some(v) if v.value == "true" => true,
        Some(v) if v.value == "false" => false,
        Some(v) => {
            return Err(PassengerError::LocationsParse {
                path: path.to_path_buf(),
                line: v.line,
                message: format!(
                    "natively_packaged must be 'true' or 'false', got '{}'",
                    v.value
                ),
            })
        }
    };

    let mut required = RequiredField::ALL.map(|_| PathBuf::new());
    for field in RequiredField::ALL {
        let value = lookup(field.name()).ok_or_else(|| PassengerError::MissingLocation {
            path: path.to_path_buf(),
            field: field.name().to_string(),
        })?;
        required[field as usize] = PathBuf::from(&value.value);
    }

    let optional = OptionalField::ALL
        .map(|field| lookup(field.name()))
        .map(|value| value.map(|v| PathBuf::from(&v.value)));

    let source_root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(Locations {
        source_root,
        natively_packaged,
        native_packaging_method: lookup("native_packaging_method").map(|v| v.value.clone()),
        required,
        optional,
    })
}

impl Locations {
    /// Load the layout of a natively packaged install from a locations.ini
    /// file.
    pub fn from_ini_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PassengerError::LocationsNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading location configuration file {}", path.display()))?;
        tracing::debug!("Loaded location configuration from {}", path.display());

        parse_locations_ini(&text, path)
    }
}
