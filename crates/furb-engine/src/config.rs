//! Settings: which checks run and how results are reported.
//!
//! Loaded from `furb.toml`, or from the `[tool.furb]` table of a
//! `pyproject.toml`:
//!
//! ```toml
//! [tool.furb]
//! ignore = ["FURB101"]
//! enable = [103]
//! sort_by = "error"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::check::Check;
use crate::diagnostic::ErrorCode;

/// Dedicated settings file name.
pub const SETTINGS_FILE: &str = "furb.toml";

/// Python project file that may carry a `[tool.furb]` table.
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML, unknown key or malformed error code
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Order in which reporters print diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// By file, then position
    File,
    /// By error code, then file and position
    Error,
}

/// Reporter output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

macro_rules! impl_keyword {
    ($ty:ident { $($text:literal => $variant:ident),* $(,)? }) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)*
                    _ => Err(format!(
                        "invalid value '{}', expected one of: {}",
                        s,
                        [$($text),*].join(", ")
                    )),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $($ty::$variant => $text,)*
                })
            }
        }
    };
}

impl_keyword!(SortBy { "file" => File, "error" => Error });
impl_keyword!(OutputFormat { "text" => Text, "json" => Json });

/// User settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Codes dropped from the output
    pub ignore: Vec<ErrorCode>,

    /// Codes always registered
    pub enable: Vec<ErrorCode>,

    /// Codes never registered, unless also in `enable`
    pub disable: Vec<ErrorCode>,

    /// Register every check, including ones disabled by default
    pub enable_all: bool,

    /// Register only checks listed in `enable`
    pub disable_all: bool,

    /// Suppress the trailing hint
    pub quiet: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

#[derive(Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: Option<Tool>,
}

#[derive(Deserialize)]
struct Tool {
    #[serde(default)]
    furb: Option<Settings>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `check` should be registered.
    ///
    /// Precedence: `enable`, then `disable`, then `enable_all`, then
    /// `disable_all`, then the check's own default.
    pub fn is_enabled(&self, check: &Check) -> bool {
        let code = check.error_code();
        if self.enable.contains(&code) {
            true
        } else if self.disable.contains(&code) {
            false
        } else if self.enable_all {
            true
        } else if self.disable_all {
            false
        } else {
            check.enabled
        }
    }

    /// Whether diagnostics with `code` are dropped from the output.
    pub fn is_ignored(&self, code: u32) -> bool {
        self.ignore.contains(&ErrorCode(code))
    }

    /// Layer `other` (e.g. command-line flags) over these settings: lists
    /// are extended, flags are OR-ed, and set options replace ours.
    pub fn merge(&mut self, other: Settings) {
        self.ignore.extend(other.ignore);
        self.enable.extend(other.enable);
        self.disable.extend(other.disable);
        self.enable_all |= other.enable_all;
        self.disable_all |= other.disable_all;
        self.quiet |= other.quiet;
        if other.sort_by.is_some() {
            self.sort_by = other.sort_by;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
    }

    /// Effective output format.
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Load settings from a file.
    ///
    /// A `pyproject.toml` contributes only its `[tool.furb]` table; when the
    /// table is missing the defaults are returned.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_err = |source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        };

        if is_pyproject(path) {
            let project: PyProject = toml::from_str(&content).map_err(parse_err)?;
            Ok(project.tool.and_then(|tool| tool.furb).unwrap_or_default())
        } else {
            toml::from_str(&content).map_err(parse_err)
        }
    }

    /// Walk up from `start` to find the nearest settings file.
    ///
    /// In each directory `furb.toml` wins over `pyproject.toml`; a
    /// `pyproject.toml` without a `[tool.furb]` table is passed over.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>, SettingsError> {
        for dir in start.ancestors() {
            let candidate = dir.join(SETTINGS_FILE);
            if candidate.is_file() {
                let settings = Self::load(&candidate)?;
                return Ok(Some((candidate, settings)));
            }

            let candidate = dir.join(PYPROJECT_FILE);
            if candidate.is_file() && has_furb_table(&candidate)? {
                let settings = Self::load(&candidate)?;
                return Ok(Some((candidate, settings)));
            }
        }
        Ok(None)
    }
}

fn is_pyproject(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == PYPROJECT_FILE)
}

fn has_furb_table(path: &Path) -> Result<bool, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: toml::Table = toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(value
        .get("tool")
        .and_then(|tool| tool.get("furb"))
        .is_some())
}
