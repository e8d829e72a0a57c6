//! Furb engine
//!
//! Finds idiomatic-usage problems in type-resolved syntax trees. Each check
//! recognizes one pattern on one node kind and appends diagnostics with a
//! stable `FURBnnn` code.
//!
//! # Architecture
//!
//! - Every check module exposes a static [`Check`] descriptor; the variant of
//!   its [`CheckFn`] is the node kind it runs on.
//! - The [`registry`] buckets descriptors by node kind into a
//!   [`DispatchTable`].
//! - The [`dispatch`] engine walks a tree once and runs each node's bucket,
//!   containing panics per check.
//! - [`report::filter`] drops ignored codes and duplicates.
//! - [`Linter`] ties these together.
//!
//! # Example
//!
//! ```ignore
//! use furb_engine::Linter;
//!
//! let linter = Linter::new();
//! let result = linter.lint_json(tree_json, "app.json")?;
//! for d in &result.diagnostics {
//!     println!("{}:{} [{}] {}", d.line, d.display_column(), d.error_code(), d.message);
//! }
//! ```

#![warn(rust_2018_idioms)]

pub mod ast;
pub mod check;
pub mod checks;
pub mod config;
pub mod diagnostic;
pub mod dispatch;
pub mod registry;
pub mod report;
pub mod scaffold;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use ast::{MypyFile, NodeKind};
pub use check::{Check, CheckFn, ErrorInfo};
pub use config::{OutputFormat, Settings, SettingsError, SortBy};
pub use diagnostic::{Diagnostic, ErrorCode};
pub use registry::DispatchTable;

/// Errors that can occur while loading a tree to lint
#[derive(Debug, Error)]
pub enum LintError {
    /// Failed to read the tree file
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tree is not valid JSON or not a valid syntax tree
    #[error("Invalid syntax tree in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of linting a single file.
#[derive(Debug, Clone, PartialEq)]
pub struct LintResult {
    /// Diagnostics after filtering, in traversal order.
    pub diagnostics: Vec<Diagnostic>,
    /// File path that was linted.
    pub file_path: String,
}

/// The linter: a dispatch table plus settings.
#[derive(Debug, Clone)]
pub struct Linter {
    table: Cow<'static, DispatchTable>,
    settings: Settings,
}

impl Linter {
    /// Create a linter with all default checks and default settings.
    pub fn new() -> Self {
        Self {
            table: Cow::Borrowed(registry::default_table()),
            settings: Settings::default(),
        }
    }

    /// Create a linter whose checks and filtering follow `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        let table = DispatchTable::with_settings(checks::all_checks(), &settings);
        Self {
            table: Cow::Owned(table),
            settings,
        }
    }

    /// Create a linter over a custom table.
    pub fn with_table(table: DispatchTable, settings: Settings) -> Self {
        Self {
            table: Cow::Owned(table),
            settings,
        }
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Lint a tree.
    pub fn lint(&self, file: &MypyFile) -> LintResult {
        let diagnostics = dispatch::run(file, &self.table);
        LintResult {
            diagnostics: report::filter(diagnostics, &self.settings),
            file_path: file.path.clone(),
        }
    }

    /// Deserialize a tree from JSON and lint it, reporting it as `file_path`.
    pub fn lint_json(&self, json: &str, file_path: &str) -> Result<LintResult, LintError> {
        let file = MypyFile::from_json(json).map_err(|source| LintError::Json {
            path: file_path.to_string(),
            source,
        })?;
        let mut result = self.lint(&file);
        result.file_path = file_path.to_string();
        Ok(result)
    }

    /// Read a JSON tree from disk and lint it.
    pub fn lint_path(&self, path: &Path) -> Result<LintResult, LintError> {
        let json = std::fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.lint_json(&json, &path.display().to_string())
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;

    #[test]
    fn test_empty_file() {
        let result = Linter::new().lint(&file(vec![]));
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.file_path, "<string>");
    }

    #[test]
    fn test_ignore_setting_filters_output() {
        let tree = file(vec![expr_stmt(
            call(name("list", "builtins.list", pos(1, 0)), vec![], pos(1, 0)),
            pos(1, 0),
        )]);
        assert_eq!(Linter::new().lint(&tree).diagnostics.len(), 1);

        let linter = Linter::with_settings(Settings {
            ignore: vec![ErrorCode(112)],
            ..Settings::default()
        });
        assert!(linter.lint(&tree).diagnostics.is_empty());
    }

    #[test]
    fn test_disable_setting_unregisters_check() {
        let linter = Linter::with_settings(Settings {
            disable: vec![ErrorCode(112)],
            ..Settings::default()
        });
        assert!(!linter.table().contains(ErrorCode(112)));
        assert!(linter.table().contains(ErrorCode(101)));
    }

    #[test]
    fn test_lint_json_error() {
        let err = Linter::new().lint_json("{\"defs\": 3}", "bad.json").unwrap_err();
        assert!(matches!(err, LintError::Json { .. }));
        assert!(err.to_string().starts_with("Invalid syntax tree in bad.json"));
    }

    #[test]
    fn test_lint_path_missing_file() {
        let err = Linter::new()
            .lint_path(Path::new("/nonexistent/tree.json"))
            .unwrap_err();
        assert!(matches!(err, LintError::Io { .. }));
    }
}
