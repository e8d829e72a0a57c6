//! Typed syntax tree consumed by the checks.
//!
//! The tree is produced by an external front end (parser plus name/type
//! resolution) and handed to the engine fully materialized. This module
//! defines:
//! - The root node ([`MypyFile`]) and source positions
//! - Statements and expressions
//! - The node-kind catalogue ([`NodeKind`], [`NodeRef`])
//! - A pre-order [`Visitor`]
//!
//! Every node carries a [`Position`]. The tree is deserialized from JSON
//! where each statement and expression is tagged by its node-kind name in a
//! `"kind"` field.

use serde::{Deserialize, Serialize};

pub mod build;
pub mod expression;
pub mod node;
pub mod statement;
pub mod visitor;

pub use expression::*;
pub use node::{NodeKind, NodeRef};
pub use statement::*;
pub use visitor::{walk_node, Visitor};

/// Source position of a node.
///
/// `line` is 1-based and `column` is 0-based, as reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Root node: one analyzed source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MypyFile {
    #[serde(default)]
    pub pos: Position,

    /// Dotted module name, e.g. `pkg.module`
    #[serde(default)]
    pub fullname: String,

    /// Path of the source file the tree was built from
    #[serde(default)]
    pub path: String,

    /// Top-level statements
    pub defs: Vec<Statement>,
}

impl MypyFile {
    /// Create a new file node
    pub fn new(fullname: impl Into<String>, path: impl Into<String>, defs: Vec<Statement>) -> Self {
        Self {
            pos: Position::new(1, 0),
            fullname: fullname.into(),
            path: path.into(),
            defs,
        }
    }

    /// Deserialize a tree from the front end's JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Check if the file has no statements
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
