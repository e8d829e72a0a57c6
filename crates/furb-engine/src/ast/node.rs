//! Node-kind catalogue.
//!
//! The list of node kinds lives in exactly one place, [`with_node_kinds!`].
//! Everything keyed by node kind ([`NodeKind`], [`NodeRef`], and the typed
//! check functions in [`crate::check`]) is generated from it, so adding a
//! kind without handling it everywhere is a compile error.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::*;

/// Invokes `$callback!` with the full list of node kinds.
macro_rules! with_node_kinds {
    ($callback:ident) => {
        $callback! {
            MypyFile,
            Block,
            ExpressionStmt,
            AssignmentStmt,
            OperatorAssignmentStmt,
            ReturnStmt,
            IfStmt,
            WhileStmt,
            ForStmt,
            WithStmt,
            TryStmt,
            RaiseStmt,
            AssertStmt,
            DelStmt,
            PassStmt,
            BreakStmt,
            ContinueStmt,
            FuncDef,
            ClassDef,
            Import,
            ImportFrom,
            NameExpr,
            MemberExpr,
            CallExpr,
            StrExpr,
            BytesExpr,
            IntExpr,
            FloatExpr,
            ListExpr,
            TupleExpr,
            SetExpr,
            DictExpr,
            OpExpr,
            ComparisonExpr,
            UnaryExpr,
            IndexExpr,
            ConditionalExpr,
            LambdaExpr,
        }
    };
}
pub(crate) use with_node_kinds;

macro_rules! define_node_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Kind tag of a syntax node. The variant names are the node type names.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $(
                #[allow(missing_docs)]
                $kind,
            )*
        }

        impl NodeKind {
            /// Every node kind, in catalogue order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind),*];

            /// Type name of the node kind, e.g. `"CallExpr"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)*
                }
            }
        }

        /// Borrowed reference to any node in the tree, tagged by kind.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum NodeRef<'a> {
            $(
                #[allow(missing_docs)]
                $kind(&'a $kind),
            )*
        }

        impl<'a> NodeRef<'a> {
            /// Kind of the referenced node.
            pub const fn kind(&self) -> NodeKind {
                match self {
                    $(NodeRef::$kind(_) => NodeKind::$kind,)*
                }
            }

            /// Source position of the referenced node.
            pub fn pos(&self) -> Position {
                match self {
                    $(NodeRef::$kind(node) => node.pos,)*
                }
            }
        }
    };
}

with_node_kinds!(define_node_kinds);

/// Name → kind lookup, built once on first use.
static CATALOGUE: Lazy<FxHashMap<&'static str, NodeKind>> =
    Lazy::new(|| NodeKind::ALL.iter().map(|kind| (kind.name(), *kind)).collect());

impl NodeKind {
    /// Look up a node kind by its type name.
    pub fn from_name(name: &str) -> Option<NodeKind> {
        CATALOGUE.get(name).copied()
    }

    /// Names of all node kinds, in catalogue order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        NodeKind::ALL.iter().map(|kind| kind.name())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown node-kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown node kind '{0}'")]
pub struct UnknownNodeKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::from_name(s).ok_or_else(|| UnknownNodeKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_round_trips_names() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_name(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn test_catalogue_names_are_unique() {
        assert_eq!(CATALOGUE.len(), NodeKind::ALL.len());
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(NodeKind::from_name("GotoStmt"), None);
        let err = "GotoStmt".parse::<NodeKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown node kind 'GotoStmt'");
    }

    #[test]
    fn test_node_ref_kind_and_pos() {
        let expr = build::name("x", "", Position::new(3, 4));
        let node = expr.as_node();
        assert_eq!(node.kind(), NodeKind::NameExpr);
        assert_eq!(node.pos(), Position::new(3, 4));
    }
}
