//! Expression nodes
//!
//! Names and member accesses carry the `fullname` resolved by the front end
//! (e.g. `builtins.list` for an unshadowed `list`), which is what checks
//! match on instead of the spelled name.

use serde::{Deserialize, Serialize};

use super::*;

/// Expression (produces a value)
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Expression {
    /// Identifier: `x`
    NameExpr(NameExpr),

    /// Attribute access: `obj.attr`
    MemberExpr(MemberExpr),

    /// Call: `f(a, b=c)`
    CallExpr(CallExpr),

    /// String literal: `"hello"`
    StrExpr(StrExpr),

    /// Bytes literal: `b"hello"`
    BytesExpr(BytesExpr),

    /// Integer literal: `42`
    IntExpr(IntExpr),

    /// Float literal: `3.14`
    FloatExpr(FloatExpr),

    /// List display: `[a, b]`
    ListExpr(ListExpr),

    /// Tuple display: `(a, b)`
    TupleExpr(TupleExpr),

    /// Set display: `{a, b}`
    SetExpr(SetExpr),

    /// Dict display: `{k: v, **rest}`
    DictExpr(DictExpr),

    /// Binary operation: `a + b`, `a and b`
    OpExpr(OpExpr),

    /// Comparison chain: `a < b <= c`
    ComparisonExpr(ComparisonExpr),

    /// Unary operation: `-x`, `not x`
    UnaryExpr(UnaryExpr),

    /// Subscript: `a[i]`
    IndexExpr(IndexExpr),

    /// Ternary: `a if cond else b`
    ConditionalExpr(ConditionalExpr),

    /// `lambda x: body`
    LambdaExpr(LambdaExpr),
}

impl Expression {
    /// Borrow this expression as a generic node reference.
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            Expression::NameExpr(e) => NodeRef::NameExpr(e),
            Expression::MemberExpr(e) => NodeRef::MemberExpr(e),
            Expression::CallExpr(e) => NodeRef::CallExpr(e),
            Expression::StrExpr(e) => NodeRef::StrExpr(e),
            Expression::BytesExpr(e) => NodeRef::BytesExpr(e),
            Expression::IntExpr(e) => NodeRef::IntExpr(e),
            Expression::FloatExpr(e) => NodeRef::FloatExpr(e),
            Expression::ListExpr(e) => NodeRef::ListExpr(e),
            Expression::TupleExpr(e) => NodeRef::TupleExpr(e),
            Expression::SetExpr(e) => NodeRef::SetExpr(e),
            Expression::DictExpr(e) => NodeRef::DictExpr(e),
            Expression::OpExpr(e) => NodeRef::OpExpr(e),
            Expression::ComparisonExpr(e) => NodeRef::ComparisonExpr(e),
            Expression::UnaryExpr(e) => NodeRef::UnaryExpr(e),
            Expression::IndexExpr(e) => NodeRef::IndexExpr(e),
            Expression::ConditionalExpr(e) => NodeRef::ConditionalExpr(e),
            Expression::LambdaExpr(e) => NodeRef::LambdaExpr(e),
        }
    }

    /// Get the position of this expression
    pub fn pos(&self) -> Position {
        self.as_node().pos()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameExpr {
    #[serde(default)]
    pub pos: Position,
    /// Name as written
    pub name: String,
    /// Resolved full name, empty when the front end could not resolve it
    #[serde(default)]
    pub fullname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpr {
    #[serde(default)]
    pub pos: Position,
    pub expr: Box<Expression>,
    /// Attribute name
    pub name: String,
    #[serde(default)]
    pub fullname: String,
}

/// How an argument is passed at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArgKind {
    /// `f(x)`
    #[default]
    Pos,
    /// `f(*xs)`
    Star,
    /// `f(name=x)`
    Named,
    /// `f(**kw)`
    Star2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    #[serde(default)]
    pub pos: Position,
    pub callee: Box<Expression>,
    #[serde(default)]
    pub args: Vec<Expression>,
    /// Parallel to `args`; empty means all positional
    #[serde(default)]
    pub arg_kinds: Vec<ArgKind>,
    /// Parallel to `args`; keyword name for `Named` arguments
    #[serde(default)]
    pub arg_names: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrExpr {
    #[serde(default)]
    pub pos: Position,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BytesExpr {
    #[serde(default)]
    pub pos: Position,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntExpr {
    #[serde(default)]
    pub pos: Position,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatExpr {
    #[serde(default)]
    pub pos: Position,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListExpr {
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub items: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleExpr {
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub items: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetExpr {
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub items: Vec<Expression>,
}

/// One `key: value` entry; a missing key means `**value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictItem {
    #[serde(default)]
    pub key: Option<Expression>,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictExpr {
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub items: Vec<DictItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpExpr {
    #[serde(default)]
    pub pos: Position,
    pub op: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonExpr {
    #[serde(default)]
    pub pos: Position,
    pub operators: Vec<String>,
    pub operands: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    #[serde(default)]
    pub pos: Position,
    pub op: String,
    pub expr: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexExpr {
    #[serde(default)]
    pub pos: Position,
    pub base: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExpr {
    #[serde(default)]
    pub pos: Position,
    pub cond: Box<Expression>,
    pub if_expr: Box<Expression>,
    pub else_expr: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaExpr {
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    pub body: Box<Expression>,
}
