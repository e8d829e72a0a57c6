//! Statement nodes
//!
//! Statements carry their nested bodies as [`Block`]s so checks can match
//! on already-materialized children (e.g. a `with` whose single body
//! statement is an assignment).

use serde::{Deserialize, Serialize};

use super::*;

/// Statement
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Statement {
    /// Nested block: an indented suite
    Block(Block),

    /// Bare expression: `f(x)`
    ExpressionStmt(ExpressionStmt),

    /// Assignment: `x = y = value`
    AssignmentStmt(AssignmentStmt),

    /// Augmented assignment: `x += 1`
    OperatorAssignmentStmt(OperatorAssignmentStmt),

    /// `return [expr]`
    ReturnStmt(ReturnStmt),

    /// `if` / `elif` / `else`
    IfStmt(IfStmt),

    /// `while` loop
    WhileStmt(WhileStmt),

    /// `for` loop
    ForStmt(ForStmt),

    /// `with a as b, c as d:`
    WithStmt(WithStmt),

    /// `try` / `except` / `else` / `finally`
    TryStmt(TryStmt),

    /// `raise [expr [from expr]]`
    RaiseStmt(RaiseStmt),

    /// `assert expr[, msg]`
    AssertStmt(AssertStmt),

    /// `del expr`
    DelStmt(DelStmt),

    /// `pass`
    PassStmt(PassStmt),

    /// `break`
    BreakStmt(BreakStmt),

    /// `continue`
    ContinueStmt(ContinueStmt),

    /// Function definition
    FuncDef(FuncDef),

    /// Class definition
    ClassDef(ClassDef),

    /// `import a.b as c`
    Import(Import),

    /// `from a import b as c`
    ImportFrom(ImportFrom),
}

impl Statement {
    /// Borrow this statement as a generic node reference.
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            Statement::Block(s) => NodeRef::Block(s),
            Statement::ExpressionStmt(s) => NodeRef::ExpressionStmt(s),
            Statement::AssignmentStmt(s) => NodeRef::AssignmentStmt(s),
            Statement::OperatorAssignmentStmt(s) => NodeRef::OperatorAssignmentStmt(s),
            Statement::ReturnStmt(s) => NodeRef::ReturnStmt(s),
            Statement::IfStmt(s) => NodeRef::IfStmt(s),
            Statement::WhileStmt(s) => NodeRef::WhileStmt(s),
            Statement::ForStmt(s) => NodeRef::ForStmt(s),
            Statement::WithStmt(s) => NodeRef::WithStmt(s),
            Statement::TryStmt(s) => NodeRef::TryStmt(s),
            Statement::RaiseStmt(s) => NodeRef::RaiseStmt(s),
            Statement::AssertStmt(s) => NodeRef::AssertStmt(s),
            Statement::DelStmt(s) => NodeRef::DelStmt(s),
            Statement::PassStmt(s) => NodeRef::PassStmt(s),
            Statement::BreakStmt(s) => NodeRef::BreakStmt(s),
            Statement::ContinueStmt(s) => NodeRef::ContinueStmt(s),
            Statement::FuncDef(s) => NodeRef::FuncDef(s),
            Statement::ClassDef(s) => NodeRef::ClassDef(s),
            Statement::Import(s) => NodeRef::Import(s),
            Statement::ImportFrom(s) => NodeRef::ImportFrom(s),
        }
    }

    /// Get the position of this statement
    pub fn pos(&self) -> Position {
        self.as_node().pos()
    }
}

/// Indented suite of statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub pos: Position,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStmt {
    #[serde(default)]
    pub pos: Position,
    pub expr: Expression,
}

/// `a = b = rvalue`; every target is an lvalue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStmt {
    #[serde(default)]
    pub pos: Position,
    pub lvalues: Vec<Expression>,
    pub rvalue: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorAssignmentStmt {
    #[serde(default)]
    pub pos: Position,
    /// Operator without the `=`, e.g. `+`
    pub op: String,
    pub lvalue: Expression,
    pub rvalue: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub expr: Option<Expression>,
}

/// `if`/`elif` chain: `expr[i]` guards `body[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    #[serde(default)]
    pub pos: Position,
    pub expr: Vec<Expression>,
    pub body: Vec<Block>,
    #[serde(default)]
    pub else_body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    #[serde(default)]
    pub pos: Position,
    pub expr: Expression,
    pub body: Block,
    #[serde(default)]
    pub else_body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    #[serde(default)]
    pub pos: Position,
    /// Loop target
    pub index: Expression,
    /// Iterable
    pub expr: Expression,
    pub body: Block,
    #[serde(default)]
    pub else_body: Option<Block>,
}

/// Scoped-resource block: `expr[i]` is bound to `target[i]` (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithStmt {
    #[serde(default)]
    pub pos: Position,
    pub expr: Vec<Expression>,
    #[serde(default)]
    pub target: Vec<Option<Expression>>,
    pub body: Block,
}

/// `handlers[i]` runs for exception type `types[i]` bound to `vars[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStmt {
    #[serde(default)]
    pub pos: Position,
    pub body: Block,
    #[serde(default)]
    pub types: Vec<Option<Expression>>,
    #[serde(default)]
    pub vars: Vec<Option<NameExpr>>,
    #[serde(default)]
    pub handlers: Vec<Block>,
    #[serde(default)]
    pub else_body: Option<Block>,
    #[serde(default)]
    pub finally_body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaiseStmt {
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub expr: Option<Expression>,
    #[serde(default)]
    pub from_expr: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertStmt {
    #[serde(default)]
    pub pos: Position,
    pub expr: Expression,
    #[serde(default)]
    pub msg: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelStmt {
    #[serde(default)]
    pub pos: Position,
    pub expr: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassStmt {
    #[serde(default)]
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakStmt {
    #[serde(default)]
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinueStmt {
    #[serde(default)]
    pub pos: Position,
}

/// Function parameter. Not a node kind of its own; its default value is
/// visited as part of the enclosing definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(default)]
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDef {
    #[serde(default)]
    pub pos: Position,
    pub name: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    pub body: Block,
    #[serde(default)]
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    #[serde(default)]
    pub pos: Position,
    pub name: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub base_type_exprs: Vec<Expression>,
    pub defs: Block,
}

/// One imported name and its optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportName {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    #[serde(default)]
    pub pos: Position,
    pub ids: Vec<ImportName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportFrom {
    #[serde(default)]
    pub pos: Position,
    /// Module imported from (without leading dots)
    pub id: String,
    /// Number of leading dots
    #[serde(default)]
    pub relative: u32,
    pub names: Vec<ImportName>,
}
