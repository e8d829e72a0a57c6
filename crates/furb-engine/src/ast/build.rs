//! Shorthand constructors for hand-built trees.
//!
//! Used by tests and by embedders that construct trees directly instead of
//! deserializing them.

use super::*;

pub fn pos(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

pub fn file(defs: Vec<Statement>) -> MypyFile {
    MypyFile::new("__main__", "<string>", defs)
}

pub fn name(name: &str, fullname: &str, pos: Position) -> Expression {
    Expression::NameExpr(NameExpr {
        pos,
        name: name.to_string(),
        fullname: fullname.to_string(),
    })
}

pub fn member(expr: Expression, name: &str, pos: Position) -> Expression {
    Expression::MemberExpr(MemberExpr {
        pos,
        expr: Box::new(expr),
        name: name.to_string(),
        fullname: String::new(),
    })
}

/// Call with positional arguments only.
pub fn call(callee: Expression, args: Vec<Expression>, pos: Position) -> Expression {
    Expression::CallExpr(CallExpr {
        pos,
        callee: Box::new(callee),
        arg_kinds: vec![ArgKind::Pos; args.len()],
        arg_names: vec![None; args.len()],
        args,
    })
}

pub fn str_expr(value: &str, pos: Position) -> Expression {
    Expression::StrExpr(StrExpr {
        pos,
        value: value.to_string(),
    })
}

pub fn int_expr(value: i64, pos: Position) -> Expression {
    Expression::IntExpr(IntExpr { pos, value })
}

pub fn block(body: Vec<Statement>, pos: Position) -> Block {
    Block { pos, body }
}

pub fn expr_stmt(expr: Expression, pos: Position) -> Statement {
    Statement::ExpressionStmt(ExpressionStmt { pos, expr })
}

/// Single-target assignment: `lvalue = rvalue`.
pub fn assign(lvalue: Expression, rvalue: Expression, pos: Position) -> Statement {
    Statement::AssignmentStmt(AssignmentStmt {
        pos,
        lvalues: vec![lvalue],
        rvalue,
    })
}

pub fn with_stmt(
    expr: Vec<Expression>,
    target: Vec<Option<Expression>>,
    body: Block,
    pos: Position,
) -> Statement {
    Statement::WithStmt(WithStmt {
        pos,
        expr,
        target,
        body,
    })
}

pub fn func_def(name: &str, body: Block, pos: Position) -> Statement {
    Statement::FuncDef(FuncDef {
        pos,
        name: name.to_string(),
        fullname: format!("__main__.{}", name),
        arguments: vec![],
        body,
        is_async: false,
    })
}
