//! Pre-order tree visitor.
//!
//! Implementors override [`Visitor::visit_node`] to observe every node and
//! call [`walk_node`] to continue into its children. Children are visited in
//! source order, so a full walk visits each node exactly once.

use super::*;

/// Visitor over the typed syntax tree.
pub trait Visitor<'a> {
    /// Visit a node. The default implementation just walks its children.
    fn visit_node(&mut self, node: NodeRef<'a>) {
        walk_node(self, node);
    }

    /// Visit a statement.
    fn visit_statement(&mut self, stmt: &'a Statement) {
        self.visit_node(stmt.as_node());
    }

    /// Visit an expression.
    fn visit_expression(&mut self, expr: &'a Expression) {
        self.visit_node(expr.as_node());
    }

    /// Visit a block.
    fn visit_block(&mut self, block: &'a Block) {
        self.visit_node(NodeRef::Block(block));
    }

    /// Visit a whole file, starting at its root node.
    fn visit_file(&mut self, file: &'a MypyFile) {
        self.visit_node(NodeRef::MypyFile(file));
    }
}

/// Visit every child of `node`, in source order.
pub fn walk_node<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: NodeRef<'a>) {
    match node {
        NodeRef::MypyFile(file) => walk_statements(visitor, &file.defs),
        NodeRef::Block(block) => walk_statements(visitor, &block.body),
        NodeRef::ExpressionStmt(stmt) => visitor.visit_expression(&stmt.expr),
        NodeRef::AssignmentStmt(stmt) => {
            walk_expressions(visitor, &stmt.lvalues);
            visitor.visit_expression(&stmt.rvalue);
        }
        NodeRef::OperatorAssignmentStmt(stmt) => {
            visitor.visit_expression(&stmt.lvalue);
            visitor.visit_expression(&stmt.rvalue);
        }
        NodeRef::ReturnStmt(stmt) => walk_optional(visitor, stmt.expr.as_ref()),
        NodeRef::IfStmt(stmt) => {
            // expr[i] guards body[i]; tolerate uneven lists from the front end
            for i in 0..stmt.expr.len().max(stmt.body.len()) {
                walk_optional(visitor, stmt.expr.get(i));
                if let Some(body) = stmt.body.get(i) {
                    visitor.visit_block(body);
                }
            }
            walk_optional_block(visitor, stmt.else_body.as_ref());
        }
        NodeRef::WhileStmt(stmt) => {
            visitor.visit_expression(&stmt.expr);
            visitor.visit_block(&stmt.body);
            walk_optional_block(visitor, stmt.else_body.as_ref());
        }
        NodeRef::ForStmt(stmt) => {
            visitor.visit_expression(&stmt.index);
            visitor.visit_expression(&stmt.expr);
            visitor.visit_block(&stmt.body);
            walk_optional_block(visitor, stmt.else_body.as_ref());
        }
        NodeRef::WithStmt(stmt) => {
            for i in 0..stmt.expr.len().max(stmt.target.len()) {
                walk_optional(visitor, stmt.expr.get(i));
                walk_optional(visitor, stmt.target.get(i).and_then(Option::as_ref));
            }
            visitor.visit_block(&stmt.body);
        }
        NodeRef::TryStmt(stmt) => {
            visitor.visit_block(&stmt.body);
            let handlers = stmt
                .types
                .len()
                .max(stmt.vars.len())
                .max(stmt.handlers.len());
            for i in 0..handlers {
                walk_optional(visitor, stmt.types.get(i).and_then(Option::as_ref));
                if let Some(Some(var)) = stmt.vars.get(i) {
                    visitor.visit_node(NodeRef::NameExpr(var));
                }
                if let Some(handler) = stmt.handlers.get(i) {
                    visitor.visit_block(handler);
                }
            }
            walk_optional_block(visitor, stmt.else_body.as_ref());
            walk_optional_block(visitor, stmt.finally_body.as_ref());
        }
        NodeRef::RaiseStmt(stmt) => {
            walk_optional(visitor, stmt.expr.as_ref());
            walk_optional(visitor, stmt.from_expr.as_ref());
        }
        NodeRef::AssertStmt(stmt) => {
            visitor.visit_expression(&stmt.expr);
            walk_optional(visitor, stmt.msg.as_ref());
        }
        NodeRef::DelStmt(stmt) => visitor.visit_expression(&stmt.expr),
        NodeRef::FuncDef(def) => {
            walk_arguments(visitor, &def.arguments);
            visitor.visit_block(&def.body);
        }
        NodeRef::ClassDef(def) => {
            walk_expressions(visitor, &def.base_type_exprs);
            visitor.visit_block(&def.defs);
        }
        NodeRef::MemberExpr(expr) => visitor.visit_expression(&expr.expr),
        NodeRef::CallExpr(expr) => {
            visitor.visit_expression(&expr.callee);
            walk_expressions(visitor, &expr.args);
        }
        NodeRef::ListExpr(expr) => walk_expressions(visitor, &expr.items),
        NodeRef::TupleExpr(expr) => walk_expressions(visitor, &expr.items),
        NodeRef::SetExpr(expr) => walk_expressions(visitor, &expr.items),
        NodeRef::DictExpr(expr) => {
            for item in &expr.items {
                walk_optional(visitor, item.key.as_ref());
                visitor.visit_expression(&item.value);
            }
        }
        NodeRef::OpExpr(expr) => {
            visitor.visit_expression(&expr.left);
            visitor.visit_expression(&expr.right);
        }
        NodeRef::ComparisonExpr(expr) => walk_expressions(visitor, &expr.operands),
        NodeRef::UnaryExpr(expr) => visitor.visit_expression(&expr.expr),
        NodeRef::IndexExpr(expr) => {
            visitor.visit_expression(&expr.base);
            visitor.visit_expression(&expr.index);
        }
        NodeRef::ConditionalExpr(expr) => {
            visitor.visit_expression(&expr.cond);
            visitor.visit_expression(&expr.if_expr);
            visitor.visit_expression(&expr.else_expr);
        }
        NodeRef::LambdaExpr(expr) => {
            walk_arguments(visitor, &expr.arguments);
            visitor.visit_expression(&expr.body);
        }
        // Leaves
        NodeRef::PassStmt(_)
        | NodeRef::BreakStmt(_)
        | NodeRef::ContinueStmt(_)
        | NodeRef::Import(_)
        | NodeRef::ImportFrom(_)
        | NodeRef::NameExpr(_)
        | NodeRef::StrExpr(_)
        | NodeRef::BytesExpr(_)
        | NodeRef::IntExpr(_)
        | NodeRef::FloatExpr(_) => {}
    }
}

fn walk_statements<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, stmts: &'a [Statement]) {
    for stmt in stmts {
        visitor.visit_statement(stmt);
    }
}

fn walk_expressions<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, exprs: &'a [Expression]) {
    for expr in exprs {
        visitor.visit_expression(expr);
    }
}

fn walk_optional<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, expr: Option<&'a Expression>) {
    if let Some(expr) = expr {
        visitor.visit_expression(expr);
    }
}

fn walk_optional_block<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, block: Option<&'a Block>) {
    if let Some(block) = block {
        visitor.visit_block(block);
    }
}

fn walk_arguments<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, arguments: &'a [Argument]) {
    for argument in arguments {
        walk_optional(visitor, argument.initializer.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;

    /// Records the kind of every visited node.
    struct KindRecorder(Vec<NodeKind>);

    impl<'a> Visitor<'a> for KindRecorder {
        fn visit_node(&mut self, node: NodeRef<'a>) {
            self.0.push(node.kind());
            walk_node(self, node);
        }
    }

    fn kinds(file: &MypyFile) -> Vec<NodeKind> {
        let mut recorder = KindRecorder(Vec::new());
        recorder.visit_file(file);
        recorder.0
    }

    #[test]
    fn test_walk_is_preorder_in_source_order() {
        // y = f.read()
        let file = file(vec![assign(
            name("y", "__main__.y", pos(1, 0)),
            call(member(name("f", "__main__.f", pos(1, 4)), "read", pos(1, 4)), vec![], pos(1, 4)),
            pos(1, 0),
        )]);

        assert_eq!(
            kinds(&file),
            vec![
                NodeKind::MypyFile,
                NodeKind::AssignmentStmt,
                NodeKind::NameExpr,
                NodeKind::CallExpr,
                NodeKind::MemberExpr,
                NodeKind::NameExpr,
            ]
        );
    }

    #[test]
    fn test_walk_descends_into_nested_bodies() {
        // def f():
        //     with open(x) as fp:
        //         pass
        let file = file(vec![func_def(
            "f",
            block(
                vec![with_stmt(
                    vec![call(name("open", "builtins.open", pos(2, 9)), vec![name("x", "", pos(2, 14))], pos(2, 9))],
                    vec![Some(name("fp", "", pos(2, 21)))],
                    block(vec![Statement::PassStmt(PassStmt { pos: pos(3, 8) })], pos(3, 8)),
                    pos(2, 4),
                )],
                pos(2, 4),
            ),
            pos(1, 0),
        )]);

        let seen = kinds(&file);
        assert!(seen.contains(&NodeKind::PassStmt), "got: {:?}", seen);
        assert_eq!(seen.iter().filter(|k| **k == NodeKind::Block).count(), 2);
        assert_eq!(seen.iter().filter(|k| **k == NodeKind::NameExpr).count(), 3);
    }

    #[test]
    fn test_walk_visits_try_handlers_and_else_bodies() {
        let stmt = Statement::TryStmt(TryStmt {
            pos: pos(1, 0),
            body: block(vec![], pos(2, 4)),
            types: vec![Some(name("ValueError", "builtins.ValueError", pos(3, 7)))],
            vars: vec![Some(NameExpr {
                pos: pos(3, 21),
                name: "e".to_string(),
                fullname: String::new(),
            })],
            handlers: vec![block(vec![], pos(4, 4))],
            else_body: Some(block(vec![], pos(6, 4))),
            finally_body: Some(block(vec![], pos(8, 4))),
        });

        let seen = kinds(&file(vec![stmt]));
        assert_eq!(seen.iter().filter(|k| **k == NodeKind::Block).count(), 4);
        assert_eq!(seen.iter().filter(|k| **k == NodeKind::NameExpr).count(), 2);
    }
}
