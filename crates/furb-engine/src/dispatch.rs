//! Dispatch engine: one pre-order pass that runs every registered check.
//!
//! At each node the checks in that kind's bucket run in bucket order, then the
//! walk continues into the node's children. A check that panics is contained:
//! whatever it appended during that call is dropped and a "check failed"
//! diagnostic takes its place. Contained panics skip the default panic hook;
//! the failure is logged at `error` instead.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::ast::{walk_node, MypyFile, NodeRef, Visitor};
use crate::check::Check;
use crate::diagnostic::Diagnostic;
use crate::registry::DispatchTable;

/// Run every check in `table` over `file`, returning diagnostics in
/// traversal order.
pub fn run(file: &MypyFile, table: &DispatchTable) -> Vec<Diagnostic> {
    install_panic_hook();
    let mut dispatcher = Dispatcher::new(table);
    dispatcher.visit_file(file);
    log::debug!(
        "{}: {} diagnostics from {} nodes",
        file.path,
        dispatcher.diagnostics.len(),
        dispatcher.visited
    );
    dispatcher.diagnostics
}

/// Single-pass visitor that dispatches each node to its bucket.
struct Dispatcher<'t> {
    table: &'t DispatchTable,
    diagnostics: Vec<Diagnostic>,
    visited: usize,
}

impl<'t> Dispatcher<'t> {
    fn new(table: &'t DispatchTable) -> Self {
        Self {
            table,
            diagnostics: Vec::new(),
            visited: 0,
        }
    }

    fn run_check(&mut self, check: &'static Check, node: NodeRef<'_>) {
        let mark = self.diagnostics.len();
        let diagnostics = &mut self.diagnostics;
        IN_CHECK.with(|flag| flag.set(true));
        let result = panic::catch_unwind(AssertUnwindSafe(|| check.run.call(node, diagnostics)));
        IN_CHECK.with(|flag| flag.set(false));

        if let Err(payload) = result {
            self.diagnostics.truncate(mark);
            let reason = panic_message(payload.as_ref());
            let pos = node.pos();
            log::error!(
                "Check `{}` failed at {}:{}: {}",
                check.name,
                pos.line,
                pos.column,
                reason
            );
            self.diagnostics
                .push(Diagnostic::check_failed(check.name, pos, &reason));
        }
    }
}

impl<'a, 't> Visitor<'a> for Dispatcher<'t> {
    fn visit_node(&mut self, node: NodeRef<'a>) {
        self.visited += 1;
        let table = self.table;
        for check in table.checks_for(node.kind()) {
            self.run_check(check, node);
        }
        walk_node(self, node);
    }
}

thread_local! {
    /// Set while a check runs on this thread.
    static IN_CHECK: Cell<bool> = const { Cell::new(false) };
}

static PANIC_HOOK: Once = Once::new();

/// Wrap the current panic hook so it stays silent for panics raised inside a
/// check. Panics anywhere else still reach it.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !IN_CHECK.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::ast::{CallExpr, NameExpr};
    use crate::check::{CheckFn, ErrorInfo};
    use crate::diagnostic::CHECK_FAILED_CODE;

    struct ErrorBoom;
    impl ErrorInfo for ErrorBoom {
        const CODE: u32 = 910;
        const MSG: &'static str = "partial";
    }

    struct ErrorCall;
    impl ErrorInfo for ErrorCall {
        const CODE: u32 = 911;
        const MSG: &'static str = "call";
    }

    struct ErrorName;
    impl ErrorInfo for ErrorName {
        const CODE: u32 = 912;
        const MSG: &'static str = "name";
    }

    fn boom(node: &CallExpr, diagnostics: &mut Vec<Diagnostic>) {
        diagnostics.push(ErrorBoom::at(node.pos));
        panic!("boom");
    }

    fn flag_call(node: &CallExpr, diagnostics: &mut Vec<Diagnostic>) {
        diagnostics.push(ErrorCall::at(node.pos));
    }

    fn flag_name(node: &NameExpr, diagnostics: &mut Vec<Diagnostic>) {
        diagnostics.push(ErrorName::at(node.pos));
    }

    struct ErrorInside;
    impl ErrorInfo for ErrorInside {
        const CODE: u32 = 913;
        const MSG: &'static str = "inside";
    }

    fn flag_inside(node: &CallExpr, diagnostics: &mut Vec<Diagnostic>) {
        if IN_CHECK.with(Cell::get) {
            diagnostics.push(ErrorInside::at(node.pos));
        }
    }

    static BOOM: Check = Check::of::<ErrorBoom>("tests::a_boom", CheckFn::CallExpr(boom));
    static FLAG_CALL: Check = Check::of::<ErrorCall>("tests::b_call", CheckFn::CallExpr(flag_call));
    static FLAG_NAME: Check = Check::of::<ErrorName>("tests::c_name", CheckFn::NameExpr(flag_name));

    /// `f(x)` at line 1 followed by `y` at line 2.
    fn sample() -> MypyFile {
        file(vec![
            expr_stmt(
                call(
                    name("f", "__main__.f", pos(1, 0)),
                    vec![name("x", "__main__.x", pos(1, 2))],
                    pos(1, 0),
                ),
                pos(1, 0),
            ),
            expr_stmt(name("y", "__main__.y", pos(2, 0)), pos(2, 0)),
        ])
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<u32> {
        diagnostics.iter().map(|d| d.code).collect()
    }

    #[test]
    fn test_traversal_order() {
        let table = DispatchTable::build([&FLAG_CALL, &FLAG_NAME]);
        let diagnostics = run(&sample(), &table);
        // call, then its callee and argument, then the second statement
        assert_eq!(codes(&diagnostics), vec![911, 912, 912, 912]);
        assert_eq!(diagnostics[2].column, 2);
        assert_eq!(diagnostics[3].line, 2);
    }

    #[test]
    fn test_empty_table_yields_nothing() {
        let table = DispatchTable::build(std::iter::empty());
        assert!(run(&sample(), &table).is_empty());
    }

    #[test]
    fn test_panicking_check_is_contained() {
        let table = DispatchTable::build([&BOOM, &FLAG_CALL]);
        let diagnostics = run(&sample(), &table);
        assert_eq!(codes(&diagnostics), vec![CHECK_FAILED_CODE, 911]);
        assert_eq!(diagnostics[0].message, "Check `tests::a_boom` failed: boom");
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 0));
    }

    #[test]
    fn test_check_flag_is_scoped_to_the_call() {
        static INSIDE: Check = Check::of::<ErrorInside>("tests::d_inside", CheckFn::CallExpr(flag_inside));
        let table = DispatchTable::build([&BOOM, &INSIDE]);

        let diagnostics = run(&sample(), &table);

        assert_eq!(codes(&diagnostics), vec![CHECK_FAILED_CODE, 913]);
        assert!(!IN_CHECK.with(Cell::get));
        assert!(PANIC_HOOK.is_completed());
    }

    #[test]
    fn test_run_is_repeatable() {
        let table = DispatchTable::build([&BOOM, &FLAG_CALL, &FLAG_NAME]);
        let tree = sample();
        assert_eq!(run(&tree, &table), run(&tree, &table));
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u8), "unknown panic");
    }
}
