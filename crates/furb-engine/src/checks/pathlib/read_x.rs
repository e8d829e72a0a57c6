//! Check: use-pathlib-read (FURB101)
//!
//! Flags a `with open(...)` block whose only statement assigns the result of
//! `.read()`, e.g. `with open(x) as f: y = f.read()`.

use crate::ast::*;
use crate::check::{Check, CheckFn, ErrorInfo};
use crate::diagnostic::Diagnostic;

pub struct ErrorUsePathlibRead;

impl ErrorInfo for ErrorUsePathlibRead {
    const CODE: u32 = 101;
    const DOCS: &'static str = "\
When you just want to read the contents of a file, a `with` block is a bit
overkill. Use the `read_text()` or `read_bytes()` method on a `Path` instead:

Bad:

```
with open(filename) as f:
    contents = f.read()
```

Good:

```
from pathlib import Path

contents = Path(filename).read_text()
```
";
}

pub static CHECK: Check = Check::of::<ErrorUsePathlibRead>(module_path!(), CheckFn::WithStmt(check));

fn check(node: &WithStmt, diagnostics: &mut Vec<Diagnostic>) {
    // with open(...) as f:
    let [Expression::CallExpr(open)] = node.expr.as_slice() else {
        return;
    };
    match open.callee.as_ref() {
        Expression::NameExpr(callee) if callee.name == "open" => {}
        _ => return,
    }

    //     y = f.read()
    let [Statement::AssignmentStmt(assign)] = node.body.body.as_slice() else {
        return;
    };
    let Expression::CallExpr(read) = &assign.rvalue else {
        return;
    };
    match read.callee.as_ref() {
        Expression::MemberExpr(member) if member.name == "read" => {}
        _ => return,
    }

    let (func, options) = match open.args.as_slice() {
        [_, Expression::StrExpr(mode)] if mode.value.contains('b') => {
            ("read_bytes", format!(", \"{}\"", mode.value))
        }
        _ => ("read_text", String::new()),
    };

    diagnostics.push(ErrorUsePathlibRead::with_msg(
        node.pos,
        format!(
            "Use `y = Path(x).{}()` instead of `with open(x{}) as f: y = f.read()`",
            func, options
        ),
    ));
}

#[cfg(test)]
mod tests {
    use crate::ast::build::*;
    use crate::ast::{Expression, Statement};
    use crate::diagnostic::Diagnostic;
    use crate::Linter;

    fn lint(stmt: Statement) -> Vec<Diagnostic> {
        Linter::new().lint(&file(vec![stmt])).diagnostics
    }

    fn has_code(diags: &[Diagnostic], code: u32) -> bool {
        diags.iter().any(|d| d.code == code)
    }

    /// `with open(<args>) as f: <body>`
    fn with_open(args: Vec<Expression>, body: Vec<Statement>) -> Statement {
        with_stmt(
            vec![call(name("open", "builtins.open", pos(1, 5)), args, pos(1, 5))],
            vec![Some(name("f", "__main__.f", pos(1, 18)))],
            block(body, pos(2, 4)),
            pos(1, 0),
        )
    }

    /// `y = f.read()`
    fn read_into_y() -> Statement {
        assign(
            name("y", "__main__.y", pos(2, 4)),
            call(member(name("f", "__main__.f", pos(2, 8)), "read", pos(2, 8)), vec![], pos(2, 8)),
            pos(2, 4),
        )
    }

    #[test]
    fn test_read_text_flagged() {
        let diags = lint(with_open(vec![name("x", "__main__.x", pos(1, 10))], vec![read_into_y()]));
        assert_eq!(
            diags,
            vec![Diagnostic {
                code: 101,
                line: 1,
                column: 0,
                message: "Use `y = Path(x).read_text()` instead of `with open(x) as f: y = f.read()`"
                    .to_string(),
            }]
        );
    }

    #[test]
    fn test_binary_mode_suggests_read_bytes() {
        let diags = lint(with_open(
            vec![name("x", "__main__.x", pos(1, 10)), str_expr("rb", pos(1, 13))],
            vec![read_into_y()],
        ));
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "Use `y = Path(x).read_bytes()` instead of `with open(x, \"rb\") as f: y = f.read()`"
        );
    }

    #[test]
    fn test_text_mode_string_is_not_repeated() {
        let diags = lint(with_open(
            vec![name("x", "__main__.x", pos(1, 10)), str_expr("r", pos(1, 13))],
            vec![read_into_y()],
        ));
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("read_text()"));
        assert!(diags[0].message.contains("with open(x) as f"));
    }

    #[test]
    fn test_body_with_extra_statements_ok() {
        let diags = lint(with_open(
            vec![name("x", "__main__.x", pos(1, 10))],
            vec![read_into_y(), read_into_y()],
        ));
        assert!(!has_code(&diags, 101), "got: {:?}", diags);
    }

    #[test]
    fn test_other_context_manager_ok() {
        let stmt = with_stmt(
            vec![call(name("lock", "__main__.lock", pos(1, 5)), vec![], pos(1, 5))],
            vec![None],
            block(vec![read_into_y()], pos(2, 4)),
            pos(1, 0),
        );
        assert!(!has_code(&lint(stmt), 101));
    }

    #[test]
    fn test_nested_in_function_flagged() {
        let stmt = func_def(
            "load",
            block(
                vec![with_open(vec![name("x", "__main__.x", pos(1, 10))], vec![read_into_y()])],
                pos(1, 0),
            ),
            pos(1, 0),
        );
        assert!(has_code(&lint(stmt), 101));
    }
}
