//! Check: use-pathlib-write (FURB103)
//!
//! Flags a `with open(x, "w") as f:` block whose only statement is
//! `f.write(y)`.

use crate::ast::*;
use crate::check::{Check, CheckFn, ErrorInfo};
use crate::diagnostic::Diagnostic;

pub struct ErrorUsePathlibWrite;

impl ErrorInfo for ErrorUsePathlibWrite {
    const CODE: u32 = 103;
    const DOCS: &'static str = "\
When you just want to save some contents to a file, a `with` block is a bit
overkill. Use the `write_text()` or `write_bytes()` method on a `Path` instead:

Bad:

```
with open(filename, \"w\") as f:
    f.write(contents)
```

Good:

```
from pathlib import Path

Path(filename).write_text(contents)
```
";
}

pub static CHECK: Check = Check::of::<ErrorUsePathlibWrite>(module_path!(), CheckFn::WithStmt(check));

fn check(node: &WithStmt, diagnostics: &mut Vec<Diagnostic>) {
    let [Expression::CallExpr(open)] = node.expr.as_slice() else {
        return;
    };
    match open.callee.as_ref() {
        Expression::NameExpr(callee) if callee.name == "open" => {}
        _ => return,
    }
    // Only truncating writes; "a" and "x" keep different semantics.
    let [_, Expression::StrExpr(mode)] = open.args.as_slice() else {
        return;
    };
    if !mode.value.contains('w') {
        return;
    }

    let [Statement::ExpressionStmt(stmt)] = node.body.body.as_slice() else {
        return;
    };
    let Expression::CallExpr(write) = &stmt.expr else {
        return;
    };
    match (write.callee.as_ref(), write.args.as_slice()) {
        (Expression::MemberExpr(member), [_]) if member.name == "write" => {}
        _ => return,
    }

    let func = if mode.value.contains('b') {
        "write_bytes"
    } else {
        "write_text"
    };

    diagnostics.push(ErrorUsePathlibWrite::with_msg(
        node.pos,
        format!(
            "Use `Path(x).{}(y)` instead of `with open(x, \"{}\") as f: f.write(y)`",
            func, mode.value
        ),
    ));
}
