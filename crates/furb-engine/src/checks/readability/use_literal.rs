//! Check: use-literal (FURB112)
//!
//! Flags zero-argument calls to builtin constructors that have a literal
//! form, e.g. `list()` or `dict()`.

use crate::ast::*;
use crate::check::{Check, CheckFn, ErrorInfo};
use crate::diagnostic::Diagnostic;

pub struct ErrorUseLiteral;

impl ErrorInfo for ErrorUseLiteral {
    const CODE: u32 = 112;
    const DOCS: &'static str = "\
Calling `list()` or `dict()` with no arguments is slower than writing the
empty literal, and reads less naturally. Use `[]` and `{}` instead:

Bad:

```
nums = list()
books = dict()
```

Good:

```
nums = []
books = {}
```
";
}

/// Resolved builtin name and the literal that replaces an empty call to it.
const FUNC_NAMES: &[(&str, &str)] = &[
    ("builtins.list", "[]"),
    ("builtins.dict", "{}"),
    ("builtins.tuple", "()"),
    ("builtins.int", "0"),
    ("builtins.str", "\"\""),
];

pub static CHECK: Check = Check::of::<ErrorUseLiteral>(module_path!(), CheckFn::CallExpr(check));

fn check(node: &CallExpr, diagnostics: &mut Vec<Diagnostic>) {
    if !node.args.is_empty() {
        return;
    }
    let Expression::NameExpr(callee) = node.callee.as_ref() else {
        return;
    };
    let Some((_, newer)) = FUNC_NAMES.iter().find(|(fullname, _)| *fullname == callee.fullname) else {
        return;
    };

    diagnostics.push(ErrorUseLiteral::with_msg(
        node.pos,
        format!("Use `{}` instead of `{}()`", newer, callee.name),
    ));
}
