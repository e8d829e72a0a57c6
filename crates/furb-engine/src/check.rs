//! Check descriptor and supporting types.
//!
//! Every check module exposes one descriptor:
//!
//! ```ignore
//! pub static CHECK: Check = Check::of::<ErrorUseLiteral>(module_path!(), CheckFn::CallExpr(check));
//!
//! fn check(node: &CallExpr, diagnostics: &mut Vec<Diagnostic>) { /* ... */ }
//! ```
//!
//! The [`CheckFn`] variant is the node kind the check accepts. It is generated
//! from the node-kind catalogue, so a check function can only be registered
//! under the kind of its parameter.

use std::fmt;

use crate::ast::*;
use crate::diagnostic::{Diagnostic, ErrorCode};

/// Static information about the diagnostic a check emits.
///
/// Implemented by one unit struct per check (e.g. `ErrorUsePathlibRead`).
pub trait ErrorInfo {
    /// Numeric error code, unique across all checks.
    const CODE: u32;
    /// Default message, used by [`ErrorInfo::at`].
    const MSG: &'static str = "";
    /// Long-form explanation with "Bad"/"Good" examples.
    const DOCS: &'static str = "";
    /// Whether the check runs without being explicitly enabled.
    const ENABLED: bool = true;

    /// Diagnostic with the default message at `pos`.
    fn at(pos: Position) -> Diagnostic {
        Diagnostic::new(Self::CODE, pos, Self::MSG)
    }

    /// Diagnostic with a custom message at `pos`.
    fn with_msg(pos: Position, msg: impl Into<String>) -> Diagnostic {
        Diagnostic::new(Self::CODE, pos, msg)
    }
}

macro_rules! define_check_fn {
    ($($kind:ident),* $(,)?) => {
        /// Check routine, tagged by the node kind it accepts.
        #[derive(Clone, Copy)]
        pub enum CheckFn {
            $(
                #[allow(missing_docs)]
                $kind(fn(&$kind, &mut Vec<Diagnostic>)),
            )*
        }

        impl CheckFn {
            /// Node kind this routine accepts.
            pub const fn kind(&self) -> NodeKind {
                match self {
                    $(CheckFn::$kind(_) => NodeKind::$kind,)*
                }
            }

            /// Run the routine on `node`.
            ///
            /// Returns `false` without running anything when `node` is of a
            /// different kind.
            pub fn call(&self, node: NodeRef<'_>, diagnostics: &mut Vec<Diagnostic>) -> bool {
                match (*self, node) {
                    $(
                        (CheckFn::$kind(check), NodeRef::$kind(node)) => {
                            check(node, diagnostics);
                            true
                        }
                    )*
                    _ => false,
                }
            }
        }
    };
}

crate::ast::node::with_node_kinds!(define_check_fn);

impl fmt::Debug for CheckFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CheckFn").field(&self.kind()).finish()
    }
}

/// A Check Unit: one routine plus its metadata.
#[derive(Clone, Copy)]
pub struct Check {
    /// Declaring module path; unique per check.
    pub name: &'static str,
    /// Error code of the diagnostics it emits.
    pub code: u32,
    /// Default message.
    pub msg: &'static str,
    /// Long-form explanation.
    pub docs: &'static str,
    /// Enabled unless configuration says otherwise.
    pub enabled: bool,
    /// The routine.
    pub run: CheckFn,
}

impl Check {
    /// Build a descriptor from the check's error type and routine.
    pub const fn of<E: ErrorInfo>(name: &'static str, run: CheckFn) -> Self {
        Self {
            name,
            code: E::CODE,
            msg: E::MSG,
            docs: E::DOCS,
            enabled: E::ENABLED,
            run,
        }
    }

    /// Node kind the check accepts.
    pub const fn kind(&self) -> NodeKind {
        self.run.kind()
    }

    pub fn error_code(&self) -> ErrorCode {
        ErrorCode(self.code)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("code", &self.error_code())
            .field("kind", &self.kind())
            .field("enabled", &self.enabled)
            .finish()
    }
}
