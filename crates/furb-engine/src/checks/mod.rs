//! Every check the registry can discover.
//!
//! A new check module exposes `pub static CHECK: Check` and is listed in
//! [`all_checks`]. `furb gen` scaffolds such a module.

pub mod pathlib;
pub mod readability;

use crate::check::Check;
use crate::diagnostic::ErrorCode;

/// Returns the descriptors of all shipped checks.
pub fn all_checks() -> Vec<&'static Check> {
    vec![
        // pathlib
        &pathlib::read_x::CHECK,
        &pathlib::write_x::CHECK,
        // readability
        &readability::use_literal::CHECK,
    ]
}

/// Find a shipped check by its error code.
pub fn find(code: ErrorCode) -> Option<&'static Check> {
    all_checks().into_iter().find(|check| check.code == code.0)
}
