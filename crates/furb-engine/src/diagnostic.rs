//! Diagnostics emitted by checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ast::Position;

/// Prefix of every rendered error code.
pub const ERROR_PREFIX: &str = "FURB";

/// Code reserved for the engine's own "check failed" diagnostic.
pub const CHECK_FAILED_CODE: u32 = 0;

/// A single finding.
///
/// Diagnostics are only ever appended by checks (or by the engine when a
/// check fails); nothing mutates one after it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Numeric error code, unique per check (e.g. `101`).
    pub code: u32,
    /// 1-based line.
    pub line: u32,
    /// 0-based column.
    pub column: u32,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: u32, pos: Position, message: impl Into<String>) -> Self {
        Self {
            code,
            line: pos.line,
            column: pos.column,
            message: message.into(),
        }
    }

    /// Diagnostic recorded in place of a check that panicked.
    pub fn check_failed(check_name: &str, pos: Position, reason: &str) -> Self {
        Self::new(
            CHECK_FAILED_CODE,
            pos,
            format!("Check `{}` failed: {}", check_name, reason),
        )
    }

    pub fn error_code(&self) -> ErrorCode {
        ErrorCode(self.code)
    }

    /// 1-based column as printed in reports.
    pub fn display_column(&self) -> u64 {
        u64::from(self.column) + 1
    }

    pub fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Error code as written by users, e.g. `FURB101`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(pub u32);

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", ERROR_PREFIX, self.0)
    }
}

/// Error returned for a malformed error code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid error code '{0}', expected something like FURB101")]
pub struct ParseCodeError(pub String);

impl FromStr for ErrorCode {
    type Err = ParseCodeError;

    /// Accepts `FURB101`, `furb101` or a bare `101`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..ERROR_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(ERROR_PREFIX) => &trimmed[ERROR_PREFIX.len()..],
            _ => trimmed,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseCodeError(s.to_string()));
        }
        digits
            .parse()
            .map(ErrorCode)
            .map_err(|_| ParseCodeError(s.to_string()))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `101` and `"FURB101"` are both accepted in config files.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(code) => Ok(ErrorCode(code)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display_pads() {
        assert_eq!(ErrorCode(101).to_string(), "FURB101");
        assert_eq!(ErrorCode(7).to_string(), "FURB007");
        assert_eq!(ErrorCode(1234).to_string(), "FURB1234");
    }

    #[test]
    fn test_error_code_parse() {
        assert_eq!("FURB101".parse::<ErrorCode>(), Ok(ErrorCode(101)));
        assert_eq!("furb112".parse::<ErrorCode>(), Ok(ErrorCode(112)));
        assert_eq!("103".parse::<ErrorCode>(), Ok(ErrorCode(103)));
        assert!("FURB".parse::<ErrorCode>().is_err());
        assert!("FURBx1".parse::<ErrorCode>().is_err());
        assert!("E501".parse::<ErrorCode>().is_err());
    }

    #[test]
    fn test_check_failed_diagnostic() {
        let d = Diagnostic::check_failed("furb_engine::checks::demo", Position::new(4, 2), "boom");
        assert_eq!(d.code, CHECK_FAILED_CODE);
        assert_eq!((d.line, d.column), (4, 2));
        assert_eq!(d.message, "Check `furb_engine::checks::demo` failed: boom");
    }
}
