//! Check registry: builds the dispatch table from the check collection.
//!
//! Descriptors are sorted by module path, then bucketed by the node kind of
//! their [`CheckFn`](crate::check::CheckFn). Descriptors that cannot be
//! registered consistently (repeated module path, code already claimed, or the
//! reserved engine code) are skipped with a warning.

use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::NodeKind;
use crate::check::Check;
use crate::checks;
use crate::config::Settings;
use crate::diagnostic::{ErrorCode, CHECK_FAILED_CODE};

/// Node kind → ordered checks. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    buckets: FxHashMap<NodeKind, Vec<&'static Check>>,
    len: usize,
}

static DEFAULT_TABLE: Lazy<DispatchTable> = Lazy::new(|| DispatchTable::build(checks::all_checks()));

/// Table of all shipped checks under default settings, built on first use.
pub fn default_table() -> &'static DispatchTable {
    &DEFAULT_TABLE
}

impl DispatchTable {
    /// Register every check that is enabled by default.
    pub fn build(checks: impl IntoIterator<Item = &'static Check>) -> Self {
        Self::build_filtered(checks, |check| check.enabled)
    }

    /// Register the checks `settings` enables.
    pub fn with_settings(checks: impl IntoIterator<Item = &'static Check>, settings: &Settings) -> Self {
        Self::build_filtered(checks, |check| settings.is_enabled(check))
    }

    fn build_filtered(
        checks: impl IntoIterator<Item = &'static Check>,
        is_enabled: impl Fn(&Check) -> bool,
    ) -> Self {
        let mut sorted: Vec<&'static Check> = checks.into_iter().collect();
        sorted.sort_by_key(|check| check.name);

        let mut names: FxHashSet<&'static str> = FxHashSet::default();
        let mut codes: FxHashMap<u32, &'static str> = FxHashMap::default();
        let mut table = DispatchTable::default();

        for check in sorted {
            if check.code == CHECK_FAILED_CODE {
                log::warn!(
                    "Skipping check `{}`: {} is reserved for failed checks",
                    check.name,
                    check.error_code()
                );
                continue;
            }
            if !names.insert(check.name) {
                log::warn!("Skipping check `{}`: registered twice", check.name);
                continue;
            }
            if let Some(owner) = codes.get(&check.code) {
                log::warn!(
                    "Skipping check `{}`: {} is already used by `{}`",
                    check.name,
                    check.error_code(),
                    owner
                );
                continue;
            }
            codes.insert(check.code, check.name);

            if !is_enabled(check) {
                log::debug!("Check `{}` is disabled", check.name);
                continue;
            }
            table.buckets.entry(check.kind()).or_default().push(check);
            table.len += 1;
        }

        log::debug!(
            "Registered {} checks across {} node kinds",
            table.len,
            table.buckets.len()
        );
        table
    }

    /// Checks registered for `kind`, in registration order. Empty when none.
    pub fn checks_for(&self, kind: NodeKind) -> &[&'static Check] {
        self.buckets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Node kinds with at least one check, in catalogue order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        let mut kinds: Vec<NodeKind> = self.buckets.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// All registered checks, grouped by node kind in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Check> + '_ {
        self.kinds()
            .into_iter()
            .flat_map(move |kind| self.checks_for(kind).iter().copied())
    }

    /// Whether a check with `code` is registered.
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.iter().any(|check| check.code == code.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CallExpr, NameExpr};
    use crate::check::{CheckFn, ErrorInfo};
    use crate::diagnostic::Diagnostic;

    struct ErrorA;
    impl ErrorInfo for ErrorA {
        const CODE: u32 = 901;
    }

    struct ErrorB;
    impl ErrorInfo for ErrorB {
        const CODE: u32 = 902;
    }

    struct ErrorOff;
    impl ErrorInfo for ErrorOff {
        const CODE: u32 = 903;
        const ENABLED: bool = false;
    }

    struct ErrorReserved;
    impl ErrorInfo for ErrorReserved {
        const CODE: u32 = 0;
    }

    fn on_call(_: &CallExpr, _: &mut Vec<Diagnostic>) {}
    fn on_name(_: &NameExpr, _: &mut Vec<Diagnostic>) {}

    static CALL_B: Check = Check::of::<ErrorB>("tests::b_call", CheckFn::CallExpr(on_call));
    static CALL_A: Check = Check::of::<ErrorA>("tests::a_call", CheckFn::CallExpr(on_call));
    static NAME_OFF: Check = Check::of::<ErrorOff>("tests::c_name", CheckFn::NameExpr(on_name));
    static SAME_NAME: Check = Check::of::<ErrorOff>("tests::a_call", CheckFn::NameExpr(on_name));
    static SAME_CODE: Check = Check::of::<ErrorA>("tests::z_call", CheckFn::NameExpr(on_name));
    static RESERVED: Check = Check::of::<ErrorReserved>("tests::reserved", CheckFn::NameExpr(on_name));

    fn names(checks: &[&'static Check]) -> Vec<&'static str> {
        checks.iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_buckets_are_sorted_by_module_path() {
        let table = DispatchTable::build([&CALL_B, &CALL_A]);
        assert_eq!(
            names(table.checks_for(NodeKind::CallExpr)),
            vec!["tests::a_call", "tests::b_call"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.kinds(), vec![NodeKind::CallExpr]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = DispatchTable::build([&CALL_B, &CALL_A, &NAME_OFF]);
        let second = DispatchTable::build([&CALL_A, &NAME_OFF, &CALL_B]);
        for kind in NodeKind::ALL {
            assert_eq!(names(first.checks_for(*kind)), names(second.checks_for(*kind)));
        }
    }

    #[test]
    fn test_unregistered_kind_is_empty() {
        let table = DispatchTable::build([&CALL_A]);
        assert!(table.checks_for(NodeKind::WithStmt).is_empty());
        assert!(table.checks_for(NodeKind::MypyFile).is_empty());
    }

    #[test]
    fn test_disabled_by_default_is_skipped() {
        let table = DispatchTable::build([&CALL_A, &NAME_OFF]);
        assert!(table.checks_for(NodeKind::NameExpr).is_empty());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_settings_can_enable_check() {
        let settings = Settings {
            enable: vec![ErrorCode(903)],
            ..Settings::default()
        };
        let table = DispatchTable::with_settings([&CALL_A, &NAME_OFF], &settings);
        assert_eq!(names(table.checks_for(NodeKind::NameExpr)), vec!["tests::c_name"]);
        assert!(table.contains(ErrorCode(903)));
    }

    #[test]
    fn test_inconsistent_descriptors_are_skipped() {
        let table = DispatchTable::build([&SAME_CODE, &CALL_A, &SAME_NAME, &RESERVED]);
        assert_eq!(table.len(), 1);
        assert_eq!(names(table.checks_for(NodeKind::CallExpr)), vec!["tests::a_call"]);
        assert!(table.checks_for(NodeKind::NameExpr).is_empty());
    }

    #[test]
    fn test_default_table_has_shipped_checks() {
        let table = default_table();
        assert_eq!(table.len(), checks::all_checks().len());
        assert_eq!(table.checks_for(NodeKind::WithStmt).len(), 2);
        assert!(table
            .checks_for(NodeKind::WithStmt)
            .iter()
            .all(|c| matches!(c.run, CheckFn::WithStmt(_))));
    }
}
