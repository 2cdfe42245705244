//! Reconciliation diagnostics.

use std::collections::BTreeSet;

use serde::Serialize;

/// What matched and what did not during one reconciliation pass.
///
/// Unmatched names are data-quality findings, not errors: the affected
/// features render with the zero sentinel and the affected rows are dropped
/// from the map, but both sides are recorded here for telemetry and for the
/// presentation layer's "no geographic data" state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    /// Number of features that received a row's value.
    pub matched: usize,
    /// Feature names (post-alias vocabulary) that matched no data row.
    pub unmatched_features: BTreeSet<String>,
    /// Row names (post-alias) that matched no boundary feature.
    pub unmatched_rows: BTreeSet<String>,
}

impl ReconcileReport {
    /// True when nothing matched at all.
    ///
    /// This is the hook a presentation layer uses to show a "no geographic
    /// data" state instead of a uniformly zero-colored map.
    #[must_use]
    pub const fn no_data(&self) -> bool {
        self.matched == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_signals_no_data() {
        let report = ReconcileReport::default();
        assert!(report.no_data());
    }

    #[test]
    fn any_match_clears_no_data() {
        let report = ReconcileReport {
            matched: 1,
            ..ReconcileReport::default()
        };
        assert!(!report.no_data());
    }
}
