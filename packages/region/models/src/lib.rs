#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared data model for the regional analytics pipeline.
//!
//! Defines the upstream query-result contract ([`QueryResult`]), the parsed
//! per-region row type ([`RegionRow`]), and the validated alias table used to
//! reconcile analytics-source region names with boundary-dataset names
//! ([`AliasTable`]).

pub mod alias;
pub mod row;

pub use alias::{AliasTable, AliasTableError};
pub use row::{RegionRow, RowShapeError};

use serde::{Deserialize, Serialize};

/// Sentinel metric value attached to regions with no reported data.
///
/// Renders identically to a true zero; consumers distinguish the two via the
/// unmatched-name diagnostics collected during reconciliation.
pub const UNMATCHED_VALUE: f64 = 0.0;

/// A column definition from the upstream analytics result.
///
/// The upstream API returns richer column metadata; only the name is
/// meaningful to this pipeline, so everything else is ignored on
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name, used as the record key in table transforms.
    pub name: String,
}

/// A tabular result from the upstream analytics source.
///
/// Rows are positional and heterogeneously typed; which position holds the
/// region name and which the numeric metric is supplied by the caller when
/// parsing into [`RegionRow`]s, never inferred.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column definitions, in row-cell order.
    pub columns: Vec<Column>,
    /// Data rows. Cell types are implementation-defined (string, number,
    /// null).
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl QueryResult {
    /// Parses every row into a [`RegionRow`] using the given column
    /// positions.
    ///
    /// # Errors
    ///
    /// Returns a [`RowShapeError`] if any row is too short for the requested
    /// indexes or carries the wrong cell type there. A malformed row shape is
    /// a caller bug, not a data-quality gap, and fails loudly.
    pub fn parse_rows(
        &self,
        name_column: usize,
        value_column: usize,
    ) -> Result<Vec<RegionRow>, RowShapeError> {
        self.rows
            .iter()
            .map(|cells| RegionRow::from_cells(cells, name_column, value_column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_query_result_json() {
        let raw = r#"{
            "columns": [{"name": "division"}, {"name": "total_violations"}],
            "rows": [["Dhaka", 42], ["Chattagram", 28]]
        }"#;
        let result: QueryResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.columns.len(), 2);
        assert_eq!(result.columns[0].name, "division");
        assert_eq!(result.rows.len(), 2);
    }

    #[test]
    fn parse_rows_applies_column_positions_once() {
        let result = QueryResult {
            columns: vec![],
            rows: vec![
                vec![json!("Dhaka"), json!(42)],
                vec![json!("Khulna"), json!(7.5)],
            ],
        };
        let rows = result.parse_rows(0, 1).unwrap();
        assert_eq!(rows[0].name, "Dhaka");
        assert!((rows[0].value - 42.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].name, "Khulna");
    }

    #[test]
    fn parse_rows_rejects_short_row() {
        let result = QueryResult {
            columns: vec![],
            rows: vec![vec![json!("Dhaka")]],
        };
        assert!(result.parse_rows(0, 1).is_err());
    }
}
