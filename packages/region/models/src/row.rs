//! Parsed per-region row type.
//!
//! The upstream source reports positional rows whose column semantics live in
//! the caller's head. [`RegionRow`] applies that positional knowledge exactly
//! once, at the parse boundary, so downstream code works with named fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::UNMATCHED_VALUE;

/// A malformed row shape: the row does not satisfy the column positions the
/// caller promised.
///
/// Distinct from soft data-quality gaps (unmatched names, null metrics),
/// which never error.
#[derive(Debug, Error)]
pub enum RowShapeError {
    /// The row has fewer cells than the requested column index requires.
    #[error("row has {len} cells, but column index {index} was requested")]
    TooShort {
        /// Number of cells in the offending row.
        len: usize,
        /// The out-of-range column index.
        index: usize,
    },

    /// The name cell is not a string.
    #[error("name column {index} holds a non-string cell: {cell}")]
    NameNotText {
        /// The name column index.
        index: usize,
        /// The offending cell, rendered as JSON.
        cell: serde_json::Value,
    },

    /// The value cell is neither a number nor null.
    #[error("value column {index} holds a non-numeric cell: {cell}")]
    ValueNotNumeric {
        /// The value column index.
        index: usize,
        /// The offending cell, rendered as JSON.
        cell: serde_json::Value,
    },
}

/// One region's data point, parsed from a positional upstream row.
///
/// The full cell array is retained for downstream detail display (tooltips,
/// drill-through filters), untouched by alias rewriting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRow {
    /// Region name as reported by the analytics source (possibly rewritten
    /// by alias resolution).
    pub name: String,
    /// Numeric metric used for choropleth coloring. Null upstream cells map
    /// to [`UNMATCHED_VALUE`].
    pub value: f64,
    /// The original row cells, in upstream order.
    pub cells: Vec<serde_json::Value>,
}

impl RegionRow {
    /// Parses a positional row into a named-field record.
    ///
    /// A null value cell is a data-quality gap, not a caller bug: it maps to
    /// [`UNMATCHED_VALUE`] rather than erroring.
    ///
    /// # Errors
    ///
    /// Returns a [`RowShapeError`] if the row is shorter than the requested
    /// indexes require, the name cell is not a string, or the value cell is
    /// neither numeric nor null.
    pub fn from_cells(
        cells: &[serde_json::Value],
        name_column: usize,
        value_column: usize,
    ) -> Result<Self, RowShapeError> {
        let name_cell = cells.get(name_column).ok_or(RowShapeError::TooShort {
            len: cells.len(),
            index: name_column,
        })?;
        let value_cell = cells.get(value_column).ok_or(RowShapeError::TooShort {
            len: cells.len(),
            index: value_column,
        })?;

        let name = name_cell
            .as_str()
            .ok_or_else(|| RowShapeError::NameNotText {
                index: name_column,
                cell: name_cell.clone(),
            })?
            .to_string();

        let value = if value_cell.is_null() {
            UNMATCHED_VALUE
        } else {
            value_cell
                .as_f64()
                .ok_or_else(|| RowShapeError::ValueNotNumeric {
                    index: value_column,
                    cell: value_cell.clone(),
                })?
        };

        Ok(Self {
            name,
            value,
            cells: cells.to_vec(),
        })
    }

    /// Returns a copy of this row with a different region name.
    ///
    /// The original cells are preserved as-is, so the source spelling stays
    /// available for detail display.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: self.value,
            cells: self.cells.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_name_and_value() {
        let cells = vec![json!("Dhaka"), json!(42), json!("extra")];
        let row = RegionRow::from_cells(&cells, 0, 1).unwrap();
        assert_eq!(row.name, "Dhaka");
        assert!((row.value - 42.0).abs() < f64::EPSILON);
        assert_eq!(row.cells.len(), 3);
    }

    #[test]
    fn null_value_maps_to_sentinel() {
        let cells = vec![json!("Dhaka"), json!(null)];
        let row = RegionRow::from_cells(&cells, 0, 1).unwrap();
        assert!((row.value - UNMATCHED_VALUE).abs() < f64::EPSILON);
    }

    #[test]
    fn short_row_is_loud() {
        let cells = vec![json!("Dhaka")];
        let err = RegionRow::from_cells(&cells, 0, 1).unwrap_err();
        assert!(matches!(err, RowShapeError::TooShort { len: 1, index: 1 }));
    }

    #[test]
    fn non_string_name_is_loud() {
        let cells = vec![json!(7), json!(42)];
        let err = RegionRow::from_cells(&cells, 0, 1).unwrap_err();
        assert!(matches!(err, RowShapeError::NameNotText { index: 0, .. }));
    }

    #[test]
    fn non_numeric_value_is_loud() {
        let cells = vec![json!("Dhaka"), json!("fast")];
        let err = RegionRow::from_cells(&cells, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            RowShapeError::ValueNotNumeric { index: 1, .. }
        ));
    }

    #[test]
    fn with_name_preserves_cells() {
        let cells = vec![json!("Chattagram"), json!(28)];
        let row = RegionRow::from_cells(&cells, 0, 1).unwrap();
        let renamed = row.with_name("Chittagong");
        assert_eq!(renamed.name, "Chittagong");
        assert_eq!(renamed.cells[0], json!("Chattagram"));
        assert!((renamed.value - 28.0).abs() < f64::EPSILON);
    }
}
