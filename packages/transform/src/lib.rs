#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reshapes upstream query results into chart and table data.
//!
//! The analytics source reports positional `[category, value]` rows; chart
//! widgets want parallel category/value series, and table widgets want
//! records keyed by column name. Empty results reshape to empty outputs,
//! never errors.

use std::collections::BTreeMap;

use regional_map_region_models::QueryResult;
use serde::Serialize;

/// Parallel category/value series for a bar chart.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BarChartData {
    /// Category axis labels, in row order.
    pub categories: Vec<String>,
    /// Values, parallel to `categories`.
    pub values: Vec<f64>,
}

/// Parallel date/value series for a line chart.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LineChartData {
    /// Date axis labels, in row order.
    pub dates: Vec<String>,
    /// Values, parallel to `dates`.
    pub values: Vec<f64>,
}

/// Fixed status thresholds for scalar-card coloring.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Values below this are red.
    pub low: f64,
    /// Values below this (but at or above `low`) are orange.
    pub medium: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: 30.0,
            medium: 60.0,
        }
    }
}

/// Reshapes `[category, value, ...]` rows into bar chart series.
///
/// Non-string categories are rendered as JSON; non-numeric values become 0.
#[must_use]
pub fn to_bar_chart(result: &QueryResult) -> BarChartData {
    BarChartData {
        categories: result.rows.iter().map(|row| cell_text(row.first())).collect(),
        values: result.rows.iter().map(|row| cell_number(row.get(1))).collect(),
    }
}

/// Reshapes `[date, value, ...]` rows into line chart series.
#[must_use]
pub fn to_line_chart(result: &QueryResult) -> LineChartData {
    LineChartData {
        dates: result.rows.iter().map(|row| cell_text(row.first())).collect(),
        values: result.rows.iter().map(|row| cell_number(row.get(1))).collect(),
    }
}

/// Reshapes rows into records keyed by column name.
///
/// Rows longer than the column list keep only the named cells; missing cells
/// are omitted from the record rather than padded.
#[must_use]
pub fn to_table(result: &QueryResult) -> Vec<BTreeMap<String, serde_json::Value>> {
    result
        .rows
        .iter()
        .map(|row| {
            result
                .columns
                .iter()
                .enumerate()
                .filter_map(|(i, col)| row.get(i).map(|cell| (col.name.clone(), cell.clone())))
                .collect()
        })
        .collect()
}

/// Formats a percentage with one decimal, e.g. `"97.5%"`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Formats a throughput value in Mbps with two decimals, e.g. `"4.20 Mbps"`.
#[must_use]
pub fn format_speed(value: f64) -> String {
    format!("{value:.2} Mbps")
}

/// Status color for a scalar value: red below `low`, orange below `medium`,
/// green otherwise.
#[must_use]
pub const fn status_color(value: f64, thresholds: &Thresholds) -> &'static str {
    if value < thresholds.low {
        "#ef4444"
    } else if value < thresholds.medium {
        "#f59e0b"
    } else {
        "#10b981"
    }
}

fn cell_text(cell: Option<&serde_json::Value>) -> String {
    match cell {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn cell_number(cell: Option<&serde_json::Value>) -> f64 {
    cell.and_then(serde_json::Value::as_f64).unwrap_or(0.0)
}
