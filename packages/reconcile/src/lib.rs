#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region-name reconciliation.
//!
//! The analytics database, the boundary `GeoJSON` files, and the various
//! vendor conventions each spell administrative-region names their own way.
//! This crate rewrites analytics-source names into the boundary dataset's
//! vocabulary through a static [`AliasTable`], attaches row data to boundary
//! features, and reports whatever still fails to match so data-quality gaps
//! stay visible instead of silently rendering as zero.

pub mod registry;
pub mod report;

pub use report::ReconcileReport;

use std::collections::{BTreeMap, BTreeSet};

use geojson::{Feature, JsonObject};
use regional_map_region_models::{AliasTable, RegionRow, UNMATCHED_VALUE};

/// GeoJSON property key the metric value is written under.
///
/// CamelCase keys are a wire contract with the JS rendering consumers.
pub const VALUE_PROPERTY: &str = "value";

/// GeoJSON property key the originating row cells are written under.
pub const ROW_DATA_PROPERTY: &str = "rowData";

/// Rewrites row names into the boundary dataset's vocabulary.
///
/// Returns a new sequence; input rows are untouched, order is preserved, and
/// unmapped names pass through unchanged. Resolution is one hop: the table
/// rejects chains at construction, so applying this twice yields the same
/// result as applying it once.
#[must_use]
pub fn apply_aliases(rows: &[RegionRow], aliases: &AliasTable) -> Vec<RegionRow> {
    rows.iter()
        .map(|row| row.with_name(aliases.resolve(&row.name)))
        .collect()
}

/// Attaches row values to boundary features by name, in place.
///
/// Builds a name lookup from `rows` (already alias-resolved), then for every
/// feature reads `name_property` from its properties: on a hit the feature
/// gets the row's metric under [`VALUE_PROPERTY`] and the full cell array
/// under [`ROW_DATA_PROPERTY`]; on a miss it gets [`UNMATCHED_VALUE`] and a
/// JSON null. Every feature therefore leaves with a finite numeric value.
///
/// If two rows share a post-alias name, the later row wins (last-write-wins).
///
/// Unmatched names on both sides are collected into the returned
/// [`ReconcileReport`] and logged; they never fail the pipeline.
pub fn reconcile_to_features(
    rows: &[RegionRow],
    features: &mut [Feature],
    name_property: &str,
) -> ReconcileReport {
    let mut by_name: BTreeMap<&str, &RegionRow> = BTreeMap::new();
    for row in rows {
        by_name.insert(row.name.as_str(), row);
    }

    let mut report = ReconcileReport::default();
    let mut matched_names: BTreeSet<String> = BTreeSet::new();

    for feature in features.iter_mut() {
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(name_property))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string);

        let props = feature.properties.get_or_insert_with(JsonObject::new);

        match name.as_deref().and_then(|n| by_name.get(n)) {
            Some(row) => {
                props.insert(VALUE_PROPERTY.to_string(), row.value.into());
                props.insert(
                    ROW_DATA_PROPERTY.to_string(),
                    serde_json::Value::Array(row.cells.clone()),
                );
                report.matched += 1;
                if let Some(n) = name {
                    matched_names.insert(n);
                }
            }
            None => {
                props.insert(VALUE_PROPERTY.to_string(), UNMATCHED_VALUE.into());
                props.insert(ROW_DATA_PROPERTY.to_string(), serde_json::Value::Null);
                if let Some(n) = name {
                    report.unmatched_features.insert(n);
                }
            }
        }
    }

    for row_name in by_name.keys() {
        if !matched_names.contains(*row_name) {
            report.unmatched_rows.insert((*row_name).to_string());
        }
    }

    if !report.unmatched_features.is_empty() {
        log::warn!(
            "{} boundary feature(s) matched no data row: {:?}",
            report.unmatched_features.len(),
            report.unmatched_features
        );
    }
    if !report.unmatched_rows.is_empty() {
        log::warn!(
            "{} data row(s) matched no boundary feature: {:?}",
            report.unmatched_rows.len(),
            report.unmatched_rows
        );
    }
    if report.no_data() && !features.is_empty() {
        log::warn!("no row names matched any boundary feature; map will render empty");
    }

    report
}
