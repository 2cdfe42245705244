#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Choropleth enrichment pipeline.
//!
//! Composes the name reconciler and the quantile binner: analytics rows go
//! in, an enriched boundary collection comes out, each feature carrying a
//! numeric `value` and the originating row, together with the quantile
//! breaks, a ready-to-render legend, and the reconciliation report.

use geojson::FeatureCollection;
use regional_map_choropleth::{BLUE_PALETTE, DEFAULT_BINS, LegendItem, format_legend, quantile_breaks};
use regional_map_reconcile::{ReconcileReport, VALUE_PROPERTY, apply_aliases, reconcile_to_features};
use regional_map_region_models::{AliasTable, RegionRow};
use serde::Serialize;

/// Tuning knobs for one enrichment pass.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Feature property holding the comparable region name. Boundary files
    /// disagree on this (`shapeName`, `NAME_1`, `name`), so it stays a
    /// parameter.
    pub name_property: String,
    /// Number of color buckets.
    pub num_bins: usize,
    /// Legend swatch colors, lightest to darkest. Length fixes the bucket
    /// count the legend renders.
    pub palette: Vec<String>,
    /// Decimal places in legend labels.
    pub precision: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            name_property: "shapeName".to_string(),
            num_bins: DEFAULT_BINS,
            palette: BLUE_PALETTE.iter().map(ToString::to_string).collect(),
            precision: 2,
        }
    }
}

/// The enrichment pipeline's complete output for one render cycle.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedMap {
    /// The boundary collection with `value`/`rowData` attached per feature.
    pub collection: FeatureCollection,
    /// Quantile break thresholds over the collection's values.
    pub breaks: Vec<f64>,
    /// One legend entry per palette color.
    pub legend: Vec<LegendItem>,
    /// What matched and what did not; `report.no_data()` is the signal to
    /// show a "no geographic data" state instead of a uniform map.
    pub report: ReconcileReport,
}

/// Runs the full enrichment pipeline over a boundary collection.
///
/// Aliases are applied to the rows, the rewritten rows are merged onto a
/// clone of `collection` (the input is not mutated), then breaks and legend
/// are computed over every finite feature value, unmatched zeros included,
/// so the rendered colors and the legend always agree.
///
/// Soft semantics throughout: empty rows, empty collections, and fully
/// unmatched data all produce a well-formed result.
#[must_use]
pub fn enrich_features(
    rows: &[RegionRow],
    collection: &FeatureCollection,
    aliases: &AliasTable,
    options: &EnrichOptions,
) -> EnrichedMap {
    let resolved = apply_aliases(rows, aliases);

    let mut collection = collection.clone();
    let report = reconcile_to_features(&resolved, &mut collection.features, &options.name_property);

    let values: Vec<f64> = collection
        .features
        .iter()
        .filter_map(|feature| {
            feature
                .properties
                .as_ref()
                .and_then(|props| props.get(VALUE_PROPERTY))
                .and_then(serde_json::Value::as_f64)
        })
        .filter(|v| v.is_finite())
        .collect();

    let breaks = quantile_breaks(&values, options.num_bins);

    let (min_value, max_value) = values.iter().fold((f64::MAX, f64::MIN), |(min, max), v| {
        (min.min(*v), max.max(*v))
    });
    let (min_value, max_value) = if values.is_empty() {
        (0.0, 0.0)
    } else {
        (min_value, max_value)
    };

    let palette: Vec<&str> = options.palette.iter().map(String::as_str).collect();
    let legend = format_legend(&breaks, min_value, max_value, &palette, options.precision);

    log::info!(
        "enriched {} feature(s): {} matched, {} break(s)",
        collection.features.len(),
        report.matched,
        breaks.len()
    );

    EnrichedMap {
        collection,
        breaks,
        legend,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Feature, JsonObject};
    use serde_json::json;

    fn row(name: &str, value: f64) -> RegionRow {
        RegionRow {
            name: name.to_string(),
            value,
            cells: vec![json!(name), json!(value)],
        }
    }

    fn feature(name: &str) -> Feature {
        let mut props = JsonObject::new();
        props.insert("shapeName".to_string(), json!(name));
        Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(props),
            foreign_members: None,
        }
    }

    fn collection(names: &[&str]) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: names.iter().map(|n| feature(n)).collect(),
            foreign_members: None,
        }
    }

    #[test]
    fn full_pipeline_reconciles_bins_and_labels() {
        let aliases = AliasTable::new([("Chattagram", "Chittagong")]).unwrap();
        let rows = vec![row("Chattagram", 28.0), row("Dhaka", 42.0)];
        let boundaries = collection(&["Chittagong", "Dhaka", "Khulna"]);

        let enriched = enrich_features(&rows, &boundaries, &aliases, &EnrichOptions::default());

        assert_eq!(enriched.report.matched, 2);
        assert!(enriched.report.unmatched_features.contains("Khulna"));
        assert_eq!(enriched.breaks.len(), 4);
        assert_eq!(enriched.legend.len(), 5);
        // Input collection untouched
        assert!(
            boundaries.features[0]
                .properties
                .as_ref()
                .unwrap()
                .get("value")
                .is_none()
        );
    }

    #[test]
    fn unmatched_sentinels_participate_in_binning() {
        let aliases = AliasTable::default();
        let rows = vec![row("Dhaka", 10.0)];
        let boundaries = collection(&["Dhaka", "Khulna"]);

        let enriched = enrich_features(&rows, &boundaries, &aliases, &EnrichOptions::default());

        // Values are [10, 0]; breaks are drawn from that set.
        assert!(enriched.breaks.iter().all(|b| *b == 0.0 || *b == 10.0));
    }

    #[test]
    fn empty_inputs_degrade_to_empty_map() {
        let enriched = enrich_features(
            &[],
            &collection(&[]),
            &AliasTable::default(),
            &EnrichOptions::default(),
        );

        assert!(enriched.breaks.is_empty());
        assert_eq!(enriched.legend.len(), 1);
        assert_eq!(enriched.legend[0].label, "0 - 0");
        assert!(enriched.report.no_data());
    }

    #[test]
    fn no_match_is_detectable() {
        let rows = vec![row("Sylhet", 5.0)];
        let boundaries = collection(&["Dhaka"]);

        let enriched = enrich_features(
            &rows,
            &boundaries,
            &AliasTable::default(),
            &EnrichOptions::default(),
        );

        assert!(enriched.report.no_data());
        assert!(enriched.report.unmatched_rows.contains("Sylhet"));
    }
}
