#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Quantile binning and legend formatting for choropleth rendering.
//!
//! Converts an unbounded set of metric values into a small fixed number of
//! perceptually-ordered color buckets. Binning is by quantiles (equal-count
//! groups) rather than equal-width ranges, so a handful of high-value regions
//! cannot wash out the color scale for everyone else.
//!
//! All operations fail soft: empty or degenerate inputs produce documented
//! fallbacks, never panics.

use serde::Serialize;

/// Default number of color buckets.
pub const DEFAULT_BINS: usize = 5;

/// Default 5-tier blue gradient, lightest to darkest.
pub const BLUE_PALETTE: &[&str] = &["#dbeafe", "#93c5fd", "#60a5fa", "#3b82f6", "#1d4ed8"];

/// One legend entry: a swatch color and a formatted value range.
#[derive(Debug, Clone, Serialize)]
pub struct LegendItem {
    /// CSS color for the bucket swatch.
    pub color: String,
    /// Formatted range, e.g. `"11 - 16"` or `"28 +"`.
    pub label: String,
}

/// Computes nearest-rank quantile break thresholds.
///
/// Sorts `values` ascending (numeric total order) and takes
/// `sorted[len * i / num_bins]` for `i` in `1..num_bins`, yielding exactly
/// `num_bins - 1` non-decreasing thresholds, all drawn from the input. This
/// is the nearest-rank convention, not linear interpolation; other quantile
/// conventions would shift bucket boundaries.
///
/// Callers must filter out non-finite values first; this function does not.
/// An empty input yields no breaks, which [`bucket_for`] treats as
/// "everything in bucket 0". Repeated values can produce tied thresholds;
/// bucket assignment handles those.
#[must_use]
pub fn quantile_breaks(values: &[f64], num_bins: usize) -> Vec<f64> {
    if values.is_empty() || num_bins < 2 {
        return Vec::new();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    (1..num_bins)
        .map(|i| sorted[sorted.len() * i / num_bins])
        .collect()
}

/// Maps a value to a bucket index in `[0, num_colors - 1]`.
///
/// Returns the first index whose threshold the value does not exceed, the
/// last bucket when the value exceeds every threshold, and bucket 0 when
/// there are no breaks at all.
#[must_use]
pub fn bucket_for(value: f64, breaks: &[f64], num_colors: usize) -> usize {
    if breaks.is_empty() || num_colors == 0 {
        return 0;
    }
    breaks
        .iter()
        .position(|threshold| value <= *threshold)
        .unwrap_or(num_colors - 1)
        .min(num_colors - 1)
}

/// Picks the palette color for a value.
///
/// Falls back to a light blue when the palette is empty, matching the soft
/// failure mode of the rest of the pipeline.
#[must_use]
pub fn color_for<'a>(value: f64, breaks: &[f64], palette: &[&'a str]) -> &'a str {
    palette
        .get(bucket_for(value, breaks, palette.len()))
        .copied()
        .unwrap_or("#93c5fd")
}

/// Formats legend entries for a set of breaks.
///
/// Produces one entry per palette color: the first spans `[min_value,
/// breaks[0]]`, middle entries span adjacent break pairs, and the last is
/// open-ended (`"x +"`) since a future refresh may exceed the last observed
/// sample. With no breaks it degrades to a single entry spanning
/// `[min_value, max_value]` rather than erroring.
#[must_use]
pub fn format_legend(
    breaks: &[f64],
    min_value: f64,
    max_value: f64,
    palette: &[&str],
    precision: usize,
) -> Vec<LegendItem> {
    if palette.is_empty() {
        return Vec::new();
    }

    if breaks.is_empty() {
        return vec![LegendItem {
            color: (*palette.first().unwrap_or(&"#93c5fd")).to_string(),
            label: format!(
                "{} - {}",
                format_number(min_value, precision),
                format_number(max_value, precision)
            ),
        }];
    }

    let last = palette.len() - 1;
    palette
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let label = if i == 0 {
                format!(
                    "{} - {}",
                    format_number(min_value, precision),
                    format_number(bound(breaks, 0, max_value), precision)
                )
            } else if i == last {
                format!("{} +", format_number(bound(breaks, i - 1, max_value), precision))
            } else {
                format!(
                    "{} - {}",
                    format_number(bound(breaks, i - 1, max_value), precision),
                    format_number(bound(breaks, i, max_value), precision)
                )
            };
            LegendItem {
                color: (*color).to_string(),
                label,
            }
        })
        .collect()
}

/// Break threshold at `index`, falling back to the observed maximum when the
/// palette is longer than `breaks + 1` (degenerate caller input).
fn bound(breaks: &[f64], index: usize, max_value: f64) -> f64 {
    breaks.get(index).copied().unwrap_or(max_value)
}

/// Formats a number rounded to `precision` decimals; integral results render
/// without a decimal point.
fn format_number(value: f64, precision: usize) -> String {
    let factor = 10_f64.powi(i32::try_from(precision).unwrap_or(2));
    let rounded = (value * factor).round() / factor;

    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.precision$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_rank_breaks() {
        // floor(8*i/5) for i in 1..5 -> indexes 1, 3, 4, 6
        let values = [8.0, 11.0, 15.0, 16.0, 19.0, 22.0, 28.0, 42.0];
        let breaks = quantile_breaks(&values, 5);
        assert_eq!(breaks, vec![11.0, 16.0, 19.0, 28.0]);
    }

    #[test]
    fn break_count_and_monotonicity() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0, 5.0];
        let breaks = quantile_breaks(&values, 5);
        assert_eq!(breaks.len(), 4);
        for pair in breaks.windows(2) {
            assert!(pair[0] <= pair[1], "breaks not monotone: {breaks:?}");
        }
    }

    #[test]
    fn empty_values_yield_no_breaks() {
        assert!(quantile_breaks(&[], 5).is_empty());
    }

    #[test]
    fn all_equal_values_still_bucket() {
        let values = [7.0; 12];
        let breaks = quantile_breaks(&values, 5);
        assert_eq!(breaks, vec![7.0, 7.0, 7.0, 7.0]);
        assert_eq!(bucket_for(7.0, &breaks, 5), 0);
        assert_eq!(bucket_for(8.0, &breaks, 5), 4);
    }

    #[test]
    fn bucket_assignment_matches_spec_example() {
        let breaks = [11.0, 16.0, 19.0, 28.0];
        assert_eq!(bucket_for(8.0, &breaks, 5), 0);
        assert_eq!(bucket_for(11.0, &breaks, 5), 0);
        assert_eq!(bucket_for(15.0, &breaks, 5), 1);
        assert_eq!(bucket_for(22.0, &breaks, 5), 3);
        assert_eq!(bucket_for(42.0, &breaks, 5), 4);
    }

    #[test]
    fn bucket_is_always_in_range() {
        let values = [8.0, 11.0, 15.0, 16.0, 19.0, 22.0, 28.0, 42.0];
        let breaks = quantile_breaks(&values, 5);
        for v in values {
            let bucket = bucket_for(v, &breaks, 5);
            assert!(bucket < 5, "bucket {bucket} out of range for value {v}");
        }
    }

    #[test]
    fn empty_breaks_bucket_zero() {
        assert_eq!(bucket_for(42.0, &[], 5), 0);
    }

    #[test]
    fn color_for_uses_palette_order() {
        let breaks = [11.0, 16.0, 19.0, 28.0];
        assert_eq!(color_for(8.0, &breaks, BLUE_PALETTE), "#dbeafe");
        assert_eq!(color_for(42.0, &breaks, BLUE_PALETTE), "#1d4ed8");
    }

    #[test]
    fn legend_has_one_item_per_color() {
        let breaks = [11.0, 16.0, 19.0, 28.0];
        let legend = format_legend(&breaks, 8.0, 42.0, BLUE_PALETTE, 2);
        assert_eq!(legend.len(), BLUE_PALETTE.len());
        assert_eq!(legend[0].label, "8 - 11");
        assert_eq!(legend[1].label, "11 - 16");
        assert_eq!(legend[3].label, "19 - 28");
        assert_eq!(legend[4].label, "28 +");
        for (item, color) in legend.iter().zip(BLUE_PALETTE) {
            assert_eq!(item.color, *color);
            assert!(!item.label.is_empty());
        }
    }

    #[test]
    fn legend_degrades_to_single_span_without_breaks() {
        let legend = format_legend(&[], 0.0, 0.0, BLUE_PALETTE, 2);
        assert_eq!(legend.len(), 1);
        assert_eq!(legend[0].label, "0 - 0");
        assert_eq!(legend[0].color, BLUE_PALETTE[0]);
    }

    #[test]
    fn labels_round_and_drop_trailing_decimals() {
        assert_eq!(format_number(11.0, 2), "11");
        assert_eq!(format_number(11.5, 2), "11.50");
        assert_eq!(format_number(11.456, 2), "11.46");
        assert_eq!(format_number(0.0, 1), "0");
    }
}
