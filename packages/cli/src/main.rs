#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Command-line front door for the regional choropleth pipeline.
//!
//! Reads a query-result JSON file (the upstream `{columns, rows}` shape) and
//! a boundary `GeoJSON` file, runs reconciliation and binning, and emits the
//! enriched collection plus breaks, legend, and diagnostics as JSON. Useful
//! for offline inspection of alias coverage and for feeding pre-enriched
//! collections to static rendering pipelines.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use geojson::FeatureCollection;
use regional_map_choropleth::{format_legend, quantile_breaks};
use regional_map_enrich::{EnrichOptions, enrich_features};
use regional_map_reconcile::registry::{AdminLevel, aliases_for};
use regional_map_region_models::{AliasTable, QueryResult};
use regional_map_transform::{to_bar_chart, to_line_chart, to_table};

#[derive(Parser)]
#[command(name = "regional_map_cli", about = "Regional choropleth data tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Administrative level selecting a built-in alias table.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Division,
    District,
}

/// Chart shapes the transform layer can produce.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChartKind {
    Bar,
    Line,
}

impl From<Level> for AdminLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Division => Self::Division,
            Level::District => Self::District,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a boundary `GeoJSON` file with query-result values
    Enrich {
        /// Query-result JSON file (`{"columns": [...], "rows": [...]}`)
        rows: PathBuf,
        /// Boundary `GeoJSON` `FeatureCollection` file
        boundaries: PathBuf,
        /// Feature property holding the region name
        #[arg(long, default_value = "shapeName")]
        name_property: String,
        /// Built-in alias table to apply
        #[arg(long, value_enum, default_value = "division")]
        level: Level,
        /// Custom alias table TOML file (overrides --level)
        #[arg(long)]
        aliases: Option<PathBuf>,
        /// Row position holding the region name
        #[arg(long, default_value_t = 0)]
        name_column: usize,
        /// Row position holding the numeric metric
        #[arg(long, default_value_t = 1)]
        value_column: usize,
        /// Number of color buckets
        #[arg(long, default_value_t = regional_map_choropleth::DEFAULT_BINS)]
        bins: usize,
        /// Decimal places in legend labels
        #[arg(long, default_value_t = 2)]
        precision: usize,
        /// Write output here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute quantile breaks and a legend from a query result alone
    Legend {
        /// Query-result JSON file
        rows: PathBuf,
        /// Row position holding the region name
        #[arg(long, default_value_t = 0)]
        name_column: usize,
        /// Row position holding the numeric metric
        #[arg(long, default_value_t = 1)]
        value_column: usize,
        /// Number of color buckets
        #[arg(long, default_value_t = regional_map_choropleth::DEFAULT_BINS)]
        bins: usize,
        /// Decimal places in legend labels
        #[arg(long, default_value_t = 2)]
        precision: usize,
    },
    /// Reshape a query result into chart series JSON
    Chart {
        /// Query-result JSON file
        rows: PathBuf,
        /// Chart kind to reshape into
        #[arg(long, value_enum, default_value = "bar")]
        kind: ChartKind,
    },
    /// Reshape a query result into records keyed by column name
    Table {
        /// Query-result JSON file
        rows: PathBuf,
    },
    /// Print a built-in alias table
    Aliases {
        /// Which administrative level's table to print
        #[arg(long, value_enum, default_value = "division")]
        level: Level,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Enrich {
            rows,
            boundaries,
            name_property,
            level,
            aliases,
            name_column,
            value_column,
            bins,
            precision,
            output,
        } => {
            let result: QueryResult = serde_json::from_str(&std::fs::read_to_string(rows)?)?;
            let collection: FeatureCollection =
                serde_json::from_str(&std::fs::read_to_string(boundaries)?)?;

            let table = match aliases {
                Some(path) => AliasTable::from_toml_str(&std::fs::read_to_string(path)?)?,
                None => aliases_for(level.into()),
            };

            let parsed = result.parse_rows(name_column, value_column)?;
            let options = EnrichOptions {
                name_property,
                num_bins: bins,
                precision,
                ..EnrichOptions::default()
            };

            let enriched = enrich_features(&parsed, &collection, &table, &options);
            if enriched.report.no_data() {
                log::warn!("no geographic data: nothing matched between rows and boundaries");
            }

            let json = serde_json::to_string_pretty(&enriched)?;
            match output {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        Commands::Legend {
            rows,
            name_column,
            value_column,
            bins,
            precision,
        } => {
            let result: QueryResult = serde_json::from_str(&std::fs::read_to_string(rows)?)?;
            let parsed = result.parse_rows(name_column, value_column)?;

            let values: Vec<f64> = parsed
                .iter()
                .map(|row| row.value)
                .filter(|v| v.is_finite())
                .collect();
            let breaks = quantile_breaks(&values, bins);

            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let (min, max) = if values.is_empty() { (0.0, 0.0) } else { (min, max) };

            let legend = format_legend(
                &breaks,
                min,
                max,
                regional_map_choropleth::BLUE_PALETTE,
                precision,
            );

            let json = serde_json::json!({ "breaks": breaks, "legend": legend });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Chart { rows, kind } => {
            let result: QueryResult = serde_json::from_str(&std::fs::read_to_string(rows)?)?;
            let json = match kind {
                ChartKind::Bar => serde_json::to_string_pretty(&to_bar_chart(&result))?,
                ChartKind::Line => serde_json::to_string_pretty(&to_line_chart(&result))?,
            };
            println!("{json}");
        }
        Commands::Table { rows } => {
            let result: QueryResult = serde_json::from_str(&std::fs::read_to_string(rows)?)?;
            println!("{}", serde_json::to_string_pretty(&to_table(&result))?);
        }
        Commands::Aliases { level } => {
            let table = aliases_for(level.into());
            for (source, boundary) in table.iter() {
                println!("{source} -> {boundary}");
            }
        }
    }

    Ok(())
}
