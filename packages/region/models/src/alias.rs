//! Validated alias tables for region-name reconciliation.
//!
//! An [`AliasTable`] maps source-system region spellings to the spellings a
//! boundary dataset uses. Tables are immutable once constructed and validated
//! at load: resolution is exactly one hop, so a table where an alias target
//! is itself an alias key is rejected up front.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised while constructing an [`AliasTable`].
#[derive(Debug, Error)]
pub enum AliasTableError {
    /// An alias target is itself an alias key, which would require
    /// transitive resolution.
    #[error("alias chain: \"{key}\" maps to \"{target}\", which is itself an alias key")]
    Chain {
        /// The alias key starting the chain.
        key: String,
        /// Its target, which also appears as a key.
        target: String,
    },

    /// The TOML source could not be parsed as a string-to-string table.
    #[error("invalid alias table TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// An immutable source-name to boundary-name mapping.
///
/// Many-to-one is allowed (several source spellings for one boundary name);
/// resolution is one-directional and single-hop. Constructed once at startup
/// and shared read-only, so it is safe to pass around freely.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    forward: BTreeMap<String, String>,
}

impl AliasTable {
    /// Builds a table from `(source_name, boundary_name)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`AliasTableError::Chain`] if any target is also a key.
    pub fn new<I, K, V>(entries: I) -> Result<Self, AliasTableError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let forward: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for (key, target) in &forward {
            if forward.contains_key(target) {
                return Err(AliasTableError::Chain {
                    key: key.clone(),
                    target: target.clone(),
                });
            }
        }

        Ok(Self { forward })
    }

    /// Parses a table from TOML of the form `Chattagram = "Chittagong"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the table contains an
    /// alias chain.
    pub fn from_toml_str(source: &str) -> Result<Self, AliasTableError> {
        let entries: BTreeMap<String, String> = toml::de::from_str(source)?;
        Self::new(entries)
    }

    /// Resolves a source-system name to its boundary-dataset spelling.
    ///
    /// Unmapped names pass through unchanged; resolution never chains.
    #[must_use]
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.forward.get(name).map_or(name, String::as_str)
    }

    /// Recovers the source-system name for a boundary-dataset spelling.
    ///
    /// Scans for the first key (in sorted-key order, so the result is
    /// deterministic) whose target equals `display_name`; falls back to
    /// identity when nothing maps there. Linear in table size, which is fine:
    /// tables are small and this runs on user interaction, not per render.
    #[must_use]
    pub fn resolve_original<'a>(&'a self, display_name: &'a str) -> &'a str {
        self.forward
            .iter()
            .find(|(_, target)| target.as_str() == display_name)
            .map_or(display_name, |(key, _)| key.as_str())
    }

    /// Whether `name` appears as an alias key.
    #[must_use]
    pub fn contains_alias(&self, name: &str) -> bool {
        self.forward.contains_key(name)
    }

    /// Number of alias entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates over `(source_name, boundary_name)` pairs in sorted-key
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
