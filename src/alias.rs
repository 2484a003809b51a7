//! Alias table for alternate spellings of entity names.
//!
//! Users type "USA" or "Britain"; the extracted list says "united states"
//! and "united kingdom". The table maps lowercase alternates to the
//! canonical lowercase name as it appears in the extracted list. It is
//! many-to-one, static once built, and resolution is a single substitution
//! pass — aliases never chain.

use std::collections::HashMap;

/// Built-in alternate spellings, alias first, canonical second.
///
/// Canonical values are names as the extractor normalizes them. Extend
/// this list as gaps are discovered in testing.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("usa", "united states"),
    ("us", "united states"),
    ("america", "united states"),
    ("united states of america", "united states"),
    ("dr congo", "democratic republic of the congo"),
    ("drc", "democratic republic of the congo"),
    ("congo", "democratic republic of the congo"),
    ("republic of the congo", "democratic republic of the congo"),
    ("uk", "united kingdom"),
    ("britain", "united kingdom"),
    ("great britain", "united kingdom"),
    ("england", "united kingdom"),
    ("persia", "iran"),
    ("burma", "myanmar"),
    ("dprk", "north korea"),
    ("prc", "china"),
];

/// Mapping from lowercase alternate spelling to canonical lowercase name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Creates the built-in table of common alternate names.
    #[must_use]
    pub fn builtin() -> Self {
        let map = BUILTIN_ALIASES
            .iter()
            .map(|&(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect();
        Self { map }
    }

    /// Adds an alias. Both sides are lowercased; an existing entry for the
    /// same alias is replaced.
    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.map
            .insert(alias.into().to_lowercase(), canonical.into().to_lowercase());
    }

    /// Resolves a normalized guess to its canonical form.
    ///
    /// Exactly one substitution pass: a string that is already canonical
    /// (or simply unknown) comes back unchanged, and the result is never
    /// looked up again.
    #[must_use]
    pub fn resolve<'a>(&'a self, normalized: &'a str) -> &'a str {
        self.map.get(normalized).map_or(normalized, String::as_str)
    }

    /// Returns true if the table has an entry for this alias.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.map.contains_key(alias)
    }

    /// Number of aliases in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for AliasTable {
    /// The built-in table; use [`AliasTable::empty`] for a blank one.
    fn default() -> Self {
        Self::builtin()
    }
}
