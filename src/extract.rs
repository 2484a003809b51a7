//! Row extraction: ranked entities out of a raw wikitext document.
//!
//! The extractor splits the document on its row marker, keeps only
//! fragments carrying the entity-marker template, and runs two independent
//! passes over that same qualifying sequence — one for names, one for
//! population figures. Sharing the split and the qualifying predicate is
//! what keeps the two lists index-aligned.
//!
//! Extraction never fails. A row missing its field is skipped, and a
//! document yielding fewer than the target count produces a short list
//! plus a warning, which callers must tolerate.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::wikitext::{contains_template, scan_templates, split_rows, Template};

/// Default number of entities to extract.
pub const DEFAULT_TARGET: usize = 20;

/// Configuration for the row extractor.
///
/// The accepted name-tag prefixes are data, not code: when the source
/// document drifts to a sibling template name (`flag`, `flagcountry`,
/// ...), extending the prefix set is the whole fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Marker string that starts each table row.
    pub row_marker: String,
    /// Template name whose presence identifies a real data row.
    pub entity_marker: String,
    /// Lowercase prefixes accepted for name-bearing templates.
    pub name_tag_prefixes: Vec<String>,
    /// Template name carrying the population figure.
    pub value_tag: String,
    /// Number of entities to extract.
    pub target: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            row_marker: "|-".to_string(),
            entity_marker: "flagicon".to_string(),
            name_tag_prefixes: vec!["flag".to_string()],
            value_tag: "n+p".to_string(),
            target: DEFAULT_TARGET,
        }
    }
}

impl ExtractorConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when any marker or tag is empty, the
    /// prefix set is empty, or the target is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_marker.is_empty() {
            return Err(ConfigError::EmptyRowMarker);
        }
        if self.entity_marker.is_empty() {
            return Err(ConfigError::EmptyEntityMarker);
        }
        if self.name_tag_prefixes.is_empty() {
            return Err(ConfigError::NoNameTagPrefixes);
        }
        for (index, prefix) in self.name_tag_prefixes.iter().enumerate() {
            if prefix.is_empty() {
                return Err(ConfigError::EmptyNameTagPrefix { index });
            }
        }
        if self.value_tag.is_empty() {
            return Err(ConfigError::EmptyValueTag);
        }
        if self.target == 0 {
            return Err(ConfigError::ZeroTarget);
        }
        Ok(())
    }
}

/// An extracted record: rank, normalized name, formatted population.
///
/// Rank is the 1-based position in the final extracted list; embedded row
/// numbers in the document are never consulted, so a skipped row leaves
/// no gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// 1-based rank in extraction order.
    pub rank: usize,
    /// Trimmed, lowercased display name.
    pub name: String,
    /// Population figure grouped with thousands separators, when the
    /// population pass captured one for this rank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
}

/// Result of one extraction run: two index-aligned ordered lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    names: Vec<String>,
    populations: Vec<String>,
    target: usize,
}

impl Extraction {
    /// Extracted names in rank order (lowercase).
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Extracted population figures in rank order, comma-grouped.
    #[must_use]
    pub fn populations(&self) -> &[String] {
        &self.populations
    }

    /// The target count this extraction aimed for.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Number of extracted names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns true if fewer names than the target were found.
    ///
    /// A short list is a structural warning, not an error.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.names.len() < self.target
    }

    /// How many entities short of the target this extraction fell.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.names.len())
    }

    /// Zips the two lists into ranked entities.
    ///
    /// When the population pass found fewer rows than the name pass, the
    /// tail entities carry no population rather than a misattributed one.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| Entity {
                rank: i + 1,
                name: name.clone(),
                population: self.populations.get(i).cloned(),
            })
            .collect()
    }
}

/// Extracts ranked entities from raw wikitext.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Creates an extractor from a validated configuration.
    ///
    /// Name-tag prefixes are lowercased so matching stays
    /// case-insensitive regardless of how the config was written.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration is invalid.
    pub fn new(mut config: ExtractorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        for prefix in &mut config.name_tag_prefixes {
            *prefix = prefix.to_ascii_lowercase();
        }
        Ok(Self { config })
    }

    /// Creates an extractor with the default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Runs both extraction passes over the document.
    ///
    /// The document's own row order is trusted to be rank order; rows are
    /// scanned until the target count is collected. Logs a warning when
    /// the document yields fewer rows than the target.
    #[must_use]
    pub fn extract(&self, document: &str) -> Extraction {
        let names = self.extract_names(document);
        let populations = self.extract_populations(document);

        if names.len() < self.config.target {
            warn!(
                found = names.len(),
                target = self.config.target,
                "document yielded fewer qualifying rows than the target"
            );
        }

        Extraction {
            names,
            populations,
            target: self.config.target,
        }
    }

    /// Name pass: the first positional argument of the first template in
    /// the accepted prefix family, trimmed and lowercased.
    fn extract_names(&self, document: &str) -> Vec<String> {
        let mut names = Vec::new();

        for row in self.qualifying_rows(document) {
            if names.len() >= self.config.target {
                break;
            }
            let Some(name) = self.row_name(row) else {
                // Marker present but no name-bearing template: skip the row
                continue;
            };
            names.push(name);
        }

        names
    }

    /// Population pass: the first all-digit argument of the value
    /// template, grouped for display.
    ///
    /// Runs over the same row split and the same qualifying predicate as
    /// the name pass, which is what guarantees index alignment.
    fn extract_populations(&self, document: &str) -> Vec<String> {
        let mut populations = Vec::new();

        for row in self.qualifying_rows(document) {
            if populations.len() >= self.config.target {
                break;
            }
            let Some(figure) = self.row_population(row) else {
                continue;
            };
            populations.push(figure);
        }

        populations
    }

    fn qualifying_rows<'a>(&'a self, document: &'a str) -> impl Iterator<Item = &'a str> {
        split_rows(document, &self.config.row_marker)
            .into_iter()
            .filter(|row| contains_template(row, &self.config.entity_marker))
    }

    fn row_name(&self, row: &str) -> Option<String> {
        scan_templates(row)
            .iter()
            .filter(|t| t.name_has_prefix(&self.config.name_tag_prefixes))
            .find_map(Template::first_positional)
            .map(|raw| raw.trim().to_lowercase())
            .filter(|name| !name.is_empty())
    }

    fn row_population(&self, row: &str) -> Option<String> {
        scan_templates(row)
            .iter()
            .filter(|t| t.is_named(&self.config.value_tag))
            .find_map(Template::first_numeric)
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(format_grouped)
    }
}

/// Formats an integer with comma thousands separators, e.g.
/// `1409670000` becomes `"1,409,670,000"`.
#[must_use]
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
