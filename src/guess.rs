//! Guess matching against a cached snapshot.
//!
//! Matching is a pure, stateless transformation: normalize the raw guess,
//! apply one alias substitution pass, and test exact membership against
//! the snapshot's name list. No fuzzy or partial matching, and no errors —
//! every input string maps to a deterministic result. Rejecting empty
//! guesses is the transport boundary's job, not this module's.

use serde::{Deserialize, Serialize};

use crate::alias::AliasTable;
use crate::snapshot::Snapshot;

/// Normalizes a raw guess: trim surrounding whitespace, lowercase.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Outcome of checking one guess. Constructed fresh per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    /// Whether the guess is in the ranked list.
    pub correct: bool,

    /// 1-based rank when correct, absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,

    /// The resolved lowercase string used for the lookup.
    pub normalized: String,

    /// Population figure at the matched rank, when correct and captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
}

/// Resolves free-text guesses against a snapshot.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    aliases: AliasTable,
}

impl Matcher {
    /// Creates a matcher with the given alias table.
    #[must_use]
    pub const fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// Creates a matcher with the built-in alias table.
    #[must_use]
    pub fn with_builtin_aliases() -> Self {
        Self::new(AliasTable::builtin())
    }

    /// The alias table in use.
    #[must_use]
    pub const fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Checks a raw guess against the snapshot.
    #[must_use]
    pub fn check(&self, guess: &str, snapshot: &Snapshot) -> GuessResult {
        let cleaned = normalize(guess);
        let normalized = self.aliases.resolve(&cleaned).to_string();

        match snapshot.rank_of(&normalized) {
            Some(rank) => GuessResult {
                correct: true,
                rank: Some(rank),
                population: snapshot.population_at(rank).map(str::to_string),
                normalized,
            },
            None => GuessResult {
                correct: false,
                rank: None,
                population: None,
                normalized,
            },
        }
    }
}
