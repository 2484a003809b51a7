//! Immutable snapshot of one extraction run, and the cache state the
//! boundary layer serves from.
//!
//! A [`Snapshot`] is built once at startup (or on an explicit refresh) and
//! never mutated; query handling only ever reads it. [`CacheState`] is the
//! explicit replacement for an ambient mutable global: either a populated
//! snapshot, or a structured unavailability reason the boundary layer can
//! report to its own clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extract::Extraction;

/// An immutable, index-aligned view of extracted names and populations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    names: Vec<String>,
    populations: Vec<String>,
    target: usize,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Creates a snapshot from raw lists.
    #[must_use]
    pub fn new(names: Vec<String>, populations: Vec<String>, target: usize) -> Self {
        Self {
            names,
            populations,
            target,
            fetched_at: Utc::now(),
        }
    }

    /// Creates a snapshot from an extraction run, consuming it.
    #[must_use]
    pub fn from_extraction(extraction: Extraction) -> Self {
        let target = extraction.target();
        Self::new(
            extraction.names().to_vec(),
            extraction.populations().to_vec(),
            target,
        )
    }

    /// Creates an empty snapshot for the given target.
    #[must_use]
    pub fn empty(target: usize) -> Self {
        Self::new(Vec::new(), Vec::new(), target)
    }

    /// Cached names in rank order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Cached population figures in rank order.
    #[must_use]
    pub fn populations(&self) -> &[String] {
        &self.populations
    }

    /// The target count the extraction aimed for.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// When this snapshot was built.
    #[must_use]
    pub const fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Number of cached names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the snapshot holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 1-based rank of an exact name, first occurrence.
    #[must_use]
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name).map(|i| i + 1)
    }

    /// Population figure at a 1-based rank, when captured.
    #[must_use]
    pub fn population_at(&self, rank: usize) -> Option<&str> {
        if rank == 0 {
            return None;
        }
        self.populations.get(rank - 1).map(String::as_str)
    }
}

/// Cache state consumed by the boundary layer.
///
/// Fetch failure is fatal for the cache-population attempt but not for
/// the process: the process serves with an `Unavailable` state instead of
/// crashing, and every query is answered as a defined data-unavailable
/// condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CacheState {
    /// A populated snapshot ready to serve queries.
    Ready(Snapshot),

    /// No snapshot; carries the reason population failed.
    Unavailable {
        /// Human-readable failure reason, for logs and error bodies.
        reason: String,
    },
}

impl CacheState {
    /// Wraps a populated snapshot.
    #[must_use]
    pub const fn ready(snapshot: Snapshot) -> Self {
        Self::Ready(snapshot)
    }

    /// Creates an unavailable state with a reason.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Builds the state from a fetch-and-parse outcome.
    #[must_use]
    pub fn from_result<E: std::fmt::Display>(result: Result<Snapshot, E>) -> Self {
        match result {
            Ok(snapshot) => Self::Ready(snapshot),
            Err(e) => Self::unavailable(e.to_string()),
        }
    }

    /// The snapshot, when ready.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            Self::Unavailable { .. } => None,
        }
    }

    /// Returns true if a snapshot is ready.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The unavailability reason, when there is one.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}
