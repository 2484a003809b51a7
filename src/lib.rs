//! # popquiz - ranked-population quiz backend
//!
//! popquiz answers one question: *is this guess among the N most populous
//! countries?* It parses the ranked table out of a raw wikitext document
//! into an ordered list of (name, population) pairs, caches that list as
//! an immutable snapshot, and resolves free-text guesses against it with
//! alias-aware normalization.
//!
//! ## Core Concepts
//!
//! - **Extractor**: splits the document into row fragments and pulls a
//!   name and a population figure out of each qualifying row
//! - **Snapshot**: the immutable, index-aligned result of one extraction,
//!   built once at startup
//! - **AliasTable**: alternate spellings mapped to canonical names
//! - **Matcher**: normalizes a guess, applies one alias pass, and looks it
//!   up for an exact rank
//!
//! ## Usage
//!
//! ```rust
//! use popquiz::{Extractor, Matcher, Snapshot};
//!
//! let document = "|-\n| {{flagicon|China}} || {{n+p|1409670000|est}}\n";
//!
//! let extraction = Extractor::with_defaults().extract(document);
//! let snapshot = Snapshot::from_extraction(extraction);
//!
//! let result = Matcher::with_builtin_aliases().check("  PRC ", &snapshot);
//! assert!(result.correct);
//! assert_eq!(result.rank, Some(1));
//! assert_eq!(result.population.as_deref(), Some("1,409,670,000"));
//! ```
//!
//! Document fetching (`fetch` feature) and the HTTP boundary
//! (`transport-http` feature) are optional collaborators around this core;
//! the `server` feature combines both into the `popquiz-server` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Parsing and matching core
pub mod alias;
pub mod error;
pub mod extract;
pub mod guess;
pub mod snapshot;
pub mod wikitext;

// Boundary collaborators
#[cfg(feature = "fetch")]
pub mod fetch;
#[cfg(feature = "transport-http")]
pub mod transport;

// Re-export primary types at crate root for convenience
pub use alias::AliasTable;
pub use error::{ConfigError, FetchError, QuizError, QuizResult};
pub use extract::{Entity, Extraction, Extractor, ExtractorConfig, DEFAULT_TARGET};
pub use guess::{normalize, GuessResult, Matcher};
pub use snapshot::{CacheState, Snapshot};

#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, WikiClient};
