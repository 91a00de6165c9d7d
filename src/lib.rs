#![warn(missing_docs)]

//! Resolve noisy labels to their closest canonical candidate.
//!
//! `labelmatch` takes a user-supplied label (typos, stray whitespace, wrong
//! case, accents) and a set of known candidate labels, and returns either the
//! best-matching candidate with its similarity score or a typed error
//! explaining why resolution was rejected (no candidates, best score below
//! threshold, or top two candidates too close to call).

/// Text normalization pipeline and memoizing cache.
pub mod normalize;

/// Similarity ratio via recursive longest-common-block decomposition.
pub mod ratio;

/// Closest-match resolution with threshold and ambiguity policy.
pub mod resolver;

// Re-export primary public API types and functions at the crate root.
pub use normalize::{NormalizeOptions, Normalizer, normalize};
pub use ratio::ratio;
pub use resolver::{ResolveError, ResolveOptions, Resolved, Resolver};
