//! Closest-match resolution with threshold and ambiguity policy.
//!
//! [`Resolver`] scans a candidate set in order, scores every candidate
//! against the expected label via [`ratio`], and applies a two-part
//! acceptance policy: the best score must clear a threshold, and it must be
//! separated from the runner-up by an ambiguity delta. Failures surface as
//! the typed [`ResolveError`] variants so callers can branch on kind.

use thiserror::Error;
use tracing::{debug, trace};

use crate::normalize::{NormalizeOptions, Normalizer};
use crate::ratio::ratio;

/// Tuning knobs for one resolution call.
///
/// # Defaults
///
/// - `threshold`: `0.72` — minimum acceptable best score
/// - `ambiguity_delta`: `0.05` — minimum gap between the top two scores
/// - `normalize`: `true` — canonicalize both sides before scoring
///
/// # Examples
///
/// ```
/// use labelmatch::ResolveOptions;
///
/// let opts = ResolveOptions::default();
/// assert_eq!(opts.threshold, 0.72);
/// assert_eq!(opts.ambiguity_delta, 0.05);
/// assert!(opts.normalize);
///
/// // Stricter threshold, everything else default
/// let opts = ResolveOptions { threshold: 0.9, ..Default::default() };
/// assert_eq!(opts.threshold, 0.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveOptions {
    /// Minimum score the best candidate must reach.
    pub threshold: f64,
    /// Minimum required gap between the best and second-best scores.
    pub ambiguity_delta: f64,
    /// Normalize both sides (default [`NormalizeOptions`]) before scoring.
    pub normalize: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.72,
            ambiguity_delta: 0.05,
            normalize: true,
        }
    }
}

/// A confidently resolved candidate.
///
/// `candidate` is the exact raw text as supplied by the caller, not its
/// normalized form.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The winning candidate, verbatim from the input sequence.
    pub candidate: String,
    /// Its similarity score against the expected label, in `[0, 1]`.
    pub score: f64,
}

/// Why a resolution was rejected.
///
/// All variants are request-scoped and non-retryable: the resolver never
/// recovers internally, it surfaces a fully populated error to the caller on
/// every occurrence. Diagnostic scores are carried as structured fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The candidate sequence had zero elements.
    #[error("candidate set is empty")]
    EmptyCandidateSet,

    /// The best score found did not clear the configured threshold.
    #[error("no reliable match: best={candidate:?} score={score:.3} threshold={threshold}")]
    NoReliableMatch {
        /// Best-scoring candidate, verbatim.
        candidate: String,
        /// Its score.
        score: f64,
        /// The threshold it failed to reach.
        threshold: f64,
    },

    /// The top two candidates are too close to distinguish confidently.
    #[error(
        "ambiguous match: best={candidate:?} score={score:.3} second={second_score:.3} delta={ambiguity_delta}"
    )]
    AmbiguousMatch {
        /// Best-scoring candidate, verbatim.
        candidate: String,
        /// The best score.
        score: f64,
        /// The runner-up score.
        second_score: f64,
        /// The minimum gap that was required between them.
        ambiguity_delta: f64,
    },
}

/// Resolves a noisy label to the best-matching candidate.
///
/// Owns the normalization cache, created at construction and living for the
/// resolver's lifetime; sharing one `Resolver` across calls (or threads)
/// amortizes normalization of recurring labels.
///
/// # Examples
///
/// ```
/// use labelmatch::{ResolveOptions, Resolver};
///
/// let resolver = Resolver::new();
/// let candidates = ["publier", "en_test", "closes", "supprimer"];
/// let resolved = resolver
///     .resolve_closest_match("Supprim", &candidates, ResolveOptions::default())
///     .unwrap();
/// assert_eq!(resolved.candidate, "supprimer");
/// assert_eq!(resolved.score, 0.875);
/// ```
#[derive(Debug, Default)]
pub struct Resolver {
    normalizer: Normalizer,
}

impl Resolver {
    /// Create a `Resolver` with a fresh normalization cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the resolver's normalizer (and its cache) directly.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Resolve `expected` to its closest candidate, or explain why not.
    ///
    /// Scans `candidates` in the order supplied, scoring each against
    /// `expected` with [`ratio`] (both sides canonicalized first when
    /// `options.normalize` is set). The first candidate attaining the
    /// maximum score wins ties; a later equal score only updates the
    /// runner-up. The policy is evaluated once, after the scan:
    ///
    /// 1. best score below `options.threshold` → [`ResolveError::NoReliableMatch`]
    /// 2. best and runner-up closer than `options.ambiguity_delta` →
    ///    [`ResolveError::AmbiguousMatch`] (a lone candidate has no
    ///    runner-up and never trips this)
    /// 3. otherwise → [`Resolved`]
    ///
    /// # Arguments
    ///
    /// * `expected` - The noisy label to resolve
    /// * `candidates` - Canonical candidate labels, in caller-significant order
    /// * `options` - Threshold, ambiguity delta, and normalization toggle
    ///
    /// # Errors
    ///
    /// [`ResolveError::EmptyCandidateSet`] when `candidates` is empty, plus
    /// the two policy rejections above.
    ///
    /// # Examples
    ///
    /// ```
    /// use labelmatch::{ResolveError, ResolveOptions, Resolver};
    ///
    /// let resolver = Resolver::new();
    /// let err = resolver
    ///     .resolve_closest_match("qqq", &["abc", "xyz"], ResolveOptions::default())
    ///     .unwrap_err();
    /// assert!(matches!(err, ResolveError::NoReliableMatch { .. }));
    /// ```
    pub fn resolve_closest_match<S: AsRef<str>>(
        &self,
        expected: &str,
        candidates: &[S],
        options: ResolveOptions,
    ) -> Result<Resolved, ResolveError> {
        if candidates.is_empty() {
            return Err(ResolveError::EmptyCandidateSet);
        }

        let norm_opts = NormalizeOptions::default();
        let expected_cmp = if options.normalize {
            self.normalizer.normalize(expected, &norm_opts)
        } else {
            expected.to_owned()
        };

        let mut best_candidate = "";
        let mut best_score = -1.0_f64;
        let mut second_score = -1.0_f64;

        for candidate in candidates {
            let candidate = candidate.as_ref();
            let candidate_cmp = if options.normalize {
                self.normalizer.normalize(candidate, &norm_opts)
            } else {
                candidate.to_owned()
            };
            let score = ratio(&candidate_cmp, &expected_cmp);
            trace!(expected, candidate, score, "scored candidate");

            if score > best_score {
                second_score = best_score;
                best_score = score;
                best_candidate = candidate;
            } else if score > second_score {
                second_score = score;
            }
        }

        if best_score < options.threshold {
            debug!(
                expected,
                best = best_candidate,
                score = best_score,
                threshold = options.threshold,
                "no reliable match"
            );
            return Err(ResolveError::NoReliableMatch {
                candidate: best_candidate.to_owned(),
                score: best_score,
                threshold: options.threshold,
            });
        }

        if (best_score - second_score) < options.ambiguity_delta {
            debug!(
                expected,
                best = best_candidate,
                score = best_score,
                second = second_score,
                "ambiguous match"
            );
            return Err(ResolveError::AmbiguousMatch {
                candidate: best_candidate.to_owned(),
                score: best_score,
                second_score,
                ambiguity_delta: options.ambiguity_delta,
            });
        }

        debug!(
            expected,
            best = best_candidate,
            score = best_score,
            "resolved"
        );
        Ok(Resolved {
            candidate: best_candidate.to_owned(),
            score: best_score,
        })
    }
}
