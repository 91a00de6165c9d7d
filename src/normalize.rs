//! Text normalization pipeline and memoizing cache.
//!
//! Noisy UI labels arrive with stray whitespace, mixed case, and accents.
//! [`normalize`] canonicalizes a label through a fixed four-stage pipeline
//! controlled by [`NormalizeOptions`]; [`Normalizer`] wraps the same pipeline
//! with a per-instance memoization cache keyed on the raw input and the
//! option set.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Independent boolean toggles for the normalization pipeline.
///
/// Stages apply in a fixed order when enabled: strip, lowercase, collapse
/// whitespace runs, remove accents. All toggles default to `true`.
///
/// The struct is `Copy + Eq + Hash` so that, together with the raw input
/// string, it can serve as a memoization cache key.
///
/// # Examples
///
/// ```
/// use labelmatch::NormalizeOptions;
///
/// // Default: every stage enabled
/// let opts = NormalizeOptions::default();
/// assert!(opts.strip && opts.to_lower && opts.collapse_spaces && opts.remove_accents);
///
/// // Keep accents, normalize everything else
/// let opts = NormalizeOptions { remove_accents: false, ..Default::default() };
/// assert!(!opts.remove_accents);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizeOptions {
    /// Strip leading and trailing whitespace.
    pub strip: bool,
    /// Lowercase codepoint-wise (locale-independent).
    pub to_lower: bool,
    /// Collapse every maximal run of whitespace (spaces, tabs, newlines)
    /// into a single space.
    pub collapse_spaces: bool,
    /// Remove diacritics: NFD-decompose, then drop combining marks.
    pub remove_accents: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strip: true,
            to_lower: true,
            collapse_spaces: true,
            remove_accents: true,
        }
    }
}

/// Lowercase `s`, returning the input unchanged when it contains no
/// uppercase characters (the common case for already-canonical labels).
fn lowercase(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_uppercase) {
        Cow::Owned(s.to_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

/// Collapse each maximal whitespace run into a single space.
///
/// Returns [`Cow::Borrowed`] when the string contains no run to collapse,
/// i.e. every whitespace character is already a lone `' '`.
fn collapse_whitespace(s: &str) -> Cow<'_, str> {
    let mut needs_work = false;
    let mut prev_ws = false;
    for c in s.chars() {
        let ws = c.is_whitespace();
        if ws && (c != ' ' || prev_ws) {
            needs_work = true;
            break;
        }
        prev_ws = ws;
    }
    if !needs_work {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    Cow::Owned(out)
}

/// Strip diacritics via NFD decomposition.
///
/// Applies canonical decomposition and removes combining marks
/// (`General_Category = Mark`), so precomposed characters like U+00E9
/// (e-acute) reduce to their base letter. Returns [`Cow::Borrowed`] when
/// nothing is removed.
fn strip_diacritics(s: &str) -> Cow<'_, str> {
    // Fast path: ASCII strings never contain combining marks.
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }

    let stripped: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();

    if stripped == s {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(stripped)
    }
}

/// Canonicalize `text` for matching.
///
/// Deterministic and pure: the result is a function of `text` and `options`
/// alone. Pipeline stages apply in this fixed order when enabled:
///
/// 1. strip leading/trailing whitespace
/// 2. lowercase (codepoint-wise)
/// 3. collapse whitespace runs to a single space
/// 4. remove diacritics (NFD decomposition, drop combining marks)
///
/// # Arguments
///
/// * `text` - The raw label text
/// * `options` - Which pipeline stages to apply
///
/// # Examples
///
/// ```
/// use labelmatch::{normalize, NormalizeOptions};
///
/// let opts = NormalizeOptions::default();
/// assert_eq!(normalize("  Caf\u{00e9}  cr\u{00e8}me\n", &opts), "cafe creme");
///
/// // Stages can be disabled independently
/// let opts = NormalizeOptions { to_lower: false, ..Default::default() };
/// assert_eq!(normalize(" Cafe ", &opts), "Cafe");
/// ```
pub fn normalize(text: &str, options: &NormalizeOptions) -> String {
    let stripped = if options.strip { text.trim() } else { text };

    let lowered = if options.to_lower {
        lowercase(stripped)
    } else {
        Cow::Borrowed(stripped)
    };

    let collapsed = if options.collapse_spaces {
        collapse_whitespace(&lowered)
    } else {
        Cow::Borrowed(lowered.as_ref())
    };

    let unaccented = if options.remove_accents {
        strip_diacritics(&collapsed)
    } else {
        Cow::Borrowed(collapsed.as_ref())
    };

    unaccented.into_owned()
}

/// Key for one memoized normalization: the raw input plus the option set.
type CacheKey = (String, NormalizeOptions);

/// Memoizing wrapper around [`normalize`].
///
/// Owns an explicit normalization cache created at construction time and
/// living for the instance's lifetime. The pipeline is referentially
/// transparent, so a cache hit is always correct; entries are never evicted
/// (unbounded growth is an accepted trade-off for short-lived processes).
///
/// A `Normalizer` may be shared across threads. Cache misses compute outside
/// the lock and insert if still absent, so a concurrent race costs at most a
/// redundant recomputation, never an incorrect result.
///
/// # Examples
///
/// ```
/// use labelmatch::{Normalizer, NormalizeOptions};
///
/// let normalizer = Normalizer::new();
/// let opts = NormalizeOptions::default();
/// assert_eq!(normalizer.normalize("  Supprim\u{00e9}  ", &opts), "supprime");
/// // Second call with the identical (text, options) pair is served from cache.
/// assert_eq!(normalizer.normalize("  Supprim\u{00e9}  ", &opts), "supprime");
/// ```
#[derive(Debug, Default)]
pub struct Normalizer {
    cache: RwLock<HashMap<CacheKey, String>>,
}

impl Normalizer {
    /// Create a `Normalizer` with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize `text`, memoizing the result.
    ///
    /// The first call for a given (text, options) pair runs the pipeline and
    /// stores the result; subsequent identical calls return the cached value
    /// without recomputation.
    pub fn normalize(&self, text: &str, options: &NormalizeOptions) -> String {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            // The map key is an owned (String, options) tuple, so the lookup
            // needs one too.
            if let Some(hit) = cache.get(&(text.to_owned(), *options)) {
                return hit.clone();
            }
        }

        let computed = normalize(text, options);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry((text.to_owned(), *options))
            .or_insert(computed)
            .clone()
    }

    /// Canonicalize optional text; absent input normalizes to the empty string.
    pub fn normalize_opt(&self, text: Option<&str>, options: &NormalizeOptions) -> String {
        match text {
            Some(text) => self.normalize(text, options),
            None => String::new(),
        }
    }

    /// Number of memoized entries. Exposed for tests and diagnostics.
    pub fn cached_entries(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
