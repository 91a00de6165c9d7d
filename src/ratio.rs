//! Similarity ratio via recursive longest-common-block decomposition.
//!
//! Two strings are compared by repeatedly carving out their longest common
//! contiguous substring: the match contributes its length, then the prefixes
//! and suffixes on either side of it are compared recursively. The final
//! score is `2 * matched / (len(a) + len(b))`, a symmetric value in `[0, 1]`
//! where `1.0` means identical strings and `0.0` means no shared content.

/// Longest contiguous block common to `a` and `b`.
///
/// Returns `(start_a, start_b, len)`. Among all longest blocks, ties break
/// to the earliest start in `a`, then the earliest start in `b`; both fall
/// out of the ascending scan order combined with strictly-greater
/// replacement. `len` is 0 when the strings share no character.
///
/// Classic O(len(a) * len(b)) dynamic program over Unicode scalar values:
/// `row[j + 1]` holds the length of the common suffix of `a[..=i]` and
/// `b[..=j]`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            if curr[j + 1] > best.2 {
                let len = curr[j + 1];
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Total matched length between `a` and `b`.
///
/// Carves out the longest common block, then recurses independently on the
/// prefix pair and the suffix pair around it. Blocks never overlap and never
/// cross, so the sum is well-defined.
fn matched_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (start_a, start_b, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_len(&a[..start_a], &b[..start_b])
        + matched_len(&a[start_a + len..], &b[start_b + len..])
}

/// Similarity ratio between two strings, in `[0, 1]`.
///
/// Computed as `2 * M / (len(a) + len(b))` where `M` is the total matched
/// length from recursive longest-common-block decomposition and lengths are
/// counted in Unicode scalar values. Two empty strings are identical
/// (`1.0`); if exactly one is empty the ratio is `0.0`.
///
/// The result is symmetric: `ratio(a, b) == ratio(b, a)`.
///
/// Inputs are compared as-is; callers wanting case- or accent-insensitive
/// scores normalize first (see [`normalize`](crate::normalize())).
///
/// # Arguments
///
/// * `a` - First string
/// * `b` - Second string
///
/// # Examples
///
/// ```
/// use labelmatch::ratio;
///
/// assert_eq!(ratio("supprimer", "supprimer"), 1.0);
/// // "supprim" is a 7-char block common to both: 2*7 / (9+7)
/// assert_eq!(ratio("supprimer", "supprim"), 0.875);
/// assert_eq!(ratio("abc", "xyz"), 0.0);
/// assert_eq!(ratio("", ""), 1.0);
/// ```
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let matched = matched_len(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- longest_common_block tests ---

    #[test]
    fn block_finds_longest_run() {
        let a: Vec<char> = "xxsupprimyy".chars().collect();
        let b: Vec<char> = "supprimer".chars().collect();
        assert_eq!(longest_common_block(&a, &b), (2, 0, 7));
    }

    #[test]
    fn block_no_common_character() {
        let a: Vec<char> = "abc".chars().collect();
        let b: Vec<char> = "xyz".chars().collect();
        assert_eq!(longest_common_block(&a, &b), (0, 0, 0));
    }

    #[test]
    fn block_tie_breaks_earliest_in_a_then_b() {
        // Two longest blocks of length 2: "ab" at a[0] and "cd" at a[3].
        // Earliest start in `a` wins.
        let a: Vec<char> = "ab-cd".chars().collect();
        let b: Vec<char> = "cd-ab".chars().collect();
        assert_eq!(longest_common_block(&a, &b), (0, 3, 2));

        // Same block text occurs twice in `b`: earliest start in `b` wins.
        let a: Vec<char> = "ab".chars().collect();
        let b: Vec<char> = "ab-ab".chars().collect();
        assert_eq!(longest_common_block(&a, &b), (0, 0, 2));
    }

    #[test]
    fn block_empty_inputs() {
        let empty: Vec<char> = Vec::new();
        let a: Vec<char> = "abc".chars().collect();
        assert_eq!(longest_common_block(&empty, &a), (0, 0, 0));
        assert_eq!(longest_common_block(&a, &empty), (0, 0, 0));
    }

    // --- ratio identity and empty-string contract ---

    #[test]
    fn identical_strings_score_one() {
        for s in ["a", "supprimer", "hello world", "caf\u{00E9}", "x y z"] {
            assert_eq!(ratio(s, s), 1.0, "ratio({s:?}, {s:?})");
        }
    }

    #[test]
    fn both_empty_is_one() {
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn one_empty_is_zero() {
        assert_eq!(ratio("", "b"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    // --- symmetry ---

    #[test]
    fn symmetric_in_arguments() {
        let pairs = [
            ("supprim", "supprimer"),
            ("tes", "test"),
            ("abcd", "bcda"),
            ("hello world", "world hello"),
            ("qqq", "abc"),
        ];
        for (a, b) in pairs {
            assert_eq!(ratio(a, b), ratio(b, a), "ratio not symmetric for ({a:?}, {b:?})");
        }
    }

    // --- known values ---

    #[test]
    fn supprim_vs_supprimer() {
        // Matched block "supprim" (7 chars): 2*7 / (7+9) = 0.875.
        assert_eq!(ratio("supprim", "supprimer"), 0.875);
    }

    #[test]
    fn tes_vs_test_and_tests() {
        // "tes" (3) in "test" (4): 2*3/7.
        assert!((ratio("tes", "test") - 6.0 / 7.0).abs() < 1e-12);
        // "tes" (3) in "tests" (5): 2*3/8.
        assert_eq!(ratio("tes", "tests"), 0.75);
    }

    #[test]
    fn recursion_sums_prefix_and_suffix_matches() {
        // Longest block "bcde" (4); prefix pair "a"/"x" contributes 0.
        // M = 4, ratio = 2*4 / 10.
        assert_eq!(ratio("abcde", "xbcde"), 0.8);

        // Longest block " world" (6 incl. space); prefix pair "hello"/"big"
        // shares nothing. M = 6, lengths 11 + 9.
        assert_eq!(ratio("hello world", "big world"), 0.6);

        // Prefix contributes too: longest block "ssd" (3) plus the "a"
        // shared by the prefix pair "a"/"ax". M = 4, ratio = 2*4 / (4+5).
        assert!((ratio("assd", "axssd") - 8.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_alphabets_score_zero() {
        assert_eq!(ratio("qqq", "abc"), 0.0);
        assert_eq!(ratio("qqq", "xyz"), 0.0);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // "\u{00E9}" is 2 bytes but 1 char; identical single-char strings
        // must score exactly 1.0.
        assert_eq!(ratio("\u{00E9}", "\u{00E9}"), 1.0);
        // One char of two matches: 2*1 / (2+2) when counted in chars.
        assert_eq!(ratio("\u{00E9}a", "\u{00E9}b"), 0.5);
    }

    #[test]
    fn result_always_in_unit_interval() {
        let cases = [
            ("supprim", "supprimer"),
            ("publier", "supprim"),
            ("en_test", "supprim"),
            ("a", "aaaaaaaaaa"),
            ("mississippi", "missouri"),
        ];
        for (a, b) in cases {
            let r = ratio(a, b);
            assert!((0.0..=1.0).contains(&r), "ratio({a:?}, {b:?}) = {r} out of range");
        }
    }

    #[test]
    fn repeated_characters() {
        // Longest block "aa"; then prefix/suffix recursion picks up the rest
        // one block at a time. "aaa" vs "aa": M = 2, ratio = 4/5.
        assert_eq!(ratio("aaa", "aa"), 0.8);
    }
}
