//! Weighted string similarity on a 0-100 scale.
//!
//! [`weighted_ratio`] blends a plain Indel (insert/delete) ratio with partial
//! (best-window) and token-order-insensitive ratios, scaling the alternative
//! scores down so a plain near-identical match always wins. It is case
//! sensitive; callers fold case themselves when they need to.

use std::collections::BTreeSet;

/// Below this length ratio both strings are compared whole.
const WHOLE_COMPARE_MAX_LEN_RATIO: f64 = 1.5;
/// Above this length ratio partial matches are heavily discounted.
const PARTIAL_DISCOUNT_LEN_RATIO: f64 = 8.0;
const TOKEN_SCALE: f64 = 0.95;

/// Length of the longest common subsequence, one DP row at a time.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Normalised Indel similarity, 0-100: `2 * lcs / (len_a + len_b)`.
/// Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// Best [`ratio`] of the shorter string against every equally long window
/// of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    if long_chars.len() == short_len {
        return ratio(short, long);
    }

    let mut best = 0.0f64;
    for window in long_chars.windows(short_len) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(short, &candidate));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// [`ratio`] after sorting whitespace separated tokens.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Compares the shared tokens against each side's full token set, so extra
/// words on one side don't dilute a complete overlap.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let sect: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !sect.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let sect_joined = sect.join(" ");
    let with_a = join_nonempty(&sect_joined, &only_a.join(" "));
    let with_b = join_nonempty(&sect_joined, &only_b.join(" "));

    let mut best = ratio(&with_a, &with_b);
    if !sect_joined.is_empty() {
        best = best
            .max(ratio(&sect_joined, &with_a))
            .max(ratio(&sect_joined, &with_b));
    }
    best
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

/// Weighted similarity of two strings, 0-100. Empty input scores 0.
///
/// The token-partial step always runs the window search; it has no early
/// 100 for strings sharing a whole token.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let base = ratio(a, b);
    if len_ratio < WHOLE_COMPARE_MAX_LEN_RATIO {
        return base
            .max(token_sort_ratio(a, b) * TOKEN_SCALE)
            .max(token_set_ratio(a, b) * TOKEN_SCALE);
    }

    let partial_scale = if len_ratio < PARTIAL_DISCOUNT_LEN_RATIO {
        0.9
    } else {
        0.6
    };
    let partial = partial_ratio(a, b) * partial_scale;
    let token_partial =
        partial_ratio(&sorted_tokens(a), &sorted_tokens(b)) * TOKEN_SCALE * partial_scale;
    base.max(partial).max(token_partial)
}
