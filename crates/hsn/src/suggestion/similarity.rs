//! Text similarity measures used for ranking.
//!
//! Two measures are combined:
//!
//! - **Sequence ratio**: Ratcliff/Obershelp matching blocks over characters,
//!   `2·M / (|a| + |b|)` where `M` is the number of matched characters.
//! - **Keyword overlap**: share of query words that also appear in the
//!   description.

use std::collections::HashSet;

/// Lowercase, trim, and collapse internal whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct words of normalized text, stripped of surrounding punctuation.
pub fn words(normalized: &str) -> HashSet<String> {
    normalized
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ratcliff/Obershelp similarity of two strings in `[0, 1]`.
///
/// Two empty strings are identical (1.0).
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    sequence_ratio_chars(&a, &b)
}

/// [`sequence_ratio`] over pre-split characters.
pub fn sequence_ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(a, b) as f64 / total as f64
}

/// Fraction of `query` words present in `description` words.
pub fn keyword_overlap(query: &HashSet<String>, description: &HashSet<String>) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    let shared = query.iter().filter(|w| description.contains(*w)).count();
    shared as f64 / query.len() as f64
}

/// Total length of the matching blocks between `a` and `b`.
///
/// Finds the longest common block, then recurses on the pieces to its left
/// and right.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0;

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
///
/// Among equally long blocks the one starting earliest in `a`, then
/// earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    if alo >= ahi || blo >= bhi {
        return best;
    }

    // run[j + 1] = length of the common run ending at a[i], b[blo + j]
    let width = bhi - blo;
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            if a[i] == b[j] {
                let len = prev[col - 1] + 1;
                curr[col] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            } else {
                curr[col] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Live   HORSES\tfor breeding \n"), "live horses for breeding");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_words_strip_punctuation() {
        let w = words("live horses, asses (pure-bred)");
        assert!(w.contains("horses"));
        assert!(w.contains("asses"));
        assert!(w.contains("pure-bred"));
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn test_sequence_ratio_identical() {
        assert_eq!(sequence_ratio("live horses", "live horses"), 1.0);
        assert_eq!(sequence_ratio("", ""), 1.0);
    }

    #[test]
    fn test_sequence_ratio_disjoint() {
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
        assert_eq!(sequence_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_sequence_ratio_known_values() {
        // Matching blocks "ab" and "d": 2 * 3 / 8
        assert!(approx(sequence_ratio("abcd", "abxd"), 0.75));
        // Block "bcd"; the leftover "a" on each side never lines up.
        assert!(approx(sequence_ratio("abcd", "bcda"), 0.75));
    }

    #[test]
    fn test_sequence_ratio_is_bounded() {
        let r = sequence_ratio("live horses for breeding", "live bovine animals");
        assert!(r > 0.0 && r < 1.0);
    }

    #[test]
    fn test_keyword_overlap() {
        let query = words("live horses");
        let desc = words("live horses, asses, mules and hinnies");
        assert_eq!(keyword_overlap(&query, &desc), 1.0);

        let query = words("live chickens");
        assert_eq!(keyword_overlap(&query, &desc), 0.5);

        assert_eq!(keyword_overlap(&HashSet::new(), &desc), 0.0);
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        let a: Vec<char> = "xaby ab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(longest_match(&a, &b, 0, a.len(), 0, b.len()), (1, 0, 2));
    }
}
