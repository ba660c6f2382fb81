//! Windowed line matching between two cleansed files.
//!
//! Each line of the shorter file is matched against nearby lines of the longer
//! one. A pair whose accumulation overflows scores [`FAILED_SCORE`].

use crate::file::CleansedFile;
use crate::levenshtein::LevenshteinScratch;
use crate::safe_int::checked_add_size;

/// Score reported for a pair whose accumulation overflowed.
pub const FAILED_SCORE: f64 = f64::INFINITY;

pub fn is_failed_score(score: f64) -> bool {
    score >= FAILED_SCORE
}

/// Window of candidate line indices for line `index` of the shorter file.
pub fn candidate_window(index: usize, radius: usize, longer_lines: usize) -> std::ops::Range<usize> {
    let start = index.saturating_sub(radius);
    let end = index
        .saturating_add(radius)
        .saturating_add(1)
        .min(longer_lines);
    start..end
}

/// Line-windowed similarity of two cleansed files, in `[0, 1]`, or
/// [`FAILED_SCORE`].
///
/// Every line of the file with fewer lines is matched against the candidate in
/// the other file's window that minimises `distance / max(len)`. The result is
/// `1 - sum(distance) / sum(max(len))` over the chosen matches. On equal line
/// counts `a` is the shorter side.
pub fn windowed_similarity(
    a: &CleansedFile,
    b: &CleansedFile,
    radius: usize,
    scratch: &mut LevenshteinScratch,
) -> f64 {
    let (shorter, longer) = if a.num_lines() > b.num_lines() {
        (b, a)
    } else {
        (a, b)
    };
    debug_assert!(shorter.num_lines() > 0);

    let mut total_distance = 0usize;
    let mut total_length = 0usize;
    for line_idx in 0..shorter.num_lines() {
        let line = shorter.line(line_idx);

        let mut best_score = f64::MAX;
        let mut best_distance = usize::MAX;
        let mut best_length = 1usize;
        for candidate_idx in candidate_window(line_idx, radius, longer.num_lines()) {
            let candidate = longer.line(candidate_idx);
            let distance = scratch.distance(line, candidate);
            let length = line.len().max(candidate.len());
            let score = if distance == 0 {
                0.0
            } else {
                distance as f64 / length as f64
            };
            if score < best_score {
                best_score = score;
                best_distance = distance;
                best_length = length;
            }
        }
        debug_assert!(best_distance != usize::MAX);

        let Some(length) = checked_add_size(total_length, best_length) else {
            return FAILED_SCORE;
        };
        total_length = length;
        // A distance never exceeds its match length, so this stays below
        // total_length.
        total_distance += best_distance;
    }

    1.0 - (total_distance as f64 / total_length as f64)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::profile::Language;

    fn file(raw: &str) -> CleansedFile {
        CleansedFile::new(raw.as_bytes().to_vec(), Language::Unknown, 512)
            .expect("no allocation failure")
            .expect("valid file")
    }

    fn score(a: &str, b: &str, radius: usize) -> f64 {
        let mut scratch = LevenshteinScratch::with_capacity(512);
        windowed_similarity(&file(a), &file(b), radius, &mut scratch)
    }

    #[test]
    fn window_is_clamped_to_longer_file() {
        assert_eq!(candidate_window(0, 3, 10), 0..4);
        assert_eq!(candidate_window(5, 3, 10), 2..9);
        assert_eq!(candidate_window(9, 3, 10), 6..10);
        assert_eq!(candidate_window(2, 0, 10), 2..3);
        assert_eq!(candidate_window(usize::MAX, usize::MAX, 4), 0..4);
    }

    #[test]
    fn identical_ten_line_files_score_one() {
        let text: String = (0..10).map(|i| format!("line{i}=value{i}\n")).collect();
        assert_eq!(score(&text, &text, 3), 1.0);
    }

    #[test]
    fn reordered_lines_within_window_score_one() {
        assert_eq!(score("a\nb\nc\nd", "b\na\nd\nc", 1), 1.0);
    }

    #[test]
    fn reordered_lines_outside_window_lower_score() {
        let a = "first\nx1\nx2\nx3\nlast";
        let b = "last\nx1\nx2\nx3\nfirst";
        assert!(score(a, b, 1) < 1.0);
        assert_eq!(score(a, b, 4), 1.0);
    }

    #[test]
    fn completely_different_lines_score_zero() {
        assert_eq!(score("aaaa\nbbbb", "cccc\ndddd", 3), 0.0);
    }

    #[test]
    fn accumulates_raw_distance_over_match_length() {
        // House/Mouse: 1 of 5.
        assert!((score("House", "Mouse", 3) - 0.8).abs() < 1e-12);
        // Test/Toast (2 of 5) and abc/abd (1 of 3): 1 - 3/8.
        assert!((score("Test\nabc", "Toast\nabd", 0) - 0.625).abs() < 1e-12);
    }

    #[test]
    fn shorter_file_drives_matching_in_both_orders() {
        let short = "alpha\nbeta";
        let long = "alpha\nbeta\ngamma\ndelta";
        assert_eq!(score(short, long, 3), 1.0);
        assert_eq!(score(long, short, 3), 1.0);
    }

    #[test]
    fn failed_score_is_recognised() {
        assert!(is_failed_score(FAILED_SCORE));
        assert!(!is_failed_score(1.0));
    }

    proptest! {
        #[test]
        fn score_is_in_unit_range(
            a in "[a-c\n]{1,80}",
            b in "[a-c\n]{1,80}",
            radius in 0usize..5,
        ) {
            prop_assume!(a.bytes().any(|c| c != b'\n'));
            prop_assume!(b.bytes().any(|c| c != b'\n'));
            let s = score(&a, &b, radius);
            prop_assert!((0.0..=1.0).contains(&s) || is_failed_score(s));
        }
    }
}
