use std::fmt::Write as _;

use sim_check_core::{CheckStats, SimilarityReport};

pub(crate) fn is_incomplete(stats: &CheckStats) -> bool {
    stats.rejected_files() > 0 || stats.skipped_walk_errors > 0 || stats.failed_pairs > 0
}

pub(crate) fn format_check_stats(stats: &CheckStats) -> String {
    let mut out = String::new();
    out.push_str("== check stats ==\n");
    out.push_str(&format!(
        "candidates={} cleansed={} bytes={} pairs={} failed_pairs={}\n",
        stats.candidate_files,
        stats.cleansed_files,
        stats.read_bytes,
        stats.scored_pairs,
        stats.failed_pairs
    ));

    let mut skips: Vec<(&str, u64)> = vec![
        ("not_found", stats.skipped_not_found),
        ("permission_denied", stats.skipped_permission_denied),
        ("too_large", stats.skipped_too_large),
        ("binary", stats.skipped_binary),
        ("read_errors", stats.skipped_read_errors),
        ("walk_errors", stats.skipped_walk_errors),
        ("empty", stats.skipped_empty),
        ("line_too_long", stats.skipped_line_too_long),
        ("line_index_overflow", stats.skipped_line_index_overflow),
        ("budget_max_files", stats.skipped_budget_max_files),
    ];
    skips.retain(|(_, v)| *v > 0);
    if !skips.is_empty() {
        out.push_str("skipped:\n");
        for (k, v) in skips {
            out.push_str(&format!("- {k}={v}\n"));
        }
    }
    out.push('\n');
    out
}

/// One `<idA> <idB> <score>` line per pair. Failed pairs print `inf`.
pub(crate) fn format_pairs(report: &SimilarityReport) -> String {
    let mut out = String::new();
    for pair in &report.pairs {
        let _ = writeln!(out, "{} {} {:.6}", pair.a, pair.b, pair.score);
    }
    out
}

#[cfg(test)]
mod tests {
    use sim_check_core::PairScore;

    use super::*;

    #[test]
    fn pairs_print_ids_and_six_decimals() {
        let report = SimilarityReport {
            files: Vec::new(),
            rejected: Vec::new(),
            pairs: vec![
                PairScore {
                    a: 0,
                    b: 1,
                    score: 1.0,
                },
                PairScore {
                    a: 0,
                    b: 3,
                    score: 0.625,
                },
                PairScore {
                    a: 1,
                    b: 3,
                    score: f64::INFINITY,
                },
            ],
        };
        assert_eq!(
            format_pairs(&report),
            "0 1 1.000000\n0 3 0.625000\n1 3 inf\n"
        );
    }

    #[test]
    fn stats_list_only_nonzero_skips() {
        let stats = CheckStats {
            candidate_files: 3,
            cleansed_files: 2,
            skipped_line_too_long: 1,
            scored_pairs: 1,
            ..CheckStats::default()
        };
        let text = format_check_stats(&stats);
        assert!(text.contains("candidates=3 cleansed=2"));
        assert!(text.contains("- line_too_long=1\n"));
        assert!(!text.contains("binary"));
        assert!(is_incomplete(&stats));
        assert!(!is_incomplete(&CheckStats::default()));
    }
}
