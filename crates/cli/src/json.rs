use std::io;
use std::path::Path;

use serde::Serialize;
use sim_check_core::{CheckStats, SimilarityReport};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonCheckStats {
    pub(crate) candidate_files: u64,
    pub(crate) cleansed_files: u64,
    pub(crate) read_bytes: u64,
    pub(crate) skipped_not_found: u64,
    pub(crate) skipped_permission_denied: u64,
    pub(crate) skipped_too_large: u64,
    pub(crate) skipped_binary: u64,
    pub(crate) skipped_read_errors: u64,
    pub(crate) skipped_walk_errors: u64,
    pub(crate) skipped_empty: u64,
    pub(crate) skipped_line_too_long: u64,
    pub(crate) skipped_line_index_overflow: u64,
    pub(crate) skipped_budget_max_files: u64,
    pub(crate) scored_pairs: u64,
    pub(crate) failed_pairs: u64,
}

impl From<CheckStats> for JsonCheckStats {
    fn from(stats: CheckStats) -> Self {
        Self {
            candidate_files: stats.candidate_files,
            cleansed_files: stats.cleansed_files,
            read_bytes: stats.read_bytes,
            skipped_not_found: stats.skipped_not_found,
            skipped_permission_denied: stats.skipped_permission_denied,
            skipped_too_large: stats.skipped_too_large,
            skipped_binary: stats.skipped_binary,
            skipped_read_errors: stats.skipped_read_errors,
            skipped_walk_errors: stats.skipped_walk_errors,
            skipped_empty: stats.skipped_empty,
            skipped_line_too_long: stats.skipped_line_too_long,
            skipped_line_index_overflow: stats.skipped_line_index_overflow,
            skipped_budget_max_files: stats.skipped_budget_max_files,
            scored_pairs: stats.scored_pairs,
            failed_pairs: stats.failed_pairs,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonInputFile {
    pub(crate) id: usize,
    pub(crate) path: String,
    pub(crate) language: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonRejectedFile {
    pub(crate) id: usize,
    pub(crate) path: String,
    pub(crate) reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonPairScore {
    pub(crate) a: usize,
    pub(crate) b: usize,
    /// `None` when the pair could not be scored.
    pub(crate) score: Option<f64>,
    pub(crate) failed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonSimilarityReport {
    pub(crate) files: Vec<JsonInputFile>,
    pub(crate) rejected: Vec<JsonRejectedFile>,
    pub(crate) pairs: Vec<JsonPairScore>,
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

pub(crate) fn map_report(report: SimilarityReport) -> JsonSimilarityReport {
    JsonSimilarityReport {
        files: report
            .files
            .into_iter()
            .map(|f| JsonInputFile {
                id: f.id,
                path: display_path(&f.path),
                language: f.language.as_str(),
            })
            .collect(),
        rejected: report
            .rejected
            .into_iter()
            .map(|r| JsonRejectedFile {
                id: r.id,
                path: display_path(&r.path),
                reason: r.reason.to_string(),
            })
            .collect(),
        pairs: report
            .pairs
            .into_iter()
            .map(|p| {
                let failed = p.is_failed();
                JsonPairScore {
                    a: p.a,
                    b: p.b,
                    score: (!failed).then_some(p.score),
                    failed,
                }
            })
            .collect(),
    }
}

pub(crate) fn write_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::other(format!("json encode: {e}")))?;
    println!("{json}");
    Ok(())
}
