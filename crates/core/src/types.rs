use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{CheckError, CheckResult, RejectReason};
use crate::profile::Language;
use crate::safe_int::max_file_count;
use crate::score::is_failed_score;

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub ignore_dirs: HashSet<String>,
    pub max_file_size: Option<u64>,
    pub max_files: Option<usize>,
    pub max_line_length: usize,
    pub window_radius: usize,
    pub language: Option<Language>,
    pub respect_gitignore: bool,
    pub follow_symlinks: bool,
    /// Walk into dotfiles and dot-directories when expanding directories.
    pub include_hidden: bool,
    pub skip_binary: bool,
}

pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 512;
pub const DEFAULT_WINDOW_RADIUS: usize = 3;

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            ignore_dirs: default_ignore_dirs(),
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE_BYTES),
            max_files: None,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            window_radius: DEFAULT_WINDOW_RADIUS,
            language: None,
            respect_gitignore: true,
            follow_symlinks: false,
            include_hidden: false,
            skip_binary: true,
        }
    }
}

impl CheckOptions {
    pub fn validate(&self) -> CheckResult<()> {
        if self.max_line_length == 0 {
            return Err(CheckError::InvalidOptions(
                "max_line_length must be at least 1".to_string(),
            ));
        }
        if self.window_radius > usize::MAX / 2 {
            return Err(CheckError::InvalidOptions(format!(
                "window_radius must be at most {}",
                usize::MAX / 2
            )));
        }
        if self.max_file_size == Some(0) {
            return Err(CheckError::InvalidOptions(
                "max_file_size must be at least 1 byte".to_string(),
            ));
        }
        Ok(())
    }

    /// File budget after applying the platform limit.
    pub fn effective_max_files(&self) -> usize {
        self.max_files
            .map_or(max_file_count(), |max| max.min(max_file_count()))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckStats {
    pub candidate_files: u64,
    pub cleansed_files: u64,
    pub read_bytes: u64,
    pub skipped_not_found: u64,
    pub skipped_permission_denied: u64,
    pub skipped_too_large: u64,
    pub skipped_binary: u64,
    pub skipped_read_errors: u64,
    pub skipped_walk_errors: u64,
    pub skipped_empty: u64,
    pub skipped_line_too_long: u64,
    pub skipped_line_index_overflow: u64,
    pub skipped_budget_max_files: u64,
    pub scored_pairs: u64,
    pub failed_pairs: u64,
}

impl CheckStats {
    pub(crate) fn record_rejection(&mut self, reason: &RejectReason) {
        let counter = match reason {
            RejectReason::NotFound => &mut self.skipped_not_found,
            RejectReason::PermissionDenied => &mut self.skipped_permission_denied,
            RejectReason::Unreadable(_) => &mut self.skipped_read_errors,
            RejectReason::TooLarge { .. } => &mut self.skipped_too_large,
            RejectReason::Binary => &mut self.skipped_binary,
            RejectReason::EmptyAfterCleansing => &mut self.skipped_empty,
            RejectReason::LineTooLong { .. } => &mut self.skipped_line_too_long,
            RejectReason::LineIndexOverflow => &mut self.skipped_line_index_overflow,
            RejectReason::FileLimit { .. } => &mut self.skipped_budget_max_files,
        };
        *counter = counter.saturating_add(1);
    }

    /// Inputs left out of the comparison set for any reason.
    pub fn rejected_files(&self) -> u64 {
        [
            self.skipped_not_found,
            self.skipped_permission_denied,
            self.skipped_too_large,
            self.skipped_binary,
            self.skipped_read_errors,
            self.skipped_empty,
            self.skipped_line_too_long,
            self.skipped_line_index_overflow,
            self.skipped_budget_max_files,
        ]
        .into_iter()
        .fold(0u64, u64::saturating_add)
    }
}

pub fn default_ignore_dirs() -> HashSet<String> {
    [
        ".git",
        ".hg",
        ".svn",
        "node_modules",
        "target",
        "dist",
        "build",
        "out",
        ".cache",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// In-memory input for [`crate::check_sources`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// One expanded input. `id` is its position in the expanded input list and
/// stays the same whether or not the file survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub id: usize,
    pub path: PathBuf,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    pub id: usize,
    pub path: PathBuf,
    pub reason: RejectReason,
}

/// Similarity of the inputs with ids `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub a: usize,
    pub b: usize,
    pub score: f64,
}

impl PairScore {
    pub fn is_failed(&self) -> bool {
        is_failed_score(self.score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityReport {
    /// Files that took part in the comparison, in id order.
    pub files: Vec<InputFile>,
    pub rejected: Vec<RejectedFile>,
    /// `C(files.len(), 2)` entries, ascending by `a` then `b`.
    pub pairs: Vec<PairScore>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub report: SimilarityReport,
    pub stats: CheckStats,
}
