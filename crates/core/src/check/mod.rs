use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{CheckError, CheckResult, RejectReason};
use crate::file::CleansedFile;
use crate::input::{expand_inputs, read_source, screen_bytes};
use crate::pairs::{pair_slot, score_all_pairs};
use crate::profile::Language;
use crate::score::is_failed_score;
use crate::types::{
    CheckOptions, CheckOutcome, CheckStats, InputFile, PairScore, RejectedFile, SimilarityReport,
    SourceFile,
};


type Loaded = (InputFile, u64, Result<CleansedFile, RejectReason>);

enum Payload {
    Disk,
    Memory(Vec<u8>),
}

/// Compares every pair of files found under `paths`.
///
/// Directories are expanded recursively; other paths are read as files.
/// Unreadable or unusable files are reported in
/// [`SimilarityReport::rejected`] and do not stop the run.
pub fn check_paths(paths: &[PathBuf], options: &CheckOptions) -> CheckResult<CheckOutcome> {
    options.validate()?;

    let mut stats = CheckStats::default();
    let inputs = expand_inputs(paths, options, &mut stats);
    let pending = inputs
        .into_iter()
        .map(|input| (input, Payload::Disk))
        .collect();
    run_check(pending, options, stats)
}

/// Compares every pair of in-memory sources. Ids follow the order of
/// `sources`.
pub fn check_sources(sources: Vec<SourceFile>, options: &CheckOptions) -> CheckResult<CheckOutcome> {
    options.validate()?;

    let stats = CheckStats {
        candidate_files: sources.len() as u64,
        ..CheckStats::default()
    };
    let pending = sources
        .into_iter()
        .enumerate()
        .map(|(id, source)| {
            let language = options
                .language
                .unwrap_or_else(|| Language::from_path(&source.path));
            let input = InputFile {
                id,
                path: source.path,
                language,
            };
            (input, Payload::Memory(source.bytes))
        })
        .collect();
    run_check(pending, options, stats)
}

fn run_check(
    mut pending: Vec<(InputFile, Payload)>,
    options: &CheckOptions,
    mut stats: CheckStats,
) -> CheckResult<CheckOutcome> {
    let mut rejected: Vec<RejectedFile> = Vec::new();

    let max_files = options.effective_max_files();
    if pending.len() > max_files {
        let dropped = pending.split_off(max_files);
        warn!(
            max_files,
            dropped = dropped.len(),
            "too many input files; comparing only the first {max_files}"
        );
        for (input, _) in dropped {
            let reason = RejectReason::FileLimit { max: max_files };
            stats.record_rejection(&reason);
            rejected.push(RejectedFile {
                id: input.id,
                path: input.path,
                reason,
            });
        }
    }

    let max_line_length = options.max_line_length;
    let loaded: Vec<Loaded> = pending
        .into_par_iter()
        .map(|(input, payload)| -> CheckResult<Loaded> {
            let raw = match payload {
                Payload::Disk => read_source(&input.path, options),
                Payload::Memory(bytes) => screen_bytes(&bytes, options).map(|()| bytes),
            };
            let raw = match raw {
                Ok(raw) => raw,
                Err(reason) => return Ok((input, 0, Err(reason))),
            };
            let raw_len = raw.len();
            let cleansed = CleansedFile::new(raw, input.language, max_line_length)?;
            if let Ok(file) = &cleansed {
                debug!(
                    path = %input.path.display(),
                    language = %input.language,
                    raw_len,
                    cleansed_len = file.text().len(),
                    lines = file.num_lines(),
                    longest_line = file.lines().max_line_len(),
                    "cleansed"
                );
            }
            Ok((input, raw_len as u64, cleansed))
        })
        .collect::<CheckResult<Vec<_>>>()?;

    let mut files: Vec<InputFile> = Vec::with_capacity(loaded.len());
    let mut cleansed: Vec<CleansedFile> = Vec::with_capacity(loaded.len());
    for (input, raw_len, result) in loaded {
        stats.read_bytes = stats.read_bytes.saturating_add(raw_len);
        match result {
            Ok(file) => {
                stats.cleansed_files = stats.cleansed_files.saturating_add(1);
                files.push(input);
                cleansed.push(file);
            }
            Err(reason) => {
                warn!(path = %input.path.display(), %reason, "skipping file");
                stats.record_rejection(&reason);
                rejected.push(RejectedFile {
                    id: input.id,
                    path: input.path,
                    reason,
                });
            }
        }
    }
    rejected.sort_by_key(|r| r.id);

    let table = score_all_pairs(&cleansed, options.window_radius, max_line_length)?;

    let m = files.len();
    let mut pairs: Vec<PairScore> = Vec::with_capacity(table.len());
    for (i, a) in files.iter().enumerate() {
        for (j, b) in files.iter().enumerate().skip(i + 1) {
            let score = pair_slot(i, j, m)
                .and_then(|slot| table.get(slot).copied())
                .ok_or(CheckError::PairTableOverflow { files: m })?;
            if is_failed_score(score) {
                warn!(
                    a = %a.path.display(),
                    b = %b.path.display(),
                    "similarity overflowed; reporting pair as failed"
                );
                stats.failed_pairs = stats.failed_pairs.saturating_add(1);
            }
            stats.scored_pairs = stats.scored_pairs.saturating_add(1);
            pairs.push(PairScore {
                a: a.id,
                b: b.id,
                score,
            });
        }
    }
    debug_assert_eq!(pairs.len(), table.len());

    info!(
        files = files.len(),
        rejected = rejected.len(),
        pairs = pairs.len(),
        failed_pairs = stats.failed_pairs,
        "similarity check finished"
    );

    Ok(CheckOutcome {
        report: SimilarityReport {
            files,
            rejected,
            pairs,
        },
        stats,
    })
}
