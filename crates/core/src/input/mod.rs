use std::fs;
use std::path::PathBuf;

use crate::profile::Language;
use crate::types::{CheckOptions, CheckStats, InputFile};

mod read;
mod walker;


pub(crate) use read::{read_source, screen_bytes};

/// Expands `paths` into the ordered input list.
///
/// Directories are replaced by their files in sorted order; anything else is
/// taken as given and judged when it is read. Ids are positions in the
/// resulting list.
pub(crate) fn expand_inputs(
    paths: &[PathBuf],
    options: &CheckOptions,
    stats: &mut CheckStats,
) -> Vec<InputFile> {
    let mut expanded: Vec<PathBuf> = Vec::new();
    for path in paths {
        let is_dir = fs::metadata(path).is_ok_and(|meta| meta.is_dir());
        if is_dir {
            expanded.extend(walker::walk_dir(path, options, stats));
        } else {
            expanded.push(path.clone());
        }
    }

    stats.candidate_files = stats
        .candidate_files
        .saturating_add(expanded.len() as u64);

    expanded
        .into_iter()
        .enumerate()
        .map(|(id, path)| {
            let language = options
                .language
                .unwrap_or_else(|| Language::from_path(&path));
            InputFile { id, path, language }
        })
        .collect()
}
