use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::types::{CheckOptions, CheckStats};

/// Lists the regular files below `root`, sorted by path. Dotfiles and
/// dot-directories are skipped unless `include_hidden` is set.
pub(crate) fn walk_dir(
    root: &Path,
    options: &CheckOptions,
    stats: &mut CheckStats,
) -> Vec<PathBuf> {
    let ignore_dirs = options.ignore_dirs.clone();
    let follow_symlinks = options.follow_symlinks;
    let respect_gitignore = options.respect_gitignore;
    let is_git_repo = root.join(".git").exists();

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(!options.include_hidden)
        .follow_links(follow_symlinks)
        .ignore(false)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore && is_git_repo)
        .git_exclude(respect_gitignore && is_git_repo)
        .parents(false)
        .require_git(false);

    let walker = builder
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            if !follow_symlinks && entry.path_is_symlink() {
                return false;
            }

            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            if !is_dir {
                return true;
            }

            match entry.file_name().to_str() {
                Some(name) => !ignore_dirs_contains(&ignore_dirs, name),
                None => true,
            }
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                if let Some(io_err) = err.io_error() {
                    match io_err.kind() {
                        io::ErrorKind::NotFound => {
                            stats.skipped_not_found = stats.skipped_not_found.saturating_add(1);
                            continue;
                        }
                        io::ErrorKind::PermissionDenied => {
                            stats.skipped_permission_denied =
                                stats.skipped_permission_denied.saturating_add(1);
                            continue;
                        }
                        _ => {}
                    }
                }
                debug!(root = %root.display(), error = %err, "walk error");
                stats.skipped_walk_errors = stats.skipped_walk_errors.saturating_add(1);
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }
        files.push(entry.into_path());
    }

    files.sort();
    files
}

fn ignore_dirs_contains(ignore_dirs: &HashSet<String>, name: &str) -> bool {
    if ignore_dirs.contains(name) {
        return true;
    }
    #[cfg(windows)]
    {
        ignore_dirs.iter().any(|d| d.eq_ignore_ascii_case(name))
    }
    #[cfg(not(windows))]
    {
        false
    }
}
