use std::path::PathBuf;

use clap::{ArgAction, Parser};
use sim_check_core::{CheckOptions, DEFAULT_MAX_FILE_SIZE_BYTES, Language};
use tracing::level_filters::LevelFilter;

/// Pairwise source-code similarity checker.
///
/// Every input file is cleansed with its language profile and compared with
/// every other input. Each pair is printed as `<idA> <idB> <score>`, where ids
/// are positions in the expanded input list and the score runs from 0 (no
/// shared structure) to 1 (identical after cleansing).
#[derive(Debug, Parser)]
#[command(name = "sim-check", version)]
pub(crate) struct Args {
    /// Files or directories to compare. Directories are searched recursively.
    #[arg(value_name = "PATH", required = true)]
    pub(crate) paths: Vec<PathBuf>,

    /// Cleansing profile: auto, c, java, fsharp or unknown.
    #[arg(long, value_name = "LANG", default_value = "auto", value_parser = parse_language)]
    pub(crate) language: LanguageArg,

    /// Lines of slack allowed when matching lines between two files.
    #[arg(long, value_name = "N", default_value_t = sim_check_core::DEFAULT_WINDOW_RADIUS)]
    pub(crate) window_radius: usize,

    /// Files with a longer line after cleansing are left out.
    #[arg(long, value_name = "N", default_value_t = sim_check_core::DEFAULT_MAX_LINE_LENGTH)]
    pub(crate) max_line_length: usize,

    /// Skip files larger than N bytes.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_FILE_SIZE_BYTES)]
    pub(crate) max_file_size: u64,

    /// Compare at most N files; later inputs are skipped.
    #[arg(long, value_name = "N")]
    pub(crate) max_files: Option<usize>,

    /// Do not respect .gitignore rules when expanding directories.
    #[arg(long)]
    pub(crate) no_gitignore: bool,

    /// Follow symlinks when expanding directories.
    #[arg(long)]
    pub(crate) follow_symlinks: bool,

    /// Include dotfiles and dot-directories when expanding directories.
    #[arg(long)]
    pub(crate) hidden: bool,

    /// Add an ignored directory name (repeatable).
    #[arg(long, value_name = "NAME")]
    pub(crate) ignore_dir: Vec<String>,

    /// Worker threads (default: one per CPU).
    #[arg(long, value_name = "N")]
    pub(crate) threads: Option<usize>,

    /// Output JSON.
    #[arg(long)]
    pub(crate) json: bool,

    /// Include run stats (JSON) or print them to stderr.
    #[arg(long)]
    pub(crate) stats: bool,

    /// Exit non-zero if any file was skipped or any pair failed.
    #[arg(long)]
    pub(crate) strict: bool,

    /// More log output on stderr (repeatable).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub(crate) verbose: u8,

    /// No log output.
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LanguageArg(pub(crate) Option<Language>);

fn parse_language(raw: &str) -> Result<LanguageArg, String> {
    if raw.trim().eq_ignore_ascii_case("auto") {
        return Ok(LanguageArg(None));
    }
    Language::from_name(raw)
        .map(|lang| LanguageArg(Some(lang)))
        .ok_or_else(|| format!("unknown language {raw:?} (expected auto, c, java, fsharp or unknown)"))
}

impl Args {
    pub(crate) fn check_options(&self) -> CheckOptions {
        let mut options = CheckOptions {
            max_file_size: Some(self.max_file_size),
            max_files: self.max_files,
            max_line_length: self.max_line_length,
            window_radius: self.window_radius,
            language: self.language.0,
            respect_gitignore: !self.no_gitignore,
            follow_symlinks: self.follow_symlinks,
            include_hidden: self.hidden,
            ..CheckOptions::default()
        };
        options
            .ignore_dirs
            .extend(self.ignore_dir.iter().cloned());
        options
    }

    pub(crate) fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::OFF;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
