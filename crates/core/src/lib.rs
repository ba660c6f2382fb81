mod check;
pub mod cleanse;
mod error;
mod file;
mod input;
pub mod levenshtein;
pub mod lines;
pub mod pairs;
mod profile;
pub mod safe_int;
pub mod score;
mod types;

pub use check::{check_paths, check_sources};

pub use error::{CheckError, CheckResult, RejectReason};

pub use file::CleansedFile;

pub use profile::{BlockComment, CleanseProfile, GeneraliseRule, Language};

pub use types::{
    CheckOptions, CheckOutcome, CheckStats, DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_MAX_LINE_LENGTH,
    DEFAULT_WINDOW_RADIUS, InputFile, PairScore, RejectedFile, SimilarityReport, SourceFile,
    default_ignore_dirs,
};
