//! Per-language cleansing profiles.
//!
//! Profiles are static data. A [`Language`] tag selects exactly one of them;
//! [`Language::Unknown`] maps to a profile that only normalises whitespace.

use std::fmt;
use std::path::Path;

/// A group of variant tokens that are all rewritten to one canonical token.
///
/// Every variant must be non-empty and at least as long as `canonical`, so the
/// rewrite can happen in place without moving surrounding bytes.
#[derive(Debug)]
pub struct GeneraliseRule {
    pub canonical: &'static str,
    pub variants: &'static [&'static str],
}

#[derive(Debug)]
pub struct BlockComment {
    pub start: &'static str,
    pub end: &'static str,
}

#[derive(Debug)]
pub struct CleanseProfile {
    pub extensions: &'static [&'static str],
    pub block_comment: Option<BlockComment>,
    /// Prefixes that blank the remainder of their line.
    pub line_drop_prefixes: &'static [&'static str],
    /// Characters treated as line terminators in addition to `\r` and `\n`.
    pub newline_chars: &'static [u8],
    /// Checked in order; the first rule with a matching variant wins.
    pub generalise: &'static [GeneraliseRule],
}

impl CleanseProfile {
    /// Returns `(canonical, variant_len)` for the first variant that prefixes `rest`.
    pub(crate) fn match_generalisation(&self, rest: &[u8]) -> Option<(&'static [u8], usize)> {
        self.generalise.iter().find_map(|rule| {
            rule.variants
                .iter()
                .find(|variant| rest.starts_with(variant.as_bytes()))
                .map(|variant| (rule.canonical.as_bytes(), variant.len()))
        })
    }

    pub(crate) fn is_newline_char(&self, b: u8) -> bool {
        self.newline_chars.contains(&b)
    }

    /// Checks the in-place rewrite precondition of every generalisation rule.
    pub fn is_well_formed(&self) -> bool {
        self.generalise.iter().all(|rule| {
            rule.variants
                .iter()
                .all(|v| !v.is_empty() && v.len() >= rule.canonical.len())
        }) && self.line_drop_prefixes.iter().all(|p| !p.is_empty())
            && self
                .block_comment
                .as_ref()
                .is_none_or(|c| !c.start.is_empty() && !c.end.is_empty())
    }
}

const C_NEWLINE_CHARS: &[u8] = b";{}?:";

static C_PROFILE: CleanseProfile = CleanseProfile {
    extensions: &["c", "cpp", "h", "hpp"],
    block_comment: Some(BlockComment {
        start: "/*",
        end: "*/",
    }),
    // `#i` covers include/if/ifdef, `#e` covers elif/else/endif. Token pasting
    // that happens to start with these is dropped too.
    line_drop_prefixes: &["//", "#i", "#e"],
    newline_chars: C_NEWLINE_CHARS,
    generalise: &[
        GeneraliseRule {
            canonical: "",
            variants: &[
                "static", "const", "volatile", "restrict", "unsigned", "signed",
            ],
        },
        // Floating point shares the integer bucket; `long long` and
        // `long double` fall out of `long` and `double`.
        GeneraliseRule {
            canonical: "int",
            variants: &[
                "char",
                "short",
                "long",
                "uint64_t",
                "int64_t",
                "uint32_t",
                "int32_t",
                "uint16_t",
                "int16_t",
                "uint8_t",
                "int8_t",
                "size_t",
                "uintptr_t",
                "float",
                "double",
            ],
        },
    ],
};

static JAVA_PROFILE: CleanseProfile = CleanseProfile {
    extensions: &["java"],
    block_comment: Some(BlockComment {
        start: "/*",
        end: "*/",
    }),
    line_drop_prefixes: &["//"],
    newline_chars: C_NEWLINE_CHARS,
    generalise: &[
        GeneraliseRule {
            canonical: "",
            variants: &[
                "static",
                "final",
                "volatile",
                "synchronized",
                "public",
                "protected",
                "private",
            ],
        },
        GeneraliseRule {
            canonical: "int",
            variants: &["byte", "short", "long", "float", "double"],
        },
    ],
};

static FSHARP_PROFILE: CleanseProfile = CleanseProfile {
    extensions: &["fs", "fsi", "fsx", "fsscript"],
    block_comment: Some(BlockComment {
        start: "(*",
        end: "*)",
    }),
    line_drop_prefixes: &["//"],
    newline_chars: &[],
    generalise: &[
        GeneraliseRule {
            canonical: "",
            variants: &["override", "public", "internal", "private"],
        },
        GeneraliseRule {
            canonical: "int",
            variants: &[
                "sbyte",
                "byte",
                "uint16",
                "int16",
                "uint32",
                "int64",
                "uint64",
                "unativeint",
                "nativeint",
                "decimal",
                "float32",
                "float",
                "single",
                "double",
            ],
        },
    ],
};

static UNKNOWN_PROFILE: CleanseProfile = CleanseProfile {
    extensions: &[],
    block_comment: None,
    line_drop_prefixes: &[],
    newline_chars: &[],
    generalise: &[],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    C,
    Java,
    FSharp,
    Unknown,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::C, Language::Java, Language::FSharp, Language::Unknown];

    pub fn profile(self) -> &'static CleanseProfile {
        match self {
            Language::C => &C_PROFILE,
            Language::Java => &JAVA_PROFILE,
            Language::FSharp => &FSHARP_PROFILE,
            Language::Unknown => &UNKNOWN_PROFILE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Java => "java",
            Language::FSharp => "fsharp",
            Language::Unknown => "unknown",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "c" | "cpp" | "c++" => Some(Language::C),
            "java" => Some(Language::Java),
            "fsharp" | "f#" | "fs" => Some(Language::FSharp),
            "unknown" | "text" => Some(Language::Unknown),
            _ => None,
        }
    }

    /// Matches the text after the last `.` of the file name against each
    /// profile's extensions. Matching is exact and case-sensitive.
    pub fn from_path(path: &Path) -> Self {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Language::Unknown;
        };
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Language::Unknown;
        };
        Self::ALL
            .into_iter()
            .find(|lang| lang.profile().extensions.contains(&ext))
            .unwrap_or(Language::Unknown)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
