use crate::cleanse::cleanse;
use crate::error::{CheckError, RejectReason};
use crate::lines::{LineIndex, LineIndexError};
use crate::profile::Language;

/// A cleansed source file together with its line index.
///
/// Read-only once built; pairs compare against it concurrently.
#[derive(Debug, Clone)]
pub struct CleansedFile {
    text: Vec<u8>,
    lines: LineIndex,
    language: Language,
}

impl CleansedFile {
    /// Cleanses `raw` with the profile of `language` and indexes its lines.
    ///
    /// Empty results and lines longer than `max_line_length` reject the file.
    /// Running out of memory while indexing is reported as a run failure.
    pub fn new(
        mut raw: Vec<u8>,
        language: Language,
        max_line_length: usize,
    ) -> Result<Result<Self, RejectReason>, CheckError> {
        cleanse(&mut raw, language.profile());
        if raw.is_empty() {
            return Ok(Err(RejectReason::EmptyAfterCleansing));
        }
        raw.shrink_to_fit();

        let lines = match LineIndex::build(&raw) {
            Ok(lines) => lines,
            Err(LineIndexError::Overflow) => return Ok(Err(RejectReason::LineIndexOverflow)),
            Err(LineIndexError::Allocation) => {
                return Err(CheckError::Allocation { what: "line index" });
            }
        };
        debug_assert!(lines.spans().iter().all(|span| span.len > 0));

        if lines.max_line_len() > max_line_length {
            return Ok(Err(RejectReason::LineTooLong {
                length: lines.max_line_len(),
                max: max_line_length,
            }));
        }

        Ok(Ok(Self {
            text: raw,
            lines,
            language,
        }))
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn line(&self, index: usize) -> &[u8] {
        self.lines.spans()[index].slice(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(raw: &str, language: Language, max: usize) -> Result<CleansedFile, RejectReason> {
        CleansedFile::new(raw.as_bytes().to_vec(), language, max).expect("no allocation failure")
    }

    #[test]
    fn indexes_cleansed_lines() {
        let file = build("int a;\n\nint b;\n", Language::C, 512).expect("file");
        assert_eq!(file.text(), b"inta\nintb");
        assert_eq!(file.num_lines(), 2);
        assert_eq!(file.line(1), b"intb");
        assert_eq!(file.lines().max_line_len(), 4);
    }

    #[test]
    fn rejects_empty_result() {
        let err = build("  /* only */  ", Language::Java, 512).expect_err("empty");
        assert_eq!(err, RejectReason::EmptyAfterCleansing);
    }

    #[test]
    fn rejects_overlong_lines() {
        let err = build("abcdefgh\nab", Language::Unknown, 4).expect_err("too long");
        assert_eq!(err, RejectReason::LineTooLong { length: 8, max: 4 });
    }

    #[test]
    fn accepts_line_at_limit() {
        let file = build("abcd", Language::Unknown, 4).expect("file");
        assert_eq!(file.lines().max_line_len(), 4);
    }
}
