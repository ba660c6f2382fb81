use std::mem;

use crate::safe_int::checked_mul_size;

/// One line of a cleansed buffer, as an offset/length view into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub len: usize,
}

impl LineSpan {
    pub fn slice<'a>(&self, text: &'a [u8]) -> &'a [u8] {
        &text[self.start..self.start + self.len]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    spans: Vec<LineSpan>,
    max_line_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineIndexError {
    Overflow,
    Allocation,
}

impl LineIndex {
    /// Splits `text` at every `\n`. A buffer without terminator is one line.
    ///
    /// `text` must be non-empty and shorter than `usize::MAX`, which keeps the
    /// line counter from wrapping.
    pub(crate) fn build(text: &[u8]) -> Result<Self, LineIndexError> {
        debug_assert!(!text.is_empty());
        debug_assert!(text.len() < usize::MAX);

        let num_lines = 1 + text.iter().filter(|&&b| b == b'\n').count();
        checked_mul_size(num_lines, mem::size_of::<LineSpan>())
            .ok_or(LineIndexError::Overflow)?;

        let mut spans = Vec::new();
        spans
            .try_reserve_exact(num_lines)
            .map_err(|_| LineIndexError::Allocation)?;

        let mut max_line_len = 0usize;
        let mut start = 0usize;
        for (pos, &b) in text.iter().enumerate() {
            if b == b'\n' {
                let len = pos - start;
                max_line_len = max_line_len.max(len);
                spans.push(LineSpan { start, len });
                start = pos + 1;
            }
        }
        let len = text.len() - start;
        max_line_len = max_line_len.max(len);
        spans.push(LineSpan { start, len });

        debug_assert_eq!(spans.len(), num_lines);
        Ok(Self {
            spans,
            max_line_len,
        })
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }

    pub fn get(&self, index: usize) -> Option<LineSpan> {
        self.spans.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(text: &[u8]) -> Vec<&[u8]> {
        let index = LineIndex::build(text).expect("index");
        index.spans().iter().map(|s| s.slice(text)).collect()
    }

    #[test]
    fn single_line_without_terminator() {
        let index = LineIndex::build(b"abc").expect("index");
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(0), Some(LineSpan { start: 0, len: 3 }));
        assert_eq!(index.max_line_len(), 3);
    }

    #[test]
    fn splits_on_newlines_and_tracks_longest() {
        let text = b"a\nbcdef\ngh";
        assert_eq!(lines_of(text), vec![&b"a"[..], b"bcdef", b"gh"]);
        assert_eq!(LineIndex::build(text).expect("index").max_line_len(), 5);
    }

    #[test]
    fn last_line_wins_max_length() {
        let index = LineIndex::build(b"ab\nabcd").expect("index");
        assert_eq!(index.max_line_len(), 4);
    }

    #[test]
    fn trailing_terminator_yields_empty_last_line() {
        // Cleansing never produces this; the indexer still stays consistent.
        let index = LineIndex::build(b"ab\n").expect("index");
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(1), Some(LineSpan { start: 3, len: 0 }));
    }
}
