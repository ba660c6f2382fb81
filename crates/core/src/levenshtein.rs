//! Two-row Levenshtein distance with caller-owned scratch storage.
//!
//! A [`LevenshteinScratch`] keeps an immutable initial row `1..=capacity` and a
//! working row. Each call copies the prefix it needs from the initial row, so
//! no call depends on what an earlier call left behind. One scratch must not be
//! shared between threads; give every worker its own.

#[derive(Debug, Clone)]
pub struct LevenshteinScratch {
    initial: Vec<usize>,
    row: Vec<usize>,
}

impl LevenshteinScratch {
    pub fn with_capacity(columns: usize) -> Self {
        let mut scratch = Self {
            initial: Vec::new(),
            row: Vec::new(),
        };
        scratch.ensure_columns(columns);
        scratch
    }

    /// Number of columns the initial row is primed for.
    pub fn capacity(&self) -> usize {
        self.initial.len()
    }

    /// Extends the initial row so strings of up to `columns` bytes can be
    /// used as the second operand.
    pub fn ensure_columns(&mut self, columns: usize) {
        let primed = self.initial.len();
        if columns <= primed {
            return;
        }
        self.initial.extend(primed + 1..=columns);
        self.row.resize(columns, 0);
    }

    /// Unit-cost edit distance between two non-empty byte strings.
    pub fn distance(&mut self, a: &[u8], b: &[u8]) -> usize {
        debug_assert!(!a.is_empty() && !b.is_empty());
        if a.is_empty() || b.is_empty() {
            return a.len().max(b.len());
        }

        self.ensure_columns(b.len());
        let row = &mut self.row[..b.len()];
        row.copy_from_slice(&self.initial[..b.len()]);

        for (row_idx, &ca) in a.iter().enumerate() {
            // The left column holds 0..=a.len() implicitly.
            let mut top_left = row_idx;
            let mut left = row_idx + 1;
            for (cell, &cb) in row.iter_mut().zip(b) {
                let top = *cell;
                let mut current = top.min(left);
                if top_left <= current {
                    current = top_left + usize::from(ca != cb);
                } else {
                    current += 1;
                }
                *cell = current;
                left = current;
                top_left = top;
            }
        }

        row[b.len() - 1]
    }
}

/// Convenience wrapper that allocates a fresh scratch for a single call.
pub fn levenshtein_distance(a: &[u8], b: &[u8]) -> usize {
    LevenshteinScratch::with_capacity(b.len()).distance(a, b)
}
