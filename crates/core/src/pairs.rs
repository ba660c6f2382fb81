//! All-pairs scoring over a flat, triangular result table.
//!
//! Pair `(i, j)` with `i < j < m` owns slot
//! `gauss(m - 1) - gauss(m - 1 - i) + (j - i - 1)`. The block of row `i` is
//! contiguous, so the table is split into disjoint per-row slices up front and
//! every row (and every slot within it) can be scored independently.

use rayon::prelude::*;

use crate::error::CheckError;
use crate::file::CleansedFile;
use crate::levenshtein::LevenshteinScratch;
use crate::safe_int::gauss_sum;
use crate::score::windowed_similarity;

/// Number of unordered pairs among `m` files, `m * (m - 1) / 2`.
pub fn pair_count(m: usize) -> Option<usize> {
    if m == 0 {
        return Some(0);
    }
    gauss_sum(m - 1)
}

/// First slot of the pairs `(i, i + 1..m)`, or `None` if the table size
/// overflows. Requires `i < m`.
pub fn row_start(i: usize, m: usize) -> Option<usize> {
    debug_assert!(i < m);
    let last = m - 1;
    let total = gauss_sum(last)?;
    let remaining = gauss_sum(last - i)?;
    total.checked_sub(remaining)
}

/// Slot of pair `(i, j)` among `m` files. Requires `i < j < m`.
pub fn pair_slot(i: usize, j: usize, m: usize) -> Option<usize> {
    debug_assert!(i < j && j < m);
    row_start(i, m)?.checked_add(j - i - 1)
}

/// Inverse of [`pair_slot`] by walking the rows.
pub fn pair_of_slot(slot: usize, m: usize) -> Option<(usize, usize)> {
    let mut start = 0usize;
    for i in 0..m.saturating_sub(1) {
        let row_len = m - 1 - i;
        if slot < start + row_len {
            return Some((i, i + 1 + (slot - start)));
        }
        start += row_len;
    }
    None
}

/// Splits the pair table into one mutable slice per row `i`.
fn split_rows(table: &mut [f64], m: usize) -> Vec<(usize, &mut [f64])> {
    let mut rows = Vec::with_capacity(m.saturating_sub(1));
    let mut rest = table;
    for i in 0..m.saturating_sub(1) {
        let (row, tail) = rest.split_at_mut(m - 1 - i);
        rows.push((i, row));
        rest = tail;
    }
    debug_assert!(rest.is_empty());
    rows
}

/// Scores every unordered pair of `files` into slot order.
///
/// Each worker owns its Levenshtein scratch; files are only read.
pub fn score_all_pairs(
    files: &[CleansedFile],
    radius: usize,
    max_line_length: usize,
) -> Result<Vec<f64>, CheckError> {
    let m = files.len();
    let count = pair_count(m).ok_or(CheckError::PairTableOverflow { files: m })?;

    let mut table: Vec<f64> = Vec::new();
    table
        .try_reserve_exact(count)
        .map_err(|_| CheckError::Allocation { what: "pair table" })?;
    table.resize(count, 0.0);

    split_rows(&mut table, m)
        .into_par_iter()
        .for_each(|(i, row)| {
            debug_assert_eq!(row.len(), m - 1 - i);
            row.par_iter_mut().enumerate().for_each_init(
                || LevenshteinScratch::with_capacity(max_line_length),
                |scratch, (offset, slot)| {
                    let j = i + 1 + offset;
                    *slot = windowed_similarity(&files[i], &files[j], radius, scratch);
                },
            );
        });

    Ok(table)
}
