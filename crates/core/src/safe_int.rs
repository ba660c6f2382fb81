//! Overflow-checked arithmetic for sizes derived from untrusted input.
//!
//! Every helper returns `None` instead of wrapping. The word-sized variants
//! operate on `usize`, the narrow ones on `u32`.

pub fn checked_add_size(a: usize, b: usize) -> Option<usize> {
    let sum = a.wrapping_add(b);
    // Unsigned addition wrapped iff the result is below either operand.
    if sum < a { None } else { Some(sum) }
}

pub fn checked_mul_size(a: usize, b: usize) -> Option<usize> {
    let wide = (a as u128) * (b as u128);
    if wide > usize::MAX as u128 {
        None
    } else {
        Some(wide as usize)
    }
}

pub fn checked_add_u32(a: u32, b: u32) -> Option<u32> {
    let sum = a.wrapping_add(b);
    if sum < a { None } else { Some(sum) }
}

pub fn checked_mul_u32(a: u32, b: u32) -> Option<u32> {
    let wide = u64::from(a) * u64::from(b);
    u32::try_from(wide).ok()
}

/// `n * (n + 1) / 2`, or `None` if any intermediate overflows.
pub fn gauss_sum(n: usize) -> Option<usize> {
    let next = checked_add_size(n, 1)?;
    // One of n and n + 1 is even; halve it first so the product stays exact.
    if n % 2 == 0 {
        checked_mul_size(n / 2, next)
    } else {
        checked_mul_size(n, next / 2)
    }
}

/// Upper bound on the number of compared files for this platform's word size.
///
/// Chosen so that the pair table (`gauss_sum(n) * size_of::<f64>()`) and the
/// per-file storage can never overflow `usize`.
pub const fn max_file_count() -> usize {
    match usize::BITS {
        16 => i8::MAX as usize,
        32 => i16::MAX as usize,
        _ => i32::MAX as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_size_detects_wrap_boundary() {
        assert_eq!(checked_add_size(usize::MAX - 1, 1), Some(usize::MAX));
        assert_eq!(checked_add_size(usize::MAX, 1), None);
        assert_eq!(checked_add_size(1, usize::MAX), None);
        assert_eq!(checked_add_size(0, 0), Some(0));
    }

    #[test]
    fn mul_size_detects_wrap_boundary() {
        let half = usize::MAX / 2;
        assert_eq!(checked_mul_size(half, 2), Some(usize::MAX - 1));
        assert_eq!(checked_mul_size(half + 1, 2), None);
        assert_eq!(checked_mul_size(0, usize::MAX), Some(0));
        assert_eq!(checked_mul_size(usize::MAX, 1), Some(usize::MAX));
    }

    #[test]
    fn narrow_variants_detect_wrap_boundary() {
        assert_eq!(checked_add_u32(u32::MAX - 5, 5), Some(u32::MAX));
        assert_eq!(checked_add_u32(u32::MAX - 5, 6), None);
        assert_eq!(checked_mul_u32(65_535, 65_537), Some(u32::MAX));
        assert_eq!(checked_mul_u32(65_536, 65_536), None);
    }

    #[test]
    fn gauss_sum_matches_closed_form() {
        for n in 0..100usize {
            assert_eq!(gauss_sum(n), Some(n * (n + 1) / 2));
        }
        assert_eq!(gauss_sum(usize::MAX), None);
    }

    #[test]
    fn pair_table_for_max_file_count_fits() {
        let pairs = gauss_sum(max_file_count()).expect("gauss sum fits");
        assert!(checked_mul_size(pairs, std::mem::size_of::<f64>()).is_some());
    }
}
