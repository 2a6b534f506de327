//! ## rawmem-core::compare
//! **Byte-exact buffer equality with a vector-width cascade**
//!
//! Observable behaviour is that of a naive byte loop. Speed comes from
//! picking, per call, the widest kernel the active strategy allows that is
//! not wider than the region:
//!
//! ```text
//! identical pointers          -> true, nothing read
//! len < word                  -> sub-word path (u32 head/tail, or u16 + u8)
//! len >= 64 and AVX-512       -> 64-byte chunks
//! len >= 32 and AVX2          -> 32-byte chunks
//! len >= 16 and SSE2 / NEON   -> 16-byte chunks
//! otherwise                   -> word chunks
//! ```
//!
//! Every chunked kernel finishes with one chunk ending exactly at the last
//! byte, so lengths that are not a multiple of the width never read past the
//! region.
//!
//! The strategy is detected once per process and cached; it may be forced
//! beforehand with [`force_strategy`].

mod scalar;
mod strategy;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "x86_64")]
mod x86;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::CompareError;
use scalar::WORD;
pub use strategy::CompareStrategy;

static ACTIVE: OnceCell<CompareStrategy> = OnceCell::new();

/// The strategy used by [`compare`] and [`compare_raw`], detecting it on
/// first use.
pub fn active_strategy() -> CompareStrategy {
    *ACTIVE.get_or_init(|| {
        let strategy = CompareStrategy::detect();
        debug!(%strategy, "buffer compare strategy detected");
        strategy
    })
}

/// The strategy fixed so far, if any. Unlike [`active_strategy`], never
/// triggers detection.
pub fn selected_strategy() -> Option<CompareStrategy> {
    ACTIVE.get().copied()
}

/// Reports whether [`force_strategy`] would succeed now, without fixing
/// anything.
pub fn can_force(strategy: CompareStrategy) -> Result<(), CompareError> {
    if !strategy.is_supported() {
        return Err(CompareError::Unsupported(strategy));
    }
    match ACTIVE.get() {
        Some(&current) if current != strategy => Err(CompareError::AlreadySelected(current)),
        _ => Ok(()),
    }
}

/// Fixes the process-wide strategy before it is first used.
///
/// Forcing the strategy that is already active is a no-op.
pub fn force_strategy(strategy: CompareStrategy) -> Result<(), CompareError> {
    can_force(strategy)?;
    match ACTIVE.try_insert(strategy) {
        Ok(_) => {
            debug!(%strategy, "buffer compare strategy forced");
            Ok(())
        }
        Err((&current, _)) if current == strategy => Ok(()),
        Err((&current, _)) => Err(CompareError::AlreadySelected(current)),
    }
}

/// Returns true iff both slices have the same length and identical bytes.
pub fn compare(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    // SAFETY: both slices are readable for `left.len()` bytes.
    unsafe { compare_raw(left.as_ptr(), right.as_ptr(), left.len()) }
}

/// Returns true iff the first `byte_count` bytes at `left` and `right` are
/// identical.
///
/// # Safety
///
/// Unless `left == right`, both pointers must be readable for `byte_count`
/// bytes. Alignment is not required.
#[inline]
pub unsafe fn compare_raw(left: *const u8, right: *const u8, byte_count: usize) -> bool {
    dispatch(active_strategy(), left, right, byte_count)
}

/// Like [`compare`], but with an explicit strategy instead of the active one.
pub fn compare_with(
    strategy: CompareStrategy,
    left: &[u8],
    right: &[u8],
) -> Result<bool, CompareError> {
    if !strategy.is_supported() {
        return Err(CompareError::Unsupported(strategy));
    }
    if left.len() != right.len() {
        return Ok(false);
    }
    // SAFETY: the strategy is supported by this CPU and both slices are
    // readable for `left.len()` bytes.
    Ok(unsafe { dispatch(strategy, left.as_ptr(), right.as_ptr(), left.len()) })
}

/// # Safety
///
/// `strategy` must be supported by the running CPU; pointer contract as for
/// [`compare_raw`].
#[inline]
unsafe fn dispatch(
    strategy: CompareStrategy,
    left: *const u8,
    right: *const u8,
    len: usize,
) -> bool {
    if left == right {
        return true;
    }
    if len < WORD {
        return scalar::equal_small(left, right, len);
    }
    match strategy {
        #[cfg(target_arch = "x86_64")]
        CompareStrategy::Avx512 if len >= 64 => x86::equal_avx512(left, right, len),
        #[cfg(target_arch = "x86_64")]
        CompareStrategy::Avx512 | CompareStrategy::Avx2 if len >= 32 => {
            x86::equal_avx2(left, right, len)
        }
        #[cfg(target_arch = "x86_64")]
        CompareStrategy::Avx512 | CompareStrategy::Avx2 | CompareStrategy::Sse2 if len >= 16 => {
            x86::equal_sse2(left, right, len)
        }
        #[cfg(target_arch = "aarch64")]
        CompareStrategy::Neon if len >= 16 => neon::equal_neon(left, right, len),
        _ => scalar::equal_words(left, right, len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDARY_SIZES: [usize; 16] = [0, 1, 2, 3, 4, 7, 8, 15, 16, 17, 31, 32, 33, 63, 64, 65];

    fn supported() -> Vec<CompareStrategy> {
        CompareStrategy::ALL
            .into_iter()
            .filter(|s| s.is_supported())
            .collect()
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 + 7) as u8).collect()
    }

    #[test]
    fn self_compare_is_true() {
        for len in BOUNDARY_SIZES {
            let buf = pattern(len);
            assert!(unsafe { compare_raw(buf.as_ptr(), buf.as_ptr(), len) });
            assert!(compare(&buf, &buf));
        }
    }

    #[test]
    fn zero_length_is_equal() {
        let a = [1u8];
        let b = [2u8];
        assert!(unsafe { compare_raw(a.as_ptr(), b.as_ptr(), 0) });
        assert!(compare(&[], &[]));
    }

    #[test]
    fn different_lengths_are_unequal() {
        assert!(!compare(&[1, 2, 3], &[1, 2]));
    }

    #[test]
    fn every_single_bit_flip_is_detected() {
        for strategy in supported() {
            for len in BOUNDARY_SIZES {
                let a = pattern(len);
                let b = a.clone();
                assert_eq!(compare_with(strategy, &a, &b), Ok(true), "{strategy} len {len}");

                for byte in 0..len {
                    for bit in 0..8 {
                        let mut b = a.clone();
                        b[byte] ^= 1 << bit;
                        assert_eq!(
                            compare_with(strategy, &a, &b),
                            Ok(false),
                            "{strategy} len {len} byte {byte} bit {bit}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn unaligned_starts_are_handled() {
        let backing_a = pattern(300);
        let backing_b = backing_a.clone();
        for strategy in supported() {
            for start in 0..8 {
                for len in [9, 17, 40, 70, 130, 257] {
                    let a = &backing_a[start..start + len];
                    let b = &backing_b[start..start + len];
                    assert_eq!(compare_with(strategy, a, b), Ok(true));

                    let mut changed = b.to_vec();
                    changed[len / 2] = changed[len / 2].wrapping_add(1);
                    assert_eq!(compare_with(strategy, a, &changed), Ok(false));
                }
            }
        }
    }

    #[test]
    fn difference_only_in_overlapping_tail_is_detected() {
        for strategy in supported() {
            let width = strategy.widest_width();
            let len = width * 2 + width / 2;
            let a = pattern(len);
            let mut b = a.clone();
            b[len - 1] ^= 0xFF;
            assert_eq!(compare_with(strategy, &a, &b), Ok(false), "{strategy}");
        }
    }

    #[test]
    fn active_strategy_is_supported() {
        assert!(active_strategy().is_supported());
    }

    #[test]
    fn forcing_the_active_strategy_is_a_no_op() {
        let current = active_strategy();
        assert_eq!(force_strategy(current), Ok(()));
        assert_eq!(active_strategy(), current);
    }

    #[test]
    fn forcing_another_strategy_after_selection_fails() {
        let current = active_strategy();
        if let Some(other) = supported().into_iter().find(|s| *s != current) {
            assert_eq!(
                force_strategy(other),
                Err(CompareError::AlreadySelected(current))
            );
        }
    }

    #[test]
    fn can_force_reports_without_fixing() {
        let current = active_strategy();
        assert_eq!(selected_strategy(), Some(current));
        assert_eq!(can_force(current), Ok(()));
        if let Some(other) = supported().into_iter().find(|s| *s != current) {
            assert_eq!(can_force(other), Err(CompareError::AlreadySelected(current)));
        }
        assert_eq!(active_strategy(), current);
    }

    #[test]
    fn unsupported_strategy_is_rejected() {
        if let Some(missing) = CompareStrategy::ALL.into_iter().find(|s| !s.is_supported()) {
            assert_eq!(
                compare_with(missing, &[1], &[1]),
                Err(CompareError::Unsupported(missing))
            );
            assert_eq!(
                force_strategy(missing),
                Err(CompareError::Unsupported(missing))
            );
            assert_eq!(can_force(missing), Err(CompareError::Unsupported(missing)));
        }
    }

    proptest! {
        #[test]
        fn agrees_with_naive_loop(
            a in proptest::collection::vec(any::<u8>(), 0..200),
            flip in any::<proptest::sample::Index>(),
            mutate in any::<bool>(),
        ) {
            let mut b = a.clone();
            if mutate && !b.is_empty() {
                let i = flip.index(b.len());
                b[i] = b[i].wrapping_add(1);
            }
            let naive = a.iter().zip(&b).all(|(x, y)| x == y);
            prop_assert_eq!(compare(&a, &b), naive);
            for strategy in supported() {
                prop_assert_eq!(compare_with(strategy, &a, &b), Ok(naive));
            }
        }
    }
}
