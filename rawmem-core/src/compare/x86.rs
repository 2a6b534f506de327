//! SSE2 / AVX2 / AVX-512 comparison kernels.
//!
//! Each kernel walks full-width chunks from the start, then compares one
//! last chunk ending exactly at the final byte. That chunk overlaps the
//! previous one when the length is not a multiple of the width, so no
//! partial or masked load is ever needed.

use std::arch::x86_64::*;

/// # Safety
///
/// SSE2 must be available, both regions readable for `len` bytes,
/// `len >= 16`.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn equal_sse2(left: *const u8, right: *const u8, len: usize) -> bool {
    const WIDTH: usize = 16;
    debug_assert!(len >= WIDTH);

    let mut offset = 0;
    while offset + WIDTH <= len {
        if !chunk_eq_sse2(left.add(offset), right.add(offset)) {
            return false;
        }
        offset += WIDTH;
    }
    offset == len || chunk_eq_sse2(left.add(len - WIDTH), right.add(len - WIDTH))
}

/// # Safety
///
/// AVX2 must be available, both regions readable for `len` bytes,
/// `len >= 32`.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn equal_avx2(left: *const u8, right: *const u8, len: usize) -> bool {
    const WIDTH: usize = 32;
    debug_assert!(len >= WIDTH);

    let mut offset = 0;
    while offset + WIDTH <= len {
        if !chunk_eq_avx2(left.add(offset), right.add(offset)) {
            return false;
        }
        offset += WIDTH;
    }
    offset == len || chunk_eq_avx2(left.add(len - WIDTH), right.add(len - WIDTH))
}

/// # Safety
///
/// AVX-512F and AVX-512BW must be available, both regions readable for
/// `len` bytes, `len >= 64`.
#[target_feature(enable = "avx512f,avx512bw")]
pub(super) unsafe fn equal_avx512(left: *const u8, right: *const u8, len: usize) -> bool {
    const WIDTH: usize = 64;
    debug_assert!(len >= WIDTH);

    let mut offset = 0;
    while offset + WIDTH <= len {
        if !chunk_eq_avx512(left.add(offset), right.add(offset)) {
            return false;
        }
        offset += WIDTH;
    }
    offset == len || chunk_eq_avx512(left.add(len - WIDTH), right.add(len - WIDTH))
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn chunk_eq_sse2(left: *const u8, right: *const u8) -> bool {
    let a = _mm_loadu_si128(left.cast::<__m128i>());
    let b = _mm_loadu_si128(right.cast::<__m128i>());
    _mm_movemask_epi8(_mm_cmpeq_epi8(a, b)) == 0xFFFF
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn chunk_eq_avx2(left: *const u8, right: *const u8) -> bool {
    let a = _mm256_loadu_si256(left.cast::<__m256i>());
    let b = _mm256_loadu_si256(right.cast::<__m256i>());
    _mm256_movemask_epi8(_mm256_cmpeq_epi8(a, b)) == -1
}

#[inline]
#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn chunk_eq_avx512(left: *const u8, right: *const u8) -> bool {
    let a = _mm512_loadu_epi8(left.cast::<i8>());
    let b = _mm512_loadu_epi8(right.cast::<i8>());
    _mm512_cmpneq_epi8_mask(a, b) == 0
}
