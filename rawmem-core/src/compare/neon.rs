//! AArch64 NEON comparison kernel. Same chunk-plus-overlapping-tail walk as
//! the x86 kernels.

use std::arch::aarch64::*;

/// # Safety
///
/// NEON must be available, both regions readable for `len` bytes,
/// `len >= 16`.
#[target_feature(enable = "neon")]
pub(super) unsafe fn equal_neon(left: *const u8, right: *const u8, len: usize) -> bool {
    const WIDTH: usize = 16;
    debug_assert!(len >= WIDTH);

    let mut offset = 0;
    while offset + WIDTH <= len {
        if !chunk_eq(left.add(offset), right.add(offset)) {
            return false;
        }
        offset += WIDTH;
    }
    offset == len || chunk_eq(left.add(len - WIDTH), right.add(len - WIDTH))
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn chunk_eq(left: *const u8, right: *const u8) -> bool {
    let eq = vceqq_u8(vld1q_u8(left), vld1q_u8(right));
    vminvq_u8(eq) == u8::MAX
}
