//! ## rawmem-core::alloc::align
//! **Power-of-two size rounding**
//!
//! `align_up`/`align_down` sit on the allocation hot path and perform no
//! validation: an alignment that is not a power of two yields a meaningless
//! (but non-panicking) result. Use the `checked_*` variants when the
//! alignment comes from untrusted input.

/// Rounds `size` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two. Sizes within `alignment - 1` of
/// `usize::MAX` wrap around.
#[inline]
pub const fn align_up(size: usize, alignment: usize) -> usize {
    let mask = alignment.wrapping_sub(1);
    size.wrapping_add(mask) & !mask
}

/// Rounds `size` down to the previous multiple of `alignment`.
///
/// `alignment` must be a power of two.
#[inline]
pub const fn align_down(size: usize, alignment: usize) -> usize {
    size & !alignment.wrapping_sub(1)
}

/// Rounds `size` up to a multiple of the pointer width.
#[inline]
pub const fn align(size: usize) -> usize {
    align_up(size, std::mem::size_of::<usize>())
}

/// Like [`align_up`], but returns `None` for a non-power-of-two alignment
/// or when the rounded size does not fit in `usize`.
#[inline]
pub const fn checked_align_up(size: usize, alignment: usize) -> Option<usize> {
    if !alignment.is_power_of_two() {
        return None;
    }
    match size.checked_add(alignment - 1) {
        Some(padded) => Some(padded & !(alignment - 1)),
        None => None,
    }
}

/// Like [`align_down`], but returns `None` for a non-power-of-two alignment.
#[inline]
pub const fn checked_align_down(size: usize, alignment: usize) -> Option<usize> {
    if !alignment.is_power_of_two() {
        return None;
    }
    Some(size & !(alignment - 1))
}
