//! Word-sized and sub-word comparison kernels.

use std::mem::size_of;

/// Machine word size in bytes.
pub(crate) const WORD: usize = size_of::<usize>();

/// Compares regions shorter than one machine word.
///
/// Never performs a load wider than the region itself.
///
/// # Safety
///
/// `left` and `right` must be readable for `len` bytes and `len < WORD`.
#[inline]
pub(super) unsafe fn equal_small(left: *const u8, right: *const u8, len: usize) -> bool {
    debug_assert!(len < WORD);

    // 4..8 bytes on 64-bit: head and tail u32 loads, overlapping when len < 8.
    if cfg!(target_pointer_width = "64") && len >= 4 {
        let head = read_u32(left, 0) ^ read_u32(right, 0);
        let tail = read_u32(left, len - 4) ^ read_u32(right, len - 4);
        return (head | tail) == 0;
    }

    let mut diff: u32 = 0;
    if len >= 2 {
        diff = u32::from(read_u16(left, 0) ^ read_u16(right, 0));
    }
    if len & 1 == 1 {
        diff |= u32::from(*left.add(len - 1) ^ *right.add(len - 1));
    }
    diff == 0
}

/// Compares word-sized chunks, finishing with one word that ends exactly at
/// the last byte.
///
/// # Safety
///
/// `left` and `right` must be readable for `len` bytes and `len >= WORD`.
#[inline]
pub(super) unsafe fn equal_words(left: *const u8, right: *const u8, len: usize) -> bool {
    debug_assert!(len >= WORD);

    let mut offset = 0;
    while offset + WORD <= len {
        if read_word(left, offset) != read_word(right, offset) {
            return false;
        }
        offset += WORD;
    }
    offset == len || read_word(left, len - WORD) == read_word(right, len - WORD)
}

#[inline(always)]
unsafe fn read_word(base: *const u8, offset: usize) -> usize {
    base.add(offset).cast::<usize>().read_unaligned()
}

#[inline(always)]
unsafe fn read_u32(base: *const u8, offset: usize) -> u32 {
    base.add(offset).cast::<u32>().read_unaligned()
}

#[inline(always)]
unsafe fn read_u16(base: *const u8, offset: usize) -> u16 {
    base.add(offset).cast::<u16>().read_unaligned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(a: &[u8], b: &[u8]) -> bool {
        assert_eq!(a.len(), b.len());
        unsafe { equal_small(a.as_ptr(), b.as_ptr(), a.len()) }
    }

    fn words(a: &[u8], b: &[u8]) -> bool {
        assert_eq!(a.len(), b.len());
        unsafe { equal_words(a.as_ptr(), b.as_ptr(), a.len()) }
    }

    #[test]
    fn small_detects_every_byte() {
        for len in 0..WORD {
            let a: Vec<u8> = (0..len as u8).collect();
            assert!(small(&a, &a.clone()), "len {len}");
            for i in 0..len {
                let mut b = a.clone();
                b[i] ^= 0x80;
                assert!(!small(&a, &b), "len {len} byte {i}");
            }
        }
    }

    #[test]
    fn words_detect_tail_difference() {
        for len in WORD..4 * WORD + 3 {
            let a: Vec<u8> = (0..len).map(|i| i as u8).collect();
            assert!(words(&a, &a.clone()));
            let mut b = a.clone();
            b[len - 1] ^= 1;
            assert!(!words(&a, &b), "len {len}");
        }
    }
}
