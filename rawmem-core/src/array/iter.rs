//! Forward, single-pass element iterators.

use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Shared-reference iterator over a native buffer.
pub struct Iter<'a, T> {
    ptr: *const T,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    /// # Safety
    ///
    /// When `len > 0`, `ptr` must point to `len` initialised elements that
    /// stay valid and unmutated for `'a`.
    pub(crate) unsafe fn new(ptr: *const T, len: usize) -> Self {
        Self {
            ptr,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: `remaining > 0`, so `ptr` is within the buffer handed to `new`.
        let item = unsafe { &*self.ptr };
        self.ptr = self.ptr.wrapping_add(1);
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable-reference iterator over a native buffer.
pub struct IterMut<'a, T> {
    ptr: *mut T,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    /// # Safety
    ///
    /// When `len > 0`, `ptr` must point to `len` initialised elements that
    /// nothing else accesses for `'a`.
    pub(crate) unsafe fn new(ptr: *mut T, len: usize) -> Self {
        Self {
            ptr,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: `remaining > 0`, and each element is yielded exactly once.
        let item = unsafe { &mut *self.ptr };
        self.ptr = self.ptr.wrapping_add(1);
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

// SAFETY: the iterators behave like `&'a T` / `&'a mut T`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
