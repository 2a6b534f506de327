//! Non-owning views over native buffers.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr;
use std::slice;

use bytemuck::Pod;

use super::iter::{Iter, IterMut};
use super::{cast_len, check_range, NativeArray};

/// A fixed-length alias over `T` elements it does not own.
///
/// Behaves like `&'a mut [T]`: it can read and write, never frees, and may
/// not outlive the memory it points at. Narrower views are produced by
/// [`slice`](Self::slice) and [`cast`](Self::cast); use
/// [`reborrow`](Self::reborrow) first to keep the original.
pub struct NativeView<'a, T: Pod> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T: Pod> NativeView<'a, T> {
    /// Aliases `len` elements starting at `ptr`. No allocation, no checks.
    ///
    /// # Safety
    ///
    /// When `len > 0`, `ptr` must be non-null, aligned for `T` and valid for
    /// reads and writes of `len` elements for `'a`, with no other access to
    /// that memory while the view is used. Elements must be initialised
    /// before they are read.
    #[inline]
    pub unsafe fn wrap(ptr: *mut T, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Aliases a borrowed slice.
    #[inline]
    pub fn from_slice(slice: &'a mut [T]) -> Self {
        // SAFETY: the slice guarantees validity and exclusivity for 'a.
        unsafe { Self::wrap(slice.as_mut_ptr(), slice.len()) }
    }

    /// A shorter-lived view of the same range, leaving `self` usable
    /// afterwards.
    #[inline]
    pub fn reborrow(&mut self) -> NativeView<'_, T> {
        // SAFETY: `self` is mutably borrowed for the new view's lifetime.
        unsafe { NativeView::wrap(self.ptr, self.len) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// Bounds-checked element access.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Bounds-checked mutable element access.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// # Safety
    ///
    /// `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        &*self.ptr.add(index)
    }

    /// # Safety
    ///
    /// `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        &mut *self.ptr.add(index)
    }

    /// Zero-fills every element.
    pub fn clear(&mut self) {
        if self.len > 0 {
            // SAFETY: the view covers `len` writable elements, and all-zero is
            // a valid `T` because `T: Pod`.
            unsafe { ptr::write_bytes(self.ptr, 0, self.len) };
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        if self.len == 0 {
            return &[];
        }
        // SAFETY: contract of `wrap`.
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.len == 0 {
            return &mut [];
        }
        // SAFETY: contract of `wrap`; `&mut self` keeps the access exclusive.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }

    /// Converts the view into the slice it aliases, for the full `'a`.
    #[inline]
    pub fn into_slice(self) -> &'a mut [T] {
        if self.len == 0 {
            return &mut [];
        }
        // SAFETY: contract of `wrap`; the view is consumed.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }

    /// The elements as raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Elements `start..start + len`.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end of the view.
    #[track_caller]
    pub fn slice(self, start: usize, len: usize) -> NativeView<'a, T> {
        check_range(start, len, self.len);
        // SAFETY: range checked above.
        unsafe { self.slice_unchecked(start, len) }
    }

    /// Elements `start..`.
    ///
    /// # Panics
    ///
    /// Panics if `start > self.len()`.
    #[track_caller]
    pub fn slice_from(self, start: usize) -> NativeView<'a, T> {
        let len = self.len.checked_sub(start);
        match len {
            // SAFETY: `start + len == self.len`.
            Some(len) => unsafe { self.slice_unchecked(start, len) },
            None => panic!("start {start} out of bounds for length {}", self.len),
        }
    }

    /// Elements `start..start + len`, without bounds checks.
    ///
    /// # Safety
    ///
    /// `start + len <= self.len()`.
    #[inline]
    pub unsafe fn slice_unchecked(self, start: usize, len: usize) -> NativeView<'a, T> {
        NativeView::wrap(self.ptr.wrapping_add(start), len)
    }

    /// Reinterprets the same bytes as `U` elements.
    ///
    /// The new length is `len * size_of::<T>() / size_of::<U>()`; trailing
    /// bytes that do not fill a whole `U` are unreachable through the result.
    ///
    /// # Safety
    ///
    /// When the result is non-empty, `self.as_ptr()` must be aligned for `U`.
    /// Buffers allocated by [`NativeArray`] satisfy this for any `U` whose
    /// alignment is at most [`MIN_HEAP_ALIGN`](crate::alloc::MIN_HEAP_ALIGN).
    #[inline]
    pub unsafe fn cast<U: Pod>(self) -> NativeView<'a, U> {
        let len = cast_len::<T, U>(self.len);
        debug_assert!(len == 0 || self.ptr as usize % mem::align_of::<U>() == 0);
        NativeView::wrap(self.ptr.cast::<U>(), len)
    }

    /// Checked [`cast`](Self::cast): `None` if the start address is not
    /// aligned for `U`.
    pub fn try_cast<U: Pod>(self) -> Option<NativeView<'a, U>> {
        if self.ptr as usize % mem::align_of::<U>() != 0 {
            return None;
        }
        // SAFETY: alignment checked above.
        Some(unsafe { self.cast() })
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        // SAFETY: contract of `wrap`; `&self` prevents mutation through the view.
        unsafe { Iter::new(self.ptr, self.len) }
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // SAFETY: contract of `wrap`; `&mut self` keeps the access exclusive.
        unsafe { IterMut::new(self.ptr, self.len) }
    }
}

impl<T: Pod> Index<usize> for NativeView<'_, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Pod> IndexMut<usize> for NativeView<'_, T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Pod> PartialEq for NativeView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.ptr, other.ptr) && self.len == other.len
    }
}

impl<T: Pod> Eq for NativeView<'_, T> {}

impl<T: Pod> PartialEq<NativeArray<T>> for NativeView<'_, T> {
    fn eq(&self, other: &NativeArray<T>) -> bool {
        ptr::eq(self.ptr.cast_const(), other.as_ptr()) && self.len == other.len()
    }
}

impl<T: Pod> Hash for NativeView<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl<T: Pod> fmt::Debug for NativeView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeView")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

impl<'a, T: Pod> IntoIterator for NativeView<'a, T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        // SAFETY: the view is consumed, handing its exclusive access to the iterator.
        unsafe { IterMut::new(self.ptr, self.len) }
    }
}

impl<'b, T: Pod> IntoIterator for &'b NativeView<'_, T> {
    type Item = &'b T;
    type IntoIter = Iter<'b, T>;

    fn into_iter(self) -> Iter<'b, T> {
        self.iter()
    }
}

impl<'b, T: Pod> IntoIterator for &'b mut NativeView<'_, T> {
    type Item = &'b mut T;
    type IntoIter = IterMut<'b, T>;

    fn into_iter(self) -> IterMut<'b, T> {
        self.iter_mut()
    }
}

// SAFETY: a view is an exclusive borrow of `T`s, like `&mut [T]`.
unsafe impl<T: Pod + Send> Send for NativeView<'_, T> {}
unsafe impl<T: Pod + Sync> Sync for NativeView<'_, T> {}
