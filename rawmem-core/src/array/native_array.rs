//! ## rawmem-core::array::native_array
//! **Owning fixed-length array over a raw allocation**
//!
//! Contents are never resized; growing means allocating a new array and
//! copying. Views handed out by [`NativeArray::view`], [`NativeArray::slice`]
//! and [`NativeArray::cast`] borrow the array, so they cannot outlive it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice;

use bytemuck::Pod;
use tracing::trace;

use super::iter::{Iter, IterMut};
use super::{byte_len, element_count, NativeView};
use crate::alloc::{Allocator, MIN_HEAP_ALIGN};
use crate::error::AllocError;

/// A heap buffer of `len` elements of `T`, freed through the allocator that
/// produced it.
///
/// The empty array (null pointer, zero length) owns nothing and frees
/// nothing.
pub struct NativeArray<T: Pod> {
    ptr: *mut T,
    len: usize,
    alloc: AllocRef,
}

/// The allocator an array frees through. Arrays built on the process-wide
/// allocator only borrow it, so they never touch its statistics refcount.
enum AllocRef {
    Global(&'static Allocator),
    Owned(Allocator),
}

impl AllocRef {
    #[inline]
    fn get(&self) -> &Allocator {
        match self {
            AllocRef::Global(alloc) => *alloc,
            AllocRef::Owned(alloc) => alloc,
        }
    }

    fn into_owned(self) -> Allocator {
        match self {
            AllocRef::Global(alloc) => alloc.clone(),
            AllocRef::Owned(alloc) => alloc,
        }
    }
}

impl<T: Pod> NativeArray<T> {
    const ALIGNMENT_FITS_HEAP: () = assert!(
        mem::align_of::<T>() <= MIN_HEAP_ALIGN,
        "element alignment exceeds the heap alignment guarantee"
    );

    /// The empty array. Allocates nothing.
    pub fn empty() -> Self {
        Self::empty_in(&Allocator::platform())
    }

    /// The empty array, remembering `alloc`. Allocates nothing.
    pub fn empty_in(alloc: &Allocator) -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
            alloc: AllocRef::Owned(alloc.clone()),
        }
    }

    /// Allocates `len` zeroed elements from the process-wide allocator.
    ///
    /// Fails with [`AllocError::InvalidLength`] for negative lengths, before
    /// any allocation is attempted.
    pub fn new_zeroed<L>(len: L) -> Result<Self, AllocError>
    where
        L: TryInto<usize> + fmt::Display + Copy,
    {
        Self::allocate_in(AllocRef::Global(Allocator::global()), len, true)
    }

    /// Allocates `len` zeroed elements from `alloc`.
    ///
    /// The array keeps its own clone of `alloc`. With statistics attached that
    /// costs one reference-count increment per array; the global constructors
    /// avoid it.
    pub fn new_zeroed_in<L>(alloc: &Allocator, len: L) -> Result<Self, AllocError>
    where
        L: TryInto<usize> + fmt::Display + Copy,
    {
        Self::allocate_in(AllocRef::Owned(alloc.clone()), len, true)
    }

    /// Allocates `len` uninitialised elements from the process-wide allocator.
    ///
    /// # Safety
    ///
    /// Every element must be written before it is read.
    pub unsafe fn new_uninit<L>(len: L) -> Result<Self, AllocError>
    where
        L: TryInto<usize> + fmt::Display + Copy,
    {
        Self::allocate_in(AllocRef::Global(Allocator::global()), len, false)
    }

    /// Allocates `len` uninitialised elements from `alloc`.
    ///
    /// # Safety
    ///
    /// Every element must be written before it is read.
    pub unsafe fn new_uninit_in<L>(alloc: &Allocator, len: L) -> Result<Self, AllocError>
    where
        L: TryInto<usize> + fmt::Display + Copy,
    {
        Self::allocate_in(AllocRef::Owned(alloc.clone()), len, false)
    }

    /// Allocates `len` elements, zeroed only when `zeroed` is set.
    ///
    /// # Safety
    ///
    /// When `zeroed` is false, as for [`new_uninit`](Self::new_uninit).
    pub unsafe fn with_zeroed<L>(len: L, zeroed: bool) -> Result<Self, AllocError>
    where
        L: TryInto<usize> + fmt::Display + Copy,
    {
        Self::allocate_in(AllocRef::Global(Allocator::global()), len, zeroed)
    }

    /// # Safety
    ///
    /// When `zeroed` is false, as for [`new_uninit`](Self::new_uninit).
    pub unsafe fn with_zeroed_in<L>(
        alloc: &Allocator,
        len: L,
        zeroed: bool,
    ) -> Result<Self, AllocError>
    where
        L: TryInto<usize> + fmt::Display + Copy,
    {
        Self::allocate_in(AllocRef::Owned(alloc.clone()), len, zeroed)
    }

    fn allocate_in<L>(alloc: AllocRef, len: L, zeroed: bool) -> Result<Self, AllocError>
    where
        L: TryInto<usize> + fmt::Display + Copy,
    {
        let () = Self::ALIGNMENT_FITS_HEAP;
        let len = element_count(len)?;
        let bytes = byte_len::<T>(len)?;
        let raw = if zeroed {
            alloc.get().allocate_zeroed(bytes)?
        } else {
            alloc.get().allocate(bytes)?
        };
        Ok(Self {
            ptr: raw.as_ptr().cast::<T>(),
            len,
            alloc,
        })
    }

    /// Takes ownership of a buffer produced by `alloc`.
    ///
    /// # Safety
    ///
    /// Either `ptr` is null and `len == 0`, or `ptr` was returned by `alloc`
    /// (or a clone of it), holds `len` initialised elements and is owned by
    /// nobody else.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize, alloc: Allocator) -> Self {
        let () = Self::ALIGNMENT_FITS_HEAP;
        Self {
            ptr,
            len,
            alloc: AllocRef::Owned(alloc),
        }
    }

    /// Releases ownership without freeing. The caller becomes responsible
    /// for freeing the pointer through the returned allocator.
    pub fn into_raw_parts(self) -> (*mut T, usize, Allocator) {
        let this = mem::ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the allocator is moved out once.
        let alloc = unsafe { ptr::read(&this.alloc) };
        (this.ptr, this.len, alloc.into_owned())
    }

    /// Frees the buffer now. Equivalent to dropping the array.
    pub fn dispose(self) {
        drop(self);
    }

    pub fn allocator(&self) -> &Allocator {
        self.alloc.get()
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

    /// A non-owning view of the whole array.
    #[inline]
    pub fn view(&mut self) -> NativeView<'_, T> {
        // SAFETY: the array owns `len` elements and is mutably borrowed for
        // the view's lifetime.
        unsafe { NativeView::wrap(self.ptr, self.len) }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

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
        self.view().clear();
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        if self.len == 0 {
            return &[];
        }
        // SAFETY: the array owns `len` elements at `ptr`.
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.len == 0 {
            return &mut [];
        }
        // SAFETY: the array owns `len` elements at `ptr`; `&mut self` keeps
        // access exclusive.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Non-owning view of elements `start..start + len`.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end of the array.
    #[track_caller]
    pub fn slice(&mut self, start: usize, len: usize) -> NativeView<'_, T> {
        self.view().slice(start, len)
    }

    /// Non-owning view of elements `start..`.
    ///
    /// # Panics
    ///
    /// Panics if `start > self.len()`.
    #[track_caller]
    pub fn slice_from(&mut self, start: usize) -> NativeView<'_, T> {
        self.view().slice_from(start)
    }

    /// # Safety
    ///
    /// `start + len <= self.len()`.
    #[inline]
    pub unsafe fn slice_unchecked(&mut self, start: usize, len: usize) -> NativeView<'_, T> {
        self.view().slice_unchecked(start, len)
    }

    /// Non-owning view of the same bytes as `U` elements, of length
    /// `len * size_of::<T>() / size_of::<U>()`.
    ///
    /// # Safety
    ///
    /// `align_of::<U>()` must not exceed the alignment of the buffer. Any `U`
    /// with alignment up to [`MIN_HEAP_ALIGN`] qualifies for buffers this
    /// type allocated.
    #[inline]
    pub unsafe fn cast<U: Pod>(&mut self) -> NativeView<'_, U> {
        self.view().cast()
    }

    /// Checked [`cast`](Self::cast).
    pub fn try_cast<U: Pod>(&mut self) -> Option<NativeView<'_, U>> {
        self.view().try_cast()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        // SAFETY: the array owns `len` initialised elements.
        unsafe { Iter::new(self.ptr, self.len) }
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // SAFETY: as `iter`, with exclusive access through `&mut self`.
        unsafe { IterMut::new(self.ptr, self.len) }
    }
}

impl<T: Pod> Drop for NativeArray<T> {
    fn drop(&mut self) {
        if let Some(ptr) = NonNull::new(self.ptr.cast::<u8>()) {
            trace!(len = self.len, "disposing native array");
            // SAFETY: a non-null `ptr` was produced by `alloc` and is owned
            // exclusively by this array.
            unsafe { self.alloc.get().free(ptr) };
        }
    }
}

impl<T: Pod> Default for NativeArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Pod> Index<usize> for NativeArray<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Pod> IndexMut<usize> for NativeArray<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Pod> PartialEq for NativeArray<T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.ptr, other.ptr) && self.len == other.len
    }
}

impl<T: Pod> Eq for NativeArray<T> {}

impl<T: Pod> PartialEq<NativeView<'_, T>> for NativeArray<T> {
    fn eq(&self, other: &NativeView<'_, T>) -> bool {
        other == self
    }
}

impl<T: Pod> Hash for NativeArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl<T: Pod> fmt::Debug for NativeArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeArray")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

impl<'b, T: Pod> IntoIterator for &'b NativeArray<T> {
    type Item = &'b T;
    type IntoIter = Iter<'b, T>;

    fn into_iter(self) -> Iter<'b, T> {
        self.iter()
    }
}

impl<'b, T: Pod> IntoIterator for &'b mut NativeArray<T> {
    type Item = &'b mut T;
    type IntoIter = IterMut<'b, T>;

    fn into_iter(self) -> IterMut<'b, T> {
        self.iter_mut()
    }
}

// SAFETY: the array uniquely owns its elements, like `Box<[T]>`; the
// allocator is a set of plain fn pointers plus an `Arc` of atomics.
unsafe impl<T: Pod + Send> Send for NativeArray<T> {}
unsafe impl<T: Pod + Sync> Sync for NativeArray<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{AllocHooks, AllocStats};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_test::traced_test;

    static DEFAULT_FREES: AtomicUsize = AtomicUsize::new(0);
    static ROUTED_ALLOCS: AtomicUsize = AtomicUsize::new(0);
    static ROUTED_FREES: AtomicUsize = AtomicUsize::new(0);
    static INVALID_ALLOCS: AtomicUsize = AtomicUsize::new(0);

    unsafe fn counting_free_default(p: *mut u8) {
        DEFAULT_FREES.fetch_add(1, Ordering::SeqCst);
        libc::free(p.cast());
    }

    unsafe fn routed_calloc(n: usize) -> *mut u8 {
        ROUTED_ALLOCS.fetch_add(1, Ordering::SeqCst);
        libc::calloc(1, n.max(1)).cast()
    }

    unsafe fn routed_free(p: *mut u8) {
        ROUTED_FREES.fetch_add(1, Ordering::SeqCst);
        libc::free(p.cast());
    }

    unsafe fn invalid_malloc(n: usize) -> *mut u8 {
        INVALID_ALLOCS.fetch_add(1, Ordering::SeqCst);
        libc::malloc(n.max(1)).cast()
    }

    unsafe fn exhausted(_: usize) -> *mut u8 {
        ptr::null_mut()
    }

    #[test]
    fn new_array_reads_back_writes() {
        let mut arr = NativeArray::<i32>::new_zeroed(5).unwrap();
        assert_eq!(arr.len(), 5);
        for i in 0..5 {
            arr[i] = i as i32 * 3;
        }
        for i in 0..5 {
            assert_eq!(arr[i], i as i32 * 3);
        }
        assert_eq!(arr.get(5), None);
    }

    #[test]
    fn zeroed_array_is_zero() {
        let arr = NativeArray::<u64>::new_zeroed(33usize).unwrap();
        assert!(arr.iter().all(|&v| v == 0));
    }

    #[test]
    fn uninit_array_is_writable() {
        let mut arr = unsafe { NativeArray::<u16>::new_uninit(4u32) }.unwrap();
        for (i, slot) in arr.iter_mut().enumerate() {
            *slot = i as u16 + 1;
        }
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4]);

        let zeroed = unsafe { NativeArray::<u16>::with_zeroed(3, true) }.unwrap();
        assert_eq!(zeroed.as_slice(), &[0, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn index_past_end_panics() {
        let arr = NativeArray::<u8>::new_zeroed(2).unwrap();
        let _ = arr[2];
    }

    #[test]
    fn negative_length_fails_before_allocating() {
        let alloc = unsafe {
            Allocator::with_hooks(AllocHooks {
                allocate: Some(invalid_malloc),
                ..AllocHooks::default()
            })
        };
        let err = unsafe { NativeArray::<u8>::new_uninit_in(&alloc, -3i64) }.unwrap_err();
        assert_eq!(err, AllocError::InvalidLength("-3".into()));
        assert_eq!(INVALID_ALLOCS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn oversized_request_reports_overflow() {
        let err = NativeArray::<u64>::new_zeroed(usize::MAX / 2).unwrap_err();
        assert!(matches!(err, AllocError::SizeOverflow { element_size: 8, .. }));
    }

    #[test]
    #[traced_test]
    fn exhausted_allocator_reports_out_of_memory() {
        let alloc = unsafe {
            Allocator::with_hooks(AllocHooks {
                allocate: Some(exhausted),
                allocate_zeroed: Some(exhausted),
                free: None,
            })
        };
        let err = NativeArray::<u32>::new_zeroed_in(&alloc, 4).unwrap_err();
        assert_eq!(err, AllocError::OutOfMemory { requested: 16 });
        assert!(logs_contain("allocation failed"));
    }

    #[test]
    fn hooks_route_allocation_and_disposal() {
        let alloc = unsafe {
            Allocator::with_hooks(AllocHooks {
                allocate: None,
                allocate_zeroed: Some(routed_calloc),
                free: Some(routed_free),
            })
        };
        let arr = NativeArray::<u32>::new_zeroed_in(&alloc, 10).unwrap();
        assert_eq!(ROUTED_ALLOCS.load(Ordering::SeqCst), 1);
        assert_eq!(ROUTED_FREES.load(Ordering::SeqCst), 0);
        arr.dispose();
        assert_eq!(ROUTED_FREES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_array_never_frees() {
        let alloc = unsafe {
            Allocator::with_hooks(AllocHooks {
                free: Some(counting_free_default),
                ..AllocHooks::default()
            })
        };
        let empty = NativeArray::<u8>::empty_in(&alloc);
        assert!(empty.is_empty());
        assert!(empty.as_ptr().is_null());
        empty.dispose();
        drop(NativeArray::<u8>::empty_in(&alloc));
        assert_eq!(DEFAULT_FREES.load(Ordering::SeqCst), 0);

        let default = NativeArray::<u64>::default();
        assert_eq!(default.len(), 0);
        assert!(default.iter().next().is_none());
    }

    #[test]
    fn stats_balance_after_drop() {
        let stats = Arc::new(AllocStats::default());
        let alloc = Allocator::platform().with_stats(Arc::clone(&stats));
        {
            let _a = NativeArray::<u8>::new_zeroed_in(&alloc, 16).unwrap();
            let _b = unsafe { NativeArray::<u32>::new_uninit_in(&alloc, 4) }.unwrap();
            assert_eq!(stats.snapshot().outstanding(), 2);
        }
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.allocations, 1);
        assert_eq!(snapshot.zeroed_allocations, 1);
        assert_eq!(snapshot.frees, 2);
        assert_eq!(snapshot.bytes_requested, 32);
        assert_eq!(snapshot.outstanding(), 0);
    }

    #[test]
    fn explicit_allocator_is_kept_per_array() {
        let stats = Arc::new(AllocStats::default());
        let alloc = Allocator::platform().with_stats(Arc::clone(&stats));
        assert_eq!(Arc::strong_count(&stats), 2);

        let arr = NativeArray::<u8>::new_zeroed_in(&alloc, 4).unwrap();
        assert_eq!(Arc::strong_count(&stats), 3);
        assert!(arr.allocator().stats().is_some());
        drop(arr);
        assert_eq!(Arc::strong_count(&stats), 2);
    }

    #[test]
    fn global_arrays_borrow_the_global_allocator() {
        let arr = NativeArray::<u16>::new_zeroed(2).unwrap();
        assert!(std::ptr::eq(arr.allocator(), Allocator::global()));
        let (ptr, len, alloc) = arr.into_raw_parts();
        let arr = unsafe { NativeArray::from_raw_parts(ptr, len, alloc) };
        assert_eq!(arr.as_slice(), &[0, 0]);
    }

    #[test]
    fn clear_zeroes_contents() {
        let mut arr = NativeArray::<u8>::new_zeroed(6).unwrap();
        arr.iter_mut().for_each(|b| *b = 0xAB);
        arr.clear();
        assert_eq!(arr.as_bytes(), &[0; 6]);
    }

    #[test]
    fn cast_reinterprets_with_floor_length() {
        let mut eight = NativeArray::<u8>::new_zeroed(8).unwrap();
        assert_eq!(unsafe { eight.cast::<u16>() }.len(), 4);

        let mut five = NativeArray::<u8>::new_zeroed(5).unwrap();
        let base = five.as_ptr();
        let halves = unsafe { five.cast::<u16>() };
        assert_eq!(halves.len(), 2);
        assert_eq!(halves.as_ptr().cast::<u8>(), base);
    }

    #[test]
    fn cast_writes_are_visible_through_the_owner() {
        let mut arr = NativeArray::<u8>::new_zeroed(4).unwrap();
        {
            let mut words = arr.try_cast::<u32>().unwrap();
            words[0] = u32::from_ne_bytes([1, 2, 3, 4]);
        }
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn slice_aliases_the_owner() {
        let mut arr = NativeArray::<u32>::new_zeroed(8).unwrap();
        let base = arr.as_ptr();
        {
            let mut sub = arr.slice(2, 3);
            assert_eq!(sub.len(), 3);
            assert_eq!(sub.as_ptr(), base.wrapping_add(2));
            sub[0] = 42;
            sub[2] = 44;
        }
        assert_eq!(arr[2], 42);
        assert_eq!(arr[4], 44);
        assert_eq!(arr.slice_from(6).len(), 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn slice_past_end_panics() {
        let mut arr = NativeArray::<u8>::new_zeroed(4).unwrap();
        let _ = arr.slice(3, 2);
    }

    #[test]
    fn equality_is_identity() {
        let mut a = NativeArray::<u8>::new_zeroed(4).unwrap();
        let b = NativeArray::<u8>::new_zeroed(4).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
        assert_ne!(a, b);
        assert_eq!(a, a);

        let len = a.len();
        let whole = a.view();
        assert_eq!(whole.len(), len);
        let p = whole.as_ptr();
        let wrapped = unsafe { NativeView::wrap(p.cast_mut(), 4) };
        let longer = unsafe { NativeView::wrap(p.cast_mut(), 5) };
        assert_eq!(whole, wrapped);
        assert_ne!(whole, longer);
    }

    #[test]
    fn owner_equals_its_full_view() {
        let mut arr = NativeArray::<u16>::new_zeroed(3).unwrap();
        let (p, len) = (arr.as_mut_ptr(), arr.len());
        let view = unsafe { NativeView::wrap(p, len) };
        assert!(arr == view);
        assert!(view == arr);
    }

    #[test]
    fn hash_follows_the_pointer() {
        let a = NativeArray::<u8>::new_zeroed(4).unwrap();
        let b = NativeArray::<u8>::new_zeroed(4).unwrap();
        let mut set = HashSet::new();
        assert!(set.insert(a.as_ptr()));
        assert!(set.insert(b.as_ptr()));

        let mut arrays = HashSet::new();
        arrays.insert(a);
        arrays.insert(b);
        assert_eq!(arrays.len(), 2);
    }

    #[test]
    fn raw_parts_round_trip_keeps_ownership() {
        let stats = Arc::new(AllocStats::default());
        let alloc = Allocator::platform().with_stats(Arc::clone(&stats));
        let mut arr = NativeArray::<u32>::new_zeroed_in(&alloc, 3).unwrap();
        arr[1] = 7;

        let (ptr, len, alloc) = arr.into_raw_parts();
        assert_eq!(stats.snapshot().frees, 0);

        let arr = unsafe { NativeArray::from_raw_parts(ptr, len, alloc) };
        assert_eq!(arr.as_slice(), &[0, 7, 0]);
        drop(arr);
        assert_eq!(stats.snapshot().frees, 1);
    }

    #[test]
    fn iteration_visits_each_element_once() {
        let mut arr = NativeArray::<u8>::new_zeroed(4).unwrap();
        for (i, b) in (&mut arr).into_iter().enumerate() {
            *b = i as u8;
        }
        let seen: Vec<u8> = (&arr).into_iter().copied().collect();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(arr.iter().len(), 4);
    }

    #[test]
    fn arrays_move_across_threads() {
        let mut arr = NativeArray::<u64>::new_zeroed(2).unwrap();
        arr[0] = 5;
        let handle = std::thread::spawn(move || arr[0] + arr[1]);
        assert_eq!(handle.join().unwrap(), 5);
    }

    #[test]
    fn debug_shows_identity_only() {
        let arr = NativeArray::<u8>::empty();
        let text = format!("{arr:?}");
        assert!(text.contains("len: 0"));
    }
}
