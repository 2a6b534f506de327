//! ## rawmem-core::array
//! **Fixed-length arrays of plain-old-data over raw buffers**
//!
//! - [`NativeArray`] owns its buffer and frees it through the [`Allocator`]
//!   that produced it, exactly once, on drop or [`NativeArray::dispose`].
//! - [`NativeView`] aliases memory it does not own (wrapped pointers,
//!   slices, casts). It has no drop glue, so an alias can never free.
//!
//! Both compare by identity: same start address and same length. Contents
//! play no part in equality.
//!
//! [`Allocator`]: crate::alloc::Allocator

mod iter;
mod native_array;
mod view;

use std::fmt;
use std::marker::PhantomData;
use std::mem;

use crate::error::AllocError;

pub use iter::{Iter, IterMut};
pub use native_array::NativeArray;
pub use view::NativeView;

/// Converts a caller-supplied length, rejecting negative values.
fn element_count<L>(len: L) -> Result<usize, AllocError>
where
    L: TryInto<usize> + fmt::Display + Copy,
{
    len.try_into()
        .map_err(|_| AllocError::InvalidLength(len.to_string()))
}

/// Byte size of `len` elements of `T`, bounded by `isize::MAX`.
fn byte_len<T>(len: usize) -> Result<usize, AllocError> {
    let element_size = mem::size_of::<T>();
    len.checked_mul(element_size)
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .ok_or(AllocError::SizeOverflow {
            length: len,
            element_size,
        })
}

/// Element count of the same bytes reinterpreted as `U`. A trailing
/// partial element is dropped.
fn cast_len<T, U>(len: usize) -> usize {
    let () = NonZeroSized::<U>::CHECK;
    len * mem::size_of::<T>() / mem::size_of::<U>()
}

#[track_caller]
fn check_range(start: usize, len: usize, bound: usize) {
    let end = start.checked_add(len);
    assert!(
        matches!(end, Some(end) if end <= bound),
        "range {start}..{start}+{len} out of bounds for length {bound}"
    );
}

struct NonZeroSized<U>(PhantomData<U>);

impl<U> NonZeroSized<U> {
    const CHECK: () = assert!(
        mem::size_of::<U>() > 0,
        "cannot reinterpret as a zero-sized element type"
    );
}
