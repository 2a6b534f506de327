//! # rawmem-core
//!
//! Low-level memory primitives for hot paths that work on raw buffers.
//!
//! ### Key Submodules:
//! - `alloc`: Hookable allocator, alignment math and allocation counters
//! - `compare`: Byte-exact buffer equality over SSE2/AVX2/AVX-512/NEON
//! - `array`: Owning fixed-length arrays and non-owning views over raw memory
//!
//! ### Guarantees:
//! - Every owned buffer is freed exactly once, through the allocator that
//!   produced it
//! - Views never free
//! - Buffer comparison reads nothing outside the compared region

pub mod alloc;
pub mod array;
pub mod compare;
pub mod error;

pub mod prelude {
    pub use crate::alloc::*;
    pub use crate::array::*;
    pub use crate::compare::{compare, compare_raw, compare_with, CompareStrategy};
    pub use crate::error::*;
}

pub use alloc::Allocator;
pub use array::{NativeArray, NativeView};
pub use error::{AllocError, CompareError};
