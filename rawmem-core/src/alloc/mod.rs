//! ## rawmem-core::alloc
//! **Allocator indirection, alignment math and allocation statistics**
//!
//! ### Key Submodules:
//! - `align/`: Power-of-two size rounding
//! - `allocator/`: Hookable allocate/allocate-zeroed/free with platform fallback
//! - `stats/`: Allocation counters
//!
//! Every buffer handed out by an [`Allocator`] must be returned to the same
//! allocator. Nothing here is resized in place; growth is allocate, copy and
//! free, done by the caller.

pub mod align;
pub mod allocator;
pub mod stats;

pub use align::{align, align_down, align_up, checked_align_down, checked_align_up};
pub use allocator::{AllocHooks, AllocateFn, Allocator, FreeFn, MIN_HEAP_ALIGN};
pub use stats::{AllocStats, AllocStatsSnapshot};
