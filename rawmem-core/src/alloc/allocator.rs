//! ## rawmem-core::alloc::allocator
//! **Hookable raw allocator with platform-heap fallback**
//!
//! An [`Allocator`] is an explicit context value: three optional hooks plus an
//! optional statistics collector. Arrays remember the allocator that produced
//! their buffer and free through it.
//!
//! A single process-wide allocator can be installed once with
//! [`Allocator::install_global`]; after that (or after the first call to
//! [`Allocator::global`]) it is immutable.
//!
//! Fallback order for zeroed allocation:
//! 1. `allocate_zeroed` hook
//! 2. `allocate` hook followed by an explicit zero fill
//! 3. platform `calloc`

use std::ptr::{self, NonNull};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, trace, warn};

use super::stats::AllocStats;
use crate::error::AllocError;

/// Allocation hook: returns `byte_count` bytes or null on exhaustion.
pub type AllocateFn = unsafe fn(byte_count: usize) -> *mut u8;

/// Free hook: releases a pointer obtained from an allocation hook.
pub type FreeFn = unsafe fn(ptr: *mut u8);

/// Alignment guaranteed by the platform heap (`malloc`/`calloc`).
///
/// Hooks must provide at least this alignment as well.
pub const MIN_HEAP_ALIGN: usize = 2 * std::mem::size_of::<usize>();

static GLOBAL: OnceCell<Allocator> = OnceCell::new();

/// Optional replacements for the platform heap. Any subset may be set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocHooks {
    pub allocate: Option<AllocateFn>,
    pub allocate_zeroed: Option<AllocateFn>,
    pub free: Option<FreeFn>,
}

impl AllocHooks {
    pub fn is_empty(&self) -> bool {
        self.allocate.is_none() && self.allocate_zeroed.is_none() && self.free.is_none()
    }
}

/// Raw byte allocator routed through [`AllocHooks`] or the platform heap.
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    hooks: AllocHooks,
    stats: Option<Arc<AllocStats>>,
}

impl Allocator {
    /// Allocator backed solely by the platform heap.
    pub fn platform() -> Self {
        Self::default()
    }

    /// Allocator that routes through `hooks`, falling back to the platform
    /// heap for every slot left empty.
    ///
    /// # Safety
    ///
    /// Each allocation hook must return either null or a pointer to at least
    /// `byte_count` writable bytes, aligned to [`MIN_HEAP_ALIGN`] and not
    /// aliased by anything else. The effective free routine (the `free` hook,
    /// or platform `free` when it is unset) must accept every pointer the
    /// effective allocation routines return.
    pub unsafe fn with_hooks(hooks: AllocHooks) -> Self {
        Self { hooks, stats: None }
    }

    /// Attaches a statistics collector shared by all clones of this allocator.
    pub fn with_stats(mut self, stats: Arc<AllocStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn hooks(&self) -> &AllocHooks {
        &self.hooks
    }

    pub fn stats(&self) -> Option<&Arc<AllocStats>> {
        self.stats.as_ref()
    }

    /// Installs `hooks` as the process-wide allocator.
    ///
    /// # Safety
    ///
    /// Same contract as [`Allocator::with_hooks`].
    pub unsafe fn install(hooks: AllocHooks) -> Result<(), AllocError> {
        Self::install_global(Self::with_hooks(hooks))
    }

    /// Installs the process-wide allocator.
    ///
    /// Succeeds only once, and only before [`Allocator::global`] was first
    /// called; otherwise returns [`AllocError::AlreadyInstalled`].
    pub fn install_global(allocator: Allocator) -> Result<(), AllocError> {
        let custom = !allocator.hooks.is_empty();
        GLOBAL
            .set(allocator)
            .map_err(|_| AllocError::AlreadyInstalled)?;
        debug!(custom_hooks = custom, "process-wide allocator installed");
        Ok(())
    }

    /// Whether the process-wide allocator is already fixed, by an install or
    /// by a call to [`Allocator::global`].
    pub fn is_global_set() -> bool {
        GLOBAL.get().is_some()
    }

    /// The process-wide allocator: the installed one, or the platform heap.
    pub fn global() -> &'static Allocator {
        GLOBAL.get_or_init(|| {
            debug!("no allocator installed, using platform heap");
            Allocator::platform()
        })
    }

    /// Returns `byte_count` bytes of uninitialised memory.
    pub fn allocate(&self, byte_count: usize) -> Result<NonNull<u8>, AllocError> {
        let raw = match self.hooks.allocate {
            // SAFETY: hook contract accepted in `with_hooks`.
            Some(hook) => unsafe { hook(byte_count) },
            // SAFETY: malloc accepts any size; zero is bumped to one so a
            // successful call never yields null.
            None => unsafe { libc::malloc(byte_count.max(1)).cast::<u8>() },
        };
        self.finish(raw, byte_count, false)
    }

    /// Returns `byte_count` bytes of zeroed memory.
    pub fn allocate_zeroed(&self, byte_count: usize) -> Result<NonNull<u8>, AllocError> {
        let raw = if let Some(hook) = self.hooks.allocate_zeroed {
            // SAFETY: hook contract accepted in `with_hooks`.
            unsafe { hook(byte_count) }
        } else if let Some(hook) = self.hooks.allocate {
            // SAFETY: hook contract accepted in `with_hooks`; a non-null
            // result is valid for `byte_count` bytes of writes.
            unsafe {
                let raw = hook(byte_count);
                if !raw.is_null() {
                    ptr::write_bytes(raw, 0, byte_count);
                }
                raw
            }
        } else {
            // SAFETY: calloc accepts any size and zero-fills the result.
            unsafe { libc::calloc(1, byte_count.max(1)).cast::<u8>() }
        };
        self.finish(raw, byte_count, true)
    }

    /// Releases memory obtained from [`allocate`](Self::allocate) or
    /// [`allocate_zeroed`](Self::allocate_zeroed).
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator (or a clone of it) and must not
    /// have been freed already. No reference into the buffer may be used
    /// afterwards.
    pub unsafe fn free(&self, ptr: NonNull<u8>) {
        match self.hooks.free {
            Some(hook) => hook(ptr.as_ptr()),
            None => libc::free(ptr.as_ptr().cast::<libc::c_void>()),
        }
        if let Some(stats) = &self.stats {
            stats.record_free();
        }
        trace!(ptr = ?ptr, "freed");
    }

    fn finish(
        &self,
        raw: *mut u8,
        byte_count: usize,
        zeroed: bool,
    ) -> Result<NonNull<u8>, AllocError> {
        match NonNull::new(raw) {
            Some(ptr) => {
                if let Some(stats) = &self.stats {
                    stats.record_allocation(byte_count, zeroed);
                }
                trace!(bytes = byte_count, zeroed, ptr = ?ptr, "allocated");
                Ok(ptr)
            }
            None => {
                if let Some(stats) = &self.stats {
                    stats.record_failure();
                }
                warn!(bytes = byte_count, zeroed, "allocation failed");
                Err(AllocError::OutOfMemory {
                    requested: byte_count,
                })
            }
        }
    }
}
