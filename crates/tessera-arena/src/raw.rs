//! Low-level primitives for arena memory operations.
//!
//! Everything that touches raw bytes lives here: the alignment constant,
//! the padding computation, both backing buffers, and the helpers that turn
//! a reserved address into a typed reference. Each `unsafe` block carries a
//! mandatory `// SAFETY:` comment.

use std::alloc::{self, Layout};
use std::cell::UnsafeCell;
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::ArenaError;

/// Union of the fundamental scalar types; its alignment is the largest
/// natural alignment the platform uses for any of them.
#[repr(C)]
#[allow(dead_code)]
union MaxAligned {
    int: u64,
    wide: u128,
    float: f64,
    word: usize,
    ptr: *const u8,
}

/// Alignment of every address handed out by an arena.
///
/// The Rust analogue of `alignof(max_align_t)`: 16 on x86_64 and aarch64.
pub const MAX_ALIGN: usize = mem::align_of::<MaxAligned>();

/// Bytes needed to round `addr` up to the next multiple of [`MAX_ALIGN`].
///
/// Zero when `addr` is already aligned.
#[inline]
pub fn padding_for(addr: usize) -> usize {
    let modulo = addr % MAX_ALIGN;
    if modulo == 0 {
        0
    } else {
        MAX_ALIGN - modulo
    }
}

/// Exclusively owned, zero-initialised heap bytes aligned to [`MAX_ALIGN`].
pub(crate) struct HeapBuffer {
    ptr: NonNull<u8>,
    len: usize,
}

// SAFETY: HeapBuffer uniquely owns its allocation, like Box<[u8]>.
unsafe impl Send for HeapBuffer {}

impl HeapBuffer {
    /// Allocate `len` zeroed bytes. `len` must be non-zero.
    pub(crate) fn zeroed(len: usize) -> Result<Self, ArenaError> {
        debug_assert!(len > 0, "zero-length heap buffers are never allocated");
        let layout = Layout::from_size_align(len, MAX_ALIGN)
            .map_err(|_| ArenaError::LayoutOverflow { capacity: len })?;
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(ArenaError::OutOfMemory { capacity: len })?;
        Ok(Self { ptr, len })
    }

    pub(crate) fn as_non_null(&self) -> NonNull<u8> {
        self.ptr
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl Drop for HeapBuffer {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `alloc_zeroed` with exactly this layout,
        // which `zeroed` already validated, and is freed only here.
        unsafe {
            alloc::dealloc(
                self.ptr.as_ptr(),
                Layout::from_size_align_unchecked(self.len, MAX_ALIGN),
            );
        }
    }
}

/// Zero-initialised inline bytes that may be written through `&self`.
pub(crate) struct InlineBuffer<const N: usize> {
    bytes: UnsafeCell<[u8; N]>,
}

impl<const N: usize> InlineBuffer<N> {
    pub(crate) fn zeroed() -> Self {
        Self {
            bytes: UnsafeCell::new([0; N]),
        }
    }

    pub(crate) fn as_non_null(&self) -> Option<NonNull<u8>> {
        NonNull::new(self.bytes.get().cast::<u8>())
    }
}

/// Address `count` bytes past `base`.
///
/// # Safety
///
/// `count` must not exceed the length of the buffer starting at `base`.
#[inline]
pub(crate) unsafe fn offset(base: NonNull<u8>, count: usize) -> NonNull<u8> {
    // SAFETY: in bounds per the caller contract, so the result is non-null.
    unsafe { NonNull::new_unchecked(base.as_ptr().add(count)) }
}

/// Reborrow `len` reserved bytes at `ptr` as a mutable slice.
///
/// # Safety
///
/// The range must lie inside a live arena buffer, be initialised, and be
/// disjoint from every other live reference for the chosen lifetime.
#[inline]
pub(crate) unsafe fn bytes_mut<'a>(ptr: NonNull<u8>, len: usize) -> &'a mut [u8] {
    // SAFETY: forwarded from the caller contract.
    unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), len) }
}

/// Move `value` into reserved storage and return a reference to it.
///
/// # Safety
///
/// `ptr` must be aligned for `T`, point at `size_of::<T>()` reserved bytes
/// inside a live arena buffer, and not alias any other live reference for
/// the chosen lifetime.
#[inline]
pub(crate) unsafe fn write_value<'a, T>(ptr: NonNull<T>, value: T) -> &'a mut T {
    // SAFETY: forwarded from the caller contract.
    unsafe {
        ptr.as_ptr().write(value);
        &mut *ptr.as_ptr()
    }
}

/// Overwrite `len` bytes starting at `base` with zero.
///
/// # Safety
///
/// `base..base + len` must be a live buffer with no outstanding references.
#[inline]
pub(crate) unsafe fn zero(base: NonNull<u8>, len: usize) {
    // SAFETY: forwarded from the caller contract.
    unsafe { ptr::write_bytes(base.as_ptr(), 0, len) }
}
