//! The allocation core shared by every arena.
//!
//! [`BumpArena`] is a sealed trait: the concrete arenas only describe where
//! their buffer lives, and all bump-pointer bookkeeping is implemented once
//! here as provided methods.

use std::mem;
use std::ptr::{self, NonNull};

use crate::raw::{self, MAX_ALIGN};

pub(crate) mod sealed {
    use std::cell::Cell;
    use std::ptr::NonNull;

    /// Cursor bookkeeping, stored as byte offsets from the buffer start.
    ///
    /// Invariant: `previous <= cursor <= capacity`.
    #[derive(Debug, Default)]
    pub struct BumpState {
        /// First unused byte.
        pub(crate) cursor: Cell<usize>,
        /// Start of the most recent allocation.
        pub(crate) previous: Cell<usize>,
    }

    impl BumpState {
        pub(crate) fn rewind(&self) {
            self.cursor.set(0);
            self.previous.set(0);
        }
    }

    /// Where an arena keeps its bytes. Implemented only inside this crate.
    pub trait Storage {
        /// Start and length of the backing buffer, `None` when unbound.
        fn region(&self) -> Option<(NonNull<u8>, usize)>;
        /// The arena's cursor state.
        fn state(&self) -> &BumpState;
    }
}

/// Bump-pointer allocation over a fixed buffer.
///
/// Implemented by [`Arena`](crate::Arena) and
/// [`StaticArena`](crate::StaticArena). All addresses returned are aligned
/// to [`MAX_ALIGN`]. Allocation never reuses space; only
/// [`clear`](BumpArena::clear) makes the buffer available again.
pub trait BumpArena: sealed::Storage {
    /// Total size of the backing buffer in bytes. Zero when unbound.
    fn capacity(&self) -> usize {
        self.region().map_or(0, |(_, len)| len)
    }

    /// Bytes consumed so far, including alignment padding.
    fn used(&self) -> usize {
        self.state().cursor.get()
    }

    /// Bytes between the cursor and the end of the buffer.
    fn remaining(&self) -> usize {
        self.capacity() - self.used()
    }

    /// Reserve `size` bytes aligned to [`MAX_ALIGN`].
    ///
    /// Returns `None` when `size == 0`, when the arena is unbound, or when
    /// `size` plus the padding needed to align the cursor does not fit in
    /// [`remaining`](BumpArena::remaining). A request that would only fit
    /// unaligned is refused. On success the cursor moves past the padding
    /// and the reserved bytes.
    ///
    /// The pointer is valid until the arena is cleared, dropped, or (for
    /// [`StaticArena`](crate::StaticArena)) moved.
    fn malloc(&self, size: usize) -> Option<NonNull<u8>> {
        let (base, _) = self.region()?;
        let remaining = self.remaining();
        if size == 0 || size > remaining {
            return None;
        }

        let state = self.state();
        let cursor = state.cursor.get();
        let padding = raw::padding_for(base.as_ptr() as usize + cursor);
        if size + padding > remaining {
            return None;
        }

        let start = cursor + padding;
        state.previous.set(start);
        state.cursor.set(start + size);
        // SAFETY: start + size <= capacity was checked above.
        Some(unsafe { raw::offset(base, start) })
    }

    /// Reserve `size` bytes and borrow them as a slice.
    ///
    /// The bytes are zero unless written earlier through a raw pointer
    /// obtained from the same cycle (space is never handed out twice).
    #[allow(clippy::mut_from_ref)]
    fn alloc_bytes(&self, size: usize) -> Option<&mut [u8]> {
        let ptr = self.malloc(size)?;
        // SAFETY: the range was just reserved, so no other reference covers
        // it; the buffer is initialised at construction and outlives `&self`
        // because clearing or dropping needs `&mut self` or ownership.
        Some(unsafe { raw::bytes_mut(ptr, size) })
    }

    /// Place `value` in the arena.
    ///
    /// Returns `None` (dropping `value`) when the arena cannot fit
    /// `size_of::<T>()` bytes; zero-sized types always fail, like a zero
    /// byte [`malloc`](BumpArena::malloc). The arena never runs `T`'s
    /// destructor; see [`destroy`](BumpArena::destroy).
    #[allow(clippy::mut_from_ref)]
    fn make<T>(&self, value: T) -> Option<&mut T> {
        self.try_make(value).ok()
    }

    /// Like [`make`](BumpArena::make), but hands `value` back on failure.
    #[allow(clippy::mut_from_ref)]
    fn try_make<T>(&self, value: T) -> Result<&mut T, T> {
        const {
            assert!(
                mem::align_of::<T>() <= MAX_ALIGN,
                "over-aligned types cannot be placed in an arena"
            )
        };
        match self.malloc(mem::size_of::<T>()) {
            // SAFETY: `ptr` is MAX_ALIGN-aligned (>= align_of::<T>), spans
            // size_of::<T>() freshly reserved bytes, and lives as long as
            // `&self` for the reasons given in `alloc_bytes`.
            Some(ptr) => Ok(unsafe { raw::write_value(ptr.cast::<T>(), value) }),
            None => Err(value),
        }
    }

    /// Reserve space for a `T`, then construct it with `f`.
    ///
    /// `f` is not called when the reservation fails.
    #[allow(clippy::mut_from_ref)]
    fn make_with<T, F>(&self, f: F) -> Option<&mut T>
    where
        F: FnOnce() -> T,
    {
        const {
            assert!(
                mem::align_of::<T>() <= MAX_ALIGN,
                "over-aligned types cannot be placed in an arena"
            )
        };
        let ptr = self.malloc(mem::size_of::<T>())?;
        // SAFETY: as in `try_make`.
        Some(unsafe { raw::write_value(ptr.cast::<T>(), f()) })
    }

    /// Run the destructor of a value previously placed with
    /// [`make`](BumpArena::make). The bytes stay reserved.
    ///
    /// # Safety
    ///
    /// `value` must have been returned by this arena, must not have been
    /// destroyed already, and must not be used afterwards.
    unsafe fn destroy<T>(&self, value: &mut T) {
        // SAFETY: forwarded from the caller contract.
        unsafe { ptr::drop_in_place(value as *mut T) }
    }

    /// Start of the most recent allocation, `None` if nothing was allocated
    /// since construction or the last [`clear`](BumpArena::clear).
    fn last_allocation(&self) -> Option<NonNull<u8>> {
        if self.used() == 0 {
            return None;
        }
        let (base, _) = self.region()?;
        // SAFETY: previous <= cursor <= capacity.
        Some(unsafe { raw::offset(base, self.state().previous.get()) })
    }

    /// Zero every byte of the buffer and rewind the cursor to the start.
    ///
    /// Destructors of values still resident in the arena are NOT run. Destroy
    /// them first, or only clear arenas holding types without drop glue.
    fn clear(&mut self) {
        if let Some((base, len)) = self.region() {
            // SAFETY: `&mut self` proves no allocation is still borrowed.
            unsafe { raw::zero(base, len) };
        }
        self.state().rewind();
    }
}

/// Read-only view of the cursor pair, for `Debug` output.
pub(crate) fn cursor_pair(state: &sealed::BumpState) -> (usize, usize) {
    (state.previous.get(), state.cursor.get())
}
