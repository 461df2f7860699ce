//! Fixed-capacity arena with inline storage.
//!
//! [`StaticArena<N>`] carries its `N`-byte buffer inside the arena value
//! itself, so it needs no heap at all. Because the buffer address is the
//! arena's own address, relocating the arena would move every value placed
//! in it. Two rules keep that sound:
//!
//! - The arena is neither `Clone` nor `Copy`.
//! - Borrowed allocations pin the arena: moving it while one is alive is a
//!   compile error.
//!
//! ```compile_fail
//! use tessera_arena::{BumpArena, StaticArena};
//!
//! let arena = StaticArena::<64>::new();
//! let value = arena.make(7u32).unwrap();
//! let moved = arena; // cannot move out of `arena` while borrowed
//! assert_eq!(*value, 7);
//! ```
//!
//! Raw pointers from [`BumpArena::malloc`] are not tracked by the borrow
//! checker and dangle once the arena moves.

use std::fmt;
use std::ptr::NonNull;

use crate::base::sealed::{BumpState, Storage};
use crate::base::{self, BumpArena};
use crate::raw::InlineBuffer;

/// Bump arena over an inline buffer of exactly `N` bytes.
///
/// The buffer is zeroed at construction. `N == 0` behaves like an unbound
/// heap arena: every allocation fails.
///
/// The arena is laid out with the buffer at its start and aligned to 16
/// bytes, so on every mainstream target the first allocation needs no
/// padding, matching a freshly allocated heap buffer.
///
/// # Example
///
/// ```
/// use tessera_arena::{BumpArena, StaticArena};
///
/// let arena = StaticArena::<16>::new();
/// assert!(arena.malloc(10).is_some());
/// assert!(arena.malloc(10).is_none());
/// ```
#[repr(C, align(16))]
pub struct StaticArena<const N: usize> {
    /// Kept first so the buffer shares the arena's own address.
    buffer: InlineBuffer<N>,
    state: BumpState,
}

impl<const N: usize> StaticArena<N> {
    /// Total capacity in bytes, known at compile time.
    pub const CAPACITY: usize = N;

    /// Create an empty arena with a zeroed buffer.
    pub fn new() -> Self {
        Self {
            buffer: InlineBuffer::zeroed(),
            state: BumpState::default(),
        }
    }
}

impl<const N: usize> Default for StaticArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Storage for StaticArena<N> {
    fn region(&self) -> Option<(NonNull<u8>, usize)> {
        if N == 0 {
            return None;
        }
        self.buffer.as_non_null().map(|ptr| (ptr, N))
    }

    fn state(&self) -> &BumpState {
        &self.state
    }
}

impl<const N: usize> BumpArena for StaticArena<N> {}

impl<const N: usize> fmt::Debug for StaticArena<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (previous, cursor) = base::cursor_pair(&self.state);
        f.debug_struct("StaticArena")
            .field("capacity", &N)
            .field("cursor", &cursor)
            .field("previous", &previous)
            .finish()
    }
}
