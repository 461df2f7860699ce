//! Heap-backed arena with a runtime capacity.
//!
//! [`Arena`] owns a single heap buffer sized at construction. It can be
//! moved freely (the buffer stays put), but never copied: two arenas sharing
//! one buffer would free it twice.
//!
//! ```compile_fail
//! use tessera_arena::Arena;
//!
//! let arena = Arena::new(64);
//! let copy = arena.clone();
//! ```

use std::fmt;
use std::mem;
use std::ptr::NonNull;

use crate::base::sealed::{BumpState, Storage};
use crate::base::{self, BumpArena};
use crate::error::ArenaError;
use crate::raw::HeapBuffer;

/// Bump arena over an owned heap buffer.
///
/// A capacity of zero produces an unbound arena: no buffer is allocated,
/// [`capacity`](BumpArena::capacity) and
/// [`remaining`](BumpArena::remaining) report zero and every allocation
/// fails. [`Arena::default`] is unbound.
///
/// # Example
///
/// ```
/// use tessera_arena::{Arena, BumpArena};
///
/// let arena = Arena::new(64);
/// let answer = arena.make(42i32).unwrap();
/// assert_eq!(*answer, 42);
/// assert_eq!(arena.remaining(), 64 - std::mem::size_of::<i32>());
/// ```
#[derive(Default)]
pub struct Arena {
    /// Backing storage. `None` while unbound.
    buffer: Option<HeapBuffer>,
    state: BumpState,
}

impl Arena {
    /// Create an arena with `capacity` bytes of zeroed heap storage.
    ///
    /// # Panics
    ///
    /// Panics if the buffer cannot be allocated; see [`Arena::try_new`].
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(arena) => arena,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create an arena, reporting allocation failure instead of panicking.
    pub fn try_new(capacity: usize) -> Result<Self, ArenaError> {
        let buffer = if capacity > 0 {
            Some(HeapBuffer::zeroed(capacity)?)
        } else {
            None
        };
        Ok(Self {
            buffer,
            state: BumpState::default(),
        })
    }

    /// Move the buffer and its full allocation state out of `self`,
    /// leaving `self` unbound.
    ///
    /// The returned arena reports the same capacity, remaining bytes and
    /// last allocation that `self` did.
    pub fn take(&mut self) -> Arena {
        mem::take(self)
    }

    /// Whether the arena owns a buffer.
    pub fn is_bound(&self) -> bool {
        self.buffer.is_some()
    }
}

impl Storage for Arena {
    fn region(&self) -> Option<(NonNull<u8>, usize)> {
        self.buffer
            .as_ref()
            .map(|buf| (buf.as_non_null(), buf.len()))
    }

    fn state(&self) -> &BumpState {
        &self.state
    }
}

impl BumpArena for Arena {}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (previous, cursor) = base::cursor_pair(&self.state);
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("cursor", &cursor)
            .field("previous", &previous)
            .finish()
    }
}
