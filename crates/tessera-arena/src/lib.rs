//! Bump-pointer arenas for scratch and placement allocation.
//!
//! An arena owns one contiguous byte buffer and satisfies each request by
//! advancing a cursor through it. Individual allocations are never freed;
//! the whole buffer is rewound (and zeroed) with
//! [`BumpArena::clear`]. Capacity is fixed for the lifetime of the arena.
//!
//! # Architecture
//!
//! ```text
//! BumpArena (shared allocation core, sealed trait)
//! ├── Arena           heap buffer, sized at runtime, movable
//! └── StaticArena<N>  inline [u8; N] buffer, sized at compile time
//! ```
//!
//! Every allocation is aligned to [`MAX_ALIGN`], the largest alignment of
//! any fundamental type on the target. A request either succeeds at an
//! aligned address or fails outright with `None`; running out of arena
//! space is an expected, recoverable condition.
//!
//! # Lifetimes
//!
//! Allocation takes `&self` and hands out references bound to that borrow,
//! so the borrow checker rejects `clear`, drop or relocation of the arena
//! while anything carved from it is still in use. The raw pointers returned
//! by [`BumpArena::malloc`] are outside that protection.
//!
//! The arena never runs destructors. Values placed with
//! [`BumpArena::make`] are leaked unless the caller destroys them with
//! [`BumpArena::destroy`] before the buffer is cleared or dropped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod base;
pub mod error;
pub mod heap;
mod raw;
pub mod static_arena;

// Public re-exports for the primary API surface.
pub use base::BumpArena;
pub use error::ArenaError;
pub use heap::Arena;
pub use raw::{padding_for, MAX_ALIGN};
pub use static_arena::StaticArena;
