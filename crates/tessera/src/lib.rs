//! Tessera: small generic building blocks for numeric Rust code.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Tessera sub-crates. The pieces are independent of each other; depend
//! on a single sub-crate if that is all you need.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! // Scratch allocation from a bump arena.
//! let arena = Arena::new(64);
//! let answer = arena.make(42i32).unwrap();
//! assert_eq!(*answer, 42);
//! assert_eq!(arena.remaining(), 60);
//!
//! // A vector that never allocates.
//! let mut v: StaticVec<i32, 3> = StaticVec::try_from([1, 2, 3]).unwrap();
//! assert!(v.insert(1, 99).is_err());
//! assert_eq!(v, [1, 2, 3]);
//!
//! // Derivative of x^3 at x = 2.
//! let x = Dual::variable(2.0_f64);
//! assert_eq!((x * x * x).epsilon(), 12.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `tessera-arena` | `BumpArena`, heap `Arena`, inline `StaticArena<N>` |
//! | [`vec`] | `tessera-vec` | `StaticVec<T, N>` and its owning iterator |
//! | [`span`] | `tessera-span` | `SharedSpan<T>` reference-counted views |
//! | [`dual`] | `tessera-dual` | `Dual<T>` forward-mode differentiation |
//! | [`ndarray`] | `tessera-ndarray` | `NdArray<T>` and the `.npy` codec |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Bump-pointer arenas (`tessera-arena`).
///
/// [`arena::Arena`] sizes its buffer at runtime on the heap,
/// [`arena::StaticArena`] keeps it inline. Both allocate through the
/// [`arena::BumpArena`] trait.
pub use tessera_arena as arena;

/// Fixed-capacity inline vector (`tessera-vec`).
pub use tessera_vec as vec;

/// Shared sub-range views (`tessera-span`).
pub use tessera_span as span;

/// Dual numbers for automatic differentiation (`tessera-dual`).
///
/// Also exports the [`dual::Real`] trait that abstracts over `f32` and
/// `f64`.
pub use tessera_dual as dual;

/// N-dimensional arrays and `.npy` I/O (`tessera-ndarray`).
///
/// Use [`ndarray::npy`] directly to read or write raw `.npy` streams
/// without building an [`ndarray::NdArray`].
pub use tessera_ndarray as ndarray;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Arenas
    pub use tessera_arena::{Arena, BumpArena, StaticArena, MAX_ALIGN};

    // Containers
    pub use tessera_span::SharedSpan;
    pub use tessera_vec::{StaticVec, VecError};

    // Differentiation
    pub use tessera_dual::{Dual, Real};

    // Arrays
    pub use tessera_ndarray::{NdArray, NdError, NpyConfig, Order};
}
