//! Fixed-capacity vector with inline storage.
//!
//! [`StaticVec<T, N>`] offers the usual vector operations over an inline
//! array of `N` slots. It never allocates and never grows: any operation
//! that would take the length past `N` is refused up front with
//! [`VecError::CapacityExceeded`] and leaves the vector untouched.
//!
//! Element lifetimes are managed by the vector: slots `[0, len)` hold live
//! values, the rest are uninitialised. Values are built in place on push,
//! insert and growth, and dropped on pop, erase, truncation, `clear` and
//! when the vector itself is dropped.
//!
//! If building an element panics part way through a bulk operation (a
//! `Clone` or `Default` impl unwinding), every element created by that
//! operation is dropped again, front to back, before the panic continues,
//! so the vector is left as it was before the call.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod iter;
pub mod static_vec;

pub use error::VecError;
pub use iter::IntoIter;
pub use static_vec::StaticVec;
