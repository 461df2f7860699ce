//! Shared, immutable views over a single element buffer.
//!
//! A [`SharedSpan<T>`] owns its data through an [`Arc<[T]>`](std::sync::Arc)
//! and remembers the `[begin, end)` window it exposes. Sub-views made with
//! [`first`](SharedSpan::first), [`last`](SharedSpan::last) or
//! [`subspan`](SharedSpan::subspan) share the same allocation, so the data
//! lives until the last view referencing it is dropped. Views are never
//! invalidated by other views.
//!
//! The window is stored as indices rather than a pointer, so a span can be
//! cloned, sent to another thread, and narrowed without any `unsafe`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod span;

pub use span::SharedSpan;
