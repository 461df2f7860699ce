//! Test utilities for Tessera development.
//!
//! Provides element types that keep count of their own constructions and
//! drops, so container and arena tests can assert that every value is
//! destroyed exactly once and that failed operations build nothing.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CloneFuse, CountedDefault, Fused, LifeCounter, Tracked};
