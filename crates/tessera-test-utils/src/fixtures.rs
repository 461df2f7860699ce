//! Lifetime-accounting element types.
//!
//! - [`LifeCounter`] / [`Tracked`]: counts constructions (including clones)
//!   and drops through a shared counter.
//! - [`CountedDefault`]: counts `Default` constructions per test thread.
//! - [`CloneFuse`] / [`Fused`]: a tracked value whose clone panics once a
//!   budget is spent, for exercising unwind paths.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Counts {
    constructions: AtomicUsize,
    drops: AtomicUsize,
}

/// Shared construction/drop counter. Cloning shares the same counts.
#[derive(Clone, Default)]
pub struct LifeCounter {
    counts: Arc<Counts>,
}

impl LifeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a new tracked value.
    pub fn tracked(&self, value: i32) -> Tracked {
        self.counts.constructions.fetch_add(1, Ordering::SeqCst);
        Tracked {
            value,
            counter: self.clone(),
        }
    }

    pub fn constructions(&self) -> usize {
        self.counts.constructions.load(Ordering::SeqCst)
    }

    pub fn drops(&self) -> usize {
        self.counts.drops.load(Ordering::SeqCst)
    }

    /// Values constructed but not yet dropped.
    pub fn alive(&self) -> usize {
        self.constructions() - self.drops()
    }
}

impl fmt::Debug for LifeCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifeCounter")
            .field("constructions", &self.constructions())
            .field("drops", &self.drops())
            .finish()
    }
}

/// A value registered with a [`LifeCounter`]. Equality compares `value` only.
pub struct Tracked {
    pub value: i32,
    counter: LifeCounter,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counter.tracked(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counter.counts.drops.fetch_add(1, Ordering::SeqCst);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

thread_local! {
    static DEFAULTS: Cell<usize> = const { Cell::new(0) };
}

/// Counts `Default::default()` calls on the current thread.
///
/// Each test runs on its own thread, so counts never leak between tests.
#[derive(Clone, Debug, PartialEq)]
pub struct CountedDefault(pub u32);

impl CountedDefault {
    /// Default constructions on this thread so far.
    pub fn constructed() -> usize {
        DEFAULTS.with(Cell::get)
    }
}

impl Default for CountedDefault {
    fn default() -> Self {
        DEFAULTS.with(|c| c.set(c.get() + 1));
        CountedDefault(0)
    }
}

/// Budget of successful clones shared by every [`Fused`] value made from it.
#[derive(Clone)]
pub struct CloneFuse {
    remaining: Arc<AtomicUsize>,
    counter: LifeCounter,
}

impl CloneFuse {
    /// Allow `clones` clones before the next one panics.
    pub fn new(clones: usize) -> Self {
        Self {
            remaining: Arc::new(AtomicUsize::new(clones)),
            counter: LifeCounter::new(),
        }
    }

    pub fn item(&self, value: i32) -> Fused {
        Fused {
            inner: self.counter.tracked(value),
            fuse: self.clone(),
        }
    }

    /// The counter tracking every value created through this fuse.
    pub fn counter(&self) -> &LifeCounter {
        &self.counter
    }
}

/// Tracked value whose `clone` panics once its [`CloneFuse`] is spent.
pub struct Fused {
    inner: Tracked,
    fuse: CloneFuse,
}

impl Fused {
    pub fn value(&self) -> i32 {
        self.inner.value
    }
}

impl Clone for Fused {
    fn clone(&self) -> Self {
        let left = self.fuse.remaining.load(Ordering::SeqCst);
        if left == 0 {
            panic!("clone fuse blown");
        }
        self.fuse.remaining.store(left - 1, Ordering::SeqCst);
        Fused {
            inner: self.inner.clone(),
            fuse: self.fuse.clone(),
        }
    }
}

impl PartialEq for Fused {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl fmt::Debug for Fused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fused({})", self.inner.value)
    }
}
