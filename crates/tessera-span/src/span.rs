//! The [`SharedSpan`] view type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::Deref;
use std::sync::Arc;

/// A window `[begin, end)` into reference-counted storage.
///
/// Element access, iteration and the rest of the slice API come through
/// `Deref<Target = [T]>`. [`SharedSpan::first`] and [`SharedSpan::last`]
/// take a count and return sub-views, shadowing the slice methods of the
/// same name; reach those through [`as_slice`](SharedSpan::as_slice).
///
/// # Example
///
/// ```
/// use tessera_span::SharedSpan;
///
/// let span = SharedSpan::from(vec![0, 1, 2, 3, 4, 5, 6, 7]);
/// let middle = span.subspan(2, 4);
/// assert_eq!(&*middle, &[2, 3, 4, 5]);
/// assert_eq!(span.use_count(), 2);
/// ```
pub struct SharedSpan<T> {
    data: Arc<[T]>,
    begin: usize,
    end: usize,
}

impl<T> SharedSpan<T> {
    /// A span over all of `data`.
    pub fn new(data: Arc<[T]>) -> Self {
        let end = data.len();
        Self {
            data,
            begin: 0,
            end,
        }
    }

    /// The first `count` elements of this view, or the whole view if it is
    /// shorter.
    pub fn first(&self, count: usize) -> Self {
        self.subspan(0, count)
    }

    /// The last `count` elements of this view, or the whole view if it is
    /// shorter.
    pub fn last(&self, count: usize) -> Self {
        let count = count.min(self.len());
        self.subspan(self.len() - count, count)
    }

    /// Up to `count` elements starting `offset` elements into this view.
    ///
    /// Both arguments are clamped to the view: an offset past the end gives
    /// an empty span, and the result never extends beyond this view's end.
    pub fn subspan(&self, offset: usize, count: usize) -> Self {
        let begin = self.begin + offset.min(self.len());
        let end = begin + count.min(self.end - begin);
        Self {
            data: Arc::clone(&self.data),
            begin,
            end,
        }
    }

    /// Number of elements in the view.
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Size of the viewed elements in bytes.
    pub fn size_bytes(&self) -> usize {
        self.len() * mem::size_of::<T>()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Number of spans sharing this view's storage, including this one.
    pub fn use_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }

    /// Whether both spans share the same storage, regardless of window.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Pointer to the first viewed element.
    pub fn as_ptr(&self) -> *const T {
        self.as_slice().as_ptr()
    }

    /// The viewed elements.
    pub fn as_slice(&self) -> &[T] {
        &self.data[self.begin..self.end]
    }
}

impl<T> Clone for SharedSpan<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            begin: self.begin,
            end: self.end,
        }
    }
}

impl<T> Deref for SharedSpan<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for SharedSpan<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Default for SharedSpan<T> {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()))
    }
}

impl<T> From<Arc<[T]>> for SharedSpan<T> {
    fn from(data: Arc<[T]>) -> Self {
        Self::new(data)
    }
}

impl<T> From<Vec<T>> for SharedSpan<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(Arc::from(data))
    }
}

impl<T: Clone> From<&[T]> for SharedSpan<T> {
    fn from(data: &[T]) -> Self {
        Self::new(Arc::from(data))
    }
}

impl<T, const N: usize> From<[T; N]> for SharedSpan<T> {
    fn from(data: [T; N]) -> Self {
        Self::from(Vec::from(data))
    }
}

impl<T> FromIterator<T> for SharedSpan<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a SharedSpan<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedSpan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for SharedSpan<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SharedSpan<T> {}

impl<T: Hash> Hash for SharedSpan<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}
