//! By-value iteration over a [`StaticVec`].

use std::fmt;
use std::iter::FusedIterator;
use std::mem::MaybeUninit;
use std::ptr;
use std::slice;

use crate::static_vec::StaticVec;

/// Owning iterator returned by `StaticVec::into_iter`.
///
/// Elements not yet yielded are dropped with the iterator.
pub struct IntoIter<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    /// Slots `[start, end)` are live.
    start: usize,
    end: usize,
}

impl<T, const N: usize> IntoIter<T, N> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [start, end) are initialised and not yet moved out.
        unsafe {
            slice::from_raw_parts(
                self.data.as_ptr().add(self.start).cast::<T>(),
                self.end - self.start,
            )
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let index = self.start;
        self.start += 1;
        // SAFETY: `index` was inside the live range and has just left it.
        Some(unsafe { self.data[index].assume_init_read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the old `end - 1` was live and has just left the range.
        Some(unsafe { self.data[self.end].assume_init_read() })
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(
            self.data.as_mut_ptr().wrapping_add(self.start).cast::<T>(),
            self.end - self.start,
        );
        self.start = self.end;
        // SAFETY: the range was live and is now marked empty, so each
        // element is dropped once even if a destructor panics.
        unsafe { ptr::drop_in_place(live) }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, const N: usize> IntoIterator for StaticVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> IntoIter<T, N> {
        let (data, len) = self.into_raw_parts();
        IntoIter {
            data,
            start: 0,
            end: len,
        }
    }
}
