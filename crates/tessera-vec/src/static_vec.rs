//! The [`StaticVec`] container.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::mem::{self, MaybeUninit};
use std::ops::{Bound, Deref, DerefMut, RangeBounds};
use std::ptr;
use std::slice;

use crate::error::VecError;

/// A vector with room for at most `N` elements, stored inline.
///
/// Growth is always checked: [`push`](StaticVec::push),
/// [`insert`](StaticVec::insert) and friends return
/// [`VecError::CapacityExceeded`] instead of reallocating. Checked access
/// goes through [`at`](StaticVec::at); the slice API reached through
/// `Deref` covers everything else (`v[i]`, `first`, `last`, iteration,
/// sorting).
///
/// # Example
///
/// ```
/// use tessera_vec::{StaticVec, VecError};
///
/// let mut v = StaticVec::<i32, 3>::try_from([1, 2, 3]).unwrap();
/// let err = v.insert(1, 99).unwrap_err();
/// assert!(matches!(err, VecError::CapacityExceeded { .. }));
/// assert_eq!(v, [1, 2, 3]);
/// ```
pub struct StaticVec<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    /// Number of live elements; slots `[0, len)` are initialised.
    len: usize,
}

/// Truncates the vector back to `len` unless disarmed.
///
/// Bulk growth appends through this guard, so a panicking element
/// constructor, or an iterator that yields more than it promised, unwinds
/// to exactly the state the operation started from. The elements it
/// discards are dropped front to back, in the order they were built.
struct Rollback<'a, T, const N: usize> {
    vec: &'a mut StaticVec<T, N>,
    len: usize,
    armed: bool,
}

impl<T, const N: usize> Drop for Rollback<'_, T, N> {
    fn drop(&mut self) {
        if self.armed {
            self.vec.truncate(self.len);
        }
    }
}

impl<T, const N: usize> StaticVec<T, N> {
    /// Fixed capacity of this vector type.
    pub const CAPACITY: usize = N;

    /// An empty vector.
    pub const fn new() -> Self {
        Self {
            data: [const { MaybeUninit::uninit() }; N],
            len: 0,
        }
    }

    /// Build a vector from any iterator, failing if it yields more than `N`
    /// items.
    ///
    /// An iterator whose lower size bound already exceeds `N` is rejected
    /// before a single item is pulled. Otherwise items are moved in one by
    /// one; on overflow everything taken so far is dropped.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, VecError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut vec = Self::new();
        vec.check_capacity(iter.size_hint().0)?;
        vec.append_guarded(iter)?;
        Ok(vec)
    }

    /// Build a vector of `count` elements produced by `f`.
    pub fn from_fn<F>(count: usize, f: F) -> Result<Self, VecError>
    where
        F: FnMut(usize) -> T,
    {
        let mut vec = Self::new();
        vec.check_capacity(count)?;
        vec.append_guarded((0..count).map(f))?;
        Ok(vec)
    }

    /// Number of live elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the vector holds `N` elements.
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// The fixed capacity `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Largest length the vector can ever reach; always `N`.
    pub const fn max_size(&self) -> usize {
        N
    }

    /// Free slots left.
    pub const fn remaining_capacity(&self) -> usize {
        N - self.len
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialised and MaybeUninit<T> has the
        // layout of T.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, with unique access through `&mut self`.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Pointer to the first slot.
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr().cast::<T>()
    }

    /// Mutable pointer to the first slot.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr().cast::<T>()
    }

    /// Checked element access.
    pub fn at(&self, index: usize) -> Result<&T, VecError> {
        self.check_index(index)?;
        Ok(&self.as_slice()[index])
    }

    /// Checked mutable element access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VecError> {
        self.check_index(index)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Append `value`.
    ///
    /// On a full vector `value` is dropped and the vector is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), VecError> {
        self.check_capacity(1)?;
        self.push_unchecked(value);
        Ok(())
    }

    /// Append the value returned by `f`, constructing it only if a slot is
    /// free.
    pub fn push_with<F>(&mut self, f: F) -> Result<(), VecError>
    where
        F: FnOnce() -> T,
    {
        self.check_capacity(1)?;
        self.push_unchecked(f());
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` was live and is now outside
        // the live range, so it is read exactly once.
        Some(unsafe { self.data[self.len].assume_init_read() })
    }

    /// Insert `value` at `index`, shifting later elements right.
    ///
    /// `index == len()` appends. Capacity is checked before the position.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), VecError> {
        self.check_capacity(1)?;
        self.check_position(index)?;
        let len = self.len;
        // SAFETY: index <= len < N, so both the source range [index, len)
        // and the destination [index + 1, len + 1) lie inside the array.
        // Nothing between the copy and the write can panic.
        unsafe {
            let slot = self.as_mut_ptr().add(index);
            ptr::copy(slot, slot.add(1), len - index);
            ptr::write(slot, value);
        }
        self.len = len + 1;
        Ok(())
    }

    /// Construct a value with `f` and insert it at `index`.
    ///
    /// Capacity and position are validated before `f` runs.
    pub fn insert_with<F>(&mut self, index: usize, f: F) -> Result<(), VecError>
    where
        F: FnOnce() -> T,
    {
        self.check_capacity(1)?;
        self.check_position(index)?;
        let value = f();
        self.insert(index, value)
    }

    /// Insert every item of `iter` at `index`, preserving their order.
    ///
    /// The iterator's reported length is checked against the free capacity
    /// first. Items are staged after the live elements and rotated into
    /// place, so a panic while producing them, or an iterator that yields
    /// more than it reported, leaves the vector unchanged.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<(), VecError>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator<Item = T>,
    {
        let iter = iter.into_iter();
        self.check_capacity(iter.len())?;
        self.check_position(index)?;
        let old_len = self.len;
        self.append_guarded(iter)?;
        let added = self.len - old_len;
        self.as_mut_slice()[index..].rotate_right(added);
        Ok(())
    }

    /// Insert `count` clones of `value` at `index`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: T) -> Result<(), VecError>
    where
        T: Clone,
    {
        self.insert_iter(index, iter::repeat_n(value, count))
    }

    /// Insert clones of every element of `items` at `index`.
    pub fn insert_slice(&mut self, index: usize, items: &[T]) -> Result<(), VecError>
    where
        T: Clone,
    {
        self.insert_iter(index, items.iter().cloned())
    }

    /// Append clones of every element of `items`.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), VecError>
    where
        T: Clone,
    {
        self.insert_iter(self.len, items.iter().cloned())
    }

    /// Remove and return the element at `index`, shifting later elements
    /// left.
    pub fn remove(&mut self, index: usize) -> Result<T, VecError> {
        self.check_index(index)?;
        let len = self.len;
        // SAFETY: index < len; the element is read out once, then the tail
        // [index + 1, len) is moved down over it.
        let value = unsafe {
            let slot = self.as_mut_ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, len - index - 1);
            value
        };
        self.len = len - 1;
        Ok(value)
    }

    /// Drop the elements in `range` and close the gap.
    ///
    /// The range must lie within `[0, len()]`; an empty range is a no-op.
    /// Should an element's destructor panic, the elements after the range
    /// are leaked rather than dropped twice.
    pub fn erase<R>(&mut self, range: R) -> Result<(), VecError>
    where
        R: RangeBounds<usize>,
    {
        let len = self.len;
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        if end > len {
            return Err(VecError::OutOfRange { index: end, len });
        }
        if start > end {
            return Err(VecError::OutOfRange { index: start, len });
        }
        if start == end {
            return Ok(());
        }

        let tail = len - end;
        self.len = start;
        // SAFETY: [start, end) are live and no longer counted by `len`, so
        // they are dropped exactly once; the tail [end, len) is then moved
        // down into [start, start + tail).
        unsafe {
            let base = self.as_mut_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), end - start));
            ptr::copy(base.add(end), base.add(start), tail);
        }
        self.len = start + tail;
        Ok(())
    }

    /// Drop every element past `new_len`. No-op if `new_len >= len()`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let old_len = self.len;
        self.len = new_len;
        // SAFETY: [new_len, old_len) were live and are no longer counted.
        unsafe {
            let tail = self.as_mut_ptr().add(new_len);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(tail, old_len - new_len));
        }
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        if mem::needs_drop::<T>() {
            self.truncate(0);
        } else {
            self.len = 0;
        }
    }

    /// Resize to `new_len`, filling new slots with values from `f`.
    ///
    /// Shrinking drops the trailing elements; growth is capacity-checked
    /// before `f` is first called.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), VecError>
    where
        F: FnMut() -> T,
    {
        match new_len.cmp(&self.len) {
            Ordering::Less => {
                self.truncate(new_len);
                Ok(())
            }
            Ordering::Equal => Ok(()),
            Ordering::Greater => {
                let extra = new_len - self.len;
                self.check_capacity(extra)?;
                self.append_guarded((0..extra).map(|_| f()))
            }
        }
    }

    /// Resize to `new_len`, filling new slots with clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), VecError>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        let extra = new_len - self.len;
        self.check_capacity(extra)?;
        self.append_guarded(iter::repeat_n(value, extra))
    }

    /// Resize to `new_len`, filling new slots with `T::default()`.
    pub fn resize_default(&mut self, new_len: usize) -> Result<(), VecError>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    fn check_capacity(&self, additional: usize) -> Result<(), VecError> {
        if additional > N - self.len {
            return Err(VecError::CapacityExceeded {
                requested: additional,
                len: self.len,
                capacity: N,
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), VecError> {
        if index >= self.len {
            return Err(VecError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Insertion positions may equal `len`.
    fn check_position(&self, index: usize) -> Result<(), VecError> {
        if index > self.len {
            return Err(VecError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Caller guarantees a free slot.
    fn push_unchecked(&mut self, value: T) {
        self.data[self.len].write(value);
        self.len += 1;
    }

    /// Append every item, rolling back to the starting length on panic or
    /// overflow.
    fn append_guarded<I>(&mut self, iter: I) -> Result<(), VecError>
    where
        I: Iterator<Item = T>,
    {
        let start = self.len;
        let mut guard = Rollback {
            vec: self,
            len: start,
            armed: true,
        };
        for item in iter {
            if guard.vec.is_full() {
                return Err(VecError::CapacityExceeded {
                    requested: guard.vec.len - start + 1,
                    len: start,
                    capacity: N,
                });
            }
            guard.vec.push_unchecked(item);
        }
        guard.armed = false;
        Ok(())
    }

    /// Hand the raw slots and live length to an owning iterator.
    pub(crate) fn into_raw_parts(self) -> ([MaybeUninit<T>; N], usize) {
        let this = mem::ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so ownership of the live slots
        // moves to the caller exactly once.
        let data = unsafe { ptr::read(&this.data) };
        (data, this.len)
    }
}

impl<T: Clone, const N: usize> StaticVec<T, N> {
    /// A vector of `count` clones of `value`.
    ///
    /// Fails before cloning anything when `count > N`.
    pub fn from_elem(count: usize, value: T) -> Result<Self, VecError> {
        let mut vec = Self::new();
        vec.check_capacity(count)?;
        vec.append_guarded(iter::repeat_n(value, count))?;
        Ok(vec)
    }
}

impl<T: Default, const N: usize> StaticVec<T, N> {
    /// A vector of `count` default values.
    ///
    /// Fails before constructing anything when `count > N`.
    pub fn with_len(count: usize) -> Result<Self, VecError> {
        Self::from_fn(count, |_| T::default())
    }
}

impl<T, const N: usize> Drop for StaticVec<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Default for StaticVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for StaticVec<T, N> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        for item in self.iter() {
            out.push_unchecked(item.clone());
        }
        out
    }

    /// Clears `self`, then clones `source` element by element. If a clone
    /// panics, `self` is left empty.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        let copied = self.append_guarded(source.iter().cloned());
        debug_assert!(copied.is_ok(), "source length never exceeds N");
    }
}

impl<T, const N: usize> Deref for StaticVec<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for StaticVec<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> AsRef<[T]> for StaticVec<T, N> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> AsMut<[T]> for StaticVec<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> Borrow<[T]> for StaticVec<T, N> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize, const M: usize> TryFrom<[T; M]> for StaticVec<T, N> {
    type Error = VecError;

    fn try_from(items: [T; M]) -> Result<Self, VecError> {
        Self::try_from_iter(items)
    }
}

impl<T: Clone, const N: usize> TryFrom<&[T]> for StaticVec<T, N> {
    type Error = VecError;

    fn try_from(items: &[T]) -> Result<Self, VecError> {
        Self::try_from_iter(items.iter().cloned())
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for StaticVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<StaticVec<T, M>>
    for StaticVec<T, N>
{
    fn eq(&self, other: &StaticVec<T, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T]> for StaticVec<T, N> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<[T; M]> for StaticVec<T, N> {
    fn eq(&self, other: &[T; M]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for StaticVec<T, N> {}

impl<T: PartialOrd, const N: usize> PartialOrd for StaticVec<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, const N: usize> Ord for StaticVec<T, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, const N: usize> Hash for StaticVec<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a StaticVec<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut StaticVec<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
