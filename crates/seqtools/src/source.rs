//! Sequence adapter and generator sources
//!
//! Two input shapes, one canonical iterator:
//!
//! ```text
//! Sequence::Indexed(C)  ──┐
//!   (length + index,      ├──→ SeqIter<C, I> : Iterator<Item = T>
//!    holes skipped)       │
//! Sequence::Iter(I)     ──┘
//! ```
//!
//! Nothing is materialized here. The indexed path reads one slot per pull,
//! the iterator path forwards `next()` through a `Fuse`.

use std::iter::{Empty, Fuse, FusedIterator};
use std::marker::PhantomData;
use std::ops::AddAssign;

use crate::error::{Result, SeqError};

/// Integer-addressed, length-bearing collection (array, node list, sparse table)
///
/// `item` returns `None` for a hole. Holes are skipped by the adapter and
/// never surface as values.
pub trait IndexedCollection {
    type Item;

    /// Current length, re-read on every pull
    fn length(&self) -> usize;

    fn item(&self, index: usize) -> Option<Self::Item>;
}

impl<T: Clone> IndexedCollection for Vec<T> {
    type Item = T;

    fn length(&self) -> usize {
        self.len()
    }

    fn item(&self, index: usize) -> Option<T> {
        self.get(index).cloned()
    }
}

impl<T: Clone, const N: usize> IndexedCollection for [T; N] {
    type Item = T;

    fn length(&self) -> usize {
        N
    }

    fn item(&self, index: usize) -> Option<T> {
        self.get(index).cloned()
    }
}

impl<'a, T> IndexedCollection for &'a [T] {
    type Item = &'a T;

    fn length(&self) -> usize {
        self.len()
    }

    fn item(&self, index: usize) -> Option<&'a T> {
        let slice: &'a [T] = self;
        slice.get(index)
    }
}

/// Collection with holes
///
/// Mirrors a sparse array: `length` counts every slot, filled or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sparse<T> {
    slots: Vec<Option<T>>,
}

impl<T> Sparse<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// All-hole collection of the given length
    pub fn with_length(length: usize) -> Self {
        let mut slots = Vec::with_capacity(length);
        slots.resize_with(length, || None);
        Self { slots }
    }

    /// Fill a slot, growing the collection with holes if needed
    pub fn set(&mut self, index: usize, value: T) {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(value);
    }

    /// Punch a hole, returning what was there
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn push(&mut self, value: T) {
        self.slots.push(Some(value));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of filled slots
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<T> Default for Sparse<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<Option<T>>> for Sparse<T> {
    fn from(slots: Vec<Option<T>>) -> Self {
        Self { slots }
    }
}

impl<T: Clone> IndexedCollection for Sparse<T> {
    type Item = T;

    fn length(&self) -> usize {
        self.slots.len()
    }

    fn item(&self, index: usize) -> Option<T> {
        self.slots.get(index).cloned().flatten()
    }
}

impl<'a, T> IndexedCollection for &'a Sparse<T> {
    type Item = &'a T;

    fn length(&self) -> usize {
        self.slots.len()
    }

    fn item(&self, index: usize) -> Option<&'a T> {
        let sparse: &'a Sparse<T> = self;
        sparse.slots.get(index).and_then(Option::as_ref)
    }
}

/// Zero-length collection, the `C` of a `Sequence::Iter`
#[derive(Debug)]
pub struct Vacant<T>(PhantomData<fn() -> T>);

impl<T> Default for Vacant<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T> IndexedCollection for Vacant<T> {
    type Item = T;

    fn length(&self) -> usize {
        0
    }

    fn item(&self, _index: usize) -> Option<T> {
        None
    }
}

/// The two accepted input shapes
#[derive(Debug, Clone)]
pub enum Sequence<C, I> {
    Indexed(C),
    Iter(I),
}

impl<C, I> Sequence<C, I>
where
    C: IndexedCollection,
    I: Iterator<Item = C::Item>,
{
    /// Produce the canonical iterator. Reads nothing from the source.
    pub fn adapt(self) -> SeqIter<C, I> {
        let state = match self {
            Sequence::Indexed(collection) => Adapted::Indexed {
                collection,
                cursor: 0,
            },
            Sequence::Iter(iter) => Adapted::Iter(iter.fuse()),
        };
        SeqIter {
            state,
            finished: false,
        }
    }
}

impl<C, I> IntoIterator for Sequence<C, I>
where
    C: IndexedCollection,
    I: Iterator<Item = C::Item>,
{
    type Item = C::Item;
    type IntoIter = SeqIter<C, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.adapt()
    }
}

#[derive(Debug)]
enum Adapted<C, I> {
    Indexed { collection: C, cursor: usize },
    Iter(Fuse<I>),
}

/// Canonical pull iterator over either input shape
#[derive(Debug)]
pub struct SeqIter<C, I> {
    state: Adapted<C, I>,
    finished: bool,
}

impl<C, I> Iterator for SeqIter<C, I>
where
    C: IndexedCollection,
    I: Iterator<Item = C::Item>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if self.finished {
            return None;
        }

        let value = match &mut self.state {
            Adapted::Indexed { collection, cursor } => {
                let mut found = None;
                while *cursor < collection.length() {
                    let index = *cursor;
                    *cursor += 1;
                    if let Some(value) = collection.item(index) {
                        found = Some(value);
                        break;
                    }
                }
                found
            }
            Adapted::Iter(iter) => iter.next(),
        };

        // A live collection may grow later; termination stays final anyway
        if value.is_none() {
            self.finished = true;
        }
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        match &self.state {
            Adapted::Indexed { collection, cursor } => {
                (0, Some(collection.length().saturating_sub(*cursor)))
            }
            Adapted::Iter(iter) => iter.size_hint(),
        }
    }
}

impl<C, I> FusedIterator for SeqIter<C, I>
where
    C: IndexedCollection,
    I: Iterator<Item = C::Item>,
{
}

/// Adapt an indexed collection
pub fn indexed<C: IndexedCollection>(collection: C) -> SeqIter<C, Empty<C::Item>> {
    Sequence::Indexed(collection).adapt()
}

/// Adapt anything that already iterates
pub fn pull<I: IntoIterator>(iterable: I) -> SeqIter<Vacant<I::Item>, I::IntoIter> {
    Sequence::Iter(iterable.into_iter()).adapt()
}

// ============================================================================
// Generators
// ============================================================================

/// Arithmetic progression over `i64`, half-open at `stop`
#[derive(Debug, Clone)]
pub struct Range {
    next: i64,
    stop: i64,
    step: i64,
}

/// `range(start, stop, step)`; a zero step is rejected immediately
pub fn range(start: i64, stop: i64, step: i64) -> Result<Range> {
    if step == 0 {
        return Err(SeqError::ZeroStep);
    }
    Ok(Range {
        next: start,
        stop,
        step,
    })
}

impl Range {
    fn remaining(&self) -> usize {
        let (next, stop, step) = (self.next as i128, self.stop as i128, self.step as i128);
        let span = if step > 0 { stop - next } else { next - stop };
        if span <= 0 {
            return 0;
        }
        let step = step.abs();
        usize::try_from((span + step - 1) / step).unwrap_or(usize::MAX)
    }
}

impl Iterator for Range {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let exhausted = if self.step > 0 {
            self.next >= self.stop
        } else {
            self.next <= self.stop
        };
        if exhausted {
            return None;
        }

        let value = self.next;
        // Overflow past i64 bounds means we are past `stop` too
        self.next = self.next.checked_add(self.step).unwrap_or(self.stop);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl FusedIterator for Range {}

/// Infinite arithmetic progression
#[derive(Debug, Clone)]
pub struct Count<T> {
    next: T,
    step: T,
}

pub fn count<T: Copy + AddAssign>(start: T, step: T) -> Count<T> {
    Count { next: start, step }
}

impl<T: Copy + AddAssign> Iterator for Count<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let value = self.next;
        self.next += self.step;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<T: Copy + AddAssign> FusedIterator for Count<T> {}

/// One value, forever or `times` times
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: T,
    remaining: Option<usize>,
}

pub fn repeat<T: Clone>(value: T, times: Option<usize>) -> Repeat<T> {
    Repeat {
        value,
        remaining: times,
    }
}

impl<T: Clone> Iterator for Repeat<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match &mut self.remaining {
            None => Some(self.value.clone()),
            Some(0) => None,
            Some(n) => {
                *n -= 1;
                Some(self.value.clone())
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            None => (usize::MAX, None),
            Some(n) => (n, Some(n)),
        }
    }
}

impl<T: Clone> FusedIterator for Repeat<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_indexed_vec() {
        let values: Vec<_> = indexed(vec![1, 2, 3]).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_sparse_skips_holes() {
        let sparse = Sparse::from(vec![Some("a"), None, None, Some("d"), None]);
        let values: Vec<_> = indexed(&sparse).copied().collect();
        assert_eq!(values, vec!["a", "d"]);
        assert_eq!(sparse.len(), 5);
        assert_eq!(sparse.filled(), 2);
    }

    #[test]
    fn test_sparse_set_grows_with_holes() {
        let mut sparse = Sparse::new();
        sparse.set(3, 'x');
        sparse.push('y');
        assert_eq!(sparse.len(), 5);
        assert_eq!(sparse.remove(3), Some('x'));

        let values: Vec<_> = indexed(sparse).collect();
        assert_eq!(values, vec!['y']);
    }

    #[test]
    fn test_option_elements_are_values() {
        // Holes are skipped, but a stored `None` element is a real value
        let values: Vec<Option<i32>> = indexed(vec![Some(1), None, Some(3)]).collect();
        assert_eq!(values, vec![Some(1), None, Some(3)]);
    }

    #[test]
    fn test_adapter_is_lazy() {
        let pulled = Rc::new(RefCell::new(0));
        let counter = pulled.clone();
        let mut iter = pull((0..10).inspect(move |_| *counter.borrow_mut() += 1));

        assert_eq!(*pulled.borrow(), 0);
        assert_eq!(iter.next(), Some(0));
        assert_eq!(*pulled.borrow(), 1);
    }

    #[test]
    fn test_both_variants_through_into_iter() {
        let from_indexed: Sequence<Vec<i32>, std::vec::IntoIter<i32>> =
            Sequence::Indexed(vec![4, 5]);
        let from_iter: Sequence<Vec<i32>, std::vec::IntoIter<i32>> =
            Sequence::Iter(vec![4, 5].into_iter());

        let a: Vec<_> = from_indexed.into_iter().collect();
        let b: Vec<_> = from_iter.into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_termination_is_sticky() {
        let mut iter = indexed([1]);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_range() {
        let values: Vec<_> = range(0, 5, 1).unwrap().collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);

        let values: Vec<_> = range(5, 0, -2).unwrap().collect();
        assert_eq!(values, vec![5, 3, 1]);

        assert_eq!(range(0, 10, 3).unwrap().size_hint(), (4, Some(4)));
        assert_eq!(range(3, 3, 1).unwrap().count(), 0);
    }

    #[test]
    fn test_range_zero_step_is_error() {
        assert!(matches!(range(0, 5, 0), Err(SeqError::ZeroStep)));
    }

    #[test]
    fn test_range_near_overflow() {
        let values: Vec<_> = range(i64::MAX - 1, i64::MAX, 5).unwrap().collect();
        assert_eq!(values, vec![i64::MAX - 1]);
    }

    #[test]
    fn test_count() {
        let values: Vec<_> = count(10, -3).take(4).collect();
        assert_eq!(values, vec![10, 7, 4, 1]);

        let floats: Vec<_> = count(0.5, 0.25).take(3).collect();
        assert_eq!(floats, vec![0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_repeat() {
        assert_eq!(repeat("x", Some(3)).collect::<Vec<_>>(), vec!["x"; 3]);
        assert_eq!(repeat(0, Some(0)).next(), None);
        assert_eq!(repeat(7, None).take(100).count(), 100);
    }
}
