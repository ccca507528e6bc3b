//! Stateless combinators
//!
//! Each combinator wraps one upstream (or one list of upstreams) and keeps
//! nothing beyond plain counters and flags. Upstreams are fused on entry,
//! so every iterator returned here keeps returning `None` once it has
//! returned `None`.
//!
//! Where the standard adapter already has the exact semantics (`map`,
//! `filter`, `enumerate` as a zip) it is returned directly.

use ahash::AHashSet;
use std::fmt;
use std::hash::Hash;
use std::iter::{Filter, Fuse, FusedIterator, Map, Zip};

use crate::error::{Result, SeqError};
use crate::source::{count, Count};
use crate::utils::Truthy;

pub fn map<I, B, F>(iterable: I, f: F) -> Map<Fuse<I::IntoIter>, F>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> B,
{
    iterable.into_iter().fuse().map(f)
}

pub fn filter<I, P>(iterable: I, predicate: P) -> Filter<Fuse<I::IntoIter>, P>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    iterable.into_iter().fuse().filter(predicate)
}

// ============================================================================
// FilterFalse
// ============================================================================

/// Keeps the values the predicate rejects
#[derive(Debug, Clone)]
pub struct FilterFalse<I, P> {
    iter: Fuse<I>,
    predicate: P,
}

pub fn filter_false<I, P>(iterable: I, predicate: P) -> FilterFalse<I::IntoIter, P>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    FilterFalse {
        iter: iterable.into_iter().fuse(),
        predicate,
    }
}

impl<I, P> Iterator for FilterFalse<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let predicate = &mut self.predicate;
        self.iter.find(|value| !predicate(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, P> FusedIterator for FilterFalse<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
}

// ============================================================================
// TakeWhile / DropWhile
// ============================================================================

/// Stops for good at the first value failing the predicate
///
/// The failing value is consumed and discarded; upstream may still hold more.
#[derive(Debug, Clone)]
pub struct TakeWhile<I, P> {
    iter: I,
    predicate: P,
    done: bool,
}

pub fn take_while<I, P>(iterable: I, predicate: P) -> TakeWhile<I::IntoIter, P>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    TakeWhile {
        iter: iterable.into_iter(),
        predicate,
        done: false,
    }
}

impl<I, P> Iterator for TakeWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }
        match self.iter.next() {
            Some(value) if (self.predicate)(&value) => Some(value),
            _ => {
                self.done = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

impl<I, P> FusedIterator for TakeWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
}

/// Discards the prefix matching the predicate, then forwards everything
#[derive(Debug, Clone)]
pub struct DropWhile<I, P> {
    iter: Fuse<I>,
    predicate: P,
    dropping: bool,
}

pub fn drop_while<I, P>(iterable: I, predicate: P) -> DropWhile<I::IntoIter, P>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    DropWhile {
        iter: iterable.into_iter().fuse(),
        predicate,
        dropping: true,
    }
}

impl<I, P> Iterator for DropWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.dropping {
            loop {
                let value = self.iter.next()?;
                if !(self.predicate)(&value) {
                    self.dropping = false;
                    return Some(value);
                }
            }
        }
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        if self.dropping {
            (0, upper)
        } else {
            (lower, upper)
        }
    }
}

impl<I, P> FusedIterator for DropWhile<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
}

// ============================================================================
// Limit / Consume / Slice
// ============================================================================

/// At most `size` values
#[derive(Debug, Clone)]
pub struct Limit<I> {
    iter: I,
    remaining: usize,
}

pub fn limit<I: IntoIterator>(iterable: I, size: usize) -> Limit<I::IntoIter> {
    Limit {
        iter: iterable.into_iter(),
        remaining: size,
    }
}

impl<I: Iterator> Iterator for Limit<I> {
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let value = self.iter.next();
        if value.is_none() {
            self.remaining = 0;
        }
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let (lower, upper) = self.iter.size_hint();
        let upper = upper.map_or(self.remaining, |u| u.min(self.remaining));
        (lower.min(self.remaining), Some(upper))
    }
}

impl<I: Iterator> FusedIterator for Limit<I> {}

/// Discard `count` values (fewer if upstream ends) and hand the iterator back
pub fn consume<I: Iterator>(mut iter: I, count: usize) -> I {
    let mut remaining = count;
    while remaining > 0 {
        if iter.next().is_none() {
            break;
        }
        remaining -= 1;
    }
    iter
}

/// Positions `start, start + step, ...` below `stop`
///
/// Nothing is skipped until the first pull.
#[derive(Debug, Clone)]
pub struct Slice<I> {
    iter: I,
    /// Values to discard before the next yield
    skip: usize,
    /// Upstream positions left before `stop`, counted from position 0;
    /// `None` when unbounded
    window: Option<usize>,
    step: usize,
    done: bool,
}

pub fn slice<I: IntoIterator>(
    iterable: I,
    start: usize,
    stop: Option<usize>,
    step: usize,
) -> Result<Slice<I::IntoIter>> {
    if step == 0 {
        return Err(SeqError::ZeroStep);
    }
    Ok(Slice {
        iter: iterable.into_iter(),
        skip: start,
        window: stop,
        step,
        done: false,
    })
}

impl<I: Iterator> Slice<I> {
    fn finish(&mut self) -> Option<I::Item> {
        self.done = true;
        None
    }

    fn take_position(&mut self) {
        if let Some(window) = &mut self.window {
            *window -= 1;
        }
    }

    /// Values yielded from the next `positions` upstream positions
    fn yields_within(&self, positions: usize) -> usize {
        let positions = self.window.map_or(positions, |window| positions.min(window));
        if positions <= self.skip {
            0
        } else {
            1 + (positions - self.skip - 1) / self.step
        }
    }
}

impl<I: Iterator> Iterator for Slice<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }

        while self.skip > 0 {
            if self.window == Some(0) || self.iter.next().is_none() {
                return self.finish();
            }
            self.skip -= 1;
            self.take_position();
        }

        if self.window == Some(0) {
            return self.finish();
        }
        match self.iter.next() {
            Some(value) => {
                self.take_position();
                self.skip = self.step - 1;
                Some(value)
            }
            None => self.finish(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (lower, upper) = self.iter.size_hint();
        let upper = match (upper, self.window) {
            (Some(upper), _) => Some(self.yields_within(upper)),
            (None, Some(window)) => Some(self.yields_within(window)),
            (None, None) => None,
        };
        (self.yields_within(lower), upper)
    }
}

impl<I: Iterator> FusedIterator for Slice<I> {}

// ============================================================================
// Enumerate / Compress / StarMap
// ============================================================================

/// `zip(count(start, 1), iterable)`
pub fn enumerate<I: IntoIterator>(
    iterable: I,
    start: usize,
) -> Zip<Count<usize>, Fuse<I::IntoIter>> {
    count(start, 1).zip(iterable.into_iter().fuse())
}

/// Forwards a data value when its paired selector is truthy
#[derive(Debug, Clone)]
pub struct Compress<D, S> {
    data: D,
    selectors: S,
    done: bool,
}

pub fn compress<D, S>(data: D, selectors: S) -> Compress<D::IntoIter, S::IntoIter>
where
    D: IntoIterator,
    S: IntoIterator,
    S::Item: Truthy,
{
    Compress {
        data: data.into_iter(),
        selectors: selectors.into_iter(),
        done: false,
    }
}

impl<D, S> Iterator for Compress<D, S>
where
    D: Iterator,
    S: Iterator,
    S::Item: Truthy,
{
    type Item = D::Item;

    fn next(&mut self) -> Option<D::Item> {
        while !self.done {
            match (self.data.next(), self.selectors.next()) {
                (Some(value), Some(selector)) => {
                    if selector.is_truthy() {
                        return Some(value);
                    }
                }
                _ => self.done = true,
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.data.size_hint().1)
        }
    }
}

impl<D, S> FusedIterator for Compress<D, S>
where
    D: Iterator,
    S: Iterator,
    S::Item: Truthy,
{
}

/// Tuple items spread into positional arguments
///
/// Closures passed to `star_map` need annotated parameter types, since the
/// arity is only known through this trait.
pub trait StarArgs<F> {
    type Output;

    fn apply(self, f: &mut F) -> Self::Output;
}

macro_rules! impl_star_args {
    ($($arg:ident),+) => {
        impl<F, R, $($arg),+> StarArgs<F> for ($($arg,)+)
        where
            F: FnMut($($arg),+) -> R,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn apply(self, f: &mut F) -> R {
                let ($($arg,)+) = self;
                f($($arg),+)
            }
        }
    };
}

impl_star_args!(A);
impl_star_args!(A, B);
impl_star_args!(A, B, C);
impl_star_args!(A, B, C, D);

#[derive(Debug, Clone)]
pub struct StarMap<I, F> {
    iter: Fuse<I>,
    f: F,
}

pub fn star_map<I, F>(iterable: I, f: F) -> StarMap<I::IntoIter, F>
where
    I: IntoIterator,
    I::Item: StarArgs<F>,
{
    StarMap {
        iter: iterable.into_iter().fuse(),
        f,
    }
}

impl<I, F> Iterator for StarMap<I, F>
where
    I: Iterator,
    I::Item: StarArgs<F>,
{
    type Item = <I::Item as StarArgs<F>>::Output;

    fn next(&mut self) -> Option<Self::Item> {
        let args = self.iter.next()?;
        Some(args.apply(&mut self.f))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, F> FusedIterator for StarMap<I, F>
where
    I: Iterator,
    I::Item: StarArgs<F>,
{
}

// ============================================================================
// Chain
// ============================================================================

/// Concatenation, switching source exactly when the current one ends
pub struct Chain<O>
where
    O: Iterator,
    O::Item: IntoIterator,
{
    sources: Fuse<O>,
    current: Option<<O::Item as IntoIterator>::IntoIter>,
}

impl<O> Clone for Chain<O>
where
    O: Iterator + Clone,
    O::Item: IntoIterator,
    <O::Item as IntoIterator>::IntoIter: Clone,
{
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            current: self.current.clone(),
        }
    }
}

impl<O> fmt::Debug for Chain<O>
where
    O: Iterator + fmt::Debug,
    O::Item: IntoIterator,
    <O::Item as IntoIterator>::IntoIter: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("sources", &self.sources)
            .field("current", &self.current)
            .finish()
    }
}

/// Chain a homogeneous list of sequences in argument order
pub fn chain<S: IntoIterator>(sequences: Vec<S>) -> Chain<std::vec::IntoIter<S>> {
    chain_from_iterable(sequences)
}

/// Chain sequences pulled lazily from an outer sequence
pub fn chain_from_iterable<O>(sources: O) -> Chain<O::IntoIter>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    Chain {
        sources: sources.into_iter().fuse(),
        current: None,
    }
}

impl<O> Iterator for Chain<O>
where
    O: Iterator,
    O::Item: IntoIterator,
{
    type Item = <O::Item as IntoIterator>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = &mut self.current {
                if let Some(value) = current.next() {
                    return Some(value);
                }
                self.current = None;
            }
            self.current = Some(self.sources.next()?.into_iter());
        }
    }
}

impl<O> FusedIterator for Chain<O>
where
    O: Iterator,
    O::Item: IntoIterator,
{
}

// ============================================================================
// Zip / ZipLongest
// ============================================================================

/// Rows across a homogeneous list of sequences, ending with the shortest
#[derive(Debug, Clone)]
pub struct ZipAll<I> {
    iters: Vec<I>,
    done: bool,
}

pub fn zip<S: IntoIterator>(sequences: Vec<S>) -> ZipAll<S::IntoIter> {
    let done = sequences.is_empty();
    ZipAll {
        iters: sequences.into_iter().map(IntoIterator::into_iter).collect(),
        done,
    }
}

impl<I: Iterator> Iterator for ZipAll<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        if self.done {
            return None;
        }
        let mut row = Vec::with_capacity(self.iters.len());
        for iter in &mut self.iters {
            match iter.next() {
                Some(value) => row.push(value),
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
        Some(row)
    }
}

impl<I: Iterator> FusedIterator for ZipAll<I> {}

/// Rows across a homogeneous list of sequences, padding exhausted ones with `fill`
#[derive(Debug, Clone)]
pub struct ZipLongest<I: Iterator> {
    iters: Vec<Fuse<I>>,
    fill: I::Item,
    done: bool,
}

pub fn zip_longest<S>(fill: S::Item, sequences: Vec<S>) -> ZipLongest<S::IntoIter>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let done = sequences.is_empty();
    ZipLongest {
        iters: sequences.into_iter().map(|s| s.into_iter().fuse()).collect(),
        fill,
        done,
    }
}

impl<I> Iterator for ZipLongest<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        if self.done {
            return None;
        }
        let mut live = false;
        let mut row = Vec::with_capacity(self.iters.len());
        for iter in &mut self.iters {
            match iter.next() {
                Some(value) => {
                    live = true;
                    row.push(value);
                }
                None => row.push(self.fill.clone()),
            }
        }
        if live {
            Some(row)
        } else {
            self.done = true;
            None
        }
    }
}

impl<I> FusedIterator for ZipLongest<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

// ============================================================================
// Accumulate / Unique
// ============================================================================

/// Running fold; the first value passes through unchanged
#[derive(Debug, Clone)]
pub struct Accumulate<I: Iterator, F> {
    iter: Fuse<I>,
    acc: Option<I::Item>,
    f: F,
}

pub fn accumulate<I, F>(iterable: I, f: F) -> Accumulate<I::IntoIter, F>
where
    I: IntoIterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    Accumulate {
        iter: iterable.into_iter().fuse(),
        acc: None,
        f,
    }
}

impl<I, F> Iterator for Accumulate<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let value = self.iter.next()?;
        let next = match self.acc.take() {
            Some(acc) => (self.f)(acc, value),
            None => value,
        };
        self.acc = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I, F> FusedIterator for Accumulate<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> I::Item,
{
}

/// First occurrence of every value, anywhere in the sequence
#[derive(Debug, Clone)]
pub struct Unique<I: Iterator> {
    iter: Fuse<I>,
    seen: AHashSet<I::Item>,
}

pub fn unique<I>(iterable: I) -> Unique<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Eq + Hash + Clone,
{
    Unique {
        iter: iterable.into_iter().fuse(),
        seen: AHashSet::new(),
    }
}

impl<I> Iterator for Unique<I>
where
    I: Iterator,
    I::Item: Eq + Hash + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let value = self.iter.next()?;
            if self.seen.insert(value.clone()) {
                return Some(value);
            }
        }
    }
}

impl<I> FusedIterator for Unique<I>
where
    I: Iterator,
    I::Item: Eq + Hash + Clone,
{
}
