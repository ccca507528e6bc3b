//! Method-chaining front end
//!
//! Every combinator and consumer is also reachable as a method on any
//! `Iterator`, so pipelines read left to right:
//!
//! ```
//! use seqtools::prelude::*;
//!
//! let evens = seqtools::count(0, 1)
//!     .filter_false(|x| *x % 2 == 1)
//!     .limit(4)
//!     .join(",");
//! assert_eq!(evens, "0,2,4,6");
//! ```

use std::fmt::Display;
use std::hash::Hash;

use crate::combinators::{
    self, Accumulate, Compress, DropWhile, FilterFalse, Limit, Slice, StarArgs, StarMap, Unique,
};
use crate::config::SeqConfig;
use crate::consumers;
use crate::cycle::{self, Cycle};
use crate::error::Result;
use crate::group_by::{self, GroupBy};
use crate::tee::{self, TeeBranch};
use crate::utils::Truthy;

pub trait SeqExt: Iterator + Sized {
    fn filter_false<P>(self, predicate: P) -> FilterFalse<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        combinators::filter_false(self, predicate)
    }

    fn drop_while<P>(self, predicate: P) -> DropWhile<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        combinators::drop_while(self, predicate)
    }

    fn limit(self, size: usize) -> Limit<Self> {
        combinators::limit(self, size)
    }

    fn consume(self, count: usize) -> Self {
        combinators::consume(self, count)
    }

    fn slice(self, start: usize, stop: Option<usize>, step: usize) -> Result<Slice<Self>> {
        combinators::slice(self, start, stop, step)
    }

    fn compress<S>(self, selectors: S) -> Compress<Self, S::IntoIter>
    where
        S: IntoIterator,
        S::Item: Truthy,
    {
        combinators::compress(self, selectors)
    }

    fn star_map<F>(self, f: F) -> StarMap<Self, F>
    where
        Self::Item: StarArgs<F>,
    {
        combinators::star_map(self, f)
    }

    fn accumulate<F>(self, f: F) -> Accumulate<Self, F>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        combinators::accumulate(self, f)
    }

    fn unique(self) -> Unique<Self>
    where
        Self::Item: Eq + Hash + Clone,
    {
        combinators::unique(self)
    }

    fn group_by<K, F>(self, key_fn: F) -> GroupBy<Self, K, F>
    where
        K: PartialEq + Clone,
        F: FnMut(&Self::Item) -> K,
    {
        group_by::group_by(self, key_fn)
    }

    fn tee(self, branches: usize) -> Vec<TeeBranch<Self>>
    where
        Self::Item: Clone,
    {
        tee::tee(self, branches)
    }

    fn cycle_cached(self) -> Cycle<Self>
    where
        Self::Item: Clone,
    {
        cycle::cycle(self)
    }

    fn to_array(self) -> Vec<Self::Item> {
        consumers::to_array(self)
    }

    fn some<P>(self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        consumers::some(self, predicate)
    }

    fn every<P>(self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        consumers::every(self, predicate)
    }

    fn join(self, separator: &str) -> String
    where
        Self::Item: Display,
    {
        consumers::join(self, separator)
    }

    /// `join` with the configured separator
    fn join_default(self, config: &SeqConfig) -> String
    where
        Self::Item: Display,
    {
        consumers::join(self, &config.join_separator)
    }

    fn equals<O>(self, other: O) -> bool
    where
        O: IntoIterator,
        Self::Item: PartialEq<O::Item>,
    {
        consumers::equals(self, other)
    }

    fn next_or_value(&mut self, default: Self::Item) -> Self::Item {
        consumers::next_or_value(self, default)
    }
}

impl<I: Iterator> SeqExt for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{count, indexed, range, Sparse};

    #[test]
    fn test_chained_pipeline() {
        let values = range(0, 20, 1)
            .unwrap()
            .drop_while(|&x| x < 5)
            .filter_false(|x| *x % 3 == 0)
            .limit(4)
            .to_array();
        assert_eq!(values, vec![5, 7, 8, 10]);
    }

    #[test]
    fn test_sparse_through_group_by() {
        let sparse = Sparse::from(vec![Some(1), None, Some(1), Some(2), None, Some(1)]);
        let groups = indexed(sparse).group_by(|&x| x).to_array();
        assert_eq!(groups, vec![(1, vec![1, 1]), (2, vec![2]), (1, vec![1])]);
    }

    #[test]
    fn test_cycle_then_slice() {
        let values = vec!['x', 'y']
            .into_iter()
            .cycle_cached()
            .slice(1, Some(6), 2)
            .unwrap()
            .to_array();
        assert_eq!(values, vec!['y', 'y', 'y']);
    }

    #[test]
    fn test_limited_infinite_group_by_to_array() {
        let groups = count(0u32, 1).group_by(|x| *x / 2).limit(3).to_array();
        assert_eq!(groups, vec![(0, vec![0, 1]), (1, vec![2, 3]), (2, vec![4, 5])]);
    }

    #[test]
    fn test_consume_and_next_or_value() {
        let mut iter = count(0u8, 1).limit(3).consume(2);
        assert_eq!(iter.next_or_value(99), 2);
        assert_eq!(iter.next_or_value(99), 99);
    }

    #[test]
    fn test_join_default() {
        let config = SeqConfig {
            join_separator: "/".to_string(),
            ..SeqConfig::default()
        };
        assert_eq!(vec!["a", "b"].into_iter().join_default(&config), "a/b");
    }

    #[test]
    fn test_equals_method() {
        assert!(range(0, 3, 1).unwrap().equals(vec![0, 1, 2]));
        assert!(!range(0, 3, 1).unwrap().equals(vec![0, 1]));
    }

    #[test]
    fn test_tee_method() {
        let branches = vec![1, 2].into_iter().tee(2);
        let rows: Vec<Vec<i32>> = branches.into_iter().map(SeqExt::to_array).collect();
        assert_eq!(rows, vec![vec![1, 2], vec![1, 2]]);
    }
}
