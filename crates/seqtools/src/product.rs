//! Cartesian product and the arrangements built on it
//!
//! ```text
//! product(pools)              odometer over pool indices
//! permutations(seq, r)      = product(0..n; r) | no repeated index
//! combinations(seq, r)      = permutations(0..n, r) | strictly increasing
//! comb_with_repl(seq, r)    = product(0..n; r) | non-decreasing
//! ```
//!
//! Arrangements are filters over the full odometer space, so their cost is
//! n^r index tuples whatever the output size. Output order is lexicographic
//! in pool index order and is part of the contract. Use the `*_checked`
//! constructors to bound the odometer space through `SeqConfig`.

use smallvec::{smallvec, SmallVec};
use std::iter::{Filter, FusedIterator};

use crate::config::{odometer_space, SeqConfig};
use crate::error::Result;

/// Index tuples up to this length stay on the stack
const SMALL_INDEX: usize = 8;

type IndexVec = SmallVec<[usize; SMALL_INDEX]>;

// ============================================================================
// Product
// ============================================================================

/// Cartesian product of materialized pools
///
/// Yields the tuple at the current indices, then increments the rightmost
/// index with ripple carry to the left. Overflowing the leftmost position
/// replaces the index tuple with the exhausted marker (`None`).
#[derive(Debug, Clone)]
pub struct Product<T> {
    pools: Vec<Vec<T>>,
    indices: Option<IndexVec>,
}

/// Product of a homogeneous list of finite sequences, each read once up front
pub fn product<S>(sequences: Vec<S>) -> Product<S::Item>
where
    S: IntoIterator,
    S::Item: Clone,
{
    Product::from_pools(materialize(sequences))
}

/// Product of `repeat` copies of one pool
pub fn product_repeat<S>(sequence: S, repeat: usize) -> Product<S::Item>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let pool: Vec<S::Item> = sequence.into_iter().collect();
    Product::from_pools(vec![pool; repeat])
}

/// `product`, refused when the odometer space exceeds the configured limit
pub fn product_checked<S>(sequences: Vec<S>, config: &SeqConfig) -> Result<Product<S::Item>>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let pools = materialize(sequences);
    let sizes: Vec<usize> = pools.iter().map(Vec::len).collect();
    config.check_odometer_space(&sizes)?;
    Ok(Product::from_pools(pools))
}

fn materialize<S: IntoIterator>(sequences: Vec<S>) -> Vec<Vec<S::Item>> {
    sequences
        .into_iter()
        .map(|sequence| sequence.into_iter().collect())
        .collect()
}

impl<T: Clone> Product<T> {
    pub fn from_pools(pools: Vec<Vec<T>>) -> Self {
        let indices = if pools.iter().any(Vec::is_empty) {
            None
        } else {
            Some(smallvec![0; pools.len()])
        };

        let product = Self { pools, indices };
        tracing::debug!(
            "[Product] {} pools, odometer space {}",
            product.pools.len(),
            product.total_size()
        );
        product
    }

    /// Tuples in the full product (saturating)
    pub fn total_size(&self) -> usize {
        let sizes: SmallVec<[usize; SMALL_INDEX]> = self.pools.iter().map(Vec::len).collect();
        odometer_space(&sizes)
    }

    pub fn is_exhausted(&self) -> bool {
        self.indices.is_none()
    }

    /// Tuples not yet yielded, `None` if the count does not fit a `usize`
    fn remaining(&self) -> Option<usize> {
        let Some(indices) = &self.indices else {
            return Some(0);
        };
        let total = self.total_size();
        if total == usize::MAX {
            return None;
        }
        // Mixed-radix rank of the current tuple
        let rank = indices
            .iter()
            .zip(&self.pools)
            .fold(0usize, |rank, (&index, pool)| rank * pool.len() + index);
        Some(total - rank)
    }
}

impl<T: Clone> Iterator for Product<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        let indices = self.indices.as_mut()?;

        let tuple: Vec<T> = indices
            .iter()
            .zip(&self.pools)
            .map(|(&index, pool)| pool[index].clone())
            .collect();

        let mut overflowed = true;
        for position in (0..indices.len()).rev() {
            indices[position] += 1;
            if indices[position] < self.pools[position].len() {
                overflowed = false;
                break;
            }
            indices[position] = 0;
        }
        if overflowed {
            self.indices = None;
        }

        Some(tuple)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl<T: Clone> FusedIterator for Product<T> {}

// ============================================================================
// Arrangements: permutations, combinations, combinations with replacement
// ============================================================================

pub type IndexFilter = fn(&Vec<usize>) -> bool;

/// Index tuples of `r` distinct positions, in odometer order
pub type PermutationIndices = Filter<Product<usize>, IndexFilter>;

pub type Permutations<T> = Arrangements<T, PermutationIndices>;
pub type Combinations<T> = Arrangements<T, Filter<PermutationIndices, IndexFilter>>;
pub type CombinationsWithReplacement<T> = Arrangements<T, Filter<Product<usize>, IndexFilter>>;

/// Pool values picked by a stream of index tuples
#[derive(Debug, Clone)]
pub struct Arrangements<T, I> {
    pool: Vec<T>,
    indices: I,
}

impl<T, I> Iterator for Arrangements<T, I>
where
    T: Clone,
    I: Iterator<Item = Vec<usize>>,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        let indices = self.indices.next()?;
        Some(indices.iter().map(|&i| self.pool[i].clone()).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T, I> FusedIterator for Arrangements<T, I>
where
    T: Clone,
    I: Iterator<Item = Vec<usize>> + FusedIterator,
{
}

#[allow(clippy::ptr_arg)]
fn all_distinct(indices: &Vec<usize>) -> bool {
    indices
        .iter()
        .enumerate()
        .all(|(position, index)| !indices[..position].contains(index))
}

#[allow(clippy::ptr_arg)]
fn strictly_increasing(indices: &Vec<usize>) -> bool {
    indices.windows(2).all(|pair| pair[0] < pair[1])
}

#[allow(clippy::ptr_arg)]
fn non_decreasing(indices: &Vec<usize>) -> bool {
    indices.windows(2).all(|pair| pair[0] <= pair[1])
}

fn permutation_indices(n: usize, length: usize) -> PermutationIndices {
    product_repeat(0..n, length).filter(all_distinct as IndexFilter)
}

/// `length`-long arrangements without repeated positions; `None` means all of `sequence`
pub fn permutations<S>(sequence: S, length: Option<usize>) -> Permutations<S::Item>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let pool: Vec<S::Item> = sequence.into_iter().collect();
    let length = length.unwrap_or(pool.len());
    Arrangements {
        indices: permutation_indices(pool.len(), length),
        pool,
    }
}

pub fn combinations<S>(sequence: S, length: usize) -> Combinations<S::Item>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let pool: Vec<S::Item> = sequence.into_iter().collect();
    Arrangements {
        indices: permutation_indices(pool.len(), length)
            .filter(strictly_increasing as IndexFilter),
        pool,
    }
}

pub fn combinations_with_replacement<S>(
    sequence: S,
    length: usize,
) -> CombinationsWithReplacement<S::Item>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let pool: Vec<S::Item> = sequence.into_iter().collect();
    Arrangements {
        indices: product_repeat(0..pool.len(), length).filter(non_decreasing as IndexFilter),
        pool,
    }
}

pub fn permutations_checked<S>(
    sequence: S,
    length: Option<usize>,
    config: &SeqConfig,
) -> Result<Permutations<S::Item>>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let pool: Vec<S::Item> = sequence.into_iter().collect();
    let length = length.unwrap_or(pool.len());
    config.check_odometer_space(&vec![pool.len(); length])?;
    Ok(permutations(pool, Some(length)))
}

pub fn combinations_checked<S>(
    sequence: S,
    length: usize,
    config: &SeqConfig,
) -> Result<Combinations<S::Item>>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let pool: Vec<S::Item> = sequence.into_iter().collect();
    config.check_odometer_space(&vec![pool.len(); length])?;
    Ok(combinations(pool, length))
}

pub fn combinations_with_replacement_checked<S>(
    sequence: S,
    length: usize,
    config: &SeqConfig,
) -> Result<CombinationsWithReplacement<S::Item>>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let pool: Vec<S::Item> = sequence.into_iter().collect();
    config.check_odometer_space(&vec![pool.len(); length])?;
    Ok(combinations_with_replacement(pool, length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeqError;

    #[test]
    fn test_product_order() {
        let tuples: Vec<_> = product(vec![vec![1, 2], vec![10, 20, 30]]).collect();
        assert_eq!(
            tuples,
            vec![
                vec![1, 10],
                vec![1, 20],
                vec![1, 30],
                vec![2, 10],
                vec![2, 20],
                vec![2, 30],
            ]
        );
    }

    #[test]
    fn test_product_with_empty_pool() {
        let mut empty = product(vec![vec![], vec![1, 2]]);
        assert!(empty.is_exhausted());
        assert_eq!(empty.next(), None);
    }

    #[test]
    fn test_product_of_no_pools() {
        let tuples: Vec<Vec<i32>> = product(Vec::<Vec<i32>>::new()).collect();
        assert_eq!(tuples, vec![Vec::<i32>::new()]);
    }

    #[test]
    fn test_product_size_hint_tracks_progress() {
        let mut tuples = product_repeat(0..3, 2);
        assert_eq!(tuples.total_size(), 9);
        assert_eq!(tuples.size_hint(), (9, Some(9)));
        tuples.next();
        tuples.next();
        assert_eq!(tuples.size_hint(), (7, Some(7)));
        assert_eq!(tuples.by_ref().count(), 7);
        assert_eq!(tuples.size_hint(), (0, Some(0)));
        assert_eq!(tuples.next(), None);
    }

    #[test]
    fn test_permutations_default_length() {
        let perms: Vec<_> = permutations(vec![1, 2, 3], None).collect();
        assert_eq!(
            perms,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
    }

    #[test]
    fn test_permutations_partial_length() {
        let perms: Vec<String> = permutations("abc".chars(), Some(2))
            .map(|p| p.into_iter().collect())
            .collect();
        assert_eq!(perms, vec!["ab", "ac", "ba", "bc", "ca", "cb"]);
    }

    #[test]
    fn test_permutations_positions_not_values() {
        // Equal values at distinct positions still permute
        let perms: Vec<_> = permutations(vec![7, 7], None).collect();
        assert_eq!(perms, vec![vec![7, 7], vec![7, 7]]);
    }

    #[test]
    fn test_permutations_edge_lengths() {
        assert_eq!(permutations(vec![1, 2], Some(3)).count(), 0);
        let zero: Vec<_> = permutations(vec![1, 2], Some(0)).collect();
        assert_eq!(zero, vec![Vec::<i32>::new()]);
    }

    #[test]
    fn test_combinations() {
        let combos: Vec<_> = combinations(vec![0, 1, 2, 3], 3).collect();
        assert_eq!(
            combos,
            vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 2, 3], vec![1, 2, 3]]
        );
        assert_eq!(combinations(vec![1, 2], 3).count(), 0);
    }

    #[test]
    fn test_combinations_with_replacement() {
        let combos: Vec<_> = combinations_with_replacement(vec!['a', 'b', 'c'], 2).collect();
        assert_eq!(
            combos,
            vec![
                vec!['a', 'a'],
                vec!['a', 'b'],
                vec!['a', 'c'],
                vec!['b', 'b'],
                vec!['b', 'c'],
                vec!['c', 'c'],
            ]
        );
        assert_eq!(combinations_with_replacement(Vec::<i32>::new(), 2).count(), 0);
    }

    #[test]
    fn test_checked_constructors() {
        let config = SeqConfig {
            max_odometer_space: Some(5000),
            ..SeqConfig::default()
        };

        assert_eq!(permutations_checked(0..5, None, &config).unwrap().count(), 120);
        assert!(matches!(
            permutations_checked(0..6, None, &config),
            Err(SeqError::OdometerSpaceExceeded { current: 46656, max: 5000 })
        ));
        assert!(combinations_checked(0..10, 3, &config).is_ok());
        assert!(combinations_with_replacement_checked(0..20, 3, &config).is_err());
        assert!(product_checked(vec![0..10, 0..10, 0..51], &config).is_err());
    }
}
