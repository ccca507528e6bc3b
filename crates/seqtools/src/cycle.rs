//! Caching cycle
//!
//! First pass forwards upstream values and records them; once upstream ends
//! the cache is replayed forever. An empty first pass ends the cycle.

use std::iter::{Fuse, FusedIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Live,
    Replay { index: usize },
    Done,
}

#[derive(Debug, Clone)]
pub struct Cycle<I: Iterator> {
    upstream: Fuse<I>,
    cache: Vec<I::Item>,
    phase: Phase,
}

pub fn cycle<I>(iterable: I) -> Cycle<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    Cycle {
        upstream: iterable.into_iter().fuse(),
        cache: Vec::new(),
        phase: Phase::Live,
    }
}

impl<I: Iterator> Cycle<I> {
    /// Values captured from upstream so far
    pub fn cached(&self) -> &[I::Item] {
        &self.cache
    }

    pub fn is_replaying(&self) -> bool {
        matches!(self.phase, Phase::Replay { .. })
    }
}

impl<I> Iterator for Cycle<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.phase == Phase::Live {
            if let Some(value) = self.upstream.next() {
                self.cache.push(value.clone());
                return Some(value);
            }
            if self.cache.is_empty() {
                self.phase = Phase::Done;
            } else {
                tracing::debug!(
                    "[Cycle] Upstream exhausted, replaying {} cached values",
                    self.cache.len()
                );
                self.phase = Phase::Replay { index: 0 };
            }
        }

        match &mut self.phase {
            Phase::Replay { index } => {
                let value = self.cache[*index % self.cache.len()].clone();
                *index = (*index + 1) % self.cache.len();
                Some(value)
            }
            _ => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.phase {
            Phase::Done => (0, Some(0)),
            Phase::Replay { .. } => (usize::MAX, None),
            Phase::Live if !self.cache.is_empty() => (usize::MAX, None),
            Phase::Live => {
                let (lower, upper) = self.upstream.size_hint();
                if lower > 0 {
                    (usize::MAX, None)
                } else if upper == Some(0) {
                    (0, Some(0))
                } else {
                    (0, None)
                }
            }
        }
    }
}

impl<I> FusedIterator for Cycle<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_replays() {
        let values: Vec<_> = cycle(vec![1, 2, 3]).take(7).collect();
        assert_eq!(values, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn test_empty_cycle_terminates() {
        let mut empty = cycle(Vec::<i32>::new());
        assert_eq!(empty.next(), None);
        assert_eq!(empty.next(), None);
        assert_eq!(empty.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_upstream_pulled_once() {
        let mut pulls = 0;
        let upstream = std::iter::from_fn(|| {
            pulls += 1;
            if pulls <= 2 {
                Some(pulls)
            } else {
                None
            }
        });

        let mut cycled = cycle(upstream);
        let values: Vec<_> = cycled.by_ref().take(6).collect();
        assert_eq!(values, vec![1, 2, 1, 2, 1, 2]);
        assert!(cycled.is_replaying());
        assert_eq!(cycled.cached(), &[1, 2]);
        drop(cycled);
        assert_eq!(pulls, 3);
    }
}
