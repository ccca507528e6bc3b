//! Run-length grouping
//!
//! Groups *consecutive* values with equal keys. A key that shows up again
//! after a different key starts a new group:
//!
//! ```text
//! A A B B A  →  (A, [A, A]) (B, [B, B]) (A, [A])
//! ```

use std::iter::{Fuse, FusedIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupState {
    /// Skipping values that still belong to the last emitted group
    SeekingBoundary,
    /// Collecting the members of the group at `target_key`
    EmittingGroup,
    Exhausted,
}

/// One `(key, members)` record per run of equal keys
#[derive(Debug, Clone)]
pub struct GroupBy<I: Iterator, K, F> {
    iter: Fuse<I>,
    key_fn: F,
    state: GroupState,
    /// Key of the group last returned
    target_key: Option<K>,
    /// Pulled from upstream but not yet placed in a group
    pending: Option<(K, I::Item)>,
}

/// Group consecutive values by `key_fn`
pub fn group_by<I, K, F>(iterable: I, key_fn: F) -> GroupBy<I::IntoIter, K, F>
where
    I: IntoIterator,
    K: PartialEq + Clone,
    F: FnMut(&I::Item) -> K,
{
    GroupBy {
        iter: iterable.into_iter().fuse(),
        key_fn,
        state: GroupState::SeekingBoundary,
        target_key: None,
        pending: None,
    }
}

/// Group consecutive equal values (identity key)
#[allow(clippy::type_complexity)]
pub fn group_by_value<I>(
    iterable: I,
) -> GroupBy<I::IntoIter, I::Item, fn(&I::Item) -> I::Item>
where
    I: IntoIterator,
    I::Item: PartialEq + Clone,
{
    group_by(iterable, Clone::clone as fn(&I::Item) -> I::Item)
}

impl<I, K, F> GroupBy<I, K, F>
where
    I: Iterator,
    K: PartialEq + Clone,
    F: FnMut(&I::Item) -> K,
{
    fn pull(&mut self) -> Option<(K, I::Item)> {
        let value = self.iter.next()?;
        let key = (self.key_fn)(&value);
        Some((key, value))
    }

    /// Advance until `pending` holds the first value of a new run
    fn seek_boundary(&mut self) -> bool {
        loop {
            match &self.pending {
                Some((key, _)) if self.target_key.as_ref() != Some(key) => return true,
                _ => {}
            }
            match self.pull() {
                Some(item) => self.pending = Some(item),
                None => return false,
            }
        }
    }

    fn emit_group(&mut self) -> Option<(K, Vec<I::Item>)> {
        let (key, first) = self.pending.take()?;
        self.target_key = Some(key.clone());

        let mut members = vec![first];
        loop {
            match self.pull() {
                Some((next_key, value)) if next_key == key => members.push(value),
                Some(item) => {
                    self.pending = Some(item);
                    self.state = GroupState::SeekingBoundary;
                    break;
                }
                None => {
                    self.state = GroupState::Exhausted;
                    break;
                }
            }
        }

        tracing::trace!("[GroupBy] Emitting group of {} members", members.len());
        Some((key, members))
    }
}

impl<I, K, F> Iterator for GroupBy<I, K, F>
where
    I: Iterator,
    K: PartialEq + Clone,
    F: FnMut(&I::Item) -> K,
{
    type Item = (K, Vec<I::Item>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                GroupState::Exhausted => return None,
                GroupState::SeekingBoundary => {
                    self.state = if self.seek_boundary() {
                        GroupState::EmittingGroup
                    } else {
                        GroupState::Exhausted
                    };
                }
                GroupState::EmittingGroup => return self.emit_group(),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            GroupState::Exhausted => (0, Some(0)),
            _ => {
                let pending = usize::from(self.pending.is_some());
                let (lower, upper) = self.iter.size_hint();
                let lower = if lower.saturating_add(pending) > 0 { 1 } else { 0 };
                (lower, upper.and_then(|u| u.checked_add(pending)))
            }
        }
    }
}

impl<I, K, F> FusedIterator for GroupBy<I, K, F>
where
    I: Iterator,
    K: PartialEq + Clone,
    F: FnMut(&I::Item) -> K,
{
}
