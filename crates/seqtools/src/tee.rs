//! N-way fan-out of one upstream
//!
//! ```text
//!                ┌─→ [buffer 0] ─→ branch 0
//! upstream ──────┼─→ [buffer 1] ─→ branch 1
//!                └─→ [buffer 2] ─→ branch 2
//! ```
//!
//! A branch with an empty buffer pulls one value from the shared upstream
//! and hands a copy to every other live branch. Upstream is pulled exactly
//! once per value, whatever order the branches are read in.
//!
//! Branches share state through `Rc<RefCell<_>>`, so they are single-threaded.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::iter::{Fuse, FusedIterator};
use std::rc::Rc;

use crate::config::SeqConfig;
use crate::error::Result;

struct TeeShared<I: Iterator> {
    upstream: Fuse<I>,
    /// One FIFO per branch, `None` once the branch is dropped
    buffers: Vec<Option<VecDeque<I::Item>>>,
    pulls: usize,
}

/// One reader of a fanned-out sequence
pub struct TeeBranch<I: Iterator> {
    shared: Rc<RefCell<TeeShared<I>>>,
    index: usize,
}

/// Split one sequence into `branches` independent readers
pub fn tee<I>(iterable: I, branches: usize) -> Vec<TeeBranch<I::IntoIter>>
where
    I: IntoIterator,
    I::Item: Clone,
{
    tracing::debug!("[Tee] Fanning out into {} branches", branches);

    let shared = Rc::new(RefCell::new(TeeShared {
        upstream: iterable.into_iter().fuse(),
        buffers: (0..branches).map(|_| Some(VecDeque::new())).collect(),
        pulls: 0,
    }));

    (0..branches)
        .map(|index| TeeBranch {
            shared: Rc::clone(&shared),
            index,
        })
        .collect()
}

/// `tee`, refused above the configured branch limit
pub fn tee_checked<I>(
    iterable: I,
    branches: usize,
    config: &SeqConfig,
) -> Result<Vec<TeeBranch<I::IntoIter>>>
where
    I: IntoIterator,
    I::Item: Clone,
{
    config.check_tee_branches(branches)?;
    Ok(tee(iterable, branches))
}

impl<I: Iterator> TeeBranch<I> {
    /// Values pulled from the shared upstream so far, across all branches
    pub fn upstream_pulls(&self) -> usize {
        self.shared.borrow().pulls
    }

    /// Values waiting in this branch's buffer
    pub fn buffered(&self) -> usize {
        self.shared.borrow().buffers[self.index]
            .as_ref()
            .map_or(0, VecDeque::len)
    }
}

impl<I> Iterator for TeeBranch<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let mut guard = self.shared.borrow_mut();
        let shared = &mut *guard;

        if let Some(value) = shared.buffers[self.index]
            .as_mut()
            .and_then(VecDeque::pop_front)
        {
            return Some(value);
        }

        let value = shared.upstream.next()?;
        shared.pulls += 1;

        // Our own buffer is empty here, so pushing and popping it is a no-op
        for (index, buffer) in shared.buffers.iter_mut().enumerate() {
            if index == self.index {
                continue;
            }
            if let Some(buffer) = buffer {
                buffer.push_back(value.clone());
            }
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let shared = self.shared.borrow();
        let buffered = shared.buffers[self.index]
            .as_ref()
            .map_or(0, VecDeque::len);
        let (lower, upper) = shared.upstream.size_hint();
        (
            lower.saturating_add(buffered),
            upper.and_then(|u| u.checked_add(buffered)),
        )
    }
}

impl<I> FusedIterator for TeeBranch<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

impl<I: Iterator> Drop for TeeBranch<I> {
    fn drop(&mut self) {
        // Stop buffering for a reader that is gone
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.buffers[self.index] = None;
        }
    }
}
