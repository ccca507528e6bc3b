//! Eager consumers
//!
//! These drive an iterator and return a plain value. None of them bounds its
//! input: call `limit`, `slice` or `take_while` first on infinite sequences.

use std::fmt::{Display, Write};

/// Call `f` on every remaining value
pub fn for_each<I, F>(iterable: I, mut f: F)
where
    I: IntoIterator,
    F: FnMut(I::Item),
{
    for value in iterable {
        f(value);
    }
}

/// Left fold from `seed`
pub fn reduce<I, B, F>(iterable: I, seed: B, mut f: F) -> B
where
    I: IntoIterator,
    F: FnMut(B, I::Item) -> B,
{
    let mut acc = seed;
    for value in iterable {
        acc = f(acc, value);
    }
    acc
}

/// True at the first value matching `predicate`; the rest stays unread
pub fn some<I, P>(iterable: I, mut predicate: P) -> bool
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    for value in iterable {
        if predicate(&value) {
            return true;
        }
    }
    false
}

/// False at the first value failing `predicate`; the rest stays unread
pub fn every<I, P>(iterable: I, mut predicate: P) -> bool
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    for value in iterable {
        if !predicate(&value) {
            return false;
        }
    }
    true
}

pub fn to_array<I: IntoIterator>(iterable: I) -> Vec<I::Item> {
    iterable.into_iter().collect()
}

/// Display every value, separated by `separator`
pub fn join<I>(iterable: I, separator: &str) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut output = String::new();
    for (position, value) in iterable.into_iter().enumerate() {
        if position > 0 {
            output.push_str(separator);
        }
        // Writing into a String cannot fail
        let _ = write!(output, "{}", value);
    }
    output
}

/// Lockstep comparison; sequences of different lengths are unequal
///
/// `None` plays the fill value for whichever side ends first, and it can
/// never equal a real element.
pub fn equals<A, B>(a: A, b: B) -> bool
where
    A: IntoIterator,
    B: IntoIterator,
    A::Item: PartialEq<B::Item>,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => continue,
            _ => return false,
        }
    }
}

/// Next value, or `default` when the iterator has ended
pub fn next_or_value<I: Iterator>(iter: &mut I, default: I::Item) -> I::Item {
    iter.next().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::limit;
    use crate::source::{count, range};

    #[test]
    fn test_for_each() {
        let mut seen = Vec::new();
        for_each(vec![1, 2, 3], |x| seen.push(x * 10));
        assert_eq!(seen, vec![10, 20, 30]);
    }

    #[test]
    fn test_reduce() {
        assert_eq!(reduce(range(1, 5, 1).unwrap(), 0, |acc, x| acc + x), 10);
        assert_eq!(reduce(Vec::<i32>::new(), 7, |acc, x| acc + x), 7);
    }

    #[test]
    fn test_some_short_circuits_on_infinite() {
        assert!(some(count(0, 1), |&x| x > 100));

        let mut iter = range(0, 10, 1).unwrap();
        assert!(some(iter.by_ref(), |&x| x == 3));
        assert_eq!(iter.next(), Some(4));
    }

    #[test]
    fn test_every() {
        assert!(every(vec![2, 4, 6], |x| *x % 2 == 0));
        assert!(!every(count(0, 1), |&x| x < 5));
        assert!(every(Vec::<i32>::new(), |_| false));
    }

    #[test]
    fn test_to_array_is_sticky() {
        let mut iter = range(0, 3, 1).unwrap();
        assert_eq!(to_array(iter.by_ref()), vec![0, 1, 2]);
        assert!(to_array(iter.by_ref()).is_empty());
    }

    #[test]
    fn test_join() {
        assert_eq!(join(vec![1, 2, 3], ", "), "1, 2, 3");
        assert_eq!(join(Vec::<i32>::new(), ","), "");
        assert_eq!(join(limit(count(0, 2), 3), "-"), "0-2-4");
    }

    #[test]
    fn test_equals() {
        assert!(equals(vec![1, 2, 3], vec![1, 2, 3]));
        assert!(!equals(vec![1, 2], vec![1, 2, 3]));
        assert!(!equals(vec![1, 2, 3], vec![1, 2]));
        assert!(equals(Vec::<i32>::new(), Vec::<i32>::new()));
        // Option elements do not collide with the fill
        assert!(!equals(vec![Some(1), None], vec![Some(1)]));
    }

    #[test]
    fn test_next_or_value() {
        let mut iter = vec![1].into_iter();
        assert_eq!(next_or_value(&mut iter, 0), 1);
        assert_eq!(next_or_value(&mut iter, 0), 0);
    }
}
