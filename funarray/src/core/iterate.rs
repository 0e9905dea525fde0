//! Sequence builders driven by a step function or an index function.
//!
//! `iterate` and `iterate_n` carry the accumulated vector as the state of
//! [`unfold`]; the stopping test looks at the most recently added element
//! (or at the length) and the step appends `f(last)`.

use crate::core::unfold::{unfold, unfold_bounded};

/// `[f(0), f(1), ..., f(n - 1)]`.
pub fn sequence<T, F>(f: F, n: usize) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..n).map(f).collect()
}

/// `n` copies of `value`.
pub fn repeat<T: Clone>(n: usize, value: T) -> Vec<T> {
    sequence(|_| value.clone(), n)
}

/// `[first, first + 1, ..., last]`; empty when `last < first`.
pub fn range(first: i64, last: i64) -> Vec<i64> {
    (first..=last).collect()
}

/// `[0, 1, ..., n - 1]`.
pub fn index(n: usize) -> Vec<usize> {
    sequence(|i| i, n)
}

/// `[seed, f(seed), f(f(seed)), ...]`, ending with the first element that
/// satisfies `stop`.
///
/// Does not terminate if no element of the orbit ever satisfies `stop`.
pub fn iterate<T, F, P>(f: F, stop: P, seed: T) -> Vec<T>
where
    F: Fn(&T) -> T,
    P: Fn(&T) -> bool,
{
    unfold(
        |xs| step_last(&f, xs),
        |xs: &Vec<T>| xs.last().is_some_and(&stop),
        vec![seed],
    )
}

/// `[seed, f(seed), ...]` with exactly `n` elements.
///
/// The stopping test is "length exceeds `n - 1`", so `n = 0` still yields
/// `[seed]`.
pub fn iterate_n<T, F>(f: F, n: usize, seed: T) -> Vec<T>
where
    F: Fn(&T) -> T,
{
    unfold(
        |xs| step_last(&f, xs),
        |xs: &Vec<T>| xs.len() >= n,
        vec![seed],
    )
}

/// [`iterate`] that gives up once the result would exceed `max_len` elements.
pub fn iterate_bounded<T, F, P>(f: F, stop: P, seed: T, max_len: usize) -> Option<Vec<T>>
where
    F: Fn(&T) -> T,
    P: Fn(&T) -> bool,
{
    unfold_bounded(
        |xs| step_last(&f, xs),
        |xs: &Vec<T>| xs.last().is_some_and(&stop),
        vec![seed],
        max_len.saturating_sub(1),
    )
}

fn step_last<T, F>(f: &F, mut xs: Vec<T>) -> Vec<T>
where
    F: Fn(&T) -> T,
{
    if let Some(next) = xs.last().map(f) {
        xs.push(next);
    }
    xs
}
