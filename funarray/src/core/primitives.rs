//! Thin, state-free sequence primitives.
//!
//! Every function borrows its input and returns a fresh `Vec`; nothing here
//! recurses or loops beyond a single pass. Indices past the end are clamped
//! (slicing) or ignored (point updates) rather than treated as errors, and
//! missing elements are reported as `None`.

use std::cmp::Ordering;

pub fn length<T>(a: &[T]) -> usize {
    a.len()
}

pub fn empty<T>() -> Vec<T> {
    Vec::new()
}

pub fn of<T>(value: T) -> Vec<T> {
    vec![value]
}

/// Element at `index`, or `None` when out of range.
pub fn get<T>(index: usize, a: &[T]) -> Option<&T> {
    a.get(index)
}

pub fn first<T>(a: &[T]) -> Option<&T> {
    a.first()
}

pub fn last<T>(a: &[T]) -> Option<&T> {
    a.last()
}

/// Copy of `a` with position `index` replaced by `value`.
///
/// An out-of-range index yields an unchanged copy.
pub fn set<T: Clone>(index: usize, value: T, a: &[T]) -> Vec<T> {
    let mut out = a.to_vec();
    if let Some(slot) = out.get_mut(index) {
        *slot = value;
    }
    out
}

/// Copy of `a` with position `index` replaced by `f(&a[index])`.
pub fn update<T, F>(index: usize, f: F, a: &[T]) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> T,
{
    match a.get(index) {
        Some(current) => set(index, f(current), a),
        None => a.to_vec(),
    }
}

pub fn take<T: Clone>(n: usize, a: &[T]) -> Vec<T> {
    a[..n.min(a.len())].to_vec()
}

pub fn drop<T: Clone>(n: usize, a: &[T]) -> Vec<T> {
    a[n.min(a.len())..].to_vec()
}

/// Elements in `[from, to)`, clamped to the sequence bounds.
pub fn slice<T: Clone>(from: usize, to: usize, a: &[T]) -> Vec<T> {
    let to = to.min(a.len());
    if from >= to {
        return Vec::new();
    }
    a[from..to].to_vec()
}

/// `(take(index), drop(index))`.
pub fn split<T: Clone>(index: usize, a: &[T]) -> (Vec<T>, Vec<T>) {
    (take(index, a), drop(index, a))
}

pub fn concat<T: Clone>(a1: &[T], a2: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(a1.len() + a2.len());
    out.extend_from_slice(a1);
    out.extend_from_slice(a2);
    out
}

pub fn append<T: Clone>(value: T, a: &[T]) -> Vec<T> {
    let mut out = a.to_vec();
    out.push(value);
    out
}

pub fn prepend<T: Clone>(value: T, a: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(a.len() + 1);
    out.push(value);
    out.extend_from_slice(a);
    out
}

/// Insert `value` before position `index` (clamped to the length).
pub fn insert<T: Clone>(index: usize, value: T, a: &[T]) -> Vec<T> {
    let mut out = a.to_vec();
    out.insert(index.min(a.len()), value);
    out
}

/// Copy of `a` without position `index`.
pub fn remove<T: Clone>(index: usize, a: &[T]) -> Vec<T> {
    a.iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, x)| x.clone())
        .collect()
}

pub fn map<T, U, F>(f: F, a: &[T]) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    a.iter().map(f).collect()
}

pub fn filter<T, P>(p: P, a: &[T]) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    a.iter().filter(|&x| p(x)).cloned().collect()
}

pub fn fold<T, A, F>(combine: F, init: A, a: &[T]) -> A
where
    F: Fn(A, &T) -> A,
{
    a.iter().fold(init, combine)
}

/// Pairwise combination, truncated to the shorter input.
pub fn zip_with<A, B, R, F>(f: F, a1: &[A], a2: &[B]) -> Vec<R>
where
    F: Fn(&A, &B) -> R,
{
    a1.iter().zip(a2).map(|(x, y)| f(x, y)).collect()
}

/// Positional equality under a caller-supplied element equality.
pub fn equal<T, E>(eq: E, a1: &[T], a2: &[T]) -> bool
where
    E: Fn(&T, &T) -> bool,
{
    a1.len() == a2.len() && a1.iter().zip(a2).all(|(x, y)| eq(x, y))
}

pub fn reverse<T: Clone>(a: &[T]) -> Vec<T> {
    a.iter().rev().cloned().collect()
}

/// Stable sort of a copy of `a`.
pub fn sort_by<T, C>(compare: C, a: &[T]) -> Vec<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    let mut out = a.to_vec();
    out.sort_by(compare);
    out
}

/// Longest prefix whose elements each satisfy `p`.
pub fn take_while<T, P>(p: P, a: &[T]) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    take(first_failure(&p, a), a)
}

/// Suffix starting at the first element that fails `p`.
pub fn drop_while<T, P>(p: P, a: &[T]) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    drop(first_failure(&p, a), a)
}

/// `(take_while(p), drop_while(p))`, judged one element at a time.
pub fn span<T, P>(p: P, a: &[T]) -> (Vec<T>, Vec<T>)
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    split(first_failure(&p, a), a)
}

fn first_failure<T, P>(p: &P, a: &[T]) -> usize
where
    P: Fn(&T) -> bool,
{
    a.iter().position(|x| !p(x)).unwrap_or(a.len())
}

/// `(filter(p), filter(!p))`.
pub fn partition<T, P>(p: P, a: &[T]) -> (Vec<T>, Vec<T>)
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    a.iter().cloned().partition(|x| p(x))
}

pub fn any<T, P>(p: P, a: &[T]) -> bool
where
    P: Fn(&T) -> bool,
{
    a.iter().any(p)
}

pub fn all<T, P>(p: P, a: &[T]) -> bool
where
    P: Fn(&T) -> bool,
{
    a.iter().all(p)
}

pub fn contains<T: PartialEq>(value: &T, a: &[T]) -> bool {
    a.contains(value)
}

/// First occurrence of each distinct element, in order.
///
/// Only `PartialEq` is required, so this is quadratic.
pub fn unique<T: Clone + PartialEq>(a: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for x in a {
        if !out.contains(x) {
            out.push(x.clone());
        }
    }
    out
}

pub fn union<T: Clone + PartialEq>(a1: &[T], a2: &[T]) -> Vec<T> {
    unique(&concat(a1, a2))
}

pub fn intersect<T: Clone + PartialEq>(a1: &[T], a2: &[T]) -> Vec<T> {
    filter(|x| a2.contains(x), &unique(a1))
}

/// Elements of `a` in the order given by `indices`.
pub fn re_index<T: Clone>(indices: &[usize], a: &[T]) -> Vec<Option<T>> {
    indices.iter().map(|&i| a.get(i).cloned()).collect()
}

/// Concatenate one level of nesting.
pub fn flatten<T: Clone>(a: &[Vec<T>]) -> Vec<T> {
    a.iter().flatten().cloned().collect()
}

pub fn flat_map<T, U, F>(f: F, a: &[T]) -> Vec<U>
where
    F: Fn(&T) -> Vec<U>,
{
    a.iter().flat_map(f).collect()
}

/// Pad on the left with `value` up to `len`; longer inputs are returned as-is.
pub fn left_pad<T: Clone>(value: T, len: usize, a: &[T]) -> Vec<T> {
    if a.len() >= len {
        return a.to_vec();
    }
    let mut out = vec![value; len - a.len()];
    out.extend_from_slice(a);
    out
}

/// Pad on the right with `value` up to `len`; longer inputs are returned as-is.
pub fn right_pad<T: Clone>(value: T, len: usize, a: &[T]) -> Vec<T> {
    if a.len() >= len {
        return a.to_vec();
    }
    let mut out = a.to_vec();
    out.resize(len, value);
    out
}

pub fn push<T: Clone>(value: T, a: &[T]) -> Vec<T> {
    append(value, a)
}

pub fn unshift<T: Clone>(value: T, a: &[T]) -> Vec<T> {
    prepend(value, a)
}

/// Everything but the last element.
pub fn pop<T: Clone>(a: &[T]) -> Vec<T> {
    take(a.len().saturating_sub(1), a)
}

/// Everything but the first element.
pub fn shift<T: Clone>(a: &[T]) -> Vec<T> {
    drop(1, a)
}
