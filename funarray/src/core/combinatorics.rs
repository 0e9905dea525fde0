//! Permutations and cartesian products.

use crate::core::primitives::append;

/// All orderings of `a`, lexicographic by original position.
///
/// Elements are distinguished by position, so duplicate values still give
/// `n!` results. The empty input has no permutations and yields `[]`.
///
/// The order matches the recursive construction "for each index `i`, prepend
/// `a[i]` to every permutation of `a` without `i`", but is produced by
/// stepping an index vector through lexicographic successors, so stack use
/// stays constant.
pub fn permute<T: Clone>(a: &[T]) -> Vec<Vec<T>> {
    if a.is_empty() {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..a.len()).collect();
    let mut out: Vec<Vec<T>> = Vec::new();
    loop {
        out.push(indices.iter().map(|&i| a[i].clone()).collect());
        if !next_permutation(&mut indices) {
            return out;
        }
    }
}

/// `n!`, or `None` when it does not fit in `usize`.
pub fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}

/// Advance `v` to its lexicographic successor in place.
///
/// Returns `false` (leaving `v` untouched) when `v` is already the last
/// permutation.
fn next_permutation(v: &mut [usize]) -> bool {
    let Some(pivot) = v.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let Some(swap) = v.iter().rposition(|&x| x > v[pivot]) else {
        return false;
    };
    v.swap(pivot, swap);
    v[pivot + 1..].reverse();
    true
}

/// Every `(i, j)` with `i` from `a1` (outer) and `j` from `a2` (inner).
pub fn cartesian<A: Clone, B: Clone>(a1: &[A], a2: &[B]) -> Vec<(A, B)> {
    a1.iter()
        .flat_map(|i| a2.iter().map(move |j| (i.clone(), j.clone())))
        .collect()
}

/// N-fold cartesian product, folding left from the single empty tuple.
///
/// `cartesian_n(&[])` is `[[]]`; any empty component collapses the product
/// to `[]`.
pub fn cartesian_n<T: Clone>(arrays: &[Vec<T>]) -> Vec<Vec<T>> {
    arrays.iter().fold(vec![Vec::new()], |tuples, next| {
        cartesian(&tuples, next)
            .into_iter()
            .map(|(tuple, component)| append(component, &tuple))
            .collect()
    })
}
