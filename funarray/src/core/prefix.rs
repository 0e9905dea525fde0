//! Lookahead prefix scanning.
//!
//! Unlike the element-wise `take_while`/`span` in
//! [`primitives`](crate::core::primitives), the predicate here judges the
//! whole candidate prefix `r ++ [x]`, so it can express conditions such as
//! "at most three elements" or "running sum below a bound".

use crate::core::primitives::split;

/// Longest prefix `r` of `source` such that `p` held for every candidate
/// extension on the way to `r`.
///
/// Scanning stops at the first element whose candidate prefix fails `p`;
/// that element is not included.
pub fn take_while_prefix<T, P>(p: P, source: &[T]) -> Vec<T>
where
    T: Clone,
    P: Fn(&[T]) -> bool,
{
    let mut prefix = Vec::new();
    for x in source {
        prefix.push(x.clone());
        if !p(&prefix) {
            prefix.pop();
            break;
        }
    }
    prefix
}

/// `(take_while_prefix(p, a), rest)`; the two halves always concatenate
/// back to `a`.
pub fn span_prefix<T, P>(p: P, a: &[T]) -> (Vec<T>, Vec<T>)
where
    T: Clone,
    P: Fn(&[T]) -> bool,
{
    split(take_while_prefix(p, a).len(), a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length_lt3(r: &[i32]) -> bool {
        r.len() < 3
    }

    fn length3(r: &[i32]) -> bool {
        r.len() == 3
    }

    #[test]
    fn take_while_prefix_sees_candidate_prefix() {
        assert_eq!(take_while_prefix(length_lt3, &[1, 2, 3, 4, 5]), vec![1, 2]);
        assert_eq!(take_while_prefix(length3, &[1, 2, 3, 4, 5]), Vec::<i32>::new());
    }

    #[test]
    fn take_while_prefix_all_equal() {
        let all_two = |r: &[i32]| r.iter().all(|x| *x == 2);
        assert_eq!(take_while_prefix(all_two, &[2, 2, 3, 2]), vec![2, 2]);
        assert_eq!(take_while_prefix(all_two, &[2, 2]), vec![2, 2]);
    }

    #[test]
    fn take_while_prefix_running_sum() {
        let under_ten = |r: &[i32]| r.iter().sum::<i32>() < 10;
        assert_eq!(take_while_prefix(under_ten, &[4, 3, 2, 5, 1]), vec![4, 3, 2]);
    }

    #[test]
    fn span_prefix_splits_after_prefix() {
        assert_eq!(
            span_prefix(length_lt3, &[1, 2, 3, 4, 5]),
            (vec![1, 2], vec![3, 4, 5])
        );
        assert_eq!(
            span_prefix(length3, &[1, 2, 3, 4, 5]),
            (vec![], vec![1, 2, 3, 4, 5])
        );
    }
}
