//! Moving one element across the cut of a two-part split.
//!
//! A [`PairSplit`] `(back, front)` stands for `back ++ front` cut at
//! `back.len()`. Both operations rebuild the whole sequence and re-split it
//! one position to the left or right, so the concatenation never changes.

use crate::core::primitives::{concat, split};

/// `(back, front)`: a sequence cut at one point.
pub type PairSplit<T> = (Vec<T>, Vec<T>);

/// `back ++ front`.
pub fn join<T: Clone>(pair: &PairSplit<T>) -> Vec<T> {
    concat(&pair.0, &pair.1)
}

/// Move the last element of `back` to the front of `front`.
///
/// Returns an unchanged copy when `back` is empty.
pub fn pop_unshift<T: Clone>(pair: &PairSplit<T>) -> PairSplit<T> {
    let (back, _) = pair;
    if back.is_empty() {
        return pair.clone();
    }
    split(back.len() - 1, &join(pair))
}

/// Move the first element of `front` to the end of `back`.
///
/// Returns an unchanged copy when `front` is empty.
pub fn push_shift<T: Clone>(pair: &PairSplit<T>) -> PairSplit<T> {
    let (back, front) = pair;
    if front.is_empty() {
        return pair.clone();
    }
    split(back.len() + 1, &join(pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(back: &[i32], front: &[i32]) -> PairSplit<i32> {
        (back.to_vec(), front.to_vec())
    }

    #[test]
    fn pop_unshift_moves_last_of_back() {
        assert_eq!(pop_unshift(&pair(&[1, 2, 3], &[])), pair(&[1, 2], &[3]));
        assert_eq!(pop_unshift(&pair(&[1, 2], &[3])), pair(&[1], &[2, 3]));
        assert_eq!(pop_unshift(&pair(&[1], &[2, 3])), pair(&[], &[1, 2, 3]));
    }

    #[test]
    fn pop_unshift_is_noop_on_empty_back() {
        assert_eq!(pop_unshift(&pair(&[], &[1, 2, 3])), pair(&[], &[1, 2, 3]));
    }

    #[test]
    fn push_shift_moves_first_of_front() {
        assert_eq!(push_shift(&pair(&[], &[1, 2, 3])), pair(&[1], &[2, 3]));
        assert_eq!(push_shift(&pair(&[1], &[2, 3])), pair(&[1, 2], &[3]));
        assert_eq!(push_shift(&pair(&[1, 2], &[3])), pair(&[1, 2, 3], &[]));
    }

    #[test]
    fn push_shift_is_noop_on_empty_front() {
        assert_eq!(push_shift(&pair(&[1, 2, 3], &[])), pair(&[1, 2, 3], &[]));
    }

    #[test]
    fn operations_invert_each_other() {
        let p = pair(&[1, 2], &[3, 4]);
        assert_eq!(push_shift(&pop_unshift(&p)), p);
        assert_eq!(pop_unshift(&push_shift(&p)), p);
        assert_eq!(join(&pop_unshift(&p)), join(&p));
    }
}
