//! Arbitrarily nested sequences and their recursive flattening.

use serde::{Deserialize, Serialize};

use crate::core::unfold::unfold;

/// An element that is either a plain value or a further sequence.
///
/// Serialized untagged, so JSON `[0, [1, [2]]]` reads directly as a
/// `Vec<Nested<i64>>`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Nested<T> {
    List(Vec<Nested<T>>),
    Atom(T),
}

impl<T> Nested<T> {
    pub fn is_list(&self) -> bool {
        matches!(self, Nested::List(_))
    }
}

/// Remove one level of nesting: list elements are spliced in, atoms kept.
pub fn flatten_once<T>(a: Vec<Nested<T>>) -> Vec<Nested<T>> {
    let mut out = Vec::with_capacity(a.len());
    for item in a {
        match item {
            Nested::List(items) => out.extend(items),
            atom @ Nested::Atom(_) => out.push(atom),
        }
    }
    out
}

/// Flatten until no element is itself a list, then unwrap the atoms.
pub fn flatten_r<T>(a: Vec<Nested<T>>) -> Vec<T> {
    unfold(
        flatten_once,
        |xs: &Vec<Nested<T>>| !xs.iter().any(Nested::is_list),
        a,
    )
    .into_iter()
    .filter_map(|item| match item {
        Nested::Atom(value) => Some(value),
        Nested::List(_) => None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{atom, list};

    #[test]
    fn flatten_r_collapses_every_level() {
        let input = vec![
            atom(0),
            list(vec![atom(1), list(vec![atom(2), list(vec![atom(7)])])]),
        ];
        assert_eq!(flatten_r(input), vec![0, 1, 2, 7]);
    }

    #[test]
    fn flatten_once_removes_a_single_level() {
        let input = vec![
            list(vec![atom(0)]),
            list(vec![atom(1), atom(2)]),
            list(vec![list(vec![atom(7)])]),
        ];
        assert_eq!(
            flatten_once(input),
            vec![atom(0), atom(1), atom(2), list(vec![atom(7)])]
        );
    }

    #[test]
    fn flatten_r_drops_empty_lists() {
        let input = vec![list(vec![]), atom(3), list(vec![list(vec![])])];
        assert_eq!(flatten_r(input), vec![3]);
    }

    #[test]
    fn deserializes_untagged_json() {
        let parsed: Vec<Nested<i64>> = serde_json::from_str("[0,[1,[2,[7]]]]").expect("json");
        assert_eq!(parsed[0], atom(0));
        assert!(parsed[1].is_list());
        assert_eq!(flatten_r(parsed), vec![0, 1, 2, 7]);
    }
}
