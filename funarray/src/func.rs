//! Named functions for callers that cannot pass closures.
//!
//! JSON callers encode a step function, predicate, comparator or combiner as
//! a `Func` literal: unit variants are bare strings (`"id"`, `"asc"`), the
//! rest are single-key objects (`{"mul": 2}`, `{"len_lt": 3}`).
//!
//! Every method is total. Arithmetic on a non-number yields `null` (the
//! absent value) and a predicate on an unsuitable value is `false`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Func {
    /// `x -> x`.
    Id,
    /// `x -> x + n`.
    Add(Number),
    /// `x -> x - n`.
    Sub(Number),
    /// `x -> x * n`.
    Mul(Number),
    /// `x -> x / n`.
    Div(Number),
    /// `x -> v`.
    Const(Value),
    /// `xs -> xs ++ [v]`.
    Append(Value),
    /// `n -> [0, 1, ..., n]`.
    Upto,
    Gt(Number),
    Lt(Number),
    Gte(Number),
    Lte(Number),
    Eq(Value),
    Not(Box<Func>),
    IsArray,
    /// Prefix predicate: fewer than `n` elements.
    LenLt(usize),
    /// Prefix predicate: exactly `n` elements.
    LenEq(usize),
    /// Prefix predicate: every element equals `v`.
    AllEq(Value),
    /// Ascending comparator over [`compare_values`].
    Asc,
    /// Descending comparator over [`compare_values`].
    Desc,
    /// Combiner `(a, b) -> a + b`.
    Plus,
    /// Combiner `(a, b) -> a - b`.
    Minus,
    /// Combiner `(a, b) -> a * b`.
    Times,
    /// Combiner `(a, b) -> a == b`.
    StrictEq,
}

/// Names of the unit variants, as they appear in JSON.
pub const UNIT_NAMES: &[&str] = &[
    "id", "upto", "is_array", "asc", "desc", "plus", "minus", "times", "strict_eq",
];

#[derive(Clone, Copy)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
}

impl Func {
    /// Apply as a unary function.
    pub fn apply(&self, x: &Value) -> Value {
        match self {
            Func::Id => x.clone(),
            Func::Add(n) => arith(x, &Value::Number(n.clone()), Arith::Add),
            Func::Sub(n) => arith(x, &Value::Number(n.clone()), Arith::Sub),
            Func::Mul(n) => arith(x, &Value::Number(n.clone()), Arith::Mul),
            Func::Div(n) => arith(x, &Value::Number(n.clone()), Arith::Div),
            Func::Const(v) => v.clone(),
            Func::Append(v) => match x {
                Value::Array(items) => {
                    let mut out = items.clone();
                    out.push(v.clone());
                    Value::Array(out)
                }
                _ => Value::Null,
            },
            Func::Upto => match x.as_u64() {
                Some(n) => Value::Array((0..=n).map(Value::from).collect()),
                None => Value::Null,
            },
            Func::Gt(_)
            | Func::Lt(_)
            | Func::Gte(_)
            | Func::Lte(_)
            | Func::Eq(_)
            | Func::Not(_)
            | Func::IsArray
            | Func::LenLt(_)
            | Func::LenEq(_)
            | Func::AllEq(_) => Value::Bool(self.test(x)),
            Func::Asc | Func::Desc | Func::Plus | Func::Minus | Func::Times | Func::StrictEq => {
                Value::Null
            }
        }
    }

    /// Apply as a predicate over a single value.
    pub fn test(&self, x: &Value) -> bool {
        match self {
            Func::Gt(n) => number_cmp(x, n) == Some(Ordering::Greater),
            Func::Lt(n) => number_cmp(x, n) == Some(Ordering::Less),
            Func::Gte(n) => matches!(
                number_cmp(x, n),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Func::Lte(n) => matches!(number_cmp(x, n), Some(Ordering::Less | Ordering::Equal)),
            Func::Eq(v) => x == v,
            Func::Not(inner) => !inner.test(x),
            Func::IsArray => x.is_array(),
            Func::LenLt(_) | Func::LenEq(_) | Func::AllEq(_) => match x {
                Value::Array(items) => self.test_prefix(items),
                _ => false,
            },
            Func::Const(v) => v.as_bool().unwrap_or(false),
            Func::Upto => false,
            _ => self.apply(x).as_bool().unwrap_or(false),
        }
    }

    /// Apply as a predicate over a candidate prefix.
    pub fn test_prefix(&self, prefix: &[Value]) -> bool {
        match self {
            Func::LenLt(n) => prefix.len() < *n,
            Func::LenEq(n) => prefix.len() == *n,
            Func::AllEq(v) => prefix.iter().all(|x| x == v),
            Func::Not(inner) => !inner.test_prefix(prefix),
            _ => self.test(&Value::Array(prefix.to_vec())),
        }
    }

    /// Number of elements `apply(x)` allocates for a fresh array.
    ///
    /// Only `upto` builds an array whose size is driven by the argument;
    /// every other function is bounded by the size of its input.
    pub fn built_len(&self, x: &Value) -> usize {
        match self {
            Func::Upto => x.as_u64().map_or(0, |n| {
                usize::try_from(n).map_or(usize::MAX, |n| n.saturating_add(1))
            }),
            _ => 0,
        }
    }

    /// Apply as a binary combiner.
    pub fn combine(&self, a: &Value, b: &Value) -> Value {
        match self {
            Func::Plus => arith(a, b, Arith::Add),
            Func::Minus => arith(a, b, Arith::Sub),
            Func::Times => arith(a, b, Arith::Mul),
            Func::StrictEq => Value::Bool(a == b),
            _ => Value::Null,
        }
    }

    /// Apply as a comparator; non-comparators treat everything as equal.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match self {
            Func::Asc => compare_values(a, b),
            Func::Desc => compare_values(b, a),
            _ => Ordering::Equal,
        }
    }
}

fn number_cmp(x: &Value, n: &Number) -> Option<Ordering> {
    let x = x.as_f64()?;
    let n = n.as_f64()?;
    x.partial_cmp(&n)
}

fn arith(a: &Value, b: &Value, op: Arith) -> Value {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        let exact = match op {
            Arith::Add => x.checked_add(y),
            Arith::Sub => x.checked_sub(y),
            Arith::Mul => x.checked_mul(y),
            Arith::Div => match x.checked_rem(y) {
                Some(0) => x.checked_div(y),
                _ => None,
            },
        };
        if let Some(result) = exact {
            return Value::from(result);
        }
    }
    let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) else {
        return Value::Null;
    };
    let result = match op {
        Arith::Add => x + y,
        Arith::Sub => x - y,
        Arith::Mul => x * y,
        Arith::Div => x / y,
    };
    Number::from_f64(result).map_or(Value::Null, Value::Number)
}

/// Total order over JSON values.
///
/// Values of different kinds order as null < bool < number < string < array
/// < object; arrays compare lexicographically and objects compare equal.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(xs), Value::Array(ys)) => xs
            .iter()
            .zip(ys)
            .map(|(x, y)| compare_values(x, y))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| xs.len().cmp(&ys.len())),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn func(value: Value) -> Func {
        serde_json::from_value(value).expect("func literal")
    }

    #[test]
    fn decodes_unit_and_keyed_literals() {
        assert_eq!(func(json!("id")), Func::Id);
        assert_eq!(func(json!({"len_lt": 3})), Func::LenLt(3));
        assert_eq!(func(json!({"not": {"gt": 1}})), Func::Not(Box::new(func(json!({"gt": 1})))));
        for name in UNIT_NAMES {
            serde_json::from_value::<Func>(json!(name)).expect("unit name decodes");
        }
    }

    #[test]
    fn arithmetic_stays_integral() {
        assert_eq!(func(json!({"mul": 2})).apply(&json!(4)), json!(8));
        assert_eq!(func(json!({"add": 3})).apply(&json!(1)), json!(4));
        assert_eq!(func(json!({"div": 2})).apply(&json!(3)), json!(1.5));
        assert_eq!(func(json!({"div": 0})).apply(&json!(3)), Value::Null);
        assert_eq!(func(json!({"mul": 2})).apply(&json!("a")), Value::Null);
    }

    #[test]
    fn predicates_are_total() {
        let gt5 = func(json!({"gt": 5}));
        assert!(gt5.test(&json!(8)));
        assert!(!gt5.test(&json!(5)));
        assert!(!gt5.test(&json!("x")));
        assert!(func(json!({"lte": 5})).test(&json!(5)));
        assert!(func(json!({"eq": "a"})).test(&json!("a")));
        assert!(func(json!({"not": "is_array"})).test(&json!(1)));
    }

    #[test]
    fn prefix_predicates_see_whole_prefix() {
        let lt3 = func(json!({"len_lt": 3}));
        assert!(lt3.test_prefix(&[json!(1), json!(2)]));
        assert!(!lt3.test_prefix(&[json!(1), json!(2), json!(3)]));
        assert!(func(json!({"all_eq": 2})).test_prefix(&[json!(2), json!(2)]));
        assert!(func(json!({"len_eq": 2})).test(&json!([0, 0])));
    }

    #[test]
    fn combiners_and_comparators() {
        assert_eq!(Func::Plus.combine(&json!(1), &json!(2)), json!(3));
        assert_eq!(Func::StrictEq.combine(&json!(1), &json!("1")), json!(false));
        assert_eq!(Func::Desc.compare(&json!(1), &json!(2)), Ordering::Greater);
        assert_eq!(compare_values(&json!([1, 2]), &json!([1])), Ordering::Greater);
        assert_eq!(compare_values(&Value::Null, &json!(0)), Ordering::Less);
    }

    #[test]
    fn upto_and_append_build_arrays() {
        assert_eq!(Func::Upto.apply(&json!(2)), json!([0, 1, 2]));
        assert_eq!(Func::Upto.built_len(&json!(2)), 3);
        assert_eq!(Func::Upto.built_len(&json!("x")), 0);
        assert_eq!(Func::Id.built_len(&json!(10_000_000_000u64)), 0);
        assert!(!Func::Upto.test(&json!(10_000_000_000u64)));
        assert_eq!(func(json!({"append": 1})).apply(&json!([])), json!([1]));
    }
}
