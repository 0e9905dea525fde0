//! Input contracts for JSON calls.
//!
//! Each [`Operation`] declares the shape of its argument tuple. The shapes
//! compile to a JSON Schema (Draft 2020-12) `prefixItems` tuple and every call
//! is checked against it before any core logic runs, so the dispatch layer
//! only ever sees well-shaped arguments. Argument *values* (a count that is
//! too large, a step function that never stops) are not part of the contract.

use anyhow::{Context, Result, bail};
use jsonschema::Draft;
use serde_json::{Value, json};

use crate::func::UNIT_NAMES;

/// Shape of a single argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Any,
    Array,
    /// Array whose elements are all arrays.
    Arrays,
    /// Array of non-negative integers.
    Indices,
    Int,
    /// Non-negative integer.
    Count,
    /// A [`Func`](crate::func::Func) literal.
    Fun,
    /// Array of `Func` literals.
    Funs,
    /// `[back, front]`: two arrays.
    Pair,
}

impl Shape {
    pub fn label(self) -> &'static str {
        match self {
            Shape::Any => "any",
            Shape::Array => "array",
            Shape::Arrays => "array<array>",
            Shape::Indices => "array<count>",
            Shape::Int => "int",
            Shape::Count => "count",
            Shape::Fun => "fun",
            Shape::Funs => "array<fun>",
            Shape::Pair => "[array, array]",
        }
    }

    fn schema(self) -> Value {
        match self {
            Shape::Any => json!(true),
            Shape::Array => json!({"type": "array"}),
            Shape::Arrays => json!({"type": "array", "items": {"type": "array"}}),
            Shape::Indices => {
                json!({"type": "array", "items": {"type": "integer", "minimum": 0}})
            }
            Shape::Int => json!({"type": "integer"}),
            Shape::Count => json!({"type": "integer", "minimum": 0}),
            Shape::Fun => fun_schema(),
            Shape::Funs => json!({"type": "array", "items": fun_schema()}),
            Shape::Pair => json!({
                "type": "array",
                "prefixItems": [{"type": "array"}, {"type": "array"}],
                "items": false,
                "minItems": 2
            }),
        }
    }
}

fn fun_schema() -> Value {
    json!({
        "oneOf": [
            {"type": "string", "enum": UNIT_NAMES},
            {"type": "object", "minProperties": 1, "maxProperties": 1}
        ]
    })
}

/// Every operation reachable through the JSON call layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    All,
    Any,
    Ap,
    Append,
    Cartesian,
    CartesianN,
    Concat,
    Contains,
    Drop,
    DropWhile,
    Empty,
    Equal,
    Filter,
    First,
    FlatMap,
    Flatten,
    FlattenR,
    Fold,
    Get,
    Index,
    Insert,
    Intersect,
    IsArray,
    Iterate,
    IterateN,
    Last,
    LeftPad,
    Length,
    Map,
    Of,
    Partition,
    Permute,
    Pop,
    PopUnshift,
    Prepend,
    Push,
    PushShift,
    Range,
    ReIndex,
    Remove,
    Repeat,
    Reverse,
    RightPad,
    Sequence,
    Set,
    Shift,
    Slice,
    Sort,
    Span,
    SpanPrefix,
    Split,
    Take,
    TakeWhile,
    TakeWhilePrefix,
    Unfold,
    Union,
    Unique,
    Unshift,
    Update,
    ZipWith,
}

impl Operation {
    pub const ALL: &'static [Operation] = &[
        Operation::All,
        Operation::Any,
        Operation::Ap,
        Operation::Append,
        Operation::Cartesian,
        Operation::CartesianN,
        Operation::Concat,
        Operation::Contains,
        Operation::Drop,
        Operation::DropWhile,
        Operation::Empty,
        Operation::Equal,
        Operation::Filter,
        Operation::First,
        Operation::FlatMap,
        Operation::Flatten,
        Operation::FlattenR,
        Operation::Fold,
        Operation::Get,
        Operation::Index,
        Operation::Insert,
        Operation::Intersect,
        Operation::IsArray,
        Operation::Iterate,
        Operation::IterateN,
        Operation::Last,
        Operation::LeftPad,
        Operation::Length,
        Operation::Map,
        Operation::Of,
        Operation::Partition,
        Operation::Permute,
        Operation::Pop,
        Operation::PopUnshift,
        Operation::Prepend,
        Operation::Push,
        Operation::PushShift,
        Operation::Range,
        Operation::ReIndex,
        Operation::Remove,
        Operation::Repeat,
        Operation::Reverse,
        Operation::RightPad,
        Operation::Sequence,
        Operation::Set,
        Operation::Shift,
        Operation::Slice,
        Operation::Sort,
        Operation::Span,
        Operation::SpanPrefix,
        Operation::Split,
        Operation::Take,
        Operation::TakeWhile,
        Operation::TakeWhilePrefix,
        Operation::Unfold,
        Operation::Union,
        Operation::Unique,
        Operation::Unshift,
        Operation::Update,
        Operation::ZipWith,
    ];

    /// Public name and argument shapes, in call order.
    pub fn signature(self) -> (&'static str, &'static [Shape]) {
        use Shape::{Any, Array, Arrays, Count, Fun, Funs, Indices, Int, Pair};
        match self {
            Operation::All => ("all", &[Fun, Array]),
            Operation::Any => ("any", &[Fun, Array]),
            Operation::Ap => ("ap", &[Funs, Array]),
            Operation::Append => ("append", &[Any, Array]),
            Operation::Cartesian => ("cartesian", &[Array, Array]),
            Operation::CartesianN => ("cartesianN", &[Arrays]),
            Operation::Concat => ("concat", &[Array, Array]),
            Operation::Contains => ("contains", &[Any, Array]),
            Operation::Drop => ("drop", &[Count, Array]),
            Operation::DropWhile => ("dropWhile", &[Fun, Array]),
            Operation::Empty => ("empty", &[]),
            Operation::Equal => ("equal", &[Fun, Array, Array]),
            Operation::Filter => ("filter", &[Fun, Array]),
            Operation::First => ("first", &[Array]),
            Operation::FlatMap => ("flatMap", &[Fun, Array]),
            Operation::Flatten => ("flatten", &[Arrays]),
            Operation::FlattenR => ("flattenR", &[Array]),
            Operation::Fold => ("fold", &[Fun, Any, Array]),
            Operation::Get => ("get", &[Int, Array]),
            Operation::Index => ("index", &[Count]),
            Operation::Insert => ("insert", &[Count, Any, Array]),
            Operation::Intersect => ("intersect", &[Array, Array]),
            Operation::IsArray => ("isArray", &[Any]),
            Operation::Iterate => ("iterate", &[Fun, Fun, Any]),
            Operation::IterateN => ("iterateN", &[Fun, Count, Any]),
            Operation::Last => ("last", &[Array]),
            Operation::LeftPad => ("leftPad", &[Any, Count, Array]),
            Operation::Length => ("length", &[Array]),
            Operation::Map => ("map", &[Fun, Array]),
            Operation::Of => ("of", &[Any]),
            Operation::Partition => ("partition", &[Fun, Array]),
            Operation::Permute => ("permute", &[Array]),
            Operation::Pop => ("pop", &[Array]),
            Operation::PopUnshift => ("popUnshift", &[Pair]),
            Operation::Prepend => ("prepend", &[Any, Array]),
            Operation::Push => ("push", &[Any, Array]),
            Operation::PushShift => ("pushShift", &[Pair]),
            Operation::Range => ("range", &[Int, Int]),
            Operation::ReIndex => ("reIndex", &[Indices, Array]),
            Operation::Remove => ("remove", &[Count, Array]),
            Operation::Repeat => ("repeat", &[Count, Any]),
            Operation::Reverse => ("reverse", &[Array]),
            Operation::RightPad => ("rightPad", &[Any, Count, Array]),
            Operation::Sequence => ("sequence", &[Fun, Count]),
            Operation::Set => ("set", &[Count, Any, Array]),
            Operation::Shift => ("shift", &[Array]),
            Operation::Slice => ("slice", &[Int, Int, Array]),
            Operation::Sort => ("sort", &[Fun, Array]),
            Operation::Span => ("span", &[Fun, Array]),
            Operation::SpanPrefix => ("spanPrefix", &[Fun, Array]),
            Operation::Split => ("split", &[Count, Array]),
            Operation::Take => ("take", &[Count, Array]),
            Operation::TakeWhile => ("takeWhile", &[Fun, Array]),
            Operation::TakeWhilePrefix => ("takeWhilePrefix", &[Fun, Array]),
            Operation::Unfold => ("unfold", &[Fun, Fun, Any]),
            Operation::Union => ("union", &[Array, Array]),
            Operation::Unique => ("unique", &[Array]),
            Operation::Unshift => ("unshift", &[Any, Array]),
            Operation::Update => ("update", &[Count, Fun, Array]),
            Operation::ZipWith => ("zipWith", &[Fun, Array, Array]),
        }
    }

    pub fn name(self) -> &'static str {
        self.signature().0
    }

    pub fn shapes(self) -> &'static [Shape] {
        self.signature().1
    }

    pub fn arity(self) -> usize {
        self.shapes().len()
    }

    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// JSON Schema for the full argument tuple.
    pub fn schema(self) -> Value {
        let items: Vec<Value> = self.shapes().iter().map(|shape| shape.schema()).collect();
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "title": self.name(),
            "type": "array",
            "prefixItems": items,
            "items": false,
            "minItems": self.arity()
        })
    }
}

/// Reject `args` unless they match the argument contract of `op`.
///
/// The error lists every schema violation, prefixed by the operation name.
pub fn check_call(op: Operation, args: &[Value]) -> Result<()> {
    let schema = op.schema();
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .with_context(|| format!("compile contract for {}", op.name()))?;
    let instance = Value::Array(args.to_vec());
    let messages: Vec<String> = compiled
        .iter_errors(&instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!(
            "{} expects ({}), contract violated:\n- {}",
            op.name(),
            signature_label(op),
            messages.join("\n- ")
        );
    }
    Ok(())
}

/// Human-readable argument list, e.g. `fun, array`.
pub fn signature_label(op: Operation) -> String {
    op.shapes()
        .iter()
        .map(|shape| shape.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for op in Operation::ALL {
            assert!(seen.insert(op.name()), "duplicate name {}", op.name());
            assert_eq!(Operation::from_name(op.name()), Some(*op));
        }
        assert_eq!(Operation::from_name("nope"), None);
    }

    #[test]
    fn every_schema_compiles() {
        for op in Operation::ALL {
            jsonschema::options()
                .with_draft(Draft::Draft202012)
                .build(&op.schema())
                .unwrap_or_else(|err| panic!("{} schema: {err}", op.name()));
        }
    }

    #[test]
    fn accepts_well_shaped_call() {
        check_call(Operation::Take, &[json!(2), json!([4, 5, 6])]).expect("valid");
        check_call(Operation::Map, &[json!({"mul": 2}), json!([1])]).expect("valid");
        check_call(Operation::PopUnshift, &[json!([[1], []])]).expect("valid");
        check_call(Operation::Empty, &[]).expect("valid");
    }

    #[test]
    fn rejects_non_integer_count() {
        let err = check_call(Operation::Take, &[json!("2"), json!([4, 5, 6])])
            .expect_err("string count");
        let message = err.to_string();
        assert!(message.starts_with("take expects (count, array)"));
    }

    #[test]
    fn rejects_non_array_sequence() {
        let err = check_call(Operation::Map, &[json!("id"), json!(3)]).expect_err("scalar");
        assert!(err.to_string().contains("map"));
    }

    #[test]
    fn rejects_wrong_arity() {
        check_call(Operation::Cartesian, &[json!([1])]).expect_err("too few");
        check_call(Operation::Permute, &[json!([1]), json!([2])]).expect_err("too many");
    }

    #[test]
    fn rejects_malformed_pair() {
        check_call(Operation::PushShift, &[json!([[1, 2, 3]])]).expect_err("one half");
        check_call(Operation::PushShift, &[json!([[1], 2])]).expect_err("scalar half");
    }

    #[test]
    fn rejects_unknown_function_name() {
        check_call(Operation::Filter, &[json!("bogus"), json!([1])]).expect_err("unknown fn");
    }
}
