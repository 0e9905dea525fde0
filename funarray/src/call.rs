//! JSON dispatch onto the typed core.
//!
//! [`invoke`] checks the argument contract, decodes the arguments into typed
//! values (`serde_json::Value` elements, [`Func`] literals, [`Nested`] trees,
//! [`PairSplit`] pairs), runs exactly one core function, and encodes the
//! result. Absent values are encoded as `null`.

use std::fmt;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::contract::{Operation, check_call};
use crate::core::combinatorics::{cartesian, cartesian_n, factorial, permute};
use crate::core::iterate::{index, iterate_bounded, iterate_n, range, repeat, sequence};
use crate::core::nested::{Nested, flatten_r};
use crate::core::pair::{PairSplit, pop_unshift, push_shift};
use crate::core::prefix::{span_prefix, take_while_prefix};
use crate::core::primitives as prim;
use crate::core::unfold::unfold_bounded;
use crate::func::Func;
use crate::io::config::Limits;

/// A call was well-shaped but would exceed a configured resource limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitExceeded {
    pub limit: &'static str,
    pub requested: usize,
    pub max: usize,
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} exceeded: requested {}, max {}",
            self.limit, self.requested, self.max
        )
    }
}

impl std::error::Error for LimitExceeded {}

/// Invoke `op` by name.
pub fn invoke_named(name: &str, args: &[Value], limits: &Limits) -> Result<Value> {
    let op = Operation::from_name(name).ok_or_else(|| anyhow!("unknown operation '{name}'"))?;
    invoke(op, args, limits)
}

/// Validate, decode, and run one operation.
pub fn invoke(op: Operation, args: &[Value], limits: &Limits) -> Result<Value> {
    debug!(op = op.name(), args = args.len(), "invoke");
    if let Err(err) = check_call(op, args) {
        warn!(op = op.name(), "call rejected by contract");
        return Err(err);
    }
    dispatch(op, args, limits).with_context(|| format!("{} failed", op.name()))
}

fn dispatch(op: Operation, args: &[Value], limits: &Limits) -> Result<Value> {
    match op {
        Operation::All => {
            let f = func(&args[0])?;
            encode(prim::all(|x| f.test(x), array(&args[1])?))
        }
        Operation::Any => {
            let f = func(&args[0])?;
            encode(prim::any(|x| f.test(x), array(&args[1])?))
        }
        Operation::Ap => {
            let fs: Vec<Func> = decode(&args[0], "functions")?;
            let a = array(&args[1])?;
            let built = fs
                .iter()
                .zip(a)
                .fold(0usize, |acc, (f, x)| acc.saturating_add(f.built_len(x)));
            within("max_result_len", built, limits.max_result_len)?;
            let applied = a
                .iter()
                .enumerate()
                .map(|(i, x)| fs.get(i).map_or_else(|| x.clone(), |f| f.apply(x)))
                .collect::<Vec<_>>();
            encode(applied)
        }
        Operation::Append => encode(prim::append(args[0].clone(), array(&args[1])?)),
        Operation::Cartesian => {
            let (a1, a2) = (array(&args[0])?, array(&args[1])?);
            within(
                "max_result_len",
                a1.len().saturating_mul(a2.len()),
                limits.max_result_len,
            )?;
            encode(cartesian(a1, a2))
        }
        Operation::CartesianN => {
            let arrays: Vec<Vec<Value>> = decode(&args[0], "arrays")?;
            // The fold materializes every prefix product, not just the last.
            let mut size = 1usize;
            for a in &arrays {
                size = size.saturating_mul(a.len());
                within("max_result_len", size, limits.max_result_len)?;
            }
            encode(cartesian_n(&arrays))
        }
        Operation::Concat => encode(prim::concat(array(&args[0])?, array(&args[1])?)),
        Operation::Contains => encode(prim::contains(&args[0], array(&args[1])?)),
        Operation::Drop => encode(prim::drop(count(&args[0])?, array(&args[1])?)),
        Operation::DropWhile => {
            let f = func(&args[0])?;
            encode(prim::drop_while(|x| f.test(x), array(&args[1])?))
        }
        Operation::Empty => encode(prim::empty::<Value>()),
        Operation::Equal => {
            let f = func(&args[0])?;
            let eq = |a: &Value, b: &Value| f.combine(a, b).as_bool().unwrap_or(false);
            encode(prim::equal(eq, array(&args[1])?, array(&args[2])?))
        }
        Operation::Filter => {
            let f = func(&args[0])?;
            encode(prim::filter(|x| f.test(x), array(&args[1])?))
        }
        Operation::First => Ok(absent(prim::first(array(&args[0])?))),
        Operation::FlatMap => {
            let f = func(&args[0])?;
            let a = array(&args[1])?;
            within_built(&f, a, limits)?;
            encode(prim::flat_map(|x| spread(f.apply(x)), a))
        }
        Operation::Flatten => {
            let arrays: Vec<Vec<Value>> = decode(&args[0], "arrays")?;
            encode(prim::flatten(&arrays))
        }
        Operation::FlattenR => {
            let nested: Vec<Nested<Value>> = decode(&args[0], "nested array")?;
            encode(flatten_r(nested))
        }
        Operation::Fold => {
            let f = func(&args[0])?;
            encode(prim::fold(
                |acc, x| f.combine(&acc, x),
                args[1].clone(),
                array(&args[2])?,
            ))
        }
        Operation::Get => {
            let a = array(&args[1])?;
            let value = usize::try_from(int(&args[0])?)
                .ok()
                .and_then(|i| prim::get(i, a));
            Ok(absent(value))
        }
        Operation::Index => {
            let n = count(&args[0])?;
            within("max_result_len", n, limits.max_result_len)?;
            encode(index(n))
        }
        Operation::Insert => encode(prim::insert(
            count(&args[0])?,
            args[1].clone(),
            array(&args[2])?,
        )),
        Operation::Intersect => encode(prim::intersect(array(&args[0])?, array(&args[1])?)),
        Operation::IsArray => encode(args[0].is_array()),
        Operation::Iterate => {
            let (f, stop) = (func(&args[0])?, func(&args[1])?);
            within_built(&f, &args[2..], limits)?;
            let max = limits.max_unfold_steps;
            let out = iterate_bounded(|x| f.apply(x), |x| stop.test(x), args[2].clone(), max)
                .ok_or_else(|| steps_exhausted(max))?;
            encode(out)
        }
        Operation::IterateN => {
            let f = func(&args[0])?;
            let n = count(&args[1])?;
            within("max_result_len", n, limits.max_result_len)?;
            within_built(&f, &args[2..], limits)?;
            encode(iterate_n(|x| f.apply(x), n, args[2].clone()))
        }
        Operation::Last => Ok(absent(prim::last(array(&args[0])?))),
        Operation::LeftPad => {
            let n = count(&args[1])?;
            within("max_result_len", n, limits.max_result_len)?;
            encode(prim::left_pad(args[0].clone(), n, array(&args[2])?))
        }
        Operation::Length => encode(prim::length(array(&args[0])?)),
        Operation::Map => {
            let f = func(&args[0])?;
            let a = array(&args[1])?;
            within_built(&f, a, limits)?;
            encode(prim::map(|x| f.apply(x), a))
        }
        Operation::Of => encode(prim::of(args[0].clone())),
        Operation::Partition => {
            let f = func(&args[0])?;
            encode(prim::partition(|x| f.test(x), array(&args[1])?))
        }
        Operation::Permute => {
            let a = array(&args[0])?;
            within("max_permute_len", a.len(), limits.max_permute_len)?;
            let size = factorial(a.len()).unwrap_or(usize::MAX);
            within("max_result_len", size, limits.max_result_len)?;
            encode(permute(a))
        }
        Operation::Pop => encode(prim::pop(array(&args[0])?)),
        Operation::PopUnshift => encode(pop_unshift(&pair(&args[0])?)),
        Operation::Prepend => encode(prim::prepend(args[0].clone(), array(&args[1])?)),
        Operation::Push => encode(prim::push(args[0].clone(), array(&args[1])?)),
        Operation::PushShift => encode(push_shift(&pair(&args[0])?)),
        Operation::Range => {
            let (first, last) = (int(&args[0])?, int(&args[1])?);
            let len = usize::try_from(last.saturating_sub(first).saturating_add(1)).unwrap_or(0);
            within("max_result_len", len, limits.max_result_len)?;
            encode(range(first, last))
        }
        Operation::ReIndex => {
            let indices = array(&args[0])?
                .iter()
                .map(count)
                .collect::<Result<Vec<usize>>>()?;
            encode(prim::re_index(&indices, array(&args[1])?))
        }
        Operation::Remove => encode(prim::remove(count(&args[0])?, array(&args[1])?)),
        Operation::Repeat => {
            let n = count(&args[0])?;
            within("max_result_len", n, limits.max_result_len)?;
            encode(repeat(n, args[1].clone()))
        }
        Operation::Reverse => encode(prim::reverse(array(&args[0])?)),
        Operation::RightPad => {
            let n = count(&args[1])?;
            within("max_result_len", n, limits.max_result_len)?;
            encode(prim::right_pad(args[0].clone(), n, array(&args[2])?))
        }
        Operation::Sequence => {
            let f = func(&args[0])?;
            let n = count(&args[1])?;
            within("max_result_len", n, limits.max_result_len)?;
            let indices: Vec<Value> = (0..n).map(Value::from).collect();
            within_built(&f, &indices, limits)?;
            encode(sequence(|i| f.apply(&Value::from(i)), n))
        }
        Operation::Set => encode(prim::set(
            count(&args[0])?,
            args[1].clone(),
            array(&args[2])?,
        )),
        Operation::Shift => encode(prim::shift(array(&args[0])?)),
        Operation::Slice => {
            let a = array(&args[2])?;
            let from = resolve_index(int(&args[0])?, a.len());
            let to = resolve_index(int(&args[1])?, a.len());
            encode(prim::slice(from, to, a))
        }
        Operation::Sort => {
            let f = func(&args[0])?;
            encode(prim::sort_by(|a, b| f.compare(a, b), array(&args[1])?))
        }
        Operation::Span => {
            let f = func(&args[0])?;
            encode(prim::span(|x| f.test(x), array(&args[1])?))
        }
        Operation::SpanPrefix => {
            let f = func(&args[0])?;
            encode(span_prefix(|r| f.test_prefix(r), array(&args[1])?))
        }
        Operation::Split => encode(prim::split(count(&args[0])?, array(&args[1])?)),
        Operation::Take => encode(prim::take(count(&args[0])?, array(&args[1])?)),
        Operation::TakeWhile => {
            let f = func(&args[0])?;
            encode(prim::take_while(|x| f.test(x), array(&args[1])?))
        }
        Operation::TakeWhilePrefix => {
            let f = func(&args[0])?;
            encode(take_while_prefix(|r| f.test_prefix(r), array(&args[1])?))
        }
        Operation::Unfold => {
            let (next, stop) = (func(&args[0])?, func(&args[1])?);
            within_built(&next, &args[2..], limits)?;
            let max = limits.max_unfold_steps;
            let state = unfold_bounded(|s| next.apply(&s), |s| stop.test(s), args[2].clone(), max)
                .ok_or_else(|| steps_exhausted(max))?;
            Ok(state)
        }
        Operation::Union => encode(prim::union(array(&args[0])?, array(&args[1])?)),
        Operation::Unique => encode(prim::unique(array(&args[0])?)),
        Operation::Unshift => encode(prim::unshift(args[0].clone(), array(&args[1])?)),
        Operation::Update => {
            let f = func(&args[1])?;
            let (index, a) = (count(&args[0])?, array(&args[2])?);
            if let Some(x) = a.get(index) {
                within_built(&f, std::slice::from_ref(x), limits)?;
            }
            encode(prim::update(index, |x| f.apply(x), a))
        }
        Operation::ZipWith => {
            let f = func(&args[0])?;
            encode(prim::zip_with(
                |a, b| f.combine(a, b),
                array(&args[1])?,
                array(&args[2])?,
            ))
        }
    }
}

fn steps_exhausted(max: usize) -> LimitExceeded {
    LimitExceeded {
        limit: "max_unfold_steps",
        requested: max.saturating_add(1),
        max,
    }
}

fn within(limit: &'static str, requested: usize, max: usize) -> Result<()> {
    if requested > max {
        return Err(anyhow::Error::new(LimitExceeded {
            limit,
            requested,
            max,
        }));
    }
    Ok(())
}

/// Reject when applying `f` to every input would allocate more than
/// `max_result_len` elements in total.
fn within_built(f: &Func, inputs: &[Value], limits: &Limits) -> Result<()> {
    let built = inputs
        .iter()
        .fold(0usize, |acc, x| acc.saturating_add(f.built_len(x)));
    within("max_result_len", built, limits.max_result_len)
}

fn array(value: &Value) -> Result<&[Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| anyhow!("expected array, got {value}"))
}

/// JSON Schema `integer` admits integral floats such as `2.0`, so they
/// decode too.
fn count(value: &Value) -> Result<usize> {
    value
        .as_u64()
        .or_else(|| {
            integral(value)
                .filter(|n| *n >= 0.0 && *n < u64::MAX as f64)
                .map(|n| n as u64)
        })
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| anyhow!("expected non-negative integer, got {value}"))
}

fn int(value: &Value) -> Result<i64> {
    value
        .as_i64()
        .or_else(|| {
            integral(value)
                .filter(|n| *n >= i64::MIN as f64 && *n < i64::MAX as f64)
                .map(|n| n as i64)
        })
        .ok_or_else(|| anyhow!("expected integer, got {value}"))
}

fn integral(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.fract() == 0.0)
}

fn func(value: &Value) -> Result<Func> {
    decode(value, "function")
}

fn pair(value: &Value) -> Result<PairSplit<Value>> {
    decode(value, "pair")
}

fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    serde_json::from_value(value.clone()).with_context(|| format!("decode {what} from {value}"))
}

fn encode<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).context("encode result")
}

fn absent(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or(Value::Null)
}

/// Arrays splice into the result; anything else contributes one element.
fn spread(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Negative indices count back from the end, then clamp to `[0, len]`.
fn resolve_index(index: i64, len: usize) -> usize {
    if index >= 0 {
        return usize::try_from(index).map_or(len, |i| i.min(len));
    }
    let back = usize::try_from(index.unsigned_abs()).unwrap_or(usize::MAX);
    len.saturating_sub(back)
}
