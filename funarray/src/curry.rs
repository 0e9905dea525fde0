//! Partial application for fixed-arity functions.
//!
//! Core functions keep explicit arities; callers that want the
//! one-argument-at-a-time convention wrap them here instead:
//!
//! ```
//! use funarray::curry::curry2;
//! use funarray::core::primitives::take;
//!
//! let take_n = curry2(|n: usize, a: Vec<i32>| take(n, &a));
//! let take_two = take_n(2);
//! assert_eq!(take_two(vec![4, 5, 6]), vec![4, 5]);
//! assert_eq!(take_two(vec![7]), vec![7]);
//! ```
//!
//! Earlier arguments are cloned into each later call, so every partial
//! function can be invoked any number of times.

use std::rc::Rc;

/// `curry2(f)(a)(b) == f(a, b)`.
pub fn curry2<A, B, R, F>(f: F) -> impl Fn(A) -> Box<dyn Fn(B) -> R>
where
    F: Fn(A, B) -> R + 'static,
    A: Clone + 'static,
    B: 'static,
    R: 'static,
{
    let f = Rc::new(f);
    move |a: A| -> Box<dyn Fn(B) -> R> {
        let f = Rc::clone(&f);
        Box::new(move |b: B| f(a.clone(), b))
    }
}

/// `curry3(f)(a)(b)(c) == f(a, b, c)`.
pub fn curry3<A, B, C, R, F>(f: F) -> impl Fn(A) -> Box<dyn Fn(B) -> Box<dyn Fn(C) -> R>>
where
    F: Fn(A, B, C) -> R + 'static,
    A: Clone + 'static,
    B: Clone + 'static,
    C: 'static,
    R: 'static,
{
    let f = Rc::new(f);
    move |a: A| -> Box<dyn Fn(B) -> Box<dyn Fn(C) -> R>> {
        let f = Rc::clone(&f);
        Box::new(move |b: B| -> Box<dyn Fn(C) -> R> {
            let f = Rc::clone(&f);
            let a = a.clone();
            Box::new(move |c: C| f(a.clone(), b.clone(), c))
        })
    }
}
