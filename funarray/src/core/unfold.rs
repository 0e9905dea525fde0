//! Fixed-point driver shared by every generator.
//!
//! `unfold` owns its state and reassigns it until the stopping condition
//! holds. Termination is the caller's contract: a `next`/`stop` pair that
//! never reaches a stopping state loops forever. Use [`unfold_bounded`] when
//! the step function comes from an untrusted source.

/// Replace `seed` with `next(seed)` until `stop` holds, then return it.
///
/// If `stop(&seed)` already holds, `next` is never called.
pub fn unfold<S, N, P>(next: N, stop: P, seed: S) -> S
where
    N: Fn(S) -> S,
    P: Fn(&S) -> bool,
{
    let mut state = seed;
    while !stop(&state) {
        state = next(state);
    }
    state
}

/// Same loop as [`unfold`], giving up after `max_steps` applications of `next`.
///
/// Returns `None` when the budget is spent and `stop` still does not hold.
pub fn unfold_bounded<S, N, P>(next: N, stop: P, seed: S, max_steps: usize) -> Option<S>
where
    N: Fn(S) -> S,
    P: Fn(&S) -> bool,
{
    let mut state = seed;
    let mut steps = 0;
    while !stop(&state) {
        if steps == max_steps {
            return None;
        }
        state = next(state);
        steps += 1;
    }
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfold_appends_until_length_three() {
        let out = unfold(
            |mut xs: Vec<i32>| {
                xs.push(1);
                xs
            },
            |xs| xs.len() == 3,
            Vec::new(),
        );
        assert_eq!(out, vec![1, 1, 1]);
    }

    #[test]
    fn unfold_returns_seed_when_already_stopped() {
        let out = unfold(|_: i32| panic!("next must not run"), |x| *x > 0, 7);
        assert_eq!(out, 7);
    }

    #[test]
    fn unfold_bounded_reports_exhausted_budget() {
        let out = unfold_bounded(|x: u64| x + 1, |_| false, 0, 10);
        assert_eq!(out, None);
    }

    #[test]
    fn unfold_bounded_allows_exact_budget() {
        let out = unfold_bounded(|x: u64| x + 1, |x| *x == 10, 0, 10);
        assert_eq!(out, Some(10));
    }
}
