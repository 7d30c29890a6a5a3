//! The deferred effect type and its composition combinators.
//!
//! An [`Effect`] describes work to be performed against a transactional
//! context. Effects are immutable one-shot values: every combinator consumes
//! its inputs and yields a new effect, and an effect is consumed exactly once
//! when it is run. Combinators that sequence more than one sub-effect always
//! resolve them strictly in order against the same `&mut` context, never
//! concurrently.

use crate::outcome::Outcome;

type SuspendFn<C, T, E> = Box<dyn FnOnce(&mut C) -> Outcome<T, E>>;

enum Inner<C, T, E> {
    /// A literal, already-known outcome.
    Done(Outcome<T, E>),
    /// A deferred computation from a context to an outcome.
    Suspend(SuspendFn<C, T, E>),
}

/// A deferred, possibly-failing computation against a context of type `C`.
///
/// Exactly one of two shapes: a literal [`Outcome`] or a suspended closure.
/// External sagas and effect lists are adapted into this type through the
/// [`Runnable`](crate::Runnable) trait rather than extra variants, so the
/// dispatch set stays closed.
pub struct Effect<C, T, E> {
    inner: Inner<C, T, E>,
}

impl<C, T, E> Effect<C, T, E> {
    /// Lifts a value into an effect that succeeds without touching the context.
    pub fn pure(value: T) -> Self {
        Effect {
            inner: Inner::Done(Outcome::Success(value)),
        }
    }

    /// An effect that always fails with `payload`.
    ///
    /// This is the zero of the fallback algebra:
    /// `fail(e).or_else(f)` behaves as `f(e)`, and `pure(a).or_else(f)` as
    /// `pure(a)`.
    pub fn fail(payload: E) -> Self {
        Effect {
            inner: Inner::Done(Outcome::Failure(payload)),
        }
    }

    /// Suspends a closure as an effect.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut C) -> Outcome<T, E> + 'static,
    {
        Effect {
            inner: Inner::Suspend(Box::new(f)),
        }
    }

    /// Wraps an already-known outcome.
    pub fn from_outcome(outcome: Outcome<T, E>) -> Self {
        Effect {
            inner: Inner::Done(outcome),
        }
    }

    /// Runs the effect against `cx`, consuming it.
    pub fn run(self, cx: &mut C) -> Outcome<T, E> {
        match self.inner {
            Inner::Done(outcome) => outcome,
            Inner::Suspend(f) => f(cx),
        }
    }
}

impl<C, T, E> Effect<C, T, E>
where
    C: 'static,
    T: 'static,
    E: 'static,
{
    /// Applies `f` to the success value. On failure the payload passes
    /// through unchanged and `f` is never invoked.
    pub fn map<U, F>(self, f: F) -> Effect<C, U, E>
    where
        U: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        Effect::new(move |cx| self.run(cx).map(f))
    }

    /// Applies `f` to the failure payload; successes pass through unchanged.
    pub fn map_err<F2, G>(self, f: G) -> Effect<C, T, F2>
    where
        F2: 'static,
        G: FnOnce(E) -> F2 + 'static,
    {
        Effect::new(move |cx| self.run(cx).map_err(f))
    }

    /// Monadic bind: on success, `f` produces the continuation effect, which
    /// runs against the same context. A failure short-circuits without
    /// invoking `f`.
    pub fn and_then<U, F>(self, f: F) -> Effect<C, U, E>
    where
        U: 'static,
        F: FnOnce(T) -> Effect<C, U, E> + 'static,
    {
        Effect::new(move |cx| match self.run(&mut *cx) {
            Outcome::Success(value) => f(value).run(cx),
            Outcome::Failure(payload) => Outcome::Failure(payload),
        })
    }

    /// On failure, replaces the computation with `recover(payload)`, run
    /// against the same context. Successes pass through untouched.
    pub fn or_else<F>(self, recover: F) -> Effect<C, T, E>
    where
        F: FnOnce(E) -> Effect<C, T, E> + 'static,
    {
        Effect::new(move |cx| match self.run(&mut *cx) {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(payload) => recover(payload).run(cx),
        })
    }

    /// Converts failure into `Success(None)`. The resulting effect never
    /// itself fails.
    pub fn optional(self) -> Effect<C, Option<T>, E> {
        self.map(Some).or_else(|_| Effect::pure(None))
    }

    /// Runs `self` then `other` sequentially against one context and pairs
    /// the results. `self`'s failure short-circuits (`other` never runs);
    /// otherwise `other`'s failure propagates.
    ///
    /// Execution order is an observable contract: side effects happen in
    /// pair order.
    pub fn zip<U>(self, other: Effect<C, U, E>) -> Effect<C, (T, U), E>
    where
        U: 'static,
    {
        Effect::new(move |cx| match self.run(&mut *cx) {
            Outcome::Success(left) => match other.run(cx) {
                Outcome::Success(right) => Outcome::Success((left, right)),
                Outcome::Failure(payload) => Outcome::Failure(payload),
            },
            Outcome::Failure(payload) => Outcome::Failure(payload),
        })
    }

    /// Sequences a whole list against one context, preserving order in both
    /// execution and output. The empty list yields `Success(vec![])`. The
    /// first failure short-circuits: later elements never run.
    pub fn all(effects: Vec<Effect<C, T, E>>) -> Effect<C, Vec<T>, E> {
        Effect::new(move |cx| {
            let mut values = Vec::with_capacity(effects.len());
            for effect in effects {
                match effect.run(&mut *cx) {
                    Outcome::Success(value) => values.push(value),
                    Outcome::Failure(payload) => return Outcome::Failure(payload),
                }
            }
            Outcome::Success(values)
        })
    }
}

impl<C, T, E> From<Outcome<T, E>> for Effect<C, T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        Effect::from_outcome(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Unit;

    #[test]
    fn map_skips_function_on_failure() {
        let mut cx = Unit;
        let effect =
            Effect::<Unit, i32, &str>::fail("nope").map(|_| -> i32 { unreachable!("map ran") });
        assert_eq!(effect.run(&mut cx), Outcome::<i32, &str>::Failure("nope"));
    }

    #[test]
    fn and_then_threads_the_value() {
        let mut cx = Unit;
        let effect = Effect::<Unit, i32, &str>::pure(20).and_then(|n| Effect::pure(n + 1));
        assert_eq!(effect.run(&mut cx), Outcome::Success(21));
    }

    #[test]
    fn all_of_empty_list_succeeds() {
        let mut cx = Unit;
        let effect = Effect::<Unit, i32, &str>::all(Vec::new());
        assert_eq!(effect.run(&mut cx), Outcome::Success(Vec::new()));
    }
}
