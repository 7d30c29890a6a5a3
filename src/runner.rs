//! Polymorphic `run` dispatch over everything that can act as an effect.
//!
//! The dispatch set is closed: effects, literal outcomes, named sagas, and
//! effect lists. Each implementation preserves its target's exact
//! short-circuit and ordering semantics; nothing here adds behavior.

use crate::effect::Effect;
use crate::outcome::Outcome;

/// A value that can be resolved to an [`Outcome`] against a context.
///
/// Implemented for [`Effect`], [`Outcome`] (literal success/failure markers
/// are always composable), [`NamedSaga`](crate::NamedSaga), and
/// `Vec<Effect>`. The set is intentionally closed; downstream code should
/// compose effects rather than add shapes.
pub trait Runnable<C, T, E> {
    /// Resolves `self` against `cx`.
    fn run_against(self, cx: &mut C) -> Outcome<T, E>;
}

impl<C, T, E> Runnable<C, T, E> for Effect<C, T, E> {
    fn run_against(self, cx: &mut C) -> Outcome<T, E> {
        self.run(cx)
    }
}

impl<C, T, E> Runnable<C, T, E> for Outcome<T, E> {
    fn run_against(self, _cx: &mut C) -> Outcome<T, E> {
        self
    }
}

impl<C, T, E> Runnable<C, Vec<T>, E> for Vec<Effect<C, T, E>>
where
    C: 'static,
    T: 'static,
    E: 'static,
{
    fn run_against(self, cx: &mut C) -> Outcome<Vec<T>, E> {
        Effect::all(self).run(cx)
    }
}

/// Resolves any [`Runnable`] value against `cx`.
///
/// This is the single entry point the desugared bind sequences route every
/// statement through.
pub fn run<C, T, E, R>(cx: &mut C, value: R) -> Outcome<T, E>
where
    R: Runnable<C, T, E>,
{
    value.run_against(cx)
}
