//! Observability layers for effects.
//!
//! Composable wrappers adding cross-cutting concerns without touching the
//! effect being observed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::effect::Effect;
use crate::outcome::Outcome;

/// Logs the wrapped effect's start, outcome, and duration under `label`.
pub fn traced<C, T, E>(label: &'static str, effect: Effect<C, T, E>) -> Effect<C, T, E>
where
    C: 'static,
    T: 'static,
    E: 'static,
{
    Effect::new(move |cx| {
        let start = Instant::now();
        tracing::trace!(label, "effect: start");
        let outcome = effect.run(cx);
        let elapsed = start.elapsed();
        match &outcome {
            Outcome::Success(_) => tracing::debug!(label, ?elapsed, "effect: success"),
            Outcome::Failure(_) => tracing::warn!(label, ?elapsed, "effect: failure"),
        }
        outcome
    })
}

/// Counts outcomes flowing through observed effects.
///
/// Cloning shares the counters, so one probe can watch several effects in a
/// composition.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    successes: Arc<AtomicU64>,
    failures: Arc<AtomicU64>,
}

impl Probe {
    /// A probe with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Successes observed so far.
    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::Relaxed)
    }

    /// Failures observed so far.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Wraps an effect so its outcome bumps this probe's counters.
    pub fn observe<C, T, E>(&self, effect: Effect<C, T, E>) -> Effect<C, T, E>
    where
        C: 'static,
        T: 'static,
        E: 'static,
    {
        let successes = Arc::clone(&self.successes);
        let failures = Arc::clone(&self.failures);
        Effect::new(move |cx| {
            let outcome = effect.run(cx);
            match &outcome {
                Outcome::Success(_) => successes.fetch_add(1, Ordering::Relaxed),
                Outcome::Failure(_) => failures.fetch_add(1, Ordering::Relaxed),
            };
            outcome
        })
    }
}
