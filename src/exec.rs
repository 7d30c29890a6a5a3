//! The execution driver: runs an effect inside the context's transaction
//! primitive and normalizes whatever shape it reports.

use serde::{Deserialize, Serialize};

use crate::context::{TxContext, TxOptions, TxReport};
use crate::effect::Effect;
use crate::outcome::Outcome;
use crate::rollback::{rollback_on_failure, trap_faults, Fault};

/// How the driver reacts to failures and faults.
///
/// An explicit configuration value threaded through [`execute`], never
/// global state. Attached at execute time; effects never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackPolicy {
    /// Abort the transaction when the effect's outcome is a failure.
    pub on_failure: bool,
    /// Let faults abort the transaction and propagate; disabling converts
    /// them to failure values instead.
    pub on_exception: bool,
}

impl Default for RollbackPolicy {
    fn default() -> Self {
        RollbackPolicy {
            on_failure: true,
            on_exception: true,
        }
    }
}

impl RollbackPolicy {
    /// Default policy with failure rollback switched off: a failed outcome
    /// commits, nested inside the report.
    pub fn keep_failures(mut self) -> Self {
        self.on_failure = false;
        self
    }

    /// Default policy with fault rollback switched off: faults come back as
    /// failure values.
    pub fn trap_faults(mut self) -> Self {
        self.on_exception = false;
        self
    }
}

/// Runs `effect` inside one transaction on `cx` and flattens the report to a
/// single [`Outcome`].
///
/// The rollback wrappers are applied here, outermost, per `policy`; the
/// fault trap sits outside the failure wrapper so a converted fault is not
/// re-examined. `options` are forwarded verbatim to the context. A fault not
/// trapped by the policy propagates out unhandled, fatal to the caller.
pub fn execute<C, T, E>(
    effect: Effect<C, T, E>,
    cx: &mut C,
    policy: RollbackPolicy,
    options: &TxOptions,
) -> Outcome<T, E>
where
    C: TxContext + 'static,
    T: 'static,
    E: From<Fault> + Send + 'static,
{
    let mut wrapped = effect;
    if policy.on_failure {
        wrapped = rollback_on_failure(wrapped);
    }
    if !policy.on_exception {
        wrapped = trap_faults(wrapped);
    }

    tracing::debug!(?policy, passthrough = options.len(), "execute: begin");
    let report = cx.run_transaction(options, |cx| wrapped.run(cx));
    match report {
        TxReport::Committed(outcome) => {
            tracing::debug!(success = outcome.is_success(), "execute: committed");
            outcome
        }
        TxReport::Aborted(payload) => {
            tracing::warn!("execute: aborted");
            Outcome::Failure(payload)
        }
    }
}

impl<C, T, E> Effect<C, T, E>
where
    C: TxContext + 'static,
    T: 'static,
    E: From<Fault> + Send + 'static,
{
    /// Runs the effect under the default policy with empty options.
    pub fn execute(self, cx: &mut C) -> Outcome<T, E> {
        execute(self, cx, RollbackPolicy::default(), &TxOptions::new())
    }
}
