//! Wrappers changing how a whole composed effect reacts to failure and
//! faults.
//!
//! Both wrappers are attached once, at the outermost level, by the execution
//! driver, never nested per sub-effect, so a composed unit shares one
//! rollback decision.

use std::any::Any;

use thiserror::Error;

use crate::abort::{self, Caught};
use crate::context::TxContext;
use crate::effect::Effect;
use crate::outcome::Outcome;

/// Abnormal termination captured as a value.
///
/// Carries the panic message when one can be extracted from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("abnormal termination: {message}")]
pub struct Fault {
    message: String,
}

impl Fault {
    /// The extracted panic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "opaque panic payload".to_string()
        };
        Fault { message }
    }
}

/// On a failure outcome, aborts the transaction with the failure payload
/// instead of returning it. Successes pass through untouched.
pub fn rollback_on_failure<C, T, E>(effect: Effect<C, T, E>) -> Effect<C, T, E>
where
    C: TxContext + 'static,
    T: 'static,
    E: Send + 'static,
{
    Effect::new(move |cx| match effect.run(&mut *cx) {
        Outcome::Failure(payload) => {
            tracing::debug!("failure outcome, aborting transaction");
            cx.abort(payload)
        }
        success => success,
    })
}

/// Intercepts a fault raised while running the effect and converts it to a
/// failure value, suppressing automatic rollback.
///
/// Abort unwinds are control flow, not faults: they are re-raised untouched.
pub fn trap_faults<C, T, E>(effect: Effect<C, T, E>) -> Effect<C, T, E>
where
    C: 'static,
    T: 'static,
    E: From<Fault> + Send + 'static,
{
    Effect::new(move |cx| match abort::catching::<_, E, _>(|| effect.run(cx)) {
        Caught::Completed(outcome) => outcome,
        Caught::Aborted(payload) => abort::raise(payload),
        Caught::Fault(fault) => {
            let fault = Fault::from_panic(fault);
            tracing::warn!(message = %fault.message(), "fault converted to failure");
            Outcome::Failure(E::from(fault))
        }
    })
}
