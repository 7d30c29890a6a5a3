//! Adapter between effects and externally-defined named-step sagas.
//!
//! Step results are opaque pass-through values: the adapter never looks
//! inside them, it only files them under their step names.

use std::any::Any;
use std::collections::BTreeMap;

use crate::context::{TxContext, TxOptions};
use crate::effect::Effect;
use crate::exec::{execute, RollbackPolicy};
use crate::outcome::Outcome;
use crate::rollback::Fault;
use crate::runner::Runnable;

/// Opaque result of one saga step.
pub type StepValue = Box<dyn Any + Send>;

/// Accumulated step results, keyed by step name.
pub type StepResults = BTreeMap<String, StepValue>;

type StepFn<C, E> = Box<dyn FnOnce(&mut C, &StepResults) -> Outcome<StepValue, E>>;

/// One named step: an opaque function of the context and all prior results.
pub struct NamedStep<C, E> {
    name: String,
    action: StepFn<C, E>,
}

impl<C, E> NamedStep<C, E> {
    /// The step's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the step's action.
    pub fn run(self, cx: &mut C, prior: &StepResults) -> Outcome<StepValue, E> {
        (self.action)(cx, prior)
    }
}

/// An ordered collection of named steps.
///
/// Step names are meaningful to the saga runner and to whoever reads the
/// results map; this library treats them as opaque keys.
pub struct NamedSaga<C, E> {
    steps: Vec<NamedStep<C, E>>,
}

impl<C, E> NamedSaga<C, E> {
    /// An empty saga.
    pub fn new() -> Self {
        NamedSaga { steps: Vec::new() }
    }

    /// Appends a step.
    pub fn step<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: FnOnce(&mut C, &StepResults) -> Outcome<StepValue, E> + 'static,
    {
        self.steps.push(NamedStep {
            name: name.into(),
            action: Box::new(action),
        });
        self
    }

    /// Step names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the saga has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consumes the saga into its ordered steps.
    pub fn into_steps(self) -> Vec<NamedStep<C, E>> {
        self.steps
    }
}

impl<C, E> Default for NamedSaga<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// What a saga runner reports.
#[derive(Debug)]
pub enum SagaReport<E> {
    /// Every step succeeded; results are filed under their step names.
    Completed(StepResults),
    /// A step failed; later steps never ran.
    StepFailed {
        /// Name of the first failing step.
        step: String,
        /// The step's failure payload.
        payload: E,
    },
}

/// Wraps an effect as a one-step saga.
///
/// The step ignores prior results, runs the effect through
/// [`execute`](crate::execute) under default policy and options, and records
/// the success value under `name`; a failure fails the step.
pub fn to_saga<C, T, E>(effect: Effect<C, T, E>, name: impl Into<String>) -> NamedSaga<C, E>
where
    C: TxContext + 'static,
    T: Any + Send + 'static,
    E: From<Fault> + Send + 'static,
{
    NamedSaga::new().step(name, move |cx, _prior| {
        match execute(effect, cx, RollbackPolicy::default(), &TxOptions::new()) {
            Outcome::Success(value) => Outcome::Success(Box::new(value) as StepValue),
            Outcome::Failure(payload) => Outcome::Failure(payload),
        }
    })
}

impl<C, E> Runnable<C, StepResults, E> for NamedSaga<C, E>
where
    C: TxContext + 'static,
    E: Send + 'static,
{
    fn run_against(self, cx: &mut C) -> Outcome<StepResults, E> {
        match cx.run_saga(self) {
            SagaReport::Completed(results) => Outcome::Success(results),
            SagaReport::StepFailed { step, payload } => {
                tracing::warn!(%step, "saga step failed");
                Outcome::Failure(payload)
            }
        }
    }
}
