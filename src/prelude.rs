//! Convenient imports for the common surface.
//!
//! ```ignore
//! use sequent::prelude::*;
//!
//! let effect: Effect<MemoryContext, i32, String> =
//!     Effect::pure(2).and_then(|n| Effect::pure(n * 21));
//! ```

pub use crate::context::{MemoryContext, TxContext, TxOptions, TxReport};
pub use crate::effect::Effect;
pub use crate::exec::{execute, RollbackPolicy};
pub use crate::observe::{traced, Probe};
pub use crate::outcome::Outcome::{self, Failure, Success};
pub use crate::rollback::{rollback_on_failure, trap_faults, Fault};
pub use crate::runner::{run, Runnable};
pub use crate::saga::{to_saga, NamedSaga, SagaReport, StepResults, StepValue};
pub use sequent_macros::effect;
