//! Composable transactional effects.
//!
//! This crate provides a deferred effect type for sequencing dependent
//! operations that must execute atomically against a transactional resource,
//! replacing named-step saga structures whose global step names are prone to
//! collision. It is built from four small pieces:
//!
//! - an [`Effect`] type with law-abiding combinators (`pure`, `map`,
//!   `and_then`, `zip`/`all`, `or_else`, `optional`);
//! - rollback-control wrappers deciding how a whole composed unit reacts to
//!   failures and faults;
//! - an adapter to and from externally-defined named-step sagas;
//! - an execution driver that runs the context's transaction primitive and
//!   flattens its report into one [`Outcome`].
//!
//! On top of the combinators, the [`effect!`] macro desugars a direct-style
//! bind sequence into the nested composition calls you would otherwise write
//! by hand. The transform itself lives in the `sequent-desugar` crate as a
//! pure function over a statement-sequence IR, usable at build time without
//! the macro.
//!
//! ```ignore
//! use sequent::prelude::*;
//!
//! fn find_user(id: u32) -> Effect<MemoryContext, String, String> { /* … */ }
//! fn record_login(user: &str) -> Effect<MemoryContext, u32, String> { /* … */ }
//!
//! let session = effect!(|cx| {
//!     Success(user) <- find_user(7);
//!     let banner = format!("welcome {user}");
//!     Success(count) <- record_login(&user);
//!     Success((banner, count))
//! });
//! let outcome = session.execute(&mut MemoryContext::new());
//! ```
//!
//! Composition is single-threaded and synchronous: every combinator resolves
//! sub-effects strictly in order against one shared `&mut` context, because
//! chained steps may depend on prior side effects and a live transaction
//! cannot be driven from two logical threads at once.

pub mod abort;
pub mod context;
pub mod effect;
pub mod exec;
pub mod observe;
pub mod outcome;
pub mod prelude;
pub mod rollback;
pub mod runner;
pub mod saga;

pub use context::{MemoryContext, TxContext, TxOptions, TxReport};
pub use effect::Effect;
pub use exec::{execute, RollbackPolicy};
pub use observe::{traced, Probe};
pub use outcome::Outcome;
pub use rollback::{rollback_on_failure, trap_faults, Fault};
pub use runner::{run, Runnable};
pub use saga::{to_saga, NamedSaga, SagaReport, StepResults, StepValue};

// Re-export the desugaring front-end and the underlying build-time transform.
pub use sequent_macros::effect;

/// The statement-sequence IR and pure desugaring transform behind [`effect!`].
pub mod desugar {
    pub use sequent_desugar::{desugar, BindSequence, ElseClause, Stmt};
}
