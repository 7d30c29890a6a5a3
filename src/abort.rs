//! Non-local abort plumbing shared by contexts and rollback wrappers.
//!
//! An abort is control flow, not a fault: it unwinds from the point of the
//! [`raise`] call directly to the enclosing `run_transaction`, carrying a
//! typed payload. Context implementations catch it with [`catching`]; genuine
//! panics surface separately so callers can decide whether to convert or
//! propagate them.

use std::any::Any;
use std::panic::{catch_unwind, panic_any, resume_unwind, AssertUnwindSafe};

/// Carrier distinguishing abort unwinds from ordinary panics.
struct AbortSignal(Box<dyn Any + Send>);

/// Aborts the enclosing transaction, never returning.
pub fn raise<E: Send + 'static>(payload: E) -> ! {
    panic_any(AbortSignal(Box::new(payload)))
}

/// How a guarded body finished.
pub enum Caught<T, E> {
    /// The body returned normally.
    Completed(T),
    /// The body aborted with a payload of type `E`.
    Aborted(E),
    /// The body panicked; the raw panic payload is preserved.
    Fault(Box<dyn Any + Send>),
}

/// Runs `body`, separating normal returns, aborts, and faults.
///
/// An abort carrying a payload of a type other than `E` belongs to some
/// enclosing scope and keeps unwinding.
pub fn catching<T, E, F>(body: F) -> Caught<T, E>
where
    F: FnOnce() -> T,
    E: Send + 'static,
{
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => Caught::Completed(value),
        Err(payload) => match payload.downcast::<AbortSignal>() {
            Ok(signal) => match signal.0.downcast::<E>() {
                Ok(inner) => Caught::Aborted(*inner),
                Err(foreign) => resume_unwind(Box::new(AbortSignal(foreign))),
            },
            Err(fault) => Caught::Fault(fault),
        },
    }
}

/// Resumes unwinding with a previously caught fault payload.
pub fn rethrow(fault: Box<dyn Any + Send>) -> ! {
    resume_unwind(fault)
}
