//! The transactional context capability and an in-memory implementation.
//!
//! The context is externally owned: the core never constructs, clones, or
//! caches one. It is passed as a single `&mut` reference through every effect
//! invocation within one execute call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::abort::{self, Caught};
use crate::outcome::Outcome;
use crate::saga::{NamedSaga, SagaReport, StepResults};

/// Open, string-keyed options forwarded verbatim to `run_transaction`.
///
/// The core attaches no meaning to the entries; they exist so callers can
/// thread isolation levels, timeouts, or anything else their context
/// understands through [`execute`](crate::execute).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOptions {
    entries: BTreeMap<String, String>,
}

impl TxOptions {
    /// An empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any previous value for the key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Looks up an entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// What a context reports from one `run_transaction` call.
///
/// A normal return commits and nests the body's own outcome one level
/// deeper; an abort discards all changes and is distinguishable from a
/// failure outcome the body returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxReport<T, E> {
    /// The body returned normally and the context committed.
    Committed(Outcome<T, E>),
    /// The body aborted; all changes were discarded.
    Aborted(E),
}

/// Opaque transactional capability supplied by the caller.
///
/// Implementations own commit/rollback semantics. `abort` must never return:
/// it unwinds directly to the enclosing `run_transaction`, which is expected
/// to catch it via [`abort::catching`] (see [`MemoryContext`] for the
/// reference shape). A panic that is not an abort must roll back and keep
/// propagating.
pub trait TxContext: Sized {
    /// Runs `body` inside a transaction, committing on normal return and
    /// rolling back on abort. Invoked once per execute call.
    fn run_transaction<T, E, F>(&mut self, options: &TxOptions, body: F) -> TxReport<T, E>
    where
        F: FnOnce(&mut Self) -> Outcome<T, E>,
        E: Send + 'static;

    /// Discards the transaction, surfacing `payload` at the enclosing
    /// `run_transaction`. Never returns.
    fn abort<E: Send + 'static>(&mut self, payload: E) -> !;

    /// Executes an ordered named-step saga, stopping at the first failing
    /// step. The default implementation runs steps strictly in order,
    /// feeding each the accumulated prior results.
    fn run_saga<E: Send + 'static>(&mut self, saga: NamedSaga<Self, E>) -> SagaReport<E> {
        let mut results = StepResults::new();
        for step in saga.into_steps() {
            let name = step.name().to_string();
            match step.run(self, &results) {
                Outcome::Success(value) => {
                    results.insert(name, value);
                }
                Outcome::Failure(payload) => {
                    return SagaReport::StepFailed {
                        step: name,
                        payload,
                    };
                }
            }
        }
        SagaReport::Completed(results)
    }
}

/// In-memory transactional context for tests and examples.
///
/// Keeps a key/value store with snapshot-based rollback, counts
/// begin/commit/rollback transitions, and records every operation in a
/// journal usable as an execution-order side channel.
#[derive(Debug, Default)]
pub struct MemoryContext {
    store: BTreeMap<String, String>,
    snapshots: Vec<BTreeMap<String, String>>,
    journal: Vec<String>,
    begun: u32,
    committed: u32,
    rolled_back: u32,
    last_options: Option<TxOptions>,
}

impl MemoryContext {
    /// A fresh, empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a key, journaling the operation.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.journal.push(format!("put {key}"));
        self.store.insert(key, value.into());
    }

    /// Reads a key, journaling the operation.
    pub fn fetch(&mut self, key: &str) -> Option<String> {
        self.journal.push(format!("get {key}"));
        self.store.get(key).cloned()
    }

    /// The recorded operation journal, in execution order.
    pub fn journal(&self) -> &[String] {
        &self.journal
    }

    /// Transactions begun.
    pub fn begun(&self) -> u32 {
        self.begun
    }

    /// Transactions committed.
    pub fn committed(&self) -> u32 {
        self.committed
    }

    /// Transactions rolled back.
    pub fn rolled_back(&self) -> u32 {
        self.rolled_back
    }

    /// Options seen by the most recent `run_transaction` call.
    pub fn last_options(&self) -> Option<&TxOptions> {
        self.last_options.as_ref()
    }

    fn restore_snapshot(&mut self) {
        if let Some(snapshot) = self.snapshots.pop() {
            self.store = snapshot;
        }
        self.rolled_back += 1;
        self.journal.push("rollback".to_string());
    }
}

impl TxContext for MemoryContext {
    fn run_transaction<T, E, F>(&mut self, options: &TxOptions, body: F) -> TxReport<T, E>
    where
        F: FnOnce(&mut Self) -> Outcome<T, E>,
        E: Send + 'static,
    {
        self.begun += 1;
        self.journal.push("begin".to_string());
        self.last_options = Some(options.clone());
        self.snapshots.push(self.store.clone());

        match abort::catching::<_, E, _>(|| body(&mut *self)) {
            Caught::Completed(outcome) => {
                self.snapshots.pop();
                self.committed += 1;
                self.journal.push("commit".to_string());
                TxReport::Committed(outcome)
            }
            Caught::Aborted(payload) => {
                self.restore_snapshot();
                TxReport::Aborted(payload)
            }
            Caught::Fault(fault) => {
                self.restore_snapshot();
                abort::rethrow(fault)
            }
        }
    }

    fn abort<E: Send + 'static>(&mut self, payload: E) -> ! {
        self.journal.push("abort".to_string());
        abort::raise(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_keeps_writes() {
        let mut cx = MemoryContext::new();
        let report: TxReport<(), &str> = cx.run_transaction(&TxOptions::new(), |cx| {
            cx.insert("k", "v");
            Outcome::Success(())
        });
        assert_eq!(report, TxReport::Committed(Outcome::Success(())));
        assert_eq!(cx.fetch("k").as_deref(), Some("v"));
        assert_eq!(cx.committed(), 1);
    }

    #[test]
    fn abort_discards_writes() {
        let mut cx = MemoryContext::new();
        let report: TxReport<(), &str> = cx.run_transaction(&TxOptions::new(), |cx| {
            cx.insert("k", "v");
            cx.abort("dropped")
        });
        assert_eq!(report, TxReport::Aborted("dropped"));
        assert_eq!(cx.fetch("k"), None);
        assert_eq!(cx.rolled_back(), 1);
        assert_eq!(cx.committed(), 0);
    }
}
