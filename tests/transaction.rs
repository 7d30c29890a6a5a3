//! Execution driver behavior: commit/abort normalization, rollback policy,
//! and fault handling against the in-memory context.

use std::panic::{catch_unwind, AssertUnwindSafe};

use sequent::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum OrderError {
    #[error("declined: {0}")]
    Declined(String),
    #[error(transparent)]
    Crashed(#[from] Fault),
}

type OrderEffect<T> = Effect<MemoryContext, T, OrderError>;

fn reserve(key: &'static str) -> OrderEffect<()> {
    Effect::new(move |cx: &mut MemoryContext| {
        cx.insert(key, "reserved");
        Success(())
    })
}

fn declined(reason: &'static str) -> OrderEffect<()> {
    Effect::fail(OrderError::Declined(reason.to_string()))
}

fn aborts(cx: &MemoryContext) -> usize {
    cx.journal().iter().filter(|entry| *entry == "abort").count()
}

#[test]
fn success_commits_and_keeps_writes() {
    let mut cx = MemoryContext::new();
    let outcome = reserve("order:1").execute(&mut cx);
    assert_eq!(outcome, Success(()));
    assert_eq!(cx.committed(), 1);
    assert_eq!(cx.rolled_back(), 0);
    assert_eq!(cx.fetch("order:1").as_deref(), Some("reserved"));
}

#[test]
fn failure_aborts_exactly_once_with_the_payload() {
    let mut cx = MemoryContext::new();
    let outcome = reserve("order:2")
        .and_then(|_| declined("card expired"))
        .execute(&mut cx);

    assert_eq!(outcome, Failure(OrderError::Declined("card expired".to_string())));
    assert_eq!(aborts(&cx), 1);
    assert_eq!(cx.committed(), 0);
    assert_eq!(cx.rolled_back(), 1);
    // The aborted transaction's writes were discarded.
    assert_eq!(cx.fetch("order:2"), None);
}

#[test]
fn keep_failures_commits_with_the_failed_outcome_inside() {
    let mut cx = MemoryContext::new();
    let outcome = execute(
        reserve("order:3").and_then(|_| declined("out of stock")),
        &mut cx,
        RollbackPolicy::default().keep_failures(),
        &TxOptions::new(),
    );

    assert_eq!(outcome, Failure(OrderError::Declined("out of stock".to_string())));
    assert_eq!(aborts(&cx), 0);
    assert_eq!(cx.committed(), 1);
    assert_eq!(cx.rolled_back(), 0);
    // Committed, so the write survives alongside the failed outcome.
    assert_eq!(cx.fetch("order:3").as_deref(), Some("reserved"));
}

#[test]
fn trapped_fault_comes_back_as_a_failure_value() {
    let mut cx = MemoryContext::new();
    let crashing: OrderEffect<()> = Effect::new(|_| panic!("boom"));
    let outcome = execute(
        crashing,
        &mut cx,
        RollbackPolicy::default().trap_faults(),
        &TxOptions::new(),
    );

    match outcome {
        Failure(OrderError::Crashed(fault)) => assert_eq!(fault.message(), "boom"),
        other => panic!("expected a trapped fault, got {other:?}"),
    }
    // The trap suppresses automatic rollback: the body returned a value.
    assert_eq!(aborts(&cx), 0);
    assert_eq!(cx.committed(), 1);
    assert_eq!(cx.rolled_back(), 0);
}

#[test]
fn untrapped_fault_rolls_back_and_propagates() {
    let mut cx = MemoryContext::new();
    let crashing: OrderEffect<()> = Effect::new(|cx: &mut MemoryContext| {
        cx.insert("order:4", "reserved");
        panic!("wire cut")
    });

    let result = catch_unwind(AssertUnwindSafe(|| crashing.execute(&mut cx)));
    assert!(result.is_err());
    assert_eq!(cx.committed(), 0);
    assert_eq!(cx.rolled_back(), 1);
    assert_eq!(cx.fetch("order:4"), None);
}

#[test]
fn options_are_forwarded_verbatim() {
    let mut cx = MemoryContext::new();
    let options = TxOptions::new()
        .set("isolation", "serializable")
        .set("timeout_ms", "250");
    let outcome = execute(
        reserve("order:5"),
        &mut cx,
        RollbackPolicy::default(),
        &options,
    );

    assert_eq!(outcome, Success(()));
    let seen = cx.last_options().expect("options recorded");
    assert_eq!(seen.get("isolation"), Some("serializable"));
    assert_eq!(seen.get("timeout_ms"), Some("250"));
    assert_eq!(seen.len(), 2);
}

#[test]
fn policy_defaults_roll_back_on_both_failure_and_fault() {
    let policy = RollbackPolicy::default();
    assert!(policy.on_failure);
    assert!(policy.on_exception);
}
