//! Algebraic laws for the effect combinators.

use proptest::prelude::*;
use sequent::prelude::*;

type TestEffect = Effect<MemoryContext, i32, String>;

fn double(n: i32) -> TestEffect {
    Effect::pure(n.wrapping_mul(2))
}

/// Fails on odd inputs so the laws are exercised on both outcome tags.
fn describe(n: i32) -> TestEffect {
    if n % 2 == 0 {
        Effect::pure(n)
    } else {
        Effect::fail(format!("odd {n}"))
    }
}

fn outcome(effect: TestEffect) -> Outcome<i32, String> {
    effect.run(&mut MemoryContext::new())
}

proptest! {
    #[test]
    fn bind_left_identity(a in any::<i32>()) {
        prop_assert_eq!(
            outcome(Effect::pure(a).and_then(describe)),
            outcome(describe(a))
        );
    }

    #[test]
    fn bind_right_identity(a in any::<i32>()) {
        prop_assert_eq!(
            outcome(describe(a).and_then(Effect::pure)),
            outcome(describe(a))
        );
    }

    #[test]
    fn bind_associativity(a in any::<i32>()) {
        let nested = outcome(describe(a).and_then(|n| double(n).and_then(describe)));
        let flat = outcome(describe(a).and_then(double).and_then(describe));
        prop_assert_eq!(nested, flat);
    }

    #[test]
    fn fail_is_the_zero_of_or_else(message in ".*") {
        let recovered = outcome(
            Effect::fail(message.clone()).or_else(|m| Effect::pure(m.len() as i32))
        );
        prop_assert_eq!(recovered, Outcome::Success(message.len() as i32));
    }

    #[test]
    fn success_ignores_or_else(a in any::<i32>()) {
        prop_assert_eq!(
            outcome(Effect::pure(a).or_else(|_| Effect::pure(0))),
            Outcome::Success(a)
        );
    }
}

#[test]
fn failed_bind_never_invokes_the_continuation() {
    let mut cx = MemoryContext::new();
    let effect = TestEffect::fail("boom".to_string())
        .and_then(|_| -> TestEffect { unreachable!("continuation ran") });
    assert_eq!(effect.run(&mut cx), Failure("boom".to_string()));
}

#[test]
fn optional_converts_failure_into_success_none() {
    let mut cx = MemoryContext::new();
    let missing = TestEffect::fail("absent".to_string()).optional();
    assert_eq!(missing.run(&mut cx), Success(None));

    let present = TestEffect::pure(3).optional();
    assert_eq!(present.run(&mut cx), Success(Some(3)));
}

#[test]
fn map_err_adapts_only_the_failure_track() {
    let mut cx = MemoryContext::new();
    let renamed = TestEffect::fail("raw".to_string()).map_err(|m| format!("wrapped {m}"));
    assert_eq!(renamed.run(&mut cx), Failure("wrapped raw".to_string()));

    let untouched = TestEffect::pure(1).map_err(|m| format!("wrapped {m}"));
    assert_eq!(untouched.run(&mut cx), Success(1));
}
