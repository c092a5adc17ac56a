//! Bloqueos: estado y las dos interpretaciones de aplicación (skip / reject),
//! probadas por separado.

use pipetory_core::{LockPolicy, Pipe, PipeError, StepErrorKind};

fn pipe(policy: LockPolicy) -> Pipe<i32> {
    let mut p = Pipe::sequencer("locks").with_lock_policy(policy);
    p.register(|x: i32| x + 1, "inc")
     .register(|x: i32| x * 10, "scale")
     .register(|x: i32| x - 3, "shift");
    p
}

#[test]
fn steps_start_unlocked() {
    let p = pipe(LockPolicy::Advisory);
    for step in p.steps() {
        assert_eq!(p.is_locked(step), Ok(false));
    }
}

#[test]
fn lock_unknown_step_is_undefined_step() {
    let mut p = pipe(LockPolicy::Advisory);
    let err = p.lock("nope").unwrap_err();
    assert_eq!(err.step_kind(), Some(StepErrorKind::NotFound));
    assert_eq!(err.to_string(), "Step nope not found in locks.");
    assert!(p.unlock("nope").is_err());
    assert!(p.is_locked("nope").is_err());
}

#[test]
fn lock_all_then_unlock_all_restores_flags() {
    let mut p = pipe(LockPolicy::Advisory);
    p.lock_all();
    assert_eq!(p.locked_steps(), vec!["inc", "scale", "shift"]);
    p.unlock_all();
    assert!(p.locked_steps().is_empty());
    for step in p.steps() {
        assert_eq!(p.is_locked(step), Ok(false));
    }
}

#[test]
fn advisory_policy_ignores_locks() {
    let mut p = pipe(LockPolicy::Advisory);
    p.lock("scale").unwrap().compile();
    assert_eq!(p.run(1).unwrap(), 17);
}

#[test]
fn skip_policy_bypasses_locked_step() {
    let mut p = pipe(LockPolicy::Skip);
    p.lock("scale").unwrap().compile();
    assert_eq!(p.call(1, Some("scale")).unwrap(), 2);
    assert_eq!(p.run(1).unwrap(), -1);

    p.unlock("scale").unwrap().compile();
    assert_eq!(p.run(1).unwrap(), 17);
}

#[test]
fn reject_policy_fails_locked_step_and_downstream() {
    let mut p = pipe(LockPolicy::Reject);
    p.lock("scale").unwrap().compile();
    assert_eq!(p.call(1, Some("inc")).unwrap(), 2);
    let err = p.run(1).unwrap_err();
    assert_eq!(err,
               PipeError::LockedStep { step: "scale".into(),
                                       pipeline: "locks".into() });
    assert_eq!(err.to_string(), "Step scale from locks is locked.");
    assert_eq!(p.call(1, Some("scale")), Err(err));
}

#[test]
fn locks_apply_on_next_compile_only() {
    let mut p = pipe(LockPolicy::Skip);
    p.compile();
    p.lock("inc").unwrap();
    assert_eq!(p.run(1).unwrap(), 17);
    p.compile();
    assert_eq!(p.run(1).unwrap(), 7);
}

#[test]
fn policy_can_change_between_compiles() {
    let mut p = pipe(LockPolicy::Advisory);
    p.lock("shift").unwrap();
    p.set_lock_policy(LockPolicy::Reject).compile();
    assert_eq!(p.lock_policy(), LockPolicy::Reject);
    assert!(p.run(1).is_err());
    p.set_lock_policy(LockPolicy::Skip).compile();
    assert_eq!(p.run(1).unwrap(), 20);
}
