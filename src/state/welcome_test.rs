use super::*;

fn record(user_id: &str) -> WelcomeRecord {
    WelcomeRecord { user_id: user_id.to_owned(), sent_at: "2026-01-01T00:00:00Z".to_owned() }
}

// =============================================================
// decide
// =============================================================

#[test]
fn decide_dispatches_when_checking_without_record() {
    assert_eq!(decide(WelcomePhase::Checking, None), WelcomeAction::Dispatch);
}

#[test]
fn decide_suppresses_when_record_exists() {
    assert_eq!(decide(WelcomePhase::Checking, Some(&record("u1"))), WelcomeAction::Suppress);
}

#[test]
fn decide_skips_outside_checking() {
    for phase in [
        WelcomePhase::NotChecked,
        WelcomePhase::Dispatching,
        WelcomePhase::Suppressed,
        WelcomePhase::Done,
    ] {
        assert_eq!(decide(phase, None), WelcomeAction::Skip);
        assert_eq!(decide(phase, Some(&record("u1"))), WelcomeAction::Skip);
    }
}

#[test]
fn record_key_uses_prefix() {
    assert_eq!(record_key("abc123"), "welcome_sent_abc123");
}

// =============================================================
// WelcomeMachine
// =============================================================

#[test]
fn machine_starts_not_checked() {
    let machine = WelcomeMachine::default();
    assert_eq!(machine.phase(), WelcomePhase::NotChecked);
    assert_eq!(machine.identity(), None);
}

#[test]
fn begin_check_requires_identity() {
    let mut machine = WelcomeMachine::default();
    assert_eq!(machine.begin_check(), None);
    assert_eq!(machine.phase(), WelcomePhase::NotChecked);
}

#[test]
fn full_dispatch_path_ends_done() {
    let mut machine = WelcomeMachine::default();
    assert!(machine.observe(Some("u1")));
    assert_eq!(machine.begin_check().as_deref(), Some("u1"));
    assert_eq!(machine.resolve(None), WelcomeAction::Dispatch);
    assert_eq!(machine.phase(), WelcomePhase::Dispatching);
    machine.complete();
    assert_eq!(machine.phase(), WelcomePhase::Done);
    assert!(machine.phase().is_terminal());
}

#[test]
fn existing_record_ends_suppressed() {
    let mut machine = WelcomeMachine::default();
    machine.observe(Some("u1"));
    machine.begin_check();
    assert_eq!(machine.resolve(Some(&record("u1"))), WelcomeAction::Suppress);
    assert_eq!(machine.phase(), WelcomePhase::Suppressed);
    machine.complete();
    assert_eq!(machine.phase(), WelcomePhase::Suppressed);
}

#[test]
fn no_reentry_for_same_identity() {
    let mut machine = WelcomeMachine::default();
    machine.observe(Some("u1"));
    machine.begin_check();
    machine.resolve(None);
    machine.complete();

    assert!(!machine.observe(Some("u1")));
    assert_eq!(machine.begin_check(), None);
    assert_eq!(machine.phase(), WelcomePhase::Done);
}

#[test]
fn begin_check_is_not_repeatable_while_checking() {
    let mut machine = WelcomeMachine::default();
    machine.observe(Some("u1"));
    assert!(machine.begin_check().is_some());
    assert_eq!(machine.begin_check(), None);
}

#[test]
fn identity_change_resets_to_not_checked() {
    let mut machine = WelcomeMachine::default();
    machine.observe(Some("u1"));
    machine.begin_check();
    machine.resolve(Some(&record("u1")));

    assert!(machine.observe(Some("u2")));
    assert_eq!(machine.phase(), WelcomePhase::NotChecked);
    assert_eq!(machine.begin_check().as_deref(), Some("u2"));
}

#[test]
fn sign_out_resets_and_blocks_check() {
    let mut machine = WelcomeMachine::default();
    machine.observe(Some("u1"));
    machine.begin_check();
    assert!(machine.observe(None));
    assert_eq!(machine.phase(), WelcomePhase::NotChecked);
    assert_eq!(machine.begin_check(), None);
}

#[test]
fn welcome_status_default_is_idle() {
    let status = WelcomeStatus::default();
    assert!(!status.is_loading);
    assert!(!status.success);
    assert!(!status.has_checked);
    assert_eq!(status.error, None);
}
