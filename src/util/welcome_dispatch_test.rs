use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::error::AppError;
use crate::state::welcome::WelcomePhase;
use crate::util::storage::MemoryStore;

#[derive(Default)]
struct MockTransport {
    emails: RefCell<Vec<WelcomeEmailRequest>>,
    messages: RefCell<Vec<WelcomeMessageRequest>>,
    fail_email: bool,
    fail_message: bool,
}

impl WelcomeTransport for MockTransport {
    async fn send_email(&self, request: &WelcomeEmailRequest) -> Result<(), AppError> {
        self.emails.borrow_mut().push(request.clone());
        if self.fail_email { Err(AppError::Network("connection reset".to_owned())) } else { Ok(()) }
    }

    async fn send_message(&self, request: &WelcomeMessageRequest) -> Result<(), AppError> {
        self.messages.borrow_mut().push(request.clone());
        if self.fail_message { Err(AppError::Api("invalid phone number".to_owned())) } else { Ok(()) }
    }
}

fn recipient() -> WelcomeRecipient {
    WelcomeRecipient {
        user_id: "u1".to_owned(),
        email: "ada@uni.edu".to_owned(),
        phone_number: "+15550100".to_owned(),
        name: "Ada".to_owned(),
    }
}

fn checking(uid: &str) -> WelcomeMachine {
    let mut machine = WelcomeMachine::default();
    machine.observe(Some(uid));
    machine.begin_check();
    machine
}

fn run(store: &MemoryStore, transport: &MockTransport) -> DispatchReport {
    block_on(run_welcome_dispatch(checking("u1"), store, transport, &recipient(), || {
        "2026-10-18T09:00:00Z".to_owned()
    }))
}

// =============================================================
// Eligible
// =============================================================

#[test]
fn first_visit_sends_one_email_and_one_message() {
    let store = MemoryStore::default();
    let transport = MockTransport::default();

    let report = run(&store, &transport);

    assert_eq!(report.action, WelcomeAction::Dispatch);
    assert_eq!(transport.emails.borrow().len(), 1);
    assert_eq!(transport.messages.borrow().len(), 1);
    assert_eq!(store.get("welcome_sent_u1").as_deref(), Some("2026-10-18T09:00:00Z"));
    assert_eq!(report.machine.phase(), WelcomePhase::Done);
    assert_eq!(
        report.status,
        WelcomeStatus { is_loading: false, error: None, success: true, has_checked: true }
    );
}

#[test]
fn requests_carry_name_and_first_login_flag() {
    let store = MemoryStore::default();
    let transport = MockTransport::default();
    run(&store, &transport);

    let email = &transport.emails.borrow()[0];
    assert_eq!(email.user_email, "ada@uni.edu");
    assert_eq!(email.user_name, "Ada");
    assert!(email.is_first_login);

    let message = &transport.messages.borrow()[0];
    assert_eq!(message.phone_number, "+15550100");
    assert_eq!(message.user_name, "Ada");
    assert!(message.is_first_login);
}

// =============================================================
// Suppressed
// =============================================================

#[test]
fn existing_record_triggers_no_calls() {
    let store = MemoryStore::default();
    store.set("welcome_sent_u1", "2026-01-01T00:00:00Z");
    let transport = MockTransport::default();

    let report = run(&store, &transport);

    assert_eq!(report.action, WelcomeAction::Suppress);
    assert!(transport.emails.borrow().is_empty());
    assert!(transport.messages.borrow().is_empty());
    assert_eq!(report.machine.phase(), WelcomePhase::Suppressed);
    assert!(report.status.has_checked);
    assert_eq!(store.get("welcome_sent_u1").as_deref(), Some("2026-01-01T00:00:00Z"));
}

#[test]
fn second_run_after_dispatch_is_suppressed() {
    let store = MemoryStore::default();
    let transport = MockTransport::default();
    run(&store, &transport);
    let report = run(&store, &transport);

    assert_eq!(report.action, WelcomeAction::Suppress);
    assert_eq!(transport.emails.borrow().len(), 1);
    assert_eq!(transport.messages.borrow().len(), 1);
}

#[test]
fn machine_not_in_checking_does_nothing() {
    let store = MemoryStore::default();
    let transport = MockTransport::default();
    let report = block_on(run_welcome_dispatch(
        WelcomeMachine::default(),
        &store,
        &transport,
        &recipient(),
        || unreachable!("no record is written"),
    ));
    assert_eq!(report.action, WelcomeAction::Skip);
    assert!(!report.status.has_checked);
    assert!(store.is_empty());
    assert!(transport.emails.borrow().is_empty());
}

// =============================================================
// Failures
// =============================================================

#[test]
fn failed_email_still_writes_record() {
    let store = MemoryStore::default();
    let transport = MockTransport { fail_email: true, ..MockTransport::default() };

    let report = run(&store, &transport);

    assert!(store.get("welcome_sent_u1").is_some());
    assert_eq!(transport.messages.borrow().len(), 1);
    assert!(!report.status.success);
    let error = report.status.error.unwrap();
    assert!(error.starts_with("email:"), "{error}");
    assert!(!error.contains("message:"));
    assert_eq!(report.machine.phase(), WelcomePhase::Done);
}

#[test]
fn both_channels_failing_reports_both() {
    let store = MemoryStore::default();
    let transport = MockTransport { fail_email: true, fail_message: true, ..MockTransport::default() };

    let report = run(&store, &transport);

    assert!(store.get("welcome_sent_u1").is_some());
    let error = report.status.error.unwrap();
    assert!(error.contains("email:") && error.contains("message:"), "{error}");
}

// =============================================================
// Records
// =============================================================

#[test]
fn reset_removes_record_and_reenables_dispatch() {
    let store = MemoryStore::default();
    let transport = MockTransport::default();
    run(&store, &transport);

    assert!(reset_welcome_record(&store, "u1"));
    assert!(!reset_welcome_record(&store, "u1"));

    let report = run(&store, &transport);
    assert_eq!(report.action, WelcomeAction::Dispatch);
    assert_eq!(transport.emails.borrow().len(), 2);
}

#[test]
fn records_are_per_user() {
    let store = MemoryStore::default();
    store.set("welcome_sent_u2", "2026-01-01T00:00:00Z");
    assert!(read_record(&store, "u1").is_none());
    assert_eq!(read_record(&store, "u2").map(|r| r.user_id), Some("u2".to_owned()));
}

#[test]
fn recipient_from_session_user_fills_defaults() {
    let user = SessionUser {
        uid: "u9".to_owned(),
        email: "grace@uni.edu".to_owned(),
        display_name: None,
        phone_number: None,
        email_verified: true,
    };
    let recipient = WelcomeRecipient::from(&user);
    assert_eq!(recipient.user_id, "u9");
    assert_eq!(recipient.name, "grace");
    assert_eq!(recipient.phone_number, "");
}

// =============================================================
// Session wiring
// =============================================================

fn signed_in(uid: &str) -> Session {
    Session {
        user: Some(SessionUser {
            uid: uid.to_owned(),
            email: format!("{uid}@uni.edu"),
            display_name: None,
            phone_number: None,
            email_verified: true,
        }),
        loading: false,
    }
}

#[test]
fn next_check_waits_while_session_is_loading() {
    let mut machine = checking("u1");
    let before = machine.clone();
    let loading = Session { loading: true, ..signed_in("u2") };
    assert!(next_check(&mut machine, &loading).is_none());
    assert_eq!(machine, before);
}

#[test]
fn next_check_starts_first_signed_in_identity() {
    let mut machine = WelcomeMachine::default();
    let (snapshot, user) = next_check(&mut machine, &signed_in("u1")).unwrap();
    assert_eq!(user.uid, "u1");
    assert_eq!(snapshot.phase(), WelcomePhase::Checking);
    assert_eq!(machine, snapshot);
}

#[test]
fn next_check_does_not_redispatch_same_identity() {
    let mut machine = WelcomeMachine::default();
    assert!(next_check(&mut machine, &signed_in("u1")).is_some());
    assert!(next_check(&mut machine, &signed_in("u1")).is_none());
    assert_eq!(machine.phase(), WelcomePhase::Checking);

    let report = run(&MemoryStore::default(), &MockTransport::default());
    machine = report.machine;
    assert!(next_check(&mut machine, &signed_in("u1")).is_none());
    assert_eq!(machine.phase(), WelcomePhase::Done);
}

#[test]
fn next_check_restarts_for_new_identity() {
    let mut machine = WelcomeMachine::default();
    assert!(next_check(&mut machine, &signed_in("u1")).is_some());
    let (snapshot, user) = next_check(&mut machine, &signed_in("u2")).unwrap();
    assert_eq!(user.uid, "u2");
    assert_eq!(snapshot.identity(), Some("u2"));
    assert_eq!(snapshot.phase(), WelcomePhase::Checking);
}

#[test]
fn next_check_resets_on_sign_out_without_dispatching() {
    let mut machine = checking("u1");
    let signed_out = Session { user: None, loading: false };
    assert!(next_check(&mut machine, &signed_out).is_none());
    assert_eq!(machine.identity(), None);
    assert_eq!(machine.phase(), WelcomePhase::NotChecked);
}

#[test]
fn settle_report_applies_result_for_current_identity() {
    let mut current = checking("u1");
    let report = run(&MemoryStore::default(), &MockTransport::default());
    let status = settle_report(true, &mut current, report).unwrap();
    assert!(status.success);
    assert!(status.has_checked);
    assert_eq!(current.phase(), WelcomePhase::Done);
}

#[test]
fn settle_report_drops_result_after_unmount() {
    let mut current = checking("u1");
    let report = run(&MemoryStore::default(), &MockTransport::default());
    assert!(settle_report(false, &mut current, report).is_none());
    assert_eq!(current.phase(), WelcomePhase::Checking);
}

#[test]
fn settle_report_drops_result_for_stale_identity() {
    let mut current = checking("u2");
    let report = run(&MemoryStore::default(), &MockTransport::default());
    assert!(settle_report(true, &mut current, report).is_none());
    assert_eq!(current, checking("u2"));
}
