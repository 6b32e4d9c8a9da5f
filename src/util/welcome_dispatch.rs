//! Effect half of the welcome dispatch: store lookup, the two API calls, and
//! the record write.
//!
//! SYSTEM CONTEXT
//! ==============
//! `components::welcome_dispatcher` advances a `WelcomeMachine` to
//! `Checking` and hands it here. The executor reads the record, lets
//! `state::welcome::decide` choose, and when dispatching runs both channels
//! concurrently. The record is written once both calls settle, whatever their
//! outcome.
//!
//! ERROR HANDLING
//! ==============
//! Channel failures are logged and folded into `WelcomeStatus::error`. Nothing
//! here returns `Err`: a failed welcome must never block the student.

#[cfg(test)]
#[path = "welcome_dispatch_test.rs"]
mod welcome_dispatch_test;

use crate::net::types::{WelcomeEmailRequest, WelcomeMessageRequest};
use crate::net::welcome::WelcomeTransport;
use crate::state::session::{Session, SessionUser};
use crate::state::welcome::{WelcomeAction, WelcomeMachine, WelcomeRecord, WelcomeStatus, record_key};
use crate::util::storage::KeyValueStore;

/// Who the welcome is addressed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WelcomeRecipient {
    pub user_id: String,
    pub email: String,
    pub phone_number: String,
    pub name: String,
}

impl From<&SessionUser> for WelcomeRecipient {
    fn from(user: &SessionUser) -> Self {
        Self {
            user_id: user.uid.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            name: user.greeting_name(),
        }
    }
}

pub fn read_record(store: &impl KeyValueStore, user_id: &str) -> Option<WelcomeRecord> {
    store
        .get(&record_key(user_id))
        .map(|sent_at| WelcomeRecord { user_id: user_id.to_owned(), sent_at })
}

fn write_record(store: &impl KeyValueStore, record: &WelcomeRecord) {
    store.set(&record_key(&record.user_id), &record.sent_at);
}

/// Forget that a user was welcomed so the next sign-in dispatches again.
/// Returns whether a record existed.
pub fn reset_welcome_record(store: &impl KeyValueStore, user_id: &str) -> bool {
    let existed = read_record(store, user_id).is_some();
    store.remove(&record_key(user_id));
    if existed {
        log::info!("welcome record reset for {user_id}");
    }
    existed
}

/// Advance the machine for a new session snapshot.
///
/// Returns the `Checking` machine and the user to welcome when a check should
/// start now. Loading snapshots are ignored; a new identity resets the
/// machine; an identity already past `NotChecked` yields nothing.
pub fn next_check(machine: &mut WelcomeMachine, session: &Session) -> Option<(WelcomeMachine, SessionUser)> {
    if session.loading {
        return None;
    }
    machine.observe(session.uid());
    machine.begin_check()?;
    let user = session.user.clone()?;
    Some((machine.clone(), user))
}

/// Fold a finished run back into the live machine.
///
/// Returns the status to publish, or `None` when the component is gone or
/// the identity moved on while the run was in flight.
pub fn settle_report(alive: bool, current: &mut WelcomeMachine, report: DispatchReport) -> Option<WelcomeStatus> {
    if !alive || current.identity() != report.machine.identity() {
        return None;
    }
    *current = report.machine;
    Some(report.status)
}

/// Result of one executor run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchReport {
    pub machine: WelcomeMachine,
    pub action: WelcomeAction,
    pub status: WelcomeStatus,
}

/// Run the check-and-dispatch step for a machine in `Checking`.
///
/// `sent_at` is only evaluated when a record is written.
pub async fn run_welcome_dispatch<S, T>(
    mut machine: WelcomeMachine,
    store: &S,
    transport: &T,
    recipient: &WelcomeRecipient,
    sent_at: impl FnOnce() -> String,
) -> DispatchReport
where
    S: KeyValueStore,
    T: WelcomeTransport,
{
    let record = read_record(store, &recipient.user_id);
    let action = machine.resolve(record.as_ref());
    let mut status = WelcomeStatus { has_checked: action != WelcomeAction::Skip, ..WelcomeStatus::default() };

    if action != WelcomeAction::Dispatch {
        if action == WelcomeAction::Suppress {
            log::debug!("welcome already sent to {}, skipping", recipient.user_id);
        }
        return DispatchReport { machine, action, status };
    }

    let email = WelcomeEmailRequest {
        user_email: recipient.email.clone(),
        user_name: recipient.name.clone(),
        is_first_login: true,
    };
    let message = WelcomeMessageRequest {
        phone_number: recipient.phone_number.clone(),
        user_name: recipient.name.clone(),
        is_first_login: true,
    };
    let (email_result, message_result) = futures::join!(transport.send_email(&email), transport.send_message(&message));

    let mut errors = Vec::new();
    if let Err(err) = &email_result {
        log::warn!("welcome email for {} failed: {err}", recipient.user_id);
        errors.push(format!("email: {err}"));
    }
    if let Err(err) = &message_result {
        log::warn!("welcome message for {} failed: {err}", recipient.user_id);
        errors.push(format!("message: {err}"));
    }

    // Attempt-based: written even when a channel failed.
    write_record(store, &WelcomeRecord { user_id: recipient.user_id.clone(), sent_at: sent_at() });
    machine.complete();

    status.success = errors.is_empty();
    status.error = if errors.is_empty() { None } else { Some(errors.join("; ")) };
    DispatchReport { machine, action, status }
}
