//! Welcome-dispatch eligibility state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The first time a student is seen signed in, the portal sends a welcome
//! email and a welcome message once. This module is the decision half: a
//! per-identity phase machine and the pure `decide` step. The effect half
//! (store reads, HTTP calls, record write) is `util::welcome_dispatch`.
//!
//! TRADE-OFFS
//! ==========
//! A record is written after an *attempt*, not after confirmed delivery, so a
//! transient failure suppresses later retries until the record is reset.

#[cfg(test)]
#[path = "welcome_test.rs"]
mod welcome_test;

/// Prefix of the key-value store key holding a user's dispatch record.
pub const RECORD_KEY_PREFIX: &str = "welcome_sent_";

pub fn record_key(user_id: &str) -> String {
    format!("{RECORD_KEY_PREFIX}{user_id}")
}

/// Proof that a user's welcome dispatch was already attempted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WelcomeRecord {
    pub user_id: String,
    /// RFC 3339 timestamp of the attempt.
    pub sent_at: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WelcomePhase {
    #[default]
    NotChecked,
    Checking,
    Dispatching,
    /// A record already existed; nothing was sent.
    Suppressed,
    /// The attempt finished and the record was written.
    Done,
}

impl WelcomePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Suppressed | Self::Done)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WelcomeAction {
    Skip,
    Suppress,
    Dispatch,
}

/// Decide what to do once the store has been read for the current identity.
pub fn decide(phase: WelcomePhase, record: Option<&WelcomeRecord>) -> WelcomeAction {
    match (phase, record) {
        (WelcomePhase::Checking, Some(_)) => WelcomeAction::Suppress,
        (WelcomePhase::Checking, None) => WelcomeAction::Dispatch,
        _ => WelcomeAction::Skip,
    }
}

/// Phase machine bound to one user identity at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WelcomeMachine {
    identity: Option<String>,
    phase: WelcomePhase,
}

impl WelcomeMachine {
    pub fn phase(&self) -> WelcomePhase {
        self.phase
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Track the current identity. A different identity (or sign-out) resets
    /// the machine to `NotChecked`. Returns whether a reset happened.
    pub fn observe(&mut self, identity: Option<&str>) -> bool {
        if self.identity.as_deref() == identity {
            return false;
        }
        self.identity = identity.map(str::to_owned);
        self.phase = WelcomePhase::NotChecked;
        true
    }

    /// `NotChecked -> Checking` when an identity is known; yields that identity.
    pub fn begin_check(&mut self) -> Option<String> {
        if self.phase != WelcomePhase::NotChecked {
            return None;
        }
        let identity = self.identity.clone()?;
        self.phase = WelcomePhase::Checking;
        Some(identity)
    }

    /// Apply the store lookup result and return the chosen action.
    pub fn resolve(&mut self, record: Option<&WelcomeRecord>) -> WelcomeAction {
        let action = decide(self.phase, record);
        match action {
            WelcomeAction::Suppress => self.phase = WelcomePhase::Suppressed,
            WelcomeAction::Dispatch => self.phase = WelcomePhase::Dispatching,
            WelcomeAction::Skip => {}
        }
        action
    }

    /// `Dispatching -> Done` once the attempt has been recorded.
    pub fn complete(&mut self) {
        if self.phase == WelcomePhase::Dispatching {
            self.phase = WelcomePhase::Done;
        }
    }
}

/// Read state for UI consumers. The dispatcher itself renders none of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WelcomeStatus {
    pub is_loading: bool,
    pub error: Option<String>,
    pub success: bool,
    pub has_checked: bool,
}
