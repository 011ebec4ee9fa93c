//! Session state machine using rust-fsm.
//!
//! ## State Diagram
//!
//! ```text
//! ┌─────────────────┐  RestoreRequested (self)
//! │    Restoring    │ (initial)
//! └───┬─────────┬───┘
//!     │         │ NoSession
//!     │         ▼
//!     │   ┌─────────────────┐ SignInAttempt  ┌─────────────┐
//!     │   │    Anonymous    │ ─────────────► │  SigningIn  │ ── SignInFailed ──► Anonymous
//!     │   └─────────────────┘ SignUpAttempt  ├─────────────┤
//!     │                       ─────────────► │  SigningUp  │ ── SignUpFailed ──► Anonymous
//!     │ RestoredSession                      └──────┬──────┘
//!     ▼                                             │ SignInSuccess / SignUpSuccess
//! ┌─────────────────┐ ◄─────────────────────────────┘
//! │  Authenticated  │
//! └────────┬────────┘
//!          │ SignOutRequested (also from Anonymous and Restoring)
//!          ▼
//! ┌─────────────────┐
//! │   SigningOut    │ ── SignOutComplete ──► Anonymous
//! └─────────────────┘
//! ```
//!
//! `RestoreRequested` is accepted from every settled state so restore can run
//! again after bootstrap.

use rust_fsm::*;
use serde::{Deserialize, Serialize};

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub session_machine(Restoring)

    Restoring => {
        RestoredSession => Authenticated,
        NoSession => Anonymous,
        RestoreRequested => Restoring,
        SignOutRequested => SigningOut
    },
    Anonymous => {
        SignInAttempt => SigningIn,
        SignUpAttempt => SigningUp,
        RestoreRequested => Restoring,
        SignOutRequested => SigningOut
    },
    SigningIn => {
        SignInSuccess => Authenticated,
        SignInFailed => Anonymous
    },
    SigningUp => {
        SignUpSuccess => Authenticated,
        SignUpFailed => Anonymous
    },
    Authenticated => {
        SignOutRequested => SigningOut,
        RestoreRequested => Restoring
    },
    SigningOut => {
        SignOutComplete => Anonymous
    }
}

pub use session_machine::Input as SessionMachineInput;
pub use session_machine::State as SessionMachineState;
pub use session_machine::StateMachine as SessionMachine;

/// Session state as seen by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Reading persisted credentials.
    Restoring,
    /// No user.
    Anonymous,
    /// Sign-in request in flight.
    SigningIn,
    /// Sign-up request in flight.
    SigningUp,
    /// A user is signed in and the bearer token is attached.
    Authenticated,
    /// Clearing the session.
    SigningOut,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }

    /// Returns true while an operation is in flight.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SessionState::Restoring
                | SessionState::SigningIn
                | SessionState::SigningUp
                | SessionState::SigningOut
        )
    }

    /// The UI shows its loading view in these states.
    pub fn is_restoring(&self) -> bool {
        matches!(self, SessionState::Restoring | SessionState::SigningOut)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Restoring => "restoring",
            SessionState::Anonymous => "anonymous",
            SessionState::SigningIn => "signing_in",
            SessionState::SigningUp => "signing_up",
            SessionState::Authenticated => "authenticated",
            SessionState::SigningOut => "signing_out",
        };
        f.write_str(name)
    }
}

impl From<&SessionMachineState> for SessionState {
    fn from(state: &SessionMachineState) -> Self {
        match state {
            SessionMachineState::Restoring => SessionState::Restoring,
            SessionMachineState::Anonymous => SessionState::Anonymous,
            SessionMachineState::SigningIn => SessionState::SigningIn,
            SessionMachineState::SigningUp => SessionState::SigningUp,
            SessionMachineState::Authenticated => SessionState::Authenticated,
            SessionMachineState::SigningOut => SessionState::SigningOut,
        }
    }
}

/// Payload for session state change events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStateChangedPayload {
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
