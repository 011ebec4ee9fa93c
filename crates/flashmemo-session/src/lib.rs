//! Session lifecycle for the Flashmemo client.
//!
//! This crate provides:
//! - Sign-in, sign-up and sign-out against the Flashmemo API
//! - Persistence of the access token and user record
//! - Restore of a persisted session at process start, without network calls
//! - Explicit FSM-based session state with change notifications
//!
//! The composition root is [`SessionManager::bootstrap`]: it builds the
//! session and restores it once before handing it to the UI.

mod auth_fsm;
mod backend;
mod error;
mod persistence;
mod session;

pub use auth_fsm::session_machine;
pub use auth_fsm::{
    SessionMachine, SessionMachineInput, SessionMachineState, SessionState,
    SessionStateChangedPayload,
};
pub use backend::{AuthBackend, CredentialAttachment};
pub use error::{AuthError, AuthResult};
pub use persistence::CredentialStore;
pub use session::{SessionManager, SessionStateCallback};
