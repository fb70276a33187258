//! Linking session state
//!
//! A `LinkingSession` is one attempt to link a local identity to a BrightID
//! identity: an ephemeral keypair, the public identifier minted from it, and
//! the deep link presented to the user. Sessions are plain values owned by
//! the caller rather than entries in a shared store, so concurrent sessions
//! (multiple tabs, multiple terminals) never touch each other's state.
//!
//! A session is single-use. Once it reaches a terminal state the key
//! material is gone and a fresh session must be created for another attempt.

use std::sync::Arc;
use tokio::sync::watch;

use aura_link_core::{AppUserId, SessionId, SessionKeyPair};
use aura_link_node::PollOutcome;

// ----------------------------------------------------------------------------
// Session State
// ----------------------------------------------------------------------------

/// Lifecycle states of a linking session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Key material exists, deep link not yet derived
    Created,
    /// Deep link derived and ready to display
    LinkPresented,
    /// Sponsor operation signed and handed to the node
    SponsorSubmitted,
    /// Sponsorship confirmed by the node
    Confirmed,
    /// Submission failed, sponsorship rejected, or session cancelled
    Failed,
    /// Poll budget exhausted without confirmation
    Expired,
}

impl SessionState {
    /// Whether the session has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Confirmed | SessionState::Failed | SessionState::Expired
        )
    }
}

// ----------------------------------------------------------------------------
// Cancel Handle
// ----------------------------------------------------------------------------

/// Handle for cancelling a session while a sponsorship attempt is in flight
///
/// Cloned out of the session before `confirm_and_sponsor` takes the mutable
/// borrow; signalling it stops the poll within one tick and the orchestrator
/// then tears the session down.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Signal cancellation
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }
}

// ----------------------------------------------------------------------------
// Linking Session
// ----------------------------------------------------------------------------

/// One attempt to link a local identity to a BrightID identity
pub struct LinkingSession {
    session_id: SessionId,
    app_user_id: AppUserId,
    deep_link: String,
    state: SessionState,
    key_pair: Option<SessionKeyPair>,
    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,
    outcome: Option<PollOutcome>,
}

impl LinkingSession {
    pub(crate) fn new(
        app_user_id: AppUserId,
        deep_link: String,
        key_pair: SessionKeyPair,
    ) -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        Self {
            session_id: SessionId::generate(),
            app_user_id,
            deep_link,
            state: SessionState::Created,
            key_pair: Some(key_pair),
            cancel_tx: Arc::new(cancel_tx),
            cancel_rx,
            outcome: None,
        }
    }

    /// Opaque identifier of this attempt (not secret)
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The public identifier minted for this session
    pub fn app_user_id(&self) -> &AppUserId {
        &self.app_user_id
    }

    /// The deep link to display; valid only while the key material is held
    pub fn deep_link(&self) -> &str {
        &self.deep_link
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whether the session still holds its signing key
    pub fn has_key_material(&self) -> bool {
        self.key_pair.is_some()
    }

    /// The session's public key, while the key material is held
    pub fn public_key_bytes(&self) -> Option<[u8; 32]> {
        self.key_pair.as_ref().map(|kp| kp.public_key_bytes())
    }

    /// Terminal outcome of the sponsorship attempt, once one exists
    pub fn outcome(&self) -> Option<&PollOutcome> {
        self.outcome.as_ref()
    }

    /// Handle for cancelling an in-flight sponsorship attempt
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            cancel_tx: self.cancel_tx.clone(),
        }
    }

    pub(crate) fn key_pair(&self) -> Option<&SessionKeyPair> {
        self.key_pair.as_ref()
    }

    pub(crate) fn cancel_signal(&self) -> watch::Receiver<bool> {
        self.cancel_rx.clone()
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }

    /// Drop the signing key; the dalek key zeroizes itself on drop
    pub(crate) fn discard_key_material(&mut self) {
        self.key_pair = None;
    }

    pub(crate) fn record_outcome(&mut self, outcome: PollOutcome) {
        self.outcome = Some(outcome);
    }

    /// Tear the session down: stop any in-flight poll, discard the key,
    /// and settle on a terminal state
    pub(crate) fn cancel(&mut self) {
        let _ = self.cancel_tx.send(true);
        self.discard_key_material();
        if !self.state.is_terminal() {
            self.state = SessionState::Failed;
        }
        if self.outcome.is_none() {
            self.outcome = Some(PollOutcome::Cancelled);
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> LinkingSession {
        let key_pair = SessionKeyPair::generate().unwrap();
        LinkingSession::new(
            AppUserId::new("abc123"),
            "https://example.org/link/abc123".to_string(),
            key_pair,
        )
    }

    #[test]
    fn test_new_session_holds_key_material() {
        let session = test_session();
        assert_eq!(session.state(), SessionState::Created);
        assert!(session.has_key_material());
        assert!(!session.is_terminal());
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_cancel_discards_key_material() {
        let mut session = test_session();
        session.cancel();

        assert!(!session.has_key_material());
        assert_eq!(session.state(), SessionState::Failed);
        assert!(matches!(session.outcome(), Some(PollOutcome::Cancelled)));
    }

    #[test]
    fn test_cancel_does_not_overwrite_terminal_state() {
        let mut session = test_session();
        session.set_state(SessionState::Confirmed);
        session.cancel();

        assert_eq!(session.state(), SessionState::Confirmed);
    }

    #[test]
    fn test_cancel_handle_signals_receiver() {
        let session = test_session();
        let mut signal = session.cancel_signal();
        assert!(!*signal.borrow());

        session.cancel_handle().cancel();
        assert!(*signal.borrow_and_update());
    }

    #[test]
    fn test_terminal_state_classification() {
        assert!(!SessionState::Created.is_terminal());
        assert!(!SessionState::LinkPresented.is_terminal());
        assert!(!SessionState::SponsorSubmitted.is_terminal());
        assert!(SessionState::Confirmed.is_terminal());
        assert!(SessionState::Failed.is_terminal());
        assert!(SessionState::Expired.is_terminal());
    }
}
