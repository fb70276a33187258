//! Session orchestration
//!
//! Ties key material, deep-link encoding, operation signing, submission, and
//! status polling together behind the `LinkingSession` lifecycle. The
//! orchestrator holds no per-session state itself; sessions are values the
//! caller owns, which makes concurrent sessions trivially safe.

use tracing::{debug, info, warn};

use aura_link_core::{
    build_deep_link, LinkConfig, SessionKeyPair, SponsorOperation, Timestamp,
};
use aura_link_node::{poll_status, PollOutcome, SponsorshipApi};

use crate::error::{Result, SessionError};
use crate::session::{LinkingSession, SessionState};

// ----------------------------------------------------------------------------
// Session Orchestrator
// ----------------------------------------------------------------------------

/// Drives linking sessions against a sponsorship API
pub struct SessionOrchestrator<A: SponsorshipApi> {
    config: LinkConfig,
    api: A,
}

impl<A: SponsorshipApi> SessionOrchestrator<A> {
    /// Create an orchestrator for a validated configuration
    pub fn new(config: LinkConfig, api: A) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, api })
    }

    /// The configuration this orchestrator runs with
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Start a new linking session
    ///
    /// Mints fresh key material, derives the public identifier, and builds
    /// the deep link. The returned session is ready to present: state is
    /// `LinkPresented`. If secure randomness is unavailable this fails
    /// before any link is shown.
    pub fn start(&self) -> Result<LinkingSession> {
        let key_pair = SessionKeyPair::generate()?;
        let app_user_id = self
            .config
            .id_encoding
            .mint_app_user_id(&key_pair.public_key_bytes());
        let deep_link = build_deep_link(
            &self.config.deep_link,
            self.config.id_encoding,
            &self.config.app_id,
            &app_user_id,
        )?;

        let mut session = LinkingSession::new(app_user_id, deep_link, key_pair);
        session.set_state(SessionState::LinkPresented);
        debug!(session_id = %session.session_id(), "linking session started");
        Ok(session)
    }

    /// Sign and submit the sponsor operation, then poll to a terminal state
    ///
    /// Idempotent with respect to terminal outcomes: once a session has
    /// settled, calling this again returns the recorded outcome without
    /// submitting a second operation. Polling only begins after the node
    /// has returned a receipt for the submission.
    pub async fn confirm_and_sponsor(
        &self,
        session: &mut LinkingSession,
    ) -> Result<PollOutcome> {
        if let Some(outcome) = session.outcome() {
            debug!(session_id = %session.session_id(), "session already settled");
            return Ok(outcome.clone());
        }

        match session.state() {
            SessionState::LinkPresented => {}
            SessionState::SponsorSubmitted => return Err(SessionError::SponsorshipInFlight),
            state => {
                return Err(SessionError::InvalidState {
                    operation: "confirm_and_sponsor",
                    state,
                })
            }
        }

        let signed = {
            let key_pair = session
                .key_pair()
                .ok_or(SessionError::KeyMaterialDiscarded)?;
            SponsorOperation::new(
                self.config.app_id.clone(),
                session.app_user_id().clone(),
                Timestamp::now(),
            )
            .sign(key_pair)?
        };

        session.set_state(SessionState::SponsorSubmitted);
        let receipt = match self.api.submit_operation(&signed).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(session_id = %session.session_id(), error = %e, "submission failed");
                session.set_state(SessionState::Failed);
                session.discard_key_material();
                return Err(SessionError::Submission(e));
            }
        };
        info!(
            session_id = %session.session_id(),
            hash = %receipt.hash,
            "sponsor operation accepted by node"
        );

        let outcome = poll_status(
            &self.api,
            session.app_user_id(),
            &self.config.poll,
            session.cancel_signal(),
        )
        .await;

        self.settle(session, outcome.clone());
        Ok(outcome)
    }

    /// Cancel a session: discard key material immediately and stop any
    /// further network activity
    pub fn cancel(&self, session: &mut LinkingSession) {
        info!(session_id = %session.session_id(), "session cancelled");
        session.cancel();
    }

    /// Apply a poll outcome to the session and release its key material
    fn settle(&self, session: &mut LinkingSession, outcome: PollOutcome) {
        let state = match &outcome {
            PollOutcome::Sponsored(_) => SessionState::Confirmed,
            PollOutcome::Rejected(_) | PollOutcome::Cancelled => SessionState::Failed,
            PollOutcome::TimedOut => SessionState::Expired,
        };
        info!(session_id = %session.session_id(), state = ?state, "session settled");

        session.set_state(state);
        session.discard_key_material();
        session.record_outcome(outcome);
    }
}
