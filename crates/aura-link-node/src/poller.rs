//! Sponsorship status polling
//!
//! After a sponsor operation is submitted, the node applies it on its own
//! schedule and a human finishes the flow on another device, so confirmation
//! arrives at human pace. The poller queries the node on a fixed interval
//! until it reaches exactly one terminal outcome: sponsored, rejected, timed
//! out, or cancelled. Between ticks nothing is held and no thread blocks.
//!
//! Callers must only start polling after `submit_operation` has returned a
//! receipt; status reads are meaningless before the node has the operation.

use tokio::sync::watch;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, warn};

use aura_link_core::{AppUserId, PollConfig};

use crate::api::{SponsorshipState, SponsorshipStatus};
use crate::client::SponsorshipApi;

// ----------------------------------------------------------------------------
// Poll Outcome
// ----------------------------------------------------------------------------

/// Terminal result of one polling run
///
/// Every run produces exactly one of these; the poller never transitions out
/// of a terminal state.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// The node confirmed the sponsorship
    Sponsored(SponsorshipStatus),
    /// The node explicitly refused the sponsorship
    Rejected(SponsorshipStatus),
    /// The attempt/timeout budget ran out without confirmation
    TimedOut,
    /// The caller cancelled the session
    Cancelled,
}

impl PollOutcome {
    /// The last node-reported status, when one exists
    pub fn status(&self) -> Option<&SponsorshipStatus> {
        match self {
            PollOutcome::Sponsored(status) | PollOutcome::Rejected(status) => Some(status),
            PollOutcome::TimedOut | PollOutcome::Cancelled => None,
        }
    }

    /// Whether the sponsorship was confirmed
    pub fn is_sponsored(&self) -> bool {
        matches!(self, PollOutcome::Sponsored(_))
    }
}

// ----------------------------------------------------------------------------
// Poller
// ----------------------------------------------------------------------------

/// Poll the node until the sponsorship reaches a terminal outcome
///
/// Transient failures (network, malformed bodies) are retried inside the
/// attempt/timeout budget and never surface individually. Cancellation is
/// observed before every request and during every inter-tick sleep, so no
/// further request fires after the cancel signal lands.
pub async fn poll_status<A: SponsorshipApi + ?Sized>(
    api: &A,
    app_user_id: &AppUserId,
    config: &PollConfig,
    mut cancel: watch::Receiver<bool>,
) -> PollOutcome {
    let deadline = Instant::now() + config.timeout();
    let mut attempts: u32 = 0;

    loop {
        if *cancel.borrow() {
            return PollOutcome::Cancelled;
        }

        match api.sponsorship_status(app_user_id).await {
            Ok(status) => match status.state {
                SponsorshipState::Sponsored => return PollOutcome::Sponsored(status),
                SponsorshipState::Rejected => return PollOutcome::Rejected(status),
                SponsorshipState::Pending | SponsorshipState::Unknown => {
                    debug!(app_user_id = %app_user_id, state = ?status.state, "still waiting");
                }
            },
            Err(e) => {
                // Transient by policy: only budget exhaustion ends the poll
                warn!(app_user_id = %app_user_id, error = %e, "status query failed, will retry");
            }
        }

        attempts += 1;
        if let Some(max_attempts) = config.max_attempts {
            if attempts >= max_attempts {
                return PollOutcome::TimedOut;
            }
        }
        if Instant::now() >= deadline {
            return PollOutcome::TimedOut;
        }

        tokio::select! {
            _ = sleep(config.interval()) => {}
            _ = sleep_until(deadline) => return PollOutcome::TimedOut,
            changed = cancel.changed() => {
                // A closed channel means the session owner is gone; stop
                if changed.is_err() || *cancel.borrow() {
                    return PollOutcome::Cancelled;
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
