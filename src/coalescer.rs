//! Client-side call coalescing.
//!
//! A burst of searches fired while one is already on the wire must not turn
//! into a burst of upstream calls. The coalescer lets the first call through,
//! converts every overlapping call into a fixed-duration suppression
//! obligation, and after the original call completes issues at most one
//! trailing call once the accumulated obligations have elapsed.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::dto::search::CardsQueryResponse;
use crate::repository::CardsSearchQuery;
use crate::services::ServiceResult;

/// Length of one suppression obligation.
pub const SUPPRESSION_DELAY: Duration = Duration::from_millis(1000);

/// The single operation a coalescer knows how to issue.
#[async_trait]
pub trait SearchIssuer: Send + Sync {
    async fn issue(&self, query: &CardsSearchQuery) -> ServiceResult<CardsQueryResponse>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CallStatus {
    Idle,
    InFlight,
}

struct CoalescerState {
    status: CallStatus,
    delay_chain: Vec<Duration>,
}

/// Serializes overlapping search calls into at most one outstanding upstream
/// call per instance, plus at most one trailing call per suppression window.
pub struct CallCoalescer<S> {
    issuer: S,
    suppression_delay: Duration,
    state: Mutex<CoalescerState>,
}

impl<S: SearchIssuer> CallCoalescer<S> {
    pub fn new(issuer: S) -> Self {
        Self {
            issuer,
            suppression_delay: SUPPRESSION_DELAY,
            state: Mutex::new(CoalescerState {
                status: CallStatus::Idle,
                delay_chain: Vec::new(),
            }),
        }
    }

    /// Overrides the per-suppression delay.
    pub fn suppression_delay(mut self, delay: Duration) -> Self {
        self.suppression_delay = delay;
        self
    }

    /// Runs one coalesced search, delivering any result to `deliver`.
    ///
    /// Callers must know two things. A call arriving while another is in
    /// flight is absorbed: it returns immediately and its `deliver` is never
    /// invoked — no error, no result. And the trailing call that follows a
    /// suppression window replays the FIRST caller's query and sink, not the
    /// most recent one; the freshest suppressed query is discarded.
    ///
    /// A failed upstream call is logged and delivers nothing.
    pub async fn search<F>(&self, query: CardsSearchQuery, deliver: F)
    where
        F: Fn(CardsQueryResponse),
    {
        {
            let mut state = self.lock_state();
            if state.status == CallStatus::InFlight {
                let delay = self.suppression_delay;
                state.delay_chain.push(delay);
                return;
            }
            state.status = CallStatus::InFlight;
        }

        if let Some(result) = self.issue(&query).await {
            deliver(result);
        }

        // Snapshot of the obligations accumulated while we were in flight.
        let pending: Duration = self.lock_state().delay_chain.iter().sum();
        if pending.is_zero() {
            return;
        }

        tokio::time::sleep(pending).await;

        self.lock_state().status = CallStatus::InFlight;
        if let Some(result) = self.issue(&query).await {
            deliver(result);
        }

        self.lock_state().delay_chain.clear();
    }

    /// Issues one upstream call, restoring `Idle` on completion either way.
    async fn issue(&self, query: &CardsSearchQuery) -> Option<CardsQueryResponse> {
        log::info!("calling search API for term: {}", query.term);
        let result = self.issuer.issue(query).await;
        self.lock_state().status = CallStatus::Idle;

        match result {
            Ok(response) => Some(response),
            Err(e) => {
                log::warn!("coalesced search failed: {e}");
                None
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CoalescerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
