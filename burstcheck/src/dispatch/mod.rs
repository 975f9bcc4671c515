//! Fan-out dispatcher
//!
//! Fires `count` identical GET requests at one target, all at once, and waits
//! for every one of them to settle before summarizing. There is no
//! concurrency cap, no retry and no cancellation; each slot settles to
//! exactly one [`RequestOutcome`].

/// Per-request outcomes and transport failure causes
pub mod outcome;
/// Batch summaries and the reporting pass
pub mod summary;
/// Outbound GET seam and its reqwest implementation
pub mod transport;

pub use outcome::{RequestOutcome, TransportError};
pub use summary::{BatchSummary, SlotOutcome};
pub use transport::{HttpTransport, Transport, TransportResponse};

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use url::Url;
use uuid::Uuid;

use crate::common::error::DispatchError;

/// Launches batches through a [`Transport`]
#[derive(Debug)]
pub struct Dispatcher<T> {
    transport: Arc<T>,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Dispatcher<HttpTransport> {
    /// reqwest-backed dispatcher with an optional per-request timeout
    pub fn http(timeout: Option<Duration>) -> Result<Self, DispatchError> {
        Ok(Self::new(HttpTransport::new(timeout)?))
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Wrap a transport
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Send `count` concurrent GETs to `target` and wait for all of them.
    ///
    /// Per-request failures become outcomes. The only error is a slot task
    /// that ended without settling; it is returned after every other slot has
    /// been joined.
    pub async fn run_batch(
        &self,
        target: &Url,
        count: usize,
    ) -> Result<BatchSummary, DispatchError> {
        let batch_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();

        info!(%batch_id, url = %target, count, "Dispatching batch");

        let shared_target = Arc::new(target.clone());
        let mut handles = Vec::with_capacity(count);

        for slot in 1..=count {
            let transport = Arc::clone(&self.transport);
            let target = Arc::clone(&shared_target);
            handles.push(tokio::spawn(async move {
                let sent = Instant::now();
                let outcome = RequestOutcome::from_transport(transport.get(slot, &target).await);
                let latency_ms = sent.elapsed().as_millis() as u64;
                debug!(%batch_id, slot, latency_ms, success = outcome.is_success(), "Slot settled");
                SlotOutcome {
                    slot,
                    latency_ms,
                    outcome,
                }
            }));
        }

        let mut outcomes = Vec::with_capacity(count);
        let mut lost = None;

        for (index, handle) in handles.into_iter().enumerate() {
            let slot = index + 1;
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    error!(%batch_id, slot, error = %e, "Slot task ended without an outcome");
                    lost.get_or_insert(DispatchError::SlotLost {
                        slot,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if let Some(err) = lost {
            return Err(err);
        }

        Ok(BatchSummary::new(
            batch_id,
            target.to_string(),
            started_at,
            start.elapsed(),
            outcomes,
        ))
    }
}
