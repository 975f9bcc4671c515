//! Batch summaries and the reporting pass

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use super::outcome::RequestOutcome;

/// Outcome of one slot, tagged with its 1-based position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotOutcome {
    /// 1-based slot index
    pub slot: usize,
    /// Time from send to settle
    pub latency_ms: u64,
    /// Settled result
    #[serde(flatten)]
    pub outcome: RequestOutcome,
}

/// Result of one `run_batch` call
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Correlates log lines of one batch
    pub batch_id: Uuid,
    /// URL every slot targeted
    pub target: String,
    /// Dispatch start time
    pub started_at: DateTime<Utc>,
    /// Wall time from first launch to full join
    pub elapsed_ms: u64,
    /// Number of slots
    pub total: usize,
    /// Slots with a success outcome
    pub succeeded: usize,
    /// Slots with an HTTP or transport error
    pub failed: usize,
    /// One entry per slot, in slot order
    pub outcomes: Vec<SlotOutcome>,
}

impl BatchSummary {
    /// Build a summary from outcomes already sorted by slot.
    pub fn new(
        batch_id: Uuid,
        target: String,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        outcomes: Vec<SlotOutcome>,
    ) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.outcome.is_success()).count();
        Self {
            batch_id,
            target,
            started_at,
            elapsed_ms: elapsed.as_millis() as u64,
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            outcomes,
        }
    }

    /// Successful slots in slot order
    pub fn successes(&self) -> impl Iterator<Item = &SlotOutcome> {
        self.outcomes.iter().filter(|o| o.outcome.is_success())
    }

    /// Failed slots in slot order
    pub fn failures(&self) -> impl Iterator<Item = &SlotOutcome> {
        self.outcomes.iter().filter(|o| !o.outcome.is_success())
    }

    /// 1-based indices of failed slots
    pub fn failed_slots(&self) -> Vec<usize> {
        self.failures().map(|o| o.slot).collect()
    }

    /// True when there are no failures. An empty batch counts as all succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Log each slot in slot order, then a single completion line.
    pub fn report(&self) {
        for entry in &self.outcomes {
            match &entry.outcome {
                RequestOutcome::Success(_) => match entry.outcome.message() {
                    Some(message) => info!(
                        batch_id = %self.batch_id,
                        latency_ms = entry.latency_ms,
                        "{} : {}",
                        entry.slot,
                        message
                    ),
                    None => warn!(
                        batch_id = %self.batch_id,
                        slot = entry.slot,
                        "Response payload has no message field"
                    ),
                },
                RequestOutcome::HttpError(status) => warn!(
                    batch_id = %self.batch_id,
                    slot = entry.slot,
                    status,
                    "Failed to trigger API"
                ),
                RequestOutcome::TransportError(error) => warn!(
                    batch_id = %self.batch_id,
                    slot = entry.slot,
                    error = %error,
                    "Error triggering API"
                ),
            }
        }

        info!(
            batch_id = %self.batch_id,
            url = %self.target,
            succeeded = self.succeeded,
            failed = self.failed,
            elapsed_ms = self.elapsed_ms,
            "All {} API calls completed.",
            self.total
        );
    }
}
