use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// One recorded event, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticEntry {
    pub session_id: String,
    pub sequence_id: u64,
    pub action: Value,
}

/// Batcher state held by the host's state container.
///
/// Values are never mutated by transitions: the batcher consumes a state and
/// returns a new one. `current_batch` is shared behind an `Arc`, so cloning a
/// state is cheap and appends copy the buffer only while it is still shared.
#[derive(Debug, Clone, PartialEq)]
pub struct BatcherState {
    pub is_enabled: bool,
    pub session_id: String,
    pub current_batch_sequence_number: u64,
    pub current_batch: Arc<Vec<AnalyticEntry>>,
    pub time_last_sent: DateTime<Utc>,
}

impl BatcherState {
    pub fn new(session_id: impl Into<String>, is_enabled: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            is_enabled,
            session_id: session_id.into(),
            current_batch_sequence_number: 0,
            current_batch: Arc::new(Vec::new()),
            time_last_sent: created_at,
        }
    }

    /// State for a fresh session with a random session id.
    pub fn new_session(is_enabled: bool) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), is_enabled, Utc::now())
    }

    /// Host-side update of the batch sequence counter.
    pub fn with_sequence_number(mut self, sequence_number: u64) -> Self {
        self.current_batch_sequence_number = sequence_number;
        self
    }

    pub fn with_time_last_sent(mut self, time_last_sent: DateTime<Utc>) -> Self {
        self.time_last_sent = time_last_sent;
        self
    }

    pub fn batch_len(&self) -> usize {
        self.current_batch.len()
    }

    /// Serialize the current batch into the wire payload.
    pub fn batch_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self.current_batch.as_slice())
    }
}
