use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::runtime::Handle;

use beacon_delivery::Delivery;
use beacon_types::action_types::SET_ANALYTICS_ENABLED;
use beacon_types::{ActionFilter, AnalyticEntry, BatchPolicy, BatcherState, Event, GenericEvent};

use crate::builder::EventBatcherBuilder;
use crate::clock::Clock;

/// Analytics batcher: filters events, buffers them and flushes batches.
///
/// `apply` is a pure state transition apart from the delivery it may spawn.
/// Deliveries are detached: their outcome is logged and never reaches the
/// state.
pub struct EventBatcher {
    delivery: Arc<dyn Delivery>,
    filter: ActionFilter,
    policy: BatchPolicy,
    clock: Arc<dyn Clock>,
    runtime: Option<Handle>,
}

impl EventBatcher {
    pub(crate) fn new(
        delivery: Arc<dyn Delivery>,
        filter: ActionFilter,
        policy: BatchPolicy,
        clock: Arc<dyn Clock>,
        runtime: Option<Handle>,
    ) -> Self {
        Self {
            delivery,
            filter,
            policy,
            clock,
            runtime,
        }
    }

    pub fn builder() -> EventBatcherBuilder {
        EventBatcherBuilder::new()
    }

    pub fn filter(&self) -> &ActionFilter {
        &self.filter
    }

    pub fn policy(&self) -> &BatchPolicy {
        &self.policy
    }

    /// Compute the next state for `event`.
    ///
    /// The operation is chosen by the event's `type`, so a generic event tagged
    /// `SET_ANALYTICS_ENABLED` toggles recording instead of being recorded.
    pub fn apply(&self, state: BatcherState, event: Event) -> BatcherState {
        match event {
            Event::SetAnalyticsEnabled { is_enabled } => Self::set_enabled(state, is_enabled),
            Event::Action(event) if event.action_type.as_str() == SET_ANALYTICS_ENABLED => {
                match event.enabled_flag() {
                    Some(is_enabled) => Self::set_enabled(state, is_enabled),
                    None => {
                        tracing::warn!("Ignoring {} without a boolean isEnabled field", SET_ANALYTICS_ENABLED);
                        state
                    }
                }
            }
            Event::Action(event) => self.record(state, event),
        }
    }

    /// Flush whatever is buffered, regardless of thresholds.
    ///
    /// Meant for hosts draining on shutdown. An empty batch is left alone.
    pub fn flush_now(&self, state: BatcherState) -> BatcherState {
        if state.current_batch.is_empty() {
            return state;
        }
        let now = self.clock.now();
        self.flush(state, now)
    }

    fn set_enabled(mut state: BatcherState, is_enabled: bool) -> BatcherState {
        state.is_enabled = is_enabled;
        state
    }

    fn accepts(&self, state: &BatcherState, event: &GenericEvent) -> bool {
        state.is_enabled && self.filter.is_recorded(event.action_type.as_str())
    }

    fn record(&self, state: BatcherState, event: GenericEvent) -> BatcherState {
        if !self.accepts(&state, &event) {
            return state;
        }

        let entry = AnalyticEntry {
            session_id: state.session_id.clone(),
            sequence_id: state.current_batch_sequence_number,
            action: event.to_plain_action(),
        };
        tracing::debug!(
            "Added analytic to batch: type={}, sequence_id={}",
            event.action_type,
            entry.sequence_id
        );

        let mut state = state;
        // Copies the buffer only if an older state still shares it
        Arc::make_mut(&mut state.current_batch).push(entry);

        let now = self.clock.now();
        let elapsed = now - state.time_last_sent;
        if self.policy.should_flush(elapsed, state.current_batch.len()) {
            self.flush(state, now)
        } else {
            state
        }
    }

    fn flush(&self, mut state: BatcherState, now: DateTime<Utc>) -> BatcherState {
        let payload = state.batch_payload();
        let entries = state.batch_len();
        state.current_batch = Arc::new(Vec::new());
        state.time_last_sent = now;

        match payload {
            Ok(payload) => self.dispatch(payload, entries),
            Err(e) => {
                tracing::warn!("Failed to serialize analytic batch, dropping {} entries: {}", entries, e);
            }
        }

        state
    }

    fn dispatch(&self, payload: String, entries: usize) {
        let Some(handle) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            tracing::warn!("No async runtime available, dropping analytic batch of {} entries", entries);
            return;
        };

        tracing::info!("Sending analytic batch: entries={}", entries);
        tracing::debug!("Analytic batch payload: {}", payload);

        let delivery = Arc::clone(&self.delivery);
        handle.spawn(async move {
            match delivery.deliver(payload).await {
                Ok(()) => {
                    tracing::info!("Stored analytic batch: SUCCESS (entries={})", entries);
                }
                Err(e) => {
                    tracing::warn!("Stored analytic batch: FAIL (entries={}): {}", entries, e);
                }
            }
        });
    }
}
