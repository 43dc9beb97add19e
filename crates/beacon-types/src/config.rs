use crate::action_types::{DEFAULT_EXCLUDED_ACTIONS, DEFAULT_INCLUDED_ACTIONS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Which action types get recorded.
///
/// A non-empty `included` set restricts recording to the listed types.
/// The `excluded` set always wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFilter {
    pub included: HashSet<String>,
    pub excluded: HashSet<String>,
}

impl Default for ActionFilter {
    fn default() -> Self {
        Self {
            included: DEFAULT_INCLUDED_ACTIONS.iter().map(|s| s.to_string()).collect(),
            excluded: DEFAULT_EXCLUDED_ACTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ActionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter with neither allowlist nor denylist: every action passes.
    pub fn allow_all() -> Self {
        Self {
            included: HashSet::new(),
            excluded: HashSet::new(),
        }
    }

    pub fn with_included<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excluded<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_recorded(&self, action_type: &str) -> bool {
        if !self.included.is_empty() && !self.included.contains(action_type) {
            return false;
        }
        !self.excluded.contains(action_type)
    }
}

/// Thresholds deciding when the current batch is flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPolicy {
    pub flush_interval: Duration,
    pub max_batch_size: usize,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            flush_interval: Duration::from_millis(5000),
            max_batch_size: 10,
        }
    }
}

impl BatchPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    pub fn with_max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = size;
        self
    }

    /// Either threshold reached means flush.
    pub fn should_flush(&self, elapsed: chrono::Duration, batch_len: usize) -> bool {
        let elapsed_reached = elapsed
            .to_std()
            .map(|elapsed| elapsed >= self.flush_interval)
            .unwrap_or(false);
        elapsed_reached || batch_len >= self.max_batch_size
    }
}
