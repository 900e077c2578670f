//! Recorded value changes along one axis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded change of a ticket's value
///
/// `prior` is None for the change that created the ticket in its first state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior: Option<String>,
    pub new: String,
    pub at: DateTime<Utc>,
}

impl Event {
    /// Creates a change from `prior` to `new`
    pub fn new(prior: impl Into<String>, new: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            prior: Some(prior.into()),
            new: new.into(),
            at,
        }
    }

    /// Creates the change that put a ticket into its first state
    pub fn created(new: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            prior: None,
            new: new.into(),
            at,
        }
    }

    /// Returns the prior value, if any
    pub fn prior(&self) -> Option<&str> {
        self.prior.as_deref()
    }

    /// Iterates over both endpoints of the change
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.prior.as_deref().into_iter().chain(std::iter::once(self.new.as_str()))
    }
}

/// Sorts events chronologically for display
///
/// Matching never depends on this order.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(|e| e.at);
}
