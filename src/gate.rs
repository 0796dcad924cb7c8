//! Conditional rendering: pass a payload through only while a condition holds.

use crate::metrics::{MetricsProvider, MetricsSnapshot};
use crate::query::{matches, Condition};

/// `Some(payload)` if `condition` matches `snapshot`, `None` otherwise.
pub fn gate<T>(condition: &Condition, snapshot: &MetricsSnapshot, payload: T) -> Option<T> {
    matches(condition, snapshot).then_some(payload)
}

/// A payload paired with the condition that controls its visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate<T> {
    condition: Condition,
    payload: T,
}

impl<T> Gate<T> {
    pub fn new(condition: Condition, payload: T) -> Self {
        Self { condition, payload }
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// The payload if the condition matches `snapshot`.
    pub fn render(&self, snapshot: &MetricsSnapshot) -> Option<&T> {
        gate(&self.condition, snapshot, &self.payload)
    }

    /// The payload if the condition matches what `provider` reports now.
    pub fn render_current(&self, provider: &impl MetricsProvider) -> Option<&T> {
        self.render(&provider.snapshot())
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}
