//! Re-resolution on metric change.
//!
//! The host owns a [`MetricsSource`] and publishes a new snapshot whenever the
//! viewport changes (rotation, window resize, display move). Each
//! [`StyleWatcher`] holds a receiver and recomputes its composite when a new
//! snapshot arrives. Nothing else triggers recomputation.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::metrics::{MetricsProvider, MetricsSnapshot};
use crate::style::{CompositeStyle, Stylesheet};

/// Publishing side of the live metrics, owned by the host integration.
#[derive(Debug)]
pub struct MetricsSource {
    tx: watch::Sender<MetricsSnapshot>,
}

impl MetricsSource {
    pub fn new(initial: MetricsSnapshot) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the current snapshot. Watchers are only woken if it differs.
    pub fn publish(&self, snapshot: MetricsSnapshot) {
        self.tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// A receiver for a new watcher.
    pub fn subscribe(&self) -> watch::Receiver<MetricsSnapshot> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn watcher_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl MetricsProvider for MetricsSource {
    fn snapshot(&self) -> MetricsSnapshot {
        *self.tx.borrow()
    }
}

/// Keeps a composite style in step with a [`MetricsSource`].
#[derive(Debug)]
pub struct StyleWatcher {
    stylesheet: Stylesheet,
    rx: watch::Receiver<MetricsSnapshot>,
    resolved_for: MetricsSnapshot,
    current: CompositeStyle,
}

impl StyleWatcher {
    /// Resolve `stylesheet` against the receiver's current snapshot.
    pub fn new(stylesheet: Stylesheet, mut rx: watch::Receiver<MetricsSnapshot>) -> Self {
        let snapshot = *rx.borrow_and_update();
        let current = stylesheet.resolve(&snapshot);
        Self {
            stylesheet,
            rx,
            resolved_for: snapshot,
            current,
        }
    }

    /// The most recently resolved composite.
    pub fn current(&self) -> &CompositeStyle {
        &self.current
    }

    /// The snapshot the current composite was resolved against.
    ///
    /// A snapshot published since then is not reflected here until
    /// [`changed`](Self::changed) picks it up.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.resolved_for
    }

    /// Wait for the next snapshot and re-resolve.
    ///
    /// Returns `None` once the source has been dropped; the last composite
    /// stays available through [`current`](Self::current).
    pub async fn changed(&mut self) -> Option<&CompositeStyle> {
        if self.rx.changed().await.is_err() {
            warn!("metrics source closed, style watcher stopped");
            return None;
        }
        let snapshot = *self.rx.borrow_and_update();
        self.current = self.stylesheet.resolve(&snapshot);
        self.resolved_for = snapshot;
        debug!(
            width = snapshot.width,
            height = snapshot.height,
            orientation = %snapshot.orientation(),
            "re-resolved styles after metrics change"
        );
        Some(&self.current)
    }
}
