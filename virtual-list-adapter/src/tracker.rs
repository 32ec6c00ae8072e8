use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use virtual_list::{NavChrome, ScrollMetrics, ScrollSample, ScrollThresholds};

/// A listener notified with every new scroll sample.
pub type ScrollListener = Arc<dyn Fn(&ScrollSample) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Frame-gated page scroll tracking with any number of independent subscribers.
///
/// Adapters drive it in two steps:
/// - `notify_scroll_event()` on every raw scroll event; when it returns `true`, request one
///   animation frame (or the next tick of a fixed-rate scheduler)
/// - `on_frame(metrics, now_ms)` from that frame callback
///
/// Bursts of scroll events between two frames collapse into a single sample. If the host has no
/// scroll capability it simply never calls `on_frame`, and the tracker keeps reporting the
/// initial "at top, not scrolled" sample.
pub struct ScrollTracker {
    thresholds: ScrollThresholds,
    sample: ScrollSample,
    last_time_ms: u64,
    ticking: bool,
    listeners: Vec<(SubscriptionId, ScrollListener)>,
    next_id: u64,
}

impl ScrollTracker {
    /// Creates a tracker mounted at `now_ms`, with the default thresholds.
    pub fn new(now_ms: u64) -> Self {
        Self::with_thresholds(ScrollThresholds::default(), now_ms)
    }

    pub fn with_thresholds(thresholds: ScrollThresholds, now_ms: u64) -> Self {
        vdebug!(
            scrolled = thresholds.scrolled,
            bottom_tolerance = thresholds.bottom_tolerance,
            now_ms,
            "ScrollTracker::new"
        );
        Self {
            thresholds,
            sample: ScrollSample::default(),
            last_time_ms: now_ms,
            ticking: false,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn thresholds(&self) -> ScrollThresholds {
        self.thresholds
    }

    pub fn sample(&self) -> ScrollSample {
        self.sample
    }

    pub fn nav_chrome(&self) -> NavChrome {
        NavChrome::from_sample(&self.sample)
    }

    /// Whether a frame has been requested and not yet delivered.
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Records a raw scroll event.
    ///
    /// Returns `true` exactly when the caller must request a frame; `false` means one is already
    /// pending and this event will be covered by it.
    pub fn notify_scroll_event(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// Computes a new sample from the current page geometry.
    ///
    /// Only runs when a frame was requested via `notify_scroll_event`; stray frame callbacks
    /// return `None`.
    pub fn on_frame(&mut self, metrics: ScrollMetrics, now_ms: u64) -> Option<ScrollSample> {
        if !self.ticking {
            return None;
        }
        self.ticking = false;

        let elapsed_ms = now_ms.saturating_sub(self.last_time_ms);
        let next = self.sample.next(metrics, elapsed_ms, self.thresholds);
        vtrace!(
            scroll_y = next.scroll_y,
            velocity = next.velocity,
            elapsed_ms,
            "ScrollTracker::on_frame"
        );

        self.sample = next;
        self.last_time_ms = now_ms;
        for (_, listener) in &self.listeners {
            listener(&next);
        }
        Some(next)
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&ScrollSample) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for ScrollTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollTracker")
            .field("thresholds", &self.thresholds)
            .field("sample", &self.sample)
            .field("last_time_ms", &self.last_time_ms)
            .field("ticking", &self.ticking)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
