use alloc::sync::Arc;

use crate::engine::VirtualList;
use crate::range::DEFAULT_OVERSCAN;

/// A callback fired after the list's scroll offset or geometry changes.
///
/// Hosts typically use it to schedule a re-render of the materialized window.
pub type OnChangeCallback = Arc<dyn Fn(&VirtualList) + Send + Sync>;

/// Configuration for [`crate::VirtualList`].
///
/// Heights are in pixels. No field is validated: degenerate values (zero or negative heights)
/// collapse the visible window instead of failing.
#[derive(Clone)]
pub struct VirtualListOptions {
    /// Number of items in the host-owned sequence.
    pub count: usize,
    /// Uniform row height.
    pub item_height: f64,
    /// Height of the visible viewport of the scroll container.
    pub container_height: f64,
    /// Extra rows rendered past each edge of the strictly visible window.
    pub overscan: usize,
    /// Scroll offset the list starts at (e.g. restored from a previous visit).
    pub initial_scroll_top: f64,
    pub on_change: Option<OnChangeCallback>,
}

impl VirtualListOptions {
    pub fn new(count: usize, item_height: f64, container_height: f64) -> Self {
        Self {
            count,
            item_height,
            container_height,
            overscan: DEFAULT_OVERSCAN,
            initial_scroll_top: 0.0,
            on_change: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_item_height(mut self, item_height: f64) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_container_height(mut self, container_height: f64) -> Self {
        self.container_height = container_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_scroll_top(mut self, scroll_top: f64) -> Self {
        self.initial_scroll_top = scroll_top;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&VirtualList) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for VirtualListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("count", &self.count)
            .field("item_height", &self.item_height)
            .field("container_height", &self.container_height)
            .field("overscan", &self.overscan)
            .field("initial_scroll_top", &self.initial_scroll_top)
            .finish_non_exhaustive()
    }
}
