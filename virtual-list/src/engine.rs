use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::range::{ceil_count, compute_visible_range, floor_index, is_valid_item_height};
use crate::{
    Align, RenderedRow, RenderedWindow, VirtualItem, VirtualListOptions, VisibleRange,
    strict_visible_range,
};

/// A headless, fixed-row-height list virtualizer.
///
/// The only mutable state is the scroll offset; every query recomputes the window from
/// `(count, item_height, container_height, overscan, scroll_top)`. Nothing is cached between
/// scroll events, so the window can never drift from the real scroll position.
///
/// Your host drives it by forwarding scroll events (`on_scroll`) and geometry changes, then
/// paints the rows yielded by `for_each_virtual_item` or `render`.
#[derive(Clone, Debug)]
pub struct VirtualList {
    options: VirtualListOptions,
    scroll_top: f64,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl VirtualList {
    pub fn new(options: VirtualListOptions) -> Self {
        vdebug!(
            count = options.count,
            item_height = options.item_height,
            container_height = options.container_height,
            overscan = options.overscan,
            "VirtualList::new"
        );
        if !is_valid_item_height(options.item_height) {
            vwarn!(
                item_height = options.item_height,
                "VirtualList::new: item height must be positive and finite; nothing will render"
            );
        }
        Self {
            scroll_top: options.initial_scroll_top,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &VirtualListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: VirtualListOptions) {
        self.options = options;
        vtrace!(
            count = self.options.count,
            item_height = self.options.item_height,
            container_height = self.options.container_height,
            overscan = self.options.overscan,
            "VirtualList::set_options"
        );
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut VirtualListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&VirtualList) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// Use this when a resize and a scroll arrive together, so the host re-renders once.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn item_height(&self) -> f64 {
        self.options.item_height
    }

    pub fn container_height(&self) -> f64 {
        self.options.container_height
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.notify();
    }

    pub fn set_item_height(&mut self, item_height: f64) {
        if self.options.item_height == item_height {
            return;
        }
        if !is_valid_item_height(item_height) {
            vwarn!(item_height, "set_item_height: degenerate item height");
        }
        self.options.item_height = item_height;
        self.notify();
    }

    pub fn set_container_height(&mut self, container_height: f64) {
        if self.options.container_height == container_height {
            return;
        }
        self.options.container_height = container_height;
        self.notify();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        if self.scroll_top == scroll_top {
            return;
        }
        self.scroll_top = scroll_top;
        self.notify();
    }

    /// Applies a scroll event from the host's scroll container.
    pub fn on_scroll(&mut self, scroll_top: f64) {
        vtrace!(scroll_top, "on_scroll");
        self.set_scroll_top(scroll_top);
    }

    /// Applies a container resize and a scroll offset in a single coalesced update.
    pub fn apply_viewport(&mut self, container_height: f64, scroll_top: f64) {
        vtrace!(container_height, scroll_top, "apply_viewport");
        self.batch_update(|v| {
            v.set_container_height(container_height);
            v.set_scroll_top(scroll_top);
        });
    }

    /// Overscanned window for the current scroll offset.
    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range_for(self.scroll_top)
    }

    pub fn visible_range_for(&self, scroll_top: f64) -> VisibleRange {
        compute_visible_range(
            self.options.count,
            scroll_top,
            self.options.item_height,
            self.options.container_height,
            self.options.overscan,
        )
    }

    /// Viewport-sized window at the current offset, without overscan.
    pub fn strict_visible_range(&self) -> VisibleRange {
        strict_visible_range(
            self.options.count,
            self.scroll_top,
            self.options.item_height,
            self.options.container_height,
        )
    }

    /// Height of the full spacer: what an unvirtualized render would occupy.
    pub fn total_height(&self) -> f64 {
        self.height_of(self.options.count)
    }

    fn height_of(&self, count: usize) -> f64 {
        if !is_valid_item_height(self.options.item_height) {
            return 0.0;
        }
        count as f64 * self.options.item_height
    }

    pub fn item_top(&self, index: usize) -> Option<f64> {
        if !is_valid_item_height(self.options.item_height) {
            return None;
        }
        (index < self.options.count).then(|| index as f64 * self.options.item_height)
    }

    pub fn item(&self, index: usize) -> Option<VirtualItem> {
        let top = self.item_top(index)?;
        Some(VirtualItem {
            index,
            top,
            height: self.options.item_height,
        })
    }

    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        let count = self.options.count;
        if count == 0 || !is_valid_item_height(self.options.item_height) {
            return None;
        }
        Some(floor_index(offset / self.options.item_height).min(count - 1))
    }

    /// Number of rows the viewport can show at once (partial rows included).
    pub fn rows_per_viewport(&self) -> usize {
        if !is_valid_item_height(self.options.item_height) {
            return 0;
        }
        ceil_count(self.options.container_height / self.options.item_height)
    }

    pub fn max_scroll_top(&self) -> f64 {
        (self.total_height() - self.options.container_height).max(0.0)
    }

    pub fn clamp_scroll_top(&self, scroll_top: f64) -> f64 {
        if scroll_top.is_nan() || scroll_top <= 0.0 {
            return 0.0;
        }
        scroll_top.min(self.max_scroll_top())
    }

    pub fn for_each_virtual_item(&self, f: impl FnMut(VirtualItem)) {
        self.for_each_virtual_item_for(self.scroll_top, f);
    }

    pub fn for_each_virtual_item_for(&self, scroll_top: f64, mut f: impl FnMut(VirtualItem)) {
        let range = self.visible_range_for(scroll_top);
        let height = self.options.item_height;
        for index in range.iter() {
            f(VirtualItem {
                index,
                top: index as f64 * height,
                height,
            });
        }
    }

    /// Collects virtual items into `out` (clears `out` first).
    ///
    /// This is a convenience wrapper around [`Self::for_each_virtual_item`]; reuse `out` across
    /// frames to avoid reallocating.
    pub fn collect_virtual_items(&self, out: &mut Vec<VirtualItem>) {
        out.clear();
        self.for_each_virtual_item(|it| out.push(it));
    }

    /// Projects the current window of `items` through `render_item`.
    ///
    /// `items.len()` is used as the item count, so the rendered window always matches the
    /// sequence being painted even if `count` has not been synced yet. `render_item` receives
    /// each item with its absolute index.
    pub fn render<'a, T, R>(
        &self,
        items: &'a [T],
        mut render_item: impl FnMut(&'a T, usize) -> R,
    ) -> RenderedWindow<R> {
        let range = compute_visible_range(
            items.len(),
            self.scroll_top,
            self.options.item_height,
            self.options.container_height,
            self.options.overscan,
        );
        let height = self.options.item_height;
        let rows = items[range.start_index..range.end_index]
            .iter()
            .zip(range.iter())
            .map(|(item, index)| RenderedRow {
                index,
                top: index as f64 * height,
                height,
                content: render_item(item, index),
            })
            .collect();

        RenderedWindow {
            total_height: self.height_of(items.len()),
            range,
            rows,
        }
    }

    /// Scrolls so that `index` is placed according to `align` (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_top(offset);
        offset
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> f64 {
        let count = self.options.count;
        if count == 0 {
            return 0.0;
        }
        let Some(item) = self.item(index.min(count - 1)) else {
            return 0.0;
        };
        let view = self.options.container_height;

        let target = match align {
            Align::Start => item.top,
            Align::End => item.bottom() - view,
            Align::Center => item.top + item.height / 2.0 - view / 2.0,
            Align::Auto => {
                let cur = self.scroll_top;
                if item.top >= cur && item.bottom() <= cur + view {
                    cur
                } else if item.top < cur {
                    item.top
                } else {
                    item.bottom() - view
                }
            }
        };

        self.clamp_scroll_top(target)
    }
}
