//! A headless virtualization engine for fixed-row-height lists.
//!
//! This crate holds the arithmetic behind windowed rendering: which contiguous slice of a long
//! list must be materialized for a given scroll offset, where each materialized row sits, and how
//! tall the full-height spacer must be so the native scrollbar behaves as if every row existed.
//! It also carries the pure state the page-level bindings share: scroll samples (direction,
//! velocity, at-top/at-bottom) and the visibility latch used for lazy activation.
//!
//! It is UI-agnostic. A rendering host is expected to provide:
//! - the container height and the scroll offset on every scroll event
//! - a `render_item(item, index)` projection for the rows it paints
//!
//! For time-driven helpers (debounce, throttle, frame-gated scroll tracking, visibility
//! observers), see the `virtual-list-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod options;
mod range;
mod scroll;
mod types;
mod visibility;

#[cfg(test)]
mod tests;

pub use engine::VirtualList;
pub use options::{OnChangeCallback, VirtualListOptions};
pub use range::{DEFAULT_OVERSCAN, compute_visible_range, strict_visible_range};
pub use scroll::{
    DEFAULT_BOTTOM_TOLERANCE, DEFAULT_SCROLLED_THRESHOLD, NavChrome, ScrollMetrics,
    ScrollSample, ScrollThresholds,
};
pub use types::{
    Align, RenderedRow, RenderedWindow, ScrollDirection, VirtualItem, VisibleRange,
};
pub use visibility::VisibilityRecord;
