use core::fmt;

use crate::ScrollDirection;

/// Scroll offset beyond which the page counts as "scrolled".
pub const DEFAULT_SCROLLED_THRESHOLD: f64 = 50.0;

/// Tolerance for the bottom-of-document check, absorbing sub-pixel rounding.
pub const DEFAULT_BOTTOM_TOLERANCE: f64 = 1.0;

/// Raw page geometry read from the host on an animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollThresholds {
    /// `is_scrolled` is set once `scroll_y` exceeds this.
    pub scrolled: f64,
    pub bottom_tolerance: f64,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            scrolled: DEFAULT_SCROLLED_THRESHOLD,
            bottom_tolerance: DEFAULT_BOTTOM_TOLERANCE,
        }
    }
}

/// A velocity-aware view of the page scroll position.
///
/// `Default` is the state before any scroll event: at the top, not scrolled, no direction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSample {
    pub scroll_y: f64,
    /// `None` until the first non-zero movement; unchanged by zero-delta samples.
    pub direction: Option<ScrollDirection>,
    /// Pixels per millisecond.
    pub velocity: f64,
    pub is_at_top: bool,
    pub is_at_bottom: bool,
    pub is_scrolled: bool,
}

impl Default for ScrollSample {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            direction: None,
            velocity: 0.0,
            is_at_top: true,
            is_at_bottom: false,
            is_scrolled: false,
        }
    }
}

impl ScrollSample {
    /// Derives the next sample from this one and fresh metrics taken `elapsed_ms` later.
    pub fn next(
        &self,
        metrics: ScrollMetrics,
        elapsed_ms: u64,
        thresholds: ScrollThresholds,
    ) -> Self {
        let scroll_y = metrics.scroll_y;
        let delta = scroll_y - self.scroll_y;

        let direction = if delta > 0.0 {
            Some(ScrollDirection::Down)
        } else if delta < 0.0 {
            Some(ScrollDirection::Up)
        } else {
            self.direction
        };

        let distance = if delta < 0.0 { -delta } else { delta };
        let velocity = if elapsed_ms == 0 {
            0.0
        } else {
            distance / elapsed_ms as f64
        };

        Self {
            scroll_y,
            direction,
            velocity,
            is_at_top: scroll_y <= 0.0,
            is_at_bottom: scroll_y + metrics.viewport_height
                >= metrics.document_height - thresholds.bottom_tolerance,
            is_scrolled: scroll_y > thresholds.scrolled,
        }
    }

    pub fn is_scrolling_down(&self) -> bool {
        self.direction == Some(ScrollDirection::Down)
    }

    pub fn is_scrolling_up(&self) -> bool {
        self.direction == Some(ScrollDirection::Up)
    }
}

/// One-line readout for a debug overlay.
impl fmt::Display for ScrollSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = self.direction.map_or("-", ScrollDirection::as_str);
        write!(
            f,
            "y={:.0} dir={} v={:.2}px/ms top={} bottom={} scrolled={}",
            self.scroll_y,
            direction,
            self.velocity,
            self.is_at_top,
            self.is_at_bottom,
            self.is_scrolled
        )
    }
}

/// Navigation chrome state derived from a scroll sample.
///
/// The bar hides while the reader scrolls down past the threshold and comes back on any upward
/// scroll or near the top. It turns compact once the page is scrolled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavChrome {
    pub hidden: bool,
    pub compact: bool,
}

impl NavChrome {
    pub fn from_sample(sample: &ScrollSample) -> Self {
        Self {
            hidden: sample.is_scrolled && !sample.is_at_top && sample.is_scrolling_down(),
            compact: sample.is_scrolled,
        }
    }
}
