use alloc::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Vertical scroll direction, as reported by the scroll tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// A contiguous window of item indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// A materialized row: where an item sits inside the full-height spacer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    /// Offset from the top of the spacer, in pixels.
    pub top: f64,
    pub height: f64,
}

impl VirtualItem {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A row produced by [`crate::VirtualList::render`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedRow<R> {
    pub index: usize,
    pub top: f64,
    pub height: f64,
    pub content: R,
}

/// The materialized subset of a list plus the spacer height the scroll container needs.
///
/// A host paints `rows` absolutely positioned at `top` inside a spacer of `total_height`, so the
/// native scrollbar has the same extent as an unvirtualized render.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedWindow<R> {
    pub total_height: f64,
    pub range: VisibleRange,
    pub rows: Vec<RenderedRow<R>>,
}

impl<R> RenderedWindow<R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
