use crate::VisibleRange;

/// Default number of extra rows rendered past each edge of the viewport.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Computes the window of rows to materialize for a fixed-row-height list.
///
/// - `start = max(0, floor(scroll_top / item_height) - overscan)`
/// - `end = min(count, floor(scroll_top / item_height) + ceil(container_height / item_height) + overscan)`
///
/// The result always satisfies `start_index <= end_index <= count`. Scroll offsets past the end
/// of the list (e.g. after the list shrank) resolve to the last full window instead of an empty
/// one. A non-positive or non-finite `item_height` yields an empty range.
pub fn compute_visible_range(
    count: usize,
    scroll_top: f64,
    item_height: f64,
    container_height: f64,
    overscan: usize,
) -> VisibleRange {
    if count == 0 {
        return VisibleRange::EMPTY;
    }
    if !is_valid_item_height(item_height) {
        vwarn!(item_height, "compute_visible_range: degenerate item height");
        return VisibleRange::EMPTY;
    }

    let visible = ceil_count(container_height / item_height);
    let raw_start = floor_index(scroll_top / item_height).min(count.saturating_sub(visible));

    let start_index = raw_start.saturating_sub(overscan);
    let end_index = raw_start
        .saturating_add(visible)
        .saturating_add(overscan)
        .min(count);

    VisibleRange {
        start_index,
        end_index,
    }
}

/// Same as [`compute_visible_range`] without overscan: the viewport-sized window starting at the
/// first row under `scroll_top`.
pub fn strict_visible_range(
    count: usize,
    scroll_top: f64,
    item_height: f64,
    container_height: f64,
) -> VisibleRange {
    compute_visible_range(count, scroll_top, item_height, container_height, 0)
}

pub(crate) fn is_valid_item_height(item_height: f64) -> bool {
    item_height.is_finite() && item_height > 0.0
}

// Float -> int casts saturate: NaN and negatives become 0, +inf becomes usize::MAX.
pub(crate) fn floor_index(x: f64) -> usize {
    x as usize
}

pub(crate) fn ceil_count(x: f64) -> usize {
    let t = x as usize;
    if x > t as f64 { t.saturating_add(1) } else { t }
}
