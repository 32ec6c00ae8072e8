use crate::*;

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_f64(&mut self, start: u64, end_exclusive: u64) -> f64 {
        // Quarter-pixel steps keep sums exact in f64.
        self.gen_range_u64(start * 4, end_exclusive * 4) as f64 / 4.0
    }
}

fn list(count: usize, item_height: f64, container_height: f64, overscan: usize) -> VirtualList {
    VirtualList::new(
        VirtualListOptions::new(count, item_height, container_height).with_overscan(overscan),
    )
}

fn ceil_rows(container_height: f64, item_height: f64) -> usize {
    let mut rows = 0usize;
    while (rows as f64) * item_height < container_height {
        rows += 1;
    }
    rows
}

#[test]
fn default_overscan_is_five() {
    let opts = VirtualListOptions::new(10, 20.0, 100.0);
    assert_eq!(opts.overscan, 5);
    assert_eq!(DEFAULT_OVERSCAN, 5);
}

#[test]
fn range_at_top_of_list() {
    let v = list(100, 50.0, 200.0, 5);
    let r = v.visible_range();
    // 4 visible rows + overscan(5) below, nothing above row 0.
    assert_eq!(r, VisibleRange { start_index: 0, end_index: 9 });
}

#[test]
fn range_after_scrolling() {
    let mut v = list(100, 50.0, 200.0, 5);
    v.on_scroll(1000.0);
    let r = v.visible_range();
    // raw_start = 20 => [20 - 5, 20 + 4 + 5)
    assert_eq!(r, VisibleRange { start_index: 15, end_index: 29 });
}

#[test]
fn empty_list_renders_nothing() {
    let v = list(0, 50.0, 200.0, 5);
    assert_eq!(v.visible_range(), VisibleRange::EMPTY);
    assert_eq!(v.total_height(), 0.0);

    let items: Vec<u32> = Vec::new();
    let window = v.render(&items, |it, _| *it);
    assert!(window.is_empty());
    assert_eq!(window.total_height, 0.0);
    assert_eq!(window.range, VisibleRange::EMPTY);
}

#[test]
fn single_item_is_always_rendered() {
    for overscan in [0usize, 1, 5, 100] {
        for scroll_top in [0.0, 25.0, 500.0] {
            let mut v = list(1, 50.0, 200.0, overscan);
            v.on_scroll(scroll_top);
            assert_eq!(
                v.visible_range(),
                VisibleRange { start_index: 0, end_index: 1 },
                "overscan={overscan} scroll_top={scroll_top}"
            );
        }
    }
}

#[test]
fn zero_overscan_keeps_viewport_rows() {
    let mut v = list(100, 50.0, 200.0, 0);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 0, end_index: 4 });

    v.on_scroll(1000.0);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 20, end_index: 24 });
    assert_eq!(v.strict_visible_range(), v.visible_range());
}

#[test]
fn strict_range_ignores_overscan() {
    let mut v = list(100, 50.0, 200.0, 5);
    v.on_scroll(1000.0);
    assert_eq!(v.strict_visible_range(), VisibleRange { start_index: 20, end_index: 24 });
    assert_eq!(
        strict_visible_range(100, 1000.0, 50.0, 200.0),
        VisibleRange { start_index: 20, end_index: 24 }
    );
}

#[test]
fn remainders_are_absorbed_by_floor_and_ceil() {
    // 100 / 30 = 3.33 => 4 rows; 45 / 30 = 1.5 => first row 1.
    let mut v = list(50, 30.0, 100.0, 0);
    v.on_scroll(45.0);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 1, end_index: 5 });
    assert_eq!(v.rows_per_viewport(), 4);
}

#[test]
fn huge_container_materializes_everything() {
    let v = list(40, 10.0, 1.0e9, 5);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 0, end_index: 40 });

    let v = list(40, 10.0, f64::INFINITY, 0);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 0, end_index: 40 });
}

#[test]
fn zero_height_container_renders_only_overscan() {
    let mut v = list(100, 10.0, 0.0, 0);
    v.on_scroll(100.0);
    assert!(v.visible_range().is_empty());

    v.set_overscan(2);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 8, end_index: 12 });
}

#[test]
fn negative_container_height_counts_as_zero_rows() {
    let v = list(100, 10.0, -50.0, 1);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 0, end_index: 1 });
    assert_eq!(v.rows_per_viewport(), 0);
}

#[test]
fn negative_or_nan_scroll_top_behaves_like_top() {
    let mut v = list(100, 50.0, 200.0, 5);
    v.on_scroll(-120.0);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 0, end_index: 9 });
    v.on_scroll(f64::NAN);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 0, end_index: 9 });
}

#[test]
fn scroll_past_end_resolves_to_last_window() {
    // e.g. the list shrank while the container was scrolled far down.
    let mut v = list(10, 50.0, 200.0, 5);
    v.on_scroll(10_000.0);
    let r = v.visible_range();
    assert_eq!(r, VisibleRange { start_index: 1, end_index: 10 });
    assert!(r.len() >= 4);
}

#[test]
fn degenerate_item_heights_collapse_to_empty() {
    for item_height in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let v = list(100, item_height, 200.0, 5);
        assert_eq!(v.visible_range(), VisibleRange::EMPTY, "item_height={item_height}");
        assert_eq!(v.total_height(), 0.0);
        assert_eq!(v.item_top(0), None);
        assert_eq!(v.index_at_offset(0.0), None);
        assert_eq!(v.rows_per_viewport(), 0);

        let items = [1u8, 2, 3];
        assert!(v.render(&items, |it, _| *it).is_empty());
    }
}

#[test]
fn range_invariants_hold_for_random_inputs() {
    let mut rng = Lcg::new(0x5eed_cafe);
    for _ in 0..2_000 {
        let count = rng.gen_range_usize(0, 500);
        let item_height = rng.gen_f64(1, 120);
        let container_height = rng.gen_f64(1, 2_000);
        let overscan = rng.gen_range_usize(0, 12);
        let scroll_top = rng.gen_f64(0, 80_000);

        let r = compute_visible_range(count, scroll_top, item_height, container_height, overscan);
        assert!(r.start_index <= r.end_index, "{r:?}");
        assert!(r.end_index <= count, "{r:?} count={count}");

        if count > 0 {
            let min_len = count.min(ceil_rows(container_height, item_height));
            assert!(
                r.len() >= min_len,
                "{r:?} count={count} h={item_height} c={container_height} top={scroll_top}"
            );
        } else {
            assert_eq!(r, VisibleRange::EMPTY);
        }

        // Pure: same inputs, same output.
        let again =
            compute_visible_range(count, scroll_top, item_height, container_height, overscan);
        assert_eq!(r, again);
    }
}

#[test]
fn start_index_is_monotone_in_scroll_top() {
    let mut rng = Lcg::new(42);
    for _ in 0..50 {
        let count = rng.gen_range_usize(1, 300);
        let item_height = rng.gen_f64(1, 80);
        let container_height = rng.gen_f64(1, 900);
        let overscan = rng.gen_range_usize(0, 8);

        let mut v = list(count, item_height, container_height, overscan);
        let mut scroll_top = 0.0;
        let mut prev = v.visible_range();
        for _ in 0..200 {
            scroll_top += rng.gen_f64(0, 60);
            v.on_scroll(scroll_top);
            let next = v.visible_range();
            assert!(next.start_index >= prev.start_index, "{prev:?} -> {next:?}");
            prev = next;
        }
    }
}

#[test]
fn virtual_items_are_positioned_at_true_offsets() {
    let mut v = list(100, 50.0, 200.0, 5);
    v.on_scroll(1000.0);

    let mut items = Vec::new();
    v.collect_virtual_items(&mut items);
    assert_eq!(items.len(), 14);
    assert_eq!(items.first().map(|it| it.index), Some(15));
    assert_eq!(items.last().map(|it| it.index), Some(28));
    for it in &items {
        assert_eq!(it.top, it.index as f64 * 50.0);
        assert_eq!(it.height, 50.0);
    }
    // Contiguous in index space.
    assert!(items.windows(2).all(|w| w[1].index == w[0].index + 1));
    assert_eq!(items[0].bottom(), items[1].top);

    // Reusing the buffer clears it first.
    v.on_scroll(0.0);
    v.collect_virtual_items(&mut items);
    assert_eq!(items.len(), 9);
}

#[test]
fn render_projects_items_with_absolute_indexes() {
    let items: Vec<u32> = (0..100).map(|i| i * 10).collect();
    let mut v = list(items.len(), 50.0, 200.0, 5);
    v.on_scroll(1000.0);

    let window = v.render(&items, |value, index| format!("{index}:{value}"));
    assert_eq!(window.total_height, 5000.0);
    assert_eq!(window.range, VisibleRange { start_index: 15, end_index: 29 });
    assert_eq!(window.rows.len(), 14);

    let first = &window.rows[0];
    assert_eq!(first.index, 15);
    assert_eq!(first.top, 750.0);
    assert_eq!(first.height, 50.0);
    assert_eq!(first.content, "15:150");
    assert_eq!(window.rows[13].content, "28:280");
}

#[test]
fn render_uses_the_slice_length() {
    // `count` is stale (100) but only 12 items are supplied.
    let items: Vec<u8> = (0..12).collect();
    let mut v = list(100, 50.0, 200.0, 5);
    v.on_scroll(1000.0);

    let window = v.render(&items, |it, _| *it);
    assert_eq!(window.total_height, 600.0);
    assert!(window.range.end_index <= items.len());
    assert_eq!(window.rows.last().map(|r| r.index), Some(11));
}

#[test]
fn render_item_sees_items_in_order() {
    let items = ["a", "b", "c", "d"];
    let v = list(items.len(), 10.0, 20.0, 0);
    let mut seen = Vec::new();
    let window = v.render(&items, |it, i| {
        seen.push((i, *it));
        i
    });
    assert_eq!(seen, [(0, "a"), (1, "b")]);
    assert_eq!(window.rows.len(), 2);
}

#[test]
fn total_height_matches_unvirtualized_extent() {
    let v = list(1234, 37.5, 400.0, 5);
    assert_eq!(v.total_height(), 1234.0 * 37.5);
    assert_eq!(v.max_scroll_top(), 1234.0 * 37.5 - 400.0);

    let short = list(3, 50.0, 400.0, 5);
    assert_eq!(short.max_scroll_top(), 0.0);
}

#[test]
fn item_lookup_helpers() {
    let v = list(10, 20.0, 50.0, 0);
    assert_eq!(v.item_top(3), Some(60.0));
    assert_eq!(v.item_top(10), None);
    assert_eq!(
        v.item(2),
        Some(VirtualItem {
            index: 2,
            top: 40.0,
            height: 20.0
        })
    );

    assert_eq!(v.index_at_offset(0.0), Some(0));
    assert_eq!(v.index_at_offset(39.9), Some(1));
    assert_eq!(v.index_at_offset(40.0), Some(2));
    assert_eq!(v.index_at_offset(10_000.0), Some(9));
    assert_eq!(v.index_at_offset(-5.0), Some(0));
}

#[test]
fn clamp_scroll_top_stays_in_bounds() {
    let v = list(10, 20.0, 50.0, 0);
    assert_eq!(v.max_scroll_top(), 150.0);
    assert_eq!(v.clamp_scroll_top(-3.0), 0.0);
    assert_eq!(v.clamp_scroll_top(f64::NAN), 0.0);
    assert_eq!(v.clamp_scroll_top(75.0), 75.0);
    assert_eq!(v.clamp_scroll_top(1_000.0), 150.0);
}

#[test]
fn scroll_to_index_offset_aligns() {
    let mut v = list(100, 20.0, 100.0, 0);
    assert_eq!(v.scroll_to_index_offset(10, Align::Start), 200.0);
    // bottom(10) = 220; 220 - 100 = 120
    assert_eq!(v.scroll_to_index_offset(10, Align::End), 120.0);
    // 200 + 10 - 50 = 160
    assert_eq!(v.scroll_to_index_offset(10, Align::Center), 160.0);
    // Clamped at both ends.
    assert_eq!(v.scroll_to_index_offset(0, Align::End), 0.0);
    assert_eq!(v.scroll_to_index_offset(99, Align::Start), 1900.0);
    assert_eq!(v.scroll_to_index_offset(5_000, Align::Start), 1900.0);

    v.on_scroll(100.0);
    // Viewport covers [100, 200); item 6 is [120, 140) and already visible.
    assert_eq!(v.scroll_to_index_offset(6, Align::Auto), 100.0);
    // Above the viewport => align start.
    assert_eq!(v.scroll_to_index_offset(2, Align::Auto), 40.0);
    // Below the viewport => align end.
    assert_eq!(v.scroll_to_index_offset(12, Align::Auto), 160.0);

    assert_eq!(v.scroll_to_index(12, Align::Start), 240.0);
    assert_eq!(v.scroll_top(), 240.0);

    let empty = list(0, 20.0, 100.0, 0);
    assert_eq!(empty.scroll_to_index_offset(3, Align::Center), 0.0);
}

#[test]
fn on_change_fires_for_each_scroll_event() {
    let calls = Arc::new(AtomicUsize::new(0));
    let opts = VirtualListOptions::new(100, 50.0, 200.0).with_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &VirtualList| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let mut v = VirtualList::new(opts);

    v.on_scroll(10.0);
    v.on_scroll(20.0);
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    // Unchanged offset is not an update.
    v.on_scroll(20.0);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn on_change_observes_recomputed_window() {
    let seen = Arc::new(AtomicUsize::new(usize::MAX));
    let opts = VirtualListOptions::new(100, 50.0, 200.0).with_on_change(Some({
        let seen = Arc::clone(&seen);
        move |v: &VirtualList| {
            seen.store(v.visible_range().start_index, Ordering::Relaxed);
        }
    }));
    let mut v = VirtualList::new(opts);
    v.on_scroll(1000.0);
    assert_eq!(seen.load(Ordering::Relaxed), 15);
}

#[test]
fn batch_update_coalesces_notifications() {
    let calls = Arc::new(AtomicUsize::new(0));
    let opts = VirtualListOptions::new(100, 50.0, 200.0).with_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &VirtualList| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let mut v = VirtualList::new(opts);

    v.apply_viewport(400.0, 500.0);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(v.container_height(), 400.0);
    assert_eq!(v.scroll_top(), 500.0);

    v.batch_update(|v| {
        v.set_count(50);
        v.set_overscan(2);
        v.set_item_height(25.0);
    });
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    // Nothing changed inside the batch => no notification.
    v.batch_update(|v| v.set_count(50));
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn options_can_be_swapped_and_updated() {
    let mut v = VirtualList::new(
        VirtualListOptions::new(100, 50.0, 200.0).with_initial_scroll_top(1000.0),
    );
    assert_eq!(v.scroll_top(), 1000.0);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 15, end_index: 29 });

    v.update_options(|o| o.overscan = 0);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 20, end_index: 24 });

    v.set_options(VirtualListOptions::new(10, 50.0, 200.0));
    assert_eq!(v.count(), 10);
    assert_eq!(v.overscan(), DEFAULT_OVERSCAN);
    // Scroll offset survives an options swap.
    assert_eq!(v.scroll_top(), 1000.0);
    assert_eq!(v.visible_range(), VisibleRange { start_index: 1, end_index: 10 });
}

#[test]
fn options_debug_skips_callbacks() {
    let opts = VirtualListOptions::new(3, 10.0, 20.0).with_on_change(Some(|_: &VirtualList| {}));
    let s = format!("{opts:?}");
    assert!(s.contains("count: 3"));
    assert!(s.contains(".."));
}

#[test]
fn visible_range_helpers() {
    let r = VisibleRange {
        start_index: 3,
        end_index: 6,
    };
    assert_eq!(r.len(), 3);
    assert!(!r.is_empty());
    assert!(r.contains(3));
    assert!(!r.contains(6));
    assert_eq!(r.iter().collect::<Vec<_>>(), [3, 4, 5]);
    assert!(VisibleRange::EMPTY.is_empty());
    assert_eq!(VisibleRange::EMPTY.len(), 0);
}

#[test]
fn scroll_sample_initial_state() {
    let s = ScrollSample::default();
    assert_eq!(s.scroll_y, 0.0);
    assert_eq!(s.direction, None);
    assert_eq!(s.velocity, 0.0);
    assert!(s.is_at_top);
    assert!(!s.is_at_bottom);
    assert!(!s.is_scrolled);
}

fn metrics(scroll_y: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_y,
        viewport_height: 800.0,
        document_height: 4000.0,
    }
}

#[test]
fn scroll_sample_tracks_direction_and_velocity() {
    let t = ScrollThresholds::default();
    let s0 = ScrollSample::default();

    let s1 = s0.next(metrics(100.0), 20, t);
    assert_eq!(s1.direction, Some(ScrollDirection::Down));
    assert_eq!(s1.velocity, 5.0);
    assert!(s1.is_scrolled);
    assert!(!s1.is_at_top);

    // No movement: direction is kept, velocity drops to zero.
    let s2 = s1.next(metrics(100.0), 16, t);
    assert_eq!(s2.direction, Some(ScrollDirection::Down));
    assert_eq!(s2.velocity, 0.0);

    let s3 = s2.next(metrics(60.0), 10, t);
    assert_eq!(s3.direction, Some(ScrollDirection::Up));
    assert_eq!(s3.velocity, 4.0);
    assert!(s3.is_scrolling_up());

    // Zero elapsed time never divides.
    let s4 = s3.next(metrics(0.0), 0, t);
    assert_eq!(s4.velocity, 0.0);
    assert!(s4.is_at_top);
    assert!(!s4.is_scrolled);
}

#[test]
fn scroll_sample_direction_stays_unset_without_movement() {
    let s = ScrollSample::default().next(metrics(0.0), 16, ScrollThresholds::default());
    assert_eq!(s.direction, None);
}

#[test]
fn scrolled_threshold_is_exclusive() {
    let t = ScrollThresholds::default();
    let s = ScrollSample::default().next(metrics(50.0), 16, t);
    assert!(!s.is_scrolled);
    let s = s.next(metrics(50.5), 16, t);
    assert!(s.is_scrolled);
}

#[test]
fn bottom_detection_allows_one_pixel_of_rounding() {
    let t = ScrollThresholds::default();
    let at = |scroll_y, document_height| ScrollMetrics {
        scroll_y,
        viewport_height: 200.0,
        document_height,
    };
    assert!(ScrollSample::default().next(at(800.0, 1001.0), 16, t).is_at_bottom);
    assert!(ScrollSample::default().next(at(799.5, 1000.0), 16, t).is_at_bottom);
    assert!(!ScrollSample::default().next(at(800.0, 1002.0), 16, t).is_at_bottom);
}

#[test]
fn scroll_sample_display_is_a_single_line() {
    let s = ScrollSample::default().next(metrics(120.0), 40, ScrollThresholds::default());
    let line = format!("{s}");
    assert_eq!(
        line,
        "y=120 dir=down v=3.00px/ms top=false bottom=false scrolled=true"
    );
    assert_eq!(
        format!("{}", ScrollSample::default()),
        "y=0 dir=- v=0.00px/ms top=true bottom=false scrolled=false"
    );
}

#[test]
fn nav_chrome_hides_on_scroll_down_and_returns_on_scroll_up() {
    let t = ScrollThresholds::default();
    let top = ScrollSample::default();
    assert_eq!(NavChrome::from_sample(&top), NavChrome::default());

    let down = top.next(metrics(300.0), 16, t);
    assert_eq!(
        NavChrome::from_sample(&down),
        NavChrome {
            hidden: true,
            compact: true
        }
    );

    let up = down.next(metrics(250.0), 16, t);
    assert_eq!(
        NavChrome::from_sample(&up),
        NavChrome {
            hidden: false,
            compact: true
        }
    );

    // Scrolling down within the threshold keeps the bar visible.
    let near_top = top.next(metrics(30.0), 16, t);
    assert!(!NavChrome::from_sample(&near_top).hidden);
}

#[test]
fn visibility_latch_never_resets() {
    let mut r = VisibilityRecord::default();
    assert!(!r.is_intersecting);
    assert!(!r.has_intersected);

    r.apply(true);
    assert!(r.is_intersecting);
    assert!(r.has_intersected);

    r.apply(false);
    assert!(!r.is_intersecting);
    assert!(r.has_intersected);

    r.apply(true);
    assert!(r.has_intersected);

    for seen in [false, false, true, false] {
        r.apply(seen);
        assert!(r.has_intersected);
    }
}

#[test]
fn visibility_latch_stays_clear_until_first_intersection() {
    let mut r = VisibilityRecord::default();
    r.apply(false);
    r.apply(false);
    assert!(!r.has_intersected);

    r.apply(true);
    assert_eq!(
        r,
        VisibilityRecord {
            is_intersecting: true,
            has_intersected: true
        }
    );
}
