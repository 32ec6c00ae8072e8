use virtual_list::ScrollMetrics;
use virtual_list_adapter::{
    IntersectionBackend, ObserverConfig, ScrollTracker, VisibilityObserver, debounce, throttle,
};

// A host without a real DOM: elements are ids and "visible" means inside the viewport band.
struct FakeViewport;

impl IntersectionBackend<u32> for FakeViewport {
    fn observe(&mut self, element: &u32, config: &ObserverConfig<u32>) -> bool {
        println!("observe #{element} threshold={}", config.threshold);
        true
    }

    fn unobserve(&mut self, element: &u32) {
        println!("unobserve #{element}");
    }

    fn disconnect(&mut self) {
        println!("disconnect");
    }
}

fn main() {
    // Example: one simulated page session with a 16ms frame loop.
    //
    // An adapter would:
    // - forward raw scroll events to the tracker and request a frame when asked to
    // - call on_frame/tick from its frame loop or timers with its own clock
    // - deliver intersection results from the platform to the observer
    let mut tracker = ScrollTracker::new(0);
    tracker.subscribe(|s| println!("overlay: {s}"));

    let mut search = debounce(|q: String| println!("search: {q:?}"), 300);
    let mut resize = throttle(|w: u32| w / 2, 100);

    let video = 7u32;
    let mut lazy_video = VisibilityObserver::new(
        Some(FakeViewport),
        ObserverConfig::default()
            .with_threshold(0.25)
            .with_root_margin("0px 0px 200px 0px"),
    );
    lazy_video.attach(video);

    let mut scroll_y = 0.0;
    for frame in 0..40u64 {
        let now_ms = frame * 16;

        // Three scroll events per frame collapse into one sample.
        let mut need_frame = false;
        for _ in 0..3 {
            scroll_y += if frame < 30 { 40.0 } else { -60.0 };
            need_frame |= tracker.notify_scroll_event();
        }
        if need_frame {
            let metrics = ScrollMetrics {
                scroll_y,
                viewport_height: 900.0,
                document_height: 8_000.0,
            };
            tracker.on_frame(metrics, now_ms);
        }

        let visible = (1_500.0..3_000.0).contains(&scroll_y);
        lazy_video.on_intersection(&video, visible);

        if frame < 5 {
            search.call("rock".chars().take(frame as usize + 1).collect(), now_ms);
        }
        search.tick(now_ms);

        if let Some(half) = resize.call(1_280 + frame as u32, now_ms) {
            println!("t={now_ms} resize handled: half={half}");
        }
    }

    println!(
        "chrome={:?} video intersecting={} activated={}",
        tracker.nav_chrome(),
        lazy_video.is_intersecting(),
        lazy_video.has_intersected()
    );
}
