// Example: windowed rendering of a long list, as a host would drive it from scroll events.
use virtual_list::{Align, VirtualList, VirtualListOptions};

struct Gig {
    city: String,
    day: u32,
}

fn main() {
    let gigs: Vec<Gig> = (0..10_000)
        .map(|i| Gig {
            city: format!("city-{i}"),
            day: i % 365,
        })
        .collect();

    let mut list = VirtualList::new(
        VirtualListOptions::new(gigs.len(), 48.0, 600.0).with_on_change(Some(
            |l: &VirtualList| {
                println!(
                    "on_change: scroll_top={} range={:?}",
                    l.scroll_top(),
                    l.visible_range()
                );
            },
        )),
    );
    println!("total_height={}", list.total_height());

    // Raw scroll events from the container.
    for scroll_top in [0.0, 130.5, 4_800.0, 479_500.0] {
        list.on_scroll(scroll_top);
    }

    let window = list.render(&gigs, |gig, index| {
        format!("#{index} {} (day {})", gig.city, gig.day)
    });
    println!("rendered {} of {} rows", window.rows.len(), gigs.len());
    for row in window.rows.iter().take(3) {
        println!("  top={:>8} {}", row.top, row.content);
    }

    // Resize and scroll in one update.
    list.apply_viewport(300.0, 0.0);
    let offset = list.scroll_to_index(5_000, Align::Center);
    println!(
        "after scroll_to_index: offset={offset} first_visible={:?}",
        list.strict_visible_range().iter().next()
    );
}
