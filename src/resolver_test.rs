use super::*;
use crate::portrait::Side;

const SETTLE_MS: u32 = 150;

fn resolver() -> TimelineResolver {
    TimelineResolver::new(
        vec![
            Some(Portrait { url: "/1984.jpg".into(), side: Side::Left }),
            Some(Portrait { url: "/1991.jpg".into(), side: Side::Right }),
            None,
            Some(Portrait { url: "/2010.jpg".into(), side: Side::Left }),
            None,
        ],
        SETTLE_MS,
    )
}

/// Five entries, 400px apart, with the dot of `index` on the viewport center.
fn layout_centered_on(index: usize) -> Vec<ItemBounds> {
    let center = 300.0;
    (0..5)
        .map(|i| {
            let offset = (i as f64 - index as f64) * 400.0;
            let top = center - 12.0 + offset;
            ItemBounds::new(top, top + 400.0)
        })
        .collect()
}

fn viewport() -> Viewport {
    Viewport { height: 600.0, scroll_y: 1_000.0 }
}

// =============================================================
// Frame coalescing
// =============================================================

#[test]
fn scroll_burst_requests_one_frame() {
    let mut r = resolver();
    assert!(r.on_scroll(0.0).request_frame);
    assert!(!r.on_scroll(5.0).request_frame);
    assert!(!r.on_resize());
    r.run_frame(&layout_centered_on(1), viewport());
    assert!(r.on_scroll(20.0).request_frame);
}

#[test]
fn resize_after_frame_requests_again() {
    let mut r = resolver();
    assert!(r.on_resize());
    r.run_frame(&layout_centered_on(1), viewport());
    assert!(r.on_resize());
}

// =============================================================
// Frames
// =============================================================

#[test]
fn initial_frame_shows_active_portrait() {
    let mut r = resolver();
    let outcome = r.run_frame(&layout_centered_on(1), viewport());
    assert_eq!(outcome.frame.active, Some(1));
    assert_eq!(outcome.slots, SlotUpdate::Show { side: Side::Right, url: "/1991.jpg".into() });
    assert_eq!(r.active(), Some(1));
}

#[test]
fn rail_excludes_spacer_entry() {
    let mut r = resolver();
    let outcome = r.run_frame(&layout_centered_on(2), viewport());
    assert_eq!(r.rail_len(), 4);
    assert_eq!(
        outcome.rail,
        vec![Proximity::Adjacent2, Proximity::Adjacent, Proximity::Active, Proximity::Adjacent]
    );
}

#[test]
fn frames_during_scroll_leave_slots_hidden() {
    let mut r = resolver();
    r.run_frame(&layout_centered_on(0), viewport());
    assert_eq!(r.on_scroll(0.0).slots, SlotUpdate::HideAll);
    let outcome = r.run_frame(&layout_centered_on(3), viewport());
    assert_eq!(outcome.frame.active, Some(3));
    assert_eq!(outcome.slots, SlotUpdate::Unchanged);
}

// =============================================================
// Settle
// =============================================================

#[test]
fn burst_settles_once_for_last_event() {
    let mut r = resolver();
    let tickets: Vec<Ticket> = [0.0, 40.0, 100.0].into_iter().map(|t| r.on_scroll(t).ticket).collect();
    r.run_frame(&layout_centered_on(3), viewport());

    assert_eq!(tickets[2].due_ms, 250.0);
    let settled: Vec<SlotUpdate> = tickets.into_iter().filter_map(|t| r.settle(t)).collect();
    assert_eq!(settled, vec![SlotUpdate::Show { side: Side::Left, url: "/2010.jpg".into() }]);
}

#[test]
fn settle_on_entry_without_portrait_hides() {
    let mut r = resolver();
    let ticket = r.on_scroll(0.0).ticket;
    r.run_frame(&layout_centered_on(2), viewport());
    assert_eq!(r.settle(ticket), Some(SlotUpdate::HideAll));
}

#[test]
fn settle_after_returning_to_same_entry_reshows() {
    let mut r = resolver();
    r.run_frame(&layout_centered_on(1), viewport());
    let ticket = r.on_scroll(0.0).ticket;
    r.run_frame(&layout_centered_on(1), viewport());
    assert_eq!(r.settle(ticket), Some(SlotUpdate::Show { side: Side::Right, url: "/1991.jpg".into() }));
}

#[test]
fn frames_after_settle_swap_normally() {
    let mut r = resolver();
    let ticket = r.on_scroll(0.0).ticket;
    r.run_frame(&layout_centered_on(1), viewport());
    r.settle(ticket);
    let outcome = r.run_frame(&layout_centered_on(1), viewport());
    assert_eq!(outcome.slots, SlotUpdate::Unchanged);
}

#[test]
fn exposes_counts_and_delay() {
    let r = resolver();
    assert_eq!(r.item_count(), 5);
    assert_eq!(r.settle_delay_ms(), SETTLE_MS);
    assert_eq!(r.active(), None);
    assert_eq!(r.last_frame(), TimelineFrame::default());
}
