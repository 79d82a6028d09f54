use super::*;

fn portrait(url: &str, side: Side) -> Portrait {
    Portrait { url: url.into(), side }
}

// =============================================================
// Side
// =============================================================

#[test]
fn text_right_selects_right_slot() {
    assert_eq!(Side::from_text_classes("md:text-right text-right pr-4"), Side::Right);
}

#[test]
fn anything_else_selects_left_slot() {
    assert_eq!(Side::from_text_classes("text-left"), Side::Left);
    assert_eq!(Side::from_text_classes(""), Side::Left);
    assert_eq!(Side::from_text_classes("md:text-right"), Side::Left);
}

#[test]
fn slot_classes() {
    assert_eq!(Side::Left.slot_class(), "timeline-fixed-image--left");
    assert_eq!(Side::Right.slot_class(), "timeline-fixed-image--right");
}

// =============================================================
// PortraitSlots
// =============================================================

#[test]
fn first_frame_with_nothing_active_is_unchanged() {
    let mut slots = PortraitSlots::new();
    assert_eq!(slots.on_frame(None, None), SlotUpdate::Unchanged);
}

#[test]
fn activation_shows_portrait_on_its_side() {
    let mut slots = PortraitSlots::new();
    let p = portrait("/ada.jpg", Side::Right);
    assert_eq!(
        slots.on_frame(Some(1), Some(&p)),
        SlotUpdate::Show { side: Side::Right, url: "/ada.jpg".into() }
    );
}

#[test]
fn same_entry_does_not_swap_again() {
    let mut slots = PortraitSlots::new();
    let p = portrait("/ada.jpg", Side::Left);
    slots.on_frame(Some(1), Some(&p));
    assert_eq!(slots.on_frame(Some(1), Some(&p)), SlotUpdate::Unchanged);
}

#[test]
fn entry_without_portrait_hides_slots() {
    let mut slots = PortraitSlots::new();
    let p = portrait("/ada.jpg", Side::Left);
    slots.on_frame(Some(1), Some(&p));
    assert_eq!(slots.on_frame(Some(2), None), SlotUpdate::HideAll);
}

#[test]
fn deactivation_hides_slots() {
    let mut slots = PortraitSlots::new();
    let p = portrait("/ada.jpg", Side::Left);
    slots.on_frame(Some(0), Some(&p));
    assert_eq!(slots.on_frame(None, None), SlotUpdate::HideAll);
}

#[test]
fn scrolling_hides_once_and_suppresses_frames() {
    let mut slots = PortraitSlots::new();
    assert_eq!(slots.begin_scroll(), SlotUpdate::HideAll);
    assert_eq!(slots.begin_scroll(), SlotUpdate::Unchanged);
    let p = portrait("/ada.jpg", Side::Left);
    assert_eq!(slots.on_frame(Some(3), Some(&p)), SlotUpdate::Unchanged);
}

#[test]
fn settle_reshows_even_for_the_same_entry() {
    let mut slots = PortraitSlots::new();
    let p = portrait("/ada.jpg", Side::Right);
    slots.on_frame(Some(2), Some(&p));
    slots.begin_scroll();
    assert_eq!(
        slots.settle(Some(2), Some(&p)),
        SlotUpdate::Show { side: Side::Right, url: "/ada.jpg".into() }
    );
    // Settled: frames swap again and the next scroll hides again.
    assert_eq!(slots.on_frame(None, None), SlotUpdate::HideAll);
    assert_eq!(slots.begin_scroll(), SlotUpdate::HideAll);
}

#[test]
fn settle_with_nothing_active_hides() {
    let mut slots = PortraitSlots::new();
    slots.begin_scroll();
    assert_eq!(slots.settle(None, None), SlotUpdate::HideAll);
}
