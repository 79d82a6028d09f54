//! Timeline geometry: which entry is active, how the rail is styled, and
//! whether the page has scrolled past the final section.
//!
//! Everything here is a pure function of measured rectangles and the
//! viewport, recomputed once per animation frame by
//! [`crate::resolver::TimelineResolver`].

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

/// Distance from an entry's top edge to the center of its dot marker.
pub const DOT_OFFSET_PX: f64 = 12.0;

pub const ACTIVE_ITEM_CLASS: &str = "timeline-item--active";
pub const SNAP_DISABLED_CLASS: &str = "timeline-snap-disabled";
pub const VISIBLE_CLASS: &str = "visible";

/// An entry's vertical extent in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBounds {
    pub top: f64,
    pub bottom: f64,
}

impl ItemBounds {
    #[must_use]
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Viewport y of the entry's dot marker.
    #[must_use]
    pub fn dot_center(&self) -> f64 {
        self.top + DOT_OFFSET_PX
    }
}

/// Window measurements taken at frame time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub height: f64,
    pub scroll_y: f64,
}

impl Viewport {
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }
}

/// Index of the entry whose dot is closest to `center_y`.
///
/// Equal distances keep the earlier entry.
#[must_use]
pub fn nearest_item(items: &[ItemBounds], center_y: f64) -> Option<usize> {
    let mut closest = None;
    let mut closest_distance = f64::INFINITY;
    for (index, item) in items.iter().enumerate() {
        let distance = (item.dot_center() - center_y).abs();
        if distance < closest_distance {
            closest_distance = distance;
            closest = Some(index);
        }
    }
    closest
}

/// The active entry, if any.
///
/// Nothing is active before the page has scrolled, and the first entry only
/// activates once its top edge has reached the viewport center.
#[must_use]
pub fn resolve_active(items: &[ItemBounds], viewport: Viewport) -> Option<usize> {
    if viewport.scroll_y <= 0.0 {
        return None;
    }
    let center_y = viewport.center_y();
    match nearest_item(items, center_y)? {
        0 if items[0].top > center_y => None,
        index => Some(index),
    }
}

/// Styling tier of a rail entry relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Proximity {
    #[default]
    None,
    Active,
    Adjacent,
    Adjacent2,
}

impl Proximity {
    /// Every class a rail entry can carry, for clearing.
    pub const CLASSES: [&'static str; 3] = ["active", "adjacent", "adjacent-2"];

    /// The class this tier adds, if any.
    #[must_use]
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Active => Some("active"),
            Self::Adjacent => Some("adjacent"),
            Self::Adjacent2 => Some("adjacent-2"),
        }
    }
}

/// Tier of rail entry `index` given the active entry.
#[must_use]
pub fn proximity(index: usize, active: Option<usize>) -> Proximity {
    let Some(active) = active else {
        return Proximity::None;
    };
    match index.abs_diff(active) {
        0 => Proximity::Active,
        1 => Proximity::Adjacent,
        2 => Proximity::Adjacent2,
        _ => Proximity::None,
    }
}

/// Number of rail entries; the last timeline entry is a spacer.
#[must_use]
pub fn rail_len(item_count: usize) -> usize {
    item_count.saturating_sub(1)
}

/// Whether the viewport center has moved below the second-to-last entry.
#[must_use]
pub fn past_final_boundary(items: &[ItemBounds], center_y: f64) -> bool {
    items.len() >= 2 && items[items.len() - 2].bottom < center_y
}

/// Everything one frame decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimelineFrame {
    pub active: Option<usize>,
    pub rail_visible: bool,
    pub snap_disabled: bool,
}

impl TimelineFrame {
    #[must_use]
    pub fn compute(items: &[ItemBounds], viewport: Viewport) -> Self {
        let active = resolve_active(items, viewport);
        let past_boundary = past_final_boundary(items, viewport.center_y());
        Self {
            active,
            rail_visible: active.is_some() && !past_boundary,
            snap_disabled: past_boundary,
        }
    }

    /// Proximity tier for each rail entry.
    #[must_use]
    pub fn rail(&self, rail_len: usize) -> Vec<Proximity> {
        (0..rail_len).map(|index| proximity(index, self.active)).collect()
    }
}
