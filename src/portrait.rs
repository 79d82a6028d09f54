//! Fixed portrait slots.
//!
//! Two fixed-position image slots flank the timeline. The active entry's
//! portrait goes in the slot named by the entry's text alignment marker
//! (`text-right` → right slot, anything else → left slot). Slots are only
//! rewritten when the active entry changes, and stay hidden while the page
//! is scrolling.

#[cfg(test)]
#[path = "portrait_test.rs"]
mod portrait_test;

pub const SLOT_CONTAINER_CLASS: &str = "timeline-fixed-images";
pub const SLOT_CLASS: &str = "timeline-fixed-image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Side named by an entry's text block classes.
    ///
    /// Only an explicit `text-right` class selects the right slot.
    #[must_use]
    pub fn from_text_classes(class_name: &str) -> Self {
        if class_name.split_whitespace().any(|c| c == "text-right") {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Modifier class of the slot on this side.
    #[must_use]
    pub fn slot_class(self) -> &'static str {
        match self {
            Self::Left => "timeline-fixed-image--left",
            Self::Right => "timeline-fixed-image--right",
        }
    }
}

/// An entry's portrait reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portrait {
    pub url: String,
    pub side: Side,
}

/// What the browser layer has to do to the slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotUpdate {
    /// Leave both slots as they are.
    Unchanged,
    /// Hide both slots.
    HideAll,
    /// Hide both, then load `url` into the slot on `side` and show it.
    Show { side: Side, url: String },
}

/// Tracks which entry the slots currently reflect.
#[derive(Debug, Clone, Default)]
pub struct PortraitSlots {
    shown_for: Option<usize>,
    stale: bool,
    scrolling: bool,
}

impl PortraitSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scroll event arrived; hides the slots on the first one of a burst.
    pub fn begin_scroll(&mut self) -> SlotUpdate {
        if self.scrolling {
            return SlotUpdate::Unchanged;
        }
        self.scrolling = true;
        SlotUpdate::HideAll
    }

    /// Per-frame update. Ignored while scrolling.
    pub fn on_frame(&mut self, active: Option<usize>, portrait: Option<&Portrait>) -> SlotUpdate {
        if self.scrolling {
            return SlotUpdate::Unchanged;
        }
        self.swap(active, portrait)
    }

    /// Scrolling settled; recompute from scratch even if the entry is unchanged.
    pub fn settle(&mut self, active: Option<usize>, portrait: Option<&Portrait>) -> SlotUpdate {
        self.scrolling = false;
        self.stale = true;
        self.swap(active, portrait)
    }

    fn swap(&mut self, active: Option<usize>, portrait: Option<&Portrait>) -> SlotUpdate {
        if !self.stale && self.shown_for == active {
            return SlotUpdate::Unchanged;
        }
        self.stale = false;
        self.shown_for = active;

        match (active, portrait) {
            (Some(_), Some(portrait)) => SlotUpdate::Show { side: portrait.side, url: portrait.url.clone() },
            _ => SlotUpdate::HideAll,
        }
    }
}
