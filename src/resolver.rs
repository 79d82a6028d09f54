//! The timeline's context object.
//!
//! `TimelineResolver` owns every piece of state the scroll behavior needs:
//! the frame gate, the settle debounce, the portrait slots, and the result
//! of the last frame. The browser layer feeds it events and measurements
//! and applies whatever it returns.
//!
//! ```text
//! scroll ──► on_scroll ──► request frame? ──► run_frame(measure) ──► FrameOutcome
//!                  │
//!                  └──► ticket ──(settle delay)──► settle(ticket) ──► SlotUpdate
//! ```

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;

use crate::portrait::{Portrait, PortraitSlots, SlotUpdate};
use crate::schedule::{Debounce, FrameGate, Ticket};
use crate::timeline::{self, ItemBounds, Proximity, TimelineFrame, Viewport};

/// What a scroll event asks of the browser layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollReaction {
    /// Schedule a frame callback.
    pub request_frame: bool,
    /// Replace the settle timer with one for this ticket.
    pub ticket: Ticket,
    pub slots: SlotUpdate,
}

/// What one frame decided.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub frame: TimelineFrame,
    pub rail: Vec<Proximity>,
    pub slots: SlotUpdate,
}

pub struct TimelineResolver {
    portraits: Vec<Option<Portrait>>,
    gate: FrameGate,
    debounce: Debounce,
    slots: PortraitSlots,
    last: TimelineFrame,
}

impl TimelineResolver {
    /// One portrait entry per timeline item, in document order.
    #[must_use]
    pub fn new(portraits: Vec<Option<Portrait>>, settle_delay_ms: u32) -> Self {
        Self {
            portraits,
            gate: FrameGate::new(),
            debounce: Debounce::new(settle_delay_ms),
            slots: PortraitSlots::new(),
            last: TimelineFrame::default(),
        }
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.portraits.len()
    }

    #[must_use]
    pub fn rail_len(&self) -> usize {
        timeline::rail_len(self.item_count())
    }

    #[must_use]
    pub fn settle_delay_ms(&self) -> u32 {
        self.debounce.delay_ms()
    }

    #[cfg(test)]
    pub(crate) fn active(&self) -> Option<usize> {
        self.last.active
    }

    #[cfg(test)]
    pub(crate) fn last_frame(&self) -> TimelineFrame {
        self.last
    }

    /// A scroll event: coalesce a frame, hide portraits, restart the settle delay.
    pub fn on_scroll(&mut self, now_ms: f64) -> ScrollReaction {
        ScrollReaction {
            request_frame: self.gate.request(),
            slots: self.slots.begin_scroll(),
            ticket: self.debounce.touch(now_ms),
        }
    }

    /// A resize event: only needs a coalesced frame.
    pub fn on_resize(&mut self) -> bool {
        self.gate.request()
    }

    /// Recompute everything from fresh measurements.
    ///
    /// Also used for the initial frame, outside the gate.
    pub fn run_frame(&mut self, items: &[ItemBounds], viewport: Viewport) -> FrameOutcome {
        self.gate.complete();
        let frame = TimelineFrame::compute(items, viewport);
        self.last = frame;
        let slots = self.slots.on_frame(frame.active, portrait_at(&self.portraits, frame.active));
        FrameOutcome { frame, rail: frame.rail(self.rail_len()), slots }
    }

    /// The settle delay elapsed for `ticket`.
    ///
    /// Returns `None` when a later scroll superseded it.
    pub fn settle(&mut self, ticket: Ticket) -> Option<SlotUpdate> {
        if !self.debounce.settle(ticket) {
            return None;
        }
        let active = self.last.active;
        Some(self.slots.settle(active, portrait_at(&self.portraits, active)))
    }
}

fn portrait_at(portraits: &[Option<Portrait>], index: Option<usize>) -> Option<&Portrait> {
    portraits.get(index?)?.as_ref()
}
