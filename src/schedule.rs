//! Scheduling primitives: per-frame coalescing and a last-write-wins delay.
//!
//! Neither type owns a timer. The browser layer pairs [`FrameGate`] with
//! `requestAnimationFrame` and [`Debounce`] with a `gloo_timers` timeout;
//! both decide only whether a callback should run.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

/// "Request a single update before the next render".
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the caller should schedule a frame callback.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// The frame callback ran (or could not be scheduled).
    pub fn complete(&mut self) {
        self.pending = false;
    }
}

/// A scheduled debounce firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticket {
    pub id: u64,
    /// When the firing is due, on the caller's clock.
    pub due_ms: f64,
}

/// Cancellable delay where each new request supersedes the previous one.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay_ms: u32,
    latest: u64,
    outstanding: bool,
}

impl Debounce {
    #[must_use]
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms, latest: 0, outstanding: false }
    }

    #[must_use]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Restart the delay from `now_ms`, cancelling any earlier ticket.
    pub fn touch(&mut self, now_ms: f64) -> Ticket {
        self.latest += 1;
        self.outstanding = true;
        Ticket { id: self.latest, due_ms: now_ms + f64::from(self.delay_ms) }
    }

    /// Whether `ticket` is the live one; consumes it when it is.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if !self.outstanding || ticket.id != self.latest {
            return false;
        }
        self.outstanding = false;
        true
    }
}
