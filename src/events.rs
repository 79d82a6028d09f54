//! Typed page events and the dispatcher that fans them out.
//!
//! The browser layer installs one DOM listener per event source and turns
//! each DOM event into a [`PageEvent`]. Handlers subscribe by
//! [`EventKind`] and run synchronously, in registration order, on the
//! thread that dispatches.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use crate::preview::PointerPosition;
use crate::theme::ThemePreference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The document became interactive.
    Ready,
    Scroll,
    Resize,
    ColorSchemeChange,
    ThemeControlClick,
    RailClick,
    PreviewEnter,
    PreviewMove,
    PreviewLeave,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Ready,
    Scroll { now_ms: f64 },
    Resize,
    ColorSchemeChange,
    ThemeControlClick(ThemePreference),
    RailClick { index: usize },
    PreviewEnter { url: String, at: PointerPosition },
    PreviewMove(PointerPosition),
    PreviewLeave,
}

impl PageEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Ready => EventKind::Ready,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Resize => EventKind::Resize,
            Self::ColorSchemeChange => EventKind::ColorSchemeChange,
            Self::ThemeControlClick(_) => EventKind::ThemeControlClick,
            Self::RailClick { .. } => EventKind::RailClick,
            Self::PreviewEnter { .. } => EventKind::PreviewEnter,
            Self::PreviewMove(_) => EventKind::PreviewMove,
            Self::PreviewLeave => EventKind::PreviewLeave,
        }
    }
}

pub type Handler = Box<dyn FnMut(&PageEvent)>;

#[derive(Default)]
pub struct Dispatcher {
    handlers: Vec<(EventKind, Handler)>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every event of `kind`.
    pub fn subscribe(&mut self, kind: EventKind, handler: impl FnMut(&PageEvent) + 'static) {
        self.handlers.push((kind, Box::new(handler)));
    }

    /// Run every handler registered for the event's kind.
    ///
    /// Returns how many handlers ran.
    pub fn dispatch(&mut self, event: &PageEvent) -> usize {
        let kind = event.kind();
        let mut ran = 0;
        for (_, handler) in self.handlers.iter_mut().filter(|(k, _)| *k == kind) {
            handler(event);
            ran += 1;
        }
        ran
    }
}
