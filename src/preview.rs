//! Hover preview tooltip that follows the pointer over preview links.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

pub const PREVIEW_CLASS: &str = "timeline-preview";

/// Pointer position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn left_css(&self) -> String {
        format!("{}px", self.x)
    }

    #[must_use]
    pub fn top_css(&self) -> String {
        format!("{}px", self.y)
    }
}

/// Render instruction for the tooltip node.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewUpdate {
    Show { url: String, at: PointerPosition },
    Move(PointerPosition),
    Hide,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewTooltip {
    url: Option<String>,
    visible: bool,
    position: PointerPosition,
}

impl PreviewTooltip {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn position(&self) -> PointerPosition {
        self.position
    }

    /// Pointer entered a preview link. Links with an empty URL show nothing.
    pub fn enter(&mut self, url: &str, at: PointerPosition) -> Option<PreviewUpdate> {
        if url.is_empty() {
            return None;
        }
        self.url = Some(url.to_owned());
        self.visible = true;
        self.position = at;
        Some(PreviewUpdate::Show { url: url.to_owned(), at })
    }

    /// Pointer moved over a preview link.
    pub fn pointer_move(&mut self, at: PointerPosition) -> Option<PreviewUpdate> {
        if !self.visible {
            return None;
        }
        self.position = at;
        Some(PreviewUpdate::Move(at))
    }

    pub fn leave(&mut self) -> Option<PreviewUpdate> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        Some(PreviewUpdate::Hide)
    }
}
