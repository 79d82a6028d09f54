//! Theme preference, effective theme resolution and the theme controller.
//!
//! The user picks one of three preferences; the page only ever renders one of
//! two effective themes. `System` is resolved through the platform dark-mode
//! signal each time it is applied, so a platform change can be followed
//! without touching the stored preference.
//!
//! The controller talks to the outside world through three small traits so
//! the browser layer can plug in `localStorage`, `matchMedia` and the
//! document, and tests can plug in plain structs.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Class a selected theme control carries.
pub const SELECTED_CLASS: &str = "text-theme-text";
/// Class an unselected theme control carries.
pub const UNSELECTED_CLASS: &str = "text-theme-text-sec";
/// Hover class an unselected theme control carries.
pub const UNSELECTED_HOVER_CLASS: &str = "hover:text-theme-text";

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the platform dark-mode signal.
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    pub const ALL: [Self; 3] = [Self::System, Self::Light, Self::Dark];

    /// The persisted string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The accessible label of the control that selects this preference.
    #[must_use]
    pub fn control_label(self) -> &'static str {
        match self {
            Self::System => "System theme",
            Self::Light => "Light theme",
            Self::Dark => "Dark theme",
        }
    }

    /// Map a control's accessible label back to its preference.
    #[must_use]
    pub fn from_control_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.control_label() == label)
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Self::System),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::UnknownPreference(other.to_owned())),
        }
    }
}

/// The theme actually rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveTheme {
    Light,
    Dark,
}

impl EffectiveTheme {
    /// Value written to `data-theme` and `color-scheme`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Resolve a preference against the platform's current dark-mode state.
#[must_use]
pub fn resolve_effective(preference: ThemePreference, prefers_dark: bool) -> EffectiveTheme {
    match preference {
        ThemePreference::System if prefers_dark => EffectiveTheme::Dark,
        ThemePreference::System | ThemePreference::Light => EffectiveTheme::Light,
        ThemePreference::Dark => EffectiveTheme::Dark,
    }
}

/// Class changes for one theme control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlClasses {
    pub add: &'static [&'static str],
    pub remove: &'static [&'static str],
}

/// Classes to add and remove on a control given whether it is selected.
#[must_use]
pub fn control_classes(selected: bool) -> ControlClasses {
    if selected {
        ControlClasses {
            add: &[SELECTED_CLASS],
            remove: &[UNSELECTED_CLASS, UNSELECTED_HOVER_CLASS],
        }
    } else {
        ControlClasses {
            add: &[UNSELECTED_CLASS, UNSELECTED_HOVER_CLASS],
            remove: &[SELECTED_CLASS],
        }
    }
}

/// Where the sliding pill sits, in px relative to its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillPlacement {
    pub left: f64,
    pub width: f64,
}

impl PillPlacement {
    /// Inline `left` value.
    #[must_use]
    pub fn left_css(&self) -> String {
        format!("{}px", self.left)
    }

    /// Inline `width` value.
    #[must_use]
    pub fn width_css(&self) -> String {
        format!("{}px", self.width)
    }
}

// =============================================================================
// SEAMS
// =============================================================================

/// Persistence for the preference string.
pub trait PreferenceStore {
    /// The raw stored value, if any.
    fn load(&self) -> Option<String>;

    /// Persist a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the backing store refuses the write.
    fn save(&mut self, value: &str) -> Result<(), Error>;
}

/// The platform dark-mode signal.
pub trait ColorSchemeSignal {
    fn prefers_dark(&self) -> bool;
}

/// Where themes and control states are reflected.
pub trait ThemeSurface {
    /// Write the effective theme to the document.
    fn set_theme(&mut self, theme: EffectiveTheme);

    /// Mark the control for `selected` as selected and all others unselected.
    fn sync_controls(&mut self, selected: ThemePreference);
}

/// Session-only store, used when `localStorage` is unavailable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_value(value: &str) -> Self {
        Self { value: Some(value.to_owned()) }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, value: &str) -> Result<(), Error> {
        self.value = Some(value.to_owned());
        Ok(())
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns the preference store, the platform signal and the document surface.
///
/// `current` is the preference in effect for this page. It is what the store
/// held at init, then whatever was last selected, whether or not the store
/// accepted the write.
pub struct ThemeController<S, C, T> {
    store: S,
    signal: C,
    surface: T,
    current: ThemePreference,
    applied: Option<EffectiveTheme>,
}

impl<S, C, T> ThemeController<S, C, T>
where
    S: PreferenceStore,
    C: ColorSchemeSignal,
    T: ThemeSurface,
{
    pub fn new(store: S, signal: C, surface: T) -> Self {
        Self { store, signal, surface, current: ThemePreference::System, applied: None }
    }

    /// The stored preference; anything missing or unrecognized is `System`.
    pub fn stored_preference(&self) -> ThemePreference {
        let Some(raw) = self.store.load() else {
            return ThemePreference::System;
        };
        raw.parse().unwrap_or_else(|e| {
            log::debug!("ignoring stored theme: {e}");
            ThemePreference::System
        })
    }

    pub fn resolve_effective(&self, preference: ThemePreference) -> EffectiveTheme {
        resolve_effective(preference, self.signal.prefers_dark())
    }

    /// Reflect `preference` into the document.
    ///
    /// Writes only when the effective theme differs from the last one applied.
    pub fn apply(&mut self, preference: ThemePreference) -> EffectiveTheme {
        let effective = self.resolve_effective(preference);
        if self.applied != Some(effective) {
            self.surface.set_theme(effective);
            self.applied = Some(effective);
        }
        effective
    }

    /// Persist, apply and sync controls. The only path that writes storage.
    pub fn set_preference(&mut self, preference: ThemePreference) {
        if let Err(e) = self.store.save(preference.as_str()) {
            log::debug!("theme preference not persisted: {e}");
        }
        self.current = preference;
        self.apply(preference);
        self.surface.sync_controls(preference);
    }

    /// Apply the stored preference. Runs before the rest of the DOM is ready.
    pub fn init(&mut self) -> ThemePreference {
        self.current = self.stored_preference();
        self.apply(self.current);
        self.current
    }

    /// Sync the controls to the current preference once they exist.
    pub fn sync_controls(&mut self) -> ThemePreference {
        self.surface.sync_controls(self.current);
        self.current
    }

    /// Platform dark-mode changed; only a `System` preference follows it.
    pub fn on_color_scheme_change(&mut self) {
        if self.current == ThemePreference::System {
            self.apply(ThemePreference::System);
        }
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> ThemePreference {
        self.current
    }

    #[cfg(test)]
    pub(crate) fn surface(&self) -> &T {
        &self.surface
    }

    #[cfg(test)]
    pub(crate) fn applied(&self) -> Option<EffectiveTheme> {
        self.applied
    }
}
