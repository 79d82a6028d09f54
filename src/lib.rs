//! # site-ui
//!
//! Client-side presentation behavior for the marketing site, compiled to
//! WebAssembly. Replaces the hand-written page script with a Rust layer.
//!
//! All decisions (which theme to apply, which timeline entry is active,
//! when the portrait may show) are made by browser-independent context
//! objects so they can be tested on the host. The `dom` module, gated
//! behind the `browser` feature, only measures the page, forwards events and
//! writes the results back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Theme preference, effective theme and [`theme::ThemeController`] |
//! | [`timeline`] | Nearest-entry resolution, rail proximity, boundary checks |
//! | [`portrait`] | Fixed portrait slot swapping |
//! | [`resolver`] | [`resolver::TimelineResolver`] tying frames, debounce and portraits together |
//! | [`preview`] | Hover preview tooltip state |
//! | [`schedule`] | Frame gate and debounce primitives |
//! | [`events`] | Typed page events and the handler dispatcher |
//! | [`config`] | Selectors, storage key and timing knobs |
//! | [`error`] | Crate error type |
//! | `dom` | web-sys bindings (feature `browser`) |

pub mod config;
pub mod error;
pub mod events;
pub mod portrait;
pub mod preview;
pub mod resolver;
pub mod schedule;
pub mod theme;
pub mod timeline;

#[cfg(feature = "browser")]
pub mod dom;

pub use config::SiteConfig;
pub use error::Error;

#[cfg(feature = "browser")]
use wasm_bindgen::prelude::wasm_bindgen;

/// Start every page behavior with the default configuration.
#[cfg(feature = "browser")]
#[wasm_bindgen]
pub fn mount() {
    let config = SiteConfig::default();
    dom::init_logging(&config);
    dom::start(config);
}

/// Start every page behavior with a JSON configuration object.
///
/// Missing fields keep their defaults. An unparseable config is logged and
/// replaced by the defaults; the page never sees an error.
#[cfg(feature = "browser")]
#[wasm_bindgen]
pub fn mount_with_config(json: &str) {
    let (config, rejected) = match SiteConfig::from_json(json) {
        Ok(config) => (config, None),
        Err(e) => (SiteConfig::default(), Some(e)),
    };
    dom::init_logging(&config);
    if let Some(e) = rejected {
        log::warn!("{e}; using default config");
    }
    dom::start(config);
}
