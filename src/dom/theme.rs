//! Theme controller wired to `localStorage`, `matchMedia` and the document.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MediaQueryList, Storage, Window};

use super::{SharedDispatcher, dispatch, elements, listen, subscribe};
use crate::config::SiteConfig;
use crate::error::{Error, LogFailure};
use crate::events::{EventKind, PageEvent};
use crate::theme::{
    ColorSchemeSignal, EffectiveTheme, MemoryStore, PillPlacement, PreferenceStore, ThemeController,
    ThemePreference, ThemeSurface, control_classes,
};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

type BrowserTheme = ThemeController<BrowserStore, MediaSignal, DocumentSurface>;

/// `localStorage` when the browser allows it, otherwise a session-only store.
enum BrowserStore {
    Local { storage: Storage, key: String },
    Session(MemoryStore),
}

impl BrowserStore {
    fn open(window: &Window, key: &str) -> Self {
        match window.local_storage().or_log("localStorage").flatten() {
            Some(storage) => Self::Local { storage, key: key.to_owned() },
            None => Self::Session(MemoryStore::new()),
        }
    }
}

impl PreferenceStore for BrowserStore {
    fn load(&self) -> Option<String> {
        match self {
            Self::Local { storage, key } => storage.get_item(key).or_log("read theme").flatten(),
            Self::Session(store) => store.load(),
        }
    }

    fn save(&mut self, value: &str) -> Result<(), Error> {
        match self {
            Self::Local { storage, key } => storage
                .set_item(key, value)
                .map_err(|e| Error::Storage(Error::from(e).to_string())),
            Self::Session(store) => store.save(value),
        }
    }
}

struct MediaSignal {
    query: Option<MediaQueryList>,
}

impl ColorSchemeSignal for MediaSignal {
    fn prefers_dark(&self) -> bool {
        self.query.as_ref().map_or(false, MediaQueryList::matches)
    }
}

/// The `<html>` element plus the toggle controls, looked up on each sync.
struct DocumentSurface {
    document: Document,
    config: Rc<SiteConfig>,
}

impl DocumentSurface {
    fn pill_indicator(&self) -> Option<HtmlElement> {
        let container = self
            .document
            .query_selector(&self.config.pill_container_selector)
            .or_log("pill container")
            .flatten()?;
        let indicator = container
            .query_selector(&self.config.pill_indicator_selector)
            .or_log("pill indicator")
            .flatten()?;
        indicator.dyn_ref::<HtmlElement>().cloned()
    }
}

impl ThemeSurface for DocumentSurface {
    fn set_theme(&mut self, theme: EffectiveTheme) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        root.set_attribute("data-theme", theme.as_str()).or_log("data-theme");
        if let Some(root) = root.dyn_ref::<HtmlElement>() {
            root.style().set_property("color-scheme", theme.as_str()).or_log("color-scheme");
        }
    }

    fn sync_controls(&mut self, selected: ThemePreference) {
        let controls = elements(
            self.document
                .query_selector_all(&self.config.theme_control_selector)
                .or_log("theme controls"),
        );
        if controls.is_empty() {
            return;
        }
        let indicator = self.pill_indicator();

        for control in &controls {
            let preference = control
                .get_attribute("aria-label")
                .and_then(|label| ThemePreference::from_control_label(&label));
            let is_selected = preference == Some(selected);

            let classes = control_classes(is_selected);
            for class in classes.remove {
                control.class_list().remove_1(class).or_log(class);
            }
            for class in classes.add {
                control.class_list().add_1(class).or_log(class);
            }

            if is_selected
                && let (Some(indicator), Some(control)) = (&indicator, control.dyn_ref::<HtmlElement>())
            {
                let pill = PillPlacement {
                    left: f64::from(control.offset_left()),
                    width: f64::from(control.offset_width()),
                };
                let style = indicator.style();
                style.set_property("left", &pill.left_css()).or_log("pill left");
                style.set_property("width", &pill.width_css()).or_log("pill width");
            }
        }
    }
}

/// Apply the stored theme now; wire controls and the platform signal on ready.
pub(super) fn install(window: &Window, document: &Document, config: &Rc<SiteConfig>, dispatcher: &SharedDispatcher) {
    let media = window.match_media(DARK_QUERY).or_log("matchMedia").flatten();
    let controller: Rc<RefCell<BrowserTheme>> = Rc::new(RefCell::new(ThemeController::new(
        BrowserStore::open(window, &config.storage_key),
        MediaSignal { query: media.clone() },
        DocumentSurface { document: document.clone(), config: Rc::clone(config) },
    )));

    let preference = controller.borrow_mut().init();
    log::debug!("theme preference {preference} applied");

    {
        let controller = Rc::clone(&controller);
        let document = document.clone();
        let config = Rc::clone(config);
        let for_listeners = Rc::clone(dispatcher);
        subscribe(dispatcher, EventKind::Ready, move |_| {
            controller.borrow_mut().sync_controls();
            attach_controls(&document, &config, &for_listeners);
            if let Some(media) = &media {
                let dispatcher = Rc::clone(&for_listeners);
                listen(media, "change", move |_| {
                    dispatch(&dispatcher, &PageEvent::ColorSchemeChange);
                });
            }
        });
    }
    {
        let controller = Rc::clone(&controller);
        subscribe(dispatcher, EventKind::ColorSchemeChange, move |_| {
            controller.borrow_mut().on_color_scheme_change();
        });
    }
    subscribe(dispatcher, EventKind::ThemeControlClick, move |event| {
        if let PageEvent::ThemeControlClick(preference) = event {
            controller.borrow_mut().set_preference(*preference);
        }
    });
}

fn attach_controls(document: &Document, config: &SiteConfig, dispatcher: &SharedDispatcher) {
    let controls = elements(document.query_selector_all(&config.theme_control_selector).or_log("theme controls"));
    for control in controls {
        let Some(preference) = control
            .get_attribute("aria-label")
            .and_then(|label| ThemePreference::from_control_label(&label))
        else {
            continue;
        };
        let dispatcher = Rc::clone(dispatcher);
        listen(&control, "click", move |_| {
            dispatch(&dispatcher, &PageEvent::ThemeControlClick(preference));
        });
    }
}
