//! web-sys bindings.
//!
//! DESIGN
//! ======
//! Each behavior installs itself by subscribing handlers on one shared
//! [`Dispatcher`]. DOM listeners do nothing but translate the browser event
//! into a [`PageEvent`] and dispatch it. Listener closures are leaked on
//! purpose: they, and the nodes they touch, live as long as the page.
//!
//! The theme is applied synchronously inside [`start`] so the first paint
//! already has the right colors; everything that needs the rest of the DOM
//! waits for [`EventKind::Ready`].

mod preview;
mod theme;
mod timeline;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, NodeList};

use crate::config::SiteConfig;
use crate::error::LogFailure;
use crate::events::{Dispatcher, EventKind, PageEvent};

pub(crate) type SharedDispatcher = Rc<RefCell<Dispatcher>>;

/// Install every page behavior. Call [`init_logging`] first.
pub fn start(config: SiteConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = Rc::new(config);
    let dispatcher: SharedDispatcher = Rc::new(RefCell::new(Dispatcher::new()));

    theme::install(&window, &document, &config, &dispatcher);
    preview::install(&document, &config, &dispatcher);
    timeline::install(&window, &document, &config, &dispatcher);

    when_ready(&document, &dispatcher);
}

/// Route `log` records and panics to the devtools console.
pub fn init_logging(config: &SiteConfig) {
    console_error_panic_hook::set_once();
    let level = config.log_level().unwrap_or(log::Level::Warn);
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}

/// Dispatch `Ready` once the document is interactive.
fn when_ready(document: &Document, dispatcher: &SharedDispatcher) {
    if document.ready_state() != "loading" {
        dispatch(dispatcher, &PageEvent::Ready);
        return;
    }
    let dispatcher = Rc::clone(dispatcher);
    listen(document, "DOMContentLoaded", move |_| dispatch(&dispatcher, &PageEvent::Ready));
}

/// Dispatch from a DOM listener.
///
/// Events raised while another dispatch is running are dropped; the browser
/// never re-enters listeners synchronously for the events this crate uses.
pub(crate) fn dispatch(dispatcher: &SharedDispatcher, event: &PageEvent) {
    match dispatcher.try_borrow_mut() {
        Ok(mut dispatcher) => {
            dispatcher.dispatch(event);
        }
        Err(_) => log::debug!("dropped {:?} raised during dispatch", event.kind()),
    }
}

/// Subscribe `handler` to `kind` on the shared dispatcher.
pub(crate) fn subscribe(
    dispatcher: &SharedDispatcher,
    kind: EventKind,
    handler: impl FnMut(&PageEvent) + 'static,
) {
    dispatcher.borrow_mut().subscribe(kind, handler);
}

/// Attach a passive, page-lifetime DOM listener.
pub(crate) fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .or_log(event);
    closure.forget();
}

/// Elements of a `querySelectorAll` result, in document order.
pub(crate) fn elements(list: Option<NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

/// Add or remove `class` on `element`.
pub(crate) fn toggle_class(element: &Element, class: &str, on: bool) {
    element.class_list().toggle_with_force(class, on).or_log(class);
}
