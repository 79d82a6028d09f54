//! Hover preview tooltip node.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlImageElement, MouseEvent};

use super::{SharedDispatcher, dispatch, elements, listen, subscribe, toggle_class};
use crate::config::SiteConfig;
use crate::error::{Error, LogFailure};
use crate::events::{EventKind, PageEvent};
use crate::preview::{PREVIEW_CLASS, PointerPosition, PreviewTooltip, PreviewUpdate};
use crate::timeline::VISIBLE_CLASS;

struct PreviewView {
    document: Document,
    tooltip: PreviewTooltip,
    node: Option<(HtmlElement, HtmlImageElement)>,
}

impl PreviewView {
    /// The tooltip node, created on first use.
    fn node(&mut self) -> Option<&(HtmlElement, HtmlImageElement)> {
        if self.node.is_none() {
            self.node = create_node(&self.document).or_log("preview tooltip");
        }
        self.node.as_ref()
    }

    fn render(&mut self, update: PreviewUpdate) {
        let Some((node, image)) = self.node() else {
            return;
        };
        match update {
            PreviewUpdate::Show { url, at } => {
                image.set_src(&url);
                toggle_class(node, VISIBLE_CLASS, true);
                place(node, at);
            }
            PreviewUpdate::Move(at) => place(node, at),
            PreviewUpdate::Hide => toggle_class(node, VISIBLE_CLASS, false),
        }
    }
}

fn create_node(document: &Document) -> Result<(HtmlElement, HtmlImageElement), Error> {
    let node = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| Error::Js("div is not an HtmlElement".into()))?;
    node.set_class_name(PREVIEW_CLASS);
    let image = document
        .create_element("img")?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| Error::Js("img is not an HtmlImageElement".into()))?;
    image.set_alt("");
    node.append_child(&image)?;
    if let Some(body) = document.body() {
        body.append_child(&node)?;
    }
    Ok((node, image))
}

fn place(node: &HtmlElement, at: PointerPosition) {
    let style = node.style();
    style.set_property("left", &at.left_css()).or_log("preview left");
    style.set_property("top", &at.top_css()).or_log("preview top");
}

fn pointer(event: &Event) -> PointerPosition {
    event.dyn_ref::<MouseEvent>().map_or_else(PointerPosition::default, |mouse| {
        PointerPosition::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()))
    })
}

pub(super) fn install(document: &Document, config: &Rc<SiteConfig>, dispatcher: &SharedDispatcher) {
    let view = Rc::new(RefCell::new(PreviewView {
        document: document.clone(),
        tooltip: PreviewTooltip::new(),
        node: None,
    }));

    {
        let document = document.clone();
        let config = Rc::clone(config);
        let for_listeners = Rc::clone(dispatcher);
        subscribe(dispatcher, EventKind::Ready, move |_| {
            let selector = format!("[{}]", config.preview_attribute);
            for link in elements(document.query_selector_all(&selector).or_log("preview links")) {
                attach_link(&link, &config.preview_attribute, &for_listeners);
            }
        });
    }
    {
        let view = Rc::clone(&view);
        subscribe(dispatcher, EventKind::PreviewEnter, move |event| {
            if let PageEvent::PreviewEnter { url, at } = event {
                let mut view = view.borrow_mut();
                if let Some(update) = view.tooltip.enter(url, *at) {
                    view.render(update);
                }
            }
        });
    }
    {
        let view = Rc::clone(&view);
        subscribe(dispatcher, EventKind::PreviewMove, move |event| {
            if let PageEvent::PreviewMove(at) = event {
                let mut view = view.borrow_mut();
                if let Some(update) = view.tooltip.pointer_move(*at) {
                    view.render(update);
                }
            }
        });
    }
    subscribe(dispatcher, EventKind::PreviewLeave, move |_| {
        let mut view = view.borrow_mut();
        if let Some(update) = view.tooltip.leave() {
            view.render(update);
        }
    });
}

fn attach_link(link: &Element, attribute: &str, dispatcher: &SharedDispatcher) {
    {
        let dispatcher = Rc::clone(dispatcher);
        let source = link.clone();
        let attribute = attribute.to_owned();
        listen(link, "mouseenter", move |event| {
            let url = source.get_attribute(&attribute).unwrap_or_default();
            dispatch(&dispatcher, &PageEvent::PreviewEnter { url, at: pointer(&event) });
        });
    }
    {
        let dispatcher = Rc::clone(dispatcher);
        listen(link, "mousemove", move |event| {
            dispatch(&dispatcher, &PageEvent::PreviewMove(pointer(&event)));
        });
    }
    let dispatcher = Rc::clone(dispatcher);
    listen(link, "mouseleave", move |_| dispatch(&dispatcher, &PageEvent::PreviewLeave));
}
