//! Timeline bindings: generated rail and portrait slots, frame scheduling,
//! settle timer.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlImageElement, ScrollBehavior, ScrollIntoViewOptions, Window};

use super::{SharedDispatcher, dispatch, elements, listen, subscribe, toggle_class};
use crate::config::SiteConfig;
use crate::error::{Error, LogFailure};
use crate::events::{EventKind, PageEvent};
use crate::portrait::{Portrait, SLOT_CLASS, SLOT_CONTAINER_CLASS, Side, SlotUpdate};
use crate::resolver::{FrameOutcome, TimelineResolver};
use crate::schedule::Ticket;
use crate::timeline::{ACTIVE_ITEM_CLASS, ItemBounds, Proximity, SNAP_DISABLED_CLASS, VISIBLE_CLASS, Viewport};

const RAIL_CLASS: &str = "timeline-progress";
const RAIL_ITEM_CLASS: &str = "timeline-progress__item";
const RAIL_BAR_CLASS: &str = "timeline-progress__bar";
const TEXT_SIDE_SELECTOR: &str = r#"[class*="text-right"], [class*="text-left"]"#;

type SharedView = Rc<RefCell<Option<TimelineView>>>;

struct Slot {
    frame: Element,
    image: HtmlImageElement,
}

struct TimelineView {
    window: Window,
    root: Option<Element>,
    items: Vec<Element>,
    rail: Element,
    rail_items: Vec<Element>,
    left: Slot,
    right: Slot,
    resolver: TimelineResolver,
    frame_callback: Option<js_sys::Function>,
    settle_timer: Option<Timeout>,
}

impl TimelineView {
    fn measure(&self) -> (Vec<ItemBounds>, Viewport) {
        let items = self
            .items
            .iter()
            .map(|item| {
                let rect = item.get_bounding_client_rect();
                ItemBounds::new(rect.top(), rect.bottom())
            })
            .collect();
        let viewport = Viewport {
            height: self
                .window
                .inner_height()
                .or_log("innerHeight")
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0),
            scroll_y: self.window.scroll_y().or_log("scrollY").unwrap_or(0.0),
        };
        (items, viewport)
    }

    fn frame(&mut self) {
        let (items, viewport) = self.measure();
        let outcome = self.resolver.run_frame(&items, viewport);
        self.render(&outcome);
    }

    /// Schedule one frame; runs it inline when the browser refuses.
    fn request_frame(&mut self) {
        let scheduled = self
            .frame_callback
            .as_ref()
            .and_then(|cb| self.window.request_animation_frame(cb).or_log("requestAnimationFrame"))
            .is_some();
        if !scheduled {
            self.frame();
        }
    }

    fn render(&self, outcome: &FrameOutcome) {
        let frame = outcome.frame;
        for (index, item) in self.items.iter().enumerate() {
            toggle_class(item, ACTIVE_ITEM_CLASS, frame.active == Some(index));
        }
        for (entry, proximity) in self.rail_items.iter().zip(&outcome.rail) {
            for class in Proximity::CLASSES {
                toggle_class(entry, class, proximity.class_name() == Some(class));
            }
        }
        toggle_class(&self.rail, VISIBLE_CLASS, frame.rail_visible);
        if let Some(root) = &self.root {
            toggle_class(root, SNAP_DISABLED_CLASS, frame.snap_disabled);
        }
        self.render_slots(&outcome.slots);
    }

    fn render_slots(&self, update: &SlotUpdate) {
        match update {
            SlotUpdate::Unchanged => {}
            SlotUpdate::HideAll => self.hide_slots(),
            SlotUpdate::Show { side, url } => {
                self.hide_slots();
                let slot = match side {
                    Side::Left => &self.left,
                    Side::Right => &self.right,
                };
                slot.image.set_src(url);
                toggle_class(&slot.frame, VISIBLE_CLASS, true);
            }
        }
    }

    fn hide_slots(&self) {
        toggle_class(&self.left.frame, VISIBLE_CLASS, false);
        toggle_class(&self.right.frame, VISIBLE_CLASS, false);
    }

    fn scroll_to(&self, index: usize) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        item.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Subscribe the timeline handlers; DOM work happens on ready.
pub(super) fn install(window: &Window, document: &Document, config: &Rc<SiteConfig>, dispatcher: &SharedDispatcher) {
    let view: SharedView = Rc::new(RefCell::new(None));

    {
        let view = Rc::clone(&view);
        let window = window.clone();
        let document = document.clone();
        let config = Rc::clone(config);
        let for_listeners = Rc::clone(dispatcher);
        subscribe(dispatcher, EventKind::Ready, move |_| {
            mount(&view, &window, &document, &config, &for_listeners);
        });
    }
    {
        let view = Rc::clone(&view);
        subscribe(dispatcher, EventKind::Scroll, move |event| {
            if let PageEvent::Scroll { now_ms } = event {
                on_scroll(&view, *now_ms);
            }
        });
    }
    {
        let view = Rc::clone(&view);
        subscribe(dispatcher, EventKind::Resize, move |_| {
            if let Some(view) = view.borrow_mut().as_mut() {
                if view.resolver.on_resize() {
                    view.request_frame();
                }
            }
        });
    }
    subscribe(dispatcher, EventKind::RailClick, move |event| {
        if let PageEvent::RailClick { index } = event
            && let Some(view) = view.borrow().as_ref()
        {
            view.scroll_to(*index);
        }
    });
}

fn on_scroll(shared: &SharedView, now_ms: f64) {
    let mut guard = shared.borrow_mut();
    let Some(view) = guard.as_mut() else {
        return;
    };
    let reaction = view.resolver.on_scroll(now_ms);
    view.render_slots(&reaction.slots);
    if reaction.request_frame {
        view.request_frame();
    }

    let delay = view.resolver.settle_delay_ms();
    let ticket = reaction.ticket;
    let shared = Rc::clone(shared);
    // Replacing the timeout drops and cancels the previous one.
    view.settle_timer = Some(Timeout::new(delay, move || settle(&shared, ticket)));
}

fn settle(shared: &SharedView, ticket: Ticket) {
    if let Some(view) = shared.borrow_mut().as_mut()
        && let Some(update) = view.resolver.settle(ticket)
    {
        view.render_slots(&update);
    }
}

/// Build the generated DOM and start listening. Inert without a container or items.
fn mount(shared: &SharedView, window: &Window, document: &Document, config: &SiteConfig, dispatcher: &SharedDispatcher) {
    let Some(container) = document
        .query_selector(&config.timeline_container_selector)
        .or_log("timeline container")
        .flatten()
    else {
        return;
    };
    let items = elements(container.query_selector_all(&config.timeline_item_selector).or_log("timeline items"));
    if items.is_empty() {
        return;
    }

    let Some(view) = build_view(window, document, config, items, dispatcher).or_log("timeline setup") else {
        return;
    };
    log::debug!("timeline mounted with {} entries", view.items.len());
    *shared.borrow_mut() = Some(view);

    let callback = {
        let shared = Rc::clone(shared);
        Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
            if let Some(view) = shared.borrow_mut().as_mut() {
                view.frame();
            }
        })
    };
    if let Some(view) = shared.borrow_mut().as_mut() {
        view.frame_callback = Some(callback.into_js_value().unchecked_into());
        view.frame();
    }

    {
        let dispatcher = Rc::clone(dispatcher);
        listen(window, "scroll", move |_| {
            dispatch(&dispatcher, &PageEvent::Scroll { now_ms: js_sys::Date::now() });
        });
    }
    let dispatcher = Rc::clone(dispatcher);
    listen(window, "resize", move |_| dispatch(&dispatcher, &PageEvent::Resize));
}

fn build_view(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
    items: Vec<Element>,
    dispatcher: &SharedDispatcher,
) -> Result<TimelineView, Error> {
    let body = document.body().ok_or_else(|| Error::Js("document has no body".into()))?;

    let slots = document.create_element("div")?;
    slots.set_class_name(SLOT_CONTAINER_CLASS);
    let left = create_slot(document, Side::Left)?;
    let right = create_slot(document, Side::Right)?;
    slots.append_child(&left.frame)?;
    slots.append_child(&right.frame)?;
    body.append_child(&slots)?;

    let rail = document.create_element("div")?;
    rail.set_class_name(RAIL_CLASS);
    let mut rail_items = Vec::new();
    for (index, item) in items.iter().take(crate::timeline::rail_len(items.len())).enumerate() {
        let entry = create_rail_entry(document, &year_label(item, config))?;
        rail.append_child(&entry)?;
        let dispatcher = Rc::clone(dispatcher);
        listen(&entry, "click", move |_| dispatch(&dispatcher, &PageEvent::RailClick { index }));
        rail_items.push(entry);
    }
    body.append_child(&rail)?;

    let portraits = items.iter().map(|item| portrait(item, config)).collect();
    Ok(TimelineView {
        window: window.clone(),
        root: document.document_element(),
        resolver: TimelineResolver::new(portraits, config.settle_delay_ms),
        items,
        rail,
        rail_items,
        left,
        right,
        frame_callback: None,
        settle_timer: None,
    })
}

fn create_slot(document: &Document, side: Side) -> Result<Slot, Error> {
    let frame = document.create_element("div")?;
    frame.set_class_name(&format!("{SLOT_CLASS} {}", side.slot_class()));
    let image = document
        .create_element("img")?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| Error::Js("img is not an HtmlImageElement".into()))?;
    image.set_alt("");
    frame.append_child(&image)?;
    Ok(Slot { frame, image })
}

fn create_rail_entry(document: &Document, year: &str) -> Result<Element, Error> {
    let entry = document.create_element("button")?;
    entry.set_class_name(RAIL_ITEM_CLASS);
    entry.set_attribute("aria-label", &format!("Scroll to {year}"))?;
    entry.set_attribute("data-year", year)?;
    let bar = document.create_element("span")?;
    bar.set_class_name(RAIL_BAR_CLASS);
    entry.append_child(&bar)?;
    Ok(entry)
}

fn year_label(item: &Element, config: &SiteConfig) -> String {
    item.query_selector(&config.year_label_selector)
        .or_log("year label")
        .flatten()
        .and_then(|label| label.text_content())
        .map(|text| text.trim().to_owned())
        .unwrap_or_default()
}

fn portrait(item: &Element, config: &SiteConfig) -> Option<Portrait> {
    let attribute = &config.portrait_attribute;
    let link = item.query_selector(&format!("[{attribute}]")).or_log("portrait").flatten()?;
    let url = link.get_attribute(attribute).filter(|url| !url.is_empty())?;
    let side = item
        .query_selector(TEXT_SIDE_SELECTOR)
        .or_log("text side")
        .flatten()
        .map_or(Side::Left, |text| Side::from_text_classes(&text.class_name()));
    Some(Portrait { url, side })
}
