use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Node, NodeList, Window};

use crate::error::ControlError;

pub fn window() -> Result<Window, ControlError> {
    web_sys::window().ok_or(ControlError::NoWindow)
}

pub fn document() -> Result<Document, ControlError> {
    window()?.document().ok_or(ControlError::NoDocument)
}

pub fn by_id(document: &Document, id: &str) -> Result<Element, ControlError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ControlError::MissingElement(format!("#{}", id)))
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(collect)
        .unwrap_or_default()
}

pub fn query_all_within(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(collect)
        .unwrap_or_default()
}

fn collect(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    if on {
        add_class(el, class);
    } else {
        remove_class(el, class);
    }
}

/// Sets an inline style property. Non-HTML elements (SVG etc.) are left alone.
pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

/// Whether the event originated inside `container` (including `container` itself).
pub fn event_within(event: &Event, container: &Element) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Node>().ok())
        .map(|node| container.contains(Some(&node)))
        .unwrap_or(false)
}

/// Whether the event target is exactly `el`, not one of its descendants.
pub fn event_on(event: &Event, el: &Element) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Node>().ok())
        .map(|node| el.is_same_node(Some(&node)))
        .unwrap_or(false)
}

pub fn scroll_top(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn document_height(document: &Document) -> f64 {
    document
        .body()
        .map(|body| f64::from(body.scroll_height()))
        .unwrap_or(0.0)
}

/// Event listener that detaches itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, ControlError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// A single pending one-shot timer. Scheduling again replaces (and cancels) the previous one.
#[derive(Clone, Default)]
pub struct PendingTimeout(Rc<RefCell<Option<Timeout>>>);

impl PendingTimeout {
    pub fn schedule<F>(&self, millis: u32, action: F)
    where
        F: FnOnce() + 'static,
    {
        *self.0.borrow_mut() = Some(Timeout::new(millis, action));
    }

    pub fn cancel(&self) {
        self.0.borrow_mut().take();
    }
}
