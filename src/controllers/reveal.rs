use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::config::{RevealConfig, UiConfig, REVEAL_FALLBACK_DELAY_MS};
use crate::controllers::counter;
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, PendingTimeout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStyle {
    Hidden { offset_px: u32 },
    Revealed,
}

impl RevealStyle {
    pub fn opacity(&self) -> &'static str {
        match self {
            RevealStyle::Hidden { .. } => "0",
            RevealStyle::Revealed => "1",
        }
    }

    pub fn transform(&self) -> String {
        match self {
            RevealStyle::Hidden { offset_px } => format!("translateY({}px)", offset_px),
            RevealStyle::Revealed => "translateY(0)".to_string(),
        }
    }

    fn apply(&self, el: &Element) {
        dom::set_style(el, "opacity", self.opacity());
        dom::set_style(el, "transform", &self.transform());
    }
}

pub struct ScrollReveal {
    observer: IntersectionObserver,
    _on_intersect: Closure<dyn FnMut(Array, IntersectionObserver)>,
    fallback: PendingTimeout,
}

impl Drop for ScrollReveal {
    fn drop(&mut self) {
        self.observer.disconnect();
        self.fallback.cancel();
    }
}

pub fn bind(document: &Document, config: &RevealConfig) -> Result<ScrollReveal, ControlError> {
    let elements = dom::query_all(document, &config.selector);
    if elements.is_empty() {
        return Err(ControlError::MissingElement(config.selector.clone()));
    }
    let window = dom::window()?;

    let on_intersect = {
        let counter_selector = config.counter_selector.clone();
        let target_attribute = config.counter_target_attribute.clone();
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    RevealStyle::Revealed.apply(&target);
                    // One-way: once shown it stays shown.
                    observer.unobserve(&target);
                    let counters = dom::query_all_within(&target, &counter_selector);
                    if !counters.is_empty() {
                        counter::animate_all(&window, counters, &target_attribute);
                    }
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin);
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;

    let hidden = RevealStyle::Hidden {
        offset_px: config.hidden_offset_px,
    };
    for el in &elements {
        hidden.apply(el);
        observer.observe(el);
    }

    let fallback = PendingTimeout::default();
    if config.fallback {
        // Above-the-fold content must not stay hidden if the observer is late.
        fallback.schedule(REVEAL_FALLBACK_DELAY_MS, move || {
            for el in &elements {
                RevealStyle::Revealed.apply(el);
            }
        });
    }

    Ok(ScrollReveal {
        observer,
        _on_intersect: on_intersect,
        fallback,
    })
}

#[function_component(ScrollRevealController)]
pub fn scroll_reveal_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.reveal));
            let handle = report("scroll reveal", handle);
            move || drop(handle)
        },
        props.config.clone(),
    );
    html! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_state_is_offset_and_transparent() {
        let hidden = RevealStyle::Hidden { offset_px: 30 };
        assert_eq!(hidden.opacity(), "0");
        assert_eq!(hidden.transform(), "translateY(30px)");
    }

    #[test]
    fn revealed_state_is_settled() {
        assert_eq!(RevealStyle::Revealed.opacity(), "1");
        assert_eq!(RevealStyle::Revealed.transform(), "translateY(0)");
    }
}
