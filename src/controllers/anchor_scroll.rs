use std::rc::Rc;

use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use crate::config::{PageConfig, UiConfig};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener};

/// The selector an in-page link points at, or `None` for bare `#` and external links.
pub fn fragment_selector(href: &str) -> Option<&str> {
    let href = href.trim();
    if href.len() > 1 && href.starts_with('#') {
        Some(href)
    } else {
        None
    }
}

pub struct AnchorScroll {
    _listeners: Vec<Listener>,
}

pub fn bind(document: &Document, config: &PageConfig) -> Result<AnchorScroll, ControlError> {
    let anchors = dom::query_all(document, &config.anchor_selector);
    if anchors.is_empty() {
        return Err(ControlError::MissingElement(config.anchor_selector.clone()));
    }

    let mut listeners = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        let document = document.clone();
        let link = anchor.clone();
        listeners.push(Listener::new(&anchor, "click", move |e| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(selector) = fragment_selector(&href) else {
                return;
            };
            // Invalid selectors and missing targets fall through to the browser.
            let Ok(Some(target)) = document.query_selector(selector) else {
                return;
            };
            e.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?);
    }

    Ok(AnchorScroll {
        _listeners: listeners,
    })
}

#[function_component(AnchorScrollController)]
pub fn anchor_scroll_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.page));
            let handle = report("anchor scroll", handle);
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
    fn only_real_fragments_are_handled() {
        assert_eq!(fragment_selector("#pricing"), Some("#pricing"));
        assert_eq!(fragment_selector("  #faq "), Some("#faq"));
        assert_eq!(fragment_selector("#"), None);
        assert_eq!(fragment_selector(""), None);
        assert_eq!(fragment_selector("/about#team"), None);
    }
}
