use std::rc::Rc;

use web_sys::Document;
use yew::prelude::*;

use crate::config::{PageConfig, UiConfig};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener};

pub struct Sidebar {
    _listeners: Vec<Listener>,
}

/// Which of `len` items carry the active class after item `clicked` is clicked.
pub fn active_flags(len: usize, clicked: usize) -> Vec<bool> {
    (0..len).map(|i| i == clicked).collect()
}

/// Highlights the clicked sidebar item. Navigation proceeds as normal.
pub fn bind(document: &Document, config: &PageConfig) -> Result<Sidebar, ControlError> {
    let items = Rc::new(dom::query_all(document, &config.sidebar_item_selector));
    if items.is_empty() {
        return Err(ControlError::MissingElement(config.sidebar_item_selector.clone()));
    }

    let mut listeners = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let items = items.clone();
        let active = config.sidebar_active_class.clone();
        listeners.push(Listener::new(item, "click", move |_| {
            for (other, on) in items.iter().zip(active_flags(items.len(), index)) {
                dom::set_class(other, &active, on);
            }
        })?);
    }

    Ok(Sidebar {
        _listeners: listeners,
    })
}

#[function_component(SidebarController)]
pub fn sidebar_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.page));
            let handle = report("sidebar", handle);
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
    fn exactly_the_clicked_item_is_active() {
        for len in 1..6 {
            for clicked in 0..len {
                let flags = active_flags(len, clicked);
                assert_eq!(flags.len(), len);
                assert_eq!(flags.iter().filter(|on| **on).count(), 1);
                assert!(flags[clicked]);
            }
        }
    }

    #[test]
    fn clicking_another_item_moves_the_highlight() {
        assert_eq!(active_flags(3, 0), vec![true, false, false]);
        assert_eq!(active_flags(3, 2), vec![false, false, true]);
    }
}
