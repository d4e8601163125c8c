use std::rc::Rc;

use web_sys::Document;
use yew::prelude::*;

use crate::config::{PageConfig, UiConfig};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener};

pub fn already_loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}

/// Adds the loaded marker to `<body>` once the window has finished loading. Holds a
/// listener only if that hasn't happened yet.
pub fn bind(document: &Document, config: &PageConfig) -> Result<Option<Listener>, ControlError> {
    let body = document
        .body()
        .ok_or_else(|| ControlError::MissingElement("body".to_string()))?;

    if already_loaded(&document.ready_state()) {
        dom::add_class(&body, &config.loaded_class);
        return Ok(None);
    }

    let window = dom::window()?;
    let class = config.loaded_class.clone();
    let listener = Listener::new(&window, "load", move |_| {
        dom::add_class(&body, &class);
    })?;
    Ok(Some(listener))
}

#[function_component(PageLoadedController)]
pub fn page_loaded_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.page));
            let handle = report("page loaded marker", handle);
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
    fn only_complete_counts_as_loaded() {
        assert!(already_loaded("complete"));
        assert!(!already_loaded("interactive"));
        assert!(!already_loaded("loading"));
    }
}
