use std::rc::Rc;

use web_sys::Document;
use yew::prelude::*;

use crate::config::{NavbarConfig, UiConfig};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener};

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub struct NavbarShade {
    _listener: Listener,
}

pub fn bind(document: &Document, config: &NavbarConfig) -> Result<NavbarShade, ControlError> {
    let navbar = document
        .query_selector(&config.selector)
        .ok()
        .flatten()
        .ok_or_else(|| ControlError::MissingElement(config.selector.clone()))?;
    let window = dom::window()?;

    let update = {
        let window = window.clone();
        let config = config.clone();
        move || {
            let scrolled = is_scrolled(dom::scroll_top(&window), config.threshold_px);
            dom::set_class(&navbar, &config.scrolled_class, scrolled);
            dom::set_class(&navbar, &config.resting_class, !scrolled);
        }
    };
    update();

    Ok(NavbarShade {
        _listener: Listener::new(&window, "scroll", move |_| update())?,
    })
}

#[function_component(NavbarController)]
pub fn navbar_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.navbar));
            let handle = report("navbar", handle);
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
    fn threshold_is_exclusive() {
        assert!(!is_scrolled(0.0, 100.0));
        assert!(!is_scrolled(100.0, 100.0));
        assert!(is_scrolled(100.5, 100.0));
    }
}
