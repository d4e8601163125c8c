use std::rc::Rc;

use web_sys::Document;
use yew::prelude::*;

use crate::config::{ScrollProgressConfig, UiConfig};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener};

/// Percentage of the scrollable range already scrolled, always finite and in `[0, 100]`.
/// Pages that don't scroll report 0.
pub fn progress_percent(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn width_value(percent: f64) -> String {
    format!("{}%", percent)
}

pub struct ScrollProgress {
    _listener: Listener,
}

pub fn bind(document: &Document, config: &ScrollProgressConfig) -> Result<ScrollProgress, ControlError> {
    let indicator = dom::by_id(document, &config.indicator_id)?;
    let window = dom::window()?;

    let update = {
        let window = window.clone();
        let document = document.clone();
        move || {
            let percent = progress_percent(
                dom::scroll_top(&window),
                dom::document_height(&document),
                dom::viewport_height(&window),
            );
            dom::set_style(&indicator, "width", &width_value(percent));
        }
    };
    update();

    let listener = Listener::new(&window, "scroll", move |_| update())?;
    Ok(ScrollProgress {
        _listener: listener,
    })
}

#[function_component(ScrollProgressController)]
pub fn scroll_progress_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.scroll_progress));
            let handle = report("scroll progress", handle);
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
    fn page_exactly_one_viewport_tall_is_zero() {
        let p = progress_percent(0.0, 800.0, 800.0);
        assert_eq!(p, 0.0);
        assert_eq!(width_value(p), "0%");
    }

    #[test]
    fn short_page_never_goes_non_finite() {
        assert_eq!(progress_percent(10.0, 500.0, 800.0), 0.0);
        assert_eq!(progress_percent(f64::NAN, 2000.0, 800.0), 0.0);
        assert_eq!(progress_percent(0.0, 800.0 + 1e-12, 800.0), 0.0);
    }

    #[test]
    fn proportional_and_clamped() {
        assert_eq!(progress_percent(600.0, 2000.0, 800.0), 50.0);
        assert_eq!(progress_percent(1200.0, 2000.0, 800.0), 100.0);
        assert_eq!(progress_percent(5000.0, 2000.0, 800.0), 100.0);
        assert_eq!(progress_percent(-40.0, 2000.0, 800.0), 0.0);
        assert_eq!(width_value(progress_percent(300.0, 2000.0, 800.0)), "25%");
    }
}
