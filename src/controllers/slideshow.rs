use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use web_sys::{Document, Element};
use yew::prelude::*;

use crate::config::{SlideshowConfig, UiConfig, SLIDESHOW_INTERVAL_MS};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener};

/// Index of the active slide. Always in `0..len`, `len` never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideCursor {
    index: usize,
    len: usize,
}

impl SlideCursor {
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { index: 0, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(self) -> Self {
        Self {
            index: (self.index + 1) % self.len,
            ..self
        }
    }

    /// Jumps to `index`; out-of-range indicators are ignored.
    pub fn select(self, index: usize) -> Self {
        if index < self.len {
            Self { index, ..self }
        } else {
            self
        }
    }
}

pub fn indicator_opacity(indicator: usize, active: usize) -> &'static str {
    if indicator == active {
        "1"
    } else {
        "0.5"
    }
}

struct SlideshowView {
    slides: Vec<Element>,
    indicators: Vec<Element>,
    active_class: String,
    cursor: Cell<SlideCursor>,
}

impl SlideshowView {
    fn show(&self, cursor: SlideCursor) {
        self.cursor.set(cursor);
        let active = cursor.index();
        for (i, slide) in self.slides.iter().enumerate() {
            dom::set_class(slide, &self.active_class, i == active);
        }
        for (i, indicator) in self.indicators.iter().enumerate() {
            dom::set_style(indicator, "opacity", indicator_opacity(i, active));
        }
    }

    fn advance(&self) {
        self.show(self.cursor.get().advance());
    }
}

pub struct Slideshow {
    _ticker: Interval,
    _listeners: Vec<Listener>,
}

pub fn bind(document: &Document, config: &SlideshowConfig) -> Result<Slideshow, ControlError> {
    let slides = dom::query_all(document, &config.slide_selector);
    let cursor = SlideCursor::new(slides.len())
        .ok_or_else(|| ControlError::MissingElement(config.slide_selector.clone()))?;
    let indicators = dom::query_all(document, &config.indicator_selector);

    let view = Rc::new(SlideshowView {
        slides,
        indicators: indicators.clone(),
        active_class: config.active_class.clone(),
        cursor: Cell::new(cursor),
    });
    view.show(cursor);

    let mut listeners = Vec::new();
    for (index, indicator) in indicators.iter().enumerate() {
        let view = view.clone();
        // Manual picks leave the ticker's cadence alone.
        listeners.push(Listener::new(indicator, "click", move |_| {
            view.show(view.cursor.get().select(index));
        })?);
    }

    let ticker = {
        let view = view.clone();
        Interval::new(SLIDESHOW_INTERVAL_MS, move || view.advance())
    };

    Ok(Slideshow {
        _ticker: ticker,
        _listeners: listeners,
    })
}

#[function_component(SlideshowController)]
pub fn slideshow_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.slideshow));
            let handle = report("slideshow", handle);
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
    fn empty_slideshow_has_no_cursor() {
        assert!(SlideCursor::new(0).is_none());
    }

    #[test]
    fn advancing_wraps_modulo_slide_count() {
        for k in 1..=5 {
            let mut cursor = SlideCursor::new(k).unwrap();
            for n in 1..=17 {
                cursor = cursor.advance();
                assert_eq!(cursor.index(), n % k);
            }
        }
    }

    #[test]
    fn select_jumps_and_ignores_out_of_range() {
        let cursor = SlideCursor::new(3).unwrap();
        assert_eq!(cursor.select(2).index(), 2);
        assert_eq!(cursor.select(2).advance().index(), 0);
        assert_eq!(cursor.select(7).index(), 0);
    }

    #[test]
    fn exactly_one_indicator_is_opaque() {
        for active in 0..4 {
            let opaque = (0..4)
                .filter(|i| indicator_opacity(*i, active) == "1")
                .count();
            assert_eq!(opaque, 1);
        }
        assert_eq!(indicator_opacity(1, 0), "0.5");
    }
}
