use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Document, Element};
use yew::prelude::*;

use crate::config::{DropdownConfig, UiConfig};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownEvent {
    TriggerClick,
    OptionSelected,
    OutsideClick,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownState {
    open: bool,
}

impl DropdownState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn apply(self, event: DropdownEvent) -> Self {
        match event {
            DropdownEvent::TriggerClick => Self { open: !self.open },
            DropdownEvent::OptionSelected | DropdownEvent::OutsideClick => Self { open: false },
        }
    }
}

struct DropdownView {
    menu: Element,
    icon: Option<Element>,
    display: Option<Element>,
    open_class: String,
    rotated_class: String,
    state: Cell<DropdownState>,
}

impl DropdownView {
    fn dispatch(&self, event: DropdownEvent) {
        let next = self.state.get().apply(event);
        self.state.set(next);
        dom::set_class(&self.menu, &self.open_class, next.is_open());
        if let Some(icon) = &self.icon {
            dom::set_class(icon, &self.rotated_class, next.is_open());
        }
    }

    fn select(&self, label: &str) {
        if let Some(display) = &self.display {
            display.set_text_content(Some(label));
        }
        self.dispatch(DropdownEvent::OptionSelected);
    }
}

pub struct Dropdown {
    _listeners: Vec<Listener>,
}

/// Text shown for a chosen option: its label attribute verbatim, else its trimmed text.
pub fn option_label(attribute: Option<String>, text: Option<String>) -> String {
    attribute
        .or_else(|| text.map(|t| t.trim().to_string()))
        .unwrap_or_default()
}

pub fn bind(document: &Document, config: &DropdownConfig) -> Result<Dropdown, ControlError> {
    let trigger = dom::by_id(document, &config.trigger_id)?;
    let menu = dom::by_id(document, &config.menu_id)?;
    let view = Rc::new(DropdownView {
        icon: document.get_element_by_id(&config.icon_id),
        display: document.get_element_by_id(&config.display_id),
        menu,
        open_class: config.open_class.clone(),
        rotated_class: config.rotated_class.clone(),
        state: Cell::new(DropdownState::default()),
    });

    let mut listeners = Vec::new();
    {
        let view = view.clone();
        listeners.push(Listener::new(&trigger, "click", move |e| {
            // Clicks on options bubble up when the menu sits inside the trigger.
            if dom::event_within(&e, &view.menu) {
                return;
            }
            view.dispatch(DropdownEvent::TriggerClick);
        })?);
    }

    for option in dom::query_all(document, &config.option_selector) {
        let view = view.clone();
        let label_attribute = config.label_attribute.clone();
        let source = option.clone();
        listeners.push(Listener::new(&option, "click", move |e| {
            e.prevent_default();
            let label = option_label(source.get_attribute(&label_attribute), source.text_content());
            log::debug!("dropdown option selected: {}", label);
            view.select(&label);
        })?);
    }

    {
        let view = view.clone();
        let trigger = trigger.clone();
        listeners.push(Listener::new(document, "click", move |e| {
            if !dom::event_within(&e, &trigger) {
                view.dispatch(DropdownEvent::OutsideClick);
            }
        })?);
    }

    Ok(Dropdown {
        _listeners: listeners,
    })
}

#[function_component(DropdownController)]
pub fn dropdown_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.dropdown));
            let handle = report("dropdown", handle);
            move || drop(handle)
        },
        props.config.clone(),
    );
    html! {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::DropdownEvent::*;

    #[test]
    fn trigger_toggles() {
        let state = DropdownState::default();
        assert!(!state.is_open());
        let state = state.apply(TriggerClick);
        assert!(state.is_open());
        let state = state.apply(TriggerClick);
        assert!(!state.is_open());
    }

    #[test]
    fn outside_click_always_closes() {
        let sequences: &[&[DropdownEvent]] = &[
            &[],
            &[TriggerClick],
            &[TriggerClick, TriggerClick],
            &[TriggerClick, OptionSelected, TriggerClick],
            &[OutsideClick, TriggerClick, TriggerClick, TriggerClick],
        ];
        for seq in sequences {
            let state = seq
                .iter()
                .fold(DropdownState::default(), |s, e| s.apply(*e));
            assert!(!state.apply(OutsideClick).is_open(), "after {:?}", seq);
        }
    }

    #[test]
    fn selecting_closes_regardless_of_prior_state() {
        let closed = DropdownState::default();
        let open = closed.apply(TriggerClick);
        assert!(!closed.apply(OptionSelected).is_open());
        assert!(!open.apply(OptionSelected).is_open());
    }

    #[test]
    fn closing_is_idempotent() {
        let once = DropdownState::default().apply(OutsideClick);
        let twice = once.apply(OutsideClick);
        assert_eq!(once, twice);
    }

    #[test]
    fn label_attribute_is_used_verbatim() {
        assert_eq!(
            option_label(Some("Batch 3 ".to_string()), Some("  ignored  ".to_string())),
            "Batch 3 "
        );
        assert_eq!(option_label(Some(String::new()), Some("text".to_string())), "");
    }

    #[test]
    fn label_falls_back_to_trimmed_text() {
        assert_eq!(
            option_label(None, Some("\n   Batch 2 (May)\n  ".to_string())),
            "Batch 2 (May)"
        );
        assert_eq!(option_label(None, None), "");
    }
}
