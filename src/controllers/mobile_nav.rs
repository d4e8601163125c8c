use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Document, Element};
use yew::prelude::*;

use crate::config::{MobileNavConfig, UiConfig, NAV_OVERLAY_FADE_IN_DELAY_MS, NAV_TRANSITION_MS};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener, PendingTimeout};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    MenuButton,
    CloseButton,
    OverlayClick,
    OutsideClick,
    LinkClick,
}

impl NavState {
    pub fn apply(self, event: NavEvent) -> Self {
        match event {
            NavEvent::MenuButton => NavState::Open,
            NavEvent::CloseButton
            | NavEvent::OverlayClick
            | NavEvent::OutsideClick
            | NavEvent::LinkClick => NavState::Closed,
        }
    }
}

/// Where the overlay is in its fade cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayPhase {
    #[default]
    Hidden,
    /// Displayed but transparent, for the frame before the fade-in starts.
    FadingIn,
    Visible,
    FadingOut,
}

/// Which overlay classes are present in a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayClasses {
    pub hidden: bool,
    pub visible: bool,
    pub inert: bool,
}

impl OverlayPhase {
    pub fn classes(self) -> OverlayClasses {
        match self {
            OverlayPhase::Hidden => OverlayClasses {
                hidden: true,
                visible: false,
                inert: true,
            },
            OverlayPhase::FadingIn => OverlayClasses {
                hidden: false,
                visible: false,
                inert: false,
            },
            OverlayPhase::Visible => OverlayClasses {
                hidden: false,
                visible: true,
                inert: false,
            },
            OverlayPhase::FadingOut => OverlayClasses {
                hidden: false,
                visible: false,
                inert: true,
            },
        }
    }

    /// The phase a pending fade timer settles into, if any.
    pub fn settled(self) -> Option<OverlayPhase> {
        match self {
            OverlayPhase::FadingIn => Some(OverlayPhase::Visible),
            OverlayPhase::FadingOut => Some(OverlayPhase::Hidden),
            OverlayPhase::Hidden | OverlayPhase::Visible => None,
        }
    }
}

#[derive(Clone)]
struct OverlayStyle {
    hidden_class: String,
    visible_class: String,
    inert_class: String,
}

impl OverlayStyle {
    fn paint(&self, el: &Element, phase: OverlayPhase) {
        let classes = phase.classes();
        dom::set_class(el, &self.hidden_class, classes.hidden);
        dom::set_class(el, &self.visible_class, classes.visible);
        dom::set_class(el, &self.inert_class, classes.inert);
    }
}

struct Overlay {
    el: Element,
    style: OverlayStyle,
    fade: PendingTimeout,
}

impl Overlay {
    // display must apply before the opacity transition starts
    fn show(&self) {
        self.enter(OverlayPhase::FadingIn, NAV_OVERLAY_FADE_IN_DELAY_MS);
    }

    fn hide(&self) {
        self.enter(OverlayPhase::FadingOut, NAV_TRANSITION_MS);
    }

    fn enter(&self, phase: OverlayPhase, settle_after_ms: u32) {
        self.style.paint(&self.el, phase);
        if let Some(settled) = phase.settled() {
            let el = self.el.clone();
            let style = self.style.clone();
            self.fade.schedule(settle_after_ms, move || style.paint(&el, settled));
        }
    }
}

struct NavView {
    panel: Element,
    open_class: String,
    overlay: Option<Overlay>,
    state: Cell<NavState>,
}

impl NavView {
    fn dispatch(&self, event: NavEvent) {
        let current = self.state.get();
        let next = current.apply(event);
        if next == current {
            return;
        }
        log::debug!("mobile nav {:?} -> {:?} ({:?})", current, next, event);
        self.state.set(next);
        match next {
            NavState::Open => {
                dom::add_class(&self.panel, &self.open_class);
                if let Some(overlay) = &self.overlay {
                    overlay.show();
                }
            }
            NavState::Closed => {
                dom::remove_class(&self.panel, &self.open_class);
                if let Some(overlay) = &self.overlay {
                    overlay.hide();
                }
            }
        }
    }
}

pub struct MobileNav {
    _listeners: Vec<Listener>,
    view: Rc<NavView>,
}

impl Drop for MobileNav {
    fn drop(&mut self) {
        if let Some(overlay) = &self.view.overlay {
            overlay.fade.cancel();
        }
    }
}

pub fn bind(document: &Document, config: &MobileNavConfig) -> Result<MobileNav, ControlError> {
    let button = dom::by_id(document, &config.button_id)?;
    let panel = dom::by_id(document, &config.panel_id)?;
    let close = dom::by_id(document, &config.close_id)?;
    let overlay = document.get_element_by_id(&config.overlay_id).map(|el| {
        let style = OverlayStyle {
            hidden_class: config.overlay_hidden_class.clone(),
            visible_class: config.overlay_visible_class.clone(),
            inert_class: config.overlay_inert_class.clone(),
        };
        style.paint(&el, OverlayPhase::Hidden);
        Overlay {
            el,
            style,
            fade: PendingTimeout::default(),
        }
    });
    let view = Rc::new(NavView {
        panel: panel.clone(),
        open_class: config.open_class.clone(),
        overlay,
        state: Cell::new(NavState::Closed),
    });

    let mut listeners = Vec::new();
    {
        let view = view.clone();
        listeners.push(Listener::new(&button, "click", move |_| {
            view.dispatch(NavEvent::MenuButton);
        })?);
    }
    {
        let view = view.clone();
        listeners.push(Listener::new(&close, "click", move |_| {
            view.dispatch(NavEvent::CloseButton);
        })?);
    }
    if let Some(overlay) = &view.overlay {
        let overlay_el = overlay.el.clone();
        let view = view.clone();
        listeners.push(Listener::new(&overlay_el, "click", move |_| {
            view.dispatch(NavEvent::OverlayClick);
        })?);
    }
    for link in dom::query_all_within(&panel, "a") {
        let view = view.clone();
        listeners.push(Listener::new(&link, "click", move |_| {
            view.dispatch(NavEvent::LinkClick);
        })?);
    }
    {
        let view = view.clone();
        listeners.push(Listener::new(document, "click", move |e| {
            if view.state.get() == NavState::Open
                && !dom::event_within(&e, &view.panel)
                && !dom::event_within(&e, &button)
            {
                view.dispatch(NavEvent::OutsideClick);
            }
        })?);
    }

    Ok(MobileNav {
        _listeners: listeners,
        view,
    })
}

#[function_component(MobileNavController)]
pub fn mobile_nav_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.mobile_nav));
            let handle = report("mobile nav", handle);
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
    fn menu_button_opens() {
        assert_eq!(NavState::Closed.apply(NavEvent::MenuButton), NavState::Open);
        assert_eq!(NavState::Open.apply(NavEvent::MenuButton), NavState::Open);
    }

    #[test]
    fn every_dismiss_path_closes() {
        for event in [
            NavEvent::CloseButton,
            NavEvent::OverlayClick,
            NavEvent::OutsideClick,
            NavEvent::LinkClick,
        ] {
            assert_eq!(NavState::Open.apply(event), NavState::Closed, "{:?}", event);
            assert_eq!(NavState::Closed.apply(event), NavState::Closed, "{:?}", event);
        }
    }

    #[test]
    fn starts_closed() {
        assert_eq!(NavState::default(), NavState::Closed);
    }

    const PHASES: [OverlayPhase; 4] = [
        OverlayPhase::Hidden,
        OverlayPhase::FadingIn,
        OverlayPhase::Visible,
        OverlayPhase::FadingOut,
    ];

    #[test]
    fn overlay_is_inert_unless_shown() {
        for phase in PHASES {
            let classes = phase.classes();
            if classes.hidden || phase == OverlayPhase::FadingOut {
                assert!(classes.inert, "{:?}", phase);
            }
            if classes.visible {
                assert!(!classes.hidden && !classes.inert, "{:?}", phase);
            }
        }
    }

    #[test]
    fn fades_settle_into_rest_phases() {
        assert_eq!(OverlayPhase::FadingIn.settled(), Some(OverlayPhase::Visible));
        assert_eq!(OverlayPhase::FadingOut.settled(), Some(OverlayPhase::Hidden));
        assert_eq!(OverlayPhase::Hidden.settled(), None);
        assert_eq!(OverlayPhase::Visible.settled(), None);
        assert_eq!(OverlayPhase::default(), OverlayPhase::Hidden);
    }

    #[test]
    fn fade_in_is_displayed_before_it_is_opaque() {
        let classes = OverlayPhase::FadingIn.classes();
        assert!(!classes.hidden);
        assert!(!classes.visible);
    }
}
