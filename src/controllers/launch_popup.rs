use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Document, Element};
use yew::prelude::*;

use crate::config::{
    LaunchConfig, UiConfig, POPUP_ACTIVATE_DELAY_MS, POPUP_DISMISS_MS, POPUP_SHOW_DELAY_MS,
};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener, PendingTimeout};
use crate::utils::storage::{BrowserSession, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupPhase {
    /// Waiting for the show delay.
    Pending,
    /// Displayed, transition not started yet.
    Shown,
    Active,
    Closing,
    /// Hidden for the rest of the session.
    Dismissed,
}

/// One-per-session launch popup lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupFlow {
    phase: PopupPhase,
}

impl PopupFlow {
    pub fn start(store: &dyn SessionStore, key: &str) -> Self {
        let phase = if store.flag(key) {
            PopupPhase::Dismissed
        } else {
            PopupPhase::Pending
        };
        Self { phase }
    }

    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    pub fn will_show(&self) -> bool {
        self.phase == PopupPhase::Pending
    }

    pub fn show(&mut self) -> bool {
        self.advance(PopupPhase::Pending, PopupPhase::Shown)
    }

    pub fn activate(&mut self) -> bool {
        self.advance(PopupPhase::Shown, PopupPhase::Active)
    }

    /// Starts closing and records the dismissal for the session. Returns false when
    /// there is nothing to dismiss.
    pub fn dismiss(&mut self, store: &dyn SessionStore, key: &str) -> bool {
        let next = match self.phase {
            PopupPhase::Shown | PopupPhase::Active => PopupPhase::Closing,
            PopupPhase::Pending => PopupPhase::Dismissed,
            PopupPhase::Closing | PopupPhase::Dismissed => return false,
        };
        self.phase = next;
        store.set(key, "true");
        true
    }

    pub fn finish_closing(&mut self) -> bool {
        self.advance(PopupPhase::Closing, PopupPhase::Dismissed)
    }

    fn advance(&mut self, from: PopupPhase, to: PopupPhase) -> bool {
        if self.phase == from {
            self.phase = to;
            true
        } else {
            false
        }
    }
}

struct PopupView {
    popup: Element,
    card: Option<Element>,
    hidden_class: String,
    visible_class: String,
    card_active_class: String,
    storage_key: String,
    store: BrowserSession,
    flow: Cell<PopupFlow>,
    show_timer: PendingTimeout,
    activate_timer: PendingTimeout,
    hide_timer: PendingTimeout,
}

impl PopupView {
    fn update(&self, step: impl FnOnce(&mut PopupFlow) -> bool) -> bool {
        let mut flow = self.flow.get();
        let changed = step(&mut flow);
        self.flow.set(flow);
        changed
    }

    fn show(self: &Rc<Self>) {
        if !self.update(PopupFlow::show) {
            return;
        }
        dom::remove_class(&self.popup, &self.hidden_class);
        // display change first, then the opacity/transform transition
        let view = self.clone();
        self.activate_timer
            .schedule(POPUP_ACTIVATE_DELAY_MS, move || view.activate());
    }

    fn activate(&self) {
        if !self.update(PopupFlow::activate) {
            return;
        }
        dom::add_class(&self.popup, &self.visible_class);
        if let Some(card) = &self.card {
            dom::add_class(card, &self.card_active_class);
        }
    }

    fn dismiss(self: &Rc<Self>) {
        let store = &self.store;
        let key = &self.storage_key;
        if !self.update(|flow| flow.dismiss(store, key)) {
            return;
        }
        log::debug!("launch popup dismissed");
        self.show_timer.cancel();
        self.activate_timer.cancel();
        dom::remove_class(&self.popup, &self.visible_class);
        if let Some(card) = &self.card {
            dom::remove_class(card, &self.card_active_class);
        }
        let view = self.clone();
        self.hide_timer.schedule(POPUP_DISMISS_MS, move || {
            if view.update(PopupFlow::finish_closing) {
                dom::add_class(&view.popup, &view.hidden_class);
            }
        });
    }

    fn cancel_timers(&self) {
        self.show_timer.cancel();
        self.activate_timer.cancel();
        self.hide_timer.cancel();
    }
}

pub struct LaunchPopup {
    _listeners: Vec<Listener>,
    view: Rc<PopupView>,
}

impl Drop for LaunchPopup {
    fn drop(&mut self) {
        self.view.cancel_timers();
    }
}

pub fn bind(document: &Document, config: &LaunchConfig) -> Result<LaunchPopup, ControlError> {
    let popup = dom::by_id(document, &config.popup_id)?;
    let card = popup.query_selector(&config.card_selector).ok().flatten();
    let close = document.get_element_by_id(&config.close_id);
    let store = BrowserSession::open();
    let flow = PopupFlow::start(&store, &config.storage_key);

    let view = Rc::new(PopupView {
        popup: popup.clone(),
        card,
        hidden_class: config.hidden_class.clone(),
        visible_class: config.visible_class.clone(),
        card_active_class: config.card_active_class.clone(),
        storage_key: config.storage_key.clone(),
        store,
        flow: Cell::new(flow),
        show_timer: PendingTimeout::default(),
        activate_timer: PendingTimeout::default(),
        hide_timer: PendingTimeout::default(),
    });

    if flow.will_show() {
        let pending = view.clone();
        view.show_timer
            .schedule(POPUP_SHOW_DELAY_MS, move || pending.show());
    } else {
        log::debug!("launch popup already dismissed this session");
    }

    let mut listeners = Vec::new();
    if let Some(close) = close {
        let view = view.clone();
        listeners.push(Listener::new(&close, "click", move |_| view.dismiss())?);
    }
    {
        let view = view.clone();
        listeners.push(Listener::new(&popup, "click", move |e| {
            // only the backdrop itself, not clicks inside the card
            if dom::event_on(&e, &view.popup) {
                view.dismiss();
            }
        })?);
    }

    Ok(LaunchPopup {
        _listeners: listeners,
        view,
    })
}

#[function_component(LaunchPopupController)]
pub fn launch_popup_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.launch));
            let handle = report("launch popup", handle);
            move || drop(handle)
        },
        props.config.clone(),
    );
    html! {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;

    const KEY: &str = "popupDismissed";

    #[test]
    fn fresh_session_shows_then_activates() {
        let store = MemoryStore::default();
        let mut flow = PopupFlow::start(&store, KEY);
        assert!(flow.will_show());
        assert!(!flow.activate(), "cannot activate before it is shown");
        assert!(flow.show());
        assert!(flow.activate());
        assert_eq!(flow.phase(), PopupPhase::Active);
    }

    #[test]
    fn dismissal_survives_reload_in_same_session() {
        let session = MemoryStore::default();
        let mut first = PopupFlow::start(&session, KEY);
        first.show();
        first.activate();
        assert!(first.dismiss(&session, KEY));
        assert_eq!(first.phase(), PopupPhase::Closing);
        assert!(first.finish_closing());
        assert_eq!(first.phase(), PopupPhase::Dismissed);

        let reloaded = PopupFlow::start(&session, KEY);
        assert!(!reloaded.will_show());

        let new_session = MemoryStore::default();
        assert!(PopupFlow::start(&new_session, KEY).will_show());
    }

    #[test]
    fn dismiss_is_idempotent() {
        let store = MemoryStore::default();
        let mut flow = PopupFlow::start(&store, KEY);
        flow.show();
        assert!(flow.dismiss(&store, KEY));
        assert!(!flow.dismiss(&store, KEY));
        flow.finish_closing();
        assert!(!flow.dismiss(&store, KEY));
        assert!(!flow.show());
    }

    #[test]
    fn activation_after_dismiss_is_ignored() {
        let store = MemoryStore::default();
        let mut flow = PopupFlow::start(&store, KEY);
        flow.show();
        flow.dismiss(&store, KEY);
        assert!(!flow.activate());
        assert_eq!(flow.phase(), PopupPhase::Closing);
    }

    #[test]
    fn dismiss_before_show_skips_closing() {
        let store = MemoryStore::default();
        let mut flow = PopupFlow::start(&store, KEY);
        assert!(flow.dismiss(&store, KEY));
        assert_eq!(flow.phase(), PopupPhase::Dismissed);
        assert!(!flow.show());
        assert!(store.flag(KEY));
    }
}
