use std::cell::Cell;
use std::rc::Rc;

use web_sys::Document;
use yew::prelude::*;

use crate::config::{BannerConfig, UiConfig, BANNER_EXIT_MS};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom::{self, Listener, PendingTimeout};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BannerState {
    #[default]
    Shown,
    Exiting,
    Removed,
}

impl BannerState {
    /// Starts the exit. Only a shown banner can start exiting, so repeat clicks don't
    /// restart the animation.
    pub fn dismiss(self) -> Option<Self> {
        match self {
            BannerState::Shown => Some(BannerState::Exiting),
            _ => None,
        }
    }

    pub fn finish(self) -> Self {
        match self {
            BannerState::Exiting | BannerState::Removed => BannerState::Removed,
            BannerState::Shown => BannerState::Shown,
        }
    }
}

pub struct Banner {
    _listener: Listener,
    removal: PendingTimeout,
}

impl Drop for Banner {
    fn drop(&mut self) {
        self.removal.cancel();
    }
}

pub fn bind(document: &Document, config: &BannerConfig) -> Result<Banner, ControlError> {
    let close = dom::by_id(document, &config.close_id)?;
    let banner = dom::by_id(document, &config.banner_id)?;
    let state = Rc::new(Cell::new(BannerState::Shown));
    let removal = PendingTimeout::default();

    let listener = {
        let removal = removal.clone();
        let animation = config.exit_animation.clone();
        Listener::new(&close, "click", move |_| {
            let Some(next) = state.get().dismiss() else {
                return;
            };
            state.set(next);
            dom::set_style(&banner, "animation", &animation);
            let banner = banner.clone();
            let state = state.clone();
            removal.schedule(BANNER_EXIT_MS, move || {
                dom::set_style(&banner, "display", "none");
                state.set(state.get().finish());
            });
        })?
    };

    Ok(Banner {
        _listener: listener,
        removal,
    })
}

#[function_component(BannerController)]
pub fn banner_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.banner));
            let handle = report("banner", handle);
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
    fn dismiss_runs_once() {
        let exiting = BannerState::Shown.dismiss().unwrap();
        assert_eq!(exiting, BannerState::Exiting);
        assert_eq!(exiting.dismiss(), None);
        assert_eq!(exiting.finish(), BannerState::Removed);
        assert_eq!(BannerState::Removed.dismiss(), None);
    }

    #[test]
    fn finish_without_dismiss_keeps_banner() {
        assert_eq!(BannerState::Shown.finish(), BannerState::Shown);
    }
}
