//! Interactive behaviour for server-rendered pages.
//!
//! The component tree renders no markup of its own. Every controller attaches to elements
//! already in the page (see [`config::UiConfig`] for the ids and selectors it expects) and
//! quietly does nothing when its elements are absent.

use web_sys::{Document, Element};
use yew::prelude::*;

pub mod config;
pub mod controllers;
pub mod error;
pub mod utils;

use crate::config::{UiConfig, MOUNT_ELEMENT_ID};
use crate::controllers::anchor_scroll::AnchorScrollController;
use crate::controllers::banner::BannerController;
use crate::controllers::countdown::CountdownController;
use crate::controllers::dropdown::DropdownController;
use crate::controllers::launch_popup::LaunchPopupController;
use crate::controllers::mobile_nav::MobileNavController;
use crate::controllers::navbar::NavbarController;
use crate::controllers::page_loaded::PageLoadedController;
use crate::controllers::reveal::ScrollRevealController;
use crate::controllers::scroll_progress::ScrollProgressController;
use crate::controllers::sidebar::SidebarController;
use crate::controllers::slideshow::SlideshowController;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo(|_| UiConfig::load(), ());

    html! {
        <>
            <PageLoadedController config={config.clone()} />
            <AnchorScrollController config={config.clone()} />
            <NavbarController config={config.clone()} />
            <DropdownController config={config.clone()} />
            <MobileNavController config={config.clone()} />
            <SidebarController config={config.clone()} />
            <BannerController config={config.clone()} />
            <ScrollRevealController config={config.clone()} />
            <SlideshowController config={config.clone()} />
            <ScrollProgressController config={config.clone()} />
            <CountdownController config={config.clone()} />
            <LaunchPopupController config={config} />
        </>
    }
}

/// Mounts the controllers on `#page-controls`. Yew clears its root, so when the page has no
/// host node an empty one is appended to `<body>` rather than mounting on the body itself.
pub fn mount() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document to mount page controls on");
        return;
    };
    let host = document
        .get_element_by_id(MOUNT_ELEMENT_ID)
        .or_else(|| create_host(&document));
    match host {
        Some(host) => {
            yew::Renderer::<App>::with_root(host).render();
        }
        None => log::error!("No mount point for page controls"),
    }
}

fn create_host(document: &Document) -> Option<Element> {
    let body = document.body()?;
    let host = document.create_element("div").ok()?;
    host.set_id(MOUNT_ELEMENT_ID);
    host.set_attribute("hidden", "").ok()?;
    body.append_child(&host).ok()?;
    Some(host)
}
