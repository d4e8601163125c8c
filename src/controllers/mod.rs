use std::rc::Rc;

use yew::prelude::*;

use crate::config::UiConfig;

pub mod anchor_scroll;
pub mod banner;
pub mod countdown;
pub mod counter;
pub mod dropdown;
pub mod launch_popup;
pub mod mobile_nav;
pub mod navbar;
pub mod page_loaded;
pub mod reveal;
pub mod scroll_progress;
pub mod sidebar;
pub mod slideshow;

/// Every controller component takes the page's markup contract and renders nothing.
#[derive(Properties, PartialEq, Clone)]
pub struct ControllerProps {
    pub config: Rc<UiConfig>,
}
