use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use web_sys::Document;

use crate::error::ControlError;

/// Id of the optional inline JSON block that overrides the default markup contract.
pub const CONFIG_ELEMENT_ID: &str = "page-controls-config";
/// Node the (markup-less) component tree is mounted on.
pub const MOUNT_ELEMENT_ID: &str = "page-controls";

// Timing contract. These are part of the visible behaviour and are not configurable.
pub const BANNER_EXIT_MS: u32 = 300;
pub const NAV_TRANSITION_MS: u32 = 300;
pub const NAV_OVERLAY_FADE_IN_DELAY_MS: u32 = 10;
pub const POPUP_SHOW_DELAY_MS: u32 = 1_000;
pub const POPUP_ACTIVATE_DELAY_MS: u32 = 50;
pub const POPUP_DISMISS_MS: u32 = 300;
pub const SLIDESHOW_INTERVAL_MS: u32 = 4_000;
pub const COUNTDOWN_TICK_MS: u32 = 1_000;
pub const REVEAL_FALLBACK_DELAY_MS: u32 = 100;
/// Counters climb by `target / COUNTER_STEPS` per animation frame.
pub const COUNTER_STEPS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DropdownConfig {
    pub trigger_id: String,
    pub menu_id: String,
    pub icon_id: String,
    pub display_id: String,
    pub option_selector: String,
    pub label_attribute: String,
    pub open_class: String,
    pub rotated_class: String,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            trigger_id: "batchDropdown".to_string(),
            menu_id: "batchMenu".to_string(),
            icon_id: "dropdownIcon".to_string(),
            display_id: "selectedBatch".to_string(),
            option_selector: ".batch-option".to_string(),
            label_attribute: "data-batch".to_string(),
            open_class: "active".to_string(),
            rotated_class: "rotate-180".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MobileNavConfig {
    pub button_id: String,
    pub panel_id: String,
    pub close_id: String,
    pub overlay_id: String,
    pub open_class: String,
    pub overlay_hidden_class: String,
    pub overlay_visible_class: String,
    pub overlay_inert_class: String,
}

impl Default for MobileNavConfig {
    fn default() -> Self {
        Self {
            button_id: "mobile-menu-btn".to_string(),
            panel_id: "mobile-menu".to_string(),
            close_id: "mobile-menu-close".to_string(),
            overlay_id: "mobile-menu-overlay".to_string(),
            open_class: "active".to_string(),
            overlay_hidden_class: "hidden".to_string(),
            overlay_visible_class: "opacity-100".to_string(),
            overlay_inert_class: "pointer-events-none".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub close_id: String,
    pub banner_id: String,
    pub exit_animation: String,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            close_id: "closeBanner".to_string(),
            banner_id: "announcementBanner".to_string(),
            exit_animation: "slideUp 0.3s ease-out".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub counter_selector: String,
    pub counter_target_attribute: String,
    pub hidden_offset_px: u32,
    pub threshold: f64,
    pub root_margin: String,
    pub fallback: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".animate-fade-in-up, .animate-fade-in-left, .animate-fade-in-right"
                .to_string(),
            counter_selector: ".counter".to_string(),
            counter_target_attribute: "data-target".to_string(),
            hidden_offset_px: 30,
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            fallback: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    pub slide_selector: String,
    pub indicator_selector: String,
    pub active_class: String,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            slide_selector: ".slide".to_string(),
            indicator_selector: ".slideshow-dot".to_string(),
            active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollProgressConfig {
    pub indicator_id: String,
}

impl Default for ScrollProgressConfig {
    fn default() -> Self {
        Self {
            indicator_id: "scrollIndicator".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// ISO-8601 instant. Without an offset it is read in the browser's local time.
    pub launch_at: String,
    pub countdown_id: String,
    pub popup_id: String,
    pub card_selector: String,
    pub close_id: String,
    pub storage_key: String,
    pub hidden_class: String,
    pub visible_class: String,
    pub card_active_class: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            launch_at: "2026-03-01T00:00:00".to_string(),
            countdown_id: "countdown".to_string(),
            popup_id: "launch-popup".to_string(),
            card_selector: ".popup-card".to_string(),
            close_id: "close-popup-btn".to_string(),
            storage_key: "popupDismissed".to_string(),
            hidden_class: "hidden".to_string(),
            visible_class: "opacity-100".to_string(),
            card_active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub selector: String,
    pub scrolled_class: String,
    pub resting_class: String,
    pub threshold_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: "nav".to_string(),
            scrolled_class: "bg-white/98".to_string(),
            resting_class: "bg-white/95".to_string(),
            threshold_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub anchor_selector: String,
    pub sidebar_item_selector: String,
    pub sidebar_active_class: String,
    pub loaded_class: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".to_string(),
            sidebar_item_selector: ".sidebar-item".to_string(),
            sidebar_active_class: "active".to_string(),
            loaded_class: "loaded".to_string(),
        }
    }
}

/// Markup contract for every controller, plus the launch instant.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub dropdown: DropdownConfig,
    pub mobile_nav: MobileNavConfig,
    pub banner: BannerConfig,
    pub reveal: RevealConfig,
    pub slideshow: SlideshowConfig,
    pub scroll_progress: ScrollProgressConfig,
    pub launch: LaunchConfig,
    pub navbar: NavbarConfig,
    pub page: PageConfig,
}

impl UiConfig {
    pub fn from_json(raw: &str) -> Result<Self, ControlError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads overrides from the inline config block, if the page has one.
    pub fn from_document(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring page-controls config: {}", e);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        match web_sys::window().and_then(|w| w.document()) {
            Some(document) => Self::from_document(&document),
            None => Self::default(),
        }
    }
}

/// Converts the configured launch instant to epoch milliseconds.
///
/// `offset_at` follows `Date.prototype.getTimezoneOffset`: minutes to add to local time to
/// get UTC, as in force at the given local wall-clock time. It is only consulted when `raw`
/// carries no offset of its own, so a launch across a DST change uses the launch date's offset.
pub fn launch_instant_ms<F>(raw: &str, offset_at: F) -> Result<i64, ControlError>
where
    F: FnOnce(&NaiveDateTime) -> i32,
{
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.timestamp_millis());
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|e| ControlError::InvalidInstant(format!("{}: {}", raw, e)))?;
    let offset_minutes = offset_at(&naive);
    Ok(naive.and_utc().timestamp_millis() + i64::from(offset_minutes) * 60_000)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn defaults_match_page_markup() {
        let config = UiConfig::default();
        assert_eq!(config.dropdown.trigger_id, "batchDropdown");
        assert_eq!(config.launch.storage_key, "popupDismissed");
        assert_eq!(config.reveal.root_margin, "0px 0px -50px 0px");
        assert_eq!(config.reveal.hidden_offset_px, 30);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = UiConfig::from_json(
            r#"{"launch": {"launch_at": "2030-01-01T00:00:00Z"}, "slideshow": {"slide_selector": ".hero-slide"}}"#,
        )
        .unwrap();
        assert_eq!(config.launch.launch_at, "2030-01-01T00:00:00Z");
        assert_eq!(config.launch.popup_id, "launch-popup");
        assert_eq!(config.slideshow.slide_selector, ".hero-slide");
        assert_eq!(config.slideshow.indicator_selector, ".slideshow-dot");
        assert_eq!(config.dropdown, DropdownConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = UiConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ControlError::InvalidConfig(_)));
        assert!(!err.is_absent_markup());
    }

    #[test]
    fn instant_with_offset_ignores_local_offset() {
        let ms = launch_instant_ms("1970-01-01T00:00:10Z", |_| 120).unwrap();
        assert_eq!(ms, 10_000);
        let ms = launch_instant_ms("1970-01-01T02:00:00+02:00", |_| -300).unwrap();
        assert_eq!(ms, 0);
    }

    #[test]
    fn explicit_offset_never_asks_for_local_offset() {
        let ms = launch_instant_ms("2026-03-01T00:00:00Z", |_| panic!("offset looked up")).unwrap();
        assert_eq!(ms, 1_772_323_200_000);
    }

    #[test]
    fn naive_instant_is_local_time() {
        // UTC-5 reports an offset of +300 minutes.
        let ms = launch_instant_ms("1970-01-01T00:00:00", |_| 300).unwrap();
        assert_eq!(ms, 300 * 60_000);
        let ms = launch_instant_ms("1970-01-01T01:00", |_| -60).unwrap();
        assert_eq!(ms, 0);
    }

    #[test]
    fn naive_instant_uses_offset_of_launch_date() {
        // New York: EDT (+240) in October, EST (+300) by March.
        let new_york = |at: &NaiveDateTime| if at.month() >= 4 && at.month() <= 10 { 240 } else { 300 };
        let mut asked = None;
        let ms = launch_instant_ms("2026-03-01T00:00:00", |at| {
            asked = Some(*at);
            new_york(at)
        })
        .unwrap();
        assert_eq!(
            asked.map(|at| (at.year(), at.month(), at.day(), at.hour())),
            Some((2026, 3, 1, 0))
        );
        // 2026-03-01T05:00:00Z
        assert_eq!(ms, 1_772_323_200_000 + 5 * 3_600_000);
    }

    #[test]
    fn garbage_instant_is_rejected() {
        assert!(matches!(
            launch_instant_ms("next tuesday", |_| 0),
            Err(ControlError::InvalidInstant(_))
        ));
    }
}
