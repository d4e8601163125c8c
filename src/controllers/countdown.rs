use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Datelike, NaiveDateTime, Timelike};
use gloo_timers::callback::Interval;
use web_sys::{Document, Element};
use yew::prelude::*;

use crate::config::{launch_instant_ms, LaunchConfig, UiConfig, COUNTDOWN_TICK_MS};
use crate::controllers::ControllerProps;
use crate::error::{report, ControlError};
use crate::utils::dom;
use crate::utils::format::pad2;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

pub const LIVE_HTML: &str =
    r#"<span class="text-2xl font-bold text-green-400">🎉 We're Live Now!</span>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    /// Splits a non-negative distance in milliseconds into whole units.
    pub fn from_millis(distance: i64) -> Self {
        let distance = distance.max(0);
        Self {
            days: (distance / MS_PER_DAY) as u64,
            hours: ((distance % MS_PER_DAY) / MS_PER_HOUR) as u64,
            minutes: ((distance % MS_PER_HOUR) / MS_PER_MINUTE) as u64,
            seconds: ((distance % MS_PER_MINUTE) / MS_PER_SECOND) as u64,
        }
    }

    pub fn to_html(&self) -> String {
        let cell = |value: String, label: &str| {
            format!(
                r#"<div class="text-center"><div class="text-3xl font-bold text-white">{}</div><div class="text-xs text-gray-300">{}</div></div>"#,
                value, label
            )
        };
        let sep = r#"<div class="text-3xl font-bold text-white">:</div>"#;
        format!(
            r#"<div class="flex gap-4 justify-center">{}{}{}{}{}{}{}</div>"#,
            cell(self.days.to_string(), "Days"),
            sep,
            cell(pad2(self.hours), "Hours"),
            sep,
            cell(pad2(self.minutes), "Minutes"),
            sep,
            cell(pad2(self.seconds), "Seconds"),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Remaining(Remaining),
    /// First tick past the instant: render the live message, then stop.
    Live,
    /// Already live; nothing more to render.
    Stopped,
}

impl Tick {
    pub fn html(&self) -> Option<String> {
        match self {
            Tick::Remaining(r) => Some(r.to_html()),
            Tick::Live => Some(LIVE_HTML.to_string()),
            Tick::Stopped => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CountdownClock {
    target_ms: i64,
    live: bool,
}

impl CountdownClock {
    pub fn new(target_ms: i64) -> Self {
        Self {
            target_ms,
            live: false,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn tick(&mut self, now_ms: i64) -> Tick {
        if self.live {
            return Tick::Stopped;
        }
        let distance = self.target_ms - now_ms;
        if distance < 0 {
            self.live = true;
            Tick::Live
        } else {
            Tick::Remaining(Remaining::from_millis(distance))
        }
    }
}

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// The browser's UTC offset in force at a local wall-clock time, in `getTimezoneOffset` minutes.
fn local_offset_at(at: &NaiveDateTime) -> i32 {
    let local = js_sys::Date::new_with_year_month_day_hr_min_sec(
        at.year() as u32,
        at.month0() as i32,
        at.day() as i32,
        at.hour() as i32,
        at.minute() as i32,
        at.second() as i32,
    );
    local.get_timezone_offset() as i32
}

fn render(el: &Element, clock: &mut CountdownClock) -> bool {
    if let Some(html) = clock.tick(now_ms()).html() {
        el.set_inner_html(&html);
    }
    clock.is_live()
}

pub struct Countdown {
    ticker: Rc<RefCell<Option<Interval>>>,
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.ticker.borrow_mut().take();
    }
}

pub fn bind(document: &Document, config: &LaunchConfig) -> Result<Countdown, ControlError> {
    let el = dom::by_id(document, &config.countdown_id)?;
    let target = launch_instant_ms(&config.launch_at, local_offset_at)?;
    let mut clock = CountdownClock::new(target);
    let ticker: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

    if render(&el, &mut clock) {
        log::info!("launch instant already passed");
        return Ok(Countdown { ticker });
    }

    let slot = ticker.clone();
    let interval = Interval::new(COUNTDOWN_TICK_MS, move || {
        if render(&el, &mut clock) {
            log::info!("countdown reached launch, stopping timer");
            // Cancels the interval; its callback is freed once this call returns.
            slot.borrow_mut().take();
        }
    });
    *ticker.borrow_mut() = Some(interval);

    Ok(Countdown { ticker })
}

#[function_component(CountdownController)]
pub fn countdown_controller(props: &ControllerProps) -> Html {
    use_effect_with_deps(
        |config: &Rc<UiConfig>| {
            let handle = dom::document().and_then(|doc| bind(&doc, &config.launch));
            let handle = report("countdown", handle);
            move || drop(handle)
        },
        props.config.clone(),
    );
    html! {}
}
