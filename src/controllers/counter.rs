//! Animated number counters.
//!
//! A counter climbs from 0 to its target in `target / 100` increments, one per animation
//! frame. Intermediate frames never show more than the target and the final frame shows the
//! exact target, so float drift cannot leak into the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use crate::config::COUNTER_STEPS;
use crate::utils::format::{group_thousands, parse_leading_int};

const STATE_ATTRIBUTE: &str = "data-counter-state";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFrame {
    Show(u64),
    Done(u64),
}

impl CounterFrame {
    pub fn text(&self) -> String {
        match self {
            CounterFrame::Show(v) | CounterFrame::Done(v) => group_thousands(*v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            increment: target as f64 / COUNTER_STEPS,
            current: 0.0,
        }
    }

    pub fn step(&mut self) -> CounterFrame {
        if self.current < self.target as f64 {
            self.current += self.increment;
            CounterFrame::Show((self.current.floor() as u64).min(self.target))
        } else {
            CounterFrame::Done(self.target)
        }
    }
}

/// Starts the animation on every counter element that isn't already running or finished.
pub fn animate_all(window: &Window, counters: Vec<Element>, target_attribute: &str) {
    for counter in counters {
        if counter.has_attribute(STATE_ATTRIBUTE) {
            continue;
        }
        let raw = counter.get_attribute(target_attribute).unwrap_or_default();
        match parse_leading_int(&raw) {
            Some(target) => animate(window, counter, target),
            None => log::warn!("counter has unusable {}={:?}", target_attribute, raw),
        }
    }
}

fn render(counter: &Element, frame: CounterFrame) -> bool {
    counter.set_text_content(Some(&frame.text()));
    match frame {
        CounterFrame::Show(_) => false,
        CounterFrame::Done(_) => {
            let _ = counter.set_attribute(STATE_ATTRIBUTE, "done");
            true
        }
    }
}

fn animate(window: &Window, counter: Element, target: u64) {
    let mut animation = CounterAnimation::new(target);
    let _ = counter.set_attribute(STATE_ATTRIBUTE, "running");
    if render(&counter, animation.step()) {
        return;
    }

    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let win = window.clone();
    *frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
        if render(&counter, animation.step()) {
            // Release the closure; it is freed once this call returns.
            next.borrow_mut().take();
            return;
        }
        let scheduled = next.borrow();
        if let Some(cb) = scheduled.as_ref() {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }));

    let first = frame.borrow();
    if let Some(cb) = first.as_ref() {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(target: u64) -> Vec<CounterFrame> {
        let mut animation = CounterAnimation::new(target);
        let mut frames = Vec::new();
        loop {
            let frame = animation.step();
            frames.push(frame);
            if let CounterFrame::Done(_) = frame {
                return frames;
            }
            assert!(frames.len() < 1_000, "animation never finished");
        }
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let frames = run(0);
        assert_eq!(frames, vec![CounterFrame::Done(0)]);
        assert_eq!(frames[0].text(), "0");
    }

    #[test]
    fn thousand_lands_exactly_and_never_overshoots() {
        let frames = run(1_000);
        let last = *frames.last().unwrap();
        assert_eq!(last, CounterFrame::Done(1_000));
        assert_eq!(last.text(), "1,000");
        let mut previous = 0;
        for frame in &frames {
            if let CounterFrame::Show(v) = frame {
                assert!(*v <= 1_000);
                assert!(*v >= previous);
                previous = *v;
            }
        }
        assert_eq!(frames.len(), 101);
    }

    #[test]
    fn uneven_targets_are_clamped() {
        for target in [1, 3, 7, 99, 101, 12_345, 999_999] {
            let frames = run(target);
            assert_eq!(*frames.last().unwrap(), CounterFrame::Done(target));
            assert!(frames
                .iter()
                .all(|f| matches!(f, CounterFrame::Show(v) | CounterFrame::Done(v) if *v <= target)));
            assert!(frames.len() <= 103, "target {} took {} frames", target, frames.len());
        }
    }

    #[test]
    fn frames_render_grouped() {
        assert_eq!(CounterFrame::Show(12_345).text(), "12,345");
    }
}
