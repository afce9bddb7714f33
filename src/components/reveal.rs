use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Reflect};
use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::config::LandingConfig;
use crate::dom;

const VISIBLE: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Visible,
}

/// Per-element reveal state, index-aligned with the observed elements.
#[derive(Debug, Default)]
pub struct RevealTracker {
    states: Vec<RevealState>,
}

impl RevealTracker {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![RevealState::Hidden; len],
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[cfg(test)]
    pub fn state(&self, index: usize) -> Option<RevealState> {
        self.states.get(index).copied()
    }

    /// Returns true only for the Hidden -> Visible transition.
    pub fn observe(&mut self, index: usize, intersecting: bool) -> bool {
        match self.states.get_mut(index) {
            Some(state) if intersecting && *state == RevealState::Hidden => {
                *state = RevealState::Visible;
                true
            }
            _ => false,
        }
    }

    pub fn reveal_all(&mut self) {
        self.states.fill(RevealState::Visible);
    }

    pub fn visible_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == RevealState::Visible)
            .count()
    }
}

/// CSS `transition-delay` for the grid child at `index`.
pub fn stagger_delay(index: usize, step_ms: u32) -> String {
    let millis = index as f64 * f64::from(step_ms);
    format!("{}s", millis / 1000.0)
}

fn supports_intersection_observer(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

pub fn wire_reveal(
    document: &Document,
    window: &Window,
    config: &LandingConfig,
    tracker: Rc<RefCell<RevealTracker>>,
) {
    let elements = dom::query_all_html(document, &config.reveal_selector());
    *tracker.borrow_mut() = RevealTracker::new(elements.len());

    if !supports_intersection_observer(window) {
        info!("IntersectionObserver unavailable, revealing {} elements", elements.len());
        tracker.borrow_mut().reveal_all();
        for el in &elements {
            dom::set_styles(el, &VISIBLE);
        }
        return;
    }

    let hidden_transform = format!("translateY({}px)", config.reveal_offset_px);
    let transition = format!(
        "opacity {d}s ease, transform {d}s ease",
        d = config.reveal_duration_s
    );

    let elements = Rc::new(elements);
    let observed = elements.clone();
    let fallback = tracker.clone();
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let target = entry.target();
            let Some(index) = observed.iter().position(|el| {
                let el: &Element = el;
                el == &target
            }) else {
                continue;
            };
            let mut tracker = tracker.borrow_mut();
            if tracker.observe(index, entry.is_intersecting()) {
                dom::set_styles(&observed[index], &VISIBLE);
                observer.unobserve(&target);
                debug!(
                    "Revealed element {} ({}/{} visible)",
                    index,
                    tracker.visible_count(),
                    tracker.len()
                );
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));

    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(e) => {
            debug!("IntersectionObserver construction failed: {:?}", e);
            fallback.borrow_mut().reveal_all();
            for el in elements.iter() {
                dom::set_styles(el, &VISIBLE);
            }
            return;
        }
    };
    callback.forget();

    for el in elements.iter() {
        dom::set_styles(
            el,
            &[
                ("opacity", "0"),
                ("transform", &hidden_transform),
                ("transition", &transition),
            ],
        );
        observer.observe(el);
    }
    debug!("Observing {} reveal elements", elements.len());
}

pub fn wire_stagger(document: &Document, config: &LandingConfig) {
    for grid in dom::query_all_html(document, &config.grid_selector()) {
        for (index, item) in dom::children_html(&grid).iter().enumerate() {
            let delay = stagger_delay(index, config.stagger_step_ms);
            dom::set_styles(item, &[("transition-delay", &delay)]);
        }
    }
}
