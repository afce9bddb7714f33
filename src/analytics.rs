use js_sys::{Function, Reflect};
use log::{debug, info};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

use crate::config::LandingConfig;
use crate::dom;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedEvent {
    pub category: String,
    pub action: String,
    pub label: String,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct GtagParams<'a> {
    pub event_category: &'a str,
    pub event_label: &'a str,
}

impl TrackedEvent {
    pub fn new(category: &str, action: &str, label: &str) -> Self {
        Self {
            category: category.to_string(),
            action: action.to_string(),
            label: label.to_string(),
        }
    }

    pub fn log_line(&self) -> String {
        format!("Event: {} - {} - {}", self.category, self.action, self.label)
    }

    pub fn gtag_params(&self) -> GtagParams<'_> {
        GtagParams {
            event_category: &self.category,
            event_label: &self.label,
        }
    }
}

/// Logs the event and forwards it to a global `gtag` when the page loaded one.
pub fn track_event(window: &Window, event: &TrackedEvent) {
    info!("{}", event.log_line());

    let Some(gtag) = Reflect::get(window, &JsValue::from_str("gtag"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
    else {
        return;
    };

    let params = match serde_wasm_bindgen::to_value(&event.gtag_params()) {
        Ok(params) => params,
        Err(e) => {
            debug!("Could not encode gtag params: {}", e);
            return;
        }
    };
    let _ = gtag.call3(
        &JsValue::NULL,
        &JsValue::from_str("event"),
        &JsValue::from_str(&event.action),
        &params,
    );
}

pub fn wire_cta_tracking(document: &Document, window: &Window, config: &LandingConfig) {
    let buttons = dom::query_all_html(document, &config.cta_selector);
    debug!("Tracking clicks on {} CTAs", buttons.len());

    for button in buttons {
        let window = window.clone();
        let source = button.clone();
        dom::listen(&button, "click", move |_| {
            let text = source.text_content().unwrap_or_default();
            track_event(&window, &TrackedEvent::new("CTA", "click", text.trim()));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_line_joins_triple() {
        let event = TrackedEvent::new("CTA", "click", "Start free trial");
        assert_eq!(event.log_line(), "Event: CTA - click - Start free trial");
    }

    #[test]
    fn gtag_params_shape() {
        let event = TrackedEvent::new("CTA", "click", "Get started");
        let json = serde_json::to_value(event.gtag_params()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "event_category": "CTA", "event_label": "Get started" })
        );
    }
}
