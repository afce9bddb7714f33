use log::debug;
use web_sys::{Document, ScrollBehavior, ScrollToOptions, Window};

use crate::config::LandingConfig;
use crate::dom;

/// Selector an in-page anchor should scroll to. A bare `#` is left to the browser.
pub fn anchor_target(href: &str) -> Option<&str> {
    if href.starts_with('#') && href != "#" {
        Some(href)
    } else {
        None
    }
}

/// Scroll offset that puts `document_top` just below the fixed nav bar.
pub fn scroll_destination(document_top: f64, nav_height: f64, buffer: f64) -> f64 {
    document_top - nav_height - buffer
}

/// Destination for `selector`, or `None` when `locate` finds no element.
pub fn plan_scroll<F>(selector: &str, locate: F, nav_height: f64, buffer: f64) -> Option<f64>
where
    F: FnOnce(&str) -> Option<f64>,
{
    locate(selector).map(|top| scroll_destination(top, nav_height, buffer))
}

pub fn wire_smooth_scroll(document: &Document, window: &Window, config: &LandingConfig) {
    let anchors = dom::query_all_html(document, "a[href^=\"#\"]");
    debug!("Smooth scroll wired on {} anchors", anchors.len());

    for anchor in anchors {
        let document = document.clone();
        let window = window.clone();
        let nav_selector = config.nav_selector.clone();
        let buffer = config.scroll_buffer;
        let source = anchor.clone();

        dom::listen(&anchor, "click", move |e| {
            let Some(href) = source.get_attribute("href") else {
                return;
            };
            let Some(selector) = anchor_target(&href) else {
                return;
            };
            e.prevent_default();

            let nav_height = dom::query_html(&document, &nav_selector)
                .map(|nav| f64::from(nav.offset_height()))
                .unwrap_or(0.0);
            let page_offset = window.page_y_offset().unwrap_or(0.0);
            let locate = |selector: &str| {
                dom::query_html(&document, selector)
                    .map(|target| target.get_bounding_client_rect().top() + page_offset)
            };

            let Some(top) = plan_scroll(selector, locate, nav_height, buffer) else {
                debug!("No element for {}", selector);
                return;
            };

            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_not_intercepted() {
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/pricing"), None);
        assert_eq!(anchor_target("#pricing"), Some("#pricing"));
    }

    #[test]
    fn destination_subtracts_nav_and_buffer() {
        assert_eq!(scroll_destination(500.0, 80.0, 20.0), 400.0);
    }

    #[test]
    fn missing_target_plans_no_scroll() {
        assert_eq!(plan_scroll("#target", |_| None, 80.0, 20.0), None);
    }

    #[test]
    fn found_target_is_offset_by_nav() {
        let locate = |selector: &str| (selector == "#pricing").then_some(500.0);
        assert_eq!(plan_scroll("#pricing", locate, 80.0, 20.0), Some(400.0));
    }

    #[test]
    fn destination_without_nav_bar() {
        assert_eq!(scroll_destination(500.0, 0.0, 20.0), 480.0);
    }
}
