use std::cell::RefCell;

use log::{info, warn};
use web_sys::window;

mod analytics;
mod config;
mod dom;
mod page;
mod components {
    pub mod billing_toggle;
    pub mod nav;
    pub mod reveal;
    pub mod smooth_scroll;
}

use page::LandingPage;

thread_local! {
    // One controller per page view, alive for as long as the page is.
    static PAGE: RefCell<Option<LandingPage>> = const { RefCell::new(None) };
}

/// `document.readyState` before the parser has finished.
fn still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn mount(window: &web_sys::Window, document: &web_sys::Document) {
    let page = LandingPage::mount(window, document);
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
}

fn start() {
    let Some(window) = window() else {
        warn!("No window, nothing to wire");
        return;
    };
    let Some(document) = window.document() else {
        warn!("No document, nothing to wire");
        return;
    };

    if still_loading(&document.ready_state()) {
        let ready_window = window.clone();
        let ready_document = document.clone();
        dom::listen(&document, "DOMContentLoaded", move |_| {
            mount(&ready_window, &ready_document);
        });
    } else {
        mount(&window, &document);
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting landing page behaviors");
    start();
}
