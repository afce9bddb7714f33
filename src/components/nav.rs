use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::{Document, Window};

use crate::config::LandingConfig;
use crate::dom;

/// Open/closed state of the mobile menu panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// The nav bar counts as scrolled strictly past the threshold.
pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

pub fn wire_navigation(
    document: &Document,
    window: &Window,
    config: &LandingConfig,
    menu: Rc<RefCell<MenuState>>,
) {
    let toggle = dom::html_element_by_id(document, &config.nav_toggle_id);
    let panel = dom::html_element_by_id(document, &config.nav_links_id);

    match (toggle, panel) {
        (Some(toggle), Some(panel)) => {
            menu.borrow_mut().open = panel.class_list().contains("open");

            {
                let menu = menu.clone();
                let panel = panel.clone();
                let target = toggle.clone();
                dom::listen(&toggle, "click", move |_| {
                    let open = menu.borrow_mut().toggle();
                    dom::set_class(&panel, "open", open);
                    dom::set_class(&target, "active", open);
                });
            }

            let links = dom::query_all_within(&panel, "a");
            debug!("Mobile menu wired with {} links", links.len());
            for link in links {
                let menu = menu.clone();
                let panel = panel.clone();
                let toggle = toggle.clone();
                dom::listen(&link, "click", move |_| {
                    menu.borrow_mut().close();
                    dom::set_class(&panel, "open", false);
                    dom::set_class(&toggle, "active", false);
                });
            }
        }
        _ => debug!("Mobile menu elements missing, skipping"),
    }

    let Some(nav) = dom::html_element_by_id(document, &config.nav_id) else {
        debug!("#{} missing, no scrolled state", config.nav_id);
        return;
    };

    let threshold = config.scroll_threshold;
    let scroll_window = window.clone();
    dom::listen(window, "scroll", move |_| {
        let offset = scroll_window.page_y_offset().unwrap_or(0.0);
        dom::set_class(&nav, "scrolled", is_scrolled(offset, threshold));
    });
}
