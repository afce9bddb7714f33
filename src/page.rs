use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use web_sys::{Document, Window};

use crate::analytics;
use crate::components::{
    billing_toggle::{self, BillingToggle},
    nav::{self, MenuState},
    reveal::{self, RevealTracker},
    smooth_scroll,
};
use crate::config::LandingConfig;

/// Behavior state for one page view.
pub struct LandingPage {
    pub config: LandingConfig,
    pub menu: Rc<RefCell<MenuState>>,
    pub billing: Rc<RefCell<BillingToggle>>,
    pub reveal: Rc<RefCell<RevealTracker>>,
}

impl LandingPage {
    pub fn new(config: LandingConfig) -> Self {
        Self {
            config,
            menu: Rc::new(RefCell::new(MenuState::default())),
            billing: Rc::new(RefCell::new(BillingToggle::default())),
            reveal: Rc::new(RefCell::new(RevealTracker::default())),
        }
    }

    pub fn mount(window: &Window, document: &Document) -> Self {
        let page = Self::new(LandingConfig::load(document));
        let config = &page.config;

        nav::wire_navigation(document, window, config, page.menu.clone());
        smooth_scroll::wire_smooth_scroll(document, window, config);
        billing_toggle::wire_billing_toggle(document, config, page.billing.clone());
        reveal::wire_reveal(document, window, config, page.reveal.clone());
        reveal::wire_stagger(document, config);
        analytics::wire_cta_tracking(document, window, config);

        info!(
            "Landing page mounted ({} reveal elements)",
            page.reveal.borrow().len()
        );
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_page_state() {
        let page = LandingPage::new(LandingConfig::default());
        assert!(!page.menu.borrow().open);
        assert!(!page.billing.borrow().is_annual());
        assert_eq!(page.reveal.borrow().len(), 0);
    }
}
