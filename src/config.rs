use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Element ids, selectors and timings the page behaviors are wired against.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LandingConfig {
    pub nav_id: String,
    pub nav_toggle_id: String,
    pub nav_links_id: String,
    pub nav_selector: String,
    pub billing_toggle_id: String,
    pub label_selector: String,
    pub price_selector: String,
    pub scroll_threshold: f64,
    pub scroll_buffer: f64,
    pub price_swap_delay_ms: u32,
    pub currency_symbol: String,
    pub reveal_selectors: Vec<String>,
    pub reveal_threshold: f64,
    pub reveal_offset_px: f64,
    pub reveal_duration_s: f64,
    pub grid_selectors: Vec<String>,
    pub stagger_step_ms: u32,
    pub cta_selector: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            nav_id: "nav".to_string(),
            nav_toggle_id: "navToggle".to_string(),
            nav_links_id: "navLinks".to_string(),
            nav_selector: ".nav".to_string(),
            billing_toggle_id: "billingToggle".to_string(),
            label_selector: ".toggle-label".to_string(),
            price_selector: ".price-amount[data-monthly]".to_string(),
            scroll_threshold: 50.0,
            scroll_buffer: 20.0,
            price_swap_delay_ms: 150,
            currency_symbol: "€".to_string(),
            reveal_selectors: [
                ".problem-card",
                ".audience-card",
                ".testimonial-card",
                ".pricing-card",
                ".feature-detail",
                ".faq-item",
                ".step",
                ".start-step",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            reveal_threshold: 0.1,
            reveal_offset_px: 20.0,
            reveal_duration_s: 0.6,
            grid_selectors: [
                ".problems-grid",
                ".audience-grid",
                ".pricing-grid",
                ".feature-details-grid",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            stagger_step_ms: 100,
            cta_selector: ".btn-primary, .nav-cta".to_string(),
        }
    }
}

impl LandingConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the `#landing-config` block if the page ships one, otherwise defaults.
    pub fn load(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn reveal_selector(&self) -> String {
        self.reveal_selectors.join(", ")
    }

    pub fn grid_selector(&self) -> String {
        self.grid_selectors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_contract() {
        let config = LandingConfig::default();
        assert_eq!(config.nav_toggle_id, "navToggle");
        assert_eq!(config.scroll_threshold, 50.0);
        assert_eq!(config.price_swap_delay_ms, 150);
        assert_eq!(config.reveal_selectors.len(), 8);
        assert_eq!(
            config.grid_selector(),
            ".problems-grid, .audience-grid, .pricing-grid, .feature-details-grid"
        );
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = LandingConfig::from_json(
            r#"{ "scroll_threshold": 120.0, "currency_symbol": "$", "grid_selectors": [".plans"] }"#,
        )
        .unwrap();
        assert_eq!(config.scroll_threshold, 120.0);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.grid_selector(), ".plans");
        assert_eq!(config.nav_id, "nav");
        assert_eq!(config.scroll_buffer, 20.0);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(LandingConfig::from_json("{}").unwrap(), LandingConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(LandingConfig::from_json("{ scroll_threshold: ").is_err());
    }
}
