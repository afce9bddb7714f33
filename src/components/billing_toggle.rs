use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{Document, HtmlElement};

use crate::config::LandingConfig;
use crate::dom;

const PRICE_TRANSITION: &str = "opacity 0.15s ease, transform 0.15s ease";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BillingPeriod {
    Monthly,
    Annual,
}

impl BillingPeriod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "monthly" => Some(Self::Monthly),
            "annual" => Some(Self::Annual),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Monthly => Self::Annual,
            Self::Annual => Self::Monthly,
        }
    }
}

/// A delayed price rewrite scheduled by one toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceRewrite {
    pub generation: u64,
    pub period: BillingPeriod,
}

/// Current billing period plus a generation counter that invalidates pending rewrites.
#[derive(Debug)]
pub struct BillingToggle {
    period: BillingPeriod,
    generation: u64,
}

impl Default for BillingToggle {
    fn default() -> Self {
        Self {
            period: BillingPeriod::Monthly,
            generation: 0,
        }
    }
}

impl BillingToggle {
    pub fn is_annual(&self) -> bool {
        self.period == BillingPeriod::Annual
    }

    pub fn toggle(&mut self) -> PriceRewrite {
        self.period = self.period.flipped();
        self.generation += 1;
        PriceRewrite {
            generation: self.generation,
            period: self.period,
        }
    }

    /// Period to render for `rewrite`, or `None` if a later toggle superseded it.
    pub fn resolve(&self, rewrite: &PriceRewrite) -> Option<BillingPeriod> {
        (rewrite.generation == self.generation).then_some(rewrite.period)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodLabel {
    pub period: Option<BillingPeriod>,
}

impl PeriodLabel {
    pub fn from_attr(raw: Option<&str>) -> Self {
        Self {
            period: raw.and_then(BillingPeriod::parse),
        }
    }

    pub fn is_active(&self, current: BillingPeriod) -> bool {
        self.period == Some(current)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceTag {
    pub monthly: String,
    pub annual: String,
}

impl PriceTag {
    /// Both amounts are required; otherwise the element is left alone.
    pub fn from_attrs(monthly: Option<String>, annual: Option<String>) -> Option<Self> {
        match (monthly, annual) {
            (Some(monthly), Some(annual)) if !monthly.is_empty() && !annual.is_empty() => {
                Some(Self { monthly, annual })
            }
            _ => None,
        }
    }

    pub fn display(&self, period: BillingPeriod, currency: &str) -> String {
        let amount = match period {
            BillingPeriod::Monthly => &self.monthly,
            BillingPeriod::Annual => &self.annual,
        };
        format!("{}{}", currency, amount)
    }
}

/// Price texts for a fired rewrite, or `None` when a later toggle superseded it.
pub fn apply_rewrite(
    state: &BillingToggle,
    rewrite: &PriceRewrite,
    tags: &[PriceTag],
    currency: &str,
) -> Option<Vec<String>> {
    let period = state.resolve(rewrite)?;
    Some(tags.iter().map(|tag| tag.display(period, currency)).collect())
}

pub fn wire_billing_toggle(
    document: &Document,
    config: &LandingConfig,
    state: Rc<RefCell<BillingToggle>>,
) {
    let Some(toggle) = dom::html_element_by_id(document, &config.billing_toggle_id) else {
        debug!("#{} missing, billing toggle disabled", config.billing_toggle_id);
        return;
    };

    let labels: Vec<(HtmlElement, PeriodLabel)> = dom::query_all_html(document, &config.label_selector)
        .into_iter()
        .map(|el| {
            let label = PeriodLabel::from_attr(el.get_attribute("data-period").as_deref());
            (el, label)
        })
        .collect();

    let price_elements = dom::query_all_html(document, &config.price_selector);
    for price in &price_elements {
        dom::set_styles(price, &[("transition", PRICE_TRANSITION)]);
    }
    let (price_elements, tags): (Vec<HtmlElement>, Vec<PriceTag>) = price_elements
        .into_iter()
        .filter_map(|el| {
            let tag = PriceTag::from_attrs(
                el.get_attribute("data-monthly"),
                el.get_attribute("data-annual"),
            )?;
            Some((el, tag))
        })
        .unzip();
    let price_elements = Rc::new(price_elements);
    let tags = Rc::new(tags);
    debug!(
        "Billing toggle wired with {} labels and {} prices",
        labels.len(),
        tags.len()
    );

    let delay = config.price_swap_delay_ms;
    let currency = Rc::new(config.currency_symbol.clone());
    let target = toggle.clone();

    dom::listen(&toggle, "click", move |_| {
        let rewrite = state.borrow_mut().toggle();
        dom::set_class(&target, "active", state.borrow().is_annual());

        for (el, label) in &labels {
            dom::set_class(el, "active", label.is_active(rewrite.period));
        }

        for el in price_elements.iter() {
            dom::set_styles(el, &[("opacity", "0"), ("transform", "translateY(-10px)")]);
        }

        let state = state.clone();
        let price_elements = price_elements.clone();
        let tags = tags.clone();
        let currency = currency.clone();
        Timeout::new(delay, move || {
            let Some(texts) = apply_rewrite(&state.borrow(), &rewrite, &tags, &currency) else {
                debug!("Dropping superseded price rewrite #{}", rewrite.generation);
                return;
            };
            for (el, text) in price_elements.iter().zip(texts) {
                el.set_text_content(Some(&text));
                dom::set_styles(el, &[("opacity", "1"), ("transform", "translateY(0)")]);
            }
        })
        .forget();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag() -> PriceTag {
        PriceTag::from_attrs(Some("29".to_string()), Some("24".to_string())).unwrap()
    }

    fn active_labels(current: BillingPeriod) -> usize {
        [
            PeriodLabel::from_attr(Some("monthly")),
            PeriodLabel::from_attr(Some("annual")),
        ]
        .iter()
        .filter(|label| label.is_active(current))
        .count()
    }

    #[test]
    fn starts_monthly() {
        let toggle = BillingToggle::default();
        assert!(!toggle.is_annual());
    }

    #[test]
    fn toggle_flips_period() {
        let mut toggle = BillingToggle::default();
        assert_eq!(toggle.toggle().period, BillingPeriod::Annual);
        assert!(toggle.is_annual());
        assert_eq!(toggle.toggle().period, BillingPeriod::Monthly);
    }

    #[test]
    fn exactly_one_label_active_after_each_toggle() {
        let mut toggle = BillingToggle::default();
        for _ in 0..5 {
            let rewrite = toggle.toggle();
            assert_eq!(active_labels(rewrite.period), 1);
        }
    }

    #[test]
    fn unknown_period_label_is_never_active() {
        let label = PeriodLabel::from_attr(Some("weekly"));
        assert!(!label.is_active(BillingPeriod::Monthly));
        assert!(!label.is_active(BillingPeriod::Annual));
        assert!(!PeriodLabel::from_attr(None).is_active(BillingPeriod::Monthly));
    }

    #[test]
    fn stale_rewrite_is_superseded() {
        let mut toggle = BillingToggle::default();
        let first = toggle.toggle();
        let second = toggle.toggle();
        assert_eq!(toggle.resolve(&first), None);
        assert_eq!(toggle.resolve(&second), Some(BillingPeriod::Monthly));
    }

    #[test]
    fn even_toggles_end_on_monthly_text() {
        let mut toggle = BillingToggle::default();
        let tags = [tag(), PriceTag::from_attrs(Some("49".to_string()), Some("39".to_string())).unwrap()];
        let rewrites: Vec<_> = (0..4).map(|_| toggle.toggle()).collect();

        // Pending rewrites fire in scheduling order after the last click.
        let applied: Vec<_> = rewrites
            .iter()
            .filter_map(|rewrite| apply_rewrite(&toggle, rewrite, &tags, "€"))
            .collect();
        assert_eq!(applied, vec![vec!["€29".to_string(), "€49".to_string()]]);
    }

    #[test]
    fn rewrite_renders_resolved_period() {
        let mut toggle = BillingToggle::default();
        let rewrite = toggle.toggle();
        assert_eq!(
            apply_rewrite(&toggle, &rewrite, &[tag()], "€"),
            Some(vec!["€24".to_string()])
        );
    }

    #[test]
    fn superseded_rewrite_renders_nothing() {
        let mut toggle = BillingToggle::default();
        let stale = toggle.toggle();
        toggle.toggle();
        assert_eq!(apply_rewrite(&toggle, &stale, &[tag()], "€"), None);
    }

    #[test]
    fn price_display_uses_current_period() {
        let tag = tag();
        assert_eq!(tag.display(BillingPeriod::Monthly, "€"), "€29");
        assert_eq!(tag.display(BillingPeriod::Annual, "€"), "€24");
    }

    #[test]
    fn price_requires_both_amounts() {
        assert_eq!(PriceTag::from_attrs(Some("29".to_string()), None), None);
        assert_eq!(PriceTag::from_attrs(None, Some("24".to_string())), None);
        assert_eq!(PriceTag::from_attrs(Some(String::new()), Some("24".to_string())), None);
    }
}
