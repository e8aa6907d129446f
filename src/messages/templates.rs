//! Message Templates
//!
//! The rendering seam between basket events and the text shown to
//! customers. Web frontends implement [`MessageTemplates`] against their own
//! template engine; [`TextTemplates`] is the bundled fallback.

use std::convert::Infallible;

use crate::{basket::Basket, offers::Offer, pricing::TotalPriceError};

/// Identifies a message template together with the values it renders.
#[derive(Debug)]
pub enum TemplateContext<'ctx, 'a> {
    /// Summary of the basket's new total after offers changed.
    NewTotal {
        /// The basket the total is read from
        basket: &'ctx Basket<'a>,

        /// Whether to render a checkout call-to-action; false on the basket
        /// page itself, true elsewhere
        include_buttons: bool,
    },

    /// An offer the basket no longer qualifies for.
    OfferLost {
        /// The lost offer
        offer: &'ctx Offer<'a>,
    },

    /// An offer the basket newly qualifies for.
    OfferGained {
        /// The gained offer
        offer: &'ctx Offer<'a>,
    },
}

/// Renders message templates to customer-facing text.
pub trait MessageTemplates {
    /// Error produced when rendering fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Render the template identified by `context` to text.
    ///
    /// # Errors
    ///
    /// Rendering failures propagate to the caller unmodified.
    fn render(&self, context: &TemplateContext<'_, '_>) -> Result<String, Self::Error>;
}

/// Plain-markup implementation of [`MessageTemplates`].
///
/// Output is minimal pre-escaped HTML, matching the `safe` tag basket
/// messages are enqueued with.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTemplates;

impl MessageTemplates for TextTemplates {
    type Error = TotalPriceError;

    fn render(&self, context: &TemplateContext<'_, '_>) -> Result<String, Self::Error> {
        match context {
            TemplateContext::NewTotal {
                basket,
                include_buttons,
            } => {
                let total = basket.total()?;

                if *include_buttons {
                    Ok(format!(
                        "Your basket total is now <strong>{total}</strong>. \
                         <a href=\"/checkout/\">Checkout now</a>"
                    ))
                } else {
                    Ok(format!("Your basket total is now <strong>{total}</strong>."))
                }
            }
            TemplateContext::OfferLost { offer } => Ok(format!(
                "Your basket no longer qualifies for the <strong>{}</strong> offer ({}).",
                offer.name(),
                offer.benefit()
            )),
            TemplateContext::OfferGained { offer } => Ok(format!(
                "Your basket now qualifies for the <strong>{}</strong> offer ({}).",
                offer.name(),
                offer.benefit()
            )),
        }
    }
}

/// A [`MessageTemplates`] implementation that renders nothing but the raw
/// event, for callers that do their own presentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTemplates;

impl MessageTemplates for PlainTemplates {
    type Error = Infallible;

    fn render(&self, context: &TemplateContext<'_, '_>) -> Result<String, Self::Error> {
        match context {
            TemplateContext::NewTotal { .. } => Ok("Basket total updated.".to_string()),
            TemplateContext::OfferLost { offer } => Ok(format!("Offer lost: {}", offer.name())),
            TemplateContext::OfferGained { offer } => Ok(format!("Offer gained: {}", offer.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};
    use slotmap::SlotMap;
    use testresult::TestResult;

    use crate::{
        basket::line::Line,
        offers::{OfferKey, benefit::Benefit},
        products::ProductKey,
    };

    use super::*;

    fn test_offer<'a>(exclusive: bool) -> Offer<'a> {
        let mut keys = SlotMap::<OfferKey, ()>::with_key();

        Offer::new(
            keys.insert(()),
            "Free delivery",
            exclusive,
            Benefit::FixedDiscount(Money::from_minor(300, GBP)),
        )
    }

    #[test]
    fn new_total_with_buttons_includes_checkout_link() -> TestResult {
        let lines = [Line::new(
            ProductKey::default(),
            2,
            Money::from_minor(500, GBP),
        )];
        let basket = Basket::with_lines(lines, GBP)?;

        let text = TextTemplates.render(&TemplateContext::NewTotal {
            basket: &basket,
            include_buttons: true,
        })?;

        assert!(text.contains("£10.00"), "total missing from: {text}");
        assert!(text.contains("Checkout now"), "button missing from: {text}");

        Ok(())
    }

    #[test]
    fn new_total_without_buttons_omits_checkout_link() -> TestResult {
        let basket = Basket::new(GBP);

        let text = TextTemplates.render(&TemplateContext::NewTotal {
            basket: &basket,
            include_buttons: false,
        })?;

        assert!(!text.contains("Checkout now"), "unexpected button in: {text}");

        Ok(())
    }

    #[test]
    fn offer_lost_names_the_offer() -> TestResult {
        let offer = test_offer(false);

        let text = TextTemplates.render(&TemplateContext::OfferLost { offer: &offer })?;

        assert!(text.contains("no longer qualifies"), "wrong copy: {text}");
        assert!(text.contains("Free delivery"), "offer name missing: {text}");

        Ok(())
    }

    #[test]
    fn offer_gained_names_the_offer_and_benefit() -> TestResult {
        let offer = test_offer(false);

        let text = TextTemplates.render(&TemplateContext::OfferGained { offer: &offer })?;

        assert!(text.contains("now qualifies"), "wrong copy: {text}");
        assert!(text.contains("£3.00 off"), "benefit missing: {text}");

        Ok(())
    }
}
