//! Offer Fixtures
//!
//! YAML offer definitions plus [`ThresholdApplicator`], a small
//! offer-application engine driven by them. Real deployments implement
//! [`OfferApplicator`](crate::offers::applicator::OfferApplicator) against
//! their own eligibility rules; this one exists for tests and demos.

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    basket::Basket,
    fixtures::{FixtureError, products::parse_price},
    offers::{
        Offer, OfferKey,
        applicator::OfferApplicator,
        benefit::{Benefit, BenefitError},
        consumer::LineOfferConsumer,
    },
    pricing::TotalPriceError,
};

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Map of offer key -> offer fixture
    pub offers: FxHashMap<String, OfferFixture>,
}

/// Offer fixture from YAML
#[derive(Debug, Deserialize)]
pub struct OfferFixture {
    /// Offer display name
    pub name: String,

    /// Whether the offer refuses to share line quantity with other offers
    #[serde(default)]
    pub exclusive: bool,

    /// Benefit the offer grants
    pub benefit: BenefitFixture,

    /// Minimum basket subtotal for eligibility (e.g., "30.00 GBP")
    #[serde(default)]
    pub min_subtotal: Option<String>,
}

/// Benefit configuration in YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BenefitFixture {
    /// Fixed amount off (e.g., amount: "5.00 GBP")
    Fixed {
        /// Discount amount
        amount: String,
    },

    /// Percentage off (e.g., percent: 10)
    Percentage {
        /// Discount in percentage points, 0 < percent <= 100
        percent: f64,
    },
}

impl OfferFixture {
    /// Convert to an [`Offer`] and its eligibility rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the benefit or threshold configuration is invalid.
    pub fn try_into_rule(self, key: OfferKey) -> Result<OfferRule<'static>, FixtureError> {
        let benefit = match self.benefit {
            BenefitFixture::Fixed { amount } => {
                let (minor, currency) = parse_price(&amount)?;

                Benefit::FixedDiscount(Money::from_minor(minor, currency))
            }
            BenefitFixture::Percentage { percent } => {
                if percent <= 0.0 || percent > 100.0 {
                    return Err(FixtureError::InvalidPercentage(percent.to_string()));
                }

                Benefit::PercentageDiscount(Percentage::from(percent / 100.0))
            }
        };

        let min_subtotal = self
            .min_subtotal
            .map(|raw| {
                let (minor, currency) = parse_price(&raw)?;

                Ok::<_, FixtureError>(Money::from_minor(minor, currency))
            })
            .transpose()?;

        let offer = Offer::new(key, self.name, self.exclusive, benefit);

        Ok(OfferRule::new(offer, min_subtotal))
    }
}

/// One offer plus the subtotal threshold that gates it.
#[derive(Debug, Clone)]
pub struct OfferRule<'a> {
    offer: Offer<'a>,
    min_subtotal: Option<Money<'a, Currency>>,
}

impl<'a> OfferRule<'a> {
    /// Create a rule for an offer, gated on an optional minimum subtotal.
    pub fn new(offer: Offer<'a>, min_subtotal: Option<Money<'a, Currency>>) -> Self {
        Self {
            offer,
            min_subtotal,
        }
    }

    /// The offer this rule applies.
    pub fn offer(&self) -> &Offer<'a> {
        &self.offer
    }

    /// The minimum subtotal required for the offer, if any.
    pub fn min_subtotal(&self) -> Option<&Money<'a, Currency>> {
        self.min_subtotal.as_ref()
    }
}

/// Errors from a [`ThresholdApplicator`] pass.
#[derive(Debug, Error)]
pub enum ThresholdApplyError {
    /// Basket totals could not be calculated.
    #[error(transparent)]
    Total(#[from] TotalPriceError),

    /// Benefit calculation failed.
    #[error(transparent)]
    Benefit(#[from] BenefitError),

    /// Money arithmetic or currency mismatch while recording applications.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Subtotal-threshold offer application engine.
///
/// Walks its rules in order; each eligible offer claims line quantity
/// through a [`LineOfferConsumer`] per line and grants its benefit over the
/// value it managed to claim. Exclusive offers therefore starve later rules
/// of quantity, and an offer that claims nothing is not applied.
#[derive(Debug, Clone, Default)]
pub struct ThresholdApplicator<'a> {
    rules: Vec<OfferRule<'a>>,
}

impl<'a> ThresholdApplicator<'a> {
    /// Create an applicator from rules, applied in the given order.
    pub fn new(rules: Vec<OfferRule<'a>>) -> Self {
        Self { rules }
    }

    /// The rules this applicator walks.
    pub fn rules(&self) -> &[OfferRule<'a>] {
        &self.rules
    }
}

impl<'a> OfferApplicator<'a> for ThresholdApplicator<'a> {
    type Error = ThresholdApplyError;

    fn apply(&self, basket: &mut Basket<'a>) -> Result<(), Self::Error> {
        let subtotal_minor = basket.subtotal()?.to_minor_units();
        let currency = basket.currency();

        let mut outcomes: Vec<(Offer<'a>, Money<'a, Currency>)> = Vec::new();

        {
            let mut consumers: Vec<LineOfferConsumer<'_>> =
                basket.lines().iter().map(LineOfferConsumer::new).collect();

            for rule in &self.rules {
                let eligible = rule
                    .min_subtotal
                    .as_ref()
                    .is_none_or(|min| subtotal_minor >= min.to_minor_units());

                if !eligible {
                    continue;
                }

                let mut claimed_minor = 0_i64;

                for consumer in &mut consumers {
                    let quantity = consumer.line().quantity();
                    let unit_minor = consumer.line().unit_price().to_minor_units();

                    // Availability must be read before consuming; the
                    // consumer's own attribution is settled afterwards.
                    let claimed = consumer.available(rule.offer()).min(quantity);

                    if claimed == 0 {
                        continue;
                    }

                    consumer.consume(claimed, Some(rule.offer()));

                    claimed_minor += i64::from(claimed) * unit_minor;
                }

                if claimed_minor == 0 {
                    continue;
                }

                let base = Money::from_minor(claimed_minor, currency);
                let discount = rule.offer().benefit().discount_value(&base)?;

                debug!(
                    offer = rule.offer().name(),
                    discount = %discount,
                    "applied offer to basket"
                );

                outcomes.push((rule.offer().clone(), discount));
            }
        }

        for (offer, discount) in outcomes {
            basket.applications_mut().record(&offer, discount)?;
        }

        Ok(())
    }
}
