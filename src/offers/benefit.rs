//! Offer Benefits
//!
//! The discount an offer grants, as displayed to customers and as applied
//! by the offer application engine.

use std::fmt;

use decimal_percentage::Percentage;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to benefit calculations.
#[derive(Debug, Error)]
pub enum BenefitError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The benefit an offer grants against a basket total.
#[derive(Debug, Clone, Copy)]
pub enum Benefit<'a> {
    /// A fixed amount off the total.
    FixedDiscount(Money<'a, Currency>),

    /// A percentage off the total.
    PercentageDiscount(Percentage),
}

impl<'a> Benefit<'a> {
    /// Calculate the discount this benefit grants on the given subtotal.
    ///
    /// Fixed discounts are capped at the subtotal so a basket total can
    /// never go negative.
    ///
    /// # Errors
    ///
    /// - [`BenefitError::Money`]: The fixed amount is in a different currency
    ///   to the subtotal.
    /// - [`BenefitError::PercentConversion`]: A percentage calculation cannot
    ///   be safely represented in minor units.
    pub fn discount_value(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, BenefitError> {
        match self {
            Benefit::FixedDiscount(amount) => {
                if amount.currency() != subtotal.currency() {
                    return Err(BenefitError::Money(MoneyError::CurrencyMismatch {
                        expected: subtotal.currency().iso_alpha_code,
                        actual: amount.currency().iso_alpha_code,
                    }));
                }

                let capped = amount.to_minor_units().min(subtotal.to_minor_units());

                Ok(Money::from_minor(capped, subtotal.currency()))
            }
            Benefit::PercentageDiscount(percent) => {
                let minor = percent_of_minor(*percent, subtotal.to_minor_units())?;

                Ok(Money::from_minor(minor, subtotal.currency()))
            }
        }
    }
}

impl fmt::Display for Benefit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Benefit::FixedDiscount(amount) => write!(f, "{amount} off"),
            Benefit::PercentageDiscount(percent) => {
                let points = (*percent * Decimal::ONE_HUNDRED).normalize();

                write!(f, "{points}% off")
            }
        }
    }
}

/// Calculate the percentage of an amount in minor units, rounding half away
/// from zero.
fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, BenefitError> {
    let Some(minor) = Decimal::from_i64(minor) else {
        return Err(BenefitError::PercentConversion);
    };

    let applied = percent * minor;
    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded
        .to_i64()
        .ok_or(BenefitError::PercentConversion)
}
