//! Basket

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    basket::line::Line,
    offers::{OfferSet, applications::OfferApplications},
    pricing::{TotalPriceError, total_price},
};

pub mod line;

/// Errors related to basket construction or totals.
#[derive(Debug, Error)]
pub enum BasketError {
    /// A line's currency differs from the basket currency (index, line currency, basket currency).
    #[error("Line {0} has currency {1}, but basket has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// Basket
///
/// Owns the lines a customer has added and the offer applications the
/// application engine has recorded against them.
#[derive(Debug)]
pub struct Basket<'a> {
    lines: Vec<Line<'a>>,
    currency: &'static Currency,
    applications: OfferApplications<'a>,
}

impl<'a> Basket<'a> {
    /// Create a new empty basket with the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Basket {
            lines: Vec::new(),
            currency,
            applications: OfferApplications::new(),
        }
    }

    /// Create a new basket with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError` if there was a currency mismatch error.
    pub fn with_lines(
        lines: impl Into<Vec<Line<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, BasketError> {
        let lines = lines.into();

        lines.iter().enumerate().try_for_each(|(i, line)| {
            let line_currency = line.unit_price().currency();
            if line_currency == currency {
                Ok(())
            } else {
                Err(BasketError::CurrencyMismatch(
                    i,
                    line_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Basket {
            lines,
            currency,
            applications: OfferApplications::new(),
        })
    }

    /// Add a line to the basket.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError` if the line's currency differs from the basket currency.
    pub fn add_line(&mut self, line: Line<'a>) -> Result<(), BasketError> {
        let line_currency = line.unit_price().currency();

        if line_currency != self.currency {
            return Err(BasketError::CurrencyMismatch(
                self.lines.len(),
                line_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        self.lines.push(line);

        Ok(())
    }

    /// The lines in the basket.
    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    /// Calculate the subtotal of the basket, before any offer discounts.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or currency mismatch error.
    pub fn subtotal(&'a self) -> Result<Money<'a, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.lines)
    }

    /// Calculate the basket total after applied offer discounts.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or currency mismatch error.
    pub fn total(&'a self) -> Result<Money<'a, Currency>, TotalPriceError> {
        let subtotal = self.subtotal()?;
        let discount = self.applications.total_discount(self.currency)?;

        Ok(subtotal.sub(discount)?)
    }

    /// The offer applications recorded against this basket.
    pub fn applications(&self) -> &OfferApplications<'a> {
        &self.applications
    }

    /// Mutable access for the offer application engine to record outcomes.
    pub fn applications_mut(&mut self) -> &mut OfferApplications<'a> {
        &mut self.applications
    }

    /// Snapshot the offers currently applied to this basket.
    pub fn applied_offers(&self) -> OfferSet<'a> {
        self.applications.applied_offers()
    }

    /// Remove every offer application, returning the basket to full price.
    pub fn reset_offer_applications(&mut self) {
        self.applications.clear();
    }

    /// Get the number of lines in the basket.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the basket.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
