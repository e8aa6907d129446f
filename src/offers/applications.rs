//! Offer Applications
//!
//! Records what each applied offer did to a basket during an application
//! pass; the source of applied-offer snapshots.

use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};

use crate::offers::{Offer, OfferKey, OfferSet};

/// Result of applying one offer to a basket.
#[derive(Debug, Clone)]
pub struct OfferApplication<'a> {
    /// The offer that was applied
    pub offer: Offer<'a>,

    /// Total discount granted by this offer so far
    pub discount: Money<'a, Currency>,

    /// How many times the offer was applied
    pub frequency: u32,
}

/// All offer applications recorded against a basket, keyed by offer.
#[derive(Debug, Clone, Default)]
pub struct OfferApplications<'a> {
    applications: FxHashMap<OfferKey, OfferApplication<'a>>,
}

impl<'a> OfferApplications<'a> {
    /// Create an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one application of an offer with the discount it granted.
    ///
    /// Repeat applications of the same offer accumulate their discounts and
    /// bump the frequency.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if discounts for the same offer are in
    /// different currencies.
    pub fn record(
        &mut self,
        offer: &Offer<'a>,
        discount: Money<'a, Currency>,
    ) -> Result<(), MoneyError> {
        if let Some(application) = self.applications.get_mut(&offer.key()) {
            application.discount = application.discount.add(discount)?;
            application.frequency += 1;
        } else {
            self.applications.insert(
                offer.key(),
                OfferApplication {
                    offer: offer.clone(),
                    discount,
                    frequency: 1,
                },
            );
        }

        Ok(())
    }

    /// Look up the application record for an offer.
    pub fn get(&self, key: OfferKey) -> Option<&OfferApplication<'a>> {
        self.applications.get(&key)
    }

    /// Snapshot the offers currently applied as an [`OfferSet`].
    pub fn applied_offers(&self) -> OfferSet<'a> {
        self.applications
            .values()
            .map(|application| application.offer.clone())
            .collect()
    }

    /// Sum of all recorded discounts, in the given currency.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if any recorded discount is in a different
    /// currency.
    pub fn total_discount(
        &self,
        currency: &'a Currency,
    ) -> Result<Money<'a, Currency>, MoneyError> {
        self.applications
            .values()
            .try_fold(Money::from_minor(0, currency), |acc, application| {
                acc.add(application.discount)
            })
    }

    /// Forget every recorded application.
    pub fn clear(&mut self) {
        self.applications.clear();
    }

    /// Iterate over the application records (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &OfferApplication<'a>> {
        self.applications.values()
    }

    /// Get the number of distinct offers applied.
    pub fn len(&self) -> usize {
        self.applications.len()
    }

    /// Check if no offers have been applied.
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}
