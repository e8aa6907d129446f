//! Line Offer Consumption
//!
//! Allocates a basket line's finite quantity across competing offers during
//! one offer application pass.

use rustc_hash::FxHashMap;

use crate::{
    basket::line::Line,
    offers::{Offer, OfferKey},
};

/// Tracks how much of one line's quantity has been consumed by offers.
///
/// A consumer is created fresh for each line at the start of an offer
/// application pass, mutated through [`consume`](Self::consume) calls as the
/// engine claims quantity, and discarded when the pass ends. It is never
/// shared across passes or threads.
///
/// Consumption is tracked on two separate ledgers:
///
/// - a global `affected_quantity`, clamped to the line quantity, recording
///   how much of the line any offer has claimed, and
/// - a per-offer attribution map, where each increment is the requested
///   quantity capped by that offer's own availability.
///
/// The two ledgers are updated from the same inputs but are not forced to
/// agree; unifying them would change the observable behaviour under
/// exclusivity.
///
/// Every offer passed to [`consume`](Self::consume),
/// [`consumed`](Self::consumed) or [`available`](Self::available) is cached
/// for the life of the consumer. One exclusive offer in the cache switches
/// availability for *all* offers to the global remaining capacity: exclusive
/// offers cannot overlap their consumption of a line with anything else.
#[derive(Debug)]
pub struct LineOfferConsumer<'a> {
    line: &'a Line<'a>,
    offers: FxHashMap<OfferKey, Offer<'a>>,
    consumptions: FxHashMap<OfferKey, u32>,
    affected_quantity: u32,
}

impl<'a> LineOfferConsumer<'a> {
    /// Create a consumer for one line with nothing consumed yet.
    pub fn new(line: &'a Line<'a>) -> Self {
        Self {
            line,
            offers: FxHashMap::default(),
            consumptions: FxHashMap::default(),
            affected_quantity: 0,
        }
    }

    fn cache(&mut self, offer: &Offer<'a>) {
        self.offers
            .entry(offer.key())
            .or_insert_with(|| offer.clone());
    }

    fn update_affected_quantity(&mut self, quantity: u32) {
        let remaining = self.line.quantity() - self.affected_quantity;

        self.affected_quantity += quantity.min(remaining);
    }

    fn any_exclusive(&self) -> bool {
        self.offers.values().any(Offer::is_exclusive)
    }

    /// Consume up to `quantity` units of the line, optionally attributing the
    /// consumption to an offer.
    ///
    /// The global ledger always moves first: `affected_quantity` grows by the
    /// requested quantity clamped to the line's remaining capacity. When an
    /// offer is given, its attribution then grows by the requested quantity
    /// capped by [`available`](Self::available), evaluated against the
    /// already-updated global ledger.
    pub fn consume(&mut self, quantity: u32, offer: Option<&Offer<'a>>) {
        self.update_affected_quantity(quantity);

        if let Some(offer) = offer {
            let available = self.available(offer);

            *self.consumptions.entry(offer.key()).or_insert(0) += available.min(quantity);
        }
    }

    /// Quantity consumed so far.
    ///
    /// Without an offer this is the total quantity consumed by any offer
    /// (the global ledger). With an offer it is that offer's attributed
    /// consumption, defaulting to zero; the offer is cached as a side
    /// effect. Repeated reads without an intervening
    /// [`consume`](Self::consume) return the same value.
    pub fn consumed(&mut self, offer: Option<&Offer<'a>>) -> u32 {
        let Some(offer) = offer else {
            return self.affected_quantity;
        };

        self.cache(offer);

        self.consumptions.get(&offer.key()).copied().unwrap_or(0)
    }

    /// Quantity of the line still available to the given offer.
    ///
    /// If any cached offer (including this one) is exclusive, this is the
    /// global remaining capacity; otherwise only the offer's own attributed
    /// consumption counts against it.
    pub fn available(&mut self, offer: &Offer<'a>) -> u32 {
        self.cache(offer);

        let consumed = if self.any_exclusive() {
            self.affected_quantity
        } else {
            self.consumed(Some(offer))
        };

        self.line.quantity() - consumed
    }

    /// The line this consumer allocates.
    pub fn line(&self) -> &Line<'a> {
        self.line
    }
}
