//! Offers

use rustc_hash::FxHashMap;
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::offers::benefit::Benefit;

pub mod applications;
pub mod applicator;
pub mod benefit;
pub mod consumer;

new_key_type! {
    /// Offer Key
    pub struct OfferKey;
}

/// A discount or promotion rule that may apply to a basket.
///
/// Eligibility and discount calculation belong to the offer application
/// engine; this crate only reads the offer's identity, display name,
/// exclusivity flag and benefit description.
#[derive(Debug, Clone)]
pub struct Offer<'a> {
    key: OfferKey,
    name: String,
    exclusive: bool,
    benefit: Benefit<'a>,
}

impl<'a> Offer<'a> {
    /// Create a new offer.
    pub fn new(key: OfferKey, name: impl Into<String>, exclusive: bool, benefit: Benefit<'a>) -> Self {
        Self {
            key,
            name: name.into(),
            exclusive,
            benefit,
        }
    }

    /// Return the offer key.
    pub fn key(&self) -> OfferKey {
        self.key
    }

    /// Return the display name of the offer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this offer refuses to share line quantity with other offers.
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Return the benefit this offer grants.
    pub fn benefit(&self) -> &Benefit<'a> {
        &self.benefit
    }
}

/// The offers applied to a basket at a point in time, keyed by [`OfferKey`].
///
/// Two snapshots taken before and after an action are compared with
/// [`OfferSet::difference`] to find lost and gained offers.
#[derive(Debug, Clone, Default)]
pub struct OfferSet<'a> {
    offers: FxHashMap<OfferKey, Offer<'a>>,
}

impl<'a> OfferSet<'a> {
    /// Create an empty offer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an offer, keyed by its own key.
    ///
    /// Returns the previous offer stored under the same key, if any.
    pub fn insert(&mut self, offer: Offer<'a>) -> Option<Offer<'a>> {
        self.offers.insert(offer.key(), offer)
    }

    /// Look up an offer by key.
    pub fn get(&self, key: OfferKey) -> Option<&Offer<'a>> {
        self.offers.get(&key)
    }

    /// Whether an offer with the given key is in the set.
    pub fn contains(&self, key: OfferKey) -> bool {
        self.offers.contains_key(&key)
    }

    /// Keys present in this set but absent from `other`, sorted by key.
    ///
    /// Sorting makes the lost/gained message order deterministic; the
    /// underlying map iteration order is not.
    pub fn difference(&self, other: &OfferSet<'_>) -> SmallVec<[OfferKey; 8]> {
        let mut keys: SmallVec<[OfferKey; 8]> = self
            .offers
            .keys()
            .filter(|key| !other.contains(**key))
            .copied()
            .collect();

        keys.sort_unstable();

        keys
    }

    /// Iterate over the offers in the set (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Offer<'a>> {
        self.offers.values()
    }

    /// Get the number of offers in the set.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl<'a> FromIterator<Offer<'a>> for OfferSet<'a> {
    fn from_iter<I: IntoIterator<Item = Offer<'a>>>(iter: I) -> Self {
        let mut set = Self::new();

        for offer in iter {
            set.insert(offer);
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};
    use slotmap::SlotMap;

    use super::{benefit::Benefit, *};

    fn test_offer<'a>(keys: &mut SlotMap<OfferKey, ()>, name: &str) -> Offer<'a> {
        Offer::new(
            keys.insert(()),
            name,
            false,
            Benefit::FixedDiscount(Money::from_minor(100, GBP)),
        )
    }

    #[test]
    fn insert_keys_by_offer_key() {
        let mut keys = SlotMap::with_key();
        let offer = test_offer(&mut keys, "Summer sale");
        let key = offer.key();

        let mut set = OfferSet::new();
        set.insert(offer);

        assert!(set.contains(key));
        assert_eq!(set.get(key).map(Offer::name), Some("Summer sale"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn difference_returns_keys_missing_from_other() {
        let mut keys = SlotMap::with_key();
        let kept = test_offer(&mut keys, "Kept");
        let dropped = test_offer(&mut keys, "Dropped");
        let dropped_key = dropped.key();

        let before: OfferSet<'_> = [kept.clone(), dropped].into_iter().collect();
        let after: OfferSet<'_> = [kept].into_iter().collect();

        let lost = before.difference(&after);

        assert_eq!(lost.as_slice(), &[dropped_key]);
        assert!(after.difference(&before).is_empty());
    }

    #[test]
    fn difference_is_sorted_by_key() {
        let mut keys = SlotMap::with_key();
        let offers: Vec<Offer<'_>> = (0..5)
            .map(|i| test_offer(&mut keys, &format!("Offer {i}")))
            .collect();

        let mut expected: Vec<OfferKey> = offers.iter().map(Offer::key).collect();
        expected.sort_unstable();

        let before: OfferSet<'_> = offers.into_iter().collect();
        let lost = before.difference(&OfferSet::new());

        assert_eq!(lost.as_slice(), expected.as_slice());
    }

    #[test]
    fn empty_set_has_no_offers() {
        let set = OfferSet::new();

        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(OfferKey::default()));
    }
}
