//! Offer Application Engine Seam

use crate::basket::Basket;

/// The offer application engine this crate drives but does not implement.
///
/// Implementations decide which offers a basket is eligible for and what
/// discount each grants, recording the outcome through
/// [`Basket::applications_mut`]. Request or customer context belongs to the
/// implementor, which is constructed per request.
///
/// A fixture-backed implementation lives at
/// [`crate::fixtures::offers::ThresholdApplicator`].
pub trait OfferApplicator<'a> {
    /// Error produced when an application pass fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Remove every offer application from the basket.
    fn reset_applications(&self, basket: &mut Basket<'a>) {
        basket.reset_offer_applications();
    }

    /// Apply eligible offers to the basket, recording their applications.
    ///
    /// # Errors
    ///
    /// Engine failures propagate to the caller unmodified.
    fn apply(&self, basket: &mut Basket<'a>) -> Result<(), Self::Error>;
}
