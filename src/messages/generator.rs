//! Basket Message Generation
//!
//! Diffs applied-offer snapshots taken before and after an action and turns
//! the changes into leveled flash messages.

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    basket::Basket,
    messages::{
        FlashMessage, MessageError, MessageTags, Severity,
        sink::FlashSink,
        templates::{MessageTemplates, TemplateContext, TextTemplates},
    },
    offers::{OfferSet, applicator::OfferApplicator},
};

/// Request-scoped context for one basket interaction: the basket being
/// worked on and the flash sink messages for that request land in.
#[derive(Debug)]
pub struct Session<'a, S: FlashSink> {
    /// The customer's basket
    pub basket: Basket<'a>,

    /// Where this request's flash messages go
    pub messages: S,
}

impl<'a, S: FlashSink> Session<'a, S> {
    /// Create a session around a basket and a flash sink.
    pub fn new(basket: Basket<'a>, messages: S) -> Self {
        Self { basket, messages }
    }
}

/// Generates flash messages for changes to a basket's applied offers.
///
/// All operations except [`apply_changes`](Self::apply_changes) are pure
/// functions of their inputs.
#[derive(Debug, Clone, Default)]
pub struct BasketMessageGenerator<T: MessageTemplates> {
    templates: T,
}

impl<T: MessageTemplates> BasketMessageGenerator<T> {
    /// Create a generator rendering through the given templates.
    pub fn new(templates: T) -> Self {
        Self { templates }
    }

    fn render(&self, context: &TemplateContext<'_, '_>) -> Result<String, MessageError> {
        self.templates
            .render(context)
            .map_err(|err| MessageError::Render(Box::new(err)))
    }

    /// The single new-total message summarising the basket after a change.
    ///
    /// `include_buttons` controls whether the rendering carries a checkout
    /// call-to-action; pass false on the basket page itself.
    ///
    /// # Errors
    ///
    /// Returns a [`MessageError`] if rendering fails.
    pub fn new_total_messages(
        &self,
        basket: &Basket<'_>,
        include_buttons: bool,
    ) -> Result<SmallVec<[FlashMessage; 4]>, MessageError> {
        let text = self.render(&TemplateContext::NewTotal {
            basket,
            include_buttons,
        })?;

        let mut messages = SmallVec::new();
        messages.push(FlashMessage::new(Severity::Info, text));

        Ok(messages)
    }

    /// A warning message for every offer in `before` that is absent from
    /// `after`, ordered by offer key.
    ///
    /// # Errors
    ///
    /// Returns a [`MessageError`] if rendering fails.
    pub fn offer_lost_messages(
        &self,
        before: &OfferSet<'_>,
        after: &OfferSet<'_>,
    ) -> Result<SmallVec<[FlashMessage; 4]>, MessageError> {
        let mut messages = SmallVec::new();

        for offer in before
            .difference(after)
            .into_iter()
            .filter_map(|key| before.get(key))
        {
            let text = self.render(&TemplateContext::OfferLost { offer })?;

            messages.push(FlashMessage::new(Severity::Warning, text));
        }

        Ok(messages)
    }

    /// A success message for every offer in `after` that is absent from
    /// `before`, ordered by offer key.
    ///
    /// # Errors
    ///
    /// Returns a [`MessageError`] if rendering fails.
    pub fn offer_gained_messages(
        &self,
        before: &OfferSet<'_>,
        after: &OfferSet<'_>,
    ) -> Result<SmallVec<[FlashMessage; 4]>, MessageError> {
        let mut messages = SmallVec::new();

        for offer in after
            .difference(before)
            .into_iter()
            .filter_map(|key| after.get(key))
        {
            let text = self.render(&TemplateContext::OfferGained { offer })?;

            messages.push(FlashMessage::new(Severity::Success, text));
        }

        Ok(messages)
    }

    /// All lost-offer messages followed by all gained-offer messages.
    ///
    /// # Errors
    ///
    /// Returns a [`MessageError`] if rendering fails.
    pub fn offer_messages(
        &self,
        before: &OfferSet<'_>,
        after: &OfferSet<'_>,
    ) -> Result<SmallVec<[FlashMessage; 4]>, MessageError> {
        let mut messages = self.offer_lost_messages(before, after)?;

        messages.extend(self.offer_gained_messages(before, after)?);

        Ok(messages)
    }

    /// The full message sequence for an offer change: lost, then gained,
    /// then the single new-total message.
    ///
    /// # Errors
    ///
    /// Returns a [`MessageError`] if rendering fails.
    pub fn messages(
        &self,
        basket: &Basket<'_>,
        before: &OfferSet<'_>,
        after: &OfferSet<'_>,
        include_buttons: bool,
    ) -> Result<SmallVec<[FlashMessage; 4]>, MessageError> {
        let mut messages = self.offer_messages(before, after)?;

        messages.extend(self.new_total_messages(basket, include_buttons)?);

        Ok(messages)
    }

    /// Re-apply offers to the session's basket and enqueue flash messages
    /// for whatever changed.
    ///
    /// `before` is the applied-offer snapshot taken before the triggering
    /// action. The basket's applications are reset, the applicator runs, and
    /// the resulting snapshot is diffed against `before`; every message is
    /// enqueued tagged as pre-escaped markup with no icon.
    ///
    /// # Errors
    ///
    /// Applicator and rendering failures propagate as a [`MessageError`].
    pub fn apply_changes<'a, A, S>(
        &self,
        session: &mut Session<'a, S>,
        applicator: &A,
        before: &OfferSet<'_>,
        include_buttons: bool,
    ) -> Result<(), MessageError>
    where
        A: OfferApplicator<'a>,
        S: FlashSink,
    {
        applicator.reset_applications(&mut session.basket);
        applicator
            .apply(&mut session.basket)
            .map_err(|err| MessageError::Apply(Box::new(err)))?;

        let after = session.basket.applied_offers();

        debug!(
            offers_before = before.len(),
            offers_after = after.len(),
            lost = before.difference(&after).len(),
            gained = after.difference(before).len(),
            "re-applied offers to basket"
        );

        for message in self.messages(&session.basket, before, &after, include_buttons)? {
            session
                .messages
                .enqueue(message.with_tags(MessageTags::safe_no_icon()));
        }

        Ok(())
    }
}

impl BasketMessageGenerator<TextTemplates> {
    /// A generator using the bundled [`TextTemplates`].
    pub fn text() -> Self {
        Self::new(TextTemplates)
    }
}
