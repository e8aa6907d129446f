//! Wicker prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError, line::Line},
    fixtures::{Fixture, FixtureError},
    messages::{
        FlashMessage, MessageError, MessageTags, Severity,
        generator::{BasketMessageGenerator, Session},
        sink::{FlashQueue, FlashSink},
        templates::{MessageTemplates, PlainTemplates, TemplateContext, TextTemplates},
    },
    offers::{
        Offer, OfferKey, OfferSet,
        applications::{OfferApplication, OfferApplications},
        applicator::OfferApplicator,
        benefit::{Benefit, BenefitError},
        consumer::LineOfferConsumer,
    },
    pricing::{TotalPriceError, line_total, total_price},
    products::{Product, ProductKey},
};
