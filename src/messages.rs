//! Flash Messages
//!
//! Short-lived, request-scoped customer notifications produced when basket
//! contents or applied offers change.

use thiserror::Error;

use crate::pricing::TotalPriceError;

pub mod generator;
pub mod sink;
pub mod templates;

/// Severity of a flash message, used to style it when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information, such as a new basket total.
    Info,

    /// Good news, such as a newly gained offer.
    Success,

    /// Bad news, such as a lost offer.
    Warning,
}

/// Render hints attached to a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTags {
    /// The text is pre-escaped markup, safe to render as-is.
    pub safe: bool,

    /// Whether the displayed message carries an icon decoration.
    pub icon: bool,
}

impl MessageTags {
    /// Tags for basket messages: pre-escaped markup with no icon.
    pub const fn safe_no_icon() -> Self {
        Self {
            safe: true,
            icon: false,
        }
    }
}

impl Default for MessageTags {
    fn default() -> Self {
        Self {
            safe: false,
            icon: true,
        }
    }
}

/// A rendered, leveled customer notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    /// Severity the message is displayed at
    pub severity: Severity,

    /// Rendered message text
    pub text: String,

    /// Render hints
    pub tags: MessageTags,
}

impl FlashMessage {
    /// Create a message with the given severity and default tags.
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            tags: MessageTags::default(),
        }
    }

    /// Replace the message's render hints.
    #[must_use]
    pub fn with_tags(mut self, tags: MessageTags) -> Self {
        self.tags = tags;
        self
    }
}

/// Errors that can occur while generating basket messages.
#[derive(Debug, Error)]
pub enum MessageError {
    /// Template rendering failed.
    #[error("template rendering failed: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Offer re-application failed.
    #[error("offer application failed: {0}")]
    Apply(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Basket totals could not be calculated.
    #[error(transparent)]
    Total(#[from] TotalPriceError),
}
