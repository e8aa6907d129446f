//! Wicker
//!
//! Wicker is a storefront basket engine for offer change messaging and per-line
//! offer consumption accounting: it diffs applied-offer snapshots into leveled
//! flash messages, and allocates each basket line's quantity across competing
//! discount offers, including exclusive offers that refuse to share.

pub mod basket;
pub mod fixtures;
pub mod messages;
pub mod offers;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod utils;
