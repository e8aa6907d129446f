//! Basket Fixtures

use serde::Deserialize;

/// Wrapper for basket lines in YAML
#[derive(Debug, Deserialize)]
pub struct BasketFixture {
    /// Lines in the fixture basket, in order
    pub lines: Vec<LineFixture>,
}

/// One basket line in YAML
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// String key of the product the line holds
    pub product: String,

    /// Quantity of the product
    pub quantity: u32,
}
