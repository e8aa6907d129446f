//! Basket Lines

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{TotalPriceError, line_total},
    products::ProductKey,
};

/// One product/quantity entry in a basket.
///
/// The quantity is fixed for the life of the line; offer application passes
/// read it but never change it.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    product: ProductKey,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> Line<'a> {
    /// Create a new line for a product with the given quantity and unit price.
    pub fn new(product: ProductKey, quantity: u32, unit_price: Money<'a, Currency>) -> Self {
        Self {
            product,
            quantity,
            unit_price,
        }
    }

    /// Key of the product this line holds.
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Quantity of the product on this line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price of the product on this line.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Total price of the line (unit price times quantity).
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the multiplication overflows minor units.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        line_total(self)
    }
}
