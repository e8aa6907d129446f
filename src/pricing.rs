//! Prices

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::basket::line::Line;

/// Errors that can occur while calculating line or basket totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No lines were provided, so currency could not be determined.
    #[error("no lines provided; cannot determine currency")]
    NoLines,

    /// A line total does not fit in minor units.
    #[error("line total overflows minor units: {unit_minor} x {quantity}")]
    QuantityOverflow {
        /// Unit price in minor units
        unit_minor: i64,

        /// Line quantity
        quantity: u32,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total price of a single line (unit price times quantity).
///
/// # Errors
///
/// - [`TotalPriceError::QuantityOverflow`]: The multiplication does not fit in minor units.
pub fn line_total<'a>(line: &Line<'a>) -> Result<Money<'a, Currency>, TotalPriceError> {
    let unit_minor = line.unit_price().to_minor_units();

    let total_minor = unit_minor
        .checked_mul(i64::from(line.quantity()))
        .ok_or(TotalPriceError::QuantityOverflow {
            unit_minor,
            quantity: line.quantity(),
        })?;

    Ok(Money::from_minor(total_minor, line.unit_price().currency()))
}

/// Calculates the total price of a list of lines
///
/// # Errors
///
/// - [`TotalPriceError::NoLines`]: No lines were provided, so currency could not be determined.
/// - [`TotalPriceError::QuantityOverflow`]: A line total does not fit in minor units.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(lines: &[Line<'a>]) -> Result<Money<'a, Currency>, TotalPriceError> {
    let first = lines.first().ok_or(TotalPriceError::NoLines)?;

    let total = lines.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, line| Ok::<_, TotalPriceError>(acc.add(line_total(line)?)?),
    )?;

    Ok(total)
}
