//! Type-safe product price using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below the smallest positive unit.
    #[error("price must be at least {min}")]
    BelowMinimum {
        /// Smallest accepted amount.
        min: Decimal,
    },
    /// The amount does not fit the storage column.
    #[error("price must be at most {max}")]
    AboveMaximum {
        /// Largest accepted amount.
        max: Decimal,
    },
    /// The amount has more fractional digits than the storage column keeps.
    #[error("price must have at most {max} decimal places")]
    TooPrecise {
        /// Maximum number of decimal places.
        max: u32,
    },
}

/// A product price in the store's currency.
///
/// ## Constraints
///
/// - At least `1` (the smallest positive unit)
/// - At most `9999999999.99` (`NUMERIC(12, 2)`)
/// - At most two decimal places
///
/// ## Examples
///
/// ```
/// use backoffice_core::Price;
/// use rust_decimal::Decimal;
///
/// assert!(Price::new(Decimal::new(1999, 2)).is_ok());
/// assert!(Price::new(Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Smallest accepted price.
    pub const MIN: Decimal = Decimal::ONE;

    /// Largest accepted price.
    pub const MAX: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

    /// Maximum number of decimal places.
    pub const MAX_SCALE: u32 = 2;

    /// Validate an amount as a price.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is outside [`Price::MIN`]..=[`Price::MAX`]
    /// or has more than [`Price::MAX_SCALE`] decimal places.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Self::MIN {
            return Err(PriceError::BelowMinimum { min: Self::MIN });
        }
        if amount > Self::MAX {
            return Err(PriceError::AboveMaximum { max: Self::MAX });
        }

        let normalized = amount.normalize();
        if normalized.scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise {
                max: Self::MAX_SCALE,
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}
