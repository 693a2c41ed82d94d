//! Order quantities.

use std::fmt;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("quantity must be greater than zero, got {value}")]
pub struct QuantityError {
    pub value: i64,
}

/// A strictly positive unit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value <= 0 || value > u32::MAX as i64 {
            return Err(QuantityError { value });
        }
        Ok(Self(value as u32))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// True when this quantity satisfies an entry's minimum order quantity.
    pub fn meets_minimum(&self, minimum: Quantity) -> bool {
        self.0 >= minimum.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
