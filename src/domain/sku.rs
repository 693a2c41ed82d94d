//! Product SKU identifiers.

use std::fmt;

pub const MAX_SKU_LENGTH: usize = 50;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SkuError {
    #[error("SKU cannot be empty")]
    Empty,

    #[error("SKU cannot exceed {MAX_SKU_LENGTH} characters: {value}")]
    TooLong { value: String },

    #[error("invalid SKU format: {value}")]
    InvalidFormat { value: String },
}

/// A normalized SKU: uppercase, at most 50 characters, alphanumeric plus
/// hyphens, first character alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sku(String);

impl Sku {
    pub fn new(value: &str) -> Result<Self, SkuError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SkuError::Empty);
        }
        if trimmed.len() > MAX_SKU_LENGTH {
            return Err(SkuError::TooLong {
                value: trimmed.to_string(),
            });
        }

        let normalized = trimmed.to_uppercase();
        let first_is_alnum = normalized
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        if !first_is_alnum
            || !normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(SkuError::InvalidFormat {
                value: trimmed.to_string(),
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
