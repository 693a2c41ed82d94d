//! Top-level error type and exit-code mapping.

use crate::domain::currency::CurrencyError;
use crate::domain::interval::IntervalError;
use crate::domain::money::MoneyError;
use crate::domain::quantity::QuantityError;
use crate::domain::sku::SkuError;

/// Top-level error type for pricer.
#[derive(Debug, thiserror::Error)]
pub enum PricerError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Sku(#[from] SkuError),

    #[error(transparent)]
    Currency(#[from] CurrencyError),

    #[error(transparent)]
    Quantity(#[from] QuantityError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Interval(#[from] IntervalError),

    #[error("invalid date '{value}': expected yyyy-MM-dd")]
    InvalidDate { value: String },

    #[error("no exchange rate configured for currency {code}")]
    UnsupportedCurrency { code: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PricerError> for std::process::ExitCode {
    fn from(err: &PricerError) -> Self {
        let code: u8 = match err {
            PricerError::Io(_) => 1,
            PricerError::ConfigParse { .. }
            | PricerError::ConfigMissing { .. }
            | PricerError::ConfigInvalid { .. } => 2,
            PricerError::Database { .. } | PricerError::DatabaseQuery { .. } => 3,
            PricerError::Sku(_)
            | PricerError::Currency(_)
            | PricerError::Quantity(_)
            | PricerError::Money(_)
            | PricerError::Interval(_)
            | PricerError::InvalidDate { .. } => 4,
            PricerError::UnsupportedCurrency { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
