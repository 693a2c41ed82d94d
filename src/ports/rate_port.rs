//! Currency conversion port trait.

use crate::domain::currency::Currency;
use crate::domain::error::PricerError;
use rust_decimal::Decimal;

pub trait RatePort {
    /// Convert an amount between currencies. Fails with
    /// [`PricerError::UnsupportedCurrency`] when no rate is configured for
    /// either side.
    fn convert(&self, amount: Decimal, from: Currency, to: Currency)
        -> Result<Decimal, PricerError>;

    fn supported_currencies(&self) -> Vec<Currency>;
}
