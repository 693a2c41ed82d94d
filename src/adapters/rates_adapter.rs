//! Fixed-rate currency conversion adapter.
//!
//! Rates are expressed against a base currency (EUR): the table maps each
//! currency to how many of its units one EUR buys. Conversion goes source →
//! base → target and rounds to 4 decimal places, half away from zero.

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::currency::Currency;
use crate::domain::error::PricerError;
use crate::domain::money::round_half_up;
use crate::ports::config_port::ConfigPort;
use crate::ports::rate_port::RatePort;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub struct RateTableAdapter {
    rates: HashMap<Currency, Decimal>,
}

impl RateTableAdapter {
    /// The built-in table: EUR 1.00, USD 1.09, EGP 54.35 per EUR.
    pub fn with_default_rates() -> Self {
        let mut rates = HashMap::new();
        rates.insert(Currency::Eur, Decimal::ONE);
        rates.insert(Currency::Usd, Decimal::new(109, 2));
        rates.insert(Currency::Egp, Decimal::new(5435, 2));
        Self { rates }
    }

    /// Build the table from the `[rates]` config section when present,
    /// falling back to the defaults otherwise. Each key is a currency code,
    /// each value its per-EUR rate; unknown codes and non-positive rates are
    /// config errors.
    pub fn from_config(config: &FileConfigAdapter) -> Result<Self, PricerError> {
        let keys: Vec<String> = config
            .section_keys("rates")
            .into_iter()
            .filter(|k| k != "base")
            .collect();
        if keys.is_empty() {
            return Ok(Self::with_default_rates());
        }

        let mut rates = HashMap::new();
        for key in keys {
            let currency =
                Currency::from_code(&key).map_err(|_| PricerError::ConfigInvalid {
                    section: "rates".into(),
                    key: key.clone(),
                    reason: "unknown currency code".into(),
                })?;
            let raw = config
                .get_string("rates", &key)
                .unwrap_or_default();
            let rate: Decimal = raw.trim().parse().map_err(|_| PricerError::ConfigInvalid {
                section: "rates".into(),
                key: key.clone(),
                reason: format!("not a decimal rate: {raw}"),
            })?;
            if rate <= Decimal::ZERO {
                return Err(PricerError::ConfigInvalid {
                    section: "rates".into(),
                    key,
                    reason: format!("rate must be positive: {rate}"),
                });
            }
            rates.insert(currency, rate);
        }

        Ok(Self { rates })
    }

    fn rate_for(&self, currency: Currency) -> Result<Decimal, PricerError> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or_else(|| PricerError::UnsupportedCurrency {
                code: currency.code().to_string(),
            })
    }
}

impl RatePort for RateTableAdapter {
    fn convert(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
    ) -> Result<Decimal, PricerError> {
        if from == to {
            return Ok(amount);
        }
        let from_rate = self.rate_for(from)?;
        let to_rate = self.rate_for(to)?;
        let in_base = amount / from_rate;
        Ok(round_half_up(in_base * to_rate, 4))
    }

    fn supported_currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<Currency> = self.rates.keys().copied().collect();
        currencies.sort();
        currencies
    }
}
