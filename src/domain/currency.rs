//! Supported currencies.

use std::fmt;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unsupported currency code: {code}")]
pub struct CurrencyError {
    pub code: String,
}

/// A 3-letter currency code from the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Currency {
    Eur,
    Usd,
    Egp,
}

pub const SUPPORTED_CURRENCIES: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Egp];

impl Currency {
    /// Parse a code, trimming and ignoring case. `"usd "` parses to `Usd`.
    pub fn from_code(code: &str) -> Result<Self, CurrencyError> {
        match code.trim().to_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "EGP" => Ok(Currency::Egp),
            _ => Err(CurrencyError {
                code: code.trim().to_string(),
            }),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Egp => "EGP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_accepts_supported_codes() {
        assert_eq!(Currency::from_code("EUR").unwrap(), Currency::Eur);
        assert_eq!(Currency::from_code("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_code("EGP").unwrap(), Currency::Egp);
    }

    #[test]
    fn from_code_normalizes_case_and_whitespace() {
        assert_eq!(Currency::from_code(" usd ").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_code("eUr").unwrap(), Currency::Eur);
    }

    #[test]
    fn from_code_rejects_unknown() {
        let err = Currency::from_code("GBP").unwrap_err();
        assert_eq!(err.code, "GBP");
    }

    #[test]
    fn from_code_rejects_empty() {
        assert!(Currency::from_code("").is_err());
        assert!(Currency::from_code("   ").is_err());
    }

    #[test]
    fn code_round_trips() {
        for c in SUPPORTED_CURRENCIES {
            assert_eq!(Currency::from_code(c.code()).unwrap(), c);
        }
    }

    #[test]
    fn display_is_the_code() {
        assert_eq!(Currency::Egp.to_string(), "EGP");
    }
}
