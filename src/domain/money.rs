//! Monetary amounts with a currency guard.
//!
//! Amounts are exact decimals; arithmetic and comparison between two amounts
//! require matching currencies.

use crate::domain::currency::Currency;
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("cannot {operation} amounts in {left} and {right}")]
    CurrencyMismatch {
        operation: &'static str,
        left: Currency,
        right: Currency,
    },

    #[error("amount cannot be negative: {amount}")]
    NegativeAmount { amount: Decimal },
}

/// A non-negative decimal amount in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::NegativeAmount { amount });
        }
        Ok(Self { amount, currency })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.require_same_currency("add", other)?;
        Ok(Money {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// Subtraction may yield a negative difference; callers that need the
    /// non-negative invariant should check [`Decimal::is_sign_negative`].
    pub fn sub(&self, other: &Money) -> Result<Decimal, MoneyError> {
        self.require_same_currency("subtract", other)?;
        Ok(self.amount - other.amount)
    }

    pub fn mul(&self, factor: Decimal) -> Money {
        Money {
            amount: self.amount * factor,
            currency: self.currency,
        }
    }

    pub fn cmp_amount(&self, other: &Money) -> Result<Ordering, MoneyError> {
        self.require_same_currency("compare", other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    fn require_same_currency(&self, operation: &'static str, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                operation,
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Round half away from zero to `dp` decimal places.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(s: &str) -> Money {
        Money::new(s.parse().unwrap(), Currency::Usd).unwrap()
    }

    fn eur(s: &str) -> Money {
        Money::new(s.parse().unwrap(), Currency::Eur).unwrap()
    }

    #[test]
    fn new_rejects_negative_amounts() {
        let err = Money::new("-0.01".parse().unwrap(), Currency::Usd).unwrap_err();
        assert!(matches!(err, MoneyError::NegativeAmount { .. }));
    }

    #[test]
    fn new_accepts_zero() {
        assert!(usd("0").is_zero());
    }

    #[test]
    fn add_same_currency() {
        let total = usd("10.25").add(&usd("4.75")).unwrap();
        assert_eq!(total.amount(), "15.00".parse::<Decimal>().unwrap());
        assert_eq!(total.currency(), Currency::Usd);
    }

    #[test]
    fn add_mismatched_currency_fails() {
        let err = usd("10").add(&eur("10")).unwrap_err();
        assert!(matches!(
            err,
            MoneyError::CurrencyMismatch {
                operation: "add",
                left: Currency::Usd,
                right: Currency::Eur,
            }
        ));
    }

    #[test]
    fn sub_may_go_negative() {
        let diff = usd("5").sub(&usd("8")).unwrap();
        assert!(diff.is_sign_negative());
    }

    #[test]
    fn sub_mismatched_currency_fails() {
        assert!(usd("5").sub(&eur("1")).is_err());
    }

    #[test]
    fn mul_scales_the_amount() {
        let total = usd("25.50").mul(Decimal::from(10));
        assert_eq!(total.amount(), "255.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn cmp_amount_orders_within_currency() {
        assert_eq!(
            usd("24.99").cmp_amount(&usd("25.00")).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            usd("25").cmp_amount(&usd("25.00")).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn cmp_amount_mismatched_currency_fails() {
        assert!(usd("1").cmp_amount(&eur("1")).is_err());
    }

    #[test]
    fn round_half_up_is_away_from_zero() {
        assert_eq!(
            round_half_up("2.345".parse().unwrap(), 2),
            "2.35".parse::<Decimal>().unwrap()
        );
        assert_eq!(
            round_half_up("2.5".parse().unwrap(), 0),
            "3".parse::<Decimal>().unwrap()
        );
        assert_eq!(
            round_half_up("22.22005".parse().unwrap(), 4),
            "22.2201".parse::<Decimal>().unwrap()
        );
    }
}
