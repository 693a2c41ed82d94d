//! Validity intervals for price-list entries.
//!
//! An interval is inclusive on both ends; a missing end date means the entry
//! stays valid indefinitely. Overlap math substitutes `NaiveDate::MAX` for a
//! missing end so open-ended intervals compare like any other.

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("end date {to} must be after start date {from}")]
pub struct IntervalError {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// An inclusive date range, optionally open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidityInterval {
    from: NaiveDate,
    to: Option<NaiveDate>,
}

impl ValidityInterval {
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Result<Self, IntervalError> {
        if let Some(to) = to {
            if to <= from {
                return Err(IntervalError { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// Open-ended interval starting at `from`.
    pub fn starting(from: NaiveDate) -> Self {
        Self { from, to: None }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    fn effective_end(&self) -> NaiveDate {
        self.to.unwrap_or(NaiveDate::MAX)
    }

    pub fn is_open_ended(&self) -> bool {
        self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.effective_end()
    }

    /// Symmetric test: two intervals overlap unless one ends strictly before
    /// the other starts.
    pub fn overlaps_with(&self, other: &ValidityInterval) -> bool {
        self.from <= other.effective_end() && other.from <= self.effective_end()
    }

    pub fn has_expired(&self, today: NaiveDate) -> bool {
        matches!(self.to, Some(to) if to < today)
    }

    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.contains(today)
    }

    pub fn is_future(&self, today: NaiveDate) -> bool {
        self.from > today
    }
}

impl fmt::Display for ValidityInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to {
            Some(to) => write!(f, "{} to {}", self.from, to),
            None => write!(f, "from {}", self.from),
        }
    }
}
