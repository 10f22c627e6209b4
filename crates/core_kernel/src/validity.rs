//! Validity windows for time-bounded offers
//!
//! A quotation is a priced offer that the customer may act on only within
//! its validity window. Expiry is evaluated against a caller-supplied date
//! rather than an internal clock so that lifecycle checks stay testable.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default validity of a freshly generated quotation, in days.
pub const DEFAULT_VALIDITY_DAYS: i64 = 30;

/// Errors related to validity window construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidityError {
    #[error("Invalid window: issued {issued} must not be after expiry {expires}")]
    InvertedWindow {
        issued: NaiveDate,
        expires: NaiveDate,
    },
}

/// The period during which a quotation can be accepted
///
/// Both bounds are inclusive: a quotation expiring on a given date is still
/// acceptable on that date and stops being acceptable the day after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    /// The date the offer was issued
    pub issued_on: NaiveDate,
    /// The last date the offer can be accepted
    pub expires_on: NaiveDate,
}

impl ValidityWindow {
    /// Creates a validity window, rejecting inverted bounds
    pub fn new(issued_on: NaiveDate, expires_on: NaiveDate) -> Result<Self, ValidityError> {
        if issued_on > expires_on {
            return Err(ValidityError::InvertedWindow {
                issued: issued_on,
                expires: expires_on,
            });
        }
        Ok(Self {
            issued_on,
            expires_on,
        })
    }

    /// Creates the standard 30-day window starting at the given date
    pub fn standard(issued_on: NaiveDate) -> Self {
        Self {
            issued_on,
            expires_on: issued_on + Duration::days(DEFAULT_VALIDITY_DAYS),
        }
    }

    /// Returns true if the window has elapsed as of the given date
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        on > self.expires_on
    }

    /// Days remaining before expiry as of the given date (zero if expired)
    pub fn days_remaining(&self, on: NaiveDate) -> i64 {
        (self.expires_on - on).num_days().max(0)
    }
}
