//! Quotation domain errors
//!
//! Each failure kind is distinct because upstream messaging differs:
//! "wrong state", "expired", and "not yours" drive different user-facing
//! responses.

use thiserror::Error;

use domain_pricing::PricingError;

/// Errors that can occur in the quotation domain
#[derive(Debug, Error)]
pub enum QuotationError {
    /// A lifecycle method was invoked from a state that does not permit it
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    /// The validity window had elapsed at accept-time
    #[error("Quotation has expired")]
    QuotationExpired,

    /// The caller does not own the quotation
    #[error("Quotation does not belong to the requesting party")]
    OwnershipViolation,

    /// An order already exists for this quotation
    #[error("An order has already been created for this quotation")]
    DuplicateOrder,

    /// The underlying price calculation failed
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// The original request payload could not be serialized for the snapshot
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QuotationError {
    /// Creates an invalid-transition error from state labels
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        QuotationError::InvalidStateTransition {
            from: from.into(),
            to: to.into(),
        }
    }
}
