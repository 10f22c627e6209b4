//! Pricing domain errors

use crate::rates::FeeCategory;
use crate::request::ServiceType;
use thiserror::Error;

/// Errors that can occur while pricing a service request
///
/// Calculators fail fast: on any error the in-flight accumulator is
/// discarded wholesale and no partial breakdown escapes.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Rate lookup exhausted the override table, the compiled defaults, and
    /// found no last-resort constant configured
    #[error("No rate available for {service_type}/{category} and no last-resort rate is configured")]
    UnresolvedRate {
        service_type: ServiceType,
        category: FeeCategory,
    },

    /// A formula input is outside its expected domain
    #[error("Invalid input for {field}: {reason}")]
    InvalidFormulaInput {
        field: &'static str,
        reason: String,
    },

    /// The port is not part of the tariff enumeration
    ///
    /// Every disbursement rate is port-specific by construction, so an
    /// unrecognized port is a validation failure, never a silent default.
    #[error("Unknown port: {0}")]
    UnknownPort(String),
}

impl PricingError {
    /// Creates an invalid-input error
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidFormulaInput {
            field,
            reason: reason.into(),
        }
    }
}
