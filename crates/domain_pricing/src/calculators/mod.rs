//! Service calculators, one per service family
//!
//! Every calculator is a pure function from a validated payload to a
//! [`PriceCalculationResult`], composed from the tier resolvers and the rate
//! book. Component order within a calculator is canonical: it is the order
//! internal staff see and it must be stable across recalculation.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::warn;

use core_kernel::{Currency, Money};

use crate::error::PricingError;
use crate::rates::{RateBook, RateKey, RateSource};
use crate::request::ServicePayload;
use crate::result::{BreakdownAccumulator, PriceCalculationResult, StepRecord};

pub mod chartering;
pub mod disbursement;
pub mod freight_forwarding;
pub mod shipping_agency;

/// Quotations are issued in USD
pub(crate) const CURRENCY: Currency = Currency::USD;

/// Prices a service request by dispatching on the payload union
///
/// The match is exhaustive: adding a service family forces a calculator
/// decision here at compile time.
pub fn calculate_price(
    payload: &ServicePayload,
    rates: &RateBook,
) -> Result<PriceCalculationResult, PricingError> {
    match payload {
        ServicePayload::FreightForwarding(request) => freight_forwarding::calculate(request, rates),
        ServicePayload::ShippingAgency(request) => shipping_agency::calculate(request, rates),
        ServicePayload::Chartering(request) => chartering::calculate(request, rates),
    }
}

/// Resolves a rate and records last-resort fallbacks in the audit trail
///
/// Fallback use is not an error - a usable quote beats precision for
/// unmodeled inputs - but it must leave an audit step behind.
pub(crate) fn lookup_rate(
    acc: &mut BreakdownAccumulator,
    rates: &RateBook,
    key: &RateKey,
    component: &str,
) -> Result<Decimal, PricingError> {
    let resolved = rates.resolve(key)?;

    if resolved.source == RateSource::LastResort {
        warn!(
            component,
            category = %key.category,
            rate = %resolved.value,
            "no filed or default rate matched; using last-resort rate"
        );
        let record = StepRecord::new(
            format!("RATE_FALLBACK_{}", key.category),
            component,
            "LAST_RESORT_RATE",
            json!({
                "service_type": key.service_type,
                "category": key.category.to_string(),
                "origin": key.origin,
                "destination": key.destination,
                "rate": resolved.value,
            }),
        )
        .rate(resolved.value)
        .notes("last-resort flat rate applied; no filed or default rate matched");
        acc.add_audit_step(record, Money::new(resolved.value, acc.currency()));
    }

    Ok(resolved.value)
}
