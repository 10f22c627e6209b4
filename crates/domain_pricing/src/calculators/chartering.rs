//! Chartering and broking price calculation
//!
//! Two base components: the route-keyed voyage charter rate and the
//! brokerage commission on top of it. Route economics cannot be
//! generalized, so lane rates come from the override table; the compiled
//! default only anchors unfiled lanes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tracing::info;

use core_kernel::{Money, Rate};

use super::{lookup_rate, CURRENCY};
use crate::error::PricingError;
use crate::rates::{FeeCategory, RateBook, RateKey};
use crate::request::{CharteringRequest, ServiceType};
use crate::result::{BreakdownAccumulator, PriceCalculationResult, StepRecord};

const BROKERAGE_RATE: Decimal = dec!(0.025);

/// Prices a chartering request
pub fn calculate(
    request: &CharteringRequest,
    rates: &RateBook,
) -> Result<PriceCalculationResult, PricingError> {
    request.validate()?;

    info!(
        loading = %request.loading_port,
        discharging = %request.discharging_port,
        charter_type = ?request.charter_type,
        "calculating chartering price"
    );

    let mut acc = BreakdownAccumulator::new(CURRENCY);

    // 1. Voyage charter base rate for the lane
    let voyage_key = RateKey::route(
        ServiceType::Chartering,
        FeeCategory::VoyageCharter,
        &request.loading_port,
        &request.discharging_port,
    );
    let voyage_rate = lookup_rate(&mut acc, rates, &voyage_key, "Voyage Charter")?;
    let voyage = Money::new(voyage_rate, CURRENCY).round_to_currency();
    acc.add_base(
        "Voyage Charter",
        format!("{} to {}", request.loading_port, request.discharging_port),
        Decimal::ONE,
        Some(voyage),
        voyage,
        StepRecord::new(
            "VOYAGE_CHARTER",
            "Voyage Charter Rate",
            "ROUTE_BASE_RATE",
            json!({
                "from": request.loading_port,
                "to": request.discharging_port,
                "rate": voyage_rate,
            }),
        )
        .base_value(voyage_rate)
        .multiplier(Decimal::ONE),
    );

    // 2. Brokerage commission
    let brokerage = voyage.mul_rounded(BROKERAGE_RATE);
    acc.add_base(
        "Brokerage Fee",
        "2.5% of voyage charter",
        Decimal::ONE,
        Some(brokerage),
        brokerage,
        StepRecord::new(
            "BROKERAGE",
            "Brokerage Fee",
            "VOYAGE_RATE × 0.025",
            json!({ "voyage_rate": voyage.amount(), "rate": BROKERAGE_RATE }),
        )
        .base_value(voyage.amount())
        .rate(BROKERAGE_RATE),
    );

    let result = acc.finalize(Rate::zero());

    info!(finals = %result.final_amount, "chartering price calculated");

    Ok(result)
}
