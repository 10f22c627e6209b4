//! Shipping agency quick estimate
//!
//! The single-pass variant used for customer-facing estimates: three base
//! components scaled by the vessel's banded multipliers. No surcharges,
//! discounts, or tax - the final amount is the base price exactly. The full
//! per-call disbursement account lives in [`super::disbursement`]; the two
//! serve different audiences and are deliberately not merged.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use core_kernel::{Money, Rate};

use super::{lookup_rate, CURRENCY};
use crate::error::PricingError;
use crate::rates::{FeeCategory, RateBook, RateKey};
use crate::request::{ServiceType, ShippingAgencyRequest};
use crate::result::{BreakdownAccumulator, PriceCalculationResult, StepRecord};
use crate::tiers::{dwt_factor, grt_factor, loa_factor};

/// Prices a shipping agency port call as a quick estimate
pub fn calculate(
    request: &ShippingAgencyRequest,
    rates: &RateBook,
) -> Result<PriceCalculationResult, PricingError> {
    request.validate()?;

    info!(
        port = %request.port_of_call,
        grt = request.grt,
        dwt = request.dwt,
        loa = %request.loa,
        "calculating shipping agency estimate"
    );

    let mut acc = BreakdownAccumulator::new(CURRENCY);

    // 1. Port dues, scaled by gross tonnage
    let port_dues_key = RateKey::flat(ServiceType::ShippingAgency, FeeCategory::PortDues);
    let port_dues_rate = lookup_rate(&mut acc, rates, &port_dues_key, "Port Dues")?;
    let grt_factor = grt_factor(request.grt);
    let port_dues = Money::new(port_dues_rate, CURRENCY).mul_rounded(grt_factor);
    acc.add_base(
        "Port Dues",
        format!("GRT {} × Factor {}", request.grt, grt_factor),
        Decimal::ONE,
        Some(port_dues),
        port_dues,
        StepRecord::new(
            "PORT_DUES",
            "Port Dues",
            "BASE_RATE × GRT_FACTOR",
            json!({ "base_rate": port_dues_rate, "grt": request.grt, "factor": grt_factor }),
        )
        .base_value(port_dues_rate)
        .multiplier(grt_factor),
    );

    // 2. Agency fee, scaled by deadweight
    let agency_key = RateKey::flat(ServiceType::ShippingAgency, FeeCategory::AgencyFee);
    let agency_rate = lookup_rate(&mut acc, rates, &agency_key, "Agency Fee")?;
    let dwt_factor = dwt_factor(request.dwt);
    let agency_fee = Money::new(agency_rate, CURRENCY).mul_rounded(dwt_factor);
    acc.add_base(
        "Agency Fee",
        format!("DWT {} × Factor {}", request.dwt, dwt_factor),
        Decimal::ONE,
        Some(agency_fee),
        agency_fee,
        StepRecord::new(
            "AGENCY_FEE",
            "Agency Fee",
            "BASE_RATE × DWT_FACTOR",
            json!({ "base_rate": agency_rate, "dwt": request.dwt, "factor": dwt_factor }),
        )
        .base_value(agency_rate)
        .multiplier(dwt_factor),
    );

    // 3. Pilotage, scaled by vessel length
    let pilotage_key = RateKey::flat(ServiceType::ShippingAgency, FeeCategory::Pilotage);
    let pilotage_rate = lookup_rate(&mut acc, rates, &pilotage_key, "Pilotage Service")?;
    let loa_factor = loa_factor(request.loa);
    let pilotage = Money::new(pilotage_rate, CURRENCY).mul_rounded(loa_factor);
    acc.add_base(
        "Pilotage Service",
        format!("LOA {}m × Factor {}", request.loa, loa_factor),
        Decimal::ONE,
        Some(pilotage),
        pilotage,
        StepRecord::new(
            "PILOTAGE",
            "Pilotage",
            "BASE_RATE × LOA_FACTOR",
            json!({ "base_rate": pilotage_rate, "loa": request.loa, "factor": loa_factor }),
        )
        .base_value(pilotage_rate)
        .multiplier(loa_factor),
    );

    let result = acc.finalize(Rate::zero());

    info!(finals = %result.final_amount, "shipping agency estimate calculated");

    Ok(result)
}
