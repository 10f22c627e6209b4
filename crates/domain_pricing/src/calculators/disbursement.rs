//! Shipping agency disbursement account
//!
//! The itemized per-call account used by the agency desk: thirteen ordered
//! components, every constant keyed by the port of call, each component
//! rounded to currency scale on its own. This variant coexists with the
//! quick estimate in [`super::shipping_agency`]; they serve different
//! audiences and use different formula sets.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tracing::info;

use core_kernel::{Money, Rate};

use super::CURRENCY;
use crate::error::PricingError;
use crate::request::{Port, ShippingAgencyRequest};
use crate::result::{BreakdownAccumulator, PriceCalculationResult, StepRecord};
use crate::tiers::{estimated_crew, pilotage_rate, tug_count};

/// Per-nautical-mile pilotage distance fee, both ports
const PILOTAGE_DISTANCE_FEE: Decimal = dec!(50);
/// Tug engagement hours per operation
const TUG_HOURS: Decimal = dec!(2.5);
/// Arrival plus departure
const OPERATIONS: Decimal = dec!(2);
/// Ocean freight tax over tonnage, navigation, and berth dues
const OCEAN_FREIGHT_TAX_RATE: Decimal = dec!(0.05);

/// Port-specific tariff constants for the disbursement account
#[derive(Debug, Clone, Copy)]
pub struct PortTariff {
    /// Tonnage fee per GRT per day alongside
    pub tonnage_rate: Decimal,
    /// Navigation due per GRT
    pub navigation_rate: Decimal,
    pub pilotage_base: Decimal,
    /// Pilotage distance in nautical miles
    pub pilotage_distance_nm: Decimal,
    pub tug_hourly_rate: Decimal,
    pub moor_base: Decimal,
    /// Mooring charge per metre of vessel length
    pub moor_loa_rate: Decimal,
    /// Berth due per DWT per hour
    pub berth_rate: Decimal,
    pub quarantine_base: Decimal,
    pub quarantine_crew_rate: Decimal,
    pub quarantine_transport: Decimal,
    /// Deadweight above which the over-DWT berthing surcharge applies
    pub dwt_limit: u32,
    pub over_dwt_fixed: Decimal,
    pub over_dwt_excess_rate: Decimal,
    pub clearance_fee: Decimal,
    pub garbage_base: Decimal,
    pub garbage_daily: Decimal,
}

impl Port {
    /// The published tariff for this port of call
    pub fn tariff(&self) -> PortTariff {
        match self {
            Port::Haiphong => PortTariff {
                tonnage_rate: dec!(0.025),
                navigation_rate: dec!(0.12),
                pilotage_base: dec!(400),
                pilotage_distance_nm: dec!(20),
                tug_hourly_rate: dec!(350),
                moor_base: dec!(200),
                moor_loa_rate: dec!(3.0),
                berth_rate: dec!(0.018),
                quarantine_base: dec!(300),
                quarantine_crew_rate: dec!(25),
                quarantine_transport: dec!(150),
                dwt_limit: 30000,
                over_dwt_fixed: dec!(500),
                over_dwt_excess_rate: dec!(0.05),
                clearance_fee: dec!(530),
                garbage_base: dec!(150),
                garbage_daily: dec!(30),
            },
            Port::HoChiMinh => PortTariff {
                tonnage_rate: dec!(0.028),
                navigation_rate: dec!(0.15),
                pilotage_base: dec!(500),
                pilotage_distance_nm: dec!(30),
                tug_hourly_rate: dec!(450),
                moor_base: dec!(250),
                moor_loa_rate: dec!(3.5),
                berth_rate: dec!(0.022),
                quarantine_base: dec!(350),
                quarantine_crew_rate: dec!(30),
                quarantine_transport: dec!(200),
                dwt_limit: 40000,
                over_dwt_fixed: dec!(600),
                over_dwt_excess_rate: dec!(0.06),
                clearance_fee: dec!(650),
                garbage_base: dec!(180),
                garbage_daily: dec!(35),
            },
        }
    }
}

fn usd(amount: Decimal) -> Money {
    Money::new(amount, CURRENCY).round_to_currency()
}

/// Produces the full disbursement account for a port call
pub fn calculate(request: &ShippingAgencyRequest) -> Result<PriceCalculationResult, PricingError> {
    request.validate()?;

    let port = request.port_of_call;
    let tariff = port.tariff();
    let grt = Decimal::from(request.grt);
    let dwt = Decimal::from(request.dwt);
    let loa = request.loa;
    let stay_days = Decimal::from(request.stay_days());
    let stay_hours = Decimal::from(request.stay_hours());

    info!(
        port = %port,
        grt = request.grt,
        dwt = request.dwt,
        stay_days = %stay_days,
        "calculating shipping agency disbursement account"
    );

    let mut acc = BreakdownAccumulator::new(CURRENCY);

    // 1. Tonnage fee
    let tonnage_fee = usd(grt * tariff.tonnage_rate * stay_days);
    acc.add_base(
        "Tonnage Fee",
        format!("GRT {} × Rate × {} days", request.grt, stay_days),
        Decimal::ONE,
        Some(tonnage_fee),
        tonnage_fee,
        StepRecord::new(
            "TONNAGE_FEE",
            "Tonnage Fee",
            "GRT × RATE × STAY_DAYS",
            json!({ "grt": request.grt, "rate": tariff.tonnage_rate, "days": stay_days }),
        )
        .base_value(grt)
        .rate(tariff.tonnage_rate)
        .multiplier(stay_days),
    );

    // 2. Navigation due
    let navigation_due = usd(grt * tariff.navigation_rate);
    acc.add_base(
        "Navigation Due",
        format!("GRT {} × Rate", request.grt),
        Decimal::ONE,
        Some(navigation_due),
        navigation_due,
        StepRecord::new(
            "NAVIGATION_DUE",
            "Navigation Due",
            "GRT × RATE",
            json!({ "grt": request.grt, "rate": tariff.navigation_rate }),
        )
        .base_value(grt)
        .rate(tariff.navigation_rate),
    );

    // 3. Pilotage: base fee + per-GRT bracket rate + distance fee
    let grt_rate = pilotage_rate(request.grt);
    let pilotage = usd(
        tariff.pilotage_base + grt * grt_rate + tariff.pilotage_distance_nm * PILOTAGE_DISTANCE_FEE,
    );
    acc.add_base(
        "Pilotage",
        format!("Base + (GRT {} × Rate) + Distance", request.grt),
        Decimal::ONE,
        Some(pilotage),
        pilotage,
        StepRecord::new(
            "PILOTAGE",
            "Pilotage",
            "BASE + GRT × RATE + DISTANCE_NM × 50",
            json!({
                "base": tariff.pilotage_base,
                "grt": request.grt,
                "rate": grt_rate,
                "distance_nm": tariff.pilotage_distance_nm,
            }),
        )
        .base_value(tariff.pilotage_base)
        .rate(grt_rate),
    );

    // 4. Tug assistance, arrival and departure
    let tugs = tug_count(loa, request.dwt);
    let tug_assistance = usd(Decimal::from(tugs) * tariff.tug_hourly_rate * TUG_HOURS * OPERATIONS);
    acc.add_base(
        "Tug Assistance Charge",
        format!("{loa}m LOA → {tugs} tugs × 2 operations"),
        Decimal::ONE,
        Some(tug_assistance),
        tug_assistance,
        StepRecord::new(
            "TUG_ASSISTANCE",
            "Tug Assistance",
            "TUGS × HOURLY_RATE × HOURS × OPERATIONS",
            json!({
                "tugs": tugs,
                "hourly_rate": tariff.tug_hourly_rate,
                "hours": TUG_HOURS,
                "operations": OPERATIONS,
            }),
        )
        .rate(tariff.tug_hourly_rate)
        .multiplier(Decimal::from(tugs)),
    );

    // 5. Moor/unmoor, doubled for the two operations
    let moor_unmoor = usd((tariff.moor_base + loa * tariff.moor_loa_rate) * OPERATIONS);
    acc.add_base(
        "Moor/Unmooring Charge",
        format!("{loa}m LOA × 2 operations"),
        Decimal::ONE,
        Some(moor_unmoor),
        moor_unmoor,
        StepRecord::new(
            "MOOR_UNMOOR",
            "Moor/Unmoor",
            "(BASE + LOA × RATE) × 2",
            json!({ "base": tariff.moor_base, "loa": loa, "rate": tariff.moor_loa_rate }),
        )
        .base_value(tariff.moor_base)
        .rate(tariff.moor_loa_rate),
    );

    // 6. Berth due
    let berth_due = usd(dwt * tariff.berth_rate * stay_hours);
    acc.add_base(
        "Berth Due",
        format!("DWT {} × Rate × {} hours", request.dwt, stay_hours),
        Decimal::ONE,
        Some(berth_due),
        berth_due,
        StepRecord::new(
            "BERTH_DUE",
            "Berth Due",
            "DWT × RATE × STAY_HOURS",
            json!({ "dwt": request.dwt, "rate": tariff.berth_rate, "hours": stay_hours }),
        )
        .base_value(dwt)
        .rate(tariff.berth_rate)
        .multiplier(stay_hours),
    );

    // 7. Anchorage fees: zero unless waiting time is modeled
    let anchorage = Money::zero(CURRENCY);
    acc.add_base(
        "Anchorage Fees",
        "No waiting time",
        Decimal::ONE,
        Some(anchorage),
        anchorage,
        StepRecord::new("ANCHORAGE", "Anchorage Fees", "NO_WAITING_TIME", json!({})),
    );

    // 8. Quarantine fee
    let crew = estimated_crew(request.dwt);
    let quarantine_fee =
        usd(tariff.quarantine_base + Decimal::from(crew) * tariff.quarantine_crew_rate);
    acc.add_base(
        "Quarantine Fee",
        format!("Base + {crew} crew"),
        Decimal::ONE,
        Some(quarantine_fee),
        quarantine_fee,
        StepRecord::new(
            "QUARANTINE_FEE",
            "Quarantine Fee",
            "BASE + CREW × PER_CREW_RATE",
            json!({
                "base": tariff.quarantine_base,
                "crew": crew,
                "per_crew_rate": tariff.quarantine_crew_rate,
            }),
        )
        .base_value(tariff.quarantine_base)
        .rate(tariff.quarantine_crew_rate),
    );

    // 9. Ocean freight tax over the tonnage/navigation/berth subtotal
    let tax_base = tonnage_fee + navigation_due + berth_due;
    let ocean_freight_tax = tax_base.mul_rounded(OCEAN_FREIGHT_TAX_RATE);
    acc.add_base(
        "Ocean Freight Tax",
        "5% of base fees",
        Decimal::ONE,
        Some(ocean_freight_tax),
        ocean_freight_tax,
        StepRecord::new(
            "OCEAN_FREIGHT_TAX",
            "Ocean Freight Tax",
            "(TONNAGE + NAVIGATION + BERTH) × 0.05",
            json!({ "base_fees": tax_base.amount(), "rate": OCEAN_FREIGHT_TAX_RATE }),
        )
        .base_value(tax_base.amount())
        .rate(OCEAN_FREIGHT_TAX_RATE),
    );

    // 10. Transport for quarantine formalities
    let transport = usd(tariff.quarantine_transport);
    acc.add_base(
        "Transport for Entry Quarantine Formality",
        "Fixed fee",
        Decimal::ONE,
        Some(transport),
        transport,
        StepRecord::new(
            "QUARANTINE_TRANSPORT",
            "Transport for Quarantine",
            "FIXED_FEE",
            json!({ "fee": tariff.quarantine_transport }),
        ),
    );

    // 11. Over-DWT berthing surcharge
    let (berthing_over_dwt, over_note) = if request.dwt > tariff.dwt_limit {
        let excess = Decimal::from(request.dwt - tariff.dwt_limit);
        (
            usd(tariff.over_dwt_fixed + excess * tariff.over_dwt_excess_rate),
            format!("DWT exceeds {} limit", tariff.dwt_limit),
        )
    } else {
        (Money::zero(CURRENCY), "Within limit".to_string())
    };
    acc.add_base(
        "Berthing Application to B.4 (Over DWT)",
        over_note,
        Decimal::ONE,
        Some(berthing_over_dwt),
        berthing_over_dwt,
        StepRecord::new(
            "BERTHING_OVER_DWT",
            "Over-DWT Berthing",
            "FIXED + EXCESS × RATE (if DWT > LIMIT)",
            json!({
                "dwt": request.dwt,
                "limit": tariff.dwt_limit,
                "fixed": tariff.over_dwt_fixed,
                "excess_rate": tariff.over_dwt_excess_rate,
            }),
        ),
    );

    // 12. Clearance fees
    let clearance = usd(tariff.clearance_fee);
    acc.add_base(
        "Clearance Fees",
        "Customs + Immigration + Port Authority + Certificates",
        Decimal::ONE,
        Some(clearance),
        clearance,
        StepRecord::new(
            "CLEARANCE_FEES",
            "Clearance Fees",
            "FIXED_FEE",
            json!({ "fee": tariff.clearance_fee }),
        ),
    );

    // 13. Garbage removal
    let garbage = usd(tariff.garbage_base + stay_days * tariff.garbage_daily);
    acc.add_base(
        "Garbage Removal Fee",
        format!("Base + {stay_days} days"),
        Decimal::ONE,
        Some(garbage),
        garbage,
        StepRecord::new(
            "GARBAGE_REMOVAL",
            "Garbage Removal",
            "BASE + STAY_DAYS × DAILY_RATE",
            json!({
                "base": tariff.garbage_base,
                "days": stay_days,
                "daily_rate": tariff.garbage_daily,
            }),
        )
        .base_value(tariff.garbage_base)
        .rate(tariff.garbage_daily)
        .multiplier(stay_days),
    );

    let result = acc.finalize(Rate::zero());

    info!(finals = %result.final_amount, "disbursement account calculated");

    Ok(result)
}
