//! Disbursement account calculator tests
//!
//! Anchored on the reference port call (Haiphong, GRT 8000, DWT 15000,
//! LOA 180m, 3-day stay) with every component value pinned.

mod common;

use rust_decimal_macros::dec;

use common::{assert_reconciled, date, haiphong_port_call, item_total};
use domain_pricing::calculators::disbursement;
use domain_pricing::{Port, PricingError};

#[test]
fn test_reference_port_call_component_values() {
    let result = disbursement::calculate(&haiphong_port_call()).unwrap();

    // 8000 × 0.025 × 3 days
    assert_eq!(item_total(&result, "Tonnage Fee"), dec!(600.00));
    // 8000 × 0.12
    assert_eq!(item_total(&result, "Navigation Due"), dec!(960.00));
    // 400 + 8000 × 0.08 + 20 nm × 50
    assert_eq!(item_total(&result, "Pilotage"), dec!(2040.00));
    // 180m / 15000 DWT → 2 tugs × 350 × 2.5h × 2 ops
    assert_eq!(item_total(&result, "Tug Assistance Charge"), dec!(3500.00));
    // (200 + 180 × 3.0) × 2
    assert_eq!(item_total(&result, "Moor/Unmooring Charge"), dec!(1480.00));
    // 15000 × 0.018 × 72h
    assert_eq!(item_total(&result, "Berth Due"), dec!(19440.00));
    assert_eq!(item_total(&result, "Anchorage Fees"), dec!(0.00));
    // 300 + 20 crew × 25
    assert_eq!(item_total(&result, "Quarantine Fee"), dec!(800.00));
    // 5% of (600 + 960 + 19440)
    assert_eq!(item_total(&result, "Ocean Freight Tax"), dec!(1050.00));
    assert_eq!(
        item_total(&result, "Transport for Entry Quarantine Formality"),
        dec!(150.00)
    );
    // DWT 15000 is within the 30000 limit
    assert_eq!(
        item_total(&result, "Berthing Application to B.4 (Over DWT)"),
        dec!(0.00)
    );
    assert_eq!(item_total(&result, "Clearance Fees"), dec!(530.00));
    // 150 + 3 days × 30
    assert_eq!(item_total(&result, "Garbage Removal Fee"), dec!(240.00));

    assert_eq!(result.breakdown.len(), 13);
    assert_eq!(result.final_amount.amount(), dec!(30790.00));
    assert_reconciled(&result);
}

#[test]
fn test_ocean_freight_tax_feeds_from_tonnage_navigation_berth() {
    let result = disbursement::calculate(&haiphong_port_call()).unwrap();

    let tonnage = item_total(&result, "Tonnage Fee");
    let navigation = item_total(&result, "Navigation Due");
    let berth = item_total(&result, "Berth Due");
    let tax = item_total(&result, "Ocean Freight Tax");

    assert_eq!(tax, (tonnage + navigation + berth) * dec!(0.05));

    let step = result
        .steps
        .iter()
        .find(|s| s.step == "OCEAN_FREIGHT_TAX")
        .unwrap();
    assert_eq!(step.base_value, Some(tonnage + navigation + berth));
}

#[test]
fn test_over_dwt_surcharge_at_ho_chi_minh() {
    let mut request = haiphong_port_call();
    request.port_of_call = Port::HoChiMinh;
    request.dwt = 45000;

    let result = disbursement::calculate(&request).unwrap();

    // 600 fixed + 5000 excess × 0.06
    assert_eq!(
        item_total(&result, "Berthing Application to B.4 (Over DWT)"),
        dec!(900.00)
    );
    assert_reconciled(&result);
}

#[test]
fn test_over_dwt_limit_is_port_specific() {
    // DWT 35000 exceeds Haiphong's 30000 limit but not Ho Chi Minh's 40000.
    let mut at_haiphong = haiphong_port_call();
    at_haiphong.dwt = 35000;
    let mut at_hochiminh = at_haiphong.clone();
    at_hochiminh.port_of_call = Port::HoChiMinh;

    let haiphong = disbursement::calculate(&at_haiphong).unwrap();
    let hochiminh = disbursement::calculate(&at_hochiminh).unwrap();

    // 500 fixed + 5000 × 0.05
    assert_eq!(
        item_total(&haiphong, "Berthing Application to B.4 (Over DWT)"),
        dec!(750.00)
    );
    assert_eq!(
        item_total(&hochiminh, "Berthing Application to B.4 (Over DWT)"),
        dec!(0.00)
    );
}

#[test]
fn test_same_day_call_charges_one_day() {
    let mut request = haiphong_port_call();
    request.departure_date = request.arrival_date;

    let result = disbursement::calculate(&request).unwrap();

    // 8000 × 0.025 × 1 day
    assert_eq!(item_total(&result, "Tonnage Fee"), dec!(200.00));
    // 150 + 1 day × 30
    assert_eq!(item_total(&result, "Garbage Removal Fee"), dec!(180.00));
    assert_reconciled(&result);
}

#[test]
fn test_fractional_rates_round_half_up_per_component() {
    let mut request = haiphong_port_call();
    request.port_of_call = Port::HoChiMinh;
    request.grt = 8125;
    request.dwt = 15000;
    request.arrival_date = date(2024, 5, 10);
    request.departure_date = date(2024, 5, 11);

    let result = disbursement::calculate(&request).unwrap();

    // 8125 × 0.028 × 1 = 227.5 → 227.50; 8125 × 0.15 = 1218.75
    assert_eq!(item_total(&result, "Tonnage Fee"), dec!(227.50));
    assert_eq!(item_total(&result, "Navigation Due"), dec!(1218.75));
    assert_reconciled(&result);
}

#[test]
fn test_final_amount_equals_base_price() {
    let result = disbursement::calculate(&haiphong_port_call()).unwrap();

    assert!(result.total_surcharges.is_zero());
    assert!(result.total_discounts.is_zero());
    assert!(result.tax_amount.is_zero());
    assert_eq!(result.final_amount, result.base_price);
}

#[test]
fn test_zero_tonnage_rejected_before_accumulation() {
    let mut request = haiphong_port_call();
    request.grt = 0;

    let err = disbursement::calculate(&request).unwrap_err();
    assert!(matches!(
        err,
        PricingError::InvalidFormulaInput { field: "grt", .. }
    ));
}
