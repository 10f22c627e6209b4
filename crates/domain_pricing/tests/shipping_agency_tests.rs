//! Shipping agency quick-estimate calculator tests

mod common;

use rust_decimal_macros::dec;

use common::{assert_reconciled, haiphong_port_call, item_total};
use domain_pricing::calculators::shipping_agency;
use domain_pricing::{FeeCategory, RateBook, RateKey, ServiceType};

#[test]
fn test_estimate_at_default_rates() {
    let result = shipping_agency::calculate(&haiphong_port_call(), &RateBook::new()).unwrap();

    // GRT 8000 → factor 1.5, DWT 15000 → factor 1.5, LOA 180 → factor 1.6
    assert_eq!(item_total(&result, "Port Dues"), dec!(750.00));
    assert_eq!(item_total(&result, "Agency Fee"), dec!(1200.00));
    assert_eq!(item_total(&result, "Pilotage Service"), dec!(480.00));

    assert_eq!(result.base_price.amount(), dec!(2430.00));
    assert_reconciled(&result);
}

#[test]
fn test_final_amount_is_base_price_exactly() {
    let result = shipping_agency::calculate(&haiphong_port_call(), &RateBook::new()).unwrap();

    assert!(result.total_surcharges.is_zero());
    assert!(result.total_discounts.is_zero());
    assert!(result.tax_amount.is_zero());
    assert_eq!(result.final_amount, result.base_price);
    // The zero-rated tax step is still present for shape compatibility.
    assert!(result.steps.iter().any(|s| s.step == "TAX"));
}

#[test]
fn test_small_coaster_takes_lowest_bands() {
    let mut request = haiphong_port_call();
    request.grt = 800;
    request.dwt = 3000;
    request.loa = dec!(70);

    let result = shipping_agency::calculate(&request, &RateBook::new()).unwrap();

    // factors 0.5 / 1.0 / 1.0
    assert_eq!(item_total(&result, "Port Dues"), dec!(250.00));
    assert_eq!(item_total(&result, "Agency Fee"), dec!(800.00));
    assert_eq!(item_total(&result, "Pilotage Service"), dec!(300.00));
    assert_reconciled(&result);
}

#[test]
fn test_overridden_base_rate_scales_with_factor() {
    let key = RateKey::flat(ServiceType::ShippingAgency, FeeCategory::PortDues);
    let rates = RateBook::new().with_override(key, dec!(620));

    let result = shipping_agency::calculate(&haiphong_port_call(), &rates).unwrap();

    // 620 × 1.5
    assert_eq!(item_total(&result, "Port Dues"), dec!(930.00));
    assert_reconciled(&result);
}

#[test]
fn test_estimate_and_disbursement_are_distinct_formulas() {
    // The quick estimate and the itemized account deliberately disagree:
    // they price the same call for different audiences.
    let request = haiphong_port_call();
    let estimate = shipping_agency::calculate(&request, &RateBook::new()).unwrap();
    let account = domain_pricing::calculators::disbursement::calculate(&request).unwrap();

    assert_ne!(estimate.final_amount, account.final_amount);
    assert_eq!(estimate.breakdown.len(), 3);
    assert_eq!(account.breakdown.len(), 13);
}
