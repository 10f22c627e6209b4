//! Shared helpers for the pricing test suite

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_pricing::{
    CharterType, CharteringRequest, FreightForwardingRequest, ItemCategory, Port,
    PriceCalculationResult, ShippingAgencyRequest,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A 3×20' + 2×40' shipment - exactly at the volume discount threshold
pub fn five_container_shipment() -> FreightForwardingRequest {
    FreightForwardingRequest {
        cargo_name: "Garments".into(),
        loading_port: "HAIPHONG".into(),
        discharging_port: "SINGAPORE".into(),
        container_20: 3,
        container_40: 2,
        shipment_date_from: Some(date(2024, 6, 1)),
        shipment_date_to: Some(date(2024, 6, 15)),
        cargo_description: Some("Packed garments on pallets".into()),
    }
}

/// The reference port call: Haiphong, GRT 8000, DWT 15000, LOA 180m, 3 days
pub fn haiphong_port_call() -> ShippingAgencyRequest {
    ShippingAgencyRequest {
        port_of_call: Port::Haiphong,
        grt: 8000,
        dwt: 15000,
        loa: dec!(180),
        arrival_date: date(2024, 5, 10),
        departure_date: date(2024, 5, 13),
        cargo_quantity: Some("12000 MT steel coils".into()),
    }
}

pub fn voyage_charter_request() -> CharteringRequest {
    CharteringRequest {
        loading_port: "HAIPHONG".into(),
        discharging_port: "SINGAPORE".into(),
        cargo_quantity: Some("25000 MT".into()),
        cargo_type: Some("BULK".into()),
        charter_type: CharterType::Voyage,
        laycan_from: Some(date(2024, 7, 1)),
        laycan_to: Some(date(2024, 7, 10)),
    }
}

fn sum_category(result: &PriceCalculationResult, category: ItemCategory) -> Money {
    result
        .breakdown
        .iter()
        .filter(|item| item.category == category)
        .fold(Money::zero(result.currency), |acc, item| acc + item.total)
}

/// Asserts the four reconciliation equalities and the breakdown/audit
/// correspondence for a finished calculation
pub fn assert_reconciled(result: &PriceCalculationResult) {
    assert_eq!(
        result.subtotal,
        result.base_price + result.total_surcharges - result.total_discounts,
        "subtotal must equal base + surcharges - discounts"
    );
    assert_eq!(
        result.final_amount,
        result.subtotal + result.tax_amount,
        "final amount must equal subtotal + tax"
    );
    assert_eq!(
        sum_category(result, ItemCategory::BasePrice),
        result.base_price,
        "base price must equal the sum of BASE_PRICE items"
    );
    assert_eq!(
        sum_category(result, ItemCategory::Surcharge),
        result.total_surcharges,
        "surcharge total must equal the sum of SURCHARGE items"
    );
    assert_eq!(
        -sum_category(result, ItemCategory::Discount),
        result.total_discounts,
        "discount total must equal the negated sum of DISCOUNT items"
    );
    assert_eq!(
        sum_category(result, ItemCategory::Tax),
        result.tax_amount,
        "tax amount must equal the sum of TAX items"
    );

    // Every priced line has an audit step carrying the same computed value.
    for item in &result.breakdown {
        assert!(
            result.steps.iter().any(|step| step.computed == item.total),
            "no calculation step matches item {:?} with value {}",
            item.name,
            item.total
        );
    }
}

/// Finds a breakdown item by name, panicking with context when absent
pub fn item_total(result: &PriceCalculationResult, name: &str) -> Decimal {
    result
        .breakdown
        .iter()
        .find(|item| item.name == name)
        .unwrap_or_else(|| panic!("no breakdown item named {name:?}"))
        .total
        .amount()
}
