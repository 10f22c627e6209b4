//! Invariant assertions for calculation results

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_pricing::{ItemCategory, PriceCalculationResult};

fn sum_category(result: &PriceCalculationResult, category: ItemCategory) -> Money {
    result
        .breakdown
        .iter()
        .filter(|item| item.category == category)
        .fold(Money::zero(result.currency), |acc, item| acc + item.total)
}

/// Asserts the four reconciliation equalities and the breakdown/audit
/// correspondence for a finished calculation
///
/// Every calculator result must satisfy these exactly, to the currency's
/// decimal scale.
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

    for item in &result.breakdown {
        assert!(
            result.steps.iter().any(|step| step.computed == item.total),
            "no calculation step matches item {:?} with value {}",
            item.name,
            item.total
        );
    }
}

/// Finds a breakdown item total by name, panicking with context when absent
pub fn item_total(result: &PriceCalculationResult, name: &str) -> Decimal {
    result
        .breakdown
        .iter()
        .find(|item| item.name == name)
        .unwrap_or_else(|| panic!("no breakdown item named {name:?}"))
        .total
        .amount()
}
