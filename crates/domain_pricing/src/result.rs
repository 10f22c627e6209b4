//! Breakdown and audit accumulation for price calculations
//!
//! A calculator appends customer-relevant line items and internal audit
//! steps as it works, then finalizes into a [`PriceCalculationResult`]. The
//! accumulator is append-only and assigns display/step ordering itself, so
//! component order is stable across recalculation. Priced items are added
//! together with their audit step in a single call, which keeps the
//! breakdown and the audit trail from ever diverging.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use core_kernel::{Currency, Money, Rate};

/// Categories a breakdown line can fall under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    BasePrice,
    Surcharge,
    Discount,
    Tax,
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ItemCategory::BasePrice => "BASE_PRICE",
            ItemCategory::Surcharge => "SURCHARGE",
            ItemCategory::Discount => "DISCOUNT",
            ItemCategory::Tax => "TAX",
        };
        write!(f, "{tag}")
    }
}

/// One customer-relevant priced line
///
/// Discount totals are negative; ordering is significant for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub category: ItemCategory,
    pub name: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Option<Money>,
    pub total: Money,
    pub display_order: u32,
}

/// One internal audit record of how a value was derived
///
/// Exists purely for traceability and dispute resolution; never shown to
/// customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    pub step: String,
    pub component: String,
    pub formula: String,
    pub inputs: serde_json::Value,
    pub base_value: Option<Decimal>,
    pub rate_applied: Option<Decimal>,
    pub multiplier: Option<Decimal>,
    pub computed: Money,
    pub notes: Option<String>,
    pub step_order: u32,
}

/// A step being recorded - the accumulator fills in the computed value and
/// the step order
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub step: String,
    pub component: String,
    pub formula: String,
    pub inputs: serde_json::Value,
    pub base_value: Option<Decimal>,
    pub rate_applied: Option<Decimal>,
    pub multiplier: Option<Decimal>,
    pub notes: Option<String>,
}

impl StepRecord {
    pub fn new(
        step: impl Into<String>,
        component: impl Into<String>,
        formula: impl Into<String>,
        inputs: serde_json::Value,
    ) -> Self {
        Self {
            step: step.into(),
            component: component.into(),
            formula: formula.into(),
            inputs,
            base_value: None,
            rate_applied: None,
            multiplier: None,
            notes: None,
        }
    }

    pub fn base_value(mut self, value: Decimal) -> Self {
        self.base_value = Some(value);
        self
    }

    pub fn rate(mut self, rate: Decimal) -> Self {
        self.rate_applied = Some(rate);
        self
    }

    pub fn multiplier(mut self, multiplier: Decimal) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// The finished calculation: totals, breakdown, and audit trail
///
/// Invariants, to the currency's decimal scale:
/// `subtotal = base_price + total_surcharges - total_discounts`,
/// `final_amount = subtotal + tax_amount`, and each of the four totals
/// reconciles with the sum of its item category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCalculationResult {
    pub currency: Currency,
    pub base_price: Money,
    pub total_surcharges: Money,
    pub total_discounts: Money,
    pub subtotal: Money,
    pub tax_amount: Money,
    pub final_amount: Money,
    pub breakdown: Vec<BreakdownItem>,
    pub steps: Vec<CalculationStep>,
}

/// Append-only collector for items, steps, and running totals
///
/// A calculator may read back only the running totals it contributed, never
/// individual appended entries.
#[derive(Debug)]
pub struct BreakdownAccumulator {
    currency: Currency,
    items: Vec<BreakdownItem>,
    steps: Vec<CalculationStep>,
    base_price: Money,
    total_surcharges: Money,
    total_discounts: Money,
    next_display_order: u32,
    next_step_order: u32,
}

impl BreakdownAccumulator {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
            steps: Vec::new(),
            base_price: Money::zero(currency),
            total_surcharges: Money::zero(currency),
            total_discounts: Money::zero(currency),
            next_display_order: 1,
            next_step_order: 1,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Running base-price total
    pub fn base_price(&self) -> Money {
        self.base_price
    }

    /// Running surcharge total
    pub fn total_surcharges(&self) -> Money {
        self.total_surcharges
    }

    fn push_item(
        &mut self,
        category: ItemCategory,
        name: String,
        description: String,
        quantity: Decimal,
        unit_price: Option<Money>,
        total: Money,
    ) {
        let display_order = self.next_display_order;
        self.next_display_order += 1;
        self.items.push(BreakdownItem {
            category,
            name,
            description,
            quantity,
            unit_price,
            total,
            display_order,
        });
    }

    fn push_step(&mut self, record: StepRecord, computed: Money) {
        let step_order = self.next_step_order;
        self.next_step_order += 1;
        self.steps.push(CalculationStep {
            step: record.step,
            component: record.component,
            formula: record.formula,
            inputs: record.inputs,
            base_value: record.base_value,
            rate_applied: record.rate_applied,
            multiplier: record.multiplier,
            computed,
            notes: record.notes,
            step_order,
        });
    }

    /// Appends a base-price line and its paired audit step
    pub fn add_base(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Option<Money>,
        total: Money,
        step: StepRecord,
    ) {
        self.push_item(
            ItemCategory::BasePrice,
            name.into(),
            description.into(),
            quantity,
            unit_price,
            total,
        );
        self.push_step(step, total);
        self.base_price = self.base_price + total;
    }

    /// Appends a surcharge line and its paired audit step
    pub fn add_surcharge(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        total: Money,
        step: StepRecord,
    ) {
        self.push_item(
            ItemCategory::Surcharge,
            name.into(),
            description.into(),
            Decimal::ONE,
            Some(total),
            total,
        );
        self.push_step(step, total);
        self.total_surcharges = self.total_surcharges + total;
    }

    /// Appends a discount line and its paired audit step
    ///
    /// `amount` is the positive discount value; the stored line and step
    /// carry it negated.
    pub fn add_discount(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
        step: StepRecord,
    ) {
        let negated = -amount;
        self.push_item(
            ItemCategory::Discount,
            name.into(),
            description.into(),
            Decimal::ONE,
            Some(negated),
            negated,
        );
        self.push_step(step, negated);
        self.total_discounts = self.total_discounts + amount;
    }

    /// Appends an audit step with no breakdown line (e.g. a fallback-rate
    /// record)
    pub fn add_audit_step(&mut self, step: StepRecord, computed: Money) {
        self.push_step(step, computed);
    }

    /// Closes the accumulation: computes subtotal, tax, and final amount
    ///
    /// The tax step is always emitted, even at a zero rate, so every
    /// calculator's audit trail has the same shape; the tax line item is
    /// only added when the amount is nonzero.
    pub fn finalize(mut self, tax_rate: Rate) -> PriceCalculationResult {
        let subtotal = self.base_price + self.total_surcharges - self.total_discounts;
        let tax_amount = tax_rate.apply_rounded(&subtotal);

        let tax_step = StepRecord::new(
            "TAX",
            "Tax",
            "SUBTOTAL × TAX_RATE",
            json!({
                "subtotal": subtotal.amount(),
                "rate": tax_rate.as_decimal(),
            }),
        )
        .base_value(subtotal.amount())
        .rate(tax_rate.as_decimal());
        self.push_step(tax_step, tax_amount);

        if !tax_amount.is_zero() {
            self.push_item(
                ItemCategory::Tax,
                "Tax".to_string(),
                format!("{tax_rate} of subtotal"),
                Decimal::ONE,
                Some(tax_amount),
                tax_amount,
            );
        }

        let final_amount = subtotal + tax_amount;

        PriceCalculationResult {
            currency: self.currency,
            base_price: self.base_price,
            total_surcharges: self.total_surcharges,
            total_discounts: self.total_discounts,
            subtotal,
            tax_amount,
            final_amount,
            breakdown: self.items,
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn record(step: &str) -> StepRecord {
        StepRecord::new(step, step, "FIXED", json!({}))
    }

    #[test]
    fn test_ordering_is_assigned_sequentially() {
        let mut acc = BreakdownAccumulator::new(Currency::USD);
        acc.add_base("A", "first", dec!(1), None, usd(dec!(10.00)), record("A"));
        acc.add_base("B", "second", dec!(1), None, usd(dec!(20.00)), record("B"));
        let result = acc.finalize(Rate::zero());

        assert_eq!(result.breakdown[0].display_order, 1);
        assert_eq!(result.breakdown[1].display_order, 2);
        assert_eq!(result.steps[0].step_order, 1);
        assert_eq!(result.steps[1].step_order, 2);
    }

    #[test]
    fn test_totals_reconcile() {
        let mut acc = BreakdownAccumulator::new(Currency::USD);
        acc.add_base("Freight", "", dec!(2), Some(usd(dec!(300))), usd(dec!(600.00)), record("F"));
        acc.add_surcharge("BAF", "", usd(dec!(60.00)), record("S"));
        acc.add_discount("Volume", "", usd(dec!(33.00)), record("D"));
        let result = acc.finalize(Rate::zero());

        assert_eq!(result.base_price, usd(dec!(600.00)));
        assert_eq!(result.total_surcharges, usd(dec!(60.00)));
        assert_eq!(result.total_discounts, usd(dec!(33.00)));
        assert_eq!(result.subtotal, usd(dec!(627.00)));
        assert_eq!(result.final_amount, usd(dec!(627.00)));
    }

    #[test]
    fn test_discount_line_is_negative() {
        let mut acc = BreakdownAccumulator::new(Currency::USD);
        acc.add_base("Base", "", dec!(1), None, usd(dec!(100.00)), record("B"));
        acc.add_discount("Volume", "", usd(dec!(5.00)), record("D"));
        let result = acc.finalize(Rate::zero());

        let discount = result
            .breakdown
            .iter()
            .find(|i| i.category == ItemCategory::Discount)
            .unwrap();
        assert_eq!(discount.total, usd(dec!(-5.00)));
        // Paired step carries the same signed value.
        let step = result.steps.iter().find(|s| s.step == "D").unwrap();
        assert_eq!(step.computed, usd(dec!(-5.00)));
    }

    #[test]
    fn test_zero_tax_emits_step_but_no_item() {
        let mut acc = BreakdownAccumulator::new(Currency::USD);
        acc.add_base("Base", "", dec!(1), None, usd(dec!(100.00)), record("B"));
        let result = acc.finalize(Rate::zero());

        assert!(result.steps.iter().any(|s| s.step == "TAX"));
        assert!(!result
            .breakdown
            .iter()
            .any(|i| i.category == ItemCategory::Tax));
        assert!(result.tax_amount.is_zero());
    }

    #[test]
    fn test_nonzero_tax_emits_item() {
        let mut acc = BreakdownAccumulator::new(Currency::USD);
        acc.add_base("Base", "", dec!(1), None, usd(dec!(100.00)), record("B"));
        let result = acc.finalize(Rate::from_percentage(dec!(10)));

        assert_eq!(result.tax_amount, usd(dec!(10.00)));
        assert_eq!(result.final_amount, usd(dec!(110.00)));
        assert!(result
            .breakdown
            .iter()
            .any(|i| i.category == ItemCategory::Tax));
    }
}
