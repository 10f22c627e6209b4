//! Visibility boundary tests
//!
//! The customer view must be structurally incapable of leaking breakdown or
//! audit data; these tests pin that down by inspecting the serialized form,
//! which is exactly what a customer-facing API would emit.

use core_kernel::EmployeeId;
use domain_pricing::{RateBook, ServicePayload};
use domain_quotation::{
    CustomerOrderView, CustomerQuotationView, InternalQuotationView, Quotation, QuotationEngine,
    QuotationStatus,
};
use test_utils::fixtures::{date, five_container_shipment, submitted_request};

fn sent_quotation() -> Quotation {
    let engine = QuotationEngine::new(RateBook::new());
    let request = submitted_request(ServicePayload::FreightForwarding(five_container_shipment()));
    let mut quotation = engine
        .quote(&request, Some(EmployeeId::new()), 1, date(2024, 6, 1))
        .unwrap();
    quotation.send().unwrap();
    quotation
}

/// Field names that identify internal pricing data; none may appear in any
/// customer-facing serialization
const FORBIDDEN_FIELDS: &[&str] = &[
    "base_price",
    "total_surcharges",
    "total_discounts",
    "subtotal",
    "tax_amount",
    "items",
    "breakdown",
    "calculation_steps",
    "steps",
    "formula",
    "rate_applied",
    "override_reason",
    "original_calculated_price",
];

#[test]
fn test_customer_view_serialization_has_no_internal_fields() {
    let quotation = sent_quotation();
    let view = CustomerQuotationView::project(&quotation, date(2024, 6, 10));

    let json = serde_json::to_string(&view).unwrap();
    for field in FORBIDDEN_FIELDS {
        assert!(
            !json.contains(field),
            "customer view leaked internal field {field:?}: {json}"
        );
    }
    // The final amount is present - it is the one number the customer gets.
    assert!(json.contains("final_amount"));
}

#[test]
fn test_customer_view_carries_only_offer_metadata() {
    let quotation = sent_quotation();
    let view = CustomerQuotationView::project(&quotation, date(2024, 6, 10));

    assert_eq!(view.quote_code, quotation.quote_code());
    assert_eq!(view.status, QuotationStatus::Sent);
    assert_eq!(view.final_amount, quotation.final_amount());
    assert_eq!(view.quote_date, date(2024, 6, 1));
    assert_eq!(view.valid_until, date(2024, 7, 1));
}

#[test]
fn test_accept_flags_track_window_and_state() {
    let quotation = sent_quotation();

    let fresh = CustomerQuotationView::project(&quotation, date(2024, 6, 10));
    assert!(fresh.can_accept);
    assert!(fresh.can_reject);

    let stale = CustomerQuotationView::project(&quotation, date(2024, 8, 1));
    assert!(!stale.can_accept);
}

#[test]
fn test_internal_view_carries_everything() {
    let quotation = sent_quotation();
    let view = InternalQuotationView::project(&quotation);

    assert_eq!(view.base_price, quotation.base_price());
    assert_eq!(view.subtotal, quotation.subtotal());
    assert_eq!(view.items.len(), quotation.items().len());
    assert_eq!(view.calculation_steps.len(), quotation.steps().len());
    assert!(!view.is_price_overridden);

    // The audit trail survives projection intact, formulas included.
    let json = serde_json::to_string(&view).unwrap();
    assert!(json.contains("formula"));
    assert!(json.contains("OCEAN_FREIGHT_20"));
}

#[test]
fn test_customer_order_view_exposes_final_amount_only() {
    let mut quotation = sent_quotation();
    let owner = quotation.customer_id();
    quotation.accept(owner, None, date(2024, 6, 20)).unwrap();
    let order = quotation.materialize_order(1, date(2024, 6, 21)).unwrap();

    let view = CustomerOrderView::project(&order);
    let json = serde_json::to_string(&view).unwrap();

    for field in FORBIDDEN_FIELDS {
        assert!(
            !json.contains(field),
            "customer order view leaked internal field {field:?}: {json}"
        );
    }
    assert_eq!(view.final_amount, order.final_amount());
    assert!(view.can_cancel);
}
