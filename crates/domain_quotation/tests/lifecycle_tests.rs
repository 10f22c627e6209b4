//! Quotation lifecycle tests
//!
//! Covers generation from a service request, the Draft -> Sent ->
//! Accepted/Rejected machine, expiry at accept-time, ownership checks,
//! price overrides, and 1:1 order materialization.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{CustomerId, EmployeeId, Money};
use domain_pricing::{RateBook, ServicePayload};
use domain_quotation::{
    CustomerResponse, OrderStatus, Quotation, QuotationEngine, QuotationError, QuotationEvent,
    QuotationStatus,
};
use test_utils::fixtures::{date, five_container_shipment, haiphong_port_call, submitted_request};

fn quote_date() -> NaiveDate {
    date(2024, 6, 1)
}

fn draft_quotation() -> Quotation {
    let engine = QuotationEngine::new(RateBook::new());
    let request = submitted_request(ServicePayload::FreightForwarding(five_container_shipment()));
    engine
        .quote(&request, Some(EmployeeId::new()), 1, quote_date())
        .unwrap()
}

fn sent_quotation() -> Quotation {
    let mut quotation = draft_quotation();
    quotation.send().unwrap();
    quotation
}

mod generation {
    use super::*;

    #[test]
    fn test_generated_quotation_is_a_draft_with_frozen_totals() {
        let engine = QuotationEngine::new(RateBook::new());
        let request = submitted_request(ServicePayload::FreightForwarding(five_container_shipment()));
        let calculation = engine.price(&request).unwrap();

        let quotation = engine
            .quote(&request, None, 7, quote_date())
            .unwrap();

        assert_eq!(quotation.status(), QuotationStatus::Draft);
        assert_eq!(quotation.quote_code(), "QT-20240601-0007");
        assert_eq!(quotation.final_amount(), calculation.final_amount);
        assert_eq!(quotation.base_price(), calculation.base_price);
        assert_eq!(quotation.items().len(), calculation.breakdown.len());
        assert_eq!(quotation.steps().len(), calculation.steps.len());
        assert_eq!(quotation.customer_id(), request.customer_id);
    }

    #[test]
    fn test_validity_window_defaults_to_thirty_days() {
        let quotation = draft_quotation();
        assert_eq!(quotation.validity().issued_on, quote_date());
        assert_eq!(quotation.validity().expires_on, date(2024, 7, 1));
    }

    #[test]
    fn test_generation_emits_event() {
        let mut quotation = draft_quotation();
        let events = quotation.take_events();
        assert!(matches!(
            events.as_slice(),
            [QuotationEvent::QuotationGenerated { .. }]
        ));
        // Draining leaves nothing behind.
        assert!(quotation.take_events().is_empty());
    }

    #[test]
    fn test_service_input_snapshot_round_trips() {
        let engine = QuotationEngine::new(RateBook::new());
        let payload = ServicePayload::ShippingAgency(haiphong_port_call());
        let request = submitted_request(payload.clone());

        let quotation = engine.quote(&request, None, 1, quote_date()).unwrap();

        let snapshot: ServicePayload =
            serde_json::from_value(quotation.service_input().clone()).unwrap();
        assert_eq!(snapshot, payload);
    }
}

mod sending {
    use super::*;

    #[test]
    fn test_send_stamps_sent_at() {
        let mut quotation = draft_quotation();
        quotation.send().unwrap();

        assert_eq!(quotation.status(), QuotationStatus::Sent);
        assert!(quotation.sent_at().is_some());
    }

    #[test]
    fn test_send_is_guarded_against_resend() {
        let mut quotation = sent_quotation();
        let err = quotation.send().unwrap_err();
        assert!(matches!(
            err,
            QuotationError::InvalidStateTransition { ref from, .. } if from == "SENT"
        ));
    }
}

mod acceptance {
    use super::*;

    #[test]
    fn test_owner_accepts_within_window() {
        let mut quotation = sent_quotation();
        let owner = quotation.customer_id();

        quotation
            .accept(owner, Some("Please proceed".into()), date(2024, 6, 20))
            .unwrap();

        assert_eq!(quotation.status(), QuotationStatus::Accepted);
        assert_eq!(quotation.customer_response(), Some(CustomerResponse::Accepted));
        assert!(quotation.customer_response_at().is_some());
        assert_eq!(quotation.customer_notes(), Some("Please proceed"));
    }

    #[test]
    fn test_accept_on_draft_is_a_state_error() {
        let mut quotation = draft_quotation();
        let owner = quotation.customer_id();

        let err = quotation.accept(owner, None, date(2024, 6, 20)).unwrap_err();
        assert!(matches!(err, QuotationError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_accept_after_expiry_fails_with_expiry_error() {
        let mut quotation = sent_quotation();
        let owner = quotation.customer_id();

        // The window closes on 2024-07-01; the next day is too late,
        // and the failure must be the expiry kind, not a state error.
        let err = quotation.accept(owner, None, date(2024, 7, 2)).unwrap_err();
        assert!(matches!(err, QuotationError::QuotationExpired));
        assert_eq!(quotation.status(), QuotationStatus::Sent);
    }

    #[test]
    fn test_accept_on_expiry_date_still_succeeds() {
        let mut quotation = sent_quotation();
        let owner = quotation.customer_id();

        quotation.accept(owner, None, date(2024, 7, 1)).unwrap();
        assert_eq!(quotation.status(), QuotationStatus::Accepted);
    }

    #[test]
    fn test_stranger_cannot_accept() {
        let mut quotation = sent_quotation();

        let err = quotation
            .accept(CustomerId::new(), None, date(2024, 6, 20))
            .unwrap_err();
        assert!(matches!(err, QuotationError::OwnershipViolation));
        assert_eq!(quotation.status(), QuotationStatus::Sent);
    }
}

mod rejection {
    use super::*;

    #[test]
    fn test_owner_rejects_sent_quotation() {
        let mut quotation = sent_quotation();
        let owner = quotation.customer_id();

        quotation.reject(owner, Some("Too expensive".into())).unwrap();

        assert_eq!(quotation.status(), QuotationStatus::Rejected);
        assert_eq!(quotation.customer_response(), Some(CustomerResponse::Rejected));
    }

    #[test]
    fn test_reject_works_from_any_state() {
        // Reject is the escape hatch: permitted even before sending.
        let mut quotation = draft_quotation();
        let owner = quotation.customer_id();

        quotation.reject(owner, None).unwrap();
        assert_eq!(quotation.status(), QuotationStatus::Rejected);
    }

    #[test]
    fn test_stranger_cannot_reject() {
        let mut quotation = sent_quotation();
        let err = quotation.reject(CustomerId::new(), None).unwrap_err();
        assert!(matches!(err, QuotationError::OwnershipViolation));
    }
}

mod price_override {
    use super::*;

    #[test]
    fn test_override_preserves_original_price() {
        let mut quotation = draft_quotation();
        let original = quotation.final_amount();
        let discounted = Money::new(dec!(3800.00), quotation.currency());

        quotation
            .override_price(discounted, "Negotiated with key account")
            .unwrap();

        assert!(quotation.is_price_overridden());
        assert_eq!(quotation.final_amount(), discounted);
        assert_eq!(quotation.original_calculated_price(), Some(original));
        assert_eq!(
            quotation.override_reason(),
            Some("Negotiated with key account")
        );
    }

    #[test]
    fn test_override_is_draft_only() {
        let mut quotation = sent_quotation();
        let lowered = Money::new(dec!(1000.00), quotation.currency());

        let err = quotation.override_price(lowered, "too late").unwrap_err();
        assert!(matches!(err, QuotationError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_second_override_keeps_first_original() {
        let mut quotation = draft_quotation();
        let original = quotation.final_amount();
        let currency = quotation.currency();

        quotation
            .override_price(Money::new(dec!(3800.00), currency), "first pass")
            .unwrap();
        quotation
            .override_price(Money::new(dec!(3700.00), currency), "second pass")
            .unwrap();

        assert_eq!(quotation.original_calculated_price(), Some(original));
        assert_eq!(quotation.final_amount().amount(), dec!(3700.00));
    }
}

mod order_materialization {
    use super::*;

    fn accepted_quotation() -> Quotation {
        let mut quotation = sent_quotation();
        let owner = quotation.customer_id();
        quotation.accept(owner, None, date(2024, 6, 20)).unwrap();
        quotation
    }

    #[test]
    fn test_order_copies_the_frozen_breakdown_verbatim() {
        let mut quotation = accepted_quotation();
        let order = quotation.materialize_order(3, date(2024, 6, 21)).unwrap();

        assert_eq!(order.order_code(), "ORD-20240621-0003");
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.quotation_id(), quotation.id());
        assert_eq!(order.final_amount(), quotation.final_amount());
        assert_eq!(order.base_price(), quotation.base_price());
        assert_eq!(order.items(), quotation.items());
        assert_eq!(order.service_data(), quotation.service_input());
        assert_eq!(quotation.order_id(), Some(order.id()));
    }

    #[test]
    fn test_second_materialization_fails_with_duplicate_order() {
        let mut quotation = accepted_quotation();
        quotation.materialize_order(3, date(2024, 6, 21)).unwrap();

        let err = quotation
            .materialize_order(4, date(2024, 6, 21))
            .unwrap_err();
        assert!(matches!(err, QuotationError::DuplicateOrder));
    }

    #[test]
    fn test_materialization_requires_acceptance() {
        let mut quotation = sent_quotation();
        let err = quotation
            .materialize_order(1, date(2024, 6, 21))
            .unwrap_err();
        assert!(matches!(err, QuotationError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_order_fulfilment_transitions() {
        let mut quotation = accepted_quotation();
        let mut order = quotation.materialize_order(1, date(2024, 6, 21)).unwrap();

        assert!(order.can_cancel());
        order.confirm().unwrap();
        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert!(order.confirmed_at().is_some());
        assert!(!order.can_cancel());

        order.complete().unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);

        // Completed orders cannot be cancelled.
        assert!(matches!(
            order.cancel(),
            Err(QuotationError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_full_lifecycle_event_stream() {
        let mut quotation = accepted_quotation();
        quotation.materialize_order(1, date(2024, 6, 21)).unwrap();

        let events = quotation.take_events();
        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                QuotationEvent::QuotationGenerated { .. } => "generated",
                QuotationEvent::QuotationSent { .. } => "sent",
                QuotationEvent::QuotationAccepted { .. } => "accepted",
                QuotationEvent::QuotationRejected { .. } => "rejected",
                QuotationEvent::PriceOverridden { .. } => "overridden",
                QuotationEvent::OrderMaterialized { .. } => "order",
            })
            .collect();
        assert_eq!(kinds, vec!["generated", "sent", "accepted", "order"]);
    }
}
