//! Quotation Aggregate Root
//!
//! The Quotation is the consistency boundary between the pricing engine and
//! the customer-facing offer. It freezes the calculated totals, owns the
//! breakdown and audit children by value, and enforces the lifecycle.
//!
//! # State Machine
//!
//! Valid transitions:
//! - Draft -> Sent (via send)
//! - Sent -> Accepted (via accept, within the validity window, by the owner)
//! - any non-terminal -> Rejected (via reject, by the owner)
//!
//! Expiry is not a stored state: it is a condition of the validity window
//! checked at accept-time. Once sent, only the status/response fields may
//! change; the frozen totals are the contract with the customer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{
    Currency, CustomerId, EmployeeId, Money, OrderId, QuotationId, ServiceRequestId,
    ValidityWindow,
};
use domain_pricing::{
    BreakdownItem, CalculationStep, PriceCalculationResult, ServiceRequest, ServiceType,
};

use crate::error::QuotationError;
use crate::events::QuotationEvent;
use crate::order::Order;

/// Quotation lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotationStatus {
    /// Computed but not yet shown to the customer
    Draft,
    /// Sent to the customer, awaiting a response
    Sent,
    /// Accepted by the customer (terminal)
    Accepted,
    /// Rejected by the customer (terminal)
    Rejected,
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            QuotationStatus::Draft => "DRAFT",
            QuotationStatus::Sent => "SENT",
            QuotationStatus::Accepted => "ACCEPTED",
            QuotationStatus::Rejected => "REJECTED",
        };
        write!(f, "{tag}")
    }
}

/// The customer's recorded decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerResponse {
    Accepted,
    Rejected,
}

/// The Quotation aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    id: QuotationId,
    quote_code: String,
    request_id: ServiceRequestId,
    customer_id: CustomerId,
    employee_id: Option<EmployeeId>,
    service_type: ServiceType,
    status: QuotationStatus,
    base_price: Money,
    total_surcharges: Money,
    total_discounts: Money,
    subtotal: Money,
    tax_amount: Money,
    final_amount: Money,
    currency: Currency,
    validity: ValidityWindow,
    /// Snapshot of the original request payload
    service_input: serde_json::Value,
    /// Customer-relevant breakdown, owned by value
    items: Vec<BreakdownItem>,
    /// Internal audit trail, owned by value
    steps: Vec<CalculationStep>,
    price_overridden: bool,
    override_reason: Option<String>,
    original_calculated_price: Option<Money>,
    customer_response: Option<CustomerResponse>,
    customer_response_at: Option<DateTime<Utc>>,
    customer_notes: Option<String>,
    sent_at: Option<DateTime<Utc>>,
    /// The order materialized from this quotation, if any (1:1)
    order_id: Option<OrderId>,
    /// Domain events to be published
    #[serde(skip)]
    events: Vec<QuotationEvent>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Quotation {
    /// Generates a Draft quotation from a service request and its finished
    /// calculation
    ///
    /// The quotation gets the standard 30-day validity window starting at
    /// `today` and copies the breakdown and audit children wholesale so the
    /// persisted record is self-contained.
    pub fn generate(
        request: &ServiceRequest,
        calculation: &PriceCalculationResult,
        employee_id: Option<EmployeeId>,
        sequence: u64,
        today: NaiveDate,
    ) -> Result<Self, QuotationError> {
        let id = QuotationId::new_v7();
        let now = Utc::now();
        let quote_code = format!("QT-{}-{:04}", today.format("%Y%m%d"), sequence);
        let service_input = serde_json::to_value(&request.payload)?;

        let mut quotation = Self {
            id,
            quote_code,
            request_id: request.id,
            customer_id: request.customer_id,
            employee_id,
            service_type: request.service_type(),
            status: QuotationStatus::Draft,
            base_price: calculation.base_price,
            total_surcharges: calculation.total_surcharges,
            total_discounts: calculation.total_discounts,
            subtotal: calculation.subtotal,
            tax_amount: calculation.tax_amount,
            final_amount: calculation.final_amount,
            currency: calculation.currency,
            validity: ValidityWindow::standard(today),
            service_input,
            items: calculation.breakdown.clone(),
            steps: calculation.steps.clone(),
            price_overridden: false,
            override_reason: None,
            original_calculated_price: None,
            customer_response: None,
            customer_response_at: None,
            customer_notes: None,
            sent_at: None,
            order_id: None,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        quotation.events.push(QuotationEvent::QuotationGenerated {
            quotation_id: id,
            request_id: request.id,
            final_amount: calculation.final_amount.amount(),
            currency: calculation.currency.code().to_string(),
            timestamp: now,
        });

        Ok(quotation)
    }

    pub fn id(&self) -> QuotationId {
        self.id
    }

    pub fn quote_code(&self) -> &str {
        &self.quote_code
    }

    pub fn request_id(&self) -> ServiceRequestId {
        self.request_id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn status(&self) -> QuotationStatus {
        self.status
    }

    pub fn base_price(&self) -> Money {
        self.base_price
    }

    pub fn total_surcharges(&self) -> Money {
        self.total_surcharges
    }

    pub fn total_discounts(&self) -> Money {
        self.total_discounts
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax_amount(&self) -> Money {
        self.tax_amount
    }

    pub fn final_amount(&self) -> Money {
        self.final_amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn validity(&self) -> ValidityWindow {
        self.validity
    }

    pub fn service_input(&self) -> &serde_json::Value {
        &self.service_input
    }

    pub fn items(&self) -> &[BreakdownItem] {
        &self.items
    }

    pub fn steps(&self) -> &[CalculationStep] {
        &self.steps
    }

    pub fn is_price_overridden(&self) -> bool {
        self.price_overridden
    }

    pub fn override_reason(&self) -> Option<&str> {
        self.override_reason.as_deref()
    }

    pub fn original_calculated_price(&self) -> Option<Money> {
        self.original_calculated_price
    }

    pub fn customer_response(&self) -> Option<CustomerResponse> {
        self.customer_response
    }

    pub fn customer_response_at(&self) -> Option<DateTime<Utc>> {
        self.customer_response_at
    }

    pub fn customer_notes(&self) -> Option<&str> {
        self.customer_notes.as_deref()
    }

    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.sent_at
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<QuotationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the customer can still accept as of the given date
    pub fn can_accept(&self, today: NaiveDate) -> bool {
        self.status == QuotationStatus::Sent && !self.validity.is_expired(today)
    }

    /// Whether the customer can reject as of the current state
    pub fn can_reject(&self) -> bool {
        self.status == QuotationStatus::Sent
    }

    /// Manually overrides the calculated final amount
    ///
    /// Only permitted while the quotation is a Draft; the originally
    /// calculated price is preserved for audit.
    pub fn override_price(
        &mut self,
        new_final_amount: Money,
        reason: impl Into<String>,
    ) -> Result<(), QuotationError> {
        if self.status != QuotationStatus::Draft {
            return Err(QuotationError::invalid_transition(
                self.status.to_string(),
                "DRAFT (price override)",
            ));
        }

        let now = Utc::now();
        if self.original_calculated_price.is_none() {
            self.original_calculated_price = Some(self.final_amount);
        }

        self.events.push(QuotationEvent::PriceOverridden {
            quotation_id: self.id,
            original_amount: self.final_amount.amount(),
            overridden_amount: new_final_amount.amount(),
            timestamp: now,
        });

        self.price_overridden = true;
        self.override_reason = Some(reason.into());
        self.final_amount = new_final_amount;
        self.updated_at = now;

        Ok(())
    }

    /// Sends the quotation to the customer (Draft -> Sent)
    pub fn send(&mut self) -> Result<(), QuotationError> {
        match self.status {
            QuotationStatus::Draft => {
                let now = Utc::now();
                self.status = QuotationStatus::Sent;
                self.sent_at = Some(now);
                self.updated_at = now;

                self.events.push(QuotationEvent::QuotationSent {
                    quotation_id: self.id,
                    timestamp: now,
                });

                Ok(())
            }
            _ => Err(QuotationError::invalid_transition(
                self.status.to_string(),
                "SENT",
            )),
        }
    }

    /// Records the customer's acceptance (Sent -> Accepted)
    ///
    /// Requires the caller to own the quotation, the status to be Sent, and
    /// the validity window not to have elapsed as of `today`. The three
    /// failures are distinct error kinds because each drives different
    /// upstream messaging.
    pub fn accept(
        &mut self,
        customer_id: CustomerId,
        notes: Option<String>,
        today: NaiveDate,
    ) -> Result<(), QuotationError> {
        if customer_id != self.customer_id {
            return Err(QuotationError::OwnershipViolation);
        }
        if self.status != QuotationStatus::Sent {
            return Err(QuotationError::invalid_transition(
                self.status.to_string(),
                "ACCEPTED",
            ));
        }
        if self.validity.is_expired(today) {
            return Err(QuotationError::QuotationExpired);
        }

        let now = Utc::now();
        self.status = QuotationStatus::Accepted;
        self.customer_response = Some(CustomerResponse::Accepted);
        self.customer_response_at = Some(now);
        self.customer_notes = notes;
        self.updated_at = now;

        self.events.push(QuotationEvent::QuotationAccepted {
            quotation_id: self.id,
            customer_id,
            timestamp: now,
        });

        Ok(())
    }

    /// Records the customer's rejection
    ///
    /// Permitted from any prior state as an escape hatch; only ownership is
    /// checked.
    pub fn reject(
        &mut self,
        customer_id: CustomerId,
        notes: Option<String>,
    ) -> Result<(), QuotationError> {
        if customer_id != self.customer_id {
            return Err(QuotationError::OwnershipViolation);
        }

        let now = Utc::now();
        self.status = QuotationStatus::Rejected;
        self.customer_response = Some(CustomerResponse::Rejected);
        self.customer_response_at = Some(now);
        self.customer_notes = notes;
        self.updated_at = now;

        self.events.push(QuotationEvent::QuotationRejected {
            quotation_id: self.id,
            customer_id,
            timestamp: now,
        });

        Ok(())
    }

    /// Materializes an order from the accepted quotation (1:1)
    ///
    /// Copies the frozen totals and breakdown verbatim: quotations may later
    /// be superseded, orders must not silently change. A second call fails
    /// with [`QuotationError::DuplicateOrder`]; the persistence layer backs
    /// this with a conditional insert keyed by quotation id for the
    /// concurrent case.
    pub fn materialize_order(
        &mut self,
        sequence: u64,
        today: NaiveDate,
    ) -> Result<Order, QuotationError> {
        if self.status != QuotationStatus::Accepted {
            return Err(QuotationError::invalid_transition(
                self.status.to_string(),
                "ORDER",
            ));
        }
        if self.order_id.is_some() {
            return Err(QuotationError::DuplicateOrder);
        }

        let order = Order::from_quotation(self, sequence, today);
        let now = Utc::now();
        self.order_id = Some(order.id());
        self.updated_at = now;

        self.events.push(QuotationEvent::OrderMaterialized {
            quotation_id: self.id,
            order_id: order.id(),
            timestamp: now,
        });

        Ok(order)
    }
}
