//! Orders materialized from accepted quotations
//!
//! An order carries a copy of the quotation's totals and breakdown taken at
//! acceptance time. Exactly one order may exist per quotation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, CustomerId, EmployeeId, Money, OrderId, QuotationId};
use domain_pricing::{BreakdownItem, ServiceType};

use crate::error::QuotationError;
use crate::quotation::Quotation;

/// Order fulfilment states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{tag}")
    }
}

/// An order created from exactly one accepted quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    order_code: String,
    quotation_id: QuotationId,
    customer_id: CustomerId,
    employee_id: Option<EmployeeId>,
    service_type: ServiceType,
    status: OrderStatus,
    base_price: Money,
    total_surcharges: Money,
    total_discounts: Money,
    subtotal: Money,
    tax_amount: Money,
    final_amount: Money,
    currency: Currency,
    /// Snapshot of the original request payload, copied from the quotation
    service_data: serde_json::Value,
    /// Breakdown copied verbatim at acceptance time
    items: Vec<BreakdownItem>,
    order_date: NaiveDate,
    customer_notes: Option<String>,
    confirmed_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Copies an accepted quotation into a new Pending order
    ///
    /// Callers go through [`Quotation::materialize_order`], which owns the
    /// state and 1:1 checks.
    pub(crate) fn from_quotation(quotation: &Quotation, sequence: u64, today: NaiveDate) -> Self {
        Self {
            id: OrderId::new_v7(),
            order_code: format!("ORD-{}-{:04}", today.format("%Y%m%d"), sequence),
            quotation_id: quotation.id(),
            customer_id: quotation.customer_id(),
            employee_id: quotation.employee_id(),
            service_type: quotation.service_type(),
            status: OrderStatus::Pending,
            base_price: quotation.base_price(),
            total_surcharges: quotation.total_surcharges(),
            total_discounts: quotation.total_discounts(),
            subtotal: quotation.subtotal(),
            tax_amount: quotation.tax_amount(),
            final_amount: quotation.final_amount(),
            currency: quotation.currency(),
            service_data: quotation.service_input().clone(),
            items: quotation.items().to_vec(),
            order_date: today,
            customer_notes: quotation.customer_notes().map(str::to_string),
            confirmed_at: None,
            completed_at: None,
            cancelled_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_code(&self) -> &str {
        &self.order_code
    }

    pub fn quotation_id(&self) -> QuotationId {
        self.quotation_id
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

    pub fn status(&self) -> OrderStatus {
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

    pub fn service_data(&self) -> &serde_json::Value {
        &self.service_data
    }

    pub fn items(&self) -> &[BreakdownItem] {
        &self.items
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn customer_notes(&self) -> Option<&str> {
        self.customer_notes.as_deref()
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the customer can still cancel
    pub fn can_cancel(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Confirms the order (Pending -> Confirmed)
    pub fn confirm(&mut self) -> Result<(), QuotationError> {
        match self.status {
            OrderStatus::Pending => {
                self.status = OrderStatus::Confirmed;
                self.confirmed_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(QuotationError::invalid_transition(
                self.status.to_string(),
                "CONFIRMED",
            )),
        }
    }

    /// Completes the order (Confirmed -> Completed)
    pub fn complete(&mut self) -> Result<(), QuotationError> {
        match self.status {
            OrderStatus::Confirmed => {
                self.status = OrderStatus::Completed;
                self.completed_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(QuotationError::invalid_transition(
                self.status.to_string(),
                "COMPLETED",
            )),
        }
    }

    /// Cancels the order (Pending or Confirmed -> Cancelled)
    pub fn cancel(&mut self) -> Result<(), QuotationError> {
        match self.status {
            OrderStatus::Pending | OrderStatus::Confirmed => {
                self.status = OrderStatus::Cancelled;
                self.cancelled_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(QuotationError::invalid_transition(
                self.status.to_string(),
                "CANCELLED",
            )),
        }
    }
}
