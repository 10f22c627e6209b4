//! Read projections over quotations and orders
//!
//! Two disjoint views enforce the confidentiality boundary. The customer
//! view is structurally incapable of carrying breakdown or audit data: the
//! type has no field for items, steps, or any non-final total, so a future
//! code change cannot accidentally route internal figures to a
//! customer-facing path. The internal view carries everything.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, CustomerId, EmployeeId, Money, OrderId, QuotationId, ServiceRequestId};
use domain_pricing::{BreakdownItem, CalculationStep, ServiceType};

use crate::order::{Order, OrderStatus};
use crate::quotation::{CustomerResponse, Quotation, QuotationStatus};

/// What the customer sees: identity, dates, status, and the final amount
///
/// No breakdown, no steps, no base/surcharge/discount figures - by type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerQuotationView {
    pub quote_code: String,
    pub quote_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub status: QuotationStatus,
    pub service_type: ServiceType,
    pub final_amount: Money,
    pub currency: Currency,
    pub can_accept: bool,
    pub can_reject: bool,
    pub customer_notes: Option<String>,
    pub customer_response: Option<CustomerResponse>,
    pub customer_response_at: Option<DateTime<Utc>>,
}

impl CustomerQuotationView {
    /// Projects the customer-safe view as of the given date
    pub fn project(quotation: &Quotation, today: NaiveDate) -> Self {
        Self {
            quote_code: quotation.quote_code().to_string(),
            quote_date: quotation.validity().issued_on,
            valid_until: quotation.validity().expires_on,
            status: quotation.status(),
            service_type: quotation.service_type(),
            final_amount: quotation.final_amount(),
            currency: quotation.currency(),
            can_accept: quotation.can_accept(today),
            can_reject: quotation.can_reject(),
            customer_notes: quotation.customer_notes().map(str::to_string),
            customer_response: quotation.customer_response(),
            customer_response_at: quotation.customer_response_at(),
        }
    }
}

/// What staff see: every total, every child record, and the override audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalQuotationView {
    pub id: QuotationId,
    pub quote_code: String,
    pub request_id: ServiceRequestId,
    pub customer_id: CustomerId,
    pub employee_id: Option<EmployeeId>,
    pub service_type: ServiceType,
    pub status: QuotationStatus,
    pub base_price: Money,
    pub total_surcharges: Money,
    pub total_discounts: Money,
    pub subtotal: Money,
    pub tax_amount: Money,
    pub final_amount: Money,
    pub currency: Currency,
    pub is_price_overridden: bool,
    pub override_reason: Option<String>,
    pub original_calculated_price: Option<Money>,
    pub quote_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub sent_at: Option<DateTime<Utc>>,
    pub customer_response: Option<CustomerResponse>,
    pub customer_response_at: Option<DateTime<Utc>>,
    pub customer_notes: Option<String>,
    pub items: Vec<BreakdownItem>,
    pub calculation_steps: Vec<CalculationStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InternalQuotationView {
    /// Projects the full internal view
    pub fn project(quotation: &Quotation) -> Self {
        Self {
            id: quotation.id(),
            quote_code: quotation.quote_code().to_string(),
            request_id: quotation.request_id(),
            customer_id: quotation.customer_id(),
            employee_id: quotation.employee_id(),
            service_type: quotation.service_type(),
            status: quotation.status(),
            base_price: quotation.base_price(),
            total_surcharges: quotation.total_surcharges(),
            total_discounts: quotation.total_discounts(),
            subtotal: quotation.subtotal(),
            tax_amount: quotation.tax_amount(),
            final_amount: quotation.final_amount(),
            currency: quotation.currency(),
            is_price_overridden: quotation.is_price_overridden(),
            override_reason: quotation.override_reason().map(str::to_string),
            original_calculated_price: quotation.original_calculated_price(),
            quote_date: quotation.validity().issued_on,
            valid_until: quotation.validity().expires_on,
            sent_at: quotation.sent_at(),
            customer_response: quotation.customer_response(),
            customer_response_at: quotation.customer_response_at(),
            customer_notes: quotation.customer_notes().map(str::to_string),
            items: quotation.items().to_vec(),
            calculation_steps: quotation.steps().to_vec(),
            created_at: quotation.created_at(),
            updated_at: quotation.updated_at(),
        }
    }
}

/// Customer-facing order projection: final amount only, no breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOrderView {
    pub order_code: String,
    pub quotation_id: QuotationId,
    pub service_type: ServiceType,
    pub status: OrderStatus,
    pub final_amount: Money,
    pub currency: Currency,
    pub order_date: NaiveDate,
    pub customer_notes: Option<String>,
    pub can_cancel: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CustomerOrderView {
    /// Projects the customer-safe order view
    pub fn project(order: &Order) -> Self {
        Self {
            order_code: order.order_code().to_string(),
            quotation_id: order.quotation_id(),
            service_type: order.service_type(),
            status: order.status(),
            final_amount: order.final_amount(),
            currency: order.currency(),
            order_date: order.order_date(),
            customer_notes: order.customer_notes().map(str::to_string),
            can_cancel: order.can_cancel(),
            confirmed_at: order.confirmed_at(),
            completed_at: order.completed_at(),
        }
    }
}
