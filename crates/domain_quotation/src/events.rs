//! Domain events for the quotation aggregate
//!
//! Events capture significant lifecycle occurrences for audit trails and
//! downstream processes (notifications, dashboards). They are accumulated
//! on the aggregate and drained by the caller after persistence.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, OrderId, QuotationId, ServiceRequestId};

/// Domain events emitted by the Quotation aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QuotationEvent {
    /// A quotation was generated from a service request
    QuotationGenerated {
        quotation_id: QuotationId,
        request_id: ServiceRequestId,
        final_amount: Decimal,
        currency: String,
        timestamp: DateTime<Utc>,
    },

    /// The quotation was sent to the customer
    QuotationSent {
        quotation_id: QuotationId,
        timestamp: DateTime<Utc>,
    },

    /// The customer accepted the quotation
    QuotationAccepted {
        quotation_id: QuotationId,
        customer_id: CustomerId,
        timestamp: DateTime<Utc>,
    },

    /// The customer rejected the quotation
    QuotationRejected {
        quotation_id: QuotationId,
        customer_id: CustomerId,
        timestamp: DateTime<Utc>,
    },

    /// An employee manually overrode the calculated price
    PriceOverridden {
        quotation_id: QuotationId,
        original_amount: Decimal,
        overridden_amount: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// An order was materialized from the accepted quotation
    OrderMaterialized {
        quotation_id: QuotationId,
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },
}
