//! Quotation Domain - lifecycle and confidentiality boundary
//!
//! A calculated price becomes a [`Quotation`]: an offer with a validity
//! window, a breakdown the customer never sees, and an audit trail. The
//! aggregate owns its breakdown items and calculation steps by value and
//! walks the Draft → Sent → Accepted/Rejected lifecycle; acceptance
//! materializes a frozen [`Order`].
//!
//! The customer/internal visibility split is a type-level guarantee:
//! [`views::CustomerQuotationView`] has no field that could carry breakdown
//! or audit data, so no code path can leak it.

pub mod error;
pub mod events;
pub mod order;
pub mod quotation;
pub mod service;
pub mod views;

pub use error::QuotationError;
pub use events::QuotationEvent;
pub use order::{Order, OrderStatus};
pub use quotation::{CustomerResponse, Quotation, QuotationStatus};
pub use service::QuotationEngine;
pub use views::{CustomerOrderView, CustomerQuotationView, InternalQuotationView};
