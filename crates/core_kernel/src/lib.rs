//! Core Kernel - Foundational types for the quotation system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic and half-up currency rounding
//! - Validity windows for time-bounded offers
//! - Strongly-typed identifiers

pub mod error;
pub mod identifiers;
pub mod money;
pub mod validity;

pub use error::CoreError;
pub use identifiers::{CustomerId, EmployeeId, OrderId, QuotationId, ServiceRequestId};
pub use money::{Currency, Money, MoneyError, Rate};
pub use validity::{ValidityError, ValidityWindow};
