//! Database infrastructure for the quotation system
//!
//! PostgreSQL adapters built on sqlx. Two integrity guarantees live here:
//!
//! - a quotation and its breakdown/audit children are inserted in one
//!   transaction - all rows commit together or none do;
//! - order creation is a conditional insert keyed by quotation id, so
//!   concurrent accepts for the same quotation cannot produce two orders.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{connect, DbConfig};
pub use repositories::{OrderRepository, QuotationRepository};
