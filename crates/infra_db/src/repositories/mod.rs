//! Repository implementations

pub mod order;
pub mod quotation;

pub use order::{OrderRepository, OrderRow};
pub use quotation::{
    CalculationStepRow, QuotationItemRow, QuotationRecord, QuotationRepository, QuotationRow,
};
