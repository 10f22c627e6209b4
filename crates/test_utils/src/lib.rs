//! Shared test utilities for the quotation system
//!
//! Fixtures are the named scenarios the suites keep coming back to (the
//! reference Haiphong port call, the five-container shipment at the
//! discount threshold); assertions encode the reconciliation invariants
//! every calculator result must satisfy.

pub mod assertions;
pub mod fixtures;
pub mod generators;

pub use assertions::{assert_reconciled, item_total};
pub use fixtures::{
    five_container_shipment, four_container_shipment, haiphong_port_call, hochiminh_port_call,
    submitted_request, voyage_charter_request,
};
