//! Pricing Domain - deterministic fee calculation for logistics services
//!
//! This crate turns a validated service request into an itemized, auditable
//! price breakdown. It is organised leaf-first:
//!
//! - [`tiers`] - pure banded-multiplier resolvers over vessel and cargo metrics
//! - [`rates`] - rate lookup with an overridable table, compiled defaults, and
//!   a last-resort constant
//! - [`result`] - the breakdown/audit accumulator and the calculation result
//! - [`calculators`] - one calculator per service family, selected by
//!   exhaustive match over the payload union
//!
//! Every calculator is a pure, synchronous function over an in-memory
//! payload; there is no clock or randomness in the numeric path, so repeated
//! runs on identical input produce identical results.

pub mod calculators;
pub mod error;
pub mod rates;
pub mod request;
pub mod result;
pub mod tiers;

pub use calculators::calculate_price;
pub use error::PricingError;
pub use rates::{FeeCategory, RateBook, RateKey, RateSource, ResolvedRate};
pub use request::{
    CharterType, CharteringRequest, ContainerSize, FreightForwardingRequest, Leg, Port,
    RequestStatus, ServicePayload, ServiceRequest, ServiceType, ShippingAgencyRequest,
};
pub use result::{
    BreakdownAccumulator, BreakdownItem, CalculationStep, ItemCategory, PriceCalculationResult,
    StepRecord,
};
