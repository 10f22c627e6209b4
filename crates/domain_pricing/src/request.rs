//! Service request payloads consumed by the pricing engine
//!
//! The intake layer validates and persists these records; the engine reads
//! them. Each service family has its own payload shape, unified under
//! [`ServicePayload`] so calculator dispatch is an exhaustive match the
//! compiler checks when a service family is added.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CustomerId, EmployeeId, ServiceRequestId};

use crate::error::PricingError;

/// The service families the company quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    FreightForwarding,
    ShippingAgency,
    Chartering,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ServiceType::FreightForwarding => "FREIGHT_FORWARDING",
            ServiceType::ShippingAgency => "SHIPPING_AGENCY",
            ServiceType::Chartering => "CHARTERING",
        };
        write!(f, "{tag}")
    }
}

/// Ports of call covered by the agency tariff
///
/// Parsing is strict: the disbursement tariff is keyed entirely by port, so
/// an unrecognized name must fail rather than default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Port {
    Haiphong,
    HoChiMinh,
}

impl Port {
    /// Returns the wire name used by the intake forms
    pub fn code(&self) -> &'static str {
        match self {
            Port::Haiphong => "HAIPHONG",
            Port::HoChiMinh => "HOCHIMINH",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Port {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HAIPHONG" => Ok(Port::Haiphong),
            "HOCHIMINH" => Ok(Port::HoChiMinh),
            other => Err(PricingError::UnknownPort(other.to_string())),
        }
    }
}

/// Standard container size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerSize {
    /// 20-foot equivalent unit
    Twenty,
    /// 40-foot unit
    Forty,
}

impl ContainerSize {
    /// Returns the size code used in rate keys and display names
    pub fn code(&self) -> &'static str {
        match self {
            ContainerSize::Twenty => "20",
            ContainerSize::Forty => "40",
        }
    }
}

/// Which end of the route a handling charge applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leg {
    Origin,
    Destination,
}

impl Leg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Leg::Origin => "ORIGIN",
            Leg::Destination => "DESTINATION",
        }
    }
}

/// Charter arrangements offered by the broking desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CharterType {
    Voyage,
    Time,
    Bareboat,
}

/// Door-to-door container shipment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightForwardingRequest {
    pub cargo_name: String,
    pub loading_port: String,
    pub discharging_port: String,
    #[serde(default)]
    pub container_20: u32,
    #[serde(default)]
    pub container_40: u32,
    pub shipment_date_from: Option<NaiveDate>,
    pub shipment_date_to: Option<NaiveDate>,
    pub cargo_description: Option<String>,
}

impl FreightForwardingRequest {
    /// Total containers across both size classes
    pub fn total_containers(&self) -> u32 {
        self.container_20 + self.container_40
    }

    /// Rejects payloads the formulas cannot price
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.loading_port.trim().is_empty() {
            return Err(PricingError::invalid_input("loading_port", "must not be empty"));
        }
        if self.discharging_port.trim().is_empty() {
            return Err(PricingError::invalid_input("discharging_port", "must not be empty"));
        }
        if self.total_containers() == 0 {
            return Err(PricingError::invalid_input(
                "containers",
                "at least one container is required",
            ));
        }
        Ok(())
    }
}

/// Vessel port-call request for agency services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAgencyRequest {
    pub port_of_call: Port,
    /// Gross register tonnage
    pub grt: u32,
    /// Deadweight tonnage
    pub dwt: u32,
    /// Length overall in metres
    pub loa: Decimal,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub cargo_quantity: Option<String>,
}

impl ShippingAgencyRequest {
    /// Days alongside, clamped to at least one chargeable day
    pub fn stay_days(&self) -> i64 {
        (self.departure_date - self.arrival_date).num_days().max(1)
    }

    /// Hours alongside, derived from whole stay days
    pub fn stay_hours(&self) -> i64 {
        self.stay_days() * 24
    }

    /// Rejects payloads the formulas cannot price
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.grt == 0 {
            return Err(PricingError::invalid_input("grt", "must be positive"));
        }
        if self.dwt == 0 {
            return Err(PricingError::invalid_input("dwt", "must be positive"));
        }
        if self.loa <= Decimal::ZERO {
            return Err(PricingError::invalid_input("loa", "must be positive"));
        }
        if self.departure_date < self.arrival_date {
            return Err(PricingError::invalid_input(
                "departure_date",
                "must not precede arrival date",
            ));
        }
        Ok(())
    }
}

/// Vessel chartering request handled by the broking desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharteringRequest {
    pub loading_port: String,
    pub discharging_port: String,
    pub cargo_quantity: Option<String>,
    pub cargo_type: Option<String>,
    pub charter_type: CharterType,
    pub laycan_from: Option<NaiveDate>,
    pub laycan_to: Option<NaiveDate>,
}

impl CharteringRequest {
    /// Rejects payloads the formulas cannot price
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.loading_port.trim().is_empty() {
            return Err(PricingError::invalid_input("loading_port", "must not be empty"));
        }
        if self.discharging_port.trim().is_empty() {
            return Err(PricingError::invalid_input("discharging_port", "must not be empty"));
        }
        Ok(())
    }
}

/// The type-specific payload of a service request
///
/// Tagged union over the three service families. Calculator selection
/// pattern-matches this enum, so adding a family is a compile-checked
/// change, not a string switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "service_type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServicePayload {
    FreightForwarding(FreightForwardingRequest),
    ShippingAgency(ShippingAgencyRequest),
    Chartering(CharteringRequest),
}

impl ServicePayload {
    /// The service family discriminant
    pub fn service_type(&self) -> ServiceType {
        match self {
            ServicePayload::FreightForwarding(_) => ServiceType::FreightForwarding,
            ServicePayload::ShippingAgency(_) => ServiceType::ShippingAgency,
            ServicePayload::Chartering(_) => ServiceType::Chartering,
        }
    }

    /// Validates the inner payload before any calculation begins
    pub fn validate(&self) -> Result<(), PricingError> {
        match self {
            ServicePayload::FreightForwarding(req) => req.validate(),
            ServicePayload::ShippingAgency(req) => req.validate(),
            ServicePayload::Chartering(req) => req.validate(),
        }
    }
}

/// Progress of a service request through intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Draft,
    Submitted,
    Quoted,
}

/// A submitted service request, read-only to the pricing engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: ServiceRequestId,
    pub request_code: String,
    pub customer_id: CustomerId,
    pub employee_id: Option<EmployeeId>,
    pub status: RequestStatus,
    pub payload: ServicePayload,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    /// The service family of the underlying payload
    pub fn service_type(&self) -> ServiceType {
        self.payload.service_type()
    }
}
