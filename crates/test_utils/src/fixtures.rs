//! Canonical request fixtures used across the test suites

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;

use core_kernel::{CustomerId, ServiceRequestId};
use domain_pricing::{
    CharterType, CharteringRequest, FreightForwardingRequest, Port, RequestStatus, ServicePayload,
    ServiceRequest, ShippingAgencyRequest,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A 3×20' + 2×40' shipment - exactly at the volume discount threshold
pub fn five_container_shipment() -> FreightForwardingRequest {
    FreightForwardingRequest {
        cargo_name: "Garments".into(),
        loading_port: "HAIPHONG".into(),
        discharging_port: "SINGAPORE".into(),
        container_20: 3,
        container_40: 2,
        shipment_date_from: Some(date(2024, 6, 1)),
        shipment_date_to: Some(date(2024, 6, 15)),
        cargo_description: Some("Packed garments on pallets".into()),
    }
}

/// One container below the volume discount threshold
pub fn four_container_shipment() -> FreightForwardingRequest {
    let mut request = five_container_shipment();
    request.container_20 = 2;
    request
}

/// The reference port call: Haiphong, GRT 8000, DWT 15000, LOA 180m, 3 days
pub fn haiphong_port_call() -> ShippingAgencyRequest {
    ShippingAgencyRequest {
        port_of_call: Port::Haiphong,
        grt: 8000,
        dwt: 15000,
        loa: dec!(180),
        arrival_date: date(2024, 5, 10),
        departure_date: date(2024, 5, 13),
        cargo_quantity: Some("12000 MT steel coils".into()),
    }
}

/// The same vessel calling at Ho Chi Minh
pub fn hochiminh_port_call() -> ShippingAgencyRequest {
    let mut request = haiphong_port_call();
    request.port_of_call = Port::HoChiMinh;
    request
}

pub fn voyage_charter_request() -> CharteringRequest {
    CharteringRequest {
        loading_port: "HAIPHONG".into(),
        discharging_port: "SINGAPORE".into(),
        cargo_quantity: Some("25000 MT".into()),
        cargo_type: Some("BULK".into()),
        charter_type: CharterType::Voyage,
        laycan_from: Some(date(2024, 7, 1)),
        laycan_to: Some(date(2024, 7, 10)),
    }
}

/// Wraps a payload in a submitted service request for a fresh customer
pub fn submitted_request(payload: ServicePayload) -> ServiceRequest {
    ServiceRequest {
        id: ServiceRequestId::new(),
        request_code: "RQ-20240601-0001".into(),
        customer_id: CustomerId::new(),
        employee_id: None,
        status: RequestStatus::Submitted,
        payload,
        submitted_at: Some(Utc::now()),
    }
}
