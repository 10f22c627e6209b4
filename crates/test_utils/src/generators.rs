//! Randomized request generators for exploratory tests

use fake::faker::company::en::{Bs, CompanyName};
use fake::Fake;
use rust_decimal::Decimal;

use domain_pricing::{FreightForwardingRequest, Port, ShippingAgencyRequest};

use crate::fixtures::date;

/// World ports the freight lanes draw from
const PORTS: &[&str] = &[
    "HAIPHONG",
    "HOCHIMINH",
    "SINGAPORE",
    "HONGKONG",
    "BUSAN",
    "ROTTERDAM",
];

/// A freight forwarding request with the given container counts and a
/// pseudo-random lane picked from the port pool
pub fn freight_request(seed: usize, container_20: u32, container_40: u32) -> FreightForwardingRequest {
    let loading = PORTS[seed % PORTS.len()];
    let discharging = PORTS[(seed + 1) % PORTS.len()];

    FreightForwardingRequest {
        cargo_name: CompanyName().fake(),
        loading_port: loading.into(),
        discharging_port: discharging.into(),
        container_20,
        container_40,
        shipment_date_from: Some(date(2024, 6, 1)),
        shipment_date_to: Some(date(2024, 6, 15)),
        cargo_description: Some(Bs().fake()),
    }
}

/// A port call with the given vessel metrics
pub fn port_call(port: Port, grt: u32, dwt: u32, loa: Decimal, stay_days: u32) -> ShippingAgencyRequest {
    let arrival = date(2024, 5, 10);
    ShippingAgencyRequest {
        port_of_call: port,
        grt,
        dwt,
        loa,
        arrival_date: arrival,
        departure_date: arrival + chrono::Duration::days(stay_days as i64),
        cargo_quantity: None,
    }
}
