//! Rate lookup with overrides, compiled defaults, and a last-resort constant
//!
//! Resolution order:
//!
//! 1. the overridable rate table, keyed by the full
//!    (service, category, origin, destination, size) tuple;
//! 2. the compiled default table, keyed by (service, category, size) only -
//!    route-specific rates have no generic fallback because route economics
//!    cannot be generalized, so an override entry is the only way to price a
//!    specific lane above the default;
//! 3. the last-resort flat constant. Availability of a usable quote
//!    outweighs precision for unmodeled inputs, but callers must record
//!    last-resort use as an audit step.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::PricingError;
use crate::request::{ContainerSize, ServiceType};

/// Fee categories a rate can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeCategory {
    OceanFreight,
    TerminalHandling,
    InlandTransport,
    Documentation,
    PortDues,
    AgencyFee,
    Pilotage,
    VoyageCharter,
    Brokerage,
}

impl fmt::Display for FeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FeeCategory::OceanFreight => "OCEAN_FREIGHT",
            FeeCategory::TerminalHandling => "THC",
            FeeCategory::InlandTransport => "INLAND_TRANSPORT",
            FeeCategory::Documentation => "DOCUMENTATION",
            FeeCategory::PortDues => "PORT_DUES",
            FeeCategory::AgencyFee => "AGENCY_FEE",
            FeeCategory::Pilotage => "PILOTAGE",
            FeeCategory::VoyageCharter => "VOYAGE_CHARTER",
            FeeCategory::Brokerage => "BROKERAGE",
        };
        write!(f, "{tag}")
    }
}

/// Full lookup key for a filed rate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateKey {
    pub service_type: ServiceType,
    pub category: FeeCategory,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub size: Option<ContainerSize>,
}

impl RateKey {
    /// A key with no route or size dimension (e.g. documentation fee)
    pub fn flat(service_type: ServiceType, category: FeeCategory) -> Self {
        Self {
            service_type,
            category,
            origin: None,
            destination: None,
            size: None,
        }
    }

    /// A key for a specific lane
    pub fn route(
        service_type: ServiceType,
        category: FeeCategory,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            service_type,
            category,
            origin: Some(origin.into()),
            destination: Some(destination.into()),
            size: None,
        }
    }

    /// Adds a container size class to the key
    pub fn sized(mut self, size: ContainerSize) -> Self {
        self.size = Some(size);
        self
    }
}

/// Where a resolved rate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSource {
    /// Explicit entry in the override table
    Override,
    /// Compiled default for (service, category, size)
    Default,
    /// The flat constant of last resort
    LastResort,
}

/// A resolved rate and its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRate {
    pub value: Decimal,
    pub source: RateSource,
}

/// The flat constant used when no filed or default rate exists
const LAST_RESORT_RATE: Decimal = dec!(100);

/// Compiled default rates, keyed without route dimensions
static DEFAULT_RATES: Lazy<HashMap<(ServiceType, FeeCategory, Option<ContainerSize>), Decimal>> =
    Lazy::new(|| {
        use ContainerSize::{Forty, Twenty};
        use FeeCategory::*;
        use ServiceType::*;

        HashMap::from([
            ((FreightForwarding, OceanFreight, Some(Twenty)), dec!(300)),
            ((FreightForwarding, OceanFreight, Some(Forty)), dec!(500)),
            ((FreightForwarding, TerminalHandling, Some(Twenty)), dec!(80)),
            ((FreightForwarding, TerminalHandling, Some(Forty)), dec!(120)),
            ((FreightForwarding, InlandTransport, Some(Twenty)), dec!(80)),
            ((FreightForwarding, InlandTransport, Some(Forty)), dec!(100)),
            ((FreightForwarding, Documentation, None), dec!(230)),
            ((ShippingAgency, PortDues, None), dec!(500)),
            ((ShippingAgency, AgencyFee, None), dec!(800)),
            ((ShippingAgency, Pilotage, None), dec!(300)),
            ((Chartering, VoyageCharter, None), dec!(15000)),
            ((Chartering, Brokerage, None), dec!(2.5)),
        ])
    });

/// The rate book consulted by every calculator
///
/// Overrides are filed per full key; the compiled defaults and the
/// last-resort constant back them. An empty book still prices every
/// standard request.
#[derive(Debug, Clone)]
pub struct RateBook {
    overrides: HashMap<RateKey, Decimal>,
    last_resort: Option<Decimal>,
}

impl Default for RateBook {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            last_resort: Some(LAST_RESORT_RATE),
        }
    }
}

impl RateBook {
    /// Creates a book with no overrides and the standard last-resort constant
    pub fn new() -> Self {
        Self::default()
    }

    /// Files an override rate for the given key
    pub fn with_override(mut self, key: RateKey, rate: Decimal) -> Self {
        self.overrides.insert(key, rate);
        self
    }

    /// Files an override rate in place
    pub fn set_override(&mut self, key: RateKey, rate: Decimal) {
        self.overrides.insert(key, rate);
    }

    /// Removes the last-resort constant
    ///
    /// Only meaningful for exercising the exhausted-lookup failure path.
    pub fn without_last_resort(mut self) -> Self {
        self.last_resort = None;
        self
    }

    /// Resolves a rate, reporting its provenance
    pub fn resolve(&self, key: &RateKey) -> Result<ResolvedRate, PricingError> {
        if let Some(&value) = self.overrides.get(key) {
            return Ok(ResolvedRate {
                value,
                source: RateSource::Override,
            });
        }

        let default_key = (key.service_type, key.category, key.size);
        if let Some(&value) = DEFAULT_RATES.get(&default_key) {
            return Ok(ResolvedRate {
                value,
                source: RateSource::Default,
            });
        }

        match self.last_resort {
            Some(value) => Ok(ResolvedRate {
                value,
                source: RateSource::LastResort,
            }),
            None => Err(PricingError::UnresolvedRate {
                service_type: key.service_type,
                category: key.category,
            }),
        }
    }
}
