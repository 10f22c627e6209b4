//! Freight forwarding & logistics price calculation
//!
//! Canonical component order: ocean freight per size class, terminal
//! handling at both ends, documentation, inland transport at both ends,
//! then the bunker surcharge and the volume discount. The discount base is
//! base price plus surcharges, computed before the discount itself is
//! subtracted.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tracing::info;

use core_kernel::{Money, Rate};

use super::{lookup_rate, CURRENCY};
use crate::error::PricingError;
use crate::rates::{FeeCategory, RateBook, RateKey};
use crate::request::{ContainerSize, FreightForwardingRequest, Leg, ServiceType};
use crate::result::{BreakdownAccumulator, PriceCalculationResult, StepRecord};

const BAF_RATE: Decimal = dec!(0.10);
const VOLUME_DISCOUNT_RATE: Decimal = dec!(0.05);

/// Prices a freight forwarding request
pub fn calculate(
    request: &FreightForwardingRequest,
    rates: &RateBook,
) -> Result<PriceCalculationResult, PricingError> {
    request.validate()?;

    info!(
        loading = %request.loading_port,
        discharging = %request.discharging_port,
        containers = request.total_containers(),
        "calculating freight forwarding price"
    );

    let mut acc = BreakdownAccumulator::new(CURRENCY);

    // 1-2. Ocean freight per container size
    let ocean_20 = ocean_freight(&mut acc, rates, request, ContainerSize::Twenty)?;
    let ocean_40 = ocean_freight(&mut acc, rates, request, ContainerSize::Forty)?;
    let ocean_total = ocean_20 + ocean_40;

    // 3-4. Terminal handling at both ends
    terminal_handling(&mut acc, rates, request, &request.loading_port, Leg::Origin)?;
    terminal_handling(&mut acc, rates, request, &request.discharging_port, Leg::Destination)?;

    // 5. Documentation fee
    let doc_key = RateKey::flat(ServiceType::FreightForwarding, FeeCategory::Documentation);
    let doc_rate = lookup_rate(&mut acc, rates, &doc_key, "Documentation Fee")?;
    let doc_fee = Money::new(doc_rate, CURRENCY).round_to_currency();
    acc.add_base(
        "Documentation Fee",
        "Per shipment",
        Decimal::ONE,
        Some(doc_fee),
        doc_fee,
        StepRecord::new(
            "DOCUMENTATION",
            "Documentation Fee",
            "FIXED_RATE",
            json!({ "rate": doc_rate }),
        )
        .rate(doc_rate),
    );

    // 6-7. Inland transport at both ends
    inland_transport(&mut acc, rates, request, &request.loading_port, Leg::Origin)?;
    inland_transport(&mut acc, rates, request, &request.discharging_port, Leg::Destination)?;

    // 8. Bunker adjustment factor, 10% of ocean freight, rounded on its own
    let baf = ocean_total.mul_rounded(BAF_RATE);
    acc.add_surcharge(
        "BAF (10%)",
        "Bunker Adjustment Factor",
        baf,
        StepRecord::new(
            "SURCHARGE_BAF",
            "BAF",
            "OCEAN_FREIGHT × 0.10",
            json!({ "ocean_freight": ocean_total.amount(), "rate": BAF_RATE }),
        )
        .base_value(ocean_total.amount())
        .rate(BAF_RATE),
    );

    // 9. Volume discount; the base must never include the discount itself
    let total_containers = request.total_containers();
    if crate::tiers::volume_discount_applies(total_containers) {
        let discount_base = acc.base_price() + acc.total_surcharges();
        let discount = discount_base.mul_rounded(VOLUME_DISCOUNT_RATE);
        acc.add_discount(
            "Volume Discount (5%)",
            format!("{total_containers} containers"),
            discount,
            StepRecord::new(
                "DISCOUNT_VOLUME",
                "Volume Discount",
                "SUBTOTAL × 0.05",
                json!({
                    "subtotal": discount_base.amount(),
                    "containers": total_containers,
                    "rate": VOLUME_DISCOUNT_RATE,
                }),
            )
            .base_value(discount_base.amount())
            .rate(-VOLUME_DISCOUNT_RATE),
        );
    }

    // 10. Tax (zero-rated, step emitted for shape compatibility)
    let result = acc.finalize(Rate::zero());

    info!(
        base = %result.base_price,
        surcharges = %result.total_surcharges,
        discounts = %result.total_discounts,
        finals = %result.final_amount,
        "freight forwarding price calculated"
    );

    Ok(result)
}

fn ocean_freight(
    acc: &mut BreakdownAccumulator,
    rates: &RateBook,
    request: &FreightForwardingRequest,
    size: ContainerSize,
) -> Result<Money, PricingError> {
    let quantity = match size {
        ContainerSize::Twenty => request.container_20,
        ContainerSize::Forty => request.container_40,
    };
    if quantity == 0 {
        return Ok(Money::zero(CURRENCY));
    }

    let name = format!("Ocean Freight {}ft", size.code());
    let key = RateKey::route(
        ServiceType::FreightForwarding,
        FeeCategory::OceanFreight,
        &request.loading_port,
        &request.discharging_port,
    )
    .sized(size);
    let rate = lookup_rate(acc, rates, &key, &name)?;

    let unit_price = Money::new(rate, CURRENCY);
    let total = unit_price.mul_rounded(Decimal::from(quantity));

    acc.add_base(
        &name,
        format!("{} to {}", request.loading_port, request.discharging_port),
        Decimal::from(quantity),
        Some(unit_price),
        total,
        StepRecord::new(
            format!("OCEAN_FREIGHT_{}", size.code()),
            format!("Container {}ft Rate", size.code()),
            format!("RATE_{0} × QTY_{0}", size.code()),
            json!({
                "route": format!("{}-{}", request.loading_port, request.discharging_port),
                "rate": rate,
                "qty": quantity,
            }),
        )
        .base_value(rate)
        .multiplier(Decimal::from(quantity)),
    );

    Ok(total)
}

fn terminal_handling(
    acc: &mut BreakdownAccumulator,
    rates: &RateBook,
    request: &FreightForwardingRequest,
    location: &str,
    leg: Leg,
) -> Result<Money, PricingError> {
    per_container_charge(
        acc,
        rates,
        request,
        location,
        leg,
        FeeCategory::TerminalHandling,
        "THC",
    )
}

fn inland_transport(
    acc: &mut BreakdownAccumulator,
    rates: &RateBook,
    request: &FreightForwardingRequest,
    location: &str,
    leg: Leg,
) -> Result<Money, PricingError> {
    per_container_charge(
        acc,
        rates,
        request,
        location,
        leg,
        FeeCategory::InlandTransport,
        "Inland Transport",
    )
}

/// Shared shape of the THC and inland components: a 20ft and a 40ft rate
/// applied to the respective quantities at one end of the route
fn per_container_charge(
    acc: &mut BreakdownAccumulator,
    rates: &RateBook,
    request: &FreightForwardingRequest,
    location: &str,
    leg: Leg,
    category: FeeCategory,
    label: &str,
) -> Result<Money, PricingError> {
    let name = format!("{label} {}", leg.as_str());
    let key_20 = RateKey::route(ServiceType::FreightForwarding, category, location, leg.as_str())
        .sized(ContainerSize::Twenty);
    let key_40 = RateKey::route(ServiceType::FreightForwarding, category, location, leg.as_str())
        .sized(ContainerSize::Forty);
    let rate_20 = lookup_rate(acc, rates, &key_20, &name)?;
    let rate_40 = lookup_rate(acc, rates, &key_40, &name)?;

    let qty_20 = Decimal::from(request.container_20);
    let qty_40 = Decimal::from(request.container_40);
    let total = Money::new(rate_20, CURRENCY).mul_rounded(qty_20)
        + Money::new(rate_40, CURRENCY).mul_rounded(qty_40);

    if total.is_positive() {
        acc.add_base(
            &name,
            format!(
                "{location} ({}×20' + {}×40')",
                request.container_20, request.container_40
            ),
            qty_20 + qty_40,
            None,
            total,
            StepRecord::new(
                format!("{}_{}", category, leg.as_str()),
                format!("{label} {location}"),
                format!("{0}_20 × QTY_20 + {0}_40 × QTY_40", category),
                json!({
                    "location": location,
                    "rate_20": rate_20,
                    "qty_20": request.container_20,
                    "rate_40": rate_40,
                    "qty_40": request.container_40,
                }),
            ),
        );
    }

    Ok(total)
}
