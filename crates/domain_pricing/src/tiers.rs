//! Banded multiplier resolvers for vessel and cargo metrics
//!
//! Each resolver partitions a numeric domain into ordered, half-open bands
//! and maps every input to exactly one band. Boundaries are exclusive above
//! (`< upper bound`) except the final band, which is unbounded; values below
//! the lowest explicit threshold take the lowest band. The functions are
//! pure and total over their domain - input validation happens at the
//! payload boundary before any of these run.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Gross-tonnage multiplier applied to the port dues base rate
pub fn grt_factor(grt: u32) -> Decimal {
    if grt < 1000 {
        dec!(0.5)
    } else if grt < 5000 {
        dec!(1.0)
    } else if grt < 10000 {
        dec!(1.5)
    } else if grt < 50000 {
        dec!(2.0)
    } else {
        dec!(3.0)
    }
}

/// Deadweight multiplier applied to the agency fee base rate
pub fn dwt_factor(dwt: u32) -> Decimal {
    if dwt < 5000 {
        dec!(1.0)
    } else if dwt < 10000 {
        dec!(1.2)
    } else if dwt < 50000 {
        dec!(1.5)
    } else if dwt < 100000 {
        dec!(2.0)
    } else {
        dec!(2.5)
    }
}

/// Length-overall multiplier applied to the pilotage base rate
pub fn loa_factor(loa: Decimal) -> Decimal {
    if loa < dec!(100) {
        dec!(1.0)
    } else if loa < dec!(150) {
        dec!(1.3)
    } else if loa < dec!(200) {
        dec!(1.6)
    } else if loa < dec!(300) {
        dec!(2.0)
    } else {
        dec!(2.5)
    }
}

/// Per-GRT pilotage rate for the disbursement account
///
/// Unlike the multiplier tables above, these bands are inclusive above
/// (`<= upper bound`), matching the published tariff brackets.
pub fn pilotage_rate(grt: u32) -> Decimal {
    if grt <= 10000 {
        dec!(0.08)
    } else if grt <= 30000 {
        dec!(0.10)
    } else if grt <= 50000 {
        dec!(0.12)
    } else {
        dec!(0.15)
    }
}

/// Number of tugs required for berthing, from vessel length and deadweight
pub fn tug_count(loa: Decimal, dwt: u32) -> u32 {
    if loa < dec!(100) {
        1
    } else if loa < dec!(150) {
        if dwt < 20000 {
            2
        } else {
            3
        }
    } else if loa < dec!(200) {
        if dwt < 30000 {
            2
        } else {
            3
        }
    } else if loa < dec!(250) {
        3
    } else {
        4
    }
}

/// Estimated crew complement from deadweight, for quarantine fees
pub fn estimated_crew(dwt: u32) -> u32 {
    if dwt < 10000 {
        15
    } else if dwt <= 30000 {
        20
    } else if dwt <= 50000 {
        25
    } else {
        30
    }
}

/// Whether a shipment qualifies for the volume discount
pub fn volume_discount_applies(total_containers: u32) -> bool {
    total_containers >= 5
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Bands are contiguous and exhaustive: every input maps to a factor,
        // and the mapping is monotonic in the input.
        #[test]
        fn grt_factor_is_monotonic(a in 0u32..200_000, b in 0u32..200_000) {
            if a <= b {
                prop_assert!(grt_factor(a) <= grt_factor(b));
            }
        }

        #[test]
        fn dwt_factor_is_monotonic(a in 0u32..300_000, b in 0u32..300_000) {
            if a <= b {
                prop_assert!(dwt_factor(a) <= dwt_factor(b));
            }
        }
    }
}
