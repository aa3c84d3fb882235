//! Pension allowance (Versorgungsfreibetrag) phase-out table.
//!
//! Part of a civil-servant pension is tax free: a percentage of the annual
//! gross pension up to a ceiling, plus a flat supplement (§ 19 Abs. 2 EStG).
//! All three figures are fixed by the year retirement starts and decrease to
//! zero by 2040.
//!
//! ## Clamping
//!
//! - Years before the first row use the first row (2025)
//! - Years from the last row on (2040) yield zero in all three components

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One row of the phase-out table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowanceRates {
    /// Year retirement starts.
    pub year: i32,
    /// Tax-free share of the annual gross pension, in percent.
    pub percent: Decimal,
    /// Ceiling on the percentage part.
    pub ceiling: Decimal,
    /// Flat supplement added on top.
    pub supplement: Decimal,
}

const fn row(year: i32, percent: Decimal, ceiling: Decimal, supplement: Decimal) -> AllowanceRates {
    AllowanceRates {
        year,
        percent,
        ceiling,
        supplement,
    }
}

/// The phase-out table, sorted by year.
pub const ALLOWANCE_TABLE: [AllowanceRates; 16] = [
    row(2025, dec!(14.7), dec!(1102.5), dec!(330)),
    row(2026, dec!(13.7), dec!(1027.5), dec!(308)),
    row(2027, dec!(12.7), dec!(952.5), dec!(286)),
    row(2028, dec!(11.7), dec!(877.5), dec!(263)),
    row(2029, dec!(10.7), dec!(802.5), dec!(241)),
    row(2030, dec!(9.7), dec!(727.5), dec!(218)),
    row(2031, dec!(8.7), dec!(652.5), dec!(196)),
    row(2032, dec!(7.7), dec!(577.5), dec!(173)),
    row(2033, dec!(6.7), dec!(502.5), dec!(151)),
    row(2034, dec!(5.7), dec!(427.5), dec!(128)),
    row(2035, dec!(4.7), dec!(352.5), dec!(106)),
    row(2036, dec!(3.7), dec!(277.5), dec!(83)),
    row(2037, dec!(2.7), dec!(202.5), dec!(61)),
    row(2038, dec!(1.7), dec!(127.5), dec!(38)),
    row(2039, dec!(0.7), dec!(52.5), dec!(16)),
    row(2040, dec!(0), dec!(0), dec!(0)),
];

/// Returns the table row that applies to a retirement year.
pub fn allowance_rates(retirement_year: i32) -> AllowanceRates {
    let first = ALLOWANCE_TABLE[0];
    let last = ALLOWANCE_TABLE[ALLOWANCE_TABLE.len() - 1];

    if retirement_year <= first.year {
        return first;
    }
    if retirement_year >= last.year {
        return last;
    }

    // Number of rows whose year is <= retirement_year, at least 1 here.
    let idx = ALLOWANCE_TABLE.partition_point(|r| r.year <= retirement_year);
    ALLOWANCE_TABLE[idx - 1]
}

/// The tax-free part of the pension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionAllowance {
    /// The capped percentage part.
    pub allowance: Decimal,
    /// The flat supplement.
    pub supplement: Decimal,
    /// Sum of both.
    pub total: Decimal,
}

/// Calculates the pension allowance for an annual gross pension.
///
/// # Examples
///
/// ```
/// use beamtenpension_engine::calculation::calculate_pension_allowance;
/// use rust_decimal_macros::dec;
///
/// let allowance = calculate_pension_allowance(dec!(40000), 2030);
/// assert_eq!(allowance.allowance, dec!(727.50));
/// assert_eq!(allowance.supplement, dec!(218));
/// assert_eq!(allowance.total, dec!(945.50));
/// ```
pub fn calculate_pension_allowance(gross_annual: Decimal, retirement_year: i32) -> PensionAllowance {
    let rates = allowance_rates(retirement_year);
    let allowance = (gross_annual * rates.percent / Decimal::ONE_HUNDRED).min(rates.ceiling);

    PensionAllowance {
        allowance,
        supplement: rates.supplement,
        total: allowance + rates.supplement,
    }
}
