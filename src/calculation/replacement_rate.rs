//! Replacement rate (Ruhegehaltssatz) calculation.
//!
//! ## Rate Structure
//!
//! - Each year of service accrues 1.79375 percentage points (§ 14 Abs. 1 BeamtVG)
//! - The accrued rate is capped at 71.75 %, reached after exactly 40 years
//! - Each year retired before the standard retirement age costs 3.6 points
//!   (§ 14 Abs. 3 BeamtVG), and the result never drops below zero

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// The statutory maximum replacement rate in percent.
pub const MAX_REPLACEMENT_RATE: Decimal = dec!(71.75);

/// Percentage points accrued per year of service.
pub const ACCRUAL_PER_YEAR: Decimal = dec!(1.79375);

/// Percentage points deducted per year of early retirement.
pub const EARLY_RETIREMENT_DISCOUNT_PER_YEAR: Decimal = dec!(3.6);

/// The standard retirement age used when no other is given.
pub const DEFAULT_STANDARD_RETIREMENT_AGE: u32 = 67;

/// The replacement rate applied to the pensionable salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRate {
    /// The applied rate in percent (0–71.75).
    pub rate: Decimal,
    /// Percentage points deducted for early retirement (≥ 0).
    pub discount: Decimal,
    /// The statutory maximum (71.75).
    pub maximum_rate: Decimal,
}

/// Calculates the replacement rate from service years and retirement age.
///
/// # Arguments
///
/// * `service_years` - Exact years of service (> 0)
/// * `retirement_age` - The intended retirement age
/// * `standard_age` - The standard retirement age, usually
///   [`DEFAULT_STANDARD_RETIREMENT_AGE`]
///
/// # Examples
///
/// ```
/// use beamtenpension_engine::calculation::calculate_replacement_rate;
/// use rust_decimal_macros::dec;
///
/// let result = calculate_replacement_rate(dec!(35), 63, 67);
/// assert_eq!(result.rate, dec!(48.38125));
/// assert_eq!(result.discount, dec!(14.4));
/// ```
pub fn calculate_replacement_rate(
    service_years: Decimal,
    retirement_age: u32,
    standard_age: u32,
) -> ReplacementRate {
    let accrued = (service_years * ACCRUAL_PER_YEAR).min(MAX_REPLACEMENT_RATE);

    let (rate, discount) = if retirement_age < standard_age {
        let years_early = Decimal::from(standard_age - retirement_age);
        let discount = years_early * EARLY_RETIREMENT_DISCOUNT_PER_YEAR;
        ((accrued - discount).max(Decimal::ZERO), discount)
    } else {
        (accrued, Decimal::ZERO)
    };

    ReplacementRate {
        rate,
        discount,
        maximum_rate: MAX_REPLACEMENT_RATE,
    }
}

impl ReplacementRate {
    /// Builds the audit step documenting this result.
    pub fn audit_step(
        &self,
        service_years: Decimal,
        retirement_age: u32,
        standard_age: u32,
        step_number: u32,
    ) -> AuditStep {
        let reasoning = if self.discount > Decimal::ZERO {
            format!(
                "min({} years x {}, {}) - {} years early x {} = {}%",
                service_years.round_dp(2).normalize(),
                ACCRUAL_PER_YEAR.normalize(),
                MAX_REPLACEMENT_RATE.normalize(),
                standard_age - retirement_age,
                EARLY_RETIREMENT_DISCOUNT_PER_YEAR.normalize(),
                self.rate.round_dp(5).normalize()
            )
        } else {
            format!(
                "min({} years x {}, {}) = {}%, no early-retirement discount at age {}",
                service_years.round_dp(2).normalize(),
                ACCRUAL_PER_YEAR.normalize(),
                MAX_REPLACEMENT_RATE.normalize(),
                self.rate.round_dp(5).normalize(),
                retirement_age
            )
        };

        AuditStep {
            step_number,
            rule_id: "replacement_rate".to_string(),
            rule_name: "Replacement Rate".to_string(),
            legal_ref: "§ 14 BeamtVG".to_string(),
            input: serde_json::json!({
                "service_years": service_years.normalize().to_string(),
                "retirement_age": retirement_age,
                "standard_retirement_age": standard_age,
            }),
            output: serde_json::json!({
                "rate": self.rate.normalize().to_string(),
                "discount": self.discount.normalize().to_string(),
                "maximum_rate": self.maximum_rate.normalize().to_string(),
            }),
            reasoning,
        }
    }
}
