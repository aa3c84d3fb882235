//! Gross pension composition.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// Months per year, used to annualize monthly figures.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Gross pension before contributions and taxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossPension {
    /// Gross pension per month.
    pub monthly: Decimal,
    /// Gross pension per year.
    pub annual: Decimal,
}

/// Combines salary, replacement rate and flat add-ons into the gross pension.
///
/// `monthly = salary × rate / 100 + additional_entitlements`. Inputs are
/// validated upstream; nothing is rejected here.
///
/// # Examples
///
/// ```
/// use beamtenpension_engine::calculation::compose_gross_pension;
/// use rust_decimal_macros::dec;
///
/// let gross = compose_gross_pension(dec!(4000), dec!(71.75), dec!(200));
/// assert_eq!(gross.monthly, dec!(3070.00));
/// assert_eq!(gross.annual, dec!(36840.00));
/// ```
pub fn compose_gross_pension(
    pensionable_salary: Decimal,
    replacement_rate: Decimal,
    additional_entitlements: Decimal,
) -> GrossPension {
    let monthly =
        pensionable_salary * (replacement_rate / Decimal::ONE_HUNDRED) + additional_entitlements;

    GrossPension {
        monthly,
        annual: monthly * MONTHS_PER_YEAR,
    }
}

impl GrossPension {
    /// Builds the audit step documenting this result.
    pub fn audit_step(
        &self,
        pensionable_salary: Decimal,
        replacement_rate: Decimal,
        additional_entitlements: Decimal,
        step_number: u32,
    ) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "gross_pension".to_string(),
            rule_name: "Gross Pension".to_string(),
            legal_ref: "§ 14 Abs. 1 BeamtVG".to_string(),
            input: serde_json::json!({
                "pensionable_salary": pensionable_salary.round_dp(2).normalize().to_string(),
                "replacement_rate": replacement_rate.normalize().to_string(),
                "additional_entitlements": additional_entitlements.normalize().to_string(),
            }),
            output: serde_json::json!({
                "monthly": self.monthly.round_dp(2).normalize().to_string(),
                "annual": self.annual.round_dp(2).normalize().to_string(),
            }),
            reasoning: format!(
                "{} x {}% + {} = {} per month",
                pensionable_salary.round_dp(2).normalize(),
                replacement_rate.round_dp(5).normalize(),
                additional_entitlements.normalize(),
                self.monthly.round_dp(2).normalize()
            ),
        }
    }
}
