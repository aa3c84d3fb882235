//! Net pension composition.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::gross_pension::MONTHS_PER_YEAR;

/// Pension after contributions and taxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPension {
    /// Net pension per month.
    pub monthly: Decimal,
    /// Net pension per year.
    pub annual: Decimal,
}

/// Subtracts contributions and taxes from the gross pension.
///
/// The subtraction happens at monthly granularity; the annual figure is the
/// monthly one times twelve.
///
/// # Examples
///
/// ```
/// use beamtenpension_engine::calculation::compose_net_pension;
/// use rust_decimal_macros::dec;
///
/// let net = compose_net_pension(dec!(3070), dec!(135.387), dec!(300));
/// assert_eq!(net.monthly, dec!(2634.613));
/// assert_eq!(net.annual, dec!(31615.356));
/// ```
pub fn compose_net_pension(
    gross_monthly: Decimal,
    contributions_monthly: Decimal,
    tax_monthly: Decimal,
) -> NetPension {
    let monthly = gross_monthly - contributions_monthly - tax_monthly;

    NetPension {
        monthly,
        annual: monthly * MONTHS_PER_YEAR,
    }
}

impl NetPension {
    /// Builds the audit step documenting this result.
    pub fn audit_step(
        &self,
        gross_monthly: Decimal,
        contributions_monthly: Decimal,
        tax_monthly: Decimal,
        step_number: u32,
    ) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "net_pension".to_string(),
            rule_name: "Net Pension".to_string(),
            legal_ref: "-".to_string(),
            input: serde_json::json!({
                "gross_monthly": gross_monthly.round_dp(2).normalize().to_string(),
                "contributions_monthly": contributions_monthly.round_dp(2).normalize().to_string(),
                "tax_monthly": tax_monthly.round_dp(2).normalize().to_string(),
            }),
            output: serde_json::json!({
                "monthly": self.monthly.round_dp(2).normalize().to_string(),
                "annual": self.annual.round_dp(2).normalize().to_string(),
            }),
            reasoning: format!(
                "{} - {} - {} = {} per month",
                gross_monthly.round_dp(2).normalize(),
                contributions_monthly.round_dp(2).normalize(),
                tax_monthly.round_dp(2).normalize(),
                self.monthly.round_dp(2).normalize()
            ),
        }
    }
}
