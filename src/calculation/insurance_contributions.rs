//! Health and long-term-care insurance contributions (KV/PV).
//!
//! The state subsidy (Beihilfe) covers most medical costs; the pensioner
//! insures only the remaining own share. Contributions are charged on that
//! own share of the gross pension.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, FederalState};

use super::gross_pension::MONTHS_PER_YEAR;

/// Subsidy rate for states without an explicit override.
pub const DEFAULT_SUBSIDY_RATE: Decimal = dec!(0.7);

/// States whose subsidy rate is set explicitly.
pub const SUBSIDY_RATE_OVERRIDES: &[(FederalState, Decimal)] = &[
    (FederalState::BadenWuerttemberg, dec!(0.7)),
    (FederalState::Bund, dec!(0.7)),
];

/// Effective health insurance rate applied to the own share.
pub const HEALTH_INSURANCE_RATE: Decimal = dec!(0.107);

/// Long-term-care insurance base rate.
pub const CARE_INSURANCE_RATE: Decimal = dec!(0.034);

/// Care insurance surcharge for childless insured persons.
pub const CARE_CHILDLESS_SURCHARGE: Decimal = dec!(0.006);

/// Monthly and annual insurance contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceContributions {
    /// Share of costs covered by the state subsidy.
    pub subsidy_rate: Decimal,
    /// Health insurance contribution per month.
    pub health_monthly: Decimal,
    /// Long-term-care insurance contribution per month.
    pub care_monthly: Decimal,
    /// Both contributions per month.
    pub total_monthly: Decimal,
    /// Both contributions per year.
    pub total_annual: Decimal,
}

/// Returns the subsidy rate for a state.
pub fn subsidy_rate(state: FederalState) -> Decimal {
    SUBSIDY_RATE_OVERRIDES
        .iter()
        .find(|(s, _)| *s == state)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_SUBSIDY_RATE)
}

/// Calculates the insurance contributions on a monthly gross pension.
///
/// # Examples
///
/// ```
/// use beamtenpension_engine::calculation::calculate_insurance_contributions;
/// use beamtenpension_engine::models::FederalState;
/// use rust_decimal_macros::dec;
///
/// let kvpv = calculate_insurance_contributions(dec!(3070), FederalState::BadenWuerttemberg, true);
/// assert_eq!(kvpv.health_monthly, dec!(98.547));
/// assert_eq!(kvpv.care_monthly, dec!(36.84));
/// assert_eq!(kvpv.total_monthly, dec!(135.387));
/// ```
pub fn calculate_insurance_contributions(
    gross_monthly: Decimal,
    state: FederalState,
    childless: bool,
) -> InsuranceContributions {
    let subsidy_rate = subsidy_rate(state);
    let own_share = Decimal::ONE - subsidy_rate;

    let health_monthly = gross_monthly * own_share * HEALTH_INSURANCE_RATE;

    let care_rate = if childless {
        CARE_INSURANCE_RATE + CARE_CHILDLESS_SURCHARGE
    } else {
        CARE_INSURANCE_RATE
    };
    let care_monthly = gross_monthly * own_share * care_rate;

    let total_monthly = health_monthly + care_monthly;

    InsuranceContributions {
        subsidy_rate,
        health_monthly,
        care_monthly,
        total_monthly,
        total_annual: total_monthly * MONTHS_PER_YEAR,
    }
}

impl InsuranceContributions {
    /// Builds the audit step documenting this result.
    pub fn audit_step(
        &self,
        gross_monthly: Decimal,
        state: FederalState,
        childless: bool,
        step_number: u32,
    ) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "insurance_contributions".to_string(),
            rule_name: "Health and Care Insurance".to_string(),
            legal_ref: "§ 80 BBG, § 55 SGB XI".to_string(),
            input: serde_json::json!({
                "gross_monthly": gross_monthly.round_dp(2).normalize().to_string(),
                "state": state.name(),
                "childless": childless,
            }),
            output: serde_json::json!({
                "subsidy_rate": self.subsidy_rate.normalize().to_string(),
                "health_monthly": self.health_monthly.round_dp(2).normalize().to_string(),
                "care_monthly": self.care_monthly.round_dp(2).normalize().to_string(),
                "total_monthly": self.total_monthly.round_dp(2).normalize().to_string(),
                "total_annual": self.total_annual.round_dp(2).normalize().to_string(),
            }),
            reasoning: format!(
                "Own share {} of {} insured: health {} + care {} = {} per month",
                (Decimal::ONE - self.subsidy_rate).normalize(),
                gross_monthly.round_dp(2).normalize(),
                self.health_monthly.round_dp(2).normalize(),
                self.care_monthly.round_dp(2).normalize(),
                self.total_monthly.round_dp(2).normalize()
            ),
        }
    }
}
