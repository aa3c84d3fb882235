//! Pensionable service time calculation.
//!
//! Service time is the calendar-day distance between service entry and
//! retirement, expressed in years of 365.25 days (§ 6 BeamtVG).

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Average length of a calendar year in days.
///
/// Leap years are approximated rather than counted exactly; the replacement
/// rate constants are calibrated against this divisor.
pub const DAYS_PER_YEAR: Decimal = dec!(365.25);

/// Pensionable service time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTime {
    /// Exact years of service (`days / 365.25`).
    pub years: Decimal,
    /// Years of service truncated to two decimals, for display.
    pub years_rounded: Decimal,
}

/// Calculates the service time between entry and retirement.
///
/// # Errors
///
/// Returns [`EngineError::NonPositiveServiceTime`] unless the retirement date
/// is strictly after the entry date.
///
/// # Examples
///
/// ```
/// use beamtenpension_engine::calculation::calculate_service_time;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let entry = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
/// let retirement = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
///
/// let service = calculate_service_time(entry, retirement).unwrap();
/// assert_eq!(service.years, dec!(40));
/// ```
pub fn calculate_service_time(
    entry_date: NaiveDate,
    retirement_date: NaiveDate,
) -> EngineResult<ServiceTime> {
    let days = (retirement_date - entry_date).num_days();
    if days <= 0 {
        return Err(EngineError::NonPositiveServiceTime {
            entry_date,
            retirement_date,
        });
    }

    let years = Decimal::from(days) / DAYS_PER_YEAR;
    let years_rounded = years.round_dp_with_strategy(2, RoundingStrategy::ToZero);

    Ok(ServiceTime {
        years,
        years_rounded,
    })
}

impl ServiceTime {
    /// Builds the audit step documenting this result.
    pub fn audit_step(
        &self,
        entry_date: NaiveDate,
        retirement_date: NaiveDate,
        step_number: u32,
    ) -> AuditStep {
        let days = (retirement_date - entry_date).num_days();
        AuditStep {
            step_number,
            rule_id: "service_time".to_string(),
            rule_name: "Pensionable Service Time".to_string(),
            legal_ref: "§ 6 BeamtVG".to_string(),
            input: serde_json::json!({
                "entry_date": entry_date.to_string(),
                "retirement_date": retirement_date.to_string(),
            }),
            output: serde_json::json!({
                "days": days,
                "years": self.years.normalize().to_string(),
                "years_rounded": self.years_rounded.normalize().to_string(),
            }),
            reasoning: format!(
                "{} days / {} = {} years of service",
                days,
                DAYS_PER_YEAR.normalize(),
                self.years_rounded.normalize()
            ),
        }
    }
}
