//! Pensionable salary projection (ruhegehaltfähige Dienstbezüge).
//!
//! The salary of the grade held at retirement (the promotion target if one
//! is planned) is compounded forward by the assumed annual increase.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, FederalState, PromotionTarget};
use crate::salary_table::SalaryTable;

/// Current and projected salary figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionableSalary {
    /// Today's base salary for the current grade and step.
    pub current_base_salary: Decimal,
    /// Base salary of the retirement grade and step, compounded to retirement.
    pub projected_base_salary: Decimal,
    /// The salary the pension formula uses.
    pub pensionable_salary: Decimal,
}

/// Compounds `amount` by `growth_rate` percent for `years` whole years.
///
/// Negative year counts are treated as zero. Returns `None` if the result
/// exceeds the `Decimal` range.
pub fn compound(amount: Decimal, growth_rate: Decimal, years: i32) -> Option<Decimal> {
    let factor = Decimal::ONE + growth_rate / Decimal::ONE_HUNDRED;
    (0..years.max(0)).try_fold(amount, |value, _| value.checked_mul(factor))
}

/// Projects the pensionable salary at retirement.
///
/// # Arguments
///
/// * `table` - The salary table collaborator
/// * `state` - The employing state
/// * `pay_grade` / `experience_step` - The grade and step held today
/// * `promotion` - The grade and step expected at retirement, if any
/// * `growth_rate` - Annual salary increase in percent
/// * `years_remaining` - Whole years until retirement
///
/// # Errors
///
/// Propagates [`crate::error::EngineError::SalaryNotFound`] from the table
/// for either lookup, and returns a validation error if the projection
/// overflows.
///
/// # Examples
///
/// ```
/// use beamtenpension_engine::calculation::project_pensionable_salary;
/// use beamtenpension_engine::models::FederalState;
/// use beamtenpension_engine::salary_table::StaticSalaryTable;
/// use rust_decimal_macros::dec;
///
/// let table = StaticSalaryTable::new()
///     .with_salary(FederalState::Bund, "A9", 4, dec!(4000));
///
/// let salary = project_pensionable_salary(
///     &table, FederalState::Bund, "A9", 4, None, dec!(2), 2,
/// ).unwrap();
/// assert_eq!(salary.pensionable_salary, dec!(4161.6));
/// ```
pub fn project_pensionable_salary<T: SalaryTable + ?Sized>(
    table: &T,
    state: FederalState,
    pay_grade: &str,
    experience_step: u8,
    promotion: Option<&PromotionTarget>,
    growth_rate: Decimal,
    years_remaining: i32,
) -> EngineResult<PensionableSalary> {
    let current_base_salary = table.base_salary(state, pay_grade, experience_step)?;

    let target_base_salary = match promotion {
        Some(target) => table.base_salary(state, &target.pay_grade, target.experience_step)?,
        None => current_base_salary,
    };

    let projected_base_salary = compound(target_base_salary, growth_rate, years_remaining)
        .ok_or_else(|| {
            EngineError::validation(
                "pension_growth_rate",
                format!(
                    "compounding {}% over {} years overflows",
                    growth_rate, years_remaining
                ),
            )
        })?;

    Ok(PensionableSalary {
        current_base_salary,
        projected_base_salary,
        pensionable_salary: projected_base_salary,
    })
}

impl PensionableSalary {
    /// Builds the audit step documenting this result.
    pub fn audit_step(
        &self,
        pay_grade: &str,
        experience_step: u8,
        promotion: Option<&PromotionTarget>,
        growth_rate: Decimal,
        years_remaining: i32,
        step_number: u32,
    ) -> AuditStep {
        let (target_grade, target_step) = match promotion {
            Some(target) => (target.pay_grade.as_str(), target.experience_step),
            None => (pay_grade, experience_step),
        };

        AuditStep {
            step_number,
            rule_id: "pensionable_salary".to_string(),
            rule_name: "Pensionable Salary Projection".to_string(),
            legal_ref: "§ 5 BeamtVG".to_string(),
            input: serde_json::json!({
                "pay_grade": pay_grade,
                "experience_step": experience_step,
                "target_pay_grade": target_grade,
                "target_experience_step": target_step,
                "promotion_planned": promotion.is_some(),
                "growth_rate": growth_rate.normalize().to_string(),
                "years_remaining": years_remaining,
            }),
            output: serde_json::json!({
                "current_base_salary": self.current_base_salary.normalize().to_string(),
                "projected_base_salary": self.projected_base_salary.round_dp(2).normalize().to_string(),
            }),
            reasoning: format!(
                "{} step {} compounded at {}% for {} years = {}",
                target_grade,
                target_step,
                growth_rate.normalize(),
                years_remaining.max(0),
                self.projected_base_salary.round_dp(2).normalize()
            ),
        }
    }
}
