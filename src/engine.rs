//! Pension calculation pipeline.
//!
//! [`compute_pension_as_of`] runs the stages in a fixed order: calculation
//! basis, service time, replacement rate, pensionable salary, gross pension,
//! insurance contributions, taxes and net pension. Each stage contributes one
//! audit step. Nothing is cached between calls.

use chrono::{Datelike, Local, NaiveDate};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::calculation::{
    DEFAULT_STANDARD_RETIREMENT_AGE, calculate_insurance_contributions,
    calculate_replacement_rate, calculate_service_time, calculate_taxes, compose_gross_pension,
    compose_net_pension, project_pensionable_salary,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CalculationBasis, CareerProfile, PensionResult, PensionSummary};
use crate::salary_table::SalaryTable;

/// Computes the pension using today's local date as the valuation date.
pub fn compute_pension<T: SalaryTable + ?Sized>(
    profile: &CareerProfile,
    table: &T,
) -> EngineResult<PensionResult> {
    compute_pension_as_of(profile, table, Local::now().date_naive())
}

/// Computes the pension for a valuation date.
///
/// The valuation date decides the current age and thereby the years of
/// salary growth until retirement. The same profile and date always give
/// the same result.
///
/// # Errors
///
/// - [`EngineError::BirthAfterValuation`] if the birth date lies after the
///   valuation date
/// - [`EngineError::RetirementInPast`] if the retirement age has been passed
/// - [`EngineError::NonPositiveServiceTime`] if service would start on or
///   after the retirement date
/// - [`EngineError::SalaryNotFound`] from the salary table
///
/// # Example
///
/// ```
/// use beamtenpension_engine::engine::compute_pension_as_of;
/// use beamtenpension_engine::models::{CareerProfile, FederalState};
/// use beamtenpension_engine::salary_table::StaticSalaryTable;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let profile: CareerProfile = serde_json::from_value(serde_json::json!({
///     "birth_date": "1970-01-01",
///     "service_entry_date": "1997-01-01",
///     "state": "Bund",
///     "pay_grade": "A9",
///     "experience_step": 8,
///     "retirement_age": 67,
///     "pension_growth_rate": "0"
/// })).unwrap();
/// let table = StaticSalaryTable::new().with_salary(FederalState::Bund, "A9", 8, dec!(4000));
/// let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
///
/// let result = compute_pension_as_of(&profile, &table, as_of).unwrap();
/// assert_eq!(result.replacement_rate.rate, dec!(71.75));
/// assert_eq!(result.gross_pension.monthly, dec!(2870));
/// ```
pub fn compute_pension_as_of<T: SalaryTable + ?Sized>(
    profile: &CareerProfile,
    table: &T,
    valuation_date: NaiveDate,
) -> EngineResult<PensionResult> {
    let mut audit_trace: Vec<AuditStep> = Vec::with_capacity(7);
    let mut step_number: u32 = 1;

    let basis = calculation_basis(profile, valuation_date)?;
    debug!(
        current_age = basis.current_age,
        years_until_retirement = basis.years_until_retirement,
        retirement_year = basis.retirement_year,
        "Derived calculation basis"
    );

    let service_time =
        calculate_service_time(profile.service_entry_date(), basis.retirement_date)
            .inspect_err(|err| warn!(error = %err, "Service time rejected"))?;
    audit_trace.push(service_time.audit_step(
        profile.service_entry_date(),
        basis.retirement_date,
        step_number,
    ));
    step_number += 1;

    let replacement_rate = calculate_replacement_rate(
        service_time.years,
        profile.retirement_age(),
        DEFAULT_STANDARD_RETIREMENT_AGE,
    );
    audit_trace.push(replacement_rate.audit_step(
        service_time.years,
        profile.retirement_age(),
        DEFAULT_STANDARD_RETIREMENT_AGE,
        step_number,
    ));
    step_number += 1;
    debug!(rate = %replacement_rate.rate, discount = %replacement_rate.discount, "Replacement rate");

    let pensionable_salary = project_pensionable_salary(
        table,
        profile.state(),
        profile.pay_grade(),
        profile.experience_step(),
        profile.promotion(),
        profile.pension_growth_rate(),
        basis.years_until_retirement,
    )
    .inspect_err(|err| warn!(error = %err, "Salary lookup failed"))?;
    debug!(
        current = %pensionable_salary.current_base_salary,
        pensionable = %pensionable_salary.pensionable_salary.round_dp(2),
        "Pensionable salary"
    );
    audit_trace.push(pensionable_salary.audit_step(
        profile.pay_grade(),
        profile.experience_step(),
        profile.promotion(),
        profile.pension_growth_rate(),
        basis.years_until_retirement,
        step_number,
    ));
    step_number += 1;

    let gross_pension = compose_gross_pension(
        pensionable_salary.pensionable_salary,
        replacement_rate.rate,
        profile.additional_entitlements(),
    );
    audit_trace.push(gross_pension.audit_step(
        pensionable_salary.pensionable_salary,
        replacement_rate.rate,
        profile.additional_entitlements(),
        step_number,
    ));
    step_number += 1;

    let contributions = calculate_insurance_contributions(
        gross_pension.monthly,
        profile.state(),
        profile.childless(),
    );
    audit_trace.push(contributions.audit_step(
        gross_pension.monthly,
        profile.state(),
        profile.childless(),
        step_number,
    ));
    step_number += 1;

    let taxes = calculate_taxes(
        gross_pension.annual,
        contributions.total_annual,
        basis.retirement_year,
        profile.church_tax_liable(),
        profile.state(),
    );
    debug!(
        taxable_income = %taxes.taxable_income.round_dp(2),
        total_annual = %taxes.total_annual.round_dp(2),
        "Taxes"
    );
    audit_trace.push(taxes.audit_step(
        gross_pension.annual,
        contributions.total_annual,
        basis.retirement_year,
        profile.church_tax_liable(),
        step_number,
    ));
    step_number += 1;

    let net_pension = compose_net_pension(
        gross_pension.monthly,
        contributions.total_monthly,
        taxes.total_monthly,
    );
    audit_trace.push(net_pension.audit_step(
        gross_pension.monthly,
        contributions.total_monthly,
        taxes.total_monthly,
        step_number,
    ));

    let summary = PensionSummary {
        gross_monthly: gross_pension.monthly,
        health_contribution_monthly: contributions.health_monthly,
        care_contribution_monthly: contributions.care_monthly,
        contributions_monthly: contributions.total_monthly,
        tax_monthly: taxes.total_monthly,
        net_monthly: net_pension.monthly,
        gross_annual: gross_pension.annual,
        deductions_annual: contributions.total_annual + taxes.total_annual,
        net_annual: net_pension.annual,
        replacement_rate_percent: replacement_rate.rate,
    };

    info!(
        state = %profile.state(),
        pay_grade = profile.pay_grade(),
        retirement_year = basis.retirement_year,
        gross_monthly = %summary.gross_monthly.round_dp(2),
        net_monthly = %summary.net_monthly.round_dp(2),
        "Pension calculation complete"
    );

    Ok(PensionResult {
        input: profile.clone(),
        basis,
        service_time,
        replacement_rate,
        pensionable_salary,
        gross_pension,
        contributions,
        taxes,
        net_pension,
        summary,
        audit_trace,
    })
}

/// Computes many independent profiles in parallel.
///
/// Results are returned in input order; one failing profile does not affect
/// the others.
pub fn compute_pensions_as_of<T: SalaryTable + Sync + ?Sized>(
    profiles: &[CareerProfile],
    table: &T,
    valuation_date: NaiveDate,
) -> Vec<EngineResult<PensionResult>> {
    debug!(count = profiles.len(), "Computing pension batch");
    profiles
        .par_iter()
        .map(|profile| compute_pension_as_of(profile, table, valuation_date))
        .collect()
}

/// Derives ages, the retirement year and the retirement date.
///
/// # Errors
///
/// - [`EngineError::BirthAfterValuation`] if the birth date lies after the
///   valuation date
/// - [`EngineError::RetirementInPast`] if the retirement age is below the
///   current age
/// - [`EngineError::Validation`] if the retirement date is not representable
pub fn calculation_basis(
    profile: &CareerProfile,
    valuation_date: NaiveDate,
) -> EngineResult<CalculationBasis> {
    let birth_date = profile.birth_date();
    if birth_date > valuation_date {
        warn!(%birth_date, %valuation_date, "Birth date lies after the valuation date");
        return Err(EngineError::BirthAfterValuation {
            birth_date,
            valuation_date,
        });
    }

    // Non-negative from here on.
    let current_age = valuation_date.year() - birth_date.year();
    let retirement_age = profile.retirement_age();
    // Ages are validated to 55..=70.
    let retirement_age_years = retirement_age as i32;

    let years_until_retirement = retirement_age_years - current_age;
    if years_until_retirement < 0 {
        warn!(retirement_age, current_age, "Retirement age lies in the past");
        return Err(EngineError::RetirementInPast {
            retirement_age,
            current_age,
        });
    }

    let retirement_year = birth_date.year() + retirement_age_years;

    Ok(CalculationBasis {
        valuation_date,
        current_age,
        years_until_retirement,
        retirement_year,
        retirement_date: birthday_in_year(birth_date, retirement_year)?,
    })
}

/// Moves a birth date into another year; 29 February becomes 1 March in
/// non-leap years.
fn birthday_in_year(birth_date: NaiveDate, year: i32) -> EngineResult<NaiveDate> {
    birth_date
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .ok_or_else(|| {
            EngineError::validation(
                "birth_date",
                format!("retirement year {} is outside the supported date range", year),
            )
        })
}
