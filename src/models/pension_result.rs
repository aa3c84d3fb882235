//! Pension result models.
//!
//! This module contains the [`PensionResult`] type returned by the
//! orchestrator, together with the summary view and the audit trace that
//! records every stage of the calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    GrossPension, InsuranceContributions, NetPension, PensionableSalary, ReplacementRate,
    ServiceTime, TaxBreakdown,
};

use super::CareerProfile;

/// A single step in the audit trace recording a calculation stage.
///
/// Each step captures the stage's input, output, the statutory rule it
/// implements and a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statutory provision behind this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// Dates and ages the pipeline derives from the profile and valuation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationBasis {
    /// The date the calculation treats as "today".
    pub valuation_date: NaiveDate,
    /// Age in calendar years on the valuation date (year difference only).
    pub current_age: i32,
    /// Years left until the intended retirement age.
    pub years_until_retirement: i32,
    /// Calendar year of retirement.
    pub retirement_year: i32,
    /// Projected retirement date (birthday in the retirement year).
    pub retirement_date: NaiveDate,
}

/// Headline figures of a pension calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionSummary {
    /// Gross pension per month.
    pub gross_monthly: Decimal,
    /// Health insurance contribution per month.
    pub health_contribution_monthly: Decimal,
    /// Long-term-care insurance contribution per month.
    pub care_contribution_monthly: Decimal,
    /// Sum of both insurance contributions per month.
    pub contributions_monthly: Decimal,
    /// Income tax, church tax and solidarity surcharge per month.
    pub tax_monthly: Decimal,
    /// Net pension per month.
    pub net_monthly: Decimal,
    /// Gross pension per year.
    pub gross_annual: Decimal,
    /// Contributions plus taxes per year.
    pub deductions_annual: Decimal,
    /// Net pension per year.
    pub net_annual: Decimal,
    /// The applied replacement rate in percent.
    pub replacement_rate_percent: Decimal,
}

/// The complete, immutable result of one pension calculation.
///
/// Every intermediate figure is retained so that the result can be audited
/// or rendered stage by stage. Identical profiles and valuation dates always
/// produce identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionResult {
    /// The validated input the calculation ran on.
    pub input: CareerProfile,
    /// Ages and dates derived from the input.
    pub basis: CalculationBasis,
    /// Pensionable service time.
    pub service_time: ServiceTime,
    /// Replacement rate after early-retirement discount.
    pub replacement_rate: ReplacementRate,
    /// Current and projected salary.
    pub pensionable_salary: PensionableSalary,
    /// Gross pension.
    pub gross_pension: GrossPension,
    /// Health and long-term-care insurance contributions.
    pub contributions: InsuranceContributions,
    /// Income tax breakdown.
    pub taxes: TaxBreakdown,
    /// Net pension.
    pub net_pension: NetPension,
    /// Headline figures.
    pub summary: PensionSummary,
    /// One audit step per calculation stage, in execution order.
    pub audit_trace: Vec<AuditStep>,
}
