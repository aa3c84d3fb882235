//! Tax calculation on the annual pension.
//!
//! ## Steps
//!
//! 1. Pension allowance from the phase-out table (§ 19 Abs. 2 EStG)
//! 2. Flat income-related expense deduction of 102 (§ 9a EStG)
//! 3. Special expenses: flat 36 (§ 10c EStG) plus contributions up to 1 900
//!    (§ 10 Abs. 4 EStG)
//! 4. Income tax from the tariff (§ 32a EStG)
//! 5. Church tax: 8 % in Baden-Württemberg and Bayern, 9 % elsewhere
//! 6. Solidarity surcharge: exempt up to 18 130 of income tax, then
//!    `min(11.9 % of the excess, 5.5 % of the tax)` (§ 4 SolZG)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, FederalState};

use super::gross_pension::MONTHS_PER_YEAR;
use super::income_tax::income_tax;
use super::pension_allowance::{PensionAllowance, calculate_pension_allowance};

/// Flat deduction for income-related expenses on pensions.
pub const INCOME_RELATED_EXPENSES: Decimal = dec!(102);

/// Flat special-expenses allowance.
pub const SPECIAL_EXPENSES_ALLOWANCE: Decimal = dec!(36);

/// Cap on deductible insurance contributions.
pub const MAX_DEDUCTIBLE_CONTRIBUTIONS: Decimal = dec!(1900);

/// Church tax rate in Baden-Württemberg and Bayern.
pub const CHURCH_TAX_RATE_REDUCED: Decimal = dec!(0.08);

/// Church tax rate in all other states.
pub const CHURCH_TAX_RATE: Decimal = dec!(0.09);

/// Income tax up to which no solidarity surcharge is levied.
pub const SOLIDARITY_EXEMPTION: Decimal = dec!(18130);

/// Share of the excess over the exemption charged in the taper zone.
pub const SOLIDARITY_TAPER_RATE: Decimal = dec!(0.119);

/// Full solidarity surcharge rate.
pub const SOLIDARITY_RATE: Decimal = dec!(0.055);

/// Every figure of the tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Tax-free pension allowance.
    pub pension_allowance: PensionAllowance,
    /// Flat income-related expense deduction.
    pub income_related_expenses: Decimal,
    /// Pension income after allowance and expenses.
    pub taxable_pension_income: Decimal,
    /// Flat allowance plus deductible contributions.
    pub special_expenses: Decimal,
    /// Taxable income (zu versteuerndes Einkommen).
    pub taxable_income: Decimal,
    /// Annual income tax.
    pub income_tax: Decimal,
    /// Annual church tax.
    pub church_tax: Decimal,
    /// Annual solidarity surcharge.
    pub solidarity_surcharge: Decimal,
    /// Sum of all three taxes per year.
    pub total_annual: Decimal,
    /// Sum of all three taxes per month.
    pub total_monthly: Decimal,
}

/// Returns the church tax rate of a state.
pub fn church_tax_rate(state: FederalState) -> Decimal {
    match state {
        FederalState::BadenWuerttemberg | FederalState::Bayern => CHURCH_TAX_RATE_REDUCED,
        _ => CHURCH_TAX_RATE,
    }
}

/// Calculates the solidarity surcharge on an annual income tax.
pub fn solidarity_surcharge(income_tax: Decimal) -> Decimal {
    if income_tax <= SOLIDARITY_EXEMPTION {
        return Decimal::ZERO;
    }
    let tapered = (income_tax - SOLIDARITY_EXEMPTION) * SOLIDARITY_TAPER_RATE;
    tapered.min(income_tax * SOLIDARITY_RATE)
}

/// Calculates all taxes on an annual pension.
///
/// # Arguments
///
/// * `gross_annual` - Annual gross pension
/// * `contributions_annual` - Annual health and care contributions
/// * `retirement_year` - Year retirement starts, selects the allowance row
/// * `church_tax_liable` - Whether church tax is levied
/// * `state` - The employing state, selects the church tax rate
///
/// # Examples
///
/// ```
/// use beamtenpension_engine::calculation::calculate_taxes;
/// use beamtenpension_engine::models::FederalState;
/// use rust_decimal_macros::dec;
///
/// let taxes = calculate_taxes(dec!(48000), dec!(1800), 2030, true, FederalState::BadenWuerttemberg);
/// assert!(taxes.total_annual > dec!(0));
/// assert!(taxes.pension_allowance.total > dec!(0));
/// ```
pub fn calculate_taxes(
    gross_annual: Decimal,
    contributions_annual: Decimal,
    retirement_year: i32,
    church_tax_liable: bool,
    state: FederalState,
) -> TaxBreakdown {
    let pension_allowance = calculate_pension_allowance(gross_annual, retirement_year);

    let taxable_pension_income =
        (gross_annual - pension_allowance.total - INCOME_RELATED_EXPENSES).max(Decimal::ZERO);

    let special_expenses =
        SPECIAL_EXPENSES_ALLOWANCE + contributions_annual.min(MAX_DEDUCTIBLE_CONTRIBUTIONS);

    let taxable_income = (taxable_pension_income - special_expenses).max(Decimal::ZERO);

    let income_tax = income_tax(taxable_income);

    let church_tax = if church_tax_liable {
        income_tax * church_tax_rate(state)
    } else {
        Decimal::ZERO
    };

    let solidarity_surcharge = solidarity_surcharge(income_tax);

    let total_annual = income_tax + church_tax + solidarity_surcharge;

    TaxBreakdown {
        pension_allowance,
        income_related_expenses: INCOME_RELATED_EXPENSES,
        taxable_pension_income,
        special_expenses,
        taxable_income,
        income_tax,
        church_tax,
        solidarity_surcharge,
        total_annual,
        total_monthly: total_annual / MONTHS_PER_YEAR,
    }
}

impl TaxBreakdown {
    /// Builds the audit step documenting this result.
    pub fn audit_step(
        &self,
        gross_annual: Decimal,
        contributions_annual: Decimal,
        retirement_year: i32,
        church_tax_liable: bool,
        step_number: u32,
    ) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "income_tax".to_string(),
            rule_name: "Income Tax, Church Tax and Solidarity Surcharge".to_string(),
            legal_ref: "§§ 19, 32a EStG; § 4 SolZG".to_string(),
            input: serde_json::json!({
                "gross_annual": gross_annual.round_dp(2).normalize().to_string(),
                "contributions_annual": contributions_annual.round_dp(2).normalize().to_string(),
                "retirement_year": retirement_year,
                "church_tax_liable": church_tax_liable,
            }),
            output: serde_json::json!({
                "pension_allowance": self.pension_allowance.total.round_dp(2).normalize().to_string(),
                "taxable_income": self.taxable_income.round_dp(2).normalize().to_string(),
                "income_tax": self.income_tax.round_dp(2).normalize().to_string(),
                "church_tax": self.church_tax.round_dp(2).normalize().to_string(),
                "solidarity_surcharge": self.solidarity_surcharge.round_dp(2).normalize().to_string(),
                "total_annual": self.total_annual.round_dp(2).normalize().to_string(),
                "total_monthly": self.total_monthly.round_dp(2).normalize().to_string(),
            }),
            reasoning: format!(
                "Taxable income {} after allowance {}: income tax {} + church tax {} + solidarity surcharge {} = {} per year",
                self.taxable_income.round_dp(2).normalize(),
                self.pension_allowance.total.round_dp(2).normalize(),
                self.income_tax.round_dp(2).normalize(),
                self.church_tax.round_dp(2).normalize(),
                self.solidarity_surcharge.round_dp(2).normalize(),
                self.total_annual.round_dp(2).normalize()
            ),
        }
    }
}
