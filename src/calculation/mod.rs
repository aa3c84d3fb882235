//! Calculation stages of the Beamtenpension engine.
//!
//! This module contains one pure function per stage: service time,
//! replacement rate with early-retirement discount, pensionable salary
//! projection, gross pension, health and care insurance contributions,
//! pension allowance, income tax with church tax and solidarity surcharge,
//! and net pension. Each stage result can describe itself as an audit step.

mod gross_pension;
mod income_tax;
mod insurance_contributions;
mod net_pension;
mod pension_allowance;
mod pensionable_salary;
mod replacement_rate;
mod service_time;
mod tax;

pub use gross_pension::{GrossPension, MONTHS_PER_YEAR, compose_gross_pension};
pub use income_tax::{IncomeTaxTariff, TARIFF_2025, income_tax};
pub use insurance_contributions::{
    CARE_CHILDLESS_SURCHARGE, CARE_INSURANCE_RATE, DEFAULT_SUBSIDY_RATE, HEALTH_INSURANCE_RATE,
    InsuranceContributions, SUBSIDY_RATE_OVERRIDES, calculate_insurance_contributions,
    subsidy_rate,
};
pub use net_pension::{NetPension, compose_net_pension};
pub use pension_allowance::{
    ALLOWANCE_TABLE, AllowanceRates, PensionAllowance, allowance_rates,
    calculate_pension_allowance,
};
pub use pensionable_salary::{PensionableSalary, compound, project_pensionable_salary};
pub use replacement_rate::{
    ACCRUAL_PER_YEAR, DEFAULT_STANDARD_RETIREMENT_AGE, EARLY_RETIREMENT_DISCOUNT_PER_YEAR,
    MAX_REPLACEMENT_RATE, ReplacementRate, calculate_replacement_rate,
};
pub use service_time::{DAYS_PER_YEAR, ServiceTime, calculate_service_time};
pub use tax::{
    CHURCH_TAX_RATE, CHURCH_TAX_RATE_REDUCED, INCOME_RELATED_EXPENSES,
    MAX_DEDUCTIBLE_CONTRIBUTIONS, SOLIDARITY_EXEMPTION, SOLIDARITY_RATE, SOLIDARITY_TAPER_RATE,
    SPECIAL_EXPENSES_ALLOWANCE, TaxBreakdown, calculate_taxes, church_tax_rate,
    solidarity_surcharge,
};
