//! Integration tests for the Beamtenpension Engine.
//!
//! This test suite runs complete calculations against the shipped salary
//! tables and covers:
//! - Full-career pensions at the standard retirement age
//! - Early retirement discounts
//! - Promotions and salary growth
//! - Tax and contribution variants (church tax, childless surcharge)
//! - Input validation and error classification
//! - Serialization and determinism
//! - Batch evaluation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

use beamtenpension_engine::config::ConfigLoader;
use beamtenpension_engine::engine::{compute_pension_as_of, compute_pensions_as_of};
use beamtenpension_engine::error::{EngineError, ErrorKind};
use beamtenpension_engine::models::{CareerProfile, PensionResult};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/besoldung").expect("Failed to load config")
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn valuation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// A federal civil servant born 1970 with 40 years of service at 67.
fn federal_profile_json() -> Value {
    json!({
        "birth_date": "1970-01-01",
        "service_entry_date": "1997-01-01",
        "church_tax_liable": true,
        "state": "Bund",
        "pay_scale": "A",
        "pay_grade": "A9",
        "experience_step": 4,
        "additional_entitlements": "0",
        "life_expectancy": 88,
        "retirement_age": 67,
        "pension_growth_rate": "0",
        "promotion_planned": false,
        "childless": true
    })
}

fn profile_from(value: Value) -> CareerProfile {
    serde_json::from_value(value).expect("Failed to build profile")
}

fn with(mut value: Value, key: &str, field: Value) -> Value {
    value[key] = field;
    value
}

fn calculate(value: Value) -> PensionResult {
    compute_pension_as_of(&profile_from(value), &load_config(), valuation_date())
        .expect("Calculation failed")
}

fn assert_rounded(actual: Decimal, expected: &str) {
    assert_eq!(
        actual.round_dp(2),
        decimal(expected),
        "expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// SECTION 1: Full Career Scenarios
// =============================================================================

#[test]
fn test_federal_a9_full_career() {
    let result = calculate(federal_profile_json());

    assert_eq!(result.basis.current_age, 55);
    assert_eq!(result.basis.years_until_retirement, 12);
    assert_eq!(result.basis.retirement_year, 2037);
    assert_eq!(
        result.basis.retirement_date,
        NaiveDate::from_ymd_opt(2037, 1, 1).unwrap()
    );

    // 14610 days between 1997-01-01 and 2037-01-01
    assert_eq!(result.service_time.years, decimal("40"));
    assert_eq!(result.replacement_rate.rate, decimal("71.75"));
    assert_eq!(result.pensionable_salary.pensionable_salary, decimal("3577.90"));

    assert_rounded(result.summary.gross_monthly, "2567.14");
    assert_rounded(result.summary.contributions_monthly, "113.21");
    assert_rounded(result.summary.tax_monthly, "379.14");
    assert_rounded(result.summary.net_monthly, "2074.79");
    assert_rounded(result.summary.net_annual, "24897.50");
}

#[test]
fn test_federal_a9_tax_breakdown() {
    let result = calculate(federal_profile_json());

    // 2037 allowance row: 2.7%, capped at 202.50, plus 61
    assert_eq!(result.taxes.pension_allowance.allowance, decimal("202.5"));
    assert_eq!(result.taxes.pension_allowance.supplement, decimal("61"));
    assert_eq!(result.taxes.income_related_expenses, decimal("102"));
    assert_rounded(result.taxes.taxable_income, "29045.69");
    // The tariff is applied to 29045 whole euros
    assert_rounded(result.taxes.income_tax, "4174.02");
    // Bund levies 9% church tax
    assert_rounded(result.taxes.church_tax, "375.66");
    assert_eq!(result.taxes.solidarity_surcharge, Decimal::ZERO);
}

#[test]
fn test_baden_wuerttemberg_a13_without_church_tax() {
    let profile = with(federal_profile_json(), "state", json!("Baden-Württemberg"));
    let profile = with(profile, "pay_grade", json!("A13"));
    let profile = with(profile, "experience_step", json!(5));
    let profile = with(profile, "church_tax_liable", json!(false));
    let profile = with(profile, "childless", json!(false));

    let result = calculate(profile);

    assert_eq!(result.pensionable_salary.pensionable_salary, decimal("5590.06"));
    assert_eq!(result.contributions.subsidy_rate, decimal("0.7"));
    assert_eq!(result.taxes.church_tax, Decimal::ZERO);
    assert_rounded(result.summary.gross_monthly, "4010.87");
    assert_rounded(result.summary.contributions_monthly, "169.66");
    assert_rounded(result.summary.tax_monthly, "786.63");
    assert_rounded(result.summary.net_monthly, "3054.58");
}

#[test]
fn test_additional_entitlements_raise_gross() {
    let base = calculate(federal_profile_json());
    let extra = calculate(with(
        federal_profile_json(),
        "additional_entitlements",
        json!("150"),
    ));

    assert_eq!(
        extra.summary.gross_monthly - base.summary.gross_monthly,
        decimal("150")
    );
    assert!(extra.summary.net_monthly > base.summary.net_monthly);
}

// =============================================================================
// SECTION 2: Early Retirement and Short Careers
// =============================================================================

#[test]
fn test_early_retirement_at_63() {
    let result = calculate(with(federal_profile_json(), "retirement_age", json!(63)));

    assert_eq!(result.basis.retirement_year, 2033);
    // 36 years x 1.79375 = 64.575, minus 4 years x 3.6
    assert_eq!(result.service_time.years, decimal("36"));
    assert_eq!(result.replacement_rate.discount, decimal("14.4"));
    assert_eq!(result.replacement_rate.rate, decimal("50.175"));
}

#[test]
fn test_short_career_below_cap() {
    let result = calculate(with(
        federal_profile_json(),
        "service_entry_date",
        json!("2020-01-01"),
    ));

    assert!(result.service_time.years < decimal("17.1"));
    assert!(result.replacement_rate.rate < decimal("30.7"));
    assert_eq!(result.replacement_rate.discount, Decimal::ZERO);
}

// =============================================================================
// SECTION 3: Promotion and Salary Growth
// =============================================================================

#[test]
fn test_promotion_uses_target_grade() {
    let profile = with(federal_profile_json(), "promotion_planned", json!(true));
    let profile = with(profile, "target_pay_grade", json!("A11"));
    let profile = with(profile, "target_experience_step", json!(6));

    let result = calculate(profile);

    assert_eq!(result.pensionable_salary.current_base_salary, decimal("3577.90"));
    assert!(result.pensionable_salary.pensionable_salary > decimal("4000"));
}

#[test]
fn test_growth_compounds_over_remaining_years() {
    let result = calculate(with(
        federal_profile_json(),
        "pension_growth_rate",
        json!("2"),
    ));

    // 12 years at 2%
    let expected = (0..12).fold(decimal("3577.90"), |acc, _| acc * decimal("1.02"));
    assert_eq!(result.pensionable_salary.pensionable_salary, expected);
    assert_rounded(expected, "4537.64");
}

// =============================================================================
// SECTION 4: Errors
// =============================================================================

#[test]
fn test_entry_after_retirement_is_temporal_inconsistency() {
    // Born 1952, retirement at 67 on 2019-01-01, entry 2020
    let profile = with(federal_profile_json(), "birth_date", json!("1952-01-01"));
    let profile = with(profile, "service_entry_date", json!("2020-01-01"));

    let err = compute_pension_as_of(
        &profile_from(profile),
        &load_config(),
        NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TemporalInconsistency);
    assert!(matches!(err, EngineError::NonPositiveServiceTime { .. }));
}

#[test]
fn test_retirement_in_past() {
    let profile = with(federal_profile_json(), "birth_date", json!("1950-01-01"));

    let err = compute_pension_as_of(&profile_from(profile), &load_config(), valuation_date())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TemporalInconsistency);
    assert!(err.to_string().contains("67"));
}

#[test]
fn test_state_without_table_is_lookup_error() {
    let profile = with(federal_profile_json(), "state", json!("Bremen"));

    let err = compute_pension_as_of(&profile_from(profile), &load_config(), valuation_date())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Lookup);
}

#[test]
fn test_invalid_profiles_are_rejected_on_deserialization() {
    let cases = [
        ("retirement_age", json!(54)),
        ("retirement_age", json!(71)),
        ("experience_step", json!(0)),
        ("experience_step", json!(13)),
        ("life_expectancy", json!(101)),
        ("pension_growth_rate", json!("5.5")),
        ("additional_entitlements", json!("-1")),
        ("state", json!("Hamburg")),
        ("pay_scale", json!("C")),
        ("birth_date", json!("1970-13-01")),
        ("pay_grade", json!("")),
    ];

    for (field, value) in cases {
        let result: Result<CareerProfile, _> =
            serde_json::from_value(with(federal_profile_json(), field, value.clone()));
        assert!(result.is_err(), "{} = {} should be rejected", field, value);
    }
}

#[test]
fn test_promotion_without_target_is_rejected() {
    let profile = with(federal_profile_json(), "promotion_planned", json!(true));
    let result: Result<CareerProfile, _> = serde_json::from_value(profile);
    assert!(result.is_err());
}

// =============================================================================
// SECTION 5: Result Invariants and Serialization
// =============================================================================

#[test]
fn test_net_identity_and_annualisation() {
    let result = calculate(federal_profile_json());
    let s = &result.summary;

    assert_eq!(s.net_monthly, s.gross_monthly - s.contributions_monthly - s.tax_monthly);
    assert_eq!(s.gross_annual, s.gross_monthly * decimal("12"));
    assert_eq!(s.net_annual, s.net_monthly * decimal("12"));
    let gap = (s.deductions_annual - (s.gross_annual - s.net_annual)).abs();
    assert!(gap < decimal("0.000001"), "deductions differ by {}", gap);
}

#[test]
fn test_results_are_deterministic() {
    let config = load_config();
    let profile = profile_from(federal_profile_json());

    let first = compute_pension_as_of(&profile, &config, valuation_date()).unwrap();
    let second = compute_pension_as_of(&profile, &config, valuation_date()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_result_serializes_with_audit_trace() {
    let result = calculate(federal_profile_json());
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["input"]["state"], "Bund");
    assert_eq!(value["basis"]["retirement_date"], "2037-01-01");
    assert!(value["summary"]["net_monthly"].is_string());

    let trace = value["audit_trace"].as_array().unwrap();
    assert_eq!(trace.len(), 7);
    assert_eq!(trace[0]["rule_id"], "service_time");
    assert_eq!(trace[6]["rule_id"], "net_pension");
}

#[test]
fn test_result_round_trips_through_json() {
    let result = calculate(federal_profile_json());
    let json = serde_json::to_string(&result).unwrap();
    let back: PensionResult = serde_json::from_str(&json).unwrap();

    assert_eq!(back, result);
}

// =============================================================================
// SECTION 6: Batch Evaluation
// =============================================================================

#[test]
fn test_batch_matches_single_calculations() {
    let config = load_config();
    let profiles: Vec<CareerProfile> = [
        federal_profile_json(),
        with(federal_profile_json(), "state", json!("Bayern")),
        with(federal_profile_json(), "state", json!("Berlin")),
        with(federal_profile_json(), "state", json!("Nordrhein-Westfalen")),
    ]
    .into_iter()
    .map(profile_from)
    .collect();

    let results = compute_pensions_as_of(&profiles, &config, valuation_date());

    assert_eq!(results.len(), 4);
    assert!(results[2].is_err());
    for (profile, result) in profiles.iter().zip(&results) {
        match result {
            Ok(result) => {
                let single = compute_pension_as_of(profile, &config, valuation_date()).unwrap();
                assert_eq!(result, &single);
            }
            Err(err) => assert_eq!(err.kind(), ErrorKind::Lookup),
        }
    }
}
