//! Career profile input and its validating constructor.
//!
//! [`CareerProfileInput`] mirrors what a caller submits (dates as strings,
//! loosely typed numbers, defaults for optional fields). [`CareerProfile`]
//! can only be obtained by validating such an input, so every calculation
//! stage may assume fully valid data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{FederalState, PayScale};

/// Lowest and highest experience step of a pay grade.
pub const EXPERIENCE_STEP_RANGE: (i64, i64) = (1, 12);
/// Accepted retirement ages.
pub const RETIREMENT_AGE_RANGE: (i64, i64) = (55, 70);
/// Accepted life expectancies.
pub const LIFE_EXPECTANCY_RANGE: (i64, i64) = (70, 100);
/// Accepted annual pension growth, in percent.
pub const GROWTH_RATE_RANGE: (Decimal, Decimal) = (dec!(0), dec!(5));

const DATE_FORMAT: &str = "%Y-%m-%d";

fn default_true() -> bool {
    true
}

fn default_pay_scale() -> String {
    "A".to_string()
}

fn default_life_expectancy() -> i64 {
    88
}

fn default_growth_rate() -> Decimal {
    dec!(1.5)
}

/// Unvalidated career profile as submitted by a caller.
///
/// Optional fields fall back to the engine's defaults: church tax liable,
/// pay scale `A`, no additional entitlements, life expectancy 88, 1.5 %
/// annual growth, no promotion and childless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProfileInput {
    /// Date of birth (`YYYY-MM-DD`).
    pub birth_date: String,
    /// Date service started (`YYYY-MM-DD`).
    pub service_entry_date: String,
    /// Whether church tax is levied.
    #[serde(default = "default_true")]
    pub church_tax_liable: bool,
    /// German name of the employing state, e.g. `"Bayern"` or `"Bund"`.
    pub state: String,
    /// Pay scale family letter.
    #[serde(default = "default_pay_scale")]
    pub pay_scale: String,
    /// Pay grade code, e.g. `"A13"`.
    pub pay_grade: String,
    /// Experience step within the pay grade.
    pub experience_step: i64,
    /// Additional flat monthly pension entitlements.
    #[serde(default)]
    pub additional_entitlements: Decimal,
    /// Expected age at death.
    #[serde(default = "default_life_expectancy")]
    pub life_expectancy: i64,
    /// Age at which the civil servant intends to retire.
    pub retirement_age: i64,
    /// Assumed annual salary increase until retirement, in percent.
    #[serde(default = "default_growth_rate")]
    pub pension_growth_rate: Decimal,
    /// Whether the target grade and step below should be used.
    #[serde(default)]
    pub promotion_planned: bool,
    /// Pay grade expected at retirement.
    #[serde(default)]
    pub target_pay_grade: Option<String>,
    /// Experience step expected at retirement.
    #[serde(default)]
    pub target_experience_step: Option<i64>,
    /// Whether the childless surcharge on care insurance applies.
    #[serde(default = "default_true")]
    pub childless: bool,
}

/// A planned promotion whose salary replaces the current one at retirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionTarget {
    /// Pay grade expected at retirement.
    pub pay_grade: String,
    /// Experience step expected at retirement.
    pub experience_step: u8,
}

/// A fully validated career profile.
///
/// # Example
///
/// ```
/// use beamtenpension_engine::models::{CareerProfile, CareerProfileInput, FederalState};
///
/// let input: CareerProfileInput = serde_json::from_value(serde_json::json!({
///     "birth_date": "1970-01-01",
///     "service_entry_date": "2000-01-01",
///     "state": "Baden-Württemberg",
///     "pay_grade": "A7",
///     "experience_step": 1,
///     "retirement_age": 67
/// })).unwrap();
///
/// let profile = CareerProfile::try_from(input).unwrap();
/// assert_eq!(profile.state(), FederalState::BadenWuerttemberg);
/// assert_eq!(profile.life_expectancy(), 88);
/// assert!(profile.church_tax_liable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CareerProfileInput", into = "CareerProfileInput")]
pub struct CareerProfile {
    birth_date: NaiveDate,
    service_entry_date: NaiveDate,
    church_tax_liable: bool,
    state: FederalState,
    pay_scale: PayScale,
    pay_grade: String,
    experience_step: u8,
    additional_entitlements: Decimal,
    life_expectancy: u32,
    retirement_age: u32,
    pension_growth_rate: Decimal,
    promotion: Option<PromotionTarget>,
    childless: bool,
}

impl CareerProfile {
    /// Date of birth.
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Date service started.
    pub fn service_entry_date(&self) -> NaiveDate {
        self.service_entry_date
    }

    /// Whether church tax is levied.
    pub fn church_tax_liable(&self) -> bool {
        self.church_tax_liable
    }

    /// The employing state.
    pub fn state(&self) -> FederalState {
        self.state
    }

    /// The pay scale family.
    pub fn pay_scale(&self) -> PayScale {
        self.pay_scale
    }

    /// The current pay grade code.
    pub fn pay_grade(&self) -> &str {
        &self.pay_grade
    }

    /// The current experience step (1–12).
    pub fn experience_step(&self) -> u8 {
        self.experience_step
    }

    /// Additional flat monthly pension entitlements (≥ 0).
    pub fn additional_entitlements(&self) -> Decimal {
        self.additional_entitlements
    }

    /// Expected age at death (70–100).
    pub fn life_expectancy(&self) -> u32 {
        self.life_expectancy
    }

    /// Intended retirement age (55–70).
    pub fn retirement_age(&self) -> u32 {
        self.retirement_age
    }

    /// Assumed annual salary growth in percent (0–5).
    pub fn pension_growth_rate(&self) -> Decimal {
        self.pension_growth_rate
    }

    /// The planned promotion, present only when one was requested.
    pub fn promotion(&self) -> Option<&PromotionTarget> {
        self.promotion.as_ref()
    }

    /// Whether the childless care-insurance surcharge applies.
    pub fn childless(&self) -> bool {
        self.childless
    }
}

fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        EngineError::validation(field, format!("'{}' is not a valid date: {}", value, e))
    })
}

fn check_range(field: &str, value: i64, (min, max): (i64, i64)) -> EngineResult<i64> {
    if value < min || value > max {
        return Err(EngineError::validation(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(value)
}

fn check_step(field: &str, value: i64) -> EngineResult<u8> {
    let step = check_range(field, value, EXPERIENCE_STEP_RANGE)?;
    u8::try_from(step).map_err(|_| EngineError::validation(field, "out of range"))
}

fn check_age(field: &str, value: i64, range: (i64, i64)) -> EngineResult<u32> {
    let age = check_range(field, value, range)?;
    u32::try_from(age).map_err(|_| EngineError::validation(field, "out of range"))
}

fn check_grade(field: &str, value: &str) -> EngineResult<String> {
    let grade = value.trim();
    if grade.is_empty() {
        return Err(EngineError::validation(field, "must not be empty"));
    }
    Ok(grade.to_string())
}

impl TryFrom<CareerProfileInput> for CareerProfile {
    type Error = EngineError;

    fn try_from(input: CareerProfileInput) -> EngineResult<Self> {
        let birth_date = parse_date("birth_date", &input.birth_date)?;
        let service_entry_date = parse_date("service_entry_date", &input.service_entry_date)?;

        let state = input
            .state
            .parse::<FederalState>()
            .map_err(|msg| EngineError::validation("state", msg))?;
        let pay_scale = input
            .pay_scale
            .parse::<PayScale>()
            .map_err(|msg| EngineError::validation("pay_scale", msg))?;
        let pay_grade = check_grade("pay_grade", &input.pay_grade)?;
        let experience_step = check_step("experience_step", input.experience_step)?;

        if input.additional_entitlements < Decimal::ZERO {
            return Err(EngineError::validation(
                "additional_entitlements",
                format!("must not be negative, got {}", input.additional_entitlements),
            ));
        }

        let life_expectancy =
            check_age("life_expectancy", input.life_expectancy, LIFE_EXPECTANCY_RANGE)?;
        let retirement_age =
            check_age("retirement_age", input.retirement_age, RETIREMENT_AGE_RANGE)?;

        let (min_growth, max_growth) = GROWTH_RATE_RANGE;
        if input.pension_growth_rate < min_growth || input.pension_growth_rate > max_growth {
            return Err(EngineError::validation(
                "pension_growth_rate",
                format!(
                    "must be between {} and {} percent, got {}",
                    min_growth, max_growth, input.pension_growth_rate
                ),
            ));
        }

        let target_step = input
            .target_experience_step
            .map(|step| check_step("target_experience_step", step))
            .transpose()?;

        let promotion = if input.promotion_planned {
            let (Some(grade), Some(step)) = (input.target_pay_grade.as_deref(), target_step) else {
                return Err(EngineError::validation(
                    "promotion_planned",
                    "a planned promotion requires both target_pay_grade and target_experience_step",
                ));
            };
            Some(PromotionTarget {
                pay_grade: check_grade("target_pay_grade", grade)?,
                experience_step: step,
            })
        } else {
            None
        };

        Ok(CareerProfile {
            birth_date,
            service_entry_date,
            church_tax_liable: input.church_tax_liable,
            state,
            pay_scale,
            pay_grade,
            experience_step,
            additional_entitlements: input.additional_entitlements,
            life_expectancy,
            retirement_age,
            pension_growth_rate: input.pension_growth_rate,
            promotion,
            childless: input.childless,
        })
    }
}

impl From<CareerProfile> for CareerProfileInput {
    fn from(profile: CareerProfile) -> Self {
        let (target_pay_grade, target_experience_step) = match &profile.promotion {
            Some(target) => (
                Some(target.pay_grade.clone()),
                Some(i64::from(target.experience_step)),
            ),
            None => (None, None),
        };

        CareerProfileInput {
            birth_date: profile.birth_date.format(DATE_FORMAT).to_string(),
            service_entry_date: profile.service_entry_date.format(DATE_FORMAT).to_string(),
            church_tax_liable: profile.church_tax_liable,
            state: profile.state.name().to_string(),
            pay_scale: profile.pay_scale.to_string(),
            pay_grade: profile.pay_grade,
            experience_step: i64::from(profile.experience_step),
            additional_entitlements: profile.additional_entitlements,
            life_expectancy: i64::from(profile.life_expectancy),
            retirement_age: i64::from(profile.retirement_age),
            pension_growth_rate: profile.pension_growth_rate,
            promotion_planned: profile.promotion.is_some(),
            target_pay_grade,
            target_experience_step,
            childless: profile.childless,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn base_input() -> CareerProfileInput {
        CareerProfileInput {
            birth_date: "1970-01-01".to_string(),
            service_entry_date: "2000-01-01".to_string(),
            church_tax_liable: true,
            state: "Baden-Württemberg".to_string(),
            pay_scale: "A".to_string(),
            pay_grade: "A7".to_string(),
            experience_step: 1,
            additional_entitlements: Decimal::ZERO,
            life_expectancy: 88,
            retirement_age: 67,
            pension_growth_rate: dec!(1.5),
            promotion_planned: false,
            target_pay_grade: None,
            target_experience_step: None,
            childless: true,
        }
    }

    fn assert_invalid_field(input: CareerProfileInput, expected_field: &str) {
        match CareerProfile::try_from(input) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected validation error on {}, got {:?}", expected_field, other),
        }
    }

    #[test]
    fn test_valid_input_produces_profile() {
        let profile = CareerProfile::try_from(base_input()).unwrap();

        assert_eq!(
            profile.birth_date(),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
        assert_eq!(profile.state(), FederalState::BadenWuerttemberg);
        assert_eq!(profile.pay_scale(), PayScale::A);
        assert_eq!(profile.experience_step(), 1);
        assert_eq!(profile.retirement_age(), 67);
        assert!(profile.promotion().is_none());
    }

    #[test]
    fn test_defaults_applied_when_fields_missing() {
        let json = r#"{
            "birth_date": "1985-05-20",
            "service_entry_date": "2010-09-01",
            "state": "Bayern",
            "pay_grade": "A13",
            "experience_step": 4,
            "retirement_age": 65
        }"#;

        let profile: CareerProfile = serde_json::from_str(json).unwrap();
        assert!(profile.church_tax_liable());
        assert!(profile.childless());
        assert_eq!(profile.pay_scale(), PayScale::A);
        assert_eq!(profile.life_expectancy(), 88);
        assert_eq!(profile.pension_growth_rate(), dec!(1.5));
        assert_eq!(profile.additional_entitlements(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialization_runs_validation() {
        let json = r#"{
            "birth_date": "1985-05-20",
            "service_entry_date": "2010-09-01",
            "state": "Bayern",
            "pay_grade": "A13",
            "experience_step": 13,
            "retirement_age": 65
        }"#;

        let result: Result<CareerProfile, _> = serde_json::from_str(json);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("experience_step"));
    }

    #[test]
    fn test_unparseable_date_rejected() {
        let mut input = base_input();
        input.birth_date = "1970-13-45".to_string();
        assert_invalid_field(input, "birth_date");

        let mut input = base_input();
        input.service_entry_date = "yesterday".to_string();
        assert_invalid_field(input, "service_entry_date");
    }

    #[test]
    fn test_unknown_state_rejected() {
        let mut input = base_input();
        input.state = "Hamburg".to_string();
        assert_invalid_field(input, "state");
    }

    #[test]
    fn test_unknown_pay_scale_rejected() {
        let mut input = base_input();
        input.pay_scale = "C".to_string();
        assert_invalid_field(input, "pay_scale");
    }

    #[test]
    fn test_empty_pay_grade_rejected() {
        let mut input = base_input();
        input.pay_grade = "  ".to_string();
        assert_invalid_field(input, "pay_grade");
    }

    #[test]
    fn test_experience_step_bounds() {
        for step in [0, 13, -1] {
            let mut input = base_input();
            input.experience_step = step;
            assert_invalid_field(input, "experience_step");
        }
        for step in [1, 12] {
            let mut input = base_input();
            input.experience_step = step;
            assert!(CareerProfile::try_from(input).is_ok());
        }
    }

    #[test]
    fn test_retirement_age_bounds() {
        for age in [54, 71] {
            let mut input = base_input();
            input.retirement_age = age;
            assert_invalid_field(input, "retirement_age");
        }
        for age in [55, 70] {
            let mut input = base_input();
            input.retirement_age = age;
            assert!(CareerProfile::try_from(input).is_ok());
        }
    }

    #[test]
    fn test_life_expectancy_bounds() {
        for years in [69, 101] {
            let mut input = base_input();
            input.life_expectancy = years;
            assert_invalid_field(input, "life_expectancy");
        }
    }

    #[test]
    fn test_growth_rate_bounds() {
        let mut input = base_input();
        input.pension_growth_rate = dec!(-0.1);
        assert_invalid_field(input, "pension_growth_rate");

        let mut input = base_input();
        input.pension_growth_rate = dec!(5.01);
        assert_invalid_field(input, "pension_growth_rate");

        let mut input = base_input();
        input.pension_growth_rate = dec!(5);
        assert!(CareerProfile::try_from(input).is_ok());
    }

    #[test]
    fn test_negative_additional_entitlements_rejected() {
        let mut input = base_input();
        input.additional_entitlements = dec!(-1);
        assert_invalid_field(input, "additional_entitlements");
    }

    #[test]
    fn test_promotion_requires_both_target_fields() {
        let mut input = base_input();
        input.promotion_planned = true;
        input.target_pay_grade = Some("A9".to_string());
        assert_invalid_field(input, "promotion_planned");

        let mut input = base_input();
        input.promotion_planned = true;
        input.target_experience_step = Some(3);
        assert_invalid_field(input, "promotion_planned");
    }

    #[test]
    fn test_promotion_target_kept_when_planned() {
        let mut input = base_input();
        input.promotion_planned = true;
        input.target_pay_grade = Some("A9".to_string());
        input.target_experience_step = Some(3);

        let profile = CareerProfile::try_from(input).unwrap();
        let target = profile.promotion().unwrap();
        assert_eq!(target.pay_grade, "A9");
        assert_eq!(target.experience_step, 3);
    }

    #[test]
    fn test_promotion_target_ignored_when_not_planned() {
        let mut input = base_input();
        input.target_pay_grade = Some("A9".to_string());
        input.target_experience_step = Some(3);

        let profile = CareerProfile::try_from(input).unwrap();
        assert!(profile.promotion().is_none());
    }

    #[test]
    fn test_target_step_validated_even_without_promotion() {
        let mut input = base_input();
        input.target_experience_step = Some(15);
        assert_invalid_field(input, "target_experience_step");
    }

    #[test]
    fn test_validation_errors_have_validation_kind() {
        let mut input = base_input();
        input.retirement_age = 80;
        let err = CareerProfile::try_from(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_profile_serializes_in_input_shape() {
        let mut input = base_input();
        input.promotion_planned = true;
        input.target_pay_grade = Some("A9".to_string());
        input.target_experience_step = Some(3);
        let profile = CareerProfile::try_from(input.clone()).unwrap();

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["state"], "Baden-Württemberg");
        assert_eq!(json["birth_date"], "1970-01-01");
        assert_eq!(json["promotion_planned"], true);
        assert_eq!(json["target_pay_grade"], "A9");

        let back: CareerProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
