//! Salary table lookup.
//!
//! Base salaries are reference data owned by the surrounding application.
//! The engine only relies on the [`SalaryTable`] contract: a positive monthly
//! amount for every known (state, pay grade, experience step) combination and
//! a [`EngineError::SalaryNotFound`] for everything else.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::FederalState;

/// Source of monthly base salaries.
pub trait SalaryTable {
    /// Returns the monthly base salary for the given combination.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SalaryNotFound`] for unknown combinations.
    fn base_salary(
        &self,
        state: FederalState,
        pay_grade: &str,
        experience_step: u8,
    ) -> EngineResult<Decimal>;
}

impl<T: SalaryTable + ?Sized> SalaryTable for &T {
    fn base_salary(
        &self,
        state: FederalState,
        pay_grade: &str,
        experience_step: u8,
    ) -> EngineResult<Decimal> {
        (**self).base_salary(state, pay_grade, experience_step)
    }
}

/// Grade code to step to monthly amount.
pub type GradeTable = BTreeMap<String, BTreeMap<u8, Decimal>>;

/// An in-memory salary table.
///
/// # Example
///
/// ```
/// use beamtenpension_engine::models::FederalState;
/// use beamtenpension_engine::salary_table::{SalaryTable, StaticSalaryTable};
/// use rust_decimal_macros::dec;
///
/// let table = StaticSalaryTable::new()
///     .with_salary(FederalState::Bund, "A9", 1, dec!(3400.00));
///
/// assert_eq!(table.base_salary(FederalState::Bund, "A9", 1).unwrap(), dec!(3400.00));
/// assert!(table.base_salary(FederalState::Bayern, "A9", 1).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticSalaryTable {
    states: BTreeMap<FederalState, GradeTable>,
}

impl StaticSalaryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) one salary entry.
    pub fn with_salary(
        mut self,
        state: FederalState,
        pay_grade: &str,
        experience_step: u8,
        amount: Decimal,
    ) -> Self {
        self.insert(state, pay_grade, experience_step, amount);
        self
    }

    /// Adds (or replaces) one salary entry in place.
    pub fn insert(
        &mut self,
        state: FederalState,
        pay_grade: &str,
        experience_step: u8,
        amount: Decimal,
    ) {
        self.states
            .entry(state)
            .or_default()
            .entry(pay_grade.to_string())
            .or_default()
            .insert(experience_step, amount);
    }

    /// Replaces all grades of one state.
    pub fn insert_state(&mut self, state: FederalState, grades: GradeTable) {
        self.states.insert(state, grades);
    }

    /// Returns the states that have at least one grade.
    pub fn states(&self) -> impl Iterator<Item = FederalState> + '_ {
        self.states.keys().copied()
    }

    /// Returns the grade table of one state, if present.
    pub fn grades(&self, state: FederalState) -> Option<&GradeTable> {
        self.states.get(&state)
    }
}

impl SalaryTable for StaticSalaryTable {
    fn base_salary(
        &self,
        state: FederalState,
        pay_grade: &str,
        experience_step: u8,
    ) -> EngineResult<Decimal> {
        self.states
            .get(&state)
            .and_then(|grades| grades.get(pay_grade))
            .and_then(|steps| steps.get(&experience_step))
            .copied()
            .ok_or_else(|| EngineError::SalaryNotFound {
                state: state.name().to_string(),
                pay_grade: pay_grade.to_string(),
                experience_step,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_table() -> StaticSalaryTable {
        StaticSalaryTable::new()
            .with_salary(FederalState::Bund, "A7", 1, dec("2900.00"))
            .with_salary(FederalState::Bund, "A7", 2, dec("2990.00"))
            .with_salary(FederalState::Bayern, "A13", 5, dec("5400.00"))
    }

    #[test]
    fn test_lookup_known_combination() {
        let table = sample_table();
        assert_eq!(
            table.base_salary(FederalState::Bund, "A7", 2).unwrap(),
            dec("2990.00")
        );
    }

    #[test]
    fn test_unknown_grade_is_lookup_error() {
        let table = sample_table();
        let err = table.base_salary(FederalState::Bund, "A99", 1).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Lookup);
        match err {
            EngineError::SalaryNotFound {
                state,
                pay_grade,
                experience_step,
            } => {
                assert_eq!(state, "Bund");
                assert_eq!(pay_grade, "A99");
                assert_eq!(experience_step, 1);
            }
            other => panic!("Expected SalaryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_step_and_state_are_lookup_errors() {
        let table = sample_table();
        assert!(table.base_salary(FederalState::Bund, "A7", 3).is_err());
        assert!(table.base_salary(FederalState::Berlin, "A7", 1).is_err());
    }

    #[test]
    fn test_insert_replaces_existing_amount() {
        let mut table = sample_table();
        table.insert(FederalState::Bund, "A7", 1, dec("3000.00"));
        assert_eq!(
            table.base_salary(FederalState::Bund, "A7", 1).unwrap(),
            dec("3000.00")
        );
    }

    #[test]
    fn test_reference_implements_trait() {
        fn lookup<T: SalaryTable>(table: T) -> Decimal {
            table.base_salary(FederalState::Bayern, "A13", 5).unwrap()
        }
        let table = sample_table();
        assert_eq!(lookup(&table), dec("5400.00"));
    }

    #[test]
    fn test_states_lists_populated_states() {
        let table = sample_table();
        let states: Vec<FederalState> = table.states().collect();
        assert_eq!(states, vec![FederalState::Bayern, FederalState::Bund]);
    }
}
