//! Configuration types for salary reference data.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the YAML files of a salary data directory.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Metadata describing a salary data set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SalaryMetadata {
    /// Human-readable name of the data set.
    pub name: String,
    /// The date the figures are valid from.
    pub data_as_of: NaiveDate,
    /// Where the figures come from.
    pub source: String,
}

/// One salary table file: the base salaries of a single state.
///
/// ```yaml
/// state: Bund
/// grades:
///   A9:
///     1: "3401.92"
///     2: "3545.14"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct StateSalaryFile {
    /// The state name as used in profiles (e.g. "Baden-Württemberg").
    pub state: String,
    /// Pay grade to experience step to monthly base salary.
    pub grades: BTreeMap<String, BTreeMap<u8, Decimal>>,
}
