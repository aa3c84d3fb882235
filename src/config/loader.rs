//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading salary
//! reference data from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::FederalState;
use crate::salary_table::{SalaryTable, StaticSalaryTable};

use super::types::{SalaryMetadata, StateSalaryFile};

/// Loads and provides access to salary reference data.
///
/// # Directory Structure
///
/// ```text
/// config/besoldung/
/// ├── metadata.yaml           # Data set name, validity date and source
/// └── tables/
///     ├── bund.yaml           # One file per state
///     └── bayern.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use beamtenpension_engine::config::ConfigLoader;
/// use beamtenpension_engine::models::FederalState;
/// use beamtenpension_engine::salary_table::SalaryTable;
///
/// let loader = ConfigLoader::load("./config/besoldung").unwrap();
/// let salary = loader.base_salary(FederalState::Bund, "A9", 4).unwrap();
/// println!("{}: {} EUR", loader.metadata().name, salary);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    metadata: SalaryMetadata,
    table: StaticSalaryTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `metadata.yaml` or the `tables` directory is missing
    /// - the `tables` directory holds no YAML files
    /// - any file contains invalid YAML
    /// - a table names an unknown state, or a state appears twice
    /// - any amount is zero or negative
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SalaryMetadata>(&path.join("metadata.yaml"))?;
        let table = Self::load_tables(&path.join("tables"))?;

        debug!(
            name = %metadata.name,
            data_as_of = %metadata.data_as_of,
            states = table.states().count(),
            "Loaded salary reference data"
        );

        Ok(Self { metadata, table })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every state file in the tables directory.
    fn load_tables(tables_dir: &Path) -> EngineResult<StaticSalaryTable> {
        let tables_dir_str = tables_dir.display().to_string();

        let entries = fs::read_dir(tables_dir).map_err(|_| EngineError::ConfigNotFound {
            path: tables_dir_str.clone(),
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: tables_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no salary tables found)", tables_dir_str),
            });
        }

        // Directory order is platform dependent.
        files.sort();

        let mut table = StaticSalaryTable::new();
        for path in files {
            let file = Self::load_yaml::<StateSalaryFile>(&path)?;
            let path_str = path.display().to_string();

            let state = FederalState::from_str(&file.state).map_err(|message| {
                EngineError::ConfigParseError {
                    path: path_str.clone(),
                    message,
                }
            })?;

            if table.grades(state).is_some() {
                return Err(EngineError::ConfigParseError {
                    path: path_str,
                    message: format!("duplicate salary table for state '{}'", state),
                });
            }

            for (grade, steps) in &file.grades {
                for (step, amount) in steps {
                    if *amount <= Decimal::ZERO {
                        return Err(EngineError::ConfigParseError {
                            path: path_str,
                            message: format!(
                                "non-positive salary {} for grade {} step {}",
                                amount, grade, step
                            ),
                        });
                    }
                }
            }

            table.insert_state(state, file.grades);
        }

        Ok(table)
    }

    /// Returns the data set metadata.
    pub fn metadata(&self) -> &SalaryMetadata {
        &self.metadata
    }

    /// Returns the loaded salaries as an in-memory table.
    pub fn table(&self) -> &StaticSalaryTable {
        &self.table
    }
}

impl SalaryTable for ConfigLoader {
    fn base_salary(
        &self,
        state: FederalState,
        pay_grade: &str,
        experience_step: u8,
    ) -> EngineResult<Decimal> {
        self.table.base_salary(state, pay_grade, experience_step)
    }
}
