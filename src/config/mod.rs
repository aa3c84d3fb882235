//! Configuration loading for salary reference data.
//!
//! This module loads base salary tables (Besoldungstabellen) from YAML files
//! and exposes them through the [`crate::salary_table::SalaryTable`] trait.
//!
//! # Example
//!
//! ```no_run
//! use beamtenpension_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/besoldung").unwrap();
//! println!("Loaded salary data: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{SalaryMetadata, StateSalaryFile};
