//! Beamtenpension Engine for German civil servants
//!
//! This crate provides a deterministic calculation of the expected pension
//! (Ruhegehalt) of a German civil servant: service time, replacement rate,
//! pensionable salary, gross pension, health and care insurance
//! contributions, income tax and the resulting net pension, together with an
//! audit trace of every stage.
//!
//! # Example
//!
//! ```no_run
//! use beamtenpension_engine::config::ConfigLoader;
//! use beamtenpension_engine::engine::compute_pension;
//! use beamtenpension_engine::models::CareerProfile;
//!
//! let table = ConfigLoader::load("./config/besoldung").unwrap();
//! let profile: CareerProfile = serde_json::from_str(r#"{
//!     "birth_date": "1980-05-15",
//!     "service_entry_date": "2005-09-01",
//!     "state": "Bayern",
//!     "pay_grade": "A13",
//!     "experience_step": 6,
//!     "retirement_age": 67
//! }"#).unwrap();
//!
//! let result = compute_pension(&profile, &table).unwrap();
//! println!("Net pension: {} EUR/month", result.summary.net_monthly.round_dp(2));
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod salary_table;
