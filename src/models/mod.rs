//! Core data models for the Beamtenpension engine.
//!
//! This module contains the validated input profile, the closed enumerations
//! it refers to, and the result record assembled by the orchestrator.

mod career_profile;
mod pension_result;
mod state;

pub use career_profile::{
    CareerProfile, CareerProfileInput, EXPERIENCE_STEP_RANGE, GROWTH_RATE_RANGE,
    LIFE_EXPECTANCY_RANGE, PromotionTarget, RETIREMENT_AGE_RANGE,
};
pub use pension_result::{AuditStep, CalculationBasis, PensionResult, PensionSummary};
pub use state::{FederalState, PayScale};
