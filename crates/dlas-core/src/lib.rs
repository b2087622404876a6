//! DLAS Core Library
//!
//! Deterministic device-lifecycle advisory pipelines: `assess` turns a
//! telemetry payload into a repair / refurbished / trade-in recommendation,
//! and `incentive` prices a trade-in incentive package set. Both are pure
//! functions of the input payload — "random" flavor values come from a
//! payload-derived seed, so identical inputs always reproduce identical
//! outputs.

pub mod assess;
pub mod contract;
pub mod digest;
pub mod domain;
pub mod incentive;
pub mod rng;
pub mod scenario;
pub mod score;
pub mod telemetry;

pub use assess::{
    run_assess, AssessResponse, DecisionSummary, EstimatedImpact, OptionScores, RecommendationCard,
    RulEstimate,
};
pub use contract::{verify_assess_response, verify_incentive_response, ContractViolation};
pub use digest::{canonical_json, stable_seed, SEED_OFFSET};
pub use domain::error::{DlasError, Result, ValidationError};
pub use domain::payload::{Device, InputPayload, OptionId, Priority, Signals, UserPreferences};
pub use domain::validation::{validate_payload, ValidationScope};
pub use domain::Disclaimer;
pub use incentive::{run_incentive, IncentivePackage, IncentiveResponse, Perk};
pub use rng::DrawStream;
pub use telemetry::init_tracing;

/// Model version stamped into every assess and incentive response.
pub const MODEL_VERSION: &str = "mvp-contract-v1.0.0";

/// DLAS crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
