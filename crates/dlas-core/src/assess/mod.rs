//! The assess pipeline: payload in, recommendation response out.

pub mod cards;
pub mod impacts;
pub mod rul;
pub mod scoring;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::verify_assess_response;
use crate::digest::stable_seed;
use crate::domain::error::Result;
use crate::domain::payload::{InputPayload, OptionId};
use crate::domain::validation::{validate_payload, ValidationScope};
use crate::domain::Disclaimer;
use crate::rng::DrawStream;
use crate::MODEL_VERSION;

pub use cards::{CardTriggers, CardUi, RecommendationCard, PARETO_NOTE};
pub use impacts::EstimatedImpact;
pub use rul::{Confidence, RulEstimate};
pub use scoring::OptionScores;

/// Which option wins and why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionSummary {
    pub recommended_primary_option_id: OptionId,
    pub rationale: String,
    pub pareto_note: String,
}

/// Full assess response. Field order matches the published contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessResponse {
    pub request_id: String,
    pub timestamp_utc: String,
    pub model_version: String,
    /// Verbatim echo of the caller's payload, unknown fields included.
    pub inputs_echo: Value,
    pub rul_estimate: RulEstimate,
    pub decision_summary: DecisionSummary,
    pub recommendations: Vec<RecommendationCard>,
    pub disclaimer: Disclaimer,
}

fn utc_now_seconds() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Run the assess pipeline over a raw JSON payload.
///
/// Validates the payload, derives the stable seed, computes the RUL
/// estimate and option scores, draws the impact figures, and assembles
/// the response. Everything except `timestamp_utc` is a pure function of
/// the payload.
pub fn run_assess(payload: &Value) -> Result<AssessResponse> {
    validate_payload(payload, ValidationScope::Assess)?;
    let inputs: InputPayload = serde_json::from_value(payload.clone())?;

    let seed = stable_seed(payload)?;
    let mut stream = DrawStream::from_seed(seed);

    let rul_estimate = rul::estimate_rul(&inputs);
    let scores = scoring::score_options(&inputs);
    let impact_set = impacts::draw_impacts(&mut stream);
    let winner = scores.winner();

    tracing::debug!(
        seed,
        winner = %winner,
        confidence = rul_estimate.confidence_score,
        "assess pipeline resolved"
    );

    let response = AssessResponse {
        request_id: format!("req_{seed:08x}"),
        timestamp_utc: utc_now_seconds(),
        model_version: MODEL_VERSION.to_string(),
        rul_estimate: rul_estimate.clone(),
        decision_summary: DecisionSummary {
            recommended_primary_option_id: winner,
            rationale: cards::build_rationale(winner, &inputs, &rul_estimate, &scores),
            pareto_note: PARETO_NOTE.to_string(),
        },
        recommendations: cards::build_cards(&inputs, &rul_estimate, &scores, &impact_set, winner),
        disclaimer: Disclaimer::advisory(
            "Estimates are advisory and derived from self-reported device signals; \
             actual service outcomes and valuations may differ.",
        ),
        inputs_echo: payload.clone(),
    };

    verify_assess_response(&serde_json::to_value(&response)?)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference_payload() -> Value {
        json!({
            "device": { "brand": "Samsung", "model": "Galaxy S22", "age_months": 31 },
            "signals": {
                "battery_health_percent": 76,
                "charge_cycles": 702,
                "frame_drop_rate": 0.09,
                "repair_history_count": 1
            },
            "user_preferences": {
                "budget_priority": "medium",
                "sustainability_priority": "high",
                "performance_priority": "medium",
                "prefers_financing": false
            }
        })
    }

    #[test]
    fn test_run_assess_reference_payload() {
        let response = run_assess(&reference_payload()).unwrap();

        assert_eq!(response.model_version, MODEL_VERSION);
        assert!(response.request_id.starts_with("req_"));
        assert_eq!(response.recommendations.len(), 3);
        assert_eq!(
            response.decision_summary.recommended_primary_option_id,
            OptionId::RepairBattery
        );
        assert_eq!(response.rul_estimate.rul_months_min, 8);
        assert_eq!(response.rul_estimate.rul_months_max, 16);
    }

    #[test]
    fn test_run_assess_is_deterministic_apart_from_timestamp() {
        let payload = reference_payload();
        let mut first = run_assess(&payload).unwrap();
        let mut second = run_assess(&payload).unwrap();

        first.timestamp_utc.clear();
        second.timestamp_utc.clear();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_assess_rejects_invalid_payload() {
        let mut payload = reference_payload();
        payload["signals"]["frame_drop_rate"] = json!(1.5);
        assert!(run_assess(&payload).is_err());
    }

    #[test]
    fn test_inputs_echo_preserves_unknown_fields() {
        let mut payload = reference_payload();
        payload["signals"]["screen_brightness"] = json!(0.7);
        payload["client_meta"] = json!({ "app_version": "3.2.1" });

        let response = run_assess(&payload).unwrap();
        assert_eq!(response.inputs_echo, payload);

        // Unknown fields also feed the seed.
        let base = run_assess(&reference_payload()).unwrap();
        assert_ne!(response.request_id, base.request_id);
    }

    #[test]
    fn test_request_id_encodes_seed() {
        let payload = reference_payload();
        let seed = stable_seed(&payload).unwrap();
        let response = run_assess(&payload).unwrap();
        assert_eq!(response.request_id, format!("req_{seed:08x}"));
    }
}
