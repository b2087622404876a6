//! Canned demo payloads for manual runs and output regeneration.

use serde_json::{json, Value};

/// Mid-life Android device, sustainability-leaning user.
pub fn scenario_a() -> Value {
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

/// Heavily used iPhone, budget-leaning user open to financing.
pub fn scenario_b() -> Value {
    json!({
        "device": { "brand": "Apple", "model": "iPhone 13", "age_months": 36 },
        "signals": {
            "battery_health_percent": 69,
            "charge_cycles": 982,
            "frame_drop_rate": 0.19,
            "repair_history_count": 2
        },
        "user_preferences": {
            "budget_priority": "high",
            "sustainability_priority": "medium",
            "performance_priority": "medium",
            "prefers_financing": true
        }
    })
}

/// Sustainability-focused profile used in the submission walkthrough.
pub fn submission_sustainability() -> Value {
    json!({
        "device": { "brand": "Samsung", "model": "Galaxy S21", "age_months": 36 },
        "signals": {
            "battery_health_percent": 60,
            "charge_cycles": 900,
            "frame_drop_rate": 0.15,
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

/// Performance-focused profile used in the submission walkthrough.
pub fn submission_performance() -> Value {
    json!({
        "device": { "brand": "Apple", "model": "iPhone 14", "age_months": 24 },
        "signals": {
            "battery_health_percent": 80,
            "charge_cycles": 650,
            "frame_drop_rate": 0.22,
            "repair_history_count": 0
        },
        "user_preferences": {
            "budget_priority": "medium",
            "sustainability_priority": "low",
            "performance_priority": "high",
            "prefers_financing": true
        }
    })
}

/// All demo payloads with the labels used in generated artifact names.
pub fn all() -> Vec<(&'static str, Value)> {
    vec![
        ("A", scenario_a()),
        ("B", scenario_b()),
        ("submission_sustainability", submission_sustainability()),
        ("submission_performance", submission_performance()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess::run_assess;
    use crate::incentive::run_incentive;

    #[test]
    fn test_scenario_profiles_match_their_labels() {
        let a = scenario_a();
        assert_eq!(a["user_preferences"]["sustainability_priority"], "high");
        assert_eq!(a["user_preferences"]["prefers_financing"], false);

        let b = scenario_b();
        assert_eq!(b["user_preferences"]["budget_priority"], "high");
        assert_eq!(b["user_preferences"]["prefers_financing"], true);

        let perf = submission_performance();
        assert_eq!(perf["user_preferences"]["performance_priority"], "high");
    }

    #[test]
    fn test_all_scenarios_pass_both_pipelines() {
        for (label, payload) in all() {
            run_assess(&payload).unwrap_or_else(|e| panic!("assess {label}: {e}"));
            run_incentive(&payload, "tradein_new")
                .unwrap_or_else(|e| panic!("incentive {label}: {e}"));
        }
    }
}
