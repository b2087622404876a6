//! Input payload validation shared by both pipelines.
//!
//! Checks run in a fixed order and stop at the first offending field, so a
//! bad payload always maps to one stable error. The incentive pipeline only
//! reads a subset of the payload and validates only that subset; both
//! pipelines go through this single entry point to keep the rules from
//! diverging.

use serde_json::Value;

use super::error::ValidationError;

/// Which slice of the payload a pipeline requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationScope {
    /// Full payload: device identity plus all signals and preferences.
    Assess,
    /// Usage signals and preferences only; device contents are not read.
    Incentive,
}

impl ValidationScope {
    fn checks_device(self) -> bool {
        matches!(self, Self::Assess)
    }
}

/// Validate a candidate payload for the given scope.
///
/// Returns `Ok(())` iff every required field is present, correctly typed,
/// and in range. No side effects; scoring never runs on invalid input.
pub fn validate_payload(payload: &Value, scope: ValidationScope) -> Result<(), ValidationError> {
    let root = require_object(payload, "input_payload")?;

    for section in ["device", "signals", "user_preferences"] {
        if !root.contains_key(section) {
            return Err(ValidationError::MissingField {
                path: section.to_string(),
            });
        }
    }

    let signals = require_object(&payload["signals"], "signals")?;
    let prefs = require_object(&payload["user_preferences"], "user_preferences")?;

    // The incentive scope never reads device contents, so the key only has
    // to be present there.
    if scope.checks_device() {
        let device = require_object(&payload["device"], "device")?;
        for key in ["brand", "model"] {
            let path = format!("device.{key}");
            let value = device.get(key).ok_or_else(|| ValidationError::MissingField {
                path: path.clone(),
            })?;
            match value.as_str() {
                Some(s) if !s.is_empty() => {}
                Some(_) => return Err(ValidationError::EmptyString { path }),
                None => {
                    return Err(ValidationError::WrongType {
                        path,
                        expected: "a string",
                    })
                }
            }
        }
        require_non_negative_int(device, "device", "age_months")?;

        let battery = require_int(signals, "signals", "battery_health_percent")?;
        if !(0..=100).contains(&battery) {
            return Err(ValidationError::OutOfRange {
                path: "signals.battery_health_percent".to_string(),
                constraint: "in [0, 100]",
            });
        }
    }

    require_non_negative_int(signals, "signals", "charge_cycles")?;

    let frame_drop = signals
        .get("frame_drop_rate")
        .ok_or_else(|| ValidationError::MissingField {
            path: "signals.frame_drop_rate".to_string(),
        })?
        .as_f64()
        .ok_or(ValidationError::WrongType {
            path: "signals.frame_drop_rate".to_string(),
            expected: "a number",
        })?;
    if !(0.0..=1.0).contains(&frame_drop) {
        return Err(ValidationError::OutOfRange {
            path: "signals.frame_drop_rate".to_string(),
            constraint: "in [0, 1]",
        });
    }

    require_non_negative_int(signals, "signals", "repair_history_count")?;

    for key in [
        "budget_priority",
        "sustainability_priority",
        "performance_priority",
    ] {
        let valid = prefs
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|level| matches!(level, "low" | "medium" | "high"));
        if !valid {
            return Err(ValidationError::InvalidPriority {
                path: format!("user_preferences.{key}"),
            });
        }
    }

    match prefs.get("prefers_financing") {
        Some(value) if value.is_boolean() => Ok(()),
        Some(_) => Err(ValidationError::WrongType {
            path: "user_preferences.prefers_financing".to_string(),
            expected: "a boolean",
        }),
        None => Err(ValidationError::MissingField {
            path: "user_preferences.prefers_financing".to_string(),
        }),
    }
}

fn require_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a serde_json::Map<String, Value>, ValidationError> {
    value.as_object().ok_or(ValidationError::WrongType {
        path: path.to_string(),
        expected: "an object",
    })
}

fn require_int(
    section: &serde_json::Map<String, Value>,
    section_path: &str,
    key: &str,
) -> Result<i64, ValidationError> {
    let path = format!("{section_path}.{key}");
    let value = section.get(key).ok_or_else(|| ValidationError::MissingField {
        path: path.clone(),
    })?;
    value.as_i64().ok_or(ValidationError::WrongType {
        path,
        expected: "an integer",
    })
}

fn require_non_negative_int(
    section: &serde_json::Map<String, Value>,
    section_path: &str,
    key: &str,
) -> Result<i64, ValidationError> {
    let parsed = require_int(section, section_path, key)?;
    if parsed < 0 {
        return Err(ValidationError::OutOfRange {
            path: format!("{section_path}.{key}"),
            constraint: ">= 0",
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
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
    fn test_valid_payload_passes_both_scopes() {
        let payload = valid_payload();
        assert!(validate_payload(&payload, ValidationScope::Assess).is_ok());
        assert!(validate_payload(&payload, ValidationScope::Incentive).is_ok());
    }

    #[test]
    fn test_missing_section_rejected() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("signals");
        let err = validate_payload(&payload, ValidationScope::Assess).unwrap_err();
        match err {
            ValidationError::MissingField { path } => assert_eq!(path, "signals"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_charge_cycles_rejected() {
        let mut payload = valid_payload();
        payload["signals"].as_object_mut().unwrap().remove("charge_cycles");
        let err = validate_payload(&payload, ValidationScope::Assess).unwrap_err();
        match err {
            ValidationError::MissingField { path } => assert_eq!(path, "signals.charge_cycles"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_frame_drop_rate_out_of_range_rejected() {
        let mut payload = valid_payload();
        payload["signals"]["frame_drop_rate"] = json!(1.5);
        let err = validate_payload(&payload, ValidationScope::Incentive).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_invalid_priority_enum_rejected() {
        let mut payload = valid_payload();
        payload["user_preferences"]["budget_priority"] = json!("urgent");
        let err = validate_payload(&payload, ValidationScope::Assess).unwrap_err();
        match err {
            ValidationError::InvalidPriority { path } => {
                assert_eq!(path, "user_preferences.budget_priority");
            }
            other => panic!("expected InvalidPriority, got {:?}", other),
        }
    }

    #[test]
    fn test_float_age_months_rejected() {
        let mut payload = valid_payload();
        payload["device"]["age_months"] = json!(31.5);
        let err = validate_payload(&payload, ValidationScope::Assess).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { .. }));
    }

    #[test]
    fn test_negative_repair_count_rejected() {
        let mut payload = valid_payload();
        payload["signals"]["repair_history_count"] = json!(-1);
        let err = validate_payload(&payload, ValidationScope::Incentive).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_empty_brand_rejected() {
        let mut payload = valid_payload();
        payload["device"]["brand"] = json!("");
        let err = validate_payload(&payload, ValidationScope::Assess).unwrap_err();
        match err {
            ValidationError::EmptyString { path } => assert_eq!(path, "device.brand"),
            other => panic!("expected EmptyString, got {:?}", other),
        }
    }

    #[test]
    fn test_incentive_scope_ignores_device_contents() {
        let mut payload = valid_payload();
        payload["device"] = json!({});
        assert!(validate_payload(&payload, ValidationScope::Incentive).is_ok());
        assert!(validate_payload(&payload, ValidationScope::Assess).is_err());
    }

    #[test]
    fn test_incentive_scope_accepts_non_object_device() {
        let mut payload = valid_payload();
        payload["device"] = json!("n/a");
        assert!(validate_payload(&payload, ValidationScope::Incentive).is_ok());

        let err = validate_payload(&payload, ValidationScope::Assess).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { .. }));
    }

    #[test]
    fn test_non_boolean_financing_rejected() {
        let mut payload = valid_payload();
        payload["user_preferences"]["prefers_financing"] = json!("yes");
        let err = validate_payload(&payload, ValidationScope::Assess).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { .. }));
    }

    #[test]
    fn test_integer_frame_drop_rate_accepted() {
        let mut payload = valid_payload();
        payload["signals"]["frame_drop_rate"] = json!(1);
        assert!(validate_payload(&payload, ValidationScope::Assess).is_ok());
    }
}
