//! Declarative response-shape checks shared by the pipelines and tests.
//!
//! Top-level key-set equality is an internal invariant: a mismatch means a
//! bug in response assembly, not bad input, so violations surface as
//! `DlasError::Contract` rather than `ValidationError`.

use serde_json::Value;

/// Exact top-level key set of an assess response.
pub const ASSESS_RESPONSE_KEYS: &[&str] = &[
    "request_id",
    "timestamp_utc",
    "model_version",
    "inputs_echo",
    "rul_estimate",
    "decision_summary",
    "recommendations",
    "disclaimer",
];

/// Exact top-level key set of an incentive response.
pub const INCENTIVE_RESPONSE_KEYS: &[&str] = &[
    "request_id",
    "model_version",
    "selected_option_id",
    "packages",
    "accept_score",
    "impact_score",
    "notes",
    "disclaimer",
];

/// Exact key set of one incentive package.
pub const PACKAGE_KEYS: &[&str] = &["package_id", "title", "description", "value", "ui"];

/// Exact key set of a package `value` object.
pub const PACKAGE_VALUE_KEYS: &[&str] = &["cash_amount_try", "carbon_points", "perk"];

/// Exact key set of a package `ui` object.
pub const PACKAGE_UI_KEYS: &[&str] = &["badge", "cta_label"];

/// The three package ids every incentive response must carry.
pub const PACKAGE_IDS: &[&str] = &["cash", "carbon_points", "hybrid"];

/// A broken response-shape invariant.
#[derive(Debug, thiserror::Error)]
pub enum ContractViolation {
    #[error("{path} key mismatch; missing={missing:?}, extra={extra:?}")]
    KeySetMismatch {
        path: String,
        missing: Vec<String>,
        extra: Vec<String>,
    },

    #[error("{path} must be an object")]
    ExpectedObject { path: String },

    #[error("{path} must be an array")]
    ExpectedArray { path: String },

    #[error("{0}")]
    Invariant(String),
}

/// Check that `value` is an object whose key set exactly equals `expected`.
pub fn expect_exact_keys(
    value: &Value,
    path: &str,
    expected: &[&str],
) -> Result<(), ContractViolation> {
    let obj = value.as_object().ok_or_else(|| ContractViolation::ExpectedObject {
        path: path.to_string(),
    })?;

    let mut missing: Vec<String> = expected
        .iter()
        .filter(|key| !obj.contains_key(**key))
        .map(|key| (*key).to_string())
        .collect();
    let mut extra: Vec<String> = obj
        .keys()
        .filter(|key| !expected.contains(&key.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() && extra.is_empty() {
        return Ok(());
    }
    missing.sort_unstable();
    extra.sort_unstable();
    Err(ContractViolation::KeySetMismatch {
        path: path.to_string(),
        missing,
        extra,
    })
}

/// Verify the assembled assess response against its contract.
///
/// Checks the top-level key set, the card count, and the incentive-flow
/// trigger (true on the trade-in card, false elsewhere).
pub fn verify_assess_response(response: &Value) -> Result<(), ContractViolation> {
    expect_exact_keys(response, "$", ASSESS_RESPONSE_KEYS)?;

    let cards = response["recommendations"]
        .as_array()
        .ok_or_else(|| ContractViolation::ExpectedArray {
            path: "$.recommendations".to_string(),
        })?;
    if cards.len() != 3 {
        return Err(ContractViolation::Invariant(format!(
            "recommendations must contain exactly 3 cards, got {}",
            cards.len()
        )));
    }

    for card in cards {
        let is_tradein = card["option_id"] == "tradein_new";
        let triggers_flow = card["triggers"]["open_incentive_flow"] == true;
        if is_tradein != triggers_flow {
            return Err(ContractViolation::Invariant(format!(
                "open_incentive_flow must be true only for tradein_new (option {})",
                card["option_id"]
            )));
        }
    }

    Ok(())
}

/// Verify the assembled incentive response against its contract.
pub fn verify_incentive_response(response: &Value) -> Result<(), ContractViolation> {
    expect_exact_keys(response, "$", INCENTIVE_RESPONSE_KEYS)?;

    let packages = response["packages"]
        .as_array()
        .ok_or_else(|| ContractViolation::ExpectedArray {
            path: "$.packages".to_string(),
        })?;
    if packages.len() != PACKAGE_IDS.len() {
        return Err(ContractViolation::Invariant(format!(
            "packages must contain exactly {} entries, got {}",
            PACKAGE_IDS.len(),
            packages.len()
        )));
    }

    for (idx, package) in packages.iter().enumerate() {
        let path = format!("$.packages[{idx}]");
        expect_exact_keys(package, &path, PACKAGE_KEYS)?;
        expect_exact_keys(&package["value"], &format!("{path}.value"), PACKAGE_VALUE_KEYS)?;
        expect_exact_keys(&package["ui"], &format!("{path}.ui"), PACKAGE_UI_KEYS)?;
    }

    let mut ids: Vec<&str> = packages
        .iter()
        .filter_map(|p| p["package_id"].as_str())
        .collect();
    ids.sort_unstable();
    let mut expected: Vec<&str> = PACKAGE_IDS.to_vec();
    expected.sort_unstable();
    if ids != expected {
        return Err(ContractViolation::Invariant(format!(
            "package ids must be {PACKAGE_IDS:?}, got {ids:?}"
        )));
    }

    for score_key in ["accept_score", "impact_score"] {
        let in_range = response[score_key]
            .as_f64()
            .is_some_and(|score| (0.0..=1.0).contains(&score));
        if !in_range {
            return Err(ContractViolation::Invariant(format!(
                "{score_key} must be a number in [0, 1]"
            )));
        }
    }

    let notes_present = response["notes"]
        .as_array()
        .is_some_and(|notes| !notes.is_empty());
    if !notes_present {
        return Err(ContractViolation::Invariant(
            "notes must contain at least one item".to_string(),
        ));
    }

    Ok(())
}

/// Recursively compare the key shape of `candidate` against `reference`.
///
/// Objects must carry identical key sets; non-empty reference arrays
/// require a non-empty candidate whose items all match the first reference
/// item. Leaf values are not compared. Used by the scenario harness to pin
/// generated artifacts to a reference template.
pub fn same_key_shape(
    reference: &Value,
    candidate: &Value,
    path: &str,
) -> Result<(), ContractViolation> {
    match reference {
        Value::Object(ref_map) => {
            let expected: Vec<&str> = ref_map.keys().map(String::as_str).collect();
            expect_exact_keys(candidate, path, &expected)?;
            for (key, ref_value) in ref_map {
                same_key_shape(ref_value, &candidate[key], &format!("{path}.{key}"))?;
            }
            Ok(())
        }
        Value::Array(ref_items) => {
            let cand_items =
                candidate
                    .as_array()
                    .ok_or_else(|| ContractViolation::ExpectedArray {
                        path: path.to_string(),
                    })?;
            let Some(ref_item) = ref_items.first() else {
                return Ok(());
            };
            if cand_items.is_empty() {
                return Err(ContractViolation::Invariant(format!(
                    "{path} must not be empty"
                )));
            }
            for (idx, cand_item) in cand_items.iter().enumerate() {
                same_key_shape(ref_item, cand_item, &format!("{path}[{idx}]"))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
