//! DLAS - Device Lifecycle Advisory System CLI
//!
//! The `dlas` command runs the advisory pipelines over JSON payload files.
//!
//! ## Commands
//!
//! - `assess`: Score the repair / refurbished / trade-in options for a device
//! - `incentive`: Price the trade-in incentive packages for a selected option
//! - `scenarios`: Regenerate the canned demo outputs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use dlas_core::contract::same_key_shape;
use dlas_core::{run_assess, run_incentive, scenario};

#[derive(Parser)]
#[command(name = "dlas")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Device Lifecycle Advisory System (DLAS)", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the assess pipeline over a payload file
    Assess {
        /// Path to the input payload (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the response (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the incentive pipeline over a payload file
    Incentive {
        /// Path to the input payload (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Selected option id
        #[arg(long, default_value = "tradein_new")]
        option: String,

        /// Output path for the response (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Regenerate the demo outputs for the canned scenarios
    Scenarios {
        /// Directory to write the artifacts into
        #[arg(long, default_value = "demo_outputs")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    dlas_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Assess { input, output } => cmd_assess(&input, output.as_deref()),
        Commands::Incentive {
            input,
            option,
            output,
        } => cmd_incentive(&input, &option, output.as_deref()),
        Commands::Scenarios { out_dir } => cmd_scenarios(&out_dir),
    }
}

fn read_payload(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Payload file {} is not valid JSON", path.display()))
}

fn emit(response: &Value, output: Option<&Path>) -> Result<()> {
    let pretty = serde_json::to_string_pretty(response)?;
    match output {
        Some(path) => {
            fs::write(path, pretty)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote response");
        }
        None => println!("{pretty}"),
    }
    Ok(())
}

/// Run the assess pipeline and emit the response
fn cmd_assess(input: &Path, output: Option<&Path>) -> Result<()> {
    let payload = read_payload(input)?;
    let response = run_assess(&payload).context("Assess pipeline failed")?;
    info!(
        request_id = %response.request_id,
        winner = %response.decision_summary.recommended_primary_option_id,
        "Assess complete"
    );
    emit(&serde_json::to_value(&response)?, output)
}

/// Run the incentive pipeline and emit the response
fn cmd_incentive(input: &Path, option: &str, output: Option<&Path>) -> Result<()> {
    let payload = read_payload(input)?;
    let response = run_incentive(&payload, option).context("Incentive pipeline failed")?;
    info!(
        request_id = %response.request_id,
        accept_score = response.accept_score,
        impact_score = response.impact_score,
        "Incentive complete"
    );
    emit(&serde_json::to_value(&response)?, output)
}

/// Regenerate scenario artifacts: one assess and one incentive response per
/// canned payload. The first scenario's outputs become the reference shape
/// every later artifact is pinned against.
fn cmd_scenarios(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut assess_reference: Option<Value> = None;
    let mut incentive_reference: Option<Value> = None;

    for (label, payload) in scenario::all() {
        let assess = run_assess(&payload)
            .with_context(|| format!("Assess pipeline failed for scenario {label}"))?;
        let assess = serde_json::to_value(&assess)?;
        match &assess_reference {
            Some(reference) => same_key_shape(reference, &assess, "$").with_context(|| {
                format!("Assess artifact for scenario {label} diverged from the reference shape")
            })?,
            None => assess_reference = Some(assess.clone()),
        }
        let assess_path = out_dir.join(format!("scenario_{label}.json"));
        fs::write(&assess_path, serde_json::to_string_pretty(&assess)?)
            .with_context(|| format!("Failed to write {}", assess_path.display()))?;
        info!(path = %assess_path.display(), "Wrote assess artifact");

        let incentive = run_incentive(&payload, "tradein_new")
            .with_context(|| format!("Incentive pipeline failed for scenario {label}"))?;
        let incentive = serde_json::to_value(&incentive)?;
        match &incentive_reference {
            Some(reference) => same_key_shape(reference, &incentive, "$").with_context(|| {
                format!(
                    "Incentive artifact for scenario {label} diverged from the reference shape"
                )
            })?,
            None => incentive_reference = Some(incentive.clone()),
        }
        let incentive_path = out_dir.join(format!("incentive_{label}.json"));
        fs::write(&incentive_path, serde_json::to_string_pretty(&incentive)?)
            .with_context(|| format!("Failed to write {}", incentive_path.display()))?;
        info!(path = %incentive_path.display(), "Wrote incentive artifact");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
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
    fn test_cmd_assess_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("payload.json");
        let output = dir.path().join("response.json");
        fs::write(&input, sample_payload().to_string()).unwrap();

        cmd_assess(&input, Some(&output)).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert!(written["request_id"].as_str().unwrap().starts_with("req_"));
        assert_eq!(written["recommendations"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_cmd_incentive_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("payload.json");
        let output = dir.path().join("response.json");
        fs::write(&input, sample_payload().to_string()).unwrap();

        cmd_incentive(&input, "tradein_new", Some(&output)).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["selected_option_id"], "tradein_new");
        assert_eq!(written["packages"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_cmd_scenarios_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        cmd_scenarios(dir.path()).unwrap();

        for label in ["A", "B", "submission_sustainability", "submission_performance"] {
            assert!(dir.path().join(format!("scenario_{label}.json")).exists());
            assert!(dir.path().join(format!("incentive_{label}.json")).exists());
        }
    }

    #[test]
    fn test_read_payload_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("payload.json");
        fs::write(&input, "{not json").unwrap();
        assert!(read_payload(&input).is_err());
    }
}
