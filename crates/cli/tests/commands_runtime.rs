use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use ampquote_cli::commands::{generate, job_types};
use serde_json::Value;
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

fn with_env<F: FnOnce()>(vars: &[(&str, &str)], test: F) {
    let _guard = env_lock().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test();

    for (key, _) in vars {
        env::remove_var(key);
    }
    for key in [
        "AMPQUOTE_REMOTE_ENABLED",
        "AMPQUOTE_REMOTE_ENDPOINT",
        "AMPQUOTE_REMOTE_API_KEY",
        "AMPQUOTE_PRICING_DAILY_RATE",
        "AMPQUOTE_LOGGING_LEVEL",
        "AMPQUOTE_LOG_LEVEL",
    ] {
        env::remove_var(key);
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn write_draft(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("draft.toml");
    fs::write(&path, contents).expect("draft file should be writable");
    path
}

const VALID_DRAFT: &str = r#"
client_name = "P. Whitford"
client_address = "3 Chapel Row, York"
property_type = "house"
bedrooms = "3"
floors = "2"
job_type = "rewire"
additional_requirements = "Keep the existing garage supply."

[[materials]]
description = "18th Edition consumer unit (10-way, dual RCD)"
quantity = 1
unit_price = "185.00"

[[materials]]
description = "Twin & Earth 2.5mm² cable (100m drum)"
quantity = 4
unit_price = "48.50"
"#;

#[test]
fn generate_produces_a_priced_quote_on_the_local_path() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let path = write_draft(&dir, VALID_DRAFT);

        let result = generate::run(&path, false, Some(17));
        assert_eq!(result.exit_code, 0, "expected success: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "generate");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["source"], "local");

        let quote = &payload["quote"];
        assert_eq!(quote["client"]["name"], "P. Whitford");
        assert_eq!(quote["job"]["job_type"], "rewire");
        assert!(quote["quote_number"].as_str().unwrap_or("").starts_with("AMP-"));

        let ids: Vec<u64> = quote["materials"]
            .as_array()
            .expect("materials should be an array")
            .iter()
            .map(|item| item["id"].as_u64().expect("material id"))
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let parse = |key: &str| -> f64 {
            quote["financials"][key]
                .as_str()
                .and_then(|value| value.parse().ok())
                .expect("financial figure")
        };
        let material_cost = parse("material_cost");
        let labour_cost = parse("labour_cost");
        let subtotal = parse("subtotal");
        let vat = parse("vat");
        let total = parse("total");
        assert_eq!(subtotal, material_cost + labour_cost);
        assert_eq!(total, subtotal + vat);
    });
}

#[test]
fn generate_rejects_a_draft_without_a_client_name() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let path = write_draft(
            &dir,
            r#"
job_type = "socket-installation"
bedrooms = "2"
"#,
        );

        let result = generate::run(&path, false, None);
        assert_eq!(result.exit_code, 5, "expected validation failure: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "generate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "draft_validation");
    });
}

#[test]
fn generate_reports_a_missing_draft_file() {
    with_env(&[], || {
        let result = generate::run(Path::new("does-not-exist.toml"), false, None);
        assert_eq!(result.exit_code, 3);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "draft_read");
    });
}

#[test]
fn generate_refuses_remote_mode_when_unconfigured() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let path = write_draft(&dir, VALID_DRAFT);

        let result = generate::run(&path, true, None);
        assert_eq!(result.exit_code, 6, "expected remote config failure: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "remote_not_configured");
    });
}

#[test]
fn generate_honours_the_configured_daily_rate() {
    with_env(&[("AMPQUOTE_PRICING_DAILY_RATE", "320")], || {
        let dir = TempDir::new().expect("temp dir");
        let path = write_draft(&dir, VALID_DRAFT);

        let result = generate::run(&path, false, Some(17));
        assert_eq!(result.exit_code, 0, "expected success: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["quote"]["labour"]["daily_rate"], "320");
    });
}

#[test]
fn job_types_lists_the_full_fixed_enumeration() {
    let result = job_types::run();
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "job-types");
    assert_eq!(payload["status"], "ok");

    let entries = payload["job_types"].as_array().expect("job types array");
    assert_eq!(entries.len(), 6);

    let rewire = entries
        .iter()
        .find(|entry| entry["key"] == "rewire")
        .expect("rewire should be listed");
    // 3 bedrooms: 3 * 1.8 + 2 = 7.4 base days
    assert_eq!(rewire["base_labour_days"].as_f64(), Some(7.4));
}
