use assert_cmd::Command;
use indoc::indoc;
use std::fs;

fn mailmetrics() -> Command {
    Command::cargo_bin("mailmetrics").unwrap()
}

#[test]
fn test_roas_json_output_has_expected_metrics() {
    let output = mailmetrics()
        .args(["roas", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["report"], "roas");
    assert_eq!(report["results"]["total_cost"], 15_750.0);
    assert_eq!(report["results"]["expected_gross_leads"], 100.0);
    assert_eq!(report["rating"], "good");
}

#[test]
fn test_roas_flags_override_defaults() {
    let output = mailmetrics()
        .args([
            "roas",
            "--mail-pieces",
            "50000",
            "--cost-per-piece",
            "0.5",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["results"]["total_cost"], 25_000.0);
    assert_eq!(report["results"]["expected_gross_leads"], 200.0);
}

#[test]
fn test_sample_size_json_with_stricter_levels() {
    let output = mailmetrics()
        .args([
            "sample-size",
            "--significance",
            "99",
            "--power",
            "85",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["report"], "sample-size");
    assert_eq!(report["inputs"]["significance"], 0.99);
    assert_eq!(report["inputs"]["power"], 0.85);
    // Stricter than the 85,863 required at 95/80
    let per_variation = report["results"]["sample_size_per_variation"].as_f64().unwrap();
    assert!(per_variation > 85_863.0);
}

#[test]
fn test_config_file_supplies_defaults_and_flags_win() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("mailmetrics.toml");
    fs::write(
        &config_path,
        indoc! {r#"
            [roas]
            mail_pieces = 10000
            contract_value = 20000
        "#},
    )
    .unwrap();

    let output = mailmetrics()
        .args([
            "roas",
            "--config",
            config_path.to_str().unwrap(),
            "--mail-pieces",
            "40000",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    // Flag beats config for mail pieces; config beats default for value
    assert_eq!(report["assumptions"]["mail_pieces"], 40_000.0);
    assert_eq!(report["assumptions"]["contract_value"], 20_000.0);
    assert_eq!(report["assumptions"]["cost_per_piece"], 0.63);
}

#[test]
fn test_invalid_rate_is_rejected_with_field_name() {
    let output = mailmetrics()
        .args(["roas", "--contract-rate", "1.5"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8(output).unwrap().contains("contract_rate"));
}

#[test]
fn test_zero_mde_is_rejected_at_the_boundary() {
    let output = mailmetrics()
        .args(["sample-size", "--mde", "0"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8(output).unwrap().contains("mde"));
}

#[test]
fn test_unknown_significance_value_is_a_usage_error() {
    mailmetrics()
        .args(["sample-size", "--significance", "97"])
        .assert()
        .failure();
}

#[test]
fn test_markdown_report_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("report.md");

    mailmetrics()
        .args([
            "sample-size",
            "--format",
            "markdown",
            "--output",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let report = fs::read_to_string(&out_path).unwrap();
    assert!(report.starts_with("# A/B Test Sample Size Report"));
    assert!(report.contains("| Per variation | 85,863 |"));
    assert!(report.contains("## MDE Sensitivity"));
}

#[test]
fn test_missing_config_file_fails_cleanly() {
    let output = mailmetrics()
        .args(["roas", "--config", "/nonexistent/mailmetrics.toml"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8(output)
        .unwrap()
        .contains("failed to read config"));
}
