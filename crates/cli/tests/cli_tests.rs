//! CLI integration tests

use std::process::{Command, Output};

fn hviq(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hviq"))
        .args(args)
        .env_remove("HVIQ_API_URL")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = hviq(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("HomeValueIQ"), "Should show app name");
    assert!(stdout.contains("estimate"), "Should show estimate command");
    assert!(stdout.contains("schema"), "Should show schema command");
    assert!(stdout.contains("ask"), "Should show ask command");
    assert!(stdout.contains("health"), "Should show health command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = hviq(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("hviq"), "Should show binary name");
}

/// Test estimate subcommand help lists every attribute
#[test]
fn test_estimate_help() {
    let output = hviq(&["estimate", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Estimate help should succeed");
    for flag in [
        "--area",
        "--bedrooms",
        "--bathrooms",
        "--stories",
        "--mainroad",
        "--guestroom",
        "--basement",
        "--hotwaterheating",
        "--airconditioning",
        "--parking",
        "--prefarea",
        "--furnishingstatus",
    ] {
        assert!(stdout.contains(flag), "Should show {} option", flag);
    }
}

/// Test format option
#[test]
fn test_format_option() {
    let output = hviq(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
}

/// Test api-url option
#[test]
fn test_api_url_option() {
    let output = hviq(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--api-url"), "Should show api-url option");
    assert!(stdout.contains("HVIQ_API_URL"), "Should show env var");
}

/// The FAQ works without a server
#[test]
fn test_ask_answers_offline() {
    let output = hviq(&["--format", "json", "ask", "how-it-works"]);
    assert!(output.status.success(), "Ask should succeed");

    let answer: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Ask should print JSON");
    assert_eq!(answer["id"], "how-it-works");
    assert!(!answer["answer"].as_str().unwrap().is_empty());
}

/// The built-in schema works without a server
#[test]
fn test_local_schema() {
    let output = hviq(&["--format", "json", "schema", "--local"]);
    assert!(output.status.success(), "Local schema should succeed");

    let schema: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Schema should print JSON");
    assert_eq!(schema["attributes"].as_array().unwrap().len(), 12);
    assert_eq!(schema["attributes"][0]["name"], "area");
}

/// Out-of-range values are refused before any request is made
#[test]
fn test_estimate_out_of_range_fails() {
    let output = hviq(&["--api-url", "http://127.0.0.1:9", "estimate", "--stories", "9"]);

    assert!(!output.status.success(), "Out-of-range estimate should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("stories must be between 1 and 4"),
        "Should name the rejected attribute"
    );
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = hviq(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}
