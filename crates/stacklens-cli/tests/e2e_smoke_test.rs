use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use stacklens_cli::{Args, CliError, ConfigError};

fn args(input: String, output: String) -> Args {
    Args {
        input,
        output: Some(output),
        offset: None,
        config: None,
        log_level: "off".to_string(),
        compact: false,
    }
}

fn read_reports(path: &std::path::Path) -> Vec<Value> {
    let text = fs::read_to_string(path).expect("Failed to read report");
    serde_json::from_str(&text).expect("Report should be a JSON array")
}

#[test]
fn e2e_stack_trace_with_source() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("server.js");
    fs::write(&source_path, "const a = 1;\nconst b = 2;\nthrow new Error('boom');\n").unwrap();

    let input_path = temp_dir.path().join("trace.txt");
    fs::write(
        &input_path,
        format!(
            "Error: boom\n    at Object.<anonymous> ({}:3:7)\n    at Module._compile (node:internal/modules/cjs/loader:1364:14)\n",
            source_path.display()
        ),
    )
    .unwrap();
    let output_path = temp_dir.path().join("report.json");

    stacklens_cli::run(&args(
        input_path.to_string_lossy().to_string(),
        output_path.to_string_lossy().to_string(),
    ))
    .expect("Run should succeed");

    let reports = read_reports(&output_path);
    assert_eq!(reports.len(), 1);

    let report = &reports[0];
    assert_eq!(report["name"], "Error");
    assert_eq!(report["message"], "boom");

    let frames = report["frames"].as_array().expect("frames should be an array");
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0]["type"], "app");
    assert_eq!(frames[0]["fileType"], "fs");
    assert_eq!(frames[0]["lineNumber"], 3);
    assert_eq!(frames[0]["source"].as_array().map(Vec::len), Some(3));
    assert_eq!(frames[0]["source"][2]["chunk"], "throw new Error('boom');");
    assert_eq!(frames[1]["type"], "native");
    assert!(frames[1].get("source").is_none());
}

#[test]
fn e2e_json_value_with_offset_and_cause() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("thrown.json");
    fs::write(
        &input_path,
        r#"{
            "message": "request failed",
            "stack": "Error: request failed\n    at a (/srv/a.js:1:1)\n    at b (/srv/b.js:2:1)",
            "cause": {"reason": "timeout"}
        }"#,
    )
    .unwrap();
    let output_path = temp_dir.path().join("report.json");

    let mut cli_args = args(
        input_path.to_string_lossy().to_string(),
        output_path.to_string_lossy().to_string(),
    );
    cli_args.offset = Some(1);
    cli_args.compact = true;
    stacklens_cli::run(&cli_args).expect("Run should succeed");

    let text = fs::read_to_string(&output_path).unwrap();
    assert_eq!(text.trim_end().lines().count(), 1);

    let reports = read_reports(&output_path);
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["frames"].as_array().map(Vec::len), Some(1));
    assert_eq!(reports[0]["frames"][0]["functionName"], "b");
    assert_eq!(reports[1]["message"], r#"{"reason":"timeout"}"#);
    assert!(reports[1]["hint"].is_string());
}

#[test]
fn e2e_config_file_sets_window() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("app.js");
    let lines: Vec<String> = (1..=30).map(|n| format!("// {n}")).collect();
    fs::write(&source_path, lines.join("\n")).unwrap();

    let input_path = temp_dir.path().join("trace.txt");
    fs::write(
        &input_path,
        format!("Error: boom\n    at main ({}:15:1)", source_path.display()),
    )
    .unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[parser]\nwindow_size = 3\n").unwrap();
    let output_path = temp_dir.path().join("report.json");

    let mut cli_args = args(
        input_path.to_string_lossy().to_string(),
        output_path.to_string_lossy().to_string(),
    );
    cli_args.config = Some(config_path.to_string_lossy().to_string());
    stacklens_cli::run(&cli_args).expect("Run should succeed");

    let reports = read_reports(&output_path);
    let source = reports[0]["frames"][0]["source"]
        .as_array()
        .expect("source should be present");
    let numbers: Vec<_> = source.iter().map(|chunk| chunk["lineNumber"].clone()).collect();
    assert_eq!(numbers, vec![14, 15, 16]);
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let result = stacklens_cli::run(&args(
        temp_dir.path().join("absent.txt").to_string_lossy().to_string(),
        temp_dir.path().join("report.json").to_string_lossy().to_string(),
    ));

    assert!(matches!(result, Err(CliError::Io(_))));
}

#[test]
fn e2e_missing_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("trace.txt");
    fs::write(&input_path, "Error: boom").unwrap();

    let mut cli_args = args(
        input_path.to_string_lossy().to_string(),
        temp_dir.path().join("report.json").to_string_lossy().to_string(),
    );
    cli_args.config = Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string());

    let result = stacklens_cli::run(&cli_args);
    assert!(matches!(
        result,
        Err(CliError::Config(ConfigError::MissingFile(_)))
    ));
}
