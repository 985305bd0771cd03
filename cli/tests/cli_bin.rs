//! Runs the `model-info` binary. Only commands that need no network are exercised.

use std::path::Path;
use std::process::{Command, Output};

/// Runs in an empty directory with an empty config home so no local `.env` or
/// `config.toml` leaks into the run.
fn run_model_info(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_model-info"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("RUST_LOG")
        .env_remove("LOG_FILE")
        .env_remove("MODEL_INFO_CACHE_FILE")
        .env_remove("XAI_API_KEY")
        .output()
        .expect("failed to run model-info binary")
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_model_info(dir.path(), &["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for cmd in ["providers", "models", "info", "cost", "flush"] {
        assert!(stdout.contains(cmd), "missing {}: {}", cmd, stdout);
    }
}

#[test]
fn providers_json_shows_default_adapters() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_model_info(dir.path(), &["providers", "--json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let rows: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 13);
    let adapter_of = |provider: &str| {
        rows.iter()
            .find(|r| r["provider"] == provider)
            .map(|r| r["adapter"].clone())
            .unwrap()
    };
    assert_eq!(adapter_of("ollama"), "ollama");
    assert_eq!(adapter_of("openai"), "litellm");
    assert_eq!(adapter_of("custom"), serde_json::Value::Null);
}

/// **Scenario**: `--with lmstudio` puts LM Studio ahead of the catalog for `lmstudio`.
#[test]
fn with_lmstudio_takes_over_lmstudio() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_model_info(dir.path(), &["--with", "lmstudio", "providers"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.lines().any(|l| l.starts_with("lmstudio") && l.ends_with("lmstudio")),
        "{}",
        stdout
    );
}

#[test]
fn strict_models_for_unsupported_provider_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_model_info(dir.path(), &["models", "custom", "--strict"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not supported"), "{}", stderr);

    let out = run_model_info(dir.path(), &["models", "custom"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn flush_writes_cache_file() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("cache").join("model-info.json");
    let out = run_model_info(
        dir.path(),
        &["flush", "--json", "--cache-file", cache.to_str().unwrap()],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), r#"{"flushed":true}"#);
    assert!(cache.exists());
}
