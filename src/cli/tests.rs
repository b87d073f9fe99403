use crate::cli::Args;
use crate::config::LLMProvider;
use clap::Parser;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_args_default_values() {
    let args = Args::try_parse_from(["dashie-rs"]).unwrap();

    assert_eq!(args.company, None);
    assert_eq!(args.output_path, None);
    assert_eq!(args.config, None);
    assert!(!args.verbose);
    assert!(!args.skip_connection_check);
}

#[test]
fn test_args_positional_company_and_short_options() {
    let args = Args::try_parse_from([
        "dashie-rs",
        "Acme Robotics",
        "-o",
        "/tmp/reports",
        "-v",
    ])
    .unwrap();

    assert_eq!(args.company.as_deref(), Some("Acme Robotics"));
    assert_eq!(args.output_path, Some(PathBuf::from("/tmp/reports")));
    assert!(args.verbose);
}

#[test]
fn test_args_llm_and_search_options() {
    let args = Args::try_parse_from([
        "dashie-rs",
        "Acme",
        "--llm-provider",
        "anthropic",
        "--model",
        "claude-sonnet",
        "--max-tokens",
        "2048",
        "--temperature",
        "0.2",
        "--search-api-key",
        "exa-key",
        "--max-parallels",
        "5",
        "--retry-attempts",
        "3",
        "--skip-connection-check",
    ])
    .unwrap();

    let config = args.into_config().unwrap();

    assert_eq!(config.company_name.as_deref(), Some("Acme"));
    assert_eq!(config.llm.provider, LLMProvider::Anthropic);
    assert_eq!(config.llm.model, "claude-sonnet");
    assert_eq!(config.llm.max_tokens, 2048);
    assert_eq!(config.llm.temperature, 0.2);
    assert_eq!(config.search.api_key, "exa-key");
    assert_eq!(config.search.max_parallels, 5);
    assert_eq!(config.llm.retry_attempts, 3);
    assert_eq!(config.search.retry_attempts, 3);
    assert!(config.skip_connection_check);
}

#[test]
fn test_unknown_provider_keeps_default() {
    let args =
        Args::try_parse_from(["dashie-rs", "Acme", "--llm-provider", "mystery"]).unwrap();
    let config = args.into_config().unwrap();
    assert_eq!(config.llm.provider, LLMProvider::OpenAI);
}

#[test]
fn test_timeouts_override_config() {
    let args = Args::try_parse_from([
        "dashie-rs",
        "Acme",
        "--llm-timeout",
        "15",
        "--search-timeout",
        "4",
    ])
    .unwrap();
    let config = args.into_config().unwrap();
    assert_eq!(config.llm.timeout_seconds, 15);
    assert_eq!(config.search.timeout_seconds, 4);
}

#[test]
fn test_explicit_config_file_is_loaded_then_overridden() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    std::fs::write(
        &config_path,
        r#"
company_name = "From File"
output_path = "/srv/proposals"

[llm]
model = "gpt-4o"

[search]
max_parallels = 7
"#,
    )
    .unwrap();

    let args = Args::try_parse_from([
        "dashie-rs",
        "-c",
        config_path.to_str().unwrap(),
        "--model",
        "gpt-4.1",
    ])
    .unwrap();
    let config = args.into_config().unwrap();

    assert_eq!(config.company_name.as_deref(), Some("From File"));
    assert_eq!(config.output_path, PathBuf::from("/srv/proposals"));
    assert_eq!(config.llm.model, "gpt-4.1");
    assert_eq!(config.search.max_parallels, 7);
}

#[test]
fn test_missing_explicit_config_file_is_an_error() {
    let args =
        Args::try_parse_from(["dashie-rs", "Acme", "-c", "/definitely/not/here.toml"]).unwrap();
    assert!(args.into_config().is_err());
}
