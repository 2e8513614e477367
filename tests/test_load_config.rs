use serial_test::serial;
use sk_client::config::{Config, DEFAULT_COMBINED_OUTPUT};
use sk_client::load_config::{load_config, ENDPOINT_ENV};
use sk_client::transpile::DEFAULT_ENDPOINT;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Creating temp config file failed");
    file.write_all(content.as_bytes()).expect("Writing temp config failed");
    file
}

#[test]
#[serial]
fn test_defaults_without_file_or_env() {
    std::env::remove_var(ENDPOINT_ENV);

    let config = load_config(None, None).expect("Defaults are valid");

    assert_eq!(config, Config::default());
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.combined_output, PathBuf::from(DEFAULT_COMBINED_OUTPUT));
    assert_eq!(
        config.ignore_list,
        vec!["swiftSupportInKotlin".to_string(), "kotlinSupportInSwift".to_string()]
    );
}

#[test]
#[serial]
fn test_yaml_overrides_only_given_keys() {
    std::env::remove_var(ENDPOINT_ENV);
    let file = yaml_file("endpoint: http://localhost:8080/sek/\nignore_list:\n  - Generated\n");

    let config = load_config(Some(file.path()), None).expect("Should load");

    assert_eq!(config.endpoint, "http://localhost:8080/sek/");
    assert_eq!(config.ignore_list, vec!["Generated".to_string()]);
    assert_eq!(config.combined_output, PathBuf::from(DEFAULT_COMBINED_OUTPUT));
}

#[test]
#[serial]
fn test_empty_yaml_means_defaults() {
    std::env::remove_var(ENDPOINT_ENV);
    let file = yaml_file("");

    let config = load_config(Some(file.path()), None).expect("Should load");

    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_env_overrides_file_and_cli_overrides_env() {
    let file = yaml_file("endpoint: http://from-file/sek/\n");
    std::env::set_var(ENDPOINT_ENV, "http://from-env/sek/");

    let from_env = load_config(Some(file.path()), None).expect("Should load");
    let from_cli = load_config(Some(file.path()), Some("http://from-cli/sek/")).expect("Should load");

    std::env::remove_var(ENDPOINT_ENV);
    assert_eq!(from_env.endpoint, "http://from-env/sek/");
    assert_eq!(from_cli.endpoint, "http://from-cli/sek/");
}

#[test]
#[serial]
fn test_invalid_endpoint_is_rejected() {
    std::env::remove_var(ENDPOINT_ENV);

    let result = load_config(None, Some("::not a url::"));

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_malformed_yaml_is_rejected() {
    std::env::remove_var(ENDPOINT_ENV);
    let file = yaml_file("ignore_list: [unclosed\n");

    assert!(load_config(Some(file.path()), None).is_err());
}

#[test]
#[serial]
fn test_missing_config_file_is_rejected() {
    std::env::remove_var(ENDPOINT_ENV);

    assert!(load_config(Some(std::path::Path::new("/definitely/not/here.yaml")), None).is_err());
}
