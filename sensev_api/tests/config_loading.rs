use sensev_api::{ApiConfig, Client, ConfigError};

fn fixture(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

#[test]
fn from_file_reads_api_section() {
    let client = Client::from_file(fixture("full.yml")).unwrap();
    assert_eq!(client.token(), "fixture-token");
    assert_eq!(client.host(), "gateway.plant.local");
    assert_eq!(client.port(), 8081);
    assert_eq!(client.base_url(), "http://gateway.plant.local:8081");
}

#[test]
fn from_file_token_only_uses_defaults() {
    let config = ApiConfig::from_file(fixture("token_only.yml")).unwrap();
    assert_eq!(config.token, "fixture-token");
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 5000);
}

#[test]
fn from_file_missing_api_key() {
    let result = Client::from_file(fixture("missing_api.yml"));
    assert!(matches!(result, Err(ConfigError::MissingApiSection)));
}

#[test]
fn from_file_nonexistent_path() {
    let result = Client::from_file(fixture("does_not_exist.yml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}
