//! Blocking HTTP client for the SenseV gateway API.

use std::path::Path;

use reqwest::blocking::RequestBuilder;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::Span;
use url::Url;

use crate::{
    config::{ApiConfig, ConfigError},
    errors::HttpError,
    Error,
};

/// Basic-auth password paired with the token. The gateway only checks the username.
const AUTH_PASSWORD: &str = "x";

/// Longest body preview written to the debug log, in characters.
const PREVIEW_CHARS: usize = 200;

/// Marker appended to a cut preview. Counts toward [`PREVIEW_CHARS`].
const TRUNCATION_MARKER: &str = "...[truncated]";

const USER_AGENT: &str = concat!("sensev-api/", env!("CARGO_PKG_VERSION"));

/// HTTP client for a SenseV gateway.
///
/// Holds only connection settings. Every call builds a fresh blocking
/// `reqwest` client, authenticates with the token as basic-auth username, and
/// fails with [`Error::Http`] on any status the operation does not accept.
/// Nothing is retried.
#[derive(Debug, Clone)]
pub struct Client {
    config: ApiConfig,
    span: Span,
}

impl Client {
    /// Creates a client for the gateway at `host:port`.
    pub fn new(token: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self::from_config(ApiConfig {
            token: token.into(),
            host: host.into(),
            port,
        })
    }

    /// Creates a client for `localhost:5000`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::from_config(ApiConfig {
            token: token.into(),
            ..ApiConfig::default()
        })
    }

    /// Creates a client from already-loaded settings.
    pub fn from_config(config: ApiConfig) -> Self {
        let span = tracing::info_span!("sensev_api", host = %config.host, port = config.port);
        Self { config, span }
    }

    /// Creates a client from the `api` section of a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ApiConfig::from_file(path).map(Self::from_config)
    }

    /// Replaces the span that request logs are recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Token sent as the basic-auth username.
    pub fn token(&self) -> &str {
        &self.config.token
    }

    /// Gateway host name or address.
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Gateway port.
    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// Settings this client was built from.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `http://{host}:{port}`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.config.host, self.config.port)
    }

    /// Builds the full URL for `endpoint`.
    ///
    /// A single leading `/` is dropped, so `/readings/` and `readings/`
    /// address the same resource.
    pub fn url_for(&self, endpoint: &str) -> Result<Url, Error> {
        let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
        Url::parse(&format!("{}/{}", self.base_url(), endpoint)).map_err(|e| {
            tracing::error!("Invalid URL constructed for {:?}: {}", endpoint, e);
            Error::InvalidUrl(e)
        })
    }

    /// Fetches `endpoint` and returns the JSON body. Only 200 is accepted.
    pub fn get(&self, endpoint: &str) -> Result<Value, Error> {
        self.fetch(endpoint)
    }

    /// Typed form of [`Client::get`].
    pub fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        let _guard = self.span.enter();
        let url = self.url_for(endpoint)?;
        tracing::info!("Requesting data from {}", url);

        let http = http_client()?;
        let body = self.execute(http.get(url), &[StatusCode::OK])?;
        let parsed = parse_body(&body)?;

        tracing::info!("Data requested successfully.");
        tracing::debug!("{}", truncate_body(&body));
        Ok(parsed)
    }

    /// Posts `body` as JSON to `endpoint` and returns the JSON response.
    /// 200 and 201 are accepted.
    pub fn post<B>(&self, endpoint: &str, body: &B) -> Result<Value, Error>
    where
        B: Serialize + ?Sized,
    {
        self.send(endpoint, body)
    }

    /// Typed form of [`Client::post`].
    pub fn send<B, T>(&self, endpoint: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let _guard = self.span.enter();
        let url = self.url_for(endpoint)?;
        tracing::info!("Posting data to {}", url);

        let payload = serde_json::to_vec(body).map_err(|e| {
            tracing::error!("Failed to serialize request body: {}", e);
            Error::Encode(e)
        })?;
        let http = http_client()?;
        let request = http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload);
        let text = self.execute(request, &[StatusCode::OK, StatusCode::CREATED])?;
        let parsed = parse_body(&text)?;

        tracing::info!("Data posted successfully.");
        tracing::debug!("{}", truncate_body(&text));
        Ok(parsed)
    }

    /// Sends an authenticated request and returns the body text when the
    /// status is one of `accepted`.
    fn execute(&self, request: RequestBuilder, accepted: &[StatusCode]) -> Result<String, Error> {
        let resp = request
            .basic_auth(&self.config.token, Some(AUTH_PASSWORD))
            .send()
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                Error::Transport(e)
            })?;

        let status = resp.status();
        let body = resp.text().map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e)
        })?;

        if !accepted.contains(&status) {
            tracing::error!(
                "Request failed with status {}: {}",
                status,
                truncate_body(&body)
            );
            return Err(HttpError::with_code(body, status.as_u16()).into());
        }

        Ok(body)
    }
}

fn http_client() -> Result<reqwest::blocking::Client, Error> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::Transport(e)
        })
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(body));
        Error::Decode(e)
    })
}

/// Cuts `body` down to at most [`PREVIEW_CHARS`] characters for logging,
/// marker included.
fn truncate_body(body: &str) -> String {
    if body.chars().count() <= PREVIEW_CHARS {
        return body.to_string();
    }
    let keep = PREVIEW_CHARS - TRUNCATION_MARKER.chars().count();
    let idx = body
        .char_indices()
        .nth(keep)
        .map_or(body.len(), |(idx, _)| idx);
    format!("{}{}", &body[..idx], TRUNCATION_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new("secret_token", "localhost", 5000)
    }

    #[test]
    fn defaults_match_config_defaults() {
        let client = Client::with_token("secret_token");
        assert_eq!(client.token(), "secret_token");
        assert_eq!(client.host(), "localhost");
        assert_eq!(client.port(), 5000);
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn leading_slash_is_stripped_once() {
        let with_slash = client().url_for("/readings/").unwrap();
        let without_slash = client().url_for("readings/").unwrap();
        assert_eq!(with_slash.as_str(), "http://localhost:5000/readings/");
        assert_eq!(with_slash, without_slash);
    }

    #[test]
    fn nested_endpoint_is_kept_intact() {
        let url = client().url_for("/sensors/42/readings").unwrap();
        assert_eq!(url.path(), "/sensors/42/readings");
    }

    #[test]
    fn single_slash_endpoint_is_root() {
        let url = client().url_for("/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/");
        assert_eq!(client().url_for("").unwrap(), url);
    }

    #[test]
    fn only_one_leading_slash_is_removed() {
        let url = client().url_for("//readings").unwrap();
        assert_eq!(url.path(), "//readings");
    }

    #[test]
    fn query_string_survives() {
        let url = client().url_for("/readings/?limit=10").unwrap();
        assert_eq!(url.path(), "/readings/");
        assert_eq!(url.query(), Some("limit=10"));
    }

    #[test]
    fn invalid_host_is_rejected() {
        let client = Client::new("t", "bad host", 5000);
        let err = client.url_for("/readings/").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn short_body_is_not_truncated() {
        assert_eq!(truncate_body("{\"reading\":\"ok\"}"), "{\"reading\":\"ok\"}");
    }

    #[test]
    fn long_body_is_truncated_to_preview() {
        let body = "a".repeat(500);
        let preview = truncate_body(&body);
        assert!(preview.chars().count() <= 200);
        assert!(preview.ends_with("...[truncated]"));
        assert!(preview.starts_with(&"a".repeat(186)));
    }

    #[test]
    fn body_of_exactly_preview_length_is_kept() {
        let body = "b".repeat(200);
        assert_eq!(truncate_body(&body), body);
        assert_eq!(truncate_body(&"b".repeat(201)).chars().count(), 200);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "é".repeat(300);
        let preview = truncate_body(&body);
        assert!(preview.chars().count() <= 200);
        assert_eq!(preview.chars().filter(|c| *c == 'é').count(), 186);
    }
}
