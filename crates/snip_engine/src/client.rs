use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use snip_logging::{snip_debug, snip_warn};

use crate::{FailureKind, ShortenError, ShortenOutput};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/shorten";

/// Settings for the remote shortening endpoint.
///
/// No connect or request timeout is applied: a request that never answers
/// stays pending until the service responds or the connection drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenSettings {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for ShortenSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("snip/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// One-shot boundary to the remote shortening service. Implementations make a
/// single attempt per call; retrying means calling again.
#[async_trait::async_trait]
pub trait ShortenClient: Send + Sync {
    async fn shorten(&self, long_url: &str) -> Result<ShortenOutput, ShortenError>;
}

#[derive(Serialize)]
struct ShortenRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ShortenResponse {
    short_url: String,
    #[serde(default)]
    short_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestShortenClient {
    settings: ShortenSettings,
}

impl ReqwestShortenClient {
    pub fn new(settings: ShortenSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ShortenError> {
        reqwest::Client::builder()
            .user_agent(self.settings.user_agent.clone())
            .build()
            .map_err(|err| ShortenError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ShortenClient for ReqwestShortenClient {
    async fn shorten(&self, long_url: &str) -> Result<ShortenOutput, ShortenError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint).map_err(|err| {
            ShortenError::new(FailureKind::Network, format!("invalid endpoint: {err}"))
        })?;
        let client = self.build_client()?;
        let body = serde_json::to_vec(&ShortenRequest { url: long_url })
            .map_err(|err| ShortenError::new(FailureKind::Protocol, err.to_string()))?;

        snip_debug!("POST {} url_len={}", endpoint, long_url.len());
        let response = client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            snip_warn!("shorten request rejected with {}", status);
            return Err(ShortenError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        parse_response(&bytes)
    }
}

fn parse_response(bytes: &[u8]) -> Result<ShortenOutput, ShortenError> {
    let parsed: ShortenResponse = serde_json::from_slice(bytes).map_err(|err| {
        ShortenError::new(FailureKind::Protocol, format!("malformed response: {err}"))
    })?;
    if parsed.short_url.trim().is_empty() {
        return Err(ShortenError::new(
            FailureKind::Protocol,
            "response carries an empty short_url",
        ));
    }
    if let Some(code) = parsed.short_code.as_deref() {
        snip_debug!("service assigned code {}", code);
    }
    Ok(ShortenOutput {
        short_url: parsed.short_url,
        short_code: parsed.short_code,
    })
}

fn map_reqwest_error(err: reqwest::Error) -> ShortenError {
    ShortenError::new(FailureKind::Network, err.to_string())
}
