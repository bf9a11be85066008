use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::GenerateRequest;
use tracing::debug;
use url::Url;

pub mod wire;

use wire::{GenerateContentBody, GenerateContentResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The generative information service: a prompt in, text (or schema-conformant
/// JSON text) out.
#[async_trait]
pub trait InformationService: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}

pub struct MissingInformationService;

#[async_trait]
impl InformationService for MissingInformationService {
    async fn generate(&self, _request: GenerateRequest) -> Result<String> {
        Err(anyhow!("information service is unavailable"))
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl ServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

pub struct HttpInformationService {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpInformationService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(anyhow!("information service API key is empty"));
        }
        let endpoint = generate_content_endpoint(&config.base_url, &config.model)?;
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build information service HTTP client")?;
        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl InformationService for HttpInformationService {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let expects_json = request.expects_json();
        let body = GenerateContentBody::from(request);
        debug!(
            "info_service: sending generateContent endpoint={} expects_json={expects_json}",
            self.endpoint.path()
        );

        let res = self
            .http
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .context("information service request failed")?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(anyhow!(
                "information service returned {status}: {}",
                detail.trim()
            ));
        }

        let response: GenerateContentResponse = res
            .json()
            .await
            .context("information service returned an unreadable body")?;
        response
            .first_text()
            .ok_or_else(|| anyhow!("information service response carried no text"))
    }
}

fn generate_content_endpoint(base_url: &str, model: &str) -> Result<Url> {
    let model = model.trim();
    if model.is_empty() {
        return Err(anyhow!("information service model name is empty"));
    }

    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = Url::parse(&base)
        .with_context(|| format!("invalid information service base url '{base_url}'"))?;
    base.join(&format!("v1beta/models/{model}:generateContent"))
        .with_context(|| format!("invalid information service model '{model}'"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
