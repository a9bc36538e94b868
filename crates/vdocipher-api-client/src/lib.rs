//! HTTP client for the VdoCipher API.
//!
//! Provides a client authenticated with `Authorization: Apisecret {key}`, generic
//! GET/POST/PUT/DELETE helpers that unwrap JSON responses, and domain methods
//! (OTP issuance, video listing, uploads, players, analytics) in [`api`].
//! The CLI uses this client directly.

pub mod api;

use anyhow::Context;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

pub use vdocipher_core::{VdoCipherConfig, VdoCipherError};

pub type Result<T> = std::result::Result<T, VdoCipherError>;

/// HTTP client for the VdoCipher API.
///
/// The configuration is fixed at construction. Build a new client to change the
/// API key, base URL or default watermarks.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: VdoCipherConfig,
}

impl ApiClient {
    pub fn new(config: VdoCipherConfig) -> Result<Self> {
        if config.timeout.is_zero() {
            return Err(VdoCipherError::Config(
                "request timeout must be greater than 0".to_string(),
            ));
        }
        let client = Client::builder().timeout(config.timeout).build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            config: VdoCipherConfig { base_url, ..config },
        })
    }

    /// Create client from environment: VDOCIPHER_API_KEY, VDOCIPHER_BASE_URL,
    /// VDOCIPHER_OTP_TTL, VDOCIPHER_WATERMARKS, VDOCIPHER_TIMEOUT_SECS.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = VdoCipherConfig::from_env().context("Invalid VdoCipher configuration")?;
        Self::new(config).context("Failed to create HTTP client")
    }

    pub fn config(&self) -> &VdoCipherConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Apisecret {}", self.config.api_key))
            .header(ACCEPT, "application/json")
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self.client.get(self.build_url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send("GET", path, request).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.post(self.build_url(path)).json(body);
        self.send("POST", path, request).await
    }

    /// PUT JSON body and deserialize response.
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.put(self.build_url(path)).json(body);
        self.send("PUT", path, request).await
    }

    /// PUT with query parameters and no body.
    pub async fn put_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self.client.put(self.build_url(path)).query(query);
        self.send("PUT", path, request).await
    }

    /// DELETE request. Returns whether the server answered with a 2xx status.
    pub async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<bool> {
        let mut request = self.client.delete(self.build_url(path));
        if !query.is_empty() {
            request = request.query(query);
        }

        tracing::debug!(method = "DELETE", path = %path, "Sending VdoCipher API request");
        let response = self.apply_auth(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                path = %path,
                "VdoCipher delete request was not successful"
            );
        }

        Ok(status.is_success())
    }

    /// Raw client for requests outside the API base URL (e.g. upload links).
    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        tracing::debug!(method = method, path = %path, "Sending VdoCipher API request");

        let response = self.apply_auth(request).send().await?;
        parse_response(response).await.inspect_err(|err| {
            tracing::warn!(
                method = method,
                path = %path,
                status = ?err.status(),
                error = %err,
                "VdoCipher API request failed"
            );
        })
    }
}

/// Unwrap a response: non-2xx becomes [`VdoCipherError::Api`], a body that is not
/// a JSON object or array becomes [`VdoCipherError::UnexpectedResponse`].
async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(VdoCipherError::from_response(status.as_u16(), &body));
    }

    let value: JsonValue = serde_json::from_str(&body).map_err(|e| {
        VdoCipherError::UnexpectedResponse(format!("body is not valid JSON: {}", e))
    })?;

    if !value.is_object() && !value.is_array() {
        return Err(VdoCipherError::UnexpectedResponse(
            "response is not an object or array".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        VdoCipherError::UnexpectedResponse(format!("unexpected response shape: {}", e))
    })
}

// Re-export request and response types for convenience.
pub use api::UploadedVideo;
pub use vdocipher_core::models::{
    AnalyticsQuery, OfflineOtpOptions, OtpOptions, UploadCredentials, UploadFile, UploadOutcome,
    VideoListQuery, Watermark, WatermarkSetting,
};
