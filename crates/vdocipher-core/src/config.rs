//! Configuration module
//!
//! Holds the API credentials and playback defaults used by the client. A config
//! is immutable once a client has been built from it; the `with_*` methods return
//! a modified copy from which a new client can be constructed.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::error::VdoCipherError;
use crate::models::Watermark;

pub const DEFAULT_BASE_URL: &str = "https://dev.vdocipher.com/api";
pub const DEFAULT_OTP_TTL_SECS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, PartialEq)]
pub struct VdoCipherConfig {
    pub api_key: String,
    pub base_url: String,
    pub otp_ttl: u64,
    pub watermarks: Vec<Watermark>,
    pub timeout: Duration,
}

impl Debug for VdoCipherConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VdoCipherConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("otp_ttl", &self.otp_ttl)
            .field("watermarks", &self.watermarks)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl VdoCipherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            otp_ttl: DEFAULT_OTP_TTL_SECS,
            watermarks: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from the process environment (and `.env`, if present).
    ///
    /// Reads VDOCIPHER_API_KEY, VDOCIPHER_BASE_URL, VDOCIPHER_OTP_TTL,
    /// VDOCIPHER_WATERMARKS (a JSON array) and VDOCIPHER_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self, VdoCipherError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VdoCipherError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("VDOCIPHER_API_KEY").ok_or_else(|| {
            VdoCipherError::Config("Missing API key. Set VDOCIPHER_API_KEY".to_string())
        })?;

        let base_url = lookup("VDOCIPHER_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let otp_ttl = parse_secs(&lookup, "VDOCIPHER_OTP_TTL", DEFAULT_OTP_TTL_SECS)?;

        let watermarks = match lookup("VDOCIPHER_WATERMARKS") {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<Vec<Watermark>>(&raw)
                .map_err(|e| {
                    VdoCipherError::Config(format!(
                        "VDOCIPHER_WATERMARKS must be a JSON array of watermark objects: {}",
                        e
                    ))
                })?,
            _ => Vec::new(),
        };

        let timeout_secs = parse_secs(&lookup, "VDOCIPHER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        let config = Self {
            api_key,
            base_url: normalize_base_url(&base_url),
            otp_ttl,
            watermarks,
            timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VdoCipherError> {
        if self.api_key.trim().is_empty() {
            return Err(VdoCipherError::Config(
                "VDOCIPHER_API_KEY cannot be empty".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(VdoCipherError::Config(
                "VDOCIPHER_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            VdoCipherError::Config(format!("Invalid VdoCipher base URL {}: {}", self.base_url, e))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(VdoCipherError::Config(format!(
                "VdoCipher base URL cannot be a base: {}",
                self.base_url
            )));
        }

        Ok(())
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    pub fn with_watermarks(mut self, watermarks: Vec<Watermark>) -> Self {
        self.watermarks = watermarks;
        self
    }

    pub fn with_otp_ttl(mut self, otp_ttl: u64) -> Self {
        self.otp_ttl = otp_ttl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<u64, VdoCipherError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            VdoCipherError::Config(format!("{} must be a number of seconds, got '{}'", key, raw))
        }),
        None => Ok(default),
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
