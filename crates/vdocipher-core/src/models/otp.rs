use serde_json::{json, Map, Value as JsonValue};

use super::watermark::{Watermark, WatermarkSetting};
use crate::error::VdoCipherError;
use crate::validation::validate_user_id;

/// Rental duration for offline playback when none is given: 15 days.
pub const DEFAULT_RENTAL_DURATION_SECS: u64 = 1_296_000;

/// Options for a streaming playback OTP.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OtpOptions {
    /// Token lifetime in seconds; falls back to the configured TTL
    pub ttl: Option<u64>,
    pub user_id: Option<String>,
    pub watermarks: WatermarkSetting,
}

impl OtpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn without_watermarks(mut self) -> Self {
        self.watermarks = WatermarkSetting::Disabled;
        self
    }

    pub fn watermarks(mut self, watermarks: Vec<Watermark>) -> Self {
        self.watermarks = WatermarkSetting::Custom(watermarks);
        self
    }

    /// Request body for `POST /videos/{id}/otp`.
    ///
    /// Watermarks go into `annotate` as a JSON-encoded string.
    pub fn payload(
        &self,
        default_ttl: u64,
        default_watermarks: &[Watermark],
    ) -> Result<Map<String, JsonValue>, VdoCipherError> {
        let mut payload = Map::new();
        payload.insert("ttl".to_string(), json!(self.ttl.unwrap_or(default_ttl)));

        if let Some(user_id) = &self.user_id {
            payload.insert("userId".to_string(), json!(user_id));
        }

        if let Some(watermarks) = self.watermarks.resolve(default_watermarks) {
            let annotate = serde_json::to_string(watermarks).map_err(VdoCipherError::Encode)?;
            payload.insert("annotate".to_string(), JsonValue::String(annotate));
        }

        Ok(payload)
    }
}

/// Options for an offline (persistent download) OTP.
#[derive(Debug, Clone, PartialEq)]
pub struct OfflineOtpOptions {
    pub rental_duration: u64,
    pub ttl: Option<u64>,
    pub user_id: Option<String>,
    pub watermarks: Option<Vec<Watermark>>,
}

impl Default for OfflineOtpOptions {
    fn default() -> Self {
        Self {
            rental_duration: DEFAULT_RENTAL_DURATION_SECS,
            ttl: None,
            user_id: None,
            watermarks: None,
        }
    }
}

impl OfflineOtpOptions {
    pub fn new(rental_duration: u64) -> Self {
        Self {
            rental_duration,
            ..Self::default()
        }
    }

    pub fn ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn watermarks(mut self, watermarks: Vec<Watermark>) -> Self {
        self.watermarks = Some(watermarks);
        self
    }

    /// Request body for an offline OTP.
    ///
    /// `licenseRules` is itself a JSON-encoded string. No TTL is sent unless set,
    /// and watermarks are passed through as a list under `watermark`.
    pub fn payload(&self) -> Result<Map<String, JsonValue>, VdoCipherError> {
        let license_rules = serde_json::to_string(&json!({
            "canPersist": true,
            "rentalDuration": self.rental_duration,
        }))
        .map_err(VdoCipherError::Encode)?;

        let mut payload = Map::new();
        payload.insert("licenseRules".to_string(), JsonValue::String(license_rules));

        if let Some(ttl) = self.ttl {
            payload.insert("ttl".to_string(), json!(ttl));
        }

        if let Some(user_id) = &self.user_id {
            payload.insert("userId".to_string(), json!(user_id));
        }

        if let Some(watermarks) = &self.watermarks {
            let value = serde_json::to_value(watermarks).map_err(VdoCipherError::Encode)?;
            payload.insert("watermark".to_string(), value);
        }

        Ok(payload)
    }
}

/// Request body for a viewer-tagged OTP used for analytics.
///
/// The user id is validated before anything is built.
pub fn analytics_otp_payload(
    user_id: &str,
    ttl: Option<u64>,
    default_ttl: u64,
) -> Result<Map<String, JsonValue>, VdoCipherError> {
    validate_user_id(user_id)?;

    let mut payload = Map::new();
    payload.insert("ttl".to_string(), json!(ttl.unwrap_or(default_ttl)));
    payload.insert("userId".to_string(), json!(user_id));
    Ok(payload)
}
