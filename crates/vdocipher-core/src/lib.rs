//! VdoCipher Core Library
//!
//! This crate provides the configuration, error types, request models, and input
//! validation shared by the VdoCipher API client and CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{VdoCipherConfig, DEFAULT_BASE_URL, DEFAULT_OTP_TTL_SECS};
pub use error::{ErrorMetadata, VdoCipherError};
pub use models::{
    AnalyticsQuery, OfflineOtpOptions, OtpOptions, UploadCredentials, UploadFile, UploadOutcome,
    VideoListQuery, Watermark, WatermarkSetting,
};
