pub mod analytics;
pub mod otp;
pub mod video;
pub mod watermark;

pub use analytics::AnalyticsQuery;
pub use otp::{
    analytics_otp_payload, OfflineOtpOptions, OtpOptions, DEFAULT_RENTAL_DURATION_SECS,
};
pub use video::{
    upload_form_fields, ImportUrlRequest, UploadCredentials, UploadFile, UploadOutcome,
    VideoListQuery,
};
pub use watermark::{Watermark, WatermarkSetting};
