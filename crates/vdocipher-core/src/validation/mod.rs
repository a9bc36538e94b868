//! Input validation run before a request is sent

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::error::VdoCipherError;

pub const MAX_USER_ID_LENGTH: usize = 36;

static USER_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,36}$").expect("user id pattern is a valid regex")
});

/// Viewer ids: 1 to 36 ASCII letters, digits, `-` or `_`.
pub fn validate_user_id(user_id: &str) -> Result<(), VdoCipherError> {
    if USER_ID_PATTERN.is_match(user_id) {
        Ok(())
    } else {
        Err(VdoCipherError::InvalidUserId(user_id.to_string()))
    }
}

/// Absolute URL with a non-empty host, any scheme.
///
/// Surrounding whitespace is rejected rather than trimmed, since the URL is sent as given.
pub fn validate_import_url(raw: &str) -> Result<Url, VdoCipherError> {
    if raw.trim() != raw {
        return Err(VdoCipherError::InvalidUrl(raw.to_string()));
    }

    let url = Url::parse(raw).map_err(|_| VdoCipherError::InvalidUrl(raw.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(VdoCipherError::InvalidUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_ids() {
        assert!(validate_user_id("user123").is_ok());
        assert!(validate_user_id("a").is_ok());
        assert!(validate_user_id("user_name-42").is_ok());
        assert!(validate_user_id(&"x".repeat(MAX_USER_ID_LENGTH)).is_ok());
    }

    #[test]
    fn test_invalid_user_ids() {
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id(&"x".repeat(MAX_USER_ID_LENGTH + 1)).is_err());
        assert!(validate_user_id("user id").is_err());
        assert!(validate_user_id("user@example.com").is_err());
        assert!(validate_user_id("ünïcode").is_err());
        assert!(validate_user_id("user\n").is_err());
    }

    #[test]
    fn test_valid_import_urls() {
        assert!(validate_import_url("https://example.com/video.mp4").is_ok());
        assert!(validate_import_url("http://cdn.example.com/a/b.mov?sig=1").is_ok());
        assert!(validate_import_url("ftp://files.example.com/video.mkv").is_ok());
        assert!(validate_import_url("sftp://files.example.com/v.mp4").is_ok());
        assert!(validate_import_url("s3://bucket/v.mp4").is_ok());
        assert!(validate_import_url("rtmp://host/live").is_ok());
    }

    #[test]
    fn test_invalid_import_urls() {
        assert!(validate_import_url("").is_err());
        assert!(validate_import_url("not a url").is_err());
        assert!(validate_import_url("example.com/video.mp4").is_err());
        assert!(validate_import_url("mailto:someone@example.com").is_err());
        assert!(validate_import_url("file:///etc/passwd").is_err());
        assert!(validate_import_url("  https://example.com/v.mp4\n").is_err());
        assert!(validate_import_url("https://example.com/v.mp4 ").is_err());

        let err = validate_import_url("::::").unwrap_err();
        assert!(err.is_validation());
    }
}
