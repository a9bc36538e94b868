use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::{Path, PathBuf};

use crate::error::VdoCipherError;
use crate::validation::validate_import_url;

/// Filters and pagination for `GET /videos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    pub page: Option<u32>,
    /// Videos per page (server default 20, max 100)
    pub limit: Option<u32>,
    /// Comma-separated, case-sensitive tag filter
    pub tags: Option<String>,
    /// Search on video id or title
    pub q: Option<String>,
    /// Folder to list; "root" for top-level
    pub folder_id: Option<String>,
}

impl VideoListQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(tags) = &self.tags {
            query.push(("tags", tags.clone()));
        }
        if let Some(q) = &self.q {
            query.push(("q", q.clone()));
        }
        if let Some(folder_id) = &self.folder_id {
            query.push(("folderId", folder_id.clone()));
        }
        query
    }
}

/// Body of `PUT /videos/importUrl`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportUrlRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ImportUrlRequest {
    /// Validates the URL; empty folder ids and titles are dropped.
    pub fn new(
        url: &str,
        folder_id: Option<&str>,
        title: Option<&str>,
    ) -> Result<Self, VdoCipherError> {
        validate_import_url(url)?;

        Ok(Self {
            url: url.to_string(),
            folder_id: folder_id.filter(|s| !s.is_empty()).map(str::to_string),
            title: title.filter(|s| !s.is_empty()).map(str::to_string),
        })
    }
}

/// Upload slot returned by `PUT /videos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCredentials {
    /// Signed form fields plus `uploadLink`
    pub client_payload: Map<String, JsonValue>,
    pub video_id: String,
}

impl UploadCredentials {
    pub fn upload_link(&self) -> Option<&str> {
        self.client_payload
            .get("uploadLink")
            .and_then(|link| link.as_str())
    }

    /// Form fields to post alongside the file, without `uploadLink`.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        upload_form_fields(&self.client_payload)
    }
}

/// Flatten a client payload into multipart text fields, dropping `uploadLink`.
pub fn upload_form_fields(payload: &Map<String, JsonValue>) -> Vec<(String, String)> {
    payload
        .iter()
        .filter(|(key, _)| key.as_str() != "uploadLink")
        .map(|(key, value)| {
            let value = match value {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// A local video file to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl UploadFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_name: None,
            content_type: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Name reported to the upload endpoint; defaults to the path's file name.
    pub fn file_name(&self) -> String {
        self.file_name.clone().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("video.mp4")
                .to_string()
        })
    }

    /// Content type of the file part; guessed from the extension when not set.
    pub fn content_type(&self) -> String {
        self.content_type
            .clone()
            .unwrap_or_else(|| content_type_for(&self.path).to_string())
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}

/// Result of posting a file to the upload link.
///
/// Only HTTP 201 counts as success; the raw body is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub success: bool,
    pub status: u16,
    pub raw: String,
}

impl UploadOutcome {
    pub fn from_status(status: u16, raw: String) -> Self {
        Self {
            success: status == 201,
            status,
            raw,
        }
    }
}
