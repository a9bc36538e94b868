//! Domain methods for the VdoCipher API client.
//!
//! Video, player and analytics records are opaque to this crate and are returned
//! as `serde_json::Value`. Typed request models live in `vdocipher_core::models`.

use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tokio_util::io::ReaderStream;
use vdocipher_core::models::{
    analytics_otp_payload, upload_form_fields, AnalyticsQuery, ImportUrlRequest,
    OfflineOtpOptions, OtpOptions, UploadCredentials, UploadFile, UploadOutcome, VideoListQuery,
};
use vdocipher_core::VdoCipherError;

use crate::{ApiClient, Result};

/// Outcome of [`ApiClient::upload_video`]: the id reserved for the video plus
/// the upload result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedVideo {
    pub video_id: String,
    pub upload: UploadOutcome,
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

impl ApiClient {
    /// Get an OTP and playback info for streaming a video.
    pub async fn get_otp(&self, video_id: &str, options: &OtpOptions) -> Result<JsonValue> {
        let payload = options.payload(self.config().otp_ttl, &self.config().watermarks)?;
        self.post_json(&format!("/videos/{}/otp", segment(video_id)), &payload).await
    }

    /// Get an OTP for offline playback (persistent encrypted download).
    pub async fn get_offline_otp(
        &self,
        video_id: &str,
        options: &OfflineOtpOptions,
    ) -> Result<JsonValue> {
        let payload = options.payload()?;
        self.post_json(&format!("/videos/{}/otp", segment(video_id)), &payload).await
    }

    /// Get a video record with its playback OTP nested under `otp`.
    pub async fn get_video_details(
        &self,
        video_id: &str,
        options: &OtpOptions,
    ) -> Result<JsonValue> {
        let otp = self.get_otp(video_id, options).await?;
        let video = self.get_video(video_id).await?;

        let mut details: Map<String, JsonValue> = match video {
            JsonValue::Object(map) => map,
            _ => {
                return Err(VdoCipherError::UnexpectedResponse(
                    "video record is not an object".to_string(),
                ))
            }
        };
        details.insert("otp".to_string(), otp);

        Ok(JsonValue::Object(details))
    }

    /// Get a single video by ID.
    pub async fn get_video(&self, video_id: &str) -> Result<JsonValue> {
        self.get(&format!("/videos/{}", segment(video_id)), &[]).await
    }

    /// List videos with optional filters and pagination.
    pub async fn get_videos(&self, query: &VideoListQuery) -> Result<JsonValue> {
        self.get("/videos", &query.to_query()).await
    }

    /// Get metadata for a video.
    pub async fn get_metadata(&self, video_id: &str) -> Result<JsonValue> {
        self.get(&format!("/meta/{}", segment(video_id)), &[]).await
    }

    /// Delete a video. Returns `true` if the API answered with a 2xx status.
    pub async fn delete_video(&self, video_id: &str) -> Result<bool> {
        let deleted = self.delete("/videos", &[("videos", video_id.to_string())]).await?;
        if deleted {
            tracing::info!(video_id = %video_id, "Deleted VdoCipher video");
        }
        Ok(deleted)
    }

    /// Reserve a video and get the signed upload form for it.
    pub async fn get_video_credentials(
        &self,
        title: &str,
        folder_id: Option<&str>,
    ) -> Result<UploadCredentials> {
        let mut query = vec![("title", title.to_string())];
        if let Some(folder_id) = folder_id.filter(|f| !f.is_empty()) {
            query.push(("folderId", folder_id.to_string()));
        }
        self.put_query("/videos", &query).await
    }

    /// Post a file to an upload link obtained from [`Self::get_video_credentials`].
    ///
    /// The upload link is presigned, so no API secret is sent. Any `uploadLink`
    /// entry in `form_fields` is dropped. Non-201 answers are reported in the
    /// outcome rather than as errors.
    pub async fn upload_video_to_api(
        &self,
        upload_link: &str,
        form_fields: &Map<String, JsonValue>,
        file: &UploadFile,
    ) -> Result<UploadOutcome> {
        let handle = tokio::fs::File::open(&file.path).await?;
        let size = handle.metadata().await?.len();

        let mut form = Form::new();
        for (key, value) in upload_form_fields(form_fields) {
            form = form.text(key, value);
        }
        // The file must be the last part of a presigned POST form.
        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(handle)), size)
            .file_name(file.file_name())
            .mime_str(&file.content_type())?;
        form = form.part("file", part);

        tracing::debug!(
            upload_link = %upload_link,
            file_name = %file.file_name(),
            size = size,
            "Uploading video file"
        );

        let response = self.client().post(upload_link).multipart(form).send().await?;
        let status = response.status().as_u16();
        let raw = response.text().await?;
        let outcome = UploadOutcome::from_status(status, raw);

        if outcome.success {
            tracing::info!(status = status, size = size, "Video upload accepted");
        } else {
            tracing::warn!(status = status, body = %outcome.raw, "Video upload rejected");
        }

        Ok(outcome)
    }

    /// Reserve a video and upload a local file to it in one go.
    pub async fn upload_video(
        &self,
        title: &str,
        folder_id: Option<&str>,
        file: &UploadFile,
    ) -> Result<UploadedVideo> {
        let credentials = self.get_video_credentials(title, folder_id).await?;
        let upload_link = credentials.upload_link().ok_or_else(|| {
            VdoCipherError::UnexpectedResponse("credentials are missing uploadLink".to_string())
        })?;

        let upload = self
            .upload_video_to_api(upload_link, &credentials.client_payload, file)
            .await?;

        Ok(UploadedVideo {
            video_id: credentials.video_id,
            upload,
        })
    }

    /// Issue a viewer-tagged OTP so playback shows up in per-user analytics.
    ///
    /// Fails with [`VdoCipherError::InvalidUserId`] before any request is sent if
    /// `user_id` is not 1 to 36 letters, digits, `-` or `_`.
    pub async fn get_video_analytics(
        &self,
        video_id: &str,
        user_id: &str,
        ttl: Option<u64>,
    ) -> Result<JsonValue> {
        let payload = analytics_otp_payload(user_id, ttl, self.config().otp_ttl)?;
        self.post_json(&format!("/videos/{}/otp", segment(video_id)), &payload).await
    }

    /// Get aggregated playback analytics for a video over a date range.
    pub async fn get_playback_analytics(
        &self,
        video_id: &str,
        query: &AnalyticsQuery,
    ) -> Result<JsonValue> {
        self.get(
            &format!("/videos/{}/analytics", segment(video_id)),
            &query.to_query(),
        ).await
    }

    /// Import a video from an external URL.
    pub async fn import_video_from_url(
        &self,
        url: &str,
        folder_id: Option<&str>,
        title: Option<&str>,
    ) -> Result<JsonValue> {
        let request = ImportUrlRequest::new(url, folder_id, title)?;
        self.put_json("/videos/importUrl", &request).await
    }

    /// Create a player configuration.
    pub async fn create_player(&self, data: &JsonValue) -> Result<JsonValue> {
        self.post_json("/players", data).await
    }

    /// List player configurations.
    pub async fn list_players(&self) -> Result<JsonValue> {
        self.get("/players", &[]).await
    }

    /// Update a player configuration.
    pub async fn update_player(&self, player_id: &str, data: &JsonValue) -> Result<JsonValue> {
        self.put_json(&format!("/players/{}", segment(player_id)), data).await
    }
}
