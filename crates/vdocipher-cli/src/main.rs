//! VdoCipher CLI: command-line client for the VdoCipher API.
//!
//! Set VDOCIPHER_API_KEY (and optionally VDOCIPHER_BASE_URL, VDOCIPHER_OTP_TTL,
//! VDOCIPHER_WATERMARKS). A `.env` file in the working directory is honoured.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use vdocipher_api_client::{
    AnalyticsQuery, ApiClient, OfflineOtpOptions, OtpOptions, UploadFile, VideoListQuery,
};
use vdocipher_cli::{init_tracing, parse_json_object, parse_watermarks, watermark_setting};

#[derive(Parser)]
#[command(name = "vdocipher", about = "VdoCipher API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a playback OTP for a video
    Otp {
        /// Video ID
        video_id: String,
        #[command(flatten)]
        otp: OtpArgs,
    },
    /// Get an OTP for offline (downloaded) playback
    OfflineOtp {
        /// Video ID
        video_id: String,
        /// Rental duration in seconds
        #[arg(long, default_value = "1296000")]
        rental_duration: u64,
        /// OTP lifetime in seconds
        #[arg(long)]
        ttl: Option<u64>,
        /// Viewer ID to attach to the session
        #[arg(long)]
        user_id: Option<String>,
        /// Watermarks as a JSON array
        #[arg(long)]
        watermarks: Option<String>,
    },
    /// Get a single video by ID
    Video {
        /// Video ID
        video_id: String,
    },
    /// Get a video together with a playback OTP
    Details {
        /// Video ID
        video_id: String,
        #[command(flatten)]
        otp: OtpArgs,
    },
    /// List videos with optional filters and pagination
    List {
        /// Page number
        #[arg(long)]
        page: Option<u32>,
        /// Videos per page (max 100)
        #[arg(long)]
        limit: Option<u32>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Search on video ID or title
        #[arg(long)]
        q: Option<String>,
        /// Folder ID ("root" for top-level)
        #[arg(long)]
        folder_id: Option<String>,
    },
    /// Get video metadata
    Meta {
        /// Video ID
        video_id: String,
    },
    /// Delete a video by ID
    Delete {
        /// Video ID
        video_id: String,
    },
    /// Reserve a video and print its upload credentials
    Credentials {
        /// Video title
        title: String,
        /// Folder ID
        #[arg(long)]
        folder_id: Option<String>,
    },
    /// Upload a local video file
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Video title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        /// Folder ID
        #[arg(long)]
        folder_id: Option<String>,
        /// Content type of the file (guessed from the extension otherwise)
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Issue a viewer-tagged OTP for analytics
    Analytics {
        /// Video ID
        video_id: String,
        /// Viewer ID (max 36 chars: letters, digits, - or _)
        #[arg(long)]
        user_id: String,
        /// OTP lifetime in seconds
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Get playback analytics for a date range
    Stats {
        /// Video ID
        video_id: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Import a video from a remote URL
    Import {
        /// Source URL
        url: String,
        /// Folder ID
        #[arg(long)]
        folder_id: Option<String>,
        /// Video title
        #[arg(long)]
        title: Option<String>,
    },
    /// Player operations
    Player {
        #[command(subcommand)]
        sub: PlayerCommands,
    },
}

#[derive(clap::Args)]
struct OtpArgs {
    /// OTP lifetime in seconds (defaults to VDOCIPHER_OTP_TTL)
    #[arg(long)]
    ttl: Option<u64>,
    /// Viewer ID to attach to the session
    #[arg(long)]
    user_id: Option<String>,
    /// Send no watermark
    #[arg(long)]
    no_watermarks: bool,
    /// Watermarks as a JSON array, replacing the configured ones
    #[arg(long)]
    watermarks: Option<String>,
}

impl OtpArgs {
    fn into_options(self) -> anyhow::Result<OtpOptions> {
        Ok(OtpOptions {
            ttl: self.ttl,
            user_id: self.user_id,
            watermarks: watermark_setting(self.no_watermarks, self.watermarks.as_deref())?,
        })
    }
}

#[derive(Subcommand)]
enum PlayerCommands {
    /// Create a player from JSON settings
    Create {
        /// Player settings as a JSON object
        #[arg(long)]
        data: String,
    },
    /// List players
    List,
    /// Update a player from JSON settings
    Update {
        /// Player ID
        player_id: String,
        /// Player settings as a JSON object
        #[arg(long)]
        data: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = ApiClient::from_env()
        .context("Failed to create API client. Set VDOCIPHER_API_KEY")?;

    match cli.command {
        Commands::Otp { video_id, otp } => {
            let response = client.get_otp(&video_id, &otp.into_options()?).await?;
            print_json(&response)?;
        }
        Commands::OfflineOtp {
            video_id,
            rental_duration,
            ttl,
            user_id,
            watermarks,
        } => {
            let options = OfflineOtpOptions {
                rental_duration,
                ttl,
                user_id,
                watermarks: watermarks.as_deref().map(parse_watermarks).transpose()?,
            };
            let response = client.get_offline_otp(&video_id, &options).await?;
            print_json(&response)?;
        }
        Commands::Video { video_id } => {
            let response = client.get_video(&video_id).await?;
            print_json(&response)?;
        }
        Commands::Details { video_id, otp } => {
            let response = client.get_video_details(&video_id, &otp.into_options()?).await?;
            print_json(&response)?;
        }
        Commands::List {
            page,
            limit,
            tags,
            q,
            folder_id,
        } => {
            let query = VideoListQuery {
                page,
                limit,
                tags,
                q,
                folder_id,
            };
            let response = client.get_videos(&query).await?;
            print_json(&response)?;
        }
        Commands::Meta { video_id } => {
            let response = client.get_metadata(&video_id).await?;
            print_json(&response)?;
        }
        Commands::Delete { video_id } => {
            let deleted = client.delete_video(&video_id).await?;
            print_json(&serde_json::json!({ "success": deleted, "videoId": video_id }))?;
            if !deleted {
                return Err(anyhow::anyhow!("Video {} was not deleted", video_id));
            }
        }
        Commands::Credentials { title, folder_id } => {
            let response = client.get_video_credentials(&title, folder_id.as_deref()).await?;
            print_json(&response)?;
        }
        Commands::Upload {
            file,
            title,
            folder_id,
            content_type,
        } => {
            let mut upload = UploadFile::from_path(&file);
            if let Some(content_type) = content_type {
                upload = upload.with_content_type(content_type);
            }
            let title = title.unwrap_or_else(|| upload.file_name());

            tracing::info!(file = %file.display(), title = %title, "Uploading video");
            let response = client.upload_video(&title, folder_id.as_deref(), &upload).await?;
            print_json(&response)?;
            if !response.upload.success {
                return Err(anyhow::anyhow!(
                    "Upload failed with status {}",
                    response.upload.status
                ));
            }
        }
        Commands::Analytics {
            video_id,
            user_id,
            ttl,
        } => {
            let response = client.get_video_analytics(&video_id, &user_id, ttl).await?;
            print_json(&response)?;
        }
        Commands::Stats {
            video_id,
            start_date,
            end_date,
        } => {
            let query = AnalyticsQuery {
                start_date,
                end_date,
            };
            let response = client.get_playback_analytics(&video_id, &query).await?;
            print_json(&response)?;
        }
        Commands::Import {
            url,
            folder_id,
            title,
        } => {
            let response = client
                .import_video_from_url(&url, folder_id.as_deref(), title.as_deref())
                .await?;
            print_json(&response)?;
        }
        Commands::Player { sub } => match sub {
            PlayerCommands::Create { data } => {
                let response = client.create_player(&parse_json_object(&data)?).await?;
                print_json(&response)?;
            }
            PlayerCommands::List => {
                let response = client.list_players().await?;
                print_json(&response)?;
            }
            PlayerCommands::Update { player_id, data } => {
                let response = client.update_player(&player_id, &parse_json_object(&data)?).await?;
                print_json(&response)?;
            }
        },
    }

    Ok(())
}
