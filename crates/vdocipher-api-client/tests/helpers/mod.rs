#![allow(dead_code)]

use mockito::{Server, ServerGuard};
use vdocipher_api_client::{ApiClient, VdoCipherConfig, Watermark};

pub const TEST_API_KEY: &str = "test-api-key";
pub const AUTH_HEADER: &str = "Apisecret test-api-key";

pub fn default_watermarks() -> Vec<Watermark> {
    vec![Watermark::running_text("Test Watermark")
        .with_alpha("0.5")
        .with_color("0xFFFFFF")
        .with_size("20")
        .with_interval("5000")]
}

pub fn test_config(base_url: &str) -> VdoCipherConfig {
    VdoCipherConfig::new(TEST_API_KEY)
        .with_base_url(base_url)
        .with_watermarks(default_watermarks())
}

/// Start a mock VdoCipher server and a client pointed at it.
pub async fn setup_test_client() -> (ServerGuard, ApiClient) {
    let server = Server::new_async().await;
    let client = ApiClient::new(test_config(&server.url())).expect("client builds");
    (server, client)
}
