use anyhow::Context;
use serde_json::Value as JsonValue;
use vdocipher_api_client::{Watermark, WatermarkSetting};

/// Parse a JSON object argument (player settings and the like).
pub fn parse_json_object(raw: &str) -> anyhow::Result<JsonValue> {
    let value: JsonValue = serde_json::from_str(raw).context("Argument is not valid JSON")?;
    if !value.is_object() {
        return Err(anyhow::anyhow!("Expected a JSON object, got: {}", raw));
    }
    Ok(value)
}

/// Parse a JSON array of watermark objects.
pub fn parse_watermarks(raw: &str) -> anyhow::Result<Vec<Watermark>> {
    serde_json::from_str(raw).context("Watermarks must be a JSON array of watermark objects")
}

/// Resolve `--no-watermarks` / `--watermarks` into a setting.
pub fn watermark_setting(disabled: bool, custom: Option<&str>) -> anyhow::Result<WatermarkSetting> {
    match (disabled, custom) {
        (true, Some(_)) => Err(anyhow::anyhow!(
            "--no-watermarks and --watermarks cannot be used together"
        )),
        (true, None) => Ok(WatermarkSetting::Disabled),
        (false, Some(raw)) => Ok(WatermarkSetting::Custom(parse_watermarks(raw)?)),
        (false, None) => Ok(WatermarkSetting::Default),
    }
}


/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
