use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Overlay burned into video playback.
///
/// Known keys are typed; anything else the player accepts is kept in `extra` and
/// serialized back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watermark {
    /// Watermark type, e.g. `rtext` for running text or `text` for static text
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Opacity between 0.0 and 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<JsonValue>,
    /// Hex color, e.g. `0xFFFFFF`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<JsonValue>,
    /// Milliseconds between position changes (running text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<JsonValue>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Watermark {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: Some(text.into()),
            alpha: None,
            color: None,
            size: None,
            interval: None,
            extra: Map::new(),
        }
    }

    /// Running text that moves across the player.
    pub fn running_text(text: impl Into<String>) -> Self {
        Self::new("rtext", text)
    }

    pub fn with_alpha(mut self, alpha: impl Into<JsonValue>) -> Self {
        self.alpha = Some(alpha.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<JsonValue>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_interval(mut self, interval: impl Into<JsonValue>) -> Self {
        self.interval = Some(interval.into());
        self
    }
}

/// Which watermarks to attach to an OTP request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WatermarkSetting {
    /// Use the watermarks from the client configuration
    #[default]
    Default,
    /// Send no watermark at all
    Disabled,
    /// Replace the configured watermarks for this request
    Custom(Vec<Watermark>),
}

impl WatermarkSetting {
    /// Effective watermark list, or `None` when nothing should be sent.
    pub fn resolve<'a>(&'a self, defaults: &'a [Watermark]) -> Option<&'a [Watermark]> {
        let watermarks = match self {
            WatermarkSetting::Default => defaults,
            WatermarkSetting::Disabled => return None,
            WatermarkSetting::Custom(custom) => custom.as_slice(),
        };

        if watermarks.is_empty() {
            None
        } else {
            Some(watermarks)
        }
    }
}
