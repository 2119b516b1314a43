//! Core types for batch conversion settings.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::utils::OutputFormat;

/// Default width outputs are resized to.
pub const DEFAULT_MAX_WIDTH: u32 = 1024;
/// Default encode quality for lossy formats.
pub const DEFAULT_QUALITY: u32 = 75;

/// Parameters for one batch invocation.
///
/// Created once by the caller and never mutated; every job of the batch
/// shares it. Checked by [`validate_request`](crate::utils::validate_request)
/// before any work is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    /// Directory tree to read images from
    pub input_root: PathBuf,
    /// Directory the mirrored output tree is written under
    pub output_root: PathBuf,
    /// Encoding of every output file
    #[serde(default)]
    pub format: OutputFormat,
    /// Width every output is resized to, in pixels
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    /// Encode quality (1-100); ignored by formats with no quality concept
    #[serde(default = "default_quality")]
    pub quality: u32,
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

fn default_quality() -> u32 {
    DEFAULT_QUALITY
}

impl ConversionRequest {
    /// Creates a request with the default format, width and quality.
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            format: OutputFormat::default(),
            max_width: DEFAULT_MAX_WIDTH,
            quality: DEFAULT_QUALITY,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }
}

/// Per-job encode parameters, copied out of the request into every [`FileJob`](crate::core::FileJob).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeSettings {
    pub format: OutputFormat,
    pub max_width: u32,
    pub quality: u32,
}

impl From<&ConversionRequest> for EncodeSettings {
    fn from(request: &ConversionRequest) -> Self {
        Self {
            format: request.format,
            max_width: request.max_width,
            quality: request.quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let request: ConversionRequest = serde_json::from_str(
            r#"{ "inputRoot": "/in", "outputRoot": "/out", "format": "jpeg" }"#,
        )
        .unwrap();

        assert_eq!(request.format, OutputFormat::JPEG);
        assert_eq!(request.max_width, DEFAULT_MAX_WIDTH);
        assert_eq!(request.quality, DEFAULT_QUALITY);
    }

    #[test]
    fn builder_overrides() {
        let request = ConversionRequest::new("/in", "/out")
            .with_format(OutputFormat::PNG)
            .with_max_width(300)
            .with_quality(90);

        let settings = EncodeSettings::from(&request);
        assert_eq!(settings.format, OutputFormat::PNG);
        assert_eq!(settings.max_width, 300);
        assert_eq!(settings.quality, 90);
    }
}
