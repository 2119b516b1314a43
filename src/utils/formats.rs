use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use crate::utils::{ConvertError, lowercase_file_name};

/// Extensions (lowercase, without the dot) recognized as convertible input.
pub const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff"];

/// Encoding a batch can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    WebP,
    JPEG,
    PNG,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [Self::WebP, Self::JPEG, Self::PNG];

    /// Canonical extension written for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::WebP => "webp",
            Self::JPEG => "jpeg",
            Self::PNG => "png",
        }
    }

    /// Whether the encoder honours a quality setting
    pub fn is_lossy(&self) -> bool {
        !matches!(self, Self::PNG)
    }

    pub fn as_image_format(&self) -> image::ImageFormat {
        match self {
            Self::WebP => image::ImageFormat::WebP,
            Self::JPEG => image::ImageFormat::Jpeg,
            Self::PNG => image::ImageFormat::Png,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('.').to_lowercase();
        match s.as_str() {
            "webp" => Ok(Self::WebP),
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            _ => Err(ConvertError::format(format!(
                "Unsupported output format: {s}"
            ))),
        }
    }
}

/// Returns `true` when the file name ends in `.` plus one of
/// [`INPUT_EXTENSIONS`], ignoring case. A bare `.png` qualifies.
pub fn is_supported_input(path: &Path) -> bool {
    lowercase_file_name(path).is_some_and(|name| {
        INPUT_EXTENSIONS.iter().any(|ext| {
            name.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.'))
        })
    })
}
