// src/processing/codec/formats.rs

//! Maps an [`OutputFormat`] and quality to the matching encoder.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::DynamicImage;
use crate::utils::{ConvertError, ConvertResult, OutputFormat};

type Result<T> = ConvertResult<T>;

/// Encodes `image` into the bytes of an `format` file.
///
/// `quality` (1-100) drives the lossy encoders and is ignored for PNG.
pub fn encode(image: &DynamicImage, format: OutputFormat, quality: u32) -> Result<Vec<u8>> {
    match format {
        OutputFormat::JPEG => encode_jpeg(image, quality),
        OutputFormat::PNG => encode_png(image),
        OutputFormat::WebP => encode_webp(image, quality),
    }
}

/// Baseline JPEG at the requested quality.
fn encode_jpeg(image: &DynamicImage, quality: u32) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, clamp_quality(quality));
    image
        .write_with_encoder(encoder)
        .map_err(|e| ConvertError::processing(format!("JPEG encode failed: {e}")))?;
    Ok(bytes)
}

/// Lossless PNG with the slowest, smallest compression settings.
fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, PngFilterType::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(|e| ConvertError::processing(format!("PNG encode failed: {e}")))?;
    Ok(bytes)
}

/// Lossy WebP through libwebp.
fn encode_webp(image: &DynamicImage, quality: u32) -> Result<Vec<u8>> {
    // libwebp only accepts 8-bit RGB(A) buffers.
    let rgb;
    let source = match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other => {
            rgb = DynamicImage::ImageRgb8(other.to_rgb8());
            &rgb
        }
    };

    let encoder = webp::Encoder::from_image(source)
        .map_err(|e| ConvertError::processing(format!("WebP encode failed: {e}")))?;
    let memory = encoder.encode(f32::from(clamp_quality(quality)));
    Ok(memory.to_vec())
}

fn clamp_quality(quality: u32) -> u8 {
    quality.clamp(1, 100) as u8
}
