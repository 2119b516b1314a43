// src/processing/codec/resize.rs

//! Color normalisation and width-driven resizing.

use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView};
use crate::utils::{ConvertError, ConvertResult};

type Result<T> = ConvertResult<T>;

/// Lanczos: this runs offline, so quality wins over speed.
const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Flattens `image` to plain 8-bit RGB unless it already is RGB8 or 8-bit gray.
///
/// Alpha is dropped, not composited against a background. Palette images are
/// expanded by the decoder and arrive here as RGB or RGBA.
pub fn normalize_color(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::Rgb8 | ColorType::L8 => image,
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}

/// Output dimensions for an `width`×`height` raster scaled to exactly `max_width`.
///
/// Height is `round(height * max_width / width)`, never below one pixel.
/// Narrower sources are upscaled too.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    let scale = f64::from(max_width) / f64::from(width);
    let new_height = (f64::from(height) * scale).round().max(1.0);
    (max_width, new_height as u32)
}

/// Resizes `image` so its width becomes `max_width`, preserving aspect ratio.
pub fn resize_to_width(image: &DynamicImage, max_width: u32) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ConvertError::processing(format!(
            "Cannot resize an empty {width}×{height} raster"
        )));
    }

    let (new_width, new_height) = target_dimensions(width, height, max_width);
    Ok(image.resize_exact(new_width, new_height, RESAMPLE_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};

    #[test]
    fn scales_height_with_rounding() {
        assert_eq!(target_dimensions(400, 300, 200), (200, 150));
        // 333 * 100 / 1000 = 33.3
        assert_eq!(target_dimensions(1000, 333, 100), (100, 33));
        // 335 * 100 / 1000 = 33.5
        assert_eq!(target_dimensions(1000, 335, 100), (100, 34));
    }

    #[test]
    fn upscales_narrow_sources() {
        assert_eq!(target_dimensions(50, 20, 200), (200, 80));
    }

    #[test]
    fn never_collapses_to_zero_height() {
        assert_eq!(target_dimensions(10_000, 1, 10), (10, 1));
    }

    #[test]
    fn drops_alpha_channel() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        assert_eq!(normalize_color(rgba).color(), ColorType::Rgb8);

        let rgb = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        assert_eq!(normalize_color(rgb).color(), ColorType::Rgb8);
    }

    #[test]
    fn resizes_to_exact_width() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(64, 48));
        let resized = resize_to_width(&image, 32).unwrap();
        assert_eq!(resized.dimensions(), (32, 24));
    }
}
