use std::path::Path;

use anyhow::Context;
use image::{GenericImageView as _, imageops::FilterType};

use crate::{
    assets::data_uri::format_data_uri,
    foundation::error::{CardError, CardResult},
};

/// Largest raster surface (in pixels) the codec will allocate for re-encoding.
pub const MAX_SURFACE_PIXELS: u64 = 64 * 1024 * 1024;

/// Options for [`encode_image`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageCodecOpts {
    /// Lossy re-encode quality in `[0, 1]`.
    pub quality: f32,
    /// Upper bound for the longer side of the output, in pixels.
    pub max_dimension: u32,
}

impl Default for ImageCodecOpts {
    fn default() -> Self {
        Self {
            quality: 0.7,
            max_dimension: 800,
        }
    }
}

impl ImageCodecOpts {
    pub fn validate(&self) -> CardResult<()> {
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(CardError::validation("image quality must be within [0, 1]"));
        }
        if self.max_dimension == 0 {
            return Err(CardError::validation("image max_dimension must be > 0"));
        }
        Ok(())
    }

    fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Scale `(width, height)` so the longer side is at most `max_dimension`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged. Neither side shrinks below one pixel.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max = max_dimension.max(1);
    let scaled = |side: u32, long: u32| -> u32 {
        let v = (f64::from(side) * (f64::from(max) / f64::from(long))).round();
        (v as u32).max(1)
    };

    if width > height {
        if width > max {
            return (max, scaled(height, width));
        }
    } else if height > max {
        return (scaled(width, height), max);
    }
    (width, height)
}

/// Re-encode arbitrary image bytes as a bounded-size JPEG `data:` URI suitable for embedding in a
/// share link.
#[tracing::instrument(skip(bytes), fields(input_len = bytes.len()))]
pub fn encode_image(bytes: &[u8], opts: &ImageCodecOpts) -> CardResult<String> {
    opts.validate()?;

    let img = image::load_from_memory(bytes)
        .map_err(|e| CardError::decode(format!("image file is unreadable: {e}")))?;
    let (width, height) = img.dimensions();
    let (target_w, target_h) = fit_within(width, height, opts.max_dimension);
    acquire_surface(target_w, target_h)?;

    let scaled = if (target_w, target_h) == (width, height) {
        img
    } else {
        img.resize_exact(target_w, target_h, FilterType::Triangle)
    };
    let surface = scaled.to_rgb8();

    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, opts.jpeg_quality())
        .encode_image(&surface)
        .context("encode jpeg")?;

    tracing::debug!(
        width,
        height,
        target_w,
        target_h,
        jpeg_len = jpeg.len(),
        "re-encoded image"
    );
    Ok(format_data_uri("image/jpeg", &jpeg))
}

/// Read an image file from disk and run it through [`encode_image`].
pub fn encode_image_file(path: impl AsRef<Path>, opts: &ImageCodecOpts) -> CardResult<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| CardError::decode(format!("read image '{}': {e}", path.display())))?;
    encode_image(&bytes, opts)
}

fn acquire_surface(width: u32, height: u32) -> CardResult<()> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels == 0 {
        return Err(CardError::resource("cannot allocate an empty raster surface"));
    }
    if pixels > MAX_SURFACE_PIXELS {
        return Err(CardError::resource(format!(
            "raster surface {width}x{height} exceeds {MAX_SURFACE_PIXELS} pixels"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image_codec.rs"]
mod tests;
