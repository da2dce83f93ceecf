//! Cropping the source image to the chosen media rectangle.
//!
//! The editor reports crops in media pixels as floating point values. This
//! module rounds them to whole pixels, clamps them to the image bounds and
//! writes the result.

use anyhow::{Context, Result, bail};
use image::DynamicImage;
use reelcrop_core::Rect;
use std::path::Path;

/// Whole-pixel crop window `(x, y, width, height)` inside a `width`×`height` image.
pub fn pixel_window(rect: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    if rect.is_empty() {
        return None;
    }
    let clamp = |value: f64, max: u32| value.round().clamp(0.0, f64::from(max)) as u32;

    let left = clamp(rect.min_x(), width);
    let top = clamp(rect.min_y(), height);
    let right = clamp(rect.max_x(), width);
    let bottom = clamp(rect.max_y(), height);

    let w = right.saturating_sub(left);
    let h = bottom.saturating_sub(top);
    if w == 0 || h == 0 {
        return None;
    }
    Some((left, top, w, h))
}

/// Crops `original` to `rect`, given in media pixels.
pub fn crop_image(original: &DynamicImage, rect: Rect) -> Result<DynamicImage> {
    let Some((x, y, w, h)) = pixel_window(rect, original.width(), original.height()) else {
        bail!("Crop area {rect:?} does not cover any pixel");
    };
    Ok(original.crop_imm(x, y, w, h))
}

/// Crops `original` and saves it; the format follows the file extension.
pub fn export(original: &DynamicImage, rect: Rect, path: &Path) -> Result<()> {
    let cropped = crop_image(original, rect)?;
    cropped
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        width = cropped.width(),
        height = cropped.height(),
        "exported crop"
    );
    Ok(())
}
