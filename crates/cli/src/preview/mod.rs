//! Interactive preview window for picking a crop.
//!
//! This module is the platform adapter around [`reelcrop_core::CropEditor`]:
//! it turns egui pointer drags and key presses into editor events and draws
//! the editor's rectangles.
//!
//! # Architecture
//!
//! - [`input`]: egui input to editor events and window actions
//! - [`rendering`]: overlay, border, grid and handle painting
//! - [`settings`]: persisted preferences
//! - [`crop_tool`]: the [`eframe::App`] tying them together
//!
//! # Keys
//!
//! `Enter` confirms, `Escape` cancels the running gesture or closes, `r`
//! resets the crop, `g` toggles the grid and `f`/`s`/`w`/`t` switch between
//! free, square, 16:9 and 9:16.

mod crop_tool;
mod input;
mod rendering;
mod settings;

use anyhow::{Result, anyhow};
use eframe::egui;
use image::DynamicImage;
use reelcrop_core::{AspectRatioMode, EditorConfig, Rect};
use crop_tool::{CropTool, PreviewOutcome};
use settings::Settings;
use std::sync::{Arc, Mutex};

/// Opens the preview window and blocks until it is closed.
///
/// # Returns
/// - `Ok(Some(rect))` - the user confirmed a crop, in media pixels
/// - `Ok(None)` - the window was closed without confirming
pub fn run(
    image: &DynamicImage,
    config: EditorConfig,
    initial_crop: Option<Rect>,
    ratio: Option<AspectRatioMode>,
) -> Result<Option<Rect>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("reelcrop")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    let outcome = Arc::new(Mutex::new(PreviewOutcome::default()));
    let app_outcome = outcome.clone();
    let mut settings = Settings::load();
    if let Some(ratio) = ratio {
        settings.aspect_ratio = ratio.to_string();
    }
    let tool = CropTool::new(image, config, settings, initial_crop, app_outcome);

    eframe::run_native(
        "reelcrop",
        options,
        Box::new(move |_cc| Ok(Box::new(tool) as Box<dyn eframe::App>)),
    )
    .map_err(|e| anyhow!("Failed to run preview window: {e}"))?;

    let outcome = outcome
        .lock()
        .map_err(|_| anyhow!("Failed to acquire preview result lock"))?;
    Ok(outcome.crop)
}
