//! Interactive crop window.
//!
//! `CropTool` implements [`eframe::App`]. It owns a [`CropEditor`], feeds it
//! the window size and pointer input each frame, and paints the media with
//! the crop overlay on top.

use super::input::{DragPhase, KeyAction, KEYS, drag_phase, key_action, pointer_event};
use super::rendering::{
    cursor_for, draw_crop_border, draw_dimmed_surround, draw_handles, draw_thirds_grid, to_screen,
};
use super::settings::Settings;
use eframe::egui;
use image::DynamicImage;
use reelcrop_core::classifier::classify;
use reelcrop_core::{
    Classification, CropChange, CropEditor, CropEvent, EditorConfig, EditorState, Point, Rect,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, trace, warn};

/// How the window was closed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PreviewOutcome {
    /// Media-space crop, set only when the user confirmed.
    pub crop: Option<Rect>,
}

pub struct CropTool {
    editor: CropEditor,
    /// Pre-converted image data for fast texture upload
    color_image: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
    viewport: Option<egui::Vec2>,
    /// Saved crop to install once the layout is known.
    pending_crop: Option<Rect>,
    last_change: Option<CropChange>,
    settings: Settings,
    outcome: Arc<Mutex<PreviewOutcome>>,
}

impl CropTool {
    pub fn new(
        image: &DynamicImage,
        config: EditorConfig,
        settings: Settings,
        initial_crop: Option<Rect>,
        outcome: Arc<Mutex<PreviewOutcome>>,
    ) -> Self {
        let mut editor = CropEditor::new(config);
        editor.process(CropEvent::SetMediaSize {
            width: f64::from(image.width()),
            height: f64::from(image.height()),
        });

        let buffer = image.to_rgba8();
        let size = [image.width() as usize, image.height() as usize];
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied(size, buffer.as_flat_samples().as_slice());

        Self {
            editor,
            color_image: Some(color_image),
            texture: None,
            viewport: None,
            pending_crop: initial_crop,
            last_change: None,
            settings,
            outcome,
        }
    }

    fn apply(&mut self, event: CropEvent) {
        if let Some(change) = self.editor.process(event) {
            trace!(?change, "crop changed");
            self.last_change = Some(change);
        }
    }

    /// Reports the viewport size each frame; the first report also restores
    /// the saved ratio and crop.
    fn sync_viewport(&mut self, size: egui::Vec2) {
        let first = self.viewport.is_none();
        self.viewport = Some(size);
        self.apply(CropEvent::SetViewportBounds {
            width: f64::from(size.x),
            height: f64::from(size.y),
        });

        if first && self.editor.is_ready() {
            self.apply(CropEvent::SetAspectRatio {
                mode: self.settings.aspect_mode(),
            });
            if let Some(rect) = self.pending_crop.take() {
                self.apply(CropEvent::SetMediaCrop { rect });
            }
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: KeyAction) {
        match action {
            KeyAction::Editor(event) => {
                if let CropEvent::SetAspectRatio { mode } = event {
                    self.settings.aspect_ratio = mode.to_string();
                }
                self.apply(event);
            }
            KeyAction::ToggleGrid => self.settings.show_grid = !self.settings.show_grid,
            KeyAction::Confirm => {
                self.finish(self.editor.media_crop());
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            KeyAction::Close => {
                self.finish(None);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn finish(&mut self, crop: Option<Rect>) {
        if let Err(e) = self.settings.save() {
            warn!("Failed to save preferences: {e:#}");
        }
        match self.outcome.lock() {
            Ok(mut outcome) => outcome.crop = crop,
            Err(_) => warn!("preview outcome lock poisoned"),
        }
        debug!(?crop, "preview finished");
    }

    fn update_cursor(&self, ctx: &egui::Context, hover: Option<egui::Pos2>, origin: egui::Pos2) {
        let icon = match self.editor.state() {
            EditorState::Resizing(handle) => cursor_for(handle),
            EditorState::Moving => egui::CursorIcon::Grabbing,
            EditorState::Dragging => egui::CursorIcon::Crosshair,
            EditorState::Idle => {
                let Some(pos) = hover else { return };
                let point = Point::new(f64::from(pos.x - origin.x), f64::from(pos.y - origin.y));
                let crop = self.editor.crop_rect();
                match classify(point, crop.as_ref(), self.editor.config()) {
                    Classification::Resizing(handle) => cursor_for(handle),
                    Classification::Moving => egui::CursorIcon::Grab,
                    Classification::Dragging => egui::CursorIcon::Crosshair,
                }
            }
        };
        ctx.set_cursor_icon(icon);
    }

    fn paint(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let Some(display) = self.editor.display_rect() else {
            return;
        };
        let display = to_screen(display, origin);

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                display,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        let Some(crop) = self.editor.crop_rect() else {
            return;
        };
        let crop_screen = to_screen(crop, origin);
        draw_dimmed_surround(painter, display, crop_screen, 150);
        if self.settings.show_grid {
            draw_thirds_grid(painter, crop_screen);
        }
        draw_crop_border(painter, crop_screen, 2.0, egui::Color32::WHITE);

        let active = match self.editor.state() {
            EditorState::Resizing(handle) => Some(handle),
            _ => None,
        };
        if let Some(layout) = self.editor.handle_layout() {
            draw_handles(painter, &layout, origin, active);
        }

        if let Some(change) = self.last_change {
            let r = change.rect;
            painter.text(
                display.left_bottom() + egui::vec2(8.0, -8.0),
                egui::Align2::LEFT_BOTTOM,
                format!(
                    "{:.0}×{:.0} at ({:.0}, {:.0})  ratio: {}",
                    r.width,
                    r.height,
                    r.x,
                    r.y,
                    self.editor.aspect_mode()
                ),
                egui::FontId::proportional(14.0),
                egui::Color32::WHITE,
            );
        }
    }
}

impl eframe::App for CropTool {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // Upload texture on first frame using pre-converted data
        if self.texture.is_none() {
            if let Some(color_image) = self.color_image.take() {
                self.texture =
                    Some(ctx.load_texture("media", color_image, egui::TextureOptions::LINEAR));
            }
        }

        let panel_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(0))
            .outer_margin(egui::Margin::same(0))
            .fill(egui::Color32::from_gray(18));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let origin = rect.min;
                self.sync_viewport(rect.size());

                let response = ui.interact(rect, ui.id().with("crop_surface"), egui::Sense::drag());
                if let Some(phase) = drag_phase(&response) {
                    // egui reports a drag only after the pointer has moved a
                    // little, so the down event uses the press origin.
                    let pos = match phase {
                        DragPhase::Started => ctx.input(|i| i.pointer.press_origin()),
                        _ => None,
                    }
                    .or(response.interact_pointer_pos())
                    .or(ctx.input(|i| i.pointer.latest_pos()));
                    if let Some(pos) = pos {
                        self.apply(pointer_event(phase, pos, origin));
                        if phase == DragPhase::Started {
                            if let Some(current) = response.interact_pointer_pos() {
                                self.apply(pointer_event(DragPhase::Moved, current, origin));
                            }
                        }
                    }
                }

                let state = self.editor.state();
                let actions: Vec<KeyAction> = ctx.input(|i| {
                    KEYS.iter()
                        .filter(|key| i.key_pressed(**key))
                        .filter_map(|key| key_action(*key, state))
                        .collect()
                });
                for action in actions {
                    self.handle_action(ctx, action);
                }

                self.update_cursor(ctx, response.hover_pos(), origin);
                self.paint(ui.painter(), origin);
            });
    }
}
