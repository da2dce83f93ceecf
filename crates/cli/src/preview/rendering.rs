//! Drawing helpers for the crop overlay.
//!
//! Everything here is recomputed each frame from the editor's display and
//! crop rectangles; nothing about the geometry is cached in the painter.

use eframe::egui;
use reelcrop_core::{HandleLayout, HandleType, Rect};

/// Side length of the square drawn for each handle.
const HANDLE_SIZE: f32 = 10.0;

/// Converts an editor rectangle (viewport space) to screen space.
pub fn to_screen(rect: Rect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(origin.x + rect.x as f32, origin.y + rect.y as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}

/// Dims the part of `area` outside `crop`.
///
/// Four bands around the crop; the crop itself stays clear.
pub fn draw_dimmed_surround(painter: &egui::Painter, area: egui::Rect, crop: egui::Rect, alpha: u8) {
    let color = egui::Color32::from_black_alpha(alpha);
    let crop = crop.intersect(area);

    // Above
    painter.rect_filled(
        egui::Rect::from_min_max(area.min, egui::pos2(area.max.x, crop.min.y)),
        0.0,
        color,
    );
    // Below
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(area.min.x, crop.max.y), area.max),
        0.0,
        color,
    );
    // Left
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(area.min.x, crop.min.y),
            egui::pos2(crop.min.x, crop.max.y),
        ),
        0.0,
        color,
    );
    // Right
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(crop.max.x, crop.min.y),
            egui::pos2(area.max.x, crop.max.y),
        ),
        0.0,
        color,
    );
}

pub fn draw_crop_border(painter: &egui::Painter, crop: egui::Rect, stroke_width: f32, color: egui::Color32) {
    painter.rect_stroke(
        crop,
        0.0,
        egui::Stroke::new(stroke_width, color),
        egui::StrokeKind::Middle,
    );
}

/// Rule-of-thirds guides inside the crop.
pub fn draw_thirds_grid(painter: &egui::Painter, crop: egui::Rect) {
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(90));
    for i in 1..3 {
        let t = i as f32 / 3.0;
        let x = crop.min.x + crop.width() * t;
        let y = crop.min.y + crop.height() * t;
        painter.line_segment([egui::pos2(x, crop.min.y), egui::pos2(x, crop.max.y)], stroke);
        painter.line_segment([egui::pos2(crop.min.x, y), egui::pos2(crop.max.x, y)], stroke);
    }
}

/// Draws the eight handles; `active` is highlighted.
pub fn draw_handles(
    painter: &egui::Painter,
    layout: &HandleLayout,
    origin: egui::Pos2,
    active: Option<HandleType>,
) {
    for (handle, anchor) in layout.iter() {
        let center = egui::pos2(origin.x + anchor.x as f32, origin.y + anchor.y as f32);
        let fill = if Some(handle) == active {
            egui::Color32::from_rgb(255, 196, 0)
        } else {
            egui::Color32::WHITE
        };
        let square = egui::Rect::from_center_size(center, egui::vec2(HANDLE_SIZE, HANDLE_SIZE));
        painter.rect_filled(square, 2.0, fill);
        painter.rect_stroke(
            square,
            2.0,
            egui::Stroke::new(1.0, egui::Color32::from_black_alpha(160)),
            egui::StrokeKind::Outside,
        );
    }
}

/// egui cursor for a handle's cursor name.
pub fn cursor_for(handle: HandleType) -> egui::CursorIcon {
    match handle.cursor_name() {
        "nwse-resize" => egui::CursorIcon::ResizeNwSe,
        "nesw-resize" => egui::CursorIcon::ResizeNeSw,
        "ns-resize" => egui::CursorIcon::ResizeVertical,
        "ew-resize" => egui::CursorIcon::ResizeHorizontal,
        _ => egui::CursorIcon::Default,
    }
}
