//! Translation of egui input into editor events and preview actions.

use eframe::egui;
use reelcrop_core::{AspectRatioMode, CropEvent, EditorState};

use super::settings::RATIO_SHORTCUTS;

/// Stage of a drag as reported by an egui [`egui::Response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Started,
    Moved,
    Stopped,
}

/// What a key press asks the preview to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Editor(CropEvent),
    /// Accept the current crop and close.
    Confirm,
    /// Close without a result.
    Close,
    ToggleGrid,
}

/// Keys the preview listens to.
pub const KEYS: &[egui::Key] = &[
    egui::Key::Escape,
    egui::Key::Enter,
    egui::Key::R,
    egui::Key::G,
    egui::Key::F,
    egui::Key::S,
    egui::Key::W,
    egui::Key::T,
];

pub fn drag_phase(response: &egui::Response) -> Option<DragPhase> {
    if response.drag_started() {
        Some(DragPhase::Started)
    } else if response.drag_stopped() {
        Some(DragPhase::Stopped)
    } else if response.dragged() {
        Some(DragPhase::Moved)
    } else {
        None
    }
}

/// Editor event for a pointer at screen position `pos`; `origin` is the
/// top-left corner of the editor's viewport on screen.
pub fn pointer_event(phase: DragPhase, pos: egui::Pos2, origin: egui::Pos2) -> CropEvent {
    let x = f64::from(pos.x - origin.x);
    let y = f64::from(pos.y - origin.y);
    match phase {
        DragPhase::Started => CropEvent::PointerDown { x, y },
        DragPhase::Moved => CropEvent::PointerMove { x, y },
        DragPhase::Stopped => CropEvent::PointerUp { x, y },
    }
}

/// Maps a key press to an action. Escape cancels a running gesture before
/// it closes the window.
pub fn key_action(key: egui::Key, state: EditorState) -> Option<KeyAction> {
    let action = match key {
        egui::Key::Escape if state != EditorState::Idle => KeyAction::Editor(CropEvent::PointerCancel),
        egui::Key::Escape => KeyAction::Close,
        egui::Key::Enter => KeyAction::Confirm,
        egui::Key::R => KeyAction::Editor(CropEvent::Reset),
        egui::Key::G => KeyAction::ToggleGrid,
        other => {
            let mode = ratio_for_key(other)?;
            KeyAction::Editor(CropEvent::SetAspectRatio { mode })
        }
    };
    Some(action)
}

fn ratio_for_key(key: egui::Key) -> Option<AspectRatioMode> {
    let name = key.name().to_ascii_lowercase();
    RATIO_SHORTCUTS
        .iter()
        .find(|(label, _)| *label == name)
        .and_then(|(_, spec)| spec.parse().ok())
}
