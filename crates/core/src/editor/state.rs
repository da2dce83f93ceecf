//! Editor state types and event definitions.

use crate::aspect::AspectRatioMode;
use crate::classifier::Classification;
use crate::geometry::{Point, Rect};
use crate::handles::HandleType;
use serde::{Deserialize, Serialize};

/// Current interaction state of the editor.
///
/// `Idle` -> `Dragging` | `Resizing` | `Moving` (pointer down) -> `Idle`
/// (pointer up or cancel). The resize variant carries its handle, so a
/// resize without a handle cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorState {
    #[default]
    Idle,
    /// Drawing a new rectangle.
    Dragging,
    /// Dragging one of the eight handles.
    Resizing(HandleType),
    /// Translating the whole rectangle.
    Moving,
}

/// Input accepted by the editor, in display-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CropEvent {
    SetMediaSize { width: f64, height: f64 },
    SetViewportBounds { width: f64, height: f64 },
    SetAspectRatio { mode: AspectRatioMode },
    /// Replace the crop with the centered default.
    Reset,
    /// Drop the crop entirely; nothing is emitted.
    Clear,
    /// Install a saved crop given in media pixels.
    SetMediaCrop { rect: Rect },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerCancel,
}

/// Whether a change is a preview or settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangePhase {
    /// Emitted during a drag, for preview only.
    Live,
    /// Emitted when a gesture or programmatic mutation completes.
    Final,
}

/// Crop rectangle handed to the host, in media pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropChange {
    pub rect: Rect,
    pub phase: ChangePhase,
}

impl CropChange {
    pub fn is_final(&self) -> bool {
        self.phase == ChangePhase::Final
    }
}

/// Receives crop changes from [`CropEditor::dispatch`](super::CropEditor::dispatch).
pub trait CropListener {
    fn on_crop_changed(&mut self, change: &CropChange);
}

impl<F: FnMut(&CropChange)> CropListener for F {
    fn on_crop_changed(&mut self, change: &CropChange) {
        self(change)
    }
}

/// What the active gesture is doing, with the data it was started from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Gesture {
    /// Drawing a new crop; `previous` is restored if the drag is discarded.
    Create { previous: Option<Rect> },
    Resize { handle: HandleType, start_rect: Rect },
    /// `offset` is the pointer position minus the crop center at pointer-down.
    Move { start_rect: Rect, offset: Point },
}

/// Transient state of one pointer gesture, created on pointer-down and
/// dropped on pointer-up or cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PointerSession {
    pub gesture: Gesture,
    pub start: Point,
    pub last: Point,
}

impl PointerSession {
    /// Pins a classification to a new session. Resize and move need a crop
    /// to act on; without one the gesture falls back to creating.
    pub fn begin(classification: Classification, point: Point, crop: Option<Rect>) -> Self {
        let gesture = match (classification, crop) {
            (Classification::Resizing(handle), Some(start_rect)) => {
                Gesture::Resize { handle, start_rect }
            }
            (Classification::Moving, Some(start_rect)) => Gesture::Move {
                start_rect,
                offset: point.delta_from(start_rect.center()),
            },
            (_, previous) => Gesture::Create { previous },
        };
        Self {
            gesture,
            start: point,
            last: point,
        }
    }

    pub fn state(&self) -> EditorState {
        match self.gesture {
            Gesture::Create { .. } => EditorState::Dragging,
            Gesture::Resize { handle, .. } => EditorState::Resizing(handle),
            Gesture::Move { .. } => EditorState::Moving,
        }
    }

    /// Carries the session into a new layout: the crop snapshot goes through
    /// `rect`, pointer positions through `point`.
    pub fn rebased(self, rect: impl Fn(Rect) -> Rect, point: impl Fn(Point) -> Point) -> Self {
        let gesture = match self.gesture {
            Gesture::Create { previous } => Gesture::Create {
                previous: previous.map(&rect),
            },
            Gesture::Resize { handle, start_rect } => Gesture::Resize {
                handle,
                start_rect: rect(start_rect),
            },
            Gesture::Move { start_rect, offset } => {
                let center = start_rect.center();
                let grabbed = Point::new(center.x + offset.x, center.y + offset.y);
                Gesture::Move {
                    start_rect: rect(start_rect),
                    offset: point(grabbed).delta_from(point(center)),
                }
            }
        };
        Self {
            gesture,
            start: point(self.start),
            last: point(self.last),
        }
    }

    /// Accumulated translation since pointer-down.
    pub fn translation(&self) -> Point {
        self.last.delta_from(self.start)
    }
}
