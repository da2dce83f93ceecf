//! Create-gesture validation.
//!
//! Users draw a new crop by dragging from one corner to the opposite one.
//! A press that barely moves is a tap, not a selection.

use crate::geometry::Point;

/// Outcome of releasing a create gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The drag was long enough; the drawn rectangle is kept.
    Completed,
    /// The drag was too short; the previous crop (or a default) is restored.
    Discarded,
    /// The gesture was cancelled by the host.
    Cancelled,
}

/// Determines if a create drag should be considered an intentional selection.
///
/// # Arguments
/// * `start` - Pointer-down position
/// * `end` - Pointer-up position
/// * `min_distance` - Shortest accepted Euclidean drag distance
pub fn is_valid_selection(start: Point, end: Point, min_distance: f64) -> bool {
    start.distance(end) >= min_distance
}

/// Resolves how a create gesture ends.
pub fn finish_selection(start: Point, end: Point, min_distance: f64, cancelled: bool) -> SelectionEvent {
    if cancelled {
        SelectionEvent::Cancelled
    } else if is_valid_selection(start, end, min_distance) {
        SelectionEvent::Completed
    } else {
        SelectionEvent::Discarded
    }
}
