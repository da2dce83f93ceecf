//! Pointer-down classification.
//!
//! A single touch can mean three different things: grab a handle, grab the
//! whole rectangle, or start drawing a new one. The decision is made once
//! on pointer-down and stays pinned for the rest of the gesture.

use crate::config::EditorConfig;
use crate::geometry::{Point, Rect};
use crate::handles::{HandleLayout, HandleType};
use serde::{Deserialize, Serialize};

/// What a gesture does to the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Resize through the given handle.
    Resizing(HandleType),
    /// Translate the existing rectangle.
    Moving,
    /// Draw a new rectangle from scratch.
    Dragging,
}

/// Classifies a pointer-down at `point`.
///
/// Priority, each step short-circuiting the next:
/// 1. inside any handle's hit zone → [`Classification::Resizing`];
///    overlapping zones resolve to the nearest anchor, corners winning ties;
/// 2. inside a valid crop and outside the exclusion radius of every
///    handle → [`Classification::Moving`];
/// 3. otherwise → [`Classification::Dragging`].
pub fn classify(point: Point, crop: Option<&Rect>, config: &EditorConfig) -> Classification {
    let Some(crop) = crop.filter(|c| !c.is_empty()) else {
        return Classification::Dragging;
    };

    let layout = HandleLayout::new(crop);
    let mut best: Option<(HandleType, f64)> = None;
    for (handle, anchor) in layout.iter() {
        if !layout.hit_zone(handle, config.handle_hit_size).contains(point) {
            continue;
        }
        let distance = anchor.distance(point);
        // Strict comparison keeps the earlier (corner) entry on ties.
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((handle, distance));
        }
    }
    if let Some((handle, _)) = best {
        return Classification::Resizing(handle);
    }

    let near_handle = layout
        .iter()
        .any(|(_, anchor)| anchor.distance(point) < config.move_exclusion_radius);
    if crop.contains(point) && !near_handle {
        return Classification::Moving;
    }

    Classification::Dragging
}
