//! Resize handles and their anchor positions.

use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Which side of an axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Left or top edge.
    Min,
    /// Right or bottom edge.
    Max,
}

/// One of the eight handles around the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleType {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl HandleType {
    /// All handles, corners first. Hit testing walks this order.
    pub const ALL: [HandleType; 8] = [
        HandleType::TopLeft,
        HandleType::TopRight,
        HandleType::BottomLeft,
        HandleType::BottomRight,
        HandleType::TopCenter,
        HandleType::MiddleLeft,
        HandleType::MiddleRight,
        HandleType::BottomCenter,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }

    /// Horizontal edge moved by this handle, `None` for top/bottom centers.
    pub fn horizontal(self) -> Option<Edge> {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => Some(Edge::Min),
            Self::TopRight | Self::MiddleRight | Self::BottomRight => Some(Edge::Max),
            Self::TopCenter | Self::BottomCenter => None,
        }
    }

    /// Vertical edge moved by this handle, `None` for middle left/right.
    pub fn vertical(self) -> Option<Edge> {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Some(Edge::Min),
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Some(Edge::Max),
            Self::MiddleLeft | Self::MiddleRight => None,
        }
    }

    /// The handle across the rectangle, which stays put while this one is dragged.
    pub fn opposite(self) -> HandleType {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopCenter => Self::BottomCenter,
            Self::TopRight => Self::BottomLeft,
            Self::MiddleLeft => Self::MiddleRight,
            Self::MiddleRight => Self::MiddleLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomCenter => Self::TopCenter,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// Anchor point of this handle on `rect`.
    pub fn anchor(self, rect: &Rect) -> Point {
        let x = match self.horizontal() {
            Some(Edge::Min) => rect.min_x(),
            Some(Edge::Max) => rect.max_x(),
            None => rect.mid_x(),
        };
        let y = match self.vertical() {
            Some(Edge::Min) => rect.min_y(),
            Some(Edge::Max) => rect.max_y(),
            None => rect.mid_y(),
        };
        Point::new(x, y)
    }

    /// CSS-style cursor name a host can show while hovering this handle.
    pub fn cursor_name(self) -> &'static str {
        match self {
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
            Self::TopCenter | Self::BottomCenter => "ns-resize",
            Self::MiddleLeft | Self::MiddleRight => "ew-resize",
        }
    }
}

/// Handle anchors derived from a crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    anchors: [(HandleType, Point); 8],
}

impl HandleLayout {
    pub fn new(rect: &Rect) -> Self {
        Self {
            anchors: HandleType::ALL.map(|handle| (handle, handle.anchor(rect))),
        }
    }

    pub fn anchor(&self, handle: HandleType) -> Point {
        self.anchors
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, p)| *p)
            .unwrap_or_default()
    }

    /// Iterates `(handle, anchor)` pairs, corners first.
    pub fn iter(&self) -> impl Iterator<Item = (HandleType, Point)> + '_ {
        self.anchors.iter().copied()
    }

    /// Square hit zone of `size` centered on the handle's anchor.
    pub fn hit_zone(&self, handle: HandleType, size: f64) -> Rect {
        Rect::from_center_size(self.anchor(handle), Size::new(size, size))
    }
}
