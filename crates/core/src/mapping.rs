//! Coordinate mapping between display space and media space.
//!
//! The viewport shows the media at some scale inside the display rect
//! (see [`fit_display_rect`](crate::display::fit_display_rect)), while the
//! exported crop must be expressed in the media's native pixels. The mapper
//! converts in both directions and clamps its output to the target bounds,
//! so a rectangle that pokes out of the display rect never produces pixel
//! coordinates outside the media.

use crate::geometry::{Rect, Size};

/// Bidirectional transform for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    display: Rect,
    media: Size,
}

impl CoordinateMapper {
    /// Creates a mapper, or `None` if either the display rect or the media
    /// size is degenerate.
    pub fn new(display: Rect, media: Size) -> Option<Self> {
        if display.is_empty() || !media.is_positive() {
            return None;
        }
        Some(Self { display, media })
    }

    pub fn display_rect(&self) -> Rect {
        self.display
    }

    pub fn media_size(&self) -> Size {
        self.media
    }

    /// Media pixels per display point, horizontally and vertically.
    pub fn scale(&self) -> (f64, f64) {
        (
            self.media.width / self.display.width,
            self.media.height / self.display.height,
        )
    }

    /// Maps a display-space rectangle to media pixels, clamped to
    /// `[0, 0]..[media.width, media.height]`.
    pub fn to_media_space(&self, rect: Rect) -> Rect {
        let (scale_x, scale_y) = self.scale();
        let mapped = Rect::new(
            (rect.x - self.display.x) * scale_x,
            (rect.y - self.display.y) * scale_y,
            rect.width * scale_x,
            rect.height * scale_y,
        );
        mapped.intersection(&Rect::new(0.0, 0.0, self.media.width, self.media.height))
    }

    /// Maps a media-space rectangle into display space, clamped to the
    /// display rect. Exact inverse of [`to_media_space`](Self::to_media_space)
    /// for unclamped input.
    pub fn to_display_space(&self, rect: Rect) -> Rect {
        let (scale_x, scale_y) = self.scale();
        let mapped = Rect::new(
            self.display.x + rect.x / scale_x,
            self.display.y + rect.y / scale_y,
            rect.width / scale_x,
            rect.height / scale_y,
        );
        mapped.intersection(&self.display)
    }
}
