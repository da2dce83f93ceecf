//! Aspect-fit placement of media inside a viewport.
//!
//! The media is scaled uniformly so that it fits the viewport entirely
//! ("contain"), leaving letterbox bars on the axis that does not fill.

use crate::geometry::{Rect, Size};

/// Computes the sub-rectangle of the viewport where the media is presented.
///
/// Returns `None` while either size is degenerate (zero, negative or not
/// finite). Callers treat that as "layout not ready" and must not process
/// gestures until a display rect exists.
///
/// # Example
///
/// ```
/// use reelcrop_core::display::fit_display_rect;
/// use reelcrop_core::Size;
///
/// let rect = fit_display_rect(Size::new(1920.0, 1080.0), Size::new(300.0, 400.0)).unwrap();
/// assert_eq!(rect.width, 300.0);
/// assert!((rect.height - 168.75).abs() < 1e-9);
/// assert!((rect.y - 115.625).abs() < 1e-9);
/// ```
pub fn fit_display_rect(media: Size, viewport: Size) -> Option<Rect> {
    if !media.is_positive() || !viewport.is_positive() {
        return None;
    }

    let media_aspect = media.aspect_ratio();
    let viewport_aspect = viewport.aspect_ratio();

    let rect = if media_aspect > viewport_aspect {
        // Media is wider - fit to width, bars top and bottom
        let height = viewport.width / media_aspect;
        Rect::new(0.0, (viewport.height - height) / 2.0, viewport.width, height)
    } else {
        // Media is taller - fit to height, bars left and right
        let width = viewport.height * media_aspect;
        Rect::new((viewport.width - width) / 2.0, 0.0, width, viewport.height)
    };

    Some(rect)
}
