//! Constraint solving for crop rectangles.
//!
//! Every rectangle the editor produces passes through here. Constraints are
//! applied in a fixed order: minimum size, then aspect ratio, then the
//! boundary. Boundary handling has two modes: [`BoundaryMode::Hard`] keeps
//! the rectangle inside the display rect, and [`BoundaryMode::Elastic`] lets
//! a live drag overshoot by a damped fraction of the overflow.

use crate::aspect::AspectRatioMode;
use crate::config::EditorConfig;
use crate::geometry::{Point, Rect, Size};
use crate::handles::{Edge, HandleType};

/// How the display rect boundary is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Clamp into the display rect. Used on release and for programmatic changes.
    Hard,
    /// Apply only `elastic_factor` of any overflow. Used during live drags.
    Elastic,
}

/// How one axis of a ratio-locked resize is pinned.
#[derive(Debug, Clone, Copy)]
enum AxisPin {
    /// The given edge moves; the coordinate of the opposite edge is fixed.
    Edge(Edge, f64),
    /// The axis follows the ratio, centered on this coordinate.
    Centered(f64),
}

/// Constraint context for one display rect.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintSolver {
    display: Rect,
    min_size: f64,
    elastic_factor: f64,
    default_fill: f64,
    aspect: AspectRatioMode,
}

impl ConstraintSolver {
    pub fn new(display: Rect, aspect: AspectRatioMode, config: &EditorConfig) -> Self {
        Self {
            display,
            min_size: config.min_crop_size,
            elastic_factor: config.elastic_factor,
            default_fill: config.default_fill,
            aspect,
        }
    }

    pub fn display(&self) -> Rect {
        self.display
    }

    /// Minimum width and height, never larger than the display rect itself.
    /// With a fixed ratio this is the smallest ratio-correct size meeting the
    /// minimum on both axes, shrunk to fit the display if it must.
    pub fn min_size(&self) -> Size {
        let free = Size::new(
            self.min_size.min(self.display.width),
            self.min_size.min(self.display.height),
        );
        match self.aspect.ratio() {
            Some(ratio) => {
                let width = free.width.max(free.height * ratio);
                let height = width / ratio;
                let scale = (self.display.width / width)
                    .min(self.display.height / height)
                    .min(1.0);
                Size::new(width * scale, height * scale)
            }
            None => free,
        }
    }

    /// Grows `rect` to the minimum size, keeping its origin.
    pub fn enforce_min_size(&self, rect: Rect) -> Rect {
        let min = self.min_size();
        Rect::new(
            rect.x,
            rect.y,
            rect.width.max(min.width),
            rect.height.max(min.height),
        )
    }

    /// Hard boundary: minimum size, then size capped to the display rect,
    /// then origin clamped so both edges fall inside it on each axis.
    pub fn clamp_hard(&self, rect: Rect) -> Rect {
        let rect = self.enforce_min_size(rect);
        let width = rect.width.min(self.display.width);
        let height = rect.height.min(self.display.height);
        let x = rect
            .x
            .clamp(self.display.min_x(), self.display.max_x() - width);
        let y = rect
            .y
            .clamp(self.display.min_y(), self.display.max_y() - height);
        Rect::new(x, y, width, height)
    }

    /// Applies the boundary to a translated rectangle.
    ///
    /// In elastic mode each axis whose position differs from the hard-clamped
    /// one keeps only `elastic_factor` of the overflow.
    pub fn constrain_position(&self, raw: Rect, mode: BoundaryMode) -> Rect {
        let hard = self.clamp_hard(raw);
        match mode {
            BoundaryMode::Hard => hard,
            BoundaryMode::Elastic => Rect::new(
                hard.x + (raw.x - hard.x) * self.elastic_factor,
                hard.y + (raw.y - hard.y) * self.elastic_factor,
                hard.width,
                hard.height,
            ),
        }
    }

    /// Moves `start` so that its center lands on `center`.
    pub fn move_to(&self, start: Rect, center: Point, mode: BoundaryMode) -> Rect {
        self.constrain_position(start.with_center(center), mode)
    }

    /// Resizes `start` by dragging `handle` through `delta`.
    ///
    /// With a fixed ratio the result keeps that ratio exactly and the handle
    /// opposite the dragged one stays put.
    pub fn resize(&self, start: Rect, handle: HandleType, delta: Point, mode: BoundaryMode) -> Rect {
        match self.aspect.ratio() {
            Some(ratio) => self.resize_locked(start, handle, delta, ratio, mode),
            None => self.resize_free(start, handle, delta, mode),
        }
    }

    fn resize_free(&self, start: Rect, handle: HandleType, delta: Point, mode: BoundaryMode) -> Rect {
        let min = self.min_size();
        let (left, right) = self.resize_axis(
            (start.min_x(), start.max_x()),
            handle.horizontal(),
            delta.x,
            (self.display.min_x(), self.display.max_x()),
            min.width,
            mode,
        );
        let (top, bottom) = self.resize_axis(
            (start.min_y(), start.max_y()),
            handle.vertical(),
            delta.y,
            (self.display.min_y(), self.display.max_y()),
            min.height,
            mode,
        );
        Rect::from_edges(left, top, right, bottom)
    }

    /// Moves one edge of the span `(lo, hi)`. The other edge never moves.
    fn resize_axis(
        &self,
        (lo, hi): (f64, f64),
        edge: Option<Edge>,
        delta: f64,
        (bound_lo, bound_hi): (f64, f64),
        min_len: f64,
        mode: BoundaryMode,
    ) -> (f64, f64) {
        match edge {
            None => (lo, hi),
            Some(Edge::Max) => {
                let raw = (hi + delta).max(lo + min_len);
                (lo, self.limit(raw, bound_hi, mode))
            }
            Some(Edge::Min) => {
                let raw = (lo + delta).min(hi - min_len);
                let mirrored = self.limit(-raw, -bound_lo, mode);
                (-mirrored, hi)
            }
        }
    }

    /// Caps `value` at `max`: hard clamp, or damped overflow in elastic mode.
    fn limit(&self, value: f64, max: f64, mode: BoundaryMode) -> f64 {
        if value <= max {
            return value;
        }
        match mode {
            BoundaryMode::Hard => max,
            BoundaryMode::Elastic => max + (value - max) * self.elastic_factor,
        }
    }

    fn resize_locked(
        &self,
        start: Rect,
        handle: HandleType,
        delta: Point,
        ratio: f64,
        mode: BoundaryMode,
    ) -> Rect {
        let fixed = handle.opposite().anchor(&start);
        let x_pin = match handle.horizontal() {
            Some(edge) => AxisPin::Edge(edge, fixed.x),
            None => AxisPin::Centered(fixed.x),
        };
        let y_pin = match handle.vertical() {
            Some(edge) => AxisPin::Edge(edge, fixed.y),
            None => AxisPin::Centered(fixed.y),
        };

        let raw_w = match x_pin {
            AxisPin::Edge(Edge::Max, _) => Some(start.width + delta.x),
            AxisPin::Edge(Edge::Min, _) => Some(start.width - delta.x),
            AxisPin::Centered(_) => None,
        };
        let raw_h = match y_pin {
            AxisPin::Edge(Edge::Max, _) => Some(start.height + delta.y),
            AxisPin::Edge(Edge::Min, _) => Some(start.height - delta.y),
            AxisPin::Centered(_) => None,
        };

        // One dimension drives, the other follows the ratio.
        let (width, height) = match (raw_w, raw_h) {
            (Some(w), Some(h)) => {
                if w / start.width.max(f64::EPSILON) >= h / start.height.max(f64::EPSILON) {
                    (w, w / ratio)
                } else {
                    (h * ratio, h)
                }
            }
            (Some(w), None) => (w, w / ratio),
            (None, Some(h)) => (h * ratio, h),
            (None, None) => (start.width, start.height),
        };

        let available = Size::new(
            self.available_extent(x_pin, self.display.min_x(), self.display.max_x()),
            self.available_extent(y_pin, self.display.min_y(), self.display.max_y()),
        );
        let size = self.fit_locked(Size::new(width, height), ratio, available, mode);
        place_pinned(size, x_pin, y_pin)
    }

    /// Room left for a pinned axis inside `[lo, hi]`.
    fn available_extent(&self, pin: AxisPin, lo: f64, hi: f64) -> f64 {
        match pin {
            AxisPin::Edge(Edge::Max, anchor) => hi - anchor,
            AxisPin::Edge(Edge::Min, anchor) => anchor - lo,
            AxisPin::Centered(center) => 2.0 * (center - lo).min(hi - center),
        }
        .max(0.0)
    }

    /// Applies minimum size and the boundary to a ratio-locked size while
    /// keeping `width / height == ratio`.
    fn fit_locked(&self, size: Size, ratio: f64, available: Size, mode: BoundaryMode) -> Size {
        let floor = self.min_size();
        let available = Size::new(
            available.width.max(floor.width),
            available.height.max(floor.height),
        );
        let (mut width, mut height) = (size.width, size.height);

        if width < floor.width || height < floor.height {
            width = floor.width;
            height = floor.height;
        }

        let limited = self.limit(width, available.width, mode);
        if limited != width {
            width = limited;
            height = width / ratio;
        }
        let limited = self.limit(height, available.height, mode);
        if limited != height {
            height = limited;
            width = height * ratio;
        }

        Size::new(width, height)
    }

    /// Rectangle for a create gesture from `start` to `current`.
    ///
    /// Both points are clamped into the display rect first. The result is
    /// normalized, so dragging in any direction works, and grows from the
    /// start point to at least the minimum size.
    pub fn create(&self, start: Point, current: Point) -> Rect {
        let start = self.clamp_point(start);
        let current = self.clamp_point(current);
        let min = self.min_size();
        let grows_right = current.x >= start.x;
        let grows_down = current.y >= start.y;

        let size = match self.aspect.ratio() {
            Some(ratio) => {
                let raw_w = (current.x - start.x).abs();
                let raw_h = (current.y - start.y).abs();
                let width = raw_w.max(raw_h * ratio);
                let available = Size::new(
                    if grows_right {
                        self.display.max_x() - start.x
                    } else {
                        start.x - self.display.min_x()
                    }
                    .max(min.width),
                    if grows_down {
                        self.display.max_y() - start.y
                    } else {
                        start.y - self.display.min_y()
                    }
                    .max(min.height),
                );
                self.fit_locked(Size::new(width, width / ratio), ratio, available, BoundaryMode::Hard)
            }
            None => {
                let rect = Rect::from_points(start, current);
                Size::new(rect.width.max(min.width), rect.height.max(min.height))
            }
        };

        let x = if grows_right { start.x } else { start.x - size.width };
        let y = if grows_down { start.y } else { start.y - size.height };
        self.clamp_hard(Rect::new(x, y, size.width, size.height))
    }

    /// Refits `rect` to the current aspect mode around its center, keeping
    /// its area as far as the display rect and minimum size allow.
    pub fn fit_aspect(&self, rect: Rect) -> Rect {
        let Some(ratio) = self.aspect.ratio() else {
            return self.clamp_hard(rect);
        };
        let area = rect.width * rect.height;
        let size = Size::new((area * ratio).sqrt(), (area / ratio).sqrt());
        let size = self.fit_locked(size, ratio, self.display.size(), BoundaryMode::Hard);
        self.clamp_hard(Rect::from_center_size(rect.center(), size))
    }

    /// Centered default crop covering `default_fill` of the display rect.
    pub fn default_rect(&self) -> Rect {
        let target = Size::new(
            self.display.width * self.default_fill,
            self.display.height * self.default_fill,
        );
        let size = match self.aspect.ratio() {
            Some(ratio) => {
                let width = target.width.min(target.height * ratio);
                self.fit_locked(
                    Size::new(width, width / ratio),
                    ratio,
                    self.display.size(),
                    BoundaryMode::Hard,
                )
            }
            None => target,
        };
        self.clamp_hard(Rect::from_center_size(self.display.center(), size))
    }

    /// Clamps a point into the display rect.
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.display.min_x(), self.display.max_x()),
            point.y.clamp(self.display.min_y(), self.display.max_y()),
        )
    }
}

fn place_pinned(size: Size, x_pin: AxisPin, y_pin: AxisPin) -> Rect {
    let x = match x_pin {
        AxisPin::Edge(Edge::Max, anchor) => anchor,
        AxisPin::Edge(Edge::Min, anchor) => anchor - size.width,
        AxisPin::Centered(center) => center - size.width / 2.0,
    };
    let y = match y_pin {
        AxisPin::Edge(Edge::Max, anchor) => anchor,
        AxisPin::Edge(Edge::Min, anchor) => anchor - size.height,
        AxisPin::Centered(center) => center - size.height / 2.0,
    };
    Rect::new(x, y, size.width, size.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn solver(aspect: AspectRatioMode) -> ConstraintSolver {
        ConstraintSolver::new(
            Rect::new(0.0, 0.0, 300.0, 300.0),
            aspect,
            &EditorConfig::default(),
        )
    }

    #[test]
    fn hard_clamp_shifts_rect_back_inside() {
        let s = solver(AspectRatioMode::Free);
        let clamped = s.clamp_hard(Rect::new(280.0, -10.0, 70.0, 50.0));
        assert_eq!(clamped, Rect::new(230.0, 0.0, 70.0, 50.0));
        assert_eq!(clamped.max_x(), 300.0);
    }

    #[test]
    fn hard_clamp_caps_size_then_position() {
        let s = solver(AspectRatioMode::Free);
        let clamped = s.clamp_hard(Rect::new(-50.0, 10.0, 500.0, 5.0));
        assert_eq!(clamped, Rect::new(0.0, 10.0, 300.0, 20.0));
    }

    #[test]
    fn elastic_move_applies_fraction_of_overflow() {
        let s = solver(AspectRatioMode::Free);
        let start = Rect::new(200.0, 100.0, 100.0, 100.0);
        // Center pushed 100 units right, so the rect overflows by 100.
        let live = s.move_to(start, Point::new(350.0, 150.0), BoundaryMode::Elastic);
        assert!((live.x - 230.0).abs() < EPS, "{live:?}");
        let hard = s.move_to(start, Point::new(350.0, 150.0), BoundaryMode::Hard);
        assert_eq!(hard.max_x(), 300.0);
    }

    #[test]
    fn free_corner_resize_keeps_opposite_corner() {
        let s = solver(AspectRatioMode::Free);
        let start = Rect::new(100.0, 100.0, 100.0, 100.0);
        let r = s.resize(start, HandleType::TopLeft, Point::new(-30.0, 10.0), BoundaryMode::Hard);
        assert_eq!(r, Rect::new(70.0, 110.0, 130.0, 90.0));
        assert_eq!(r.max_x(), start.max_x());
        assert_eq!(r.max_y(), start.max_y());
    }

    #[test]
    fn free_edge_resize_touches_one_axis() {
        let s = solver(AspectRatioMode::Free);
        let start = Rect::new(100.0, 100.0, 100.0, 100.0);
        let r = s.resize(start, HandleType::MiddleRight, Point::new(25.0, 40.0), BoundaryMode::Hard);
        assert_eq!(r, Rect::new(100.0, 100.0, 125.0, 100.0));
        let r = s.resize(start, HandleType::TopCenter, Point::new(25.0, -40.0), BoundaryMode::Hard);
        assert_eq!(r, Rect::new(100.0, 60.0, 100.0, 140.0));
    }

    #[test]
    fn resize_never_inverts_below_min_size() {
        let s = solver(AspectRatioMode::Free);
        let start = Rect::new(100.0, 100.0, 100.0, 100.0);
        let r = s.resize(start, HandleType::BottomRight, Point::new(-500.0, -500.0), BoundaryMode::Hard);
        assert_eq!(r, Rect::new(100.0, 100.0, 20.0, 20.0));
        let r = s.resize(start, HandleType::TopLeft, Point::new(500.0, 500.0), BoundaryMode::Hard);
        assert_eq!(r, Rect::new(180.0, 180.0, 20.0, 20.0));
    }

    #[test]
    fn free_resize_elastic_and_hard_at_boundary() {
        let s = solver(AspectRatioMode::Free);
        let start = Rect::new(200.0, 100.0, 50.0, 50.0);
        let live = s.resize(start, HandleType::MiddleRight, Point::new(150.0, 0.0), BoundaryMode::Elastic);
        assert!((live.max_x() - 330.0).abs() < EPS);
        let hard = s.resize(start, HandleType::MiddleRight, Point::new(150.0, 0.0), BoundaryMode::Hard);
        assert_eq!(hard.max_x(), 300.0);

        let live = s.resize(start, HandleType::MiddleLeft, Point::new(-300.0, 0.0), BoundaryMode::Elastic);
        assert!((live.min_x() + 30.0).abs() < EPS, "{live:?}");
    }

    #[test]
    fn locked_corner_resize_grows_from_anchor() {
        let s = solver(AspectRatioMode::Fixed(1.0));
        let start = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r = s.resize(start, HandleType::BottomRight, Point::new(20.0, 20.0), BoundaryMode::Hard);
        assert!(r.approx_eq(&Rect::new(0.0, 0.0, 120.0, 120.0), EPS), "{r:?}");
    }

    #[test]
    fn locked_corner_resize_follows_dominant_axis() {
        let s = solver(AspectRatioMode::Fixed(2.0));
        let start = Rect::new(100.0, 100.0, 100.0, 50.0);
        let r = s.resize(start, HandleType::TopLeft, Point::new(-40.0, -5.0), BoundaryMode::Hard);
        assert!((r.width / r.height - 2.0).abs() < EPS);
        assert!((r.width - 140.0).abs() < EPS);
        assert!((r.max_x() - 200.0).abs() < EPS);
        assert!((r.max_y() - 150.0).abs() < EPS);
    }

    #[test]
    fn locked_resize_stops_at_display_without_breaking_ratio() {
        let s = solver(AspectRatioMode::Fixed(1.5));
        let start = Rect::new(150.0, 150.0, 60.0, 40.0);
        let r = s.resize(start, HandleType::BottomRight, Point::new(400.0, 10.0), BoundaryMode::Hard);
        assert!((r.width / r.height - 1.5).abs() < EPS);
        assert!(s.display().contains_rect(&r, EPS), "{r:?}");
        assert_eq!(r.x, 150.0);
        assert_eq!(r.y, 150.0);
    }

    #[test]
    fn locked_edge_resize_keeps_ratio_centered() {
        let s = solver(AspectRatioMode::Fixed(1.0));
        let start = Rect::new(100.0, 100.0, 50.0, 50.0);
        let r = s.resize(start, HandleType::MiddleRight, Point::new(30.0, 0.0), BoundaryMode::Hard);
        assert!(r.approx_eq(&Rect::new(100.0, 85.0, 80.0, 80.0), EPS), "{r:?}");
    }

    #[test]
    fn locked_resize_elastic_keeps_ratio() {
        let s = solver(AspectRatioMode::Fixed(0.5));
        let start = Rect::new(200.0, 100.0, 50.0, 100.0);
        for step in 0..40 {
            let d = f64::from(step) * 10.0;
            let r = s.resize(start, HandleType::BottomRight, Point::new(d, d), BoundaryMode::Elastic);
            assert!((r.width / r.height - 0.5).abs() < 1e-9, "step {step}: {r:?}");
            assert!(r.width >= 20.0 - EPS && r.height >= 20.0 - EPS);
        }
    }

    #[test]
    fn create_is_direction_independent() {
        let s = solver(AspectRatioMode::Free);
        let expected = Rect::new(50.0, 50.0, 200.0, 100.0);
        assert_eq!(s.create(Point::new(50.0, 50.0), Point::new(250.0, 150.0)), expected);
        assert_eq!(s.create(Point::new(250.0, 150.0), Point::new(50.0, 50.0)), expected);
        assert_eq!(s.create(Point::new(50.0, 150.0), Point::new(250.0, 50.0)), expected);
    }

    #[test]
    fn create_clamps_points_and_min_size() {
        let s = solver(AspectRatioMode::Free);
        let r = s.create(Point::new(290.0, 10.0), Point::new(400.0, 12.0));
        assert_eq!(r, Rect::new(280.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn create_under_lock_respects_ratio() {
        let s = solver(AspectRatioMode::Fixed(2.0));
        let r = s.create(Point::new(100.0, 100.0), Point::new(40.0, 90.0));
        assert!((r.width / r.height - 2.0).abs() < EPS);
        assert!((r.max_x() - 100.0).abs() < EPS);
        assert!((r.max_y() - 100.0).abs() < EPS);
    }

    #[test]
    fn locked_create_at_edge_keeps_ratio_and_min_size() {
        let s = solver(AspectRatioMode::Fixed(2.0));
        let r = s.create(Point::new(299.0, 150.0), Point::new(310.0, 152.0));
        assert!(r.approx_eq(&Rect::new(260.0, 150.0, 40.0, 20.0), EPS), "{r:?}");
    }

    #[test]
    fn locked_min_size_shrinks_to_fit_short_display() {
        let s = ConstraintSolver::new(
            Rect::new(0.0, 0.0, 300.0, 30.0),
            AspectRatioMode::Fixed(0.25),
            &EditorConfig::default(),
        );
        let min = s.min_size();
        assert!((min.width - 7.5).abs() < EPS && (min.height - 30.0).abs() < EPS, "{min:?}");

        let fitted = s.fit_aspect(Rect::new(100.0, 0.0, 10.0, 30.0));
        assert!((fitted.width / fitted.height - 0.25).abs() < EPS, "{fitted:?}");
        assert!(s.display().contains_rect(&fitted, EPS), "{fitted:?}");

        let created = s.create(Point::new(150.0, 10.0), Point::new(152.0, 12.0));
        assert!(created.approx_eq(&Rect::new(150.0, 0.0, 7.5, 30.0), EPS), "{created:?}");
    }

    #[test]
    fn fit_aspect_preserves_center_and_area() {
        let s = solver(AspectRatioMode::Fixed(1.0));
        let rect = Rect::new(50.0, 100.0, 200.0, 50.0);
        let fitted = s.fit_aspect(rect);
        assert!((fitted.width - 100.0).abs() < EPS);
        assert!((fitted.height - 100.0).abs() < EPS);
        assert!((fitted.mid_x() - rect.mid_x()).abs() < EPS);
        assert!((fitted.mid_y() - rect.mid_y()).abs() < EPS);
    }

    #[test]
    fn fit_aspect_shrinks_to_display() {
        let s = solver(AspectRatioMode::Fixed(4.0));
        let fitted = s.fit_aspect(Rect::new(0.0, 0.0, 300.0, 300.0));
        assert!((fitted.width - 300.0).abs() < EPS);
        assert!((fitted.height - 75.0).abs() < EPS);
        assert!(s.display().contains_rect(&fitted, EPS));
    }

    #[test]
    fn default_rect_is_centered() {
        let s = solver(AspectRatioMode::Free);
        assert_eq!(s.default_rect(), Rect::new(37.5, 37.5, 225.0, 225.0));

        let s = solver(AspectRatioMode::Fixed(16.0 / 9.0));
        let r = s.default_rect();
        assert!((r.width - 225.0).abs() < EPS);
        assert!((r.width / r.height - 16.0 / 9.0).abs() < EPS);
        assert!((r.mid_y() - 150.0).abs() < EPS);
    }
}
