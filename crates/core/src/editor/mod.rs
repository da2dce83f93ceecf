//! The crop editor state machine.
//!
//! [`CropEditor`] owns the crop rectangle and the active pointer session and
//! routes every input event through the classifier and the constraint
//! solver. It is a reducer: [`CropEditor::process`] takes one event and
//! returns the change to report, if any. Hosts that prefer callbacks use
//! [`CropEditor::dispatch`] with a [`CropListener`].
//!
//! # Architecture
//!
//! - [`state`]: editor states, input events and emitted changes
//! - [`selection`]: create-gesture validation
//!
//! # Usage
//!
//! ```
//! use reelcrop_core::{CropEditor, CropEvent, EditorConfig};
//!
//! let mut editor = CropEditor::new(EditorConfig::default());
//! editor.process(CropEvent::SetMediaSize { width: 1920.0, height: 1080.0 });
//! editor.process(CropEvent::SetViewportBounds { width: 640.0, height: 360.0 });
//!
//! editor.process(CropEvent::PointerDown { x: 100.0, y: 50.0 });
//! editor.process(CropEvent::PointerMove { x: 300.0, y: 200.0 });
//! let change = editor.process(CropEvent::PointerUp { x: 300.0, y: 200.0 }).unwrap();
//!
//! assert!(change.is_final());
//! assert_eq!(change.rect.width, 600.0);
//! ```

pub mod selection;
pub mod state;

pub use selection::SelectionEvent;
pub use state::{ChangePhase, CropChange, CropEvent, CropListener, EditorState};

use crate::aspect::AspectRatioMode;
use crate::classifier::classify;
use crate::config::EditorConfig;
use crate::constraints::{BoundaryMode, ConstraintSolver};
use crate::display::fit_display_rect;
use crate::error::{EditorError, Result};
use crate::geometry::{Point, Rect, Size};
use crate::handles::HandleLayout;
use crate::mapping::CoordinateMapper;
use selection::finish_selection;
use state::{Gesture, PointerSession};
use tracing::{debug, trace, warn};

/// Tolerance for deciding that a layout change moved the media-space crop.
const CHANGE_EPSILON: f64 = 1e-6;

/// Interactive crop-region editor.
#[derive(Debug, Clone)]
pub struct CropEditor {
    config: EditorConfig,
    aspect: AspectRatioMode,
    media: Size,
    viewport: Size,
    display: Option<Rect>,
    crop: Option<Rect>,
    /// Display rect the crop was last expressed against.
    crop_basis: Option<Rect>,
    session: Option<PointerSession>,
}

impl Default for CropEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl CropEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            aspect: AspectRatioMode::Free,
            media: Size::default(),
            viewport: Size::default(),
            display: None,
            crop: None,
            crop_basis: None,
            session: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn aspect_mode(&self) -> AspectRatioMode {
        self.aspect
    }

    pub fn state(&self) -> EditorState {
        self.session
            .map(|session| session.state())
            .unwrap_or(EditorState::Idle)
    }

    /// True once media size and viewport produce a usable display rect.
    pub fn is_ready(&self) -> bool {
        self.display.is_some()
    }

    /// Where the media is drawn inside the viewport.
    pub fn display_rect(&self) -> Option<Rect> {
        self.display
    }

    /// Current crop in display space, including elastic overshoot mid-drag.
    pub fn crop_rect(&self) -> Option<Rect> {
        self.crop
    }

    /// Handle anchors for rendering, when a crop exists.
    pub fn handle_layout(&self) -> Option<HandleLayout> {
        self.crop.as_ref().map(HandleLayout::new)
    }

    pub fn mapper(&self) -> Option<CoordinateMapper> {
        CoordinateMapper::new(self.display?, self.media)
    }

    /// Current crop in media pixels, hard-clamped and within media bounds.
    pub fn media_crop(&self) -> Option<Rect> {
        let crop = self.crop?;
        let solver = self.solver()?;
        Some(self.mapper()?.to_media_space(solver.clamp_hard(crop)))
    }

    /// Processes one event and returns the change to report, if any.
    pub fn process(&mut self, event: CropEvent) -> Option<CropChange> {
        match event {
            CropEvent::SetMediaSize { width, height } => {
                self.set_media_size(Size::new(width, height))
            }
            CropEvent::SetViewportBounds { width, height } => {
                self.set_viewport_bounds(Size::new(width, height))
            }
            CropEvent::SetAspectRatio { mode } => match self.set_aspect_ratio_mode(mode) {
                Ok(change) => change,
                Err(err) => {
                    warn!(%err, "ignoring aspect ratio change");
                    None
                }
            },
            CropEvent::Reset => self.reset_crop(),
            CropEvent::Clear => {
                self.clear_crop();
                None
            }
            CropEvent::SetMediaCrop { rect } => match self.set_media_crop(rect) {
                Ok(change) => change,
                Err(err) => {
                    warn!(%err, "ignoring media crop");
                    None
                }
            },
            CropEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),
            CropEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            CropEvent::PointerUp { x, y } => self.pointer_up(Point::new(x, y)),
            CropEvent::PointerCancel => self.pointer_cancel(),
        }
    }

    /// Processes one event and forwards any resulting change to `listener`.
    pub fn dispatch(&mut self, event: CropEvent, listener: &mut impl CropListener) {
        if let Some(change) = self.process(event) {
            listener.on_crop_changed(&change);
        }
    }

    pub fn set_media_size(&mut self, media: Size) -> Option<CropChange> {
        let before = self.media_crop();
        let previous_media = std::mem::replace(&mut self.media, media);
        self.relayout(before, previous_media)
    }

    /// Hosts may call this on every layout pass; an unchanged layout leaves
    /// the crop and any running gesture alone.
    pub fn set_viewport_bounds(&mut self, viewport: Size) -> Option<CropChange> {
        let before = self.media_crop();
        self.viewport = viewport;
        self.relayout(before, self.media)
    }

    /// Switches the aspect mode. An existing crop is refit around its
    /// center; without one a centered default is created.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidAspectRatio`] for a non-positive or
    /// non-finite ratio.
    pub fn set_aspect_ratio_mode(&mut self, mode: AspectRatioMode) -> Result<Option<CropChange>> {
        let mode = mode.validated()?;
        let interrupted = self.interrupt_gesture();
        self.aspect = mode;
        debug!(%mode, "aspect ratio mode changed");

        let Some(solver) = self.solver() else {
            return Ok(interrupted);
        };
        let rect = match self.crop {
            Some(crop) => solver.fit_aspect(crop),
            None => solver.default_rect(),
        };
        self.set_crop(rect);
        Ok(self.final_change().or(interrupted))
    }

    /// Replaces the crop with the centered default for the current mode.
    pub fn reset_crop(&mut self) -> Option<CropChange> {
        let interrupted = self.interrupt_gesture();
        let Some(solver) = self.solver() else {
            return interrupted;
        };
        self.set_crop(solver.default_rect());
        debug!("crop reset to default");
        self.final_change().or(interrupted)
    }

    /// Drops the crop; the editor goes back to having no selection. A
    /// running gesture is abandoned along with the crop it was editing.
    pub fn clear_crop(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(state = ?session.state(), "gesture abandoned by clear");
        }
        self.crop = None;
        self.crop_basis = None;
        debug!("crop cleared");
    }

    /// Installs a crop given in media pixels, e.g. one restored from a
    /// saved journal entry. The rect is constrained like any other.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptySelection`] if `rect` has no area.
    pub fn set_media_crop(&mut self, rect: Rect) -> Result<Option<CropChange>> {
        if rect.is_empty() {
            return Err(EditorError::EmptySelection);
        }
        let (Some(mapper), Some(solver)) = (self.mapper(), self.solver()) else {
            return Ok(None);
        };
        let display_crop = mapper.to_display_space(rect);
        if display_crop.is_empty() {
            return Err(EditorError::EmptySelection);
        }
        let interrupted = self.interrupt_gesture();
        self.set_crop(solver.fit_aspect(display_crop));
        Ok(self.final_change().or(interrupted))
    }

    /// Starts a gesture. If the previous one never saw its pointer-up, it is
    /// ended as a cancel first and its final change is returned here.
    pub fn pointer_down(&mut self, point: Point) -> Option<CropChange> {
        if !point.is_finite() || !self.is_ready() {
            debug!(x = point.x, y = point.y, "pointer down ignored, layout not ready");
            return None;
        }
        let interrupted = match self.session {
            Some(session) => {
                // A second down without an up: the platform lost our up event.
                debug!(state = ?session.state(), "unterminated gesture, cancelling");
                self.finish_gesture(true)
            }
            None => None,
        };

        let classification = classify(point, self.crop.as_ref(), &self.config);
        let session = PointerSession::begin(classification, point, self.crop);
        debug!(x = point.x, y = point.y, state = ?session.state(), "gesture started");
        self.session = Some(session);
        interrupted
    }

    pub fn pointer_move(&mut self, point: Point) -> Option<CropChange> {
        if !point.is_finite() {
            return None;
        }
        let session = self.session.as_mut()?;
        session.last = point;
        let session = *session;

        let mode = if self.config.elastic_boundary {
            BoundaryMode::Elastic
        } else {
            BoundaryMode::Hard
        };
        let rect = self.solve(&session, mode)?;
        trace!(?rect, state = ?session.state(), "gesture updated");
        self.set_crop(rect);

        if !self.config.live_updates {
            return None;
        }
        Some(CropChange {
            rect: self.media_crop()?,
            phase: ChangePhase::Live,
        })
    }

    pub fn pointer_up(&mut self, point: Point) -> Option<CropChange> {
        let session = self.session.as_mut()?;
        if point.is_finite() {
            session.last = point;
        }
        self.finish_gesture(false)
    }

    /// Ends the gesture like a pointer-up, except that an unfinished create
    /// gesture is thrown away.
    pub fn pointer_cancel(&mut self) -> Option<CropChange> {
        self.session?;
        self.finish_gesture(true)
    }

    fn solver(&self) -> Option<ConstraintSolver> {
        Some(ConstraintSolver::new(self.display?, self.aspect, &self.config))
    }

    fn set_crop(&mut self, rect: Rect) {
        self.crop = Some(rect);
        self.crop_basis = self.display;
    }

    fn final_change(&self) -> Option<CropChange> {
        Some(CropChange {
            rect: self.media_crop()?,
            phase: ChangePhase::Final,
        })
    }

    /// Rectangle for the session's latest pointer position.
    fn solve(&self, session: &PointerSession, mode: BoundaryMode) -> Option<Rect> {
        let solver = self.solver()?;
        let rect = match session.gesture {
            Gesture::Create { .. } => solver.create(session.start, session.last),
            Gesture::Resize { handle, start_rect } => {
                solver.resize(start_rect, handle, session.translation(), mode)
            }
            Gesture::Move { start_rect, offset } => {
                solver.move_to(start_rect, session.last.delta_from(offset), mode)
            }
        };
        Some(rect)
    }

    fn finish_gesture(&mut self, cancelled: bool) -> Option<CropChange> {
        let session = self.session.take()?;
        let solver = self.solver()?;

        match session.gesture {
            Gesture::Create { previous } => {
                let outcome = finish_selection(
                    session.start,
                    session.last,
                    self.config.min_drag_distance,
                    cancelled,
                );
                debug!(?outcome, "create gesture finished");
                match (outcome, previous) {
                    (SelectionEvent::Completed, _) => {
                        self.set_crop(solver.create(session.start, session.last));
                    }
                    (_, Some(previous)) => self.set_crop(solver.clamp_hard(previous)),
                    (_, None) => self.set_crop(solver.default_rect()),
                }
            }
            Gesture::Resize { .. } | Gesture::Move { .. } => {
                let rect = self.solve(&session, BoundaryMode::Hard)?;
                self.set_crop(solver.clamp_hard(rect));
                debug!(state = ?session.state(), cancelled, "gesture finished");
            }
        }
        self.final_change()
    }

    /// Ends an active gesture ahead of a programmatic change and returns its
    /// final change. Callers that emit their own final change report that
    /// instead, since it already includes the gesture's result.
    fn interrupt_gesture(&mut self) -> Option<CropChange> {
        self.session?;
        debug!("gesture interrupted by programmatic change");
        self.finish_gesture(true)
    }

    /// Moves `rect` from the display rect `from` onto the solver's display
    /// rect and constrains it there.
    fn carry(&self, rect: Rect, from: Rect, solver: &ConstraintSolver) -> Rect {
        let remapped = remap(rect, from, solver.display());
        match self.aspect.ratio() {
            Some(ratio) if (remapped.width / remapped.height - ratio).abs() > CHANGE_EPSILON => {
                solver.fit_aspect(remapped)
            }
            _ => solver.clamp_hard(remapped),
        }
    }

    /// Recomputes the display rect and carries the crop and any running
    /// gesture over to it.
    fn relayout(&mut self, before: Option<Rect>, previous_media: Size) -> Option<CropChange> {
        let old_display = self.display;
        let display = fit_display_rect(self.media, self.viewport);
        if display.is_some() && display == old_display && self.media == previous_media {
            return None;
        }
        self.display = display;

        let Some(display) = display else {
            if let Some(session) = self.session.take() {
                debug!(state = ?session.state(), "layout lost mid-gesture");
                if let Gesture::Create { previous } = session.gesture {
                    self.crop = previous;
                }
            }
            debug!(media = ?self.media, viewport = ?self.viewport, "layout not ready");
            return None;
        };
        let solver = self.solver()?;

        if let (Some(session), Some(from)) = (self.session, old_display) {
            let rebased = session.rebased(
                |rect| self.carry(rect, from, &solver),
                |point| remap_point(point, from, display),
            );
            debug!(state = ?rebased.state(), "gesture carried into new layout");
            self.session = Some(rebased);
        }
        if let Some(crop) = self.crop {
            let basis = self.crop_basis.unwrap_or(display);
            let carried = self.carry(crop, basis, &solver);
            self.set_crop(carried);
        }
        trace!(display_rect = ?self.display, crop = ?self.crop, "layout updated");

        let after = self.media_crop()?;
        if before.is_some_and(|before| before.approx_eq(&after, CHANGE_EPSILON)) {
            return None;
        }
        match self.session {
            None => self.final_change(),
            Some(_) if self.config.live_updates => Some(CropChange {
                rect: after,
                phase: ChangePhase::Live,
            }),
            Some(_) => None,
        }
    }
}

/// Carries `rect` from one display rect to another, proportionally.
fn remap(rect: Rect, from: Rect, to: Rect) -> Rect {
    if from.is_empty() {
        return rect;
    }
    let scale_x = to.width / from.width;
    let scale_y = to.height / from.height;
    Rect::new(
        to.x + (rect.x - from.x) * scale_x,
        to.y + (rect.y - from.y) * scale_y,
        rect.width * scale_x,
        rect.height * scale_y,
    )
}

fn remap_point(point: Point, from: Rect, to: Rect) -> Point {
    if from.is_empty() {
        return point;
    }
    Point::new(
        to.x + (point.x - from.x) * to.width / from.width,
        to.y + (point.y - from.y) * to.height / from.height,
    )
}
