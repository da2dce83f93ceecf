//! Property-based invariant tests for the crop editor.
//!
//! Verifies:
//! 1. Every settled crop lies inside the display rect and meets the minimum size
//! 2. A fixed aspect ratio holds on every frame of every gesture
//! 3. Final media-space crops keep the locked ratio
//! 4. Display -> media -> display mapping is lossless for contained rects
//! 5. Pointer-down on a handle anchor always resizes with that handle
//! 6. A create drag shorter than the minimum distance never replaces the crop
//! 7. Replaying the same events yields the same changes
//! 8. Re-sending an unchanged layout between pointer events changes nothing

use proptest::prelude::*;
use reelcrop_core::classifier::classify;
use reelcrop_core::{
    AspectRatioMode, Classification, CoordinateMapper, CropChange, CropEditor, CropEvent,
    EditorConfig, EditorState, HandleLayout, HandleType, Point, Rect, Size,
};

const EPS: f64 = 1e-6;

// ── Strategy helpers ──────────────────────────────────────────────────

/// A pointer position as a fraction of the viewport, allowed to leave it.
fn arb_fraction() -> impl Strategy<Value = (f64, f64)> {
    (-0.3f64..1.3, -0.3f64..1.3)
}

/// One gesture: a down, some moves and an up (or a cancel).
fn arb_gesture() -> impl Strategy<Value = (Vec<(f64, f64)>, bool)> {
    (prop::collection::vec(arb_fraction(), 1..8), any::<bool>())
}

fn arb_gestures() -> impl Strategy<Value = Vec<(Vec<(f64, f64)>, bool)>> {
    prop::collection::vec(arb_gesture(), 1..6)
}

fn arb_handle() -> impl Strategy<Value = HandleType> {
    prop::sample::select(HandleType::ALL.to_vec())
}

fn arb_ratio() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(1.0),
        Just(16.0 / 9.0),
        Just(9.0 / 16.0),
        Just(4.0 / 3.0),
        0.5f64..2.0,
    ]
}

fn ready_editor(config: EditorConfig, media: (f64, f64), viewport: (f64, f64)) -> CropEditor {
    let mut editor = CropEditor::new(config);
    editor.process(CropEvent::SetMediaSize {
        width: media.0,
        height: media.1,
    });
    editor.process(CropEvent::SetViewportBounds {
        width: viewport.0,
        height: viewport.1,
    });
    editor
}

/// Pointer events for one gesture: a down, the moves, then an up or cancel.
fn gesture_events(viewport: (f64, f64), points: &[(f64, f64)], cancel: bool) -> Vec<CropEvent> {
    let at = |(fx, fy): (f64, f64)| (fx * viewport.0, fy * viewport.1);
    let mut events = Vec::with_capacity(points.len() + 1);

    let (x, y) = at(points[0]);
    events.push(CropEvent::PointerDown { x, y });
    for &p in &points[1..] {
        let (x, y) = at(p);
        events.push(CropEvent::PointerMove { x, y });
    }
    let (x, y) = at(points[points.len() - 1]);
    events.push(if cancel {
        CropEvent::PointerCancel
    } else {
        CropEvent::PointerUp { x, y }
    });
    events
}

/// Feeds one gesture and returns every change it produced. `on_frame` runs
/// after every event but the pointer-down.
fn run_gesture(
    editor: &mut CropEditor,
    viewport: (f64, f64),
    points: &[(f64, f64)],
    cancel: bool,
    mut on_frame: impl FnMut(&CropEditor),
) -> Vec<CropChange> {
    let mut changes = Vec::new();
    for event in gesture_events(viewport, points, cancel) {
        changes.extend(editor.process(event));
        if !matches!(event, CropEvent::PointerDown { .. }) {
            on_frame(editor);
        }
    }
    changes
}

fn ratio_matches(rect: &Rect, ratio: f64) -> bool {
    ((rect.width / rect.height) / ratio - 1.0).abs() < EPS
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn settled_crop_is_contained_and_large_enough(
        media in (50.0f64..4000.0, 50.0f64..4000.0),
        viewport in (50.0f64..1500.0, 50.0f64..1500.0),
        elastic in any::<bool>(),
        gestures in arb_gestures(),
    ) {
        let config = EditorConfig::builder()
            .with_elastic_boundary(elastic)
            .build()
            .unwrap();
        let mut editor = ready_editor(config, media, viewport);
        let display = editor.display_rect().unwrap();
        let min_w = 20.0f64.min(display.width);
        let min_h = 20.0f64.min(display.height);

        for (points, cancel) in &gestures {
            run_gesture(&mut editor, viewport, points, *cancel, |_| {});
            prop_assert_eq!(editor.state(), EditorState::Idle);

            let crop = editor.crop_rect().unwrap();
            prop_assert!(display.contains_rect(&crop, EPS), "{:?} outside {:?}", crop, display);
            prop_assert!(crop.width >= min_w - EPS && crop.height >= min_h - EPS, "{:?}", crop);

            let media_crop = editor.media_crop().unwrap();
            let bounds = Rect::new(0.0, 0.0, media.0, media.1);
            prop_assert!(bounds.contains_rect(&media_crop, EPS * media.0.max(media.1)));
        }
    }

    #[test]
    fn locked_ratio_holds_on_every_frame(
        media in (800.0f64..2000.0, 800.0f64..2000.0),
        viewport in (300.0f64..1000.0, 300.0f64..1000.0),
        ratio in arb_ratio(),
        gestures in arb_gestures(),
    ) {
        let mut editor = ready_editor(EditorConfig::default(), media, viewport);
        let initial = editor
            .process(CropEvent::SetAspectRatio { mode: AspectRatioMode::Fixed(ratio) })
            .unwrap();
        prop_assert!(ratio_matches(&initial.rect, ratio));

        for (points, cancel) in &gestures {
            let mut frames_ok = true;
            let changes = run_gesture(&mut editor, viewport, points, *cancel, |editor| {
                if let Some(crop) = editor.crop_rect() {
                    frames_ok &= ratio_matches(&crop, ratio);
                }
            });
            prop_assert!(frames_ok, "ratio broken mid-gesture, now {:?}", editor.crop_rect());

            for change in changes.iter().filter(|c| c.is_final()) {
                prop_assert!(ratio_matches(&change.rect, ratio), "{:?}", change);
            }
        }
    }

    #[test]
    fn mapping_round_trips_contained_rects(
        media in (10.0f64..8000.0, 10.0f64..8000.0),
        viewport in (10.0f64..3000.0, 10.0f64..3000.0),
        (fx, fy, fw, fh) in (0.0f64..0.5, 0.0f64..0.5, 0.01f64..0.5, 0.01f64..0.5),
    ) {
        let display = reelcrop_core::display::fit_display_rect(
            Size::new(media.0, media.1),
            Size::new(viewport.0, viewport.1),
        )
        .unwrap();
        let mapper = CoordinateMapper::new(display, Size::new(media.0, media.1)).unwrap();
        let rect = Rect::new(
            display.x + fx * display.width,
            display.y + fy * display.height,
            fw * display.width,
            fh * display.height,
        );

        let back = mapper.to_display_space(mapper.to_media_space(rect));
        prop_assert!(back.approx_eq(&rect, 1e-6 * viewport.0.max(viewport.1)), "{:?} -> {:?}", rect, back);
    }

    #[test]
    fn pointer_on_anchor_resizes_with_that_handle(
        (x, y) in (-500.0f64..500.0, -500.0f64..500.0),
        (w, h) in (60.0f64..600.0, 60.0f64..600.0),
        handle in arb_handle(),
    ) {
        let crop = Rect::new(x, y, w, h);
        let anchor = HandleLayout::new(&crop).anchor(handle);
        let classification = classify(anchor, Some(&crop), &EditorConfig::default());
        prop_assert_eq!(classification, Classification::Resizing(handle));
    }

    #[test]
    fn short_create_never_replaces_crop(
        (sx, sy) in (0.1f64..0.9, 0.1f64..0.9),
        (dx, dy) in (-3.0f64..3.0, -3.0f64..3.0),
        has_prior in any::<bool>(),
    ) {
        let viewport = (400.0, 400.0);
        let mut editor = ready_editor(EditorConfig::default(), viewport, viewport);
        let prior = if has_prior {
            // Small crop in a corner, away from the start area.
            editor.set_media_crop(Rect::new(0.0, 0.0, 30.0, 30.0)).unwrap();
            editor.crop_rect()
        } else {
            None
        };
        let start = Point::new(80.0 + sx * 280.0, 80.0 + sy * 280.0);

        editor.process(CropEvent::PointerDown { x: start.x, y: start.y });
        editor.process(CropEvent::PointerMove { x: start.x + dx, y: start.y + dy });
        let change = editor.process(CropEvent::PointerUp { x: start.x + dx, y: start.y + dy });
        prop_assert!(change.is_some());

        let expected = prior.unwrap_or(Rect::new(50.0, 50.0, 300.0, 300.0));
        let crop = editor.crop_rect().unwrap();
        prop_assert!(crop.approx_eq(&expected, EPS), "{:?} != {:?}", crop, expected);
    }

    #[test]
    fn replay_is_deterministic(
        media in (100.0f64..2000.0, 100.0f64..2000.0),
        viewport in (100.0f64..1000.0, 100.0f64..1000.0),
        gestures in arb_gestures(),
    ) {
        let run = || {
            let mut editor = ready_editor(EditorConfig::default(), media, viewport);
            gestures
                .iter()
                .flat_map(|(points, cancel)| {
                    run_gesture(&mut editor, viewport, points, *cancel, |_| {})
                })
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn repeated_layout_passes_are_transparent(
        media in (100.0f64..2000.0, 100.0f64..2000.0),
        viewport in (100.0f64..1000.0, 100.0f64..1000.0),
        ratio in prop::option::of(arb_ratio()),
        gestures in arb_gestures(),
    ) {
        let mut plain = ready_editor(EditorConfig::default(), media, viewport);
        if let Some(ratio) = ratio {
            plain.process(CropEvent::SetAspectRatio { mode: AspectRatioMode::Fixed(ratio) });
        }
        let mut relaid = plain.clone();
        let layout = [
            CropEvent::SetMediaSize { width: media.0, height: media.1 },
            CropEvent::SetViewportBounds { width: viewport.0, height: viewport.1 },
        ];

        for (points, cancel) in &gestures {
            for event in gesture_events(viewport, points, *cancel) {
                let expected = plain.process(event);
                for pass in layout {
                    prop_assert_eq!(relaid.process(pass), None);
                }
                prop_assert_eq!(relaid.process(event), expected);
                prop_assert_eq!(relaid.state(), plain.state());
            }
        }
        prop_assert_eq!(relaid.crop_rect(), plain.crop_rect());
    }
}
