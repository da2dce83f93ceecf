//! End-to-end event scripts replayed through the editor.

use reelcrop_core::scenario::ReplayStep;
use reelcrop_core::{ChangePhase, Rect, Scenario};

const EPS: f64 = 1e-6;

fn load(json: &str) -> Scenario {
    Scenario::from_json(json).expect("fixture parses")
}

fn phases(steps: &[ReplayStep]) -> Vec<(usize, ChangePhase)> {
    steps.iter().map(|s| (s.event, s.change.phase)).collect()
}

#[test]
fn letterboxed_create_maps_to_media_pixels() {
    let scenario = load(include_str!("fixtures/letterbox_create.json"));
    let (editor, steps) = scenario.replay();

    let display = editor.display_rect().unwrap();
    assert!(display.approx_eq(&Rect::new(0.0, 115.625, 300.0, 168.75), EPS));

    assert_eq!(
        phases(&steps),
        vec![(3, ChangePhase::Live), (4, ChangePhase::Final)]
    );
    let crop = editor.crop_rect().unwrap();
    assert_eq!(crop, Rect::new(50.0, 150.0, 200.0, 50.0));
    let media = steps[1].change.rect;
    assert!(
        media.approx_eq(&Rect::new(320.0, 220.0, 1280.0, 320.0), EPS),
        "{media:?}"
    );
}

#[test]
fn locked_corner_resize_keeps_anchor() {
    let scenario = load(include_str!("fixtures/locked_resize.json"));
    let (_, steps) = scenario.replay();

    assert_eq!(
        phases(&steps),
        vec![
            (2, ChangePhase::Final),
            (3, ChangePhase::Final),
            (5, ChangePhase::Live),
            (6, ChangePhase::Final),
        ]
    );
    assert!(steps[2].change.rect.approx_eq(&Rect::new(0.0, 0.0, 110.0, 110.0), EPS));
    assert!(steps[3].change.rect.approx_eq(&Rect::new(0.0, 0.0, 120.0, 120.0), EPS));
}

#[test]
fn elastic_move_overshoots_then_snaps() {
    let mut scenario = load(include_str!("fixtures/elastic_move.json"));

    // Stop mid-drag to observe the elastic position.
    let full = scenario.events.clone();
    scenario.events.truncate(5);
    let (editor, steps) = scenario.replay();
    let live = editor.crop_rect().unwrap();
    assert!((live.x - 230.0).abs() < EPS, "{live:?}");
    // The emitted live rect is already inside media bounds.
    let emitted = steps.last().unwrap().change;
    assert_eq!(emitted.phase, ChangePhase::Live);
    assert!((emitted.rect.max_x() - 300.0).abs() < EPS);

    scenario.events = full;
    let (editor, steps) = scenario.replay();
    let last = steps.last().unwrap().change;
    assert!(last.is_final());
    assert_eq!(last.rect, Rect::new(200.0, 100.0, 100.0, 100.0));
    assert_eq!(editor.crop_rect(), Some(Rect::new(200.0, 100.0, 100.0, 100.0)));
}

#[test]
fn events_before_layout_are_ignored() {
    let scenario = load(
        r#"{
            "events": [
                { "type": "pointer_down", "x": 10.0, "y": 10.0 },
                { "type": "pointer_up", "x": 90.0, "y": 90.0 },
                { "type": "reset" },
                { "type": "set_media_size", "width": 0.0, "height": 100.0 },
                { "type": "set_viewport_bounds", "width": 200.0, "height": 200.0 },
                { "type": "pointer_down", "x": 10.0, "y": 10.0 },
                { "type": "pointer_up", "x": 90.0, "y": 90.0 }
            ]
        }"#,
    );
    let (editor, steps) = scenario.replay();
    assert!(steps.is_empty());
    assert!(!editor.is_ready());
    assert_eq!(editor.crop_rect(), None);
}
