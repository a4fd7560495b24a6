use super::*;
use crate::{
    animation::{ease::Ease, keyframes::KeyframeTrack},
    camera::directives::{CameraDirectives, ZoomDirective},
    foundation::core::{Fps, FrameRange, Point},
    scene::dsl::{CompositionBuilder, SceneBuilder, rect_element, text_element},
    scene::transition::{TransitionKind, TransitionSpec},
};

fn canvas() -> Canvas {
    Canvas {
        width: 1000,
        height: 500,
    }
}

fn fps() -> Fps {
    Fps { num: 30, den: 1 }
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn frames_past_the_end_resolve_to_nothing() {
    let comp = CompositionBuilder::new(fps(), canvas())
        .scene(SceneBuilder::new("a", 0, 10).build().unwrap())
        .build()
        .unwrap();
    let state = Evaluator::eval_frame(&comp, FrameIndex(10_000)).unwrap();
    assert!(state.scenes.is_empty());
    assert_eq!(state.frame, FrameIndex(10_000));
}

#[test]
fn elements_sample_on_the_scene_local_clock() {
    let track = KeyframeTrack::from_to(0.0, 10.0, 0.0, 100.0, Ease::Linear).unwrap();
    let comp = CompositionBuilder::new(fps(), canvas())
        .scene(SceneBuilder::new("first", 0, 90).build().unwrap())
        .scene(
            SceneBuilder::new("second", 90, 90)
                .element(text_element("t", "hello", 40.0, 0.0, 0.0).with_y(track))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let state = Evaluator::eval_frame(&comp, FrameIndex(95)).unwrap();
    assert_eq!(state.scenes.len(), 1);
    let scene = &state.scenes[0];
    assert_eq!(scene.id, "second");
    assert_eq!(scene.local_frame, 5);
    assert!((scene.elements[0].y - 50.0).abs() < 1e-12);
}

#[test]
fn world_matrix_composes_camera_about_canvas_center() {
    let camera = CameraDirectives {
        zoom: Some(ZoomDirective {
            from: 2.0,
            to: 2.0,
            start: 0.0,
            end: 10.0,
            ease: Ease::Linear,
        }),
        ..CameraDirectives::default()
    };
    let comp = CompositionBuilder::new(fps(), canvas())
        .scene(
            SceneBuilder::new("s", 0, 30)
                .camera(camera)
                .element(rect_element("r", 10.0, 10.0, Rgba8::WHITE, 600.0, 250.0))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let state = Evaluator::eval_frame(&comp, FrameIndex(3)).unwrap();
    let el = &state.scenes[0].elements[0];
    assert!(close(el.world * Point::ORIGIN, Point::new(700.0, 250.0)));
    assert!(close(
        state.scenes[0].camera_affine * Point::new(500.0, 250.0),
        Point::new(500.0, 250.0)
    ));
}

#[test]
fn identity_scene_places_elements_at_their_anchor() {
    let comp = CompositionBuilder::new(fps(), canvas())
        .scene(
            SceneBuilder::new("s", 0, 30)
                .element(rect_element("r", 10.0, 10.0, Rgba8::WHITE, 100.0, 200.0))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let state = Evaluator::eval_frame(&comp, FrameIndex(0)).unwrap();
    let scene = &state.scenes[0];
    assert_eq!(scene.camera, Transform::IDENTITY);
    assert_eq!(scene.phase, ScenePhase::Steady);
    assert!(close(
        scene.elements[0].world * Point::ORIGIN,
        Point::new(100.0, 200.0)
    ));
}

#[test]
fn fade_in_scales_element_opacity() {
    let comp = CompositionBuilder::new(fps(), canvas())
        .scene(
            SceneBuilder::new("s", 0, 30)
                .transition_in(TransitionSpec {
                    kind: TransitionKind::Fade,
                    duration_frames: 5,
                    ease: Ease::Linear,
                })
                .element(text_element("t", "x", 20.0, 0.0, 0.0).with_opacity(0.8))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let at = |f| Evaluator::eval_frame(&comp, FrameIndex(f)).unwrap();
    let s = at(2);
    assert_eq!(s.scenes[0].phase, ScenePhase::Entering);
    assert!((s.scenes[0].opacity - 0.5).abs() < 1e-12);
    assert!((s.scenes[0].elements[0].opacity - 0.4).abs() < 1e-12);

    let s = at(10);
    assert!(s.scenes[0].transition_in.is_none());
    assert!((s.scenes[0].elements[0].opacity - 0.8).abs() < 1e-12);
}

#[test]
fn painter_order_follows_z() {
    let comp = CompositionBuilder::new(fps(), canvas())
        .scene(
            SceneBuilder::new("top", 0, 30)
                .z(5)
                .element(rect_element("hi", 1.0, 1.0, Rgba8::WHITE, 0.0, 0.0).with_z(3))
                .element(rect_element("lo", 1.0, 1.0, Rgba8::WHITE, 0.0, 0.0))
                .build()
                .unwrap(),
        )
        .scene(SceneBuilder::new("bottom", 0, 30).build().unwrap())
        .build()
        .unwrap();
    let state = Evaluator::eval_frame(&comp, FrameIndex(1)).unwrap();
    let ids: Vec<_> = state.scenes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["bottom", "top"]);
    let els: Vec<_> = state.scenes[1]
        .elements
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(els, ["lo", "hi"]);
}

#[test]
fn element_windows_hide_elements_outside_them() {
    let mut el = rect_element("r", 1.0, 1.0, Rgba8::WHITE, 0.0, 0.0);
    el.window = Some(FrameRange {
        start: FrameIndex(5),
        end: FrameIndex(8),
    });
    let comp = CompositionBuilder::new(fps(), canvas())
        .scene(SceneBuilder::new("s", 10, 30).element(el).build().unwrap())
        .build()
        .unwrap();
    let count = |f| {
        Evaluator::eval_frame(&comp, FrameIndex(f)).unwrap().scenes[0]
            .elements
            .len()
    };
    assert_eq!(count(14), 0);
    assert_eq!(count(15), 1);
    assert_eq!(count(17), 1);
    assert_eq!(count(18), 0);
}

#[test]
fn eval_frame_validates_first() {
    let mut comp = CompositionBuilder::new(fps(), canvas())
        .scene(SceneBuilder::new("s", 0, 30).build().unwrap())
        .build()
        .unwrap();
    comp.scenes[0].duration_frames = 0;
    assert!(
        Evaluator::eval_frame(&comp, FrameIndex(0))
            .unwrap_err()
            .is_configuration()
    );
}

#[test]
fn repeated_evaluation_is_identical() {
    let json = include_str!("../../data/two_scene_ad.json");
    let comp = Composition::from_json(json).unwrap();
    for f in [0, 17, 89, 90, 133, 179, 400] {
        let a = Evaluator::eval_frame(&comp, FrameIndex(f)).unwrap();
        let b = Evaluator::eval_frame(&comp, FrameIndex(f)).unwrap();
        assert_eq!(a, b);
    }
}
