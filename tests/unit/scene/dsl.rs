use super::*;
use crate::animation::{ease::Ease, keyframes::KeyframeTrack, spring::SpringTrack};

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn canvas() -> Canvas {
    Canvas {
        width: 1080,
        height: 1920,
    }
}

#[test]
fn builds_a_valid_composition() {
    let hero = SceneBuilder::new("hero", 0, 90)
        .element(
            text_element("title", "Summer Sale", 96.0, 540.0, 400.0)
                .with_opacity(KeyframeTrack::from_to(0.0, 15.0, 0.0, 1.0, Ease::OutCubic).unwrap()),
        )
        .element(
            rect_element("cta", 400.0, 120.0, Rgba8::rgb(255, 80, 0), 540.0, 1500.0)
                .with_scale(SpringTrack::default())
                .with_z(2),
        )
        .build()
        .unwrap();
    let outro = SceneBuilder::new("outro", 90, 60).z(1).build().unwrap();

    let comp = CompositionBuilder::new(fps(), canvas())
        .seed(9)
        .scene(hero)
        .scene(outro)
        .build()
        .unwrap();
    assert_eq!(comp.duration_frames(), 150);
    assert_eq!(comp.scenes[0].elements.len(), 2);
    assert_eq!(comp.scenes[0].elements[1].z, 2);
}

#[test]
fn build_rejects_invalid_descriptors() {
    assert!(SceneBuilder::new("", 0, 10).build().is_err());
    assert!(SceneBuilder::new("s", -3, 10).build().is_err());

    let err = CompositionBuilder::new(fps(), canvas())
        .scene(SceneBuilder::new("a", 0, 10).build().unwrap())
        .scene(SceneBuilder::new("a", 10, 10).build().unwrap())
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn helpers_place_elements() {
    let t = text_element("t", "hi", 32.0, 10.0, 20.0);
    assert_eq!(t.props.x, Anim::constant(10.0));
    assert_eq!(t.props.y, Anim::constant(20.0));
    assert_eq!(t.props.opacity, Anim::constant(1.0));
    assert!(t.validate().is_ok());
}
