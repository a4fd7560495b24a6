use super::*;

fn shake(intensity: f64, start: f64, duration: f64) -> ShakeDirective {
    ShakeDirective {
        intensity,
        start,
        duration,
    }
}

#[test]
fn empty_directives_are_identity_everywhere() {
    let cam = CameraDirectives::default();
    assert!(cam.is_empty());
    for f in [-30.0, 0.0, 1.0, 17.5, 90.0, 10_000.0] {
        assert_eq!(cam.compose(f), Transform::IDENTITY);
    }
}

#[test]
fn shake_is_contained_to_its_window() {
    let s = shake(10.0, 10.0, 5.0);
    for f in [0.0, 5.0, 9.0, 9.999, 15.0, 16.0, 100.0] {
        assert_eq!(shake_offset(&s, f), ShakeOffset::default(), "frame {f}");
    }
    let inside = (10..15).map(|f| shake_offset(&s, f as f64));
    assert!(inside.into_iter().any(|o| o.x != 0.0 || o.y != 0.0));

    let cam = CameraDirectives {
        shake: Some(s),
        ..CameraDirectives::default()
    };
    assert_eq!(cam.compose(9.0), Transform::IDENTITY);
    assert_eq!(cam.compose(15.0), Transform::IDENTITY);
}

#[test]
fn shake_is_bounded_and_decays() {
    let s = shake(10.0, 0.0, 100.0);
    for f in 0..100 {
        let o = shake_offset(&s, f as f64);
        let bound = 10.0 * (1.0 - f as f64 / 100.0).powi(2) + 1e-12;
        assert!(o.x.abs() <= bound && o.y.abs() <= bound);
        assert!(o.rotate_deg.abs() <= bound * 0.1);
    }
}

#[test]
fn shake_is_a_pure_function_of_frame() {
    let s = shake(6.0, 3.0, 20.0);
    for f in 3..23 {
        let a = shake_offset(&s, f as f64);
        let b = shake_offset(&s, f as f64);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.rotate_deg.to_bits(), b.rotate_deg.to_bits());
    }
}

#[test]
fn zoom_pan_roll_interpolate_and_clamp() {
    let cam = CameraDirectives {
        zoom: Some(ZoomDirective {
            from: 1.0,
            to: 1.2,
            start: 0.0,
            end: 60.0,
            ease: Ease::Linear,
        }),
        pan: Some(PanDirective {
            from: Vec2::new(0.0, 0.0),
            to: Vec2::new(-40.0, 20.0),
            start: 0.0,
            end: 60.0,
            ease: Ease::Linear,
        }),
        roll: Some(RollDirective {
            from: 0.0,
            to: 6.0,
            start: 30.0,
            end: 60.0,
            ease: Ease::Linear,
        }),
        shake: None,
    };
    let mid = cam.compose(30.0);
    assert!((mid.scale - 1.1).abs() < 1e-12);
    assert!((mid.translate_x + 20.0).abs() < 1e-12);
    assert!((mid.translate_y - 10.0).abs() < 1e-12);
    assert_eq!(mid.rotate_deg, 0.0);

    let before = cam.compose(-10.0);
    assert_eq!(before.scale, 1.0);
    let after = cam.compose(500.0);
    assert!((after.scale - 1.2).abs() < 1e-12);
    assert_eq!(after.rotate_deg, 6.0);
}

#[test]
fn shake_adds_to_pan_translation() {
    let base = CameraDirectives {
        pan: Some(PanDirective {
            from: Vec2::new(5.0, 5.0),
            to: Vec2::new(5.0, 5.0),
            start: 0.0,
            end: 1.0,
            ease: Ease::Linear,
        }),
        ..CameraDirectives::default()
    };
    let shaken = CameraDirectives {
        shake: Some(shake(8.0, 0.0, 10.0)),
        ..base
    };
    let o = shake_offset(&shake(8.0, 0.0, 10.0), 3.0);
    let t = shaken.compose(3.0);
    assert!((t.translate_x - (5.0 + o.x)).abs() < 1e-12);
    assert!((t.translate_y - (5.0 + o.y)).abs() < 1e-12);
    assert_eq!(t.rotate_deg, o.rotate_deg);
}

#[test]
fn invalid_windows_are_configuration_errors() {
    let cam = CameraDirectives {
        zoom: Some(ZoomDirective {
            from: 1.0,
            to: 2.0,
            start: 10.0,
            end: 10.0,
            ease: Ease::Linear,
        }),
        ..CameraDirectives::default()
    };
    assert!(cam.validate().unwrap_err().is_configuration());

    let cam = CameraDirectives {
        shake: Some(shake(3.0, 0.0, 0.0)),
        ..CameraDirectives::default()
    };
    assert!(cam.validate().is_err());
}

#[test]
fn parses_json_with_default_ease() {
    let cam: CameraDirectives = serde_json::from_str(
        "{\"zoom\": {\"from\": 1, \"to\": 1.3, \"start\": 0, \"end\": 90},
          \"pan\": {\"from\": [0, 0], \"to\": {\"x\": 30, \"y\": -10}, \"start\": 0, \"end\": 90},
          \"shake\": {\"intensity\": 10, \"start\": 10, \"duration\": 5}}",
    )
    .unwrap();
    cam.validate().unwrap();
    assert_eq!(cam.zoom.unwrap().ease, Ease::InOutCubic);
    assert_eq!(cam.pan.unwrap().to, Vec2::new(30.0, -10.0));
}
