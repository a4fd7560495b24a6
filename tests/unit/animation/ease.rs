use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InOutSine,
    Ease::OutBack,
    Ease::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    },
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        if ease == Ease::OutBack {
            continue;
        }
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_back_overshoots() {
    assert!(Ease::OutBack.apply(0.8) > 1.0);
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::InQuad.apply(-2.0), 0.0);
    assert_eq!(Ease::InQuad.apply(3.0), 1.0);
}

#[test]
fn derivative_matches_known_slopes() {
    assert_eq!(Ease::Linear.derivative(1.0), 1.0);
    assert_eq!(Ease::InQuad.derivative(1.0), 2.0);
    assert_eq!(Ease::OutCubic.derivative(1.0), 0.0);
    assert_eq!(Ease::OutCubic.derivative(0.0), 3.0);
    assert_eq!(Ease::InOutCubic.derivative(0.0), 0.0);
    assert_eq!(Ease::InOutCubic.derivative(1.0), 0.0);
    assert_eq!(Ease::InOutQuad.derivative(0.5), 2.0);
    assert!((Ease::InOutSine.derivative(0.5) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn derivative_agrees_with_a_central_difference() {
    let h = 1e-5;
    for ease in [
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InOutSine,
        Ease::OutBack,
        Ease::CubicBezier {
            x1: 0.25,
            y1: 0.1,
            x2: 0.25,
            y2: 1.0,
        },
    ] {
        for t in [0.2, 0.37, 0.61, 0.9] {
            let numeric = (ease.apply(t + h) - ease.apply(t - h)) / (2.0 * h);
            assert!(
                (ease.derivative(t) - numeric).abs() < 1e-4,
                "{ease:?} at {t}"
            );
        }
    }
}

#[test]
fn bezier_end_slopes_follow_control_points() {
    let ease = Ease::CubicBezier {
        x1: 0.5,
        y1: 0.25,
        x2: 0.5,
        y2: 0.75,
    };
    assert!((ease.derivative(0.0) - 0.5).abs() < 1e-9);
    assert!((ease.derivative(1.0) - 0.5).abs() < 1e-9);

    let vertical = Ease::CubicBezier {
        x1: 0.0,
        y1: 0.5,
        x2: 1.0,
        y2: 0.5,
    };
    assert!(vertical.derivative(0.0).is_finite());
}

#[test]
fn parses_snake_case_tags() {
    let e: Ease = serde_json::from_str("\"in_out_cubic\"").unwrap();
    assert_eq!(e, Ease::InOutCubic);
    let e: Ease =
        serde_json::from_str("{\"cubic_bezier\": {\"x1\": 0.4, \"y1\": 0.0, \"x2\": 0.2, \"y2\": 1.0}}")
            .unwrap();
    assert!(matches!(e, Ease::CubicBezier { .. }));
}

#[test]
fn bezier_with_out_of_range_x_is_invalid() {
    let e = Ease::CubicBezier {
        x1: 1.5,
        y1: 0.0,
        x2: 0.2,
        y2: 1.0,
    };
    assert!(!e.validate());
    assert!(Ease::Linear.validate());
}
