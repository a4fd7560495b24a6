use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn default_converges_to_target() {
    let cfg = SpringConfig::default();
    assert!((cfg.damping_ratio() - 1.0).abs() < 1e-9);
    let v = spring(200.0, fps30(), &cfg, 0.0, 1.0);
    assert!((v - 1.0).abs() < 0.01);
}

#[test]
fn starts_at_from_for_non_positive_frames() {
    let cfg = SpringConfig::bouncy();
    assert_eq!(spring(0.0, fps30(), &cfg, 3.0, 7.0), 3.0);
    assert_eq!(spring(-12.0, fps30(), &cfg, 3.0, 7.0), 3.0);
}

#[test]
fn critically_damped_never_overshoots() {
    let cfg = SpringConfig::critically_damped();
    let mut prev = 0.0;
    for f in 1..300 {
        let v = spring(f as f64, fps30(), &cfg, 0.0, 1.0);
        assert!(v <= 1.0 + 1e-12);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn bouncy_overshoots_then_settles() {
    let cfg = SpringConfig::bouncy();
    let peak = (1..60)
        .map(|f| spring(f as f64, fps30(), &cfg, 0.0, 1.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.05);
    assert!((spring(300.0, fps30(), &cfg, 0.0, 1.0) - 1.0).abs() < 1e-3);

    let clamped = SpringConfig {
        overshoot_clamping: true,
        ..cfg
    };
    for f in 1..60 {
        assert!(spring(f as f64, fps30(), &clamped, 0.0, 1.0) <= 1.0);
    }
}

#[test]
fn overdamped_is_monotonic_and_slower() {
    let gentle = SpringConfig::gentle();
    let crit = SpringConfig::critically_damped();
    assert!(gentle.damping_ratio() > 1.0);
    let g = spring(10.0, fps30(), &gentle, 0.0, 1.0);
    let c = spring(10.0, fps30(), &crit, 0.0, 1.0);
    assert!(g < c);
    assert!(g > 0.0);
}

#[test]
fn output_is_continuous_near_start() {
    for cfg in [
        SpringConfig::critically_damped(),
        SpringConfig::bouncy(),
        SpringConfig::gentle(),
    ] {
        let v = spring(1e-6, fps30(), &cfg, 0.0, 1.0);
        assert!(v.abs() < 1e-6, "{cfg:?}");
    }
}

#[test]
fn damping_ratio_round_trips() {
    let cfg = SpringConfig::from_damping_ratio(0.3, 170.0, 2.0);
    assert!((cfg.damping_ratio() - 0.3).abs() < 1e-9);
}

#[test]
fn invalid_configs_are_rejected() {
    let mut cfg = SpringConfig::default();
    cfg.mass = 0.0;
    assert!(cfg.validate().unwrap_err().is_configuration());
    let mut cfg = SpringConfig::default();
    cfg.damping = -1.0;
    assert!(cfg.validate().is_err());
    let track = SpringTrack {
        duration_frames: Some(0),
        ..SpringTrack::default()
    };
    assert!(track.validate().is_err());
}

#[test]
fn settle_frame_orders_presets() {
    let crit = settle_frame(fps30(), &SpringConfig::critically_damped(), 0.005);
    let bouncy = settle_frame(fps30(), &SpringConfig::bouncy(), 0.005);
    assert!(crit > 0);
    assert!(bouncy > crit);
    let v = spring(crit as f64, fps30(), &SpringConfig::critically_damped(), 0.0, 1.0);
    assert!((1.0 - v).abs() < 0.005);
}

#[test]
fn track_honors_delay_and_duration() {
    let track = SpringTrack {
        from: 10.0,
        to: 20.0,
        delay_frames: 15,
        ..SpringTrack::default()
    };
    assert_eq!(track.sample(15.0, fps30()), 10.0);
    assert!(track.sample(30.0, fps30()) > 10.0);

    let stretched = SpringTrack {
        duration_frames: Some(90),
        ..SpringTrack::default()
    };
    let at_end = stretched.sample(90.0, fps30());
    assert!((at_end - 1.0).abs() < 0.006);
    let early = stretched.sample(20.0, fps30());
    let unstretched = SpringTrack::default().sample(20.0, fps30());
    assert!(early < unstretched);
}

#[test]
fn settle_frame_is_the_first_frame_inside_the_band() {
    let cfg = SpringConfig::critically_damped();
    let f = settle_frame(fps30(), &cfg, 0.005);
    let before = spring((f - 1) as f64, fps30(), &cfg, 0.0, 1.0);
    assert!((1.0 - before).abs() >= 0.005);

    let bouncy = SpringConfig::bouncy();
    let fb = settle_frame(fps30(), &bouncy, 0.005);
    for frame in fb..fb + 300 {
        let v = spring(frame as f64, fps30(), &bouncy, 0.0, 1.0);
        assert!((1.0 - v).abs() < 0.005, "frame {frame}");
    }

    let gentle = SpringConfig::gentle();
    let fg = settle_frame(fps30(), &gentle, 0.005);
    assert!(fg > f);
    let v = spring(fg as f64, fps30(), &gentle, 0.0, 1.0);
    assert!((1.0 - v).abs() < 0.005);
}

#[test]
fn settle_frame_scales_with_fps_not_search_length() {
    let cfg = SpringConfig::critically_damped();
    let slow = settle_frame(fps30(), &cfg, 0.005) as f64 / 30.0;
    let fast_fps = Fps::new(1_000_000, 1).unwrap();
    let fast = settle_frame(fast_fps, &cfg, 0.005) as f64 / 1_000_000.0;
    assert!((slow - fast).abs() <= 1.0 / 30.0);

    let undamped = SpringConfig {
        damping: 0.0,
        ..cfg
    };
    assert_eq!(settle_frame(fast_fps, &undamped, 0.005), 60_000_000);
    assert_eq!(settle_frame(fps30(), &cfg, 0.0), 1800);
}

#[test]
fn stretched_track_lands_on_its_duration_at_high_rates() {
    let fps = Fps::new(240, 1).unwrap();
    let track = SpringTrack {
        duration_frames: Some(30),
        ..SpringTrack::default()
    };
    assert!((track.sample(30.0, fps) - 1.0).abs() < 0.005);
    let mut prev = 0.0;
    for f in 0..=30 {
        let v = track.sample(f as f64, fps);
        assert!(v >= prev);
        prev = v;
    }
}
