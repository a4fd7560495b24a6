use super::*;
use crate::{
    eval::evaluator::Evaluator,
    foundation::core::{Canvas, Fps, FrameIndex},
    scene::dsl::{CompositionBuilder, SceneBuilder},
};

fn comp(scene_len: i64) -> Composition {
    CompositionBuilder::new(
        Fps { num: 30, den: 1 },
        Canvas {
            width: 100,
            height: 100,
        },
    )
    .scene(SceneBuilder::new("s", 0, scene_len).build().unwrap())
    .build()
    .unwrap()
}

#[test]
fn in_flight_snapshots_survive_replacement() {
    let handle = CompositionHandle::new(comp(10)).unwrap();
    let before = handle.load().unwrap();

    let prev = handle.replace(comp(50)).unwrap();
    assert!(Arc::ptr_eq(&prev, &before));

    // The old snapshot still evaluates as it did.
    assert!(
        Evaluator::eval_frame(&before, FrameIndex(20))
            .unwrap()
            .scenes
            .is_empty()
    );
    let now = handle.load().unwrap();
    assert_eq!(now.duration_frames(), 50);
    assert_eq!(
        Evaluator::eval_frame(&now, FrameIndex(20))
            .unwrap()
            .scenes
            .len(),
        1
    );
}

#[test]
fn invalid_replacement_keeps_current_snapshot() {
    let handle = CompositionHandle::new(comp(10)).unwrap();
    let mut bad = comp(10);
    bad.scenes[0].start_frame = -4;
    assert!(handle.replace(bad).unwrap_err().is_configuration());
    assert_eq!(handle.load().unwrap().duration_frames(), 10);
}

#[test]
fn handle_is_shareable_across_threads() {
    let handle = Arc::new(CompositionHandle::new(comp(10)).unwrap());
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let h = Arc::clone(&handle);
            std::thread::spawn(move || h.load().unwrap().duration_frames())
        })
        .collect();
    handle.replace(comp(20)).unwrap();
    for r in readers {
        let d = r.join().unwrap();
        assert!(d == 10 || d == 20);
    }
}
