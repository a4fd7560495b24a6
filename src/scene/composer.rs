use crate::{
    foundation::core::FrameIndex,
    scene::model::{Composition, Scene},
    scene::transition::{TransitionEdge, resolve_transition},
};

/// A scene active at some global frame, with that frame mapped onto the scene's clock.
#[derive(Clone, Copy, Debug)]
pub struct ActiveScene<'a> {
    /// Position in [`Composition::scenes`].
    pub index: usize,
    /// The scene descriptor.
    pub scene: &'a Scene,
    /// `global_frame - scene.start_frame`; always inside `[0, duration_frames)`.
    pub local_frame: u64,
}

/// Lifecycle stage of a scene at a local frame, derived from its transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenePhase {
    /// Outside the scene window.
    Inactive,
    /// Inside the transition-in window.
    Entering,
    /// Between transitions.
    Steady,
    /// Inside the transition-out window.
    Exiting,
}

impl Composition {
    /// Every scene whose window contains `frame`, in composition order.
    ///
    /// Overlapping windows yield several scenes; frames past the end yield none.
    pub fn resolve_active_scenes(&self, frame: FrameIndex) -> Vec<ActiveScene<'_>> {
        self.scenes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.window().contains(frame))
            .map(|(index, scene)| ActiveScene {
                index,
                scene,
                local_frame: frame.0 - scene.window().start.0,
            })
            .collect()
    }
}

impl Scene {
    /// Lifecycle phase at `local_frame`. The transition-in wins where both windows overlap.
    pub fn phase(&self, local_frame: u64) -> ScenePhase {
        let len = self.len_frames();
        if local_frame >= len {
            return ScenePhase::Inactive;
        }
        let in_window = |edge| {
            let spec = match edge {
                TransitionEdge::In => self.transition_in.as_ref(),
                TransitionEdge::Out => self.transition_out.as_ref(),
            };
            spec.and_then(|s| resolve_transition(s, local_frame, len, edge))
                .is_some()
        };
        if in_window(TransitionEdge::In) {
            ScenePhase::Entering
        } else if in_window(TransitionEdge::Out) {
            ScenePhase::Exiting
        } else {
            ScenePhase::Steady
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/composer.rs"]
mod tests;
