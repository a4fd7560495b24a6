use crate::{
    animation::ease::Ease,
    camera::transform::Transform,
    foundation::core::Canvas,
    foundation::error::{AdreelError, AdreelResult},
};

/// Built-in scene transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Opacity ramp.
    Fade,
    /// Content travels leftward across the canvas.
    SlideLeft,
    /// Content travels rightward across the canvas.
    SlideRight,
    /// Content travels upward across the canvas.
    SlideUp,
    /// Content travels downward across the canvas.
    SlideDown,
    /// Opacity ramp combined with a subtle scale about the canvas center.
    Zoom,
}

/// Transition attached to a scene edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Transition kind.
    pub kind: TransitionKind,
    /// Length in frames, clipped to the scene length at evaluation.
    pub duration_frames: u64,
    /// Easing applied to transition progress.
    #[serde(default)]
    pub ease: Ease,
}

impl TransitionSpec {
    /// Validate transition payload invariants.
    pub fn validate(&self) -> AdreelResult<()> {
        if self.duration_frames == 0 {
            return Err(AdreelError::configuration(
                "transition duration_frames must be > 0",
            ));
        }
        if !self.ease.validate() {
            return Err(AdreelError::configuration(
                "transition cubic_bezier x1/x2 must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Which scene edge a transition belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEdge {
    /// Scene start.
    In,
    /// Scene end.
    Out,
}

/// Transition state resolved for a specific frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedTransition {
    /// Transition kind.
    pub kind: TransitionKind,
    /// Edge this transition plays on.
    pub edge: TransitionEdge,
    /// Eased progress in `[0, 1]`.
    pub progress: f64, // 0..1
}

impl ResolvedTransition {
    /// How much of the scene is revealed: rises to 1 on the way in, falls to 0 on the way out.
    pub fn visibility(&self) -> f64 {
        match self.edge {
            TransitionEdge::In => self.progress,
            TransitionEdge::Out => 1.0 - self.progress,
        }
    }

    /// Opacity multiplier contributed to the scene.
    pub fn opacity(&self) -> f64 {
        match self.kind {
            TransitionKind::Fade | TransitionKind::Zoom => self.visibility(),
            _ => 1.0,
        }
    }

    /// Transform contributed to the scene content, pivoting about the canvas center.
    pub fn transform(&self, canvas: Canvas) -> Transform {
        let hidden = 1.0 - self.visibility();
        // Enter from the far side, leave toward the near side.
        let dir = match self.edge {
            TransitionEdge::In => 1.0,
            TransitionEdge::Out => -1.0,
        };
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let mut t = Transform::IDENTITY;
        match self.kind {
            TransitionKind::Fade => {}
            TransitionKind::SlideLeft => t.translate_x = dir * hidden * w,
            TransitionKind::SlideRight => t.translate_x = -dir * hidden * w,
            TransitionKind::SlideUp => t.translate_y = dir * hidden * h,
            TransitionKind::SlideDown => t.translate_y = -dir * hidden * h,
            TransitionKind::Zoom => t.scale = 1.0 - dir * 0.15 * hidden,
        }
        t
    }
}

/// Resolve the transition on `edge` at scene-local frame `local` of a scene `scene_len` long.
///
/// The in-window covers `[0, dur)`, the out-window `[len - dur, len)`, with `dur` clipped to
/// the scene length. Progress reaches exactly 1 on the window's last frame.
pub(crate) fn resolve_transition(
    spec: &TransitionSpec,
    local: u64,
    scene_len: u64,
    edge: TransitionEdge,
) -> Option<ResolvedTransition> {
    if spec.duration_frames == 0 || scene_len == 0 {
        return None;
    }
    let dur = spec.duration_frames.min(scene_len);
    let (window_start, window_end) = match edge {
        TransitionEdge::In => (0, dur),
        TransitionEdge::Out => (scene_len - dur, scene_len),
    };
    if !(window_start <= local && local < window_end) {
        return None;
    }

    let denom = dur - 1;
    let t = if denom == 0 {
        1.0
    } else {
        (local - window_start) as f64 / denom as f64
    };
    Some(ResolvedTransition {
        kind: spec.kind,
        edge,
        progress: spec.ease.apply(t).clamp(0.0, 1.0),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/transition.rs"]
mod tests;
