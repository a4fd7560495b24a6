use crate::{
    animation::anim::SampleCtx,
    camera::transform::{Transform, TransformStack},
    foundation::core::{Affine, Canvas, FrameIndex, Rgba8},
    foundation::error::AdreelResult,
    foundation::math::{clamp01, stable_hash64},
    particles::field::ParticleState,
    scene::composer::{ActiveScene, ScenePhase},
    scene::model::{Composition, Element, ElementKind, Scene},
    scene::transition::{ResolvedTransition, TransitionEdge, resolve_transition},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Fully resolved visual state of one frame, ready for an external rasterizer.
pub struct FrameState {
    /// Evaluated global frame.
    pub frame: FrameIndex,
    /// Output resolution.
    pub canvas: Canvas,
    /// Clear color.
    pub background: Rgba8,
    /// Active scenes in painter's order.
    pub scenes: Vec<ResolvedScene>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One active scene resolved on its local clock.
pub struct ResolvedScene {
    /// Scene identifier.
    pub id: String,
    /// Scene-local frame.
    pub local_frame: u64,
    /// Lifecycle phase at `local_frame`.
    pub phase: ScenePhase,
    /// Opacity multiplier from transitions, in `[0, 1]`.
    pub opacity: f64,
    /// Camera transform (pivoting about the canvas center).
    pub camera: Transform,
    /// Camera matrix about the canvas center.
    pub camera_affine: Affine,
    /// Camera composed with the transition transform; applies to all scene content.
    pub content_affine: Affine,
    /// Transition-in state while its window is active.
    pub transition_in: Option<ResolvedTransition>,
    /// Transition-out state while its window is active.
    pub transition_out: Option<ResolvedTransition>,
    /// Visible elements in painter's order.
    pub elements: Vec<ResolvedElement>,
    /// Particle fields, painted above elements. Positions are pre-camera canvas pixels.
    pub particles: Vec<ResolvedParticles>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Element with every animated property sampled.
pub struct ResolvedElement {
    /// Element identifier.
    pub id: String,
    /// Payload, passed through.
    pub kind: ElementKind,
    /// Anchor x in pre-camera canvas pixels.
    pub x: f64,
    /// Anchor y in pre-camera canvas pixels.
    pub y: f64,
    /// Scale and rotation about the anchor.
    pub transform: Transform,
    /// Full matrix: camera, transition, anchor placement, then `transform`.
    pub world: Affine,
    /// Element opacity times scene opacity, in `[0, 1]`.
    pub opacity: f64,
    /// Paint order within the scene.
    pub z: i32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Visible particles of one field.
pub struct ResolvedParticles {
    /// Field identifier.
    pub id: String,
    /// Visible particles in index order.
    pub particles: Vec<ParticleState>,
}

/// Stateless evaluator from composition to per-frame visual state.
pub struct Evaluator;

impl Evaluator {
    /// Validate `comp`, then evaluate one frame.
    ///
    /// Frames past the composition end are not errors; they resolve to no scenes.
    #[tracing::instrument(skip(comp))]
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> AdreelResult<FrameState> {
        comp.validate()?;
        Ok(Self::eval_frame_unchecked(comp, frame))
    }

    /// Evaluate one frame of an already-validated composition.
    pub fn eval_frame_unchecked(comp: &Composition, frame: FrameIndex) -> FrameState {
        let mut active = comp.resolve_active_scenes(frame);
        active.sort_by_key(|a| (a.scene.z, a.index));

        FrameState {
            frame,
            canvas: comp.canvas,
            background: comp.background,
            scenes: active.iter().map(|a| eval_scene(comp, a)).collect(),
        }
    }
}

fn eval_scene(comp: &Composition, active: &ActiveScene<'_>) -> ResolvedScene {
    let scene = active.scene;
    let local = active.local_frame;
    let len = scene.len_frames();
    let center = comp.canvas.center();

    let transition_in = scene
        .transition_in
        .as_ref()
        .and_then(|s| resolve_transition(s, local, len, TransitionEdge::In));
    let transition_out = scene
        .transition_out
        .as_ref()
        .and_then(|s| resolve_transition(s, local, len, TransitionEdge::Out));

    let mut opacity = 1.0;
    let mut transition_affine = Affine::IDENTITY;
    for tr in [transition_in, transition_out].iter().flatten() {
        opacity *= tr.opacity();
        transition_affine =
            transition_affine * tr.transform(comp.canvas).to_affine_about(center);
    }

    let camera = scene.camera.compose(local as f64);
    let camera_affine = camera.to_affine_about(center);

    let mut stack = TransformStack::new();
    stack.push(camera_affine);
    let content_affine = stack.push(transition_affine);

    let ctx = SampleCtx::new(local as f64, comp.fps);
    let mut elements: Vec<ResolvedElement> = scene
        .elements
        .iter()
        .filter(|el| el.window.is_none_or(|w| w.contains(FrameIndex(local))))
        .map(|el| eval_element(el, ctx, opacity, &mut stack))
        .collect();
    // Stable: declaration order breaks z ties.
    elements.sort_by_key(|e| e.z);

    let particles = scene
        .particles
        .iter()
        .map(|field| ResolvedParticles {
            id: field.id.clone(),
            particles: field.render_seeded(
                particle_seed(comp.seed, scene, field.seed, &field.id),
                local as f64,
                comp.fps,
                comp.canvas,
            ),
        })
        .collect();

    ResolvedScene {
        id: scene.id.clone(),
        local_frame: local,
        phase: scene.phase(local),
        opacity,
        camera,
        camera_affine,
        content_affine,
        transition_in,
        transition_out,
        elements,
        particles,
    }
}

fn eval_element(
    el: &Element,
    ctx: SampleCtx,
    scene_opacity: f64,
    stack: &mut TransformStack,
) -> ResolvedElement {
    let p = &el.props;
    let x = p.x.sample(ctx);
    let y = p.y.sample(ctx);
    let transform = Transform {
        scale: p.scale.sample(ctx),
        rotate_deg: p.rotation_deg.sample(ctx),
        ..Transform::IDENTITY
    };

    let world = stack.push(Affine::translate((x, y)) * transform.to_affine());
    stack.pop();

    ResolvedElement {
        id: el.id.clone(),
        kind: el.kind.clone(),
        x,
        y,
        transform,
        world,
        opacity: clamp01(p.opacity.sample(ctx)) * scene_opacity,
        z: el.z,
    }
}

/// Effective particle seed: the field's own seed folded with a per-scene seed derived from the
/// composition seed, so identical fields in different scenes do not line up.
fn particle_seed(comp_seed: u64, scene: &Scene, field_seed: u64, field_id: &str) -> u64 {
    let scene_seed = stable_hash64(comp_seed, &scene.id);
    stable_hash64(scene_seed ^ field_seed, field_id)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
