use crate::{
    animation::anim::Anim,
    camera::directives::CameraDirectives,
    foundation::core::{Canvas, Fps, Rgba8},
    foundation::error::{AdreelError, AdreelResult},
    particles::field::ParticleField,
    scene::model::{Composition, Element, ElementKind, ElementProps, Scene},
    scene::transition::TransitionSpec,
};

/// Fluent builder for [`Composition`]; `build` validates.
pub struct CompositionBuilder {
    fps: Fps,
    canvas: Canvas,
    seed: u64,
    background: Rgba8,
    scenes: Vec<Scene>,
}

impl CompositionBuilder {
    /// Start a composition with no scenes.
    pub fn new(fps: Fps, canvas: Canvas) -> Self {
        Self {
            fps,
            canvas,
            seed: 0,
            background: Rgba8::rgb(0, 0, 0),
            scenes: Vec::new(),
        }
    }

    /// Set the global seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the clear color.
    pub fn background(mut self, color: Rgba8) -> Self {
        self.background = color;
        self
    }

    /// Append a scene.
    pub fn scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Validate and return the composition.
    pub fn build(self) -> AdreelResult<Composition> {
        let comp = Composition {
            fps: self.fps,
            canvas: self.canvas,
            seed: self.seed,
            background: self.background,
            scenes: self.scenes,
        };
        comp.validate()?;
        Ok(comp)
    }
}

/// Fluent builder for a single [`Scene`].
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    /// Start a scene covering `[start_frame, start_frame + duration_frames)`.
    pub fn new(id: impl Into<String>, start_frame: i64, duration_frames: i64) -> Self {
        Self {
            scene: Scene {
                id: id.into(),
                start_frame,
                duration_frames,
                z: 0,
                camera: CameraDirectives::default(),
                elements: Vec::new(),
                particles: Vec::new(),
                transition_in: None,
                transition_out: None,
            },
        }
    }

    /// Set paint order among overlapping scenes.
    pub fn z(mut self, z: i32) -> Self {
        self.scene.z = z;
        self
    }

    /// Set the camera directives.
    pub fn camera(mut self, camera: CameraDirectives) -> Self {
        self.scene.camera = camera;
        self
    }

    /// Append an element.
    pub fn element(mut self, element: Element) -> Self {
        self.scene.elements.push(element);
        self
    }

    /// Append a particle field.
    pub fn particles(mut self, field: ParticleField) -> Self {
        self.scene.particles.push(field);
        self
    }

    /// Set the transition at the scene start.
    pub fn transition_in(mut self, spec: TransitionSpec) -> Self {
        self.scene.transition_in = Some(spec);
        self
    }

    /// Set the transition at the scene end.
    pub fn transition_out(mut self, spec: TransitionSpec) -> Self {
        self.scene.transition_out = Some(spec);
        self
    }

    /// Validate and return the scene.
    pub fn build(self) -> AdreelResult<Scene> {
        if self.scene.id.trim().is_empty() {
            return Err(AdreelError::configuration("scene id must be non-empty"));
        }
        self.scene.validate()?;
        Ok(self.scene)
    }
}

/// Text element anchored at `(x, y)` with default props otherwise.
pub fn text_element(
    id: impl Into<String>,
    text: impl Into<String>,
    font_size: f64,
    x: f64,
    y: f64,
) -> Element {
    placed(
        id,
        ElementKind::Text {
            text: text.into(),
            font_size,
            color: Rgba8::WHITE,
        },
        x,
        y,
    )
}

/// Filled rectangle centered at `(x, y)`.
pub fn rect_element(
    id: impl Into<String>,
    width: f64,
    height: f64,
    color: Rgba8,
    x: f64,
    y: f64,
) -> Element {
    placed(
        id,
        ElementKind::Rect {
            width,
            height,
            corner_radius: 0.0,
            color,
        },
        x,
        y,
    )
}

fn placed(id: impl Into<String>, kind: ElementKind, x: f64, y: f64) -> Element {
    Element {
        id: id.into(),
        kind,
        props: ElementProps {
            x: Anim::constant(x),
            y: Anim::constant(y),
            ..ElementProps::default()
        },
        z: 0,
        window: None,
    }
}

impl Element {
    /// Replace the opacity animation.
    pub fn with_opacity(mut self, opacity: impl Into<Anim>) -> Self {
        self.props.opacity = opacity.into();
        self
    }

    /// Replace the scale animation.
    pub fn with_scale(mut self, scale: impl Into<Anim>) -> Self {
        self.props.scale = scale.into();
        self
    }

    /// Replace the vertical position animation.
    pub fn with_y(mut self, y: impl Into<Anim>) -> Self {
        self.props.y = y.into();
        self
    }

    /// Set paint order within the scene.
    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
