use std::collections::BTreeSet;
use std::io::Read;

use crate::{
    animation::anim::Anim,
    camera::directives::CameraDirectives,
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8},
    foundation::error::{AdreelError, AdreelResult},
    particles::field::ParticleField,
    scene::transition::TransitionSpec,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete ad composition.
///
/// A composition is a pure data model that can be:
/// - built programmatically (see [`crate::CompositionBuilder`])
/// - serialized/deserialized via Serde (JSON)
///
/// It is read-only during evaluation; see [`crate::CompositionHandle`] for swapping it out
/// while frames are in flight.
pub struct Composition {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output resolution.
    pub canvas: Canvas,
    /// Global deterministic seed mixed into per-scene seeds.
    #[serde(default)]
    pub seed: u64,
    /// Clear color behind every scene.
    #[serde(default = "default_background")]
    pub background: Rgba8,
    /// Ordered scenes; windows may overlap for cross-fades.
    pub scenes: Vec<Scene>,
}

fn default_background() -> Rgba8 {
    Rgba8::rgb(0, 0, 0)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A time-bounded animated unit with its own local clock.
pub struct Scene {
    /// Scene identifier, unique within the composition.
    pub id: String,
    /// First global frame; must be >= 0.
    #[serde(alias = "startFrame")]
    pub start_frame: i64,
    /// Length in frames; must be > 0.
    #[serde(alias = "durationFrames")]
    pub duration_frames: i64,
    /// Paint order among simultaneously active scenes.
    #[serde(default)]
    pub z: i32,
    /// Camera applied to everything in the scene.
    #[serde(default, skip_serializing_if = "CameraDirectives::is_empty")]
    pub camera: CameraDirectives,
    /// Content elements.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Particle effects, painted above elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub particles: Vec<ParticleField>,
    /// Optional transition at the scene start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_in: Option<TransitionSpec>,
    /// Optional transition at the scene end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_out: Option<TransitionSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A positioned, animated piece of scene content.
pub struct Element {
    /// Element identifier, unique within its scene.
    pub id: String,
    /// What the rasterizer should draw.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Animated placement and opacity.
    #[serde(default)]
    pub props: ElementProps,
    /// Paint order within the scene.
    #[serde(default)]
    pub z: i32,
    /// Optional scene-local visibility window `[start, end)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<FrameRange>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Element payload. Strings and asset keys come from upstream content services and pass
/// through untouched.
pub enum ElementKind {
    /// Text run.
    Text {
        /// UTF-8 content.
        text: String,
        /// Font size in pixels.
        #[serde(default = "default_font_size")]
        font_size: f64,
        /// Fill color.
        #[serde(default = "default_fill")]
        color: Rgba8,
    },
    /// Raster image referenced by key.
    Image {
        /// Asset key resolved by the rasterizer.
        asset: String,
    },
    /// Rectangle centered on the element anchor.
    Rect {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
        /// Corner radius in pixels.
        #[serde(default)]
        corner_radius: f64,
        /// Fill color.
        #[serde(default = "default_fill")]
        color: Rgba8,
    },
    /// Circle centered on the element anchor.
    Circle {
        /// Radius in pixels.
        radius: f64,
        /// Fill color.
        #[serde(default = "default_fill")]
        color: Rgba8,
    },
}

fn default_font_size() -> f64 {
    48.0
}

fn default_fill() -> Rgba8 {
    Rgba8::WHITE
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-element animated properties, sampled on the scene-local clock.
pub struct ElementProps {
    /// Anchor x in canvas pixels.
    #[serde(default = "zero")]
    pub x: Anim,
    /// Anchor y in canvas pixels.
    #[serde(default = "zero")]
    pub y: Anim,
    /// Uniform scale about the anchor.
    #[serde(default = "one")]
    pub scale: Anim,
    /// Rotation about the anchor in degrees.
    #[serde(default = "zero")]
    pub rotation_deg: Anim,
    /// Opacity; clamped to `[0, 1]` at evaluation time.
    #[serde(default = "one")]
    pub opacity: Anim,
}

fn zero() -> Anim {
    Anim::constant(0.0)
}

fn one() -> Anim {
    Anim::constant(1.0)
}

impl Default for ElementProps {
    fn default() -> Self {
        Self {
            x: zero(),
            y: zero(),
            scale: one(),
            rotation_deg: zero(),
            opacity: one(),
        }
    }
}

impl Composition {
    /// Parse and validate a JSON composition.
    pub fn from_json(s: &str) -> AdreelResult<Self> {
        let comp: Self = serde_json::from_str(s)?;
        comp.validate()?;
        Ok(comp)
    }

    /// Parse and validate a JSON composition from any reader.
    pub fn from_reader<R: Read>(reader: R) -> AdreelResult<Self> {
        let comp: Self = serde_json::from_reader(reader)?;
        comp.validate()?;
        Ok(comp)
    }

    /// Total length: the latest scene end, or 0 without scenes.
    pub fn duration_frames(&self) -> u64 {
        self.scenes
            .iter()
            .map(|s| s.window().end.0)
            .max()
            .unwrap_or(0)
    }

    /// Validate every descriptor in the composition. Failures are configuration errors.
    pub fn validate(&self) -> AdreelResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(AdreelError::configuration(
                "fps must have num>0 and den>0",
            ));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(AdreelError::configuration(
                "canvas width/height must be > 0",
            ));
        }

        let mut ids = BTreeSet::new();
        for scene in &self.scenes {
            if !ids.insert(scene.id.as_str()) {
                return Err(AdreelError::configuration(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
            scene.validate()?;
        }
        Ok(())
    }
}

impl Scene {
    /// Global window `[start_frame, start_frame + duration_frames)`.
    ///
    /// Negative fields (rejected by [`Scene::validate`]) collapse to an empty window.
    pub fn window(&self) -> FrameRange {
        let start = u64::try_from(self.start_frame).unwrap_or(0);
        let len = u64::try_from(self.duration_frames).unwrap_or(0);
        FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(start.saturating_add(len)),
        }
    }

    /// Length in frames.
    pub fn len_frames(&self) -> u64 {
        self.window().len_frames()
    }

    /// Validate timing, camera, content and effects.
    pub fn validate(&self) -> AdreelResult<()> {
        let id = &self.id;
        if id.trim().is_empty() {
            return Err(AdreelError::configuration("scene id must be non-empty"));
        }
        if self.start_frame < 0 {
            return Err(AdreelError::configuration(format!(
                "scene '{id}' start_frame must be >= 0"
            )));
        }
        if self.duration_frames <= 0 {
            return Err(AdreelError::configuration(format!(
                "scene '{id}' duration_frames must be > 0"
            )));
        }

        self.camera
            .validate()
            .map_err(|e| scoped(id, "camera", e))?;

        let mut element_ids = BTreeSet::new();
        for el in &self.elements {
            if !element_ids.insert(el.id.as_str()) {
                return Err(AdreelError::configuration(format!(
                    "scene '{id}' has duplicate element id '{}'",
                    el.id
                )));
            }
            el.validate().map_err(|e| scoped(id, &el.id, e))?;
        }

        for field in &self.particles {
            if !element_ids.insert(field.id.as_str()) && !field.id.is_empty() {
                return Err(AdreelError::configuration(format!(
                    "scene '{id}' particle field id '{}' collides with another id",
                    field.id
                )));
            }
            field.validate().map_err(|e| scoped(id, &field.id, e))?;
        }

        for tr in [&self.transition_in, &self.transition_out].into_iter().flatten() {
            tr.validate().map_err(|e| scoped(id, "transition", e))?;
        }
        Ok(())
    }
}

impl Element {
    /// Validate payload sizes and property animations.
    pub fn validate(&self) -> AdreelResult<()> {
        if self.id.trim().is_empty() {
            return Err(AdreelError::configuration("element id must be non-empty"));
        }
        match &self.kind {
            ElementKind::Text { font_size, .. } => {
                if !font_size.is_finite() || *font_size <= 0.0 {
                    return Err(AdreelError::configuration(
                        "text font_size must be finite and > 0",
                    ));
                }
            }
            ElementKind::Image { asset } => {
                if asset.trim().is_empty() {
                    return Err(AdreelError::configuration(
                        "image asset key must be non-empty",
                    ));
                }
            }
            ElementKind::Rect {
                width,
                height,
                corner_radius,
                ..
            } => {
                for (name, v) in [
                    ("width", *width),
                    ("height", *height),
                    ("corner_radius", *corner_radius),
                ] {
                    if !v.is_finite() || v < 0.0 {
                        return Err(AdreelError::configuration(format!(
                            "rect {name} must be finite and >= 0"
                        )));
                    }
                }
            }
            ElementKind::Circle { radius, .. } => {
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(AdreelError::configuration(
                        "circle radius must be finite and >= 0",
                    ));
                }
            }
        }
        if let Some(w) = self.window
            && w.start.0 > w.end.0
        {
            return Err(AdreelError::configuration(
                "element window start must be <= end",
            ));
        }

        let p = &self.props;
        for anim in [&p.x, &p.y, &p.scale, &p.rotation_deg, &p.opacity] {
            anim.validate()?;
        }
        Ok(())
    }
}

fn scoped(scene: &str, what: &str, err: AdreelError) -> AdreelError {
    match err {
        AdreelError::Configuration(msg) => {
            AdreelError::configuration(format!("scene '{scene}' {what}: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
