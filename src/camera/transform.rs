use crate::foundation::core::{Affine, Point, Vec2};

/// Decomposed 2D transform as handed to the rasterizer.
///
/// The matrix form is `scale * translate * rotate`: rotation applies to content first, then the
/// translation, then the uniform scale (so translations are in pre-scale units).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Horizontal translation in pixels.
    pub translate_x: f64,
    /// Vertical translation in pixels.
    pub translate_y: f64,
    /// Rotation in degrees (clockwise in y-down space).
    pub rotate_deg: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        rotate_deg: 0.0,
    };

    /// Matrix form, composed in the fixed order scale -> translate -> rotate.
    pub fn to_affine(self) -> Affine {
        let t_scale = Affine::scale(self.scale);
        let t_translate = Affine::translate(Vec2::new(self.translate_x, self.translate_y));
        let t_rotate = Affine::rotate(self.rotate_deg.to_radians());
        t_scale * t_translate * t_rotate
    }

    /// Matrix form pivoting around `origin` instead of the coordinate origin.
    pub fn to_affine_about(self, origin: Point) -> Affine {
        let to = origin.to_vec2();
        Affine::translate(to) * self.to_affine() * Affine::translate(-to)
    }

    /// True when every component equals the identity's.
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

/// Explicit stack of nested transforms.
///
/// Each pushed affine composes with the current top, so the top is always the full
/// outer-to-inner product applied to children.
#[derive(Clone, Debug)]
pub struct TransformStack {
    stack: Vec<Affine>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// Stack holding only the identity.
    pub fn new() -> Self {
        Self {
            stack: vec![Affine::IDENTITY],
        }
    }

    /// Stack rooted at `base`.
    pub fn with_base(base: Affine) -> Self {
        Self { stack: vec![base] }
    }

    /// Compose `local` inside the current top and make it the new top.
    pub fn push(&mut self, local: Affine) -> Affine {
        let world = self.current() * local;
        self.stack.push(world);
        world
    }

    /// Pop the innermost transform. The base entry is never popped.
    pub fn pop(&mut self) -> Option<Affine> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop()
    }

    /// Full composed transform at the top of the stack.
    pub fn current(&self) -> Affine {
        self.stack.last().copied().unwrap_or(Affine::IDENTITY)
    }

    /// Number of pushed entries above the base.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Map a point through the current transform.
    pub fn apply(&self, p: Point) -> Point {
        self.current() * p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/transform.rs"]
mod tests;
