use crate::{
    animation::ease::Ease,
    foundation::error::{AdreelError, AdreelResult},
};

/// What a track returns for frames outside its first/last keyframe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the boundary value.
    #[default]
    Clamp,
    /// Continue along the eased boundary segment's tangent at the boundary.
    Extend,
    /// Raw linear extension of the boundary segment (no clamping, no easing).
    Identity,
}

/// A `(frame, value)` control point.
///
/// Deserializes from `[frame, value]` or `{ "frame": f, "value": v }`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Keyframe {
    /// Frame position (scene-local).
    pub frame: f64,
    /// Value at `frame`.
    pub value: f64,
}

impl Keyframe {
    /// Build a keyframe.
    pub fn new(frame: f64, value: f64) -> Self {
        Self { frame, value }
    }
}

impl<'de> serde::Deserialize<'de> for Keyframe {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Pair([f64; 2]),
            Obj { frame: f64, value: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Pair([frame, value]) | Repr::Obj { frame, value } => Ok(Self { frame, value }),
        }
    }
}

/// Piecewise keyframe track with one easing curve and per-side extrapolation.
///
/// Invariants (checked by [`KeyframeTrack::validate`]): at least two keys, frames finite and
/// strictly increasing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeTrack {
    /// Control points sorted by frame.
    pub keys: Vec<Keyframe>,
    /// Easing applied to each segment's normalized progress.
    #[serde(default)]
    pub ease: Ease,
    /// Policy for frames before the first key.
    #[serde(default)]
    pub extrapolate_left: Extrapolate,
    /// Policy for frames after the last key.
    #[serde(default)]
    pub extrapolate_right: Extrapolate,
}

impl KeyframeTrack {
    /// Build and validate a clamped track.
    pub fn new(keys: Vec<Keyframe>, ease: Ease) -> AdreelResult<Self> {
        let track = Self {
            keys,
            ease,
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
        };
        track.validate()?;
        Ok(track)
    }

    /// Two-key track from `(f0, v0)` to `(f1, v1)`.
    pub fn from_to(f0: f64, f1: f64, v0: f64, v1: f64, ease: Ease) -> AdreelResult<Self> {
        Self::new(vec![Keyframe::new(f0, v0), Keyframe::new(f1, v1)], ease)
    }

    /// Replace both extrapolation policies.
    pub fn with_extrapolation(mut self, left: Extrapolate, right: Extrapolate) -> Self {
        self.extrapolate_left = left;
        self.extrapolate_right = right;
        self
    }

    /// Check the track invariants.
    pub fn validate(&self) -> AdreelResult<()> {
        if self.keys.len() < 2 {
            return Err(AdreelError::configuration(format!(
                "keyframe track needs at least 2 keys, got {}",
                self.keys.len()
            )));
        }
        if let Some(k) = self
            .keys
            .iter()
            .find(|k| !k.frame.is_finite() || !k.value.is_finite())
        {
            return Err(AdreelError::configuration(format!(
                "keyframe ({}, {}) must be finite",
                k.frame, k.value
            )));
        }
        if let Some(w) = self.keys.windows(2).find(|w| w[0].frame >= w[1].frame) {
            return Err(AdreelError::configuration(format!(
                "keyframe frames must be strictly increasing ({} then {})",
                w[0].frame, w[1].frame
            )));
        }
        if !self.ease.validate() {
            return Err(AdreelError::configuration(
                "cubic_bezier control x values must be finite and in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Frame of the first key.
    pub fn first_frame(&self) -> f64 {
        self.keys.first().map_or(0.0, |k| k.frame)
    }

    /// Frame of the last key.
    pub fn last_frame(&self) -> f64 {
        self.keys.last().map_or(0.0, |k| k.frame)
    }

    /// Evaluate the track at any frame, including frames outside the keyed range.
    pub fn sample(&self, frame: f64) -> f64 {
        let n = self.keys.len();
        match n {
            0 => return 0.0,
            1 => return self.keys[0].value,
            _ => {}
        }

        let first = self.keys[0];
        let last = self.keys[n - 1];
        if frame < first.frame {
            return extrapolate(
                self.extrapolate_left,
                first,
                self.keys[1],
                self.ease,
                frame,
                Side::Left,
            );
        }
        if frame > last.frame {
            return extrapolate(
                self.extrapolate_right,
                self.keys[n - 2],
                last,
                self.ease,
                frame,
                Side::Right,
            );
        }

        let idx = self.keys.partition_point(|k| k.frame <= frame);
        if idx >= n {
            return last.value;
        }
        segment_value(self.keys[idx - 1], self.keys[idx], self.ease, frame)
    }
}

/// Evaluate a two-point range `[f0, f1] -> [v0, v1]` with easing and extrapolation.
///
/// Same semantics as a two-key [`KeyframeTrack`] without allocating one.
pub fn interpolate(
    frame: f64,
    frames: [f64; 2],
    values: [f64; 2],
    ease: Ease,
    left: Extrapolate,
    right: Extrapolate,
) -> f64 {
    let a = Keyframe::new(frames[0], values[0]);
    let b = Keyframe::new(frames[1], values[1]);
    if frame < a.frame {
        return extrapolate(left, a, b, ease, frame, Side::Left);
    }
    if frame > b.frame {
        return extrapolate(right, a, b, ease, frame, Side::Right);
    }
    segment_value(a, b, ease, frame)
}

#[derive(Clone, Copy, Debug)]
enum Side {
    Left,
    Right,
}

fn segment_value(a: Keyframe, b: Keyframe, ease: Ease, frame: f64) -> f64 {
    let denom = b.frame - a.frame;
    if denom <= 0.0 {
        // Degenerate segment: step to `b` once reached.
        return if frame >= b.frame { b.value } else { a.value };
    }
    let t = (frame - a.frame) / denom;
    a.value + (b.value - a.value) * ease.apply(t)
}

fn extrapolate(
    policy: Extrapolate,
    a: Keyframe,
    b: Keyframe,
    ease: Ease,
    frame: f64,
    side: Side,
) -> f64 {
    let boundary = match side {
        Side::Left => a,
        Side::Right => b,
    };
    let denom = b.frame - a.frame;
    if denom <= 0.0 {
        return boundary.value;
    }

    match policy {
        Extrapolate::Clamp => boundary.value,
        Extrapolate::Identity => {
            let t = (frame - a.frame) / denom;
            a.value + (b.value - a.value) * t
        }
        Extrapolate::Extend => {
            let edge_t = match side {
                Side::Left => 0.0,
                Side::Right => 1.0,
            };
            let slope = (b.value - a.value) / denom * ease.derivative(edge_t);
            boundary.value + slope * (frame - boundary.frame)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
