use crate::{
    animation::{
        ease::Ease,
        keyframes::{Extrapolate, interpolate},
    },
    camera::transform::Transform,
    foundation::core::{Vec2, vec2_repr},
    foundation::error::{AdreelError, AdreelResult},
};

fn default_camera_ease() -> Ease {
    Ease::InOutCubic
}

/// Scale change over `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoomDirective {
    /// Scale at and before `start`.
    pub from: f64,
    /// Scale at and after `end`.
    pub to: f64,
    /// First frame of the move.
    pub start: f64,
    /// Last frame of the move.
    pub end: f64,
    /// Easing across the move.
    #[serde(default = "default_camera_ease")]
    pub ease: Ease,
}

/// Translation change over `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanDirective {
    /// Offset at and before `start`.
    #[serde(with = "vec2_repr")]
    pub from: Vec2,
    /// Offset at and after `end`.
    #[serde(with = "vec2_repr")]
    pub to: Vec2,
    /// First frame of the move.
    pub start: f64,
    /// Last frame of the move.
    pub end: f64,
    /// Easing across the move.
    #[serde(default = "default_camera_ease")]
    pub ease: Ease,
}

/// Rotation change in degrees over `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RollDirective {
    /// Angle at and before `start`.
    pub from: f64,
    /// Angle at and after `end`.
    pub to: f64,
    /// First frame of the move.
    pub start: f64,
    /// Last frame of the move.
    pub end: f64,
    /// Easing across the move.
    #[serde(default = "default_camera_ease")]
    pub ease: Ease,
}

/// Decaying procedural jitter active for `frame` in `[start, start + duration)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShakeDirective {
    /// Peak offset in pixels at the start of the window.
    pub intensity: f64,
    /// First active frame.
    pub start: f64,
    /// Window length in frames.
    pub duration: f64,
}

/// Translation and rotation contributed by a shake at one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ShakeOffset {
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
    /// Rotation offset in degrees.
    pub rotate_deg: f64,
}

/// Independent, optional camera moves for one scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraDirectives {
    /// Zoom move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<ZoomDirective>,
    /// Pan move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan: Option<PanDirective>,
    /// Roll move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll: Option<RollDirective>,
    /// Shake effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shake: Option<ShakeDirective>,
}

fn check_window(name: &str, start: f64, end: f64, values: &[f64]) -> AdreelResult<()> {
    if !start.is_finite() || !end.is_finite() || !values.iter().all(|v| v.is_finite()) {
        return Err(AdreelError::configuration(format!(
            "camera {name} values must be finite"
        )));
    }
    if end <= start {
        return Err(AdreelError::configuration(format!(
            "camera {name} end ({end}) must be after start ({start})"
        )));
    }
    Ok(())
}

fn eased(frame: f64, start: f64, end: f64, from: f64, to: f64, ease: Ease) -> f64 {
    interpolate(
        frame,
        [start, end],
        [from, to],
        ease,
        Extrapolate::Clamp,
        Extrapolate::Clamp,
    )
}

impl CameraDirectives {
    /// True when no directive is set.
    pub fn is_empty(&self) -> bool {
        self.zoom.is_none() && self.pan.is_none() && self.roll.is_none() && self.shake.is_none()
    }

    /// Check every present directive.
    pub fn validate(&self) -> AdreelResult<()> {
        if let Some(z) = &self.zoom {
            check_window("zoom", z.start, z.end, &[z.from, z.to])?;
            if z.from <= 0.0 || z.to <= 0.0 {
                return Err(AdreelError::configuration("camera zoom scales must be > 0"));
            }
        }
        if let Some(p) = &self.pan {
            check_window("pan", p.start, p.end, &[p.from.x, p.from.y, p.to.x, p.to.y])?;
        }
        if let Some(r) = &self.roll {
            check_window("roll", r.start, r.end, &[r.from, r.to])?;
        }
        if let Some(s) = &self.shake {
            if ![s.intensity, s.start, s.duration].iter().all(|v| v.is_finite()) {
                return Err(AdreelError::configuration("camera shake values must be finite"));
            }
            if s.duration <= 0.0 {
                return Err(AdreelError::configuration("camera shake duration must be > 0"));
            }
        }
        Ok(())
    }

    /// Resolve every directive at scene-local `frame` into one transform.
    ///
    /// Absent directives contribute identity values. The shake offset is folded into the
    /// translation and rotation components.
    pub fn compose(&self, frame: f64) -> Transform {
        let scale = self
            .zoom
            .map_or(1.0, |z| eased(frame, z.start, z.end, z.from, z.to, z.ease));
        let (pan_x, pan_y) = self.pan.map_or((0.0, 0.0), |p| {
            (
                eased(frame, p.start, p.end, p.from.x, p.to.x, p.ease),
                eased(frame, p.start, p.end, p.from.y, p.to.y, p.ease),
            )
        });
        let roll = self
            .roll
            .map_or(0.0, |r| eased(frame, r.start, r.end, r.from, r.to, r.ease));
        let shake = self
            .shake
            .map_or(ShakeOffset::default(), |s| shake_offset(&s, frame));

        Transform {
            scale,
            translate_x: pan_x + shake.x,
            translate_y: pan_y + shake.y,
            rotate_deg: roll + shake.rotate_deg,
        }
    }
}

/// Shake contribution at `frame`; exactly zero outside the active window.
///
/// Amplitude decays quadratically over the window. Each axis is the sum of two sinusoids with
/// distinct frequencies and phases, and everything is a function of `frame` alone.
pub fn shake_offset(shake: &ShakeDirective, frame: f64) -> ShakeOffset {
    let end = shake.start + shake.duration;
    if shake.duration <= 0.0 || frame < shake.start || frame >= end {
        return ShakeOffset::default();
    }
    let progress = (frame - shake.start) / shake.duration;
    let amp = shake.intensity * (1.0 - progress).powi(2);

    let two_tone = |f1: f64, p1: f64, f2: f64, p2: f64| {
        0.6 * (frame * f1 + p1).sin() + 0.4 * (frame * f2 + p2).sin()
    };
    ShakeOffset {
        x: amp * two_tone(1.7, 0.0, 4.3, 1.3),
        y: amp * two_tone(2.1, 2.1, 3.7, 0.4),
        rotate_deg: amp * 0.1 * two_tone(1.3, 0.8, 3.1, 2.9),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/directives.rs"]
mod tests;
