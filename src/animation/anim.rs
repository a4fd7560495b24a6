use crate::{
    animation::{keyframes::KeyframeTrack, spring::SpringTrack},
    foundation::core::Fps,
    foundation::error::{AdreelError, AdreelResult},
};

/// Sampling context handed to property animations.
///
/// Only the scene-local clock is visible here; scene placement on the global timeline never is.
#[derive(Clone, Copy, Debug)]
pub struct SampleCtx {
    /// Scene-local frame (may be negative or past the scene end when probing).
    pub local_frame: f64,
    /// Composition frame rate.
    pub fps: Fps,
}

impl SampleCtx {
    /// Build a context for `local_frame`.
    pub fn new(local_frame: f64, fps: Fps) -> Self {
        Self { local_frame, fps }
    }
}

/// Periodic idle motion: `offset + amp * sin(TAU * freq_hz * secs + phase)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SineWave {
    /// Amplitude.
    pub amp: f64,
    /// Frequency in Hz.
    pub freq_hz: f64,
    /// Phase in radians.
    #[serde(default)]
    pub phase: f64,
    /// Constant offset.
    #[serde(default)]
    pub offset: f64,
}

/// A scalar property animation.
///
/// A bare JSON number deserializes as [`Anim::Constant`]; other forms are externally tagged,
/// e.g. `{"keyframes": {...}}` or `{"spring": {...}}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anim {
    /// Fixed value.
    Constant(f64),
    /// Keyframe track.
    Keyframes(KeyframeTrack),
    /// Spring transition.
    Spring(SpringTrack),
    /// Sinusoidal motion.
    Sine(SineWave),
}

impl Anim {
    /// Constant animation.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Sample at the context's local frame.
    pub fn sample(&self, ctx: SampleCtx) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Keyframes(track) => track.sample(ctx.local_frame),
            Self::Spring(s) => s.sample(ctx.local_frame, ctx.fps),
            Self::Sine(w) => {
                let secs = ctx.fps.frames_to_secs(ctx.local_frame);
                w.offset + w.amp * (std::f64::consts::TAU * w.freq_hz * secs + w.phase).sin()
            }
        }
    }

    /// Check the animation's descriptor invariants.
    pub fn validate(&self) -> AdreelResult<()> {
        match self {
            Self::Constant(v) => {
                if !v.is_finite() {
                    return Err(AdreelError::configuration("constant value must be finite"));
                }
                Ok(())
            }
            Self::Keyframes(track) => track.validate(),
            Self::Spring(s) => s.validate(),
            Self::Sine(w) => {
                if ![w.amp, w.freq_hz, w.phase, w.offset]
                    .iter()
                    .all(|v| v.is_finite())
                {
                    return Err(AdreelError::configuration("sine parameters must be finite"));
                }
                Ok(())
            }
        }
    }
}

impl From<f64> for Anim {
    fn from(v: f64) -> Self {
        Self::Constant(v)
    }
}

impl From<KeyframeTrack> for Anim {
    fn from(track: KeyframeTrack) -> Self {
        Self::Keyframes(track)
    }
}

impl From<SpringTrack> for Anim {
    fn from(s: SpringTrack) -> Self {
        Self::Spring(s)
    }
}

impl<'de> serde::Deserialize<'de> for Anim {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        enum Tagged {
            Constant(f64),
            Keyframes(KeyframeTrack),
            Spring(SpringTrack),
            Sine(SineWave),
        }

        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(f64),
            Tagged(Tagged),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bare(v) | Repr::Tagged(Tagged::Constant(v)) => Self::Constant(v),
            Repr::Tagged(Tagged::Keyframes(t)) => Self::Keyframes(t),
            Repr::Tagged(Tagged::Spring(s)) => Self::Spring(s),
            Repr::Tagged(Tagged::Sine(w)) => Self::Sine(w),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
