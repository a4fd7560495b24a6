use crate::foundation::{
    core::Fps,
    error::{AdreelError, AdreelResult},
};

/// Physical parameters of a damped harmonic oscillator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Mass (> 0).
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Damping coefficient (>= 0).
    pub damping: f64,
    /// Stiffness (> 0).
    pub stiffness: f64,
    /// Never report progress past the target.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

fn default_mass() -> f64 {
    1.0
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::critically_damped()
    }
}

impl SpringConfig {
    /// Monotonic approach without overshoot (damping ratio 1).
    pub fn critically_damped() -> Self {
        Self {
            mass: 1.0,
            damping: 20.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }

    /// Underdamped preset that overshoots and rings briefly (damping ratio 0.5).
    pub fn bouncy() -> Self {
        Self {
            mass: 1.0,
            damping: 10.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }

    /// Slow overdamped preset (damping ratio 2).
    pub fn gentle() -> Self {
        Self {
            mass: 1.0,
            damping: 40.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }

    /// Build from a damping ratio instead of a raw damping coefficient.
    pub fn from_damping_ratio(ratio: f64, stiffness: f64, mass: f64) -> Self {
        Self {
            mass,
            damping: ratio * 2.0 * (stiffness * mass).max(0.0).sqrt(),
            stiffness,
            overshoot_clamping: false,
        }
    }

    /// Damping ratio `zeta = c / (2 * sqrt(k * m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt()).max(1e-9)
    }

    /// Reject non-physical parameters.
    pub fn validate(&self) -> AdreelResult<()> {
        let finite = [self.mass, self.damping, self.stiffness]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(AdreelError::configuration("spring parameters must be finite"));
        }
        if self.mass <= 0.0 {
            return Err(AdreelError::configuration("spring mass must be > 0"));
        }
        if self.stiffness <= 0.0 {
            return Err(AdreelError::configuration("spring stiffness must be > 0"));
        }
        if self.damping < 0.0 {
            return Err(AdreelError::configuration("spring damping must be >= 0"));
        }
        Ok(())
    }

    fn progress(&self, secs: f64) -> f64 {
        let p = step_response(secs, self.stiffness, self.damping, self.mass);
        if self.overshoot_clamping { p.min(1.0) } else { p }
    }
}

/// Evaluate a spring moving from `from` to `to`, `local_frame` frames after it started.
///
/// Closed-form in elapsed time, so any frame can be evaluated independently.
pub fn spring(local_frame: f64, fps: Fps, config: &SpringConfig, from: f64, to: f64) -> f64 {
    if local_frame <= 0.0 {
        return from;
    }
    let secs = fps.frames_to_secs(local_frame);
    from + (to - from) * config.progress(secs)
}

/// First frame after which the spring stays within `threshold` of its target.
///
/// Solved on the decay envelope of the step response, so the cost does not depend on `fps`.
/// Springs that never settle (or `threshold <= 0`) report 60 seconds worth of frames.
pub fn settle_frame(fps: Fps, config: &SpringConfig, threshold: f64) -> u64 {
    let limit = (fps.as_f64() * SETTLE_LIMIT_SECS).ceil().max(1.0) as u64;
    match settle_secs(config, threshold) {
        Some(secs) => ((secs * fps.as_f64()).ceil().max(0.0) as u64).min(limit),
        None => limit,
    }
}

const SETTLE_LIMIT_SECS: f64 = 60.0;

/// Time at which the envelope bounding `|1 - x(t)|` drops to `threshold`.
fn settle_secs(config: &SpringConfig, threshold: f64) -> Option<f64> {
    if threshold.is_nan() || threshold <= 0.0 {
        return None;
    }
    let m = config.mass.max(1e-9);
    let w0 = (config.stiffness.max(0.0) / m).sqrt();
    if w0 == 0.0 {
        return Some(0.0);
    }
    let zeta = config.damping_ratio();

    if (zeta - 1.0).abs() < 1e-6 {
        // Exact residual e^(-w0 t) (1 + w0 t), monotone in t: bisect with a fixed step count.
        let residual = |t: f64| (-w0 * t).exp() * (1.0 + w0 * t);
        if residual(0.0) <= threshold {
            return Some(0.0);
        }
        let (mut lo, mut hi) = (0.0, SETTLE_LIMIT_SECS);
        if residual(hi) > threshold {
            return None;
        }
        for _ in 0..64 {
            let mid = 0.5 * (lo + hi);
            if residual(mid) > threshold {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        return Some(hi);
    }

    // Underdamped: |1 - x| <= e^(-zeta w0 t) / sqrt(1 - zeta^2).
    // Overdamped: 0 <= 1 - x <= c2 e^(r1 t) with the slow root r1.
    let (scale, rate) = if zeta < 1.0 {
        (1.0 / (1.0 - zeta * zeta).sqrt(), zeta * w0)
    } else {
        let z2 = (zeta * zeta - 1.0).sqrt();
        ((zeta + z2) / (2.0 * z2), w0 * (zeta - z2))
    };
    if rate <= 0.0 {
        return None;
    }
    let secs = ((scale / threshold).ln() / rate).max(0.0);
    (secs <= SETTLE_LIMIT_SECS).then_some(secs)
}

/// Step response from 0 to 1 with `x(0) = 0`, `v(0) = 0`.
fn step_response(t: f64, stiffness: f64, damping: f64, mass: f64) -> f64 {
    let k = stiffness.max(0.0);
    let c = damping.max(0.0);
    let m = mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return 1.0;
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // Underdamped.
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

/// Data form of a spring transition, as used by property animations.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringTrack {
    /// Oscillator parameters.
    #[serde(default)]
    pub config: SpringConfig,
    /// Starting value.
    #[serde(default)]
    pub from: f64,
    /// Target value.
    #[serde(default = "default_to")]
    pub to: f64,
    /// Frames to wait before the spring starts.
    #[serde(default)]
    pub delay_frames: u64,
    /// Stretch time so the spring settles at this frame (threshold 0.005).
    #[serde(default)]
    pub duration_frames: Option<u64>,
}

fn default_to() -> f64 {
    1.0
}

const SETTLE_THRESHOLD: f64 = 0.005;

impl Default for SpringTrack {
    fn default() -> Self {
        Self {
            config: SpringConfig::default(),
            from: 0.0,
            to: 1.0,
            delay_frames: 0,
            duration_frames: None,
        }
    }
}

impl SpringTrack {
    /// Validate the config and any duration override.
    pub fn validate(&self) -> AdreelResult<()> {
        self.config.validate()?;
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(AdreelError::configuration("spring from/to must be finite"));
        }
        if self.duration_frames == Some(0) {
            return Err(AdreelError::configuration(
                "spring duration_frames must be > 0 when set",
            ));
        }
        Ok(())
    }

    /// Value at scene-local `frame`.
    pub fn sample(&self, frame: f64, fps: Fps) -> f64 {
        let mut local = frame - self.delay_frames as f64;
        if let Some(duration) = self.duration_frames {
            let natural = settle_frame(fps, &self.config, SETTLE_THRESHOLD).max(1);
            local *= natural as f64 / duration as f64;
        }
        spring(local, fps, &self.config, self.from, self.to)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
