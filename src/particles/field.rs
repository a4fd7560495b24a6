use std::f64::consts::TAU;

use crate::{
    animation::ease::Ease,
    foundation::core::{Canvas, Fps, Rgba8, Vec2, vec2_repr},
    foundation::error::{AdreelError, AdreelResult},
    foundation::math::{clamp01, lerp},
    particles::attributes::{ParticleAttributes, derive_attributes},
};

/// Travel direction for [`ParticleMode::Drift`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftDirection {
    /// Toward the top edge.
    #[default]
    Up,
    /// Toward the bottom edge.
    Down,
}

/// How a field's particles move over time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParticleMode {
    /// Endless vertical drift through a wrap-around band with horizontal sway.
    Drift {
        /// Vertical travel direction.
        #[serde(default)]
        direction: DriftDirection,
        /// Travel speed in canvas heights per second.
        #[serde(default = "default_drift_speed")]
        speed: f64,
        /// Horizontal sway amplitude in pixels.
        #[serde(default = "default_sway_px")]
        sway_px: f64,
        /// Sway frequency in Hz.
        #[serde(default = "default_sway_hz")]
        sway_hz: f64,
        /// Fraction of the band height over which particles fade at either edge.
        #[serde(default = "default_fade_band")]
        fade_band: f64,
        /// Opacity away from the band edges.
        #[serde(default = "default_max_opacity")]
        max_opacity: f64,
    },
    /// One-shot pull from a ring around `target` into `target`.
    Converge {
        /// Convergence point in pixels.
        #[serde(with = "vec2_repr")]
        target: Vec2,
        /// Ring radius in pixels.
        radius: f64,
        /// First active frame.
        start: f64,
        /// Window length in frames.
        duration: f64,
    },
    /// One-shot explosion outward from `origin`.
    Burst {
        /// Emission point in pixels.
        #[serde(with = "vec2_repr")]
        origin: Vec2,
        /// First active frame.
        start: f64,
        /// Window length in frames.
        duration: f64,
        /// Travel distance in pixels of the farthest particle.
        max_distance: f64,
    },
}

fn default_drift_speed() -> f64 {
    0.05
}
fn default_sway_px() -> f64 {
    12.0
}
fn default_sway_hz() -> f64 {
    0.25
}
fn default_fade_band() -> f64 {
    0.15
}
fn default_max_opacity() -> f64 {
    0.6
}
fn default_min_size() -> f64 {
    2.0
}
fn default_max_size() -> f64 {
    6.0
}
fn default_color() -> Rgba8 {
    Rgba8::WHITE
}

/// Declarative particle effect. Attributes derive from `(count, seed)` only.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleField {
    /// Identifier within the scene.
    #[serde(default)]
    pub id: String,
    /// Number of particles.
    pub count: u32,
    /// Hash seed.
    #[serde(default)]
    pub seed: u64,
    /// Particle color.
    #[serde(default = "default_color")]
    pub color: Rgba8,
    /// Smallest particle size in pixels.
    #[serde(default = "default_min_size")]
    pub min_size: f64,
    /// Largest particle size in pixels.
    #[serde(default = "default_max_size")]
    pub max_size: f64,
    /// Motion mode.
    pub mode: ParticleMode,
}

/// Resolved visual state of one particle at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ParticleState {
    /// Seed index.
    pub index: u32,
    /// Center x in pixels.
    pub x: f64,
    /// Center y in pixels.
    pub y: f64,
    /// Diameter in pixels.
    pub size: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Fill color.
    pub color: Rgba8,
}

fn check_window(kind: &str, start: f64, duration: f64) -> AdreelResult<()> {
    if !start.is_finite() || !duration.is_finite() {
        return Err(AdreelError::configuration(format!(
            "{kind} window must be finite"
        )));
    }
    if duration <= 0.0 {
        return Err(AdreelError::configuration(format!(
            "{kind} duration must be > 0"
        )));
    }
    Ok(())
}

/// Progress through `[start, start + duration)`, or `None` outside it.
fn window_progress(frame: f64, start: f64, duration: f64) -> Option<f64> {
    let local = frame - start;
    if local < 0.0 || local >= duration {
        return None;
    }
    Some(local / duration)
}

impl ParticleField {
    /// Check size bounds and mode parameters.
    pub fn validate(&self) -> AdreelResult<()> {
        if !self.min_size.is_finite() || !self.max_size.is_finite() || self.min_size < 0.0 {
            return Err(AdreelError::configuration(format!(
                "particle field '{}' sizes must be finite and >= 0",
                self.id
            )));
        }
        if self.max_size < self.min_size {
            return Err(AdreelError::configuration(format!(
                "particle field '{}' max_size must be >= min_size",
                self.id
            )));
        }
        match self.mode {
            ParticleMode::Drift {
                speed,
                sway_px,
                sway_hz,
                fade_band,
                max_opacity,
                ..
            } => {
                if ![speed, sway_px, sway_hz].iter().all(|v| v.is_finite()) {
                    return Err(AdreelError::configuration(
                        "drift speed/sway must be finite",
                    ));
                }
                if !(0.0..=0.5).contains(&fade_band) {
                    return Err(AdreelError::configuration(
                        "drift fade_band must be in [0, 0.5]",
                    ));
                }
                if !(0.0..=1.0).contains(&max_opacity) {
                    return Err(AdreelError::configuration(
                        "drift max_opacity must be in [0, 1]",
                    ));
                }
            }
            ParticleMode::Converge {
                target,
                radius,
                start,
                duration,
            } => {
                check_window("converge", start, duration)?;
                if !target.is_finite() || !radius.is_finite() || radius < 0.0 {
                    return Err(AdreelError::configuration(
                        "converge target/radius must be finite, radius >= 0",
                    ));
                }
            }
            ParticleMode::Burst {
                origin,
                start,
                duration,
                max_distance,
            } => {
                check_window("burst", start, duration)?;
                if !origin.is_finite() || !max_distance.is_finite() || max_distance < 0.0 {
                    return Err(AdreelError::configuration(
                        "burst origin/max_distance must be finite, max_distance >= 0",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Derived per-particle constants. Recomputed on each call; derivation is cheap and pure.
    pub fn attributes(&self) -> Vec<ParticleAttributes> {
        derive_attributes(self.count, self.seed, self.min_size, self.max_size)
    }

    /// Visible particles at scene-local `frame`.
    ///
    /// A pure function of the field and `frame`: nothing is integrated between frames.
    /// Particles with zero opacity are omitted, and one-shot modes return nothing outside
    /// their window.
    pub fn render(&self, frame: f64, fps: Fps, canvas: Canvas) -> Vec<ParticleState> {
        self.render_seeded(self.seed, frame, fps, canvas)
    }

    /// [`ParticleField::render`] with attributes derived from `seed` instead of `self.seed`.
    pub fn render_seeded(
        &self,
        seed: u64,
        frame: f64,
        fps: Fps,
        canvas: Canvas,
    ) -> Vec<ParticleState> {
        if self.count == 0 {
            return Vec::new();
        }
        if let ParticleMode::Converge {
            start, duration, ..
        }
        | ParticleMode::Burst {
            start, duration, ..
        } = self.mode
            && window_progress(frame, start, duration).is_none()
        {
            return Vec::new();
        }

        derive_attributes(self.count, seed, self.min_size, self.max_size)
            .iter()
            .filter_map(|a| self.particle_state(a, frame, fps, canvas))
            .filter(|p| p.opacity > 0.0)
            .collect()
    }

    fn particle_state(
        &self,
        a: &ParticleAttributes,
        frame: f64,
        fps: Fps,
        canvas: Canvas,
    ) -> Option<ParticleState> {
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let (pos, size, opacity) = match self.mode {
            ParticleMode::Drift {
                direction,
                speed,
                sway_px,
                sway_hz,
                fade_band,
                max_opacity,
            } => {
                let secs = fps.frames_to_secs(frame);
                let travel = secs * speed * a.speed;
                let band = match direction {
                    DriftDirection::Up => (a.y - travel).rem_euclid(1.0),
                    DriftDirection::Down => (a.y + travel).rem_euclid(1.0),
                };
                let edge = band.min(1.0 - band);
                let fade = if fade_band > 0.0 {
                    clamp01(edge / fade_band)
                } else {
                    1.0
                };
                let sway = sway_px * (TAU * sway_hz * secs * a.speed + a.phase).sin();
                (
                    Vec2::new(a.x * w + sway, band * h),
                    a.size,
                    max_opacity * fade * a.lifetime,
                )
            }
            ParticleMode::Converge {
                target,
                radius,
                start,
                duration,
            } => {
                let p = window_progress(frame, start, duration)?;
                let pp = clamp01(p / a.lifetime);
                let eased = Ease::OutCubic.apply(pp);
                let ring = target + Vec2::from_angle(a.angle) * (radius * a.distance);
                let pos = ring.lerp(target, eased);
                let opacity = (pp / 0.15).min((1.0 - pp) / 0.25).min(1.0);
                (pos, a.size * (1.0 - 0.5 * eased), clamp01(opacity))
            }
            ParticleMode::Burst {
                origin,
                start,
                duration,
                max_distance,
            } => {
                let p = window_progress(frame, start, duration)?;
                let pp = clamp01(p / a.lifetime);
                // Velocity falls linearly to zero, so distance follows 2p - p^2.
                let travel = max_distance * a.distance * (2.0 * pp - pp * pp);
                let pos = origin + Vec2::from_angle(a.angle) * travel;
                (pos, a.size * lerp(1.0, 0.7, pp), 1.0 - pp)
            }
        };

        Some(ParticleState {
            index: a.index,
            x: pos.x,
            y: pos.y,
            size,
            opacity: clamp01(opacity),
            color: self.color,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/field.rs"]
mod tests;
