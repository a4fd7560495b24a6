use crate::foundation::math::{hash01, lerp};

/// Per-particle constants derived once from `(seed, index)`.
///
/// Normalized fields (`x`, `y`, `lifetime`, `distance`) are in `[0, 1)`-style ranges and are
/// mapped into canvas space by the motion mode.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ParticleAttributes {
    /// Seed index in `[0, count)`.
    pub index: u32,
    /// Normalized horizontal position.
    pub x: f64,
    /// Normalized vertical position.
    pub y: f64,
    /// Size in pixels, in `[min_size, max_size]`.
    pub size: f64,
    /// Speed multiplier in `[0.5, 1.5)`.
    pub speed: f64,
    /// Phase offset in radians.
    pub phase: f64,
    /// Lifetime fraction in `[0.6, 1.0)`.
    pub lifetime: f64,
    /// Emission angle in radians.
    pub angle: f64,
    /// Travel distance fraction in `[0.6, 1.0)`.
    pub distance: f64,
}

// Independent hash streams per attribute.
const SALT_X: u64 = 1;
const SALT_Y: u64 = 2;
const SALT_SIZE: u64 = 3;
const SALT_SPEED: u64 = 4;
const SALT_PHASE: u64 = 5;
const SALT_LIFETIME: u64 = 6;
const SALT_ANGLE: u64 = 7;
const SALT_DISTANCE: u64 = 8;

/// Attributes of particle `index` under `seed`.
pub fn derive_particle(seed: u64, index: u32, min_size: f64, max_size: f64) -> ParticleAttributes {
    let i = u64::from(index);
    let h = |salt: u64| hash01(seed, i, salt);
    ParticleAttributes {
        index,
        x: h(SALT_X),
        y: h(SALT_Y),
        size: lerp(min_size, max_size, h(SALT_SIZE)),
        speed: 0.5 + h(SALT_SPEED),
        phase: h(SALT_PHASE) * std::f64::consts::TAU,
        lifetime: 0.6 + 0.4 * h(SALT_LIFETIME),
        angle: h(SALT_ANGLE) * std::f64::consts::TAU,
        distance: 0.6 + 0.4 * h(SALT_DISTANCE),
    }
}

/// Attributes for every particle in `[0, count)`, in index order.
pub fn derive_attributes(
    count: u32,
    seed: u64,
    min_size: f64,
    max_size: f64,
) -> Vec<ParticleAttributes> {
    (0..count)
        .map(|i| derive_particle(seed, i, min_size, max_size))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/particles/attributes.rs"]
mod tests;
