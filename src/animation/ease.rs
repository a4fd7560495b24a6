/// Easing curves used to shape normalized interpolation progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Ease-out that overshoots the target slightly before settling.
    OutBack,
    /// CSS-style cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    CubicBezier {
        /// First control point x, expected in `[0, 1]`.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x, expected in `[0, 1]`.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::OutBack => {
                let c1 = 1.701_58;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }

    /// Slope of the curve at `t` in `[0, 1]`.
    ///
    /// Exact for the polynomial and sine curves, so a flat curve end has slope exactly 0.
    pub fn derivative(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => 1.0,
            Self::InQuad => 2.0 * t,
            Self::OutQuad => 2.0 * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    4.0 * t
                } else {
                    4.0 * (1.0 - t)
                }
            }
            Self::InCubic => 3.0 * t * t,
            Self::OutCubic => 3.0 * (1.0 - t).powi(2),
            Self::InOutCubic => {
                if t < 0.5 {
                    12.0 * t * t
                } else {
                    12.0 * (1.0 - t).powi(2)
                }
            }
            Self::InOutSine => std::f64::consts::FRAC_PI_2 * (std::f64::consts::PI * t).sin(),
            Self::OutBack => {
                let c1 = 1.701_58;
                let c3 = c1 + 1.0;
                3.0 * c3 * (t - 1.0).powi(2) + 2.0 * c1 * (t - 1.0)
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_slope(t, x1, y1, x2, y2),
        }
    }

    pub(crate) fn validate(self) -> bool {
        match self {
            Self::CubicBezier { x1, y1, x2, y2 } => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
            _ => true,
        }
    }
}

fn bezier_coord(a1: f64, a2: f64, u: f64) -> f64 {
    let omu = 1.0 - u;
    3.0 * omu * omu * u * a1 + 3.0 * omu * u * u * a2 + u * u * u
}

fn bezier_coord_derivative(a1: f64, a2: f64, u: f64) -> f64 {
    let omu = 1.0 - u;
    3.0 * omu * omu * a1 + 6.0 * omu * u * (a2 - a1) + 3.0 * u * u * (1.0 - a2)
}

/// Curve parameter `u` with `bx(u) = x`.
fn bezier_param(x: f64, x1: f64, x2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton-Raphson with a bisection refinement, fixed iteration counts.
    let mut u = x;
    for _ in 0..8 {
        let x_u = bezier_coord(x1, x2, u) - x;
        let d = bezier_coord_derivative(x1, x2, u);
        if d.abs() < 1e-7 {
            break;
        }
        u = (u - x_u / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..8 {
        let x_u = bezier_coord(x1, x2, u);
        if (x_u - x).abs() < 1e-9 {
            break;
        }
        if x_u < x {
            lo = u;
        } else {
            hi = u;
        }
        u = 0.5 * (lo + hi);
    }
    u
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    bezier_coord(y1, y2, bezier_param(x, x1, x2))
}

/// `dy/dx` through the curve parameter. Where `dx/du` vanishes, a short chord toward the
/// curve interior stands in for the tangent.
fn cubic_bezier_slope(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let u = bezier_param(x, x1, x2);
    let dx = bezier_coord_derivative(x1, x2, u);
    if dx.abs() >= 1e-9 {
        return bezier_coord_derivative(y1, y2, u) / dx;
    }
    const CHORD: f64 = 1e-4;
    let v = if u + CHORD <= 1.0 { u + CHORD } else { u - CHORD };
    let run = bezier_coord(x1, x2, v) - bezier_coord(x1, x2, u);
    if run == 0.0 {
        return 0.0;
    }
    (bezier_coord(y1, y2, v) - bezier_coord(y1, y2, u)) / run
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
