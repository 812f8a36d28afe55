use super::core::{Point3, Tolerance};

/// Parameters for the downward helical path skeleton.
///
/// Defaults match the slide scene: 40 units tall, radius 8.5, a little over
/// four turns, sampled 200 times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixParams {
    pub height: f64,
    pub radius: f64,
    pub turns: f64,
    pub samples: usize,
}

impl Default for HelixParams {
    fn default() -> Self {
        Self {
            height: 40.0,
            radius: 8.5,
            turns: 4.125,
            samples: 200,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HelixError {
    #[error("helix parameters must be finite")]
    NonFiniteParameter,
    #[error("helix radius must be > 0")]
    InvalidRadius,
    #[error("helix height must be > 0")]
    InvalidHeight,
    #[error("helix turns must be > 0")]
    InvalidTurns,
    #[error("helix requires at least 2 samples")]
    NotEnoughSamples,
    #[error("helix sampling produced coincident consecutive points")]
    DegenerateControlPoints,
}

/// Generates the ordered control-point skeleton of a downward helix.
///
/// For sample index `i` of `N`, `u = i / N`, `angle = u * 2π * turns`,
/// `x = radius·cos(angle)`, `z = radius·sin(angle)`,
/// `y = height/2 − u·height` (top to bottom). Points are evenly spaced in
/// `u`, not in arc length. Fully deterministic.
pub fn helix_control_points(params: &HelixParams) -> Result<Vec<Point3>, HelixError> {
    helix_control_points_with_tolerance(params, Tolerance::default_geom())
}

pub fn helix_control_points_with_tolerance(
    params: &HelixParams,
    tol: Tolerance,
) -> Result<Vec<Point3>, HelixError> {
    if !params.height.is_finite() || !params.radius.is_finite() || !params.turns.is_finite() {
        return Err(HelixError::NonFiniteParameter);
    }
    if params.radius <= 0.0 {
        return Err(HelixError::InvalidRadius);
    }
    if params.height <= 0.0 {
        return Err(HelixError::InvalidHeight);
    }
    if params.turns <= 0.0 {
        return Err(HelixError::InvalidTurns);
    }
    if params.samples < 2 {
        return Err(HelixError::NotEnoughSamples);
    }

    let mut points = Vec::with_capacity(params.samples + 1);
    for i in 0..=params.samples {
        let u = i as f64 / params.samples as f64;
        let angle = u * std::f64::consts::TAU * params.turns;
        points.push(Point3::new(
            angle.cos() * params.radius,
            params.height / 2.0 - u * params.height,
            angle.sin() * params.radius,
        ));
    }

    // A zero-length segment here would surface later as a zero tangent, so
    // reject it at construction time.
    if points.windows(2).any(|w| tol.approx_eq_point3(w[0], w[1])) {
        return Err(HelixError::DegenerateControlPoints);
    }

    Ok(points)
}
