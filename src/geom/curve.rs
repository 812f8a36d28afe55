use super::core::{Point3, Tolerance, Vec3};

/// A parametric 3D curve over a normalized domain.
///
/// Implementations are immutable after construction and hold no per-call
/// state, so they are safe to query from multiple call sites.
pub trait Curve3 {
    fn point_at(&self, t: f64) -> Point3;

    #[must_use]
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn derivative_at(&self, t: f64) -> Vec3;

    /// Returns the unit tangent vector at parameter `t`.
    /// Returns `None` if the derivative is zero or degenerate.
    #[must_use]
    fn tangent_at(&self, t: f64) -> Option<Vec3> {
        self.derivative_at(t).normalized()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CurveError {
    #[error("interpolating curve requires at least 2 control points")]
    TooFewControlPoints,
    #[error("control points must be finite")]
    NonFiniteControlPoint,
    #[error("consecutive control points coincide; tangent would be zero-length")]
    DegenerateControlPoints,
}

/// Uniform Catmull-Rom spline through a sequence of control points.
///
/// The curve passes through every control point and is first-derivative
/// continuous across segment boundaries. Endpoints are handled with
/// reflected phantom points, so `point_at(0.0)` is exactly the first
/// control point and `point_at(1.0)` exactly the last. Parameters outside
/// [0, 1] are clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve3 {
    points: Vec<Point3>,
}

impl CatmullRomCurve3 {
    /// Validates and wraps the control points.
    ///
    /// Duplicate consecutive points are rejected here rather than surfacing
    /// later as a zero-length tangent inside a frame query.
    pub fn new(points: Vec<Point3>) -> Result<Self, CurveError> {
        Self::with_tolerance(points, Tolerance::default_geom())
    }

    pub fn with_tolerance(points: Vec<Point3>, tol: Tolerance) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewControlPoints);
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(CurveError::NonFiniteControlPoint);
        }
        if points
            .windows(2)
            .any(|w| tol.approx_eq_point3(w[0], w[1]))
        {
            return Err(CurveError::DegenerateControlPoints);
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Maps the global parameter to a segment index and local parameter,
    /// then gathers the four control points for that segment. Phantom
    /// endpoints are reflections: `p[-1] = 2 p[0] - p[1]` and the mirror at
    /// the tail.
    fn segment_at(&self, t: f64) -> (Point3, Point3, Point3, Point3, f64, f64) {
        let n = self.points.len();
        let segments = (n - 1) as f64;
        let s = t.clamp(0.0, 1.0) * segments;
        let i = (s.floor() as usize).min(n - 2);
        let u = s - i as f64;

        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p0 = if i == 0 {
            reflect(self.points[0], self.points[1])
        } else {
            self.points[i - 1]
        };
        let p3 = if i + 2 < n {
            self.points[i + 2]
        } else {
            reflect(self.points[n - 1], self.points[n - 2])
        };

        (p0, p1, p2, p3, u, segments)
    }
}

impl Curve3 for CatmullRomCurve3 {
    fn point_at(&self, t: f64) -> Point3 {
        let (p0, p1, p2, p3, u, _) = self.segment_at(t);
        let u2 = u * u;
        let u3 = u2 * u;
        point_weighted_sum4(
            p0,
            0.5 * (-u + 2.0 * u2 - u3),
            p1,
            0.5 * (2.0 - 5.0 * u2 + 3.0 * u3),
            p2,
            0.5 * (u + 4.0 * u2 - 3.0 * u3),
            p3,
            0.5 * (-u2 + u3),
        )
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        let (p0, p1, p2, p3, u, segments) = self.segment_at(t);
        let u2 = u * u;
        let local = p0
            .to_vec3()
            .mul_scalar(0.5 * (-1.0 + 4.0 * u - 3.0 * u2))
            .add(p1.to_vec3().mul_scalar(0.5 * (-10.0 * u + 9.0 * u2)))
            .add(p2.to_vec3().mul_scalar(0.5 * (1.0 + 8.0 * u - 9.0 * u2)))
            .add(p3.to_vec3().mul_scalar(0.5 * (-2.0 * u + 3.0 * u2)));
        // Chain rule: the local parameter runs `segments` times faster than t.
        local.mul_scalar(segments)
    }
}

fn reflect(anchor: Point3, other: Point3) -> Point3 {
    anchor.add_vec(anchor.sub_point(other))
}

fn point_weighted_sum4(
    p0: Point3,
    w0: f64,
    p1: Point3,
    w1: f64,
    p2: Point3,
    w2: f64,
    p3: Point3,
    w3: f64,
) -> Point3 {
    Point3::new(
        p0.x * w0 + p1.x * w1 + p2.x * w2 + p3.x * w3,
        p0.y * w0 + p1.y * w1 + p2.y * w2 + p3.y * w3,
        p0.z * w0 + p1.z * w1 + p2.z * w2 + p3.z * w3,
    )
}
