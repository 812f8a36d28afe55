use super::core::{Point3, Tolerance, Vec3};
use super::curve::Curve3;

/// Reference up axis of the scene. The slide descends along Y, so tangents
/// never align with it for any valid helix.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Local orthonormal basis at a point on a curve.
///
/// Recomputed per query from the tangent and a fixed reference axis rather
/// than propagated incrementally along the curve, so repeated queries at the
/// same parameter always agree. Tube generation and body transport share
/// this solver; that is what keeps the body seated on the tube wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportFrame {
    /// Point on the curve the frame is anchored at.
    pub origin: Point3,
    /// Unit tangent (direction of travel).
    pub tangent: Vec3,
    /// `normalize(tangent × up_reference)`.
    pub right: Vec3,
    /// `normalize(right × tangent)`.
    pub up: Vec3,
}

impl TransportFrame {
    /// True when the axes are pairwise orthogonal and unit length within `tol`.
    #[must_use]
    pub fn is_orthonormal(&self, tol: Tolerance) -> bool {
        tol.approx_eq_f64(self.tangent.length(), 1.0)
            && tol.approx_eq_f64(self.right.length(), 1.0)
            && tol.approx_eq_f64(self.up.length(), 1.0)
            && tol.approx_eq_f64(self.tangent.dot(self.right), 0.0)
            && tol.approx_eq_f64(self.tangent.dot(self.up), 0.0)
            && tol.approx_eq_f64(self.right.dot(self.up), 0.0)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("curve tangent is zero-length or non-finite at the queried parameter")]
    DegenerateTangent,
}

/// Computes the transport frame at parameter `t` against [`WORLD_UP`].
pub fn transport_frame_at<C: Curve3>(curve: &C, t: f64) -> Result<TransportFrame, FrameError> {
    transport_frame_with_up(curve, t, WORLD_UP)
}

/// Computes the transport frame at parameter `t` against an arbitrary
/// reference up axis.
///
/// When the tangent is near-parallel to the reference axis the cross product
/// collapses; instead of normalizing a near-zero vector, a deterministic
/// secondary axis is substituted (world Z, then world X) and a warning is
/// logged. `Err(DegenerateTangent)` only occurs when the tangent itself is
/// unusable, which validated control points rule out.
pub fn transport_frame_with_up<C: Curve3>(
    curve: &C,
    t: f64,
    up_reference: Vec3,
) -> Result<TransportFrame, FrameError> {
    let origin = curve.point_at(t);
    let tangent = curve
        .tangent_at(t)
        .filter(|v| v.is_finite())
        .ok_or(FrameError::DegenerateTangent)?;

    let reference = stable_reference(tangent, up_reference, Tolerance::PARALLEL);
    let right = tangent
        .cross(reference)
        .normalized()
        .ok_or(FrameError::DegenerateTangent)?;
    let up = right
        .cross(tangent)
        .normalized()
        .ok_or(FrameError::DegenerateTangent)?;

    Ok(TransportFrame {
        origin,
        tangent,
        right,
        up,
    })
}

/// True when `tangent` is too close to parallel with `reference` for their
/// cross product to be normalized safely. Mesh builders use this to count
/// fallback stations in diagnostics.
#[must_use]
pub fn is_near_parallel(tangent: Vec3, reference: Vec3, tol: Tolerance) -> bool {
    tangent.cross(reference).length_squared() <= tol.eps_squared()
}

/// Picks a reference axis that is not parallel to the tangent.
fn stable_reference(tangent: Vec3, preferred: Vec3, tol: Tolerance) -> Vec3 {
    if !is_near_parallel(tangent, preferred, tol) {
        return preferred;
    }
    log::warn!("transport frame: tangent parallel to up reference, substituting fallback axis");
    if tangent.cross(Vec3::Z).length_squared() > tol.eps_squared() {
        Vec3::Z
    } else {
        Vec3::X
    }
}
