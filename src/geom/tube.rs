//! Swept half-annulus tube mesh generation.
//!
//! Walks a curve at fixed parameter increments, places a partial-annulus
//! cross-section at each station using the transport frame, and emits a
//! double-walled shell as an indexed triangle mesh. The mesh is built once
//! per scene; the per-frame path never touches it.

use super::core::{Tolerance, Vec3};
use super::curve::Curve3;
use super::frame::{self, FrameError, WORLD_UP};
use super::mesh::{MeshDiagnostics, TriMesh, finalize_mesh};

/// Cross-section shape of the tube shell.
///
/// Only the lower half of the annulus is generated (angular span [π, 2π]);
/// the upper half of the slide is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeProfile {
    pub inner_radius: f64,
    pub wall_thickness: f64,
}

impl Default for TubeProfile {
    fn default() -> Self {
        Self {
            inner_radius: 1.25,
            wall_thickness: 0.15,
        }
    }
}

/// Sampling resolution for tube generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TubeOptions {
    /// Number of longitudinal stations along the curve.
    pub segments: usize,
    /// Number of angular samples per cross-section.
    pub radial_segments: usize,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            segments: 300,
            radial_segments: 32,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TubeError {
    #[error("tube inner radius must be finite and > 0")]
    InvalidInnerRadius,
    #[error("tube wall thickness must be finite and > 0")]
    InvalidWallThickness,
    #[error("tube requires at least 2 longitudinal segments")]
    NotEnoughSegments,
    #[error("tube requires at least 3 radial segments")]
    NotEnoughRadialSegments,
    #[error(transparent)]
    Frame(#[from] FrameError),
}

#[must_use = "the mesh must be handed to the renderer"]
pub fn build_tube_mesh<C: Curve3>(
    curve: &C,
    profile: TubeProfile,
    options: TubeOptions,
) -> Result<(TriMesh, MeshDiagnostics), TubeError> {
    build_tube_mesh_with_tolerance(curve, profile, options, Tolerance::default_geom())
}

/// Sweeps the half-annulus profile along `curve`.
///
/// At station `i` of `S` the curve is sampled at `t = i / S`; each angular
/// sample `j` of `R` sits at `θ = π + (j / R)·π` in the (right, up) plane of
/// the transport frame. Vertices are appended inner-then-outer per `(i, j)`,
/// giving a stride of `2·(R + 1)` per station; inner and outer vertex share
/// the radial normal. The result has `(S+1)·(R+1)·2` vertices and
/// `S·R·12` indices, with no seams between stations or angular samples.
/// Stations are uniform in `t`, not arc length, so triangle area is not
/// uniform along the path.
pub fn build_tube_mesh_with_tolerance<C: Curve3>(
    curve: &C,
    profile: TubeProfile,
    options: TubeOptions,
    tol: Tolerance,
) -> Result<(TriMesh, MeshDiagnostics), TubeError> {
    if !profile.inner_radius.is_finite() || profile.inner_radius <= tol.eps {
        return Err(TubeError::InvalidInnerRadius);
    }
    if !profile.wall_thickness.is_finite() || profile.wall_thickness <= tol.eps {
        return Err(TubeError::InvalidWallThickness);
    }
    if options.segments < 2 {
        return Err(TubeError::NotEnoughSegments);
    }
    if options.radial_segments < 3 {
        return Err(TubeError::NotEnoughRadialSegments);
    }

    let segments = options.segments;
    let radial_segments = options.radial_segments;
    let ring_vertices = (radial_segments + 1) * 2;

    let mut positions: Vec<[f64; 3]> = Vec::with_capacity((segments + 1) * ring_vertices);
    let mut normals: Vec<[f64; 3]> = Vec::with_capacity((segments + 1) * ring_vertices);
    let mut diagnostics = MeshDiagnostics::default();

    let outer_radius = profile.inner_radius + profile.wall_thickness;

    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let frame = frame::transport_frame_at(curve, t)?;
        if frame::is_near_parallel(frame.tangent, WORLD_UP, Tolerance::PARALLEL) {
            diagnostics.frame_fallback_count += 1;
        }

        for j in 0..=radial_segments {
            let theta =
                std::f64::consts::PI + (j as f64 / radial_segments as f64) * std::f64::consts::PI;
            // Unit by construction: cos/sin combination of orthonormal axes.
            let radial: Vec3 = frame
                .right
                .mul_scalar(theta.cos())
                .add(frame.up.mul_scalar(theta.sin()));

            let inner = frame.origin.add_vec(radial.mul_scalar(profile.inner_radius));
            let outer = frame.origin.add_vec(radial.mul_scalar(outer_radius));

            positions.push(inner.to_array());
            positions.push(outer.to_array());
            normals.push(radial.to_array());
            normals.push(radial.to_array());
        }
    }

    // Two triangles per quad per wall. Winding keeps face normals pointing
    // away from the tube surface; the shell is rendered double-sided.
    let stride = ring_vertices as u32;
    let mut indices: Vec<u32> = Vec::with_capacity(segments * radial_segments * 12);
    for i in 0..segments as u32 {
        for j in 0..radial_segments as u32 {
            let i0 = i * stride + j * 2;
            let i1 = i0 + 2;
            let i2 = (i + 1) * stride + j * 2;
            let i3 = i2 + 2;
            // Inner wall.
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            // Outer wall, opposite winding.
            indices.extend_from_slice(&[i0 + 1, i1 + 1, i2 + 1, i1 + 1, i3 + 1, i2 + 1]);
        }
    }

    if diagnostics.frame_fallback_count > 0 {
        diagnostics.warnings.push(format!(
            "{} stations used a fallback frame axis",
            diagnostics.frame_fallback_count
        ));
    }

    let mesh = TriMesh::new(positions, normals, indices);
    finalize_mesh(&mesh, tol, &mut diagnostics);
    Ok((mesh, diagnostics))
}
