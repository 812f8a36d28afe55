use serde::Serialize;

use super::core::{Point3, Tolerance};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh indices are not a triangle list (len % 3 != 0)")]
    NonTriangleIndices,
    #[error("mesh has invalid vertex coordinates (NaN/Inf)")]
    InvalidVertexCoordinates,
    #[error("mesh has out-of-bounds vertex indices")]
    IndexOutOfBounds,
    #[error("mesh normal buffer does not match vertex count")]
    NormalCountMismatch,
}

/// Indexed triangle mesh with per-vertex normals.
///
/// Built once at scene setup, owned by the scene, and read every frame by
/// the renderer; nothing in the crate mutates it after construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriMesh {
    pub positions: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

impl TriMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, normals: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            indices,
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Returns true if indices represent a triangle list.
    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if !self.has_triangle_indices() {
            return Err(MeshError::NonTriangleIndices);
        }
        if self.has_invalid_vertices() {
            return Err(MeshError::InvalidVertexCoordinates);
        }
        if !self.has_valid_indices() {
            return Err(MeshError::IndexOutOfBounds);
        }
        if self.normals.len() != self.positions.len() {
            return Err(MeshError::NormalCountMismatch);
        }
        Ok(())
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, ...]`.
    ///
    /// This is a zero-copy view over `positions`, useful for wasm/JS adapters
    /// that expect packed numeric buffers.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice(&self.positions)
    }

    /// Returns the normal buffer as a flat slice: `[nx0, ny0, nz0, nx1, ...]`.
    #[must_use]
    pub fn normals_flat(&self) -> &[f64] {
        flatten_f64_array_slice(&self.normals)
    }
}

fn flatten_f64_array_slice(data: &[[f64; 3]]) -> &[f64] {
    let count = data.len().checked_mul(3).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; 3]]` is stored contiguously, and the element count is `len * 3`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}

/// Diagnostics collected while building a mesh.
///
/// Returned alongside the mesh so callers can inspect quality without
/// re-walking the buffers.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct MeshDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,
    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,
    /// Number of zero-area triangles detected (not removed; the strip
    /// topology keeps indexing uniform).
    pub degenerate_triangle_count: usize,
    /// Number of stations where the frame solver fell back to a secondary
    /// reference axis.
    pub frame_fallback_count: usize,
    /// Human-readable warnings accumulated during generation.
    pub warnings: Vec<String>,
}

impl MeshDiagnostics {
    /// True when generation finished without degeneracies or warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.degenerate_triangle_count == 0
            && self.frame_fallback_count == 0
            && self.warnings.is_empty()
    }
}

/// Counts zero-area triangles and fills the count fields of `diagnostics`.
pub(crate) fn finalize_mesh(mesh: &TriMesh, tol: Tolerance, diagnostics: &mut MeshDiagnostics) {
    diagnostics.vertex_count = mesh.vertex_count();
    diagnostics.triangle_count = mesh.triangle_count();
    diagnostics.degenerate_triangle_count = count_degenerate_triangles(mesh, tol);
    if diagnostics.degenerate_triangle_count > 0 {
        diagnostics.warnings.push(format!(
            "mesh contains {} zero-area triangles",
            diagnostics.degenerate_triangle_count
        ));
    }
}

fn count_degenerate_triangles(mesh: &TriMesh, tol: Tolerance) -> usize {
    mesh.indices
        .chunks_exact(3)
        .filter(|tri| {
            let a = point_from(mesh.positions[tri[0] as usize]);
            let b = point_from(mesh.positions[tri[1] as usize]);
            let c = point_from(mesh.positions[tri[2] as usize]);
            let double_area = b.sub_point(a).cross(c.sub_point(a)).length();
            double_area <= tol.eps
        })
        .count()
}

fn point_from(p: [f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}
