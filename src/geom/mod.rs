mod core;
mod curve;
mod frame;
mod helix;
mod mesh;
mod tube;

pub use core::{Point3, Tolerance, Transform, Vec3};
pub use curve::{CatmullRomCurve3, Curve3, CurveError};
pub use frame::{
    FrameError, TransportFrame, WORLD_UP, is_near_parallel, transport_frame_at,
    transport_frame_with_up,
};
pub use helix::{HelixError, HelixParams, helix_control_points, helix_control_points_with_tolerance};
pub use mesh::{MeshDiagnostics, MeshError, TriMesh};
pub use tube::{
    TubeError, TubeOptions, TubeProfile, build_tube_mesh, build_tube_mesh_with_tolerance,
};

#[cfg(test)]
mod tests;
