use crate::geom::{
    CatmullRomCurve3, HelixParams, Tolerance, TubeError, TubeOptions, TubeProfile,
    build_tube_mesh, helix_control_points,
};

fn small_helix_curve() -> CatmullRomCurve3 {
    let params = HelixParams {
        height: 10.0,
        radius: 4.0,
        turns: 1.5,
        samples: 40,
    };
    let points = helix_control_points(&params).expect("valid helix");
    CatmullRomCurve3::new(points).expect("valid control points")
}

#[test]
fn tube_buffer_sizes_match_resolution() {
    let curve = small_helix_curve();
    let options = TubeOptions {
        segments: 8,
        radial_segments: 6,
    };

    let (mesh, diag) = build_tube_mesh(&curve, TubeProfile::default(), options)
        .expect("tube should build");

    let s = options.segments;
    let r = options.radial_segments;
    assert_eq!(mesh.vertex_count(), (s + 1) * (r + 1) * 2);
    assert_eq!(mesh.indices.len(), s * r * 12);
    assert_eq!(mesh.normals.len(), mesh.vertex_count());
    assert_eq!(diag.vertex_count, mesh.vertex_count());
    assert_eq!(diag.triangle_count, mesh.triangle_count());
}

#[test]
fn tube_mesh_is_valid_and_clean() {
    let curve = small_helix_curve();
    let options = TubeOptions {
        segments: 16,
        radial_segments: 8,
    };

    let (mesh, diag) = build_tube_mesh(&curve, TubeProfile::default(), options)
        .expect("tube should build");

    mesh.validate().expect("valid mesh buffers");
    assert_eq!(diag.degenerate_triangle_count, 0);
    assert_eq!(diag.frame_fallback_count, 0);
    assert!(diag.is_clean(), "warnings: {:?}", diag.warnings);
}

#[test]
fn tube_normals_are_unit_length() {
    let curve = small_helix_curve();
    let (mesh, _) = build_tube_mesh(&curve, TubeProfile::default(), TubeOptions {
        segments: 6,
        radial_segments: 5,
    })
    .expect("tube should build");

    let tol = Tolerance::LOOSE;
    for n in &mesh.normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!(tol.approx_eq_f64(len, 1.0));
    }
}

#[test]
fn tube_inner_and_outer_vertices_share_station_center() {
    let curve = small_helix_curve();
    let profile = TubeProfile {
        inner_radius: 1.0,
        wall_thickness: 0.25,
    };
    let (mesh, _) = build_tube_mesh(&curve, profile, TubeOptions {
        segments: 4,
        radial_segments: 4,
    })
    .expect("tube should build");

    // Outer vertex = inner vertex + thickness along the shared normal.
    let tol = Tolerance::LOOSE;
    for v in 0..mesh.vertex_count() / 2 {
        let inner = mesh.positions[v * 2];
        let outer = mesh.positions[v * 2 + 1];
        let normal = mesh.normals[v * 2];
        for axis in 0..3 {
            let expected = inner[axis] + normal[axis] * profile.wall_thickness;
            assert!(tol.approx_eq_f64(outer[axis], expected));
        }
    }
}

#[test]
fn tube_rejects_invalid_profile_and_resolution() {
    let curve = small_helix_curve();

    let result = build_tube_mesh(
        &curve,
        TubeProfile {
            inner_radius: 0.0,
            wall_thickness: 0.15,
        },
        TubeOptions::default(),
    );
    assert!(matches!(result, Err(TubeError::InvalidInnerRadius)));

    let result = build_tube_mesh(
        &curve,
        TubeProfile {
            inner_radius: 1.25,
            wall_thickness: -0.1,
        },
        TubeOptions::default(),
    );
    assert!(matches!(result, Err(TubeError::InvalidWallThickness)));

    let result = build_tube_mesh(&curve, TubeProfile::default(), TubeOptions {
        segments: 1,
        radial_segments: 8,
    });
    assert!(matches!(result, Err(TubeError::NotEnoughSegments)));

    let result = build_tube_mesh(&curve, TubeProfile::default(), TubeOptions {
        segments: 8,
        radial_segments: 2,
    });
    assert!(matches!(result, Err(TubeError::NotEnoughRadialSegments)));
}

#[test]
fn tube_build_is_deterministic() {
    let curve = small_helix_curve();
    let options = TubeOptions {
        segments: 10,
        radial_segments: 6,
    };

    let (a, _) = build_tube_mesh(&curve, TubeProfile::default(), options).expect("tube");
    let (b, _) = build_tube_mesh(&curve, TubeProfile::default(), options).expect("tube");
    assert_eq!(a, b);
}
