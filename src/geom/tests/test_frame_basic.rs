use crate::geom::{
    CatmullRomCurve3, Curve3, HelixParams, Point3, Tolerance, Vec3, WORLD_UP,
    helix_control_points, transport_frame_at, transport_frame_with_up,
};

fn helix_curve() -> CatmullRomCurve3 {
    let points = helix_control_points(&HelixParams::default()).expect("valid helix");
    CatmullRomCurve3::new(points).expect("valid control points")
}

#[test]
fn frames_are_orthonormal_along_the_helix() {
    let curve = helix_curve();
    let tol = Tolerance::LOOSE;

    for i in 0..=500 {
        let t = i as f64 / 500.0;
        let frame = transport_frame_at(&curve, t).expect("frame");
        assert!(frame.is_orthonormal(tol), "frame at t={t} not orthonormal");
    }
}

#[test]
fn frame_right_follows_tangent_cross_world_up() {
    let curve = helix_curve();
    let tol = Tolerance::LOOSE;

    for i in 0..=50 {
        let t = i as f64 / 50.0;
        let frame = transport_frame_at(&curve, t).expect("frame");
        let expected = frame
            .tangent
            .cross(WORLD_UP)
            .normalized()
            .expect("helix tangent never parallel to world up");
        assert!(tol.approx_eq_vec3(frame.right, expected));
    }
}

#[test]
fn frame_origin_sits_on_the_curve() {
    let curve = helix_curve();
    let tol = Tolerance::LOOSE;

    for i in 0..=20 {
        let t = i as f64 / 20.0;
        let frame = transport_frame_at(&curve, t).expect("frame");
        assert!(tol.approx_eq_point3(frame.origin, curve.point_at(t)));
    }
}

#[test]
fn vertical_tangent_falls_back_to_secondary_axis() {
    // A straight vertical path: every tangent is parallel to WORLD_UP.
    let curve = CatmullRomCurve3::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
    ])
    .expect("valid control points");

    let tol = Tolerance::LOOSE;
    let frame = transport_frame_at(&curve, 0.5).expect("fallback frame");
    assert!(frame.is_orthonormal(tol));
    // World Z is the documented fallback reference: right = tangent × Z.
    assert!(tol.approx_eq_vec3(frame.tangent, Vec3::Y));
    assert!(tol.approx_eq_vec3(frame.right, Vec3::Y.cross(Vec3::Z)));
}

#[test]
fn fallback_frames_are_deterministic() {
    let curve = CatmullRomCurve3::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 3.0, 0.0),
    ])
    .expect("valid control points");

    let a = transport_frame_at(&curve, 0.25).expect("frame");
    let b = transport_frame_at(&curve, 0.25).expect("frame");
    assert_eq!(a, b);
}

#[test]
fn custom_up_reference_is_honored() {
    let curve = helix_curve();
    let tol = Tolerance::LOOSE;

    let frame = transport_frame_with_up(&curve, 0.3, Vec3::Z).expect("frame");
    assert!(frame.is_orthonormal(tol));
    let tangent = curve.tangent_at(0.3).expect("tangent");
    let expected = tangent.cross(Vec3::Z).normalized().expect("non-parallel");
    assert!(tol.approx_eq_vec3(frame.right, expected));
}
