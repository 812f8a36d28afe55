use crate::geom::{HelixError, HelixParams, Tolerance, helix_control_points};

#[test]
fn helix_default_matches_scene_constants() {
    let params = HelixParams::default();
    assert_eq!(params.height, 40.0);
    assert_eq!(params.radius, 8.5);
    assert_eq!(params.turns, 4.125);
    assert_eq!(params.samples, 200);
}

#[test]
fn helix_runs_top_to_bottom() {
    let params = HelixParams::default();
    let points = helix_control_points(&params).expect("valid helix");

    assert_eq!(points.len(), params.samples + 1);

    let first = points[0];
    let last = points[points.len() - 1];
    assert_eq!(first.y, params.height / 2.0);
    assert_eq!(last.y, -params.height / 2.0);
    // Sample 0 sits at angle 0.
    assert_eq!(first.x, params.radius);
    assert_eq!(first.z, 0.0);
}

#[test]
fn helix_points_stay_on_cylinder() {
    let params = HelixParams::default();
    let points = helix_control_points(&params).expect("valid helix");

    let tol = Tolerance::LOOSE;
    for p in &points {
        let radial = (p.x * p.x + p.z * p.z).sqrt();
        assert!(tol.approx_eq_f64(radial, params.radius));
    }
}

#[test]
fn helix_descends_monotonically() {
    let points = helix_control_points(&HelixParams::default()).expect("valid helix");
    for w in points.windows(2) {
        assert!(w[1].y < w[0].y);
    }
}

#[test]
fn helix_is_deterministic() {
    let params = HelixParams {
        height: 12.0,
        radius: 3.0,
        turns: 2.5,
        samples: 64,
    };
    let a = helix_control_points(&params).expect("valid helix");
    let b = helix_control_points(&params).expect("valid helix");
    assert_eq!(a, b);
}

#[test]
fn helix_rejects_bad_parameters() {
    let base = HelixParams::default();

    let result = helix_control_points(&HelixParams { radius: 0.0, ..base });
    assert!(matches!(result, Err(HelixError::InvalidRadius)));

    let result = helix_control_points(&HelixParams { height: -1.0, ..base });
    assert!(matches!(result, Err(HelixError::InvalidHeight)));

    let result = helix_control_points(&HelixParams { turns: 0.0, ..base });
    assert!(matches!(result, Err(HelixError::InvalidTurns)));

    let result = helix_control_points(&HelixParams { samples: 1, ..base });
    assert!(matches!(result, Err(HelixError::NotEnoughSamples)));

    let result = helix_control_points(&HelixParams {
        height: f64::INFINITY,
        ..base
    });
    assert!(matches!(result, Err(HelixError::NonFiniteParameter)));
}
